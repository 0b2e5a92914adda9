pub mod action;
pub mod classification;
pub mod digitalization;
pub mod document;
pub mod grade;
pub mod panel;
pub mod recommendation;
