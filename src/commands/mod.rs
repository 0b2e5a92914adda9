pub mod action_commands;
pub mod classification_commands;
pub mod digitalization_commands;
pub mod document_commands;
pub mod recommendation_commands;
pub mod shell_commands;
