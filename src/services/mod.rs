pub mod classification_service;
pub mod crop_service;
pub mod grade_parser;
pub mod ocr_service;
pub mod recommendation_service;
