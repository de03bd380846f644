pub mod file_detector;
pub mod manager;
pub mod text_extractor;
