//! Text processing module
//! Handles normalization of extracted text and resume content analysis

pub mod normalizer;
pub mod stats;
