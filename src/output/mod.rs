pub mod export;
pub mod formatter;
