//! Program model ports

mod extractor;

pub use extractor::{ModelExtractor, ModelFragment};
