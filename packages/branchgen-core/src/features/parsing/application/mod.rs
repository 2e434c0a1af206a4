//! Parsing application layer

mod parse_sources;

pub use parse_sources::{ParseSourcesUseCase, SourceInput};
