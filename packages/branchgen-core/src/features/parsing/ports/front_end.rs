//! Front end port (interface)
//!
//! Defines the contract for turning one source file into a [`SourceTree`].

use crate::errors::Result;
use crate::features::parsing::domain::SourceTree;

/// Front end trait - abstraction over the concrete grammar
///
/// A file the front end cannot make sense of is not an error: it comes back
/// as a tree marked unusable. `Err` is reserved for the front end itself
/// being broken (e.g. the grammar failed to load).
pub trait SourceFrontEnd: Send + Sync {
    fn parse(&self, path: &str, source: &str) -> Result<SourceTree>;

    /// Check if this front end handles the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    fn language_name(&self) -> &'static str;
}
