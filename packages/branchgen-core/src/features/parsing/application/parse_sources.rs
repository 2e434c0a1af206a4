//! Parse sources use case

use rayon::prelude::*;
use tracing::debug;

use crate::errors::Result;
use crate::features::parsing::domain::SourceTree;
use crate::features::parsing::ports::SourceFrontEnd;

/// One file to parse: (path, source text)
pub type SourceInput = (String, String);

/// Parse sources use case
pub struct ParseSourcesUseCase<F: SourceFrontEnd> {
    front_end: F,
}

impl<F: SourceFrontEnd> ParseSourcesUseCase<F> {
    pub fn new(front_end: F) -> Self {
        Self { front_end }
    }

    pub fn front_end(&self) -> &F {
        &self.front_end
    }

    /// Parse a single file
    pub fn execute(&self, path: &str, source: &str) -> Result<SourceTree> {
        self.front_end.parse(path, source)
    }

    /// Parse many files in parallel; output order follows input order
    pub fn execute_batch(&self, files: &[SourceInput]) -> Result<Vec<SourceTree>> {
        let trees = files
            .par_iter()
            .map(|(path, source)| self.front_end.parse(path, source))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            files = trees.len(),
            unusable = trees.iter().filter(|t| !t.is_usable()).count(),
            language = self.front_end.language_name(),
            "Parsed source batch"
        );
        Ok(trees)
    }
}
