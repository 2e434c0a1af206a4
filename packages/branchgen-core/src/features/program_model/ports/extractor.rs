//! Model extractor port (interface)

use crate::features::parsing::domain::SourceTree;
use crate::features::program_model::domain::ProgramModel;
use crate::shared::models::Diagnostic;

/// Model of a single file plus what went wrong while building it
#[derive(Debug, Clone, Default)]
pub struct ModelFragment {
    pub model: ProgramModel,
    pub diagnostics: Vec<Diagnostic>,
}

/// Extractor trait - turns one parsed file into a model fragment
///
/// Never fails: problems are reported as diagnostics on the fragment.
pub trait ModelExtractor: Send + Sync {
    fn extract(&self, tree: &SourceTree) -> ModelFragment;
}
