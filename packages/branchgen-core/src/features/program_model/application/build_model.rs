//! Build program model use case

use rayon::prelude::*;
use tracing::{debug, info};

use crate::features::parsing::domain::SourceTree;
use crate::features::program_model::domain::ProgramModel;
use crate::features::program_model::ports::{ModelExtractor, ModelFragment};
use crate::shared::models::Diagnostic;

/// Merged model plus every diagnostic raised while building it
#[derive(Debug, Clone, Default)]
pub struct ModelBuildResult {
    pub model: ProgramModel,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build program model use case
pub struct BuildProgramModelUseCase<E: ModelExtractor> {
    extractor: E,
}

impl<E: ModelExtractor> BuildProgramModelUseCase<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    /// Build all files in parallel, then merge the fragments in input order
    pub fn execute(&self, trees: &[SourceTree]) -> ModelBuildResult {
        let fragments: Vec<ModelFragment> = trees
            .par_iter()
            .map(|tree| self.extractor.extract(tree))
            .collect();

        let mut result = ModelBuildResult::default();
        for fragment in fragments {
            result.model.merge(fragment.model);
            result.diagnostics.extend(fragment.diagnostics);
        }

        for diagnostic in &result.diagnostics {
            diagnostic.log();
        }

        let stats = result.model.statistics();
        info!(
            files = stats.files,
            classes = stats.classes,
            functions = stats.functions,
            branches = stats.branches,
            variables = stats.variables,
            "Program model built"
        );
        debug!(
            skipped = trees.len().saturating_sub(stats.files),
            diagnostics = result.diagnostics.len(),
            "Program model diagnostics"
        );
        result
    }
}
