//! Project and model builders

use std::fs;
use std::path::Path;

use branchgen_core::config::{BranchgenConfig, ParallelConfig, Preset};
use branchgen_core::features::data_flow::{DataFlowAnalyzer, DataFlowResult, HeuristicDataFlowAnalyzer};
use branchgen_core::features::parsing::{KotlinFrontEnd, SourceFrontEnd};
use branchgen_core::features::program_model::{ModelBuildResult, ModelBuilder, BuildProgramModelUseCase};
use branchgen_core::GenerationPipeline;
use tempfile::TempDir;

/// Temporary Gradle-style project: `files` are relative to the root
pub struct ProjectBuilder {
    files: Vec<(String, String)>,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Add a file under `src/main/kotlin`
    pub fn main_source(self, relative: &str, source: &str) -> Self {
        self.file(&format!("src/main/kotlin/{}", relative), source)
    }

    pub fn file(mut self, relative: &str, source: &str) -> Self {
        self.files.push((relative.to_string(), source.to_string()));
        self
    }

    pub fn build(self) -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        for (relative, source) in &self.files {
            write_file(dir.path(), relative, source);
        }
        dir
    }
}

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    fs::write(path, content).expect("write fixture");
}

/// Front end and builder on one in-memory file
pub fn build_model(path: &str, source: &str) -> ModelBuildResult {
    let tree = KotlinFrontEnd::new().parse(path, source).expect("front end");
    BuildProgramModelUseCase::new(ModelBuilder::new()).execute(&[tree])
}

pub fn analyze(path: &str, source: &str) -> DataFlowResult {
    let built = build_model(path, source);
    HeuristicDataFlowAnalyzer::default()
        .analyze(&built.model)
        .expect("analysis")
}

/// Balanced preset on two threads
pub fn pipeline() -> GenerationPipeline {
    GenerationPipeline::new(test_config())
}

pub fn test_config() -> BranchgenConfig {
    BranchgenConfig::preset(Preset::Balanced).parallel(|_| ParallelConfig { num_threads: 2 })
}
