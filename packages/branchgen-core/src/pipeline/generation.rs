//! Generation pipeline
//!
//! Runs every stage over one source root. Parsing and model extraction run on
//! a local rayon pool sized by [`ParallelConfig`](crate::config::ParallelConfig);
//! everything after the merge is single-threaded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use crate::config::BranchgenConfig;
use crate::errors::Result;
use crate::features::data_flow::{
    AnalyzeDataFlowUseCase, DataFlowResult, DataFlowStatistics, HeuristicDataFlowAnalyzer,
};
use crate::features::emission::{EmissionReport, EmitSuitesUseCase, JUnitKotlinRenderer, TestSuite};
use crate::features::parsing::{KotlinFrontEnd, ParseSourcesUseCase, SourceInput};
use crate::features::program_model::{
    BuildProgramModelUseCase, ModelBuilder, ModelStatistics, ProgramModel,
};
use crate::features::synthesis::{
    BranchCoverageSynthesizer, SynthesisStatistics, SynthesizeTestsUseCase, TestCase,
};
use crate::shared::models::Diagnostic;

use super::discovery::{discover_sources, read_sources};

// ═══════════════════════════════════════════════════════════════════════════
// Results
// ═══════════════════════════════════════════════════════════════════════════

/// Everything the analysis and synthesis stages produced for one source set
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub model: ProgramModel,
    pub data_flow: DataFlowResult,
    pub test_cases: Vec<TestCase>,
    pub statistics: SynthesisStatistics,
    /// Read, model and synthesis diagnostics, in stage order
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub files: usize,
    pub model: ModelStatistics,
    pub data_flow: DataFlowStatistics,
    pub synthesis: SynthesisStatistics,
    /// Caller key to every callee name it reaches
    pub call_reach: BTreeMap<String, Vec<String>>,
    pub diagnostics: Vec<Diagnostic>,
    pub suites: Vec<TestSuite>,
    /// Empty on a dry run
    pub written: Vec<PathBuf>,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl PipelineReport {
    pub fn test_count(&self) -> usize {
        self.suites.iter().map(TestSuite::len).sum()
    }

    /// Caller reaching the most callees, ties broken by key order
    pub fn widest_reach(&self) -> Option<(&str, usize)> {
        self.call_reach
            .iter()
            .map(|(caller, callees)| (caller.as_str(), callees.len()))
            .fold(None, |best, (caller, n)| match best {
                Some((_, m)) if m >= n => best,
                _ => Some((caller, n)),
            })
    }

    /// Multi-line human summary
    pub fn summary(&self) -> String {
        let reach = match self.widest_reach() {
            Some((caller, n)) => format!(", widest reach {} ({} callees)", caller, n),
            None => String::new(),
        };
        format!(
            "Files analyzed: {}\n\
             Classes: {}  Functions: {}  Branches: {}  Variables: {}  Anomalies: {}\n\
             Call graph: {} callers{}\n\
             Tests: {} basic, {} branch in {} suite(s)\n\
             Diagnostics: {}",
            self.files,
            self.model.classes,
            self.model.functions,
            self.model.branches,
            self.model.variables,
            self.data_flow.anomalies,
            self.data_flow.callers,
            reach,
            self.synthesis.basic,
            self.synthesis.branch,
            self.suites.len(),
            self.diagnostics.len(),
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Pipeline
// ═══════════════════════════════════════════════════════════════════════════

pub struct GenerationPipeline {
    config: BranchgenConfig,
}

impl GenerationPipeline {
    pub fn new(config: BranchgenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BranchgenConfig {
        &self.config
    }

    /// `emission.output_dir`, else `<root>/src/test/kotlin`
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        self.config
            .emission
            .output_dir
            .clone()
            .unwrap_or_else(|| root.join("src").join("test").join("kotlin"))
    }

    /// Parse, build, analyze and synthesize in-memory sources
    pub fn generate(&self, sources: &[SourceInput]) -> Result<Generation> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.parallel.effective_threads())
            .build()?;

        let parse = ParseSourcesUseCase::new(KotlinFrontEnd::new());
        let trees = pool.install(|| parse.execute_batch(sources))?;
        info!(files = trees.len(), threads = pool.current_num_threads(), "Sources parsed");

        let build = BuildProgramModelUseCase::new(ModelBuilder::new());
        let built = pool.install(|| build.execute(&trees));

        let data_flow = AnalyzeDataFlowUseCase::new(HeuristicDataFlowAnalyzer::new(
            self.config.analysis.clone(),
        ))
        .execute(&built.model)?;

        let synthesized =
            SynthesizeTestsUseCase::new(BranchCoverageSynthesizer::new(self.config.synthesis.clone()))
                .execute(&built.model);

        let statistics = synthesized.statistics();
        let mut diagnostics = built.diagnostics;
        diagnostics.extend(synthesized.diagnostics);
        Ok(Generation {
            model: built.model,
            data_flow,
            test_cases: synthesized.test_cases,
            statistics,
            diagnostics,
        })
    }

    /// Every stage, suites written under [`Self::output_dir`]
    pub fn run(&self, root: &Path) -> Result<PipelineReport> {
        self.execute(root, true)
    }

    /// Every stage except writing
    pub fn dry_run(&self, root: &Path) -> Result<PipelineReport> {
        self.execute(root, false)
    }

    fn execute(&self, root: &Path, write: bool) -> Result<PipelineReport> {
        let start = Instant::now();
        let paths = discover_sources(root, &self.config.discovery)?;
        let (sources, read_diagnostics) = read_sources(&paths);
        for diagnostic in &read_diagnostics {
            diagnostic.log();
        }

        let generation = self.generate(&sources)?;
        let emit = EmitSuitesUseCase::new(JUnitKotlinRenderer::new(), &self.config.emission);
        let emitted = if write {
            emit.execute(&generation.test_cases, &self.output_dir(root))?
        } else {
            let suites = emit.assemble(&generation.test_cases);
            info!(suites = suites.len(), "Dry run, nothing written");
            EmissionReport {
                suites,
                written: Vec::new(),
            }
        };

        let mut diagnostics = read_diagnostics;
        diagnostics.extend(generation.diagnostics);

        let report = PipelineReport {
            files: paths.len(),
            model: generation.model.statistics(),
            data_flow: generation.data_flow.statistics(),
            synthesis: generation.statistics,
            call_reach: generation.data_flow.call_graph.reachability(),
            diagnostics,
            suites: emitted.suites,
            written: emitted.written,
            elapsed: start.elapsed(),
        };
        info!(
            files = report.files,
            tests = report.test_count(),
            suites = report.suites.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Generation finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ParallelConfig, Preset};
    use std::fs;

    const CALCULATOR: &str = r#"
package demo

class Calculator(private val base: Int) {
    fun doWork(a: Int, b: Int): Int {
        if (a > 19) {
            return a + b
        } else if (b == 0) {
            return 0
        }
        return a - b
    }
}
"#;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("src/main/kotlin/demo");
        fs::create_dir_all(&main).unwrap();
        fs::write(main.join("Calculator.kt"), CALCULATOR).unwrap();
        dir
    }

    fn pipeline() -> GenerationPipeline {
        GenerationPipeline::new(
            BranchgenConfig::preset(Preset::Balanced).parallel(|_| ParallelConfig { num_threads: 2 }),
        )
    }

    #[test]
    fn test_generate_in_memory() {
        let sources = vec![("Calculator.kt".to_string(), CALCULATOR.to_string())];
        let generation = pipeline().generate(&sources).unwrap();
        assert_eq!(generation.model.classes.len(), 1);
        assert!(generation.test_cases.iter().any(|t| t.name == "doWorkBasic"));
        assert!(generation.test_cases.len() >= 3);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = project();
        let report = pipeline().dry_run(dir.path()).unwrap();

        assert_eq!(report.files, 1);
        assert_eq!(report.suites.len(), 1);
        assert_eq!(report.suites[0].name, "CalculatorTest");
        assert!(report.written.is_empty());
        assert!(!dir.path().join("src/test").exists());
        assert!(report.synthesis.basic >= 1);
        assert!(report.synthesis.branch >= 2);
    }

    #[test]
    fn test_run_writes_into_test_tree() {
        let dir = project();
        let report = pipeline().run(dir.path()).unwrap();

        let expected = dir.path().join("src/test/kotlin/demo/CalculatorTest.kt");
        assert_eq!(report.written, vec![expected.clone()]);
        let content = fs::read_to_string(expected).unwrap();
        assert!(content.contains("class CalculatorTest"));
        assert!(content.contains("testInstance = Calculator("));

        // EDGE CASE: the generated suite is under src/test and is not rediscovered
        let again = pipeline().dry_run(dir.path()).unwrap();
        assert_eq!(again.files, 1);
    }

    #[test]
    fn test_output_dir_override() {
        let dir = project();
        let out = dir.path().join("generated");
        let pipeline = GenerationPipeline::new(
            BranchgenConfig::preset(Preset::Fast).emission(|e| e.output_dir(out.clone())),
        );
        let report = pipeline.run(dir.path()).unwrap();
        assert!(report.written[0].starts_with(&out));
    }

    #[test]
    fn test_report_carries_call_reach() {
        let dir = project();
        fs::write(
            dir.path().join("src/main/kotlin/demo/Main.kt"),
            "package demo\n\nfun main() {\n    report()\n}\n\nfun report() {\n    println(\"done\")\n}\n",
        )
        .unwrap();
        let report = pipeline().dry_run(dir.path()).unwrap();

        assert_eq!(report.call_reach["main"], vec!["println", "report"]);
        assert_eq!(report.widest_reach(), Some(("main", 2)));
        assert!(report.summary().contains("widest reach main (2 callees)"));
    }

    #[test]
    fn test_same_seed_same_suites() {
        let dir = project();
        let first = pipeline().dry_run(dir.path()).unwrap();
        let second = pipeline().dry_run(dir.path()).unwrap();
        assert_eq!(first.suites, second.suites);
    }
}
