//! Emit suites use case

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::config::EmissionConfig;
use crate::errors::Result;
use crate::features::emission::domain::TestSuite;
use crate::features::emission::infrastructure::{SuiteWriter, TestSuiteAssembler};
use crate::features::emission::ports::SuiteRenderer;
use crate::features::synthesis::domain::TestCase;

/// Suites built and, unless dry, the files written for them
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmissionReport {
    pub suites: Vec<TestSuite>,
    pub written: Vec<PathBuf>,
}

pub struct EmitSuitesUseCase<R: SuiteRenderer> {
    renderer: R,
    assembler: TestSuiteAssembler,
}

impl<R: SuiteRenderer> EmitSuitesUseCase<R> {
    pub fn new(renderer: R, config: &EmissionConfig) -> Self {
        Self {
            renderer,
            assembler: TestSuiteAssembler::new(config.default_namespace.clone()),
        }
    }

    pub fn assemble(&self, test_cases: &[TestCase]) -> Vec<TestSuite> {
        self.assembler.assemble(test_cases)
    }

    pub fn render(&self, suite: &TestSuite) -> String {
        self.renderer.render(suite)
    }

    /// Assemble and write every suite under `root`
    pub fn execute(self, test_cases: &[TestCase], root: &Path) -> Result<EmissionReport> {
        let suites = self.assemble(test_cases);
        let writer = SuiteWriter::new(self.renderer, root);
        let written = writer.write_all(&suites)?;
        info!(suites = suites.len(), root = %root.display(), "Test suites written");
        Ok(EmissionReport { suites, written })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::emission::infrastructure::JUnitKotlinRenderer;
    use crate::features::synthesis::domain::{CallStep, CoverageGoal, Receiver, TestTarget};

    fn basic(function: &str) -> TestCase {
        TestCase {
            target: TestTarget {
                declaration: None,
                function_qualified_name: format!("demo.{}", function),
                function_name: function.to_string(),
                file: "Util.kt".to_string(),
            },
            name: format!("{}Basic", function),
            bindings: Vec::new(),
            call: CallStep {
                receiver: Receiver::None,
                function: function.to_string(),
                arguments: Vec::new(),
                captures_result: true,
            },
            assertions: Vec::new(),
            setup: None,
            required_symbols: vec![format!("demo.{}", function)],
            goal: CoverageGoal::Basic,
        }
    }

    #[test]
    fn test_execute_writes_one_file_per_suite() {
        let dir = tempfile::tempdir().unwrap();
        let use_case = EmitSuitesUseCase::new(JUnitKotlinRenderer::new(), &EmissionConfig::default());
        let report = use_case
            .execute(&[basic("clamp"), basic("wrap"), basic("clamp")], dir.path())
            .unwrap();

        assert_eq!(report.suites.len(), 2);
        assert_eq!(report.written.len(), 2);
        assert!(dir.path().join("demo/ClampTest.kt").is_file());
        assert!(dir.path().join("demo/WrapTest.kt").is_file());
        assert_eq!(report.suites[0].test_cases[1].name, "clampBasic2");
    }

    #[test]
    fn test_assemble_without_writing() {
        let use_case = EmitSuitesUseCase::new(JUnitKotlinRenderer::new(), &EmissionConfig::default());
        let suites = use_case.assemble(&[basic("clamp")]);
        let source = use_case.render(&suites[0]);
        assert!(source.contains("class ClampTest"));
        // same-namespace target needs no import
        assert!(!source.contains("import demo.clamp"));
    }
}
