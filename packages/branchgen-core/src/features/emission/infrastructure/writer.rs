//! Suite files on disk

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::features::emission::domain::{EmissionError, EmissionResult, TestSuite};
use crate::features::emission::ports::SuiteRenderer;

/// Writes `<root>/<namespace path>/<Suite>.<ext>`, replacing existing files
pub struct SuiteWriter<R: SuiteRenderer> {
    renderer: R,
    root: PathBuf,
}

impl<R: SuiteRenderer> SuiteWriter<R> {
    pub fn new(renderer: R, root: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, suite: &TestSuite) -> PathBuf {
        self.root.join(suite.relative_path(self.renderer.file_extension()))
    }

    pub fn write(&self, suite: &TestSuite) -> EmissionResult<PathBuf> {
        if suite.is_empty() {
            return Err(EmissionError::EmptySuite(suite.qualified_name()));
        }
        let path = self.path_for(suite);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| EmissionError::write(dir, e))?;
        }
        fs::write(&path, self.renderer.render(suite)).map_err(|e| EmissionError::write(&path, e))?;
        debug!(suite = %suite.qualified_name(), tests = suite.len(), path = %path.display(), "Wrote suite");
        Ok(path)
    }

    /// Stops at the first failure
    pub fn write_all(&self, suites: &[TestSuite]) -> EmissionResult<Vec<PathBuf>> {
        suites.iter().map(|suite| self.write(suite)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::emission::infrastructure::JUnitKotlinRenderer;
    use crate::features::synthesis::domain::{CallStep, CoverageGoal, Receiver, TestCase, TestTarget};

    fn suite(namespace: &str, tests: usize) -> TestSuite {
        let test = TestCase {
            target: TestTarget {
                declaration: None,
                function_qualified_name: "main".into(),
                function_name: "main".into(),
                file: "Main.kt".into(),
            },
            name: "mainBasic".into(),
            bindings: Vec::new(),
            call: CallStep {
                receiver: Receiver::None,
                function: "main".into(),
                arguments: Vec::new(),
                captures_result: false,
            },
            assertions: Vec::new(),
            setup: None,
            required_symbols: Vec::new(),
            goal: CoverageGoal::Basic,
        };
        TestSuite {
            name: "MainTest".into(),
            namespace: namespace.into(),
            declaration: "main".into(),
            imports: Vec::new(),
            setup: None,
            test_cases: vec![test; tests],
        }
    }

    #[test]
    fn test_write_creates_namespace_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SuiteWriter::new(JUnitKotlinRenderer::new(), dir.path());
        let path = writer.write(&suite("com.demo", 1)).unwrap();

        assert_eq!(path, dir.path().join("com/demo/MainTest.kt"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("package com.demo\n"));
        assert!(content.contains("fun mainBasic()"));
    }

    #[test]
    fn test_write_rejects_empty_suite() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SuiteWriter::new(JUnitKotlinRenderer::new(), dir.path());
        assert!(matches!(
            writer.write(&suite("com.demo", 0)),
            Err(EmissionError::EmptySuite(name)) if name == "com.demo.MainTest"
        ));
    }

    #[test]
    fn test_write_failure_is_reported() {
        // EDGE CASE: the output root is a regular file
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();
        let writer = SuiteWriter::new(JUnitKotlinRenderer::new(), &blocker);
        assert!(matches!(writer.write(&suite("com.demo", 1)), Err(EmissionError::Write { .. })));
    }
}
