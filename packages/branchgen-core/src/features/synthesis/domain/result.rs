//! Synthesis output

use serde::Serialize;

use super::test_case::TestCase;
use crate::shared::models::Diagnostic;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SynthesisResult {
    pub test_cases: Vec<TestCase>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SynthesisStatistics {
    pub basic: usize,
    pub branch: usize,
    pub targets: usize,
}

impl SynthesisResult {
    pub fn statistics(&self) -> SynthesisStatistics {
        let basic = self.test_cases.iter().filter(|t| t.is_basic()).count();
        let mut targets: Vec<&str> = self
            .test_cases
            .iter()
            .map(|t| t.target.function_qualified_name.as_str())
            .collect();
        targets.sort_unstable();
        targets.dedup();
        SynthesisStatistics {
            basic,
            branch: self.test_cases.len() - basic,
            targets: targets.len(),
        }
    }

    /// Tests for one function, by simple name
    pub fn tests_for(&self, function: &str) -> Vec<&TestCase> {
        self.test_cases
            .iter()
            .filter(|t| t.target.function_name == function)
            .collect()
    }
}
