//! Test suites

use std::path::PathBuf;

use serde::Serialize;

use crate::features::synthesis::domain::{SharedSetup, TestCase};

/// Every test of one declaration, ready to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestSuite {
    /// `<Simple>Test`
    pub name: String,
    pub namespace: String,
    /// Class qualified name, or the function's for top-level targets
    pub declaration: String,
    /// Sorted, unique, none from `namespace` itself
    pub imports: Vec<String>,
    pub setup: Option<SharedSetup>,
    /// Names are unique within the suite
    pub test_cases: Vec<TestCase>,
}

impl TestSuite {
    /// `<namespace as dirs>/<name>.<extension>`
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        let mut path: PathBuf = self.namespace.split('.').filter(|s| !s.is_empty()).collect();
        path.push(format!("{}.{}", self.name, extension));
        path
    }

    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    pub fn len(&self) -> usize {
        self.test_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.test_cases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_follows_namespace() {
        let suite = TestSuite {
            name: "CalcTest".to_string(),
            namespace: "com.demo".to_string(),
            declaration: "com.demo.Calc".to_string(),
            imports: Vec::new(),
            setup: None,
            test_cases: Vec::new(),
        };
        assert_eq!(suite.relative_path("kt"), PathBuf::from("com/demo/CalcTest.kt"));
        assert_eq!(suite.qualified_name(), "com.demo.CalcTest");
        assert!(suite.is_empty());
    }
}
