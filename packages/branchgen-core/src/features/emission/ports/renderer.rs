//! Suite renderer port (interface)

use crate::features::emission::domain::TestSuite;

/// Renderer trait - turns a suite into target-language source text
pub trait SuiteRenderer: Send + Sync {
    fn render(&self, suite: &TestSuite) -> String;

    /// Extension of written files, without the dot
    fn file_extension(&self) -> &str;
}
