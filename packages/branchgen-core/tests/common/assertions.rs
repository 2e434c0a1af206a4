//! Custom assertions

use branchgen_core::features::synthesis::TestCase;
use branchgen_core::shared::models::{Diagnostic, DiagnosticKind};

/// Assert no file was skipped as unparseable
pub fn assert_no_parse_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::ParseError)
        .collect();
    assert!(errors.is_empty(), "Expected no parse errors, got: {:?}", errors);
}

/// Find a test case by name or fail listing the names present
pub fn find_test<'a>(tests: &'a [TestCase], name: &str) -> &'a TestCase {
    tests.iter().find(|t| t.name == name).unwrap_or_else(|| {
        panic!(
            "Expected test '{}', got: {:?}",
            name,
            tests.iter().map(|t| &t.name).collect::<Vec<_>>()
        )
    })
}

/// Assert every needle occurs in the rendered source
pub fn assert_contains_all(content: &str, needles: &[&str]) {
    for needle in needles {
        assert!(
            content.contains(needle),
            "Expected rendered source to contain {:?}:\n{}",
            needle,
            content
        );
    }
}
