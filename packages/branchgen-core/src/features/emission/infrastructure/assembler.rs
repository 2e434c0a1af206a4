//! Suite assembly
//!
//! One suite per target declaration, in the order declarations first appear
//! among the test cases.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::features::emission::domain::TestSuite;
use crate::features::synthesis::domain::TestCase;
use crate::features::synthesis::infrastructure::MOCK_SYMBOL;
use crate::shared::utils::capitalize;

#[derive(Debug, Clone)]
pub struct TestSuiteAssembler {
    default_namespace: String,
}

impl TestSuiteAssembler {
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: default_namespace.into(),
        }
    }

    pub fn assemble(&self, test_cases: &[TestCase]) -> Vec<TestSuite> {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: FxHashMap<&str, Vec<&TestCase>> = FxHashMap::default();
        for test in test_cases {
            let key = test.target.declaration_key();
            groups
                .entry(key)
                .or_insert_with(|| {
                    order.push(key);
                    Vec::new()
                })
                .push(test);
        }

        order
            .into_iter()
            .filter_map(|key| groups.remove(key).map(|tests| self.suite(key, tests)))
            .collect()
    }

    fn suite(&self, declaration: &str, tests: Vec<&TestCase>) -> TestSuite {
        let namespace = self.namespace(declaration, &tests);
        let simple = declaration.rsplit('.').next().unwrap_or(declaration);

        let mut imports: Vec<String> = tests
            .iter()
            .flat_map(|t| &t.required_symbols)
            .filter(|s| namespace_of(s).is_some_and(|ns| ns != namespace))
            .cloned()
            .collect();
        imports.sort();
        imports.dedup();

        TestSuite {
            name: format!("{}Test", capitalize(simple)),
            setup: tests.iter().find_map(|t| t.setup.clone()),
            namespace,
            declaration: declaration.to_string(),
            imports,
            test_cases: unique_names(tests),
        }
    }

    /// Declaration's namespace, else the first dotted symbol's, else the default
    fn namespace(&self, declaration: &str, tests: &[&TestCase]) -> String {
        if let Some(ns) = namespace_of(declaration) {
            return ns.to_string();
        }
        tests
            .iter()
            .flat_map(|t| &t.required_symbols)
            .filter(|s| s.as_str() != MOCK_SYMBOL)
            .find_map(|s| namespace_of(s))
            .unwrap_or(self.default_namespace.as_str())
            .to_string()
    }
}

impl Default for TestSuiteAssembler {
    fn default() -> Self {
        Self::new("com.demo")
    }
}

fn namespace_of(qualified: &str) -> Option<&str> {
    qualified.rsplit_once('.').map(|(ns, _)| ns)
}

/// Repeat names get `2`, `3`, ... in order of appearance
fn unique_names(tests: Vec<&TestCase>) -> Vec<TestCase> {
    let mut taken: FxHashSet<String> = FxHashSet::default();
    let mut next_suffix: FxHashMap<String, usize> = FxHashMap::default();
    tests
        .into_iter()
        .map(|test| {
            let mut test = test.clone();
            if !taken.insert(test.name.clone()) {
                let suffix = next_suffix.entry(test.name.clone()).or_insert(2);
                let mut candidate = format!("{}{}", test.name, suffix);
                while taken.contains(&candidate) {
                    *suffix += 1;
                    candidate = format!("{}{}", test.name, suffix);
                }
                *suffix += 1;
                taken.insert(candidate.clone());
                test.name = candidate;
            }
            test
        })
        .collect()
}
