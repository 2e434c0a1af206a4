//! Name-based variable filter
//!
//! Stands in for symbol resolution: a name is a variable if some Variable,
//! function parameter or loop variable carries it. Everything else (types,
//! functions, properties reached through `this`) is discarded.

use rustc_hash::FxHashSet;

use crate::features::program_model::{LoopKind, ProgramModel};
use crate::shared::utils::{identifiers_in, is_identifier};

#[derive(Debug, Clone, Default)]
pub struct VariableReferenceFilter {
    known: FxHashSet<String>,
}

impl VariableReferenceFilter {
    pub fn from_model(model: &ProgramModel) -> Self {
        let mut known = FxHashSet::default();
        known.extend(model.variables.iter().map(|v| v.name.clone()));
        for function in &model.functions {
            known.extend(function.parameters.iter().map(|p| p.name.clone()));
        }
        for lp in model.loops.iter().filter(|l| l.kind == LoopKind::For) {
            if let Some(variable) = lp.variable.as_deref() {
                known.extend(loop_variable_names(variable).into_iter().map(str::to_string));
            }
        }
        Self { known }
    }

    pub fn accepts(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

/// `i` or the parts of `(k, v)`
pub(crate) fn loop_variable_names(text: &str) -> Vec<&str> {
    let text = text.trim();
    if is_identifier(text) {
        vec![text]
    } else {
        identifiers_in(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::program_model::fixture::ModelFixture;

    #[test]
    fn test_accepts_known_names_only() {
        let model = ModelFixture::new("A.kt", "fun f(a: Int) {\n  val x = a\n  for ((k, v) in m) {}\n}")
            .function("f", None, (1, 4), &[("a", "Int")], "Unit")
            .variable("x", 2, Some("a"))
            .for_loop("(k, v)", "m", 3)
            .build();
        let filter = VariableReferenceFilter::from_model(&model);

        for name in ["a", "x", "k", "v"] {
            assert!(filter.accepts(name), "{} should be known", name);
        }
        assert!(!filter.accepts("m"));
        assert!(!filter.accepts("println"));
        assert_eq!(filter.len(), 4);
    }

    #[test]
    fn test_loop_variable_names() {
        assert_eq!(loop_variable_names("i"), vec!["i"]);
        assert_eq!(loop_variable_names("(key, value)"), vec!["key", "value"]);
    }
}
