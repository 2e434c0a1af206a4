//! Decomposed condition atoms

use serde::Serialize;

/// Operator joining an atom to the accumulated result on its left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Combinator {
    None,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    /// Trimmed atom text, without a leading `!` when negated
    pub text: String,
    pub combinator: Combinator,
    pub negated: bool,
}

impl Condition {
    pub fn new(text: impl Into<String>, combinator: Combinator, negated: bool) -> Self {
        Self {
            text: text.into(),
            combinator,
            negated,
        }
    }

    /// Value the atom contributes for an assigned inner truth
    pub fn effective(&self, assigned: bool) -> bool {
        assigned ^ self.negated
    }
}

/// One truth assignment over the atoms of a condition
///
/// `values[i]` is the truth of atom i's inner expression; negation is applied
/// during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Assignment {
    pub values: Vec<bool>,
    pub outcome: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_applies_negation() {
        let plain = Condition::new("a", Combinator::None, false);
        let negated = Condition::new("a", Combinator::None, true);
        assert!(plain.effective(true));
        assert!(!negated.effective(true));
        assert!(negated.effective(false));
    }
}
