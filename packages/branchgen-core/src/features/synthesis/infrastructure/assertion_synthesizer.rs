//! Oracle selection
//!
//! Heuristic table keyed by return family, primary-atom shape and outcome,
//! with an optional exact-value override for simple TRUE arms. The override
//! applies only to realized bindings.

use crate::config::OracleMode;
use crate::features::program_model::FunctionDecl;
use crate::features::synthesis::domain::{Assertion, BoundOp};

use super::atom_shape::{AtomShape, CompareOp, Emptiness};
use super::simulation::simulate;
use super::value_pool::TypeFamily;
use super::value_synthesizer::Bindings;

/// Coarse return-type classes the table dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnFamily {
    Numeric,
    Textual,
    Boolean,
    Void,
    Other,
}

impl ReturnFamily {
    pub fn of(function: &FunctionDecl) -> Self {
        if function.is_void() {
            return ReturnFamily::Void;
        }
        match TypeFamily::of(&function.return_type).non_null() {
            f if f.is_numeric() => ReturnFamily::Numeric,
            TypeFamily::String => ReturnFamily::Textual,
            TypeFamily::Boolean => ReturnFamily::Boolean,
            TypeFamily::Unit => ReturnFamily::Void,
            _ => ReturnFamily::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssertionSynthesizer {
    oracle: OracleMode,
}

impl AssertionSynthesizer {
    pub fn new(oracle: OracleMode) -> Self {
        Self { oracle }
    }

    pub fn for_basic(&self, function: &FunctionDecl) -> Vec<Assertion> {
        match ReturnFamily::of(function) {
            ReturnFamily::Void => vec![Assertion::CompletesWithoutError],
            _ => vec![Assertion::NotNull],
        }
    }

    /// Assertions for an if-branch outcome
    ///
    /// `primary` is the first atom of the condition; `arm` is the value of the
    /// arm taken when the condition holds.
    pub fn for_branch(
        &self,
        function: &FunctionDecl,
        primary: Option<&AtomShape>,
        outcome: bool,
        arm: Option<&str>,
        bindings: &Bindings,
    ) -> Vec<Assertion> {
        let family = ReturnFamily::of(function);
        if family == ReturnFamily::Void {
            return vec![Assertion::CompletesWithoutError];
        }

        let mut assertions = vec![Assertion::NotNull];
        // an else arm may fall through to later branches, so only TRUE is exact
        if outcome {
            if let Some(exact) = self.exact(function, arm, bindings) {
                assertions.push(exact);
                return assertions;
            }
        }

        let is_parameter = |name: &str| function.parameter(name).is_some();
        let returns = TypeFamily::of(&function.return_type);
        match (family, primary) {
            (ReturnFamily::Numeric, Some(AtomShape::Compare { subject, measure, op, .. })) => {
                match op {
                    CompareOp::Gt | CompareOp::Ge => {
                        let (op, bound) = if outcome { (BoundOp::Gt, 0) } else { (BoundOp::Le, 0) };
                        assertions.extend(bound_check(&returns, op, bound));
                    }
                    CompareOp::Lt | CompareOp::Le => {
                        let (op, bound) = if outcome { (BoundOp::Lt, 100) } else { (BoundOp::Ge, 100) };
                        assertions.extend(bound_check(&returns, op, bound));
                    }
                    CompareOp::Eq | CompareOp::Ne if measure.is_none() && is_parameter(subject) => {
                        let expected = outcome == (*op == CompareOp::Eq);
                        assertions.push(Assertion::MatchesParameter {
                            parameter: subject.clone(),
                            expected,
                        });
                    }
                    _ => {}
                }
            }
            (ReturnFamily::Textual, Some(AtomShape::Emptiness { check, .. }))
                if matches!(check, Emptiness::Empty | Emptiness::Blank) =>
            {
                assertions.push(if outcome {
                    Assertion::NotEmpty
                } else {
                    Assertion::EmptyOrMentions("empty".to_string())
                });
            }
            (
                ReturnFamily::Textual,
                Some(AtomShape::Compare {
                    subject,
                    measure: None,
                    op: CompareOp::Eq,
                    ..
                }),
            ) if is_parameter(subject) => {
                assertions.push(Assertion::ContainsParameter {
                    parameter: subject.clone(),
                    expected: outcome,
                });
            }
            (ReturnFamily::Boolean, _) => assertions.push(Assertion::IsBoolean(outcome)),
            _ => {}
        }
        assertions
    }

    /// Assertions for a when arm selected by `literal`
    pub fn for_when_entry(
        &self,
        function: &FunctionDecl,
        literal: Option<&str>,
        arm: Option<&str>,
        bindings: &Bindings,
    ) -> Vec<Assertion> {
        let family = ReturnFamily::of(function);
        if family == ReturnFamily::Void {
            return vec![Assertion::CompletesWithoutError];
        }
        let mut assertions = vec![Assertion::NotNull];
        if let Some(exact) = self.exact(function, arm, bindings) {
            assertions.push(exact);
        } else if let (ReturnFamily::Textual, Some(literal)) = (family, literal) {
            assertions.push(Assertion::ContainsLiteral(literal.to_string()));
        }
        assertions
    }

    fn exact(&self, function: &FunctionDecl, arm: Option<&str>, bindings: &Bindings) -> Option<Assertion> {
        if self.oracle != OracleMode::Exact || !bindings.realized {
            return None;
        }
        let value = simulate(arm?, &bindings.values, &TypeFamily::of(&function.return_type))?;
        Some(Assertion::Equals(value))
    }
}

fn bound_check(returns: &TypeFamily, op: BoundOp, bound: i64) -> Option<Assertion> {
    let value = returns.number(bound)?;
    Some(Assertion::Bound { op, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::program_model::Parameter;
    use crate::features::synthesis::domain::{LiteralValue, ParameterBinding};
    use crate::shared::models::{LineSpan, ScopeId};

    fn function(return_type: &str, params: &[(&str, &str)]) -> FunctionDecl {
        FunctionDecl {
            name: "doWork".to_string(),
            qualified_name: "doWork".to_string(),
            owner: None,
            file: "Work.kt".to_string(),
            span: LineSpan::new(1, 5),
            return_type: return_type.to_string(),
            parameters: params.iter().map(|(n, t)| Parameter::new(*n, *t)).collect(),
            scope: ScopeId::function("doWork"),
            is_private: false,
            is_suspend: false,
            is_local: false,
            receiver: None,
        }
    }

    fn bind(name: &str, value: i64) -> ParameterBinding {
        ParameterBinding {
            name: name.to_string(),
            type_name: "Int".to_string(),
            value: LiteralValue::Int(value),
        }
    }

    fn realized(values: Vec<ParameterBinding>) -> Bindings {
        Bindings {
            values,
            variadic: None,
            realized: true,
        }
    }

    fn none() -> Bindings {
        Bindings::default()
    }

    #[test]
    fn test_numeric_greater_than() {
        let f = function("Int", &[("a", "Int"), ("b", "Int")]);
        let synth = AssertionSynthesizer::new(OracleMode::Heuristic);
        let shape = AtomShape::of("a > 19");

        let when_true = synth.for_branch(&f, Some(&shape), true, Some("a + b"), &none());
        assert_eq!(
            when_true,
            vec![
                Assertion::NotNull,
                Assertion::Bound {
                    op: BoundOp::Gt,
                    value: LiteralValue::Int(0)
                }
            ]
        );
        let when_false = synth.for_branch(&f, Some(&shape), false, None, &none());
        assert_eq!(
            when_false[1],
            Assertion::Bound {
                op: BoundOp::Le,
                value: LiteralValue::Int(0)
            }
        );
    }

    #[test]
    fn test_equality_on_parameter() {
        let f = function("Int", &[("a", "Int"), ("b", "Int")]);
        let synth = AssertionSynthesizer::new(OracleMode::Heuristic);
        let eq = AtomShape::of("b == 0");
        let ne = AtomShape::of("b != 0");

        assert_eq!(
            synth.for_branch(&f, Some(&eq), false, None, &none())[1],
            Assertion::MatchesParameter {
                parameter: "b".into(),
                expected: false
            }
        );
        assert_eq!(
            synth.for_branch(&f, Some(&ne), false, None, &none())[1],
            Assertion::MatchesParameter {
                parameter: "b".into(),
                expected: true
            }
        );
    }

    #[test]
    fn test_exact_mode_true_arm_only() {
        let f = function("Int", &[("a", "Int"), ("b", "Int")]);
        let synth = AssertionSynthesizer::new(OracleMode::Exact);
        let shape = AtomShape::of("b == 0");
        let bindings = realized(vec![bind("a", 0), bind("b", 0)]);

        assert_eq!(
            synth.for_branch(&f, Some(&shape), true, Some("0"), &bindings),
            vec![Assertion::NotNull, Assertion::Equals(LiteralValue::Int(0))]
        );
        // FALSE stays heuristic even with an arm
        assert_eq!(
            synth.for_branch(&f, Some(&shape), false, Some("0"), &bindings)[1],
            Assertion::MatchesParameter {
                parameter: "b".into(),
                expected: false
            }
        );
    }

    #[test]
    fn test_textual_boolean_void_other() {
        let synth = AssertionSynthesizer::new(OracleMode::Heuristic);
        let text = function("String", &[("s", "String")]);
        let empty = AtomShape::of("s.isEmpty()");
        assert_eq!(synth.for_branch(&text, Some(&empty), true, None, &none())[1], Assertion::NotEmpty);
        assert_eq!(
            synth.for_branch(&text, Some(&empty), false, None, &none())[1],
            Assertion::EmptyOrMentions("empty".into())
        );

        let flag = function("Boolean", &[("n", "Int")]);
        assert_eq!(
            synth.for_branch(&flag, Some(&AtomShape::of("n > 3")), false, None, &none())[1],
            Assertion::IsBoolean(false)
        );

        let void = function("Unit", &[]);
        assert_eq!(
            synth.for_branch(&void, None, true, None, &none()),
            vec![Assertion::CompletesWithoutError]
        );

        let other = function("Report", &[]);
        assert_eq!(synth.for_branch(&other, None, true, None, &none()), vec![Assertion::NotNull]);
    }

    #[test]
    fn test_when_entry_assertions() {
        let synth = AssertionSynthesizer::new(OracleMode::Heuristic);
        let text = function("String", &[("op", "String")]);
        assert_eq!(
            synth.for_when_entry(&text, Some("\"add\""), Some("\"sum\""), &none()),
            vec![Assertion::NotNull, Assertion::ContainsLiteral("\"add\"".into())]
        );
        let number = function("Int", &[("x", "Int")]);
        assert_eq!(
            synth.for_when_entry(&number, Some("1"), None, &none()),
            vec![Assertion::NotNull]
        );
    }

    #[test]
    fn test_exact_mode_needs_realized_bindings() {
        let f = function("Int", &[("a", "Int"), ("b", "Int")]);
        let synth = AssertionSynthesizer::new(OracleMode::Exact);
        let shape = AtomShape::of("a > 19");
        let unrealized = Bindings {
            realized: false,
            ..realized(vec![bind("a", 1), bind("b", 0)])
        };

        // the arm simulates, but the values never reach it
        assert_eq!(
            synth.for_branch(&f, Some(&shape), true, Some("a + b"), &unrealized),
            vec![
                Assertion::NotNull,
                Assertion::Bound {
                    op: BoundOp::Gt,
                    value: LiteralValue::Int(0)
                }
            ]
        );

        let text = function("String", &[]);
        assert_eq!(
            synth.for_when_entry(&text, None, Some("\"Negative\""), &none()),
            vec![Assertion::NotNull]
        );
        assert_eq!(
            synth.for_when_entry(&text, None, Some("\"Negative\""), &realized(Vec::new())),
            vec![Assertion::NotNull, Assertion::Equals(LiteralValue::str("Negative"))]
        );
    }
}
