//! Truth-assignment selection per branch

use crate::config::{CombinationPolicy, SynthesisConfig};
use crate::features::synthesis::domain::{Assignment, Condition};
use crate::shared::models::{Diagnostic, DiagnosticKind};
use crate::shared::utils::SeededRandom;

use super::decomposer::evaluate;

/// Assignments chosen for one condition plus what went wrong on the way
#[derive(Debug, Clone, Default)]
pub struct Combinations {
    pub assignments: Vec<Assignment>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone)]
pub struct CombinationGenerator {
    policy: CombinationPolicy,
    max_exhaustive_atoms: usize,
    attempt_budget: usize,
}

impl CombinationGenerator {
    pub fn new(policy: CombinationPolicy, max_exhaustive_atoms: usize, attempt_budget: usize) -> Self {
        Self {
            policy,
            max_exhaustive_atoms,
            attempt_budget,
        }
    }

    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self::new(config.policy, config.max_exhaustive_atoms, config.attempt_budget)
    }

    pub fn generate(&self, atoms: &[Condition], rng: &mut SeededRandom) -> Combinations {
        match self.policy {
            CombinationPolicy::Exhaustive if atoms.len() <= self.max_exhaustive_atoms => Combinations {
                assignments: exhaustive(atoms),
                diagnostics: Vec::new(),
            },
            CombinationPolicy::Exhaustive => {
                let mut combinations = self.outcome_targeted(atoms, rng);
                combinations.diagnostics.insert(
                    0,
                    Diagnostic::new(
                        DiagnosticKind::CoverageSearchExhausted,
                        format!(
                            "{} atoms exceed the exhaustive limit of {}; using outcome-targeted search",
                            atoms.len(),
                            self.max_exhaustive_atoms
                        ),
                    ),
                );
                combinations
            }
            CombinationPolicy::OutcomeTargeted => self.outcome_targeted(atoms, rng),
        }
    }

    /// Search until both outcomes appear or the budget runs out
    pub fn outcome_targeted(&self, atoms: &[Condition], rng: &mut SeededRandom) -> Combinations {
        let mut found: [Option<Assignment>; 2] = [None, None];
        let mut order = Vec::with_capacity(2);

        for attempt in 0..self.attempt_budget {
            let values = match attempt {
                0 => vec![true; atoms.len()],
                // one constructive attempt toward the missing outcome
                1 => {
                    let target = found[1].is_none();
                    atoms.iter().map(|a| target ^ a.negated).collect()
                }
                _ => atoms.iter().map(|_| rng.coin()).collect(),
            };
            let outcome = evaluate(atoms, &values);
            let slot = &mut found[outcome as usize];
            if slot.is_none() {
                *slot = Some(Assignment { values, outcome });
                order.push(outcome);
            }
            if found.iter().all(Option::is_some) {
                break;
            }
        }

        let mut combinations = Combinations::default();
        if order.len() < 2 {
            let text: Vec<&str> = atoms.iter().map(|a| a.text.as_str()).collect();
            combinations.diagnostics.push(Diagnostic::new(
                DiagnosticKind::CoverageSearchExhausted,
                format!(
                    "only {} of 2 outcomes reached for '{}' within {} attempts",
                    order.len(),
                    text.join(" "),
                    self.attempt_budget
                ),
            ));
        }
        for outcome in order {
            if let Some(assignment) = found[outcome as usize].take() {
                combinations.assignments.push(assignment);
            }
        }
        combinations
    }
}

/// Every assignment, all-true first; bit i of the mask drives atom i
pub fn exhaustive(atoms: &[Condition]) -> Vec<Assignment> {
    let n = atoms.len();
    (0..1u64 << n)
        .rev()
        .map(|mask| {
            let values: Vec<bool> = (0..n).map(|i| mask >> i & 1 == 1).collect();
            let outcome = evaluate(atoms, &values);
            Assignment { values, outcome }
        })
        .collect()
}
