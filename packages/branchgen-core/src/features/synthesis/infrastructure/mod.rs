//! Synthesis infrastructure
//!
//! Stages in pipeline order:
//! - `decomposer`: condition text to atoms
//! - `combinations`: truth assignments per condition
//! - `value_synthesizer`: parameter values per assignment (with `value_pool`,
//!   `atom_shape` and `vararg_index`)
//! - `assertion_synthesizer`: oracle checks (with `simulation`)
//! - `synthesizer`: drives the stages per function

mod assertion_synthesizer;
mod atom_shape;
mod combinations;
mod decomposer;
mod naming;
mod simulation;
mod synthesizer;
mod value_pool;
mod value_synthesizer;
mod vararg_index;

pub use assertion_synthesizer::{AssertionSynthesizer, ReturnFamily};
pub use atom_shape::{AtomShape, CompareOp, Emptiness, Measure, Operand};
pub(crate) use atom_shape::unquote;
pub use combinations::{exhaustive, CombinationGenerator, Combinations};
pub use decomposer::{decompose, evaluate};
pub use simulation::simulate;
pub use synthesizer::{BranchCoverageSynthesizer, MOCK_SYMBOL};
pub use value_pool::{neutral, TypeFamily, ValuePool};
pub use value_synthesizer::{Bindings, ValueSynthesizer};
pub use vararg_index::VarargIndex;
