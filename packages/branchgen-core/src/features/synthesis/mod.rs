//! Synthesis Feature
//!
//! Branch-coverage test synthesis: conditions are decomposed into atoms,
//! truth assignments are chosen per branch, parameters are bound to values
//! that realize each assignment and oracle assertions are attached.
//!
//! ## Structure
//! - `domain/` - Condition, LiteralValue, TestCase and its parts
//! - `ports/` - TestSynthesizer trait
//! - `application/` - SynthesizeTestsUseCase
//! - `infrastructure/` - BranchCoverageSynthesizer and its stages

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::SynthesizeTestsUseCase;
pub use domain::*;
pub use infrastructure::{
    decompose, evaluate, AtomShape, BranchCoverageSynthesizer, CombinationGenerator, VarargIndex,
};
pub use ports::TestSynthesizer;
