//! Emission application layer

mod emit_suites;

pub use emit_suites::{EmissionReport, EmitSuitesUseCase};
