//! Emission Feature
//!
//! Groups synthesized test cases into one suite per declaration, renders
//! each suite as JUnit 5 Kotlin source and writes it under the test root.
//!
//! ## Structure
//! - `domain/` - TestSuite, EmissionError
//! - `ports/` - SuiteRenderer trait
//! - `application/` - EmitSuitesUseCase
//! - `infrastructure/` - TestSuiteAssembler, JUnitKotlinRenderer, SuiteWriter

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::{EmissionReport, EmitSuitesUseCase};
pub use domain::*;
pub use infrastructure::{JUnitKotlinRenderer, SuiteWriter, TestSuiteAssembler};
pub use ports::SuiteRenderer;
