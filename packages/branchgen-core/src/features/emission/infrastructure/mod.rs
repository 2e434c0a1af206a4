//! Emission infrastructure

mod assembler;
mod junit_kotlin;
mod kotlin_literals;
mod writer;

pub use assembler::TestSuiteAssembler;
pub use junit_kotlin::JUnitKotlinRenderer;
pub use kotlin_literals::{kotlin_literal, quote};
pub use writer::SuiteWriter;
