//! Emission domain

mod error;
mod suite;

pub use error::{EmissionError, EmissionResult};
pub use suite::TestSuite;
