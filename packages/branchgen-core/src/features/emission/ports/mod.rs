//! Emission ports

mod renderer;

pub use renderer::SuiteRenderer;
