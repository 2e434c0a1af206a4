//! Program Model Feature
//!
//! Normalized, language-neutral view of the analyzed sources: declarations,
//! variables, conditional branches, loops, references, calls and one
//! [`LineContext`] per physical line.
//!
//! ## Structure
//! - `domain/` - ProgramModel and its records
//! - `ports/` - ModelExtractor trait
//! - `application/` - BuildProgramModelUseCase (parallel per-file build, ordered merge)
//! - `infrastructure/` - ModelBuilder (single-pass tree visitor)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::{BuildProgramModelUseCase, ModelBuildResult};
pub use domain::*;
pub use infrastructure::ModelBuilder;
pub use ports::{ModelExtractor, ModelFragment};
