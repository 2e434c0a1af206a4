/*
 * branchgen - Static analysis and branch-coverage test synthesis
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (LineSpan, ScopeId, Diagnostic) and utilities
 * - features/    : Vertical slices (parsing → program_model → data_flow → synthesis → emission)
 * - pipeline/    : Orchestration
 * - config/      : Presets, YAML loading, validation
 *
 * Per-file parsing and model extraction run on rayon; everything after the
 * merge runs single-threaded over the complete model.
 */

// Crate-level lint configuration
#![allow(clippy::too_many_arguments)] // Synthesis helpers thread several tables
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (pipeline stages)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{BranchgenConfig, Preset};
pub use errors::{BranchgenError, Result};
pub use features::program_model::ProgramModel;
pub use features::synthesis::TestCase;
pub use pipeline::{GenerationPipeline, PipelineReport};
