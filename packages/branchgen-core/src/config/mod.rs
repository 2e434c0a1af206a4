//! Configuration system
//!
//! - Level 1: [`Preset`] (fast, balanced, thorough)
//! - Level 2: stage overrides through builder closures
//! - Level 3: versioned YAML (`version: 1`)
//!
//! ```rust,ignore
//! use branchgen_core::config::{BranchgenConfig, Preset};
//!
//! let config = BranchgenConfig::preset(Preset::Fast)
//!     .synthesis(|c| c.seed(7))
//!     .build()?;
//! let from_file = BranchgenConfig::from_yaml("branchgen.yaml")?;
//! ```

pub mod branchgen_config;
pub mod error;
pub mod io;
pub mod preset;
pub mod stage_configs;

// Re-exports
pub use branchgen_config::BranchgenConfig;
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ConfigOverrides};
pub use preset::Preset;
pub use stage_configs::{
    AnalysisConfig, CombinationPolicy, DiscoveryConfig, EmissionConfig, OracleMode,
    ParallelConfig, SynthesisConfig,
};
