//! Configuration I/O (YAML loading)
//!
//! Defines YAML schema types. Loading and export live in
//! `branchgen_config.rs`.

use serde::{Deserialize, Serialize};

use super::stage_configs::*;

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    /// Base preset
    #[serde(default = "default_preset_name")]
    pub preset: String,

    /// Fine-grained overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

fn default_preset_name() -> String {
    "balanced".to_string()
}

/// Configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub synthesis: Option<SynthesisConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emission: Option<EmissionConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery: Option<DiscoveryConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelConfig>,
}
