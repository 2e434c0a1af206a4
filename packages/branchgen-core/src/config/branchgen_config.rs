//! Top-level configuration
//!
//! Three levels, mirroring how the CLI layers its inputs:
//! 1. a [`Preset`]
//! 2. per-stage builder overrides (`.synthesis(|c| c.seed(7))`)
//! 3. a versioned YAML file

use std::path::Path;

use serde::Serialize;

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, ConfigOverrides};
use super::preset::Preset;
use super::stage_configs::*;

const SUPPORTED_VERSIONS: &[u32] = &[1];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchgenConfig {
    pub preset: Preset,
    pub analysis: AnalysisConfig,
    pub synthesis: SynthesisConfig,
    pub emission: EmissionConfig,
    pub discovery: DiscoveryConfig,
    pub parallel: ParallelConfig,
}

impl BranchgenConfig {
    /// Level 1: complete defaults for a preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            analysis: AnalysisConfig::from_preset(preset),
            synthesis: SynthesisConfig::from_preset(preset),
            emission: EmissionConfig::from_preset(preset),
            discovery: DiscoveryConfig::from_preset(preset),
            parallel: ParallelConfig::from_preset(preset),
        }
    }

    /// Level 2: Override analysis stage
    pub fn analysis<F>(mut self, f: F) -> Self
    where
        F: FnOnce(AnalysisConfig) -> AnalysisConfig,
    {
        self.analysis = f(self.analysis);
        self
    }

    /// Level 2: Override synthesis stage
    pub fn synthesis<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SynthesisConfig) -> SynthesisConfig,
    {
        self.synthesis = f(self.synthesis);
        self
    }

    /// Level 2: Override emission stage
    pub fn emission<F>(mut self, f: F) -> Self
    where
        F: FnOnce(EmissionConfig) -> EmissionConfig,
    {
        self.emission = f(self.emission);
        self
    }

    /// Level 2: Override parallel settings
    pub fn parallel<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ParallelConfig) -> ParallelConfig,
    {
        self.parallel = f(self.parallel);
        self
    }

    /// Validate every stage
    pub fn validate(&self) -> ConfigResult<()> {
        self.analysis.validate()?;
        self.synthesis.validate()?;
        self.emission.validate()?;
        self.discovery.validate()?;
        self.parallel.validate()?;
        Ok(())
    }

    /// Validate and return self
    pub fn build(self) -> ConfigResult<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Level 3: load from a YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Level 3: load from YAML text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = Preset::from_str(&export.preset)?;
        let mut config = Self::preset(preset);

        if let Some(overrides) = export.overrides {
            if let Some(analysis) = overrides.analysis {
                config.analysis = analysis;
            }
            if let Some(synthesis) = overrides.synthesis {
                config.synthesis = synthesis;
            }
            if let Some(emission) = overrides.emission {
                config.emission = emission;
            }
            if let Some(discovery) = overrides.discovery {
                config.discovery = discovery;
            }
            if let Some(parallel) = overrides.parallel {
                config.parallel = parallel;
            }
        }

        config.build()
    }

    /// Export as YAML v1 (every stage written as an override)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: self.preset.to_string(),
            overrides: Some(ConfigOverrides {
                analysis: Some(self.analysis.clone()),
                synthesis: Some(self.synthesis.clone()),
                emission: Some(self.emission.clone()),
                discovery: Some(self.discovery.clone()),
                parallel: Some(self.parallel.clone()),
            }),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }

    /// One-line human-readable summary
    pub fn describe(&self) -> String {
        format!(
            "preset={} policy={} oracle={} seed={} dedupe_uses={}",
            self.preset,
            self.synthesis.policy.as_str(),
            self.synthesis.oracle.as_str(),
            self.synthesis.seed,
            self.analysis.dedupe_uses
        )
    }
}

impl Default for BranchgenConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}
