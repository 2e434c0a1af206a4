//! Stage-specific configuration types
//!
//! Each pipeline stage has its own configuration struct with validation and
//! per-preset defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;

// ============================================================================
// Data-flow analysis
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Collapse Use records that agree on (variable, file, line, scope)
    ///
    /// Off reproduces the double-count that makes a variable referenced in a
    /// condition look like a redundant definition.
    pub dedupe_uses: bool,

    /// Classify `xs[i]` index references as ArrayIndex uses
    pub classify_array_index: bool,
}

impl AnalysisConfig {
    pub fn from_preset(_preset: Preset) -> Self {
        Self {
            dedupe_uses: true,
            classify_array_index: true,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    /// Builder: Set dedupe_uses
    pub fn dedupe_uses(mut self, v: bool) -> Self {
        self.dedupe_uses = v;
        self
    }

    /// Builder: Set classify_array_index
    pub fn classify_array_index(mut self, v: bool) -> Self {
        self.classify_array_index = v;
        self
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

// ============================================================================
// Test synthesis
// ============================================================================

/// How truth assignments over decomposed atoms are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CombinationPolicy {
    /// Every one of the 2^n assignments
    Exhaustive,
    /// Stop once both overall outcomes have been produced
    OutcomeTargeted,
}

impl CombinationPolicy {
    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "exhaustive" => Ok(Self::Exhaustive),
            "outcome-targeted" | "outcome" => Ok(Self::OutcomeTargeted),
            _ => Err(ConfigError::unknown_value(
                "policy",
                s,
                &["exhaustive", "outcome-targeted"],
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exhaustive => "exhaustive",
            Self::OutcomeTargeted => "outcome-targeted",
        }
    }
}

/// How expected results are asserted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OracleMode {
    /// Direction-qualified bound checks from the shape table
    Heuristic,
    /// Simulate simple arithmetic arms and assert the exact value
    Exact,
}

impl OracleMode {
    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "heuristic" => Ok(Self::Heuristic),
            "exact" => Ok(Self::Exact),
            _ => Err(ConfigError::unknown_value("oracle", s, &["heuristic", "exact"])),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Exact => "exact",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Seed for every random draw (pool sampling, else-values, search)
    pub seed: u64,

    pub policy: CombinationPolicy,

    /// Outcome-targeted attempt budget (1..=10000)
    pub attempt_budget: usize,

    /// Exhaustive falls back to outcome-targeted above this many atoms (1..=16)
    pub max_exhaustive_atoms: usize,

    pub oracle: OracleMode,

    /// Retry bound for picking an unused else-literal (1..=100000)
    pub uniqueness_retry_limit: usize,

    /// Integer else-values are drawn from `else_int_min..else_int_max`
    pub else_int_min: i64,
    pub else_int_max: i64,

    /// Emit one pooled-value test per function in addition to branch tests
    pub basic_tests: bool,
}

impl SynthesisConfig {
    pub fn from_preset(preset: Preset) -> Self {
        let base = Self {
            seed: 42,
            policy: CombinationPolicy::Exhaustive,
            attempt_budget: 100,
            max_exhaustive_atoms: 8,
            oracle: OracleMode::Heuristic,
            uniqueness_retry_limit: 1000,
            else_int_min: -100,
            else_int_max: 100,
            basic_tests: true,
        };
        match preset {
            Preset::Fast => Self {
                policy: CombinationPolicy::OutcomeTargeted,
                attempt_budget: 20,
                ..base
            },
            Preset::Balanced => base,
            Preset::Thorough => Self {
                max_exhaustive_atoms: 12,
                oracle: OracleMode::Exact,
                ..base
            },
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.attempt_budget == 0 || self.attempt_budget > 10_000 {
            return Err(ConfigError::range_with_hint(
                "attempt_budget",
                self.attempt_budget,
                1,
                10_000,
                "The outcome search needs at least one attempt",
            ));
        }
        if self.max_exhaustive_atoms == 0 || self.max_exhaustive_atoms > 16 {
            return Err(ConfigError::range_with_hint(
                "max_exhaustive_atoms",
                self.max_exhaustive_atoms,
                1,
                16,
                "2^n tests per branch grows quickly",
            ));
        }
        if self.uniqueness_retry_limit == 0 || self.uniqueness_retry_limit > 100_000 {
            return Err(ConfigError::range_with_hint(
                "uniqueness_retry_limit",
                self.uniqueness_retry_limit,
                1,
                100_000,
                "Else-value retries must be bounded",
            ));
        }
        if self.else_int_min >= self.else_int_max {
            return Err(ConfigError::Validation(format!(
                "else_int_min ({}) must be below else_int_max ({})",
                self.else_int_min, self.else_int_max
            )));
        }
        Ok(())
    }

    /// Builder: Set seed
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Builder: Set policy
    pub fn policy(mut self, v: CombinationPolicy) -> Self {
        self.policy = v;
        self
    }

    /// Builder: Set attempt_budget
    pub fn attempt_budget(mut self, v: usize) -> Self {
        self.attempt_budget = v;
        self
    }

    /// Builder: Set oracle
    pub fn oracle(mut self, v: OracleMode) -> Self {
        self.oracle = v;
        self
    }

    /// Builder: Set uniqueness_retry_limit
    pub fn uniqueness_retry_limit(mut self, v: usize) -> Self {
        self.uniqueness_retry_limit = v;
        self
    }

    /// Builder: Set the else-value integer range
    pub fn else_int_range(mut self, min: i64, max: i64) -> Self {
        self.else_int_min = min;
        self.else_int_max = max;
        self
    }

    /// Builder: Set basic_tests
    pub fn basic_tests(mut self, v: bool) -> Self {
        self.basic_tests = v;
        self
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

// ============================================================================
// Emission
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionConfig {
    /// Namespace used when neither the target nor its symbols carry one
    pub default_namespace: String,

    /// Output root; `None` means `<project>/src/test/kotlin`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl EmissionConfig {
    pub fn from_preset(_preset: Preset) -> Self {
        Self {
            default_namespace: "com.demo".to_string(),
            output_dir: None,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let valid = !self.default_namespace.is_empty()
            && self
                .default_namespace
                .split('.')
                .all(crate::shared::utils::is_identifier);
        if !valid {
            return Err(ConfigError::Validation(format!(
                "default_namespace '{}' is not a dotted identifier path",
                self.default_namespace
            )));
        }
        Ok(())
    }

    /// Builder: Set default_namespace
    pub fn default_namespace(mut self, v: impl Into<String>) -> Self {
        self.default_namespace = v.into();
        self
    }

    /// Builder: Set output_dir
    pub fn output_dir(mut self, v: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(v.into());
        self
    }
}

impl Default for EmissionConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

// ============================================================================
// Source discovery
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// File extensions to analyze (without the dot)
    pub extensions: Vec<String>,

    /// Path components that exclude a file (`test` skips `src/test/...`)
    pub exclude_components: Vec<String>,
}

impl DiscoveryConfig {
    pub fn from_preset(_preset: Preset) -> Self {
        Self {
            extensions: vec!["kt".to_string()],
            exclude_components: vec!["test".to_string()],
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "discovery.extensions must name at least one extension".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

// ============================================================================
// Parallelism
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Worker threads for parsing and model extraction (0 = all cores)
    pub num_threads: usize,
}

impl ParallelConfig {
    pub fn from_preset(_preset: Preset) -> Self {
        Self { num_threads: 0 }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_threads > 256 {
            return Err(ConfigError::range_with_hint(
                "num_threads",
                self.num_threads,
                0,
                256,
                "Use 0 to match the number of cores",
            ));
        }
        Ok(())
    }

    /// Resolved thread count
    pub fn effective_threads(&self) -> usize {
        if self.num_threads == 0 {
            num_cpus::get()
        } else {
            self.num_threads
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}
