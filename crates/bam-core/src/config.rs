use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BamConfig {
    #[serde(default)]
    pub recall: RecallConfig,
    #[serde(default)]
    pub noise: NoiseTrialConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    /// Upper bound on ping-pong passes before recall is reported as
    /// non-convergent.
    pub max_iterations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseTrialConfig {
    /// Corrupted copies generated per stored pattern
    pub trials: usize,
    /// Distinct components flipped in each copy
    pub flips: usize,
    /// Seed for the corruption RNG; equal seeds give identical reports
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Emit LaTeX tables instead of plain text
    pub latex: bool,
    /// Highlight mismatching components with ANSI colors (plain text only)
    pub color: bool,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self { max_iterations: 32 }
    }
}

impl Default for NoiseTrialConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            flips: 1,
            seed: 42,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            latex: false,
            color: true,
        }
    }
}

impl BamConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BamConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults, then the file (if it exists), then the environment.
    pub fn load_layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = BamConfig::default();
        if let Some(path) = path {
            if path.exists() {
                config = Self::from_file(path)?;
            }
        }
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub(crate) fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: std::str::FromStr>(key: &str, val: &str) -> Result<T, ConfigError> {
            val.trim()
                .parse()
                .map_err(|_| ConfigError::Validation(format!("Invalid {}", key)))
        }

        if let Some(val) = lookup("BAM_RECALL_MAX_ITERATIONS") {
            self.recall.max_iterations = parse("BAM_RECALL_MAX_ITERATIONS", &val)?;
        }
        if let Some(val) = lookup("BAM_NOISE_TRIALS") {
            self.noise.trials = parse("BAM_NOISE_TRIALS", &val)?;
        }
        if let Some(val) = lookup("BAM_NOISE_FLIPS") {
            self.noise.flips = parse("BAM_NOISE_FLIPS", &val)?;
        }
        if let Some(val) = lookup("BAM_NOISE_SEED") {
            self.noise.seed = parse("BAM_NOISE_SEED", &val)?;
        }
        if let Some(val) = lookup("BAM_REPORT_LATEX") {
            self.report.latex = parse("BAM_REPORT_LATEX", &val)?;
        }
        if let Some(val) = lookup("BAM_REPORT_COLOR") {
            self.report.color = parse("BAM_REPORT_COLOR", &val)?;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recall.max_iterations == 0 {
            return Err(ConfigError::Validation(
                "recall.max_iterations must be > 0".to_string(),
            ));
        }
        if self.recall.max_iterations > 100_000 {
            return Err(ConfigError::Validation(
                "recall.max_iterations must be <= 100000".to_string(),
            ));
        }
        if self.noise.trials == 0 {
            return Err(ConfigError::Validation(
                "noise.trials must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Export configuration to TOML string
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = self
            .to_toml_string()
            .map_err(|e| ConfigError::Validation(format!("TOML serialization error: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}
