//! Run configuration, loaded from TOML.
//!
//! ```
//! use homematch::config::MatchConfig;
//! use homematch::assign::Strategy;
//!
//! let config = MatchConfig::from_toml_str(r#"
//!     input = "data/neighborhoods.txt"
//!     attributes = ["E", "W", "R"]
//!     strategy = "top_preference"
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, Strategy::TopPreference);
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assign::Strategy;
use crate::model::attribute::{AttributeSet, Code};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct MatchConfig {
    /// Input file with the neighborhood and homeowner records.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Attribute codes, in the order values are stored and scored.
    #[serde(default = "default_attributes")]
    pub attributes: Vec<Code>,

    #[serde(default)]
    pub strategy: Strategy,
}

fn default_input() -> PathBuf {
    PathBuf::from("data/input.txt")
}

fn default_attributes() -> Vec<Code> {
    AttributeSet::default().codes().to_vec()
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            input: default_input(),
            attributes: default_attributes(),
            strategy: Strategy::default(),
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_attributes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Code>,
    {
        self.attributes = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn attribute_set(&self) -> AttributeSet {
        AttributeSet::new(self.attributes.iter().cloned())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attributes.is_empty() {
            return Err(ConfigError::Invalid("at least one attribute code is required".into()));
        }
        let mut seen = HashSet::new();
        for code in &self.attributes {
            if code.is_empty() || code.contains(|c: char| c == ':' || c == '>' || c.is_whitespace()) {
                return Err(ConfigError::Invalid(format!("invalid attribute code `{}`", code)));
            }
            if !seen.insert(code) {
                return Err(ConfigError::Invalid(format!("attribute code `{}` listed twice", code)));
            }
        }
        Ok(())
    }
}
