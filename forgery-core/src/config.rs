//! Engine configuration
//!
//! Loaded from `FORGERY_*` environment variables, a JSON or TOML document,
//! or built in code.

use crate::regexify::MAX_BOUND;
use crate::{FakerError, Locale, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "FORGERY";

/// Configuration for a [`Faker`](crate::Faker).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakerConfig {
    /// Requested locale; lookups fall back through its chain
    pub locale: Locale,
    /// Maximum nesting of directive expansion before `ExpansionTooDeep`
    pub max_depth: usize,
    /// Extra repetitions allowed for unbounded regexify quantifiers (`*`, `+`, `{n,}`)
    pub max_repeat: u32,
    /// Seed for the default random source; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for FakerConfig {
    fn default() -> Self {
        Self {
            locale: Locale::en(),
            max_depth: 64,
            max_repeat: 10,
            seed: None,
        }
    }
}

impl FakerConfig {
    /// Defaults for the given locale.
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    /// Set the locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the expansion depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the cap for unbounded regexify quantifiers.
    pub fn with_max_repeat(mut self, max_repeat: u32) -> Self {
        self.max_repeat = max_repeat;
        self
    }

    /// Seed the default random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Read `FORGERY_LOCALE`, `FORGERY_MAX_DEPTH`, `FORGERY_MAX_REPEAT` and
    /// `FORGERY_SEED`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(locale) = env_var("LOCALE") {
            config.locale = Locale::parse(&locale)?;
        }
        if let Some(depth) = env_var("MAX_DEPTH") {
            config.max_depth = parse_var("MAX_DEPTH", &depth)?;
        }
        if let Some(repeat) = env_var("MAX_REPEAT") {
            config.max_repeat = parse_var("MAX_REPEAT", &repeat)?;
        }
        if let Some(seed) = env_var("SEED") {
            config.seed = Some(parse_var("SEED", &seed)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing fields keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(FakerError::Config("max_depth must be at least 1".to_string()));
        }
        if self.max_repeat > MAX_BOUND {
            return Err(FakerError::Config(format!(
                "max_repeat must be at most {MAX_BOUND}, got {}",
                self.max_repeat
            )));
        }
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}"))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        FakerError::Config(format!("{ENV_PREFIX}_{name} has an invalid value: {raw}"))
    })
}
