//! Configuration loading from TOML with environment variable overrides.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section is optional; missing sections take the defaults of the
//! reference run (K = 2, lenient input, no capacity).

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;

use crate::selection::SelectorConfig;
use crate::types::{step_limit_from, InputPolicy};

/// Env var naming an items file, overriding `input.items_path`.
pub const ITEMS_ENV: &str = "SATCHEL_ITEMS";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub selector: SelectorSection,
    #[serde(default)]
    pub input: InputSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SelectorSection {
    /// Signed on purpose: zero or negative means select nothing.
    #[serde(default = "default_step_limit")]
    pub step_limit: i64,
    #[serde(default)]
    pub policy: InputPolicy,
    #[serde(default)]
    pub capacity: Option<Decimal>,
}

impl Default for SelectorSection {
    fn default() -> Self {
        Self {
            step_limit: default_step_limit(),
            policy: InputPolicy::default(),
            capacity: None,
        }
    }
}

fn default_step_limit() -> i64 {
    2
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct InputSection {
    /// JSON item list. When absent the reference items are used.
    pub items_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputSection {
    /// Print the report as pretty JSON instead of a text line.
    #[serde(default)]
    pub json: bool,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// The items file to read, if any. `SATCHEL_ITEMS` wins over the file.
    pub fn items_path(&self) -> Option<String> {
        std::env::var(ITEMS_ENV)
            .ok()
            .filter(|p| !p.is_empty())
            .or_else(|| self.input.items_path.clone())
    }

    /// Convert to the library's selector configuration.
    pub fn selector_config(&self) -> SelectorConfig {
        SelectorConfig {
            step_limit: step_limit_from(self.selector.step_limit),
            policy: self.selector.policy,
            capacity: self.selector.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_config() {
        // Requires config.toml in the working directory (the crate root
        // under `cargo test`).
        let result = AppConfig::load("config.toml");
        if let Ok(cfg) = result {
            assert_eq!(cfg.selector.step_limit, 2);
            assert_eq!(cfg.selector.policy, InputPolicy::Lenient);
            assert!(!cfg.output.json);
        }
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.selector.step_limit, 2);
        assert_eq!(cfg.selector_config(), SelectorConfig::default());
        assert!(cfg.input.items_path.is_none());
    }

    #[test]
    fn test_full_config() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [selector]
            step_limit = 3
            policy = "strict"
            capacity = 12.5

            [input]
            items_path = "items.json"

            [output]
            json = true
            "#,
        )
        .unwrap();
        let sel = cfg.selector_config();
        assert_eq!(sel.step_limit, 3);
        assert_eq!(sel.policy, InputPolicy::Strict);
        assert_eq!(sel.capacity, Some(dec!(12.5)));
        assert_eq!(cfg.input.items_path.as_deref(), Some("items.json"));
        assert!(cfg.output.json);
    }

    #[test]
    fn test_items_path_env_override() {
        // Only test in this crate that touches SATCHEL_ITEMS.
        let cfg = AppConfig::from_toml_str("[input]\nitems_path = \"from_file.json\"\n").unwrap();

        std::env::set_var(ITEMS_ENV, "from_env.json");
        assert_eq!(cfg.items_path().as_deref(), Some("from_env.json"));

        std::env::set_var(ITEMS_ENV, "");
        assert_eq!(cfg.items_path().as_deref(), Some("from_file.json"));

        std::env::remove_var(ITEMS_ENV);
        assert_eq!(cfg.items_path().as_deref(), Some("from_file.json"));
        assert!(AppConfig::default().items_path().is_none());
    }

    #[test]
    fn test_negative_step_limit_selects_nothing() {
        let cfg = AppConfig::from_toml_str("[selector]\nstep_limit = -4\n").unwrap();
        assert_eq!(cfg.selector_config().step_limit, 0);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(AppConfig::from_toml_str("[selector]\npolicy = \"paranoid\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load("/tmp/satchel_missing_config_xyz.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
