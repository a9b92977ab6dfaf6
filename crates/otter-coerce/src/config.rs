//! Realm configuration.
//!
//! Controls which exotic-conversion capabilities a realm exposes and how deep
//! native calls may nest.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Symbol capabilities of the host runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolSupport {
    /// Symbols plus per-value `Symbol.toPrimitive` hooks
    #[default]
    Full,
    /// Symbols exist but objects cannot override conversion;
    /// symbol values fall back to `Symbol.prototype.valueOf`.
    Legacy,
    /// No exotic conversion at all
    None,
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON or unknown field values
    #[error("Invalid realm config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Zero call depth would reject every native call
    #[error("max_native_depth must be greater than zero")]
    ZeroDepth,
}

/// Realm configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealmConfig {
    /// Symbol capabilities.
    /// Default: `Full`
    pub symbols: SymbolSupport,

    /// Maximum nesting of native calls before `StackOverflow`.
    /// Default: 256
    pub max_native_depth: usize,
}

impl Default for RealmConfig {
    fn default() -> Self {
        Self {
            symbols: SymbolSupport::Full,
            max_native_depth: 256,
        }
    }
}

impl RealmConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Config for a runtime with symbols but no `Symbol.toPrimitive`.
    pub fn legacy() -> Self {
        Self {
            symbols: SymbolSupport::Legacy,
            ..Default::default()
        }
    }

    /// Config for a runtime without symbols.
    pub fn without_symbols() -> Self {
        Self {
            symbols: SymbolSupport::None,
            ..Default::default()
        }
    }

    /// Set the native call depth limit.
    pub fn with_max_native_depth(mut self, depth: usize) -> Self {
        self.max_native_depth = depth;
        self
    }

    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the realm relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_native_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RealmConfig::new();
        assert_eq!(config.symbols, SymbolSupport::Full);
        assert_eq!(config.max_native_depth, 256);
    }

    #[test]
    fn test_from_json_partial() {
        let config = RealmConfig::from_json(r#"{ "symbols": "legacy" }"#).unwrap();
        assert_eq!(config, RealmConfig::legacy());

        let config = RealmConfig::from_json(r#"{ "max_native_depth": 8 }"#).unwrap();
        assert_eq!(config.symbols, SymbolSupport::Full);
        assert_eq!(config.max_native_depth, 8);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            RealmConfig::from_json(r#"{ "symbols": "sometimes" }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            RealmConfig::from_json(r#"{ "max_native_depth": 0 }"#),
            Err(ConfigError::ZeroDepth)
        ));
    }
}
