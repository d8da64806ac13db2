// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Pipeline configuration.

use std::path::Path;

use flint_interp::EvalConfig;
use flint_resources::CheckerConfig;
use serde::{Deserialize, Serialize};

/// Settings for every phase, loadable from JSON. Missing keys take their
/// defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub checker: CheckerConfig,
    pub eval: EvalConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {field} must be at least 1")]
    Zero { field: &'static str },
}

impl CompilerConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Both limits bound work per loop or call and must allow at least one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checker.max_loop_iterations == 0 {
            return Err(ConfigError::Zero {
                field: "checker.max_loop_iterations",
            });
        }
        if self.eval.max_call_depth == 0 {
            return Err(ConfigError::Zero {
                field: "eval.max_call_depth",
            });
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CompilerConfig::from_json(r#"{"eval": {"max_call_depth": 32}}"#).unwrap();
        assert_eq!(config.eval.max_call_depth, 32);
        assert_eq!(config.checker, CheckerConfig::default());
        assert_eq!(CompilerConfig::from_json("{}").unwrap(), CompilerConfig::default());
    }

    #[test]
    fn malformed_json() {
        let err = CompilerConfig::from_json(r#"{"eval": 3}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn zero_limits_are_rejected() {
        let err = CompilerConfig::from_json(r#"{"checker": {"max_loop_iterations": 0}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Zero {
                field: "checker.max_loop_iterations"
            }
        ));
        assert_eq!(
            err.to_string(),
            "invalid configuration: checker.max_loop_iterations must be at least 1"
        );
        let err = CompilerConfig::from_json(r#"{"eval": {"max_call_depth": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Zero { .. }));
    }

    #[test]
    fn missing_file() {
        let err = CompilerConfig::load("/nonexistent/flint.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
