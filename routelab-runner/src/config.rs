//! Serializable backtest configuration.
//!
//! All process-wide constants of a run — parent order size, allocation step,
//! fee/rebate rates, and the parameter-grid bounds — live here and are
//! threaded explicitly into the core, keeping the engine free of globals.
//! Defaults reproduce the reference configuration (5000 @ step 100, fee
//! 0.003, rebate 0.002, grid 0.0001..0.001 by 0.0001).

use routelab_core::OrderSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("order_size must be positive")]
    ZeroOrderSize,

    #[error("step must be positive and no larger than order_size")]
    BadStep,

    #[error("fee and rebate must be non-negative")]
    NegativeFeeOrRebate,

    #[error("param_grid bounds must be strictly positive with start < stop")]
    BadGrid,
}

/// Complete configuration for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BacktestConfig {
    /// Parent order size (shares).
    pub order_size: u64,
    /// Allocation step granularity (shares).
    pub step: u64,
    /// Per-unit fee charged on fills, applied to every venue.
    pub fee: f64,
    /// Per-unit rebate credited on routed-but-unfilled quantity.
    pub rebate: f64,
    /// Grid bounds shared by all three risk parameters.
    pub param_grid: GridConfig,
}

/// Discretized range for one risk parameter: `start..stop` (stop exclusive)
/// in increments of `step`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            order_size: 5000,
            step: 100,
            fee: 0.003,
            rebate: 0.002,
            param_grid: GridConfig::default(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start: 0.0001,
            stop: 0.001,
            step: 0.0001,
        }
    }
}

impl BacktestConfig {
    /// Load and validate a configuration from a TOML file.
    pub fn from_toml_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Fail fast on degenerate constants before any computation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.order_size == 0 {
            return Err(ConfigError::ZeroOrderSize);
        }
        if self.step == 0 || self.step > self.order_size {
            return Err(ConfigError::BadStep);
        }
        if self.fee < 0.0 || self.rebate < 0.0 {
            return Err(ConfigError::NegativeFeeOrRebate);
        }
        let g = &self.param_grid;
        if !(g.start > 0.0) || !(g.step > 0.0) || !(g.start < g.stop) {
            return Err(ConfigError::BadGrid);
        }
        Ok(())
    }

    /// The parent order as seen by the core.
    pub fn order_spec(&self) -> OrderSpec {
        OrderSpec {
            target_qty: self.order_size,
            step_qty: self.step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(BacktestConfig::default().validate().is_ok());
    }

    #[test]
    fn default_matches_reference_constants() {
        let cfg = BacktestConfig::default();
        assert_eq!(cfg.order_size, 5000);
        assert_eq!(cfg.step, 100);
        assert_eq!(cfg.fee, 0.003);
        assert_eq!(cfg.rebate, 0.002);
        assert_eq!(cfg.param_grid.start, 0.0001);
        assert_eq!(cfg.param_grid.stop, 0.001);
    }

    #[test]
    fn zero_order_size_rejected() {
        let cfg = BacktestConfig {
            order_size: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroOrderSize)));
    }

    #[test]
    fn step_larger_than_order_rejected() {
        let cfg = BacktestConfig {
            order_size: 50,
            step: 100,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::BadStep)));
    }

    #[test]
    fn inverted_grid_rejected() {
        let mut cfg = BacktestConfig::default();
        cfg.param_grid.stop = cfg.param_grid.start;
        assert!(matches!(cfg.validate(), Err(ConfigError::BadGrid)));
    }

    #[test]
    fn toml_roundtrip_with_partial_fields() {
        // Missing fields fall back to defaults via #[serde(default)].
        let cfg: BacktestConfig = toml::from_str(
            r#"
            order_size = 2000
            [param_grid]
            stop = 0.002
            "#,
        )
        .unwrap();
        assert_eq!(cfg.order_size, 2000);
        assert_eq!(cfg.step, 100);
        assert_eq!(cfg.param_grid.stop, 0.002);
        assert_eq!(cfg.param_grid.start, 0.0001);
    }

    #[test]
    fn from_toml_path_reports_missing_file() {
        let err = BacktestConfig::from_toml_path(Path::new("/nonexistent/cfg.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
