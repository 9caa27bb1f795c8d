//! Analysis thresholds and their TOML configuration file
//!
//! Stored in `<config_dir>/energy-adviser/config.toml`:
//!
//! ```toml
//! [thresholds]
//! outlier_z = 2.0
//! critical_z = 3.0
//! idle_night_pct = 30.0
//! trend_band_pct = 5.0
//! rising_trend_pct = 10.0
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Decision thresholds shared by the analyzers and the recommendation rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Readings with |z| above this are outliers
    pub outlier_z: f64,
    /// Outliers with |z| above this are high severity
    pub critical_z: f64,
    /// Night/day ratio (percent) above which idle consumption is flagged
    pub idle_night_pct: f64,
    /// Half-over-half change (percent) beyond which the trend is not stable
    pub trend_band_pct: f64,
    /// Increase (percent) above which rising consumption is recommended against
    pub rising_trend_pct: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            outlier_z: 2.0,
            critical_z: 3.0,
            idle_night_pct: 30.0,
            trend_band_pct: 5.0,
            rising_trend_pct: 10.0,
        }
    }
}

impl Thresholds {
    /// Reject thresholds that would make the analyzers meaningless
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("outlier_z", self.outlier_z),
            ("critical_z", self.critical_z),
            ("idle_night_pct", self.idle_night_pct),
            ("trend_band_pct", self.trend_band_pct),
            ("rising_trend_pct", self.rising_trend_pct),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidConfig {
                    message: format!("{name} must be a non-negative number, got {value}"),
                });
            }
        }

        if self.critical_z < self.outlier_z {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "critical_z ({}) must not be below outlier_z ({})",
                    self.critical_z, self.outlier_z
                ),
            });
        }

        Ok(())
    }
}

/// energy-adviser configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdviserConfig {
    pub thresholds: Thresholds,
}

impl AdviserConfig {
    /// Default config location: `<config_dir>/energy-adviser/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("energy-adviser").join("config.toml"))
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| CoreError::InvalidConfig {
            message: e.to_string(),
        })?;
        config.thresholds.validate()?;
        Ok(config)
    }

    /// Load from an explicit path. A missing file is an error here.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist. A file that exists but is invalid is still an error.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "Loading config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}
