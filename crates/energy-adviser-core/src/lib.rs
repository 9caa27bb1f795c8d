//! energy-adviser-core - Core library for energy-adviser
//!
//! Turns an ordered series of consumption readings into a diagnostic report:
//! summary statistics, outliers, peak hours, night/day split, trend and
//! prioritized recommendations. Pure computation; no I/O besides the
//! payload and config loaders.

pub mod analytics;
pub mod config;
pub mod error;
pub mod models;
pub mod payload;

pub use analytics::{Analysis, AnalysisReport};
pub use config::{AdviserConfig, Thresholds};
pub use error::CoreError;
pub use models::Reading;
pub use payload::{load_readings, parse_readings, readings_from_json};
