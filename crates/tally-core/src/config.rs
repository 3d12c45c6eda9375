//! Report configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/tally/config.toml), if the file exists
//! 2. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Granularity;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Bucket size for trend reports when none is given
    pub granularity: Granularity,
    /// How many merchants to rank by default
    pub top_merchants: i64,
    pub period1_label: String,
    pub period2_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::Monthly,
            top_merchants: 10,
            period1_label: "Period 1".to_string(),
            period2_label: "Period 2".to_string(),
        }
    }
}

impl ReportConfig {
    /// Load from `path` if given and present, else the data dir override,
    /// else the embedded defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let override_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        match override_path.filter(|p| p.exists()) {
            Some(p) => {
                debug!(path = %p.display(), "Loading report config");
                let content = fs::read_to_string(&p)?;
                parse_config(&content)
            }
            None => parse_config(DEFAULT_CONFIG),
        }
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    reports: Option<RawReports>,
    comparison: Option<RawComparison>,
}

#[derive(Debug, Deserialize)]
struct RawReports {
    granularity: Option<String>,
    top_merchants: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawComparison {
    period1_label: Option<String>,
    period2_label: Option<String>,
}

/// Parse config from TOML content; missing keys keep their defaults
pub fn parse_config(content: &str) -> Result<ReportConfig> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = ReportConfig::default();

    if let Some(reports) = raw.reports {
        if let Some(granularity) = reports.granularity {
            config.granularity = granularity.parse().map_err(Error::InvalidData)?;
        }
        if let Some(limit) = reports.top_merchants {
            config.top_merchants = limit;
        }
    }

    if let Some(comparison) = raw.comparison {
        if let Some(label) = comparison.period1_label {
            config.period1_label = label;
        }
        if let Some(label) = comparison.period2_label {
            config.period2_label = label;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = parse_config(
            r#"
            [reports]
            granularity = "weekly"

            [comparison]
            period2_label = "This Month"
            unknown = true
            "#,
        )
        .unwrap();
        assert_eq!(config.granularity, Granularity::Weekly);
        assert_eq!(config.top_merchants, 10);
        assert_eq!(config.period1_label, "Period 1");
        assert_eq!(config.period2_label, "This Month");
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            parse_config("[reports]\ngranularity = \"hourly\""),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(parse_config("not = [valid"), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        fs::write(&path, "[reports]\ntop_merchants = 3\n").unwrap();

        let config = ReportConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.top_merchants, 3);

        // Missing explicit file falls back to embedded defaults
        let config = ReportConfig::load(Some(dir.path().join("missing.toml").as_path())).unwrap();
        assert_eq!(config, ReportConfig::default());
    }
}
