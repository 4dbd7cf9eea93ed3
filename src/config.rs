use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Histogram bin-count slider bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinSettings {
    pub min: usize,
    pub max: usize,
    pub default: usize,
    pub step: usize,
}

impl Default for BinSettings {
    fn default() -> Self {
        Self {
            min: 10,
            max: 120,
            default: 60,
            step: 5,
        }
    }
}

impl BinSettings {
    pub fn clamp(&self, bins: usize) -> usize {
        bins.clamp(self.min, self.max)
    }
}

/// Start-up settings, read from an optional JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Dataset opened at start-up.
    pub data_path: PathBuf,
    pub bins: BinSettings,
    /// Rows shown in the table preview.
    pub preview_rows: usize,
    /// How many sorted `condition` values are pre-selected.
    pub default_condition_picks: usize,
    /// How many sorted `type` values are pre-selected.
    pub default_type_picks: usize,
    pub odometer_step: f64,
    pub log_price_by_default: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("vehicles_us.csv"),
            bins: BinSettings::default(),
            preview_rows: 50,
            default_condition_picks: 3,
            default_type_picks: 4,
            odometer_step: 1000.0,
            log_price_by_default: true,
        }
    }
}

impl DashboardConfig {
    /// Read and validate a JSON config file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let bins = &self.bins;
        ensure!(bins.min >= 1, "bins.min must be at least 1");
        ensure!(
            bins.min <= bins.default && bins.default <= bins.max,
            "bins.default ({}) must lie within [{}, {}]",
            bins.default,
            bins.min,
            bins.max
        );
        ensure!(bins.step >= 1, "bins.step must be at least 1");
        ensure!(
            self.odometer_step > 0.0,
            "odometer_step must be positive"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = DashboardConfig::default();
        config.validate().expect("valid defaults");
        assert_eq!(config.bins.clamp(5), 10);
        assert_eq!(config.bins.clamp(500), 120);
        assert_eq!(config.bins.clamp(60), 60);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = config_file(r#"{ "preview_rows": 10, "bins": { "default": 30 } }"#);
        let config = DashboardConfig::load(file.path()).expect("load");
        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.bins.default, 30);
        assert_eq!(config.bins.max, 120);
        assert_eq!(config.data_path, PathBuf::from("vehicles_us.csv"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let file = config_file(r#"{ "colour": "red" }"#);
        assert!(DashboardConfig::load(file.path()).is_err());
    }

    #[test]
    fn default_outside_bounds_is_rejected() {
        let file = config_file(r#"{ "bins": { "min": 10, "max": 20, "default": 60 } }"#);
        let err = DashboardConfig::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("bins.default"));
    }
}
