//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax and
//! statutory-insurance configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineMetadata, RatePreset, TaxConfig, TaxSchedule};

/// Loads and provides access to tax configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query the income-tax schedule and the rate
/// preset for a fiscal year.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/kr/
/// ├── engine.yaml      # Jurisdiction metadata and default fiscal year
/// ├── income_tax.yaml  # Progressive income-tax brackets
/// └── presets/
///     └── 2025.yaml    # Statutory rates for one fiscal year
/// ```
///
/// # Example
///
/// ```no_run
/// use netpay_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/kr").unwrap();
/// let (year, preset) = loader.preset_for_year(2025).unwrap();
/// println!("{}: health rate {}", year, preset.health_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TaxConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/kr")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or misses a required field
    /// - The tax schedule breaks its ordering invariants
    /// - A rate preset carries an out-of-range rate
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;
        let schedule = Self::load_yaml::<TaxSchedule>(&path.join("income_tax.yaml"))?;
        let presets = Self::load_presets(&path.join("presets"))?;

        debug!(
            jurisdiction = %metadata.jurisdiction,
            brackets = schedule.brackets().len(),
            presets = presets.len(),
            "Loaded tax configuration"
        );

        Ok(Self::from_config(TaxConfig::new(metadata, schedule, presets)))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: TaxConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all preset files from the presets directory.
    fn load_presets(presets_dir: &Path) -> EngineResult<Vec<RatePreset>> {
        let presets_dir_str = presets_dir.display().to_string();

        let entries = fs::read_dir(presets_dir).map_err(|_| EngineError::ConfigNotFound {
            path: presets_dir_str.clone(),
        })?;

        let mut presets: Vec<RatePreset> = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: presets_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let preset = Self::load_yaml::<RatePreset>(&path)?;
                preset.validate()?;

                if presets.iter().any(|p| p.fiscal_year == preset.fiscal_year) {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!("duplicate preset for fiscal year {}", preset.fiscal_year),
                    });
                }
                presets.push(preset);
            }
        }

        if presets.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no preset files found)", presets_dir_str),
            });
        }

        Ok(presets)
    }

    /// Returns the underlying tax configuration.
    pub fn config(&self) -> &TaxConfig {
        &self.config
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the income-tax schedule.
    pub fn schedule(&self) -> &TaxSchedule {
        self.config.schedule()
    }

    /// Gets the rate preset for a fiscal year.
    ///
    /// When the year has no preset of its own, the nearest configured year
    /// is used; on a tie the earlier year wins. The year actually used is
    /// returned alongside the preset.
    ///
    /// # Returns
    ///
    /// Returns `ConfigurationMissing` if no presets are configured at all.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use netpay_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/kr")?;
    /// let (year, _preset) = loader.preset_for_year(2030)?;
    /// assert_eq!(year, 2026);
    /// # Ok::<(), netpay_engine::error::EngineError>(())
    /// ```
    pub fn preset_for_year(&self, fiscal_year: i32) -> EngineResult<(i32, &RatePreset)> {
        let preset = self
            .config
            .presets()
            .iter()
            .min_by_key(|p| (p.fiscal_year.abs_diff(fiscal_year), p.fiscal_year))
            .ok_or(EngineError::ConfigurationMissing { fiscal_year })?;

        if preset.fiscal_year != fiscal_year {
            debug!(
                requested = fiscal_year,
                used = preset.fiscal_year,
                "Falling back to nearest configured fiscal year"
            );
        }

        Ok((preset.fiscal_year, preset))
    }

    /// Gets the preset for the configured default fiscal year.
    pub fn default_preset(&self) -> EngineResult<(i32, &RatePreset)> {
        self.preset_for_year(self.metadata().default_fiscal_year)
    }
}
