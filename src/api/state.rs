//! Application state for the net-pay engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, RatePreset, TaxSchedule};
use crate::error::EngineResult;

/// Shared application state.
///
/// Holds the loaded rate configuration, read-only and shared across all
/// request handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// The income-tax schedule.
    pub fn schedule(&self) -> &TaxSchedule {
        self.config.schedule()
    }

    /// Resolves the preset for a requested year, or the default year when
    /// none is requested. Returns the year actually used.
    pub fn preset(&self, requested_year: Option<i32>) -> EngineResult<(i32, &RatePreset)> {
        match requested_year {
            Some(year) => self.config.preset_for_year(year),
            None => self.config.default_preset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_preset_falls_back_to_default_year() {
        let state = AppState::new(ConfigLoader::load("./config/kr").unwrap());

        let (year, preset) = state.preset(None).unwrap();
        assert_eq!(year, 2025);
        assert_eq!(preset.fiscal_year, 2025);
    }

    #[test]
    fn test_preset_for_unconfigured_year_uses_nearest() {
        let state = AppState::new(ConfigLoader::load("./config/kr").unwrap());

        let (year, _) = state.preset(Some(2040)).unwrap();
        assert_eq!(year, 2026);
    }
}
