//! Configuration loading and management for the net-pay engine.
//!
//! This module provides functionality to load tax configuration from YAML
//! files: jurisdiction metadata, the progressive income-tax schedule and
//! the statutory-insurance rate preset for each fiscal year.
//!
//! # Example
//!
//! ```no_run
//! use netpay_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kr").unwrap();
//! println!("Loaded: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineMetadata, MAX_TAX_BRACKETS, RatePreset, TaxBracket, TaxConfig, TaxSchedule,
    TaxScheduleConfig,
};
