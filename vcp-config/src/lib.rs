//! Configuration library for vcp.
//!
//! Centralizes defaults, file/env loading and validation for the tunables the
//! core uses: bridge retry bounds, the auto-advance epsilon, gesture geometry
//! and ranking endpoints.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod runtime;
pub mod validation;

pub use loader::{CONFIG_JSON_VAR, CONFIG_PATH_VAR, ConfigSource};
pub use models::{
    BridgeConfig, GestureConfig, PlaybackConfig, PlayerConfig, RankingConfig,
    TeardownConfig, ToastConfig,
};
pub use runtime::RuntimeConfig;
pub use validation::ConfigError;
