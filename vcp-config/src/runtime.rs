//! Runtime overrides for the tunables that have no documented rationale.
//!
//! Fields are `None` by default and accessors fall back to the loaded
//! [`PlayerConfig`]. `effective()` folds the overrides into a full config the
//! session can be reconfigured with.

use crate::models::PlayerConfig;
use crate::validation::ConfigError;

#[derive(Debug, Default, Clone)]
pub struct RuntimeConfig {
    base: PlayerConfig,

    // ========== PLAYBACK ==========
    pub auto_advance_epsilon: Option<f64>,
    pub autoplay: Option<bool>,

    // ========== BRIDGE ==========
    pub retry_interval_ms: Option<u64>,
    pub max_attempts: Option<u32>,
    pub load_deadline_ms: Option<u64>,
}

impl RuntimeConfig {
    pub fn new(base: PlayerConfig) -> Self {
        Self {
            base,
            ..Default::default()
        }
    }

    pub fn base(&self) -> &PlayerConfig {
        &self.base
    }

    pub fn auto_advance_epsilon(&self) -> f64 {
        self.auto_advance_epsilon
            .unwrap_or(self.base.playback.auto_advance_epsilon)
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay.unwrap_or(self.base.playback.autoplay)
    }

    pub fn retry_interval_ms(&self) -> u64 {
        self.retry_interval_ms
            .unwrap_or(self.base.bridge.retry_interval_ms)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.unwrap_or(self.base.bridge.max_attempts)
    }

    pub fn load_deadline_ms(&self) -> u64 {
        self.load_deadline_ms
            .unwrap_or(self.base.bridge.load_deadline_ms)
    }

    pub fn set_auto_advance_epsilon(&mut self, value: Option<f64>) {
        self.auto_advance_epsilon = value;
    }

    pub fn set_max_attempts(&mut self, value: Option<u32>) {
        self.max_attempts = value;
    }

    pub fn set_retry_interval_ms(&mut self, value: Option<u64>) {
        self.retry_interval_ms = value;
    }

    /// Drop every override.
    pub fn reset(&mut self) {
        *self = Self::new(self.base.clone());
    }

    /// The base configuration with every override applied, validated.
    pub fn effective(&self) -> Result<PlayerConfig, ConfigError> {
        let mut config = self.base.clone();
        config.playback.auto_advance_epsilon = self.auto_advance_epsilon();
        config.playback.autoplay = self.autoplay();
        config.bridge.retry_interval_ms = self.retry_interval_ms();
        config.bridge.max_attempts = self.max_attempts();
        config.bridge.load_deadline_ms = self.load_deadline_ms();
        config.validate()?;
        Ok(config)
    }
}
