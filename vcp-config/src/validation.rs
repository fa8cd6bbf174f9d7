use thiserror::Error;
use url::Url;

use crate::models::PlayerConfig;

/// A configuration value that would break an invariant of the core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("bridge.retry_interval_ms must be greater than zero")]
    ZeroRetryInterval,

    #[error("bridge.max_attempts must be greater than zero")]
    ZeroAttempts,

    #[error("bridge.frame_id must not be empty")]
    EmptyFrameId,

    #[error("playback.auto_advance_epsilon must be in (0, 1), got {0}")]
    EpsilonOutOfRange(f64),

    #[error("playback.initial_volume must be in [0, 1], got {0}")]
    VolumeOutOfRange(f64),

    #[error("gesture scale bounds are invalid: min {min}, max {max}")]
    ScaleBounds { min: f32, max: f32 },

    #[error("gesture.{field} must be finite and not negative, got {value}")]
    NegativeLength { field: &'static str, value: f32 },

    #[error("ranking.{field} is not an absolute url: {value}")]
    InvalidUrl { field: &'static str, value: String },
}

impl PlayerConfig {
    /// Check every cross-field rule; the first violation wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bridge = &self.bridge;
        if bridge.frame_id.trim().is_empty() {
            return Err(ConfigError::EmptyFrameId);
        }
        if bridge.retry_interval_ms == 0 {
            return Err(ConfigError::ZeroRetryInterval);
        }
        if bridge.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }

        let playback = &self.playback;
        let eps = playback.auto_advance_epsilon;
        if !(eps > 0.0 && eps < 1.0) {
            return Err(ConfigError::EpsilonOutOfRange(eps));
        }
        let volume = playback.initial_volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(ConfigError::VolumeOutOfRange(volume));
        }

        let gesture = &self.gesture;
        if !(gesture.min_scale > 0.0 && gesture.min_scale <= gesture.max_scale)
            || !gesture.max_scale.is_finite()
            || !(gesture.min_scale..=gesture.max_scale)
                .contains(&gesture.pip_scale)
        {
            return Err(ConfigError::ScaleBounds {
                min: gesture.min_scale,
                max: gesture.max_scale,
            });
        }
        for (field, value) in [
            ("seek_inset_px", gesture.seek_inset_px),
            ("resize_border_px", gesture.resize_border_px),
            ("pip_margin_px", gesture.pip_margin_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeLength { field, value });
            }
        }

        let ranking = &self.ranking;
        for (field, value) in [
            ("base_url", &ranking.base_url),
            ("watch_base_url", &ranking.watch_base_url),
            ("embed_base_url", &ranking.embed_base_url),
        ] {
            if Url::parse(value).is_err() {
                return Err(ConfigError::InvalidUrl {
                    field,
                    value: value.clone(),
                });
            }
        }

        Ok(())
    }
}
