//! Configuration sections. Every field has a default equal to the value the
//! player shipped with, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level player configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub bridge: BridgeConfig,
    pub playback: PlaybackConfig,
    pub gesture: GestureConfig,
    pub ranking: RankingConfig,
    pub toast: ToastConfig,
    pub teardown: TeardownConfig,
}

/// Delivery policy for commands posted into the embedded frame.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Element id of the embedded player frame.
    pub frame_id: String,
    /// Polling interval while waiting for the frame's content window.
    pub retry_interval_ms: u64,
    /// Polling attempts before a command is abandoned. With the default
    /// interval this is roughly fifty seconds.
    pub max_attempts: u32,
    /// A command deferred to the frame's `load` event is dropped if the event
    /// fires later than this after the command was issued.
    pub load_deadline_ms: u64,
    /// Delay between the frame's `load` event and the deferred post, giving
    /// the embedded page's own scripts a moment to boot.
    pub post_load_delay_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            frame_id: "vcp-iframe".to_string(),
            retry_interval_ms: 100,
            max_attempts: 500,
            load_deadline_ms: 5_000,
            post_load_delay_ms: 100,
        }
    }
}

impl BridgeConfig {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    pub fn load_deadline(&self) -> Duration {
        Duration::from_millis(self.load_deadline_ms)
    }

    pub fn post_load_delay(&self) -> Duration {
        Duration::from_millis(self.post_load_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Progress within this distance of 1.0 counts as "ended" and advances
    /// the playlist.
    pub auto_advance_epsilon: f64,
    pub initial_volume: f64,
    /// Send `play` whenever the current track changes.
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            auto_advance_epsilon: 0.0005,
            initial_volume: 0.5,
            autoplay: true,
        }
    }
}

/// Pointer gesture tuning, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Horizontal padding reserved for the seek handle; half on each side.
    pub seek_inset_px: f32,
    /// Width of the border band of the floating window that starts a resize.
    pub resize_border_px: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Scale the floating window starts at when picture-in-picture opens.
    pub pip_scale: f32,
    /// Gap between the floating window and the viewport's bottom-left corner.
    pub pip_margin_px: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            seek_inset_px: 16.0,
            resize_border_px: 10.0,
            min_scale: 0.1,
            max_scale: 2.0,
            pip_scale: 0.5,
            pip_margin_px: 16.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RankingConfig {
    pub base_url: String,
    pub watch_base_url: String,
    pub embed_base_url: String,
    pub timeout_secs: u64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://vocaloid-collection.jp".to_string(),
            watch_base_url: "https://www.nicovideo.jp/watch".to_string(),
            embed_base_url: "https://embed.nicovideo.jp/watch".to_string(),
            timeout_secs: 30,
        }
    }
}

impl RankingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ToastConfig {
    pub lifetime_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self { lifetime_ms: 3_000 }
    }
}

impl ToastConfig {
    pub fn lifetime(&self) -> Duration {
        Duration::from_millis(self.lifetime_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TeardownConfig {
    /// Delay between hiding the overlay and clearing its state, long enough
    /// for the exit animation.
    pub close_delay_ms: u64,
}

impl Default for TeardownConfig {
    fn default() -> Self {
        Self { close_delay_ms: 300 }
    }
}

impl TeardownConfig {
    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}
