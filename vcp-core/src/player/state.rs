#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    Playing,
    #[default]
    Paused,
}

impl PlaybackStatus {
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Playing => Self::Paused,
            Self::Paused => Self::Playing,
        }
    }
}

/// Overlay presentation. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Hidden,
    Pip,
    Full,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub(super) status: PlaybackStatus,
    pub(super) volume: f64,
    pub(super) display_mode: DisplayMode,
    /// Last position reported by the embedded player, in `[0, 1]`.
    pub(super) progress: f64,
}

impl PlayerState {
    pub fn with_volume(volume: f64) -> Self {
        Self {
            volume: clamp_fraction(volume),
            ..Self::default()
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_visible(&self) -> bool {
        self.display_mode != DisplayMode::Hidden
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            status: PlaybackStatus::Paused,
            volume: 0.5,
            display_mode: DisplayMode::Hidden,
            progress: 0.0,
        }
    }
}

/// Clamp into `[0, 1]`. NaN collapses to 0.
pub(crate) fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
