use super::state::{DisplayMode, PlaybackStatus, PlayerState, clamp_fraction};

/// Owner of the player state.
///
/// Mutations here never reach the embedded frame on their own. Callers that
/// change playback status or volume also send the matching bridge command.
#[derive(Debug, Clone, Default)]
pub struct PlayerStore {
    state: PlayerState,
}

impl PlayerStore {
    pub fn new(initial_volume: f64) -> Self {
        Self {
            state: PlayerState::with_volume(initial_volume),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Returns true when the status actually changed.
    pub fn set_playback_status(&mut self, status: PlaybackStatus) -> bool {
        let changed = self.state.status != status;
        self.state.status = status;
        changed
    }

    pub fn toggle_playback(&mut self) -> PlaybackStatus {
        self.state.status = self.state.status.toggled();
        self.state.status
    }

    /// Store a playback position. Out-of-range values are clamped.
    pub fn set_progress(&mut self, fraction: f64) -> f64 {
        self.state.progress = clamp_fraction(fraction);
        self.state.progress
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.state.display_mode = mode;
    }

    pub fn set_volume(&mut self, level: f64) -> f64 {
        self.state.volume = clamp_fraction(level);
        self.state.volume
    }

    /// Back to paused, hidden and rewound. Volume survives.
    pub fn reset(&mut self) {
        self.state = PlayerState {
            volume: self.state.volume,
            ..PlayerState::default()
        };
    }
}
