use vcp_model::{PlaylistEntry, RankingCategory, Track};

/// Sidebar visibility. Independent of whether the list has entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaylistMode {
    #[default]
    Hidden,
    Full,
}

impl PlaylistMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Full,
            Self::Full => Self::Hidden,
        }
    }
}

/// Snapshot of the playlist.
///
/// Invariant: `current_index < entries.len()` whenever the list is non-empty,
/// and `current_index == 0` when it is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistState {
    pub(super) entries: Vec<PlaylistEntry>,
    pub(super) current_index: usize,
    pub(super) mode: PlaylistMode,
    pub(super) category: Option<RankingCategory>,
}

impl PlaylistState {
    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn mode(&self) -> PlaylistMode {
        self.mode
    }

    /// Category shared by every entry, `None` for a mixed or empty list.
    pub fn category(&self) -> Option<RankingCategory> {
        self.category
    }

    pub fn is_at_last(&self) -> bool {
        self.entries.is_empty() || self.current_index + 1 >= self.entries.len()
    }
}

pub fn current_entry(state: &PlaylistState) -> Option<&PlaylistEntry> {
    state.entries.get(state.current_index)
}

pub fn current_track(state: &PlaylistState) -> Option<&Track> {
    current_entry(state).map(|entry| &entry.track)
}

pub fn category_name(state: &PlaylistState) -> Option<&'static str> {
    state.category.map(RankingCategory::display_name)
}
