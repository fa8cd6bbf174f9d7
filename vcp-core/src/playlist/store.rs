use vcp_model::{PlaylistEntry, RankingCategory};

use super::state::{PlaylistMode, PlaylistState};

/// Owner of the playlist state. The only place the cursor invariant is
/// enforced; every operation leaves the state valid.
#[derive(Debug, Clone, Default)]
pub struct PlaylistStore {
    state: PlaylistState,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PlaylistState {
        &self.state
    }

    /// Replace the whole list and start from the first entry.
    pub fn set_playlist(&mut self, entries: Vec<PlaylistEntry>) {
        self.set_playlist_at(entries, 0);
    }

    /// Replace the whole list and start from `index`, clamped into range.
    pub fn set_playlist_at(&mut self, entries: Vec<PlaylistEntry>, index: usize) {
        self.state.category = common_category(&entries);
        self.state.entries = entries;
        self.state.current_index = index;
        self.normalize();
    }

    /// Add entries after the last one. The cursor does not move.
    pub fn append_entries(&mut self, entries: Vec<PlaylistEntry>) {
        if entries.is_empty() {
            return;
        }
        self.state.entries.extend(entries);
        self.state.category = common_category(&self.state.entries);
        self.normalize();
    }

    /// Remove one entry. Out-of-range indices are ignored.
    ///
    /// Removing at or before the cursor shifts the cursor back by one
    /// (floored at 0). Emptying the list hides the sidebar.
    pub fn remove_at(&mut self, index: usize) -> Option<PlaylistEntry> {
        if index >= self.state.entries.len() {
            return None;
        }

        let removed = self.state.entries.remove(index);
        if self.state.current_index >= index {
            self.state.current_index = self.state.current_index.saturating_sub(1);
        }
        if self.state.entries.is_empty() {
            self.state.mode = PlaylistMode::Hidden;
        }
        self.state.category = common_category(&self.state.entries);
        self.normalize();
        Some(removed)
    }

    /// Move the cursor, clamped to the list bounds. Returns the new index.
    pub fn set_current_index(&mut self, index: usize) -> usize {
        self.state.current_index = index;
        self.normalize();
        self.state.current_index
    }

    /// Step forward. No wraparound; returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.state.is_at_last() {
            return false;
        }
        self.state.current_index += 1;
        true
    }

    /// Step back. No wraparound; returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.state.current_index == 0 {
            return false;
        }
        self.state.current_index -= 1;
        true
    }

    pub fn set_mode(&mut self, mode: PlaylistMode) {
        self.state.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> PlaylistMode {
        self.state.mode = self.state.mode.toggled();
        self.state.mode
    }

    pub fn clear(&mut self) {
        self.state = PlaylistState::default();
    }

    fn normalize(&mut self) {
        let len = self.state.entries.len();
        self.state.current_index = match len {
            0 => 0,
            _ => self.state.current_index.min(len - 1),
        };
    }
}

fn common_category(entries: &[PlaylistEntry]) -> Option<RankingCategory> {
    let first = entries.first()?.category;
    entries
        .iter()
        .all(|entry| entry.category == first)
        .then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playlist::state::{category_name, current_track};
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use vcp_model::{Track, VideoId};

    fn entry(n: usize, category: RankingCategory) -> PlaylistEntry {
        let id = VideoId::new(format!("sm{n}")).unwrap();
        PlaylistEntry::new(
            Track::new(id, format!("song {n}"), 180, "producer"),
            category,
            n as u32 + 1,
        )
    }

    fn entries(count: usize) -> Vec<PlaylistEntry> {
        (0..count).map(|n| entry(n, RankingCategory::Top100)).collect()
    }

    fn store_with(count: usize, index: usize) -> PlaylistStore {
        let mut store = PlaylistStore::new();
        store.set_playlist_at(entries(count), index);
        store
    }

    fn assert_invariant(store: &PlaylistStore) {
        let state = store.state();
        if state.is_empty() {
            assert_eq!(state.current_index(), 0);
        } else {
            assert!(state.current_index() < state.len());
        }
    }

    #[test]
    fn set_playlist_resets_cursor_and_tracks_category() {
        let mut store = store_with(5, 3);
        assert_eq!(store.state().current_index(), 3);

        store.set_playlist(entries(2));
        assert_eq!(store.state().current_index(), 0);
        assert_eq!(category_name(store.state()), Some("TOP100"));

        store.append_entries(vec![entry(9, RankingCategory::Remix)]);
        assert_eq!(store.state().category(), None);
    }

    #[test]
    fn start_index_is_clamped() {
        let store = store_with(3, 10);
        assert_eq!(store.state().current_index(), 2);
    }

    #[test]
    fn append_keeps_cursor() {
        let mut store = store_with(3, 1);
        store.append_entries(entries(4));
        assert_eq!(store.state().len(), 7);
        assert_eq!(store.state().current_index(), 1);
    }

    #[test]
    fn removal_before_cursor_reindexes() {
        let mut store = store_with(5, 3);
        let current = current_track(store.state()).map(|t| t.id.clone());

        assert!(store.remove_at(1).is_some());
        assert_eq!(store.state().current_index(), 2);
        assert_eq!(current_track(store.state()).map(|t| t.id.clone()), current);

        // Index 4 no longer exists on a 4-entry list.
        assert!(store.remove_at(4).is_none());
        assert_eq!(store.state().len(), 4);
        assert_eq!(store.state().current_index(), 2);
    }

    #[test]
    fn removal_after_cursor_keeps_index() {
        let mut store = store_with(5, 1);
        store.remove_at(3);
        assert_eq!(store.state().current_index(), 1);
    }

    #[test]
    fn removing_last_entry_hides_sidebar() {
        let mut store = store_with(1, 0);
        store.set_mode(PlaylistMode::Full);

        store.remove_at(0);
        assert!(store.state().is_empty());
        assert_eq!(store.state().current_index(), 0);
        assert_eq!(store.state().mode(), PlaylistMode::Hidden);
        assert!(current_track(store.state()).is_none());
    }

    #[test]
    fn next_and_previous_do_not_wrap() {
        let mut store = store_with(3, 2);
        assert!(!store.next());
        assert_eq!(store.state().current_index(), 2);

        store.set_current_index(0);
        assert!(!store.previous());
        assert_eq!(store.state().current_index(), 0);

        assert!(store.next());
        assert_eq!(store.state().current_index(), 1);
    }

    #[test]
    fn empty_list_navigation_is_inert() {
        let mut store = PlaylistStore::new();
        assert!(!store.next());
        assert!(!store.previous());
        assert_eq!(store.set_current_index(5), 0);
        assert!(store.remove_at(0).is_none());
    }

    #[test]
    fn clear_resets_everything() {
        let mut store = store_with(4, 2);
        store.set_mode(PlaylistMode::Full);
        store.clear();
        assert_eq!(store.state(), &PlaylistState::default());
    }

    #[test]
    fn cursor_invariant_holds_for_random_sequences() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let mut store = PlaylistStore::new();
            for _ in 0..60 {
                match rng.random_range(0..6) {
                    0 => store.append_entries(entries(rng.random_range(0..4))),
                    1 => {
                        let len = store.state().len();
                        store.remove_at(rng.random_range(0..len + 2));
                    }
                    2 => {
                        store.set_current_index(rng.random_range(0..10));
                    }
                    3 => {
                        store.next();
                    }
                    4 => {
                        store.previous();
                    }
                    _ => store.set_playlist_at(
                        entries(rng.random_range(0..5)),
                        rng.random_range(0..8),
                    ),
                }
                assert_invariant(&store);
            }
        }
    }
}
