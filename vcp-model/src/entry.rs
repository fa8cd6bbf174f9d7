use crate::category::RankingCategory;
use crate::track::Track;

/// A track annotated with the ranking it came from.
///
/// `rank` is the 1-based position inside `category` at fetch time. It is a
/// display annotation only; the playlist never re-derives or validates it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaylistEntry {
    pub track: Track,
    pub category: RankingCategory,
    pub rank: u32,
}

impl PlaylistEntry {
    pub fn new(track: Track, category: RankingCategory, rank: u32) -> Self {
        Self {
            track,
            category,
            rank,
        }
    }
}

/// One fetched ranking list, already mapped to playlist entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryRanking {
    pub category: RankingCategory,
    pub entries: Vec<PlaylistEntry>,
}

impl CategoryRanking {
    /// Number tracks in list order, starting from rank 1.
    pub fn from_tracks(
        category: RankingCategory,
        tracks: impl IntoIterator<Item = Track>,
    ) -> Self {
        let entries = tracks
            .into_iter()
            .zip(1u32..)
            .map(|(track, rank)| PlaylistEntry::new(track, category, rank))
            .collect();
        Self { category, entries }
    }

    /// Entry whose video id appears in `url`, if any.
    pub fn find_by_url(&self, url: &str) -> Option<&PlaylistEntry> {
        self.entries.iter().find(|e| e.track.id.appears_in(url))
    }
}
