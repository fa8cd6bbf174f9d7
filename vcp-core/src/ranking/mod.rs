//! Ranking collaborator: fetches the site's ranking lists and maps them into
//! playlist entries.

mod client;
mod error;
mod page;
mod payload;

pub use client::RankingClient;
pub use error::RankingError;
pub use page::{
    PageContext, build_id_from_next_data, ranking_url, season_from_path,
};
pub use payload::parse_ranking;

use vcp_model::{CategoryRanking, PlaylistEntry};

/// Entry for the video linked by `url`, searching every fetched category in
/// order.
pub fn find_by_url(
    rankings: &[CategoryRanking],
    url: &str,
) -> Option<PlaylistEntry> {
    rankings
        .iter()
        .find_map(|ranking| ranking.find_by_url(url))
        .cloned()
}
