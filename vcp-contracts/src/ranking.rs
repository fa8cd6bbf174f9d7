use async_trait::async_trait;
use vcp_model::{CategoryRanking, PlaylistEntry, RankingCategory};

/// Source of ranking lists used to hydrate the playlist.
///
/// Implementations swallow their own failures: a failed fetch is reported as
/// `None` (or left out of `fetch_all`) and logged by the implementation.
#[async_trait]
pub trait RankingSource: Send + Sync {
    async fn fetch_category(
        &self,
        category: RankingCategory,
    ) -> Option<Vec<PlaylistEntry>>;

    /// Every category that could be fetched, in `RankingCategory::ALL` order.
    async fn fetch_all(&self) -> Vec<CategoryRanking>;
}
