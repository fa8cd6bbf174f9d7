use super::error::{RankingError, Result};
use super::page::{PageContext, ranking_url};
use super::payload::parse_ranking;
use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, info, warn};
use parking_lot::RwLock;
use reqwest::Client;
use std::sync::Arc;
use vcp_config::RankingConfig;
use vcp_contracts::RankingSource;
use vcp_model::{CategoryRanking, PlaylistEntry, RankingCategory};

/// HTTP ranking client against the site's Next.js data routes.
#[derive(Clone)]
pub struct RankingClient {
    client: Client,
    base_url: String,
    page: Arc<RwLock<PageContext>>,
}

impl std::fmt::Debug for RankingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingClient")
            .field("base_url", &self.base_url)
            .field("page", &*self.page.read())
            .finish()
    }
}

impl RankingClient {
    pub fn new(config: &RankingConfig, page: PageContext) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        info!(
            "[Ranking] Client ready for {} (season: {:?})",
            base_url, page.season
        );

        Ok(Self {
            client,
            base_url,
            page: Arc::new(RwLock::new(page)),
        })
    }

    /// The page navigated; later fetches use the new build id and season.
    pub fn set_page(&self, page: PageContext) {
        *self.page.write() = page;
    }

    pub fn page(&self) -> PageContext {
        self.page.read().clone()
    }

    /// Fetch one category, surfacing every failure.
    pub async fn fetch(
        &self,
        category: RankingCategory,
    ) -> Result<CategoryRanking> {
        let url = ranking_url(&self.base_url, category, &self.page())?;
        debug!("[Ranking] GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RankingError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let tracks = parse_ranking(&body)?;
        Ok(CategoryRanking::from_tracks(category, tracks))
    }
}

#[async_trait]
impl RankingSource for RankingClient {
    async fn fetch_category(
        &self,
        category: RankingCategory,
    ) -> Option<Vec<PlaylistEntry>> {
        match self.fetch(category).await {
            Ok(ranking) => Some(ranking.entries),
            Err(err) => {
                warn!("[Ranking] Could not load {}: {}", category, err);
                None
            }
        }
    }

    async fn fetch_all(&self) -> Vec<CategoryRanking> {
        let results = join_all(
            RankingCategory::ALL
                .into_iter()
                .map(|category| self.fetch(category)),
        )
        .await;

        RankingCategory::ALL
            .into_iter()
            .zip(results)
            .filter_map(|(category, result)| match result {
                Ok(ranking) => Some(ranking),
                Err(err) => {
                    warn!("[Ranking] Could not load {}: {}", category, err);
                    None
                }
            })
            .collect()
    }
}
