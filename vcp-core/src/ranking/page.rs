//! What the client needs to know about the page it runs on: the Next.js
//! build id the data routes are keyed by, and the archived season when the
//! page belongs to a past event.

use super::error::{RankingError, Result};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use url::Url;
use vcp_model::RankingCategory;

static SEASON_PATH: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^/(20[0-9]{2}-(?:winter|summer|spring|autumn))").ok()
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    pub build_id: Option<String>,
    /// Archived season such as `2025-summer`, `None` on the live event.
    pub season: Option<String>,
}

impl PageContext {
    /// Build from the page path and the text of its `__NEXT_DATA__` script.
    pub fn from_page(path: &str, next_data: Option<&str>) -> Self {
        Self {
            build_id: next_data
                .and_then(|raw| build_id_from_next_data(raw).ok()),
            season: season_from_path(path),
        }
    }
}

/// Archived season prefix of a page path.
pub fn season_from_path(path: &str) -> Option<String> {
    let regex = SEASON_PATH.as_ref()?;
    regex
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn build_id_from_next_data(raw: &str) -> Result<String> {
    #[derive(Deserialize)]
    struct NextData {
        #[serde(rename = "buildId")]
        build_id: Option<String>,
    }

    let data: NextData = serde_json::from_str(raw)?;
    data.build_id
        .filter(|id| !id.is_empty())
        .ok_or(RankingError::MissingBuildId)
}

/// Data route serving `category` for the page described by `page`.
pub fn ranking_url(
    base: &str,
    category: RankingCategory,
    page: &PageContext,
) -> Result<Url> {
    let build = page
        .build_id
        .as_deref()
        .ok_or(RankingError::MissingBuildId)?;
    let base = base.trim_end_matches('/');
    let tag = category.as_str();

    let raw = match (&page.season, category) {
        (Some(season), _) => format!(
            "{base}/{season}/_next/data/{build}/ranking/{tag}.json?id={tag}"
        ),
        (None, RankingCategory::Exhibition) => {
            format!("{base}/_next/data/{build}/exhibition.json")
        }
        (None, _) => {
            format!("{base}/_next/data/{build}/ranking/{tag}.json?id={tag}")
        }
    };
    Ok(Url::parse(&raw)?)
}
