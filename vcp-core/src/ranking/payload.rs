//! Ranking documents as served by the site's data routes.
//!
//! Two shapes exist. The live event serves `data.ranking.videos`; archived
//! seasons serve a mylist under `pageProps.localRankingData`.

use super::error::{RankingError, Result};
use log::trace;
use serde::Deserialize;
use vcp_model::{Track, VideoId};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RankingDocument {
    Archived {
        #[serde(rename = "pageProps")]
        page_props: ArchivedProps,
    },
    Live {
        #[serde(default)]
        data: Option<LiveData>,
    },
}

#[derive(Debug, Deserialize)]
struct LiveData {
    ranking: Option<VideoList>,
}

#[derive(Debug, Deserialize)]
struct VideoList {
    #[serde(default)]
    videos: Vec<RawVideo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArchivedProps {
    local_ranking_data: ArchivedRanking,
}

#[derive(Debug, Deserialize)]
struct ArchivedRanking {
    #[serde(default)]
    data: Option<ArchivedData>,
}

#[derive(Debug, Deserialize)]
struct ArchivedData {
    #[serde(default)]
    mylist: Option<ItemList>,
    #[serde(default)]
    items: Option<Vec<RawItem>>,
}

#[derive(Debug, Deserialize)]
struct ItemList {
    #[serde(default)]
    items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    video: RawVideo,
}

#[derive(Debug, Deserialize)]
struct RawVideo {
    id: String,
    title: String,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    owner: Option<RawOwner>,
    #[serde(default)]
    thumbnail: Option<RawThumbnail>,
    #[serde(default)]
    count: Option<RawCount>,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawThumbnail {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    middle_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCount {
    #[serde(default)]
    view: Option<u64>,
}

impl RawVideo {
    fn into_track(self) -> Option<Track> {
        let id = match VideoId::new(self.id) {
            Ok(id) => id,
            Err(err) => {
                trace!("[Ranking] Skipping video: {}", err);
                return None;
            }
        };

        let duration = if self.duration.is_finite() {
            self.duration.round().clamp(0.0, f64::from(u32::MAX)) as u32
        } else {
            0
        };
        let owner = self.owner.and_then(|o| o.name).unwrap_or_default();
        let mut track = Track::new(id, self.title, duration, owner);

        if let Some(url) = self
            .thumbnail
            .and_then(|thumb| thumb.middle_url.or(thumb.url))
        {
            track = track.with_thumbnail(url);
        }
        if let Some(views) = self.count.and_then(|count| count.view) {
            track = track.with_view_count(views);
        }
        Some(track)
    }
}

/// Decode a ranking document into tracks, in ranking order.
pub fn parse_ranking(body: &str) -> Result<Vec<Track>> {
    let document: RankingDocument = serde_json::from_str(body)?;

    let videos = match document {
        RankingDocument::Live { data } => data
            .and_then(|data| data.ranking)
            .map(|ranking| ranking.videos)
            .ok_or(RankingError::MissingData)?,
        RankingDocument::Archived { page_props } => {
            let data = page_props.local_ranking_data.data;
            data.and_then(|data| {
                data.mylist.map(|list| list.items).or(data.items)
            })
            .unwrap_or_default()
            .into_iter()
            .map(|item| item.video)
            .collect()
        }
    };

    Ok(videos.into_iter().filter_map(RawVideo::into_track).collect())
}
