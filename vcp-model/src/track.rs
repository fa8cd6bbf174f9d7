use url::Url;

use crate::error::Result;
use crate::ids::VideoId;

const EMBED_QUERY: &str = "persistence=1&oldScript=1&referer=&from=0";

/// External video metadata as published by the ranking site. Never mutated
/// after construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub id: VideoId,
    pub title: String,
    /// Length in whole seconds.
    pub duration_secs: u32,
    pub owner_name: String,
    pub thumbnail_url: Option<String>,
    pub view_count: Option<u64>,
}

impl Track {
    pub fn new(
        id: VideoId,
        title: impl Into<String>,
        duration_secs: u32,
        owner_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            duration_secs,
            owner_name: owner_name.into(),
            thumbnail_url: None,
            view_count: None,
        }
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    pub fn with_view_count(mut self, views: u64) -> Self {
        self.view_count = Some(views);
        self
    }

    /// Watch page on the video site, e.g. `{base}/sm123`.
    pub fn watch_url(&self, base: &str) -> Result<Url> {
        join_id(base, &self.id)
    }

    /// Embeddable player URL loaded into the overlay iframe.
    pub fn embed_url(&self, base: &str) -> Result<Url> {
        let mut url = join_id(base, &self.id)?;
        url.set_query(Some(EMBED_QUERY));
        Ok(url)
    }
}

fn join_id(base: &str, id: &VideoId) -> Result<Url> {
    let base = base.trim().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}/{id}"))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> Track {
        Track::new(VideoId::new("sm9").unwrap(), "Song", 215, "Producer")
    }

    #[test]
    fn builds_watch_and_embed_urls() {
        let t = track();
        assert_eq!(
            t.watch_url("https://www.nicovideo.jp/watch/").unwrap().as_str(),
            "https://www.nicovideo.jp/watch/sm9"
        );
        assert_eq!(
            t.embed_url("https://embed.nicovideo.jp/watch")
                .unwrap()
                .as_str(),
            "https://embed.nicovideo.jp/watch/sm9?persistence=1&oldScript=1&referer=&from=0"
        );
    }

    #[test]
    fn rejects_relative_base() {
        assert!(track().watch_url("watch").is_err());
    }
}
