use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Identifier of a video on the embedding site (`sm12345678` style).
///
/// The id is opaque to the player; the only structural rule enforced is that
/// it is non-empty and contains no whitespace or path separators, so it can be
/// spliced into watch/embed URLs and matched against page links.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VideoId(String);

impl VideoId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ModelError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed
                .chars()
                .any(|c| c.is_whitespace() || c == '/' || c == '?' || c == '#')
        {
            return Err(ModelError::InvalidVideoId(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `url` refers to this video: the id appears in it and is not
    /// just the prefix of a longer id (`sm1` does not match `sm10`).
    pub fn appears_in(&self, url: &str) -> bool {
        url.match_indices(self.as_str()).any(|(start, id)| {
            url[start + id.len()..]
                .chars()
                .next()
                .is_none_or(|next| !next.is_ascii_alphanumeric())
        })
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VideoId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
