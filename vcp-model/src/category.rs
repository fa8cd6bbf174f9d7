use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Ranking list a playlist entry was pulled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RankingCategory {
    Top100,
    Rookie,
    Remix,
    Exhibition,
}

impl RankingCategory {
    pub const ALL: [Self; 4] =
        [Self::Top100, Self::Rookie, Self::Remix, Self::Exhibition];

    /// Tag used in ranking URLs and page paths.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top100 => "top100",
            Self::Rookie => "rookie",
            Self::Remix => "remix",
            Self::Exhibition => "exhibition",
        }
    }

    /// Label shown in the playlist header.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Top100 => "TOP100",
            Self::Rookie => "Rookie",
            Self::Remix => "REMIX",
            Self::Exhibition => "Exhibition",
        }
    }

    /// Detect the category a ranking page path belongs to.
    ///
    /// Checked in declaration order, so `/ranking/top100` wins over any later
    /// tag that happens to appear in the same path.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| path.contains(c.as_str()))
    }
}

impl fmt::Display for RankingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for RankingCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tags_case_insensitively() {
        assert_eq!("REMIX".parse::<RankingCategory>(), Ok(RankingCategory::Remix));
        assert_eq!(
            " rookie ".parse::<RankingCategory>(),
            Ok(RankingCategory::Rookie)
        );
        assert_eq!(
            "weekly".parse::<RankingCategory>(),
            Err(ModelError::UnknownCategory("weekly".into()))
        );
    }

    #[test]
    fn detects_category_from_page_path() {
        assert_eq!(
            RankingCategory::from_path("/2025-summer/ranking/rookie"),
            Some(RankingCategory::Rookie)
        );
        assert_eq!(
            RankingCategory::from_path("/exhibition"),
            Some(RankingCategory::Exhibition)
        );
        assert_eq!(RankingCategory::from_path("/about"), None);
    }
}
