use thiserror::Error;

/// Failures inside the ranking client. None of these cross the
/// [`RankingSource`](vcp_contracts::RankingSource) boundary; they are logged
/// and turned into an empty result there.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ranking endpoint answered with status {0}")]
    Status(u16),

    #[error("ranking payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("ranking payload carries no video list")]
    MissingData,

    #[error("page data has no build id")]
    MissingBuildId,

    #[error("invalid ranking url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, RankingError>;
