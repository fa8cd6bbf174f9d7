//! Core data model definitions shared across vcp crates.
#![allow(missing_docs)]

pub mod category;
pub mod entry;
pub mod error;
pub mod format;
pub mod ids;
pub mod track;

// Intentionally curated re-exports for downstream consumers.
pub use category::RankingCategory;
pub use entry::{CategoryRanking, PlaylistEntry};
pub use error::{ModelError, Result as ModelResult};
pub use format::format_duration;
pub use ids::VideoId;
pub use track::Track;
