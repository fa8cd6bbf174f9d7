//! Playlist domain
//!
//! Ordered list of ranking entries with a clamped cursor. All operations are
//! synchronous and touch nothing but the store.

pub mod state;
pub mod store;

pub use state::{
    PlaylistMode, PlaylistState, category_name, current_entry, current_track,
};
pub use store::PlaylistStore;
