mod advance;
mod state;
mod store;

pub use advance::AutoAdvance;
pub use state::{DisplayMode, PlaybackStatus, PlayerState};
pub use store::PlayerStore;
