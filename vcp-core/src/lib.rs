//! Playback and playlist synchronization core of the vcp overlay.
//!
//! The overlay plays ranked videos through an embedded player frame it can
//! only talk to by message passing. This crate holds everything that does
//! not touch the page directly:
//!
//! - [`playlist`] and [`player`]: the two stores and their invariants
//! - [`bridge`]: best-effort command delivery into the frame and inbound
//!   progress routing
//! - [`gesture`]: seek-bar and floating-window pointer state machines
//! - [`ranking`]: the HTTP ranking collaborator
//! - [`session`]: the handle tying the above together
//!
//! [`testing`] provides in-memory doubles of the page for tests and
//! headless hosts.

pub mod bridge;
pub mod gesture;
pub mod lifecycle;
pub mod player;
pub mod playlist;
pub mod ranking;
pub mod session;
pub mod testing;
pub mod toast;

pub use bridge::{Bridge, DeliveryPolicy};
pub use player::{DisplayMode, PlaybackStatus, PlayerState};
pub use playlist::{PlaylistMode, PlaylistState};
pub use session::Session;
pub use toast::{Toast, ToastKind};
