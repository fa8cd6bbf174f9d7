//! Contracts shared between the vcp core and its hosts.
//!
//! The envelope codec fixes the message shapes exchanged with the embedded
//! player frame. The channel and ranking traits describe the two external
//! collaborators the core talks to, so the core can run against the real
//! page or against in-memory doubles.
#![allow(missing_docs)]

pub mod channel;
pub mod envelope;
pub mod ranking;

pub use channel::{
    ChannelError, CommandChannel, EmbedFrame, ListenerId, MessageListener,
};
pub use envelope::{EventKind, InboundEnvelope, OutboundCommand};
pub use ranking::RankingSource;
