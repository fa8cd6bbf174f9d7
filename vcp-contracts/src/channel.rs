//! Abstraction over the host window <-> embedded frame boundary.
//!
//! The core never touches the frame's document. It can only find the frame,
//! ask whether it is still loading, wait for its next `load` event and post a
//! command into it. Inbound traffic arrives through listeners registered on
//! the host's shared message channel.

use crate::envelope::OutboundCommand;
use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Why a post into the frame did not go through.
///
/// Every variant is treated as "not delivered yet" by the bridge; none of them
/// is surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelError {
    #[error("embedded frame is not attached")]
    FrameMissing,

    #[error("embedded frame has no content window yet")]
    WindowUnavailable,

    #[error("post rejected: {0}")]
    Rejected(String),
}

/// Handle to a registered inbound listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// Callback invoked with every raw message the host window receives.
pub type MessageListener = Arc<dyn Fn(&Value) + Send + Sync>;

/// The live embedded player frame.
pub trait EmbedFrame: Send + Sync {
    /// True while the frame document has not fired `load` yet.
    fn is_loading(&self) -> bool;

    /// Resolves on the frame's next `load` event. Never resolves if the frame
    /// is removed first.
    fn next_load(&self) -> BoxFuture<'static, ()>;

    /// Post a command into the frame's content window.
    fn post(&self, command: &OutboundCommand) -> Result<(), ChannelError>;
}

/// The host side of the message channel.
///
/// Implementations must tolerate `subscribe`/`unsubscribe` being called from
/// inside a listener while a message is being dispatched.
pub trait CommandChannel: Send + Sync {
    /// Find the embedded frame by its element id.
    fn locate(&self, frame_id: &str) -> Option<Arc<dyn EmbedFrame>>;

    fn subscribe(&self, listener: MessageListener) -> ListenerId;

    fn unsubscribe(&self, id: ListenerId);
}
