//! Best-effort delivery of a single command into the embedded frame.
//!
//! Two independent paths race for every command:
//!
//! * the load path, armed only when the frame is still loading, posts shortly
//!   after the frame's `load` event unless that event arrives after the
//!   deadline;
//! * the polling path re-locates the frame every interval and posts as soon
//!   as the frame accepts, giving up after a fixed number of attempts.
//!
//! Both may deliver. Every command is idempotent on the receiving side so a
//! duplicate is harmless.

use futures::future::BoxFuture;
use log::{debug, trace};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Timeout;
use vcp_config::{BridgeConfig, RuntimeConfig};
use vcp_contracts::{CommandChannel, EmbedFrame, OutboundCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryPolicy {
    pub frame_id: String,
    pub retry_interval: Duration,
    pub max_attempts: u32,
    pub load_deadline: Duration,
    pub post_load_delay: Duration,
}

impl DeliveryPolicy {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            frame_id: config.frame_id.clone(),
            retry_interval: config.retry_interval(),
            max_attempts: config.max_attempts,
            load_deadline: config.load_deadline(),
            post_load_delay: config.post_load_delay(),
        }
    }

    /// Policy with runtime overrides applied on top of the loaded config.
    pub fn from_runtime(runtime: &RuntimeConfig) -> Self {
        let bridge = &runtime.base().bridge;
        Self {
            frame_id: bridge.frame_id.clone(),
            retry_interval: Duration::from_millis(runtime.retry_interval_ms()),
            max_attempts: runtime.max_attempts(),
            load_deadline: Duration::from_millis(runtime.load_deadline_ms()),
            post_load_delay: bridge.post_load_delay(),
        }
    }
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self::from_config(&BridgeConfig::default())
    }
}

/// How a delivery task ended. Only used for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered { attempts: u32 },
    Exhausted,
    Stale,
}

/// Wait for a load that was armed when the command was issued.
///
/// `load` must be created synchronously in the caller so a `load` event
/// firing before this task first runs is not missed, and so the deadline
/// counts from the call.
pub(crate) fn arm_load(
    frame: &dyn EmbedFrame,
    deadline: Duration,
) -> Timeout<BoxFuture<'static, ()>> {
    tokio::time::timeout(deadline, frame.next_load())
}

/// Post `command` once the armed `load` fires.
pub(crate) async fn post_after_load(
    frame: Arc<dyn EmbedFrame>,
    load: Timeout<BoxFuture<'static, ()>>,
    policy: DeliveryPolicy,
    command: OutboundCommand,
) -> DeliveryOutcome {
    if load.await.is_err() {
        debug!(
            "[Bridge] Dropping stale '{}' command: frame did not load within {:?}",
            command.kind(),
            policy.load_deadline
        );
        return DeliveryOutcome::Stale;
    }

    tokio::time::sleep(policy.post_load_delay).await;
    match frame.post(&command) {
        Ok(()) => {
            trace!("[Bridge] '{}' delivered after load", command.kind());
            DeliveryOutcome::Delivered { attempts: 1 }
        }
        Err(err) => {
            debug!(
                "[Bridge] '{}' post after load failed: {}",
                command.kind(),
                err
            );
            DeliveryOutcome::Exhausted
        }
    }
}

/// Poll for the frame and post `command` as soon as it is accepted.
pub(crate) async fn poll_until_posted(
    channel: Arc<dyn CommandChannel>,
    policy: DeliveryPolicy,
    command: OutboundCommand,
) -> DeliveryOutcome {
    for attempt in 1..=policy.max_attempts {
        tokio::time::sleep(policy.retry_interval).await;

        let Some(frame) = channel.locate(&policy.frame_id) else {
            continue;
        };
        match frame.post(&command) {
            Ok(()) => {
                trace!(
                    "[Bridge] '{}' delivered on attempt {}",
                    command.kind(),
                    attempt
                );
                return DeliveryOutcome::Delivered { attempts: attempt };
            }
            Err(err) => {
                trace!(
                    "[Bridge] '{}' attempt {} failed: {}",
                    command.kind(),
                    attempt,
                    err
                );
            }
        }
    }

    debug!(
        "[Bridge] Giving up on '{}' after {} attempts",
        command.kind(),
        policy.max_attempts
    );
    DeliveryOutcome::Exhausted
}
