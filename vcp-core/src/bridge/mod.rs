//! Host side of the embedded frame bridge.

mod delivery;
mod inbound;

pub use delivery::{DeliveryOutcome, DeliveryPolicy};

use log::{debug, warn};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use vcp_contracts::{CommandChannel, InboundEnvelope, ListenerId, OutboundCommand};

/// Sends commands into the embedded frame and owns the inbound
/// subscription.
///
/// Pending deliveries live in a [`JoinSet`] so they can be cancelled as a
/// group when the current track changes or the overlay is torn down.
pub struct Bridge {
    channel: Arc<dyn CommandChannel>,
    policy: Mutex<DeliveryPolicy>,
    deliveries: Mutex<JoinSet<DeliveryOutcome>>,
    inbound: Mutex<Option<ListenerId>>,
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("policy", &*self.policy.lock())
            .field("pending", &self.deliveries.lock().len())
            .field("inbound", &*self.inbound.lock())
            .finish()
    }
}

impl Bridge {
    pub fn new(channel: Arc<dyn CommandChannel>, policy: DeliveryPolicy) -> Self {
        Self {
            channel,
            policy: Mutex::new(policy),
            deliveries: Mutex::new(JoinSet::new()),
            inbound: Mutex::new(None),
        }
    }

    pub fn policy(&self) -> DeliveryPolicy {
        self.policy.lock().clone()
    }

    /// Applies to commands sent after the call.
    pub fn set_policy(&self, policy: DeliveryPolicy) {
        *self.policy.lock() = policy;
    }

    /// Fire-and-forget delivery of `command`. Never fails; undeliverable
    /// commands are dropped silently once their retry budget is spent.
    ///
    /// Needs a tokio runtime for the retry timers. Without one a single
    /// direct post is attempted.
    pub fn send_command(&self, command: OutboundCommand) {
        let policy = self.policy();
        let frame = self.channel.locate(&policy.frame_id);

        let Ok(handle) = Handle::try_current() else {
            warn!(
                "[Bridge] No runtime; posting '{}' once without retries",
                command.kind()
            );
            if let Some(frame) = frame
                && let Err(err) = frame.post(&command)
            {
                debug!("[Bridge] Direct post failed: {}", err);
            }
            return;
        };

        let mut deliveries = self.deliveries.lock();
        while deliveries.try_join_next().is_some() {}

        if let Some(frame) = frame.filter(|frame| frame.is_loading()) {
            let load =
                delivery::arm_load(frame.as_ref(), policy.load_deadline);
            deliveries.spawn_on(
                delivery::post_after_load(
                    frame,
                    load,
                    policy.clone(),
                    command,
                ),
                &handle,
            );
        }
        deliveries.spawn_on(
            delivery::poll_until_posted(self.channel.clone(), policy, command),
            &handle,
        );
    }

    /// Abort every delivery still in flight.
    pub fn cancel_pending(&self) {
        let mut deliveries = self.deliveries.lock();
        if !deliveries.is_empty() {
            debug!("[Bridge] Cancelling {} pending deliveries", deliveries.len());
        }
        // Dropping the set aborts everything it holds.
        drop(std::mem::take(&mut *deliveries));
    }

    /// Number of delivery tasks that have not finished yet.
    pub fn pending_deliveries(&self) -> usize {
        let mut deliveries = self.deliveries.lock();
        while deliveries.try_join_next().is_some() {}
        deliveries.len()
    }

    /// Route decoded inbound envelopes to `handler`, replacing any previous
    /// subscription.
    pub fn bind_inbound<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(InboundEnvelope) + Send + Sync + 'static,
    {
        let previous = self.inbound.lock().take();
        if let Some(id) = previous {
            self.channel.unsubscribe(id);
        }

        let id = self.channel.subscribe(inbound::filtered_listener(handler));
        *self.inbound.lock() = Some(id);
        debug!("[Bridge] Inbound bound to {}", id);
        id
    }

    pub fn unbind_inbound(&self) {
        let previous = self.inbound.lock().take();
        if let Some(id) = previous {
            self.channel.unsubscribe(id);
            debug!("[Bridge] Inbound {} released", id);
        }
    }

    pub fn inbound_listener(&self) -> Option<ListenerId> {
        *self.inbound.lock()
    }

    /// Cancel deliveries and drop the inbound subscription.
    pub fn shutdown(&self) {
        self.cancel_pending();
        self.unbind_inbound();
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        self.deliveries.get_mut().abort_all();
        if let Some(id) = self.inbound.get_mut().take() {
            self.channel.unsubscribe(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeFrame, InMemoryChannel};
    use serde_json::json;
    use std::time::Duration;

    const FRAME: &str = "vcp-iframe";

    fn policy(max_attempts: u32) -> DeliveryPolicy {
        DeliveryPolicy {
            max_attempts,
            ..DeliveryPolicy::default()
        }
    }

    fn bridge_with(
        frame: Option<Arc<FakeFrame>>,
        max_attempts: u32,
    ) -> (Arc<InMemoryChannel>, Bridge) {
        let channel = InMemoryChannel::new();
        if let Some(frame) = frame {
            channel.attach(FRAME, frame);
        }
        let bridge = Bridge::new(channel.clone(), policy(max_attempts));
        (channel, bridge)
    }

    #[tokio::test(start_paused = true)]
    async fn ready_frame_receives_command_on_first_tick() {
        let frame = FakeFrame::ready();
        let (_channel, bridge) = bridge_with(Some(frame.clone()), 500);

        bridge.send_command(OutboundCommand::Play);
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(frame.posted(), vec![OutboundCommand::Play]);
        assert_eq!(bridge.pending_deliveries(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn unreachable_frame_exhausts_retry_budget() {
        let frame = FakeFrame::unreachable();
        let (_channel, bridge) = bridge_with(Some(frame.clone()), 500);

        bridge.send_command(OutboundCommand::Pause);
        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(frame.post_calls(), 500);
        assert!(frame.posted().is_empty());
        assert_eq!(bridge.pending_deliveries(), 0);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(frame.post_calls(), 500);
    }

    #[tokio::test(start_paused = true)]
    async fn frame_attached_late_is_found_by_polling() {
        let (channel, bridge) = bridge_with(None, 500);

        bridge.send_command(OutboundCommand::Fullscreen);
        tokio::time::sleep(Duration::from_secs(2)).await;

        let frame = FakeFrame::ready();
        channel.attach(FRAME, frame.clone());
        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(frame.posted(), vec![OutboundCommand::Fullscreen]);
    }

    #[tokio::test(start_paused = true)]
    async fn loading_frame_gets_command_after_load() {
        let frame = FakeFrame::loading();
        let (_channel, bridge) = bridge_with(Some(frame.clone()), 0);

        bridge.send_command(OutboundCommand::seek(0.4));
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(frame.posted().is_empty());

        frame.fire_load();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(frame.posted().is_empty(), "post waits for the settle delay");

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(frame.posted(), vec![OutboundCommand::seek(0.4)]);
    }

    #[tokio::test(start_paused = true)]
    async fn load_fired_before_task_runs_is_not_missed() {
        let frame = FakeFrame::loading();
        let (_channel, bridge) = bridge_with(Some(frame.clone()), 0);

        bridge.send_command(OutboundCommand::Play);
        frame.fire_load();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(frame.posted(), vec![OutboundCommand::Play]);
    }

    #[tokio::test(start_paused = true)]
    async fn late_load_drops_stale_command() {
        let frame = FakeFrame::loading();
        let (_channel, bridge) = bridge_with(Some(frame.clone()), 0);

        bridge.send_command(OutboundCommand::Play);
        tokio::time::sleep(Duration::from_secs(6)).await;
        frame.fire_load();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(frame.posted().is_empty());
        assert_eq!(bridge.pending_deliveries(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_pending_stops_retries() {
        let frame = FakeFrame::unreachable();
        let (_channel, bridge) = bridge_with(Some(frame.clone()), 500);

        bridge.send_command(OutboundCommand::Play);
        tokio::time::sleep(Duration::from_millis(1_050)).await;
        let calls = frame.post_calls();
        assert_eq!(calls, 10);

        bridge.cancel_pending();
        assert_eq!(bridge.pending_deliveries(), 0);

        frame.set_window_ready(true);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(frame.post_calls(), calls);
        assert!(frame.posted().is_empty());
    }

    #[test]
    fn without_runtime_posts_once() {
        let frame = FakeFrame::ready();
        let (_channel, bridge) = bridge_with(Some(frame.clone()), 500);

        bridge.send_command(OutboundCommand::volume(0.3));
        assert_eq!(frame.posted(), vec![OutboundCommand::volume(0.3)]);
    }

    #[test]
    fn inbound_binding_filters_and_replaces() {
        let (channel, bridge) = bridge_with(None, 500);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bridge.bind_inbound(move |envelope| sink.lock().push(envelope));
        channel.dispatch(&json!({"foo": "bar"}));
        channel.dispatch(&json!({"type": "unknown"}));
        channel.dispatch(&json!({"type": "progress", "percentage": 0.3}));
        assert_eq!(
            *seen.lock(),
            vec![InboundEnvelope::Progress { percentage: 0.3 }]
        );

        let sink = seen.clone();
        bridge.bind_inbound(move |envelope| sink.lock().push(envelope));
        assert_eq!(channel.listener_count(), 1);

        bridge.unbind_inbound();
        assert_eq!(channel.listener_count(), 0);
        assert!(bridge.inbound_listener().is_none());
    }
}
