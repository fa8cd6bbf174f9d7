//! In-memory stand-ins for the host page.
//!
//! `InMemoryChannel` plays the window message channel and the DOM lookup;
//! `FakeFrame` plays the embedded player frame and records every command it
//! accepts.

use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use tokio::sync::watch;
use vcp_contracts::{
    ChannelError, CommandChannel, EmbedFrame, ListenerId, MessageListener,
    OutboundCommand,
};

/// Embedded frame double.
///
/// Starts loading with no content window. `fire_load` completes the load and
/// opens the window; `set_window_ready` toggles the window independently.
#[derive(Debug)]
pub struct FakeFrame {
    loading: AtomicBool,
    window_ready: AtomicBool,
    post_calls: AtomicU32,
    posted: Mutex<Vec<OutboundCommand>>,
    loads: watch::Sender<u64>,
}

impl FakeFrame {
    pub fn loading() -> Arc<Self> {
        Arc::new(Self::with_state(true, false))
    }

    pub fn ready() -> Arc<Self> {
        Arc::new(Self::with_state(false, true))
    }

    /// Attached and loaded, but the content window never opens.
    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self::with_state(false, false))
    }

    fn with_state(loading: bool, window_ready: bool) -> Self {
        let (loads, _) = watch::channel(0);
        Self {
            loading: AtomicBool::new(loading),
            window_ready: AtomicBool::new(window_ready),
            post_calls: AtomicU32::new(0),
            posted: Mutex::new(Vec::new()),
            loads,
        }
    }

    pub fn fire_load(&self) {
        self.loading.store(false, Ordering::SeqCst);
        self.window_ready.store(true, Ordering::SeqCst);
        self.loads.send_modify(|generation| *generation += 1);
    }

    /// Start a new navigation inside the frame, as a `src` change does.
    pub fn begin_reload(&self) {
        self.loading.store(true, Ordering::SeqCst);
    }

    pub fn set_window_ready(&self, ready: bool) {
        self.window_ready.store(ready, Ordering::SeqCst);
    }

    /// Commands the frame accepted, in order.
    pub fn posted(&self) -> Vec<OutboundCommand> {
        self.posted.lock().clone()
    }

    pub fn take_posted(&self) -> Vec<OutboundCommand> {
        std::mem::take(&mut *self.posted.lock())
    }

    /// Every post attempt, accepted or not.
    pub fn post_calls(&self) -> u32 {
        self.post_calls.load(Ordering::SeqCst)
    }
}

impl EmbedFrame for FakeFrame {
    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    fn next_load(&self) -> BoxFuture<'static, ()> {
        let mut loads = self.loads.subscribe();
        async move {
            // A removed frame never loads.
            if loads.changed().await.is_err() {
                futures::future::pending::<()>().await;
            }
        }
        .boxed()
    }

    fn post(&self, command: &OutboundCommand) -> Result<(), ChannelError> {
        self.post_calls.fetch_add(1, Ordering::SeqCst);
        if !self.window_ready.load(Ordering::SeqCst) {
            return Err(ChannelError::WindowUnavailable);
        }
        self.posted.lock().push(*command);
        Ok(())
    }
}

/// Host window double: a frame registry plus a listener list.
#[derive(Default)]
pub struct InMemoryChannel {
    frames: Mutex<HashMap<String, Arc<FakeFrame>>>,
    listeners: Mutex<Vec<(ListenerId, MessageListener)>>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for InMemoryChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryChannel")
            .field("frames", &self.frames.lock().keys().collect::<Vec<_>>())
            .field("listeners", &self.listeners.lock().len())
            .finish()
    }
}

impl InMemoryChannel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn attach(&self, frame_id: &str, frame: Arc<FakeFrame>) {
        self.frames.lock().insert(frame_id.to_string(), frame);
    }

    pub fn detach(&self, frame_id: &str) -> Option<Arc<FakeFrame>> {
        self.frames.lock().remove(frame_id)
    }

    /// Deliver a raw message to every listener registered at call time.
    pub fn dispatch(&self, raw: &Value) {
        let snapshot: Vec<MessageListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener(raw);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl CommandChannel for InMemoryChannel {
    fn locate(&self, frame_id: &str) -> Option<Arc<dyn EmbedFrame>> {
        self.frames
            .lock()
            .get(frame_id)
            .cloned()
            .map(|frame| frame as Arc<dyn EmbedFrame>)
    }

    fn subscribe(&self, listener: MessageListener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.listeners.lock().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.lock().retain(|(existing, _)| *existing != id);
    }
}
