//! Short-lived user notifications, e.g. a failed ranking fetch.

use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct ToastQueue {
    lifetime: Duration,
    next_id: u64,
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            next_id: 0,
            toasts: VecDeque::new(),
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.push_at(message, kind, Instant::now())
    }

    pub fn push_at(
        &mut self,
        message: impl Into<String>,
        kind: ToastKind,
        now: Instant,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push_back(Toast {
            id,
            message: message.into(),
            kind,
            expires_at: now + self.lifetime,
        });
        id
    }

    /// Drop expired toasts. Returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|toast| !toast.is_expired(now));
        before - self.toasts.len()
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        before != self.toasts.len()
    }

    /// Live toasts in push order.
    pub fn active(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_lifetime() {
        let mut queue = ToastQueue::new(Duration::from_millis(3_000));
        let start = Instant::now();

        let first = queue.push_at("first", ToastKind::Error, start);
        let second = queue.push_at(
            "second",
            ToastKind::Info,
            start + Duration::from_millis(1_000),
        );
        assert!(second > first);

        assert_eq!(queue.prune(start + Duration::from_millis(2_999)), 0);
        assert_eq!(queue.prune(start + Duration::from_millis(3_000)), 1);

        let messages: Vec<_> =
            queue.active().map(|toast| toast.message.as_str()).collect();
        assert_eq!(messages, ["second"]);
    }

    #[test]
    fn dismiss_by_id() {
        let mut queue = ToastQueue::new(Duration::from_secs(3));
        let id = queue.push("gone", ToastKind::Info);
        assert!(queue.dismiss(id));
        assert!(!queue.dismiss(id));
        assert!(queue.is_empty());
    }
}
