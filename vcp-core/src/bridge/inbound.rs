use log::trace;
use serde_json::Value;
use std::sync::Arc;
use vcp_contracts::{InboundEnvelope, MessageListener};

/// Wrap an envelope handler into a raw channel listener that drops anything
/// the codec does not recognise.
pub(crate) fn filtered_listener<F>(handler: F) -> MessageListener
where
    F: Fn(InboundEnvelope) + Send + Sync + 'static,
{
    Arc::new(move |raw: &Value| match InboundEnvelope::decode(raw) {
        Some(envelope) => handler(envelope),
        None => trace!("[Bridge] Ignoring foreign message"),
    })
}
