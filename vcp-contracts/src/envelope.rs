//! Envelope codec for the host <-> embedded frame message channel.
//!
//! Both directions use JSON objects tagged by a `type` field. The window
//! message channel is shared with every other script on the page, so inbound
//! decoding is a filter: anything that is not one of the known kinds is
//! dropped without an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The closed set of message kinds understood on both sides of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Play,
    Pause,
    Progress,
    Volume,
    Fullscreen,
}

impl EventKind {
    pub const ALL: [Self; 5] = [
        Self::Play,
        Self::Pause,
        Self::Progress,
        Self::Volume,
        Self::Fullscreen,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Progress => "progress",
            Self::Volume => "volume",
            Self::Fullscreen => "fullscreen",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message received from the embedded frame.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InboundEnvelope {
    Play,
    Pause,
    /// Playback position reported by the embedded player, in `[0, 1]`.
    Progress { percentage: f64 },
    Volume { volume: f64 },
    Fullscreen,
}

impl InboundEnvelope {
    /// Decode a raw window message.
    ///
    /// Returns `None` for anything that is not an object with a known `type`,
    /// for known kinds with missing or non-numeric payloads, and for
    /// non-finite numbers. Fractions are clamped into `[0, 1]`.
    pub fn decode(raw: &Value) -> Option<Self> {
        if !raw.is_object() {
            return None;
        }

        let envelope = Self::deserialize(raw).ok()?;
        match envelope {
            Self::Progress { percentage } => {
                clamp_unit(percentage).map(|p| Self::Progress { percentage: p })
            }
            Self::Volume { volume } => {
                clamp_unit(volume).map(|v| Self::Volume { volume: v })
            }
            other => Some(other),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Play => EventKind::Play,
            Self::Pause => EventKind::Pause,
            Self::Progress { .. } => EventKind::Progress,
            Self::Volume { .. } => EventKind::Volume,
            Self::Fullscreen => EventKind::Fullscreen,
        }
    }
}

/// A command posted into the embedded frame. Fire-and-forget: the frame
/// never acknowledges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundCommand {
    Play,
    Pause,
    /// Seek target in `[0, 1]`.
    #[serde(rename = "progress")]
    Seek { progress: f64 },
    Volume { volume: f64 },
    Fullscreen,
}

impl OutboundCommand {
    /// Seek command with the target clamped into `[0, 1]`; non-finite targets
    /// fall back to the start.
    pub fn seek(progress: f64) -> Self {
        Self::Seek {
            progress: clamp_unit(progress).unwrap_or(0.0),
        }
    }

    /// Volume command with the level clamped into `[0, 1]`.
    pub fn volume(volume: f64) -> Self {
        Self::Volume {
            volume: clamp_unit(volume).unwrap_or(0.0),
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Play => EventKind::Play,
            Self::Pause => EventKind::Pause,
            Self::Seek { .. } => EventKind::Progress,
            Self::Volume { .. } => EventKind::Volume,
            Self::Fullscreen => EventKind::Fullscreen,
        }
    }

    pub fn to_json(&self) -> Value {
        // Serializing a plain tagged enum of floats cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn clamp_unit(value: f64) -> Option<f64> {
    value.is_finite().then(|| value.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_known_progress_envelope() {
        let decoded =
            InboundEnvelope::decode(&json!({"type": "progress", "percentage": 0.25}));
        assert_eq!(decoded, Some(InboundEnvelope::Progress { percentage: 0.25 }));
    }

    #[test]
    fn discards_foreign_messages() {
        for raw in [
            json!({"foo": "bar"}),
            json!({"type": "unknown"}),
            json!({"type": 3}),
            json!("progress"),
            json!(null),
            json!([{"type": "play"}]),
            json!({"type": "progress"}),
            json!({"type": "progress", "percentage": "half"}),
        ] {
            assert_eq!(InboundEnvelope::decode(&raw), None, "{raw}");
        }
    }

    #[test]
    fn clamps_out_of_range_fractions() {
        assert_eq!(
            InboundEnvelope::decode(&json!({"type": "progress", "percentage": 1.7})),
            Some(InboundEnvelope::Progress { percentage: 1.0 })
        );
        assert_eq!(
            InboundEnvelope::decode(&json!({"type": "volume", "volume": -0.5})),
            Some(InboundEnvelope::Volume { volume: 0.0 })
        );
    }

    #[test]
    fn ignores_extra_fields() {
        let decoded = InboundEnvelope::decode(
            &json!({"type": "play", "source": "embed", "seq": 4}),
        );
        assert_eq!(decoded.map(|e| e.kind()), Some(EventKind::Play));
    }

    #[test]
    fn outbound_wire_shapes() {
        assert_eq!(OutboundCommand::Play.to_json(), json!({"type": "play"}));
        assert_eq!(
            OutboundCommand::seek(0.5).to_json(),
            json!({"type": "progress", "progress": 0.5})
        );
        assert_eq!(
            OutboundCommand::volume(3.0).to_json(),
            json!({"type": "volume", "volume": 1.0})
        );
        assert_eq!(
            OutboundCommand::Fullscreen.to_json(),
            json!({"type": "fullscreen"})
        );
        assert_eq!(OutboundCommand::seek(0.5).kind(), EventKind::Progress);
    }
}
