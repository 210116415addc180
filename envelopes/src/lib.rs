//! Shared envelope model and JSON codec for the classroom realtime protocol.
//!
//! This crate owns the wire representation used by every feature channel.
//! Payloads stay flexible (`serde_json::Value`) while the envelope itself is
//! strongly typed; each topic defines its own closed set of `kind` tags and a
//! handler never sees envelopes from a topic it did not subscribe to.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error returned by [`decode_envelope`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw bytes were not valid UTF-8.
    #[error("envelope bytes are not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// The text could not be parsed as a JSON envelope.
    #[error("failed to parse envelope JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The envelope named a topic outside the closed topic set.
    #[error("unknown topic: {0}")]
    UnknownTopic(String),
}

/// Broadcast namespaces. Messages on one topic are invisible to other
/// topics' handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Session chat log.
    Chat,
    /// Poll / quiz lifecycle and responses.
    Poll,
    /// Presented document, viewport, and whiteboard strokes.
    Projection,
    /// Raised-hand queue.
    Raisehand,
    /// Recitation playback control.
    QuranSync,
    /// Session material list.
    Materials,
}

impl Topic {
    /// All topics, in subscription order.
    pub const ALL: [Topic; 6] = [
        Topic::Chat,
        Topic::Poll,
        Topic::Projection,
        Topic::Raisehand,
        Topic::QuranSync,
        Topic::Materials,
    ];

    /// The topic's wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Poll => "poll",
            Self::Projection => "projection",
            Self::Raisehand => "raisehand",
            Self::QuranSync => "quran_sync",
            Self::Materials => "materials",
        }
    }

    /// Parse a topic from its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnknownTopic`] for names outside the closed set.
    pub fn from_wire(name: &str) -> Result<Self, CodecError> {
        match name {
            "chat" => Ok(Self::Chat),
            "poll" => Ok(Self::Poll),
            "projection" => Ok(Self::Projection),
            "raisehand" => Ok(Self::Raisehand),
            "quran_sync" => Ok(Self::QuranSync),
            "materials" => Ok(Self::Materials),
            other => Err(CodecError::UnknownTopic(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message on the classroom wire protocol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Type tag, unique within the topic (e.g. `"POLL_CREATED"`).
    #[serde(rename = "type")]
    pub kind: String,
    /// The topic this envelope travels on.
    pub topic: Topic,
    /// Participant identity of the sender.
    pub sender_id: String,
    /// Feature-specific payload.
    pub payload: Value,
    /// Milliseconds since the Unix epoch when the envelope was built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl Envelope {
    /// Build an envelope with an empty object payload.
    #[must_use]
    pub fn new(topic: Topic, kind: &str, sender_id: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            topic,
            sender_id: sender_id.to_owned(),
            payload: Value::Object(serde_json::Map::new()),
            timestamp: None,
        }
    }

    /// Replace the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = payload;
        self
    }

    /// Set the creation timestamp (ms since Unix epoch).
    #[must_use]
    pub fn with_timestamp(mut self, ts: i64) -> Self {
        self.timestamp = Some(ts);
        self
    }
}

/// Encode an envelope into UTF-8 JSON bytes.
#[must_use]
pub fn encode_envelope(envelope: &Envelope) -> Vec<u8> {
    // Envelope contains no non-string map keys, so serialization cannot fail.
    serde_json::to_vec(envelope).unwrap_or_default()
}

/// Decode UTF-8 JSON bytes into an envelope.
///
/// # Errors
///
/// Returns [`CodecError::Utf8`] for non-UTF-8 bytes and [`CodecError::Json`]
/// for text that does not parse as an envelope.
pub fn decode_envelope(bytes: &[u8]) -> Result<Envelope, CodecError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(serde_json::from_str(text)?)
}

/// The closed tag set of every topic. Tags are unique within a topic;
/// handlers ignore tags outside the set for forward compatibility.
pub mod kinds {
    // chat
    pub const CHAT_MESSAGE: &str = "CHAT_MESSAGE";

    // poll
    pub const POLL_CREATED: &str = "POLL_CREATED";
    pub const POLL_RESPONSE: &str = "POLL_RESPONSE";
    pub const POLL_RESULTS_TOGGLED: &str = "POLL_RESULTS_TOGGLED";
    pub const POLL_ENDED: &str = "POLL_ENDED";
    pub const POLL_STATE_REQUEST: &str = "POLL_STATE_REQUEST";
    pub const POLL_STATE: &str = "POLL_STATE";

    // projection
    pub const PROJECTION_UPDATE: &str = "PROJECTION_UPDATE";
    pub const STROKE_STARTED: &str = "STROKE_STARTED";
    pub const STROKE_POINTS: &str = "STROKE_POINTS";
    pub const STROKE_ENDED: &str = "STROKE_ENDED";
    pub const WHITEBOARD_UNDO: &str = "WHITEBOARD_UNDO";
    pub const WHITEBOARD_CLEAR: &str = "WHITEBOARD_CLEAR";
    pub const PROJECTION_STATE_REQUEST: &str = "PROJECTION_STATE_REQUEST";
    pub const PROJECTION_STATE: &str = "PROJECTION_STATE";

    // raisehand
    pub const HAND_RAISED: &str = "HAND_RAISED";
    pub const HAND_LOWERED: &str = "HAND_LOWERED";
    pub const HAND_STATE_REQUEST: &str = "HAND_STATE_REQUEST";
    pub const HAND_STATE: &str = "HAND_STATE";

    // quran_sync
    pub const RECITATION_PLAY: &str = "RECITATION_PLAY";
    pub const RECITATION_PAUSE: &str = "RECITATION_PAUSE";
    pub const RECITATION_RESUME: &str = "RECITATION_RESUME";
    pub const RECITATION_STOP: &str = "RECITATION_STOP";
    pub const RECITATION_STATE_REQUEST: &str = "RECITATION_STATE_REQUEST";
    pub const RECITATION_STATE: &str = "RECITATION_STATE";

    // materials
    pub const MATERIAL_ADDED: &str = "MATERIAL_ADDED";
    pub const MATERIAL_REMOVED: &str = "MATERIAL_REMOVED";
    pub const MATERIALS_STATE_REQUEST: &str = "MATERIALS_STATE_REQUEST";
    pub const MATERIALS_STATE: &str = "MATERIALS_STATE";
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
