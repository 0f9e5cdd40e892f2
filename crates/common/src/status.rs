//! Task status snapshots published on status channels.
//!
//! Tasks publish their state as a JSON object serialized into the `data`
//! field of a [`StatusEvent`]. Handlers only act when the field is present
//! and parses to an object; malformed payloads are skipped without error.

use serde_json::{Map, Value};

/// Raw status event as published by a task worker.
#[derive(Clone, Debug, Default)]
pub struct StatusEvent {
    /// JSON-encoded status object, when the task attached one.
    pub data: Option<String>,
}

impl StatusEvent {
    /// Event carrying a JSON status payload.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }

    /// Event with no payload.
    pub fn empty() -> Self {
        Self { data: None }
    }

    /// Event from a structured status object.
    pub fn from_value(value: &Value) -> Self {
        Self {
            data: Some(value.to_string()),
        }
    }
}

/// Operating state reported in the `status` field of a snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OperatingState {
    /// Task present but no backing device/resource.
    #[default]
    Absent,
    /// Administratively disabled.
    Disabled,
    /// Ready, not running.
    Idle,
    /// Device producing samples.
    Streaming,
    /// Acquisition suspended.
    Paused,
    /// Decoder consuming samples.
    Decoding,
}

impl OperatingState {
    /// Parse the wire string; unrecognized values map to `Absent`.
    pub fn parse(value: &str) -> Self {
        match value {
            "disabled" => Self::Disabled,
            "idle" => Self::Idle,
            "streaming" => Self::Streaming,
            "paused" => Self::Paused,
            "decoding" => Self::Decoding,
            _ => Self::Absent,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Disabled => "disabled",
            Self::Idle => "idle",
            Self::Streaming => "streaming",
            Self::Paused => "paused",
            Self::Decoding => "decoding",
        }
    }
}

/// Parsed status snapshot with typed accessors for the fields the
/// orchestrator consumes. Task-specific fields stay available through
/// [`as_object`](Self::as_object).
#[derive(Clone, Debug)]
pub struct TaskStatus {
    fields: Map<String, Value>,
}

impl TaskStatus {
    /// Parse the event payload; `None` when absent or malformed.
    pub fn from_event(event: &StatusEvent) -> Option<Self> {
        let data = event.data.as_deref()?;
        match serde_json::from_str::<Value>(data) {
            Ok(Value::Object(fields)) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Raw `status` field, when present.
    pub fn status_str(&self) -> Option<&str> {
        self.fields.get("status").and_then(Value::as_str)
    }

    /// Parsed operating state, when the `status` field is present.
    pub fn state(&self) -> Option<OperatingState> {
        self.status_str().map(OperatingState::parse)
    }

    /// Device name, empty string when the field is absent.
    pub fn name(&self) -> &str {
        self.fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Stream time in samples, when present.
    pub fn stream_time(&self) -> Option<i64> {
        self.fields.get("streamTime").and_then(Value::as_i64)
    }

    /// Sample rate in Hz, when present.
    pub fn sample_rate(&self) -> Option<i64> {
        self.fields.get("sampleRate").and_then(Value::as_i64)
    }

    /// All status fields.
    pub fn as_object(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume into the underlying JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
