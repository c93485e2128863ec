use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// HeaderValue – a single header entry
// ---------------------------------------------------------------------------

/// A dynamically-typed header value. Tabular files only ever produce
/// strings; JSON headers keep their scalar type.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::String(s) => write!(f, "{s}"),
            HeaderValue::Integer(i) => write!(f, "{i}"),
            HeaderValue::Float(v) => write!(f, "{v}"),
            HeaderValue::Bool(b) => write!(f, "{b}"),
            HeaderValue::Null => Ok(()),
        }
    }
}

impl From<&str> for HeaderValue {
    fn from(s: &str) -> Self {
        HeaderValue::String(s.to_string())
    }
}

impl From<String> for HeaderValue {
    fn from(s: String) -> Self {
        HeaderValue::String(s)
    }
}

impl From<&JsonValue> for HeaderValue {
    fn from(val: &JsonValue) -> Self {
        match val {
            JsonValue::String(s) => HeaderValue::String(s.clone()),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    HeaderValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    HeaderValue::Float(f)
                } else {
                    HeaderValue::String(n.to_string())
                }
            }
            JsonValue::Bool(b) => HeaderValue::Bool(*b),
            JsonValue::Null => HeaderValue::Null,
            // Nested objects/arrays are kept as their JSON text.
            other => HeaderValue::String(other.to_string()),
        }
    }
}

impl From<&HeaderValue> for JsonValue {
    fn from(val: &HeaderValue) -> Self {
        match val {
            HeaderValue::String(s) => JsonValue::String(s.clone()),
            HeaderValue::Integer(i) => JsonValue::from(*i),
            HeaderValue::Float(f) => JsonValue::from(*f),
            HeaderValue::Bool(b) => JsonValue::Bool(*b),
            HeaderValue::Null => JsonValue::Null,
        }
    }
}

// ---------------------------------------------------------------------------
// Header – insertion-ordered key/value metadata
// ---------------------------------------------------------------------------

/// Ordered header mapping with unique, case-sensitive keys.
///
/// Re-inserting an existing key replaces its value but keeps the original
/// position, so a written file lists keys in the order they were read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    entries: Vec<(String, HeaderValue)>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<HeaderValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the common in-memory representation
// ---------------------------------------------------------------------------

/// One parsed spectral file: metadata plus wavelength-indexed rows.
///
/// `data` maps an integer wavelength in nm to one value per entry of
/// `indices`. A row may be shorter than `indices`; consumers treat the
/// missing trailing values as `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Display label.
    pub name: String,
    pub header: Header,
    /// What the y values mean, e.g. "relative".
    pub units: String,
    /// Channel labels, e.g. `["R", "G", "B"]`.
    pub indices: Vec<String>,
    /// Wavelength (nm) → values, ascending by construction.
    pub data: BTreeMap<i32, Vec<f64>>,
    /// Set only when the reader completed.
    pub loaded: bool,
}

impl Dataset {
    /// The "not loaded" sentinel returned for any failed read.
    pub fn unloaded() -> Self {
        Self::default()
    }

    /// Number of wavelength rows.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of parallel series; never less than one.
    pub fn channel_count(&self) -> usize {
        self.indices.len().max(1)
    }

    /// Lowest and highest wavelength, if there is any data.
    pub fn wavelength_range(&self) -> Option<(i32, i32)> {
        let first = *self.data.keys().next()?;
        let last = *self.data.keys().next_back()?;
        Some((first, last))
    }

    /// Value of `channel` at `wavelength`, zero-filled for short rows.
    pub fn value(&self, wavelength: i32, channel: usize) -> Option<f64> {
        self.data
            .get(&wavelength)
            .map(|row| row.get(channel).copied().unwrap_or(0.0))
    }
}
