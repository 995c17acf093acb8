use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An unvalidated book listing as produced by a scraper or loaded from a file.
///
/// Keys are field names (`title`, `price`, `rating`, ...) and values are whatever
/// the source produced. Only the `Normalizer` looks inside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

/// A raw field classified by how the normalizer should treat it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawField<'a> {
    /// Key missing, `null`, or a blank string.
    Absent,
    Text(&'a str),
    Number(f64),
    /// Booleans, arrays and objects. Never valid for any book field.
    Other(&'a Value),
}

impl RawRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert, mostly useful for scrapers and tests.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, key: &str) -> RawField<'_> {
        match self.0.get(key) {
            None | Some(Value::Null) => RawField::Absent,
            Some(Value::String(s)) if s.trim().is_empty() => RawField::Absent,
            Some(Value::String(s)) => RawField::Text(s.trim()),
            Some(value @ Value::Number(n)) => {
                n.as_f64().map_or(RawField::Other(value), RawField::Number)
            }
            Some(other) => RawField::Other(other),
        }
    }

    /// Returns the field as text, rendering numbers the way they were written.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for RawRecord {
    type Error = Value;

    /// Only JSON objects are records; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
