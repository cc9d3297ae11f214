use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tracing::warn;

/// Read-only view of the host's persisted widget data.
///
/// Keys and values are plain strings. Hosts that store loosely typed values
/// should go through [`WidgetSnapshot::from_json_map`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetSnapshot {
    values: HashMap<String, String>,
}

impl WidgetSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Build a snapshot from a loosely typed JSON object.
    ///
    /// Strings are kept verbatim, numbers and booleans keep their JSON text
    /// (`42` becomes `"42"`). Null entries are dropped so the key reads as
    /// absent. Arrays and objects have no string form and are dropped with a
    /// warning.
    pub fn from_json_map<I>(map: I) -> Self
    where
        I: IntoIterator<Item = (String, JsonValue)>,
    {
        let values = map
            .into_iter()
            .filter_map(|(key, value)| match value {
                JsonValue::String(s) => Some((key, s)),
                JsonValue::Number(n) => Some((key, n.to_string())),
                JsonValue::Bool(b) => Some((key, b.to_string())),
                JsonValue::Null => None,
                JsonValue::Array(_) | JsonValue::Object(_) => {
                    warn!("Ignoring non-scalar widget data for key {}", key);
                    None
                }
            })
            .collect();

        Self { values }
    }
}

impl<K, V> FromIterator<(K, V)> for WidgetSnapshot
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
