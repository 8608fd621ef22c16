use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Options passed to [`Zone::fork`](super::Zone::fork).
///
/// `properties` are visible through [`Zone::get`](super::Zone::get) on the
/// forked zone and all of its descendants, unless a descendant shadows a key.
///
/// Specs can be deserialized, so a zone layout may live in a JSON config:
///
/// ```
/// use zone_emitter::ZoneSpec;
///
/// let spec: ZoneSpec = serde_json::from_str(r#"{"name": "request", "properties": {"user": 7}}"#).unwrap();
/// assert_eq!(spec.name, "request");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpec {
    /// Must contain at least one non-whitespace character.
    pub name: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl ZoneSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Map::new(),
        }
    }

    /// Add (or replace) a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}
