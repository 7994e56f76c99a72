use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::codec::{self, AnyValue};

/// Metadata attached to an attribute or command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(rename = "type")]
    pub metadata_type: String,
    pub value: String,
}

impl Metadata {
    pub fn new(metadata_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            metadata_type: metadata_type.into(),
            value: value.into(),
        }
    }
}

/// Active attribute mapped from a device measurement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(rename = "skipValue", skip_serializing_if = "Option::is_none")]
    pub skip_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Metadata>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, attr_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attr_type: attr_type.into(),
            ..Self::default()
        }
    }

    pub fn with_object_id(mut self, object_id: impl Into<String>) -> Self {
        self.object_id = Some(object_id.into());
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }
}

/// Attribute the agent queries from the device on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyAttribute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Metadata>,
}

impl LazyAttribute {
    pub fn new(name: impl Into<String>, attr_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attr_type: attr_type.into(),
            ..Self::default()
        }
    }
}

/// Fixed value reported alongside every measurement of a device.
///
/// A textual `value` is type-inferred on encoding (see
/// [`codec::infer_value`]) and is then written as the first key of the
/// object. Any other value keeps its type and the declared key order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StaticAttribute {
    pub object_id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: String,
    pub value: AnyValue,
    pub metadata: BTreeMap<String, Metadata>,
}

impl StaticAttribute {
    pub fn new(
        name: impl Into<String>,
        attr_type: impl Into<String>,
        value: impl Into<AnyValue>,
    ) -> Self {
        Self {
            name: name.into(),
            attr_type: attr_type.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, name: impl Into<String>, metadata: Metadata) -> Self {
        self.metadata.insert(name.into(), metadata);
        self
    }
}

impl Serialize for StaticAttribute {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let inferred = self.value.as_text().map(codec::infer_value);

        let mut map = serializer.serialize_map(None)?;
        if let Some(value) = &inferred {
            map.serialize_entry("value", value)?;
        }
        if let Some(object_id) = &self.object_id {
            map.serialize_entry("object_id", object_id)?;
        }
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", &self.attr_type)?;
        if inferred.is_none() {
            map.serialize_entry("value", &self.value)?;
        }
        if !self.metadata.is_empty() {
            map.serialize_entry("metadata", &self.metadata)?;
        }
        map.end()
    }
}

/// Command a device accepts through the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Command {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub command_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(rename = "payloadType", skip_serializing_if = "Option::is_none")]
    pub payload_type: Option<String>,
    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Metadata>,
}

impl Command {
    pub fn new(name: impl Into<String>, command_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command_type: command_type.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encode(attribute: &StaticAttribute) -> String {
        serde_json::to_string(attribute).expect("static attribute encodes")
    }

    #[test]
    fn inferred_value_is_written_first() {
        let attribute = StaticAttribute::new("test", "Number", "1");
        assert_eq!(encode(&attribute), r#"{"value":1,"name":"test","type":"Number"}"#);
    }

    #[test]
    fn typed_value_follows_declared_order() {
        let attribute = StaticAttribute::new("test", "Number", 1);
        assert_eq!(encode(&attribute), r#"{"name":"test","type":"Number","value":1}"#);
    }

    #[test]
    fn textual_structures_are_embedded() {
        let object = StaticAttribute::new("cfg", "StructuredValue", r#"{"test":1}"#);
        assert_eq!(
            encode(&object),
            r#"{"value":{"test":1},"name":"cfg","type":"StructuredValue"}"#
        );

        let array = StaticAttribute::new("list", "Array", "[1,2,3,4]");
        assert_eq!(
            encode(&array),
            r#"{"value":[1,2,3,4],"name":"list","type":"Array"}"#
        );
    }

    #[test]
    fn absent_value_encodes_as_null() {
        let attribute = StaticAttribute {
            name: String::from("empty"),
            attr_type: String::from("Text"),
            ..StaticAttribute::default()
        };
        assert_eq!(encode(&attribute), r#"{"name":"empty","type":"Text","value":null}"#);
    }

    #[test]
    fn optional_keys_surround_the_core_fields() {
        let mut attribute = StaticAttribute::new("floor", "Text", "ground")
            .with_metadata("unit", Metadata::new("Text", "none"));
        attribute.object_id = Some(String::from("f"));

        assert_eq!(
            encode(&attribute),
            r#"{"value":"ground","object_id":"f","name":"floor","type":"Text","metadata":{"unit":{"type":"Text","value":"none"}}}"#
        );
    }

    #[test]
    fn decodes_server_values_by_json_type() {
        let attribute: StaticAttribute =
            serde_json::from_value(json!({"name": "test", "type": "Number", "value": 6}))
                .expect("decodes");
        assert_eq!(attribute.value, AnyValue::Raw(json!(6)));
        assert_eq!(encode(&attribute), r#"{"name":"test","type":"Number","value":6}"#);
    }

    #[test]
    fn attribute_omits_unset_optionals() {
        let attribute = Attribute::new("temperature", "Number").with_object_id("t");
        assert_eq!(
            serde_json::to_value(&attribute).expect("json"),
            json!({"object_id": "t", "name": "temperature", "type": "Number"})
        );
    }
}
