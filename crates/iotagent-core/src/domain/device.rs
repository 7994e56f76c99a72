use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiKey, Attribute, Command, DeviceId, LazyAttribute, StaticAttribute};
use crate::codec::{self, AnyValue};
use crate::error::AgentError;

/// A single managed endpoint provisioned in the agent.
///
/// Unset fields are left out of the payload. `explicit_attrs` follows the
/// flag rules of [`codec::encode_explicit_attrs`]; encoding a device whose
/// flag is neither text nor a boolean fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    #[serde(rename = "device_id", skip_serializing_if = "DeviceId::is_empty")]
    pub id: DeviceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apikey: Option<ApiKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lazy: Vec<LazyAttribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub static_attributes: Vec<StaticAttribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub internal_attributes: Vec<Value>,
    #[serde(
        rename = "explicitAttrs",
        skip_serializing_if = "codec::omits_explicit_attrs",
        serialize_with = "codec::serialize_explicit_attrs"
    )]
    pub explicit_attrs: AnyValue,
    #[serde(rename = "ngsiVersion", skip_serializing_if = "Option::is_none")]
    pub ngsi_version: Option<String>,
    #[serde(rename = "payloadType", skip_serializing_if = "Option::is_none")]
    pub payload_type: Option<String>,
}

impl Device {
    pub fn new(id: impl Into<DeviceId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_entity(mut self, name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self.entity_type = Some(entity_type.into());
        self
    }

    pub fn with_explicit_attrs(mut self, explicit_attrs: impl Into<AnyValue>) -> Self {
        self.explicit_attrs = explicit_attrs.into();
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_static_attribute(mut self, attribute: StaticAttribute) -> Self {
        self.static_attributes.push(attribute);
        self
    }

    /// Fails with [`AgentError::InvalidFieldType`] when the device cannot be encoded.
    pub fn ensure_encodable(&self) -> Result<(), AgentError> {
        codec::encode_explicit_attrs(&self.explicit_attrs).map(|_| ())
    }

    /// Encode the device as a JSON object.
    pub fn to_json(&self) -> Result<String, AgentError> {
        self.ensure_encodable()?;
        serde_json::to_string(self).map_err(AgentError::Encode)
    }

    /// Strip the fields an update must not send back to the agent.
    pub(crate) fn clear_identity(&mut self) {
        self.id = DeviceId::default();
        self.transport = None;
        self.service = None;
        self.service_path = None;
    }
}

/// Devices returned by a list call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceList {
    pub count: usize,
    pub devices: Vec<Device>,
}

/// Body of a device creation request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateDevices<'a> {
    pub devices: &'a [Device],
}
