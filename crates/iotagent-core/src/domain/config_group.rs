use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiKey, Attribute, Command, LazyAttribute, Resource, StaticAttribute};
use crate::codec::{self, AnyValue};
use crate::error::AgentError;

/// Provisioning template shared by the devices of one resource/API key pair.
///
/// See the IoT Agent service group data model. `resource` and `apikey` are
/// always written; every other field is left out while unset. The agent
/// stores `explicitAttrs` either as a boolean or as an expression, so the
/// field uses the same flag encoding as [`super::Device`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(rename = "subservice", skip_serializing_if = "Option::is_none")]
    pub service_path: Option<String>,
    pub resource: Resource,
    pub apikey: ApiKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust: Option<String>,
    #[serde(rename = "cbHost", skip_serializing_if = "Option::is_none")]
    pub cb_host: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lazy: Vec<LazyAttribute>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Command>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
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
    #[serde(rename = "entityNameExp", skip_serializing_if = "Option::is_none")]
    pub entity_name_exp: Option<String>,
    #[serde(rename = "ngsiVersion", skip_serializing_if = "Option::is_none")]
    pub ngsi_version: Option<String>,
    #[serde(
        rename = "defaultEntityNameConjunction",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_entity_name_conjunction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autoprovision: Option<bool>,
    #[serde(rename = "payloadType", skip_serializing_if = "Option::is_none")]
    pub payload_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ConfigGroup {
    pub fn new(resource: impl Into<Resource>, apikey: impl Into<ApiKey>) -> Self {
        Self {
            resource: resource.into(),
            apikey: apikey.into(),
            ..Self::default()
        }
    }

    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self
    }

    pub fn with_static_attribute(mut self, attribute: StaticAttribute) -> Self {
        self.static_attributes.push(attribute);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_explicit_attrs(mut self, explicit_attrs: impl Into<AnyValue>) -> Self {
        self.explicit_attrs = explicit_attrs.into();
        self
    }

    /// Fails with [`AgentError::InvalidFieldType`] when the group cannot be encoded.
    pub fn ensure_encodable(&self) -> Result<(), AgentError> {
        codec::encode_explicit_attrs(&self.explicit_attrs).map(|_| ())
    }
}

/// Config groups returned by a read or list call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigGroupList {
    pub count: usize,
    pub services: Vec<ConfigGroup>,
}

impl ConfigGroupList {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Body of a config group creation request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateConfigGroups<'a> {
    pub services: &'a [ConfigGroup],
}
