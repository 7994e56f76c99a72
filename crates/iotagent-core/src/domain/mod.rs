//! # Domain Models
//!
//! Records of the IoT Agent provisioning API.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConfigGroup`] | Provisioning template for a resource/API key pair |
//! | [`Device`] | A single provisioned device |
//! | [`Attribute`] | Active attribute mapping |
//! | [`LazyAttribute`] | Attribute read on demand |
//! | [`StaticAttribute`] | Fixed attribute with a type-inferred value |
//! | [`Command`] | Command accepted by a device |
//! | [`Metadata`] | Attribute/command metadata |
//! | [`FiwareService`] | Tenant and service path of a call |
//! | [`Healthcheck`] | Agent version record |
//!
//! Identifiers ([`Resource`], [`ApiKey`], [`DeviceId`]) are string newtypes
//! that serialize as plain JSON strings.

mod attribute;
mod config_group;
mod device;
mod ids;
mod service;

pub use attribute::{Attribute, Command, LazyAttribute, Metadata, StaticAttribute};
pub use config_group::{ConfigGroup, ConfigGroupList};
pub use device::{Device, DeviceList};
pub use ids::{ApiKey, DeviceId, Resource};
pub use service::{FiwareService, Healthcheck};

pub(crate) use config_group::CreateConfigGroups;
pub(crate) use device::CreateDevices;
