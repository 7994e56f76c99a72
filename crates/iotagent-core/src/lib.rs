//! # IoT Agent Core
//!
//! Typed client for the provisioning API of a FIWARE IoT Agent.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Domain records** for config groups, devices and their attributes
//! - **Wire encoding** for the loosely typed `explicitAttrs` and static
//!   attribute values
//! - **Agent operations** (read, list, create, update, delete, upsert) scoped
//!   by FIWARE service and service path
//! - **A pluggable HTTP transport**, reqwest by default
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`agent`] | Agent handle, healthcheck and service path discovery |
//! | [`api`] | Config group and device operations |
//! | [`codec`] | Encoding of loosely typed fields |
//! | [`config`] | Connection settings from the environment |
//! | [`domain`] | Domain records |
//! | [`error`] | Error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`validation`] | Mandatory field checks |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use iotagent_core::{ConfigGroup, Device, FiwareService, IotAgent};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let agent = IotAgent::new("localhost", 4061, 1_000);
//!     agent.healthcheck().await?;
//!
//!     let fs = FiwareService::new("smartcity", "/");
//!     agent
//!         .upsert_config_group(&fs, &ConfigGroup::new("/iot/d", "secret"))
//!         .await?;
//!     agent
//!         .upsert_device(&fs, &Device::new("sensor01").with_entity("urn:Thing:1", "Thing"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`AgentError`]. Errors reported by the agent keep
//! their name and message:
//!
//! ```rust
//! use iotagent_core::AgentError;
//!
//! fn describe(error: &AgentError) -> &str {
//!     match error.api_error() {
//!         Some(api) if api.name == "DEVICE_NOT_FOUND" => "no such device",
//!         Some(_) => "rejected by the agent",
//!         None => "client side failure",
//!     }
//! }
//! ```

pub mod agent;
pub mod api;
pub mod codec;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod validation;

#[cfg(test)]
mod testing;

pub use agent::IotAgent;

pub use codec::{encode_explicit_attrs, infer_value, AnyValue};

pub use config::AgentConfig;

pub use domain::{
    ApiKey, Attribute, Command, ConfigGroup, ConfigGroupList, Device, DeviceId, DeviceList,
    FiwareService, Healthcheck, LazyAttribute, Metadata, Resource, StaticAttribute,
};

pub use error::{AgentError, ApiError, ConfigError, MissingFields};

pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};

pub use validation::Validate;
