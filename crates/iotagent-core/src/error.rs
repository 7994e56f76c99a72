use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_client::HttpError;

/// Failure body reported by the IoT Agent on non-success responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{name}: {message}")]
pub struct ApiError {
    pub name: String,
    pub message: String,
}

/// Every mandatory field a record is missing, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("missing fields: {}", .fields.join(", "))]
pub struct MissingFields {
    fields: Vec<String>,
}

impl MissingFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>) {
        self.fields.push(field.into());
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `Ok` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Environment configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    InvalidNumber {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("{var} cannot be empty")]
    Empty { var: &'static str },
}

/// Top-level error type for agent operations.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    MissingFields(#[from] MissingFields),

    #[error("field '{field}' must be {expected}")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("unexpected response with status {status}, is {host} an IoT agent?")]
    UnexpectedResponse { host: String, status: u16 },

    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: HttpError,
    },

    #[error("{context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("healthcheck failed, {host} is not a valid IoT agent")]
    InvalidHealthcheck { host: String },

    #[error("device '{device_id}' has no entity_name on the server")]
    MissingEntityName { device_id: String },

    #[error("config group for resource '{resource}' and apikey '{apikey}' was not created")]
    NotCreated { resource: String, apikey: String },
}

impl AgentError {
    /// The server-reported error, when there is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }
}
