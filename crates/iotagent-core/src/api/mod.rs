//! Resource operations of the IoT Agent provisioning API.
//!
//! | Resource | Path | Module |
//! |----------|------|--------|
//! | Config groups | `/iot/services` | [`config_group`] |
//! | Devices | `/iot/devices` | [`device`] |
//!
//! Every operation is an `async` method on [`IotAgent`]. Status handling is
//! shared: the expected code decodes into the result, anything else becomes
//! an [`ApiError`] or, when the body is not an agent error,
//! [`AgentError::UnexpectedResponse`].

pub mod config_group;
pub mod device;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::agent::IotAgent;
use crate::domain::FiwareService;
use crate::error::{AgentError, ApiError};
use crate::http_client::{HttpMethod, HttpRequest, HttpResponse};

pub(crate) mod paths {
    pub const ABOUT: &str = "/iot/about";
    pub const SERVICES: &str = "/iot/services";
    pub const DEVICES: &str = "/iot/devices";
}

pub(crate) mod status {
    pub const OK: u16 = 200;
    pub const CREATED: u16 = 201;
    pub const NO_CONTENT: u16 = 204;
}

pub(crate) const SERVICE_HEADER: &str = "fiware-service";
pub(crate) const SERVICE_PATH_HEADER: &str = "fiware-servicepath";

impl IotAgent {
    /// Request scoped to `fs` with the handle's timeout.
    pub(crate) fn scoped_request(
        &self,
        method: HttpMethod,
        url: String,
        fs: &FiwareService,
    ) -> HttpRequest {
        HttpRequest::new(method, url)
            .with_header(SERVICE_HEADER, fs.service.as_str())
            .with_header(SERVICE_PATH_HEADER, fs.service_path.as_str())
            .with_timeout_ms(self.timeout_ms())
    }

    /// Send `request` and require the `expected` status.
    pub(crate) async fn dispatch(
        &self,
        request: HttpRequest,
        expected: u16,
        context: &str,
    ) -> Result<HttpResponse, AgentError> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self
            .client()
            .execute(request)
            .await
            .map_err(|source| AgentError::Transport {
                context: context.to_owned(),
                source,
            })?;

        if response.status != expected {
            debug!(status = response.status, expected, "agent rejected request");
            return Err(self.error_from_response(&response));
        }
        Ok(response)
    }

    fn error_from_response(&self, response: &HttpResponse) -> AgentError {
        match serde_json::from_str::<ApiError>(&response.body) {
            Ok(api_error) => AgentError::Api(api_error),
            Err(_) => AgentError::UnexpectedResponse {
                host: self.host().to_owned(),
                status: response.status,
            },
        }
    }
}

pub(crate) fn decode<T>(response: &HttpResponse, context: &str) -> Result<T, AgentError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(&response.body).map_err(|source| AgentError::Decode {
        context: context.to_owned(),
        source,
    })
}

pub(crate) fn encode<T>(payload: &T) -> Result<String, AgentError>
where
    T: serde::Serialize + ?Sized,
{
    serde_json::to_string(payload).map_err(AgentError::Encode)
}

/// An update with nothing to change is not sent.
pub(crate) fn is_empty_payload(payload: &str) -> bool {
    payload == "{}"
}

pub(crate) fn query(resource: &str, apikey: &str) -> String {
    format!(
        "?resource={}&apikey={}",
        urlencoding::encode(resource),
        urlencoding::encode(apikey)
    )
}

pub(crate) fn segment(value: &str) -> String {
    format!("/{}", urlencoding::encode(value))
}
