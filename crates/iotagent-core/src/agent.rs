use std::fmt::{Debug, Formatter};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tracing::debug;

use crate::api::{decode, paths};
use crate::config::AgentConfig;
use crate::domain::{FiwareService, Healthcheck};
use crate::error::AgentError;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};

/// Handle to one IoT Agent instance.
///
/// The HTTP client is built on first use and reused by every later call made
/// through this handle. A clone shares the client only when it is taken after
/// that first call; earlier clones build their own.
#[derive(Clone)]
pub struct IotAgent {
    host: String,
    port: u16,
    timeout_ms: u64,
    http_client: OnceLock<Arc<dyn HttpClient>>,
}

impl IotAgent {
    pub fn new(host: impl Into<String>, port: u16, timeout_ms: u64) -> Self {
        Self {
            host: host.into(),
            port,
            timeout_ms,
            http_client: OnceLock::new(),
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(config.host.clone(), config.port, config.timeout_ms)
    }

    /// Use `http_client` instead of the default reqwest transport.
    pub fn with_http_client(
        host: impl Into<String>,
        port: u16,
        timeout_ms: u64,
        http_client: Arc<dyn HttpClient>,
    ) -> Self {
        let agent = Self::new(host, port, timeout_ms);
        let _ = agent.http_client.set(http_client);
        agent
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub const fn port(&self) -> u16 {
        self.port
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) const fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub(crate) fn client(&self) -> &Arc<dyn HttpClient> {
        self.http_client.get_or_init(|| {
            debug!(host = %self.host, timeout_ms = self.timeout_ms, "creating http client");
            Arc::new(ReqwestHttpClient::new(self.timeout()))
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}:{}{}", self.host, self.port, path)
    }

    /// Fetch the agent's version record.
    ///
    /// # Errors
    ///
    /// [`AgentError::InvalidHealthcheck`] when the answer carries no
    /// `libVersion`, i.e. the host is not an IoT Agent.
    pub async fn healthcheck(&self) -> Result<Healthcheck, AgentError> {
        let request = HttpRequest::get(self.url(paths::ABOUT)).with_timeout_ms(self.timeout_ms);
        let response = self
            .client()
            .execute(request)
            .await
            .map_err(|source| AgentError::Transport {
                context: String::from("healthcheck failed"),
                source,
            })?;

        let health: Healthcheck = decode(&response, "healthcheck failed").map_err(|_| {
            AgentError::InvalidHealthcheck {
                host: self.host.clone(),
            }
        })?;
        if health.lib_version.is_empty() {
            return Err(AgentError::InvalidHealthcheck {
                host: self.host.clone(),
            });
        }

        debug!(
            lib_version = %health.lib_version,
            version = %health.version,
            "healthcheck succeeded"
        );
        Ok(health)
    }

    /// Distinct service paths holding config groups for `service`, in the
    /// order the agent lists them.
    pub async fn service_paths_for_service(&self, service: &str) -> Result<Vec<String>, AgentError> {
        let groups = self
            .list_config_groups(&FiwareService::all_paths(service))
            .await?;

        let mut service_paths: Vec<String> = Vec::new();
        for group in groups.services {
            if let Some(path) = group.service_path {
                if !service_paths.contains(&path) {
                    service_paths.push(path);
                }
            }
        }
        Ok(service_paths)
    }
}

impl Debug for IotAgent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IotAgent")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("timeout_ms", &self.timeout_ms)
            .field("client_initialized", &self.http_client.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::HttpResponse;
    use crate::testing::RecordingHttpClient;

    #[test]
    fn builds_urls_from_host_and_port() {
        let agent = IotAgent::new("iot-agent", 4041, 500);
        assert_eq!(agent.url("/iot/about"), "http://iot-agent:4041/iot/about");
        assert_eq!(agent.timeout(), Duration::from_millis(500));
    }

    #[test]
    fn client_is_created_lazily_once() {
        let agent = IotAgent::new("localhost", 4061, 1_000);
        assert!(format!("{agent:?}").contains("client_initialized: false"));

        let first = Arc::as_ptr(agent.client()).cast::<()>();
        let second = Arc::as_ptr(agent.client()).cast::<()>();
        assert_eq!(first, second);
        assert!(format!("{agent:?}").contains("client_initialized: true"));
    }

    #[test]
    fn clones_share_an_initialized_client() {
        let agent = IotAgent::new("localhost", 4061, 1_000);
        let early = agent.clone();
        let first = Arc::as_ptr(agent.client()).cast::<()>();
        let late = agent.clone();

        assert_eq!(Arc::as_ptr(late.client()).cast::<()>(), first);
        assert_ne!(Arc::as_ptr(early.client()).cast::<()>(), first);
    }

    #[tokio::test]
    async fn healthcheck_returns_version_record() {
        let client = RecordingHttpClient::new(vec![Ok(HttpResponse::ok_json(
            r#"{"libVersion":"4.4.0","port":"4041","baseRoot":"/","version":"3.3.0"}"#,
        ))]);
        let agent = IotAgent::with_http_client("localhost", 4061, 750, client.clone());

        let health = agent.healthcheck().await.expect("healthy agent");
        assert_eq!(health.lib_version, "4.4.0");

        let requests = client.recorded_requests();
        assert_eq!(requests[0].url, "http://localhost:4061/iot/about");
        assert_eq!(requests[0].timeout_ms, 750);
    }

    #[tokio::test]
    async fn healthcheck_without_lib_version_is_invalid() {
        let client = RecordingHttpClient::new(vec![Ok(HttpResponse::ok_json(r#"{"version":"1"}"#))]);
        let agent = IotAgent::with_http_client("example.test", 80, 1_000, client);

        let error = agent.healthcheck().await.expect_err("must fail");
        assert!(matches!(error, AgentError::InvalidHealthcheck { ref host } if host == "example.test"));
    }

    #[tokio::test]
    async fn healthcheck_with_foreign_body_is_invalid() {
        let client = RecordingHttpClient::new(vec![Ok(HttpResponse::ok_json("<html></html>"))]);
        let agent = IotAgent::with_http_client("example.test", 80, 1_000, client);

        let error = agent.healthcheck().await.expect_err("must fail");
        assert!(matches!(error, AgentError::InvalidHealthcheck { .. }));
    }

    #[tokio::test]
    async fn service_paths_are_distinct_and_ordered() {
        let client = RecordingHttpClient::new(vec![Ok(HttpResponse::ok_json(
            r#"{"count":3,"services":[
                {"resource":"/iot/d","apikey":"a","subservice":"/garden"},
                {"resource":"/iot/u","apikey":"b","subservice":"/"},
                {"resource":"/iot/j","apikey":"c","subservice":"/garden"}
            ]}"#,
        ))]);
        let agent = IotAgent::with_http_client("localhost", 4061, 1_000, client.clone());

        let paths = agent
            .service_paths_for_service("smartcity")
            .await
            .expect("listing succeeds");
        assert_eq!(paths, ["/garden", "/"]);

        let requests = client.recorded_requests();
        assert_eq!(requests[0].header("fiware-service"), Some("smartcity"));
        assert_eq!(requests[0].header("fiware-servicepath"), Some("/*"));
    }

    #[tokio::test]
    async fn service_paths_are_empty_without_groups() {
        let client = RecordingHttpClient::new(vec![Ok(HttpResponse::ok_json(
            r#"{"count":0,"services":[]}"#,
        ))]);
        let agent = IotAgent::with_http_client("localhost", 4061, 1_000, client);

        let paths = agent
            .service_paths_for_service("smartcity")
            .await
            .expect("listing succeeds");
        assert!(paths.is_empty());
    }
}
