use serde::{Deserialize, Serialize};

/// Tenant (`fiware-service`) and service path (`fiware-servicepath`) every
/// call is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiwareService {
    pub service: String,
    pub service_path: String,
}

impl FiwareService {
    pub fn new(service: impl Into<String>, service_path: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            service_path: service_path.into(),
        }
    }

    /// Every service path below `service`.
    pub fn all_paths(service: impl Into<String>) -> Self {
        Self::new(service, "/*")
    }
}

/// Version record served by the agent's `/iot/about` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Healthcheck {
    #[serde(rename = "libVersion")]
    pub lib_version: String,
    pub port: String,
    #[serde(rename = "baseRoot")]
    pub base_root: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_about_response() {
        let health: Healthcheck = serde_json::from_str(
            r#"{"libVersion":"4.4.0","port":"4041","baseRoot":"/","version":"3.3.0"}"#,
        )
        .expect("decodes");

        assert_eq!(health.lib_version, "4.4.0");
        assert_eq!(health.base_root, "/");
    }

    #[test]
    fn missing_fields_decode_as_empty() {
        let health: Healthcheck = serde_json::from_str("{}").expect("decodes");
        assert!(health.lib_version.is_empty());
    }
}
