use iotagent_core::IotAgent;
use serde::Serialize;
use serde_json::Value;

use crate::error::CliError;

#[derive(Debug, Serialize)]
struct ServicePathsData<'a> {
    service: &'a str,
    service_paths: Vec<String>,
}

pub async fn run(agent: &IotAgent, service: &str) -> Result<Value, CliError> {
    let service_paths = agent.service_paths_for_service(service).await?;
    Ok(serde_json::to_value(ServicePathsData {
        service,
        service_paths,
    })?)
}
