use iotagent_core::IotAgent;
use serde_json::Value;

use crate::error::CliError;

pub async fn run(agent: &IotAgent) -> Result<Value, CliError> {
    let health = agent.healthcheck().await?;
    Ok(serde_json::to_value(health)?)
}
