mod devices;
mod groups;
mod health;
mod service_paths;

use std::path::Path;

use iotagent_core::{AgentConfig, FiwareService, IotAgent};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let config = agent_config(cli, |name| std::env::var(name).ok())?;
    debug!(base_url = %config.base_url(), "using agent");
    let agent = IotAgent::from_config(&config);

    match &cli.command {
        Command::Health => health::run(&agent).await,
        Command::ServicePaths => service_paths::run(&agent, required_service(cli)?).await,
        Command::Groups(args) => groups::run(&args.command, &agent, &fiware_service(cli)?).await,
        Command::Devices(args) => devices::run(&args.command, &agent, &fiware_service(cli)?).await,
    }
}

/// Connection settings from the `IOTA_*` variables, overridden by flags.
fn agent_config<F>(cli: &Cli, lookup: F) -> Result<AgentConfig, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AgentConfig::from_lookup(lookup)?;
    if let Some(host) = &cli.host {
        config.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    Ok(config)
}

fn required_service(cli: &Cli) -> Result<&str, CliError> {
    cli.service
        .as_deref()
        .filter(|service| !service.is_empty())
        .ok_or_else(|| CliError::Command(String::from("--service (or FIWARE_SERVICE) is required")))
}

fn fiware_service(cli: &Cli) -> Result<FiwareService, CliError> {
    Ok(FiwareService::new(required_service(cli)?, cli.service_path.clone()))
}

/// Load a JSON record from `path`.
fn read_record<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| CliError::Record {
        path: path.display().to_string(),
        source,
    })
}
