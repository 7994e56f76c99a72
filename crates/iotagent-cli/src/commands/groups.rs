use iotagent_core::{ApiKey, ConfigGroup, FiwareService, IotAgent, Resource};
use serde_json::{json, Value};

use crate::cli::GroupCommand;
use crate::error::CliError;

use super::read_record;

pub async fn run(command: &GroupCommand, agent: &IotAgent, fs: &FiwareService) -> Result<Value, CliError> {
    match command {
        GroupCommand::List => Ok(serde_json::to_value(agent.list_config_groups(fs).await?)?),
        GroupCommand::Get(key) => {
            let groups = agent
                .read_config_group(fs, &Resource::from(key.resource.as_str()), &ApiKey::from(key.apikey.as_str()))
                .await?;
            Ok(serde_json::to_value(groups)?)
        }
        GroupCommand::Delete(key) => {
            agent
                .delete_config_group(fs, &Resource::from(key.resource.as_str()), &ApiKey::from(key.apikey.as_str()))
                .await?;
            Ok(json!({"deleted": "config_group", "resource": key.resource, "apikey": key.apikey}))
        }
        GroupCommand::Upsert(args) => {
            let group: ConfigGroup = read_record(&args.file)?;
            agent.upsert_config_group(fs, &group).await?;
            Ok(json!({"upserted": "config_group", "resource": group.resource, "apikey": group.apikey}))
        }
    }
}
