use iotagent_core::{Device, DeviceId, FiwareService, IotAgent};
use serde_json::{json, Value};

use crate::cli::DeviceCommand;
use crate::error::CliError;

use super::read_record;

pub async fn run(command: &DeviceCommand, agent: &IotAgent, fs: &FiwareService) -> Result<Value, CliError> {
    match command {
        DeviceCommand::List => Ok(serde_json::to_value(agent.list_devices(fs).await?)?),
        DeviceCommand::Get(args) => {
            let device = agent
                .read_device(fs, &DeviceId::from(args.device_id.as_str()))
                .await?;
            Ok(serde_json::to_value(device)?)
        }
        DeviceCommand::Delete(args) => {
            agent
                .delete_device(fs, &DeviceId::from(args.device_id.as_str()))
                .await?;
            Ok(json!({"deleted": "device", "device_id": args.device_id}))
        }
        DeviceCommand::Upsert(args) => {
            let device: Device = read_record(&args.file)?;
            agent.upsert_device(fs, &device).await?;
            Ok(json!({"upserted": "device", "device_id": device.id}))
        }
    }
}
