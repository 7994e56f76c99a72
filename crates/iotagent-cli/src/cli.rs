//! CLI argument definitions for iotagent.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `health` | Check that the host is an IoT Agent |
//! | `service-paths` | List service paths holding config groups |
//! | `groups` | List, read, delete or upsert config groups |
//! | `devices` | List, read, delete or upsert devices |
//!
//! # Global Options
//!
//! Connection flags override the `IOTA_*` variables, which are read through
//! [`iotagent_core::AgentConfig`].
//!
//! | Option | Env | Default | Description |
//! |--------|-----|---------|-------------|
//! | `--host` | `IOTA_HOST` | `localhost` | Agent host |
//! | `--port` | `IOTA_PORT` | `4061` | Agent north port |
//! | `--timeout-ms` | `IOTA_TIMEOUT_MS` | `1000` | Request timeout in ms |
//! | `--service` | `FIWARE_SERVICE` | | Tenant |
//! | `--service-path` | `FIWARE_SERVICEPATH` | `/` | Service path |
//! | `--log-level` | `LOG_LEVEL` | `off` | Log verbosity |
//! | `--pretty` | | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! iotagent health
//! iotagent --service smartcity groups list --pretty
//! iotagent --service smartcity --service-path /garden devices upsert --file sensor.json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Provision config groups and devices in a FIWARE IoT Agent.
#[derive(Debug, Parser)]
#[command(name = "iotagent", author, version, about = "FIWARE IoT Agent provisioning CLI")]
pub struct Cli {
    /// IoT Agent host [default: $IOTA_HOST or localhost].
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// IoT Agent north port [default: $IOTA_PORT or 4061].
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Request timeout in milliseconds [default: $IOTA_TIMEOUT_MS or 1000].
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// FIWARE service (tenant).
    #[arg(long, global = true, env = "FIWARE_SERVICE")]
    pub service: Option<String>,

    /// FIWARE service path.
    #[arg(long, global = true, env = "FIWARE_SERVICEPATH", default_value = "/")]
    pub service_path: String,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log verbosity, written to stderr.
    #[arg(long, global = true, env = "LOG_LEVEL", value_enum, ignore_case = true, default_value_t = LogLevel::Off)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

/// Log levels accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    /// Same output as `error`.
    Fatal,
    /// Same output as `error`.
    Panic,
    Off,
}

impl LogLevel {
    /// Filter directive for the tracing subscriber.
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Fatal | Self::Panic => "error",
            Self::Off => "off",
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the host answers as an IoT Agent.
    Health,

    /// List the service paths holding config groups for `--service`.
    ServicePaths,

    /// Config group commands.
    Groups(GroupsArgs),

    /// Device commands.
    Devices(DevicesArgs),
}

/// Arguments for the `groups` command group.
#[derive(Debug, Args)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

/// Config group subcommands.
#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// List every config group of the service path.
    List,

    /// Read the groups matching a resource and API key.
    Get(GroupKeyArgs),

    /// Delete the group matching a resource and API key.
    Delete(GroupKeyArgs),

    /// Create or update a group read from a JSON file.
    Upsert(RecordArgs),
}

/// Resource and API key addressing a config group.
#[derive(Debug, Args)]
pub struct GroupKeyArgs {
    /// Resource path, e.g. /iot/d.
    #[arg(long)]
    pub resource: String,

    /// API key.
    #[arg(long)]
    pub apikey: String,
}

/// Arguments for the `devices` command group.
#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DeviceCommand,
}

/// Device subcommands.
#[derive(Debug, Subcommand)]
pub enum DeviceCommand {
    /// List every device of the service path.
    List,

    /// Read a device.
    Get(DeviceIdArgs),

    /// Delete a device.
    Delete(DeviceIdArgs),

    /// Create or update a device read from a JSON file.
    Upsert(RecordArgs),
}

/// Identifier of a device.
#[derive(Debug, Args)]
pub struct DeviceIdArgs {
    /// Device identifier.
    pub device_id: String,
}

/// A JSON record on disk.
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Path of the JSON file holding the record.
    #[arg(long)]
    pub file: PathBuf,
}
