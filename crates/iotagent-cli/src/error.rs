use iotagent_core::{AgentError, ConfigError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("command error: {0}")]
    Command(String),

    #[error("invalid record in {path}: {source}")]
    Record {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Agent(error) => agent_exit_code(error),
            Self::Config(_) => 2,
            Self::Command(_) => 2,
            Self::Record { .. } => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

const fn agent_exit_code(error: &AgentError) -> u8 {
    match error {
        AgentError::MissingFields(_) | AgentError::InvalidFieldType { .. } => 2,
        AgentError::Api(_) | AgentError::MissingEntityName { .. } | AgentError::NotCreated { .. } => 3,
        AgentError::Decode { .. } | AgentError::Encode(_) => 4,
        AgentError::Transport { .. }
        | AgentError::UnexpectedResponse { .. }
        | AgentError::InvalidHealthcheck { .. } => 6,
    }
}
