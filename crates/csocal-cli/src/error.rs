use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Calendar(#[from] csocal_core::CalendarError),

    #[error("invalid strategy file {path}: {source}")]
    StrategyFile {
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
            Self::Calendar(_) => 2,
            Self::StrategyFile { .. } => 2,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
