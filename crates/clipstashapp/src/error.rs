use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    /// The import document is not `{records: [...]}` or a bare list.
    /// Parser detail is logged, never shown.
    #[error("Invalid import file")]
    InvalidFormat,

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Config error: {0}")]
    Config(String),

    /// Client-side failures (clipboard access, unreadable input files).
    #[error("{0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ClipError>;
