#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("database not connected")]
    NotConnected,

    #[error("mongodb connection failed: {0}")]
    ConnectionFailed(#[from] mongodb::error::Error),

    #[error("mongodb ping failed: {0}")]
    Ping(#[source] mongodb::error::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
