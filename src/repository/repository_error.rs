use mongodb::error::ErrorKind;

/// Failure of a store operation, classified by what the caller can do about it.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("rejected by the store: {0}")]
    Validation(String),
    #[error("store operation failed: {0}")]
    Database(String),
    #[error("store unreachable: {0}")]
    Connection(String),
    #[error("document shape mismatch: {0}")]
    Serialization(String),
    #[error(transparent)]
    Driver(mongodb::error::Error),
}

impl RepositoryError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Authentication { .. } | ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                Self::Connection(err.to_string())
            }
            ErrorKind::InvalidArgument { .. } => Self::Validation(err.to_string()),
            ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
                Self::Serialization(err.to_string())
            }
            ErrorKind::Write(_) => Self::Database(err.to_string()),
            _ => Self::Driver(err),
        }
    }
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
