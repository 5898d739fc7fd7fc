use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// MongoDB server code for a duplicate key on a unique index
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StorageError::Database(e) => is_duplicate_key(e),
            _ => false,
        }
    }

    /// Turn a duplicate-key driver error into a `ConstraintViolation` carrying
    /// `message`, leaving any other error untouched.
    pub fn on_duplicate(self, message: &str) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(message.to_string())
        } else {
            self
        }
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
