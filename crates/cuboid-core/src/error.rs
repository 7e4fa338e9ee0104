//! Error types for Cuboid

use crate::ObjectId;
use thiserror::Error;

/// The main error type for Cuboid operations
#[derive(Debug, Error)]
pub enum CuboidError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid world settings: {0}")]
    InvalidSettings(String),

    #[error("Matrix is not invertible (determinant {determinant})")]
    SingularMatrix { determinant: f32 },

    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Cuboid operations
pub type Result<T> = std::result::Result<T, CuboidError>;

impl From<toml::de::Error> for CuboidError {
    fn from(err: toml::de::Error) -> Self {
        CuboidError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for CuboidError {
    fn from(err: toml::ser::Error) -> Self {
        CuboidError::TomlSerError(err.to_string())
    }
}
