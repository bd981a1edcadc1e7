// src/error/types.rs
use crate::validation::ValidationError;
use serde::Serialize;
use thiserror::Error;

/// Infrastructure errors: configuration, client construction, serialization.
/// These never come out of a store operation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// The remote call was rejected or never reached the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    #[error("no credential available for the request")]
    MissingCredential,

    #[error("server unreachable: {0}")]
    Unreachable(String),

    #[error("server answered with status {status}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportFailure::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransportFailure::Status {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            TransportFailure::Unreachable(err.to_string())
        }
    }
}

/// Outcome of a store operation that did not go through.
///
/// Validation failures happen before any network traffic and are scoped to
/// form fields. Transport failures are scoped to the whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("transport failed: {0}")]
    Transport(#[from] TransportFailure),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    /// Field annotations for the form layer, if this is a validation failure.
    pub fn field_errors(&self) -> Option<&ValidationError> {
        match self {
            StoreError::Validation(errors) => Some(errors),
            StoreError::Transport(_) => None,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
