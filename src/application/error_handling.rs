// src/application/error_handling.rs
//
// Error envelope for the presentation layer
//
// ARCHITECTURE:
// - Maps store errors → UI-friendly responses
// - Field errors go to the form, everything else is a generic message
// - Never exposes server bodies or transport details

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{StoreError, TransportFailure};

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    /// Field-path → message, present only for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, String>>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Form input rejected before any request was made
    Validation,

    /// Operator is signed out
    Unauthenticated,

    /// Request failed or server rejected it
    Transport,
}

impl ErrorResponse {
    pub fn from_store_error(error: StoreError) -> Self {
        match error {
            StoreError::Validation(errors) => Self {
                success: false,
                error_type: ErrorType::Validation,
                message: "Campos faltando ou inválidos".to_string(),
                field_errors: Some(errors.into_map()),
            },

            StoreError::Transport(TransportFailure::MissingCredential) => Self {
                success: false,
                error_type: ErrorType::Unauthenticated,
                message: "Sessão expirada, entre novamente".to_string(),
                field_errors: None,
            },

            StoreError::Transport(failure) => {
                log::debug!("transport failure reported to UI: {}", failure);

                Self {
                    success: false,
                    error_type: ErrorType::Transport,
                    message: "Não foi possível falar com o servidor".to_string(),
                    field_errors: None,
                }
            }
        }
    }
}

/// Helper trait to convert store results for a UI boundary
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, ErrorResponse>;
}

impl<T> ToErrorResponse<T> for Result<T, StoreError> {
    fn to_error_response(self) -> Result<T, ErrorResponse> {
        self.map_err(ErrorResponse::from_store_error)
    }
}
