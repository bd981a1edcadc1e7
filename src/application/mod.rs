// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between the presentation layer and the services
// - Owns session lifecycle (login → teardown)
// - Translates store errors into UI envelopes

pub mod error_handling;
pub mod session;

pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use session::DashboardSession;
