// src/domain/mod.rs
//
// Domain Root
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod dates;
pub mod employee;
pub mod notification;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Dates
pub use dates::{format_calendar_date, parse_calendar_date, DateNormalization};

// Employee Domain
pub use employee::{
    employee_schema, Employee, EmployeeCollection, EmployeeId, EmployeePayload,
    UpdateEmployeeValues,
};

// Notification Domain
pub use notification::{Notification, NotificationKind, PartialNotification};
