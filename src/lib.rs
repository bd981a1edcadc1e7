// src/lib.rs
// Employee Dashboard - client-side state layer for the employee management UI
//
// Architecture:
// - Store-centric: EmployeeStore is the single source of truth for employees
// - Confirmed updates: local state changes only after the server agrees
// - Validate first: nothing is sent without passing the employee schema
// - Observable: every change is published as a snapshot on the event bus
// - Explicit session: no globals, one DashboardSession per login

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod integrations;
pub mod services;
pub mod validation;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    employee_schema,
    parse_calendar_date,
    DateNormalization,
    // Employee
    Employee,
    EmployeeCollection,
    EmployeeId,
    EmployeePayload,
    // Notification
    Notification,
    NotificationKind,
    PartialNotification,
    UpdateEmployeeValues,
};

// ============================================================================
// PUBLIC API - Errors
// ============================================================================

pub use error::{AppError, AppResult, StoreError, StoreResult, TransportFailure};

// ============================================================================
// PUBLIC API - Validation
// ============================================================================

pub use validation::{validate, FieldRules, Record, Rule, ValidationError};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EmployeeCollectionChanged,
    EmployeeDeleted,
    EmployeeUpdated,
    EmployeesLoaded,
    EventBus,
    EventLogEntry,
    NotificationQueueChanged,
};

// ============================================================================
// PUBLIC API - Services & Integrations
// ============================================================================

pub use services::{EmployeeStore, NotificationCenter};

pub use integrations::{HttpRemoteClient, RemoteClient, SessionToken, StaticToken, TokenProvider};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{DashboardSession, ErrorResponse, ErrorType, ToErrorResponse};
pub use config::DashboardConfig;
