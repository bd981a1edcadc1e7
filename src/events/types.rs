// src/events/types.rs
//
// Facts published by the dashboard core.
//
// RULES:
// - Events are facts, not commands
// - Events are immutable
// - Snapshot events carry a full copy of the state, so subscribers never
//   reach back into the store while it is changing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Employee, EmployeeId, Notification};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// EMPLOYEE COLLECTION EVENTS
// ============================================================================

/// Emitted after every change to the employee collection.
/// This is what the presentation layer re-renders from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCollectionChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub snapshot: Vec<Employee>,
}

impl EmployeeCollectionChanged {
    pub fn new(snapshot: Vec<Employee>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            snapshot,
        }
    }
}

impl DomainEvent for EmployeeCollectionChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EmployeeCollectionChanged" }
}

/// Emitted when a load replaced the collection with the server's list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeesLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub count: usize,
}

impl EmployeesLoaded {
    pub fn new(count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            count,
        }
    }
}

impl DomainEvent for EmployeesLoaded {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EmployeesLoaded" }
}

/// Emitted when the server confirmed an update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub employee_id: EmployeeId,
    /// `false` when the employee was not in the local collection
    pub applied_locally: bool,
}

impl EmployeeUpdated {
    pub fn new(employee_id: EmployeeId, applied_locally: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            employee_id,
            applied_locally,
        }
    }
}

impl DomainEvent for EmployeeUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EmployeeUpdated" }
}

/// Emitted when the server confirmed a deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub employee_id: EmployeeId,
    pub employee_name: String,
}

impl EmployeeDeleted {
    pub fn new(employee_id: EmployeeId, employee_name: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            employee_id,
            employee_name,
        }
    }
}

impl DomainEvent for EmployeeDeleted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "EmployeeDeleted" }
}

// ============================================================================
// NOTIFICATION EVENTS
// ============================================================================

/// Emitted after every change to the notification queue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationQueueChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub snapshot: Vec<Notification>,
}

impl NotificationQueueChanged {
    pub fn new(snapshot: Vec<Notification>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            snapshot,
        }
    }
}

impl DomainEvent for NotificationQueueChanged {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "NotificationQueueChanged" }
}
