// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod employee_store;
pub mod notification_center;

#[cfg(test)]
mod employee_store_tests;

pub use employee_store::{messages, EmployeeStore};
pub use notification_center::NotificationCenter;
