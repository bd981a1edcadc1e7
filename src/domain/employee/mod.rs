pub mod collection;
pub mod entity;
pub mod invariants;

pub use collection::EmployeeCollection;
pub use entity::{Employee, EmployeeId, EmployeePayload, UpdateEmployeeValues};
pub use invariants::employee_schema;
