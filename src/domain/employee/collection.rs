use std::collections::HashSet;

use super::entity::{Employee, EmployeeId};

/// Ordered employees, unique by id.
///
/// Order is whatever the server sent, followed by local appends. It only
/// matters for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeCollection {
    items: Vec<Employee>,
}

impl EmployeeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection, keeping the first occurrence of each id.
    pub fn from_vec(employees: Vec<Employee>) -> Self {
        let mut seen = HashSet::with_capacity(employees.len());
        let mut items = Vec::with_capacity(employees.len());

        for employee in employees {
            if seen.insert(employee.id) {
                items.push(employee);
            } else {
                log::warn!("dropping duplicate employee id {}", employee.id);
            }
        }

        Self { items }
    }

    /// Swaps the whole content for `employees`.
    pub fn replace_all(&mut self, employees: Vec<Employee>) {
        *self = Self::from_vec(employees);
    }

    /// Appends `employee`, or overwrites in place when the id is already known.
    pub fn upsert(&mut self, employee: Employee) {
        match self.position(employee.id) {
            Some(index) => self.items[index] = employee,
            None => self.items.push(employee),
        }
    }

    /// Overwrites the element with `id`. Returns `false` and writes nothing
    /// when there is no such element.
    pub fn replace(&mut self, id: EmployeeId, employee: Employee) -> bool {
        match self.position(id).and_then(|index| self.items.get_mut(index)) {
            Some(slot) => {
                *slot = employee;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: EmployeeId) -> Option<Employee> {
        self.position(id).map(|index| self.items.remove(index))
    }

    pub fn get(&self, id: EmployeeId) -> Option<&Employee> {
        self.items.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.position(id).is_some()
    }

    pub fn ids(&self) -> Vec<EmployeeId> {
        self.items.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[Employee] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<Employee> {
        self.items.clone()
    }

    fn position(&self, id: EmployeeId) -> Option<usize> {
        self.items.iter().position(|e| e.id == id)
    }
}
