//! # Staff Roster
//!
//! The employee container: validated add, unconditional remove, lookup.
//!
//! ## Deletion Never Cascades
//! Sales keep their `employee_id` after the employee is removed. The ledger
//! answers "is this employee still referenced?" (see
//! [`crate::ledger::Ledger::employee_usage`]) so a front end can confirm
//! before calling [`Roster::remove`], but the roster itself never blocks the
//! removal and never rewrites sales.

use crate::error::CoreResult;
use crate::types::Employee;
use crate::validation::validate_name;
use crate::UNKNOWN_EMPLOYEE;

/// The employee roster.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    employees: Vec<Employee>,
}

impl Roster {
    /// Rebuilds a roster from its persisted slice.
    pub fn from_slice(employees: Vec<Employee>) -> Self {
        Roster { employees }
    }

    /// Adds an employee.
    ///
    /// ## Errors
    /// Validation failure on an empty name; the roster is unchanged.
    pub fn add(&mut self, id: String, name: &str) -> CoreResult<Employee> {
        validate_name(name, "name")?;

        let employee = Employee {
            id,
            name: name.trim().to_string(),
        };
        self.employees.push(employee.clone());
        Ok(employee)
    }

    /// Removes an employee by id.
    ///
    /// Idempotent: removing an unknown id is a silent no-op returning
    /// `None`. Sales referencing the employee are untouched and will
    /// resolve to the unknown placeholder from here on.
    pub fn remove(&mut self, id: &str) -> Option<Employee> {
        let index = self.employees.iter().position(|e| e.id == id)?;
        Some(self.employees.remove(index))
    }

    /// Looks up an employee by id.
    pub fn find(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Resolves an employee id to a display name, falling back to the
    /// unknown placeholder for dangling references.
    pub fn display_name(&self, id: &str) -> &str {
        self.find(id)
            .map(|e| e.name.as_str())
            .unwrap_or(UNKNOWN_EMPLOYEE)
    }

    /// The roster, in insertion order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    #[test]
    fn test_add_and_find() {
        let mut roster = Roster::default();
        let ana = roster.add("e1".to_string(), "Ana").unwrap();
        assert_eq!(ana.name, "Ana");
        assert_eq!(roster.find("e1").unwrap().name, "Ana");
        assert!(roster.find("e2").is_none());
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut roster = Roster::default();
        assert!(matches!(
            roster.add("e1".to_string(), "  "),
            Err(CoreError::Validation(ValidationError::Required { .. }))
        ));
        assert!(roster.employees().is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut roster = Roster::default();
        roster.add("e1".to_string(), "Ana").unwrap();

        assert!(roster.remove("e1").is_some());
        assert!(roster.employees().is_empty());
        assert!(roster.remove("e1").is_none()); // no-op
    }

    #[test]
    fn test_display_name_falls_back_to_unknown() {
        let mut roster = Roster::default();
        roster.add("e1".to_string(), "Ana").unwrap();

        assert_eq!(roster.display_name("e1"), "Ana");
        assert_eq!(roster.display_name("deleted"), UNKNOWN_EMPLOYEE);
    }
}
