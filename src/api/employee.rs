use tracing::{error, info};

use crate::db::KeyValueStore;
use crate::error::{HrmError, Result};
use crate::model::employee::Employee;
use crate::models::{EmployeeQuery, NewEmployee};
use crate::state::{AppState, new_id, require};
use crate::store::CollectionKey;

fn validate(
    employee_id: &str,
    first_name: &str,
    last_name: &str,
    email: &str,
    position: &str,
) -> Result<()> {
    require(employee_id, "Employee ID")?;
    require(first_name, "First name")?;
    require(last_name, "Last name")?;
    require(email, "Email")?;
    require(position, "Position")
}

impl<S: KeyValueStore> AppState<S> {
    pub fn add_employee(&mut self, payload: NewEmployee) -> Result<Employee> {
        validate(
            &payload.employee_id,
            &payload.first_name,
            &payload.last_name,
            &payload.email,
            &payload.position,
        )?;

        let employee = Employee {
            id: new_id("emp"),
            employee_id: payload.employee_id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            department: payload.department,
            position: payload.position,
            date_of_joining: payload.date_of_joining,
            salary: payload.salary,
            earnings: payload.earnings,
            deductions: payload.deductions,
        };

        self.employees.push(employee.clone());
        self.persist(CollectionKey::Employees, &self.employees)
            .inspect_err(|e| error!(error = %e, "Failed to Create Employee"))?;

        info!(id = %employee.id, employee_id = %employee.employee_id, "Employee created");
        Ok(employee)
    }

    /// Replaces the stored record with the same `id`. Payslips already issued
    /// keep their own snapshot.
    pub fn update_employee(&mut self, updated: Employee) -> Result<()> {
        validate(
            &updated.employee_id,
            &updated.first_name,
            &updated.last_name,
            &updated.email,
            &updated.position,
        )?;

        let slot = self
            .employees
            .iter_mut()
            .find(|e| e.id == updated.id)
            .ok_or_else(|| HrmError::not_found("Employee", updated.id.clone()))?;
        *slot = updated;

        self.persist(CollectionKey::Employees, &self.employees)
    }

    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn list_employees(&self, query: &EmployeeQuery) -> Vec<&Employee> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        self.employees
            .iter()
            .filter(|e| query.department.is_none_or(|d| e.department == d))
            .filter(|e| match &search {
                None => true,
                Some(needle) => [&e.full_name(), &e.email, &e.employee_id]
                    .iter()
                    .any(|field| field.to_lowercase().contains(needle.as_str())),
            })
            .collect()
    }
}
