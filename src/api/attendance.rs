use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::db::KeyValueStore;
use crate::error::{HrmError, Result};
use crate::model::attendance::AttendanceRecord;
use crate::state::{AppState, new_id};
use crate::store::CollectionKey;

impl<S: KeyValueStore> AppState<S> {
    /// Opens today's attendance record. A second open clock-in on the same day
    /// is rejected.
    pub fn clock_in(&mut self, employee_id: &str, now: DateTime<Utc>) -> Result<AttendanceRecord> {
        let employee = self
            .employee(employee_id)
            .ok_or_else(|| HrmError::not_found("Employee", employee_id))?;
        let today = now.date_naive();

        let already_in = self
            .attendance
            .iter()
            .any(|r| r.employee_id == employee_id && r.is_open() && r.date == today);
        if already_in {
            return Err(HrmError::AlreadyClockedIn(employee.first_name.clone()));
        }

        let record = AttendanceRecord {
            id: new_id("att"),
            employee_id: employee_id.to_string(),
            employee_name: employee.full_name(),
            date: today,
            clock_in: now,
            clock_out: None,
        };

        self.attendance.push(record.clone());
        self.persist(CollectionKey::AttendanceRecords, &self.attendance)?;

        info!(employee_id, "Checked in");
        Ok(record)
    }

    /// Closes the employee's open record, whichever day it was opened on.
    pub fn clock_out(&mut self, employee_id: &str, now: DateTime<Utc>) -> Result<AttendanceRecord> {
        let Some(pos) = self
            .attendance
            .iter()
            .position(|r| r.employee_id == employee_id && r.is_open())
        else {
            let name = self
                .employee(employee_id)
                .map(|e| e.first_name.clone())
                .unwrap_or_else(|| "Employee".to_string());
            return Err(HrmError::NotClockedIn(name));
        };

        let record = &mut self.attendance[pos];
        record.clock_out = Some(now);
        let closed = record.clone();
        self.persist(CollectionKey::AttendanceRecords, &self.attendance)?;

        info!(employee_id, "Checked out");
        Ok(closed)
    }

    /// Records for one day, latest clock-in first.
    pub fn attendance_for_day(&self, day: NaiveDate) -> Vec<&AttendanceRecord> {
        let mut records: Vec<&AttendanceRecord> =
            self.attendance.iter().filter(|r| r.date == day).collect();
        records.sort_by(|a, b| b.clock_in.cmp(&a.clock_in));
        records
    }
}
