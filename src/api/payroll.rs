use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::db::KeyValueStore;
use crate::error::{HrmError, Result};
use crate::model::payroll::{MasterPayrollItem, PayslipRecord};
use crate::models::NewMasterItem;
use crate::payroll::{self, HistoryFilter};
use crate::state::{AppState, new_id, require};
use crate::store::CollectionKey;

impl<S: KeyValueStore> AppState<S> {
    /// Issues one payslip per employee on the current roster and appends them
    /// to the payroll history.
    pub fn run_payroll(
        &mut self,
        pay_period: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<Vec<PayslipRecord>> {
        let pay_period = pay_period.trim();
        if pay_period.is_empty() {
            return Err(HrmError::EmptyPayPeriod);
        }

        let records = payroll::run_payroll(&self.employees, pay_period, issued_at);
        let mut history = self.payslips.clone();
        let appended = history.append(records.clone());

        // History only changes once the run is on disk
        self.persist(CollectionKey::PayslipRecords, history.records())
            .inspect_err(|e| error!(error = %e, pay_period, "Failed to store payroll run"))?;
        self.payslips = history;

        info!(pay_period, appended, "Payroll run completed");
        Ok(records)
    }

    pub fn payslip(&self, payslip_id: &str) -> Result<&PayslipRecord> {
        self.payslips
            .get(payslip_id)
            .ok_or_else(|| HrmError::not_found("Payslip", payslip_id))
    }

    pub fn payment_history(&self, employee_id: &str, filter: &HistoryFilter) -> Vec<&PayslipRecord> {
        self.payslips.employee_history(employee_id, filter)
    }

    pub fn add_master_item(&mut self, payload: NewMasterItem) -> Result<MasterPayrollItem> {
        require(&payload.code, "Code")?;
        require(&payload.description, "Description")?;
        require(&payload.period, "Period")?;

        let item = MasterPayrollItem {
            id: new_id("mpi"),
            code: payload.code,
            description: payload.description,
            item_type: payload.item_type,
            period: payload.period,
        };

        self.master_items.push(item.clone());
        self.persist(CollectionKey::MasterPayrollItems, &self.master_items)?;
        Ok(item)
    }

    pub fn update_master_item(&mut self, updated: MasterPayrollItem) -> Result<()> {
        require(&updated.code, "Code")?;
        require(&updated.description, "Description")?;
        require(&updated.period, "Period")?;

        let slot = self
            .master_items
            .iter_mut()
            .find(|i| i.id == updated.id)
            .ok_or_else(|| HrmError::not_found("Master payroll item", updated.id.clone()))?;
        *slot = updated;

        self.persist(CollectionKey::MasterPayrollItems, &self.master_items)
    }

    pub fn delete_master_item(&mut self, item_id: &str) -> Result<()> {
        let before = self.master_items.len();
        self.master_items.retain(|i| i.id != item_id);
        if self.master_items.len() == before {
            return Err(HrmError::not_found("Master payroll item", item_id));
        }

        self.persist(CollectionKey::MasterPayrollItems, &self.master_items)
    }
}
