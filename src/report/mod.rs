//! Tabular projections of payslip and leave records. All builders are pure.

pub mod csv;

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};
use crate::model::payroll::PayslipRecord;
use crate::utils::format::fixed2;

pub use self::csv::{ExportRow, export_rows, to_csv};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollSummaryRow {
    pub pay_period: String,
    pub employee_name: String,
    pub gross_pay: f64,
    pub deductions: f64,
    pub net_pay: f64,
    pub date_issued: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PayrollTotals {
    pub sum_gross: f64,
    pub sum_deductions: f64,
    pub sum_net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollSummary {
    pub rows: Vec<PayrollSummaryRow>,
    pub totals: PayrollTotals,
}

/// Projects payslips into summary rows. `None` or an empty filter keeps every
/// period; otherwise the label must match exactly.
pub fn build_payroll_summary(records: &[PayslipRecord], period_filter: Option<&str>) -> PayrollSummary {
    let period_filter = period_filter.filter(|p| !p.is_empty());
    let mut totals = PayrollTotals::default();

    let rows: Vec<PayrollSummaryRow> = records
        .iter()
        .filter(|r| period_filter.is_none_or(|p| r.pay_period == p))
        .map(|r| {
            totals.sum_gross += r.gross_pay;
            totals.sum_deductions += r.total_deductions;
            totals.sum_net += r.net_pay;

            PayrollSummaryRow {
                pay_period: r.pay_period.clone(),
                employee_name: r.employee_snapshot.full_name(),
                gross_pay: r.gross_pay,
                deductions: r.total_deductions,
                net_pay: r.net_pay,
                date_issued: r.date_issued.date_naive(),
            }
        })
        .collect();

    PayrollSummary { rows, totals }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaveReportRow {
    pub employee_name: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
}

/// Keeps requests whose start date lies in `[start, end]`; a missing bound is
/// open.
pub fn build_leave_report(
    requests: &[LeaveRequest],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<LeaveReportRow> {
    requests
        .iter()
        .filter(|r| start.is_none_or(|s| r.start_date >= s))
        .filter(|r| end.is_none_or(|e| r.start_date <= e))
        .map(|r| LeaveReportRow {
            employee_name: r.employee_name.clone(),
            leave_type: r.leave_type,
            start_date: r.start_date,
            end_date: r.end_date,
            status: r.status,
        })
        .collect()
}

pub fn payroll_export_name(period: Option<&str>) -> String {
    format!("payroll-summary-{}", period.unwrap_or_default())
}

pub fn leave_export_name(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let day = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
    format!("leave-balance-{}-to-{}", day(start), day(end))
}

impl ExportRow for PayrollSummaryRow {
    fn columns(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("Pay Period", Some(self.pay_period.clone())),
            ("Employee Name", Some(self.employee_name.clone())),
            ("Gross Pay", Some(fixed2(self.gross_pay))),
            ("Deductions", Some(fixed2(self.deductions))),
            ("Net Pay", Some(fixed2(self.net_pay))),
            ("Date Issued", Some(self.date_issued.to_string())),
        ]
    }
}

impl ExportRow for LeaveReportRow {
    fn columns(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("Employee Name", Some(self.employee_name.clone())),
            ("Leave Type", Some(self.leave_type.to_string())),
            ("Start Date", Some(self.start_date.to_string())),
            ("End Date", Some(self.end_date.to_string())),
            ("Status", Some(self.status.to_string())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payroll::run_payroll;
    use crate::seed;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn payslips() -> Vec<PayslipRecord> {
        let roster = seed::employees();
        let mut records = run_payroll(
            &roster,
            "July 2024",
            Utc.with_ymd_and_hms(2024, 7, 31, 8, 0, 0).unwrap(),
        );
        records.extend(run_payroll(
            &roster[..1],
            "August 2024",
            Utc.with_ymd_and_hms(2024, 8, 30, 8, 0, 0).unwrap(),
        ));
        records
    }

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn payroll_summary_filters_by_period_and_totals_the_rows() {
        let records = payslips();
        let summary = build_payroll_summary(&records, Some("August 2024"));

        assert_eq!(summary.rows.len(), 1);
        assert_eq!(summary.rows[0].employee_name, "John Smith");
        assert_eq!(summary.rows[0].date_issued, day(2024, 8, 30).unwrap());
        assert_eq!(
            summary.totals,
            PayrollTotals {
                sum_gross: 7500.0,
                sum_deductions: 2000.0,
                sum_net: 5500.0,
            }
        );
    }

    #[test]
    fn payroll_summary_without_filter_keeps_everything() {
        let records = payslips();
        assert_eq!(build_payroll_summary(&records, None).rows.len(), 4);
        assert_eq!(build_payroll_summary(&records, Some("")).rows.len(), 4);
    }

    #[test]
    fn payroll_summary_leaves_input_untouched() {
        let records = payslips();
        let before = records.clone();
        let _ = build_payroll_summary(&records, Some("July 2024"));
        let _ = build_payroll_summary(&records, None);
        assert_eq!(records, before);
    }

    #[test]
    fn leave_report_august_window_excludes_july_request() {
        let rows = build_leave_report(&seed::leave_requests(), day(2024, 8, 1), day(2024, 8, 31));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_name, "John Smith");
        assert!(rows.iter().all(|r| r.start_date != day(2024, 7, 20).unwrap()));
    }

    #[test]
    fn leave_report_bounds_are_inclusive_and_optional() {
        let requests = seed::leave_requests();

        assert_eq!(build_leave_report(&requests, None, None).len(), 3);
        assert_eq!(build_leave_report(&requests, day(2024, 7, 20), day(2024, 7, 20)).len(), 1);
        assert_eq!(build_leave_report(&requests, day(2024, 8, 2), None).len(), 1);
        assert_eq!(build_leave_report(&requests, None, day(2024, 8, 1)).len(), 2);
    }

    #[test]
    fn export_names() {
        assert_eq!(payroll_export_name(Some("July 2024")), "payroll-summary-July 2024");
        assert_eq!(
            leave_export_name(day(2024, 8, 1), None),
            "leave-balance-2024-08-01-to-"
        );
    }

    #[test]
    fn summary_rows_export_with_two_decimals() {
        let records = payslips();
        let summary = build_payroll_summary(&records, Some("July 2024"));
        let csv = to_csv(&summary.rows).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("Pay Period,Employee Name,Gross Pay,Deductions,Net Pay,Date Issued")
        );
        assert_eq!(
            lines.next(),
            Some("July 2024,John Smith,7500.00,2000.00,5500.00,2024-07-31")
        );
    }
}
