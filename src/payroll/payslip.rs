use std::fmt::Write;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use super::calc::PayTotals;
use crate::model::employee::Employee;
use crate::model::payroll::{PayrollItem, PayslipRecord};
use crate::utils::format::format_currency;

/// Payslip ids sort by issue time first, then by employee. The random tail
/// keeps runs issued at the same instant apart.
pub fn payslip_id(employee_id: &str, issued_at: DateTime<Utc>) -> String {
    let nonce = Uuid::new_v4().to_simple().to_string();
    format!(
        "ps-{:016}-{}-{}",
        issued_at.timestamp_micros(),
        employee_id,
        &nonce[..8]
    )
}

/// Freezes one employee's current pay lines into a payslip.
pub fn generate_payslip(
    employee: &Employee,
    pay_period: &str,
    issued_at: DateTime<Utc>,
) -> PayslipRecord {
    let totals = PayTotals::from_items(&employee.earnings, &employee.deductions);

    PayslipRecord {
        id: payslip_id(&employee.id, issued_at),
        employee_id: employee.id.clone(),
        pay_period: pay_period.to_string(),
        date_issued: issued_at,
        earnings: employee.earnings.clone(),
        deductions: employee.deductions.clone(),
        gross_pay: totals.gross_pay,
        total_deductions: totals.total_deductions,
        net_pay: totals.net_pay,
        employee_snapshot: employee.clone(),
    }
}

/// One payslip per employee in roster order. The caller validates `pay_period`
/// and appends the result to the history.
pub fn run_payroll(
    employees: &[Employee],
    pay_period: &str,
    issued_at: DateTime<Utc>,
) -> Vec<PayslipRecord> {
    let records: Vec<PayslipRecord> = employees
        .iter()
        .map(|emp| generate_payslip(emp, pay_period, issued_at))
        .collect();

    info!(
        pay_period,
        employees = records.len(),
        "Generated payslips for payroll run"
    );
    records
}

fn write_items(out: &mut String, title: &str, items: &[PayrollItem], currency: &str) {
    let _ = writeln!(out, "{title}");
    if items.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for item in items {
        let _ = writeln!(
            out,
            "  {:<30} {:>16}",
            item.description,
            format_currency(item.amount, currency)
        );
    }
}

/// Plain-text payslip; the employee block comes from the snapshot, never the
/// live record.
pub fn render_payslip(record: &PayslipRecord, currency: &str) -> String {
    let emp = &record.employee_snapshot;
    let mut out = String::new();

    let _ = writeln!(out, "PAYSLIP");
    let _ = writeln!(out, "Name:         {}", emp.full_name());
    let _ = writeln!(out, "Employee ID:  {}", emp.employee_id);
    let _ = writeln!(out, "Position:     {}", emp.position);
    let _ = writeln!(out, "Department:   {}", emp.department);
    let _ = writeln!(out, "Pay Period:   {}", record.pay_period);
    let _ = writeln!(out, "Date Issued:  {}", record.date_issued.format("%Y-%m-%d"));
    let _ = writeln!(out, "Payslip ID:   {}", record.id);
    out.push('\n');

    write_items(&mut out, "Earnings", &record.earnings, currency);
    write_items(&mut out, "Deductions", &record.deductions, currency);
    out.push('\n');

    let _ = writeln!(
        out,
        "Gross Pay:        {}",
        format_currency(record.gross_pay, currency)
    );
    let _ = writeln!(
        out,
        "Total Deductions: {}",
        format_currency(record.total_deductions, currency)
    );
    let _ = writeln!(
        out,
        "Net Pay:          {}",
        format_currency(record.net_pay, currency)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn issued() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 31, 9, 30, 0).unwrap()
    }

    #[test]
    fn july_run_for_john_smith() {
        let roster = vec![seed::employees().remove(0)];
        let records = run_payroll(&roster, "July 2024", issued());

        assert_eq!(records.len(), 1);
        let ps = &records[0];
        assert_eq!(ps.pay_period, "July 2024");
        assert_eq!(ps.employee_id, "emp-1");
        assert_eq!(ps.gross_pay, 7500.0);
        assert_eq!(ps.total_deductions, 2000.0);
        assert_eq!(ps.net_pay, 5500.0);
        assert_eq!(ps.date_issued, issued());
    }

    #[test]
    fn one_record_per_employee_with_consistent_totals() {
        let roster = seed::employees();
        let records = run_payroll(&roster, "August 2024", issued());

        assert_eq!(records.len(), roster.len());
        for (record, emp) in records.iter().zip(&roster) {
            assert_eq!(record.employee_id, emp.id);
            assert_eq!(record.gross_pay - record.total_deductions, record.net_pay);
        }
    }

    #[test]
    fn empty_roster_yields_no_records() {
        assert!(run_payroll(&[], "July 2024", issued()).is_empty());
    }

    #[test]
    fn ids_are_unique_within_a_run_and_sort_by_issue_time() {
        let roster = seed::employees();
        let first = run_payroll(&roster, "July 2024", issued());
        let later = run_payroll(&roster, "August 2024", issued() + chrono::Duration::days(31));

        let mut ids: Vec<&str> = first.iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), roster.len());

        assert!(first.iter().all(|a| later.iter().all(|b| a.id < b.id)));
    }

    #[test]
    fn runs_issued_at_the_same_instant_get_distinct_ids() {
        let roster = seed::employees();
        let july = run_payroll(&roster, "July 2024", issued());
        let august = run_payroll(&roster, "August 2024", issued());

        assert!(july.iter().all(|a| august.iter().all(|b| a.id != b.id)));
    }

    #[test]
    fn snapshot_is_isolated_from_later_edits() {
        let mut roster = seed::employees();
        let records = run_payroll(&roster, "July 2024", issued());
        let before = records[0].clone();

        roster[0].earnings.push(PayrollItem::new("earn-x", "Bonus", 1000.0));
        roster[0].earnings[0].amount = 1.0;
        roster[0].position = "CTO".into();

        assert_eq!(records[0], before);
        assert_eq!(records[0].employee_snapshot.position, "Senior Developer");
        assert_eq!(records[0].gross_pay, 7500.0);
        assert_eq!(records[0].earnings.len(), 1);
    }

    #[test]
    fn rendered_payslip_uses_snapshot_and_currency() {
        let roster = seed::employees();
        let ps = generate_payslip(&roster[0], "July 2024", issued());
        let text = render_payslip(&ps, "K");

        assert!(text.contains("Name:         John Smith"));
        assert!(text.contains("Pay Period:   July 2024"));
        assert!(text.contains("Date Issued:  2024-07-31"));
        assert!(text.contains("K 7,500.00"));
        assert!(text.contains("Net Pay:          K 5,500.00"));
    }
}
