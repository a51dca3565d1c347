use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::warn;

use crate::model::payroll::PayslipRecord;

/// Narrows one employee's payment history.
#[derive(Debug, Default, Clone)]
pub struct HistoryFilter {
    /// Case-insensitive substring of the period label
    pub period_contains: Option<String>,
    /// Inclusive calendar-day bounds on the issue date
    pub issued_from: Option<NaiveDate>,
    pub issued_to: Option<NaiveDate>,
}

impl HistoryFilter {
    pub fn matches(&self, record: &PayslipRecord) -> bool {
        if let Some(needle) = self.period_contains.as_deref().filter(|n| !n.is_empty()) {
            if !record
                .pay_period
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        let issued_day = record.date_issued.date_naive();
        if self.issued_from.is_some_and(|from| issued_day < from) {
            return false;
        }
        if self.issued_to.is_some_and(|to| issued_day > to) {
            return false;
        }
        true
    }
}

/// Append-only payslip history. There is no update or delete.
#[derive(Debug, Default, Clone)]
pub struct PayrollRunStore {
    records: Vec<PayslipRecord>,
}

impl PayrollRunStore {
    pub fn new(records: Vec<PayslipRecord>) -> Self {
        Self { records }
    }

    /// Adds records to the end of the history and returns how many were kept.
    /// A record whose id is already present is skipped.
    pub fn append(&mut self, records: Vec<PayslipRecord>) -> usize {
        let mut seen: HashSet<String> = self.records.iter().map(|r| r.id.clone()).collect();
        let mut appended = 0;

        for record in records {
            if !seen.insert(record.id.clone()) {
                warn!(payslip_id = %record.id, "Skipping payslip with duplicate id");
                continue;
            }
            self.records.push(record);
            appended += 1;
        }
        appended
    }

    pub fn records(&self) -> &[PayslipRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, payslip_id: &str) -> Option<&PayslipRecord> {
        self.records.iter().find(|r| r.id == payslip_id)
    }

    /// All payslips for one employee, newest first.
    pub fn find_by_employee(&self, employee_id: &str) -> Vec<&PayslipRecord> {
        let mut found: Vec<&PayslipRecord> = self
            .records
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .collect();
        found.sort_by(|a, b| b.date_issued.cmp(&a.date_issued));
        found
    }

    /// Exact label match, in insertion order.
    pub fn find_by_period(&self, pay_period: &str) -> Vec<&PayslipRecord> {
        self.records
            .iter()
            .filter(|r| r.pay_period == pay_period)
            .collect()
    }

    pub fn employee_history(&self, employee_id: &str, filter: &HistoryFilter) -> Vec<&PayslipRecord> {
        self.find_by_employee(employee_id)
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect()
    }

    /// Distinct period labels. Labels reading as `<Month> <Year>` come first,
    /// newest first; anything else follows in label order.
    pub fn pay_periods(&self) -> Vec<String> {
        let mut periods: Vec<String> = Vec::new();
        for record in &self.records {
            if !periods.contains(&record.pay_period) {
                periods.push(record.pay_period.clone());
            }
        }

        periods.sort_by(|a, b| match (parse_period(a), parse_period(b)) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        });
        periods
    }
}

/// Reads labels such as "July 2024" or "Jul 2024" as the first of that month.
pub fn parse_period(label: &str) -> Option<NaiveDate> {
    let candidate = format!("1 {}", label.trim());
    NaiveDate::parse_from_str(&candidate, "%d %B %Y")
        .or_else(|_| NaiveDate::parse_from_str(&candidate, "%d %b %Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payroll::run_payroll;
    use crate::seed;
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn store_with_runs() -> PayrollRunStore {
        let roster = seed::employees();
        let mut store = PayrollRunStore::default();
        store.append(run_payroll(&roster, "June 2024", at(2024, 6, 28)));
        store.append(run_payroll(&roster, "July 2024", at(2024, 7, 31)));
        store.append(run_payroll(&roster, "August 2024", at(2024, 8, 30)));
        store
    }

    #[test]
    fn append_only_grows() {
        let store = store_with_runs();
        assert_eq!(store.len(), 9);
        assert_eq!(store.records()[0].pay_period, "June 2024");
    }

    #[test]
    fn duplicate_ids_are_not_appended_twice() {
        let roster = seed::employees();
        let run = run_payroll(&roster, "July 2024", at(2024, 7, 31));
        let mut store = PayrollRunStore::default();

        assert_eq!(store.append(run.clone()), 3);
        assert_eq!(store.append(run), 0);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn find_by_employee_only_returns_that_employee_newest_first() {
        let store = store_with_runs();
        let found = store.find_by_employee("emp-2");

        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|r| r.employee_id == "emp-2"));
        let periods: Vec<&str> = found.iter().map(|r| r.pay_period.as_str()).collect();
        assert_eq!(periods, vec!["August 2024", "July 2024", "June 2024"]);
    }

    #[test]
    fn find_by_period_uses_exact_label() {
        let store = store_with_runs();
        assert_eq!(store.find_by_period("July 2024").len(), 3);
        assert!(store.find_by_period("july 2024").is_empty());
        assert!(store.find_by_period("July").is_empty());
    }

    #[test]
    fn history_filter_by_period_substring_and_day_bounds() {
        let store = store_with_runs();

        let by_label = HistoryFilter {
            period_contains: Some("JUL".into()),
            ..Default::default()
        };
        assert_eq!(store.employee_history("emp-1", &by_label).len(), 1);

        let by_days = HistoryFilter {
            issued_from: NaiveDate::from_ymd_opt(2024, 7, 31),
            issued_to: NaiveDate::from_ymd_opt(2024, 8, 30),
            ..Default::default()
        };
        let found = store.employee_history("emp-1", &by_days);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].pay_period, "August 2024");
    }

    #[test]
    fn pay_periods_newest_first_with_free_text_last() {
        let roster = seed::employees();
        let mut store = store_with_runs();
        store.append(run_payroll(&roster[..1], "Bonus run", at(2024, 9, 1)));
        store.append(run_payroll(&roster[..1], "Dec 2023", at(2024, 9, 2)));

        assert_eq!(
            store.pay_periods(),
            vec!["August 2024", "July 2024", "June 2024", "Dec 2023", "Bonus run"]
        );
    }

    #[test]
    fn parse_period_accepts_long_and_short_months() {
        assert_eq!(parse_period("July 2024"), NaiveDate::from_ymd_opt(2024, 7, 1));
        assert_eq!(parse_period(" Sep 2023 "), NaiveDate::from_ymd_opt(2023, 9, 1));
        assert_eq!(parse_period("Q3"), None);
    }
}
