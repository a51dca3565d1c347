use crate::model::payroll::PayrollItem;

fn sum_amounts(items: &[PayrollItem]) -> f64 {
    items.iter().map(|item| item.amount).sum()
}

/// Gross pay. An empty sequence sums to zero.
pub fn sum_earnings(items: &[PayrollItem]) -> f64 {
    sum_amounts(items)
}

pub fn sum_deductions(items: &[PayrollItem]) -> f64 {
    sum_amounts(items)
}

/// No rounding is applied; negative results are allowed.
pub fn net_pay(earnings: &[PayrollItem], deductions: &[PayrollItem]) -> f64 {
    sum_earnings(earnings) - sum_deductions(deductions)
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PayTotals {
    pub gross_pay: f64,
    pub total_deductions: f64,
    pub net_pay: f64,
}

impl PayTotals {
    pub fn from_items(earnings: &[PayrollItem], deductions: &[PayrollItem]) -> Self {
        let gross_pay = sum_earnings(earnings);
        let total_deductions = sum_deductions(deductions);
        Self {
            gross_pay,
            total_deductions,
            net_pay: gross_pay - total_deductions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn items(amounts: &[f64]) -> Vec<PayrollItem> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| PayrollItem::new(format!("item-{i}"), "line", *amount))
            .collect()
    }

    #[test]
    fn empty_sequences_sum_to_zero() {
        assert_eq!(sum_earnings(&[]), 0.0);
        assert_eq!(sum_deductions(&[]), 0.0);
        assert_eq!(net_pay(&[], &[]), 0.0);
    }

    #[test]
    fn base_tax_and_pension_example() {
        let earnings = items(&[7500.0]);
        let deductions = items(&[1500.0, 500.0]);

        assert_eq!(sum_earnings(&earnings), 7500.0);
        assert_eq!(sum_deductions(&deductions), 2000.0);
        assert_eq!(net_pay(&earnings, &deductions), 5500.0);
    }

    #[test]
    fn net_pay_matches_component_sums_for_roster() {
        for emp in seed::employees() {
            assert_eq!(
                net_pay(&emp.earnings, &emp.deductions),
                sum_earnings(&emp.earnings) - sum_deductions(&emp.deductions)
            );
        }
    }

    #[test]
    fn negative_net_pay_is_not_clamped() {
        let totals = PayTotals::from_items(&items(&[100.0]), &items(&[250.5]));
        assert_eq!(totals.net_pay, -150.5);
    }

    #[test]
    fn signed_amounts_are_summed_as_is() {
        assert_eq!(sum_earnings(&items(&[1000.0, -200.0, 0.5])), 800.5);
    }
}
