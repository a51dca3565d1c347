/// Renders an amount as `<symbol> 1,234.56`. Rounding to two places happens
/// here and nowhere else.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{symbol} {sign}{grouped}.{cents}")
}

/// Two decimal places, no grouping, for exported cells.
pub fn fixed2(amount: f64) -> String {
    format!("{:.2}", amount)
}
