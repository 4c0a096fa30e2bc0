//! Output helpers shared by the command handlers

use anyhow::Result;
use chrono::NaiveDate;
use colored::*;
use serde::Serialize;

/// Print a value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the standard "nothing here" line
pub fn print_empty(what: &str) {
    println!("{}", format!("No {what} found.").yellow());
}

/// Print the standard "Found N item(s):" header
pub fn print_found(count: usize, what: &str) {
    println!("{}", format!("Found {count} {what}(s):").bold());
    println!();
}

/// Format an amount in rupiah with dot thousands separators, e.g. `Rp 1.500.000`
pub fn rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// Format a calendar date the way the school prints it, e.g. `05 Jan 2025`
pub fn date(value: NaiveDate) -> String {
    value.format("%d %b %Y").to_string()
}

/// Text for an optional field
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rupiah_grouping() {
        assert_eq!(rupiah(0), "Rp 0");
        assert_eq!(rupiah(999), "Rp 999");
        assert_eq!(rupiah(1000), "Rp 1.000");
        assert_eq!(rupiah(1_500_000), "Rp 1.500.000");
        assert_eq!(rupiah(-25_000), "-Rp 25.000");
    }

    #[test]
    fn test_date_format() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(date(d), "05 Jan 2025");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some("Bandung")), "Bandung");
    }
}
