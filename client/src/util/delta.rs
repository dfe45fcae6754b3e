//! Percentage change formatting for summary cards.

#[cfg(test)]
#[path = "delta_test.rs"]
mod delta_test;

use serde::Serialize;

/// Direction and size of a percentage change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DeltaType {
    Increase,
    ModerateIncrease,
    Unchanged,
    ModerateDecrease,
    Decrease,
}

impl DeltaType {
    /// Bucket `change` (in percent): above 5, above 1, above -1, above -5,
    /// or anything lower.
    #[must_use]
    pub fn from_change(change: f64) -> Self {
        if change > 5.0 {
            Self::Increase
        } else if change > 1.0 {
            Self::ModerateIncrease
        } else if change > -1.0 {
            Self::Unchanged
        } else if change > -5.0 {
            Self::ModerateDecrease
        } else {
            Self::Decrease
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::ModerateIncrease => "moderateIncrease",
            Self::Unchanged => "unchanged",
            Self::ModerateDecrease => "moderateDecrease",
            Self::Decrease => "decrease",
        }
    }

    /// Arrow used in terminal output.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Increase => "▲",
            Self::ModerateIncrease => "↗",
            Self::Unchanged => "→",
            Self::ModerateDecrease => "↘",
            Self::Decrease => "▼",
        }
    }
}

/// Render a percentage with thousands separators and at most three
/// fraction digits, e.g. `1,234.5%`.
#[must_use]
pub fn format_relative_amount(change: f64) -> String {
    if !change.is_finite() {
        return format!("{change}%");
    }
    let fixed = format!("{:.3}", change.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let negative = change < 0.0 && (int_part != "0" || !frac.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac.is_empty() { format!("{sign}{grouped}%") } else { format!("{sign}{grouped}.{frac}%") }
}
