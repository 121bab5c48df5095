use crate::catalog::catalog;
use crate::change::{NOT_AVAILABLE, percent_change};
use crate::models::{Dataset, MetricValue, SummaryCard};

const GROUP_SEPARATOR: char = '\u{202f}';
const MAX_FRACTION_DIGITS: usize = 3;

/// One card per catalog metric: latest value plus change against the day before.
pub fn build_summary(dataset: &Dataset) -> Vec<SummaryCard> {
    let latest = dataset.latest();
    let previous = dataset.previous();

    catalog()
        .iter()
        .map(|metric| {
            let current = latest.and_then(|record| record.values.get(metric.id)).copied();
            let before = previous.and_then(|record| record.values.get(metric.id)).copied();
            let change = match (current, before) {
                (Some(current), Some(before)) => percent_change(current.as_f64(), before.as_f64()),
                _ => NOT_AVAILABLE.to_string(),
            };
            SummaryCard {
                id: metric.id.to_string(),
                name: metric.display_name.to_string(),
                color: metric.color_token.to_string(),
                value: current.map(format_fr).unwrap_or_else(|| "--".to_string()),
                change,
            }
        })
        .collect()
}

/// French locale number formatting: narrow no-break space between thousands,
/// comma before decimals, at most three decimals with trailing zeros dropped.
/// Negative zero keeps its sign, as `toLocaleString` does.
pub fn format_fr(value: MetricValue) -> String {
    match value {
        MetricValue::Integer(value) => {
            let grouped = group_thousands(&value.unsigned_abs().to_string());
            if value < 0 { format!("-{grouped}") } else { grouped }
        }
        MetricValue::Decimal(value) => format_decimal_fr(value),
    }
}

fn format_decimal_fr(value: f64) -> String {
    if !value.is_finite() {
        return "--".to_string();
    }
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');
    let negative = value.is_sign_negative();

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if !fraction.is_empty() {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(digit);
    }
    out
}
