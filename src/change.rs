pub const NOT_AVAILABLE: &str = "N/A";

/// Day-over-day change in percent, two decimals. `"N/A"` when `previous` is zero.
pub fn percent_change(current: f64, previous: f64) -> String {
    if previous == 0.0 {
        return NOT_AVAILABLE.to_string();
    }
    let change = (current - previous) / previous * 100.0;
    // `{:.2}` rounds exact ties to even; ties go away from zero here.
    let change = (change * 100.0).round() / 100.0;
    format!("{change:.2}")
}
