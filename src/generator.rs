use crate::catalog::{MetricCategory, MetricDescriptor, catalog};
use crate::errors::DashboardError;
use crate::models::{DailyRecord, Dataset, MetricValue};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_DAY_COUNT: u32 = 1000;

/// Roughly a century of history; keeps date arithmetic far from chrono's limits.
pub const MAX_DAY_COUNT: u32 = 36_500;

/// Builds `day_count + 1` daily records ending at `today`, oldest first.
///
/// Every record carries a value for every catalog metric, drawn from `rng`
/// according to the metric's category.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    day_count: u32,
) -> Result<Dataset, DashboardError> {
    check_day_count(day_count)?;

    let mut records = Vec::with_capacity(day_count as usize + 1);
    for offset in (0..=day_count).rev() {
        let date = today - Duration::days(i64::from(offset));
        let values = catalog()
            .iter()
            .map(|metric| (metric.id.to_string(), sample(rng, metric)))
            .collect::<BTreeMap<_, _>>();
        records.push(DailyRecord {
            date: date.format("%Y-%m-%d").to_string(),
            values,
        });
    }

    debug!(%today, day_count, "generated synthetic dataset");
    Ok(Dataset::new(records))
}

pub fn check_day_count(day_count: u32) -> Result<u32, DashboardError> {
    if day_count > MAX_DAY_COUNT {
        return Err(DashboardError::DayCountOutOfRange {
            requested: day_count,
            max: MAX_DAY_COUNT,
        });
    }
    Ok(day_count)
}

fn sample<R: Rng + ?Sized>(rng: &mut R, metric: &MetricDescriptor) -> MetricValue {
    match metric.category {
        MetricCategory::Price => MetricValue::Decimal(round2(rng.gen_range(0.1..=100.0))),
        MetricCategory::Volume => MetricValue::Integer(rng.gen_range(100_000..=10_000_000)),
        MetricCategory::Return => MetricValue::Decimal(round2(rng.gen_range(-5.0..=5.0))),
        MetricCategory::Count => MetricValue::Integer(rng.gen_range(100..=10_000)),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
