//! Rollup of the provider's flat 3-hour forecast list into one summary per
//! calendar day.
//!
//! Day boundaries come from each sample's raw UTC timestamp, mirroring the
//! provider's own bucketing. This deliberately differs from the
//! timezone-shifted instants used for wall-clock display and day/night
//! classification; near local midnight the two notions of "day" can
//! disagree, and collapsing them would silently change the grouping.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Timelike};

use crate::model::{DaySummary, ForecastSample};

/// Upper bound on rendered forecast cards.
pub const FORECAST_DAYS: usize = 5;

const MIDDAY_HOUR: i64 = 12;

fn sample_date(sample: &ForecastSample) -> Option<NaiveDate> {
    DateTime::from_timestamp(sample.dt, 0).map(|d| d.date_naive())
}

fn midday_distance(sample: &ForecastSample) -> i64 {
    DateTime::from_timestamp(sample.dt, 0)
        .map(|d| (i64::from(d.hour()) - MIDDAY_HOUR).abs())
        .unwrap_or(i64::MAX)
}

/// Group samples by UTC calendar date, ascending. Each summary carries the
/// true min/max over its bucket (rounded for display) and the condition of
/// the sample closest to midday; ties keep the first-encountered sample.
pub fn group_by_day(samples: &[ForecastSample]) -> Vec<DaySummary> {
    let mut buckets: BTreeMap<NaiveDate, Vec<&ForecastSample>> = BTreeMap::new();
    for sample in samples {
        if let Some(date) = sample_date(sample) {
            buckets.entry(date).or_default().push(sample);
        }
    }

    buckets
        .into_iter()
        .filter_map(|(date, entries)| {
            let midday = entries
                .iter()
                .copied()
                .min_by_key(|entry| midday_distance(entry))?;
            let min = entries
                .iter()
                .map(|entry| entry.temp_min)
                .fold(f64::INFINITY, f64::min);
            let max = entries
                .iter()
                .map(|entry| entry.temp_max)
                .fold(f64::NEG_INFINITY, f64::max);

            Some(DaySummary {
                date,
                min: min.round() as i32,
                max: max.round() as i32,
                condition: midday.condition.clone(),
                icon: midday.icon.clone(),
            })
        })
        .collect()
}

/// The forecast cards to render: the current day is dropped and at most
/// [`FORECAST_DAYS`] summaries remain, still ascending.
pub fn upcoming_days(days: &[DaySummary], today: NaiveDate) -> Vec<DaySummary> {
    days.iter()
        .filter(|day| day.date != today)
        .take(FORECAST_DAYS)
        .cloned()
        .collect()
}
