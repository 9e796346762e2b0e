//! User-facing formatting of distances and durations.

use serde::{Deserialize, Serialize};

const METERS_PER_MILE: f64 = 1609.344;

/// Unit system for displayed distances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    Metric,
    #[default]
    Imperial,
}

/// Format a distance in kilometers or miles, with at most one decimal.
pub fn format_distance(meters: f64, unit: DistanceUnit) -> String {
    let (value, suffix) = match unit {
        DistanceUnit::Metric => (meters / 1000.0, "km"),
        DistanceUnit::Imperial => (meters / METERS_PER_MILE, "mi"),
    };
    format!("{} {suffix}", one_decimal(value))
}

/// Round to one decimal and drop a trailing ".0".
fn one_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Format a duration as hours and minutes, e.g. "1 hr, 5 min".
pub fn format_interval(seconds: f64) -> String {
    let total_minutes = (seconds.max(0.0) / 60.0).round() as u64;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{m} min"),
        (h, 0) => format!("{h} hr"),
        (h, m) => format!("{h} hr, {m} min"),
    }
}
