//! Live trip recording and paddling speed estimates.
//!
//! Timestamps are seconds supplied by the host; the core never reads a
//! clock.

use serde::{Deserialize, Serialize};

use crate::geo::haversine;
use crate::network::Coordinate;

/// A trip in progress.
#[derive(Debug, Clone)]
pub struct Trip {
    started_at: f64,
    last_fix_at: f64,
    coords: Vec<Coordinate>,
    distance_m: f64,
}

/// A finished trip, ready for the host to persist.
#[derive(Debug, Clone, Serialize)]
pub struct TripSummary {
    pub coords: Vec<Coordinate>,
    pub distance_m: f64,
    pub duration_s: f64,
}

impl Trip {
    pub fn start(timestamp_s: f64) -> Self {
        Self {
            started_at: timestamp_s,
            last_fix_at: timestamp_s,
            coords: Vec::new(),
            distance_m: 0.0,
        }
    }

    /// Append a location fix. Fixes older than the latest one extend the
    /// path but not the duration.
    pub fn record(&mut self, coord: Coordinate, timestamp_s: f64) {
        if let Some(prev) = self.coords.last() {
            self.distance_m += haversine(prev, &coord);
        }
        self.coords.push(coord);
        self.last_fix_at = self.last_fix_at.max(timestamp_s);
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn distance_m(&self) -> f64 {
        self.distance_m
    }

    pub fn duration_s(&self) -> f64 {
        self.last_fix_at - self.started_at
    }

    /// Meters per second, 0 when no time has passed.
    pub fn average_speed(&self) -> f64 {
        let duration = self.duration_s();
        if duration > 0.0 {
            self.distance_m / duration
        } else {
            0.0
        }
    }

    pub fn finish(self) -> TripSummary {
        let duration_s = self.duration_s();
        TripSummary {
            coords: self.coords,
            distance_m: self.distance_m,
            duration_s,
        }
    }
}

/// Running totals over all finished trips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub distance_m: f64,
    pub duration_s: f64,
}

impl Totals {
    pub fn add(&mut self, trip: &TripSummary) {
        self.distance_m += trip.distance_m;
        self.duration_s += trip.duration_s;
    }

    /// Meters per second, `None` before any time has been logged.
    pub fn speed(&self) -> Option<f64> {
        let speed = self.distance_m / self.duration_s;
        (speed.is_finite() && speed > 0.0).then_some(speed)
    }
}

/// Paddling pace used for time estimates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speed {
    Leisurely,
    #[default]
    Brisk,
    /// The paddler's own average over past trips.
    Average,
}

impl Speed {
    /// Display order.
    pub const SORTED: [Speed; 3] = [Speed::Average, Speed::Leisurely, Speed::Brisk];

    pub fn name(self) -> &'static str {
        match self {
            Speed::Leisurely => "Leisurely",
            Speed::Brisk => "Brisk",
            Speed::Average => "Average",
        }
    }

    /// Meters per second.
    pub fn meters_per_second(self, totals: &Totals) -> f64 {
        match self {
            Speed::Leisurely => 0.5,
            Speed::Brisk => 1.0,
            Speed::Average => totals
                .speed()
                .unwrap_or_else(|| Speed::Brisk.meters_per_second(totals)),
        }
    }
}

/// Seconds needed to paddle `distance_m` at `speed`.
pub fn estimate_duration_s(distance_m: f64, speed: Speed, totals: &Totals) -> f64 {
    distance_m / speed.meters_per_second(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    #[test]
    fn trip_accumulates_distance() {
        let mut trip = Trip::start(100.0);
        trip.record(pt(52.0, -1.0), 100.0);
        trip.record(pt(52.0, -0.99), 400.0);
        trip.record(pt(52.01, -0.99), 1000.0);

        let expected = crate::geo::path_length(trip.coords());
        assert!((trip.distance_m() - expected).abs() < 1e-6);
        assert_eq!(trip.duration_s(), 900.0);
        assert!(trip.average_speed() > 1.0 && trip.average_speed() < 3.0);
    }

    #[test]
    fn trip_ignores_stale_timestamps_for_duration() {
        let mut trip = Trip::start(0.0);
        trip.record(pt(52.0, -1.0), 60.0);
        trip.record(pt(52.0, -0.999), 30.0);
        assert_eq!(trip.duration_s(), 60.0);
        assert_eq!(trip.coords().len(), 2);
    }

    #[test]
    fn empty_trip_has_no_speed() {
        let trip = Trip::start(10.0);
        assert_eq!(trip.average_speed(), 0.0);
        let summary = trip.finish();
        assert_eq!(summary.distance_m, 0.0);
        assert_eq!(summary.duration_s, 0.0);
    }

    #[test]
    fn totals_feed_average_speed() {
        let mut totals = Totals::default();
        assert_eq!(Speed::Average.meters_per_second(&totals), 1.0);

        totals.add(&TripSummary { coords: Vec::new(), distance_m: 3000.0, duration_s: 2000.0 });
        assert_eq!(totals.speed(), Some(1.5));
        assert_eq!(Speed::Average.meters_per_second(&totals), 1.5);
    }

    #[test]
    fn estimate_duration_by_speed() {
        let totals = Totals::default();
        assert_eq!(estimate_duration_s(1800.0, Speed::Leisurely, &totals), 3600.0);
        assert_eq!(estimate_duration_s(1800.0, Speed::Brisk, &totals), 1800.0);
    }

    #[test]
    fn speed_display_order() {
        let names: Vec<&str> = Speed::SORTED.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Average", "Leisurely", "Brisk"]);
        assert_eq!(Speed::default(), Speed::Brisk);
    }
}
