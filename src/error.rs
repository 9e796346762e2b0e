//! Error types surfaced to the host.

use std::fmt;

use thiserror::Error;

/// Which of the two requested points an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

/// Failure to build a route between two points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No polyline vertex lies within the snap radius of the point.
    #[error("no waterway segment near the {0} point")]
    NoNearbySegment(Endpoint),
    /// Both points snapped, but their segments are not connected.
    #[error("start and end points are not on one connected waterway")]
    PointsNotOnChain,
}

/// Failure to load, parse or export network and route data.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("GPX parse error: {0}")]
    Gpx(String),
    #[error("GPX write error: {0}")]
    Serialize(String),
}
