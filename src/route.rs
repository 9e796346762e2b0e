//! Route extraction between two tapped points.
//!
//! Both points are snapped to the nearest vertex of the network, the
//! waterway containing the start point is stitched into one chain, and
//! the part of the chain between the two snapped vertices is returned.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Endpoint, RouteError};
use crate::geo::path_length;
use crate::nearest::find_nearest;
use crate::network::{Coordinate, PolylineNetwork};
use crate::stitch::stitch;

/// Snapping parameters for [`extract_route_with`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Maximum distance from a tap to the vertex it snaps to, in meters.
    pub snap_radius_m: f64,
    /// Vertex sampling stride used when snapping.
    pub stride: usize,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            snap_radius_m: 1000.0,
            stride: 1,
        }
    }
}

/// Coordinates along a waterway plus their total length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub coords: Vec<Coordinate>,
    pub distance_m: f64,
}

/// Extract the route between `start` and `end` with the default config.
pub fn extract_route(
    start: Coordinate,
    end: Coordinate,
    network: &PolylineNetwork,
) -> Result<Route, RouteError> {
    extract_route_with(start, end, network, &RouteConfig::default())
}

/// Extract the route between `start` and `end`.
///
/// The end point is only matched against segments of the same waterway
/// as the start point. Coordinates are returned in chain order, which
/// may run from `end` to `start`.
pub fn extract_route_with(
    start: Coordinate,
    end: Coordinate,
    network: &PolylineNetwork,
    config: &RouteConfig,
) -> Result<Route, RouteError> {
    let start_match = find_nearest(start, network.polylines(), config.snap_radius_m, config.stride)
        .ok_or(RouteError::NoNearbySegment(Endpoint::Start))?;

    let canal = start_match.polyline.name();
    let end_match = find_nearest(end, network.canal(canal), config.snap_radius_m, config.stride)
        .ok_or(RouteError::NoNearbySegment(Endpoint::End))?;

    debug!(
        "Routing on {canal}: start on segment {}, end on segment {}",
        start_match.polyline.id(),
        end_match.polyline.id()
    );

    let chain = stitch(start_match.polyline, network.canal(canal));

    let from = chain
        .iter()
        .position(|c| *c == start_match.coord)
        .ok_or(RouteError::PointsNotOnChain)?;
    let to = chain
        .iter()
        .position(|c| *c == end_match.coord)
        .ok_or(RouteError::PointsNotOnChain)?;

    let (lo, hi) = (from.min(to), from.max(to));
    let coords = chain[lo..=hi].to_vec();
    let distance_m = path_length(&coords);

    Ok(Route { coords, distance_m })
}
