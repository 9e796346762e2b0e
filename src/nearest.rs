//! Nearest-vertex lookup across a set of polylines.

use crate::geo::haversine;
use crate::network::{Coordinate, Polyline};

/// Closest sampled vertex found by [`find_nearest`].
#[derive(Debug, Clone, Copy)]
pub struct NearestMatch<'a> {
    /// The matched vertex.
    pub coord: Coordinate,
    /// Polyline the vertex belongs to.
    pub polyline: &'a Polyline,
    /// Index of the vertex within the polyline.
    pub index: usize,
    /// Distance from the target to the vertex, in meters.
    pub distance_m: f64,
}

/// Find the vertex closest to `target` across all `polylines`.
///
/// Only every `stride`-th vertex of each polyline is examined (indices
/// 0, stride, 2 * stride, ...); a stride of 0 is treated as 1. Vertices
/// at or beyond `max_distance_m` are ignored. On ties the first vertex
/// in iteration order wins.
pub fn find_nearest<'a, I>(
    target: Coordinate,
    polylines: I,
    max_distance_m: f64,
    stride: usize,
) -> Option<NearestMatch<'a>>
where
    I: IntoIterator<Item = &'a Polyline>,
{
    let stride = stride.max(1);
    let mut best: Option<NearestMatch<'a>> = None;

    for polyline in polylines {
        for (index, coord) in polyline.coords().iter().enumerate().step_by(stride) {
            let dist = haversine(&target, coord);
            if dist >= max_distance_m {
                continue;
            }

            let is_better = match &best {
                Some(prev) => dist < prev.distance_m,
                None => true,
            };

            if is_better {
                best = Some(NearestMatch {
                    coord: *coord,
                    polyline,
                    index,
                    distance_m: dist,
                });
            }
        }
    }

    if let Some(m) = &best {
        log::debug!(
            "Nearest vertex to ({}, {}) is {} on segment {} at {:.1} m",
            target.lat, target.lon, m.index, m.polyline.id(), m.distance_m
        );
    }

    best
}
