//! GPX 1.1 import and export.
//!
//! Wraps the `gpx` crate. Canal segments can be imported from GPX tracks
//! (one polyline per track segment), and routes or recorded trips can be
//! written back out as a single-track document for sharing.

use std::io::Read;

use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use crate::error::NetworkError;
use crate::network::{load_network, Coordinate, PolylineNetwork, RawSegment};

const CREATOR: &str = concat!("paddle ", env!("CARGO_PKG_VERSION"));

/// Parse a GPX document into raw segments.
///
/// Tracks without a name are grouped under "Unnamed".
pub fn parse_segments<R: Read>(reader: R) -> Result<Vec<RawSegment>, NetworkError> {
    let gpx = gpx::read(reader).map_err(|e| NetworkError::Gpx(e.to_string()))?;

    let segments = gpx
        .tracks
        .iter()
        .enumerate()
        .flat_map(|(t, track)| {
            let name = track.name.clone().unwrap_or_else(|| "Unnamed".to_string());
            track.segments.iter().enumerate().map(move |(s, seg)| RawSegment {
                id: Some(format!("{t}-{s}")),
                name: name.clone(),
                coordinates: seg
                    .points
                    .iter()
                    .map(|wp| [wp.point().y(), wp.point().x()])
                    .collect(),
            })
        })
        .collect();

    Ok(segments)
}

/// Build a network from the tracks of a GPX document.
pub fn network_from_gpx<R: Read>(reader: R) -> Result<PolylineNetwork, NetworkError> {
    Ok(load_network(parse_segments(reader)?))
}

/// Write coordinates as a GPX 1.1 document with one named track.
pub fn route_to_gpx(coords: &[Coordinate], name: &str) -> Result<String, NetworkError> {
    let mut segment = TrackSegment::new();
    segment.points = coords
        .iter()
        .map(|c| Waypoint::new(Point::new(c.lon, c.lat)))
        .collect();

    let mut track = Track::new();
    track.name = Some(name.to_string());
    track.segments.push(segment);

    let doc = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.to_string()),
        tracks: vec![track],
        ..Default::default()
    };

    let mut out = Vec::new();
    gpx::write(&doc, &mut out).map_err(|e| NetworkError::Serialize(e.to_string()))?;
    String::from_utf8(out).map_err(|e| NetworkError::Serialize(e.to_string()))
}
