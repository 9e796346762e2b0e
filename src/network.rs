//! In-memory waterway network.
//!
//! Segments are loaded once from host-supplied data and never mutated
//! afterwards. Each polyline lives in an arena owned by the network and is
//! addressed by its [`PolylineId`].

use std::collections::HashSet;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::feature::Feature;
use crate::geo::path_length;
use crate::nearest::{find_nearest, NearestMatch};

/// Tap radius for picking a canal anywhere on the map.
pub const CANAL_SELECT_RADIUS_M: f64 = 1000.0;
/// Vertex stride for the coarse canal pick.
pub const CANAL_SELECT_STRIDE: usize = 5;
/// Tap radius for picking a segment within an already selected canal.
pub const SEGMENT_SELECT_RADIUS_M: f64 = 200.0;

/// A WGS84 coordinate in degrees.
///
/// Equality is exact: adjacent segments share bit-identical endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

/// Index of a polyline in its network's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolylineId(pub usize);

/// One canal or river segment.
#[derive(Debug, Clone)]
pub struct Polyline {
    key: PolylineId,
    id: String,
    name: String,
    coords: Vec<Coordinate>,
    length_m: f64,
}

impl Polyline {
    pub fn key(&self) -> PolylineId {
        self.key
    }

    /// Host-supplied identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the waterway this segment belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn first(&self) -> Coordinate {
        self.coords[0]
    }

    pub fn last(&self) -> Coordinate {
        self.coords[self.coords.len() - 1]
    }

    /// Total length in meters, computed at load time.
    pub fn length_m(&self) -> f64 {
        self.length_m
    }
}

/// A segment as supplied by the host.
///
/// Also accepts the bundled canal data shape `{ name, dist, coords }`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSegment {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(alias = "coords")]
    pub coordinates: Vec<[f64; 2]>,
}

/// The full set of segments, grouped by waterway name.
#[derive(Debug, Clone, Default)]
pub struct PolylineNetwork {
    polylines: Vec<Polyline>,
}

/// Build the network from host-supplied segments.
///
/// Segments without coordinates are dropped.
pub fn load_network<I>(raw_segments: I) -> PolylineNetwork
where
    I: IntoIterator<Item = RawSegment>,
{
    let mut polylines = Vec::new();

    for (position, raw) in raw_segments.into_iter().enumerate() {
        let id = raw.id.unwrap_or_else(|| position.to_string());
        if raw.coordinates.is_empty() {
            warn!("Dropping segment {id} ({}): no coordinates", raw.name);
            continue;
        }

        let coords: Vec<Coordinate> = raw.coordinates.into_iter().map(Coordinate::from).collect();
        let length_m = path_length(&coords);

        polylines.push(Polyline {
            key: PolylineId(polylines.len()),
            id,
            name: raw.name,
            coords,
            length_m,
        });
    }

    let network = PolylineNetwork { polylines };
    info!(
        "Loaded {} segments across {} waterways",
        network.len(),
        network.canal_names().len()
    );
    network
}

/// Parse a JSON array of segments and build the network.
pub fn load_network_json(data: &[u8]) -> Result<PolylineNetwork, NetworkError> {
    let raw: Vec<RawSegment> = serde_json::from_slice(data)?;
    Ok(load_network(raw))
}

impl PolylineNetwork {
    pub fn len(&self) -> usize {
        self.polylines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polylines.is_empty()
    }

    pub fn get(&self, key: PolylineId) -> Option<&Polyline> {
        self.polylines.get(key.0)
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    /// Distinct waterway names in load order.
    pub fn canal_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.polylines
            .iter()
            .map(Polyline::name)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// All segments of one waterway.
    pub fn canal<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Polyline> + 'a {
        self.polylines.iter().filter(move |p| p.name == name)
    }

    /// Total length of one waterway in meters.
    pub fn canal_length(&self, name: &str) -> f64 {
        self.canal(name).map(Polyline::length_m).sum()
    }

    /// Name of the waterway closest to a tap, if any is within 1 km.
    pub fn select_closest_canal(&self, target: Coordinate) -> Option<&str> {
        find_nearest(target, &self.polylines, CANAL_SELECT_RADIUS_M, CANAL_SELECT_STRIDE)
            .map(|m| m.polyline.name())
    }

    /// Closest segment of a named waterway, if within 200 m.
    pub fn closest_segment<'a>(
        &'a self,
        name: &'a str,
        target: Coordinate,
    ) -> Option<NearestMatch<'a>> {
        find_nearest(target, self.canal(name), SEGMENT_SELECT_RADIUS_M, 1)
    }

    /// First waterway whose name contains `text`, ignoring case.
    pub fn search_canals(&self, text: &str) -> Option<&str> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.polylines
            .iter()
            .map(Polyline::name)
            .find(|name| name.to_lowercase().contains(&needle))
    }

    /// Search waterway names, then feature names.
    ///
    /// A feature hit selects the waterway closest to the feature, which
    /// may be none when the feature lies more than 1 km from any segment.
    pub fn search<'a>(&'a self, text: &str, features: &'a [Feature]) -> Option<SearchHit<'a>> {
        if let Some(canal) = self.search_canals(text) {
            return Some(SearchHit::Canal(canal));
        }

        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        features
            .iter()
            .find(|f| f.name.to_lowercase().contains(&needle))
            .map(|feature| SearchHit::Feature {
                feature,
                canal: self.select_closest_canal(feature.coord),
            })
    }
}

/// Result of [`PolylineNetwork::search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchHit<'a> {
    /// A waterway whose name matched.
    Canal(&'a str),
    /// A feature whose name matched, with the waterway nearest to it.
    Feature {
        feature: &'a Feature,
        canal: Option<&'a str>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::load_features_json;

    fn seg(name: &str, coords: &[[f64; 2]]) -> RawSegment {
        RawSegment {
            id: None,
            name: name.to_string(),
            coordinates: coords.to_vec(),
        }
    }

    fn sample() -> PolylineNetwork {
        load_network(vec![
            seg("Grand Union Canal", &[[52.0, -1.0], [52.0, -0.99]]),
            seg("Oxford Canal", &[[51.8, -1.3], [51.81, -1.3]]),
            seg("Grand Union Canal", &[[52.0, -0.99], [52.0, -0.98]]),
        ])
    }

    #[test]
    fn load_assigns_arena_keys_and_lengths() {
        let network = sample();
        assert_eq!(network.len(), 3);
        for (i, p) in network.polylines().iter().enumerate() {
            assert_eq!(p.key(), PolylineId(i));
            assert_eq!(p.id(), i.to_string());
            assert!(p.length_m() > 0.0);
            assert_eq!(p.length_m(), path_length(p.coords()));
        }
    }

    #[test]
    fn load_drops_empty_segments() {
        let network = load_network(vec![
            seg("Empty", &[]),
            seg("Single", &[[52.0, -1.0]]),
        ]);
        assert_eq!(network.len(), 1);
        assert_eq!(network.polylines()[0].name(), "Single");
        assert_eq!(network.polylines()[0].id(), "1");
        assert_eq!(network.polylines()[0].length_m(), 0.0);
    }

    #[test]
    fn load_bundled_canal_json() {
        let json = r#"[
            {"name": "Kennet and Avon Canal", "dist": 123.0, "coords": [[51.4, -2.3], [51.4, -2.29]]},
            {"id": "ka-2", "name": "Kennet and Avon Canal", "coordinates": [[51.4, -2.29], [51.41, -2.28]]}
        ]"#;
        let network = load_network_json(json.as_bytes()).unwrap();
        assert_eq!(network.len(), 2);
        assert_eq!(network.polylines()[0].id(), "0");
        assert_eq!(network.polylines()[1].id(), "ka-2");
        assert_eq!(network.polylines()[1].first(), Coordinate::new(51.4, -2.29));
    }

    #[test]
    fn load_invalid_json_returns_error() {
        assert!(load_network_json(b"not json").is_err());
    }

    #[test]
    fn canal_names_are_distinct_in_order() {
        assert_eq!(sample().canal_names(), vec!["Grand Union Canal", "Oxford Canal"]);
    }

    #[test]
    fn canal_length_sums_segments() {
        let network = sample();
        let total = network.canal_length("Grand Union Canal");
        let expected: f64 = network.canal("Grand Union Canal").map(|p| p.length_m()).sum();
        assert_eq!(total, expected);
        assert_eq!(network.canal_length("Missing"), 0.0);
    }

    #[test]
    fn select_closest_canal_within_radius() {
        let network = sample();
        assert_eq!(
            network.select_closest_canal(Coordinate::new(51.801, -1.3001)),
            Some("Oxford Canal")
        );
        assert_eq!(network.select_closest_canal(Coordinate::new(50.0, 0.0)), None);
    }

    #[test]
    fn closest_segment_stays_in_canal() {
        let network = sample();
        let m = network
            .closest_segment("Grand Union Canal", Coordinate::new(52.0001, -0.981))
            .unwrap();
        assert_eq!(m.polyline.key(), PolylineId(2));
        // Oxford Canal vertex is far outside the narrow radius
        assert!(network
            .closest_segment("Grand Union Canal", Coordinate::new(51.8, -1.3))
            .is_none());
    }

    #[test]
    fn search_is_case_insensitive() {
        let network = sample();
        assert_eq!(network.search_canals("oxford"), Some("Oxford Canal"));
        assert_eq!(network.search_canals("GRAND"), Some("Grand Union Canal"));
        assert_eq!(network.search_canals("Thames"), None);
        assert_eq!(network.search_canals("  "), None);
    }

    fn features() -> Vec<Feature> {
        load_features_json(
            br#"[
                {"id": "1", "name": "Somerton Deep Lock", "coord": [51.8005, -1.3], "type": "lock"},
                {"id": "2", "name": "Grandpont Weir", "coord": [52.0, -0.99], "type": "weir"},
                {"id": "3", "name": "Lonely Sluice", "coord": [50.0, 0.0], "type": "weir"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn search_prefers_canal_names() {
        let network = sample();
        let features = features();
        // "grand" also matches Grandpont Weir, but canals win
        assert_eq!(
            network.search("grand", &features),
            Some(SearchHit::Canal("Grand Union Canal"))
        );
    }

    #[test]
    fn search_falls_back_to_features() {
        let network = sample();
        let features = features();

        match network.search("somerton", &features) {
            Some(SearchHit::Feature { feature, canal }) => {
                assert_eq!(feature.id, "1");
                assert_eq!(canal, Some("Oxford Canal"));
            }
            other => panic!("expected feature hit, got {other:?}"),
        }

        match network.search("lonely", &features) {
            Some(SearchHit::Feature { feature, canal }) => {
                assert_eq!(feature.id, "3");
                assert_eq!(canal, None);
            }
            other => panic!("expected feature hit, got {other:?}"),
        }

        assert_eq!(network.search("aqueduct", &features), None);
        assert_eq!(network.search("", &features), None);
    }
}
