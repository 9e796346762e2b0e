//! Waterway features: locks, weirs, launch points and obstructions.
//!
//! Features are points of interest loaded from bundled JSON records
//! (`{ id, angle?, name, coord: [lat, lon], type }`). An unknown `type`
//! string falls back to the generic [`FeatureType::Feature`].

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::NetworkError;
use crate::network::Coordinate;

/// Kind of point of interest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureType {
    #[default]
    Feature,
    Lock,
    Weir,
    LaunchPoint,
    Obstruction,
}

impl FeatureType {
    pub const ALL: [FeatureType; 5] = [
        FeatureType::Feature,
        FeatureType::Lock,
        FeatureType::Weir,
        FeatureType::LaunchPoint,
        FeatureType::Obstruction,
    ];

    /// Parse the data-file value, e.g. `"launchPoint"`.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.value() == value)
    }

    /// Value used in data files.
    pub fn value(self) -> &'static str {
        match self {
            FeatureType::Feature => "feature",
            FeatureType::Lock => "lock",
            FeatureType::Weir => "weir",
            FeatureType::LaunchPoint => "launchPoint",
            FeatureType::Obstruction => "obstruction",
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            FeatureType::Feature => "Feature",
            FeatureType::Lock => "Lock",
            FeatureType::Weir => "Weir",
            FeatureType::LaunchPoint => "Launch Point",
            FeatureType::Obstruction => "Obstruction",
        }
    }

    /// Base name of the bundled data file, for types that ship one.
    pub fn file_name(self) -> Option<&'static str> {
        match self {
            FeatureType::Lock => Some("Locks"),
            FeatureType::Weir => Some("Weirs"),
            _ => None,
        }
    }
}

/// A feature record as stored in the bundled data files.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureData {
    pub id: String,
    #[serde(default)]
    pub angle: Option<f64>,
    pub name: String,
    pub coord: [f64; 2],
    #[serde(rename = "type")]
    pub kind: String,
}

/// A point of interest on a waterway.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub coord: Coordinate,
    /// Heading of the feature symbol in degrees.
    pub angle: f64,
}

impl From<FeatureData> for Feature {
    fn from(data: FeatureData) -> Self {
        let kind = FeatureType::from_value(&data.kind).unwrap_or_else(|| {
            warn!("Unknown feature type {:?} for {}", data.kind, data.id);
            FeatureType::Feature
        });

        Feature {
            id: data.id,
            name: data.name,
            kind,
            coord: Coordinate::from(data.coord),
            angle: data.angle.unwrap_or(0.0),
        }
    }
}

impl Feature {
    /// The feature's name, or its type name when unnamed.
    pub fn title(&self) -> &str {
        if self.name.is_empty() {
            self.kind.name()
        } else {
            &self.name
        }
    }

    /// The type name under a named feature, empty otherwise.
    pub fn subtitle(&self) -> &str {
        if self.name.is_empty() {
            ""
        } else {
            self.kind.name()
        }
    }
}

/// Parse a JSON array of feature records.
pub fn load_features_json(data: &[u8]) -> Result<Vec<Feature>, NetworkError> {
    let raw: Vec<FeatureData> = serde_json::from_slice(data)?;
    Ok(raw.into_iter().map(Feature::from).collect())
}
