//! Distance measurement between two pins dropped on the map.

use crate::error::RouteError;
use crate::geo::haversine;
use crate::network::{Coordinate, PolylineNetwork};
use crate::route::{extract_route, Route};

/// A tap this close to an existing pin removes it.
pub const PIN_REMOVE_RADIUS_M: f64 = 500.0;

/// What a tap did to the pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinChange {
    Added,
    Removed,
    /// Both pins were set; the end pin moved to the tap.
    Replaced,
}

/// Start and end pins of a measurement.
#[derive(Debug, Clone, Default)]
pub struct Measurement {
    pins: Vec<Coordinate>,
}

impl Measurement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pins(&self) -> &[Coordinate] {
        &self.pins
    }

    pub fn clear(&mut self) {
        self.pins.clear();
    }

    /// Handle a tap: remove a nearby pin, or place one.
    pub fn tap(&mut self, coord: Coordinate) -> PinChange {
        let nearby = self
            .pins
            .iter()
            .position(|pin| haversine(pin, &coord) < PIN_REMOVE_RADIUS_M);

        if let Some(index) = nearby {
            self.pins.remove(index);
            PinChange::Removed
        } else if self.pins.len() < 2 {
            self.pins.push(coord);
            PinChange::Added
        } else {
            self.pins[1] = coord;
            PinChange::Replaced
        }
    }

    /// Route between the two pins, once both are placed.
    pub fn measure(&self, network: &PolylineNetwork) -> Option<Result<Route, RouteError>> {
        match self.pins.as_slice() {
            [start, end] => Some(extract_route(*start, *end, network)),
            _ => None,
        }
    }
}
