pub mod android_jni;
pub mod error;
pub mod feature;
pub mod geo;
pub mod gpx;
pub mod measure;
pub mod nearest;
pub mod network;
pub mod route;
pub mod stitch;
pub mod trip;
pub mod units;

pub use error::{NetworkError, RouteError};
pub use geo::{distance, path_length};
pub use feature::{Feature, FeatureType};
pub use network::{load_network, Coordinate, Polyline, PolylineId, PolylineNetwork, RawSegment, SearchHit};
pub use route::{extract_route, extract_route_with, Route, RouteConfig};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
