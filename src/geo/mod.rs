//! Geometry pipeline: geodetic projection and viewport fitting
//!
//! - `projection` - [`GeoPoint`] → [`PlanarPoint`] (UTM meters)
//! - `viewport` - [`PlanarPoint`] batch → [`ScaleFit`] → [`PixelPoint`]

pub mod projection;
pub mod viewport;

pub use crate::model::GeoPoint;
pub use projection::{project, PlanarPoint, UtmFrame, UtmProjector};
pub use viewport::{compute_delta, to_pixel, Extent, PixelPoint, ScaleFit, ScaleRule, Viewport};
