//! Geometry shapes carried by the data model
//!
//! All coordinates are geographic (WGS84 degrees). They are only turned into
//! planar meters by [`crate::geo::projection`].

use serde::{Deserialize, Serialize};

/// A geographic point, longitude/latitude in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// An open sequence of points (guidance curves, spirals)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    pub points: Vec<GeoPoint>,
}

/// A closed ring of points; the closing point may or may not repeat the first one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearRing {
    pub points: Vec<GeoPoint>,
}

/// A polygon with one exterior ring and optional holes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior_ring: LinearRing,
    #[serde(default)]
    pub interior_rings: Vec<LinearRing>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
    #[serde(default)]
    pub polygons: Vec<Polygon>,
}
