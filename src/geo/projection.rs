//! Geodetic projection: WGS84 longitude/latitude to UTM meters
//!
//! The transverse Mercator math comes from the `utm` crate; this module adds
//! coordinate validation and the choice of zone and hemisphere. A single point
//! is projected into its own zone. A shape is projected into one shared zone
//! and hemisphere, picked from the center of its bounds, so that distances
//! inside the shape stay Euclidean when it crosses a zone edge or the equator.
//!
//! Polar latitudes (outside the UTM band -80..84) are rejected with
//! `InvalidCoordinate` rather than clamped: UPS is not supported.

use serde::{Deserialize, Serialize};

use crate::model::GeoPoint;
use crate::{FieldVizError, Result};

/// Added to northings in the southern hemisphere
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

const MIN_LATITUDE: f64 = -80.0;
const MAX_LATITUDE: f64 = 84.0;

/// A projected point, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

/// Zone and hemisphere a set of points is projected into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtmFrame {
    pub zone: u8,
    pub south: bool,
}

impl UtmFrame {
    fn of(zone: u8, point: GeoPoint) -> Self {
        Self {
            zone,
            south: point.lat < 0.0,
        }
    }

    fn project(&self, point: GeoPoint) -> PlanarPoint {
        let (northing, easting, _) = utm::to_utm_wgs84(point.lat, point.lon, self.zone);
        // to_utm_wgs84 applies the false northing from the point's own latitude
        let mut y = if point.lat < 0.0 {
            northing - FALSE_NORTHING_SOUTH
        } else {
            northing
        };
        if self.south {
            y += FALSE_NORTHING_SOUTH;
        }
        PlanarPoint { x: easting, y }
    }
}

/// UTM projector, either deriving the zone from the data or pinned to one zone
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UtmProjector {
    zone: Option<u8>,
}

impl UtmProjector {
    /// Projector that picks the zone from the data's longitude
    pub fn new() -> Self {
        Self { zone: None }
    }

    /// Projector pinned to a single zone (1..=60)
    pub fn with_zone(zone: u8) -> Result<Self> {
        if !(1..=60).contains(&zone) {
            return Err(FieldVizError::ConfigError(format!(
                "UTM zone must be between 1 and 60, got {}",
                zone
            )));
        }
        Ok(Self { zone: Some(zone) })
    }

    pub fn zone(&self) -> Option<u8> {
        self.zone
    }

    pub fn project(&self, point: GeoPoint) -> Result<PlanarPoint> {
        validate(point)?;
        let zone = self.zone.unwrap_or_else(|| zone_for(point));
        Ok(UtmFrame::of(zone, point).project(point))
    }

    /// Frame shared by all points of a shape, anchored at the center of
    /// their bounds. `None` for an empty slice.
    pub fn frame_for(&self, points: &[GeoPoint]) -> Result<Option<UtmFrame>> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for point in points {
            validate(*point)?;
            let (lon, lat) = (point.lon, point.lat);
            bounds = Some(match bounds {
                None => (lon, lon, lat, lat),
                Some((w, e, s, n)) => (w.min(lon), e.max(lon), s.min(lat), n.max(lat)),
            });
        }

        Ok(bounds.map(|(w, e, s, n)| {
            let center = GeoPoint::new((w + e) / 2.0, (s + n) / 2.0);
            let zone = self.zone.unwrap_or_else(|| zone_for(center));
            UtmFrame::of(zone, center)
        }))
    }

    /// Project every point of one shape into a single zone and hemisphere
    pub fn project_shape(&self, points: &[GeoPoint]) -> Result<Vec<PlanarPoint>> {
        let Some(frame) = self.frame_for(points)? else {
            return Ok(Vec::new());
        };
        tracing::trace!(
            zone = frame.zone,
            south = frame.south,
            points = points.len(),
            "projecting shape"
        );
        Ok(points.iter().map(|point| frame.project(*point)).collect())
    }
}

/// Project a point into its own UTM zone
pub fn project(point: GeoPoint) -> Result<PlanarPoint> {
    UtmProjector::new().project(point)
}

fn validate(point: GeoPoint) -> Result<()> {
    if !point.lon.is_finite() || !point.lat.is_finite() {
        return Err(FieldVizError::InvalidCoordinate(format!(
            "non-finite coordinate ({}, {})",
            point.lon, point.lat
        )));
    }
    if !(-180.0..=180.0).contains(&point.lon) {
        return Err(FieldVizError::InvalidCoordinate(format!(
            "longitude {} outside [-180, 180]",
            point.lon
        )));
    }
    if !(MIN_LATITUDE..=MAX_LATITUDE).contains(&point.lat) {
        return Err(FieldVizError::InvalidCoordinate(format!(
            "latitude {} outside the UTM band [{}, {}]",
            point.lat, MIN_LATITUDE, MAX_LATITUDE
        )));
    }
    Ok(())
}

/// Standard UTM zone number, including the Norway and Svalbard exceptions
pub fn zone_for(point: GeoPoint) -> u8 {
    // 180°E would be zone 61
    utm::lat_lon_to_zone_number(point.lat, point.lon).clamp(1, 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_equator_on_central_meridian() {
        // Zone 31 is centered on 3°E
        let p = project(GeoPoint::new(3.0, 0.0)).unwrap();
        assert!((p.x - 500_000.0).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn test_known_northing_at_45_degrees() {
        // Meridian arc length to 45°N scaled by k0
        let p = project(GeoPoint::new(3.0, 45.0)).unwrap();
        assert!((p.x - 500_000.0).abs() < 1e-6);
        assert!((p.y - 4_982_950.4).abs() < 1.0, "northing was {}", p.y);
    }

    #[test]
    fn test_southern_hemisphere_false_northing() {
        let p = project(GeoPoint::new(3.0, -0.0001)).unwrap();
        assert!(p.y > 9_999_980.0 && p.y < 10_000_000.0, "northing was {}", p.y);
    }

    #[test]
    fn test_meter_scale_along_meridian() {
        // 0.001° of latitude is about 110.6 m at mid latitudes
        let a = project(GeoPoint::new(-93.0, 42.0)).unwrap();
        let b = project(GeoPoint::new(-93.0, 42.001)).unwrap();
        let d = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
        assert!((d - 111.0).abs() < 1.0, "distance was {}", d);
    }

    #[test]
    fn test_zone_for_standard_and_exceptions() {
        assert_eq!(zone_for(GeoPoint::new(-180.0, 0.0)), 1);
        assert_eq!(zone_for(GeoPoint::new(180.0, 0.0)), 60);
        assert_eq!(zone_for(GeoPoint::new(-93.6, 42.0)), 15);
        assert_eq!(zone_for(GeoPoint::new(5.0, 60.0)), 32);
        assert_eq!(zone_for(GeoPoint::new(15.0, 78.0)), 33);
    }

    #[test]
    fn test_fixed_zone() {
        let projector = UtmProjector::with_zone(15).unwrap();
        // -87° lies in zone 16 but is forced into zone 15
        let forced = projector.project(GeoPoint::new(-87.0, 42.0)).unwrap();
        let own = project(GeoPoint::new(-87.0, 42.0)).unwrap();
        assert!(forced.x > own.x);
        assert!(UtmProjector::with_zone(0).is_err());
        assert!(UtmProjector::with_zone(61).is_err());
    }

    #[test]
    fn test_invalid_coordinates_rejected() {
        for point in [
            GeoPoint::new(f64::NAN, 10.0),
            GeoPoint::new(10.0, f64::INFINITY),
            GeoPoint::new(181.0, 10.0),
            GeoPoint::new(10.0, 85.0),
            GeoPoint::new(10.0, -80.5),
        ] {
            assert!(matches!(
                project(point),
                Err(FieldVizError::InvalidCoordinate(_))
            ));
        }
    }

    #[test]
    fn test_project_shape_stops_at_first_invalid_point() {
        let points = [GeoPoint::new(1.0, 1.0), GeoPoint::new(1.0, 89.0)];
        assert!(matches!(
            UtmProjector::new().project_shape(&points),
            Err(FieldVizError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_project_shape_empty() {
        let projector = UtmProjector::new();
        assert!(projector.project_shape(&[]).unwrap().is_empty());
        assert_eq!(projector.frame_for(&[]).unwrap(), None);
    }

    #[test]
    fn test_shape_across_zone_edge_shares_one_zone() {
        // -96° is the edge between zones 14 and 15
        let square = [
            GeoPoint::new(-96.001, 42.0),
            GeoPoint::new(-95.999, 42.0),
            GeoPoint::new(-95.999, 42.0015),
            GeoPoint::new(-96.001, 42.0015),
        ];
        let projector = UtmProjector::new();
        let frame = projector.frame_for(&square).unwrap().unwrap();
        assert!(frame.zone == 14 || frame.zone == 15);
        assert!(!frame.south);

        let planar = projector.project_shape(&square).unwrap();
        let dx = planar[1].x - planar[0].x;
        let dy = planar[2].y - planar[1].y;
        // 0.002° of longitude at 42°N is about 166 m
        assert!((dx - 166.0).abs() < 2.0, "dx was {}", dx);
        assert!((dy - 166.5).abs() < 2.0, "dy was {}", dy);
    }

    #[test]
    fn test_shape_across_equator_shares_one_hemisphere() {
        let line = [GeoPoint::new(3.0, -0.001), GeoPoint::new(3.0, 0.001)];
        let planar = UtmProjector::new().project_shape(&line).unwrap();
        let dy = planar[1].y - planar[0].y;
        assert!((dy - 221.0).abs() < 1.0, "dy was {}", dy);
    }

    #[test]
    fn test_project_shape_respects_fixed_zone() {
        let projector = UtmProjector::with_zone(15).unwrap();
        let frame = projector
            .frame_for(&[GeoPoint::new(-87.0, -10.0)])
            .unwrap()
            .unwrap();
        assert_eq!(frame, UtmFrame { zone: 15, south: true });
    }

    proptest! {
        #[test]
        fn prop_projection_is_deterministic(lon in -180.0f64..=180.0, lat in -80.0f64..=84.0) {
            let point = GeoPoint::new(lon, lat);
            let first = project(point).unwrap();
            let second = project(point).unwrap();
            prop_assert_eq!(first.x.to_bits(), second.x.to_bits());
            prop_assert_eq!(first.y.to_bits(), second.y.to_bits());
        }

        #[test]
        fn prop_projection_is_finite(lon in -180.0f64..=180.0, lat in -80.0f64..=84.0) {
            let p = project(GeoPoint::new(lon, lat)).unwrap();
            prop_assert!(p.x.is_finite() && p.y.is_finite());
        }
    }
}
