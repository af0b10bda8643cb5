//! Viewport fitting: extent, scale factor (delta) and pixel mapping
//!
//! Every shape is fitted on its own: the extent and delta are computed from
//! that shape's points only and returned as a [`ScaleFit`] value, never
//! stored between calls.
//!
//! # Scale rules
//!
//! - [`ScaleRule::Classic`] keeps the historical axis choice:
//!   `delta = lon / usable_width` when the usable area is narrower than tall
//!   *and* the shape is taller than wide, otherwise `delta = lat / usable_height`.
//!   Existing plan views depend on this exact branch.
//! - [`ScaleRule::Contain`] takes the larger of the two ratios so every point
//!   lands inside the usable area.

use serde::{Deserialize, Serialize};

use super::projection::PlanarPoint;
use crate::{FieldVizError, Result};

/// A point in canvas units, relative to the extent's lower-left corner.
///
/// Margin offset and y-axis inversion are left to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounding box over a batch of planar points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    /// Bounding box of the points, `None` when there are none
    pub fn from_points(points: &[PlanarPoint]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(points.iter().skip(1).fold(init, |extent, p| Self {
            min_x: extent.min_x.min(p.x),
            max_x: extent.max_x.max(p.x),
            min_y: extent.min_y.min(p.y),
            max_y: extent.max_y.max(p.y),
        }))
    }

    /// East-west distance (meters)
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// North-south distance (meters)
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleRule {
    #[default]
    Classic,
    Contain,
}

/// Target canvas size and the margin kept free on every side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: 25.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64, margin: f64) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn usable_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    pub fn usable_height(&self) -> f64 {
        self.height - 2.0 * self.margin
    }

    /// Fit the points into this viewport
    pub fn fit(&self, points: &[PlanarPoint], rule: ScaleRule) -> Result<ScaleFit> {
        let usable_width = self.usable_width();
        let usable_height = self.usable_height();

        if usable_width.is_nan()
            || usable_height.is_nan()
            || usable_width <= 0.0
            || usable_height <= 0.0
        {
            return Err(FieldVizError::DegenerateViewport(format!(
                "usable area {}x{} (canvas {}x{}, margin {})",
                usable_width, usable_height, self.width, self.height, self.margin
            )));
        }

        let extent = Extent::from_points(points).ok_or_else(|| {
            FieldVizError::DegenerateViewport("no points to fit".to_string())
        })?;

        let lon_distance = extent.width();
        let lat_distance = extent.height();
        if lon_distance == 0.0 && lat_distance == 0.0 {
            return Err(FieldVizError::DegenerateViewport(format!(
                "zero extent at ({}, {})",
                extent.min_x, extent.min_y
            )));
        }

        let by_width = lon_distance / usable_width;
        let by_height = lat_distance / usable_height;

        let delta = match rule {
            ScaleRule::Classic => {
                let delta = if usable_width < usable_height && lat_distance > lon_distance {
                    by_width
                } else {
                    by_height
                };
                // The chosen axis can be flat (e.g. an east-west AB line); use the other one
                if delta > 0.0 {
                    delta
                } else {
                    by_width.max(by_height)
                }
            }
            ScaleRule::Contain => by_width.max(by_height),
        };

        if !delta.is_finite() || delta <= 0.0 {
            return Err(FieldVizError::DegenerateViewport(format!(
                "scale factor {} for extent {}x{}",
                delta, lon_distance, lat_distance
            )));
        }

        tracing::debug!(
            points = points.len(),
            lon_distance,
            lat_distance,
            delta,
            "fitted extent"
        );

        Ok(ScaleFit { extent, delta })
    }
}

/// Extent and delta computed for one shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFit {
    pub extent: Extent,
    /// Planar meters per canvas unit
    pub delta: f64,
}

impl ScaleFit {
    pub fn to_pixel(&self, point: PlanarPoint) -> PixelPoint {
        to_pixel(point, &self.extent, self.delta)
    }

    pub fn to_pixels(&self, points: &[PlanarPoint]) -> Vec<PixelPoint> {
        points.iter().map(|p| self.to_pixel(*p)).collect()
    }
}

/// Compute extent and delta with the classic rule
pub fn compute_delta(
    points: &[PlanarPoint],
    viewport_width: f64,
    viewport_height: f64,
    margin: f64,
) -> Result<(Extent, f64)> {
    let fit =
        Viewport::new(viewport_width, viewport_height, margin).fit(points, ScaleRule::Classic)?;
    Ok((fit.extent, fit.delta))
}

/// Map a planar point to canvas units
pub fn to_pixel(point: PlanarPoint, extent: &Extent, delta: f64) -> PixelPoint {
    PixelPoint {
        x: (point.x - extent.min_x) / delta,
        y: (point.y - extent.min_y) / delta,
    }
}
