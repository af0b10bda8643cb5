//! Plan-view rendering of guidance patterns and field boundaries
//!
//! # Architecture
//!
//! - [`Canvas`] - the drawing sink (`clear`, `draw_polyline`, `draw_polygon`, `present`)
//! - [`Frame`] - scoped acquisition of a canvas for one render call
//! - [`Pipeline`] - projection + viewport fitting shared by all renderers
//! - `guidance` / `boundary` - per-domain renderers
//! - `recording` / `svg` - canvas implementations
//!
//! A render call draws into a [`Frame`], which buffers shapes and only touches
//! the canvas on [`Frame::commit`]. If the call fails partway (an unsupported
//! pattern, a degenerate shape) the frame is dropped uncommitted and the
//! canvas keeps whatever it showed before.

pub mod boundary;
pub mod guidance;
pub mod recording;
#[cfg(feature = "svg")]
pub mod svg;

pub use boundary::render_boundary;
pub use guidance::{draw_pattern, render_guidance_group, render_guidance_pattern};
pub use recording::RecordingCanvas;
#[cfg(feature = "svg")]
pub use svg::SvgCanvas;

use serde::{Deserialize, Serialize};

use crate::geo::{GeoPoint, PixelPoint, ScaleRule, UtmProjector, Viewport};
use crate::{FieldVizError, Result};

/// Stroke used for every shape of a render call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pen {
    /// RGBA
    pub color: [u8; 4],
    pub width: u32,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: [0, 0, 0, 255],
            width: 2,
        }
    }
}

impl Pen {
    /// Build a pen from a CSS color string (`"black"`, `"#1f77b4"`, `"rgb(0 128 0)"`)
    pub fn parse(color: &str, width: u32) -> Result<Self> {
        let parsed = csscolorparser::parse(color).map_err(|e| {
            FieldVizError::ConfigError(format!("Invalid pen color '{}': {}", color, e))
        })?;
        if width == 0 {
            return Err(FieldVizError::ConfigError(
                "Pen width must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            color: parsed.to_rgba8(),
            width,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Open path through the points
    Polyline,
    /// Closed outline; the canvas joins the last point back to the first
    Polygon,
}

/// A shape in canvas units, as handed to a canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub points: Vec<PixelPoint>,
    pub pen: Pen,
}

/// Drawing sink
pub trait Canvas {
    /// Erase everything to the blank background
    fn clear(&mut self);

    fn draw_polyline(&mut self, points: &[PixelPoint], pen: &Pen) -> Result<()>;

    fn draw_polygon(&mut self, points: &[PixelPoint], pen: &Pen) -> Result<()>;

    /// Flush drawn content to the output, if the canvas has one
    fn present(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Scoped use of a canvas for a single render call.
///
/// Shapes are buffered until [`commit`](Frame::commit). Dropping the frame
/// without committing releases it and leaves the canvas untouched.
pub struct Frame<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    pen: Pen,
    pending: Vec<Shape>,
}

impl<'a, C: Canvas + ?Sized> Frame<'a, C> {
    pub fn acquire(canvas: &'a mut C, pen: Pen) -> Self {
        Self {
            canvas,
            pen,
            pending: Vec::new(),
        }
    }

    pub fn polyline(&mut self, points: Vec<PixelPoint>) {
        self.push(ShapeKind::Polyline, points);
    }

    pub fn polygon(&mut self, points: Vec<PixelPoint>) {
        self.push(ShapeKind::Polygon, points);
    }

    fn push(&mut self, kind: ShapeKind, points: Vec<PixelPoint>) {
        self.pending.push(Shape {
            kind,
            points,
            pen: self.pen,
        });
    }

    /// Number of buffered shapes
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Clear the canvas, draw the buffered shapes and present them.
    ///
    /// If the canvas fails while drawing, it is cleared again so it never
    /// shows a partial frame.
    pub fn commit(mut self) -> Result<()> {
        let shapes = std::mem::take(&mut self.pending);
        tracing::debug!(shapes = shapes.len(), "committing frame");

        self.canvas.clear();
        for shape in &shapes {
            let drawn = match shape.kind {
                ShapeKind::Polyline => self.canvas.draw_polyline(&shape.points, &shape.pen),
                ShapeKind::Polygon => self.canvas.draw_polygon(&shape.points, &shape.pen),
            };
            if let Err(e) = drawn {
                self.canvas.clear();
                return Err(e);
            }
        }
        self.canvas.present()
    }
}

impl<C: Canvas + ?Sized> Drop for Frame<'_, C> {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(
                shapes = self.pending.len(),
                "discarding uncommitted frame"
            );
        }
    }
}

/// Projection and fitting settings applied to every shape
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pipeline {
    pub projector: UtmProjector,
    pub viewport: Viewport,
    pub rule: ScaleRule,
}

impl Pipeline {
    /// Project the points, fit them on their own and map them to canvas units
    pub fn to_pixels(&self, points: &[GeoPoint]) -> Result<Vec<PixelPoint>> {
        let planar = self.projector.project_shape(points)?;
        let fit = self.viewport.fit(&planar, self.rule)?;
        Ok(fit.to_pixels(&planar))
    }
}
