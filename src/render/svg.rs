//! SVG file canvas backed by plotters
//!
//! Shapes are kept in memory and the whole file is rewritten on `present`,
//! so the file always reflects the last committed frame.

use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

use super::{Canvas, Pen, Shape, ShapeKind};
use crate::geo::{PixelPoint, Viewport};
use crate::{FieldVizError, Result};

#[derive(Debug)]
pub struct SvgCanvas {
    path: PathBuf,
    viewport: Viewport,
    shapes: Vec<Shape>,
}

impl SvgCanvas {
    pub fn new(path: impl AsRef<Path>, viewport: Viewport) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            viewport,
            shapes: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Canvas units → SVG pixels: shift by the margin and flip y so north is up
    fn screen_point(&self, point: &PixelPoint) -> (i32, i32) {
        let x = self.viewport.margin + point.x;
        let y = self.viewport.height - self.viewport.margin - point.y;
        (x.round() as i32, y.round() as i32)
    }

    fn push(&mut self, kind: ShapeKind, points: &[PixelPoint], pen: &Pen) {
        self.shapes.push(Shape {
            kind,
            points: points.to_vec(),
            pen: *pen,
        });
    }
}

impl Canvas for SvgCanvas {
    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn draw_polyline(&mut self, points: &[PixelPoint], pen: &Pen) -> Result<()> {
        self.push(ShapeKind::Polyline, points, pen);
        Ok(())
    }

    fn draw_polygon(&mut self, points: &[PixelPoint], pen: &Pen) -> Result<()> {
        self.push(ShapeKind::Polygon, points, pen);
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let size = (
            self.viewport.width.round().max(1.0) as u32,
            self.viewport.height.round().max(1.0) as u32,
        );
        let root = SVGBackend::new(&self.path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        for shape in &self.shapes {
            let mut coords: Vec<(i32, i32)> =
                shape.points.iter().map(|p| self.screen_point(p)).collect();
            if shape.kind == ShapeKind::Polygon {
                if let Some(first) = coords.first().copied() {
                    coords.push(first);
                }
            }

            let [r, g, b, a] = shape.pen.color;
            let style = ShapeStyle {
                color: RGBAColor(r, g, b, f64::from(a) / 255.0),
                filled: false,
                stroke_width: shape.pen.width,
            };
            root.draw(&PathElement::new(coords, style))
                .map_err(draw_error)?;
        }

        root.present().map_err(draw_error)?;
        tracing::info!(path = %self.path.display(), shapes = self.shapes.len(), "wrote SVG");
        Ok(())
    }
}

fn draw_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> FieldVizError {
    FieldVizError::WriterError(format!("Failed to draw SVG: {}", e))
}
