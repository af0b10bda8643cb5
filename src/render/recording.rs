//! In-memory canvas that records committed shapes

use serde::{Deserialize, Serialize};

use super::{Canvas, Pen, Shape, ShapeKind};
use crate::geo::PixelPoint;
use crate::Result;

/// Canvas keeping the shapes currently "on screen"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingCanvas {
    shapes: Vec<Shape>,
    #[serde(skip)]
    clears: usize,
    #[serde(skip)]
    presents: usize,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn present_count(&self) -> usize {
        self.presents
    }

    /// Shapes as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.shapes).map_err(|e| {
            crate::FieldVizError::WriterError(format!("Failed to encode shapes: {}", e))
        })
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.shapes.clear();
        self.clears += 1;
    }

    fn draw_polyline(&mut self, points: &[PixelPoint], pen: &Pen) -> Result<()> {
        self.shapes.push(Shape {
            kind: ShapeKind::Polyline,
            points: points.to_vec(),
            pen: *pen,
        });
        Ok(())
    }

    fn draw_polygon(&mut self, points: &[PixelPoint], pen: &Pen) -> Result<()> {
        self.shapes.push(Shape {
            kind: ShapeKind::Polygon,
            points: points.to_vec(),
            pen: *pen,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_lists_shapes() {
        let mut canvas = RecordingCanvas::new();
        canvas
            .draw_polygon(
                &[PixelPoint { x: 0.0, y: 0.0 }, PixelPoint { x: 5.0, y: 0.0 }],
                &Pen::default(),
            )
            .unwrap();
        let json = canvas.to_json().unwrap();
        assert!(json.contains("\"polygon\""));
        assert!(json.contains("\"width\": 2"));
    }
}
