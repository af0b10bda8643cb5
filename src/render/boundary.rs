//! Field boundary rendering
//!
//! Each polygon's exterior ring is fitted on its own and drawn as a closed
//! outline. Interior rings (holes) are not drawn.

use super::{Canvas, Frame, Pen, Pipeline};
use crate::model::FieldBoundary;
use crate::Result;

pub fn render_boundary<C: Canvas + ?Sized>(
    boundary: &FieldBoundary,
    pipeline: &Pipeline,
    canvas: &mut C,
    pen: Pen,
) -> Result<()> {
    let polygons = &boundary.spatial_data.polygons;
    tracing::info!(
        boundary = boundary.id,
        polygons = polygons.len(),
        "rendering field boundary"
    );

    let mut frame = Frame::acquire(canvas, pen);
    for (idx, polygon) in polygons.iter().enumerate() {
        if !polygon.interior_rings.is_empty() {
            tracing::warn!(
                boundary = boundary.id,
                polygon = idx,
                holes = polygon.interior_rings.len(),
                "interior rings are not rendered"
            );
        }
        let pixels = pipeline.to_pixels(&polygon.exterior_ring.points)?;
        frame.polygon(pixels);
    }
    frame.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{GeoPoint, ScaleRule, Viewport};
    use crate::model::{LinearRing, MultiPolygon, Polygon};
    use crate::render::{RecordingCanvas, ShapeKind};
    use crate::FieldVizError;

    fn ring(points: &[(f64, f64)]) -> LinearRing {
        LinearRing {
            points: points.iter().map(|(lon, lat)| GeoPoint::new(*lon, *lat)).collect(),
        }
    }

    fn square(lon: f64, lat: f64, size: f64) -> Polygon {
        Polygon {
            exterior_ring: ring(&[
                (lon, lat),
                (lon + size, lat),
                (lon + size, lat + size),
                (lon, lat + size),
                (lon, lat),
            ]),
            interior_rings: vec![],
        }
    }

    fn boundary(polygons: Vec<Polygon>) -> FieldBoundary {
        FieldBoundary {
            id: 1,
            spatial_data: MultiPolygon { polygons },
            ..Default::default()
        }
    }

    fn pipeline() -> Pipeline {
        Pipeline {
            viewport: Viewport::new(400.0, 300.0, 25.0),
            rule: ScaleRule::Contain,
            ..Default::default()
        }
    }

    #[test]
    fn test_each_polygon_drawn_and_fitted_alone() {
        let b = boundary(vec![square(-93.0, 42.0, 0.01), square(-92.0, 42.0, 0.001)]);
        let mut canvas = RecordingCanvas::new();
        render_boundary(&b, &pipeline(), &mut canvas, Pen::default()).unwrap();

        let shapes = canvas.shapes();
        assert_eq!(shapes.len(), 2);
        for shape in shapes {
            assert_eq!(shape.kind, ShapeKind::Polygon);
            assert_eq!(shape.points.len(), 5);
            // Both polygons span the full usable height despite their size difference
            let max_y = shape.points.iter().map(|p| p.y).fold(f64::MIN, f64::max);
            assert!((max_y - 250.0).abs() < 1e-6, "max y was {}", max_y);
        }
        assert_eq!(canvas.clear_count(), 1);
    }

    #[test]
    fn test_holes_are_ignored() {
        let mut polygon = square(-93.0, 42.0, 0.01);
        polygon.interior_rings.push(ring(&[
            (-92.995, 42.004),
            (-92.994, 42.004),
            (-92.994, 42.005),
        ]));
        let mut canvas = RecordingCanvas::new();
        render_boundary(
            &boundary(vec![polygon]),
            &pipeline(),
            &mut canvas,
            Pen::default(),
        )
        .unwrap();
        assert_eq!(canvas.shapes().len(), 1);
    }

    #[test]
    fn test_degenerate_ring_aborts_without_partial_draw() {
        let degenerate = Polygon {
            exterior_ring: ring(&[(-93.0, 42.0)]),
            interior_rings: vec![],
        };
        let b = boundary(vec![square(-93.0, 42.0, 0.01), degenerate]);
        let mut canvas = RecordingCanvas::new();
        let result = render_boundary(&b, &pipeline(), &mut canvas, Pen::default());

        assert!(matches!(result, Err(FieldVizError::DegenerateViewport(_))));
        assert!(canvas.shapes().is_empty());
        assert_eq!(canvas.clear_count(), 0);
    }

    #[test]
    fn test_uses_configured_pen() {
        let pen = Pen::parse("green", 4).unwrap();
        let mut canvas = RecordingCanvas::new();
        render_boundary(
            &boundary(vec![square(-93.0, 42.0, 0.01)]),
            &pipeline(),
            &mut canvas,
            pen,
        )
        .unwrap();
        assert_eq!(canvas.shapes()[0].pen, pen);
    }
}
