//! Guidance pattern rendering
//!
//! Each pattern kind has one drawing rule:
//!
//! | kind          | drawing                                          |
//! |---------------|--------------------------------------------------|
//! | `APlus`       | point is projected, nothing is drawn             |
//! | `AbLine`      | 2-point polyline A→B                             |
//! | `AbCurve`     | one polyline per constituent line, fitted alone  |
//! | `MultiAbLine` | each AB line drawn as above, fitted alone        |
//! | `Spiral`      | one polyline                                     |
//! | `CenterPivot` | fails with `NotImplemented`                      |

use super::{Canvas, Frame, Pen, Pipeline};
use crate::model::{
    find_pattern, AbLine, GuidanceGroup, GuidancePattern, GuidancePatternKind, LineString,
};
use crate::{FieldVizError, Result};

/// Render every pattern referenced by the group into one frame.
///
/// Fails on the first missing id or unsupported pattern; the canvas is then
/// left as it was.
pub fn render_guidance_group<C: Canvas + ?Sized>(
    group: &GuidanceGroup,
    patterns: &[GuidancePattern],
    pipeline: &Pipeline,
    canvas: &mut C,
    pen: Pen,
) -> Result<()> {
    tracing::info!(
        group = group.id,
        patterns = group.guidance_pattern_ids.len(),
        "rendering guidance group"
    );

    let mut frame = Frame::acquire(canvas, pen);
    for id in &group.guidance_pattern_ids {
        let pattern = find_pattern(patterns, *id)?;
        draw_pattern(pattern, pipeline, &mut frame)?;
    }
    frame.commit()
}

/// Render a single pattern into its own frame
pub fn render_guidance_pattern<C: Canvas + ?Sized>(
    pattern: &GuidancePattern,
    pipeline: &Pipeline,
    canvas: &mut C,
    pen: Pen,
) -> Result<()> {
    let mut frame = Frame::acquire(canvas, pen);
    draw_pattern(pattern, pipeline, &mut frame)?;
    frame.commit()
}

/// Draw one pattern into an open frame
pub fn draw_pattern<C: Canvas + ?Sized>(
    pattern: &GuidancePattern,
    pipeline: &Pipeline,
    frame: &mut Frame<'_, C>,
) -> Result<()> {
    tracing::debug!(pattern = pattern.id, kind = pattern.kind.name(), "drawing pattern");

    match &pattern.kind {
        GuidancePatternKind::APlus(a_plus) => {
            // Point markers are not drawn yet; the point is still validated
            pipeline.projector.project(a_plus.point)?;
            tracing::warn!(pattern = pattern.id, "APlus patterns are not drawn");
            Ok(())
        }
        GuidancePatternKind::AbLine(ab_line) => draw_ab_line(ab_line, pipeline, frame),
        GuidancePatternKind::AbCurve(ab_curve) => {
            for line_string in &ab_curve.shape {
                draw_line_string(line_string, pipeline, frame)?;
            }
            Ok(())
        }
        GuidancePatternKind::MultiAbLine(multi) => {
            for ab_line in &multi.ab_lines {
                draw_ab_line(ab_line, pipeline, frame)?;
            }
            Ok(())
        }
        GuidancePatternKind::Spiral(spiral) => draw_line_string(&spiral.shape, pipeline, frame),
        GuidancePatternKind::CenterPivot(_) => Err(FieldVizError::NotImplemented(format!(
            "CenterPivot guidance pattern {} cannot be rendered",
            pattern.id
        ))),
    }
}

fn draw_ab_line<C: Canvas + ?Sized>(
    ab_line: &AbLine,
    pipeline: &Pipeline,
    frame: &mut Frame<'_, C>,
) -> Result<()> {
    let pixels = pipeline.to_pixels(&[ab_line.a, ab_line.b])?;
    frame.polyline(pixels);
    Ok(())
}

fn draw_line_string<C: Canvas + ?Sized>(
    line_string: &LineString,
    pipeline: &Pipeline,
    frame: &mut Frame<'_, C>,
) -> Result<()> {
    let pixels = pipeline.to_pixels(&line_string.points)?;
    frame.polyline(pixels);
    Ok(())
}
