//! Guidance patterns and groups
//!
//! A guidance pattern is a planned steering path. The set of pattern kinds is
//! closed: every consumer matches on [`GuidancePatternKind`] exhaustively.

use serde::{Deserialize, Serialize};

use super::shapes::{GeoPoint, LineString};
use crate::{FieldVizError, Result};

/// A guidance pattern with its reference id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidancePattern {
    pub id: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub kind: GuidancePatternKind,
}

/// Pattern geometry, tagged by `"type"` in serialized form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GuidancePatternKind {
    APlus(APlus),
    AbLine(AbLine),
    AbCurve(AbCurve),
    MultiAbLine(MultiAbLine),
    Spiral(Spiral),
    CenterPivot(CenterPivot),
}

impl GuidancePatternKind {
    pub fn name(&self) -> &'static str {
        match self {
            GuidancePatternKind::APlus(_) => "APlus",
            GuidancePatternKind::AbLine(_) => "AbLine",
            GuidancePatternKind::AbCurve(_) => "AbCurve",
            GuidancePatternKind::MultiAbLine(_) => "MultiAbLine",
            GuidancePatternKind::Spiral(_) => "Spiral",
            GuidancePatternKind::CenterPivot(_) => "CenterPivot",
        }
    }
}

/// A single reference point with a heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct APlus {
    pub point: GeoPoint,
    #[serde(default)]
    pub heading: Option<f64>,
}

/// A straight line through two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbLine {
    pub a: GeoPoint,
    pub b: GeoPoint,
    #[serde(default)]
    pub heading: Option<f64>,
}

/// A curve made of one or more polylines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbCurve {
    pub shape: Vec<LineString>,
    #[serde(default)]
    pub heading: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiAbLine {
    pub ab_lines: Vec<AbLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spiral {
    pub shape: LineString,
}

/// Circular pattern around a pivot center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterPivot {
    pub center: GeoPoint,
    #[serde(default)]
    pub start_point: Option<GeoPoint>,
    #[serde(default)]
    pub end_point: Option<GeoPoint>,
}

/// A named set of guidance pattern references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceGroup {
    pub id: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub guidance_pattern_ids: Vec<i32>,
}

/// Resolve a pattern by reference id
pub fn find_pattern(patterns: &[GuidancePattern], id: i32) -> Result<&GuidancePattern> {
    patterns
        .iter()
        .find(|pattern| pattern.id == id)
        .ok_or(FieldVizError::PatternNotFound(id))
}
