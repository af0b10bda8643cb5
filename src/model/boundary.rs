//! Field boundaries

use serde::{Deserialize, Serialize};

use super::shapes::MultiPolygon;

/// The outline of a field, possibly made of several polygons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldBoundary {
    pub id: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub field_id: Option<i32>,
    #[serde(default)]
    pub spatial_data: MultiPolygon,
}
