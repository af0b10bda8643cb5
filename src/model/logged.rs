//! Logged operation data: sections, meters and spatial records
//!
//! # Query interface
//!
//! Consumers read operation data only through [`OperationSource`]:
//! - `max_depth()` - number of section depths
//! - `sections(depth)` - sections at one depth, in declared order
//! - `spatial_records()` - samples in native order
//!
//! Meter values are looked up per record with [`SpatialRecord::meter_value`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::shapes::GeoPoint;

/// Read-only query contract over one operation's data
pub trait OperationSource {
    /// Number of section depths; sections are queried for `0..max_depth()`
    fn max_depth(&self) -> usize;

    /// Sections at the given depth, in declared order
    fn sections(&self, depth: usize) -> Vec<&Section>;

    /// Spatial records in native order
    fn spatial_records(&self) -> Box<dyn Iterator<Item = &SpatialRecord> + '_>;
}

/// A logged work record holding one or more operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggedData {
    pub id: i32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub farm_id: Option<i32>,
    #[serde(default)]
    pub field_id: Option<i32>,
    #[serde(default)]
    pub operation_data: Vec<OperationData>,
}

impl LoggedData {
    /// Drop resident spatial records of every operation once they are processed.
    ///
    /// Sections and meters are kept so the operation can still be described.
    pub fn release_spatial_data(&mut self) {
        for operation in &mut self.operation_data {
            operation.spatial_records = Vec::new();
        }
    }
}

/// One operation's sensor stream with its section/meter layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationData {
    pub id: i32,
    #[serde(default)]
    pub operation_type: Option<String>,
    #[serde(default)]
    pub max_depth: usize,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub spatial_records: Vec<SpatialRecord>,
}

impl OperationSource for OperationData {
    fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn sections(&self, depth: usize) -> Vec<&Section> {
        self.sections
            .iter()
            .filter(|section| section.depth == depth)
            .collect()
    }

    fn spatial_records(&self) -> Box<dyn Iterator<Item = &SpatialRecord> + '_> {
        Box::new(self.spatial_records.iter())
    }
}

/// A spatial subdivision of the implement (e.g. a boom section or a row)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: i32,
    #[serde(default)]
    pub depth: usize,
    #[serde(default)]
    pub meters: Vec<Meter>,
}

impl Section {
    pub fn meters(&self) -> &[Meter] {
        &self.meters
    }
}

/// A measurement channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meter {
    pub id: i32,
    #[serde(default)]
    pub representation: Option<Representation>,
    #[serde(default)]
    pub kind: MeterKind,
}

/// Meter kind. Anything other than numeric/enumerated, or a missing kind,
/// decodes to `Unsupported`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeterKind {
    Numeric,
    Enumerated,
    #[serde(other)]
    #[default]
    Unsupported,
}

/// What a meter measures; `code` is the short column header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representation {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// One timestamped, positioned sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpatialRecord {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub geometry: Option<GeoPoint>,
    /// Values keyed by meter id
    #[serde(default)]
    pub values: BTreeMap<i32, RepresentationValue>,
}

impl SpatialRecord {
    pub fn meter_value(&self, meter: &Meter) -> Option<&RepresentationValue> {
        self.values.get(&meter.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RepresentationValue {
    /// Quantity with its unit-of-measure code (e.g. `12.5` + `"km/h"`)
    Numeric { quantity: f64, uom: String },
    /// Enumeration member code (e.g. `"dblSeedOn"`)
    Enumerated { code: String },
}
