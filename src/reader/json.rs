//! JSON catalog reader
//!
//! The document is a single JSON object with the optional keys
//! `logged_data`, `field_boundaries`, `guidance_groups` and
//! `guidance_patterns`; see [`crate::model`] for the shapes of each entry.

use std::path::{Path, PathBuf};

use super::Reader;
use crate::model::Catalog;
use crate::{FieldVizError, Result};

/// Reads a catalog from a JSON file
#[derive(Debug, Clone)]
pub struct JsonReader {
    path: PathBuf,
}

impl JsonReader {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Decode a catalog from JSON text
    pub fn parse(text: &str) -> Result<Catalog> {
        serde_json::from_str(text)
            .map_err(|e| FieldVizError::ReaderError(format!("Failed to decode catalog: {}", e)))
    }
}

impl Reader for JsonReader {
    fn read_catalog(&self) -> Result<Catalog> {
        tracing::info!("Loading catalog from {}", self.path.display());

        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            FieldVizError::ReaderError(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        let catalog = serde_json::from_str::<Catalog>(&text).map_err(|e| {
            FieldVizError::ReaderError(format!(
                "Failed to decode catalog {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::info!(
            logged_data = catalog.logged_data.len(),
            boundaries = catalog.field_boundaries.len(),
            guidance_groups = catalog.guidance_groups.len(),
            guidance_patterns = catalog.guidance_patterns.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    fn source_name(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GuidancePatternKind, MeterKind};
    use std::io::Write;

    const CATALOG: &str = r#"{
        "logged_data": [{
            "id": 1,
            "description": "Planting 2015",
            "field_id": 7,
            "operation_data": [{
                "id": 3,
                "operation_type": "SowingAndPlanting",
                "max_depth": 1,
                "sections": [{
                    "id": 30,
                    "depth": 0,
                    "meters": [
                        { "id": 1, "kind": "numeric", "representation": { "code": "vrSpeed" } },
                        { "id": 2, "kind": "enumerated", "representation": { "code": "dtSection" } }
                    ]
                }],
                "spatial_records": [{
                    "timestamp": "2015-05-01T10:00:00Z",
                    "geometry": { "lon": -93.6, "lat": 42.0 },
                    "values": {
                        "1": { "type": "numeric", "quantity": 12.5, "uom": "km/h" },
                        "2": { "type": "enumerated", "code": "dtiOn" }
                    }
                }]
            }]
        }],
        "field_boundaries": [{
            "id": 5,
            "spatial_data": { "polygons": [{ "exterior_ring": { "points": [
                { "lon": -93.6, "lat": 42.0 },
                { "lon": -93.59, "lat": 42.0 },
                { "lon": -93.59, "lat": 42.01 }
            ] } }] }
        }],
        "guidance_groups": [{ "id": 9, "guidance_pattern_ids": [11] }],
        "guidance_patterns": [{
            "id": 11,
            "type": "AbLine",
            "a": { "lon": -93.6, "lat": 42.0 },
            "b": { "lon": -93.6, "lat": 42.01 }
        }]
    }"#;

    #[test]
    fn test_parse_full_catalog() {
        let catalog = JsonReader::parse(CATALOG).unwrap();
        let op = catalog.operation(3).unwrap();
        assert_eq!(op.sections[0].meters[1].kind, MeterKind::Enumerated);
        assert_eq!(op.spatial_records.len(), 1);
        assert_eq!(catalog.field_boundary(5).unwrap().spatial_data.polygons.len(), 1);
        assert!(matches!(
            catalog.guidance_patterns[0].kind,
            GuidancePatternKind::AbLine(_)
        ));
    }

    #[test]
    fn test_parse_empty_object() {
        let catalog = JsonReader::parse("{}").unwrap();
        assert_eq!(catalog, Catalog::default());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            JsonReader::parse("{ not json"),
            Err(FieldVizError::ReaderError(_))
        ));
    }

    #[test]
    fn test_read_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let reader = JsonReader::from_path(file.path());
        let catalog = reader.read_catalog().unwrap();
        assert_eq!(catalog.guidance_group(9).unwrap().guidance_pattern_ids, vec![11]);
        assert_eq!(reader.source_name(), file.path().display().to_string());
    }

    #[test]
    fn test_sample_catalog_tabulates() {
        let catalog = JsonReader::parse(include_str!("../../data/sample_field.json")).unwrap();
        let table = crate::table::build_table(catalog.operation(10).unwrap());
        assert_eq!(
            table.columns,
            vec![
                "vrVehicleSpeed",
                "vrSeedRateAppliedTarget",
                "dtRecordingStatus",
                "dtSectionStatus"
            ]
        );
        assert_eq!(table.cell(0, "vrSeedRateAppliedTarget"), Some("84000 seeds1ac-1"));
        assert_eq!(table.cell(1, "vrSeedRateAppliedTarget"), Some(""));
        assert_eq!(table.cell(1, "dtSectionStatus"), Some("dtiOff"));
    }

    #[test]
    fn test_read_missing_file() {
        let reader = JsonReader::from_path("/nonexistent/field.json");
        let err = reader.read_catalog().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/field.json"));
    }
}
