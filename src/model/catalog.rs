//! Top-level document holding everything a reader loads

use serde::{Deserialize, Serialize};

use super::{FieldBoundary, GuidanceGroup, GuidancePattern, LoggedData, OperationData};
use crate::{FieldVizError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub logged_data: Vec<LoggedData>,
    #[serde(default)]
    pub field_boundaries: Vec<FieldBoundary>,
    #[serde(default)]
    pub guidance_groups: Vec<GuidanceGroup>,
    #[serde(default)]
    pub guidance_patterns: Vec<GuidancePattern>,
}

impl Catalog {
    /// All operations across all logged data, in document order
    pub fn operations(&self) -> impl Iterator<Item = &OperationData> {
        self.logged_data
            .iter()
            .flat_map(|logged| logged.operation_data.iter())
    }

    pub fn operation(&self, id: i32) -> Result<&OperationData> {
        self.operations()
            .find(|op| op.id == id)
            .ok_or_else(|| FieldVizError::ReaderError(format!("Operation data {} not found", id)))
    }

    pub fn field_boundary(&self, id: i32) -> Result<&FieldBoundary> {
        self.field_boundaries
            .iter()
            .find(|boundary| boundary.id == id)
            .ok_or_else(|| FieldVizError::ReaderError(format!("Field boundary {} not found", id)))
    }

    pub fn guidance_group(&self, id: i32) -> Result<&GuidanceGroup> {
        self.guidance_groups
            .iter()
            .find(|group| group.id == id)
            .ok_or_else(|| FieldVizError::ReaderError(format!("Guidance group {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog {
            logged_data: vec![
                LoggedData {
                    id: 1,
                    operation_data: vec![OperationData { id: 10, ..Default::default() }],
                    ..Default::default()
                },
                LoggedData {
                    id: 2,
                    operation_data: vec![
                        OperationData { id: 20, ..Default::default() },
                        OperationData { id: 21, ..Default::default() },
                    ],
                    ..Default::default()
                },
            ],
            field_boundaries: vec![FieldBoundary { id: 5, ..Default::default() }],
            ..Default::default()
        }
    }

    #[test]
    fn test_operations_flattened_in_order() {
        let ids: Vec<i32> = catalog().operations().map(|op| op.id).collect();
        assert_eq!(ids, vec![10, 20, 21]);
    }

    #[test]
    fn test_lookup_misses_are_reader_errors() {
        let catalog = catalog();
        assert!(catalog.operation(21).is_ok());
        assert!(catalog.field_boundary(5).is_ok());
        assert!(matches!(
            catalog.operation(99),
            Err(FieldVizError::ReaderError(_))
        ));
        assert!(matches!(
            catalog.guidance_group(1),
            Err(FieldVizError::ReaderError(_))
        ));
    }
}
