//! Polars export of tabulated meter data

use polars::prelude::{Column, DataFrame, PlSmallStr};
use std::collections::HashSet;

use super::Table;
use crate::{FieldVizError, Result};

impl Table {
    /// Convert to a DataFrame of string columns.
    ///
    /// Repeated headers get a `_2`, `_3`, ... suffix since DataFrame column
    /// names must be unique. A table without columns becomes an empty frame.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let names = unique_names(&self.columns);
        let columns: Vec<Column> = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let values: Vec<String> = self
                    .rows
                    .iter()
                    .map(|row| row.get(idx).cloned().unwrap_or_default())
                    .collect();
                Column::new(PlSmallStr::from(name.as_str()), values)
            })
            .collect();

        DataFrame::new(columns)
            .map_err(|e| FieldVizError::InternalError(format!("Failed to build DataFrame: {}", e)))
    }
}

/// Suffixes never reuse a header that appears elsewhere in the table
fn unique_names(headers: &[String]) -> Vec<String> {
    let reserved: HashSet<&str> = headers.iter().map(String::as_str).collect();
    let mut emitted: HashSet<String> = HashSet::new();
    headers
        .iter()
        .map(|header| {
            let name = if emitted.contains(header) {
                let mut n = 2;
                loop {
                    let candidate = format!("{}_{}", header, n);
                    if !reserved.contains(candidate.as_str()) && !emitted.contains(&candidate) {
                        break candidate;
                    }
                    n += 1;
                }
            } else {
                header.clone()
            };
            if name != *header {
                tracing::warn!(
                    column = %header,
                    renamed = %name,
                    "duplicate column header renamed"
                );
            }
            emitted.insert(name.clone());
            name
        })
        .collect()
}
