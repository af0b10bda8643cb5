//! Meter tabulation
//!
//! Turns an operation's sensor stream into a table: one column per meter
//! (header = representation code), one row per spatial record.
//!
//! # Column order
//!
//! Sections are visited depth by depth (`0..max_depth`), and within a section
//! meters keep their declared order. Meters without a representation are
//! dropped before columns are built.
//!
//! # Cells
//!
//! - numeric meter → `"<quantity> <uom>"`, e.g. `"12.5 km/h"`
//! - enumerated meter → the enumeration code
//! - missing or mismatched value → `""`
//! - unsupported meter kind → `""` plus an `UnsupportedMeterKind` warning

mod dataframe;

use crate::model::{Meter, MeterKind, OperationSource, RepresentationValue, SpatialRecord};
use crate::{FieldVizError, Result};

/// Table sink
pub trait TableSink {
    fn clear_table(&mut self);

    fn set_columns(&mut self, headers: &[String]);

    fn append_row(&mut self, values: &[String]);
}

/// In-memory table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Cell by row index and column header (first matching header)
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }
}

impl TableSink for Table {
    fn clear_table(&mut self) {
        self.columns.clear();
        self.rows.clear();
    }

    fn set_columns(&mut self, headers: &[String]) {
        self.columns = headers.to_vec();
    }

    fn append_row(&mut self, values: &[String]) {
        self.rows.push(values.to_vec());
    }
}

/// Meters that get a column, in column order
pub fn collect_meters(operation: &dyn OperationSource) -> Vec<&Meter> {
    (0..operation.max_depth())
        .flat_map(|depth| operation.sections(depth))
        .flat_map(|section| section.meters())
        .filter(|meter| meter.representation.is_some())
        .collect()
}

/// Format one cell.
///
/// Errors only with `UnsupportedMeterKind`; callers treat that as a blank cell.
pub fn format_cell(record: &SpatialRecord, meter: &Meter) -> Result<String> {
    let value = record.meter_value(meter);
    match meter.kind {
        MeterKind::Numeric => Ok(match value {
            Some(RepresentationValue::Numeric { quantity, uom }) => format_numeric(*quantity, uom),
            _ => String::new(),
        }),
        MeterKind::Enumerated => Ok(match value {
            Some(RepresentationValue::Enumerated { code }) => code.clone(),
            _ => String::new(),
        }),
        MeterKind::Unsupported => Err(FieldVizError::UnsupportedMeterKind {
            meter_id: meter.id,
            column: header(meter).to_string(),
        }),
    }
}

fn format_numeric(quantity: f64, uom: &str) -> String {
    format!("{} {}", format_quantity(quantity), uom)
}

/// Locale-independent shortest round-trip digits. Magnitudes outside
/// [1e-5, 1e15) use exponent form with a signed two-digit exponent
/// (`1E+21`, `1.5E-07`); integral values print without a fraction.
fn format_quantity(quantity: f64) -> String {
    if quantity.is_nan() {
        return "NaN".to_string();
    }
    if quantity.is_infinite() {
        let text = if quantity > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }

    let scientific = format!("{:e}", quantity);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return quantity.to_string();
    };
    match exponent.parse::<i32>() {
        Ok(exp) if !(-4..15).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}E{}{:02}", mantissa, sign, exp.abs())
        }
        _ => quantity.to_string(),
    }
}

fn header(meter: &Meter) -> &str {
    meter
        .representation
        .as_ref()
        .map(|r| r.code.as_str())
        .unwrap_or_default()
}

/// Stream the operation into a table sink.
///
/// Returns one `UnsupportedMeterKind` warning per affected column; the table
/// itself is always complete.
pub fn tabulate<S: TableSink + ?Sized>(
    operation: &dyn OperationSource,
    sink: &mut S,
) -> Vec<FieldVizError> {
    let meters = collect_meters(operation);
    let headers: Vec<String> = meters.iter().map(|m| header(m).to_string()).collect();

    sink.clear_table();
    sink.set_columns(&headers);

    let warnings: Vec<FieldVizError> = meters
        .iter()
        .filter(|meter| meter.kind == MeterKind::Unsupported)
        .map(|meter| {
            tracing::warn!(meter = meter.id, column = header(meter), "unsupported meter kind");
            FieldVizError::UnsupportedMeterKind {
                meter_id: meter.id,
                column: header(meter).to_string(),
            }
        })
        .collect();

    let mut rows = 0usize;
    for record in operation.spatial_records() {
        let row: Vec<String> = meters
            .iter()
            .map(|meter| format_cell(record, meter).unwrap_or_default())
            .collect();
        sink.append_row(&row);
        rows += 1;
    }

    tracing::debug!(columns = headers.len(), rows, "tabulated operation");
    warnings
}

/// Build a table for the operation, discarding warnings
pub fn build_table(operation: &dyn OperationSource) -> Table {
    let mut table = Table::default();
    tabulate(operation, &mut table);
    table
}
