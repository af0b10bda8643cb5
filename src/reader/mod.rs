//! Data source abstraction layer for fieldviz
//!
//! The reader module provides the interface for loading an agricultural data
//! catalog (logged operations, field boundaries, guidance) into memory. The
//! rendering and tabulation pipeline only ever sees the resulting
//! [`Catalog`]; it never touches files itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldviz::reader::{JsonReader, Reader};
//! use fieldviz::table::build_table;
//!
//! let catalog = JsonReader::from_path("field.json").read_catalog()?;
//! let operation = catalog.operation(3)?;
//! let table = build_table(operation);
//! ```

use crate::model::Catalog;
use crate::Result;

pub mod json;

pub use json::JsonReader;

// ============================================================================
// Reader Trait
// ============================================================================

/// Trait for data catalog readers
///
/// Readers load the whole catalog eagerly: all data is resident in memory
/// before any rendering starts.
pub trait Reader {
    /// Load the catalog
    ///
    /// # Errors
    ///
    /// Returns `FieldVizError::ReaderError` if:
    /// - The source cannot be read
    /// - The content does not decode as a catalog
    fn read_catalog(&self) -> Result<Catalog>;

    /// Short description of the source, used in log messages
    fn source_name(&self) -> String;
}
