/*!
# fieldviz - plan views and meter tables for field-operation data

fieldviz takes agricultural field-operation records (spatial measurement
streams, field boundaries and guidance patterns) and renders them for human
inspection: a table of per-location meter readings and a 2-D plan view of
boundaries and guidance lines.

## Pipeline

Every shape goes through the same three steps:

1. [`geo::projection`] projects geographic points to planar UTM meters
2. [`geo::viewport`] fits the planar points of that shape into the canvas
3. [`render`] emits polylines/polygons into a [`render::Canvas`] sink

Operation data is tabulated separately by [`table`], one column per meter and
one row per spatial record.

## Example

```rust,ignore
use fieldviz::{Config, Visualizer};
use fieldviz::reader::{JsonReader, Reader};
use fieldviz::render::RecordingCanvas;
use fieldviz::table::Table;

let catalog = JsonReader::from_path("field.json").read_catalog()?;
let mut viz = Visualizer::new(&Config::default(), RecordingCanvas::new(), Table::default())?;
viz.process_boundary(&catalog.field_boundaries[0])?;
```
*/

pub mod config;
pub mod geo;
pub mod model;
pub mod processor;
pub mod reader;
pub mod render;
pub mod table;

pub use config::Config;
pub use geo::{Extent, GeoPoint, PixelPoint, PlanarPoint, ScaleFit, ScaleRule, Viewport};
pub use processor::Visualizer;

use thiserror::Error;

/// Crate version, used by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main library error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldVizError {
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Degenerate viewport: {0}")]
    DegenerateViewport(String),

    #[error("Guidance pattern {0} not found")]
    PatternNotFound(i32),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Unsupported meter kind for meter {meter_id} (column '{column}')")]
    UnsupportedMeterKind { meter_id: i32, column: String },

    #[error("Reader error: {0}")]
    ReaderError(String),

    #[error("Writer error: {0}")]
    WriterError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type Result<T> = std::result::Result<T, FieldVizError>;
