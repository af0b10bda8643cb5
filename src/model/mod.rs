//! Agricultural data model consumed by the visualizer
//!
//! These types are a read-only data source: nothing in the rendering or
//! tabulation pipeline mutates them.
//!
//! - `shapes` - points, line strings, rings and polygons
//! - `logged` - logged data, operations, sections, meters and spatial records
//! - `guidance` - guidance patterns and groups
//! - `boundary` - field boundaries
//! - `catalog` - the top-level document tying them together

pub mod boundary;
pub mod catalog;
pub mod guidance;
pub mod logged;
pub mod shapes;

pub use boundary::*;
pub use catalog::*;
pub use guidance::*;
pub use logged::*;
pub use shapes::*;
