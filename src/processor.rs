//! Visualizer: the public entry points
//!
//! A [`Visualizer`] owns a drawing canvas and a table sink and exposes one
//! method per kind of domain object. Each call runs to completion before it
//! returns; nothing is carried over from one call to the next apart from
//! what the sinks show.

use crate::config::Config;
use crate::model::{FieldBoundary, GuidanceGroup, GuidancePattern, OperationSource};
use crate::render::{render_boundary, render_guidance_group, Canvas, Pen, Pipeline};
use crate::table::{tabulate, TableSink};
use crate::{FieldVizError, Result};

#[derive(Debug)]
pub struct Visualizer<C: Canvas, T: TableSink> {
    canvas: C,
    table: T,
    pipeline: Pipeline,
    pen: Pen,
}

impl<C: Canvas, T: TableSink> Visualizer<C, T> {
    pub fn new(config: &Config, canvas: C, table: T) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            canvas,
            table,
            pipeline: config.pipeline()?,
            pen: config.pen()?,
        })
    }

    /// Tabulate an operation into the table sink.
    ///
    /// Never fails; unsupported meter kinds come back as warnings.
    pub fn process_operation_data(
        &mut self,
        operation: &dyn OperationSource,
    ) -> Vec<FieldVizError> {
        tracing::info!("Processing operation data");
        tabulate(operation, &mut self.table)
    }

    /// Draw the boundary's polygons
    pub fn process_boundary(&mut self, boundary: &FieldBoundary) -> Result<()> {
        render_boundary(boundary, &self.pipeline, &mut self.canvas, self.pen)
    }

    /// Draw every pattern of the group, resolving ids against `patterns`
    pub fn process_guidance(
        &mut self,
        group: &GuidanceGroup,
        patterns: &[GuidancePattern],
    ) -> Result<()> {
        render_guidance_group(group, patterns, &self.pipeline, &mut self.canvas, self.pen)
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn into_parts(self) -> (C, T) {
        (self.canvas, self.table)
    }
}
