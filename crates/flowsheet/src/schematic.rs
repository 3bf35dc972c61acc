//! The finished output of one compilation.

use log::debug;

use flowsheet_core::geometry::Size;

use crate::{
    sink::{ExportError, ExportSink},
    tags::TagMap,
};

/// A complete SVG document plus facts about what went into it.
#[derive(Debug, Clone)]
pub struct Schematic {
    document: String,
    canvas_size: Size,
    equipment_count: usize,
    connection_count: usize,
    skipped_connections: usize,
    tags: TagMap,
}

impl Schematic {
    pub(crate) fn new(
        document: String,
        canvas_size: Size,
        equipment_count: usize,
        connection_count: usize,
        skipped_connections: usize,
        tags: TagMap,
    ) -> Self {
        Self {
            document,
            canvas_size,
            equipment_count,
            connection_count,
            skipped_connections,
            tags,
        }
    }

    /// The SVG text, starting with the XML declaration.
    pub fn as_str(&self) -> &str {
        &self.document
    }

    pub fn into_string(self) -> String {
        self.document
    }

    /// Final canvas size, including any growth for the title block.
    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    pub fn equipment_count(&self) -> usize {
        self.equipment_count
    }

    /// Number of connections actually drawn.
    pub fn connection_count(&self) -> usize {
        self.connection_count
    }

    /// Connections left out because an endpoint id was missing.
    pub fn skipped_connections(&self) -> usize {
        self.skipped_connections
    }

    pub fn tags(&self) -> &TagMap {
        &self.tags
    }

    /// Hands the document to `sink`.
    ///
    /// # Errors
    ///
    /// Returns whatever the sink reports.
    pub fn export_to(&self, sink: &mut dyn ExportSink, hint: Option<&str>) -> Result<(), ExportError> {
        debug!(bytes = self.document.len(), hint:? = hint; "Exporting schematic");
        sink.export(&self.document, hint)
    }
}
