//! Flowsheet - compiles process-plant models into schematic flow diagrams.
//!
//! A [`model::ProcessModel`] of placed equipment and pipe connections goes in;
//! a self-contained SVG document comes out. Equipment gets sequential tags,
//! ports are rotated with their symbols, pipes carry flow arrows, and a title
//! block is placed where it overlaps nothing.

pub mod config;
pub mod sink;

mod document;
mod error;
mod pipe;
mod schematic;
mod tags;
mod validate;

pub use flowsheet_core::{color, draw, geometry, identifier, model, symbol};

pub use error::FlowsheetError;
pub use pipe::{FlowArrow, PipeRoute, RouteKind, port_position};
pub use schematic::Schematic;
pub use tags::{Tag, TagAllocator, TagMap};
pub use validate::{ValidationIssue, ValidationReport, validate};

use chrono::{DateTime, Utc};
use log::{debug, info, trace};

use crate::{
    config::AppConfig, document::DocumentAssembler, geometry::CanvasTransform,
    model::ProcessModel,
};

/// Compiles process models into schematics.
///
/// The compiler holds only configuration. Every call allocates its own tags
/// and transform, so one compiler can serve many threads.
///
/// # Examples
///
/// ```rust
/// use flowsheet::{
///     SchematicCompiler,
///     model::{Equipment, PipeConnection, PlanPosition, ProcessModel},
/// };
///
/// let model = ProcessModel::new()
///     .with_equipment(Equipment::new("feed", "pump", PlanPosition::new(0.0, 0.0)))
///     .with_equipment(Equipment::new("store", "tank", PlanPosition::new(2.0, 0.0)))
///     .with_connection(PipeConnection::new("feed", "outlet", "store", "inlet"));
///
/// let schematic = SchematicCompiler::default()
///     .compile(&model)
///     .expect("valid configuration")
///     .expect("model is not empty");
///
/// assert!(schematic.as_str().contains("P-1"));
/// assert!(schematic.as_str().contains("T-1"));
/// ```
#[derive(Debug, Default)]
pub struct SchematicCompiler {
    config: AppConfig,
}

impl SchematicCompiler {
    /// Create a new compiler with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compile `model`, stamping the title block with the current time.
    ///
    /// Returns `Ok(None)` when the model has no equipment. Configuration is
    /// checked first, so an unusable configuration is an error even then.
    ///
    /// # Errors
    ///
    /// Returns [`FlowsheetError::Config`] for unusable configuration and
    /// [`FlowsheetError::Model`] for positions, rotations or sample points
    /// that are not finite or do not fit on an `f32` canvas.
    pub fn compile(&self, model: &ProcessModel) -> Result<Option<Schematic>, FlowsheetError> {
        self.compile_at(model, Utc::now())
    }

    /// Compile `model` with a fixed generation timestamp.
    ///
    /// Two calls with equal inputs produce byte-identical documents.
    ///
    /// # Errors
    ///
    /// See [`SchematicCompiler::compile`].
    pub fn compile_at(
        &self,
        model: &ProcessModel,
        generated_at: DateTime<Utc>,
    ) -> Result<Option<Schematic>, FlowsheetError> {
        self.config.validate()?;

        if model.is_empty() {
            info!("Nothing to draw, model has no equipment");
            return Ok(None);
        }

        info!(
            equipment_count = model.equipment().len(),
            connections_count = model.connections().len();
            "Compiling schematic"
        );

        check_finite(model)?;

        let canvas = self.config.canvas();
        let transform = CanvasTransform::from_positions(
            model.equipment().iter().map(|e| e.position().to_point()),
            canvas.scale(),
            canvas.margin(),
        )
        .ok_or_else(|| {
            FlowsheetError::Model("equipment positions are too far apart to draw".to_string())
        })?;
        check_canvas_fit(model, &transform)?;
        trace!(
            scale = transform.scale(),
            offset_x = transform.offset().x(),
            offset_y = transform.offset().y();
            "Canvas transform"
        );

        let tags = TagAllocator::allocate(model.equipment());
        debug!(tags_count = tags.len(); "Tags allocated");
        trace!(tags:? = tags; "Allocated tags");

        let assembler = DocumentAssembler::new(&self.config)?;
        let schematic = assembler.assemble(model, tags, &transform, generated_at);

        info!(
            bytes = schematic.as_str().len(),
            connections_drawn = schematic.connection_count(),
            skipped_connections = schematic.skipped_connections();
            "Schematic compiled"
        );
        Ok(Some(schematic))
    }
}

/// Rejects positions and rotations that cannot be drawn.
fn check_finite(model: &ProcessModel) -> Result<(), FlowsheetError> {
    for item in model.equipment() {
        let position = item.position();
        if !position.x().is_finite() || !position.z().is_finite() {
            return Err(FlowsheetError::Model(format!(
                "equipment `{}` has a non-finite position",
                item.id()
            )));
        }
        if !item.rotation().is_finite() {
            return Err(FlowsheetError::Model(format!(
                "equipment `{}` has a non-finite rotation",
                item.id()
            )));
        }
    }

    for (index, connection) in model.connections().iter().enumerate() {
        let finite = connection
            .sample_points()
            .iter()
            .all(|p| p.x().is_finite() && p.z().is_finite());
        if !finite {
            return Err(FlowsheetError::Model(format!(
                "connection #{index} has a non-finite sample point"
            )));
        }
    }

    Ok(())
}

/// Rejects sample points that overflow once scaled onto the canvas.
fn check_canvas_fit(
    model: &ProcessModel,
    transform: &CanvasTransform,
) -> Result<(), FlowsheetError> {
    for (index, connection) in model.connections().iter().enumerate() {
        let fits = connection
            .sample_points()
            .iter()
            .all(|p| transform.world_position(p.to_point()).is_finite());
        if !fits {
            return Err(FlowsheetError::Model(format!(
                "connection #{index} has a sample point too far away to draw"
            )));
        }
    }
    Ok(())
}
