//! SVG document assembly.
//!
//! The assembler walks a model once and emits, in fixed order: the XML
//! declaration, the root `<svg>`, one `<defs>` block, the background, the
//! border, then layered groups for equipment, piping and the title block.

pub(crate) mod equipment;
pub(crate) mod markers;
pub(crate) mod title_block;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::{debug, trace, warn};
use svg::{Document, node::element as svg_element};

use flowsheet_core::{
    apply_stroke,
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeCap, StrokeDefinition, StrokeJoin, TextAnchor, TextDefinition},
    geometry::{Bounds, CanvasTransform},
    identifier::EquipmentId,
    model::{Equipment, ProcessModel},
    symbol::GlyphStyle,
};

use crate::{
    FlowsheetError, Schematic,
    config::AppConfig,
    pipe::PipeRoute,
    tags::TagMap,
};
use equipment::EquipmentFragment;
use title_block::TitleBlock;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Resolved colors, strokes and fonts for one document.
#[derive(Debug, Clone)]
pub(crate) struct Theme {
    background: Color,
    glyph: GlyphStyle,
    border: StrokeDefinition,
    pipe: StrokeDefinition,
    port_stroke: StrokeDefinition,
    tag_text: TextDefinition,
    label_text: TextDefinition,
    title_text: TextDefinition,
    info_text: TextDefinition,
}

impl Theme {
    pub fn from_config(config: &AppConfig) -> Result<Self, FlowsheetError> {
        let style = config.style();
        let background = style.background_color().map_err(FlowsheetError::Config)?;
        let line = style.line_color().map_err(FlowsheetError::Config)?;
        let pipe_color = style.pipe_color().map_err(FlowsheetError::Config)?;

        let outline = StrokeDefinition::solid(line, style.line_width());
        let font_family = style.font_family();
        let font_size = style.font_size();
        let label_text = TextDefinition::new(font_family, font_size).with_color(line);

        Ok(Self {
            background,
            glyph: GlyphStyle::new(outline.clone(), background),
            border: outline.clone().with_width(1.0),
            pipe: StrokeDefinition::solid(pipe_color, style.pipe_width())
                .with_cap(StrokeCap::Round)
                .with_join(StrokeJoin::Round),
            port_stroke: StrokeDefinition::solid(pipe_color, 1.0),
            tag_text: label_text.clone().with_bold(true),
            title_text: label_text
                .clone()
                .with_anchor(TextAnchor::Start)
                .with_bold(true)
                .with_font_size(font_size.saturating_add(2)),
            info_text: label_text
                .clone()
                .with_anchor(TextAnchor::Start)
                .with_font_size(font_size.saturating_sub(1).max(1)),
            label_text,
        })
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn glyph(&self) -> &GlyphStyle {
        &self.glyph
    }

    pub fn border(&self) -> &StrokeDefinition {
        &self.border
    }

    pub fn pipe(&self) -> &StrokeDefinition {
        &self.pipe
    }

    pub fn port_stroke(&self) -> &StrokeDefinition {
        &self.port_stroke
    }

    pub fn port_fill(&self) -> Color {
        self.background
    }

    pub fn tag_text(&self) -> &TextDefinition {
        &self.tag_text
    }

    pub fn label_text(&self) -> &TextDefinition {
        &self.label_text
    }

    pub fn title_text(&self) -> &TextDefinition {
        &self.title_text
    }

    pub fn info_text(&self) -> &TextDefinition {
        &self.info_text
    }
}

/// Builds the final document for one generation call.
#[derive(Debug)]
pub(crate) struct DocumentAssembler<'a> {
    config: &'a AppConfig,
    theme: Theme,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(config: &'a AppConfig) -> Result<Self, FlowsheetError> {
        Ok(Self {
            config,
            theme: Theme::from_config(config)?,
        })
    }

    pub fn assemble(
        &self,
        model: &ProcessModel,
        tags: TagMap,
        transform: &CanvasTransform,
        generated_at: DateTime<Utc>,
    ) -> Schematic {
        let mut output = LayeredOutput::new();
        let mut obstacles: Vec<Bounds> = Vec::new();

        // First occurrence wins, matching tag allocation.
        let mut by_id: HashMap<&EquipmentId, &Equipment> = HashMap::new();
        for (index, item) in model.equipment().iter().enumerate() {
            let first = !by_id.contains_key(item.id());
            by_id.entry(item.id()).or_insert(item);

            if !item.class().is_known() {
                warn!(id:% = item.id(), class:% = item.class(); "Unknown equipment class, drawing placeholder");
            }

            let tag = if first { tags.get(item.id().as_str()) } else { None };
            let rendered = EquipmentFragment::new(item, tag, index).render(&self.theme, transform);
            trace!(id:% = item.id(), index = index; "Equipment rendered");

            obstacles.push(rendered.bounds);
            output.add_to_layer(RenderLayer::Equipment, Box::new(rendered.group));
        }

        let mut connections_drawn = 0;
        let mut skipped_connections = 0;
        let pipe_half_width = self.theme.pipe().width() / 2.0;
        for (index, connection) in model.connections().iter().enumerate() {
            let endpoints = (
                by_id.get(connection.from_id()),
                by_id.get(connection.to_id()),
            );
            let (Some(from), Some(to)) = endpoints else {
                warn!(
                    index = index,
                    from_id:% = connection.from_id(),
                    to_id:% = connection.to_id();
                    "Connection references missing equipment, skipping"
                );
                skipped_connections += 1;
                continue;
            };

            let route = PipeRoute::resolve(connection, from, to, transform);
            trace!(index = index, kind:? = route.kind(), points = route.points().len(); "Pipe routed");

            obstacles.extend(route.segment_bounds(pipe_half_width));
            output.add_to_layer(
                RenderLayer::Piping,
                Box::new(route.render(self.theme.pipe())),
            );
            connections_drawn += 1;
        }
        debug!(
            connections_drawn = connections_drawn,
            skipped_connections = skipped_connections;
            "Pipes rendered"
        );

        let canvas = self.config.canvas();
        let placement = title_block::place(transform.canvas_size(), canvas.border_inset(), &obstacles);
        let block_bounds = placement.bounds();
        debug!(
            canvas_width = placement.canvas.width(),
            canvas_height = placement.canvas.height(),
            title_x = block_bounds.min_x(),
            title_y = block_bounds.min_y();
            "Title block placed"
        );

        let block = TitleBlock::new(
            self.config.title_block().title(),
            generated_at,
            model.equipment().len(),
            connections_drawn,
        );
        output.add_to_layer(
            RenderLayer::TitleBlock,
            Box::new(block.render(placement.top_left, &self.theme)),
        );

        let (width, height) = (placement.canvas.width(), placement.canvas.height());
        let inset = canvas.border_inset();

        let background = svg_element::Rectangle::new()
            .set("class", "background")
            .set("x", 0)
            .set("y", 0)
            .set("width", width)
            .set("height", height)
            .set("fill", self.theme.background().to_string());
        let border = svg_element::Rectangle::new()
            .set("class", "border")
            .set("x", inset)
            .set("y", inset)
            .set("width", (width - 2.0 * inset).max(0.0))
            .set("height", (height - 2.0 * inset).max(0.0))
            .set("fill", "none");

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .add(markers::definitions(self.theme.pipe().color()))
            .add(background)
            .add(apply_stroke!(border, self.theme.border()));

        for node in output.render() {
            document = document.add(node);
        }

        Schematic::new(
            format!("{XML_DECLARATION}\n{document}\n"),
            placement.canvas,
            model.equipment().len(),
            connections_drawn,
            skipped_connections,
            tags,
        )
    }
}
