//! One drawn group per equipment instance.

use svg::node::element as svg_element;

use flowsheet_core::{
    draw::{Drawable, Text},
    geometry::{Bounds, CanvasTransform, Point, rotate_local_offset, svg_rotation_degrees},
    model::Equipment,
};

use super::Theme;
use crate::tags::Tag;

/// Space between the symbol body and its labels.
const LABEL_GAP: f32 = 6.0;
const PORT_RADIUS: f32 = 3.0;

/// A rendered equipment group and the diagram area it occupies.
#[derive(Debug)]
pub struct RenderedEquipment {
    pub group: svg_element::Group,
    pub bounds: Bounds,
}

/// Draws equipment: the rotated glyph, port markers, the tag above and the
/// display name plus parameter lines below.
#[derive(Debug)]
pub struct EquipmentFragment<'a> {
    equipment: &'a Equipment,
    tag: Option<Tag>,
    index: usize,
}

impl<'a> EquipmentFragment<'a> {
    pub fn new(equipment: &'a Equipment, tag: Option<Tag>, index: usize) -> Self {
        Self {
            equipment,
            tag,
            index,
        }
    }

    /// Axis-aligned bounds of the rotated symbol footprint at `center`.
    fn body_bounds(&self, center: Point) -> Bounds {
        let footprint = self.equipment.class().symbol().footprint();
        let (hw, hh) = (footprint.width() / 2.0, footprint.height() / 2.0);
        let corners = [
            Point::new(-hw, -hh),
            Point::new(hw, -hh),
            Point::new(hw, hh),
            Point::new(-hw, hh),
        ]
        .map(|corner| center.add_point(rotate_local_offset(corner, self.equipment.rotation())));

        Bounds::from_points(corners).unwrap_or_else(|| center.to_bounds(footprint))
    }

    /// Display name first, then parameters in insertion order.
    fn lower_lines(&self) -> Vec<String> {
        self.equipment
            .display_name()
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .into_iter()
            .chain(
                self.equipment
                    .parameters()
                    .values()
                    .map(|parameter| parameter.display_line()),
            )
            .collect()
    }

    pub fn render(&self, theme: &Theme, transform: &CanvasTransform) -> RenderedEquipment {
        let equipment = self.equipment;
        let symbol = equipment.class().symbol();
        let plan = equipment.position().to_point();
        let center = transform.world_position(plan);
        let body = self.body_bounds(center);
        let mut bounds = body;

        let glyph = symbol.render_glyph(theme.glyph()).set(
            "transform",
            format!(
                "translate({} {}) rotate({})",
                center.x(),
                center.y(),
                svg_rotation_degrees(equipment.rotation())
            ),
        );

        let mut group = svg_element::Group::new()
            .set("class", "equipment")
            .set("data-index", self.index)
            .set("data-class", equipment.class().key())
            .add(glyph);

        for anchor in symbol.ports() {
            let at = transform.anchor_position(plan, equipment.rotation(), anchor.offset());
            let marker = svg_element::Circle::new()
                .set("class", "port")
                .set("cx", at.x())
                .set("cy", at.y())
                .set("r", PORT_RADIUS)
                .set("fill", theme.port_fill().to_string());
            group = group.add(flowsheet_core::apply_stroke!(marker, theme.port_stroke()));
        }

        if let Some(tag) = self.tag {
            let text = Text::new(theme.tag_text(), &tag.to_string());
            let line_height = theme.tag_text().line_height();
            let at = Point::new(center.x(), body.min_y() - LABEL_GAP - line_height / 2.0);
            bounds = bounds.merge(&text.bounds_at(at));
            group = group.add(text.render_to_svg(at));
        }

        let line_height = theme.label_text().line_height();
        for (i, line) in self.lower_lines().iter().enumerate() {
            let text = Text::new(theme.label_text(), line);
            let at = Point::new(
                center.x(),
                body.max_y() + LABEL_GAP + line_height * (i as f32 + 0.5),
            );
            bounds = bounds.merge(&text.bounds_at(at));
            group = group.add(text.render_to_svg(at));
        }

        RenderedEquipment { group, bounds }
    }
}
