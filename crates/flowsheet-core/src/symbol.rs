//! The equipment symbol library.
//!
//! Every supported equipment class maps to a [`SymbolDefinition`]: a glyph
//! drawn in a local, unrotated frame centered on the origin, plus the named
//! [`PortAnchor`]s pipes attach to in that same frame.
//!
//! Classes form the closed [`EquipmentClass`] enumeration. Anything the
//! library does not know parses to [`EquipmentClass::Unknown`], which still
//! has a symbol: a bordered placeholder square without ports.
//!
//! ```
//! use flowsheet_core::symbol::EquipmentClass;
//!
//! let separator: EquipmentClass = "flash_drum".into();
//! assert_eq!(separator, EquipmentClass::Separator);
//! assert_eq!(separator.tag_prefix(), "D");
//! assert!(separator.symbol().port("vapor_out").is_some());
//!
//! let odd: EquipmentClass = "fluidized_bed".into();
//! assert_eq!(odd.tag_prefix(), "?");
//! assert!(odd.symbol().ports().is_empty());
//! ```

use std::{convert::Infallible, fmt, str::FromStr};

use serde::Deserialize;
use svg::node::element as svg_element;

use crate::{
    color::Color,
    draw::StrokeDefinition,
    geometry::{Point, Size},
};

/// Fills a shape with the glyph fill and outlines it with the glyph stroke.
macro_rules! filled {
    ($element:expr, $style:expr) => {
        $crate::apply_stroke!($element, $style.stroke()).set("fill", $style.fill().to_string())
    };
}

/// Outlines a shape without filling it.
macro_rules! hollow {
    ($element:expr, $style:expr) => {
        $crate::apply_stroke!($element, $style.stroke()).set("fill", "none")
    };
}

mod column;
mod exchanger;
mod flow;
mod instrument;
mod placeholder;
mod rotating;
mod valve;
mod vessel;

/// Side of the square every ordinary symbol is drawn within.
pub const NOMINAL_SYMBOL_SIZE: f32 = 60.0;

const HALF: f32 = NOMINAL_SYMBOL_SIZE / 2.0;

/// A named pipe attachment point in a symbol's local, unrotated frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortAnchor {
    name: &'static str,
    offset: Point,
}

impl PortAnchor {
    pub const fn new(name: &'static str, dx: f32, dz: f32) -> Self {
        Self {
            name,
            offset: Point::new(dx, dz),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn offset(&self) -> Point {
        self.offset
    }
}

/// The generic `inlet` / `outlet` pair at ± half the symbol width.
pub const TWO_PORT: [PortAnchor; 2] = [
    PortAnchor::new("inlet", -HALF, 0.0),
    PortAnchor::new("outlet", HALF, 0.0),
];

/// Stroke and fill a glyph is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphStyle {
    stroke: StrokeDefinition,
    fill: Color,
}

impl GlyphStyle {
    pub fn new(stroke: StrokeDefinition, fill: Color) -> Self {
        Self { stroke, fill }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn fill(&self) -> Color {
        self.fill
    }
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self::new(StrokeDefinition::solid(Color::default(), 2.0), Color::white())
    }
}

/// Drawing knowledge for one equipment class.
pub trait SymbolDefinition: fmt::Debug + Send + Sync {
    /// Prefix of the equipment tag, e.g. `P` for pumps.
    fn tag_prefix(&self) -> &'static str;

    /// Unrotated extent of the glyph, centered on the origin.
    fn footprint(&self) -> Size {
        Size::new(NOMINAL_SYMBOL_SIZE, NOMINAL_SYMBOL_SIZE)
    }

    fn ports(&self) -> &'static [PortAnchor] {
        &TWO_PORT
    }

    /// Looks up a port's local offset by name.
    fn port(&self, name: &str) -> Option<Point> {
        self.ports()
            .iter()
            .find(|anchor| anchor.name() == name)
            .map(PortAnchor::offset)
    }

    /// Draws the glyph centered on the local origin, unrotated.
    fn render_glyph(&self, style: &GlyphStyle) -> svg_element::Group;
}

/// A short pipe stub from the glyph body out to a port anchor.
fn lead(from: (f32, f32), to: (f32, f32), style: &GlyphStyle) -> svg_element::Line {
    let line = svg_element::Line::new()
        .set("x1", from.0)
        .set("y1", from.1)
        .set("x2", to.0)
        .set("y2", to.1);
    crate::apply_stroke!(line, style.stroke())
}

/// Supported equipment classes.
///
/// Deserializes from a free-form string key; unrecognized keys land in
/// [`EquipmentClass::Unknown`] instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum EquipmentClass {
    Pump,
    Compressor,
    Valve,
    ControlValve,
    Tank,
    Mixer,
    Splitter,
    Heater,
    Cooler,
    HeatExchanger,
    ShellTubeExchanger,
    Separator,
    ThreePhaseSeparator,
    Column,
    Reactor,
    PressureIndicator,
    TemperatureIndicator,
    FlowIndicator,
    /// A class the library has no symbol for; keeps the original key.
    Unknown(String),
}

impl EquipmentClass {
    /// Every class the library draws, in palette order.
    pub const KNOWN: [EquipmentClass; 18] = [
        Self::Pump,
        Self::Compressor,
        Self::Valve,
        Self::ControlValve,
        Self::Tank,
        Self::Mixer,
        Self::Splitter,
        Self::Heater,
        Self::Cooler,
        Self::HeatExchanger,
        Self::ShellTubeExchanger,
        Self::Separator,
        Self::ThreePhaseSeparator,
        Self::Column,
        Self::Reactor,
        Self::PressureIndicator,
        Self::TemperatureIndicator,
        Self::FlowIndicator,
    ];

    /// Parses a class key. Case, surrounding whitespace and `-`/space
    /// separators are ignored; a few common synonyms are accepted.
    pub fn from_key(key: &str) -> Self {
        let normalized = key.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "pump" | "centrifugal_pump" => Self::Pump,
            "compressor" => Self::Compressor,
            "valve" | "gate_valve" => Self::Valve,
            "control_valve" => Self::ControlValve,
            "tank" | "storage_tank" => Self::Tank,
            "mixer" => Self::Mixer,
            "splitter" | "tee" => Self::Splitter,
            "heater" | "fired_heater" => Self::Heater,
            "cooler" => Self::Cooler,
            "heat_exchanger" | "exchanger" => Self::HeatExchanger,
            "shell_tube_exchanger" | "shell_and_tube" | "shell_and_tube_exchanger" => {
                Self::ShellTubeExchanger
            }
            "separator" | "flash_drum" | "flash" => Self::Separator,
            "three_phase_separator" => Self::ThreePhaseSeparator,
            "column" | "distillation_column" | "tower" => Self::Column,
            "reactor" | "cstr" => Self::Reactor,
            "pressure_indicator" => Self::PressureIndicator,
            "temperature_indicator" => Self::TemperatureIndicator,
            "flow_indicator" => Self::FlowIndicator,
            _ => Self::Unknown(key.to_string()),
        }
    }

    /// Returns the canonical key (the original text for unknown classes).
    pub fn key(&self) -> &str {
        match self {
            Self::Pump => "pump",
            Self::Compressor => "compressor",
            Self::Valve => "valve",
            Self::ControlValve => "control_valve",
            Self::Tank => "tank",
            Self::Mixer => "mixer",
            Self::Splitter => "splitter",
            Self::Heater => "heater",
            Self::Cooler => "cooler",
            Self::HeatExchanger => "heat_exchanger",
            Self::ShellTubeExchanger => "shell_tube_exchanger",
            Self::Separator => "separator",
            Self::ThreePhaseSeparator => "three_phase_separator",
            Self::Column => "column",
            Self::Reactor => "reactor",
            Self::PressureIndicator => "pressure_indicator",
            Self::TemperatureIndicator => "temperature_indicator",
            Self::FlowIndicator => "flow_indicator",
            Self::Unknown(key) => key,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Returns the symbol used to draw this class.
    pub fn symbol(&self) -> &'static dyn SymbolDefinition {
        match self {
            Self::Pump => &rotating::Pump,
            Self::Compressor => &rotating::Compressor,
            Self::Valve => &valve::Valve,
            Self::ControlValve => &valve::ControlValve,
            Self::Tank => &vessel::Tank,
            Self::Mixer => &flow::Mixer,
            Self::Splitter => &flow::Splitter,
            Self::Heater => &exchanger::Heater,
            Self::Cooler => &exchanger::Cooler,
            Self::HeatExchanger => &exchanger::HeatExchanger,
            Self::ShellTubeExchanger => &exchanger::ShellTube,
            Self::Separator => &vessel::Separator,
            Self::ThreePhaseSeparator => &vessel::ThreePhaseSeparator,
            Self::Column => &column::Column,
            Self::Reactor => &vessel::Reactor,
            Self::PressureIndicator => &instrument::PRESSURE,
            Self::TemperatureIndicator => &instrument::TEMPERATURE,
            Self::FlowIndicator => &instrument::FLOW,
            Self::Unknown(_) => &placeholder::Placeholder,
        }
    }

    pub fn tag_prefix(&self) -> &'static str {
        self.symbol().tag_prefix()
    }
}

impl FromStr for EquipmentClass {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_key(s))
    }
}

impl From<&str> for EquipmentClass {
    fn from(key: &str) -> Self {
        Self::from_key(key)
    }
}

impl From<String> for EquipmentClass {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl fmt::Display for EquipmentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
