//! The process model consumed by the schematic compiler.
//!
//! A [`ProcessModel`] is an ordered snapshot of placed [`Equipment`] and the
//! [`PipeConnection`]s between their ports. Models are built in code through
//! the builder methods or deserialized from TOML:
//!
//! ```
//! # use flowsheet_core::model::ProcessModel;
//! let model: ProcessModel = toml::from_str(r#"
//!     [[equipment]]
//!     id = "feed-pump"
//!     class = "pump"
//!     position = { x = 0.0, z = 0.0 }
//!
//!     [[equipment]]
//!     id = "buffer"
//!     class = "tank"
//!     position = { x = 2.0, z = 0.0 }
//!
//!     [[connections]]
//!     from_id = "feed-pump"
//!     to_id = "buffer"
//! "#).unwrap();
//!
//! assert_eq!(model.equipment().len(), 2);
//! assert_eq!(model.connections()[0].from_port(), "outlet");
//! ```
//!
//! Iteration order is significant: it drives tag numbering.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{geometry::Point, identifier::EquipmentId, symbol::EquipmentClass};

/// A position on the plant plan, in model units.
///
/// The plan `z` axis maps to the diagram's downward `y` axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct PlanPosition {
    x: f32,
    z: f32,
}

impl PlanPosition {
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn z(self) -> f32 {
        self.z
    }

    /// Returns the position as a geometry point (`z` becomes `y`).
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.z)
    }
}

/// The value half of an equipment parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0".
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// A labelled process parameter shown beneath an equipment symbol.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    label: String,
    value: ParameterValue,
    #[serde(default)]
    unit: Option<String>,
}

impl Parameter {
    pub fn new(label: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &ParameterValue {
        &self.value
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Formats the parameter as one display line: `label: value unit`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use flowsheet_core::model::Parameter;
    /// let flow = Parameter::new("Flow", 12.5).with_unit("m3/h");
    /// assert_eq!(flow.display_line(), "Flow: 12.5 m3/h");
    ///
    /// let duty = Parameter::new("Service", "standby");
    /// assert_eq!(duty.display_line(), "Service: standby");
    /// ```
    pub fn display_line(&self) -> String {
        match self.unit() {
            Some(unit) if !unit.is_empty() => format!("{}: {} {}", self.label, self.value, unit),
            _ => format!("{}: {}", self.label, self.value),
        }
    }
}

/// One placed piece of equipment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Equipment {
    id: EquipmentId,
    class: EquipmentClass,
    position: PlanPosition,
    /// Degrees, clockwise-positive.
    #[serde(default)]
    rotation: f32,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    parameters: IndexMap<String, Parameter>,
}

impl Equipment {
    pub fn new(
        id: impl Into<EquipmentId>,
        class: impl Into<EquipmentClass>,
        position: PlanPosition,
    ) -> Self {
        Self {
            id: id.into(),
            class: class.into(),
            position,
            rotation: 0.0,
            display_name: None,
            parameters: IndexMap::new(),
        }
    }

    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Appends a parameter; re-using a key replaces the value in place.
    pub fn with_parameter(mut self, key: impl Into<String>, parameter: Parameter) -> Self {
        self.parameters.insert(key.into(), parameter);
        self
    }

    pub fn id(&self) -> &EquipmentId {
        &self.id
    }

    pub fn class(&self) -> &EquipmentClass {
        &self.class
    }

    pub fn position(&self) -> PlanPosition {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn parameters(&self) -> &IndexMap<String, Parameter> {
        &self.parameters
    }
}

fn default_from_port() -> String {
    "outlet".to_string()
}

fn default_to_port() -> String {
    "inlet".to_string()
}

/// A pipe from one equipment port to another.
///
/// Ports default to `outlet` → `inlet` when omitted from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PipeConnection {
    from_id: EquipmentId,
    #[serde(default = "default_from_port")]
    from_port: String,
    to_id: EquipmentId,
    #[serde(default = "default_to_port")]
    to_port: String,
    #[serde(default)]
    sample_points: Vec<PlanPosition>,
}

impl PipeConnection {
    pub fn new(
        from_id: impl Into<EquipmentId>,
        from_port: impl Into<String>,
        to_id: impl Into<EquipmentId>,
        to_port: impl Into<String>,
    ) -> Self {
        Self {
            from_id: from_id.into(),
            from_port: from_port.into(),
            to_id: to_id.into(),
            to_port: to_port.into(),
            sample_points: Vec::new(),
        }
    }

    /// Supplies an upstream-routed polyline, in model units.
    pub fn with_sample_points(mut self, points: Vec<PlanPosition>) -> Self {
        self.sample_points = points;
        self
    }

    pub fn from_id(&self) -> &EquipmentId {
        &self.from_id
    }

    pub fn from_port(&self) -> &str {
        &self.from_port
    }

    pub fn to_id(&self) -> &EquipmentId {
        &self.to_id
    }

    pub fn to_port(&self) -> &str {
        &self.to_port
    }

    pub fn sample_points(&self) -> &[PlanPosition] {
        &self.sample_points
    }
}

/// An ordered snapshot of equipment and connections.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProcessModel {
    equipment: Vec<Equipment>,
    connections: Vec<PipeConnection>,
}

impl ProcessModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment.push(equipment);
        self
    }

    pub fn with_connection(mut self, connection: PipeConnection) -> Self {
        self.connections.push(connection);
        self
    }

    pub fn add_equipment(&mut self, equipment: Equipment) {
        self.equipment.push(equipment);
    }

    pub fn add_connection(&mut self, connection: PipeConnection) {
        self.connections.push(connection);
    }

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn connections(&self) -> &[PipeConnection] {
        &self.connections
    }

    /// Returns true when there is no equipment to draw.
    pub fn is_empty(&self) -> bool {
        self.equipment.is_empty()
    }

    /// Finds the first equipment instance carrying `id`.
    pub fn find(&self, id: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_value_display() {
        assert_eq!(ParameterValue::Number(3.0).to_string(), "3");
        assert_eq!(ParameterValue::Number(-0.25).to_string(), "-0.25");
        assert_eq!(ParameterValue::Text("open".into()).to_string(), "open");
    }

    #[test]
    fn test_parameter_empty_unit_is_omitted() {
        let p = Parameter::new("Level", 40.0).with_unit("");
        assert_eq!(p.display_line(), "Level: 40");
    }

    #[test]
    fn test_equipment_builder() {
        let pump = Equipment::new("p1", "pump", PlanPosition::new(1.0, 2.0))
            .with_rotation(90.0)
            .with_display_name("Feed pump")
            .with_parameter("flow", Parameter::new("Flow", 10.0))
            .with_parameter("head", Parameter::new("Head", 35.0).with_unit("m"));

        assert_eq!(pump.id(), "p1");
        assert_eq!(*pump.class(), EquipmentClass::Pump);
        assert_eq!(pump.position().to_point(), Point::new(1.0, 2.0));
        assert_eq!(pump.rotation(), 90.0);
        assert_eq!(pump.display_name(), Some("Feed pump"));

        let keys: Vec<_> = pump.parameters().keys().map(String::as_str).collect();
        assert_eq!(keys, ["flow", "head"]);
    }

    #[test]
    fn test_model_find_and_empty() {
        let mut model = ProcessModel::new();
        assert!(model.is_empty());

        model.add_equipment(Equipment::new("t1", "tank", PlanPosition::default()));
        assert!(!model.is_empty());
        assert!(model.find("t1").is_some());
        assert!(model.find("missing").is_none());
    }

    #[test]
    fn test_deserialize_full_model() {
        let model: ProcessModel = toml::from_str(
            r#"
            [[equipment]]
            id = "hx"
            class = "shell_tube_exchanger"
            position = { x = 3.0, z = -1.5 }
            rotation = 45
            display_name = "Feed/effluent"

            [equipment.parameters.duty]
            label = "Duty"
            value = 1.2
            unit = "MW"

            [equipment.parameters.service]
            label = "Service"
            value = "preheat"

            [[equipment]]
            id = "mystery"
            class = "fluidized_bed"
            position = { x = 0.0, z = 0.0 }

            [[connections]]
            from_id = "hx"
            from_port = "tube_out"
            to_id = "mystery"
            to_port = "inlet"
            sample_points = [{ x = 3.0, z = -1.5 }, { x = 0.0, z = 0.0 }]
            "#,
        )
        .unwrap();

        let hx = &model.equipment()[0];
        assert_eq!(*hx.class(), EquipmentClass::ShellTubeExchanger);
        assert_eq!(hx.rotation(), 45.0);
        assert_eq!(hx.parameters()["duty"].display_line(), "Duty: 1.2 MW");
        assert_eq!(
            hx.parameters()["service"].value(),
            &ParameterValue::Text("preheat".into())
        );

        assert_eq!(
            *model.equipment()[1].class(),
            EquipmentClass::Unknown("fluidized_bed".into())
        );

        let connection = &model.connections()[0];
        assert_eq!(connection.from_port(), "tube_out");
        assert_eq!(connection.sample_points().len(), 2);
    }

    #[test]
    fn test_deserialize_empty_model() {
        let model: ProcessModel = toml::from_str("").unwrap();
        assert!(model.is_empty());
        assert!(model.connections().is_empty());
    }
}
