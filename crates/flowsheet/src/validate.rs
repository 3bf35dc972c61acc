//! Opt-in model checks.
//!
//! Compilation tolerates every anomaly listed here. [`validate`] reports them
//! so that callers who want a clean model can refuse one that is not.

use std::{collections::HashSet, fmt};

use log::debug;

use flowsheet_core::{
    identifier::EquipmentId,
    model::{Equipment, ProcessModel},
    symbol::EquipmentClass,
};

/// One anomaly found in a process model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The class has no symbol; a placeholder would be drawn.
    UnknownClass { id: EquipmentId, class: EquipmentClass },
    /// The id appeared earlier in the equipment list.
    DuplicateId { id: EquipmentId },
    /// A connection endpoint names no equipment.
    DanglingConnection { index: usize, missing: EquipmentId },
    /// A known class has no port with this name.
    UnknownPort {
        index: usize,
        id: EquipmentId,
        port: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownClass { id, class } => {
                write!(f, "equipment `{id}` has unknown class `{class}`")
            }
            Self::DuplicateId { id } => write!(f, "equipment id `{id}` is used more than once"),
            Self::DanglingConnection { index, missing } => {
                write!(f, "connection #{index} references missing equipment `{missing}`")
            }
            Self::UnknownPort { index, id, port } => {
                write!(f, "connection #{index} uses unknown port `{port}` on `{id}`")
            }
        }
    }
}

/// Every issue found, in model order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

/// Checks `model` for references that compilation would silently degrade.
///
/// # Examples
///
/// ```
/// # use flowsheet::{validate, model::{Equipment, PipeConnection, PlanPosition, ProcessModel}};
/// let model = ProcessModel::new()
///     .with_equipment(Equipment::new("p1", "pump", PlanPosition::new(0.0, 0.0)))
///     .with_connection(PipeConnection::new("p1", "outlet", "ghost", "inlet"));
///
/// let report = validate(&model);
/// assert_eq!(report.len(), 1);
/// ```
pub fn validate(model: &ProcessModel) -> ValidationReport {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for item in model.equipment() {
        if !seen.insert(item.id()) {
            issues.push(ValidationIssue::DuplicateId {
                id: item.id().clone(),
            });
            continue;
        }
        if !item.class().is_known() {
            issues.push(ValidationIssue::UnknownClass {
                id: item.id().clone(),
                class: item.class().clone(),
            });
        }
    }

    for (index, connection) in model.connections().iter().enumerate() {
        let endpoints = [
            (connection.from_id(), connection.from_port()),
            (connection.to_id(), connection.to_port()),
        ];
        for (id, port) in endpoints {
            match model.find(id.as_str()) {
                None => issues.push(ValidationIssue::DanglingConnection {
                    index,
                    missing: id.clone(),
                }),
                Some(equipment) if has_unknown_port(equipment, port) => {
                    issues.push(ValidationIssue::UnknownPort {
                        index,
                        id: id.clone(),
                        port: port.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    debug!(issues_count = issues.len(); "Model validated");
    ValidationReport { issues }
}

fn has_unknown_port(equipment: &Equipment, port: &str) -> bool {
    let class = equipment.class();
    class.is_known() && class.symbol().port(port).is_none()
}
