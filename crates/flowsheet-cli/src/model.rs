//! Process model loading.

use std::{fs, path::Path};

use log::debug;

use flowsheet::{FlowsheetError, model::ProcessModel};

/// Reads a TOML process model from `path`.
///
/// # Errors
///
/// Returns [`FlowsheetError::Io`] when the file cannot be read and
/// [`FlowsheetError::Model`] when it is not a valid model.
pub fn load_model(path: impl AsRef<Path>) -> Result<ProcessModel, FlowsheetError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;

    let model: ProcessModel = toml::from_str(&source)
        .map_err(|err| FlowsheetError::Model(format!("{}: {err}", path.display())))?;

    debug!(
        equipment_count = model.equipment().len(),
        connections_count = model.connections().len();
        "Model loaded"
    );
    Ok(model)
}
