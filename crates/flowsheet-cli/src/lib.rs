//! CLI logic for the Flowsheet schematic compiler.
//!
//! This module contains the core CLI logic: load configuration and the
//! process model, optionally validate it, compile and export the SVG.

pub mod error_adapter;

mod args;
mod config;
mod model;

pub use args::{Args, STDOUT_OUTPUT};
pub use config::{ConfigError, load_config};
pub use model::load_model;

use std::{io, path::Path};

use log::{info, warn};

use flowsheet::{
    FlowsheetError, SchematicCompiler,
    sink::{FileSink, WriterSink},
    validate,
};

/// Run the Flowsheet CLI application
///
/// This function reads the input model, compiles it and writes the resulting
/// SVG to the output file, directory or standard output.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `FlowsheetError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Model parsing errors
/// - Validation failures in strict mode
/// - Export errors
pub fn run(args: &Args) -> Result<(), FlowsheetError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing model"
    );

    let mut app_config = load_config(args.config.as_ref())?;
    if let Some(title) = &args.title {
        app_config = app_config.with_title(title.as_str());
    }

    let model = load_model(&args.input)?;

    let report = validate(&model);
    if !report.is_empty() {
        if args.strict {
            return Err(FlowsheetError::Validation(report));
        }
        for issue in report.issues() {
            warn!(issue:% = issue; "Model issue");
        }
    }

    let compiler = SchematicCompiler::new(app_config);
    let Some(schematic) = compiler.compile(&model)? else {
        info!(input_path = args.input; "Nothing to draw, no file written");
        return Ok(());
    };

    let hint = output_hint(&args.input);
    if args.writes_to_stdout() {
        let mut sink = WriterSink::new(io::stdout().lock());
        schematic.export_to(&mut sink, hint.as_deref())?;
    } else {
        let mut sink = FileSink::new(&args.output);
        schematic.export_to(&mut sink, hint.as_deref())?;
        if let Some(path) = sink.last_written() {
            info!(output_file:? = path; "SVG exported successfully");
        }
    }

    Ok(())
}

/// `<input stem>.svg`, used when the output is a directory.
fn output_hint(input: &str) -> Option<String> {
    Path::new(input)
        .file_stem()
        .map(|stem| format!("{}.svg", stem.to_string_lossy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_hint() {
        assert_eq!(output_hint("demos/plant.toml").as_deref(), Some("plant.svg"));
        assert_eq!(output_hint("plant").as_deref(), Some("plant.svg"));
        assert_eq!(output_hint(""), None);
    }
}
