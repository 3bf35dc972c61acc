//! Command-line argument definitions for the Flowsheet CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, strictness and logging verbosity.

use clap::Parser;

/// Output value that streams the document to standard output.
pub const STDOUT_OUTPUT: &str = "-";

/// Command-line arguments for the Flowsheet schematic compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the process model (TOML)
    #[arg(help = "Path to the input model file")]
    pub input: String,

    /// Output SVG file or directory, `-` for stdout
    #[arg(short, long, default_value = "flowsheet.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Fail when the model has unknown classes, ports or ids
    #[arg(long)]
    pub strict: bool,

    /// Title block text, overriding the configuration
    #[arg(long)]
    pub title: Option<String>,
}

impl Args {
    /// Arguments for compiling `input` into `output` with defaults elsewhere.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            config: None,
            log_level: "info".to_string(),
            strict: false,
            title: None,
        }
    }

    /// Returns true when the document goes to standard output.
    pub fn writes_to_stdout(&self) -> bool {
        self.output == STDOUT_OUTPUT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["flowsheet", "plant.toml"]);
        assert_eq!(args.input, "plant.toml");
        assert_eq!(args.output, "flowsheet.svg");
        assert_eq!(args.log_level, "info");
        assert!(args.config.is_none());
        assert!(!args.strict);
        assert!(args.title.is_none());
        assert!(!args.writes_to_stdout());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "flowsheet",
            "plant.toml",
            "-o",
            "-",
            "-c",
            "style.toml",
            "--log-level",
            "debug",
            "--strict",
            "--title",
            "Unit 100",
        ]);
        assert!(args.writes_to_stdout());
        assert_eq!(args.config.as_deref(), Some("style.toml"));
        assert_eq!(args.log_level, "debug");
        assert!(args.strict);
        assert_eq!(args.title.as_deref(), Some("Unit 100"));
    }
}
