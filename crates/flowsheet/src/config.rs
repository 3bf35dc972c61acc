//! Configuration types for schematic generation.
//!
//! All types implement [`serde::Deserialize`] with every field defaulted, so a
//! partial TOML file only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration root
//! - [`CanvasConfig`] - Scale, margin and border inset of the drawing canvas
//! - [`StyleConfig`] - Colors, stroke widths and fonts
//! - [`TitleBlockConfig`] - Title block text
//!
//! # Example
//!
//! ```
//! # use flowsheet::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     [canvas]
//!     scale = 100.0
//!
//!     [style]
//!     pipe_color = "darkgreen"
//! "#).unwrap();
//!
//! assert_eq!(config.canvas().scale(), 100.0);
//! assert_eq!(config.canvas().margin(), 40.0);
//! assert!(config.style().pipe_color().is_ok());
//! ```

use serde::Deserialize;

use flowsheet_core::color::Color;

use crate::FlowsheetError;

/// Top-level configuration combining canvas, style and title block settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    canvas: CanvasConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    title_block: TitleBlockConfig,
}

impl AppConfig {
    pub fn new(canvas: CanvasConfig, style: StyleConfig, title_block: TitleBlockConfig) -> Self {
        Self {
            canvas,
            style,
            title_block,
        }
    }

    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn title_block(&self) -> &TitleBlockConfig {
        &self.title_block
    }

    /// Replaces the title block title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title_block.title = title.into();
        self
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`FlowsheetError::Config`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), FlowsheetError> {
        let canvas = &self.canvas;
        if !(canvas.scale.is_finite() && canvas.scale > 0.0) {
            return Err(FlowsheetError::Config(format!(
                "canvas.scale must be a positive number, got {}",
                canvas.scale
            )));
        }
        if !(canvas.margin.is_finite() && canvas.margin >= 0.0) {
            return Err(FlowsheetError::Config(format!(
                "canvas.margin must not be negative, got {}",
                canvas.margin
            )));
        }
        if !(canvas.border_inset.is_finite() && canvas.border_inset >= 0.0) {
            return Err(FlowsheetError::Config(format!(
                "canvas.border_inset must not be negative, got {}",
                canvas.border_inset
            )));
        }

        let style = &self.style;
        for (name, width) in [("line_width", style.line_width), ("pipe_width", style.pipe_width)] {
            if !(width.is_finite() && width > 0.0) {
                return Err(FlowsheetError::Config(format!(
                    "style.{name} must be a positive number, got {width}"
                )));
            }
        }
        if style.font_size == 0 {
            return Err(FlowsheetError::Config("style.font_size must not be zero".into()));
        }
        if style.font_family.trim().is_empty() {
            return Err(FlowsheetError::Config("style.font_family must not be empty".into()));
        }

        style.background_color().map_err(FlowsheetError::Config)?;
        style.line_color().map_err(FlowsheetError::Config)?;
        style.pipe_color().map_err(FlowsheetError::Config)?;

        Ok(())
    }
}

/// Drawing canvas settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Diagram units per model unit.
    scale: f32,
    /// Empty band between the outermost symbols and the canvas edge.
    margin: f32,
    /// Distance of the border rectangle from the canvas edge.
    border_inset: f32,
}

impl CanvasConfig {
    pub fn new(scale: f32, margin: f32, border_inset: f32) -> Self {
        Self {
            scale,
            margin,
            border_inset,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn border_inset(&self) -> f32 {
        self.border_inset
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            scale: 80.0,
            margin: 40.0,
            border_inset: 10.0,
        }
    }
}

/// Visual styling. Colors are kept as strings and parsed on access.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: String,
    line_color: String,
    pipe_color: String,
    line_width: f32,
    pipe_width: f32,
    font_family: String,
    font_size: u16,
}

impl StyleConfig {
    /// Returns the parsed canvas background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn background_color(&self) -> Result<Color, String> {
        Color::new(&self.background_color)
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the parsed outline [`Color`] for symbols, border and text.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn line_color(&self) -> Result<Color, String> {
        Color::new(&self.line_color).map_err(|err| format!("Invalid line color in config: {err}"))
    }

    /// Returns the parsed pipe [`Color`], also used for flow arrows.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid CSS color.
    pub fn pipe_color(&self) -> Result<Color, String> {
        Color::new(&self.pipe_color).map_err(|err| format!("Invalid pipe color in config: {err}"))
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn pipe_width(&self) -> f32 {
        self.pipe_width
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: "white".to_string(),
            line_color: "black".to_string(),
            pipe_color: "#1f4e79".to_string(),
            line_width: 2.0,
            pipe_width: 2.0,
            font_family: "Arial".to_string(),
            font_size: 12,
        }
    }
}

/// Title block text.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TitleBlockConfig {
    title: String,
}

impl TitleBlockConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Default for TitleBlockConfig {
    fn default() -> Self {
        Self::new("Process Flow Diagram")
    }
}
