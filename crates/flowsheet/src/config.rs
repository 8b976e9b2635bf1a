//! Configuration types for the conversion pipeline.
//!
//! All types implement [`serde::Deserialize`], and every field has a default,
//! so a configuration file only needs the keys it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and column settings.
//! - [`LayoutConfig`] - Spacing, offsets and edge anchoring.
//! - [`ColumnsConfig`] - Header names of the sheet columns.
//!
//! # Example
//!
//! ```
//! # use flowsheet::config::{AppConfig, AnchorMode};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().horizontal_spacing(), 250.0);
//! assert_eq!(config.layout().anchor_mode(), AnchorMode::Horizontal);
//! assert_eq!(config.columns().id(), "Id");
//! ```

use serde::Deserialize;

use flowsheet_parser::ColumnNames;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Column name configuration section.
    #[serde(default)]
    columns: ColumnsConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `layout` - Spacing and anchoring settings.
    /// * `columns` - Header names of the sheet columns.
    pub fn new(layout: LayoutConfig, columns: ColumnsConfig) -> Self {
        Self { layout, columns }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the column configuration.
    pub fn columns(&self) -> &ColumnsConfig {
        &self.columns
    }
}

/// Where edges attach to their shapes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorMode {
    /// Always leave the right side of the source and enter the left side of
    /// the target.
    #[default]
    Horizontal,
    /// Like [`AnchorMode::Horizontal`], except that edges whose vertical
    /// displacement dominates attach to the top and bottom sides.
    Adaptive,
}

/// Layout spacing and edge anchoring.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    horizontal_spacing: f32,
    vertical_spacing: f32,
    offset_x: f32,
    offset_y: f32,
    anchor_mode: AnchorMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 250.0,
            vertical_spacing: 150.0,
            offset_x: 100.0,
            offset_y: 100.0,
            anchor_mode: AnchorMode::default(),
        }
    }
}

impl LayoutConfig {
    /// Distance between the left edges of neighbouring columns.
    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    /// Distance between the top edges of neighbouring shapes in a column.
    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    /// Added to every x coordinate.
    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    /// Added to every y coordinate after centering a column on zero.
    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    pub fn anchor_mode(&self) -> AnchorMode {
        self.anchor_mode
    }

    pub fn with_spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset_x = x;
        self.offset_y = y;
        self
    }

    pub fn with_anchor_mode(mut self, anchor_mode: AnchorMode) -> Self {
        self.anchor_mode = anchor_mode;
        self
    }
}

/// Header names of the sheet columns.
///
/// Defaults match a Lucidchart CSV export.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColumnsConfig {
    id: String,
    kind: String,
    label: String,
    comments: String,
    line_source: String,
    line_destination: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        let names = ColumnNames::default();
        Self {
            id: names.id().to_string(),
            kind: names.kind().to_string(),
            label: names.label().to_string(),
            comments: names.comments().to_string(),
            line_source: names.line_source().to_string(),
            line_destination: names.line_destination().to_string(),
        }
    }
}

impl ColumnsConfig {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the names in the form the parser takes.
    pub fn to_column_names(&self) -> ColumnNames {
        ColumnNames::default()
            .with_id(&self.id)
            .with_kind(&self.kind)
            .with_label(&self.label)
            .with_comments(&self.comments)
            .with_line_source(&self.line_source)
            .with_line_destination(&self.line_destination)
    }
}
