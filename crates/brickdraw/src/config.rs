//! Configuration types for Brickdraw editing sessions.
//!
//! This module provides the configuration structures that control placement,
//! pasting, connection styling and instance naming. All types implement
//! [`serde::Deserialize`] so a session can be configured from a TOML file;
//! every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`CanvasConfig`] - Grid size, canvas dimensions and the Point line.
//! - [`EditingConfig`] - Paste offset and rotation step.
//! - [`StyleConfig`] - Default connection stroke and background color.
//! - [`NamespaceConfig`] - Base IRIs for generated instance identifiers.
//! - [`SceneSettings`] - The validated, ready-to-use form of an [`AppConfig`].
//!
//! # Example
//!
//! ```
//! # use brickdraw::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.canvas().grid_size(), 25.0);
//! assert_eq!(config.canvas().point_line_height(), 900.0);
//! ```

use serde::Deserialize;

use brickdraw_core::{
    color::Color,
    draw::{StrokeCap, StrokeDefinition, StrokeJoin},
    geometry::Point,
};

use crate::error::BrickdrawError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Canvas configuration section.
    #[serde(default)]
    canvas: CanvasConfig,

    /// Editing configuration section.
    #[serde(default)]
    editing: EditingConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Namespace configuration section.
    #[serde(default)]
    namespaces: NamespaceConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        canvas: CanvasConfig,
        editing: EditingConfig,
        style: StyleConfig,
        namespaces: NamespaceConfig,
    ) -> Self {
        Self {
            canvas,
            editing,
            style,
            namespaces,
        }
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the editing configuration.
    pub fn editing(&self) -> &EditingConfig {
        &self.editing
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the namespace configuration.
    pub fn namespaces(&self) -> &NamespaceConfig {
        &self.namespaces
    }
}

/// Canvas geometry: grid cell size, canvas extent and the Point line.
///
/// Point entities are pinned vertically to a horizontal line at
/// `height * point_line_ratio`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    grid_size: f32,
    width: f32,
    height: f32,
    point_line_ratio: f32,
}

impl CanvasConfig {
    /// Creates a canvas configuration.
    ///
    /// # Arguments
    ///
    /// * `grid_size` - Cell size entities and joints snap to.
    /// * `width` - Canvas width in scene units.
    /// * `height` - Canvas height in scene units.
    /// * `point_line_ratio` - Fraction of `height` at which Points are pinned.
    pub fn new(grid_size: f32, width: f32, height: f32, point_line_ratio: f32) -> Self {
        Self {
            grid_size,
            width,
            height,
            point_line_ratio,
        }
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the y coordinate of the Point line.
    pub fn point_line_height(&self) -> f32 {
        self.height * self.point_line_ratio
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            grid_size: 25.0,
            width: 1500.0,
            height: 1000.0,
            point_line_ratio: 0.9,
        }
    }
}

/// Settings for clipboard and rotation commands.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EditingConfig {
    paste_offset_x: f32,
    paste_offset_y: f32,
    rotation_step: f32,
}

impl EditingConfig {
    pub fn new(paste_offset_x: f32, paste_offset_y: f32, rotation_step: f32) -> Self {
        Self {
            paste_offset_x,
            paste_offset_y,
            rotation_step,
        }
    }

    /// Returns the offset applied to pasted items.
    pub fn paste_offset(&self) -> Point {
        Point::new(self.paste_offset_x, self.paste_offset_y)
    }

    /// Returns the angle, in degrees, applied by a rotate command.
    pub fn rotation_step(&self) -> f32 {
        self.rotation_step
    }
}

impl Default for EditingConfig {
    fn default() -> Self {
        Self {
            paste_offset_x: 50.0,
            paste_offset_y: 50.0,
            rotation_step: 90.0,
        }
    }
}

/// Visual styling configuration.
///
/// Colors are CSS color strings and are validated when the configuration is
/// turned into [`SceneSettings`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    connection_color: String,
    connection_width: f32,
    background_color: Option<String>,
}

impl StyleConfig {
    pub fn new(
        connection_color: impl Into<String>,
        connection_width: f32,
        background_color: Option<String>,
    ) -> Self {
        Self {
            connection_color: connection_color.into(),
            connection_width,
            background_color,
        }
    }

    /// Returns the stroke given to new connections.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn connection_stroke(&self) -> Result<StrokeDefinition, String> {
        let color = Color::new(&self.connection_color)
            .map_err(|err| format!("Invalid connection color in config: {err}"))?;
        Ok(default_stroke(color, self.connection_width))
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            connection_color: "black".to_string(),
            connection_width: 2.0,
            background_color: None,
        }
    }
}

/// Base IRIs under which new instances and connection records are named.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    instance_base: String,
    connection_base: String,
}

impl NamespaceConfig {
    pub fn new(instance_base: impl Into<String>, connection_base: impl Into<String>) -> Self {
        Self {
            instance_base: instance_base.into(),
            connection_base: connection_base.into(),
        }
    }

    pub fn instance_base(&self) -> &str {
        &self.instance_base
    }

    pub fn connection_base(&self) -> &str {
        &self.connection_base
    }
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            instance_base: "http://example.org/building/instances/".to_string(),
            connection_base: "http://example.org/building/#".to_string(),
        }
    }
}

/// Validated settings consumed by the scene graph.
///
/// Built once from an [`AppConfig`] so that color strings are parsed a
/// single time rather than on every new connection.
#[derive(Debug, Clone)]
pub struct SceneSettings {
    grid_size: f32,
    canvas_width: f32,
    canvas_height: f32,
    point_line_height: f32,
    paste_offset: Point,
    rotation_step: f32,
    connection_stroke: StrokeDefinition,
    background_color: Option<Color>,
    instance_base: String,
    connection_base: String,
}

impl SceneSettings {
    /// Validates `config` and resolves it into scene settings.
    ///
    /// # Errors
    ///
    /// Returns [`BrickdrawError::Config`] for unparsable colors or a
    /// non-positive canvas size.
    pub fn from_config(config: &AppConfig) -> Result<Self, BrickdrawError> {
        let canvas = config.canvas();
        if canvas.width() <= 0.0 || canvas.height() <= 0.0 {
            return Err(BrickdrawError::Config(format!(
                "canvas size must be positive, got {}x{}",
                canvas.width(),
                canvas.height()
            )));
        }

        Ok(Self {
            grid_size: canvas.grid_size(),
            canvas_width: canvas.width(),
            canvas_height: canvas.height(),
            point_line_height: canvas.point_line_height(),
            paste_offset: config.editing().paste_offset(),
            rotation_step: config.editing().rotation_step(),
            connection_stroke: config
                .style()
                .connection_stroke()
                .map_err(BrickdrawError::Config)?,
            background_color: config
                .style()
                .background_color()
                .map_err(BrickdrawError::Config)?,
            instance_base: config.namespaces().instance_base().to_string(),
            connection_base: config.namespaces().connection_base().to_string(),
        })
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    pub fn canvas_width(&self) -> f32 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f32 {
        self.canvas_height
    }

    pub fn point_line_height(&self) -> f32 {
        self.point_line_height
    }

    pub fn paste_offset(&self) -> Point {
        self.paste_offset
    }

    pub fn rotation_step(&self) -> f32 {
        self.rotation_step
    }

    /// Returns the solid stroke new connections start with.
    pub fn connection_stroke(&self) -> StrokeDefinition {
        self.connection_stroke
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn instance_base(&self) -> &str {
        &self.instance_base
    }

    pub fn connection_base(&self) -> &str {
        &self.connection_base
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        let canvas = CanvasConfig::default();
        let editing = EditingConfig::default();
        let namespaces = NamespaceConfig::default();
        Self {
            grid_size: canvas.grid_size(),
            canvas_width: canvas.width(),
            canvas_height: canvas.height(),
            point_line_height: canvas.point_line_height(),
            paste_offset: editing.paste_offset(),
            rotation_step: editing.rotation_step(),
            connection_stroke: default_stroke(
                Color::default(),
                StyleConfig::default().connection_width,
            ),
            background_color: None,
            instance_base: namespaces.instance_base,
            connection_base: namespaces.connection_base,
        }
    }
}

fn default_stroke(color: Color, width: f32) -> StrokeDefinition {
    let mut stroke = StrokeDefinition::solid(color, width);
    stroke.set_cap(StrokeCap::Round);
    stroke.set_join(StrokeJoin::Round);
    stroke
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use brickdraw_core::{color::Rgb8, draw::StrokeStyle};

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.canvas().grid_size(), 25.0);
        assert_eq!(config.canvas().width(), 1500.0);
        assert_approx_eq!(f32, config.canvas().point_line_height(), 900.0);
        assert_eq!(config.editing().paste_offset(), Point::new(50.0, 50.0));
        assert_eq!(config.editing().rotation_step(), 90.0);
        assert_eq!(
            config.namespaces().instance_base(),
            "http://example.org/building/instances/"
        );
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_default_settings_match_default_config() {
        let resolved = SceneSettings::from_config(&AppConfig::default()).unwrap();
        let fallback = SceneSettings::default();

        assert_eq!(resolved.grid_size(), fallback.grid_size());
        assert_approx_eq!(f32, resolved.point_line_height(), fallback.point_line_height());
        assert_eq!(resolved.connection_stroke(), fallback.connection_stroke());
        assert_eq!(resolved.instance_base(), fallback.instance_base());
    }

    #[test]
    fn test_connection_stroke() {
        let stroke = StyleConfig::default().connection_stroke().unwrap();
        assert_eq!(stroke.color().to_rgb8(), Rgb8::new(0, 0, 0));
        assert_eq!(stroke.width(), 2.0);
        assert_eq!(stroke.style(), StrokeStyle::Solid);

        let custom = StyleConfig::new("#ff0000", 4.0, None).connection_stroke().unwrap();
        assert_eq!(custom.color().to_rgb8(), Rgb8::new(255, 0, 0));
        assert_eq!(custom.width(), 4.0);
    }

    #[test]
    fn test_invalid_colors_are_rejected() {
        let config = AppConfig::new(
            CanvasConfig::default(),
            EditingConfig::default(),
            StyleConfig::new("not-a-color", 2.0, None),
            NamespaceConfig::default(),
        );
        assert!(matches!(
            SceneSettings::from_config(&config),
            Err(BrickdrawError::Config(_))
        ));

        let background = StyleConfig::new("black", 2.0, Some("nope".to_string()));
        assert!(background.background_color().is_err());
    }

    #[test]
    fn test_invalid_canvas_is_rejected() {
        let config = AppConfig::new(
            CanvasConfig::new(25.0, 0.0, 1000.0, 0.9),
            EditingConfig::default(),
            StyleConfig::default(),
            NamespaceConfig::default(),
        );
        assert!(SceneSettings::from_config(&config).is_err());
    }
}
