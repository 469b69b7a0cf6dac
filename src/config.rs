//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`QV_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use quadview_core::{Color, MeshParams, MeshParamsError, MeshVariant, ProjectionMode, RenderMode, RenderState};
use quadview_input::InputController;
use quadview_math::Vec3;
use quadview_render::{CompositorSettings, FillPolicy, Light, ViewParams};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Projection constants
    #[serde(default)]
    pub view: ViewConfig,
    /// Cup geometry
    #[serde(default)]
    pub mesh: MeshConfig,
    /// Rasterizer and shading configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`QV_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // QV_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("QV_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::new(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !(self.input.initial_zoom > 0.0) || !self.input.initial_zoom.is_finite() {
            return Err(ConfigError::new(format!(
                "initial zoom must be positive, got {}",
                self.input.initial_zoom
            )));
        }
        let [x, y, z] = self.rendering.light_dir;
        if Vec3::new(x, y, z).length_squared() == 0.0 {
            return Err(ConfigError::new("light direction must be non-zero"));
        }
        self.mesh.params().validate()?;
        Ok(())
    }

    /// Fixed settings for the compositor
    pub fn compositor_settings(&self) -> CompositorSettings {
        let r = &self.rendering;
        CompositorSettings {
            background: r.background_color,
            line_color: r.line_color,
            separator_color: r.separator_color,
            fill_policy: r.fill_policy,
            depth_limit: r.depth_limit,
            show_status: self.debug.show_status,
            mesh: self.mesh.params(),
            view: self.view.params(),
            light: r.light(),
            ..Default::default()
        }
    }

    /// The state a fresh session (or a view reset) starts from
    pub fn initial_state(&self) -> RenderState {
        RenderState::default()
            .with_angles(self.input.initial_angle_x, self.input.initial_angle_y)
            .with_zoom(self.input.initial_zoom)
            .with_segments(self.mesh.segments)
            .with_render_mode(self.rendering.render_mode)
            .with_projection(self.rendering.projection)
    }

    /// Input controller with the configured sensitivities
    pub fn input_controller(&self) -> InputController {
        InputController::new()
            .with_rotate_sensitivity(self.input.rotate_sensitivity)
            .with_zoom_factors(self.input.zoom_in_factor, self.input.zoom_out_factor)
            .with_frame_size(self.window.width, self.window.height)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Quadview".to_string(),
            width: 1000,
            height: 800,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Projection constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Pixels per model unit in the orthographic and axonometric views
    pub ortho_scale: f32,
    /// Distance from the eye to the model in the perspective view
    pub camera_distance: f32,
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let params = ViewParams::default();
        Self {
            ortho_scale: params.ortho_scale,
            camera_distance: params.camera_distance,
            fov: params.fov,
            near: params.near,
            far: params.far,
        }
    }
}

impl ViewConfig {
    pub fn params(&self) -> ViewParams {
        ViewParams {
            ortho_scale: self.ortho_scale,
            camera_distance: self.camera_distance,
            fov: self.fov,
            near: self.near,
            far: self.far,
        }
    }
}

/// Cup geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// `simple` or `hollow`
    pub variant: MeshVariant,
    /// Starting segment count (clamped to at least 3)
    pub segments: u32,
    pub radius: f32,
    pub height: f32,
    pub inner_radius: f32,
    pub floor_thickness: f32,
    pub outer_color: Color,
    pub inner_color: Color,
    pub bottom_color: Color,
}

impl Default for MeshConfig {
    fn default() -> Self {
        let params = MeshParams::default();
        Self {
            variant: params.variant,
            segments: RenderState::default().segments(),
            radius: params.radius,
            height: params.height,
            inner_radius: params.inner_radius,
            floor_thickness: params.floor_thickness,
            outer_color: params.outer_color,
            inner_color: params.inner_color,
            bottom_color: params.bottom_color,
        }
    }
}

impl MeshConfig {
    pub fn params(&self) -> MeshParams {
        MeshParams {
            variant: self.variant,
            radius: self.radius,
            height: self.height,
            inner_radius: self.inner_radius,
            floor_thickness: self.floor_thickness,
            outer_color: self.outer_color,
            inner_color: self.inner_color,
            bottom_color: self.bottom_color,
        }
    }
}

/// Rasterizer and shading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// `no_cull` or `backface_cull`
    pub fill_policy: FillPolicy,
    /// Starting render mode
    pub render_mode: RenderMode,
    /// Starting projection of the user view
    pub projection: ProjectionMode,
    /// Background color [r, g, b]
    pub background_color: Color,
    /// Wireframe edge color
    pub line_color: Color,
    /// Quadrant separator color
    pub separator_color: Color,
    /// Light direction [x, y, z], normalized on load
    pub light_dir: [f32; 3],
    /// Floor for the diffuse term
    pub min_intensity: f32,
    /// Added to the diffuse term before clamping to 1
    pub ambient_boost: f32,
    /// Fragments with |z| at or beyond this are discarded
    pub depth_limit: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        let light = Light::default();
        let direction = light.direction();
        let settings = CompositorSettings::default();
        Self {
            fill_policy: settings.fill_policy,
            render_mode: RenderMode::default(),
            projection: ProjectionMode::default(),
            background_color: settings.background,
            line_color: settings.line_color,
            separator_color: settings.separator_color,
            light_dir: [direction.x, direction.y, direction.z],
            min_intensity: light.min_intensity,
            ambient_boost: light.ambient_boost,
            depth_limit: settings.depth_limit,
        }
    }
}

impl RenderingConfig {
    pub fn light(&self) -> Light {
        let [x, y, z] = self.light_dir;
        Light::new(Vec3::new(x, y, z)).with_intensity_range(self.min_intensity, self.ambient_boost)
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Radians of rotation per pixel dragged
    pub rotate_sensitivity: f32,
    /// Zoom multiplier for the zoom-in key
    pub zoom_in_factor: f32,
    /// Zoom multiplier for the zoom-out key
    pub zoom_out_factor: f32,
    /// Starting rotation about X in radians
    pub initial_angle_x: f32,
    /// Starting rotation about Y in radians
    pub initial_angle_y: f32,
    /// Starting zoom
    pub initial_zoom: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        let controller = InputController::new();
        let state = RenderState::default();
        Self {
            rotate_sensitivity: controller.rotate_sensitivity,
            zoom_in_factor: controller.zoom_in_factor,
            zoom_out_factor: controller.zoom_out_factor,
            initial_angle_x: state.angle_x,
            initial_angle_y: state.angle_y,
            initial_zoom: state.zoom(),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Draw the status text in the user view
    pub show_status: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_status: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::new(e.to_string())
    }
}

impl From<MeshParamsError> for ConfigError {
    fn from(e: MeshParamsError) -> Self {
        ConfigError::new(e.to_string())
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1000);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.mesh.segments, 24);
        assert_eq!(config.mesh.variant, MeshVariant::Hollow);
        assert_eq!(config.rendering.fill_policy, FillPolicy::NoCull);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("fill_policy = \"no_cull\""));
        assert!(toml.contains("projection = \"perspective\""));
        assert!(toml.contains("variant = \"hollow\""));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [mesh]
            variant = "simple"
            segments = 7

            [rendering]
            fill_policy = "backface_cull"
            projection = "trimetric"
            background_color = [0, 0, 0]
            "#,
        )
        .unwrap();

        assert_eq!(config.mesh.variant, MeshVariant::Simple);
        assert_eq!(config.mesh.segments, 7);
        assert!(approx_eq(config.mesh.radius, 1.5));
        assert_eq!(config.rendering.fill_policy, FillPolicy::BackfaceCull);
        assert_eq!(config.rendering.projection, ProjectionMode::Trimetric);
        assert_eq!(config.rendering.background_color, Color::BLACK);
        assert_eq!(config.rendering.render_mode, RenderMode::Combined);
        assert_eq!(config.window.title, "Quadview");
    }

    #[test]
    fn test_unknown_projection_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[rendering]\nprojection = \"oblique\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.window.width = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.input.initial_zoom = 0.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.rendering.light_dir = [0.0, 0.0, 0.0];
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.mesh.inner_radius = 2.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_initial_state_from_config() {
        let mut config = AppConfig::default();
        config.mesh.segments = 2;
        config.input.initial_zoom = 2.0;
        config.rendering.render_mode = RenderMode::Wireframe;
        config.rendering.projection = ProjectionMode::Isometric;

        let state = config.initial_state();
        assert_eq!(state.segments(), 3);
        assert!(approx_eq(state.zoom(), 2.0));
        assert!(approx_eq(state.angle_x, 0.8));
        assert!(approx_eq(state.angle_y, -0.5));
        assert_eq!(state.render_mode, RenderMode::Wireframe);
        assert_eq!(state.projection, ProjectionMode::Isometric);
    }

    #[test]
    fn test_compositor_settings_from_config() {
        let mut config = AppConfig::default();
        config.rendering.fill_policy = FillPolicy::BackfaceCull;
        config.rendering.light_dir = [0.0, 0.0, 2.0];
        config.debug.show_status = false;
        config.view.ortho_scale = 20.0;

        let settings = config.compositor_settings();
        assert_eq!(settings.fill_policy, FillPolicy::BackfaceCull);
        assert!(!settings.show_status);
        assert!(approx_eq(settings.view.ortho_scale, 20.0));
        assert!(approx_eq(settings.light.direction().z, 1.0));
        assert_eq!(settings.mesh, MeshParams::default());
    }

    #[test]
    fn test_defaults_match_render_defaults() {
        let config = AppConfig::default();
        let settings = config.compositor_settings();
        let expected = CompositorSettings::default();
        assert_eq!(settings.background, expected.background);
        assert_eq!(settings.separator_color, expected.separator_color);
        assert_eq!(settings.view, expected.view);
        assert_eq!(settings.mesh, expected.mesh);
        assert!(approx_eq(settings.light.direction().dot(expected.light.direction()), 1.0));
        assert_eq!(config.initial_state(), RenderState::default());
    }
}
