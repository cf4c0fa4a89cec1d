//! Overlay configuration.
//!
//! Every constant the overlay needs (viewport size, shader location and
//! entry points, time step, marker class) lives in one typed struct. The
//! defaults reproduce the fixed behaviour; an optional JSON file can
//! override individual fields.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{OverlayError, OverlayResult};

/// Upper bound for either viewport dimension.
pub const MAX_VIEWPORT_DIM: i32 = 4096;

/// Complete overlay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayConfig {
    /// Overlay surface and swapchain width in pixels.
    pub viewport_width: i32,

    /// Overlay surface and swapchain height in pixels.
    pub viewport_height: i32,

    /// Win32 class name registered for the overlay surface.
    pub window_class_name: String,

    /// Substring identifying the host's intermediate rendering surfaces.
    pub host_surface_marker: String,

    /// HLSL source, relative to the working directory.
    pub shader_path: PathBuf,

    pub vertex_entry_point: String,
    pub vertex_profile: String,
    pub pixel_entry_point: String,
    pub pixel_profile: String,

    /// Amount added to the time uniform per rendered frame.
    pub time_step: f32,

    /// Background color (RGBA) cleared every frame.
    pub clear_color: [f32; 4],

    /// Reject host handles that do not name a live window.
    pub validate_host: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            viewport_width: 300,
            viewport_height: 300,
            window_class_name: "HostOverlaySurface".to_string(),
            host_surface_marker: "Intermediate D3D Window".to_string(),
            shader_path: PathBuf::from("shaders").join("overlay.hlsl"),
            vertex_entry_point: "VShader".to_string(),
            vertex_profile: "vs_4_0".to_string(),
            pixel_entry_point: "PShader".to_string(),
            pixel_profile: "ps_4_0".to_string(),
            time_step: 0.001,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            validate_host: true,
        }
    }
}

impl OverlayConfig {
    /// Load the config: defaults when `path` is `None`, otherwise the JSON
    /// file layered over the defaults. The result is always validated.
    pub fn load(path: Option<&Path>) -> OverlayResult<Self> {
        let mut config = match path {
            None => Self::default(),
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    OverlayError::Config(format!("failed to read {}: {}", path.display(), e))
                })?;
                serde_json::from_str::<Self>(&text)?
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Clamp numeric settings to usable ranges and reject settings that
    /// can't be clamped.
    pub fn validate(&mut self) -> OverlayResult<()> {
        self.viewport_width = self.viewport_width.clamp(1, MAX_VIEWPORT_DIM);
        self.viewport_height = self.viewport_height.clamp(1, MAX_VIEWPORT_DIM);

        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            log::warn!(
                "[config] time step {} is not positive, using default",
                self.time_step
            );
            self.time_step = Self::default().time_step;
        }

        for c in self.clear_color.iter_mut() {
            *c = if c.is_finite() { c.clamp(0.0, 1.0) } else { 0.0 };
        }

        let required = [
            ("windowClassName", &self.window_class_name),
            ("hostSurfaceMarker", &self.host_surface_marker),
            ("vertexEntryPoint", &self.vertex_entry_point),
            ("vertexProfile", &self.vertex_profile),
            ("pixelEntryPoint", &self.pixel_entry_point),
            ("pixelProfile", &self.pixel_profile),
        ];
        if let Some((name, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(OverlayError::Config(format!("{} must not be empty", name)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "host-overlay-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = OverlayConfig::default();
        assert_eq!(config.viewport_width, 300);
        assert_eq!(config.viewport_height, 300);
        assert_eq!(config.vertex_entry_point, "VShader");
        assert_eq!(config.pixel_entry_point, "PShader");
        assert_eq!(config.vertex_profile, "vs_4_0");
        assert_eq!(config.pixel_profile, "ps_4_0");
        assert_eq!(config.host_surface_marker, "Intermediate D3D Window");
        assert_eq!(config.clear_color, [0.0, 0.0, 0.0, 1.0]);
        assert!(config.validate_host);
    }

    #[test]
    fn test_load_without_path_is_default() {
        let config = OverlayConfig::load(None).unwrap();
        assert_eq!(config, OverlayConfig::default());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let path = write_temp("partial", r#"{ "viewportWidth": 640, "timeStep": 0.01 }"#);
        let config = OverlayConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.viewport_width, 640);
        assert_eq!(config.viewport_height, 300);
        assert_eq!(config.time_step, 0.01);
        assert_eq!(config.shader_path, OverlayConfig::default().shader_path);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let path = std::env::temp_dir().join("host-overlay-does-not-exist.json");
        let err = OverlayConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, OverlayError::Config(_)));
    }

    #[test]
    fn test_load_malformed_json() {
        let path = write_temp("malformed", "{ viewportWidth: ");
        let err = OverlayConfig::load(Some(&path)).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, OverlayError::Json(_)));
    }

    #[test]
    fn test_validate_clamps_ranges() {
        let mut config = OverlayConfig {
            viewport_width: 0,
            viewport_height: 100_000,
            time_step: -1.0,
            clear_color: [2.0, -1.0, f32::NAN, 0.5],
            ..Default::default()
        };
        config.validate().unwrap();

        assert_eq!(config.viewport_width, 1);
        assert_eq!(config.viewport_height, MAX_VIEWPORT_DIM);
        assert_eq!(config.time_step, 0.001);
        assert_eq!(config.clear_color, [1.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_validate_rejects_empty_entry_point() {
        let mut config = OverlayConfig {
            pixel_entry_point: "  ".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("pixelEntryPoint"));
    }
}
