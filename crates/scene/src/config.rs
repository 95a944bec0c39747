use std::path::Path;

use meadow_mesh::{MeshError, SphereParams};
use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::object::SphereState;

/// Errors from loading or validating a [`SceneConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid sphere mesh: {0}")]
    Sphere(#[from] MeshError),
    #[error("{field} must be positive and finite, got {value}")]
    InvalidValue { field: &'static str, value: f32 },
}

/// The interactive sphere: its starting radius and the tessellation of its
/// unit reference mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    /// Seeds the canonical radius; the reference mesh itself is always unit size.
    pub radius: f32,
    pub latitude_segments: u32,
    pub longitude_segments: u32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            latitude_segments: 20,
            longitude_segments: 20,
        }
    }
}

/// Runtime scene settings, loaded from YAML. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Whether the scene has a movable sphere at all.
    pub interactive_object: bool,
    pub sphere: SphereConfig,
    /// Displacement per input tick for each held direction key.
    pub move_speed: f32,
    pub orbit_sensitivity: f32,
    pub zoom_sensitivity: f32,
    /// Edge length of the ground plane.
    pub plane_size: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            interactive_object: true,
            sphere: SphereConfig::default(),
            move_speed: 0.01,
            orbit_sensitivity: 0.5,
            zoom_sensitivity: 0.05,
            plane_size: 15.0,
        }
    }
}

impl SceneConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&data)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded scene config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sphere_params().validate()?;
        for (field, value) in [
            ("sphere.radius", self.sphere.radius),
            ("move_speed", self.move_speed),
            ("orbit_sensitivity", self.orbit_sensitivity),
            ("zoom_sensitivity", self.zoom_sensitivity),
            ("plane_size", self.plane_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        Ok(())
    }

    /// Mesh parameters for the sphere's unit reference geometry. The world
    /// matrix of [`sphere_state`](Self::sphere_state) scales it into place.
    pub fn sphere_params(&self) -> SphereParams {
        SphereParams::new(
            1.0,
            self.sphere.latitude_segments,
            self.sphere.longitude_segments,
        )
    }

    /// Initial canonical state of the interactive sphere.
    pub fn sphere_state(&self) -> Result<SphereState, SceneError> {
        SphereState::new(SphereState::default().position(), self.sphere.radius)
    }
}
