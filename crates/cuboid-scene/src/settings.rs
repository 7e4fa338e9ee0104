//! World settings
//!
//! Loaded from TOML; every key is optional and falls back to the editor's
//! built-in defaults.

use cuboid_core::{CuboidError, Matrix4, Result, Vector3};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_FAR_PLANE: f32 = 7500.0;

/// Viewport, projection and lighting parameters for one world
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near_plane: f32,
    pub far_plane: f32,
    pub shadows_enabled: bool,
    /// Highest texture id an object may reference
    pub num_textures: u32,
    /// Direction the sunlight travels
    pub light_direction: Vector3,
    pub shadow: ShadowSettings,
}

/// Cascaded shadow map fitting parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowSettings {
    /// Increasing view distances between `near_plane` and `far_plane`;
    /// N splits give N + 1 cascades
    pub cascade_splits: Vec<f32>,
    /// Pushes the light-space near bound away so casters behind the
    /// camera frustum still land in the map
    pub z_multiplier: f32,
    /// Size every cascade from its frustum diagonal instead of its extents
    pub constant_size: bool,
    pub square: bool,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            fov: 90.0,
            near_plane: 1.0,
            far_plane: DEFAULT_FAR_PLANE,
            shadows_enabled: false,
            num_textures: 6,
            light_direction: Vector3::new(1.0, 0.0, 0.0),
            shadow: ShadowSettings::default(),
        }
    }
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            cascade_splits: vec![
                DEFAULT_FAR_PLANE / 10.0,
                DEFAULT_FAR_PLANE / 7.5,
                DEFAULT_FAR_PLANE / 5.0,
                DEFAULT_FAR_PLANE / 1.5,
            ],
            z_multiplier: 5.0,
            constant_size: true,
            square: true,
        }
    }
}

impl WorldSettings {
    /// Parse and validate settings from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded world settings");
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CuboidError::InvalidSettings(format!(
                "viewport must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(CuboidError::InvalidSettings(format!(
                "field of view must be between 0 and 180 degrees, got {}",
                self.fov
            )));
        }
        if !(self.near_plane > 0.0 && self.near_plane < self.far_plane) {
            return Err(CuboidError::InvalidSettings(format!(
                "expected 0 < near < far, got near {} far {}",
                self.near_plane, self.far_plane
            )));
        }

        let mut previous = self.near_plane;
        for &split in &self.shadow.cascade_splits {
            if split <= previous || split >= self.far_plane {
                return Err(CuboidError::InvalidSettings(format!(
                    "cascade split {} must be increasing and inside ({}, {})",
                    split, self.near_plane, self.far_plane
                )));
            }
            previous = split;
        }

        if self.shadow.z_multiplier <= 0.0 {
            return Err(CuboidError::InvalidSettings(format!(
                "z multiplier must be positive, got {}",
                self.shadow.z_multiplier
            )));
        }
        Ok(())
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Camera projection over the full near..far range
    pub fn projection_matrix(&self) -> Matrix4 {
        self.projection_for_range(self.near_plane, self.far_plane)
    }

    /// Camera projection over a sub-range of the view depth
    pub fn projection_for_range(&self, near: f32, far: f32) -> Matrix4 {
        Matrix4::perspective(self.fov, self.width as f32, self.height as f32, near, far)
    }

    pub fn cascade_count(&self) -> usize {
        self.shadow.cascade_splits.len() + 1
    }
}
