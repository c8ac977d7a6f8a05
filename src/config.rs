//! Rasterizer and demo scene configuration
//!
//! Uses RON (Rusty Object Notation) for human-readable config files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::rasterizer::{RasterError, RasterResult, Vec3};

/// Depth range the viewport transform maps NDC z into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    pub near: f32,
    pub far: f32,
}

impl DepthRange {
    /// Linear map from NDC z in [-1, 1] to [near, far]
    pub fn remap(&self, ndc_z: f32) -> f32 {
        let scale = (self.far - self.near) / 2.0;
        let offset = (self.far + self.near) / 2.0;
        ndc_z * scale + offset
    }
}

impl Default for DepthRange {
    fn default() -> Self {
        Self { near: 0.1, far: 50.0 }
    }
}

/// Rasterizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    pub width: usize,
    pub height: usize,
    pub depth: DepthRange,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            width: 700,
            height: 700,
            depth: DepthRange::default(),
        }
    }
}

impl RasterConfig {
    pub fn from_ron_str(s: &str) -> RasterResult<Self> {
        Ok(ron::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> RasterResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| RasterError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&contents)
    }

    pub fn to_ron_string(&self) -> RasterResult<String> {
        let config = ron::ser::PrettyConfig::new().indentor("  ".to_string());
        Ok(ron::ser::to_string_pretty(self, config)?)
    }
}

/// Geometry and camera for the demo binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub positions: Vec<Vec3>,
    pub indices: Vec<[u32; 3]>,
    pub colors: Vec<Vec3>,
    pub eye: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Model rotation axis (through the origin)
    pub axis: Vec3,
    /// Starting rotation in degrees
    pub angle: f32,
}

impl Default for SceneConfig {
    /// Two overlapping triangles at different depths
    fn default() -> Self {
        let green = Vec3::new(217.0, 238.0, 185.0) / 255.0;
        let blue = Vec3::new(185.0, 217.0, 238.0) / 255.0;
        Self {
            positions: vec![
                Vec3::new(2.0, 0.0, -2.0),
                Vec3::new(0.0, 2.0, -2.0),
                Vec3::new(-2.0, 0.0, -2.0),
                Vec3::new(3.5, -1.0, -5.0),
                Vec3::new(2.5, 1.5, -5.0),
                Vec3::new(-1.0, 0.5, -5.0),
            ],
            indices: vec![[0, 1, 2], [3, 4, 5]],
            colors: vec![green, green, green, blue, blue, blue],
            eye: Vec3::new(0.0, 0.0, 5.0),
            fov: 45.0,
            z_near: 0.1,
            z_far: 50.0,
            axis: Vec3::new(0.0, 0.0, 1.0),
            angle: 0.0,
        }
    }
}

impl SceneConfig {
    pub fn from_ron_str(s: &str) -> RasterResult<Self> {
        Ok(ron::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> RasterResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| RasterError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_remap_endpoints() {
        let range = DepthRange { near: 0.1, far: 50.0 };
        assert!((range.remap(-1.0) - 0.1).abs() < 1e-5);
        assert!((range.remap(1.0) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_raster_config_partial_ron() {
        let config = RasterConfig::from_ron_str("(width: 320, height: 240)").unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 240);
        assert_eq!(config.depth, DepthRange::default());
    }

    #[test]
    fn test_raster_config_round_trip() {
        let config = RasterConfig {
            width: 64,
            height: 32,
            depth: DepthRange { near: 1.0, far: 10.0 },
        };
        let s = config.to_ron_string().unwrap();
        assert_eq!(RasterConfig::from_ron_str(&s).unwrap(), config);
    }

    #[test]
    fn test_raster_config_bad_ron() {
        let err = RasterConfig::from_ron_str("(width: \"wide\")").unwrap_err();
        assert!(matches!(err, RasterError::Config(_)));
    }

    #[test]
    fn test_scene_default_is_consistent() {
        let scene = SceneConfig::default();
        assert_eq!(scene.positions.len(), scene.colors.len());
        let n = scene.positions.len() as u32;
        assert!(scene.indices.iter().flatten().all(|&i| i < n));
    }

    #[test]
    fn test_scene_from_ron() {
        let src = r#"(
            positions: [(x: 0.0, y: 0.0, z: -1.0), (x: 1.0, y: 0.0, z: -1.0), (x: 0.0, y: 1.0, z: -1.0)],
            indices: [(0, 1, 2)],
            colors: [(x: 1.0, y: 0.0, z: 0.0), (x: 1.0, y: 0.0, z: 0.0), (x: 1.0, y: 0.0, z: 0.0)],
            fov: 60.0,
        )"#;
        let scene = SceneConfig::from_ron_str(src).unwrap();
        assert_eq!(scene.indices, vec![[0, 1, 2]]);
        assert_eq!(scene.fov, 60.0);
        assert_eq!(scene.eye, SceneConfig::default().eye);
    }
}
