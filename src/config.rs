//! Scene configuration.
//!
//! Every field has a default, so the host may pass a partial JSON object (or
//! nothing at all) and only override what it cares about.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};
use log::LevelFilter;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Largest canvas side accepted. Browsers cap drawing buffers well below this.
pub const MAX_DIMENSION: u32 = 16384;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio handed to the projection. Not derived from the canvas size.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// How far the scene is pushed away from the camera along -Z.
    pub distance: f32,
    /// Rotation about Y applied every frame, in radians.
    pub spin_step: f32,
    /// Rotation about Y between consecutive instances, in radians.
    pub instance_step: f32,
    pub colors: [Vec3; 3],
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 960,
            height: 1024,
            fov: PI / 2.0,
            aspect: 1.0,
            near: 1.0,
            far: 100.0,
            distance: 3.0,
            spin_step: PI / 512.0,
            instance_step: 2.0 * PI / 3.0,
            colors: [Vec3::X, Vec3::Y, Vec3::Z],
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Parses a (possibly partial) JSON object and validates the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values that would otherwise produce a degenerate projection
    /// or a division by zero in the mouse handler.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "surface must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(Error::InvalidConfig(format!(
                "surface sides must not exceed {MAX_DIMENSION}, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.fov.is_finite() && self.fov > 0.0 && self.fov < PI) {
            return Err(Error::InvalidConfig(format!(
                "fov must lie in (0, pi), got {}",
                self.fov
            )));
        }
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "aspect must be positive, got {}",
                self.aspect
            )));
        }
        if !(self.near.is_finite() && self.near > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "near plane must be positive, got {}",
                self.near
            )));
        }
        if !(self.far.is_finite() && self.far > self.near) {
            return Err(Error::InvalidConfig(format!(
                "far plane ({}) must lie beyond near plane ({})",
                self.far, self.near
            )));
        }
        for (name, value) in [
            ("distance", self.distance),
            ("spin_step", self.spin_step),
            ("instance_step", self.instance_step),
        ] {
            if !value.is_finite() {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// The perspective projection shared by every draw.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!((config.width, config.height), (960, 1024));
        assert_eq!(config.aspect, 1.0);
        assert_eq!(config.near, 1.0);
        assert_eq!(config.far, 100.0);
        assert_eq!(config.colors, [Vec3::X, Vec3::Y, Vec3::Z]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json(r#"{ "width": 640, "log_level": "debug" }"#).unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 1024);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.spin_step, PI / 512.0);
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_colors_from_json() {
        let config =
            Config::from_json(r#"{ "colors": [[1, 1, 0], [0, 1, 1], [1, 0, 1]] }"#).unwrap();
        assert_eq!(config.colors[0], Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(config.colors[2], Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Config::from_json("{ width: 640 }"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "width": "wide" }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        for json in [
            r#"{ "width": 0 }"#,
            r#"{ "near": 0.0 }"#,
            r#"{ "near": 10.0, "far": 5.0 }"#,
            r#"{ "fov": 0.0 }"#,
            r#"{ "aspect": -1.0 }"#,
            r#"{ "width": 16385 }"#,
            r#"{ "height": 4294967295 }"#,
            r#"{ "distance": 1e39 }"#,
            r#"{ "spin_step": 1e39 }"#,
            r#"{ "instance_step": -1e39 }"#,
        ] {
            assert!(
                matches!(Config::from_json(json), Err(Error::InvalidConfig(_))),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn test_largest_surface_accepted() {
        let config = Config::from_json(r#"{ "width": 16384, "height": 16384 }"#).unwrap();
        assert_eq!(i32::try_from(config.width), Ok(16384));
    }

    #[test]
    fn test_accepted_config_yields_finite_transforms() {
        let config =
            Config::from_json(r#"{ "distance": 1e30, "spin_step": 3e38, "instance_step": -2.5 }"#)
                .unwrap();
        let mut scene = crate::scene::Scene::new(&config);
        scene.advance();
        for instance in scene.instances() {
            assert!(instance.model.is_finite(), "{:?}", instance.model);
        }
    }

    #[test]
    fn test_projection_maps_planes() {
        let config = Config::default();
        let projection = config.projection();

        let near = projection.project_point3(Vec3::new(0.0, 0.0, -config.near));
        let far = projection.project_point3(Vec3::new(0.0, 0.0, -config.far));
        assert!((near.z + 1.0).abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-5);

        // 90 degree fov with aspect 1: the frustum edge at depth d sits at d.
        let edge = projection.project_point3(Vec3::new(2.0, 2.0, -2.0));
        assert!((edge.x - 1.0).abs() < 1e-5);
        assert!((edge.y - 1.0).abs() < 1e-5);
    }
}
