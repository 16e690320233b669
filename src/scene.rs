//! The spinning triangle scene.
//!
//! The scene owns a single transform. The frame loop spins it a little every
//! frame and the mouse handler steers it; both mutate it in place. Each frame
//! the same triangle is drawn three times, each copy rotated a further
//! [`Config::instance_step`] about Y from the previous one.

use glam::{Mat4, Vec3};

use crate::{config::Config, input::Rotation};

/// How many frames pass between debug heartbeats.
const HEARTBEAT_FRAMES: u64 = 600;

/// One draw of the triangle: the model transform and its flat color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub model: Mat4,
    pub color: Vec3,
}

pub struct Scene {
    /// Accumulated rotation and translation of the first instance.
    pub transform: Mat4,
    spin_step: f32,
    instance_step: f32,
    colors: [Vec3; 3],
    frame: u64,
}

impl Scene {
    /// Creates a scene pushed `config.distance` units away from the camera.
    pub fn new(config: &Config) -> Self {
        Self {
            transform: Mat4::from_translation(Vec3::new(0.0, 0.0, -config.distance)),
            spin_step: config.spin_step,
            instance_step: config.instance_step,
            colors: config.colors,
            frame: 0,
        }
    }

    /// Advances the animation by one tick.
    pub fn advance(&mut self) {
        self.transform *= Mat4::from_rotation_y(self.spin_step);
        self.frame += 1;
        if self.frame % HEARTBEAT_FRAMES == 0 {
            log::debug!("rendered {} frames", self.frame);
        }
    }

    /// Applies a mouse-driven rotation: yaw about Y first, then pitch about X.
    pub fn steer(&mut self, rotation: Rotation) {
        self.transform *= Mat4::from_rotation_y(rotation.yaw);
        self.transform *= Mat4::from_rotation_x(rotation.pitch);
    }

    /// The three instances to draw this frame, each one chained off the last.
    pub fn instances(&self) -> [Instance; 3] {
        let step = Mat4::from_rotation_y(self.instance_step);
        let first = self.transform;
        let second = first * step;
        let third = second * step;
        [
            Instance {
                model: first,
                color: self.colors[0],
            },
            Instance {
                model: second,
                color: self.colors[1],
            },
            Instance {
                model: third,
                color: self.colors[2],
            },
        ]
    }

    /// Number of ticks since the scene was created.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
