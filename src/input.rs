//! Mouse input.
//!
//! Cursor movement across the page is turned into a rotation proportional to
//! the surface dimensions: a move as wide as the canvas is half a turn.

use std::f32::consts::PI;

use glam::Vec2;

/// A rotation to apply to the scene, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    /// About the Y axis, from horizontal movement.
    pub yaw: f32,
    /// About the X axis, from vertical movement.
    pub pitch: f32,
}

/// The current state of the mouse.
#[derive(Debug, Clone, Copy)]
pub struct MouseState {
    pub position: Vec2,
    pub delta: Vec2,
    extent: Vec2,
}

impl MouseState {
    /// Creates a tracker for a surface of the given size. The cursor is
    /// assumed to start at the origin, so the first event measures from the
    /// top-left corner of the page.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Vec2::ZERO,
            delta: Vec2::ZERO,
            extent: Vec2::new(width as f32, height as f32),
        }
    }

    /// Records a cursor position in client coordinates and returns the
    /// rotation the movement since the last position maps to.
    pub fn move_to(&mut self, position: Vec2) -> Rotation {
        self.delta = position - self.position;
        self.position = position;
        self.rotation()
    }

    /// The rotation for the most recent movement.
    pub fn rotation(&self) -> Rotation {
        let scaled = self.delta / self.extent * PI;
        Rotation {
            yaw: scaled.x,
            pitch: scaled.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_measures_from_origin() {
        let mut mouse = MouseState::new(960, 1024);
        let rotation = mouse.move_to(Vec2::new(480.0, 256.0));
        assert!((rotation.yaw - PI / 2.0).abs() < 1e-6);
        assert!((rotation.pitch - PI / 4.0).abs() < 1e-6);
        assert_eq!(mouse.position, Vec2::new(480.0, 256.0));
    }

    #[test]
    fn test_delta_tracks_last_position() {
        let mut mouse = MouseState::new(960, 1024);
        mouse.move_to(Vec2::new(100.0, 100.0));

        let rotation = mouse.move_to(Vec2::new(4.0, 612.0));
        assert_eq!(mouse.delta, Vec2::new(-96.0, 512.0));
        assert!((rotation.yaw + PI / 10.0).abs() < 1e-6);
        assert!((rotation.pitch - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_movement_no_rotation() {
        let mut mouse = MouseState::new(960, 1024);
        mouse.move_to(Vec2::new(30.0, 40.0));
        assert_eq!(mouse.move_to(Vec2::new(30.0, 40.0)), Rotation::default());
    }

    #[test]
    fn test_full_width_is_half_turn() {
        let mut mouse = MouseState::new(200, 50);
        let rotation = mouse.move_to(Vec2::new(200.0, 50.0));
        assert!((rotation.yaw - PI).abs() < 1e-6);
        assert!((rotation.pitch - PI).abs() < 1e-6);
    }
}
