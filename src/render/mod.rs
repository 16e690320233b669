//! Module for anything related to rendering.
//!
//! This module contains the triangle renderer and the bundled default shaders.

use std::rc::Rc;

use glam::{Mat4, Vec3};
use glow::HasContext;

use crate::{
    abs::{Mesh, PositionVertex, ShaderProgram},
    error::Result,
    scene::Scene,
};

/// Vertex shader used when the host does not provide one.
pub const DEFAULT_VERTEX_SHADER: &str = include_str!("shaders/triangle/vert.glsl");
/// Fragment shader used when the host does not provide one.
pub const DEFAULT_FRAGMENT_SHADER: &str = include_str!("shaders/triangle/frag.glsl");

/// The triangle every instance draws, in model space.
pub const TRIANGLE: [PositionVertex; 3] = [
    PositionVertex {
        position: Vec3::new(-0.5, -0.5, -1.0),
    },
    PositionVertex {
        position: Vec3::new(0.0, 0.5, -1.0),
    },
    PositionVertex {
        position: Vec3::new(0.5, -0.5, -1.0),
    },
];

/// Composes the clip-space matrix for one draw.
pub fn model_view_projection(projection: Mat4, model: Mat4) -> Mat4 {
    projection * model
}

/// Draws the triangle with a single shader program and a single vertex buffer.
pub struct TriangleRenderer {
    gl: Rc<glow::Context>,
    program: ShaderProgram,
    mesh: Mesh<PositionVertex>,
    projection: Mat4,
}

impl TriangleRenderer {
    /// Compiles the program and uploads the triangle.
    pub fn new(gl: &Rc<glow::Context>, vert: &str, frag: &str, projection: Mat4) -> Result<Self> {
        let program = ShaderProgram::from_sources(gl, vert, frag)?;
        let mesh = Mesh::new(gl, &TRIANGLE, glow::TRIANGLES)?;
        log::info!("triangle program linked, {} vertices uploaded", mesh.vertex_count());

        Ok(Self {
            gl: Rc::clone(gl),
            program,
            mesh,
            projection,
        })
    }

    /// Draws one instance of the triangle with the given model transform and flat color.
    pub fn draw(&self, model: Mat4, color: Vec3) {
        self.program.use_program();
        self.program
            .set_uniform("u_matrix", model_view_projection(self.projection, model));
        self.program.set_uniform("u_color", color.extend(1.0));
        self.mesh.draw(&self.program);
    }

    /// Clears the frame and draws every instance of the scene.
    pub fn render(&self, scene: &Scene) {
        unsafe {
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        for instance in scene.instances() {
            self.draw(instance.model, instance.color);
        }
        log::trace!("frame {} drawn", scene.frame());
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;
    use crate::config::Config;

    #[test]
    fn test_default_shaders_use_expected_names() {
        assert!(DEFAULT_VERTEX_SHADER.contains("attribute vec3 a_position"));
        assert!(DEFAULT_VERTEX_SHADER.contains("uniform mat4 u_matrix"));
        assert!(DEFAULT_FRAGMENT_SHADER.contains("uniform vec4 u_color"));
    }

    #[test]
    fn test_mvp_is_projection_times_model() {
        let config = Config::default();
        let projection = config.projection();
        let model = Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0));
        let mvp = model_view_projection(projection, model);

        let apex = TRIANGLE[1].position.extend(1.0);
        assert!((mvp * apex).abs_diff_eq(projection * (model * apex), 1e-5));
        assert!(mvp.abs_diff_eq(projection * model, 0.0));
    }

    #[test]
    fn test_initial_triangle_is_visible() {
        let config = Config::default();
        let scene = Scene::new(&config);
        let mvp = model_view_projection(config.projection(), scene.instances()[0].model);

        for vertex in TRIANGLE {
            let clip: Vec4 = mvp * vertex.position.extend(1.0);
            let ndc = clip.truncate() / clip.w;
            assert!(clip.w > 0.0);
            assert!(ndc.abs().max_element() <= 1.0, "{ndc:?} outside clip volume");
        }
    }
}
