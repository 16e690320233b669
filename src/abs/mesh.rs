//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing vertex data on the GPU side.
//! Vertices should implement the [`Vertex`] trait.
//!
//! WebGL 1 has no vertex array objects without an extension, so attribute pointers are set up
//! again on every draw against the program being drawn with.

use std::rc::Rc;

use glam::Vec3;
use glow::HasContext;

use crate::{
    abs::ShaderProgram,
    error::{Error, Result},
};

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex {
    /// Points the program's vertex attributes at the currently bound buffer.
    fn vertex_attribs(gl: &glow::Context, program: &ShaderProgram);
}

/// A vertex carrying only a position, read by the `a_position` attribute.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct PositionVertex {
    pub position: Vec3,
}

impl Vertex for PositionVertex {
    fn vertex_attribs(gl: &glow::Context, program: &ShaderProgram) {
        let Some(location) = program.attrib_location("a_position") else {
            log::trace!("program has no a_position attribute");
            return;
        };
        unsafe {
            let stride = std::mem::size_of::<PositionVertex>() as i32;
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer_f32(location, 3, glow::FLOAT, false, stride, 0);
        }
    }
}

/// Represents a non-indexed mesh stored on the GPU side.
pub struct Mesh<V: Vertex> {
    gl: Rc<glow::Context>,
    draw_mode: u32,
    vbo: glow::Buffer,
    vertex_count: usize,
    _vertex: std::marker::PhantomData<V>,
}

impl<V: Vertex> Mesh<V> {
    /// Uploads the given vertices into a new static buffer.
    pub fn new(gl: &Rc<glow::Context>, vertices: &[V], draw_mode: u32) -> Result<Self> {
        unsafe {
            let vbo = gl.create_buffer().map_err(Error::Resource)?;

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    vertices.as_ptr() as *const u8,
                    std::mem::size_of_val(vertices),
                ),
                glow::STATIC_DRAW,
            );
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self {
                gl: Rc::clone(gl),
                draw_mode,
                vbo,
                vertex_count: vertices.len(),
                _vertex: std::marker::PhantomData,
            })
        }
    }

    /// Draws the mesh with the given program. The program must already be in use.
    pub fn draw(&self, program: &ShaderProgram) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            V::vertex_attribs(&self.gl, program);
            self.gl
                .draw_arrays(self.draw_mode, 0, self.vertex_count as i32);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }

    /// Returns the amount of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }
}

impl<V: Vertex> Drop for Mesh<V> {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<PositionVertex>(), 3 * std::mem::size_of::<f32>());
    }
}
