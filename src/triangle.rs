use eyre::{eyre, Result};
use glam::{const_vec3, Vec3};

use crate::ogl;

pub const POSITIONS: [Vec3; 3] = [
    const_vec3!([0.0, 0.5, 0.0]),
    const_vec3!([0.5, -0.5, 0.0]),
    const_vec3!([-0.5, -0.5, 0.0]),
];

/// Per-vertex colors, red / green / blue corners
pub const COLORS: [Vec3; 3] = [
    const_vec3!([1.0, 0.0, 0.0]),
    const_vec3!([0.0, 1.0, 0.0]),
    const_vec3!([0.0, 0.0, 1.0]),
];

/// The triangle's vertex array together with its position and color buffers
pub struct Triangle {
    vao: u32,
    positions: u32,
    colors: u32,
}

impl Triangle {
    pub fn new() -> Result<Self> {
        let mut vao = 0;

        let (positions, colors) = unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            let positions = ogl::create_float_buf(&POSITIONS, ogl::POS_INDEX);
            let colors = ogl::create_float_buf(&COLORS, ogl::COLOR_INDEX);

            // Unbind buffers
            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);

            (positions, colors)
        };

        let triangle = Self {
            vao,
            positions,
            colors,
        };

        if triangle.vao == 0 {
            return Err(eyre!("triangle VAO wasn't correctly initialized"));
        }

        Ok(triangle)
    }

    fn vertex_count(&self) -> usize {
        POSITIONS.len()
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count() as i32);
        }
    }
}

impl Drop for Triangle {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.positions);
            gl::DeleteBuffers(1, &self.colors);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}
