use glam::Vec4;

use crate::{shader::Shader, triangle::Triangle};

pub struct Renderer {}

impl Renderer {
    pub fn new(clear_color: Vec4) -> Self {
        unsafe {
            gl::ClearColor(clear_color.x, clear_color.y, clear_color.z, clear_color.w);
        }

        Self {}
    }

    pub fn render(&mut self, triangle: &Triangle, shader: &Shader) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        shader.bind();
        triangle.draw();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }
}
