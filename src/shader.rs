use std::{ffi::CString, fmt, ptr};

use eyre::{eyre, Context, Result};
use gl::types::GLenum;

/// Vertex stage of the triangle program
pub const TRIANGLE_VS: &str = include_str!("../shaders/triangle.vert");
/// Fragment stage of the triangle program
pub const TRIANGLE_FS: &str = include_str!("../shaders/triangle.frag");

const INFO_LOG_LEN: usize = 512;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    fn gl_enum(self) -> GLenum {
        match self {
            Stage::Vertex => gl::VERTEX_SHADER,
            Stage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Vertex => write!(f, "vertex"),
            Stage::Fragment => write!(f, "fragment"),
        }
    }
}

/// A linked OpenGL shader program
pub struct Shader {
    pub id: u32,
}

impl Shader {
    /// The fixed program used to draw the triangle
    pub fn triangle() -> Result<Shader> {
        Self::from_source(TRIANGLE_VS, TRIANGLE_FS)
    }

    pub fn from_source(vs_src: &str, fs_src: &str) -> Result<Shader> {
        let vs_src = CString::new(vs_src).wrap_err("Vertex shader source contains a NUL byte")?;
        let fs_src =
            CString::new(fs_src).wrap_err("Fragment shader source contains a NUL byte")?;

        let vs = Self::compile_shader(&vs_src, Stage::Vertex)?;
        let fs = match Self::compile_shader(&fs_src, Stage::Fragment) {
            Ok(fs) => fs,
            Err(e) => {
                unsafe { gl::DeleteShader(vs) };
                return Err(e);
            }
        };

        let shader_program = Self::link_shaders(vs, fs)?;
        Ok(Shader { id: shader_program })
    }

    pub fn bind(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    fn compile_shader(src: &CString, stage: Stage) -> Result<u32> {
        unsafe {
            let shader = gl::CreateShader(stage.gl_enum());
            gl::ShaderSource(shader, 1, &src.as_ptr(), ptr::null());
            gl::CompileShader(shader);

            let mut res = 0;
            let mut info_log = [0u8; INFO_LOG_LEN];
            let mut info_len = 0;

            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut res);

            if res == 0 {
                gl::GetShaderInfoLog(
                    shader,
                    INFO_LOG_LEN as i32,
                    &mut info_len,
                    info_log.as_mut_ptr() as _,
                );
                gl::DeleteShader(shader);

                let info_msg = info_log_to_string(&info_log, info_len);
                return Err(eyre!("Failed to compile the {stage} shader: '{info_msg}'"));
            }

            Ok(shader)
        }
    }

    /// Links the program. Both shader objects are deleted afterwards, even on failure.
    fn link_shaders(vs: u32, fs: u32) -> Result<u32> {
        unsafe {
            let shader_program = gl::CreateProgram();
            gl::AttachShader(shader_program, vs);
            gl::AttachShader(shader_program, fs);
            gl::LinkProgram(shader_program);

            gl::DeleteShader(vs);
            gl::DeleteShader(fs);

            let mut res = 0;
            let mut info_log = [0u8; INFO_LOG_LEN];
            let mut info_len = 0;

            gl::GetProgramiv(shader_program, gl::LINK_STATUS, &mut res);

            if res == 0 {
                gl::GetProgramInfoLog(
                    shader_program,
                    INFO_LOG_LEN as i32,
                    &mut info_len,
                    info_log.as_mut_ptr() as _,
                );
                gl::DeleteProgram(shader_program);

                let info_msg = info_log_to_string(&info_log, info_len);
                return Err(eyre!("Failed to create a shader program: '{info_msg}'"));
            }

            Ok(shader_program)
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

/// Decodes an info log buffer, using only the `len` bytes the driver reported
fn info_log_to_string(buf: &[u8], len: i32) -> String {
    let len = (len.max(0) as usize).min(buf.len());
    let log = &buf[..len];
    let log = match log.iter().position(|&b| b == 0) {
        Some(nul) => &log[..nul],
        None => log,
    };

    String::from_utf8_lossy(log).trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ogl::{COLOR_INDEX, POS_INDEX};

    #[test]
    fn info_log_is_cut_at_reported_length() {
        let mut buf = [0u8; 32];
        buf[..12].copy_from_slice(b"0:1: error\nX");

        assert_eq!(info_log_to_string(&buf, 10), "0:1: error");
    }

    #[test]
    fn info_log_stops_at_nul() {
        let mut buf = [b'x'; 16];
        buf[3] = 0;

        assert_eq!(info_log_to_string(&buf, 16), "xxx");
    }

    #[test]
    fn info_log_handles_bogus_lengths() {
        let buf = *b"abc";

        assert_eq!(info_log_to_string(&buf, -4), "");
        assert_eq!(info_log_to_string(&buf, 100), "abc");
    }

    #[test]
    fn sources_target_glsl_460() {
        assert!(TRIANGLE_VS.starts_with("#version 460\n"));
        assert!(TRIANGLE_FS.starts_with("#version 460\n"));
    }

    #[test]
    fn vertex_inputs_match_attribute_locations() {
        let pos = format!("layout(location = {POS_INDEX}) in vec3 vertex_position;");
        let color = format!("layout(location = {COLOR_INDEX}) in vec3 vertex_color;");

        assert!(TRIANGLE_VS.contains(&pos));
        assert!(TRIANGLE_VS.contains(&color));
    }

    #[test]
    fn stages_are_linked_through_color() {
        assert!(TRIANGLE_VS.contains("out vec3 color;"));
        assert!(TRIANGLE_FS.contains("in vec3 color;"));
        assert!(TRIANGLE_FS.contains("frag_color = vec4(color, 1.0);"));
    }

    #[test]
    fn sources_have_no_interior_nul() {
        assert!(CString::new(TRIANGLE_VS).is_ok());
        assert!(CString::new(TRIANGLE_FS).is_ok());
    }

    #[test]
    fn nul_in_source_is_rejected_before_compiling() {
        let err = Shader::from_source("a\0b", TRIANGLE_FS).err().unwrap();
        assert!(err.to_string().contains("Vertex"));

        let err = Shader::from_source(TRIANGLE_VS, "x\0").err().unwrap();
        assert!(err.to_string().contains("Fragment"));
    }

    #[test]
    fn stage_names() {
        assert_eq!(Stage::Vertex.to_string(), "vertex");
        assert_eq!(Stage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }
}
