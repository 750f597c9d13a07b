use std::{
    ffi::{c_void, CStr},
    mem::size_of,
    ptr,
};

use eyre::{eyre, Result};
use gl::types::{GLchar, GLenum};
use glam::Vec3;
use log::{error, log, Level};

/// Attribute location of vertex positions (`layout(location = 0)`)
pub const POS_INDEX: u32 = 0;
/// Attribute location of vertex colors (`layout(location = 1)`)
pub const COLOR_INDEX: u32 = 1;

/// Buffer creation notice on NVidia cards
const NVIDIA_BUFFER_INFO_ID: u32 = 131185;

/// Creates an ARRAY_BUFFER from `data` and binds it to the attribute `attrib_index`
/// of the currently bound VAO as tightly packed vec3 floats. Returns the buffer id.
///
/// # Safety
/// A GL context must be current and a VAO must be bound.
pub unsafe fn create_float_buf(data: &[Vec3], attrib_index: u32) -> u32 {
    let mut buffer = 0;
    gl::GenBuffers(1, &mut buffer);
    gl::BindBuffer(gl::ARRAY_BUFFER, buffer);

    gl::BufferData(
        gl::ARRAY_BUFFER,
        (data.len() * size_of::<Vec3>()) as isize,
        data.as_ptr() as _,
        gl::STATIC_DRAW,
    );

    gl::EnableVertexAttribArray(attrib_index);
    gl::VertexAttribPointer(attrib_index, 3, gl::FLOAT, gl::FALSE, 0, ptr::null());

    buffer
}

/// Fails if the loader couldn't resolve the entry points this program calls
pub fn check_loaded() -> Result<()> {
    let loaded = gl::CreateShader::is_loaded()
        && gl::CreateProgram::is_loaded()
        && gl::GenVertexArrays::is_loaded()
        && gl::BufferData::is_loaded()
        && gl::DrawArrays::is_loaded();

    if !loaded {
        return Err(eyre!("can't load OpenGL functions"));
    }

    Ok(())
}

/// Reads one of the glGetString values (GL_RENDERER, GL_VERSION, ...)
pub fn gl_string(name: GLenum) -> String {
    unsafe {
        let s = gl::GetString(name);
        if s.is_null() {
            return String::from("<unknown>");
        }

        CStr::from_ptr(s as *const GLchar)
            .to_string_lossy()
            .into_owned()
    }
}

pub fn init_debug() {
    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_callback), ptr::null());
        gl::DebugMessageControl(
            gl::DONT_CARE,
            gl::DONT_CARE,
            gl::DONT_CARE,
            0,
            ptr::null(),
            gl::TRUE,
        );
    };
}

/// Log level of a GL debug message, `None` if it should be dropped
fn debug_level(typ: GLenum, id: u32, severity: GLenum) -> Option<Level> {
    if id == NVIDIA_BUFFER_INFO_ID {
        return None;
    }

    if typ == gl::DEBUG_TYPE_ERROR {
        return Some(Level::Error);
    }

    let level = match severity {
        gl::DEBUG_SEVERITY_HIGH => Level::Error,
        gl::DEBUG_SEVERITY_MEDIUM => Level::Warn,
        gl::DEBUG_SEVERITY_LOW => Level::Info,
        gl::DEBUG_SEVERITY_NOTIFICATION => Level::Debug,
        _ => Level::Debug,
    };

    Some(level)
}

extern "system" fn gl_debug_callback(
    src: GLenum,
    typ: GLenum,
    id: u32,
    severity: GLenum,
    _len: i32,
    msg: *const GLchar,
    _user_param: *mut c_void,
) {
    let Some(level) = debug_level(typ, id, severity) else {
        return;
    };

    if msg.is_null() {
        error!("OpenGL debug callback received a null message (id {id})");
        return;
    }

    let msg = unsafe { CStr::from_ptr(msg) };
    log!(
        level,
        "OpenGL debug message: source {:#x}, type {:#x}: '{}'",
        src,
        typ,
        msg.to_string_lossy()
    );
}
