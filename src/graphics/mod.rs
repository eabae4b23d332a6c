//! This is a thin wrapper around basic OpenGL calls that doesn't guarantee
//! any safety (thus everything is unsafe): a context must be current
//! and the functions loaded before calling any of them
mod check;
mod shader;
mod texture;
mod vao;
mod vbo;

pub use check::check_gl;
pub use shader::{Program, VertexShader};
pub use texture::{BufferTexture, Texture};
pub use vao::VertexArrayObject;
pub use vbo::{BufferTarget, BufferUsage, VertexBufferObject};

/// Reads one of the `glGetString` values, e.g. `gl::RENDERER`
pub unsafe fn gl_string(name: u32) -> String {
    let ptr = gl::GetString(name);
    if ptr.is_null() {
        String::from("<unknown>")
    } else {
        std::ffi::CStr::from_ptr(ptr as *const _)
            .to_string_lossy()
            .into_owned()
    }
}
