use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error codes `glGetError` can report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlError {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    InvalidFramebufferOperation,
    OutOfMemory,
    Unknown(u32),
}

impl GlError {
    /// Decodes the value returned by `glGetError`, `None` means no error was recorded
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            gl::NO_ERROR => None,
            gl::INVALID_ENUM => Some(Self::InvalidEnum),
            gl::INVALID_VALUE => Some(Self::InvalidValue),
            gl::INVALID_OPERATION => Some(Self::InvalidOperation),
            gl::INVALID_FRAMEBUFFER_OPERATION => Some(Self::InvalidFramebufferOperation),
            gl::OUT_OF_MEMORY => Some(Self::OutOfMemory),
            other => Some(Self::Unknown(other)),
        }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnum => f.write_str("GL_INVALID_ENUM"),
            Self::InvalidValue => f.write_str("GL_INVALID_VALUE"),
            Self::InvalidOperation => f.write_str("GL_INVALID_OPERATION"),
            Self::InvalidFramebufferOperation => f.write_str("GL_INVALID_FRAMEBUFFER_OPERATION"),
            Self::OutOfMemory => f.write_str("GL_OUT_OF_MEMORY"),
            Self::Unknown(code) => write!(f, "unknown GL error {:#06x}", code),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("couldn't open the {kind} shader file {}: {source}", path.display())]
    ShaderFile {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{kind} shader {name} compile error:\n{log}")]
    Compile {
        kind: &'static str,
        name: String,
        log: String,
    },
    #[error("program link error:\n{log}")]
    Link { log: String },
    #[error("couldn't get the uniform for {0}")]
    UniformNotFound(String),
    #[error("couldn't get the vertex attribute for {0}")]
    AttribNotFound(String),
    #[error("{context}: {error}")]
    Gl { context: String, error: GlError },
    #[error("couldn't load the texture {}: {source}", path.display())]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to create the window: {0}")]
    Window(#[from] glutin::CreationError),
    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::ContextError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_gl_error_codes() {
        assert_eq!(GlError::from_code(gl::NO_ERROR), None);
        assert_eq!(
            GlError::from_code(gl::INVALID_OPERATION),
            Some(GlError::InvalidOperation)
        );
        assert_eq!(GlError::from_code(0x0503), Some(GlError::Unknown(0x0503)));
        assert_eq!(GlError::OutOfMemory.to_string(), "GL_OUT_OF_MEMORY");
        assert_eq!(
            GlError::Unknown(0x0503).to_string(),
            "unknown GL error 0x0503"
        );
    }

    #[test]
    fn gl_errors_name_their_context() {
        let error = Error::Gl {
            context: "attaching the vertex shader".to_string(),
            error: GlError::InvalidValue,
        };
        assert_eq!(
            error.to_string(),
            "attaching the vertex shader: GL_INVALID_VALUE"
        );
        let error = Error::UniformNotFound("model".to_string());
        assert_eq!(error.to_string(), "couldn't get the uniform for model");
    }
}
