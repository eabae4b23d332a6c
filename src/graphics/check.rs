use crate::error::{Error, GlError};

/// Pops the oldest error recorded by OpenGL, logging it
pub unsafe fn gl_error() -> Option<GlError> {
    let error = GlError::from_code(gl::GetError());
    if let Some(error) = error {
        log::error!("{}", error);
    }
    error
}

/// Fails with the pending OpenGL error, if any, describing it with `context`
pub unsafe fn check_gl(context: &str) -> Result<(), Error> {
    match gl_error() {
        Some(error) => Err(Error::Gl {
            context: context.to_string(),
            error,
        }),
        None => Ok(()),
    }
}
