use super::{log_to_string, string_to_cstring, FragmentShader, VertexShader};
use crate::error::Error;
use crate::graphics::check_gl;
use crate::math::Matrix44f;
use std::path::Path;

pub struct Program {
    id: u32,
}

impl Program {
    /// Links a vertex and a fragment shader into a new program
    pub unsafe fn new(vs: &VertexShader, fs: &FragmentShader) -> Result<Self, Error> {
        let program = Self {
            id: gl::CreateProgram(),
        };
        gl::AttachShader(program.id, vs.handle());
        check_gl("attaching the vertex shader")?;
        gl::AttachShader(program.id, fs.handle());
        check_gl("attaching the fragment shader")?;
        program.link()?;
        Ok(program)
    }

    /// Compiles both shaders from their files and links them
    pub unsafe fn from_files(vs: &Path, fs: &Path) -> Result<Self, Error> {
        let vs = VertexShader::from_file(vs)?;
        let fs = FragmentShader::from_file(fs)?;
        Self::new(&vs, &fs)
    }

    /// Links a vertex-only program whose `varyings` are captured by transform feedback,
    /// each one into its own buffer binding
    pub unsafe fn with_feedback(vs: &VertexShader, varyings: &[&str]) -> Result<Self, Error> {
        let program = Self {
            id: gl::CreateProgram(),
        };
        gl::AttachShader(program.id, vs.handle());
        check_gl("attaching the update shader")?;

        let names: Vec<_> = varyings.iter().map(|v| string_to_cstring(v)).collect();
        let pointers: Vec<_> = names.iter().map(|v| v.as_ptr()).collect();
        gl::TransformFeedbackVaryings(
            program.id,
            pointers.len() as i32,
            pointers.as_ptr(),
            gl::SEPARATE_ATTRIBS,
        );
        check_gl("declaring the transform feedback varyings")?;

        program.link()?;
        Ok(program)
    }

    unsafe fn link(&self) -> Result<(), Error> {
        gl::LinkProgram(self.id);
        check_gl("linking the program")?;

        let mut status = 0;
        gl::GetProgramiv(self.id, gl::LINK_STATUS, &mut status);
        let log = self.log();
        if status == 0 {
            log::error!("program log:\n{}", log);
            Err(Error::Link { log })
        } else {
            if !log.is_empty() {
                log::warn!("program log:\n{}", log);
            }
            Ok(())
        }
    }

    unsafe fn log(&self) -> String {
        let mut len = 0;
        gl::GetProgramiv(self.id, gl::INFO_LOG_LENGTH, &mut len);
        let mut log = vec![0u8; len.max(0) as usize];
        if !log.is_empty() {
            gl::GetProgramInfoLog(self.id, len, &mut len, log.as_mut_ptr() as *mut _);
        }
        log_to_string(log)
    }

    pub unsafe fn uniform_location(&self, name: &str) -> Result<i32, Error> {
        let loc = gl::GetUniformLocation(self.id, string_to_cstring(name).as_ptr());
        if loc == -1 {
            Err(Error::UniformNotFound(name.to_string()))
        } else {
            Ok(loc)
        }
    }

    pub unsafe fn vertex_attrib_location(&self, name: &str) -> Result<i32, Error> {
        let loc = gl::GetAttribLocation(self.id, string_to_cstring(name).as_ptr());
        if loc == -1 {
            Err(Error::AttribNotFound(name.to_string()))
        } else {
            Ok(loc)
        }
    }

    /// NOTE: the program must be bound
    pub unsafe fn set_mat4(loc: i32, matrix: &Matrix44f) {
        gl::UniformMatrix4fv(loc, 1, gl::FALSE, matrix.as_ptr());
    }

    /// NOTE: the program must be bound
    pub unsafe fn set_i32(loc: i32, value: i32) {
        gl::Uniform1i(loc, value);
    }

    pub unsafe fn bind(program: &Self) {
        gl::UseProgram(program.id);
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}
