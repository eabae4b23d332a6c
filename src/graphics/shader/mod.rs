use crate::error::Error;

macro_rules! shader {
	($name: ident [$gl: ident]: $ext: literal) => {
		pub struct $name {
			id: u32,
			source: String,
		}

		impl $name {
			pub(super) fn handle(&self) -> u32 {
				self.id
			}

			/// Reads the source code from `path` and compiles it
			pub unsafe fn from_file(path: &std::path::Path) -> Result<Self, Error> {
				let source = std::fs::read_to_string(path).map_err(|source| Error::ShaderFile {
					kind: $ext,
					path: path.to_path_buf(),
					source,
				})?;
				log::debug!(concat!("compiling ", $ext, " shader {}"), path.display());
				Self::from_source(&path.display().to_string(), source)
			}

			/// Compiles the given source code, `name` only identifies it in the logs
			pub unsafe fn from_source(name: &str, source: String) -> Result<Self, Error> {
				// Create a new shader
				let id = gl::CreateShader(gl::$gl);
				// Attach the source code to it
				gl::ShaderSource(
					id,
					1,
					&string_to_cstring(source.as_str()).as_ptr(),
					std::ptr::null(),
				);
				gl::CompileShader(id); // Compile it

				// Checking shader compile status
				let mut status = 0;
				gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut status);
				let log = shader_log(id);
				if status == 0 {
					gl::DeleteShader(id);
					log::error!(concat!($ext, " shader {} log:\n{}"), name, log);
					Err(Error::Compile {
						kind: $ext,
						name: name.to_string(),
						log,
					})
				} else {
					if !log.is_empty() {
						log::warn!(concat!($ext, " shader {} log:\n{}"), name, log);
					}
					Ok(Self { id, source })
				}
			}
		}

		impl std::fmt::Debug for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				write!(f, concat!($ext, " source code:\n{}"), self.source)
			}
		}

		impl Drop for $name {
			fn drop(&mut self) {
				unsafe {
					gl::DeleteShader(self.id);
				}
			}
		}
	};
}

shader! {VertexShader[VERTEX_SHADER]: "vertex"}
shader! {FragmentShader[FRAGMENT_SHADER]: "fragment"}

pub use program::Program;
mod program;

use std::ffi::CString;

/// Retrieves the info log of a shader
unsafe fn shader_log(id: u32) -> String {
    // Get the legth of the info log
    let mut len = 0;
    gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
    // Allocate the memory to store the log
    let mut log = vec![0u8; len.max(0) as usize];
    if !log.is_empty() {
        // Retrive the info log
        gl::GetShaderInfoLog(id, len, &mut len, log.as_mut_ptr() as *mut _);
    }
    log_to_string(log)
}

// Converts a NUL terminated log filled by OpenGL into a trimmed String
fn log_to_string(bytes: Vec<u8>) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).trim_end().to_string()
}

// Converts a String into a CString
pub fn string_to_cstring(string: &str) -> CString {
    unsafe { CString::from_vec_unchecked(string.as_bytes().to_vec()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logs_stop_at_the_first_nul() {
        assert_eq!(log_to_string(b"0:12: error\n\0garbage".to_vec()), "0:12: error");
        assert_eq!(log_to_string(vec![0; 8]), "");
        assert_eq!(log_to_string(Vec::new()), "");
    }
}
