use super::VertexBufferObject;
use crate::error::Error;
use gl::{self, types as gl_t};
use std::path::Path;

pub struct Texture {
    id: u32,
    width: u32,
    height: u32,
}

impl Texture {
    /// Uploads an RGBA image, `data` must hold `width * height * 4` bytes
    ///
    /// NOTE: after this call there will be no texture binded
    pub unsafe fn new(width: u32, height: u32, data: &[u8]) -> Self {
        assert!(data.len() == width as usize * height as usize * 4);
        let mut id: gl_t::GLuint = 0;
        // Genereate a new texture
        gl::GenTextures(1, &mut id);
        gl::BindTexture(gl::TEXTURE_2D, id);

        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            gl::RGBA as i32,
            width as i32,
            height as i32,
            0,
            gl::RGBA as u32,
            gl::UNSIGNED_BYTE,
            data.as_ptr() as *const _,
        );
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as i32);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as i32);
        gl::TexParameteri(
            gl::TEXTURE_2D,
            gl::TEXTURE_MIN_FILTER,
            gl::LINEAR_MIPMAP_LINEAR as i32,
        );
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
        gl::GenerateMipmap(gl::TEXTURE_2D);
        Self::unbind();
        Self { id, width, height }
    }

    /// Decodes an image file and uploads it with the first row at the bottom, as OpenGL expects
    pub unsafe fn from_file(path: &Path) -> Result<Self, Error> {
        let image = image::open(path)
            .map_err(|source| Error::Texture {
                path: path.to_path_buf(),
                source,
            })?
            .flipv()
            .into_rgba8();
        let (width, height) = image.dimensions();
        log::info!("loaded texture {} ({}x{})", path.display(), width, height);
        Ok(Self::new(width, height, image.as_raw()))
    }

    /// A black and white checkerboard of `size`x`size` pixels split in `cells`x`cells` squares
    pub unsafe fn checkerboard(size: u32, cells: u32) -> Self {
        Self::new(size, size, &checkerboard_pixels(size, cells))
    }

    pub unsafe fn bind(tex: &Self) {
        gl::BindTexture(gl::TEXTURE_2D, tex.id);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub unsafe fn set_active_unit(unit: u32) {
        gl::ActiveTexture(gl::TEXTURE0 + unit);
    }

    pub unsafe fn unbind() {
        gl::BindTexture(gl::TEXTURE_2D, 0);
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

/// A texture whose texels are the content of a buffer object,
/// shaders read it with `texelFetch` on a `samplerBuffer`
pub struct BufferTexture {
    id: u32,
}

impl BufferTexture {
    /// NOTE: after this call the new texture will be binded
    pub unsafe fn new(buffer: &VertexBufferObject, format: u32) -> Self {
        let mut id: gl_t::GLuint = 0;
        gl::GenTextures(1, &mut id);
        gl::BindTexture(gl::TEXTURE_BUFFER, id);
        gl::TexBuffer(gl::TEXTURE_BUFFER, format, buffer.handle());
        Self { id }
    }

    pub unsafe fn bind(tex: &Self) {
        gl::BindTexture(gl::TEXTURE_BUFFER, tex.id);
    }
}

impl Drop for BufferTexture {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

/// RGBA pixels of a checkerboard whose first cell is white
fn checkerboard_pixels(size: u32, cells: u32) -> Vec<u8> {
    let cell = (size / cells.max(1)).max(1);
    let mut pixels = Vec::with_capacity(size as usize * size as usize * 4);
    for y in 0..size {
        for x in 0..size {
            let v = if (x / cell + y / cell) % 2 == 0 { 255 } else { 0 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates_cells() {
        let pixels = checkerboard_pixels(4, 2);
        assert_eq!(pixels.len(), 4 * 4 * 4);
        let texel = |x: usize, y: usize| &pixels[(y * 4 + x) * 4..][..4];
        assert_eq!(texel(0, 0), &[255, 255, 255, 255]);
        assert_eq!(texel(1, 1), &[255, 255, 255, 255]);
        assert_eq!(texel(2, 0), &[0, 0, 0, 255]);
        assert_eq!(texel(0, 3), &[0, 0, 0, 255]);
        assert_eq!(texel(3, 3), &[255, 255, 255, 255]);
    }
}
