use super::Demo;
use crate::config::Config;
use crate::error::Error;
use crate::graphics::{
    check_gl, BufferTarget, BufferUsage, Program, VertexArrayObject, VertexBufferObject,
};
use std::mem::size_of;
use std::path::PathBuf;
use std::time::Duration;

/// Position (x, y, z) followed by the color (r, g, b) of each corner
#[rustfmt::skip]
const VERTICES: [f32; 18] = [
    -0.5, -0.5, 0.0,    1.0, 0.0, 0.0,
     0.5, -0.5, 0.0,    0.0, 1.0, 0.0,
     0.0,  0.5, 0.0,    0.0, 0.0, 1.0,
];

/// A single colored triangle, the smallest program that goes through the whole pipeline
pub struct Triangle {
    shaders: (PathBuf, PathBuf),
    program: Program,
    vao: VertexArrayObject,
    _vbo: VertexBufferObject,
}

impl Triangle {
    pub unsafe fn new(config: &Config) -> Result<Self, Error> {
        let shaders = (config.shader("triangle.vert"), config.shader("triangle.frag"));
        let program = Program::from_files(&shaders.0, &shaders.1)?;

        let vao = VertexArrayObject::new();
        VertexArrayObject::bind(&vao);
        let vbo = VertexBufferObject::new(BufferTarget::Array, &VERTICES, BufferUsage::StaticDraw);

        let stride = 6 * size_of::<f32>();
        let position = program.vertex_attrib_location("position")? as u32;
        VertexArrayObject::f32_attrib_format(position, 3, stride, 0);
        let color = program.vertex_attrib_location("color")? as u32;
        VertexArrayObject::f32_attrib_format(color, 3, stride, 3 * size_of::<f32>());

        VertexArrayObject::unbind();
        VertexBufferObject::unbind(BufferTarget::Array);
        check_gl("creating the triangle")?;

        Ok(Self {
            shaders,
            program,
            vao,
            _vbo: vbo,
        })
    }
}

impl Demo for Triangle {
    fn name(&self) -> &'static str {
        "triangle"
    }

    fn reload(&mut self) -> Result<(), Error> {
        // The attribute locations are fixed by the layout qualifiers
        self.program = unsafe { Program::from_files(&self.shaders.0, &self.shaders.1)? };
        Ok(())
    }

    fn render(&mut self, _elapsed: Duration) -> Result<(), Error> {
        unsafe {
            gl::ClearColor(0.1, 0.1, 0.1, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
            Program::bind(&self.program);
            VertexArrayObject::bind(&self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, 3);
            check_gl("drawing the triangle")
        }
    }
}
