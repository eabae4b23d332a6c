use super::Demo;
use crate::config::Config;
use crate::error::Error;
use crate::graphics::{
    check_gl, BufferTarget, BufferUsage, Program, VertexArrayObject, VertexBufferObject,
};
use crate::math::{Matrix44f, TWICE_PI};
use std::mem::size_of;
use std::path::PathBuf;
use std::time::Duration;

/// Position (x, y) and color (r, g, b) of the four corners
#[rustfmt::skip]
const VERTICES: [f32; 20] = [
    -0.5,  0.5,    1.0, 0.0, 0.0,
     0.5,  0.5,    0.0, 1.0, 0.0,
     0.5, -0.5,    0.0, 0.0, 1.0,
    -0.5, -0.5,    1.0, 1.0, 0.0,
];

const INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Radians per second
const ANGULAR_SPEED: f32 = 1.0;

/// A quad drawn from an index buffer, spinning around the y axis
pub struct Quad {
    shaders: (PathBuf, PathBuf),
    program: Program,
    model_loc: i32,
    vao: VertexArrayObject,
    _vbo: VertexBufferObject,
    ebo: VertexBufferObject,
}

impl Quad {
    pub unsafe fn new(config: &Config) -> Result<Self, Error> {
        let shaders = (config.shader("quad.vert"), config.shader("quad.frag"));
        let program = Program::from_files(&shaders.0, &shaders.1)?;
        let model_loc = program.uniform_location("model")?;

        let vao = VertexArrayObject::new();
        VertexArrayObject::bind(&vao);
        let vbo = VertexBufferObject::new(BufferTarget::Array, &VERTICES, BufferUsage::StaticDraw);
        // The element buffer binding is recorded in the vertex array
        let ebo = VertexBufferObject::new(
            BufferTarget::ElementArray,
            &INDICES,
            BufferUsage::StaticDraw,
        );

        let stride = 5 * size_of::<f32>();
        let position = program.vertex_attrib_location("position")? as u32;
        VertexArrayObject::f32_attrib_format(position, 2, stride, 0);
        let color = program.vertex_attrib_location("color")? as u32;
        VertexArrayObject::f32_attrib_format(color, 3, stride, 2 * size_of::<f32>());

        VertexArrayObject::unbind();
        VertexBufferObject::unbind(BufferTarget::Array);
        check_gl("creating the quad")?;

        Ok(Self {
            shaders,
            program,
            model_loc,
            vao,
            _vbo: vbo,
            ebo,
        })
    }
}

impl Demo for Quad {
    fn name(&self) -> &'static str {
        "quad"
    }

    fn reload(&mut self) -> Result<(), Error> {
        let program = unsafe { Program::from_files(&self.shaders.0, &self.shaders.1)? };
        self.model_loc = unsafe { program.uniform_location("model")? };
        self.program = program;
        Ok(())
    }

    fn render(&mut self, elapsed: Duration) -> Result<(), Error> {
        let angle = (elapsed.as_secs_f32() * ANGULAR_SPEED).rem_euclid(TWICE_PI);
        let mut model = Matrix44f::identity();
        model.add_y_rotation(angle);

        unsafe {
            gl::ClearColor(0.1, 0.1, 0.1, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
            Program::bind(&self.program);
            Program::set_mat4(self.model_loc, &model);
            VertexArrayObject::bind(&self.vao);
            gl::DrawElements(
                gl::TRIANGLES,
                self.ebo.len() as i32,
                gl::UNSIGNED_INT,
                std::ptr::null(),
            );
            check_gl("drawing the quad")
        }
    }
}
