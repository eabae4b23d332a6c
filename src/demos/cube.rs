use super::Demo;
use crate::config::Config;
use crate::error::Error;
use crate::graphics::{
    check_gl, BufferTarget, BufferUsage, Program, Texture, VertexArrayObject, VertexBufferObject,
};
use crate::math::{Matrix44f, Vec3f, TWICE_PI};
use std::mem::size_of;
use std::path::PathBuf;
use std::time::Duration;

const FOV: f32 = 45.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

/// Radians per second
const ANGULAR_SPEED: f32 = 0.8;

/// Values per vertex: position (x, y, z) and texture coordinates (u, v)
const VERTEX_LEN: usize = 5;

/// Two counter-clockwise triangles per face
#[rustfmt::skip]
const VERTICES: [f32; 36 * VERTEX_LEN] = [
    // back
    -0.5, -0.5, -0.5,  1.0, 0.0,
    -0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5, -0.5,  0.0, 1.0,
     0.5,  0.5, -0.5,  0.0, 1.0,
     0.5, -0.5, -0.5,  0.0, 0.0,
    -0.5, -0.5, -0.5,  1.0, 0.0,
    // front
    -0.5, -0.5,  0.5,  0.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  1.0, 1.0,
    -0.5,  0.5,  0.5,  0.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 0.0,
    // left
    -0.5,  0.5,  0.5,  1.0, 1.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 0.0,
    -0.5, -0.5, -0.5,  0.0, 0.0,
    -0.5, -0.5,  0.5,  1.0, 0.0,
    -0.5,  0.5,  0.5,  1.0, 1.0,
    // right
     0.5,  0.5,  0.5,  0.0, 1.0,
     0.5, -0.5,  0.5,  0.0, 0.0,
     0.5, -0.5, -0.5,  1.0, 0.0,
     0.5, -0.5, -0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
     0.5,  0.5,  0.5,  0.0, 1.0,
    // bottom
    -0.5, -0.5, -0.5,  0.0, 0.0,
     0.5, -0.5, -0.5,  1.0, 0.0,
     0.5, -0.5,  0.5,  1.0, 1.0,
     0.5, -0.5,  0.5,  1.0, 1.0,
    -0.5, -0.5,  0.5,  0.0, 1.0,
    -0.5, -0.5, -0.5,  0.0, 0.0,
    // top
    -0.5,  0.5, -0.5,  0.0, 1.0,
    -0.5,  0.5,  0.5,  0.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5,  0.5,  1.0, 0.0,
     0.5,  0.5, -0.5,  1.0, 1.0,
    -0.5,  0.5, -0.5,  0.0, 1.0,
];

struct Uniforms {
    model: i32,
    view: i32,
    projection: i32,
    tex: i32,
}

impl Uniforms {
    unsafe fn locate(program: &Program) -> Result<Self, Error> {
        Ok(Self {
            model: program.uniform_location("model")?,
            view: program.uniform_location("view")?,
            projection: program.uniform_location("projection")?,
            tex: program.uniform_location("tex")?,
        })
    }
}

/// A textured cube seen through a perspective camera
pub struct Cube {
    shaders: (PathBuf, PathBuf),
    program: Program,
    uniforms: Uniforms,
    vao: VertexArrayObject,
    _vbo: VertexBufferObject,
    texture: Texture,
    view: Matrix44f,
    projection: Matrix44f,
}

/// The projection for a framebuffer of the given size
fn projection(width: u32, height: u32) -> Matrix44f {
    let aspect_ratio = width.max(1) as f32 / height.max(1) as f32;
    Matrix44f::perspective(FOV, aspect_ratio, NEAR, FAR)
}

impl Cube {
    pub unsafe fn new(config: &Config, width: u32, height: u32) -> Result<Self, Error> {
        let shaders = (config.shader("cube.vert"), config.shader("cube.frag"));
        let program = Program::from_files(&shaders.0, &shaders.1)?;
        let uniforms = Uniforms::locate(&program)?;

        let texture = match config.texture {
            Some(ref path) => Texture::from_file(path)?,
            None => Texture::checkerboard(256, 8),
        };
        log::debug!("cube texture: {}x{}", texture.width(), texture.height());

        let vao = VertexArrayObject::new();
        VertexArrayObject::bind(&vao);
        let vbo = VertexBufferObject::new(BufferTarget::Array, &VERTICES, BufferUsage::StaticDraw);

        let stride = VERTEX_LEN * size_of::<f32>();
        let position = program.vertex_attrib_location("position")? as u32;
        VertexArrayObject::f32_attrib_format(position, 3, stride, 0);
        let uv = program.vertex_attrib_location("uv")? as u32;
        VertexArrayObject::f32_attrib_format(uv, 2, stride, 3 * size_of::<f32>());

        VertexArrayObject::unbind();
        VertexBufferObject::unbind(BufferTarget::Array);
        check_gl("creating the cube")?;

        let view = Matrix44f::look_at(
            Vec3f::new(0.0, 1.5, 4.0),
            Vec3f::new(0.0, 0.0, 0.0),
            Vec3f::new(0.0, 1.0, 0.0),
        );

        Ok(Self {
            shaders,
            program,
            uniforms,
            vao,
            _vbo: vbo,
            texture,
            view,
            projection: projection(width, height),
        })
    }
}

impl Demo for Cube {
    fn name(&self) -> &'static str {
        "cube"
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.projection = projection(width, height);
    }

    fn reload(&mut self) -> Result<(), Error> {
        let program = unsafe { Program::from_files(&self.shaders.0, &self.shaders.1)? };
        self.uniforms = unsafe { Uniforms::locate(&program)? };
        self.program = program;
        Ok(())
    }

    fn render(&mut self, elapsed: Duration) -> Result<(), Error> {
        let angle = (elapsed.as_secs_f32() * ANGULAR_SPEED).rem_euclid(TWICE_PI);
        let mut model = Matrix44f::identity();
        model.add_y_rotation(angle);

        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::DepthFunc(gl::LESS);
            gl::ClearColor(0.2, 0.3, 0.3, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);

            Program::bind(&self.program);
            Program::set_mat4(self.uniforms.model, &model);
            Program::set_mat4(self.uniforms.view, &self.view);
            Program::set_mat4(self.uniforms.projection, &self.projection);
            Program::set_i32(self.uniforms.tex, 0);

            Texture::set_active_unit(0);
            Texture::bind(&self.texture);
            VertexArrayObject::bind(&self.vao);
            gl::DrawArrays(gl::TRIANGLES, 0, (VERTICES.len() / VERTEX_LEN) as i32);
            check_gl("drawing the cube")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_vertex_lies_on_the_unit_cube() {
        for vertex in VERTICES.chunks_exact(VERTEX_LEN) {
            let on_face = vertex[..3].iter().filter(|v| v.abs() == 0.5).count();
            assert_eq!(on_face, 3, "{:?} is not a corner", vertex);
            assert!(vertex[3..].iter().all(|uv| *uv == 0.0 || *uv == 1.0));
        }
    }

    #[test]
    fn projection_follows_the_aspect_ratio() {
        let wide = projection(1600, 800);
        let square = projection(800, 800);
        assert!((wide.0[0][0] * 2.0 - square.0[0][0]).abs() < 1e-5);
        assert_eq!(wide.0[1][1], square.0[1][1]);
        // A minimized window must not produce a degenerate matrix
        assert!(projection(0, 0).0[0][0].is_finite());
    }
}
