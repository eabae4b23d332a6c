//! A grid of masses linked by springs, advanced entirely on the GPU
//!
//! The update shader reads the positions and velocities of the previous
//! step and transform feedback writes the new ones into a second set of
//! buffers. The two sets swap roles at every pass, the host only decides
//! which one is read and which one is written.

use super::Demo;
use crate::config::{Config, GridSize};
use crate::error::Error;
use crate::graphics::{
    check_gl, BufferTarget, BufferTexture, BufferUsage, Program, VertexArrayObject,
    VertexBufferObject, VertexShader,
};
use crate::math::{Vec3f, Vec4f, Vec4i};
use glutin::event::VirtualKeyCode;
use std::path::PathBuf;
use std::time::Duration;

/// Outputs of the update shader, captured in this order
const FEEDBACK_VARYINGS: [&str; 2] = ["tf_position_mass", "tf_velocity"];

const POINT_SIZE: f32 = 4.0;

/// Initial state of the simulation, laid out the way it is uploaded
#[derive(Clone, Copy, Debug)]
pub struct Grid {
    size: GridSize,
}

impl Grid {
    pub fn new(size: GridSize) -> Self {
        Self { size }
    }

    pub fn points(&self) -> usize {
        self.size.width * self.size.height
    }

    /// Number of springs: every horizontal and every vertical pair of neighbours
    pub fn connections(&self) -> usize {
        let GridSize { width, height } = self.size;
        (width - 1) * height + (height - 1) * width
    }

    /// A slightly bent sheet centered on the origin, `w` is the mass of the point
    pub fn initial_positions(&self) -> Vec<Vec4f> {
        let GridSize { width, height } = self.size;
        let mut positions = Vec::with_capacity(self.points());
        for j in 0..height {
            let fj = j as f32 / height as f32;
            for i in 0..width {
                let fi = i as f32 / width as f32;
                positions.push(Vec4f::new(
                    (fi - 0.5) * width as f32,
                    (fj - 0.5) * height as f32,
                    0.6 * fi.sin() * fj.cos(),
                    1.0,
                ));
            }
        }
        positions
    }

    pub fn initial_velocities(&self) -> Vec<Vec3f> {
        vec![Vec3f::default(); self.points()]
    }

    /// The indices of the left, lower, right and upper neighbours of each point, `-1` when absent
    ///
    /// The points of the last row have no connections at all: the update
    /// shader treats them as fixed and the rest of the grid hangs from them
    pub fn connection_vectors(&self) -> Vec<Vec4i> {
        let GridSize { width, height } = self.size;
        let mut connections = Vec::with_capacity(self.points());
        for j in 0..height {
            for i in 0..width {
                let n = (j * width + i) as i32;
                let mut c = Vec4i::splat(-1);
                if j != height - 1 {
                    if i != 0 {
                        c[0] = n - 1;
                    }
                    if j != 0 {
                        c[1] = n - width as i32;
                    }
                    if i != width - 1 {
                        c[2] = n + 1;
                    }
                    c[3] = n + width as i32;
                }
                connections.push(c);
            }
        }
        connections
    }

    /// Pairs of point indices drawn as lines, rows first and then columns
    pub fn line_indices(&self) -> Vec<u32> {
        let GridSize { width, height } = self.size;
        let mut indices = Vec::with_capacity(self.connections() * 2);
        for j in 0..height {
            for i in 0..width - 1 {
                indices.push((i + j * width) as u32);
                indices.push((1 + i + j * width) as u32);
            }
        }
        for i in 0..width {
            for j in 0..height - 1 {
                indices.push((i + j * width) as u32);
                indices.push((width + i + j * width) as u32);
            }
        }
        indices
    }
}

/// Tracks which of the two buffer sets holds the latest state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PingPong {
    iteration: u64,
}

impl PingPong {
    /// The set read by the next pass
    pub fn source(&self) -> usize {
        (self.iteration & 1) as usize
    }

    /// Advances by one pass, returning the sets it reads from and writes to
    pub fn step(&mut self) -> (usize, usize) {
        let source = self.source();
        self.iteration += 1;
        (source, self.source())
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }
}

/// One of the two copies of the simulation state
struct StateBuffers {
    vao: VertexArrayObject,
    positions: VertexBufferObject,
    velocities: VertexBufferObject,
    /// The positions seen as a texture, so each point can look its neighbours up
    position_tex: BufferTexture,
}

struct Programs {
    update: Program,
    render: Program,
}

impl Programs {
    unsafe fn load(paths: &ShaderPaths) -> Result<Self, Error> {
        let vs = VertexShader::from_file(&paths.update)?;
        let update = Program::with_feedback(&vs, &FEEDBACK_VARYINGS)?;
        let render = Program::from_files(&paths.render_vert, &paths.render_frag)?;
        Ok(Self { update, render })
    }
}

struct ShaderPaths {
    update: PathBuf,
    render_vert: PathBuf,
    render_frag: PathBuf,
}

pub struct SpringMass {
    grid: Grid,
    shaders: ShaderPaths,
    programs: Programs,
    states: [StateBuffers; 2],
    _connections: VertexBufferObject,
    lines: VertexBufferObject,
    ping_pong: PingPong,
    iterations_per_frame: u32,
    draw_points: bool,
    draw_lines: bool,
}

impl SpringMass {
    pub unsafe fn new(config: &Config) -> Result<Self, Error> {
        let shaders = ShaderPaths {
            update: config.shader("springmass/update.vert"),
            render_vert: config.shader("springmass/render.vert"),
            render_frag: config.shader("springmass/render.frag"),
        };
        let programs = Programs::load(&shaders)?;

        let grid = Grid::new(config.grid);
        log::info!(
            "spring-mass grid: {} points, {} springs, {} passes per frame",
            grid.points(),
            grid.connections(),
            config.iterations_per_frame
        );
        let positions = grid.initial_positions();
        let velocities = grid.initial_velocities();

        let connections = VertexBufferObject::new(
            BufferTarget::Array,
            &grid.connection_vectors(),
            BufferUsage::StaticDraw,
        );
        let state = || -> StateBuffers {
            let vao = VertexArrayObject::new();
            VertexArrayObject::bind(&vao);

            let positions =
                VertexBufferObject::new(BufferTarget::Array, &positions, BufferUsage::DynamicCopy);
            VertexArrayObject::f32_attrib_format(0, 4, 0, 0);

            let velocities =
                VertexBufferObject::new(BufferTarget::Array, &velocities, BufferUsage::DynamicCopy);
            VertexArrayObject::f32_attrib_format(1, 3, 0, 0);

            VertexBufferObject::bind(&connections);
            VertexArrayObject::i32_attrib_format(2, 4, 0, 0);

            let position_tex = BufferTexture::new(&positions, gl::RGBA32F);
            StateBuffers {
                vao,
                positions,
                velocities,
                position_tex,
            }
        };
        let states = [state(), state()];
        // Element buffers can only be bound with a vertex array bound
        let lines = VertexBufferObject::new(
            BufferTarget::ElementArray,
            &grid.line_indices(),
            BufferUsage::StaticDraw,
        );
        VertexArrayObject::unbind();
        VertexBufferObject::unbind(BufferTarget::Array);
        check_gl("creating the spring-mass buffers")?;

        Ok(Self {
            grid,
            shaders,
            programs,
            states,
            _connections: connections,
            lines,
            ping_pong: PingPong::default(),
            iterations_per_frame: config.iterations_per_frame,
            draw_points: true,
            draw_lines: true,
        })
    }

    /// Runs the update shader once per iteration, capturing its outputs
    unsafe fn simulate(&mut self) -> Result<(), Error> {
        Program::bind(&self.programs.update);
        gl::Enable(gl::RASTERIZER_DISCARD);

        for _ in 0..self.iterations_per_frame {
            let (source, target) = self.ping_pong.step();
            let (source, target) = (&self.states[source], &self.states[target]);
            VertexArrayObject::bind(&source.vao);
            BufferTexture::bind(&source.position_tex);
            target.positions.bind_feedback(0);
            target.velocities.bind_feedback(1);
            gl::BeginTransformFeedback(gl::POINTS);
            gl::DrawArrays(gl::POINTS, 0, self.grid.points() as i32);
            gl::EndTransformFeedback();
        }

        gl::Disable(gl::RASTERIZER_DISCARD);
        check_gl("running the transform feedback")
    }

    unsafe fn draw(&self) -> Result<(), Error> {
        const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
        gl::ClearBufferfv(gl::COLOR, 0, BLACK.as_ptr());

        Program::bind(&self.programs.render);
        // The set the last pass wrote to
        VertexArrayObject::bind(&self.states[self.ping_pong.source()].vao);

        if self.draw_points {
            gl::PointSize(POINT_SIZE);
            gl::DrawArrays(gl::POINTS, 0, self.grid.points() as i32);
        }

        if self.draw_lines {
            VertexBufferObject::bind(&self.lines);
            gl::DrawElements(
                gl::LINES,
                self.lines.len() as i32,
                gl::UNSIGNED_INT,
                std::ptr::null(),
            );
        }
        check_gl("drawing the spring-mass grid")
    }
}

impl Demo for SpringMass {
    fn name(&self) -> &'static str {
        "springmass"
    }

    fn key_pressed(&mut self, key: VirtualKeyCode) {
        match key {
            VirtualKeyCode::P => {
                self.draw_points = !self.draw_points;
                log::info!("points: {}", self.draw_points);
            }
            VirtualKeyCode::L => {
                self.draw_lines = !self.draw_lines;
                log::info!("lines: {}", self.draw_lines);
            }
            _ => {}
        }
    }

    fn reload(&mut self) -> Result<(), Error> {
        self.programs = unsafe { Programs::load(&self.shaders)? };
        Ok(())
    }

    fn render(&mut self, _elapsed: Duration) -> Result<(), Error> {
        unsafe {
            self.simulate()?;
            self.draw()?;
        }
        log::trace!("simulation step {}", self.ping_pong.iteration());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(width: usize, height: usize) -> Grid {
        Grid::new(GridSize { width, height })
    }

    #[test]
    fn default_grid_sizes() {
        let grid = grid(50, 50);
        assert_eq!(grid.points(), 2500);
        assert_eq!(grid.connections(), 4900);
        assert_eq!(grid.initial_positions().len(), 2500);
        assert_eq!(grid.initial_velocities().len(), 2500);
        assert_eq!(grid.connection_vectors().len(), 2500);
        assert_eq!(grid.line_indices().len(), 4900 * 2);
    }

    #[test]
    fn positions_are_centered_with_unit_mass() {
        let positions = grid(4, 2).initial_positions();
        assert_eq!(positions[0], Vec4f::new(-2.0, -1.0, 0.0, 1.0));
        let last = positions[7];
        assert_eq!((last.x, last.y), (1.0, 0.0));
        assert!((last.z - 0.6 * 0.75f32.sin() * 0.5f32.cos()).abs() < 1e-6);
        assert!(positions.iter().all(|p| p.w == 1.0));
        assert!(grid(3, 3)
            .initial_velocities()
            .iter()
            .all(|v| *v == Vec3f::default()));
    }

    #[test]
    fn connections_link_the_neighbours() {
        // 0 1 2
        // 3 4 5
        // 6 7 8
        let connections = grid(3, 3).connection_vectors();
        assert_eq!(connections[0], Vec4i::new(-1, -1, 1, 3));
        assert_eq!(connections[4], Vec4i::new(3, 1, 5, 7));
        assert_eq!(connections[5], Vec4i::new(4, 2, -1, 8));
    }

    #[test]
    fn the_last_row_is_anchored() {
        let connections = grid(3, 3).connection_vectors();
        for c in &connections[6..] {
            assert_eq!(*c, Vec4i::splat(-1));
        }
    }

    #[test]
    fn lines_cover_rows_then_columns() {
        let lines = grid(3, 2).line_indices();
        assert_eq!(lines.len(), grid(3, 2).connections() * 2);
        #[rustfmt::skip]
        let expected: [u32; 14] = [
            0, 1,  1, 2,
            3, 4,  4, 5,
            0, 3,
            1, 4,
            2, 5,
        ];
        assert_eq!(lines, expected);
        let points = grid(3, 2).points() as u32;
        assert!(lines.iter().all(|&i| i < points));
    }

    #[test]
    fn the_largest_grid_fits_the_gl_counts() {
        let grid = grid(4096, 4096);
        assert_eq!(grid.points(), GridSize::MAX_POINTS);
        assert!(grid.points() <= i32::MAX as usize);
        assert!(grid.connections() * 2 <= i32::MAX as usize);
    }

    #[test]
    fn ping_pong_alternates_the_buffer_sets() {
        let mut state = PingPong::default();
        assert_eq!(state.source(), 0);
        assert_eq!(state.step(), (0, 1));
        assert_eq!(state.source(), 1);
        assert_eq!(state.step(), (1, 0));
        for _ in 0..16 {
            let (source, target) = state.step();
            assert_ne!(source, target);
            assert_eq!(state.source(), target);
        }
        assert_eq!(state.iteration(), 18);
    }
}
