use crate::config::{Config, DemoKind};
use crate::error::Error;
use glutin::event::VirtualKeyCode;
use std::time::Duration;

mod cube;
mod quad;
mod springmass;
mod triangle;

pub use cube::Cube;
pub use quad::Quad;
pub use springmass::SpringMass;
pub use triangle::Triangle;

/// A scene driven by the event loop
///
/// Every method issues OpenGL calls: the context the demo was created
/// with must still be current when they are called
pub trait Demo {
    fn name(&self) -> &'static str;

    /// The framebuffer changed size, the viewport has already been updated
    fn resize(&mut self, _width: u32, _height: u32) {}

    fn key_pressed(&mut self, _key: VirtualKeyCode) {}

    /// Recompiles the shaders from their files, keeping the current ones on failure
    fn reload(&mut self) -> Result<(), Error>;

    /// Draws one frame, `elapsed` is the time since the demo started
    fn render(&mut self, elapsed: Duration) -> Result<(), Error>;
}

/// Builds the demo selected in the configuration
pub unsafe fn load(config: &Config, width: u32, height: u32) -> Result<Box<dyn Demo>, Error> {
    log::info!("starting the {} demo", config.demo);
    Ok(match config.demo {
        DemoKind::Triangle => Box::new(Triangle::new(config)?),
        DemoKind::Quad => Box::new(Quad::new(config)?),
        DemoKind::Cube => Box::new(Cube::new(config, width, height)?),
        DemoKind::SpringMass => Box::new(SpringMass::new(config)?),
    })
}
