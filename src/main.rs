use glutin::dpi::LogicalSize;
use glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest};

mod config;
mod demos;
mod error;
mod graphics;
mod logging;
mod math;

use config::Config;
use error::Error;
use logging::{init_logging, LoggingConfig};

use std::time::Instant;

/// Transform feedback and buffer textures need at least OpenGL 4.0
const GL_VERSION: (u8, u8) = (4, 1);

/// Frames averaged by the fps counter
const FPS_FRAMES: u32 = 50;

fn main() -> Result<(), Error> {
    let config = Config::from_args();
    init_logging(LoggingConfig::from_verbosity(config.verbosity));
    if let Ok(cwd) = std::env::current_dir() {
        log::info!("cwd: {}", cwd.display());
    }

    // Create the event loop
    let el = EventLoop::new();
    // Create the window builder
    let wb = WindowBuilder::new()
        .with_title(config.title.as_str())
        .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
        .with_resizable(true);
    // Create the window context from the window builder and the event loop
    let wc = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, GL_VERSION))
        .with_gl_profile(GlProfile::Core)
        .with_depth_buffer(24)
        .with_vsync(config.vsync)
        .build_windowed(wb, &el)?;
    // Set the window context as the current context
    let window = unsafe { wc.make_current().map_err(|(_, e)| e)? };
    // Load the opengl functions
    gl::load_with(|symbol| window.context().get_proc_address(symbol) as *const _);
    unsafe {
        log::info!(
            "{} on {} ({})",
            graphics::gl_string(gl::VERSION),
            graphics::gl_string(gl::RENDERER),
            graphics::gl_string(gl::VENDOR)
        );
    }

    let size = window.window().inner_size();
    unsafe { gl::Viewport(0, 0, size.width as i32, size.height as i32) };
    let mut demo = unsafe { demos::load(&config, size.width, size.height)? };

    let start = Instant::now();
    let mut frame_start = Instant::now();
    let mut time = 0.0;
    let mut counter = 0;

    // Run the event loop
    el.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::Resized(size) => {
                    window.resize(size);
                    unsafe { gl::Viewport(0, 0, size.width as i32, size.height as i32) };
                    demo.resize(size.width, size.height);
                }
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => match key {
                    VirtualKeyCode::Escape => *control_flow = ControlFlow::Exit,
                    VirtualKeyCode::R => match demo.reload() {
                        Ok(()) => log::info!("{} shaders reloaded", demo.name()),
                        Err(e) => log::warn!("shader reload failed, keeping the old ones: {}", e),
                    },
                    key => demo.key_pressed(key),
                },
                _ => {}
            },
            Event::MainEventsCleared => {
                if let Err(e) = demo.render(start.elapsed()) {
                    log::error!("{} demo failed: {}", demo.name(), e);
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                // Swap the window buffers
                if let Err(e) = window.swap_buffers() {
                    log::error!("{}", Error::from(e));
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                time += frame_start.elapsed().as_secs_f64();
                frame_start = Instant::now();
                counter += 1;
                if counter == FPS_FRAMES {
                    log::debug!("fps: {:.1}", FPS_FRAMES as f64 / time);
                    counter = 0;
                    time = 0.0;
                }
            }
            _ => {}
        }
    });
}
