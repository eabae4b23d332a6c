use clap::{crate_version, value_t, App, Arg, ArgMatches};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The demo programs the binary can run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DemoKind {
    Triangle,
    Quad,
    Cube,
    SpringMass,
}

impl DemoKind {
    pub const NAMES: [&'static str; 4] = ["triangle", "quad", "cube", "springmass"];

    pub fn name(self) -> &'static str {
        match self {
            Self::Triangle => "triangle",
            Self::Quad => "quad",
            Self::Cube => "cube",
            Self::SpringMass => "springmass",
        }
    }
}

impl FromStr for DemoKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "triangle" => Ok(Self::Triangle),
            "quad" => Ok(Self::Quad),
            "cube" => Ok(Self::Cube),
            "springmass" => Ok(Self::SpringMass),
            other => Err(format!("unknown demo: {}", other)),
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of points along each side of the spring-mass grid
///
/// The point count is capped so that every point and line index fits the
/// `i32`/`u32` values handed to OpenGL
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    pub const MAX_POINTS: usize = 1 << 24;
}

impl FromStr for GridSize {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, both sides need at least two points
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(2, |c| c == 'x' || c == 'X');
        let mut side = || -> Result<usize, String> {
            let side = parts
                .next()
                .and_then(|v| v.trim().parse::<usize>().ok())
                .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {}", s))?;
            if side < 2 {
                Err(format!("the grid needs at least 2 points per side, got {}", s))
            } else {
                Ok(side)
            }
        };
        let width = side()?;
        let height = side()?;
        match width.checked_mul(height) {
            Some(points) if points <= Self::MAX_POINTS => Ok(Self { width, height }),
            _ => Err(format!(
                "the grid can have at most {} points, got {}",
                Self::MAX_POINTS,
                s
            )),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub demo: DemoKind,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
    pub shader_dir: PathBuf,
    pub texture: Option<PathBuf>,
    pub iterations_per_frame: u32,
    pub grid: GridSize,
    pub verbosity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo: DemoKind::SpringMass,
            width: 800,
            height: 600,
            title: String::from("OpenGL Play 01"),
            vsync: true,
            shader_dir: PathBuf::from("shaders"),
            texture: None,
            iterations_per_frame: 16,
            grid: GridSize {
                width: 50,
                height: 50,
            },
            verbosity: 0,
        }
    }
}

fn app() -> App<'static, 'static> {
    App::new("opengl-play")
        .version(crate_version!())
        .about("Small OpenGL demos: shaders, matrices, textures and a transform feedback spring-mass grid")
        .arg(
            Arg::with_name("demo")
                .help("The demo to run")
                .possible_values(&DemoKind::NAMES)
                .default_value("springmass")
                .index(1),
        )
        .arg(
            Arg::with_name("width")
                .long("width")
                .takes_value(true)
                .default_value("800")
                .help("Initial window width"),
        )
        .arg(
            Arg::with_name("height")
                .long("height")
                .takes_value(true)
                .default_value("600")
                .help("Initial window height"),
        )
        .arg(
            Arg::with_name("title")
                .long("title")
                .takes_value(true)
                .default_value("OpenGL Play 01")
                .help("Window title"),
        )
        .arg(
            Arg::with_name("shaders")
                .long("shaders")
                .takes_value(true)
                .value_name("DIR")
                .default_value("shaders")
                .help("Directory containing the GLSL sources"),
        )
        .arg(
            Arg::with_name("texture")
                .long("texture")
                .takes_value(true)
                .value_name("FILE")
                .help("Image applied to the cube, a checkerboard is used when missing"),
        )
        .arg(
            Arg::with_name("iterations")
                .long("iterations")
                .takes_value(true)
                .value_name("N")
                .default_value("16")
                .help("Transform feedback passes run each frame by the spring-mass demo"),
        )
        .arg(
            Arg::with_name("grid")
                .long("grid")
                .takes_value(true)
                .value_name("WxH")
                .default_value("50x50")
                .help("Points of the spring-mass grid"),
        )
        .arg(
            Arg::with_name("no-vsync")
                .long("no-vsync")
                .help("Render as fast as possible"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("Increases the log level (-v debug, -vv trace)"),
        )
}

impl Config {
    /// Parses the process arguments, printing the usage and exiting on failure
    pub fn from_args() -> Self {
        Self::from_iter(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    pub fn from_iter<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let iterations_per_frame = value_t!(matches, "iterations", u32)?;
        if iterations_per_frame == 0 {
            return Err(clap::Error::with_description(
                "the iterations per frame must be at least 1",
                clap::ErrorKind::InvalidValue,
            ));
        }
        Ok(Self {
            demo: value_t!(matches, "demo", DemoKind)?,
            width: value_t!(matches, "width", u32)?,
            height: value_t!(matches, "height", u32)?,
            title: matches.value_of("title").unwrap_or_default().to_string(),
            vsync: !matches.is_present("no-vsync"),
            shader_dir: matches.value_of_os("shaders").unwrap_or_default().into(),
            texture: matches.value_of_os("texture").map(PathBuf::from),
            iterations_per_frame,
            grid: value_t!(matches, "grid", GridSize)?,
            verbosity: matches.occurrences_of("verbose"),
        })
    }

    /// Path of a file inside the shader directory
    pub fn shader(&self, name: &str) -> PathBuf {
        self.shader_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_springmass_setup() {
        let config = Config::from_iter(&["opengl-play"]).unwrap();
        let default = Config::default();
        assert_eq!(config.demo, default.demo);
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.title, default.title);
        assert_eq!(config.shader_dir, default.shader_dir);
        assert_eq!(config.iterations_per_frame, 16);
        assert_eq!(config.grid, default.grid);
        assert!(config.vsync);
        assert!(config.texture.is_none());
        assert_eq!(config.verbosity, 0);
    }

    #[test]
    fn parses_every_option() {
        let config = Config::from_iter(&[
            "opengl-play",
            "cube",
            "--width",
            "1024",
            "--height",
            "768",
            "--texture",
            "crate.png",
            "--shaders",
            "assets/glsl",
            "--iterations",
            "4",
            "--grid",
            "20x10",
            "--no-vsync",
            "-vv",
        ])
        .unwrap();
        assert_eq!(config.demo, DemoKind::Cube);
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.texture, Some(PathBuf::from("crate.png")));
        assert_eq!(
            config.shader("cube.vert"),
            PathBuf::from("assets/glsl/cube.vert")
        );
        assert_eq!(config.iterations_per_frame, 4);
        assert_eq!(
            config.grid,
            GridSize {
                width: 20,
                height: 10
            }
        );
        assert!(!config.vsync);
        assert_eq!(config.verbosity, 2);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_iter(&["opengl-play", "teapot"]).is_err());
        assert!(Config::from_iter(&["opengl-play", "--width", "wide"]).is_err());
        assert!(Config::from_iter(&["opengl-play", "--iterations", "0"]).is_err());
        assert!(Config::from_iter(&["opengl-play", "--grid", "1x50"]).is_err());
        assert!(Config::from_iter(&["opengl-play", "--grid", "46341x46341"]).is_err());
    }

    #[test]
    fn grid_sizes() {
        assert_eq!(
            "50x40".parse::<GridSize>(),
            Ok(GridSize {
                width: 50,
                height: 40
            })
        );
        assert!("50".parse::<GridSize>().is_err());
        assert!("ax3".parse::<GridSize>().is_err());
        assert!("3x1".parse::<GridSize>().is_err());
        assert!("4294967296x4294967296".parse::<GridSize>().is_err());
        assert!("46341x46341".parse::<GridSize>().is_err());
        assert!("4097x4096".parse::<GridSize>().is_err());
        assert_eq!(
            "4096x4096".parse::<GridSize>().map(|g| g.width * g.height),
            Ok(GridSize::MAX_POINTS)
        );
    }

    #[test]
    fn demo_names_round_trip() {
        for name in DemoKind::NAMES.iter() {
            assert_eq!(name.parse::<DemoKind>().unwrap().name(), *name);
        }
    }
}
