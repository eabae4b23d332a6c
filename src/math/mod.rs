mod matrix;
mod vec;

pub use matrix::Matrix44f;
pub use std::f32::consts::*;
pub use vec::{Vec3f, Vec4f, Vec4i};

pub const TWICE_PI: f32 = PI * 2.0;
