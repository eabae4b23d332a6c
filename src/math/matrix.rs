use super::{Vec3f, Vec4f};
use std::ops::Mul;

/// A 4x4 matrix stored the way `glUniformMatrix4fv` reads it without transposition:
/// `m[c]` is the c-th column, so `m[3]` holds the translation
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix44f(pub [[f32; 4]; 4]);

/// The near clipping plane bounds of a perspective projection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub bottom: f32,
    pub top: f32,
    pub left: f32,
    pub right: f32,
}

impl Frustum {
    /// Computes the near plane bounds from the vertical field of view (in degrees)
    pub fn perspective(fov: f32, aspect_ratio: f32, near: f32) -> Self {
        let scale = (fov.to_radians() * 0.5).tan() * near;
        let right = aspect_ratio * scale;
        Self {
            bottom: -scale,
            top: scale,
            left: -right,
            right,
        }
    }
}

impl Matrix44f {
    pub fn identity() -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Matrix44f(m)
    }

    /// Post-multiplies the matrix by a rotation of `rot` radians around the y axis
    pub fn add_y_rotation(&mut self, rot: f32) {
        let (s, c) = rot.sin_cos();
        let mut rotation = Self::identity();
        rotation.0[0][0] = c;
        rotation.0[2][0] = s;
        rotation.0[0][2] = -s;
        rotation.0[2][2] = c;
        *self = *self * rotation;
    }

    /// The OpenGL perspective projection matrix for the given near plane bounds
    pub fn projection(frustum: &Frustum, n: f32, f: f32) -> Self {
        let Frustum {
            bottom: b,
            top: t,
            left: l,
            right: r,
        } = *frustum;
        Matrix44f([
            [2.0 * n / (r - l), 0.0, 0.0, 0.0],
            [0.0, 2.0 * n / (t - b), 0.0, 0.0],
            [(r + l) / (r - l), (t + b) / (t - b), -(f + n) / (f - n), -1.0],
            [0.0, 0.0, -2.0 * f * n / (f - n), 0.0],
        ])
    }

    /// Shorthand for a symmetric perspective projection
    pub fn perspective(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self::projection(&Frustum::perspective(fov, aspect_ratio, near), near, far)
    }

    /// A view matrix placing the camera at `pos` looking towards `at`
    pub fn look_at(pos: Vec3f, at: Vec3f, up: Vec3f) -> Self {
        let z_axis = (pos - at).norm();
        let x_axis = up.cross(z_axis).norm();
        let y_axis = z_axis.cross(x_axis);

        Matrix44f([
            [x_axis.x, y_axis.x, z_axis.x, 0.0],
            [x_axis.y, y_axis.y, z_axis.y, 0.0],
            [x_axis.z, y_axis.z, z_axis.z, 0.0],
            [-x_axis.dot(pos), -y_axis.dot(pos), -z_axis.dot(pos), 1.0],
        ])
    }

    /// Applies the matrix to a vector the same way a shader computing `m * v` does
    pub fn transform(&self, v: Vec4f) -> Vec4f {
        let mut out = Vec4f::default();
        for j in 0..4 {
            out[j] = (0..4).map(|i| v[i] * self.0[i][j]).sum();
        }
        out
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.0.as_ptr() as *const f32
    }
}

impl Default for Matrix44f {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix44f {
    type Output = Matrix44f;
    fn mul(self, other: Matrix44f) -> Matrix44f {
        let mut result = [[0.0f32; 4]; 4];
        for (x, row) in result.iter_mut().enumerate() {
            for (y, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|i| self.0[x][i] * other.0[i][y]).sum();
            }
        }
        Matrix44f(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FRAC_PI_2;

    fn assert_close(a: Vec4f, b: Vec4f) {
        assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
    }

    #[test]
    fn identity_is_neutral() {
        let mut m = Matrix44f::identity();
        m.add_y_rotation(0.3);
        assert_eq!(m * Matrix44f::identity(), m);
        assert_eq!(Matrix44f::identity() * m, m);
    }

    #[test]
    fn y_rotation_turns_x_towards_negative_z() {
        let mut m = Matrix44f::identity();
        m.add_y_rotation(FRAC_PI_2);
        assert_close(
            m.transform(Vec4f::new(1.0, 0.0, 0.0, 1.0)),
            Vec4f::new(0.0, 0.0, -1.0, 1.0),
        );
        assert_close(
            m.transform(Vec4f::new(0.0, 2.0, 0.0, 1.0)),
            Vec4f::new(0.0, 2.0, 0.0, 1.0),
        );
    }

    #[test]
    fn rotations_accumulate() {
        let mut a = Matrix44f::identity();
        a.add_y_rotation(0.25);
        a.add_y_rotation(0.5);
        let mut b = Matrix44f::identity();
        b.add_y_rotation(0.75);
        let v = Vec4f::new(1.0, 2.0, 3.0, 1.0);
        assert_close(a.transform(v), b.transform(v));
    }

    #[test]
    fn perspective_frustum_is_symmetric() {
        let frustum = Frustum::perspective(90.0, 2.0, 1.0);
        assert!((frustum.top - 1.0).abs() < 1e-6);
        assert!((frustum.right - 2.0).abs() < 1e-6);
        assert_eq!(frustum.bottom, -frustum.top);
        assert_eq!(frustum.left, -frustum.right);
    }

    #[test]
    fn projection_maps_the_clip_planes() {
        let (near, far) = (0.5, 10.0);
        let m = Matrix44f::perspective(60.0, 4.0 / 3.0, near, far);
        let ndc = |z: f32| {
            let clip = m.transform(Vec4f::new(0.0, 0.0, z, 1.0));
            clip.z / clip.w
        };
        assert!((ndc(-near) + 1.0).abs() < 1e-5);
        assert!((ndc(-far) - 1.0).abs() < 1e-5);
        assert_eq!(m.0[2][3], -1.0);
        assert_eq!(m.0[3][3], 0.0);
    }

    #[test]
    fn look_at_moves_the_target_in_front_of_the_camera() {
        let m = Matrix44f::look_at(
            Vec3f::new(0.0, 0.0, 5.0),
            Vec3f::new(0.0, 0.0, 0.0),
            Vec3f::new(0.0, 1.0, 0.0),
        );
        assert_close(
            m.transform(Vec4f::new(0.0, 0.0, 0.0, 1.0)),
            Vec4f::new(0.0, 0.0, -5.0, 1.0),
        );
        assert_close(
            m.transform(Vec4f::new(0.0, 0.0, 5.0, 1.0)),
            Vec4f::new(0.0, 0.0, 0.0, 1.0),
        );
        assert_eq!(m.0[3][2], -5.0);
    }

    #[test]
    fn look_at_keeps_up_vertical() {
        let m = Matrix44f::look_at(
            Vec3f::new(3.0, 2.0, 4.0),
            Vec3f::new(0.0, 0.0, 0.0),
            Vec3f::new(0.0, 1.0, 0.0),
        );
        let up = m.transform(Vec4f::new(0.0, 1.0, 0.0, 0.0));
        // The camera's x axis has no vertical component
        assert!(m.0[1][0].abs() < 1e-6);
        assert!(up.y > 0.0);
    }
}
