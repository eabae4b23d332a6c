use std::ops::*;

/// A vector composed of three coordinates (3-dimensional) `x`, `y` and `z`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A homogeneous vector, used for positions that carry an extra component
/// (the spring-mass grid stores the mass of each point in `w`)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// Four integers, used to upload per-point connection indices
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Vec4i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub w: i32,
}

impl Vec3f {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The right-handed cross product
    pub fn cross(self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }
}

impl Vec4f {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }
}

impl Vec4i {
    pub fn new(x: i32, y: i32, z: i32, w: i32) -> Self {
        Self { x, y, z, w }
    }

    pub fn splat(v: i32) -> Self {
        Self::new(v, v, v, v)
    }
}

/// Implements the component-wise arithmetic and the indexing shared by every vector type
macro_rules! vector {
    ($name: ident [$scalar: ty]: $($field: ident),+) => {
        impl Add for $name {
            type Output = $name;
            fn add(mut self, other: $name) -> $name {
                $(self.$field += other.$field;)+
                self
            }
        }

        impl Sub for $name {
            type Output = $name;
            fn sub(mut self, other: $name) -> $name {
                $(self.$field -= other.$field;)+
                self
            }
        }

        impl Mul<$scalar> for $name {
            type Output = $name;
            fn mul(mut self, other: $scalar) -> $name {
                $(self.$field *= other;)+
                self
            }
        }

        impl Div<$scalar> for $name {
            type Output = $name;
            fn div(mut self, other: $scalar) -> $name {
                $(self.$field /= other;)+
                self
            }
        }

        impl AddAssign for $name {
            fn add_assign(&mut self, other: $name) {
                *self = *self + other;
            }
        }

        impl SubAssign for $name {
            fn sub_assign(&mut self, other: $name) {
                *self = *self - other;
            }
        }

        impl MulAssign<$scalar> for $name {
            fn mul_assign(&mut self, other: $scalar) {
                *self = *self * other;
            }
        }

        impl DivAssign<$scalar> for $name {
            fn div_assign(&mut self, other: $scalar) {
                *self = *self / other;
            }
        }

        impl Index<usize> for $name {
            type Output = $scalar;
            fn index(&self, i: usize) -> &$scalar {
                let fields = [$(&self.$field),+];
                match fields.get(i) {
                    Some(v) => *v,
                    None => panic!(concat!(stringify!($name), " index out of range: {}"), i),
                }
            }
        }

        impl IndexMut<usize> for $name {
            fn index_mut(&mut self, i: usize) -> &mut $scalar {
                let fields = [$(&mut self.$field),+];
                match IntoIterator::into_iter(fields).nth(i) {
                    Some(v) => v,
                    None => panic!(concat!(stringify!($name), " index out of range: {}"), i),
                }
            }
        }
    };
}

/// Adds the euclidean operations to the floating point vectors
macro_rules! euclidean {
    ($name: ident: $($field: ident),+) => {
        impl $name {
            pub fn dot(self, rhs: Self) -> f32 {
                0.0 $(+ self.$field * rhs.$field)+
            }

            pub fn length(self) -> f32 {
                self.dot(self).sqrt()
            }

            /// Scales the vector to unit length
            pub fn norm(self) -> Self {
                self / self.length()
            }
        }
    };
}

vector! {Vec3f[f32]: x, y, z}
vector! {Vec4f[f32]: x, y, z, w}
vector! {Vec4i[i32]: x, y, z, w}

euclidean! {Vec3f: x, y, z}
euclidean! {Vec4f: x, y, z, w}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_follows_the_right_hand_rule() {
        let x = Vec3f::new(1.0, 0.0, 0.0);
        let y = Vec3f::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vec3f::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Vec3f::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn norm_has_unit_length() {
        let v = Vec3f::new(3.0, 0.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.norm(), Vec3f::new(0.6, 0.0, 0.8));
        assert!((Vec4f::new(1.0, 1.0, 1.0, 1.0).norm().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn arithmetic_is_component_wise() {
        let mut v = Vec4f::new(1.0, 2.0, 3.0, 4.0);
        v += Vec4f::new(1.0, 1.0, 1.0, 1.0);
        v *= 2.0;
        assert_eq!(v, Vec4f::new(4.0, 6.0, 8.0, 10.0));
        assert_eq!(v / 2.0 - Vec4f::new(2.0, 3.0, 4.0, 5.0), Vec4f::default());

        let mut c = Vec4i::splat(-1);
        c[2] = 7;
        assert_eq!(c, Vec4i::new(-1, -1, 7, -1));
        assert_eq!(c * 2 + Vec4i::splat(1), Vec4i::new(-1, -1, 15, -1));
    }

    #[test]
    #[should_panic]
    fn indexing_past_the_last_component_panics() {
        let v = Vec3f::default();
        let _ = v[3];
    }
}
