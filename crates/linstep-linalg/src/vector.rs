use std::fmt;

use crate::Num;

mod ops;

/// A 3-component column vector with `f64` elements and an optional name.
///
/// 2D vectors are represented with `z = 0`, so every [`Vector`] always has exactly three
/// components. The components are public fields and may be edited freely, but arithmetic always
/// produces fresh, unnamed vectors.
///
/// # Construction
///
/// - [`vec3`] and [`Vector::new`] create a vector from its components, [`vec2`] creates one in
///   the XY plane.
/// - [`Vector::named`] attaches a name that derivation steps use to refer to the vector.
/// - [`Vector::ZERO`], [`Vector::X`], [`Vector::Y`] and [`Vector::Z`] are the zero vector and the
///   unit vectors along each axis.
/// - Vectors can be created from `[f64; 3]` arrays using their [`From`] implementation.
///
/// # Equality
///
/// [`PartialEq`] compares the components only; the name is a display tag and does not take part in
/// comparisons.
///
/// ```
/// # use linstep_linalg::*;
/// assert_eq!(vec3(1.0, 2.0, 3.0).named("a"), vec3(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    name: Option<String>,
}

impl Vector {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// A unit vector pointing in the X direction.
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// A unit vector pointing in the Y direction.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// A unit vector pointing in the Z direction.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates an unnamed vector from its components.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            name: None,
        }
    }

    /// Returns `self` with its name set to `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// let v = vec3(1.0, 0.0, 0.0).named("v1");
    /// assert_eq!(v.name(), Some("v1"));
    /// assert_eq!(v.to_string(), "v1(1, 0, 0)");
    /// ```
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the name of this vector, if it has one.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the name of this vector, or `fallback` if it is unnamed.
    pub fn label<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name().unwrap_or(fallback)
    }

    /// Returns the components as an array.
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Applies a closure to each component, returning a new unnamed vector.
    ///
    /// # Examples
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// let v = vec3(1.0, 2.0, 3.0).map(|c| c * 10.0);
    /// assert_eq!(v, vec3(10.0, 20.0, 30.0));
    /// ```
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    /// Combines the components of `self` and `other` pairwise.
    pub fn zip_map<F>(&self, other: &Self, mut f: F) -> Self
    where
        F: FnMut(f64, f64) -> f64,
    {
        Self::new(f(self.x, other.x), f(self.y, other.y), f(self.z, other.z))
    }

    /// Computes the dot product between `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// let a = vec3(1.0, 3.0, -5.0);
    /// let b = vec3(4.0, -2.0, -1.0);
    /// assert_eq!(a.dot(&b), 3.0);
    /// ```
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product of `self` and `other`.
    ///
    /// The result is perpendicular to both `self` and `other`. Swapping the arguments inverts its
    /// direction.
    ///
    /// # Examples
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// assert_eq!(Vector::X.cross(&Vector::Y), Vector::Z);
    /// assert_eq!(Vector::Y.cross(&Vector::X), -Vector::Z);
    /// ```
    pub fn cross(&self, other: &Self) -> Self {
        let [a1, a2, a3] = self.to_array();
        let [b1, b2, b3] = other.to_array();

        #[rustfmt::skip]
        let cross = vec3(
            a2 * b3 - a3 * b2,
            a3 * b1 - a1 * b3,
            a1 * b2 - a2 * b1,
        );
        cross
    }

    /// Returns the squared length of this vector.
    pub fn length2(&self) -> f64 {
        self.dot(self)
    }

    /// Returns the Euclidean length of this vector.
    ///
    /// The length of [`Vector::ZERO`] is exactly `0.0`. Components too large to be squared without
    /// overflowing are rescaled first, so the length of a finite vector is finite whenever it is
    /// representable.
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// assert_eq!(vec3(0.0, 3.0, 4.0).length(), 5.0);
    /// assert_eq!(Vector::ZERO.length(), 0.0);
    /// ```
    pub fn length(&self) -> f64 {
        let length2 = self.length2();
        if length2.is_finite() || length2.is_nan() {
            return length2.sqrt();
        }

        // `length2` overflowed, or a component is infinite.
        let scale = self.x.abs().max(self.y.abs()).max(self.z.abs());
        if scale.is_infinite() {
            return scale;
        }
        scale * (self / scale).length2().sqrt()
    }

    /// Returns the Euclidean distance between `self` and `other`.
    pub fn distance(&self, other: &Self) -> f64 {
        (other - self).length()
    }

    /// Linearly interpolates between `self` (at `t = 0`) and `other` (at `t = 1`).
    ///
    /// ```
    /// # use linstep_linalg::*;
    /// let a = vec3(0.0, 0.0, 0.0);
    /// let b = vec3(4.0, 2.0, 0.0);
    /// assert_eq!(a.lerp(&b, 0.5), vec3(2.0, 1.0, 0.0));
    /// ```
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        self.zip_map(other, |a, b| a + t * (b - a))
    }

    /// Returns `true` if every component is finite (neither `NaN` nor infinite).
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Vector {
    #[inline]
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Vector> for [f64; 3] {
    #[inline]
    fn from(value: Vector) -> Self {
        value.to_array()
    }
}

/// Displays the vector as `name(x, y, z)`, or `(x, y, z)` when unnamed.
impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            f.write_str(name)?;
        }
        write!(f, "({}, {}, {})", Num(self.x), Num(self.y), Num(self.z))
    }
}

/// Constructs an unnamed [`Vector`] from its three components.
#[inline]
pub const fn vec3(x: f64, y: f64, z: f64) -> Vector {
    Vector::new(x, y, z)
}

/// Constructs an unnamed [`Vector`] in the XY plane (`z = 0`).
#[inline]
pub const fn vec2(x: f64, y: f64) -> Vector {
    Vector::new(x, y, 0.0)
}
