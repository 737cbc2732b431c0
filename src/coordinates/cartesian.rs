//! # Cartesian Vectors
//!
//! `Cartesian3` is the single vector type shared by the orbital core, the sky
//! placement helpers and the camera targets. It is frame-agnostic: the same
//! struct holds heliocentric ecliptic coordinates in AU while an orbit is being
//! rotated, and scene coordinates once [`super::ecliptic_to_scene`] has been
//! applied.
//!
//! ## Frames used in this crate
//!
//! - **Ecliptic** (AU): X toward the vernal equinox, Z toward ecliptic north.
//! - **Scene** (scene units): X = ecliptic X, Y = ecliptic Z ("up"),
//!   Z = −ecliptic Y. Both frames are right-handed.
//!
//! ```rust
//! use orrery::coordinates::cartesian::Cartesian3;
//!
//! let earth = Cartesian3::new(100.0, 0.0, 0.0);
//! let mars = Cartesian3::new(0.0, 0.0, -152.0);
//! assert!((earth.distance(&mars) - (100.0f64.powi(2) + 152.0f64.powi(2)).sqrt()).abs() < 1e-12);
//! ```

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Three-dimensional Cartesian vector
///
/// Used both as a position (distance from the Sun in AU or scene units) and as a
/// direction. The interpretation depends on which frame produced it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cartesian3 {
    /// X-component
    pub x: f64,
    /// Y-component
    pub y: f64,
    /// Z-component
    pub z: f64,
}

impl Cartesian3 {
    /// The origin, where the Sun sits in both frames
    pub const ORIGIN: Cartesian3 = Cartesian3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a new vector from its components
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Creates a vector from spherical coordinates
    ///
    /// `lon` is measured in the XY plane from +X toward +Y and `lat` from the XY
    /// plane toward +Z, both in radians.
    ///
    /// - `x = r * cos(lat) * cos(lon)`
    /// - `y = r * cos(lat) * sin(lon)`
    /// - `z = r * sin(lat)`
    ///
    /// ```rust
    /// use orrery::coordinates::cartesian::Cartesian3;
    /// use std::f64::consts::PI;
    ///
    /// let pole = Cartesian3::from_spherical(0.0, PI / 2.0, 1.0);
    /// assert!(pole.x.abs() < 1e-15);
    /// assert!((pole.z - 1.0).abs() < 1e-15);
    /// ```
    pub fn from_spherical(lon: f64, lat: f64, radius: f64) -> Self {
        let cos_lat = lat.cos();
        Cartesian3 {
            x: radius * cos_lat * lon.cos(),
            y: radius * cos_lat * lon.sin(),
            z: radius * lat.sin(),
        }
    }

    /// Euclidean length, `sqrt(x² + y² + z²)`
    ///
    /// ```rust
    /// use orrery::coordinates::cartesian::Cartesian3;
    ///
    /// assert_eq!(Cartesian3::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    /// ```
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns the unit vector in the same direction, or `None` for the zero vector
    pub fn normalize(&self) -> Option<Cartesian3> {
        let mag = self.magnitude();
        if mag == 0.0 {
            None
        } else {
            Some(*self / mag)
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product, following the right-hand rule
    pub fn cross(&self, other: &Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Straight-line distance to another point
    pub fn distance(&self, other: &Cartesian3) -> f64 {
        (*self - *other).magnitude()
    }

    /// Whether every component is finite
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Components as an `[x, y, z]` array, the layout scene graphs expect
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Converts to nalgebra Vector3
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Creates from nalgebra Vector3
    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3 {
            x: vec.x,
            y: vec.y,
            z: vec.z,
        }
    }
}

impl From<[f64; 3]> for Cartesian3 {
    fn from(v: [f64; 3]) -> Self {
        Cartesian3::new(v[0], v[1], v[2])
    }
}

// Arithmetic operations for convenience
impl std::ops::Add for Cartesian3 {
    type Output = Cartesian3;

    fn add(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Cartesian3 {
    type Output = Cartesian3;

    fn sub(self, other: Cartesian3) -> Cartesian3 {
        Cartesian3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Neg for Cartesian3 {
    type Output = Cartesian3;

    fn neg(self) -> Cartesian3 {
        Cartesian3 {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl std::ops::Mul<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn mul(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl std::ops::Div<f64> for Cartesian3 {
    type Output = Cartesian3;

    fn div(self, scalar: f64) -> Cartesian3 {
        Cartesian3 {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_magnitude_and_distance() {
        let coord = Cartesian3::new(3.0, 4.0, 0.0);
        assert_eq!(coord.magnitude(), 5.0);
        assert_eq!(Cartesian3::ORIGIN.magnitude(), 0.0);

        let a = Cartesian3::new(1.0, 1.0, 1.0);
        let b = Cartesian3::new(1.0, 1.0, 3.0);
        assert_eq!(a.distance(&b), 2.0);
        assert_eq!(b.distance(&a), 2.0);
    }

    #[test]
    fn test_normalize() {
        let unit = Cartesian3::new(0.0, 3.0, 4.0).normalize().unwrap();
        assert_relative_eq!(unit.magnitude(), 1.0, epsilon = 1e-15);
        assert_relative_eq!(unit.y, 0.6, epsilon = 1e-15);
        assert_relative_eq!(unit.z, 0.8, epsilon = 1e-15);

        assert!(Cartesian3::ORIGIN.normalize().is_none());
    }

    #[test]
    fn test_cross_product_right_handed() {
        let x_axis = Cartesian3::new(1.0, 0.0, 0.0);
        let y_axis = Cartesian3::new(0.0, 1.0, 0.0);
        let z_axis = Cartesian3::new(0.0, 0.0, 1.0);

        assert_eq!(x_axis.cross(&y_axis), z_axis);
        assert_eq!(y_axis.cross(&z_axis), x_axis);
        assert_eq!(z_axis.cross(&x_axis), y_axis);
        assert_eq!(x_axis.dot(&y_axis), 0.0);
    }

    #[test]
    fn test_from_spherical() {
        let equinox = Cartesian3::from_spherical(0.0, 0.0, 2.0);
        assert_relative_eq!(equinox.x, 2.0, epsilon = 1e-15);
        assert_relative_eq!(equinox.y, 0.0, epsilon = 1e-15);

        let quarter = Cartesian3::from_spherical(PI / 2.0, 0.0, 1.0);
        assert_relative_eq!(quarter.x, 0.0, epsilon = 1e-15);
        assert_relative_eq!(quarter.y, 1.0, epsilon = 1e-15);
        assert_relative_eq!(quarter.z, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_arithmetic_operations() {
        let a = Cartesian3::new(1.0, 2.0, 3.0);
        let b = Cartesian3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Cartesian3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Cartesian3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Cartesian3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Cartesian3::new(2.0, 2.5, 3.0));
        assert_eq!(-a, Cartesian3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_vector3_and_array_conversions() {
        let coord = Cartesian3::new(1.0, 2.0, 3.0);
        let vec = coord.to_vector3();
        assert_eq!(Cartesian3::from_vector3(vec), coord);
        assert_eq!(coord.to_array(), [1.0, 2.0, 3.0]);
        assert_eq!(Cartesian3::from([1.0, 2.0, 3.0]), coord);
    }

    #[test]
    fn test_is_finite() {
        assert!(Cartesian3::new(1.0, -2.0, 0.0).is_finite());
        assert!(!Cartesian3::new(f64::NAN, 0.0, 0.0).is_finite());
        assert!(!Cartesian3::new(0.0, f64::INFINITY, 0.0).is_finite());
    }
}
