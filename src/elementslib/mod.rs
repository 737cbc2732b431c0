//! Keplerian orbital elements
//!
//! Elements are referred to the J2000.0 epoch and the ecliptic frame. Angles
//! are stored in degrees, the semi-major axis in AU, exactly as body catalogs
//! publish them.

use crate::constants::{DEG360, GAUSSIAN_MEAN_MOTION_DEG};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for rejected orbital elements
#[derive(Debug, Error, PartialEq)]
pub enum ElementsError {
    #[error("Non-finite orbital element {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Semi-major axis must be positive, got {0} AU")]
    NonPositiveSemiMajorAxis(f64),

    #[error("Eccentricity must be in [0, 1) for an elliptical orbit, got {0}")]
    UnsupportedEccentricity(f64),
}

/// Classical Keplerian elements of a heliocentric elliptical orbit
///
/// Serialized with the short field names used by body catalogs
/// (`a`, `e`, `i`, `O`, `w`, `M`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis in AU
    pub a: f64,
    /// Eccentricity, 0 ≤ e < 1
    pub e: f64,
    /// Inclination in degrees
    pub i: f64,
    /// Longitude of the ascending node in degrees
    #[serde(rename = "O")]
    pub node: f64,
    /// Argument of periapsis in degrees
    pub w: f64,
    /// Mean anomaly at J2000.0 in degrees
    #[serde(rename = "M")]
    pub mean_anomaly: f64,
}

impl OrbitalElements {
    /// Create a new set of elements
    ///
    /// No validation happens here; call [`OrbitalElements::validate`] when the
    /// values come from outside the crate.
    pub const fn new(a: f64, e: f64, i: f64, node: f64, w: f64, mean_anomaly: f64) -> Self {
        Self {
            a,
            e,
            i,
            node,
            w,
            mean_anomaly,
        }
    }

    /// A circular, uninclined orbit of radius `a` starting at the vernal equinox
    pub const fn circular(a: f64) -> Self {
        Self::new(a, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    /// Check that these elements describe an elliptical heliocentric orbit
    ///
    /// The orbital core accepts any input and degrades gracefully, so catalogs
    /// are expected to be checked once here, at load time.
    pub fn validate(&self) -> Result<(), ElementsError> {
        let fields = [
            ("a", self.a),
            ("e", self.e),
            ("i", self.i),
            ("O", self.node),
            ("w", self.w),
            ("M", self.mean_anomaly),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ElementsError::NonFinite { field, value });
            }
        }

        if self.a <= 0.0 {
            return Err(ElementsError::NonPositiveSemiMajorAxis(self.a));
        }
        if !(0.0..1.0).contains(&self.e) {
            return Err(ElementsError::UnsupportedEccentricity(self.e));
        }
        Ok(())
    }

    /// Mean daily motion in degrees/day, `0.9856076686 / a^1.5`
    ///
    /// Uses the Sun's GM for every body and ignores the body's own mass.
    pub fn mean_motion(&self) -> f64 {
        GAUSSIAN_MEAN_MOTION_DEG / self.a.powf(1.5)
    }

    /// Sidereal period in days
    pub fn period_days(&self) -> f64 {
        DEG360 / self.mean_motion()
    }

    /// Perihelion distance in AU
    pub fn perihelion(&self) -> f64 {
        self.a * (1.0 - self.e)
    }

    /// Aphelion distance in AU
    pub fn aphelion(&self) -> f64 {
        self.a * (1.0 + self.e)
    }
}
