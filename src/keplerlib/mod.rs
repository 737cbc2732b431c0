//! Keplerian orbit positions and orbit traces
//!
//! Converts [`OrbitalElements`] into scene-space positions for a given instant,
//! and into a closed 181-point polyline tracing the full orbit.
//!
//! The propagation is deliberately simple and deterministic:
//!
//! - mean motion `n = 0.9856076686 / a^1.5` deg/day for every body (the Sun's
//!   GM only), measured from J2000.0;
//! - Kepler's equation `M = E - e·sin(E)` solved by exactly
//!   [`KEPLER_ITERATIONS`] fixed-point steps `E ← M + e·sin(E)`, with no
//!   convergence test.
//!
//! Five steps keep the error below about `e⁶` radians, which is invisible for
//! planets and the major asteroids. Near-parabolic orbits converge slowly and
//! come out visibly off; the result is still finite. Callers that need more
//! than a visualisation should use a proper ephemeris.
//!
//! # Example
//!
//! ```rust
//! use orrery::elementslib::OrbitalElements;
//! use orrery::keplerlib::OrbitalMechanics;
//! use orrery::time::j2000;
//!
//! let earth = OrbitalElements::new(1.000001, 0.016708, 0.00005, -11.26064, 102.94719, 357.51716);
//! let mechanics = OrbitalMechanics::new();
//!
//! let position = mechanics.compute_position(&earth, &j2000());
//! assert!((position.magnitude() - 100.0).abs() < 2.0);
//!
//! let path = mechanics.compute_orbit_path(&earth);
//! assert_eq!(path.len(), 181);
//! assert!(path.is_closed());
//! ```

use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;

use crate::constants::{
    DEG2RAD, DEG360, KEPLER_ITERATIONS, ORBIT_PATH_POINTS, ORBIT_PATH_STEP_DEG,
    SCENE_UNITS_PER_AU,
};
use crate::coordinates::{ecliptic_to_scene, Cartesian3};
use crate::elementslib::OrbitalElements;
use crate::time::days_since_j2000;

/// Stateless orbit calculator carrying only the AU → scene-unit scale
///
/// The same scale is applied to positions and orbit paths, so a body always
/// sits on its own trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalMechanics {
    scale: f64,
}

impl OrbitalMechanics {
    /// Calculator using the default scale of 100 scene units per AU
    pub fn new() -> Self {
        Self {
            scale: SCENE_UNITS_PER_AU,
        }
    }

    /// Calculator using a custom number of scene units per AU
    pub fn with_scale(scale: f64) -> Self {
        Self { scale }
    }

    /// Scene units per AU
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Position of a body at `time`, in scene units
    ///
    /// Elapsed time is measured from J2000.0 and may be negative.
    pub fn compute_position(&self, elements: &OrbitalElements, time: &DateTime<Utc>) -> Cartesian3 {
        self.position_at_mean_anomaly(elements, mean_anomaly_at(elements, time))
    }

    /// Position of a body at a given mean anomaly (degrees), in scene units
    ///
    /// The anomaly is wrapped into [0°, 360°) before use.
    pub fn position_at_mean_anomaly(&self, elements: &OrbitalElements, mean_anomaly_deg: f64) -> Cartesian3 {
        ecliptic_to_scene(ecliptic_position(elements, mean_anomaly_deg), self.scale)
    }

    /// Full orbit trace: 181 positions for mean anomaly 0°, 2°, …, 360°
    ///
    /// The path does not depend on time. 360° wraps onto 0°, so the first and
    /// last points are identical and the polyline closes on itself.
    pub fn compute_orbit_path(&self, elements: &OrbitalElements) -> OrbitPath {
        let points: Vec<Cartesian3> = (0..ORBIT_PATH_POINTS as u32)
            .map(|step| {
                let deg = f64::from(step * ORBIT_PATH_STEP_DEG);
                self.position_at_mean_anomaly(elements, deg)
            })
            .collect();

        debug!(
            "Generated {}-point orbit path (a={} AU, e={}, scale={})",
            points.len(),
            elements.a,
            elements.e,
            self.scale
        );

        OrbitPath { points }
    }

    /// Upper bound on the length of one path segment for a mean-anomaly step
    ///
    /// On the exact ellipse the speed along the curve per radian of mean
    /// anomaly never exceeds `a / (1 - e)`, so no chord can be longer than
    /// `scale · a · Δ / (1 - e)`. Longer segments mean the trace jumps, which
    /// points at a sign or rotation-order error rather than imprecision.
    pub fn max_chord_bound(&self, elements: &OrbitalElements, step_deg: f64) -> f64 {
        self.scale * elements.a * step_deg * DEG2RAD / (1.0 - elements.e)
    }
}

impl Default for OrbitalMechanics {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of a body at `time` using the default scale
pub fn compute_position(elements: &OrbitalElements, time: &DateTime<Utc>) -> Cartesian3 {
    OrbitalMechanics::new().compute_position(elements, time)
}

/// Orbit trace of a body using the default scale
pub fn compute_orbit_path(elements: &OrbitalElements) -> OrbitPath {
    OrbitalMechanics::new().compute_orbit_path(elements)
}

/// Wrap an angle in degrees into [0°, 360°)
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(DEG360);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= DEG360 {
        0.0
    } else {
        wrapped
    }
}

/// Mean anomaly at `time` in degrees, wrapped into [0°, 360°)
///
/// `M + n·d` with `n` the mean daily motion and `d` the signed days since J2000.0.
pub fn mean_anomaly_at(elements: &OrbitalElements, time: &DateTime<Utc>) -> f64 {
    let d = days_since_j2000(time);
    normalize_degrees(elements.mean_anomaly + elements.mean_motion() * d)
}

/// Eccentric anomaly (radians) for a mean anomaly (radians)
///
/// Fixed-point iteration `E ← M + e·sin(E)` started from `E = M`, run exactly
/// [`KEPLER_ITERATIONS`] times.
#[inline]
pub fn eccentric_anomaly(mean_anomaly_rad: f64, e: f64) -> f64 {
    let mut ecc = mean_anomaly_rad;
    for _ in 0..KEPLER_ITERATIONS {
        ecc = mean_anomaly_rad + e * ecc.sin();
    }
    ecc
}

/// Heliocentric ecliptic position in AU at a mean anomaly in degrees
fn ecliptic_position(elements: &OrbitalElements, mean_anomaly_deg: f64) -> Cartesian3 {
    let OrbitalElements { a, e, .. } = *elements;

    let m_rad = normalize_degrees(mean_anomaly_deg) * DEG2RAD;
    let ecc = eccentric_anomaly(m_rad, e);

    // Orbital plane, x toward periapsis
    let p = a * (ecc.cos() - e);
    let q = a * ecc.sin() * (1.0 - e * e).sqrt();

    // Argument of periapsis, in plane
    let (sin_w, cos_w) = (elements.w * DEG2RAD).sin_cos();
    let x_orbit = p * cos_w - q * sin_w;
    let y_orbit = p * sin_w + q * cos_w;

    // Inclination, about the line of nodes (x)
    let (sin_i, cos_i) = (elements.i * DEG2RAD).sin_cos();
    let x_inc = x_orbit;
    let y_inc = y_orbit * cos_i;
    let z_inc = y_orbit * sin_i;

    // Longitude of ascending node, about the ecliptic pole (z)
    let (sin_o, cos_o) = (elements.node * DEG2RAD).sin_cos();
    Cartesian3::new(
        x_inc * cos_o - y_inc * sin_o,
        x_inc * sin_o + y_inc * cos_o,
        z_inc,
    )
}

/// Ordered positions tracing one full revolution of an orbit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OrbitPath {
    points: Vec<Cartesian3>,
}

impl OrbitPath {
    /// Number of samples (181 for paths built by [`OrbitalMechanics`])
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Cartesian3] {
        &self.points
    }

    pub fn first(&self) -> Option<&Cartesian3> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Cartesian3> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cartesian3> {
        self.points.iter()
    }

    /// Whether the first and last points are bit-identical
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Lengths of the straight segments between consecutive points
    pub fn segment_lengths(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.windows(2).map(|pair| pair[0].distance(&pair[1]))
    }

    /// Longest straight segment, or 0 for paths with fewer than two points
    pub fn max_segment_length(&self) -> f64 {
        self.segment_lengths().fold(0.0, f64::max)
    }

    pub fn into_points(self) -> Vec<Cartesian3> {
        self.points
    }
}

impl<'a> IntoIterator for &'a OrbitPath {
    type Item = &'a Cartesian3;
    type IntoIter = std::slice::Iter<'a, Cartesian3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
