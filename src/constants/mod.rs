//! Constants module for orbital and scene calculations

use std::f64::consts::PI;

// Scene scale
/// Scene units per Astronomical Unit used by the explorer's scene graph
pub const SCENE_UNITS_PER_AU: f64 = 100.0;

// Time constants
/// Milliseconds in a day
pub const DAY_MS: f64 = 86_400_000.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// J2000.0 epoch (2000-01-01T12:00:00Z) as Unix milliseconds
pub const J2000_UNIX_MS: i64 = 946_728_000_000;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Degrees in a complete circle
pub const DEG360: f64 = 360.0;
/// Degrees of right ascension per hour
pub const DEG_PER_HOUR: f64 = 15.0;

// Orbital mechanics
/// Mean daily motion of a body at 1 AU in degrees/day (Gaussian constant in degrees)
///
/// Divided by `a^1.5` this gives the mean motion of any heliocentric orbit,
/// ignoring the body's own mass.
pub const GAUSSIAN_MEAN_MOTION_DEG: f64 = 0.985_607_668_6;
/// Fixed number of fixed-point iterations used to solve Kepler's equation
pub const KEPLER_ITERATIONS: usize = 5;
/// Mean anomaly step between orbit path samples, in degrees
pub const ORBIT_PATH_STEP_DEG: u32 = 2;
/// Number of samples in an orbit path (0° to 360° inclusive)
pub const ORBIT_PATH_POINTS: usize = (360 / ORBIT_PATH_STEP_DEG) as usize + 1;
