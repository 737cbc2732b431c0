//! Coordinate frames and the fixed ecliptic → scene convention
//!
//! Orbit positions, orbit paths and sky-sphere stars all pass through
//! [`ecliptic_to_scene`], so every consumer of the scene agrees on which way is
//! up.

pub mod cartesian;

pub use cartesian::Cartesian3;

use crate::constants::{DEG2RAD, DEG_PER_HOUR};

/// Maps heliocentric ecliptic coordinates into the scene frame and scales them
///
/// scene X = ecliptic X, scene Y = ecliptic Z (ecliptic north is up),
/// scene Z = −ecliptic Y. The result is multiplied by `scale`.
///
/// ```rust
/// use orrery::coordinates::{ecliptic_to_scene, Cartesian3};
///
/// let north = ecliptic_to_scene(Cartesian3::new(0.0, 0.0, 1.0), 100.0);
/// assert_eq!(north, Cartesian3::new(0.0, 100.0, 0.0));
/// ```
#[inline]
pub fn ecliptic_to_scene(ecliptic: Cartesian3, scale: f64) -> Cartesian3 {
    Cartesian3::new(
        ecliptic.x * scale,
        ecliptic.z * scale,
        -ecliptic.y * scale,
    )
}

/// Inverse of [`ecliptic_to_scene`]
#[inline]
pub fn scene_to_ecliptic(scene: Cartesian3, scale: f64) -> Cartesian3 {
    Cartesian3::new(scene.x / scale, -scene.z / scale, scene.y / scale)
}

/// Places a point of the celestial sphere in the scene at `radius` scene units
///
/// Right ascension and declination are in degrees. The equatorial vector is
/// remapped with the same axis convention as orbit positions (no scaling).
pub fn equatorial_to_scene(ra_deg: f64, dec_deg: f64, radius: f64) -> Cartesian3 {
    let equatorial = Cartesian3::from_spherical(ra_deg * DEG2RAD, dec_deg * DEG2RAD, radius);
    ecliptic_to_scene(equatorial, 1.0)
}

/// Right ascension written as hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RightAscension {
    pub hours: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl RightAscension {
    pub fn new(hours: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Right ascension in degrees (15° per hour)
    pub fn degrees(&self) -> f64 {
        (self.hours + self.minutes / 60.0 + self.seconds / 3600.0) * DEG_PER_HOUR
    }
}

/// Declination written as a sign plus degrees, arcminutes and arcseconds
///
/// The sign is stored separately so that declinations between 0° and −1°
/// (written `-00 30 00`) keep their sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Declination {
    pub negative: bool,
    pub degrees: f64,
    pub arcminutes: f64,
    pub arcseconds: f64,
}

impl Declination {
    pub fn new(negative: bool, degrees: f64, arcminutes: f64, arcseconds: f64) -> Self {
        Self {
            negative,
            degrees,
            arcminutes,
            arcseconds,
        }
    }

    /// Declination in signed degrees
    pub fn to_degrees(&self) -> f64 {
        let magnitude = self.degrees + self.arcminutes / 60.0 + self.arcseconds / 3600.0;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// Scene position of a catalog star written in sexagesimal form
pub fn star_to_scene(ra: &RightAscension, dec: &Declination, radius: f64) -> Cartesian3 {
    equatorial_to_scene(ra.degrees(), dec.to_degrees(), radius)
}
