//! Camera fly-to targets
//!
//! Works out where the explorer's camera should go when a body is selected.
//! Nothing here holds a "current selection": callers pass the body, the
//! instant and the calculator explicitly and get a pose back, which the view
//! layer is free to tween toward.

use chrono::{DateTime, Utc};
use nalgebra::{Isometry3, Matrix4, Point3, Vector3};
use serde::Serialize;

use crate::coordinates::Cartesian3;
use crate::keplerlib::OrbitalMechanics;
use crate::planetlib::CatalogEntry;
use crate::starlib::{Constellation, StarCatalog};

/// Camera standoff as a multiple of the body's display radius
pub const STANDOFF_RADII: f64 = 10.0;
/// Closest the camera is allowed to park, in scene units
pub const MIN_STANDOFF: f64 = 5.0;

/// Where the camera sits and what it looks at, in scene units
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    pub eye: Cartesian3,
    pub target: Cartesian3,
}

impl CameraPose {
    pub fn new(eye: Cartesian3, target: Cartesian3) -> Self {
        Self { eye, target }
    }

    /// Distance from the eye to the target
    pub fn distance(&self) -> f64 {
        self.eye.distance(&self.target)
    }

    /// Right-handed view matrix with scene +Y as up
    pub fn view_matrix(&self) -> Matrix4<f64> {
        let eye = Point3::new(self.eye.x, self.eye.y, self.eye.z);
        let target = Point3::new(self.target.x, self.target.y, self.target.z);
        Isometry3::look_at_rh(&eye, &target, &Vector3::y()).to_homogeneous()
    }
}

/// Default overview of the inner system, looking at the Sun
pub fn overview() -> CameraPose {
    CameraPose::new(Cartesian3::new(0.0, 200.0, 500.0), Cartesian3::ORIGIN)
}

/// Pose that frames a body of display radius `size` sitting at `target`
///
/// The camera backs off `d = max(10·size, 5)` along X and Z and `d/2` up.
pub fn fly_to(target: Cartesian3, size: f64) -> CameraPose {
    let standoff = (size * STANDOFF_RADII).max(MIN_STANDOFF);
    let offset = Cartesian3::new(standoff, standoff / 2.0, standoff);
    CameraPose::new(target + offset, target)
}

/// Pose for looking out at a point on the sky sphere from near the Sun
pub fn look_at_sky(target: Cartesian3) -> CameraPose {
    CameraPose::new(Cartesian3::new(0.0, 20.0, 40.0), target)
}

/// Pose for a constellation, if its reference star is in the catalog
pub fn look_at_constellation(
    stars: &StarCatalog,
    constellation: &Constellation,
) -> Option<CameraPose> {
    stars.constellation_center(constellation).map(look_at_sky)
}

/// Pose that frames a catalog body at `time`
pub fn fly_to_body(
    entry: &CatalogEntry,
    time: &DateTime<Utc>,
    mechanics: &OrbitalMechanics,
) -> CameraPose {
    let position = mechanics.compute_position(&entry.elements, time);
    fly_to(position, entry.size)
}
