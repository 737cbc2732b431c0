//! Catalog-wide properties of orbit positions and orbit traces

use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};
use rstest::rstest;

use orrery::constants::ORBIT_PATH_STEP_DEG;
use orrery::keplerlib::mean_anomaly_at;
use orrery::time::j2000;
use orrery::{compute_orbit_path, compute_position, Catalog, OrbitalElements, OrbitalMechanics};

fn body(name: &str) -> OrbitalElements {
    Catalog::builtin()
        .find(name)
        .unwrap_or_else(|| panic!("{} missing from built-in catalog", name))
        .elements
}

#[test]
fn test_earth_sits_one_au_from_the_sun_at_j2000() {
    let earth = body("Earth");
    let distance = compute_position(&earth, &j2000()).magnitude();
    assert!(
        (distance - 100.0).abs() <= earth.e * earth.a * 100.0 + 1e-9,
        "Earth at {} scene units",
        distance
    );
}

#[rstest]
#[case("Mercury")]
#[case("Venus")]
#[case("Earth")]
#[case("Mars")]
#[case("Jupiter")]
#[case("Saturn")]
#[case("Uranus")]
#[case("Neptune")]
#[case("Ceres")]
#[case("Vesta")]
#[case("Pallas")]
#[case("Hygiea")]
fn test_orbit_paths_are_closed_and_continuous(#[case] name: &str) {
    let elements = body(name);
    let mechanics = OrbitalMechanics::new();
    let path = mechanics.compute_orbit_path(&elements);

    assert_eq!(path.len(), 181);
    let first = path.points()[0];
    let last = path.points()[180];
    assert_eq!(first.x.to_bits(), last.x.to_bits());
    assert_eq!(first.y.to_bits(), last.y.to_bits());
    assert_eq!(first.z.to_bits(), last.z.to_bits());

    let bound = mechanics.max_chord_bound(&elements, f64::from(ORBIT_PATH_STEP_DEG));
    for (index, length) in path.segment_lengths().enumerate() {
        assert!(
            length <= bound,
            "{} segment {} is {} long, bound {}",
            name,
            index,
            length,
            bound
        );
    }

    // Every sample stays between perihelion and aphelion
    for point in &path {
        let r = point.magnitude() / 100.0;
        assert!(r >= elements.perihelion() * (1.0 - 1e-3), "{} too close: {}", name, r);
        assert!(r <= elements.aphelion() * (1.0 + 1e-3), "{} too far: {}", name, r);
    }
}

#[rstest]
#[case(0.4)]
#[case(1.0)]
#[case(30.0)]
fn test_circular_orbits_keep_constant_radius(#[case] a: f64) {
    let elements = OrbitalElements::new(a, 0.0, 23.0, 45.0, 67.0, 89.0);
    for days in [-36_525, -1000, 0, 1, 365, 10_000, 73_050] {
        let t = j2000() + Duration::days(days);
        let r = compute_position(&elements, &t).magnitude();
        assert_relative_eq!(r, a * 100.0, max_relative = 1e-12);
    }
}

#[test]
fn test_positions_are_bit_identical_across_calls() {
    let t = Utc.with_ymd_and_hms(2031, 7, 4, 18, 30, 15).unwrap();
    for entry in Catalog::builtin() {
        let a = compute_position(&entry.elements, &t);
        let b = compute_position(&entry.elements, &t);
        assert_eq!(a.to_array().map(f64::to_bits), b.to_array().map(f64::to_bits));
    }
}

#[test]
fn test_mean_anomaly_at_epoch_matches_catalog() {
    for entry in Catalog::builtin() {
        let expected = entry.elements.mean_anomaly.rem_euclid(360.0);
        assert_eq!(mean_anomaly_at(&entry.elements, &j2000()), expected, "{}", entry.name);
    }
}

#[test]
fn test_doubling_scale_doubles_every_coordinate() {
    let t = Utc.with_ymd_and_hms(1987, 2, 23, 7, 35, 0).unwrap();
    let base = OrbitalMechanics::new();
    let doubled = OrbitalMechanics::with_scale(2.0 * base.scale());

    for entry in Catalog::builtin() {
        let p1 = base.compute_position(&entry.elements, &t);
        let p2 = doubled.compute_position(&entry.elements, &t);
        assert_eq!(p2, p1 * 2.0, "{}", entry.name);

        let path1 = base.compute_orbit_path(&entry.elements);
        let path2 = doubled.compute_orbit_path(&entry.elements);
        for (a, b) in path1.iter().zip(path2.iter()) {
            assert_eq!(*b, *a * 2.0);
        }
    }
}

#[test]
fn test_free_functions_use_default_scale() {
    let mars = body("Mars");
    let t = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    assert_eq!(
        compute_position(&mars, &t),
        OrbitalMechanics::with_scale(100.0).compute_position(&mars, &t)
    );
    assert_eq!(
        compute_orbit_path(&mars),
        OrbitalMechanics::default().compute_orbit_path(&mars)
    );
}

#[test]
fn test_bodies_move_forward_along_their_orbits() {
    // Prograde orbits have angular momentum toward ecliptic north, which is
    // scene +Y. The scene remap is a proper rotation, so cross products carry over.
    let t0 = j2000();
    let t1 = t0 + Duration::days(1);
    for entry in Catalog::builtin() {
        let p0 = compute_position(&entry.elements, &t0);
        let p1 = compute_position(&entry.elements, &t1);
        let angular = p0.cross(&(p1 - p0));
        assert!(angular.y > 0.0, "{} runs backwards: {:?}", entry.name, angular);
    }
}
