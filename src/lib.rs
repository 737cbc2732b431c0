//! Orrery: orbital positions and orbit traces for solar-system explorers
//!
//! This crate turns Keplerian orbital elements into positions in a 3D scene
//! (1 AU = 100 scene units by default) and into closed orbit traces. Around
//! that core it carries the body catalog, name search, the bright-star sky
//! sphere with constellation figures, and camera fly-to targets that an
//! interactive explorer needs.
//!
//! ```rust
//! use orrery::{Catalog, OrbitalMechanics};
//! use orrery::time::parse_instant;
//!
//! let mars = Catalog::builtin().find("Mars").unwrap();
//! let when = parse_instant("2024-06-01").unwrap();
//!
//! let mechanics = OrbitalMechanics::new();
//! let position = mechanics.compute_position(&mars.elements, &when);
//! let trace = mechanics.compute_orbit_path(&mars.elements);
//! assert_eq!(trace.len(), 181);
//! assert!(position.magnitude() > 130.0 && position.magnitude() < 170.0);
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod constants;
pub mod coordinates;
pub mod elementslib;
pub mod keplerlib;
pub mod navigation;
pub mod planetlib;
pub mod starlib;
pub mod time;

// Re-export commonly used types
pub use coordinates::Cartesian3;
pub use elementslib::OrbitalElements;
pub use keplerlib::{compute_orbit_path, compute_position, OrbitPath, OrbitalMechanics};
pub use planetlib::{BodyKind, Catalog, CatalogEntry};
pub use starlib::{Constellation, Star, StarCatalog};

/// Main error type for the orrery library
#[derive(Debug, Error)]
pub enum OrreryError {
    #[error("Time error: {0}")]
    TimeError(#[from] time::TimeError),

    #[error("Catalog error: {0}")]
    CatalogError(#[from] planetlib::CatalogError),

    #[error("Star catalog error: {0}")]
    StarCatalogError(#[from] starlib::StarCatalogError),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),
}

/// Result type for orrery operations
pub type Result<T> = std::result::Result<T, OrreryError>;

/// One result of [`search`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchHit<'a> {
    Body(&'a CatalogEntry),
    Constellation(&'static Constellation),
}

impl SearchHit<'_> {
    pub fn name(&self) -> &str {
        match self {
            SearchHit::Body(entry) => &entry.name,
            SearchHit::Constellation(constellation) => constellation.name,
        }
    }

    /// Label shown next to the name in result lists
    pub fn label(&self) -> &'static str {
        match self {
            SearchHit::Body(entry) => entry.kind.name(),
            SearchHit::Constellation(_) => "Constellation",
        }
    }
}

/// Search bodies and constellations together
///
/// Matching ignores case and whitespace. Bodies come first in catalog order,
/// then constellations, and the combined list is capped at
/// [`planetlib::SEARCH_RESULT_LIMIT`].
pub fn search<'a>(catalog: &'a Catalog, query: &str) -> Vec<SearchHit<'a>> {
    let key = planetlib::search_key(query);
    catalog
        .matching(&key)
        .map(SearchHit::Body)
        .chain(starlib::matching_constellations(&key).map(SearchHit::Constellation))
        .take(planetlib::SEARCH_RESULT_LIMIT)
        .collect()
}

/// Entry point for loading body catalogs
///
/// Without a catalog file the built-in planets and major asteroids are used.
/// Stars have no built-in data; without a star file the sky is empty.
pub struct Loader {
    catalog_file: Option<PathBuf>,
    star_file: Option<PathBuf>,
}

impl Loader {
    /// Create a new loader using the built-in catalog
    pub fn new() -> Self {
        Self {
            catalog_file: None,
            star_file: None,
        }
    }

    /// Load bodies from a JSON catalog file instead of the built-in data
    pub fn with_catalog_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.catalog_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load stars from a bright-star JSON file
    pub fn with_star_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.star_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load the configured catalog
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_file {
            Some(path) => Ok(Catalog::from_json_file(path)?),
            None => Ok(Catalog::builtin().clone()),
        }
    }

    /// Load the configured catalog and look up one body by name
    pub fn load_body(&self, name: &str) -> Result<CatalogEntry> {
        let catalog = self.load_catalog()?;
        catalog
            .find(name)
            .cloned()
            .ok_or_else(|| OrreryError::ObjectNotFound(name.to_string()))
    }

    /// Load the configured star catalog
    pub fn load_stars(&self) -> Result<StarCatalog> {
        match &self.star_file {
            Some(path) => Ok(StarCatalog::from_json_file(path)?),
            None => Ok(StarCatalog::default()),
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn hit_names<'a>(hits: &'a [SearchHit<'_>]) -> Vec<&'a str> {
        hits.iter().map(|hit| hit.name()).collect()
    }

    #[test]
    fn test_search_lists_bodies_before_constellations() {
        let hits = search(Catalog::builtin(), "ar");
        assert_eq!(
            hit_names(&hits),
            vec!["Earth", "Mars", "Aries", "Sagittarius", "Aquarius"]
        );
        assert_eq!(hits[0].label(), "Planet");
        assert_eq!(hits[2].label(), "Constellation");
    }

    #[test]
    fn test_search_caps_combined_results() {
        // Seven bodies contain an "r", so only one constellation fits
        let hits = search(Catalog::builtin(), "r");
        assert_eq!(hits.len(), planetlib::SEARCH_RESULT_LIMIT);
        assert_eq!(
            hit_names(&hits),
            vec!["Mercury", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Ceres", "Aries"]
        );

        assert_eq!(search(Catalog::builtin(), "e").len(), 8);
        assert!(search(Catalog::builtin(), " ").is_empty());
    }

    #[test]
    fn test_search_ignores_whitespace_in_names() {
        assert_eq!(hit_names(&search(Catalog::builtin(), "UrsaMajor")), vec!["Ursa Major"]);
        assert_eq!(hit_names(&search(Catalog::builtin(), "canismaj")), vec!["Canis Major"]);
        let hits = search(Catalog::builtin(), "Pallas");
        assert_eq!(hits.len(), 1);
        assert!(matches!(hits[0], SearchHit::Body(entry) if entry.kind == BodyKind::Asteroid));
    }

    #[test]
    fn test_time_errors_convert() {
        let err: OrreryError = time::parse_instant("yesterday").unwrap_err().into();
        assert!(matches!(err, OrreryError::TimeError(_)));
    }

    #[test]
    fn test_loader_defaults_to_builtin() {
        let catalog = Loader::new().load_catalog().unwrap();
        assert_eq!(&catalog, Catalog::builtin());

        let earth = Loader::default().load_body("EARTH").unwrap();
        assert_eq!(earth.name, "Earth");
    }

    #[test]
    fn test_loader_reports_missing_body() {
        match Loader::new().load_body("Vulcan") {
            Err(OrreryError::ObjectNotFound(name)) => assert_eq!(name, "Vulcan"),
            other => panic!("expected ObjectNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_loader_reads_catalog_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Eros", "type": "Asteroid", "a": 1.458, "e": 0.2229, "i": 10.83, "O": 304.3, "w": 178.9, "M": 320.2}}]"#
        )
        .unwrap();

        let loader = Loader::new().with_catalog_file(file.path());
        let catalog = loader.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(loader.load_body("eros").unwrap().kind, BodyKind::Asteroid);
        assert!(matches!(
            loader.load_body("Earth"),
            Err(OrreryError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn test_loader_reads_star_file() {
        assert!(Loader::new().load_stars().unwrap().is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"HR": "7001", "RAh": "18", "RAm": "36", "RAs": "56.3", "DE-": "+", "DEd": "38", "DEm": "47", "DEs": "01", "Vmag": "0.03", "SpectralCls": "A0Va"}}]"#
        )
        .unwrap();
        let stars = Loader::new().with_star_file(file.path()).load_stars().unwrap();
        assert_eq!(stars.len(), 1);
        assert_eq!(stars.get_star(7001).unwrap().spectral_class, "A0Va");
    }

    #[test]
    fn test_loader_propagates_catalog_errors() {
        let loader = Loader::new().with_catalog_file("/nonexistent/orrery/bodies.json");
        assert!(matches!(
            loader.load_catalog(),
            Err(OrreryError::CatalogError(planetlib::CatalogError::Io { .. }))
        ));
    }
}
