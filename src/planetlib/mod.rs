//! Body catalog: planets and major asteroids with their J2000 elements
//!
//! The built-in catalog covers the eight planets and the four largest
//! main-belt asteroids. Further catalogs can be loaded from JSON; every entry's
//! elements are validated at load time so the orbital core never sees
//! out-of-domain input.
//!
//! JSON entries use the same flat layout as the built-in data:
//!
//! ```json
//! [{"name": "Ceres", "type": "Asteroid", "color": "#ff5500", "size": 10.0,
//!   "a": 2.7663, "e": 0.0785, "i": 10.587, "O": 80.26, "w": 73.922, "M": 71.28}]
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::elementslib::{ElementsError, OrbitalElements};

/// Maximum number of matches returned by [`Catalog::search`]
pub const SEARCH_RESULT_LIMIT: usize = 8;

/// Error type for catalog loading
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid orbital elements for {name}: {source}")]
    InvalidElements {
        name: String,
        source: ElementsError,
    },

    #[error("Duplicate body name: {0}")]
    DuplicateName(String),

    #[error("Catalog entry with an empty name")]
    EmptyName,

    #[error("Failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Kind of catalog body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BodyKind {
    #[default]
    Planet,
    Asteroid,
}

impl BodyKind {
    /// Get the kind's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            BodyKind::Planet => "Planet",
            BodyKind::Asteroid => "Asteroid",
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A body with its orbital elements and display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    /// Defaults to `Planet` when missing from JSON
    #[serde(rename = "type", default)]
    pub kind: BodyKind,
    /// Display color as a CSS hex string
    #[serde(default)]
    pub color: String,
    /// Stylized display radius in scene units; drives the camera standoff
    #[serde(default = "default_size")]
    pub size: f64,
    #[serde(flatten)]
    pub elements: OrbitalElements,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fact: String,
}

fn default_size() -> f64 {
    1.0
}

impl CatalogEntry {
    fn builtin(
        name: &str,
        kind: BodyKind,
        color: &str,
        size: f64,
        elements: OrbitalElements,
        description: &str,
        fact: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            color: color.to_string(),
            size,
            elements,
            description: description.to_string(),
            fact: fact.to_string(),
        }
    }

    /// Info-panel text: description followed by the fun fact
    ///
    /// Returns `None` unless the entry carries both, in which case the caller
    /// has to source text elsewhere.
    pub fn summary(&self) -> Option<String> {
        if self.description.is_empty() || self.fact.is_empty() {
            return None;
        }
        Some(format!("{}\n\nFact: {}", self.description, self.fact))
    }
}

lazy_static! {
    static ref BUILTIN: Catalog = Catalog {
        entries: builtin_entries(),
    };
}

/// A validated, ordered collection of bodies with unique names
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog, validating every entry
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if let Err(source) = entry.elements.validate() {
                warn!("Rejecting catalog entry {}: {}", entry.name, source);
                return Err(CatalogError::InvalidElements {
                    name: entry.name.clone(),
                    source,
                });
            }
            if !seen.insert(entry.name.to_lowercase()) {
                return Err(CatalogError::DuplicateName(entry.name.clone()));
            }
        }
        debug!("Validated catalog with {} bodies", entries.len());
        Ok(Self { entries })
    }

    /// The built-in planets and major asteroids
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Load a catalog from a JSON array of entries
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_reader(reader)?;
        Self::new(entries)
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading body catalog from {}", path.display());
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Case-insensitive exact name lookup
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive substring search over body names
    ///
    /// Results keep catalog order and are capped at [`SEARCH_RESULT_LIMIT`].
    /// A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&CatalogEntry> {
        self.matching(&search_key(query))
            .take(SEARCH_RESULT_LIMIT)
            .collect()
    }

    /// Entries whose name contains an already-normalized search key
    pub(crate) fn matching<'a, 'k>(
        &'a self,
        key: &'k str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'k
    where
        'a: 'k,
    {
        self.entries
            .iter()
            .filter(move |entry| !key.is_empty() && search_key(&entry.name).contains(key))
    }

    /// All entries of one kind, in catalog order
    pub fn of_kind(&self, kind: BodyKind) -> impl Iterator<Item = &CatalogEntry> + '_ {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }
}

/// Lowercased name with whitespace removed, so "ursamajor" finds "Ursa Major"
pub fn search_key(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn builtin_entries() -> Vec<CatalogEntry> {
    use BodyKind::{Asteroid, Planet};

    vec![
        CatalogEntry::builtin(
            "Mercury",
            Planet,
            "#A5A5A5",
            2.4,
            OrbitalElements::new(0.387098, 0.205630, 7.005, 48.331, 29.124, 174.796),
            "The smallest planet in the Solar System and closest to the Sun. It has a cratered surface similar to the Moon and no atmosphere to retain heat.",
            "Mercury has the most eccentric orbit of all the planets.",
        ),
        CatalogEntry::builtin(
            "Venus",
            Planet,
            "#E3BB76",
            6.0,
            OrbitalElements::new(0.723332, 0.006772, 3.39458, 76.680, 54.884, 50.115),
            "The second planet from the Sun. It has a thick, toxic atmosphere that traps heat, making it the hottest planet in the Solar System.",
            "Venus spins in the opposite direction to most other planets.",
        ),
        CatalogEntry::builtin(
            "Earth",
            Planet,
            "#2233FF",
            6.3,
            OrbitalElements::new(1.000001, 0.016708, 0.00005, -11.26064, 102.94719, 357.51716),
            "The third planet from the Sun and the only astronomical object known to harbor life. About 71% of Earth's surface is covered with water.",
            "Earth is the densest planet in the Solar System.",
        ),
        CatalogEntry::builtin(
            "Mars",
            Planet,
            "#DD4422",
            3.3,
            OrbitalElements::new(1.523679, 0.0934, 1.850, 49.558, 286.502, 19.412),
            "The fourth planet from the Sun, often called the 'Red Planet' due to reddish iron oxide prevalent on its surface. It has a thin atmosphere.",
            "Mars is home to Olympus Mons, the tallest planetary mountain in the Solar System.",
        ),
        CatalogEntry::builtin(
            "Jupiter",
            Planet,
            "#D9C298",
            30.0,
            OrbitalElements::new(5.2044, 0.0489, 1.303, 100.464, 273.867, 20.020),
            "The fifth planet from the Sun and the largest in the Solar System. It is a gas giant with a mass more than two and a half times that of all the other planets combined.",
            "The Great Red Spot is a giant storm that has been raging for at least 300 years.",
        ),
        CatalogEntry::builtin(
            "Saturn",
            Planet,
            "#EAD6B8",
            25.0,
            OrbitalElements::new(9.5826, 0.0565, 2.485, 113.665, 339.392, 317.020),
            "The sixth planet from the Sun and the second-largest in the Solar System. It is a gas giant with an average radius of about nine and a half times that of Earth.",
            "Saturn has the most extensive ring system of any planet in the Solar System.",
        ),
        CatalogEntry::builtin(
            "Uranus",
            Planet,
            "#D1E7E7",
            15.0,
            OrbitalElements::new(19.2184, 0.046381, 0.773, 74.006, 96.998857, 141.050),
            "The seventh planet from the Sun. It has the third-largest planetary radius and fourth-largest planetary mass in the Solar System.",
            "Uranus rotates on its side, making its seasons extreme and long-lasting.",
        ),
        CatalogEntry::builtin(
            "Neptune",
            Planet,
            "#5B5DDF",
            15.0,
            OrbitalElements::new(30.11, 0.009456, 1.767975, 131.784, 273.187, 256.228),
            "The eighth and farthest-known Solar planet from the Sun. In the Solar System, it is the fourth-largest planet by diameter, the third-most-massive planet, and the densest giant planet.",
            "Neptune has the strongest winds of any planet in the Solar System.",
        ),
        CatalogEntry::builtin(
            "Ceres",
            Asteroid,
            "#ff5500",
            10.0,
            OrbitalElements::new(2.7663, 0.0785, 10.587, 80.260, 73.922, 71.280),
            "The largest object in the asteroid belt and the only dwarf planet in the inner Solar System. It comprises about 25% of the belt's total mass.",
            "Ceres contains water ice and may harbor a subsurface ocean.",
        ),
        CatalogEntry::builtin(
            "Vesta",
            Asteroid,
            "#ff5500",
            9.0,
            OrbitalElements::new(2.3614, 0.0886, 7.142, 103.851, 151.198, 20.88),
            "One of the largest asteroids in the Solar System. It is the brightest asteroid visible from Earth.",
            "Vesta has a giant mountain at its south pole, taller than Mount Everest.",
        ),
        CatalogEntry::builtin(
            "Pallas",
            Asteroid,
            "#ff5500",
            9.0,
            OrbitalElements::new(2.7716, 0.2299, 34.841, 173.128, 310.202, 52.88),
            "The third-largest asteroid in the Solar System. Its orbit is highly inclined relative to the plane of the main belt.",
            "Pallas was the second asteroid to be discovered, after Ceres.",
        ),
        CatalogEntry::builtin(
            "Hygiea",
            Asteroid,
            "#ff5500",
            8.0,
            OrbitalElements::new(3.139, 0.112, 3.84, 283.4, 313.2, 100.0),
            "A major asteroid located in the outer main belt. It is dark and carbonaceous.",
            "Hygiea is the fourth-largest asteroid but was discovered much later due to its dark surface.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_contents() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.of_kind(BodyKind::Planet).count(), 8);
        assert_eq!(catalog.of_kind(BodyKind::Asteroid).count(), 4);

        // The built-in data passes the same checks as loaded catalogs
        let revalidated = Catalog::new(catalog.entries().to_vec()).unwrap();
        assert_eq!(&revalidated, catalog);
    }

    #[rstest]
    #[case("Earth", BodyKind::Planet)]
    #[case("earth", BodyKind::Planet)]
    #[case("  NEPTUNE ", BodyKind::Planet)]
    #[case("Pallas", BodyKind::Asteroid)]
    fn test_find_is_case_insensitive(#[case] name: &str, #[case] kind: BodyKind) {
        let entry = Catalog::builtin().find(name).unwrap();
        assert_eq!(entry.kind, kind);
        assert!(entry.name.eq_ignore_ascii_case(name.trim()));
    }

    #[test]
    fn test_find_unknown_body() {
        assert!(Catalog::builtin().find("Pluto").is_none());
        assert!(Catalog::builtin().find("").is_none());
    }

    #[rstest]
    #[case("ar", &["Earth", "Mars"])]
    #[case("US", &["Venus", "Uranus"])]
    #[case("e", &["Mercury", "Venus", "Earth", "Jupiter", "Neptune", "Ceres", "Vesta", "Hygiea"])]
    #[case("   ", &[])]
    #[case("zzz", &[])]
    fn test_search(#[case] query: &str, #[case] expected: &[&str]) {
        let names: Vec<&str> = Catalog::builtin()
            .search(query)
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_search_is_capped() {
        let entries = (0..12)
            .map(|n| CatalogEntry {
                name: format!("Trojan {}", n),
                kind: BodyKind::Asteroid,
                color: String::new(),
                size: 1.0,
                elements: OrbitalElements::new(5.2, 0.1, 10.0, 0.0, 0.0, f64::from(n) * 30.0),
                description: String::new(),
                fact: String::new(),
            })
            .collect();
        let catalog = Catalog::new(entries).unwrap();

        let results = catalog.search("trojan");
        assert_eq!(results.len(), SEARCH_RESULT_LIMIT);
        assert_eq!(results[0].name, "Trojan 0");
        assert_eq!(results[7].name, "Trojan 7");

        // Whitespace is ignored on both sides
        assert_eq!(catalog.search("trojan1").len(), 3);
        assert_eq!(catalog.search("Trojan 11")[0].name, "Trojan 11");
    }

    #[test]
    fn test_summary() {
        let earth = Catalog::builtin().find("Earth").unwrap();
        let summary = earth.summary().unwrap();
        assert!(summary.starts_with("The third planet"));
        assert!(summary.ends_with("Fact: Earth is the densest planet in the Solar System."));

        let mut no_fact = earth.clone();
        no_fact.fact.clear();
        assert!(no_fact.summary().is_none());

        let mut no_description = earth.clone();
        no_description.description.clear();
        assert!(no_description.summary().is_none());
    }

    #[test]
    fn test_from_json_reader_with_defaults() {
        let json = r#"[
            {"name": "Eros", "type": "Asteroid", "a": 1.458, "e": 0.2229, "i": 10.83, "O": 304.3, "w": 178.9, "M": 320.2},
            {"name": "Tiny", "a": 0.5, "e": 0.0, "i": 0.0, "O": 0.0, "w": 0.0, "M": 0.0}
        ]"#;
        let catalog = Catalog::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);

        let eros = catalog.find("eros").unwrap();
        assert_eq!(eros.kind, BodyKind::Asteroid);
        assert_eq!(eros.elements.node, 304.3);
        assert_eq!(eros.size, 1.0);
        assert!(eros.color.is_empty());

        assert_eq!(catalog.find("Tiny").unwrap().kind, BodyKind::Planet);
    }

    #[test]
    fn test_from_json_rejects_bad_entries() {
        let hyperbolic = r#"[{"name": "Oumuamua", "a": 1.0, "e": 1.2, "i": 0, "O": 0, "w": 0, "M": 0}]"#;
        match Catalog::from_json_reader(hyperbolic.as_bytes()) {
            Err(CatalogError::InvalidElements { name, source }) => {
                assert_eq!(name, "Oumuamua");
                assert_eq!(source, ElementsError::UnsupportedEccentricity(1.2));
            }
            other => panic!("expected InvalidElements, got {:?}", other),
        }

        let duplicate = r#"[
            {"name": "Ceres", "a": 2.7, "e": 0.1, "i": 0, "O": 0, "w": 0, "M": 0},
            {"name": "CERES", "a": 2.7, "e": 0.1, "i": 0, "O": 0, "w": 0, "M": 0}
        ]"#;
        assert!(matches!(
            Catalog::from_json_reader(duplicate.as_bytes()),
            Err(CatalogError::DuplicateName(name)) if name == "CERES"
        ));

        let unnamed = r#"[{"name": " ", "a": 1.0, "e": 0.1, "i": 0, "O": 0, "w": 0, "M": 0}]"#;
        assert!(matches!(
            Catalog::from_json_reader(unnamed.as_bytes()),
            Err(CatalogError::EmptyName)
        ));

        assert!(matches!(
            Catalog::from_json_reader("{not json".as_bytes()),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bodies.json");
        let mut file = File::create(&path).unwrap();
        let json = serde_json::to_string_pretty(Catalog::builtin()).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        drop(file);

        let loaded = Catalog::from_json_file(&path).unwrap();
        assert_eq!(loaded.len(), Catalog::builtin().len());
        for (ours, theirs) in loaded.iter().zip(Catalog::builtin()) {
            assert_eq!(ours.name, theirs.name);
            assert_eq!(ours.kind, theirs.kind);
            assert_eq!(ours.description, theirs.description);
            assert_relative_eq!(ours.elements.a, theirs.elements.a, max_relative = 1e-12);
            assert_relative_eq!(ours.elements.e, theirs.elements.e, max_relative = 1e-12);
            assert_relative_eq!(ours.elements.node, theirs.elements.node, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::from_json_file(dir.path().join("missing.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
