//! Bright-star catalog and constellation figures for the sky sphere
//!
//! Stars are read from the JSON rendering of the Yale Bright Star Catalog,
//! where every field is a string (`"RAh": "05"`, `"DE-": "-"`, ...). Records
//! whose magnitude or position does not parse are skipped, the same way the
//! sky renderer drops them.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinates::{star_to_scene, Cartesian3, Declination, RightAscension};
use crate::planetlib::{search_key, SEARCH_RESULT_LIMIT};

/// Radius of the sphere stars are drawn on, in scene units
pub const SKY_SPHERE_RADIUS: f64 = 50_000.0;
/// Distance of the point the camera looks at when a constellation is selected
pub const CONSTELLATION_FOCUS_RADIUS: f64 = 10_000.0;
/// Magnitude of Sirius, the brightest star in the catalog
pub const BRIGHTEST_MAGNITUDE: f64 = -1.46;

/// Error type for star catalog loading
#[derive(Debug, Error)]
pub enum StarCatalogError {
    #[error("Failed to read star catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed star catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One raw record of the bright-star JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrightStarRecord {
    #[serde(rename = "HR", default)]
    pub hr: Option<String>,
    #[serde(rename = "RAh", default)]
    pub ra_hours: String,
    #[serde(rename = "RAm", default)]
    pub ra_minutes: String,
    #[serde(rename = "RAs", default)]
    pub ra_seconds: String,
    #[serde(rename = "DE-", default)]
    pub dec_sign: String,
    #[serde(rename = "DEd", default)]
    pub dec_degrees: String,
    #[serde(rename = "DEm", default)]
    pub dec_minutes: String,
    #[serde(rename = "DEs", default)]
    pub dec_seconds: String,
    #[serde(rename = "Vmag", default)]
    pub vmag: String,
    #[serde(rename = "SpectralCls", default)]
    pub spectral_class: String,
}

fn parse_field(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Broad color family of a star, taken from the first letter of its spectral class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectralTint {
    Blue,
    White,
    YellowWhite,
    Orange,
    Red,
    Neutral,
}

impl SpectralTint {
    pub fn from_class(spectral_class: &str) -> Self {
        match spectral_class.trim_start().chars().next() {
            Some('O') | Some('B') => SpectralTint::Blue,
            Some('A') => SpectralTint::White,
            Some('F') | Some('G') => SpectralTint::YellowWhite,
            Some('K') => SpectralTint::Orange,
            Some('M') => SpectralTint::Red,
            _ => SpectralTint::Neutral,
        }
    }

    /// Hue and saturation used to color the star
    pub fn hue_saturation(&self) -> (f64, f64) {
        match self {
            SpectralTint::Blue => (0.6, 0.4),
            SpectralTint::White => (0.6, 0.1),
            SpectralTint::YellowWhite => (0.12, 0.4),
            SpectralTint::Orange => (0.08, 0.6),
            SpectralTint::Red => (0.02, 0.8),
            SpectralTint::Neutral => (0.0, 0.0),
        }
    }
}

/// A star with parsed position and brightness
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Harvard Revised number, if the record carries one
    pub hr: Option<u32>,
    pub ra: RightAscension,
    pub dec: Declination,
    /// Visual magnitude (lower is brighter)
    pub magnitude: f64,
    pub spectral_class: String,
}

impl Star {
    /// Parse a raw record, returning `None` when magnitude or position is unusable
    pub fn from_record(record: &BrightStarRecord) -> Option<Self> {
        let magnitude = parse_field(&record.vmag)?;
        let ra = RightAscension::new(
            parse_field(&record.ra_hours)?,
            parse_field(&record.ra_minutes)?,
            parse_field(&record.ra_seconds)?,
        );
        let dec = Declination::new(
            record.dec_sign.trim() == "-",
            parse_field(&record.dec_degrees)?,
            parse_field(&record.dec_minutes)?,
            parse_field(&record.dec_seconds)?,
        );
        let hr = record
            .hr
            .as_deref()
            .and_then(|hr| hr.trim().parse::<u32>().ok());

        Some(Self {
            hr,
            ra,
            dec,
            magnitude,
            spectral_class: record.spectral_class.trim().to_string(),
        })
    }

    /// Position on a sky sphere of the given radius
    pub fn scene_position(&self, radius: f64) -> Cartesian3 {
        star_to_scene(&self.ra, &self.dec, radius)
    }

    /// Display brightness in [0.2, 1.0], falling off linearly from Sirius
    pub fn intensity(&self) -> f64 {
        (1.0 - (self.magnitude - BRIGHTEST_MAGNITUDE) / 7.5).clamp(0.2, 1.0)
    }

    pub fn tint(&self) -> SpectralTint {
        SpectralTint::from_class(&self.spectral_class)
    }
}

/// A constellation figure as pairs of HR numbers to join with lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constellation {
    pub name: &'static str,
    pub lines: &'static [(u32, u32)],
}

lazy_static! {
    static ref CONSTELLATIONS: Vec<Constellation> = vec![
        // Zodiac
        Constellation { name: "Aries", lines: &[(617, 553), (553, 546), (546, 99)] },
        Constellation {
            name: "Taurus",
            lines: &[(1457, 1409), (1409, 1346), (1409, 1373), (1457, 1641), (1409, 1791), (1178, 1165)],
        },
        Constellation {
            name: "Gemini",
            lines: &[(2421, 2473), (2421, 2216), (2473, 2286), (2216, 1977), (2286, 2088)],
        },
        Constellation { name: "Cancer", lines: &[(3461, 3449), (3449, 3429), (3429, 3408)] },
        Constellation {
            name: "Leo",
            lines: &[(3982, 4057), (4057, 4031), (4031, 3905), (3905, 3873), (4031, 4357), (4357, 4359), (4359, 4534)],
        },
        Constellation {
            name: "Virgo",
            lines: &[(5056, 4910), (4910, 4825), (4825, 4540), (5056, 5338), (4910, 4689), (4825, 4932)],
        },
        Constellation { name: "Libra", lines: &[(5685, 5787), (5787, 5603), (5685, 5603)] },
        Constellation {
            name: "Scorpius",
            lines: &[(6134, 6027), (6134, 6247), (6247, 6252), (6252, 6241), (6241, 6378), (6378, 6553), (6553, 6508), (6508, 6527)],
        },
        Constellation {
            name: "Sagittarius",
            lines: &[(6913, 6879), (6879, 6859), (6879, 7121), (7121, 7194), (6913, 7194), (6859, 7039), (7039, 7121)],
        },
        Constellation {
            name: "Capricornus",
            lines: &[(7776, 7773), (7776, 8278), (8278, 8322), (8322, 8204), (8204, 8162)],
        },
        Constellation {
            name: "Aquarius",
            lines: &[(8414, 8232), (8232, 8518), (8518, 8610), (8610, 8634), (8518, 8709), (8709, 8728)],
        },
        Constellation {
            name: "Pisces",
            lines: &[(603, 489), (489, 383), (8852, 8773), (8773, 8916), (8916, 9067), (9067, 45), (603, 224)],
        },
        // Northern and southern landmarks
        Constellation {
            name: "Orion",
            lines: &[(2061, 1790), (2061, 1879), (1879, 1790), (1790, 1852), (1852, 1903), (1903, 1948), (1948, 2004), (1713, 2004)],
        },
        Constellation {
            name: "Ursa Major",
            lines: &[(4301, 4295), (4295, 4554), (4554, 4660), (4660, 4301), (4660, 4905), (4905, 5054), (5054, 5191)],
        },
        Constellation { name: "Cassiopeia", lines: &[(21, 168), (168, 264), (264, 403), (403, 542)] },
        Constellation { name: "Crux", lines: &[(4730, 4763), (4853, 4656), (4730, 4853), (4763, 4656)] },
        Constellation { name: "Cygnus", lines: &[(7924, 7796), (7796, 7417), (7796, 7528), (7796, 7949)] },
        Constellation {
            name: "Lyra",
            lines: &[(7001, 7106), (7001, 7178), (7178, 7235), (7235, 7141), (7141, 7106)],
        },
        Constellation { name: "Aquila", lines: &[(7557, 7525), (7557, 7595), (7557, 7236)] },
        Constellation {
            name: "Canis Major",
            lines: &[(2491, 2282), (2491, 2618), (2618, 2657), (2657, 2693)],
        },
        Constellation { name: "Pegasus", lines: &[(8775, 8781), (8781, 39), (39, 15), (15, 8775)] },
    ];
}

/// The built-in constellation figures
pub fn constellations() -> &'static [Constellation] {
    &CONSTELLATIONS
}

/// Case-insensitive lookup; spaces are ignored so "UrsaMajor" also matches
pub fn find_constellation(name: &str) -> Option<&'static Constellation> {
    let wanted = search_key(name);
    CONSTELLATIONS.iter().find(|c| search_key(c.name) == wanted)
}

/// Case-insensitive substring search over constellation names, ignoring spaces
pub fn search_constellations(query: &str) -> Vec<&'static Constellation> {
    matching_constellations(&search_key(query))
        .take(SEARCH_RESULT_LIMIT)
        .collect()
}

pub(crate) fn matching_constellations(key: &str) -> impl Iterator<Item = &'static Constellation> + '_ {
    CONSTELLATIONS
        .iter()
        .filter(move |c| !key.is_empty() && search_key(c.name).contains(key))
}

/// Bright-star catalog indexed by HR number
#[derive(Debug, Clone, Default)]
pub struct StarCatalog {
    stars: Vec<Star>,
    by_hr: HashMap<u32, usize>,
}

impl StarCatalog {
    /// Build a catalog from raw records, dropping those that do not parse
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a BrightStarRecord>,
    {
        let mut catalog = Self::default();
        let mut skipped = 0usize;
        for record in records {
            match Star::from_record(record) {
                Some(star) => catalog.push(star),
                None => skipped += 1,
            }
        }
        debug!(
            "Loaded {} stars ({} unusable records skipped)",
            catalog.len(),
            skipped
        );
        catalog
    }

    /// Adds a star; a later record reusing an HR number is dropped
    fn push(&mut self, star: Star) {
        if let Some(hr) = star.hr {
            if self.by_hr.contains_key(&hr) {
                warn!("Skipping duplicate record for HR {}", hr);
                return;
            }
            self.by_hr.insert(hr, self.stars.len());
        }
        self.stars.push(star);
    }

    /// Load stars from a JSON array of bright-star records
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, StarCatalogError> {
        let records: Vec<BrightStarRecord> = serde_json::from_reader(reader)?;
        Ok(Self::from_records(&records))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, StarCatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| StarCatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading star catalog from {}", path.display());
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn stars(&self) -> impl Iterator<Item = &Star> + '_ {
        self.stars.iter()
    }

    /// Look up a star by its HR number
    pub fn get_star(&self, hr: u32) -> Option<&Star> {
        self.by_hr.get(&hr).map(|&index| &self.stars[index])
    }

    /// Stars at or brighter than the given magnitude
    pub fn brighter_than(&self, magnitude: f64) -> Vec<&Star> {
        self.stars
            .iter()
            .filter(|star| star.magnitude <= magnitude)
            .collect()
    }

    /// Line segments of a constellation figure on a sphere of the given radius
    ///
    /// Pairs that name a star missing from the catalog are left out.
    pub fn constellation_segments(
        &self,
        constellation: &Constellation,
        radius: f64,
    ) -> Vec<(Cartesian3, Cartesian3)> {
        constellation
            .lines
            .iter()
            .filter_map(|&(from, to)| {
                let from = self.get_star(from)?;
                let to = self.get_star(to)?;
                Some((from.scene_position(radius), to.scene_position(radius)))
            })
            .collect()
    }

    /// Point the camera should look at for a constellation
    ///
    /// This is the first star of the figure's first line, placed at
    /// [`CONSTELLATION_FOCUS_RADIUS`].
    pub fn constellation_center(&self, constellation: &Constellation) -> Option<Cartesian3> {
        let &(first, _) = constellation.lines.first()?;
        self.get_star(first)
            .map(|star| star.scene_position(CONSTELLATION_FOCUS_RADIUS))
    }
}
