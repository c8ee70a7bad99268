use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

pub mod aspects;
pub mod dataset;
pub mod dignity;
pub mod strength;
pub mod yogas;

pub use aspects::{calculate_aspects, Aspect, Nature};
pub use dataset::{Dataset, HouseText, YogaCatalog, YogaText};
pub use strength::{assess_house, HouseStrength, StrengthClass};
pub use yogas::{detect_yogas, Yoga};

// ---------------------------
// ## Enumerations
// ---------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CelestialBody {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
    Uranus,
    Neptune,
    Pluto,
}

impl CelestialBody {
    pub fn iter() -> impl Iterator<Item = CelestialBody> {
        [
            CelestialBody::Sun,
            CelestialBody::Moon,
            CelestialBody::Mars,
            CelestialBody::Mercury,
            CelestialBody::Jupiter,
            CelestialBody::Venus,
            CelestialBody::Saturn,
            CelestialBody::Rahu,
            CelestialBody::Ketu,
            CelestialBody::Uranus,
            CelestialBody::Neptune,
            CelestialBody::Pluto,
        ]
        .iter()
        .copied()
    }

    /// Two-letter form used on the wire and in chart cells.
    pub fn abbreviation(self) -> &'static str {
        match self {
            CelestialBody::Sun => "Su",
            CelestialBody::Moon => "Mo",
            CelestialBody::Mars => "Ma",
            CelestialBody::Mercury => "Me",
            CelestialBody::Jupiter => "Ju",
            CelestialBody::Venus => "Ve",
            CelestialBody::Saturn => "Sa",
            CelestialBody::Rahu => "Ra",
            CelestialBody::Ketu => "Ke",
            CelestialBody::Uranus => "Ur",
            CelestialBody::Neptune => "Ne",
            CelestialBody::Pluto => "Pl",
        }
    }

    pub fn from_abbreviation(abbrev: &str) -> Option<CelestialBody> {
        CelestialBody::iter().find(|b| b.abbreviation() == abbrev)
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mars => "Mars",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Venus => "Venus",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Rahu => "Rahu",
            CelestialBody::Ketu => "Ketu",
            CelestialBody::Uranus => "Uranus",
            CelestialBody::Neptune => "Neptune",
            CelestialBody::Pluto => "Pluto",
        };
        write!(f, "{}", name)
    }
}

impl Serialize for CelestialBody {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.abbreviation())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ZodiacSign {
    Aries = 0,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// The fixed zodiac ordering that house rotation is defined over.
    pub const ORDER: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn iter() -> impl Iterator<Item = ZodiacSign> {
        ZodiacSign::ORDER.iter().copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<ZodiacSign> {
        ZodiacSign::ORDER.get(index).copied()
    }

    pub fn from_name(name: &str) -> Option<ZodiacSign> {
        match name {
            "Aries" => Some(ZodiacSign::Aries),
            "Taurus" => Some(ZodiacSign::Taurus),
            "Gemini" => Some(ZodiacSign::Gemini),
            "Cancer" => Some(ZodiacSign::Cancer),
            "Leo" => Some(ZodiacSign::Leo),
            "Virgo" => Some(ZodiacSign::Virgo),
            "Libra" => Some(ZodiacSign::Libra),
            "Scorpio" => Some(ZodiacSign::Scorpio),
            "Sagittarius" => Some(ZodiacSign::Sagittarius),
            "Capricorn" => Some(ZodiacSign::Capricorn),
            "Aquarius" => Some(ZodiacSign::Aquarius),
            "Pisces" => Some(ZodiacSign::Pisces),
            _ => None,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign_str = match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        };
        write!(f, "{}", sign_str)
    }
}

impl Serialize for ZodiacSign {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum House {
    First = 1,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
    Ninth,
    Tenth,
    Eleventh,
    Twelfth,
}

impl House {
    pub const ORDER: [House; 12] = [
        House::First,
        House::Second,
        House::Third,
        House::Fourth,
        House::Fifth,
        House::Sixth,
        House::Seventh,
        House::Eighth,
        House::Ninth,
        House::Tenth,
        House::Eleventh,
        House::Twelfth,
    ];

    pub fn from_index(index: usize) -> Option<House> {
        match index {
            1..=12 => Some(House::ORDER[index - 1]),
            _ => None,
        }
    }

    pub fn all() -> impl Iterator<Item = House> {
        House::ORDER.iter().copied()
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// The house reached by counting `offset` houses onward from this one:
    /// `((from + offset - 1) mod 12) + 1`.
    pub fn advance(self, offset: u8) -> House {
        House::ORDER[(self as usize - 1 + offset as usize) % 12]
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Serialize for House {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.number())
    }
}

/// Dignity and motion flags attached to a placed planet by the casting
/// backend. Exalted and debilitated never co-occur on the same planet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetStatus {
    Exalted,
    Debilitated,
    Combust,
    Retrograde,
    Peak,
}

impl PlanetStatus {
    pub fn from_name(name: &str) -> Option<PlanetStatus> {
        match name {
            "exalted" => Some(PlanetStatus::Exalted),
            "debilitated" => Some(PlanetStatus::Debilitated),
            "combust" => Some(PlanetStatus::Combust),
            "retrograde" => Some(PlanetStatus::Retrograde),
            "peak" => Some(PlanetStatus::Peak),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            PlanetStatus::Exalted => "↑",
            PlanetStatus::Debilitated => "↓",
            PlanetStatus::Combust => "🔥",
            PlanetStatus::Retrograde => "℞",
            PlanetStatus::Peak => "★",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlanetStatus::Exalted => "Exalted (↑)",
            PlanetStatus::Debilitated => "Debilitated (↓)",
            PlanetStatus::Combust => "Combust (🔥)",
            PlanetStatus::Retrograde => "Retrograde (℞)",
            PlanetStatus::Peak => "Peak (★)",
        }
    }
}

// ---------------------------
// ## Structures
// ---------------------------

/// A planet as placed by the casting backend: degree within its sign plus
/// whatever status flags apply. Immutable once placed into a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Planet {
    pub body: CelestialBody,
    #[serde(rename = "deg")]
    pub degree: f64,
    pub sign: ZodiacSign,
    pub status: Vec<PlanetStatus>,
}

impl Planet {
    pub fn new(body: CelestialBody, sign: ZodiacSign, degree: f64) -> Planet {
        Planet {
            body,
            degree,
            sign,
            status: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: Vec<PlanetStatus>) -> Planet {
        self.status = status;
        self
    }

    pub fn has_status(&self, status: PlanetStatus) -> bool {
        self.status.contains(&status)
    }
}

/// A planet viewed through the house rotation: the flat
/// `(planet, house, sign)` triple the yoga predicates match over.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub planet: &'a Planet,
    pub house: House,
    pub sign: ZodiacSign,
}

impl Placement<'_> {
    /// Position on the single 0-360 circular scale used for
    /// direction-agnostic range checks: house offset times 30 plus the
    /// degree within the sign.
    pub fn absolute_position(&self) -> f64 {
        (self.house.number() as f64 - 1.0) * 30.0 + self.planet.degree
    }
}

// ---------------------------
// ## Error Handling
// ---------------------------

/// Identity-level input failures. Any of these fails the whole evaluation;
/// partial results could be mistaken for a complete chart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("unrecognized zodiac sign: {0}")]
    UnknownSign(String),

    #[error("unrecognized planet: {0}")]
    UnknownPlanet(String),

    #[error("unrecognized planet status: {0}")]
    UnknownStatus(String),

    #[error("planet placed more than once: {0}")]
    DuplicatePlanet(CelestialBody),
}

// ---------------------------
// ## Chart
// ---------------------------

/// Wire form of a chart snapshot as the casting backend ships it. All
/// identifiers are plain strings until `Chart::from_input` checks them.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartInput {
    pub sign_planets: HashMap<String, Vec<PlanetInput>>,
    pub asc_sign: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanetInput {
    pub name: String,
    #[serde(rename = "deg")]
    pub degree: f64,
    #[serde(default)]
    pub status: Vec<String>,
}

/// An immutable chart snapshot: each sign's ordered planet list plus the
/// ascendant sign anchoring house 1. Every planet appears at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    sign_planets: HashMap<ZodiacSign, Vec<Planet>>,
    ascendant: ZodiacSign,
}

impl Chart {
    pub fn new(ascendant: ZodiacSign) -> Chart {
        Chart {
            sign_planets: HashMap::new(),
            ascendant,
        }
    }

    /// Validate a wire snapshot into a typed chart. Unknown signs, planets
    /// or status flags are fatal, as is the same planet appearing twice.
    pub fn from_input(input: &ChartInput) -> Result<Chart, ChartError> {
        let ascendant = ZodiacSign::from_name(&input.asc_sign)
            .ok_or_else(|| ChartError::UnknownSign(input.asc_sign.clone()))?;
        let mut chart = Chart::new(ascendant);
        // Fixed zodiac traversal keeps placement order reproducible no
        // matter how the wire map happens to hash.
        for sign in ZodiacSign::iter() {
            let Some(entries) = input.sign_planets.get(&sign.to_string()) else {
                continue;
            };
            for entry in entries {
                let body = CelestialBody::from_abbreviation(&entry.name)
                    .ok_or_else(|| ChartError::UnknownPlanet(entry.name.clone()))?;
                let status = entry
                    .status
                    .iter()
                    .map(|s| {
                        PlanetStatus::from_name(s)
                            .ok_or_else(|| ChartError::UnknownStatus(s.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                chart.place(Planet::new(body, sign, entry.degree).with_status(status))?;
            }
        }
        for name in input.sign_planets.keys() {
            if ZodiacSign::from_name(name).is_none() {
                return Err(ChartError::UnknownSign(name.clone()));
            }
        }
        Ok(chart)
    }

    /// Place a planet into its sign's list, rejecting a second placement of
    /// the same body.
    pub fn place(&mut self, planet: Planet) -> Result<(), ChartError> {
        if self.contains(planet.body) {
            return Err(ChartError::DuplicatePlanet(planet.body));
        }
        self.sign_planets
            .entry(planet.sign)
            .or_default()
            .push(planet);
        Ok(())
    }

    pub fn ascendant(&self) -> ZodiacSign {
        self.ascendant
    }

    pub fn contains(&self, body: CelestialBody) -> bool {
        self.sign_planets.values().flatten().any(|p| p.body == body)
    }

    /// House of a sign under rotation from the ascendant; the ascendant
    /// sign itself is always house 1.
    pub fn house_of(&self, sign: ZodiacSign) -> House {
        House::ORDER[(sign.index() + 12 - self.ascendant.index()) % 12]
    }

    /// Sign occupying the given house.
    pub fn sign_of(&self, house: House) -> ZodiacSign {
        ZodiacSign::ORDER[(self.ascendant.index() + house.number() as usize - 1) % 12]
    }

    /// The rotated sign ordering, house 1 first.
    pub fn signs_by_house(&self) -> [ZodiacSign; 12] {
        let mut signs = ZodiacSign::ORDER;
        signs.rotate_left(self.ascendant.index());
        signs
    }

    pub fn planets_in(&self, sign: ZodiacSign) -> &[Planet] {
        self.sign_planets
            .get(&sign)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn planets_in_house(&self, house: House) -> &[Planet] {
        self.planets_in(self.sign_of(house))
    }

    /// Flatten the chart to `(planet, house, sign)` triples in fixed zodiac
    /// traversal order (Aries first, placement order within a sign).
    pub fn placements(&self) -> Vec<Placement<'_>> {
        let mut placements = Vec::new();
        for sign in ZodiacSign::iter() {
            let house = self.house_of(sign);
            for planet in self.planets_in(sign) {
                placements.push(Placement { planet, house, sign });
            }
        }
        placements
    }
}

// ---------------------------
// ## Report
// ---------------------------

/// Everything the presentation layer shows for one house: resident planets,
/// incoming aspects, the strength verdict and the dataset commentary.
/// `planet_notes` carries the dataset's per-planet text for the residents
/// that have any, keyed by display name, verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct HouseProfile {
    pub house: House,
    pub sign: ZodiacSign,
    pub planets: Vec<Planet>,
    pub aspects: Vec<Aspect>,
    pub strength: HouseStrength,
    pub about: String,
    pub planet_notes: Vec<(String, String)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub ascendant: ZodiacSign,
    pub aspects: Vec<Aspect>,
    pub houses: Vec<HouseProfile>,
    pub yogas: Vec<Yoga>,
}

impl Report {
    /// Run every engine over one chart snapshot. Pure: identical inputs
    /// always produce an identical report.
    pub fn evaluate(chart: &Chart, dataset: &Dataset) -> Report {
        let aspects = calculate_aspects(chart);
        let houses = House::all()
            .map(|house| {
                let sign = chart.sign_of(house);
                let planets = chart.planets_in(sign).to_vec();
                let targeting: Vec<Aspect> = aspects
                    .iter()
                    .filter(|a| a.to_house == house)
                    .cloned()
                    .collect();
                let strength = assess_house(house, &planets, &targeting);
                let commentary = dataset.houses.get(&house.number());
                let about = commentary.map(|h| h.about.clone()).unwrap_or_default();
                let planet_notes = planets
                    .iter()
                    .filter_map(|p| {
                        let note = commentary?.planets.get(&p.body.to_string())?;
                        Some((p.body.to_string(), note.clone()))
                    })
                    .collect();
                HouseProfile {
                    house,
                    sign,
                    planets,
                    aspects: targeting,
                    strength,
                    about,
                    planet_notes,
                }
            })
            .collect();
        let yogas = detect_yogas(chart, &dataset.yogas);
        debug!(
            aspects = aspects.len(),
            yogas = yogas.len(),
            "chart report evaluated"
        );
        Report {
            ascendant: chart.ascendant(),
            aspects,
            houses,
            yogas,
        }
    }
}
