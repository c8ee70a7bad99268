use serde::Serialize;
use tracing::{debug, instrument};

use crate::{CelestialBody, Chart, House, Placement, PlanetStatus, YogaCatalog};

pub const KENDRA_HOUSES: [House; 4] = [House::First, House::Fourth, House::Seventh, House::Tenth];
pub const TRIKONA_HOUSES: [House; 3] = [House::First, House::Fifth, House::Ninth];

fn is_kendra(house: House) -> bool {
    KENDRA_HOUSES.contains(&house)
}

fn is_benefic_helper(body: CelestialBody) -> bool {
    matches!(
        body,
        CelestialBody::Jupiter | CelestialBody::Venus | CelestialBody::Moon
    )
}

/// A detected combination pattern: catalog text plus a human-readable
/// account of which planets and houses formed it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Yoga {
    pub name: String,
    pub condition: String,
    pub effect: String,
    pub details: String,
}

/// A yoga predicate inspects the flattened chart and, when the pattern
/// holds, returns the formation details.
pub type YogaPredicate = for<'a, 'b> fn(&'a [Placement<'b>]) -> Option<String>;

/// The hand-coded matcher behind each catalog name. Catalog entries with
/// no matcher here are simply never detected.
pub fn predicate_for(name: &str) -> Option<YogaPredicate> {
    match name {
        "GajKesariYog" => Some(gaj_kesari),
        "KalSarpYog" => Some(kal_sarp),
        "PanchaMahapurushaYog" => Some(pancha_mahapurusha),
        "ChandraMangalYog" => Some(chandra_mangal),
        "AmalaYog" => Some(amala),
        "SaraswatiYog" => Some(saraswati),
        "RajYog" => Some(raj),
        "NeechBhangRajYog" => Some(neech_bhang),
        _ => None,
    }
}

/// Evaluate every catalog entry against the chart, in catalog order. Each
/// name is reported at most once; an empty catalog yields an empty result.
#[instrument(level = "debug", skip(chart, catalog))]
pub fn detect_yogas(chart: &Chart, catalog: &YogaCatalog) -> Vec<Yoga> {
    let placements = chart.placements();
    let mut detected = Vec::new();
    for (name, text) in catalog.iter() {
        let Some(predicate) = predicate_for(name) else {
            continue;
        };
        if let Some(details) = predicate(&placements) {
            detected.push(Yoga {
                name: name.to_string(),
                condition: text.condition.clone(),
                effect: text.effect.clone(),
                details,
            });
        }
    }
    debug!(count = detected.len(), "yogas detected");
    detected
}

// ---------------------------
// ## Predicates
// ---------------------------

/// Jupiter seated in an angular house.
fn gaj_kesari(placements: &[Placement]) -> Option<String> {
    placements
        .iter()
        .find(|p| p.planet.body == CelestialBody::Jupiter && is_kendra(p.house))
        .map(|p| format!("Jupiter in House {} ({})", p.house, p.sign))
}

/// Every planet hemmed within the band between Rahu and Ketu. Positions are
/// compared on the 0-360 scale; the band is checked in both orientations,
/// and a chart with no planets besides the nodes qualifies vacuously.
fn kal_sarp(placements: &[Placement]) -> Option<String> {
    let rahu = placements
        .iter()
        .find(|p| p.planet.body == CelestialBody::Rahu)?;
    let ketu = placements
        .iter()
        .find(|p| p.planet.body == CelestialBody::Ketu)?;
    let rahu_pos = rahu.absolute_position();
    let ketu_pos = ketu.absolute_position();

    let all_between = placements.iter().all(|p| {
        if p.planet.body == CelestialBody::Rahu || p.planet.body == CelestialBody::Ketu {
            return true;
        }
        let pos = p.absolute_position();
        (rahu_pos <= pos && pos <= ketu_pos) || (ketu_pos <= pos && pos <= rahu_pos)
    });

    all_between.then(|| {
        format!(
            "Rahu in House {} ({}), Ketu in House {} ({})",
            rahu.house, rahu.sign, ketu.house, ketu.sign
        )
    })
}

/// Any of the five mahapurusha planets exalted in an angular house; every
/// qualifying planet is listed.
fn pancha_mahapurusha(placements: &[Placement]) -> Option<String> {
    let strong: Vec<&Placement> = placements
        .iter()
        .filter(|p| {
            matches!(
                p.planet.body,
                CelestialBody::Mercury
                    | CelestialBody::Venus
                    | CelestialBody::Mars
                    | CelestialBody::Jupiter
                    | CelestialBody::Saturn
            ) && p.planet.has_status(PlanetStatus::Exalted)
                && is_kendra(p.house)
        })
        .collect();
    if strong.is_empty() {
        return None;
    }
    Some(
        strong
            .iter()
            .map(|p| format!("{} (exalted) in House {} ({})", p.planet.body, p.house, p.sign))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Moon and Mars sharing a house.
fn chandra_mangal(placements: &[Placement]) -> Option<String> {
    let moon = placements
        .iter()
        .find(|p| p.planet.body == CelestialBody::Moon)?;
    let mars = placements
        .iter()
        .find(|p| p.planet.body == CelestialBody::Mars)?;
    (moon.house == mars.house)
        .then(|| format!("Moon and Mars in House {} ({})", moon.house, moon.sign))
}

/// A natural benefic occupying the 10th house.
fn amala(placements: &[Placement]) -> Option<String> {
    placements
        .iter()
        .find(|p| is_benefic_helper(p.planet.body) && p.house == House::Tenth)
        .map(|p| format!("{} in House 10 ({})", p.planet.body, p.sign))
}

/// At least two of Mercury, Jupiter and Venus across the kendra and trikona
/// houses (the 4th and 10th included).
fn saraswati(placements: &[Placement]) -> Option<String> {
    let qualifying: Vec<&Placement> = placements
        .iter()
        .filter(|p| {
            matches!(
                p.planet.body,
                CelestialBody::Mercury | CelestialBody::Jupiter | CelestialBody::Venus
            ) && matches!(p.house.number(), 1 | 4 | 5 | 7 | 9 | 10)
        })
        .collect();
    if qualifying.len() < 2 {
        return None;
    }
    Some(
        qualifying
            .iter()
            .map(|p| format!("{} in House {} ({})", p.planet.body, p.house, p.sign))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// Coarse Raj Yoga proxy: some planet in a kendra house and some planet in
/// a trikona house at the same time. A real lordship/conjunction analysis
/// would report far fewer charts; the documented behavior is this one.
fn raj(placements: &[Placement]) -> Option<String> {
    let kendra: Vec<String> = placements
        .iter()
        .filter(|p| is_kendra(p.house))
        .map(|p| p.house.to_string())
        .collect();
    let trikona: Vec<String> = placements
        .iter()
        .filter(|p| TRIKONA_HOUSES.contains(&p.house))
        .map(|p| p.house.to_string())
        .collect();
    if kendra.is_empty() || trikona.is_empty() {
        return None;
    }
    Some(format!(
        "Planets in Kendra houses ({}) and Trikona houses ({})",
        kendra.join(","),
        trikona.join(",")
    ))
}

/// Simplified debilitation cancellation: a debilitated planet in an angular
/// house, or sharing a house with a natural benefic. A debilitated Moon
/// passes the co-tenant check by itself; documented behavior, kept as is.
fn neech_bhang(placements: &[Placement]) -> Option<String> {
    let mitigated: Vec<&Placement> = placements
        .iter()
        .filter(|p| p.planet.has_status(PlanetStatus::Debilitated))
        .filter(|p| {
            is_kendra(p.house)
                || placements
                    .iter()
                    .any(|other| is_benefic_helper(other.planet.body) && other.house == p.house)
        })
        .collect();
    if mitigated.is_empty() {
        return None;
    }
    Some(
        mitigated
            .iter()
            .map(|p| {
                format!(
                    "{} (debilitated but strengthened) in House {} ({})",
                    p.planet.body, p.house, p.sign
                )
            })
            .collect::<Vec<_>>()
            .join(", "),
    )
}
