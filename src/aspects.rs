use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

use crate::{CelestialBody, Chart, House};

// ---------------------------
// ## Aspect Tables
// ---------------------------

/// Which houses a planet throws its glance on, counted from its own seat.
/// Domain constants, not derived from anything.
pub fn aspect_offsets(body: CelestialBody) -> &'static [u8] {
    match body {
        CelestialBody::Mars => &[4, 7, 8],
        CelestialBody::Jupiter | CelestialBody::Rahu | CelestialBody::Ketu => &[5, 7, 9],
        CelestialBody::Saturn => &[3, 7, 10],
        CelestialBody::Sun
        | CelestialBody::Moon
        | CelestialBody::Mercury
        | CelestialBody::Venus
        | CelestialBody::Uranus
        | CelestialBody::Neptune
        | CelestialBody::Pluto => &[7],
    }
}

/// Natural benefic/malefic disposition of an aspecting planet. Fixed per
/// planet identity; target house and status flags play no part.
pub fn nature_of(body: CelestialBody) -> Nature {
    match body {
        CelestialBody::Moon
        | CelestialBody::Mercury
        | CelestialBody::Jupiter
        | CelestialBody::Venus => Nature::Benefic,
        CelestialBody::Sun
        | CelestialBody::Mars
        | CelestialBody::Saturn
        | CelestialBody::Rahu
        | CelestialBody::Ketu
        | CelestialBody::Uranus
        | CelestialBody::Neptune
        | CelestialBody::Pluto => Nature::Malefic,
    }
}

/// Line color the chart view draws this planet's aspects in.
pub fn color_of(body: CelestialBody) -> &'static str {
    match body {
        CelestialBody::Sun => "#FFD700",
        CelestialBody::Moon => "#FFF",
        CelestialBody::Mars => "#FF3333",
        CelestialBody::Mercury => "#00BFFF",
        CelestialBody::Jupiter => "#FFA500",
        CelestialBody::Venus => "#FF69B4",
        CelestialBody::Saturn => "#c3924f",
        CelestialBody::Rahu => "#CBC3E3",
        CelestialBody::Ketu => "#888",
        CelestialBody::Uranus => "#90ee90",
        CelestialBody::Neptune => "#00ffff",
        CelestialBody::Pluto => "#a0522d",
    }
}

/// Display label for an offset. Unlisted offsets fall back to a generic
/// ordinal; display only, never fatal.
pub fn aspect_label(offset: u8) -> String {
    match offset {
        3 => "3rd".to_string(),
        4 => "4th".to_string(),
        5 => "5th".to_string(),
        7 => "7th".to_string(),
        8 => "8th".to_string(),
        9 => "9th".to_string(),
        10 => "10th".to_string(),
        other => format!("{}th", other),
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Nature {
    Benefic,
    Malefic,
    Neutral,
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            Nature::Benefic => "benefic",
            Nature::Malefic => "malefic",
            Nature::Neutral => "neutral",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------
// ## Aspect Calculation
// ---------------------------

/// One directional influence a planet casts on a house. Produced fresh per
/// evaluation; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aspect {
    pub planet: CelestialBody,
    pub from_house: House,
    pub to_house: House,
    pub aspect_type: String,
    pub nature: Nature,
    pub color: &'static str,
}

/// Emit every aspect in the chart: one per placed planet per entry in that
/// planet's offset list, targeting `((from + offset - 1) mod 12) + 1`.
/// The result size is exactly the sum of offset-list lengths over placed
/// planets.
#[instrument(level = "debug", skip(chart))]
pub fn calculate_aspects(chart: &Chart) -> Vec<Aspect> {
    let mut aspects = Vec::new();
    for placement in chart.placements() {
        let body = placement.planet.body;
        for &offset in aspect_offsets(body) {
            aspects.push(Aspect {
                planet: body,
                from_house: placement.house,
                to_house: placement.house.advance(offset),
                aspect_type: aspect_label(offset),
                nature: nature_of(body),
                color: color_of(body),
            });
        }
    }
    debug!(count = aspects.len(), "aspects calculated");
    aspects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Planet, ZodiacSign};
    use rstest::rstest;

    fn place(chart: &mut Chart, body: CelestialBody, sign: ZodiacSign) {
        chart.place(Planet::new(body, sign, 10.0)).unwrap();
    }

    #[test]
    fn empty_chart_emits_no_aspects() {
        let chart = Chart::new(ZodiacSign::Aries);
        assert!(calculate_aspects(&chart).is_empty());
    }

    #[test]
    fn aspect_count_matches_offset_table_sizes() {
        let mut chart = Chart::new(ZodiacSign::Aries);
        for body in CelestialBody::iter() {
            place(&mut chart, body, ZodiacSign::Leo);
        }
        let expected: usize = CelestialBody::iter()
            .map(|b| aspect_offsets(b).len())
            .sum();
        assert_eq!(calculate_aspects(&chart).len(), expected);
        // 7 single-aspect planets, Mars/Jupiter/Saturn/Rahu/Ketu with 3 each
        assert_eq!(expected, 7 + 5 * 3);
    }

    // house 12 + offset 7 wraps to house 7; house 1 + offset 7 lands on 8
    #[rstest]
    #[case(ZodiacSign::Pisces, House::Twelfth, House::Seventh)]
    #[case(ZodiacSign::Aries, House::First, House::Eighth)]
    fn seventh_offset_wraps_around_the_circle(
        #[case] sign: ZodiacSign,
        #[case] from: House,
        #[case] to: House,
    ) {
        // Ascendant Aries puts each sign at its own index.
        let mut chart = Chart::new(ZodiacSign::Aries);
        place(&mut chart, CelestialBody::Sun, sign);
        let aspects = calculate_aspects(&chart);
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects[0].from_house, from);
        assert_eq!(aspects[0].to_house, to);
    }

    #[test]
    fn mars_throws_three_aspects_from_its_seat() {
        let mut chart = Chart::new(ZodiacSign::Aries);
        place(&mut chart, CelestialBody::Mars, ZodiacSign::Taurus);
        let aspects = calculate_aspects(&chart);
        let targets: Vec<u8> = aspects.iter().map(|a| a.to_house.number()).collect();
        assert_eq!(targets, vec![6, 9, 10]);
        let labels: Vec<&str> = aspects.iter().map(|a| a.aspect_type.as_str()).collect();
        assert_eq!(labels, vec!["4th", "7th", "8th"]);
        assert!(aspects.iter().all(|a| a.nature == Nature::Malefic));
        assert!(aspects.iter().all(|a| a.color == "#FF3333"));
    }

    #[test]
    fn label_falls_back_to_generic_ordinal() {
        assert_eq!(aspect_label(6), "6th");
        assert_eq!(aspect_label(11), "11th");
        assert_eq!(aspect_label(7), "7th");
    }

    #[test]
    fn nature_table_splits_benefics_from_malefics() {
        assert_eq!(nature_of(CelestialBody::Moon), Nature::Benefic);
        assert_eq!(nature_of(CelestialBody::Mercury), Nature::Benefic);
        assert_eq!(nature_of(CelestialBody::Sun), Nature::Malefic);
        assert_eq!(nature_of(CelestialBody::Pluto), Nature::Malefic);
    }
}
