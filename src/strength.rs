use serde::Serialize;
use tracing::instrument;

use crate::{Aspect, CelestialBody, House, Nature, Planet, PlanetStatus};

// ---------------------------
// ## Planet Classes
// ---------------------------

/// Three-way class driving the strength baseline. Distinct from the aspect
/// nature table: Sun and Mercury aspect as malefic/benefic but score as
/// neutral residents.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlanetClass {
    Benefic,
    Malefic,
    Neutral,
}

pub fn class_of(body: CelestialBody) -> PlanetClass {
    match body {
        CelestialBody::Jupiter | CelestialBody::Venus | CelestialBody::Moon => {
            PlanetClass::Benefic
        }
        CelestialBody::Mars
        | CelestialBody::Saturn
        | CelestialBody::Rahu
        | CelestialBody::Ketu => PlanetClass::Malefic,
        CelestialBody::Sun
        | CelestialBody::Mercury
        | CelestialBody::Uranus
        | CelestialBody::Neptune
        | CelestialBody::Pluto => PlanetClass::Neutral,
    }
}

/// One resident planet's contribution: class baseline, overridden by
/// exaltation or debilitation, then damped by combustion and retrogression
/// (the two multipliers compound).
pub fn planet_strength(planet: &Planet) -> f64 {
    let exalted = planet.has_status(PlanetStatus::Exalted);
    let debilitated = planet.has_status(PlanetStatus::Debilitated);

    let mut value = match class_of(planet.body) {
        PlanetClass::Benefic => {
            if exalted {
                2.0
            } else if debilitated {
                -1.0
            } else {
                1.0
            }
        }
        PlanetClass::Malefic => {
            if exalted {
                1.0
            } else if debilitated {
                -2.0
            } else {
                -1.0
            }
        }
        PlanetClass::Neutral => {
            if exalted {
                1.5
            } else if debilitated {
                -1.5
            } else {
                0.0
            }
        }
    };

    if planet.has_status(PlanetStatus::Combust) {
        value *= 0.5;
    }
    if planet.has_status(PlanetStatus::Retrograde) {
        value *= 0.8;
    }
    value
}

// ---------------------------
// ## House Verdict
// ---------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthClass {
    Strong,
    Weak,
    Neutral,
}

impl StrengthClass {
    pub fn label(self) -> &'static str {
        match self {
            StrengthClass::Strong => "Strong House",
            StrengthClass::Weak => "Challenging House",
            StrengthClass::Neutral => "Neutral House",
        }
    }

    /// Banner color the house view paints the verdict in.
    pub fn color(self) -> &'static str {
        match self {
            StrengthClass::Strong => "#90EE90",
            StrengthClass::Weak => "#FFB6C1",
            StrengthClass::Neutral => "#FFD700",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HouseStrength {
    pub house: House,
    pub classification: StrengthClass,
    pub score: f64,
}

/// Score one house from its resident planets and the aspects targeting it:
/// sum every contribution, average over the number of contributing items,
/// classify at the +-0.5 thresholds. An empty house with no incoming
/// aspects averages to zero and reads neutral.
#[instrument(level = "debug", skip(planets, aspects))]
pub fn assess_house(house: House, planets: &[Planet], aspects: &[Aspect]) -> HouseStrength {
    let mut total = 0.0;
    let mut influences = 0usize;

    for planet in planets {
        total += planet_strength(planet);
        influences += 1;
    }
    for aspect in aspects {
        total += match aspect.nature {
            Nature::Benefic => 0.5,
            Nature::Malefic => -0.5,
            Nature::Neutral => 0.0,
        };
        influences += 1;
    }

    let score = if influences > 0 {
        total / influences as f64
    } else {
        0.0
    };
    let classification = if score >= 0.5 {
        StrengthClass::Strong
    } else if score <= -0.5 {
        StrengthClass::Weak
    } else {
        StrengthClass::Neutral
    };
    HouseStrength {
        house,
        classification,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::{calculate_aspects, color_of, nature_of};
    use crate::{Chart, ZodiacSign};
    use approx::assert_relative_eq;

    fn planet(body: CelestialBody, status: &[PlanetStatus]) -> Planet {
        Planet::new(body, ZodiacSign::Leo, 10.0).with_status(status.to_vec())
    }

    fn aspect_from(body: CelestialBody, to_house: House) -> Aspect {
        Aspect {
            planet: body,
            from_house: House::First,
            to_house,
            aspect_type: "7th".to_string(),
            nature: nature_of(body),
            color: color_of(body),
        }
    }

    #[test]
    fn empty_house_reads_neutral_at_zero() {
        let verdict = assess_house(House::Fifth, &[], &[]);
        assert_eq!(verdict.classification, StrengthClass::Neutral);
        assert_relative_eq!(verdict.score, 0.0);
    }

    #[test]
    fn baselines_follow_the_planet_class() {
        assert_relative_eq!(planet_strength(&planet(CelestialBody::Jupiter, &[])), 1.0);
        assert_relative_eq!(planet_strength(&planet(CelestialBody::Saturn, &[])), -1.0);
        assert_relative_eq!(planet_strength(&planet(CelestialBody::Sun, &[])), 0.0);
    }

    #[test]
    fn exaltation_and_debilitation_override_the_baseline() {
        let exalted = [PlanetStatus::Exalted];
        let debilitated = [PlanetStatus::Debilitated];
        assert_relative_eq!(
            planet_strength(&planet(CelestialBody::Venus, &exalted)),
            2.0
        );
        assert_relative_eq!(
            planet_strength(&planet(CelestialBody::Venus, &debilitated)),
            -1.0
        );
        assert_relative_eq!(planet_strength(&planet(CelestialBody::Mars, &exalted)), 1.0);
        assert_relative_eq!(
            planet_strength(&planet(CelestialBody::Mars, &debilitated)),
            -2.0
        );
        assert_relative_eq!(
            planet_strength(&planet(CelestialBody::Mercury, &exalted)),
            1.5
        );
        assert_relative_eq!(
            planet_strength(&planet(CelestialBody::Mercury, &debilitated)),
            -1.5
        );
    }

    #[test]
    fn combustion_and_retrogression_compound() {
        let both = [PlanetStatus::Combust, PlanetStatus::Retrograde];
        assert_relative_eq!(
            planet_strength(&planet(CelestialBody::Jupiter, &both)),
            0.4
        );
        assert_relative_eq!(
            planet_strength(&planet(CelestialBody::Jupiter, &[PlanetStatus::Combust])),
            0.5
        );
        assert_relative_eq!(
            planet_strength(&planet(CelestialBody::Jupiter, &[PlanetStatus::Retrograde])),
            0.8
        );
    }

    #[test]
    fn aspects_weigh_half_a_point_each() {
        let verdict = assess_house(
            House::Second,
            &[],
            &[
                aspect_from(CelestialBody::Jupiter, House::Second),
                aspect_from(CelestialBody::Saturn, House::Second),
                aspect_from(CelestialBody::Venus, House::Second),
            ],
        );
        // (+0.5 - 0.5 + 0.5) / 3
        assert_relative_eq!(verdict.score, 0.5 / 3.0);
        assert_eq!(verdict.classification, StrengthClass::Neutral);
    }

    #[test]
    fn verdict_is_order_independent() {
        let planets = vec![
            planet(CelestialBody::Jupiter, &[PlanetStatus::Exalted]),
            planet(CelestialBody::Saturn, &[]),
            planet(CelestialBody::Sun, &[PlanetStatus::Combust]),
        ];
        let aspects = vec![
            aspect_from(CelestialBody::Venus, House::Third),
            aspect_from(CelestialBody::Mars, House::Third),
        ];
        let forward = assess_house(House::Third, &planets, &aspects);

        let mut planets_rev = planets;
        planets_rev.reverse();
        let mut aspects_rev = aspects;
        aspects_rev.reverse();
        let backward = assess_house(House::Third, &planets_rev, &aspects_rev);

        assert_eq!(forward, backward);
    }

    #[test]
    fn strong_and_weak_thresholds() {
        let strong = assess_house(
            House::Tenth,
            &[planet(CelestialBody::Jupiter, &[PlanetStatus::Exalted])],
            &[],
        );
        assert_eq!(strong.classification, StrengthClass::Strong);

        let weak = assess_house(
            House::Eighth,
            &[
                planet(CelestialBody::Saturn, &[]),
                planet(CelestialBody::Mars, &[]),
            ],
            &[],
        );
        assert_eq!(weak.classification, StrengthClass::Weak);
        assert_relative_eq!(weak.score, -1.0);
    }

    // Scoring only sees the aspects already filtered to the target house,
    // exactly what Report::evaluate feeds it.
    #[test]
    fn works_from_calculated_aspect_subsets() {
        let mut chart = Chart::new(ZodiacSign::Aries);
        chart
            .place(Planet::new(CelestialBody::Jupiter, ZodiacSign::Aries, 3.0))
            .unwrap();
        let aspects = calculate_aspects(&chart);
        let to_sixth: Vec<Aspect> = aspects
            .iter()
            .filter(|a| a.to_house == House::Sixth)
            .cloned()
            .collect();
        assert_eq!(to_sixth.len(), 1);
        let verdict = assess_house(House::Sixth, &[], &to_sixth);
        assert_eq!(verdict.classification, StrengthClass::Strong);
        assert_relative_eq!(verdict.score, 0.5);
    }
}
