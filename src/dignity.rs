use crate::{CelestialBody, PlanetStatus, ZodiacSign};

// ---------------------------
// ## Dignity Tables
// ---------------------------

/// Exaltation sign and exact degree for the seven classical planets. The
/// nodes and outer planets carry no dignity here.
pub const EXALTATION_POINTS: [(CelestialBody, ZodiacSign, f64); 7] = [
    (CelestialBody::Sun, ZodiacSign::Aries, 10.0),
    (CelestialBody::Moon, ZodiacSign::Taurus, 3.0),
    (CelestialBody::Mars, ZodiacSign::Capricorn, 28.0),
    (CelestialBody::Mercury, ZodiacSign::Virgo, 15.0),
    (CelestialBody::Jupiter, ZodiacSign::Cancer, 5.0),
    (CelestialBody::Venus, ZodiacSign::Pisces, 27.0),
    (CelestialBody::Saturn, ZodiacSign::Libra, 20.0),
];

/// Debilitation sign and exact degree, opposite the exaltation point.
pub const DEBILITATION_POINTS: [(CelestialBody, ZodiacSign, f64); 7] = [
    (CelestialBody::Sun, ZodiacSign::Libra, 10.0),
    (CelestialBody::Moon, ZodiacSign::Scorpio, 3.0),
    (CelestialBody::Mars, ZodiacSign::Cancer, 28.0),
    (CelestialBody::Mercury, ZodiacSign::Pisces, 15.0),
    (CelestialBody::Jupiter, ZodiacSign::Capricorn, 5.0),
    (CelestialBody::Venus, ZodiacSign::Virgo, 27.0),
    (CelestialBody::Saturn, ZodiacSign::Aries, 20.0),
];

/// Within this many degrees of the exact point the dignity is at its peak.
const PEAK_ORB: f64 = 5.0;

/// Combustion orb per planet, in degrees of separation from the Sun.
fn combust_orb(body: CelestialBody) -> Option<f64> {
    match body {
        CelestialBody::Moon => Some(12.0),
        CelestialBody::Mars => Some(17.0),
        CelestialBody::Mercury => Some(14.0),
        CelestialBody::Jupiter => Some(11.0),
        CelestialBody::Venus => Some(10.0),
        CelestialBody::Saturn => Some(15.0),
        _ => None,
    }
}

// ---------------------------
// ## Status Derivation
// ---------------------------

/// Derive the status flags the casting backend would attach to a placement:
/// exaltation or debilitation (with `Peak` near the exact degree), then
/// combustion against the Sun's absolute longitude, then retrogression from
/// a negative daily speed. Flag order matches the backend's.
pub fn derive_status(
    body: CelestialBody,
    sign: ZodiacSign,
    degree: f64,
    sun_longitude: Option<f64>,
    speed: Option<f64>,
) -> Vec<PlanetStatus> {
    let mut status = Vec::new();

    if let Some(&(_, _, exact)) = EXALTATION_POINTS
        .iter()
        .find(|&&(p, s, _)| p == body && s == sign)
    {
        status.push(PlanetStatus::Exalted);
        if (degree - exact).abs() <= PEAK_ORB {
            status.push(PlanetStatus::Peak);
        }
    } else if let Some(&(_, _, exact)) = DEBILITATION_POINTS
        .iter()
        .find(|&&(p, s, _)| p == body && s == sign)
    {
        status.push(PlanetStatus::Debilitated);
        if (degree - exact).abs() <= PEAK_ORB {
            status.push(PlanetStatus::Peak);
        }
    }

    if body != CelestialBody::Sun {
        if let (Some(sun), Some(orb)) = (sun_longitude, combust_orb(body)) {
            let longitude = sign.index() as f64 * 30.0 + degree;
            let separation = ((longitude - sun + 180.0).rem_euclid(360.0) - 180.0).abs();
            if separation < orb {
                status.push(PlanetStatus::Combust);
            }
        }
    }

    if speed.unwrap_or(0.0) < 0.0 {
        status.push(PlanetStatus::Retrograde);
    }

    status
}
