use kundli_core::{Chart, ChartInput, Dataset, Report};
use tracing_subscriber::EnvFilter;

// A cast snapshot as the backend would ship it, statuses included.
const SAMPLE_SNAPSHOT: &str = r#"{
    "sign_planets": {
        "Aries": [
            {"name": "Su", "deg": 21.8, "sign": "Aries", "status": ["exalted"]},
            {"name": "Me", "deg": 10.2, "sign": "Aries", "status": ["combust"]},
            {"name": "Sa", "deg": 20.5, "sign": "Aries", "status": ["debilitated", "peak", "combust"]}
        ],
        "Taurus": [
            {"name": "Mo", "deg": 3.4, "sign": "Taurus", "status": ["exalted", "peak"]}
        ],
        "Gemini": [
            {"name": "Ve", "deg": 12.0, "sign": "Gemini", "status": []}
        ],
        "Cancer": [
            {"name": "Ju", "deg": 5.1, "sign": "Cancer", "status": ["exalted", "peak"]},
            {"name": "Ma", "deg": 28.9, "sign": "Cancer", "status": ["debilitated", "peak"]}
        ],
        "Leo": [
            {"name": "Ke", "deg": 15.0, "sign": "Leo", "status": []}
        ],
        "Aquarius": [
            {"name": "Ra", "deg": 15.0, "sign": "Aquarius", "status": []}
        ]
    },
    "asc_sign": "Leo"
}"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let input: ChartInput = match serde_json::from_str(SAMPLE_SNAPSHOT) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("bad snapshot: {}", e);
            return;
        }
    };
    let chart = match Chart::from_input(&input) {
        Ok(chart) => chart,
        Err(e) => {
            eprintln!("invalid chart: {}", e);
            return;
        }
    };

    let report = Report::evaluate(&chart, &Dataset::standard());

    println!("Ascendant: {}", report.ascendant);
    println!();

    println!("Houses:");
    for profile in &report.houses {
        let planets = profile
            .planets
            .iter()
            .map(|p| {
                let symbols: String = p.status.iter().map(|s| s.symbol()).collect();
                if symbols.is_empty() {
                    format!("{} {:.1}°", p.body.abbreviation(), p.degree)
                } else {
                    format!("{} {:.1}° {}", p.body.abbreviation(), p.degree, symbols)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {:>2} {:<12} {:<18} ({:.2})  {}",
            profile.house,
            profile.sign.to_string(),
            profile.strength.classification.label(),
            profile.strength.score,
            planets
        );
    }
    println!();

    println!("Aspects:");
    for aspect in &report.aspects {
        println!(
            "  {:<8} {} aspect from House {} to House {} ({})",
            aspect.planet.to_string(),
            aspect.aspect_type,
            aspect.from_house,
            aspect.to_house,
            aspect.nature
        );
    }
    println!();

    println!("Yogas ({} detected):", report.yogas.len());
    for yoga in &report.yogas {
        println!("  {}", yoga.name);
        println!("    Condition: {}", yoga.condition);
        println!("    Effect:    {}", yoga.effect);
        println!("    Formation: {}", yoga.details);
    }
}
