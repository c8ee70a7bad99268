use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Descriptive text for one catalog yoga. Free text, passed through to the
/// presentation layer verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YogaText {
    pub condition: String,
    pub effect: String,
}

/// The yoga catalog: name to condition/effect text, in document order. The
/// order matters because detected yogas are reported in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YogaCatalog {
    entries: Vec<(String, YogaText)>,
}

impl YogaCatalog {
    pub fn from_entries(entries: Vec<(String, YogaText)>) -> YogaCatalog {
        YogaCatalog { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &YogaText)> {
        self.entries.iter().map(|(name, text)| (name.as_str(), text))
    }

    pub fn get(&self, name: &str) -> Option<&YogaText> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, text)| text)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for YogaCatalog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, text) in &self.entries {
            map.serialize_entry(name, text)?;
        }
        map.end()
    }
}

// Deserialized by hand: a plain map type would either reorder entries or
// need an extra dependency, and catalog order is part of the contract.
impl<'de> Deserialize<'de> for YogaCatalog {
    fn deserialize<D>(deserializer: D) -> Result<YogaCatalog, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = YogaCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of yoga names to condition/effect text")
            }

            fn visit_map<A>(self, mut map: A) -> Result<YogaCatalog, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, YogaText>()? {
                    entries.push(entry);
                }
                Ok(YogaCatalog { entries })
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Commentary for one house: the general about-text plus per-planet notes
/// keyed by planet display name. All free text, never parsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseText {
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub planets: BTreeMap<String, String>,
}

/// The descriptive dataset shipped alongside a chart snapshot. Everything
/// here is display material; a missing catalog or missing house entry is
/// the empty case, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub yogas: YogaCatalog,
    #[serde(default)]
    pub houses: BTreeMap<u8, HouseText>,
}

impl Dataset {
    /// The stock catalog and house commentary the viewer ships with.
    pub fn standard() -> Dataset {
        let yogas = YogaCatalog::from_entries(
            [
                (
                    "GajKesariYog",
                    "Jupiter placed in a Kendra (1st, 4th, 7th or 10th house) from the Lagna",
                    "Fame, virtue and lasting prosperity; the native commands respect",
                ),
                (
                    "KalSarpYog",
                    "All planets hemmed within the axis formed by Rahu and Ketu",
                    "Periods of struggle and delay; success comes after persistent effort",
                ),
                (
                    "PanchaMahapurushaYog",
                    "Mars, Mercury, Jupiter, Venus or Saturn exalted in a Kendra house",
                    "An outstanding personality; the strong planet shapes the life path",
                ),
                (
                    "ChandraMangalYog",
                    "Moon and Mars conjoined in a single house",
                    "Earning power and enterprise; gains through trade and initiative",
                ),
                (
                    "AmalaYog",
                    "A natural benefic occupying the 10th house",
                    "A spotless reputation and an honourable career",
                ),
                (
                    "SaraswatiYog",
                    "Mercury, Jupiter and Venus together across Kendra and Trikona houses",
                    "Learning, eloquence and artistic accomplishment",
                ),
                (
                    "RajYog",
                    "Association between the Kendra and Trikona houses",
                    "Authority, status and fortune rise together",
                ),
                (
                    "NeechBhangRajYog",
                    "A debilitated planet whose debilitation stands cancelled",
                    "Early hardship transformed into notable success",
                ),
            ]
            .into_iter()
            .map(|(name, condition, effect)| {
                (
                    name.to_string(),
                    YogaText {
                        condition: condition.to_string(),
                        effect: effect.to_string(),
                    },
                )
            })
            .collect(),
        );

        let houses = [
            (1, "Self, body, appearance, personality"),
            (2, "Wealth, family, speech, possessions"),
            (3, "Siblings, courage, communication"),
            (4, "Mother, home, property, emotions"),
            (5, "Children, creativity, education"),
            (6, "Enemies, debts, health, service"),
            (7, "Marriage, spouse, partnerships"),
            (8, "Death, transformation, occult"),
            (9, "Luck, dharma, higher learning"),
            (10, "Career, status, public life"),
            (11, "Gains, friends, aspirations"),
            (12, "Losses, expenses, spirituality"),
        ]
        .into_iter()
        .map(|(number, about)| {
            (
                number,
                HouseText {
                    about: about.to_string(),
                    planets: BTreeMap::new(),
                },
            )
        })
        .collect();

        Dataset { yogas, houses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_lists_the_known_yogas_in_order() {
        let dataset = Dataset::standard();
        let names: Vec<&str> = dataset.yogas.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "GajKesariYog",
                "KalSarpYog",
                "PanchaMahapurushaYog",
                "ChandraMangalYog",
                "AmalaYog",
                "SaraswatiYog",
                "RajYog",
                "NeechBhangRajYog",
            ]
        );
        assert_eq!(dataset.houses.len(), 12);
    }

    #[test]
    fn catalog_deserialization_keeps_document_order() {
        let json = r#"{
            "ZYog": {"condition": "last first", "effect": "none"},
            "AYog": {"condition": "first last", "effect": "none"}
        }"#;
        let catalog: YogaCatalog = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = catalog.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["ZYog", "AYog"]);
        assert_eq!(catalog.get("AYog").unwrap().condition, "first last");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let dataset: Dataset = serde_json::from_str("{}").unwrap();
        assert!(dataset.yogas.is_empty());
        assert!(dataset.houses.is_empty());

        let dataset: Dataset = serde_json::from_str(
            r#"{"houses": {"4": {"about": "Mother, home", "planets": {"Jupiter": "protective"}}}}"#,
        )
        .unwrap();
        assert_eq!(dataset.houses[&4].about, "Mother, home");
        assert_eq!(dataset.houses[&4].planets["Jupiter"], "protective");
    }
}
