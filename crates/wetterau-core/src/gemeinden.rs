//! Canonical registry of the Wetteraukreis municipalities.
//!
//! One row per Gemeinde with its numeric id, canonical display name, and the
//! official zero-padded eight-digit Gemeindeschlüssel. The first two rows are
//! the state and district aggregates that several source datasets carry.

use serde::Serialize;

/// One row of the municipality registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gemeinde {
    pub id: u32,
    pub name: &'static str,
    pub schluessel: &'static str,
}

/// All registry rows in official key order.
pub const REGISTRY: &[Gemeinde] = &[
    Gemeinde { id: 6, name: "Land Hessen", schluessel: "06000000" },
    Gemeinde { id: 6440, name: "Wetteraukreis", schluessel: "06440000" },
    Gemeinde { id: 6_440_001, name: "Altenstadt", schluessel: "06440001" },
    Gemeinde { id: 6_440_002, name: "Bad Nauheim", schluessel: "06440002" },
    Gemeinde { id: 6_440_003, name: "Bad Vilbel", schluessel: "06440003" },
    Gemeinde { id: 6_440_004, name: "Büdingen", schluessel: "06440004" },
    Gemeinde { id: 6_440_005, name: "Butzbach", schluessel: "06440005" },
    Gemeinde { id: 6_440_006, name: "Echzell", schluessel: "06440006" },
    Gemeinde { id: 6_440_007, name: "Florstadt", schluessel: "06440007" },
    Gemeinde { id: 6_440_008, name: "Friedberg (Hessen)", schluessel: "06440008" },
    Gemeinde { id: 6_440_009, name: "Gedern", schluessel: "06440009" },
    Gemeinde { id: 6_440_010, name: "Glauburg", schluessel: "06440010" },
    Gemeinde { id: 6_440_011, name: "Hirzenhain", schluessel: "06440011" },
    Gemeinde { id: 6_440_012, name: "Karben", schluessel: "06440012" },
    Gemeinde { id: 6_440_013, name: "Kefenrod", schluessel: "06440013" },
    Gemeinde { id: 6_440_014, name: "Limeshain", schluessel: "06440014" },
    Gemeinde { id: 6_440_015, name: "Münzenberg", schluessel: "06440015" },
    Gemeinde { id: 6_440_016, name: "Nidda", schluessel: "06440016" },
    Gemeinde { id: 6_440_017, name: "Niddatal", schluessel: "06440017" },
    Gemeinde { id: 6_440_018, name: "Ober-Mörlen", schluessel: "06440018" },
    Gemeinde { id: 6_440_019, name: "Ortenberg", schluessel: "06440019" },
    Gemeinde { id: 6_440_020, name: "Ranstadt", schluessel: "06440020" },
    Gemeinde { id: 6_440_021, name: "Reichelsheim (Wetterau)", schluessel: "06440021" },
    Gemeinde { id: 6_440_022, name: "Rockenberg", schluessel: "06440022" },
    Gemeinde { id: 6_440_023, name: "Rosbach v. d. Höhe", schluessel: "06440023" },
    Gemeinde { id: 6_440_024, name: "Wölfersheim", schluessel: "06440024" },
    Gemeinde { id: 6_440_025, name: "Wöllstadt", schluessel: "06440025" },
];

/// Known spelling variants per canonical Gemeinde name.
///
/// Source datasets attach suffixes like "Stadt" or drop the disambiguating
/// parenthesis, so matching always goes through [`crate::normalize::fold_name`].
pub const ALIASES: &[(&str, &[&str])] = &[
    ("Altenstadt", &["Altenstadt"]),
    ("Bad Nauheim", &["Bad Nauheim", "Bad Nauheim Stadt"]),
    ("Bad Vilbel", &["Bad Vilbel", "Bad Vilbel Stadt"]),
    ("Büdingen", &["Büdingen", "Büdingen Stadt"]),
    ("Butzbach", &["Butzbach", "Butzbach Friedrich-Ludwig-Weidig-Stadt"]),
    ("Echzell", &["Echzell"]),
    ("Florstadt", &["Florstadt", "Florstadt Stadt"]),
    (
        "Friedberg (Hessen)",
        &["Friedberg (Hessen)", "Friedberg", "Friedberg Hessen", "Friedberg Hessen Stadt"],
    ),
    ("Gedern", &["Gedern", "Gedern Stadt"]),
    ("Glauburg", &["Glauburg"]),
    ("Hirzenhain", &["Hirzenhain"]),
    ("Karben", &["Karben", "Karben Stadt"]),
    ("Kefenrod", &["Kefenrod"]),
    ("Limeshain", &["Limeshain"]),
    ("Münzenberg", &["Münzenberg", "Münzenberg Stadt"]),
    ("Nidda", &["Nidda", "Nidda Stadt"]),
    ("Niddatal", &["Niddatal", "Niddatal Stadt"]),
    ("Ober-Mörlen", &["Ober-Mörlen"]),
    ("Ortenberg", &["Ortenberg", "Ortenberg Stadt"]),
    ("Ranstadt", &["Ranstadt"]),
    (
        "Reichelsheim (Wetterau)",
        &[
            "Reichelsheim (Wetterau)",
            "Reichelsheim",
            "Reichelsheim Wetterau",
            "Reichelsheim Wetterau Stadt",
        ],
    ),
    ("Rockenberg", &["Rockenberg"]),
    (
        "Rosbach v. d. Höhe",
        &["Rosbach v. d. Höhe", "Rosbach v d Höhe", "Rosbach v d Höhe Stadt"],
    ),
    ("Wölfersheim", &["Wölfersheim"]),
    ("Wöllstadt", &["Wöllstadt"]),
];

/// Look up a registry row by its official Gemeindeschlüssel.
///
/// Unknown keys log a warning and return `None`; an unknown key in a source
/// file must never abort a pipeline run.
pub fn by_schluessel(schluessel: &str) -> Option<&'static Gemeinde> {
    if schluessel.is_empty() {
        return None;
    }

    let found = REGISTRY.iter().find(|g| g.schluessel == schluessel);
    if found.is_none() {
        tracing::warn!("Gemeinde not found for schluessel: '{}'", schluessel);
    }
    found
}

/// Look up a registry row by its canonical name.
pub fn by_name(name: &str) -> Option<&'static Gemeinde> {
    REGISTRY.iter().find(|g| g.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_state_district_and_25_gemeinden() {
        assert_eq!(REGISTRY.len(), 27);
        assert_eq!(REGISTRY[0].name, "Land Hessen");
        assert_eq!(REGISTRY[1].name, "Wetteraukreis");
    }

    #[test]
    fn test_schluessel_are_unique_and_zero_padded() {
        let mut keys: Vec<&str> = REGISTRY.iter().map(|g| g.schluessel).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), REGISTRY.len());
        assert!(REGISTRY.iter().all(|g| g.schluessel.len() == 8));
    }

    #[test]
    fn test_by_schluessel() {
        let friedberg = by_schluessel("06440008").unwrap();
        assert_eq!(friedberg.name, "Friedberg (Hessen)");
        assert!(by_schluessel("99999999").is_none());
        assert!(by_schluessel("").is_none());
    }

    #[test]
    fn test_every_canonical_alias_row_is_in_registry() {
        for (canonical, variants) in ALIASES {
            assert!(by_name(canonical).is_some(), "missing registry row for {canonical}");
            assert!(variants.contains(canonical));
        }
    }
}
