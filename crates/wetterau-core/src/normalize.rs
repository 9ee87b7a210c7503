//! Gemeinde and Gebiet name normalization.
//!
//! Source datasets spell municipality names inconsistently (umlaut
//! transcriptions, "Stadt" suffixes, dropped parentheses), and some datasets
//! are keyed by finer-grained Gebiet labels that have to be mapped up to
//! their containing Gemeinde. Matching is multi-strategy: exact canonical
//! name first, then alias comparison on folded forms. An unmatched name is
//! reported as such, not silently passed off as normalized.

use std::collections::{BTreeMap, BTreeSet};

use crate::gemeinden::{by_name, Gemeinde, ALIASES};

/// Fold a German name to a simplified comparison form.
///
/// Lowercases, transcribes umlauts and ß, turns hyphens into spaces, and
/// trims. Folded forms are only used for comparison, never for display.
pub fn fold_name(text: &str) -> String {
    text.to_lowercase()
        .replace('ä', "ae")
        .replace('ö', "oe")
        .replace('ü', "ue")
        .replace('ß', "ss")
        .replace('-', " ")
        .trim()
        .to_string()
}

/// Result of matching a raw name against the registry.
///
/// `Unmatched` keeps the raw input so callers that only need a display name
/// get the original pass-through behavior, while callers that care can tell
/// a confident normalization from a name that was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    /// Matched a canonical registry row.
    Canonical(&'static Gemeinde),
    /// No alias matched; the raw input is carried through unchanged.
    Unmatched(String),
}

impl NameMatch {
    pub fn is_matched(&self) -> bool {
        matches!(self, NameMatch::Canonical(_))
    }

    /// The name to use downstream: canonical if matched, raw otherwise.
    pub fn name(&self) -> &str {
        match self {
            NameMatch::Canonical(g) => g.name,
            NameMatch::Unmatched(raw) => raw,
        }
    }

    pub fn into_name(self) -> String {
        match self {
            NameMatch::Canonical(g) => g.name.to_string(),
            NameMatch::Unmatched(raw) => raw,
        }
    }
}

/// Normalize a raw Gemeinde name (from a filename or data cell) to its
/// canonical registry row.
///
/// Compares folded forms against the alias table. An unmatched name logs a
/// warning and is returned as [`NameMatch::Unmatched`]; it never aborts a
/// pipeline run.
pub fn match_gemeinde(raw: &str) -> NameMatch {
    let folded = fold_name(raw);

    for (canonical, variants) in ALIASES {
        for variant in *variants {
            if fold_name(variant) == folded {
                // Alias rows are validated against the registry in tests.
                if let Some(gemeinde) = by_name(canonical) {
                    return NameMatch::Canonical(gemeinde);
                }
            }
        }
    }

    tracing::warn!("Gemeinde mapping: unknown name '{}' - not mapped to canonical.", raw);
    NameMatch::Unmatched(raw.to_string())
}

/// Gebiet labels that are aggregates or otherwise not attributable to a
/// single Gemeinde. They are skipped, not reported as unmatched.
pub const IGNORED_GEBIETE: &[&str] = &["Ausgewählte Gebiete zusammengefasst", "Sanierungsgebiet"];

/// Gebiet (sub-area) name variant groups per Gemeinde.
///
/// Each inner slice is one Gebiet with its known spelling variants. Only the
/// municipalities whose source datasets are Gebiet-keyed are listed here.
pub const GEBIETE: &[(&str, &[&[&str]])] = &[
    (
        "Butzbach",
        &[
            &["Bodenrod"],
            &["Ebersgöns"],
            &["Griedel"],
            &["Hausen-Oes"],
            &["Hoch-Weisel"],
            &["Kirch-Göns"],
            &["Maibach"],
            &["Münster"],
            &["Nieder-Weisel"],
            &["Ostheim"],
            &["Fauerbach vor der Höhe"],
            &["Pohl-Göns"],
            &["Wiesental"],
        ],
    ),
    (
        "Karben",
        &[
            &["Burg-Gräfenrode"],
            &["Groß-Karben"],
            &["Klein-Karben"],
            &["Kloppenheim"],
            &["Okarben"],
            &["Petterweil"],
            &["Rendel"],
        ],
    ),
    (
        "Nidda",
        &[
            &["Bad Salzhausen"],
            &["Borsdorf"],
            &["Eichelsdorf"],
            &["Fauerbach", "Fauerbach (Nidda)"],
            &["Geiß-Nidda"],
            &["Harb"],
            &["Kohden"],
            &["Michelnau"],
            &["Ober-Lais"],
            &["Ober-Schmitten"],
            &["Ober-Widdersheim"],
            &["Schwickartshausen"],
            &["Stornfels"],
            &["Ulfa"],
            &["Unter-Schmitten"],
            &["Unter-Widdersheim"],
            &["Wallernhausen"],
        ],
    ),
];

/// Result of mapping a Gebiet label up to its Gemeinde.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GebietMatch {
    /// The Gebiet belongs to this Gemeinde (or names the Gemeinde itself).
    Gemeinde(&'static Gemeinde),
    /// The label is on the ignore list.
    Ignored,
    /// No mapping found; the raw label is carried through.
    Unmatched(String),
}

/// Map a Gebiet label to its containing Gemeinde.
///
/// Strategy order: ignore list, then the label as a Gemeinde name itself,
/// then folded comparison against the Gebiet variant groups. Unmatched
/// labels log a warning.
pub fn gemeinde_for_gebiet(gebiet: &str) -> GebietMatch {
    if IGNORED_GEBIETE.contains(&gebiet) {
        return GebietMatch::Ignored;
    }

    if let NameMatch::Canonical(gemeinde) = match_gemeinde_quiet(gebiet) {
        return GebietMatch::Gemeinde(gemeinde);
    }

    let folded = fold_name(gebiet);
    for (gemeinde_name, groups) in GEBIETE {
        for group in *groups {
            if group.iter().any(|name| fold_name(name) == folded) {
                if let Some(gemeinde) = by_name(gemeinde_name) {
                    return GebietMatch::Gemeinde(gemeinde);
                }
            }
        }
    }

    tracing::warn!("No Gemeinde mapping found for Gebiet: '{}'", gebiet);
    GebietMatch::Unmatched(gebiet.to_string())
}

// Gemeinde matching without the unmatched warning; used while a Gebiet
// lookup still has fallback strategies left.
fn match_gemeinde_quiet(raw: &str) -> NameMatch {
    let folded = fold_name(raw);
    for (canonical, variants) in ALIASES {
        for variant in *variants {
            if fold_name(variant) == folded {
                if let Some(gemeinde) = by_name(canonical) {
                    return NameMatch::Canonical(gemeinde);
                }
            }
        }
    }
    NameMatch::Unmatched(raw.to_string())
}

/// Gebiet groups that are expected per Gemeinde but absent from `seen`.
///
/// Completeness check after a Gebiet-keyed dataset has been processed:
/// a group counts as covered when any of its variants was seen. Missing
/// groups are logged and returned for the caller's report.
pub fn missing_gebiete(seen: &[&str]) -> BTreeMap<&'static str, Vec<&'static str>> {
    let seen_set: BTreeSet<&str> = seen.iter().copied().collect();
    let mut missing: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();

    for (gemeinde_name, groups) in GEBIETE {
        let mut absent = Vec::new();
        for group in *groups {
            if !group.iter().any(|name| seen_set.contains(name)) {
                absent.extend(group.iter().copied());
            }
        }
        if !absent.is_empty() {
            absent.sort_unstable();
            tracing::warn!(
                "Gemeinde '{}' is missing {} Gebiet(e): {:?}",
                gemeinde_name,
                absent.len(),
                absent
            );
            missing.insert(gemeinde_name, absent);
        }
    }

    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fold_name() {
        assert_eq!(fold_name("Ober-Mörlen"), "ober moerlen");
        assert_eq!(fold_name("  Büdingen "), "buedingen");
        assert_eq!(fold_name("Geiß-Nidda"), "geiss nidda");
    }

    #[test]
    fn test_match_gemeinde_exact() {
        let m = match_gemeinde("Friedberg (Hessen)");
        assert_eq!(m.name(), "Friedberg (Hessen)");
        assert!(m.is_matched());
    }

    #[test]
    fn test_match_gemeinde_alias_variants() {
        assert_eq!(match_gemeinde("Friedberg Hessen Stadt").name(), "Friedberg (Hessen)");
        assert_eq!(match_gemeinde("Reichelsheim Wetterau").name(), "Reichelsheim (Wetterau)");
        assert_eq!(match_gemeinde("Rosbach v d Höhe").name(), "Rosbach v. d. Höhe");
        // Folding makes case and hyphenation irrelevant
        assert_eq!(match_gemeinde("ober-mörlen").name(), "Ober-Mörlen");
    }

    #[test]
    fn test_match_gemeinde_unmatched_passes_through() {
        let m = match_gemeinde("Frankfurt am Main");
        assert!(!m.is_matched());
        assert_eq!(m.name(), "Frankfurt am Main");
        assert_eq!(m.into_name(), "Frankfurt am Main");
    }

    #[test]
    fn test_gebiet_ignore_list() {
        assert_eq!(gemeinde_for_gebiet("Sanierungsgebiet"), GebietMatch::Ignored);
    }

    #[test]
    fn test_gebiet_maps_to_gemeinde() {
        match gemeinde_for_gebiet("Groß-Karben") {
            GebietMatch::Gemeinde(g) => assert_eq!(g.name, "Karben"),
            other => panic!("unexpected: {other:?}"),
        }
        match gemeinde_for_gebiet("Ober-Widdersheim") {
            GebietMatch::Gemeinde(g) => assert_eq!(g.name, "Nidda"),
            other => panic!("unexpected: {other:?}"),
        }
        // A Gemeinde's own name maps to itself
        match gemeinde_for_gebiet("Butzbach") {
            GebietMatch::Gemeinde(g) => assert_eq!(g.name, "Butzbach"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_gebiet_unmatched() {
        match gemeinde_for_gebiet("Atlantis") {
            GebietMatch::Unmatched(raw) => assert_eq!(raw, "Atlantis"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_missing_gebiete_reports_unseen_groups() {
        let seen = vec!["Groß-Karben", "Kloppenheim"];
        let missing = missing_gebiete(&seen);

        let karben = &missing["Karben"];
        assert!(karben.contains(&"Okarben"));
        assert!(!karben.contains(&"Kloppenheim"));
        // Variant coverage: seeing one spelling covers the whole group
        let seen_all: Vec<&str> = GEBIETE
            .iter()
            .flat_map(|(_, groups)| groups.iter().map(|g| g[0]))
            .collect();
        assert!(missing_gebiete(&seen_all).is_empty());
    }

    proptest! {
        #[test]
        fn prop_fold_name_is_idempotent(s in "\\PC{0,40}") {
            let once = fold_name(&s);
            prop_assert_eq!(fold_name(&once), once);
        }
    }
}
