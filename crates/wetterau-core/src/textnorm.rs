//! Cell-level text repair for messy CSV exports.
//!
//! The district's source exports mix encodings, smart punctuation, and
//! non-breaking or zero-width characters. Repair is a fixed character map
//! plus control-character stripping; anything non-ASCII that survives is
//! counted so the run report can list what the map does not cover yet.

use std::collections::BTreeMap;

/// Replacement map applied per character. Grows as new source files
/// surface new oddities.
pub const CHAR_MAP: &[(char, &str)] = &[
    ('Ä', "AE"),
    ('Ö', "OE"),
    ('Ü', "UE"),
    ('ä', "ae"),
    ('ö', "oe"),
    ('ü', "ue"),
    ('ß', "SS"),
    ('€', "EUR"),
    ('\u{00A0}', " "), // NBSP
    ('“', "\""),
    ('”', "\""),
    ('„', "\""),
    ('«', "\""),
    ('»', "\""),
    ('’', "'"),
    ('‚', "'"),
    ('—', "-"),
    ('–', "-"),
    ('\u{200B}', ""),
    ('\u{200C}', ""),
    ('\u{200D}', ""),
    ('\u{FEFF}', ""),
];

/// Counter of non-ASCII characters that survived normalization.
pub type ResidueCounter = BTreeMap<char, usize>;

fn is_stripped_control(c: char) -> bool {
    // Tab, LF, and CR are row structure and stay; the CSV layer owns them.
    matches!(c,
        '\u{0000}'..='\u{0008}'
        | '\u{000B}'
        | '\u{000C}'
        | '\u{000E}'..='\u{001F}'
        | '\u{007F}'..='\u{009F}')
}

/// Normalize one CSV cell.
///
/// Applies [`CHAR_MAP`], strips control characters, and records any
/// remaining non-ASCII character in `residue`.
pub fn normalize_cell(s: &str, residue: &mut ResidueCounter) -> String {
    if s.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match CHAR_MAP.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => {
                if !is_stripped_control(c) {
                    out.push(c);
                }
            }
        }
    }

    for c in out.chars() {
        if matches!(c, '\t' | '\n' | '\r') {
            continue;
        }
        if !(' '..='~').contains(&c) {
            *residue.entry(c).or_insert(0) += 1;
        }
    }

    out
}
