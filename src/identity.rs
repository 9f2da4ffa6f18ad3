//! Vessel identity canonicalization.
//!
//! Every data source spells vessel names its own way ("Cartola ", "CARTOLA",
//! "Cártola"). `normalize` maps them to a single key, and every per-vessel
//! map in the crate is keyed by its output.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical join key for a vessel name.
///
/// Trims, uppercases, decomposes (NFD), drops combining marks, and collapses
/// runs of whitespace to one space. Idempotent.
pub fn normalize(name: &str) -> String {
    let stripped: String = name
        .trim()
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize("  Cártola "), "CARTOLA");
        assert_eq!(normalize("são  paulo"), "SAO PAULO");
        assert_eq!(normalize("Rômulo\tAlmeida"), "ROMULO ALMEIDA");
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t "), "");
    }

    #[test]
    fn precomposed_and_decomposed_agree() {
        // U+00C7 vs C + U+0327
        assert_eq!(normalize("\u{00C7}ABO"), normalize("C\u{0327}abo"));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(name in "[ a-zA-Z0-9À-ÿ\t-]{0,40}") {
            let once = normalize(&name);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_has_no_edge_or_double_spaces(name in "[ a-zA-Zàéíõç\t]{0,30}") {
            let key = normalize(&name);
            prop_assert!(!key.starts_with(' ') && !key.ends_with(' '));
            prop_assert!(!key.contains("  "));
        }
    }
}
