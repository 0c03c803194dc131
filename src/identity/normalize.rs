//! Free-text normalization for identity hashing.

use regex::Regex;
use std::sync::LazyLock;

/// Matches any run of whitespace characters.
#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Matches the punctuation characters stripped before hashing.
#[allow(clippy::expect_used)] // Pattern is a compile-time constant
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,\-#]").expect("punctuation pattern is valid"));

/// Ordered phrase substitutions applied after punctuation stripping.
///
/// This is an explicitly ordered list, not a map: iteration order must be
/// fixed so the same input normalizes identically across runs and across
/// implementations. Replacement outputs never re-match any pattern in the
/// table, which keeps the whole pipeline idempotent.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    (" golf course", " gc"),
    (" golf club", " gc"),
    (" country club", " cc"),
    (" golf links", " gl"),
    (" golf resort", " gr"),
    (" street", " st"),
    (" avenue", " ave"),
    (" drive", " dr"),
    (" road", " rd"),
    (" boulevard", " blvd"),
    (" north", " n"),
    (" south", " s"),
    (" east", " e"),
    (" west", " w"),
];

/// Canonicalizes a free-text identifier for hashing and comparison.
///
/// The steps run in this exact order:
///
/// 1. lowercase
/// 2. trim leading/trailing whitespace
/// 3. collapse whitespace runs to a single space
/// 4. strip the punctuation subset `. , - #`
/// 5. apply the ordered substitution table, one pattern at a time, left to
///    right, with no re-scanning of replaced text
///
/// Empty input returns an empty string.
///
/// # Example
///
/// ```rust
/// use fairway::identity::normalize;
///
/// assert_eq!(
///     normalize("Pine Valley Golf Club"),
///     normalize("Pine Valley G.C.")
/// );
/// assert_eq!(normalize("  123  Main   Street  "), "123 main st");
/// ```
#[must_use]
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let trimmed = lowered.trim();
    let collapsed = WHITESPACE_RUN.replace_all(trimmed, " ");
    let mut s = PUNCTUATION.replace_all(&collapsed, "").into_owned();

    for (pattern, replacement) in SUBSTITUTIONS {
        s = s.replace(pattern, replacement);
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", ""; "empty input")]
    #[test_case("   ", ""; "whitespace only")]
    #[test_case("Pebble Beach Golf Links", "pebble beach gl"; "golf links")]
    #[test_case("Pine Valley Golf Club", "pine valley gc"; "golf club")]
    #[test_case("Pine Valley G.C.", "pine valley gc"; "abbreviated club")]
    #[test_case("Augusta National Golf Club", "augusta national gc"; "augusta")]
    #[test_case("  123  Main   Street  ", "123 main st"; "street abbreviation")]
    #[test_case("2604 Washington Rd, Augusta, GA 30904", "2604 washington rd augusta ga 30904"; "already abbreviated road")]
    #[test_case("500 North Boulevard", "500 n blvd"; "direction and boulevard")]
    fn test_normalize_cases(input: &str, expected: &str) {
        assert_eq!(normalize(input), expected);
    }

    #[test]
    fn test_lowercases_before_matching() {
        assert_eq!(normalize("OAKMONT COUNTRY CLUB"), "oakmont cc");
    }

    #[test]
    fn test_punctuation_stripped_before_substitution() {
        // The period is removed first, so "g.c." collapses to "gc" rather
        // than surviving as "g.c.".
        assert_eq!(normalize("Riviera G.C."), "riviera gc");
    }

    #[test]
    fn test_hyphenated_address() {
        assert_eq!(
            normalize("1700 17-Mile Drive, Pebble Beach, CA 93953"),
            "1700 17mile dr pebble beach ca 93953"
        );
    }

    #[test]
    fn test_substitution_requires_leading_space() {
        // "golfcourse" and a name starting with "Street" must not match the
        // space-prefixed patterns.
        assert_eq!(normalize("Streetsville Links"), "streetsville links");
    }

    #[test]
    fn test_idempotent_on_realistic_inputs() {
        let inputs = [
            "Pebble Beach Golf Links",
            "1700 17-Mile Drive, Pebble Beach, CA 93953",
            "Pine Valley Golf Club",
            "Pine Valley, NJ 08021",
            "500 North Boulevard",
            "",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_substitution_outputs_do_not_rematch() {
        for (_, replacement) in SUBSTITUTIONS {
            for (pattern, _) in SUBSTITUTIONS {
                assert!(
                    !replacement.contains(pattern),
                    "{replacement:?} would re-trigger {pattern:?}"
                );
            }
        }
    }
}
