use regex::Regex;
use std::sync::OnceLock;

static BARE_NUMBER: OnceLock<Regex> = OnceLock::new();

fn bare_number() -> &'static Regex {
    BARE_NUMBER.get_or_init(|| {
        Regex::new(r"^\s*[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?\s*$").expect("valid number regex")
    })
}

/// True for strings written in feet/inches notation, e.g. `5'10"`.
pub fn is_imperial(s: &str) -> bool {
    s.contains('\'')
}

pub fn is_bare_number(s: &str) -> bool {
    bare_number().is_match(s)
}

/// Rewrites a height into its stored form.
///
/// Already-metric strings and anything that is not a bare number are returned
/// as given; feet/inches values are not converted.
pub fn canonicalize_height(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    if input.to_lowercase().contains("cm") {
        return input.to_string();
    }
    if is_bare_number(input) {
        return format!("{input} cm");
    }
    input.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundary_cases() {
        assert_eq!(canonicalize_height(""), "");
        assert_eq!(canonicalize_height("180"), "180 cm");
        assert_eq!(canonicalize_height("172.5"), "172.5 cm");
        assert_eq!(canonicalize_height("180 CM"), "180 CM");
        assert_eq!(canonicalize_height("5'10\""), "5'10\"");
        assert_eq!(canonicalize_height("tall"), "tall");
        assert_eq!(canonicalize_height("180cm-ish"), "180cm-ish");
    }

    #[test]
    fn imperial_detection() {
        assert!(is_imperial("6'1\""));
        assert!(!is_imperial("185 cm"));
    }

    proptest! {
        #[test]
        fn cm_strings_pass_through(prefix in "[a-z0-9 ]{0,6}", unit in "(cm|CM|Cm|cM)", suffix in "[a-z0-9 ]{0,6}") {
            let s = format!("{prefix}{unit}{suffix}");
            prop_assert_eq!(canonicalize_height(&s), s);
        }

        #[test]
        fn numbers_get_unit(n in 0u32..400, frac in proptest::option::of(0u32..100)) {
            let s = match frac {
                Some(f) => format!("{n}.{f}"),
                None => n.to_string(),
            };
            prop_assert_eq!(canonicalize_height(&s), format!("{s} cm"));
        }

        #[test]
        fn feet_and_inches_pass_through(ft in 3u32..8, inch in 0u32..12) {
            let s = format!("{ft}'{inch}\"");
            prop_assert_eq!(canonicalize_height(&s), s);
        }
    }
}
