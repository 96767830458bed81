use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical search form: lower-cased, decomposed, and stripped of combining marks.
///
/// Lower-casing runs before decomposition so marks introduced by case mapping
/// (`İ` lowers to `i` + U+0307) are stripped in the same pass, which keeps the
/// function idempotent.
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// [`normalize`] for optional input; `None` reads as the empty string.
pub fn normalize_opt(value: Option<&str>) -> String {
    value.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize("Caro Díaz"), "caro diaz");
        assert_eq!(normalize("EN REVISIÓN"), "en revision");
        assert_eq!(normalize("Über Ñandú"), "uber nandu");
    }

    #[test]
    fn missing_input_is_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("José")), "jose");
    }

    #[test]
    fn is_idempotent() {
        for sample in ["Caro Díaz", "İstanbul", "ǅemal", "ﬁnance", "", "  mixed  Case "] {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "sample {sample:?}");
        }
    }

    #[test]
    fn precomposed_and_decomposed_forms_agree() {
        assert_eq!(normalize("D\u{00ed}az"), normalize("Di\u{0301}az"));
    }
}
