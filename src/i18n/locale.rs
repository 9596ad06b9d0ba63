//! Locale string conversions between the translation layer, hreflang and
//! Open Graph.

use crate::i18n::LanguageDetails;

/// hreflang code for a language: its locale with `_` -> `-`, lower-cased,
/// or the raw language code when no locale is configured.
pub fn hreflang_code(code: &str, details: Option<&LanguageDetails>) -> String {
    match details.and_then(|d| d.default_locale.as_deref()) {
        Some(locale) if !locale.is_empty() => locale.replace('_', "-").to_lowercase(),
        _ => code.to_string(),
    }
}

/// `og:locale` form of a locale (`fr_FR` -> `fr-FR`).
pub fn og_locale(locale: &str) -> String {
    locale.replace('_', "-")
}

/// `og:locale:alternate` form of an hreflang code (`fr-fr` -> `fr_fr`).
pub fn alternate_locale(hreflang: &str) -> String {
    hreflang.replace('-', "_")
}
