//! Language registry: the configured set of site languages.
//!
//! Holds per-language metadata (display name, locale, domain) plus which
//! language is the site default. Built from the content fixture.

use crate::i18n::LanguageDetails;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a site language.
///
/// Contains the metadata the resolvers and the editor form need for one
/// language: its code, display name, locale and optional domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Language code as used by the translation layer (e.g., "en", "pt-br")
    pub code: String,

    /// Name shown to editors (e.g., "Français")
    pub display_name: String,

    /// Locale such as "fr_FR"
    #[serde(default)]
    pub default_locale: Option<String>,

    /// Domain serving this language in domain-per-language mode
    #[serde(default)]
    pub domain: Option<String>,

    /// Whether this language is enabled for use
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl LanguageConfig {
    /// Display data handed out through the multilingual service.
    pub fn details(&self) -> LanguageDetails {
        LanguageDetails {
            code: self.code.clone(),
            display_name: self.display_name.clone(),
            default_locale: self.default_locale.clone(),
        }
    }
}

/// The site's configured languages and which one is the default.
///
/// Immutable once built; `new` guarantees the default language exists and is
/// active.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
    default_language: String,
}

impl LanguageRegistry {
    /// Build a registry.
    ///
    /// # Arguments
    /// * `languages` - Languages in the order the site lists them
    /// * `default_language` - Code of the site default language
    ///
    /// # Returns
    /// An error if the default language is missing or inactive, or if a code
    /// is configured twice.
    pub fn new(languages: Vec<LanguageConfig>, default_language: &str) -> Result<Self> {
        match languages.iter().find(|lang| lang.code == default_language) {
            Some(lang) if lang.active => {}
            Some(_) => bail!("Default language '{}' is not active", default_language),
            None => bail!("Unknown default language: '{}'", default_language),
        }

        let mut seen = std::collections::HashSet::new();
        for lang in &languages {
            if !seen.insert(lang.code.as_str()) {
                bail!("Language '{}' is configured twice", lang.code);
            }
        }

        Ok(Self {
            languages,
            default_language: default_language.to_string(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Arguments
    /// * `code` - The language code (e.g., "en", "fr")
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language is configured
    /// * `None` otherwise
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all active languages, in configuration order.
    pub fn list_active(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.active).collect()
    }

    /// Get all languages (including inactive ones).
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the site default language.
    pub fn default_language(&self) -> &LanguageConfig {
        // Checked in `new`
        self.get_by_code(&self.default_language)
            .unwrap_or(&self.languages[0])
    }

    /// Check if a language code is configured and active.
    ///
    /// # Returns
    /// `true` if the language exists and is active, `false` otherwise.
    pub fn is_active(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.active)
            .unwrap_or(false)
    }
}
