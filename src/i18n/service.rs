//! The multilingual service interface consumed by the resolvers.
//!
//! The host may or may not run a translation layer at all; callers receive an
//! `Option<&dyn MultilingualService>` and check it once. Capabilities that a
//! given service lacks report "unavailable" through their return values
//! (`None`, empty collections) instead of being probed at call sites.

use crate::content::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier of a translation group (the set of items across languages
/// representing the same logical content).
pub type TranslationGroupId = u64;

/// Display data for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDetails {
    pub code: String,
    pub display_name: String,
    /// Locale such as `fr_FR`
    pub default_locale: Option<String>,
}

/// One member of a translation group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub language: String,
    /// `None` when the group lists the language but no item exists yet
    pub item: Option<ItemId>,
}

/// Element type under which the translation layer files content items.
pub fn element_type(item_type: &str) -> String {
    format!("post_{}", item_type)
}

pub trait MultilingualService: Send + Sync {
    /// Language of the current request, if known.
    fn current_language(&self) -> Option<String>;

    fn default_language(&self) -> String;

    /// Codes of all active languages, default language included.
    fn active_languages(&self) -> Vec<String>;

    fn language_details(&self, code: &str) -> Option<LanguageDetails>;

    fn translation_group_id(&self, item: ItemId, element_type: &str)
        -> Option<TranslationGroupId>;

    /// Members of a translation group in the order the service lists them.
    fn translations_of(&self, group: TranslationGroupId, element_type: &str) -> Vec<Translation>;

    /// Whether each language is served from its own domain.
    fn is_domain_per_language(&self) -> bool;

    /// Configured language -> domain map (possibly partial).
    fn language_domains(&self) -> BTreeMap<String, String>;

    fn domain_for(&self, code: &str) -> Option<String> {
        self.language_domains()
            .remove(code)
            .filter(|domain| !domain.is_empty())
    }

    /// Service-provided permalink rewriting for a language.
    /// `None` means the hook is not available.
    fn rewrite_permalink(&self, _url: &str, _code: &str) -> Option<String> {
        None
    }
}
