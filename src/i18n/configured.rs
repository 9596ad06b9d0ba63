//! A `MultilingualService` backed by static configuration.
//!
//! Used by the host binary (from the content fixture) and by tests. Mirrors
//! the two URL negotiation modes of a real translation layer: languages in
//! directories of one domain, or one domain per language.

use crate::content::ItemId;
use crate::i18n::{
    LanguageConfig, LanguageDetails, LanguageRegistry, MultilingualService, Translation,
    TranslationGroupId,
};
use crate::site::host_of;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How language variants are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Negotiation {
    /// `/fr/...` on the home domain
    #[default]
    Directory,
    /// Each language served from its own domain
    Domain,
}

/// A translation group: language -> item, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationGroup {
    pub id: TranslationGroupId,
    pub members: Vec<Translation>,
}

/// Multilingual service over a [`LanguageRegistry`] and a fixed set of
/// translation groups.
///
/// Cloned per request so the current language can differ between requests
/// without shared mutable state.
#[derive(Debug, Clone)]
pub struct ConfiguredMultilingual {
    registry: LanguageRegistry,
    current: Option<String>,
    negotiation: Negotiation,
    groups: Vec<TranslationGroup>,
    home_url: String,
    rewrite_hook: bool,
}

impl ConfiguredMultilingual {
    /// Create a service in directory mode with no groups and no current
    /// language.
    ///
    /// # Arguments
    /// * `registry` - The configured site languages
    /// * `home_url` - Home URL; its host is the one the rewrite hook replaces
    pub fn new(registry: LanguageRegistry, home_url: &str) -> Self {
        Self {
            registry,
            current: None,
            negotiation: Negotiation::Directory,
            groups: Vec::new(),
            home_url: home_url.to_string(),
            rewrite_hook: false,
        }
    }

    /// Set how language variants are addressed.
    pub fn with_negotiation(mut self, negotiation: Negotiation) -> Self {
        self.negotiation = negotiation;
        self
    }

    /// Replace the translation groups. Member order is the order
    /// `translations_of` reports.
    pub fn with_groups(mut self, groups: Vec<TranslationGroup>) -> Self {
        self.groups = groups;
        self
    }

    /// Enable the service's own permalink rewriting.
    ///
    /// When enabled, `rewrite_permalink` swaps the authority of home-host URLs
    /// for the language's domain. Languages without a domain are not
    /// rewritten.
    pub fn with_rewrite_hook(mut self, enabled: bool) -> Self {
        self.rewrite_hook = enabled;
        self
    }

    /// Set the language of the current request.
    ///
    /// # Arguments
    /// * `code` - Language code; `None` or an unknown code keeps the current
    ///   setting
    pub fn with_current_language(mut self, code: Option<&str>) -> Self {
        if let Some(code) = code {
            if self.registry.get_by_code(code).is_some() {
                self.current = Some(code.to_string());
            }
        }
        self
    }

    fn language(&self, code: &str) -> Option<&LanguageConfig> {
        self.registry.get_by_code(code)
    }
}

impl MultilingualService for ConfiguredMultilingual {
    fn current_language(&self) -> Option<String> {
        self.current.clone()
    }

    fn default_language(&self) -> String {
        self.registry.default_language().code.clone()
    }

    fn active_languages(&self) -> Vec<String> {
        self.registry
            .list_active()
            .into_iter()
            .map(|lang| lang.code.clone())
            .collect()
    }

    fn language_details(&self, code: &str) -> Option<LanguageDetails> {
        self.language(code).map(LanguageConfig::details)
    }

    fn translation_group_id(&self, item: ItemId, _element_type: &str) -> Option<TranslationGroupId> {
        self.groups
            .iter()
            .find(|group| group.members.iter().any(|m| m.item == Some(item)))
            .map(|group| group.id)
    }

    fn translations_of(&self, group: TranslationGroupId, _element_type: &str) -> Vec<Translation> {
        self.groups
            .iter()
            .find(|g| g.id == group)
            .map(|g| {
                g.members
                    .iter()
                    .filter(|m| self.registry.is_active(&m.language))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_domain_per_language(&self) -> bool {
        self.negotiation == Negotiation::Domain
    }

    fn language_domains(&self) -> BTreeMap<String, String> {
        self.registry
            .list_all()
            .into_iter()
            .filter_map(|lang| {
                lang.domain
                    .as_ref()
                    .filter(|domain| !domain.is_empty())
                    .map(|domain| (lang.code.clone(), domain.clone()))
            })
            .collect()
    }

    fn rewrite_permalink(&self, url: &str, code: &str) -> Option<String> {
        if !self.rewrite_hook {
            return None;
        }
        let domain = match self.domain_for(code) {
            Some(domain) => domain,
            None => return Some(url.to_string()),
        };
        // Swap only the authority of the URL, unlike a plain text replacement
        let Some(scheme_end) = url.find("://") else {
            return Some(url.to_string());
        };
        let rest = &url[scheme_end + 3..];
        let path_start = rest.find('/').unwrap_or(rest.len());
        let home_host = host_of(&self.home_url).unwrap_or_default();
        if host_of(url).unwrap_or_default() != home_host {
            return Some(url.to_string());
        }
        Some(format!(
            "{}://{}{}",
            &url[..scheme_end],
            domain,
            &rest[path_start..]
        ))
    }
}
