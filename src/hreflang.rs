//! Translation/locale resolver.
//!
//! Builds the per-render language URL table for an item and the `hreflang`
//! alternate links derived from it. The table is the only channel through
//! which language data reaches the metadata resolver, so this must run first.

use crate::content::ContentItem;
use crate::i18n::{element_type, locale, MultilingualService};
use crate::site::RenderContext;
use crate::tags::Tag;
use tracing::debug;

/// hreflang value of the fallback alternate link.
pub const X_DEFAULT: &str = "x-default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageUrlEntry {
    pub url: String,
    pub hreflang: String,
}

/// Language code -> entry. At most one entry per code; keeps the order in
/// which languages were first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageUrls {
    entries: Vec<(String, LanguageUrlEntry)>,
}

impl LanguageUrls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace (in place) the entry for `code`.
    pub fn insert(&mut self, code: impl Into<String>, entry: LanguageUrlEntry) {
        let code = code.into();
        match self.entries.iter_mut().find(|(c, _)| *c == code) {
            Some((_, existing)) => *existing = entry,
            None => self.entries.push((code, entry)),
        }
    }

    pub fn get(&self, code: &str) -> Option<&LanguageUrlEntry> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, entry)| entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageUrlEntry)> {
        self.entries.iter().map(|(code, entry)| (code.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of the translation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    pub urls: LanguageUrls,
    /// Alternate links, x-default last
    pub links: Vec<Tag>,
}

/// Resolve translation URLs for `item`. Empty without an active multilingual
/// service or when the item belongs to no translation group.
pub fn resolve_translations(ctx: &RenderContext<'_>, item: &ContentItem) -> Translations {
    let Some(service) = ctx.multilingual else {
        return Translations::default();
    };

    let element_type = element_type(&item.item_type);
    let Some(group) = service.translation_group_id(item.id, &element_type) else {
        debug!("Item {} has no translation group", item.id);
        return Translations::default();
    };

    let domain_mode = service.is_domain_per_language();
    let mut translations = Translations::default();

    for translation in service.translations_of(group, &element_type) {
        let Some(sibling) = translation.item else {
            continue;
        };
        let lang = translation.language.as_str();

        let Some(permalink) = ctx.content.permalink(sibling) else {
            debug!("No permalink for item {} ({}), skipping", sibling, lang);
            continue;
        };
        let url = if domain_mode {
            domain_url(ctx, service, &permalink, lang)
        } else {
            permalink
        };
        if url.is_empty() {
            continue;
        }

        let details = service.language_details(lang);
        let hreflang = locale::hreflang_code(lang, details.as_ref());

        translations.links.push(Tag::alternate(hreflang.clone(), url.clone()));
        translations
            .urls
            .insert(lang, LanguageUrlEntry { url, hreflang });
    }

    if let Some(default) = translations.urls.get(&service.default_language()) {
        let link = Tag::alternate(X_DEFAULT, default.url.clone());
        translations.links.push(link);
    }

    debug!(
        "Resolved {} language URLs for item {}",
        translations.urls.len(),
        item.id
    );
    translations
}

/// URL of a translation in domain-per-language mode.
///
/// The service's rewrite hook wins. Without it the home host is replaced by
/// the language's domain, but only for languages that have one; the others
/// stay on the home domain.
fn domain_url(
    ctx: &RenderContext<'_>,
    service: &dyn MultilingualService,
    permalink: &str,
    lang: &str,
) -> String {
    if let Some(url) = service.rewrite_permalink(permalink, lang) {
        return url;
    }

    match (ctx.site.home_host(), service.domain_for(lang)) {
        (Some(host), Some(domain)) => permalink.replace(host, &domain),
        _ => permalink.to_string(),
    }
}
