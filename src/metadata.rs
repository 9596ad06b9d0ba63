//! Metadata resolver.
//!
//! Turns an item, its stored attributes and the translation pass output into
//! the ordered list of head tags. Pure: no I/O, no shared state.
//!
//! Precedence:
//! - document title: SEO title > item title
//! - description: SEO description > excerpt of the body
//! - social title: OG title > SEO title > item title
//! - social description: OG description > SEO description > excerpt
//! - image: OG image (made absolute) > featured image (`large`) > none

use crate::attributes::{MetaKey, OgType, StoredAttributes};
use crate::content::ContentItem;
use crate::hreflang::Translations;
use crate::i18n::locale;
use crate::site::RenderContext;
use crate::tags::Tag;
use crate::text;

pub const TWITTER_CARD: &str = "summary_large_image";

/// Title for the document `<title>`: the SEO title if set, else `fallback`
/// (what the host would have used).
pub fn document_title(attrs: &StoredAttributes, fallback: &str) -> String {
    attrs
        .get(MetaKey::MetaTitle)
        .unwrap_or(fallback)
        .to_string()
}

/// Social title: OG title > SEO title > item title.
pub fn social_title(item: &ContentItem, attrs: &StoredAttributes) -> String {
    attrs
        .get(MetaKey::OgTitle)
        .or_else(|| attrs.get(MetaKey::MetaTitle))
        .unwrap_or(item.title.as_str())
        .to_string()
}

/// SEO description: explicit value > body excerpt.
pub fn description(item: &ContentItem, attrs: &StoredAttributes) -> String {
    match attrs.get(MetaKey::MetaDescription) {
        Some(description) => description.to_string(),
        None => text::excerpt(&item.body),
    }
}

/// Social description: OG description > SEO description > body excerpt.
pub fn social_description(item: &ContentItem, attrs: &StoredAttributes) -> String {
    match attrs.get(MetaKey::OgDescription) {
        Some(description) => description.to_string(),
        None => description(item, attrs),
    }
}

/// Preview image URL, if any.
pub fn social_image(
    ctx: &RenderContext<'_>,
    item: &ContentItem,
    attrs: &StoredAttributes,
) -> Option<String> {
    if let Some(image) = attrs.get(MetaKey::OgImage) {
        if image.starts_with("http") {
            return Some(image.to_string());
        }
        return Some(ctx.site.absolute_url(image));
    }
    item.large_image().map(str::to_string)
}

/// `og:url`: the item's permalink, replaced by the current language's URL
/// when languages live on separate domains.
fn og_url(
    ctx: &RenderContext<'_>,
    item: &ContentItem,
    translations: &Translations,
) -> Option<String> {
    let permalink = ctx.content.permalink(item.id);
    let Some(service) = ctx.multilingual else {
        return permalink;
    };
    if !service.is_domain_per_language() {
        return permalink;
    }
    service
        .current_language()
        .and_then(|lang| translations.urls.get(&lang).map(|entry| entry.url.clone()))
        .or(permalink)
}

/// `og:locale`: current language's locale, else the site locale.
fn og_locale(ctx: &RenderContext<'_>) -> String {
    let current_locale = ctx.multilingual.and_then(|service| {
        let lang = service.current_language()?;
        service.language_details(&lang)?.default_locale
    });
    let chosen = current_locale
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| ctx.site.locale.clone());
    locale::og_locale(&chosen)
}

/// Resolve the complete tag list for one item.
pub fn resolve(
    ctx: &RenderContext<'_>,
    item: &ContentItem,
    attrs: &StoredAttributes,
    translations: &Translations,
) -> Vec<Tag> {
    let mut tags = Vec::new();

    let description = description(item, attrs);
    if !description.is_empty() {
        tags.push(Tag::name("description", description));
    }
    if let Some(keywords) = attrs.get(MetaKey::MetaKeywords) {
        tags.push(Tag::name("keywords", keywords));
    }

    tags.extend(translations.links.iter().cloned());

    if let Some(url) = og_url(ctx, item, translations) {
        tags.push(Tag::property_url("og:url", url));
    }

    let title = social_title(item, attrs);
    let social_description = social_description(item, attrs);
    tags.push(Tag::property("og:title", title.clone()));
    tags.push(Tag::property("og:description", social_description.clone()));

    let og_type = OgType::resolve(attrs.get(MetaKey::OgType), &item.item_type);
    tags.push(Tag::property("og:type", og_type.as_str()));

    let image = social_image(ctx, item, attrs);
    if let Some(image) = &image {
        tags.push(Tag::property_url("og:image", image.clone()));
    }

    tags.push(Tag::property("og:site_name", ctx.site.name.clone()));
    tags.push(Tag::property("og:locale", og_locale(ctx)));

    let current = ctx
        .multilingual
        .and_then(|service| service.current_language())
        .unwrap_or_default();
    for (lang, entry) in translations.urls.iter() {
        if lang != current {
            tags.push(Tag::property(
                "og:locale:alternate",
                locale::alternate_locale(&entry.hreflang),
            ));
        }
    }

    tags.push(Tag::name("twitter:card", TWITTER_CARD));
    tags.push(Tag::name("twitter:title", title));
    tags.push(Tag::name("twitter:description", social_description));
    if let Some(image) = image {
        tags.push(Tag::name_url("twitter:image", image));
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ItemId, MemoryContent};
    use crate::hreflang::{resolve_translations, LanguageUrlEntry, LanguageUrls};
    use crate::i18n::{
        ConfiguredMultilingual, LanguageConfig, LanguageRegistry, Negotiation, Translation,
        TranslationGroup,
    };
    use crate::site::Site;

    fn site() -> Site {
        Site::new("https://example.com", "Example Site", "en_US")
    }

    fn post() -> ContentItem {
        ContentItem::new(
            1,
            "post",
            "Default Title",
            "<p>First paragraph of the post.</p>",
        )
    }

    fn content() -> MemoryContent {
        let mut content = MemoryContent::new();
        content.insert(post(), "https://example.com/default-title/");
        content
    }

    fn value<'a>(tags: &'a [Tag], key: &str) -> Option<&'a str> {
        tags.iter().find(|t| t.key() == key).map(Tag::content)
    }

    fn keys(tags: &[Tag]) -> Vec<&str> {
        tags.iter().map(Tag::key).collect()
    }

    fn multilingual(current: &str, negotiation: Negotiation) -> ConfiguredMultilingual {
        let lang = |code: &str, locale: &str, domain: Option<&str>| LanguageConfig {
            code: code.to_string(),
            display_name: code.to_string(),
            default_locale: Some(locale.to_string()),
            domain: domain.map(str::to_string),
            active: true,
        };
        let registry = LanguageRegistry::new(
            vec![
                lang("en", "en_US", None),
                lang("fr", "fr_FR", Some("example.fr")),
            ],
            "en",
        )
        .expect("valid registry");
        ConfiguredMultilingual::new(registry, "https://example.com")
            .with_negotiation(negotiation)
            .with_groups(vec![TranslationGroup {
                id: 1,
                members: vec![
                    Translation { language: "en".to_string(), item: Some(ItemId(1)) },
                    Translation { language: "fr".to_string(), item: Some(ItemId(2)) },
                ],
            }])
            .with_current_language(Some(current))
    }

    fn bilingual_content() -> MemoryContent {
        let mut content = content();
        content.insert(
            ContentItem::new(2, "post", "Titre", "Corps"),
            "https://example.com/fr/titre/",
        );
        content
    }

    // ==================== Fallback Tests ====================

    #[test]
    fn test_no_attributes_uses_item_defaults() {
        let site = site();
        let content = content();
        let ctx = RenderContext::new(&site, &content);
        let attrs = StoredAttributes::default();

        let tags = resolve(&ctx, &post(), &attrs, &Translations::default());

        assert_eq!(document_title(&attrs, &post().title), "Default Title");
        assert_eq!(value(&tags, "og:title"), Some("Default Title"));
        assert_eq!(value(&tags, "description"), Some("First paragraph of the post."));
        assert_eq!(value(&tags, "og:description"), Some("First paragraph of the post."));
        assert_eq!(value(&tags, "twitter:description"), Some("First paragraph of the post."));
        assert_eq!(value(&tags, "keywords"), None);
    }

    #[test]
    fn test_og_title_does_not_leak_into_document_title() {
        let site = site();
        let content = content();
        let ctx = RenderContext::new(&site, &content);
        let attrs = StoredAttributes::default().with(MetaKey::OgTitle, "Share me");

        let tags = resolve(&ctx, &post(), &attrs, &Translations::default());

        assert_eq!(value(&tags, "og:title"), Some("Share me"));
        assert_eq!(value(&tags, "twitter:title"), Some("Share me"));
        assert_eq!(document_title(&attrs, &post().title), "Default Title");
    }

    #[test]
    fn test_seo_title_feeds_social_title_and_document_title() {
        let attrs = StoredAttributes::default().with(MetaKey::MetaTitle, "SEO Title");
        assert_eq!(social_title(&post(), &attrs), "SEO Title");
        assert_eq!(document_title(&attrs, "Host Title"), "SEO Title");
    }

    #[test]
    fn test_social_description_precedence() {
        let item = post();
        let seo = StoredAttributes::default().with(MetaKey::MetaDescription, "SEO desc");
        assert_eq!(social_description(&item, &seo), "SEO desc");

        let og = seo.clone().with(MetaKey::OgDescription, "OG desc");
        assert_eq!(social_description(&item, &og), "OG desc");
        assert_eq!(description(&item, &og), "SEO desc");
    }

    #[test]
    fn test_empty_body_skips_description_tag() {
        let site = site();
        let content = content();
        let ctx = RenderContext::new(&site, &content);
        let item = ContentItem::new(1, "page", "Empty", "");

        let tags = resolve(&ctx, &item, &StoredAttributes::default(), &Translations::default());
        assert_eq!(value(&tags, "description"), None);
        assert_eq!(value(&tags, "og:description"), Some(""));
    }

    // ==================== og:type Tests ====================

    #[test]
    fn test_og_type_defaults() {
        let site = site();
        let content = content();
        let ctx = RenderContext::new(&site, &content);
        let attrs = StoredAttributes::default();

        let cases = [("post", "article"), ("product", "product"), ("page", "website")];
        for (item_type, expected) in cases {
            let item = ContentItem::new(1, item_type, "T", "");
            let tags = resolve(&ctx, &item, &attrs, &Translations::default());
            assert_eq!(value(&tags, "og:type"), Some(expected), "type {}", item_type);
        }
    }

    #[test]
    fn test_og_type_explicit() {
        let site = site();
        let content = content();
        let ctx = RenderContext::new(&site, &content);
        let attrs = StoredAttributes::default().with(MetaKey::OgType, "website");

        let tags = resolve(&ctx, &post(), &attrs, &Translations::default());
        assert_eq!(value(&tags, "og:type"), Some("website"));
    }

    // ==================== Image Tests ====================

    #[test]
    fn test_relative_og_image_made_absolute() {
        let site = site();
        let content = content();
        let ctx = RenderContext::new(&site, &content);
        let attrs = StoredAttributes::default().with(MetaKey::OgImage, "/img/a.png");

        let tags = resolve(&ctx, &post(), &attrs, &Translations::default());
        assert_eq!(value(&tags, "og:image"), Some("https://example.com/img/a.png"));
        assert_eq!(value(&tags, "twitter:image"), Some("https://example.com/img/a.png"));
    }

    #[test]
    fn test_absolute_og_image_kept() {
        let site = site();
        let content = content();
        let ctx = RenderContext::new(&site, &content);
        let attrs =
            StoredAttributes::default().with(MetaKey::OgImage, "https://cdn.example.net/a.png");

        assert_eq!(
            social_image(&ctx, &post(), &attrs).as_deref(),
            Some("https://cdn.example.net/a.png")
        );
    }

    #[test]
    fn test_featured_image_fallback() {
        let site = site();
        let content = content();
        let ctx = RenderContext::new(&site, &content);
        let item = post().with_featured_image("https://example.com/uploads/hero-1024x768.jpg");

        let tags = resolve(&ctx, &item, &StoredAttributes::default(), &Translations::default());
        assert_eq!(
            value(&tags, "og:image"),
            Some("https://example.com/uploads/hero-1024x768.jpg")
        );
        assert_eq!(
            value(&tags, "twitter:image"),
            Some("https://example.com/uploads/hero-1024x768.jpg")
        );
    }

    #[test]
    fn test_no_image_omits_both_image_tags() {
        let site = site();
        let content = content();
        let ctx = RenderContext::new(&site, &content);

        let tags = resolve(&ctx, &post(), &StoredAttributes::default(), &Translations::default());
        assert_eq!(value(&tags, "og:image"), None);
        assert_eq!(value(&tags, "twitter:image"), None);
    }

    // ==================== Ordering Tests ====================

    #[test]
    fn test_tag_order_without_translations() {
        let site = site();
        let content = content();
        let ctx = RenderContext::new(&site, &content);
        let attrs = StoredAttributes::default()
            .with(MetaKey::MetaDescription, "Desc")
            .with(MetaKey::MetaKeywords, "a, b")
            .with(MetaKey::OgImage, "/a.png");

        let tags = resolve(&ctx, &post(), &attrs, &Translations::default());
        assert_eq!(
            keys(&tags),
            vec![
                "description",
                "keywords",
                "og:url",
                "og:title",
                "og:description",
                "og:type",
                "og:image",
                "og:site_name",
                "og:locale",
                "twitter:card",
                "twitter:title",
                "twitter:description",
                "twitter:image",
            ]
        );
        assert_eq!(value(&tags, "og:url"), Some("https://example.com/default-title/"));
        assert_eq!(value(&tags, "og:site_name"), Some("Example Site"));
        assert_eq!(value(&tags, "og:locale"), Some("en-US"));
        assert_eq!(value(&tags, "twitter:card"), Some(TWITTER_CARD));
    }

    #[test]
    fn test_missing_permalink_skips_og_url() {
        let site = site();
        let content = MemoryContent::new();
        let ctx = RenderContext::new(&site, &content);

        let tags = resolve(&ctx, &post(), &StoredAttributes::default(), &Translations::default());
        assert_eq!(value(&tags, "og:url"), None);
    }

    // ==================== Multilingual Tests ====================

    #[test]
    fn test_hreflang_links_follow_keywords() {
        let site = site();
        let content = bilingual_content();
        let service = multilingual("en", Negotiation::Directory);
        let ctx = RenderContext::new(&site, &content).with_multilingual(&service);
        let attrs = StoredAttributes::default().with(MetaKey::MetaKeywords, "k");

        let translations = resolve_translations(&ctx, &post());
        let tags = resolve(&ctx, &post(), &attrs, &translations);
        assert_eq!(
            &keys(&tags)[..5],
            &["description", "keywords", "hreflang", "hreflang", "hreflang"]
        );
        assert_eq!(keys(&tags)[5], "og:url");
    }

    #[test]
    fn test_locale_and_alternates_for_current_language() {
        let site = site();
        let content = bilingual_content();
        let service = multilingual("en", Negotiation::Directory);
        let ctx = RenderContext::new(&site, &content).with_multilingual(&service);

        let translations = resolve_translations(&ctx, &post());
        let tags = resolve(&ctx, &post(), &StoredAttributes::default(), &translations);

        assert_eq!(value(&tags, "og:locale"), Some("en-US"));
        let alternates: Vec<_> = tags
            .iter()
            .filter(|t| t.key() == "og:locale:alternate")
            .map(Tag::content)
            .collect();
        assert_eq!(alternates, vec!["fr_fr"]);
    }

    #[test]
    fn test_og_locale_uses_current_language_locale() {
        let site = site();
        let content = bilingual_content();
        let service = multilingual("fr", Negotiation::Directory);
        let ctx = RenderContext::new(&site, &content).with_multilingual(&service);

        let tags = resolve(&ctx, &post(), &StoredAttributes::default(), &Translations::default());
        assert_eq!(value(&tags, "og:locale"), Some("fr-FR"));
    }

    #[test]
    fn test_og_locale_falls_back_to_site_locale_without_language_locale() {
        let site = Site::new("https://example.com", "Example Site", "en_GB");
        let content = content();
        let languages = vec![
            LanguageConfig {
                code: "en".to_string(),
                display_name: "English".to_string(),
                default_locale: Some("en_US".to_string()),
                domain: None,
                active: true,
            },
            LanguageConfig {
                code: "de".to_string(),
                display_name: "Deutsch".to_string(),
                default_locale: None,
                domain: None,
                active: true,
            },
            LanguageConfig {
                code: "nl".to_string(),
                display_name: "Nederlands".to_string(),
                default_locale: Some(String::new()),
                domain: None,
                active: true,
            },
        ];
        let registry = LanguageRegistry::new(languages, "en").expect("valid registry");

        for current in ["de", "nl"] {
            let service = ConfiguredMultilingual::new(registry.clone(), "https://example.com")
                .with_current_language(Some(current));
            let ctx = RenderContext::new(&site, &content).with_multilingual(&service);

            let tags =
                resolve(&ctx, &post(), &StoredAttributes::default(), &Translations::default());
            assert_eq!(value(&tags, "og:locale"), Some("en-GB"), "current {}", current);
        }
    }

    #[test]
    fn test_og_url_overridden_in_domain_mode() {
        let site = site();
        let content = bilingual_content();
        let service = multilingual("fr", Negotiation::Domain);
        let ctx = RenderContext::new(&site, &content).with_multilingual(&service);
        let fr = ContentItem::new(2, "post", "Titre", "Corps");

        let translations = resolve_translations(&ctx, &fr);
        let tags = resolve(&ctx, &fr, &StoredAttributes::default(), &translations);
        assert_eq!(value(&tags, "og:url"), Some("https://example.fr/fr/titre/"));
    }

    #[test]
    fn test_og_url_not_overridden_in_directory_mode() {
        let site = site();
        let content = bilingual_content();
        let service = multilingual("fr", Negotiation::Directory);
        let ctx = RenderContext::new(&site, &content).with_multilingual(&service);

        let mut urls = LanguageUrls::new();
        urls.insert(
            "fr",
            LanguageUrlEntry {
                url: "https://elsewhere.test/".to_string(),
                hreflang: "fr-fr".to_string(),
            },
        );
        let translations = Translations { urls, links: Vec::new() };
        let tags = resolve(&ctx, &post(), &StoredAttributes::default(), &translations);
        assert_eq!(value(&tags, "og:url"), Some("https://example.com/default-title/"));
    }

    // ==================== Idempotence Tests ====================

    #[test]
    fn test_resolve_twice_is_identical() {
        let site = site();
        let content = bilingual_content();
        let service = multilingual("en", Negotiation::Domain);
        let ctx = RenderContext::new(&site, &content).with_multilingual(&service);
        let attrs = StoredAttributes::default()
            .with(MetaKey::OgImage, "/img/a.png")
            .with(MetaKey::MetaKeywords, "x");

        let first = resolve(&ctx, &post(), &attrs, &resolve_translations(&ctx, &post()));
        let second = resolve(&ctx, &post(), &attrs, &resolve_translations(&ctx, &post()));
        assert_eq!(
            crate::tags::render_html(&first),
            crate::tags::render_html(&second)
        );
    }
}
