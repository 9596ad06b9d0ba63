//! Editor-facing side: the metadata form, its save handler and the
//! domain-coverage notice.

use crate::attributes::{AttributeStore, MetaKey, OgType, StoredAttributes};
use crate::content::{ContentItem, ItemId};
use crate::i18n::MultilingualService;
use crate::security::NonceGuard;
use crate::tags::{escape_attr, escape_url};
use crate::text::sanitize_text_field;
use std::collections::HashMap;
use std::fmt::Write as _;
use thiserror::Error;
use tracing::{info, warn};

/// Action name the form token is bound to.
pub const NONCE_ACTION: &str = "meta_og_manager_save";

/// Form field carrying the anti-forgery token.
pub const NONCE_FIELD: &str = "meta_og_nonce";

/// Page where languages and their domains are configured.
pub const LANGUAGE_SETTINGS_URL: &str = "/admin/languages";

/// Why a save was dropped. Never shown to the editor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaveRejection {
    #[error("anti-forgery token missing")]
    MissingNonce,

    #[error("anti-forgery token invalid")]
    InvalidNonce,

    #[error("autosave requests do not carry metadata")]
    Autosave,

    #[error("caller may not edit item {0}")]
    Forbidden(ItemId),
}

/// A submitted metadata form.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub item: ItemId,
    /// Raw posted fields, keyed by form field name
    pub fields: HashMap<String, String>,
    pub nonce: Option<String>,
    pub autosave: bool,
}

/// Persist the submitted metadata fields of one item.
///
/// Checks run in order: token, autosave, permission. Any failure leaves the
/// store untouched. Each present field is sanitized and written; absent
/// fields keep their stored value. Returns the keys that were written.
pub fn save(
    store: &dyn AttributeStore,
    nonces: &NonceGuard,
    request: &SaveRequest,
    can_edit: bool,
) -> Result<Vec<MetaKey>, SaveRejection> {
    let nonce = request
        .nonce
        .as_deref()
        .ok_or(SaveRejection::MissingNonce)?;
    if !nonces.verify(nonce, NONCE_ACTION, &request.item.to_string()) {
        return Err(SaveRejection::InvalidNonce);
    }
    if request.autosave {
        return Err(SaveRejection::Autosave);
    }
    if !can_edit {
        return Err(SaveRejection::Forbidden(request.item));
    }

    let mut written = Vec::new();
    for key in MetaKey::ALL {
        let Some(raw) = request.fields.get(key.as_str()) else {
            continue;
        };
        let value = sanitize_text_field(raw);
        match store.set(request.item, key, &value) {
            Ok(()) => written.push(key),
            Err(e) => warn!(
                "Failed to write {} for item {}: {}",
                key.as_str(),
                request.item,
                e
            ),
        }
    }

    info!("Saved {} metadata fields for item {}", written.len(), request.item);
    Ok(written)
}

fn text_row(out: &mut String, key: MetaKey, label: &str, value: &str, hint: &str) {
    let name = key.as_str();
    let _ = write!(
        out,
        "<div class=\"meta-og-row\">\n\
         <label for=\"{name}\">{label}</label>\n\
         <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\">\n\
         <p class=\"meta-og-hint\">{hint}</p>\n\
         </div>\n",
        value = escape_attr(value),
    );
}

fn textarea_row(out: &mut String, key: MetaKey, label: &str, value: &str, hint: &str) {
    let name = key.as_str();
    let _ = write!(
        out,
        "<div class=\"meta-og-row\">\n\
         <label for=\"{name}\">{label}</label>\n\
         <textarea id=\"{name}\" name=\"{name}\">{value}</textarea>\n\
         <p class=\"meta-og-hint\">{hint}</p>\n\
         </div>\n",
        value = escape_attr(value),
    );
}

/// Editor banners describing the language (and domain) being edited.
fn language_banners(service: Option<&dyn MultilingualService>) -> String {
    let Some(service) = service else {
        return String::new();
    };
    let Some(current) = service.current_language() else {
        return String::new();
    };

    let name = service
        .language_details(&current)
        .map(|details| details.display_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| current.clone());

    let mut out = format!(
        "<div class=\"meta-og-language\"><strong>Language:</strong> {}\n\
         <p>These tags apply to this language version only. Each translation keeps its own tags.</p>\n\
         </div>\n",
        escape_attr(&name)
    );

    if service.is_domain_per_language() {
        if let Some(domain) = service.domain_for(&current) {
            let _ = write!(
                out,
                "<div class=\"meta-og-domain\"><strong>Domain:</strong> {}\n\
                 <p>Open Graph and hreflang URLs for this language use this domain.</p>\n\
                 </div>\n",
                escape_attr(&domain)
            );
        }
    }
    out
}

/// Render the metadata form for `item`.
///
/// The `og_type` select is preselected with the stored type, or the default
/// for the item's content type.
pub fn render_form(
    item: &ContentItem,
    attrs: &StoredAttributes,
    nonce: &str,
    action_url: &str,
    service: Option<&dyn MultilingualService>,
) -> String {
    let value = |key: MetaKey| attrs.get(key).unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<form method=\"post\" action=\"{}\" class=\"meta-og-wrapper\">",
        escape_url(action_url)
    );
    let _ = writeln!(
        out,
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
        NONCE_FIELD,
        escape_attr(nonce)
    );
    out.push_str(&language_banners(service));

    out.push_str("<div class=\"meta-og-section\">\n<h3>Meta tags</h3>\n");
    text_row(
        &mut out,
        MetaKey::MetaTitle,
        "Meta title:",
        value(MetaKey::MetaTitle),
        "Leave empty to use the item title.",
    );
    textarea_row(
        &mut out,
        MetaKey::MetaDescription,
        "Meta description:",
        value(MetaKey::MetaDescription),
        "Short summary, ideally 150-160 characters.",
    );
    text_row(
        &mut out,
        MetaKey::MetaKeywords,
        "Meta keywords:",
        value(MetaKey::MetaKeywords),
        "Comma-separated keywords.",
    );
    out.push_str("</div>\n");

    out.push_str("<div class=\"meta-og-section\">\n<h3>Open Graph tags</h3>\n");
    text_row(
        &mut out,
        MetaKey::OgTitle,
        "OG title:",
        value(MetaKey::OgTitle),
        "Leave empty to use the meta title or the item title.",
    );
    textarea_row(
        &mut out,
        MetaKey::OgDescription,
        "OG description:",
        value(MetaKey::OgDescription),
        "Leave empty to use the meta description.",
    );
    text_row(
        &mut out,
        MetaKey::OgImage,
        "OG image URL:",
        value(MetaKey::OgImage),
        "Leave empty to use the featured image.",
    );

    let selected = OgType::resolve(attrs.get(MetaKey::OgType), &item.item_type);
    let name = MetaKey::OgType.as_str();
    let _ = write!(
        out,
        "<div class=\"meta-og-row\">\n<label for=\"{name}\">OG type:</label>\n<select id=\"{name}\" name=\"{name}\">\n"
    );
    for og_type in OgType::ALL {
        let marker = if og_type == selected { " selected" } else { "" };
        let _ = writeln!(
            out,
            "<option value=\"{}\"{}>{}</option>",
            og_type.as_str(),
            marker,
            og_type.as_str()
        );
    }
    out.push_str("</select>\n</div>\n</div>\n");
    out.push_str("<button type=\"submit\">Save</button>\n</form>\n");
    out
}

/// Warning shown to administrators when languages are served from separate
/// domains but not every non-default language has one configured.
pub fn domain_coverage_notice(service: Option<&dyn MultilingualService>) -> Option<String> {
    let service = service?;
    if !service.is_domain_per_language() {
        return None;
    }

    let configured = service.language_domains().len();
    // The default language lives on the home domain
    let needed = service.active_languages().len().saturating_sub(1);
    if configured != 0 && configured >= needed {
        return None;
    }

    Some(format!(
        "<div class=\"notice notice-warning is-dismissible\">\n\
         <p><strong>Meta &amp; OG Tags Manager:</strong> Languages are served from separate domains, \
         but not every language has a domain assigned. Open Graph and hreflang URLs may point at the \
         wrong domain until a domain is configured for every active language.</p>\n\
         <p><a href=\"{}\" class=\"button button-primary\">Configure language domains</a></p>\n\
         </div>\n",
        LANGUAGE_SETTINGS_URL
    ))
}
