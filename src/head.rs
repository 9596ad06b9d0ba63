//! One render pass: translations first, then metadata, then HTML.

use crate::attributes::{AttributeStore, StoredAttributes};
use crate::content::ContentItem;
use crate::hreflang::{self, Translations};
use crate::metadata;
use crate::site::RenderContext;
use crate::tags::{self, escape_attr, Tag};
use tracing::debug;

/// Result of rendering one item's head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHead {
    /// Document title (already resolved, not escaped)
    pub title: String,
    pub tags: Vec<Tag>,
    /// The language table built during this pass
    pub translations: Translations,
}

impl RenderedHead {
    /// `<title>` followed by every tag, one per line.
    pub fn to_html(&self) -> String {
        format!(
            "<title>{}</title>\n{}",
            escape_attr(&self.title),
            tags::render_html(&self.tags)
        )
    }
}

/// Render the head for `item`, reading its attributes from `store`.
pub fn render_head(
    ctx: &RenderContext<'_>,
    store: &dyn AttributeStore,
    item: &ContentItem,
) -> RenderedHead {
    let attrs = StoredAttributes::load(store, item.id);
    render_with_attributes(ctx, &attrs, item)
}

/// Render from already-loaded attributes.
pub fn render_with_attributes(
    ctx: &RenderContext<'_>,
    attrs: &StoredAttributes,
    item: &ContentItem,
) -> RenderedHead {
    let translations = hreflang::resolve_translations(ctx, item);
    let tags = metadata::resolve(ctx, item, attrs, &translations);
    let title = metadata::document_title(attrs, &item.title);

    debug!(
        "Rendered {} head tags for item {} ({} languages)",
        tags.len(),
        item.id,
        translations.urls.len()
    );

    RenderedHead {
        title,
        tags,
        translations,
    }
}
