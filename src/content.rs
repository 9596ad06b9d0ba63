//! Content items as the host CMS exposes them.
//!
//! Items are read-only here. The only thing this crate ever writes for an item
//! is its metadata attributes (see [`crate::attributes`]).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Rendition of the featured image used for social previews.
pub const LARGE_RENDITION: &str = "large";

/// Opaque content item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Featured image reference: rendition name -> absolute URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedImage {
    pub renditions: BTreeMap<String, String>,
}

impl FeaturedImage {
    /// URL of the named rendition, if it exists and is not empty.
    pub fn rendition(&self, size: &str) -> Option<&str> {
        self.renditions
            .get(size)
            .map(String::as_str)
            .filter(|url| !url.is_empty())
    }
}

/// A unit of publishable content (blog post, page, product, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,

    /// Host content type tag, e.g. "post", "page", "product"
    #[serde(rename = "type")]
    pub item_type: String,

    pub title: String,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub featured_image: Option<FeaturedImage>,
}

impl ContentItem {
    pub fn new(id: u64, item_type: &str, title: &str, body: &str) -> Self {
        Self {
            id: ItemId(id),
            item_type: item_type.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            featured_image: None,
        }
    }

    /// Attach a featured image with a single `large` rendition.
    pub fn with_featured_image(mut self, large_url: &str) -> Self {
        let mut renditions = BTreeMap::new();
        renditions.insert(LARGE_RENDITION.to_string(), large_url.to_string());
        self.featured_image = Some(FeaturedImage { renditions });
        self
    }

    /// Featured image URL at the `large` rendition.
    pub fn large_image(&self) -> Option<&str> {
        self.featured_image
            .as_ref()
            .and_then(|image| image.rendition(LARGE_RENDITION))
    }
}

/// Host CMS lookups this crate depends on.
pub trait ContentSource: Send + Sync {
    fn item(&self, id: ItemId) -> Option<ContentItem>;

    /// Canonical URL of an item, as the host would link to it.
    fn permalink(&self, id: ItemId) -> Option<String>;
}

/// In-memory content source used by the host binary and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryContent {
    items: HashMap<ItemId, ContentItem>,
    permalinks: HashMap<ItemId, String>,
}

impl MemoryContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: ContentItem, permalink: impl Into<String>) {
        self.permalinks.insert(item.id, permalink.into());
        self.items.insert(item.id, item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ContentSource for MemoryContent {
    fn item(&self, id: ItemId) -> Option<ContentItem> {
        self.items.get(&id).cloned()
    }

    fn permalink(&self, id: ItemId) -> Option<String> {
        self.permalinks.get(&id).filter(|url| !url.is_empty()).cloned()
    }
}
