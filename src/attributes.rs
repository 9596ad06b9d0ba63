//! Attribute store adapter: per-item SEO and social attributes.
//!
//! Attribute keys are part of the persisted compatibility surface and must not
//! be renamed. An empty stored value is treated exactly like a missing one.

use crate::content::ItemId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::warn;

/// Persisted attribute keys. Form field names are identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaKey {
    MetaTitle,
    MetaDescription,
    MetaKeywords,
    OgTitle,
    OgDescription,
    OgImage,
    OgType,
}

impl MetaKey {
    pub const ALL: [MetaKey; 7] = [
        MetaKey::MetaTitle,
        MetaKey::MetaDescription,
        MetaKey::MetaKeywords,
        MetaKey::OgTitle,
        MetaKey::OgDescription,
        MetaKey::OgImage,
        MetaKey::OgType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetaKey::MetaTitle => "meta_title",
            MetaKey::MetaDescription => "meta_description",
            MetaKey::MetaKeywords => "meta_keywords",
            MetaKey::OgTitle => "og_title",
            MetaKey::OgDescription => "og_description",
            MetaKey::OgImage => "og_image",
            MetaKey::OgType => "og_type",
        }
    }

    /// Look up a key by its attribute / form field name.
    pub fn from_field(name: &str) -> Option<MetaKey> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

/// Open Graph object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OgType {
    Website,
    Article,
    Product,
}

impl OgType {
    pub const ALL: [OgType; 3] = [OgType::Website, OgType::Article, OgType::Product];

    pub fn as_str(&self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
            OgType::Product => "product",
        }
    }

    pub fn parse(value: &str) -> Option<OgType> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    /// Default type for a host content type: blog posts are articles,
    /// commerce items are products, everything else is a website.
    pub fn default_for(item_type: &str) -> OgType {
        match item_type {
            "post" => OgType::Article,
            "product" => OgType::Product,
            _ => OgType::Website,
        }
    }

    /// Stored value if it names a known type, else the content-type default.
    pub fn resolve(stored: Option<&str>, item_type: &str) -> OgType {
        stored
            .and_then(OgType::parse)
            .unwrap_or_else(|| OgType::default_for(item_type))
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("attribute store unavailable: {0}")]
    Unavailable(String),
}

/// The host CMS's per-item attribute storage.
pub trait AttributeStore: Send + Sync {
    fn get(&self, item: ItemId, key: MetaKey) -> Result<Option<String>, StoreError>;
    fn set(&self, item: ItemId, key: MetaKey, value: &str) -> Result<(), StoreError>;
}

/// All attributes of one item. `None` means unset or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredAttributes {
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_type: Option<String>,
}

impl StoredAttributes {
    /// Read every attribute of `item`. Read failures degrade to "absent".
    pub fn load(store: &dyn AttributeStore, item: ItemId) -> Self {
        let mut attrs = Self::default();
        for key in MetaKey::ALL {
            let value = match store.get(item, key) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Failed to read {} for item {}: {}", key.as_str(), item, e);
                    None
                }
            };
            attrs.set(key, value);
        }
        attrs
    }

    pub fn get(&self, key: MetaKey) -> Option<&str> {
        let value = match key {
            MetaKey::MetaTitle => &self.meta_title,
            MetaKey::MetaDescription => &self.meta_description,
            MetaKey::MetaKeywords => &self.meta_keywords,
            MetaKey::OgTitle => &self.og_title,
            MetaKey::OgDescription => &self.og_description,
            MetaKey::OgImage => &self.og_image,
            MetaKey::OgType => &self.og_type,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, key: MetaKey, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        match key {
            MetaKey::MetaTitle => self.meta_title = value,
            MetaKey::MetaDescription => self.meta_description = value,
            MetaKey::MetaKeywords => self.meta_keywords = value,
            MetaKey::OgTitle => self.og_title = value,
            MetaKey::OgDescription => self.og_description = value,
            MetaKey::OgImage => self.og_image = value,
            MetaKey::OgType => self.og_type = value,
        }
    }

    pub fn with(mut self, key: MetaKey, value: &str) -> Self {
        self.set(key, Some(value.to_string()));
        self
    }
}

/// Thread-safe in-memory attribute store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<(ItemId, MetaKey), String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored (item, key) pairs.
    pub fn len(&self) -> usize {
        self.values.lock().map(|values| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AttributeStore for MemoryStore {
    fn get(&self, item: ItemId, key: MetaKey) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(values.get(&(item, key)).cloned())
    }

    fn set(&self, item: ItemId, key: MetaKey, value: &str) -> Result<(), StoreError> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        values.insert((item, key), value.to_string());
        Ok(())
    }
}
