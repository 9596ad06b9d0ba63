//! Content fixture loading for the host binary.
//!
//! The fixture is a JSON document describing the items the demo host serves,
//! their already-stored metadata attributes and, optionally, the multilingual
//! setup.
//!
//! ```json
//! {
//!   "items": [
//!     { "id": 1, "type": "post", "title": "Hello", "body": "<p>Hi</p>",
//!       "path": "/hello/", "meta": { "og_title": "Hi there" } }
//!   ],
//!   "multilingual": {
//!     "default_language": "en",
//!     "negotiation": "domain",
//!     "languages": [ { "code": "en", "display_name": "English", "default_locale": "en_US" } ],
//!     "groups": [ { "id": 1, "members": [ { "language": "en", "item": 1 } ] } ]
//!   }
//! }
//! ```

use crate::attributes::{AttributeStore, MemoryStore, MetaKey};
use crate::content::{ContentItem, ContentSource, MemoryContent};
use crate::i18n::{
    ConfiguredMultilingual, LanguageConfig, LanguageRegistry, Negotiation, TranslationGroup,
};
use crate::site::Site;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct FixtureItem {
    #[serde(flatten)]
    pub item: ContentItem,

    /// Absolute permalink; wins over `path`
    #[serde(default)]
    pub permalink: Option<String>,

    /// Path joined onto the home URL
    #[serde(default)]
    pub path: Option<String>,

    /// Stored attributes, keyed by attribute name
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct MultilingualFixture {
    pub default_language: String,

    #[serde(default)]
    pub current_language: Option<String>,

    #[serde(default)]
    pub negotiation: Negotiation,

    #[serde(default)]
    pub rewrite_hook: bool,

    pub languages: Vec<LanguageConfig>,

    #[serde(default)]
    pub groups: Vec<TranslationGroup>,
}

#[derive(Debug, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub items: Vec<FixtureItem>,

    #[serde(default)]
    pub multilingual: Option<MultilingualFixture>,
}

/// Everything the host binary serves, built from a fixture.
#[derive(Debug)]
pub struct LoadedFixture {
    pub content: MemoryContent,
    pub store: MemoryStore,
    pub multilingual: Option<ConfiguredMultilingual>,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse content fixture")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content fixture {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Populate content, attribute store and multilingual service.
    pub fn load(self, site: &Site) -> Result<LoadedFixture> {
        let mut content = MemoryContent::new();
        let store = MemoryStore::new();

        for entry in self.items {
            let id = entry.item.id;
            for (field, value) in &entry.meta {
                match MetaKey::from_field(field) {
                    Some(key) => store
                        .set(id, key, value)
                        .with_context(|| format!("Failed to store {} for item {}", field, id))?,
                    None => warn!("Ignoring unknown attribute '{}' on item {}", field, id),
                }
            }

            let permalink = match (entry.permalink, entry.path) {
                (Some(permalink), _) => permalink,
                (None, Some(path)) => format!(
                    "{}/{}",
                    site.home_url,
                    path.trim_start_matches('/')
                ),
                (None, None) => format!("{}/?p={}", site.home_url, id),
            };
            content.insert(entry.item, permalink);
        }

        let multilingual = match self.multilingual {
            Some(ml) => {
                let dangling = ml
                    .groups
                    .iter()
                    .flat_map(|g| g.members.iter())
                    .find(|m| m.item.is_some_and(|id| content.item(id).is_none()));
                if let Some(member) = dangling {
                    bail!(
                        "Translation group references unknown item {:?} ({})",
                        member.item,
                        member.language
                    );
                }
                let registry = LanguageRegistry::new(ml.languages, &ml.default_language)?;
                Some(
                    ConfiguredMultilingual::new(registry, &site.home_url)
                        .with_negotiation(ml.negotiation)
                        .with_rewrite_hook(ml.rewrite_hook)
                        .with_groups(ml.groups)
                        .with_current_language(ml.current_language.as_deref()),
                )
            }
            None => None,
        };

        info!(
            "Loaded {} items ({} stored attributes, multilingual: {})",
            content.len(),
            store.len(),
            multilingual.is_some()
        );

        Ok(LoadedFixture {
            content,
            store,
            multilingual,
        })
    }
}
