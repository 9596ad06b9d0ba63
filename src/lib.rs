//! SEO, Open Graph, Twitter Card and hreflang metadata for CMS content items.
//!
//! Rendering is split into pure resolvers ([`hreflang`], [`metadata`]) that
//! produce [`tags::Tag`] lists, and a serializer that writes them as HTML.
//! [`head`] runs one complete pass for an item.

pub mod admin;
pub mod attributes;
pub mod config;
pub mod content;
pub mod fixture;
pub mod head;
pub mod hreflang;
pub mod i18n;
pub mod metadata;
pub mod security;
pub mod server;
pub mod site;
pub mod tags;
pub mod text;
