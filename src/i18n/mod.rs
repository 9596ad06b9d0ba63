//! Multilingual support.
//!
//! The host's translation layer is an optional collaborator described by the
//! [`MultilingualService`] trait. This module also provides a configuration
//! backed implementation and the locale conversions shared by the resolvers.
//!
//! # Architecture
//!
//! - `service`: the trait the resolvers consume, plus its value types
//! - `registry`: configured site languages (locale, display name, domain)
//! - `configured`: `MultilingualService` implementation over a registry
//! - `locale`: hreflang / Open Graph locale conversions

mod configured;
pub mod locale;
mod registry;
mod service;

pub use configured::{ConfiguredMultilingual, Negotiation, TranslationGroup};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use service::{
    element_type, LanguageDetails, MultilingualService, Translation, TranslationGroupId,
};
