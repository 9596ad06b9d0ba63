//! Site-wide settings and the per-render context.

use crate::content::ContentSource;
use crate::i18n::MultilingualService;

/// Site-level values used while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Base URL relative asset paths are resolved against
    pub site_url: String,
    /// Front page URL; its host is the default language's domain
    pub home_url: String,
    pub name: String,
    /// Site locale, e.g. "en_US"
    pub locale: String,
}

impl Site {
    pub fn new(site_url: &str, name: &str, locale: &str) -> Self {
        let site_url = site_url.trim_end_matches('/').to_string();
        Self {
            home_url: site_url.clone(),
            site_url,
            name: name.to_string(),
            locale: locale.to_string(),
        }
    }

    pub fn with_home_url(mut self, home_url: &str) -> Self {
        self.home_url = home_url.trim_end_matches('/').to_string();
        self
    }

    /// Join a site-relative path onto the site URL.
    pub fn absolute_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{}/", self.site_url)
        } else {
            format!("{}/{}", self.site_url, path)
        }
    }

    /// Host segment of the home URL.
    pub fn home_host(&self) -> Option<&str> {
        host_of(&self.home_url)
    }
}

/// Host part of an absolute URL (no scheme, credentials or port).
pub fn host_of(url: &str) -> Option<&str> {
    let rest = &url[url.find("://")? + 3..];
    let authority = rest.split(&['/', '?', '#'][..]).next().unwrap_or_default();
    let authority = authority.rsplit('@').next().unwrap_or_default();
    let host = match authority.rfind(':') {
        Some(colon) if !authority.ends_with(']') => &authority[..colon],
        _ => authority,
    };
    Some(host).filter(|h| !h.is_empty())
}

/// Everything a render pass reads besides the item itself and its attributes.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub site: &'a Site,
    pub content: &'a dyn ContentSource,
    pub multilingual: Option<&'a dyn MultilingualService>,
}

impl<'a> RenderContext<'a> {
    pub fn new(site: &'a Site, content: &'a dyn ContentSource) -> Self {
        Self {
            site,
            content,
            multilingual: None,
        }
    }

    pub fn with_multilingual(mut self, service: &'a dyn MultilingualService) -> Self {
        self.multilingual = Some(service);
        self
    }
}
