use crate::site::Site;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Site
    pub site_url: String,
    pub home_url: String,
    pub site_name: String,
    pub site_locale: String,

    // Security
    pub nonce_secret: String,
    pub editor_api_key: Option<String>,

    // Content fixture
    pub content_file: String,

    // Server
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let site_url = std::env::var("SITE_URL").context("SITE_URL not set")?;

        Ok(Self {
            home_url: std::env::var("HOME_URL").unwrap_or_else(|_| site_url.clone()),
            site_url,
            site_name: std::env::var("SITE_NAME").unwrap_or_else(|_| "My Site".to_string()),
            site_locale: std::env::var("SITE_LOCALE").unwrap_or_else(|_| "en_US".to_string()),

            nonce_secret: std::env::var("NONCE_SECRET").context("NONCE_SECRET not set")?,
            editor_api_key: std::env::var("EDITOR_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),

            content_file: std::env::var("CONTENT_FILE")
                .unwrap_or_else(|_| "data/content.json".to_string()),

            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
        })
    }

    pub fn site(&self) -> Site {
        Site::new(&self.site_url, &self.site_name, &self.site_locale).with_home_url(&self.home_url)
    }
}
