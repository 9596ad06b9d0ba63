//! Head tag records and their HTML serialization.
//!
//! Resolvers only build `Tag` values; escaping happens here, once, when the
//! list is written out.

/// Which attribute names a `<meta>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAttr {
    /// `<meta name="...">` (description, keywords, twitter:*)
    Name,
    /// `<meta property="...">` (og:*)
    Property,
}

/// Tag content. URLs get URL sanitizing on top of attribute escaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Url(String),
}

impl Value {
    pub fn as_str(&self) -> &str {
        match self {
            Value::Text(text) | Value::Url(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Meta {
        attr: MetaAttr,
        key: &'static str,
        value: Value,
    },
    /// `<link rel="alternate" hreflang="..." href="...">`
    Alternate { hreflang: String, href: String },
}

impl Tag {
    pub fn name(key: &'static str, text: impl Into<String>) -> Self {
        Tag::Meta {
            attr: MetaAttr::Name,
            key,
            value: Value::Text(text.into()),
        }
    }

    pub fn name_url(key: &'static str, url: impl Into<String>) -> Self {
        Tag::Meta {
            attr: MetaAttr::Name,
            key,
            value: Value::Url(url.into()),
        }
    }

    pub fn property(key: &'static str, text: impl Into<String>) -> Self {
        Tag::Meta {
            attr: MetaAttr::Property,
            key,
            value: Value::Text(text.into()),
        }
    }

    pub fn property_url(key: &'static str, url: impl Into<String>) -> Self {
        Tag::Meta {
            attr: MetaAttr::Property,
            key,
            value: Value::Url(url.into()),
        }
    }

    pub fn alternate(hreflang: impl Into<String>, href: impl Into<String>) -> Self {
        Tag::Alternate {
            hreflang: hreflang.into(),
            href: href.into(),
        }
    }

    /// Tag key: `og:title`, `description`, or `hreflang` for alternate links.
    pub fn key(&self) -> &str {
        match self {
            Tag::Meta { key, .. } => key,
            Tag::Alternate { .. } => "hreflang",
        }
    }

    /// Raw (unescaped) content, or the href for alternate links.
    pub fn content(&self) -> &str {
        match self {
            Tag::Meta { value, .. } => value.as_str(),
            Tag::Alternate { href, .. } => href,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            Tag::Meta { attr, key, value } => {
                let attr = match attr {
                    MetaAttr::Name => "name",
                    MetaAttr::Property => "property",
                };
                let content = match value {
                    Value::Text(text) => escape_attr(text),
                    Value::Url(url) => escape_url(url),
                };
                format!("<meta {}=\"{}\" content=\"{}\" />", attr, key, content)
            }
            Tag::Alternate { hreflang, href } => format!(
                "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\" />",
                escape_attr(hreflang),
                escape_url(href)
            ),
        }
    }
}

/// Write a tag list as head HTML, one tag per line.
pub fn render_html(tags: &[Tag]) -> String {
    let mut out = String::new();
    for tag in tags {
        out.push_str(&tag.to_html());
        out.push('\n');
    }
    out
}

/// Escape text for use inside a double- or single-quoted HTML attribute,
/// or as element text.
pub fn escape_attr(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    result
}

/// URL schemes allowed through `escape_url`.
const ALLOWED_SCHEMES: [&str; 6] = ["http", "https", "ftp", "ftps", "mailto", "tel"];

/// Sanitize a URL for an attribute. Disallowed schemes (`javascript:`,
/// `data:`, ...) yield an empty string; spaces are percent-encoded.
pub fn escape_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }

    // A scheme is whatever precedes the first ':' if no '/', '?' or '#' comes first
    if let Some(colon) = url.find(':') {
        let first_delim = url.find(&['/', '?', '#'][..]).unwrap_or(url.len());
        if colon < first_delim {
            let scheme = url[..colon].to_ascii_lowercase();
            if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
                return String::new();
            }
        }
    }

    let encoded: String = url
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if c == ' ' { "%20".to_string() } else { c.to_string() })
        .collect();
    escape_attr(&encoded)
}
