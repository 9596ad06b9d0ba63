//! Plain-text helpers: markup stripping, excerpts and form-field sanitizing.

use regex::Regex;
use std::sync::OnceLock;

/// Number of words kept in an auto-generated excerpt.
pub const EXCERPT_WORDS: usize = 30;

/// Marker appended to a truncated excerpt.
pub const EXCERPT_MORE: &str = "...";

fn script_style_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>")
            .expect("script/style pattern is valid")
    })
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // A tag starts with a letter, optionally after `/`, `!` or `?`; a lone `<`
    // in prose is text
    RE.get_or_init(|| {
        Regex::new(r"(?s)<!--.*?-->|<[/!?]?[A-Za-z][^>]*>").expect("tag pattern is valid")
    })
}

fn shortcode_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[/?[A-Za-z][\w-]*(?:\s[^\]]*)?/?\]").expect("shortcode pattern is valid")
    })
}

fn octet_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("octet pattern is valid"))
}

/// Remove markup. Script and style blocks are dropped with their contents.
pub fn strip_tags(text: &str) -> String {
    let without_blocks = script_style_regex().replace_all(text, "");
    tag_regex().replace_all(&without_blocks, "").into_owned()
}

/// Remove `[name attr="x"]`, `[name/]` and `[/name]` shortcode tokens,
/// keeping any enclosed text.
pub fn strip_shortcodes(text: &str) -> String {
    shortcode_regex().replace_all(text, "").into_owned()
}

/// Keep the first `max_words` whitespace-separated words. `more` is appended
/// only when something was cut.
pub fn trim_words(text: &str, max_words: usize, more: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > max_words {
        format!("{}{}", words[..max_words].join(" "), more)
    } else {
        words.join(" ")
    }
}

/// Auto-generated description for a content body.
pub fn excerpt(body: &str) -> String {
    trim_words(
        &strip_shortcodes(&strip_tags(body)),
        EXCERPT_WORDS,
        EXCERPT_MORE,
    )
}

/// Whitespace collapsed by [`sanitize_text_field`]. Other Unicode spaces
/// (NBSP, thin space) are content.
const FIELD_WHITESPACE: [char; 4] = [' ', '\t', '\n', '\r'];

/// Minimal sanitizing applied to every saved form value: markup and
/// percent-encoded octets removed, whitespace runs collapsed, ends trimmed.
pub fn sanitize_text_field(value: &str) -> String {
    let mut cleaned = strip_tags(value);
    // Removing an octet can expose another ("%%4141") or complete a tag
    // ("<%41b>"), so repeat until nothing changes
    loop {
        let next = strip_tags(&octet_regex().replace_all(&cleaned, ""));
        if next == cleaned {
            break;
        }
        cleaned = next;
    }
    cleaned
        .split(&FIELD_WHITESPACE[..])
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
