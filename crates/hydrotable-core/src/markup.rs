//! Pattern matching for the markup constructs that station tables embed in
//! their cells.
//!
//! Each [`MarkupRule`] recognizes one construct and reports a [`MarkupMatch`]
//! instead of rewriting the value in place, so callers can tell a cleaned
//! value apart from one that never carried the construct.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Text substituted for a status symbol image
pub const SYMBOL_TEXT: &str = "Yes";

static ANCHOR_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^<a\s+(?:[^>]*?\s+)?href=(?:"[^"]*"|'[^']*')[^>]*>"#)
        .expect("BUG: anchor open pattern is statically valid")
});

static ANCHOR_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</a>$").expect("BUG: anchor close pattern is statically valid")
});

static SITE_SPAN_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)^<span class="site_no">"#)
        .expect("BUG: site span open pattern is statically valid")
});

static SITE_SPAN_CLOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</span>$").expect("BUG: site span close pattern is statically valid")
});

static SYMBOL_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img\s+src="Symbols/\w+(?:\W\w+)?\.gif"\s*/?>"#)
        .expect("BUG: symbol image pattern is statically valid")
});

/// Outcome of applying a [`MarkupRule`] to a value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupMatch {
    /// The construct was present; holds the value with it removed or replaced
    Matched(String),
    /// The construct was not present
    Unmatched,
}

impl MarkupMatch {
    pub fn is_matched(&self) -> bool {
        matches!(self, MarkupMatch::Matched(_))
    }

    /// The cleaned text, or `original` when nothing matched
    pub fn or_original(self, original: &str) -> String {
        match self {
            MarkupMatch::Matched(text) => text,
            MarkupMatch::Unmatched => original.to_string(),
        }
    }
}

/// A markup construct that can be removed from a cell value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupRule {
    /// `<a href="...">text</a>` keeps `text`
    AnchorWrapper,
    /// `<span class="site_no">text</span>` keeps `text`
    SiteNumberSpan,
    /// `<img src="Symbols/name.gif">` becomes `Yes`
    SymbolImage,
}

impl MarkupRule {
    /// All rules in the order they are applied
    pub const ALL: [MarkupRule; 3] = [
        MarkupRule::AnchorWrapper,
        MarkupRule::SiteNumberSpan,
        MarkupRule::SymbolImage,
    ];

    pub fn apply(self, value: &str) -> MarkupMatch {
        match self {
            MarkupRule::AnchorWrapper => strip_wrapper(value, &ANCHOR_OPEN, &ANCHOR_CLOSE),
            MarkupRule::SiteNumberSpan => {
                strip_wrapper(value, &SITE_SPAN_OPEN, &SITE_SPAN_CLOSE)
            }
            MarkupRule::SymbolImage => {
                if SYMBOL_IMAGE.is_match(value) {
                    MarkupMatch::Matched(SYMBOL_IMAGE.replace_all(value, SYMBOL_TEXT).into_owned())
                } else {
                    MarkupMatch::Unmatched
                }
            }
        }
    }
}

/// Remove a wrapper only when both its leading open tag and its trailing
/// close tag are present
fn strip_wrapper(value: &str, open: &Regex, close: &Regex) -> MarkupMatch {
    let Some(open_tag) = open.find(value) else {
        return MarkupMatch::Unmatched;
    };
    let inner = &value[open_tag.end()..];
    match close.find(inner) {
        Some(close_tag) => MarkupMatch::Matched(inner[..close_tag.start()].to_string()),
        None => MarkupMatch::Unmatched,
    }
}
