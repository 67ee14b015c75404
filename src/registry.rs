//! Directive prefix registry.
//!
//! A directive comment is a `#` comment whose head, once leading whitespace is
//! stripped, matches one of the registered prefixes. Matching is window-based:
//! take the first N characters of the comment (N = the longest registered
//! prefix length), trim trailing whitespace, and look the result up exactly.
//! This makes `#: msg` a Callable directive while `#:msg` is an ordinary
//! comment, and keeps `#:` and `#c:` from ever shadowing each other.
//!
//! The registry is an immutable, explicitly constructed value passed into the
//! rewriter, so independent configurations (per-project prefix sets) can
//! coexist. The standard table is shared behind a `Lazy` static.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The action a directive comment expands into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectiveKind {
    /// Invoke the configured output callable (`print` by default).
    Callable,
    Critical,
    Debug,
    Error,
    Fatal,
    Info,
    Warning,
    /// Not a directive comment.
    None,
}

impl DirectiveKind {
    /// The logger method this kind invokes, or `None` for `Callable` and
    /// non-directive comments.
    pub fn method_name(&self) -> Option<&'static str> {
        match self {
            DirectiveKind::Critical => Some("critical"),
            DirectiveKind::Debug => Some("debug"),
            DirectiveKind::Error => Some("error"),
            DirectiveKind::Fatal => Some("fatal"),
            DirectiveKind::Info => Some("info"),
            DirectiveKind::Warning => Some("warn"),
            DirectiveKind::Callable | DirectiveKind::None => None,
        }
    }
}

/// The standard prefix table.
pub const STANDARD_PREFIXES: &[(&str, DirectiveKind)] = &[
    ("#:", DirectiveKind::Callable),
    ("#c:", DirectiveKind::Critical),
    ("#d:", DirectiveKind::Debug),
    ("#e:", DirectiveKind::Error),
    ("#f:", DirectiveKind::Fatal),
    ("#i:", DirectiveKind::Info),
    ("#w:", DirectiveKind::Warning),
];

static STANDARD: Lazy<DirectiveRegistry> = Lazy::new(|| {
    DirectiveRegistry::new(
        STANDARD_PREFIXES
            .iter()
            .map(|(prefix, kind)| (prefix.to_string(), *kind)),
    )
});

/// Immutable mapping of directive prefixes to their kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveRegistry {
    /// Entries sorted by prefix length, longest first.
    entries: Vec<(String, DirectiveKind)>,
    /// Length in characters of the longest prefix; the classification window.
    window: usize,
}

impl DirectiveRegistry {
    /// Build a registry from `(prefix, kind)` pairs.
    pub fn new(entries: impl IntoIterator<Item = (String, DirectiveKind)>) -> Self {
        let mut entries: Vec<(String, DirectiveKind)> = entries.into_iter().collect();
        entries.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
        let window = entries
            .first()
            .map(|(prefix, _)| prefix.chars().count())
            .unwrap_or(0);
        DirectiveRegistry { entries, window }
    }

    /// The shared standard registry (`#:`, `#c:`, `#d:`, `#e:`, `#f:`, `#i:`, `#w:`).
    pub fn standard() -> &'static DirectiveRegistry {
        &STANDARD
    }

    /// Classify a comment's text. Returns `DirectiveKind::None` for ordinary
    /// comments.
    pub fn classify(&self, comment: &str) -> DirectiveKind {
        let trimmed = comment.trim_start();
        let head: String = trimmed.chars().take(self.window).collect();
        let key = head.trim_end();
        self.entries
            .iter()
            .find(|(prefix, _)| prefix == key)
            .map(|(_, kind)| *kind)
            .unwrap_or(DirectiveKind::None)
    }

    /// Remove the matched prefix (once, longest first) and the padding around
    /// the remaining message.
    pub fn strip_prefix<'a>(&self, comment: &'a str) -> &'a str {
        let trimmed = comment.trim_start();
        for (prefix, _) in &self.entries {
            if let Some(message) = trimmed.strip_prefix(prefix.as_str()) {
                return message.trim();
            }
        }
        trimmed.trim_end()
    }
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        DirectiveRegistry::standard().clone()
    }
}
