//! Markup stripping for comparisons.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("valid tag pattern"));

/// Removes markup tags, keeping the text between them.
pub fn strip_markup(text: &str) -> Cow<'_, str> {
    if text.contains('<') {
        TAG.replace_all(text, "")
    } else {
        Cow::Borrowed(text)
    }
}

/// Strips markup and case-folds, producing the form every comparison uses.
pub fn fold(text: &str) -> String {
    strip_markup(text).to_lowercase()
}
