//! User navigation requests.

use serde::Deserialize;
use serde::Serialize;

use crate::filter::QuickJump;
use crate::page::PageAction;

/// One request's worth of user interaction with a browser.
///
/// All fields are optional; an empty request re-renders the current view.
///
/// # Example
///
/// ```
/// use gbrowse_lib::BrowserRequest;
/// use gbrowse_lib::page::PageAction;
///
/// let request = BrowserRequest::from_params([("next", "1"), ("change_order", "Name")]);
/// assert_eq!(request.page, Some(PageAction::Next));
/// assert_eq!(request.change_order.as_deref(), Some("Name"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserRequest {
    /// Label of a clicked column header.
    pub change_order: Option<String>,
    pub page: Option<PageAction>,
    /// Requested page size, honored only if allowed.
    pub per_page: Option<usize>,
    /// New keyword; an empty string clears the search.
    pub keyword: Option<String>,
    pub quickjump: Option<QuickJump>,
    /// Restore the default order.
    pub reset_order: bool,
}

impl BrowserRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses link and form parameters.
    ///
    /// Recognized keys: `change_order`, `first`, `prev`, `next`, `last`
    /// (value `1`), `page`, `per_page`, `search`, `quickjump_to` and
    /// `reset_order`. Unknown keys are ignored; unparseable values are
    /// dropped with a warning. When several page actions are present the
    /// first in the order first, prev, next, last, page wins.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = Self::default();
        let mut actions: Vec<PageAction> = Vec::new();

        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "change_order" if !value.is_empty() => request.change_order = Some(value.to_string()),
                "first" | "prev" | "next" | "last" if value == "1" => actions.push(match key {
                    "first" => PageAction::First,
                    "prev" => PageAction::Prev,
                    "next" => PageAction::Next,
                    _ => PageAction::Last,
                }),
                "page" => match value.trim().parse::<usize>() {
                    Ok(page) => actions.push(PageAction::Goto(page)),
                    Err(_) => log::warn!("ignoring non-numeric page '{}'", value),
                },
                "per_page" => match value.trim().parse::<usize>() {
                    Ok(size) => request.per_page = Some(size),
                    Err(_) => log::warn!("ignoring non-numeric per_page '{}'", value),
                },
                "search" => request.keyword = Some(value.trim().to_string()),
                "quickjump_to" => match QuickJump::from_param(value) {
                    Some(target) => request.quickjump = Some(target),
                    None => log::warn!("ignoring quick-jump target '{}'", value),
                },
                "reset_order" => request.reset_order = value == "1",
                _ => {}
            }
        }

        request.page = actions.into_iter().min_by_key(action_rank);
        request
    }

    /// Returns `true` if the request changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn toggle(mut self, label: impl Into<String>) -> Self {
        self.change_order = Some(label.into());
        self
    }

    pub fn page(mut self, action: PageAction) -> Self {
        self.page = Some(action);
        self
    }

    pub fn per_page(mut self, size: usize) -> Self {
        self.per_page = Some(size);
        self
    }

    pub fn search(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn quickjump(mut self, target: QuickJump) -> Self {
        self.quickjump = Some(target);
        self
    }

    pub fn reset_order(mut self) -> Self {
        self.reset_order = true;
        self
    }
}

fn action_rank(action: &PageAction) -> u8 {
    match action {
        PageAction::First => 0,
        PageAction::Prev => 1,
        PageAction::Next => 2,
        PageAction::Last => 3,
        PageAction::Goto(_) => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params() {
        let request = BrowserRequest::from_params(Vec::<(&str, &str)>::new());
        assert!(request.is_empty());
    }

    #[test]
    fn test_action_priority() {
        let request = BrowserRequest::from_params([("page", "3"), ("last", "1"), ("prev", "1")]);
        assert_eq!(request.page, Some(PageAction::Prev));
    }

    #[test]
    fn test_form_values() {
        let request = BrowserRequest::from_params([
            ("search", "  bob "),
            ("per_page", "10"),
            ("quickjump_to", "0"),
            ("reset_order", "1"),
            ("unrelated", "x"),
        ]);
        assert_eq!(request.keyword.as_deref(), Some("bob"));
        assert_eq!(request.per_page, Some(10));
        assert_eq!(request.quickjump, Some(QuickJump::Digits));
        assert!(request.reset_order);
    }

    #[test]
    fn test_bad_values_dropped() {
        let request = BrowserRequest::from_params([("page", "two"), ("per_page", "x"), ("quickjump_to", "??")]);
        assert!(request.is_empty());
    }
}
