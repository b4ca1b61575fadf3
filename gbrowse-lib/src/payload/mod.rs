//! The semantic render payload handed to renderers.
//!
//! Nothing here is markup. Renderers decide how headers, links and rows
//! look; the payload only says what is there.

mod assemble;

pub(crate) use assemble::*;

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::filter::QuickJump;
use crate::model::RowAction;
use crate::model::Width;
use crate::order::Direction;
use crate::page::PageAction;
use crate::page::Window;

/// Everything a renderer needs to draw one page of a browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledPayload {
    /// Instance name.
    pub id: String,
    /// Template the caller asked the renderer to use.
    pub template: Option<String>,
    pub custom_label: Option<String>,
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<RenderedRow>,
    pub summary: Summary,
    pub window: Window,
    pub links: PageLinks,
    pub page_picker: PagePicker,
    /// Page size selector, absent when the page size is forced.
    pub per_page: Option<PerPageChoice>,
    /// Current keyword, present iff some column is searchable.
    pub search: Option<String>,
    /// Present iff some column has a quick-jump key.
    pub quickjump: Option<QuickJumpBar>,
    /// Full order stack as text, when enabled in the config.
    pub order_history: Option<String>,
    /// Widest action set of any row, in slots.
    pub action_width: usize,
    /// Whether any row carries actions.
    pub actions_enabled: bool,
}

impl AssembledPayload {
    /// Serializes the payload for renderers outside the process.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A displayed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnHeader {
    pub name: String,
    pub width: Width,
    /// Clicking the header toggles the order.
    pub sortable: bool,
    /// Set on the primary order column only.
    pub sort: Option<Direction>,
    pub hint: Option<String>,
}

/// A row on the current page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedRow {
    /// Submission index of the row.
    pub index: usize,
    pub cells: Vec<RenderedCell>,
    /// Actions in display order.
    pub actions: Vec<RowAction>,
    pub attributes: Option<String>,
    pub scripts: Vec<String>,
    pub actions_enabled: bool,
}

/// A cell of a displayed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedCell {
    pub value: String,
    pub style: Option<String>,
    pub class: Option<String>,
    pub attributes: Option<String>,
    pub hint: Option<String>,
    pub hidden: bool,
    pub overflow: bool,
    /// The cell belongs to the quick-jump column.
    pub quickjump: bool,
}

/// Record count line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Summary {
    /// Rows `first..=last` of `total`, 1-based.
    Records { first: usize, last: usize, total: usize },
    /// Nothing matched.
    NoRecords,
    /// Nothing matched and the message is disabled.
    Empty,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Summary::Records { first, last, total } => {
                write!(f, "Records {} to {} of {}", first, last, total)
            }
            Summary::NoRecords => f.write_str("No records found"),
            Summary::Empty => Ok(()),
        }
    }
}

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub action: PageAction,
    pub label: String,
}

/// First/prev/next/last links, each present only when it leads somewhere.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageLinks {
    pub first: Option<NavLink>,
    pub prev: Option<NavLink>,
    pub next: Option<NavLink>,
    pub last: Option<NavLink>,
}

/// Page selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PagePicker {
    /// Enumerated pages, used up to the picker threshold.
    Choices { pages: Vec<usize>, current: usize },
    /// Free numeric input accepting `1..=max`.
    Range { max: usize, current: usize },
}

/// Page size selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerPageChoice {
    pub choices: Vec<usize>,
    pub selected: usize,
}

/// Quick-jump index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickJumpBar {
    pub active: QuickJump,
    /// "All", "123", then "A" to "Z".
    pub links: Vec<QuickJumpLink>,
}

/// One entry of the quick-jump index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickJumpLink {
    pub label: String,
    pub target: QuickJump,
    /// `false` for the active target, which is shown as a plain label.
    pub link: bool,
}
