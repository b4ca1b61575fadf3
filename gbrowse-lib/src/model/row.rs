//! Rows

use super::RichCell;
use super::RowAction;

/// A submitted row with everything that travels with it.
///
/// `index` is the submission position. It identifies the row's side
/// channels (actions, attributes, scripts) only because they are stored on
/// the row itself, so they survive filtering and sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub(crate) index: usize,
    pub(crate) cells: Vec<RichCell>,
    pub(crate) actions: Vec<RowAction>,
    pub(crate) attributes: Option<String>,
    pub(crate) scripts: Vec<String>,
    pub(crate) actions_enabled: bool,
}

impl Row {
    pub(crate) fn new(index: usize, cells: Vec<RichCell>) -> Self {
        Self {
            index,
            cells,
            actions: Vec::new(),
            attributes: None,
            scripts: Vec::new(),
            actions_enabled: true,
        }
    }

    /// Submission index within the current render cycle.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn cells(&self) -> &[RichCell] {
        &self.cells
    }

    pub fn cell(&self, position: usize) -> Option<&RichCell> {
        self.cells.get(position)
    }

    pub fn actions(&self) -> &[RowAction] {
        &self.actions
    }

    pub fn attributes(&self) -> Option<&str> {
        self.attributes.as_deref()
    }

    pub fn scripts(&self) -> &[String] {
        &self.scripts
    }

    pub fn actions_enabled(&self) -> bool {
        self.actions_enabled
    }

    /// Total width of the row's actions in slots.
    pub fn action_width(&self) -> usize {
        self.actions.iter().map(|a| a.size).sum()
    }
}
