//! Row actions

use serde::Deserialize;
use serde::Serialize;

/// Kind of a row action, which also fixes its default position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    View,
    Edit,
    Delete,
    Info,
    Custom(String),
}

impl ActionKind {
    /// Maps an icon name to its kind; unknown names become `Custom`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "view" => ActionKind::View,
            "edit" => ActionKind::Edit,
            "delete" => ActionKind::Delete,
            "info" => ActionKind::Info,
            other => ActionKind::Custom(other.to_string()),
        }
    }

    /// Position used unless the action overrides it. Lower sorts first.
    pub fn default_priority(&self) -> i32 {
        match self {
            ActionKind::View => -3,
            ActionKind::Edit => -2,
            ActionKind::Delete => -1,
            ActionKind::Info => 1000,
            ActionKind::Custom(_) => 0,
        }
    }
}

/// An action attached to a row, carried with it through filtering and
/// sorting.
///
/// # Example
///
/// ```
/// use gbrowse_lib::model::{ActionKind, RowAction};
///
/// let edit = RowAction::new(ActionKind::Edit, "Edit").attributes("href=\"/contacts/7/edit\"");
/// let pin = RowAction::new(ActionKind::from_name("pin"), "Pin").priority(-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowAction {
    pub kind: ActionKind,
    pub label: String,
    pub tooltip: Option<String>,
    /// Link attributes handed to the renderer verbatim.
    pub attributes: String,
    pub disabled: bool,
    /// Width in action slots.
    pub size: usize,
    pub priority: i32,
}

impl RowAction {
    /// Creates an action with the kind's default priority.
    pub fn new(kind: ActionKind, label: impl Into<String>) -> Self {
        let priority = kind.default_priority();
        Self {
            kind,
            label: label.into(),
            tooltip: None,
            attributes: String::new(),
            disabled: false,
            size: 1,
            priority,
        }
    }

    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = attributes.into();
        self
    }

    /// Shows the action greyed out.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Overrides the kind's default priority.
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Adds `action`, replacing an existing action of the same kind in place.
pub(crate) fn push_action(actions: &mut Vec<RowAction>, action: RowAction) {
    match actions.iter_mut().find(|a| a.kind == action.kind) {
        Some(existing) => *existing = action,
        None => actions.push(action),
    }
}

/// Orders actions by priority, keeping insertion order for ties.
pub fn sort_actions(actions: &mut [RowAction]) {
    actions.sort_by_key(|a| a.priority);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(actions: &[RowAction]) -> Vec<&str> {
        actions.iter().map(|a| a.label.as_str()).collect()
    }

    #[test]
    fn test_fixed_priorities() {
        let mut actions = vec![
            RowAction::new(ActionKind::Info, "Info"),
            RowAction::new(ActionKind::from_name("print"), "Print"),
            RowAction::new(ActionKind::Delete, "Delete"),
            RowAction::new(ActionKind::View, "View"),
            RowAction::new(ActionKind::Edit, "Edit"),
        ];
        sort_actions(&mut actions);
        assert_eq!(labels(&actions), ["View", "Edit", "Delete", "Print", "Info"]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut actions = vec![
            RowAction::new(ActionKind::from_name("b"), "B"),
            RowAction::new(ActionKind::from_name("a"), "A"),
            RowAction::new(ActionKind::from_name("c"), "C").priority(-5),
        ];
        sort_actions(&mut actions);
        assert_eq!(labels(&actions), ["C", "B", "A"]);
    }

    #[test]
    fn test_same_kind_replaces() {
        let mut actions = Vec::new();
        push_action(&mut actions, RowAction::new(ActionKind::Edit, "Edit"));
        push_action(&mut actions, RowAction::new(ActionKind::View, "View"));
        push_action(&mut actions, RowAction::new(ActionKind::Edit, "Modify"));
        assert_eq!(labels(&actions), ["Modify", "View"]);
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(ActionKind::from_name(" Edit "), ActionKind::Edit);
        assert_eq!(ActionKind::from_name("Pin"), ActionKind::Custom("pin".into()));
    }
}
