//! Cell values

use serde::Deserialize;
use serde::Serialize;

/// A single cell as submitted by the caller.
///
/// A cell is either a plain display string or a [`RichCell`] carrying a
/// separate comparison value and presentation hints. Every cell is
/// normalized to a `RichCell` when a row is added.
///
/// # Example
///
/// ```
/// use gbrowse_lib::model::{Cell, RichCell};
///
/// let plain = Cell::from("Alice");
/// let dated = Cell::from(RichCell::new("3 Jan 2024").order_value("2024-01-03"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Rendered as-is and compared by its own text.
    Scalar(String),
    /// Structured value with optional comparison value and hints.
    Rich(RichCell),
}

impl Cell {
    /// Converts this cell into its normalized form.
    pub fn into_rich(self) -> RichCell {
        match self {
            Cell::Scalar(value) => RichCell::new(value),
            Cell::Rich(rich) => rich,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Scalar(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Scalar(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Scalar(value.to_string())
    }
}

impl From<RichCell> for Cell {
    fn from(value: RichCell) -> Self {
        Cell::Rich(value)
    }
}

/// Normalized cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichCell {
    /// Display value, may contain markup.
    pub value: String,
    /// Value used for ordering instead of `value`.
    #[serde(default)]
    pub order_value: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    /// Extra attributes handed to the renderer verbatim.
    #[serde(default)]
    pub attributes: Option<String>,
    /// Placeholder cell that the renderer keeps invisible.
    #[serde(default)]
    pub hidden: bool,
    /// Whether the renderer may clip the value into an overflow box.
    #[serde(default = "default_overflow")]
    pub overflow: bool,
}

fn default_overflow() -> bool {
    true
}

impl RichCell {
    /// Creates a cell showing `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            order_value: None,
            style: None,
            class: None,
            attributes: None,
            hidden: false,
            overflow: true,
        }
    }

    /// Sets the value used for ordering.
    pub fn order_value(mut self, order_value: impl Into<String>) -> Self {
        self.order_value = Some(order_value.into());
        self
    }

    /// Sets an inline style hint.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Sets a class hint.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Sets extra attributes.
    pub fn attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = Some(attributes.into());
        self
    }

    /// Marks the cell as a hidden placeholder.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Disables the overflow box, letting the value wrap.
    pub fn wrap(mut self) -> Self {
        self.overflow = false;
        self
    }

    /// The text ordering is based on, before pattern extraction.
    pub fn sort_source(&self) -> &str {
        self.order_value.as_deref().unwrap_or(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_normalizes_to_plain_rich() {
        let rich = Cell::from("bob").into_rich();
        assert_eq!(rich, RichCell::new("bob"));
        assert!(rich.overflow);
    }

    #[test]
    fn test_order_value_preferred() {
        let rich = RichCell::new("<b>March</b>").order_value("03");
        assert_eq!(rich.sort_source(), "03");
        assert_eq!(RichCell::new("x").sort_source(), "x");
    }

    #[test]
    fn test_deserialize_mixed_cells() {
        let cells: Vec<Cell> =
            serde_json::from_str(r#"["Alice", {"value": "Bob", "order_value": "b"}]"#).unwrap();
        assert_eq!(cells[0], Cell::from("Alice"));
        assert_eq!(cells[1], Cell::from(RichCell::new("Bob").order_value("b")));
    }
}
