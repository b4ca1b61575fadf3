//! Column descriptors and the per-instance column registry.

use std::collections::HashMap;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;

/// Relative width of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Width {
    /// Relative units, summed across columns by the renderer.
    Fixed(u32),
    /// Percentage of the table width.
    Percent(u32),
}

impl Default for Width {
    fn default() -> Self {
        Width::Fixed(100)
    }
}

/// Describes one table column.
///
/// `name` is both the user-visible label and the identity used by order
/// toggles. The keys are opaque field references: in query mode they are
/// column expressions of the backing query, in memory they only tie a
/// column to its role.
///
/// # Example
///
/// ```
/// use gbrowse_lib::model::{Column, Width};
///
/// let column = Column::new("Name")
///     .width(Width::Percent(40))
///     .search("name")
///     .order("name")
///     .quickjump("name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    width: Width,
    search_key: Option<String>,
    order_key: Option<String>,
    order_pattern: Option<String>,
    quickjump_key: Option<String>,
    hint: Option<String>,
    displayed: bool,
}

impl Column {
    /// Creates a displayed column with no keys.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: Width::default(),
            search_key: None,
            order_key: None,
            order_pattern: None,
            quickjump_key: None,
            hint: None,
            displayed: true,
        }
    }

    pub fn width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    /// Makes the column searchable by keyword through `key`.
    pub fn search(mut self, key: impl Into<String>) -> Self {
        self.search_key = Some(key.into());
        self
    }

    /// Makes the column sortable through `key`.
    pub fn order(mut self, key: impl Into<String>) -> Self {
        self.order_key = Some(key.into());
        self
    }

    /// Compares only the first capture group of `pattern` when sorting.
    ///
    /// The pattern is compiled when the column is registered.
    pub fn order_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.order_pattern = Some(pattern.into());
        self
    }

    /// Makes the column the quick-jump index through `key`.
    pub fn quickjump(mut self, key: impl Into<String>) -> Self {
        self.quickjump_key = Some(key.into());
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Keeps the column for ordering and search but does not display it.
    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width_value(&self) -> Width {
        self.width
    }

    pub fn search_key(&self) -> Option<&str> {
        self.search_key.as_deref()
    }

    pub fn order_key(&self) -> Option<&str> {
        self.order_key.as_deref()
    }

    pub fn quickjump_key(&self) -> Option<&str> {
        self.quickjump_key.as_deref()
    }

    pub fn hint_text(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn is_displayed(&self) -> bool {
        self.displayed
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::new(name)
    }
}

/// Immutable set of columns for one browser instance.
#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    columns: Vec<Column>,
    patterns: Vec<Option<Regex>>,
    fields: HashMap<String, usize>,
}

impl ColumnRegistry {
    /// Builds a registry, rejecting duplicate labels and bad order patterns.
    pub fn new(columns: Vec<Column>) -> Result<Self, ConfigError> {
        if columns.is_empty() {
            return Err(ConfigError::MissingColumns);
        }

        let mut patterns = Vec::with_capacity(columns.len());
        let mut fields = HashMap::new();
        for (position, column) in columns.iter().enumerate() {
            if columns[..position].iter().any(|c| c.name == column.name) {
                return Err(ConfigError::DuplicateColumn {
                    name: column.name.clone(),
                });
            }

            let pattern = column
                .order_pattern
                .as_deref()
                .map(Regex::new)
                .transpose()
                .map_err(|source| ConfigError::InvalidPattern {
                    column: column.name.clone(),
                    source,
                })?;
            patterns.push(pattern);

            for key in [&column.search_key, &column.order_key, &column.quickjump_key]
                .into_iter()
                .flatten()
            {
                fields.entry(key.clone()).or_insert(position);
            }
        }

        Ok(Self {
            columns,
            patterns,
            fields,
        })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the position of the column labelled `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Returns the column labelled `name`.
    pub fn get(&self, name: &str) -> Result<&Column, ConfigError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConfigError::unknown_column(name))
    }

    /// Resolves a label to its order key.
    pub fn order_key(&self, name: &str) -> Result<&str, ConfigError> {
        self.get(name)?
            .order_key()
            .ok_or_else(|| ConfigError::not_sortable(name))
    }

    /// Position of the first column that refers to field `key`.
    pub fn field_position(&self, key: &str) -> Option<usize> {
        self.fields.get(key).copied()
    }

    /// Position of the first column sorted by `key`.
    pub fn order_position(&self, key: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.order_key() == Some(key))
    }

    /// Compiled order pattern of the column at `position`.
    pub fn pattern(&self, position: usize) -> Option<&Regex> {
        self.patterns.get(position).and_then(Option::as_ref)
    }

    /// Columns carrying a search key.
    pub fn searchable(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.search_key.is_some())
    }

    /// Columns carrying a quick-jump key.
    pub fn quickjump_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.quickjump_key.is_some())
    }

    pub fn has_search(&self) -> bool {
        self.searchable().next().is_some()
    }

    pub fn has_quickjump(&self) -> bool {
        self.quickjump_columns().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ColumnRegistry {
        ColumnRegistry::new(vec![
            Column::new("Name").search("name").order("name").quickjump("name"),
            Column::new("Date").order("created").order_pattern(r"(\d{4}-\d{2}-\d{2})"),
            Column::new("Notes"),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_by_label() {
        let registry = registry();
        assert_eq!(registry.position("Date"), Some(1));
        assert_eq!(registry.order_key("Name").unwrap(), "name");
        assert!(matches!(
            registry.order_key("Notes"),
            Err(ConfigError::NotSortable { .. })
        ));
        assert!(matches!(
            registry.get("Missing"),
            Err(ConfigError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_field_positions() {
        let registry = registry();
        assert_eq!(registry.field_position("name"), Some(0));
        assert_eq!(registry.field_position("created"), Some(1));
        assert_eq!(registry.field_position("other"), None);
        assert!(registry.pattern(1).is_some());
        assert!(registry.pattern(0).is_none());
    }

    #[test]
    fn test_duplicate_label_rejected() {
        let result = ColumnRegistry::new(vec![Column::new("A"), Column::new("A")]);
        assert!(matches!(result, Err(ConfigError::DuplicateColumn { .. })));
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let result = ColumnRegistry::new(vec![Column::new("A").order("a").order_pattern("(")]);
        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert!(matches!(
            ColumnRegistry::new(Vec::new()),
            Err(ConfigError::MissingColumns)
        ));
    }
}
