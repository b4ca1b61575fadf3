//! Keyword search and quick-jump filtering.
//!
//! Both predicates compile into one [`Filter`] description over opaque field
//! keys. The in-memory path evaluates it with [`Filter::matches`]; the query
//! path renders it with [`crate::query::sql::filter_to_sql`]. What counts as
//! a match is decided here once.

mod markup;
mod quickjump;

pub use markup::*;
pub use quickjump::*;

use serde::Deserialize;
use serde::Serialize;

use crate::model::ColumnRegistry;
use crate::model::Row;

/// A field key, optionally bound to the column whose cell holds it.
///
/// Several columns may share a key in different roles (one sorts by it,
/// another searches it). Predicates built from the registry are bound so the
/// in-memory path reads the searching column's own cell; the query path only
/// uses the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub key: String,
    pub column: Option<usize>,
}

impl Field {
    /// An unbound key, resolved through the registry when evaluated.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            column: None,
        }
    }

    /// A key read from the column at `column`.
    pub fn at(column: usize, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            column: Some(column),
        }
    }
}

impl From<&str> for Field {
    fn from(key: &str) -> Self {
        Field::new(key)
    }
}

impl From<String> for Field {
    fn from(key: String) -> Self {
        Field::new(key)
    }
}

/// A filter condition over field keys.
///
/// Matching is case-insensitive and ignores markup in the cell text.
///
/// # Example
///
/// ```
/// use gbrowse_lib::filter::Filter;
///
/// let filter = Filter::or([Filter::contains("name", "an"), Filter::contains("email", "an")])
///     .and_also(Filter::starts_with("name", "A"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    /// Field contains the term.
    Contains(Field, String),
    /// Field starts with the prefix.
    StartsWith(Field, String),
    /// All filters hold. Empty means true.
    And(Vec<Filter>),
    /// Any filter holds. Empty means false.
    Or(Vec<Filter>),
}

impl Filter {
    /// Creates a contains filter.
    pub fn contains(field: impl Into<Field>, term: impl Into<String>) -> Self {
        Filter::Contains(field.into(), term.into())
    }

    /// Creates a starts-with filter.
    pub fn starts_with(field: impl Into<Field>, prefix: impl Into<String>) -> Self {
        Filter::StartsWith(field.into(), prefix.into())
    }

    /// Creates a logical AND of multiple filters.
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And(filters.into_iter().collect())
    }

    /// Creates a logical OR of multiple filters.
    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Or(filters.into_iter().collect())
    }

    /// Combines this filter with another using logical AND.
    pub fn and_also(self, other: Filter) -> Self {
        match self {
            Filter::And(mut filters) => {
                filters.push(other);
                Filter::And(filters)
            }
            _ => Filter::And(vec![self, other]),
        }
    }

    /// Evaluates the filter, looking field text up through `text_of`.
    ///
    /// A field that `text_of` cannot resolve never matches.
    pub fn matches<F>(&self, text_of: &F) -> bool
    where
        F: Fn(&Field) -> Option<String>,
    {
        match self {
            Filter::Contains(field, term) => text_of(field)
                .is_some_and(|text| fold(&text).contains(&term.to_lowercase())),
            Filter::StartsWith(field, prefix) => text_of(field)
                .is_some_and(|text| fold(&text).starts_with(&prefix.to_lowercase())),
            Filter::And(filters) => filters.iter().all(|f| f.matches(text_of)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(text_of)),
        }
    }

    /// Evaluates the filter against a row.
    ///
    /// A bound field reads its own column; an unbound key reads the first
    /// column referring to it.
    pub fn matches_row(&self, registry: &ColumnRegistry, row: &Row) -> bool {
        self.matches(&|field: &Field| {
            field
                .column
                .or_else(|| registry.field_position(&field.key))
                .and_then(|position| row.cell(position))
                .map(|cell| cell.value.clone())
        })
    }
}

/// Builds the keyword predicate.
///
/// Returns `None` when every row matches: no keyword, or no searchable
/// column. With `split`, every whitespace separated word must occur in the
/// same column.
pub fn keyword_filter(registry: &ColumnRegistry, keyword: &str, split: bool) -> Option<Filter> {
    if keyword.is_empty() || !registry.has_search() {
        return None;
    }

    let words: Vec<&str> = if split {
        keyword.split_whitespace().collect()
    } else {
        vec![keyword]
    };
    if words.is_empty() {
        return None;
    }

    let per_column = registry.columns().iter().enumerate().filter_map(|(position, column)| {
        let key = column.search_key()?;
        Some(match words.as_slice() {
            [word] => Filter::contains(Field::at(position, key), *word),
            _ => Filter::and(
                words
                    .iter()
                    .map(|word| Filter::contains(Field::at(position, key), *word)),
            ),
        })
    });
    Some(Filter::or(per_column))
}

/// Builds the quick-jump predicate. `None` when no target is active.
pub fn quickjump_filter(registry: &ColumnRegistry, target: QuickJump) -> Option<Filter> {
    let prefixes = target.prefixes();
    if prefixes.is_empty() || !registry.has_quickjump() {
        return None;
    }

    let per_column = registry.columns().iter().enumerate().filter_map(|(position, column)| {
        let key = column.quickjump_key()?;
        Some(match prefixes.as_slice() {
            [prefix] => Filter::starts_with(Field::at(position, key), prefix.to_string()),
            _ => Filter::or(
                prefixes
                    .iter()
                    .map(|p| Filter::starts_with(Field::at(position, key), p.to_string())),
            ),
        })
    });
    Some(Filter::and(per_column))
}

/// Combines keyword and quick-jump predicates.
pub fn search_filter(
    registry: &ColumnRegistry,
    keyword: Option<&str>,
    target: QuickJump,
    split: bool,
) -> Option<Filter> {
    let keyword = keyword.and_then(|k| keyword_filter(registry, k, split));
    let quickjump = quickjump_filter(registry, target);
    match (keyword, quickjump) {
        (Some(k), Some(q)) => Some(k.and_also(q)),
        (k, q) => k.or(q),
    }
}

/// True iff `row` passes the keyword predicate.
pub fn keyword_matches(registry: &ColumnRegistry, row: &Row, keyword: &str, split: bool) -> bool {
    keyword_filter(registry, keyword, split).is_none_or(|f| f.matches_row(registry, row))
}

/// True iff `row` passes the quick-jump predicate.
pub fn quickjump_matches(registry: &ColumnRegistry, row: &Row, target: QuickJump) -> bool {
    quickjump_filter(registry, target).is_none_or(|f| f.matches_row(registry, row))
}
