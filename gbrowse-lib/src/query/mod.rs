//! Query augmentation path.
//!
//! Instead of handing every row to the browser, a caller can hand it a
//! [`QueryTemplate`]. The browser fills in the search predicate, appends the
//! order clause and asks a [`RowSource`] for exactly one page.
//!
//! - [`sql`] - rendering of [`Filter`] and [`OrderStack`] as SQL fragments
//! - [`SqliteSource`] - a [`RowSource`] over a rusqlite connection

pub mod sql;
mod sqlite;

pub use sqlite::SqliteSource;

use crate::error::SourceError;
use crate::filter::Filter;
use crate::model::Cell;
use crate::order::OrderStack;

/// Placeholder replaced by the search predicate in both templates.
pub const WHERE_PLACEHOLDER: &str = "{where}";

/// A select query and its count query.
///
/// Both may contain `{where}`, which is replaced by the current search
/// predicate, or `1=1` when nothing is searched.
///
/// # Example
///
/// ```
/// use gbrowse_lib::query::QueryTemplate;
///
/// let template = QueryTemplate::new(
///     "SELECT name, city FROM contacts WHERE {where}",
///     "SELECT COUNT(*) FROM contacts WHERE {where}",
/// )
/// .forced_order("pinned DESC");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTemplate {
    pub select: String,
    pub count: String,
    /// Order fragment that always leads the order clause.
    pub forced_order: Option<String>,
}

impl QueryTemplate {
    pub fn new(select: impl Into<String>, count: impl Into<String>) -> Self {
        Self {
            select: select.into(),
            count: count.into(),
            forced_order: None,
        }
    }

    /// Sets an order fragment that precedes the user's order.
    pub fn forced_order(mut self, order: impl Into<String>) -> Self {
        self.forced_order = Some(order.into());
        self
    }

    /// The count query with the predicate filled in.
    pub fn count_sql(&self, filter: Option<&Filter>) -> String {
        substitute(&self.count, filter)
    }

    /// The select query with the predicate filled in and order appended.
    ///
    /// Limit and offset are left to the row source.
    pub fn select_sql(&self, filter: Option<&Filter>, order: &OrderStack) -> String {
        let select = substitute(&self.select, filter);
        let order = sql::order_to_sql(order, self.forced_order.as_deref());
        if order.is_empty() {
            select
        } else {
            format!("{} {}", select, order)
        }
    }
}

fn substitute(template: &str, filter: Option<&Filter>) -> String {
    let clause = filter.map_or_else(|| "1=1".to_string(), sql::filter_to_sql);
    template.replace(WHERE_PLACEHOLDER, &clause)
}

/// An external source of rows, called synchronously.
///
/// Timeouts and cancellation belong to the implementation.
pub trait RowSource {
    /// Runs a count query and returns the number of matching rows.
    fn count(&mut self, sql: &str) -> Result<usize, SourceError>;

    /// Runs `sql` and returns at most `limit` rows starting at `offset`,
    /// one cell per result column.
    fn fetch(&mut self, sql: &str, limit: usize, offset: usize) -> Result<Vec<Vec<Cell>>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Direction;
    use crate::order::OrderEntry;

    #[test]
    fn test_placeholder_without_filter() {
        let template = QueryTemplate::new("SELECT a FROM t WHERE {where}", "SELECT COUNT(*) FROM t WHERE {where}");
        assert_eq!(template.count_sql(None), "SELECT COUNT(*) FROM t WHERE 1=1");
        assert_eq!(
            template.select_sql(None, &OrderStack::default()),
            "SELECT a FROM t WHERE 1=1"
        );
    }

    #[test]
    fn test_select_with_filter_and_order() {
        let template = QueryTemplate::new("SELECT a FROM t WHERE {where}", "").forced_order("pinned DESC");
        let order = OrderStack::new([
            OrderEntry::new("A", "a", Direction::Desc),
            OrderEntry::new("B", "b", Direction::Asc),
        ]);
        let filter = Filter::contains("a", "x");
        assert_eq!(
            template.select_sql(Some(&filter), &order),
            r"SELECT a FROM t WHERE LOWER(a) LIKE '%x%' ESCAPE '\' ORDER BY pinned DESC, a DESC, b ASC"
        );
    }
}
