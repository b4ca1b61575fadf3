//! SQL fragment generation.

use crate::filter::Filter;
use crate::order::OrderStack;

/// Converts a `Filter` to a SQL boolean expression.
///
/// Matching is case-insensitive through `LOWER`, with LIKE wildcards in
/// the user's text escaped. Field keys are emitted verbatim.
pub fn filter_to_sql(filter: &Filter) -> String {
    match filter {
        Filter::Contains(field, term) => like(&field.key, &format!("%{}%", escape_like(term))),
        Filter::StartsWith(field, prefix) => like(&field.key, &format!("{}%", escape_like(prefix))),
        Filter::And(filters) => join(filters, " AND ", "1=1"),
        Filter::Or(filters) => join(filters, " OR ", "1=0"),
    }
}

fn like(field: &str, pattern: &str) -> String {
    format!("LOWER({}) LIKE {} ESCAPE '\\'", field, escape_string(pattern))
}

fn join(filters: &[Filter], separator: &str, empty: &str) -> String {
    if filters.is_empty() {
        return empty.to_string();
    }
    let parts: Vec<_> = filters.iter().map(filter_to_sql).collect();
    format!("({})", parts.join(separator))
}

/// Converts an `OrderStack` to an `ORDER BY` clause.
///
/// Every entry is emitted in priority order, after `forced` when given.
/// Returns an empty string when there is nothing to order by.
pub fn order_to_sql(order: &OrderStack, forced: Option<&str>) -> String {
    let forced = forced
        .map(|f| f.trim().trim_matches(',').trim())
        .filter(|f| !f.is_empty());
    let parts: Vec<String> = forced
        .map(str::to_string)
        .into_iter()
        .chain(
            order
                .entries()
                .iter()
                .map(|e| format!("{} {}", e.key, e.direction.as_sql())),
        )
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!("ORDER BY {}", parts.join(", "))
    }
}

/// Lowercases text and escapes `\`, `%` and `_` for a LIKE pattern.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Quotes a string literal, doubling internal single quotes.
pub fn escape_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
