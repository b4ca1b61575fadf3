//! In-memory ordering.

use crate::filter::fold;
use crate::model::ColumnRegistry;
use crate::model::RichCell;
use crate::model::Row;

use super::Direction;
use super::OrderStack;

/// Comparison text of `cell` in the column at `position`.
///
/// Takes the order value when present, keeps only the first capture group
/// of the column's order pattern (empty when it does not match), then strips
/// markup and case-folds.
pub fn sort_key(registry: &ColumnRegistry, position: usize, cell: &RichCell) -> String {
    let source = cell.sort_source();
    let extracted = match registry.pattern(position) {
        Some(pattern) => pattern
            .captures(source)
            .and_then(|caps| caps.get(1))
            .map_or("", |m| m.as_str()),
        None => source,
    };
    fold(extracted)
}

/// Sorts rows by the primary entry of `stack`.
///
/// The sort is stable and ascending by string comparison; a descending
/// entry reverses the whole ascending result. Secondary entries do not
/// break ties. Rows are left in input order when the stack is empty or its
/// primary key belongs to no column.
pub fn apply_order(registry: &ColumnRegistry, stack: &OrderStack, rows: &mut [Row]) {
    let Some(top) = stack.top() else { return };
    let Some(position) = registry.order_position(&top.key) else {
        log::debug!("order key '{}' has no column, rows left unsorted", top.key);
        return;
    };

    rows.sort_by_cached_key(|row| {
        row.cell(position)
            .map(|cell| sort_key(registry, position, cell))
            .unwrap_or_default()
    });
    if top.direction == Direction::Desc {
        rows.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;
    use crate::model::Column;
    use crate::order::OrderEntry;

    fn registry() -> ColumnRegistry {
        ColumnRegistry::new(vec![
            Column::new("Name").order("name"),
            Column::new("Ref").order("ref").order_pattern(r"#(\d+)"),
        ])
        .unwrap()
    }

    fn rows(data: &[(&str, Cell)]) -> Vec<Row> {
        data.iter()
            .enumerate()
            .map(|(i, (name, reference))| {
                Row::new(i, vec![Cell::from(*name).into_rich(), reference.clone().into_rich()])
            })
            .collect()
    }

    fn indexes(rows: &[Row]) -> Vec<usize> {
        rows.iter().map(Row::index).collect()
    }

    fn stack(key: &str, direction: Direction) -> OrderStack {
        OrderStack::new([OrderEntry::new("x", key, direction)])
    }

    #[test]
    fn test_ascending_case_insensitive_markup_free() {
        let registry = registry();
        let mut data = rows(&[
            ("<b>charlie</b>", Cell::from("")),
            ("Bravo", Cell::from("")),
            ("alpha", Cell::from("")),
        ]);
        apply_order(&registry, &stack("name", Direction::Asc), &mut data);
        assert_eq!(indexes(&data), [2, 1, 0]);
    }

    #[test]
    fn test_descending_reverses_stable_result() {
        let registry = registry();
        let mut data = rows(&[
            ("b", Cell::from("1")),
            ("a", Cell::from("2")),
            ("b", Cell::from("3")),
        ]);
        apply_order(&registry, &stack("name", Direction::Desc), &mut data);
        assert_eq!(indexes(&data), [2, 0, 1]);
    }

    #[test]
    fn test_pattern_and_order_value() {
        let registry = registry();
        let mut data = rows(&[
            ("x", Cell::from("ticket #7")),
            ("y", Cell::from(RichCell::new("first").order_value("ticket #1"))),
            ("z", Cell::from("no number")),
        ]);
        apply_order(&registry, &stack("ref", Direction::Asc), &mut data);
        assert_eq!(indexes(&data), [2, 1, 0]);
    }

    #[test]
    fn test_unknown_key_leaves_input_order() {
        let registry = registry();
        let mut data = rows(&[("b", Cell::from("")), ("a", Cell::from(""))]);
        apply_order(&registry, &stack("raw_sql_key", Direction::Asc), &mut data);
        assert_eq!(indexes(&data), [0, 1]);
        apply_order(&registry, &OrderStack::default(), &mut data);
        assert_eq!(indexes(&data), [0, 1]);
    }
}
