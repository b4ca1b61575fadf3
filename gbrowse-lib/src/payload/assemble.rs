//! Derived display metadata.

use super::ColumnHeader;
use super::NavLink;
use super::PageLinks;
use super::PagePicker;
use super::QuickJumpBar;
use super::QuickJumpLink;
use super::RenderedCell;
use super::RenderedRow;
use super::Summary;
use crate::filter::QuickJump;
use crate::model::ColumnRegistry;
use crate::model::Row;
use crate::model::sort_actions;
use crate::order::OrderStack;
use crate::page::PageAction;
use crate::page::Window;

/// Headers of displayed columns, with the sort mark on the primary column.
pub(crate) fn column_headers(registry: &ColumnRegistry, order: &OrderStack) -> Vec<ColumnHeader> {
    let primary = order.top();
    registry
        .columns()
        .iter()
        .filter(|c| c.is_displayed())
        .map(|column| ColumnHeader {
            name: column.name().to_string(),
            width: column.width_value(),
            sortable: column.order_key().is_some(),
            sort: primary
                .filter(|entry| entry.column == column.name())
                .map(|entry| entry.direction),
            hint: column.hint_text().map(str::to_string),
        })
        .collect()
}

pub(crate) fn summary(window: &Window, show_no_records: bool) -> Summary {
    if window.total_rows > 0 {
        Summary::Records {
            first: window.offset + 1,
            last: window.end(),
            total: window.total_rows,
        }
    } else if show_no_records {
        Summary::NoRecords
    } else {
        Summary::Empty
    }
}

pub(crate) fn page_links(window: &Window) -> PageLinks {
    let link = |action, label: &str| NavLink {
        action,
        label: label.to_string(),
    };
    let back = window.has_previous();
    let forward = window.has_next();
    PageLinks {
        first: back.then(|| link(PageAction::First, "First")),
        prev: back.then(|| link(PageAction::Prev, "Prev")),
        next: forward.then(|| link(PageAction::Next, "Next")),
        last: forward.then(|| link(PageAction::Last, "Last")),
    }
}

pub(crate) fn page_picker(window: &Window, threshold: usize) -> PagePicker {
    let pages = window.page_count();
    if pages <= threshold {
        PagePicker::Choices {
            pages: (1..=pages).collect(),
            current: window.page(),
        }
    } else {
        PagePicker::Range {
            max: pages,
            current: window.page(),
        }
    }
}

pub(crate) fn quickjump_bar(active: QuickJump) -> QuickJumpBar {
    let entry = |label: String, target: QuickJump| QuickJumpLink {
        link: target != active,
        label,
        target,
    };

    let mut links = Vec::with_capacity(28);
    links.push(entry("All".to_string(), QuickJump::All));
    links.push(entry("123".to_string(), QuickJump::Digits));
    links.extend(('A'..='Z').map(|c| entry(c.to_string(), QuickJump::Letter(c))));
    QuickJumpBar { active, links }
}

/// Projects a row onto the displayed columns.
pub(crate) fn render_row(registry: &ColumnRegistry, row: &Row) -> RenderedRow {
    let cells = registry
        .columns()
        .iter()
        .zip(row.cells())
        .filter(|(column, _)| column.is_displayed())
        .map(|(column, cell)| RenderedCell {
            value: cell.value.clone(),
            style: cell.style.clone(),
            class: cell.class.clone(),
            attributes: cell.attributes.clone(),
            hint: column.hint_text().map(str::to_string),
            hidden: cell.hidden,
            overflow: cell.overflow,
            quickjump: column.quickjump_key().is_some(),
        })
        .collect();

    let mut actions = row.actions().to_vec();
    sort_actions(&mut actions);

    RenderedRow {
        index: row.index(),
        cells,
        actions,
        attributes: row.attributes().map(str::to_string),
        scripts: row.scripts().to_vec(),
        actions_enabled: row.actions_enabled(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use crate::order::Direction;
    use crate::order::OrderEntry;

    #[test]
    fn test_summary_text() {
        let window = Window::compute(5, 5, 7, None);
        assert_eq!(summary(&window, true).to_string(), "Records 6 to 7 of 7");
        let empty = Window::compute(0, 5, 0, None);
        assert_eq!(summary(&empty, true).to_string(), "No records found");
        assert_eq!(summary(&empty, false), Summary::Empty);
    }

    #[test]
    fn test_links_only_when_meaningful() {
        let links = page_links(&Window::compute(0, 5, 7, None));
        assert!(links.first.is_none() && links.prev.is_none());
        assert!(links.next.is_some() && links.last.is_some());

        let links = page_links(&Window::compute(5, 5, 7, None));
        assert!(links.first.is_some() && links.prev.is_some());
        assert!(links.next.is_none() && links.last.is_none());

        assert_eq!(page_links(&Window::compute(0, 5, 5, None)), PageLinks::default());
    }

    #[test]
    fn test_picker_threshold() {
        let window = Window::compute(0, 5, 125, None);
        assert_eq!(
            page_picker(&window, 25),
            PagePicker::Choices {
                pages: (1..=25).collect(),
                current: 1
            }
        );
        let window = Window::compute(125, 5, 126, None);
        assert_eq!(page_picker(&window, 25), PagePicker::Range { max: 26, current: 26 });
        let empty = Window::compute(0, 5, 0, None);
        assert_eq!(
            page_picker(&empty, 25),
            PagePicker::Choices {
                pages: vec![1],
                current: 1
            }
        );
    }

    #[test]
    fn test_quickjump_bar_marks_active() {
        let bar = quickjump_bar(QuickJump::Letter('C'));
        assert_eq!(bar.links.len(), 28);
        assert_eq!(bar.links[0].label, "All");
        assert!(bar.links[0].link);
        assert_eq!(bar.links[1].label, "123");
        let c = bar.links.iter().find(|l| l.label == "C").unwrap();
        assert!(!c.link);
        assert!(bar.links.iter().filter(|l| !l.link).count() == 1);

        let bar = quickjump_bar(QuickJump::All);
        assert!(!bar.links[0].link);
    }

    #[test]
    fn test_sort_mark_on_primary_only() {
        let registry = ColumnRegistry::new(vec![
            Column::new("Name").order("name"),
            Column::new("Date").order("date"),
            Column::new("Secret").order("s").hidden(),
        ])
        .unwrap();
        let order = OrderStack::new([
            OrderEntry::new("Date", "date", Direction::Desc),
            OrderEntry::new("Name", "name", Direction::Asc),
        ]);
        let headers = column_headers(&registry, &order);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].sort, None);
        assert_eq!(headers[1].sort, Some(Direction::Desc));
    }
}
