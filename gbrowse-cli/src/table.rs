//! Plain text rendering of a payload.

use std::fmt::Write;

use gbrowse_lib::AssembledPayload;
use gbrowse_lib::filter::strip_markup;
use gbrowse_lib::order::Direction;
use gbrowse_lib::payload::PagePicker;
use unicode_width::UnicodeWidthStr;

const GAP: &str = "  ";

/// Renders `payload` as an aligned text table with its navigation lines.
pub fn render(payload: &AssembledPayload) -> String {
    let mut headers: Vec<String> = payload
        .columns
        .iter()
        .map(|c| match c.sort {
            Some(Direction::Asc) => format!("{} ▲", c.name),
            Some(Direction::Desc) => format!("{} ▼", c.name),
            None => c.name.clone(),
        })
        .collect();

    let mut body: Vec<Vec<String>> = payload
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| if cell.hidden { String::new() } else { strip_markup(&cell.value).into_owned() })
                .collect()
        })
        .collect();

    if payload.actions_enabled {
        headers.push("Actions".to_string());
        for (cells, row) in body.iter_mut().zip(&payload.rows) {
            let actions = if row.actions_enabled {
                row.actions
                    .iter()
                    .filter(|a| !a.disabled)
                    .map(|a| a.label.as_str())
                    .collect::<Vec<_>>()
                    .join(" | ")
            } else {
                String::new()
            };
            cells.push(actions);
        }
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    if let Some(label) = &payload.custom_label {
        let _ = writeln!(out, "{}", label);
    }
    if let Some(keyword) = &payload.search {
        let _ = writeln!(out, "Search: {}", keyword);
    }
    if let Some(history) = &payload.order_history {
        let _ = writeln!(out, "Order: {}", history);
    }

    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &body {
        push_line(&mut out, row, &widths);
    }

    let summary = payload.summary.to_string();
    if !summary.is_empty() {
        let _ = writeln!(out, "{}", summary);
    }
    let _ = writeln!(out, "{}", navigation(payload));

    if let Some(choice) = &payload.per_page {
        let sizes: Vec<String> = choice
            .choices
            .iter()
            .map(|&n| if n == choice.selected { format!("[{}]", n) } else { n.to_string() })
            .collect();
        let _ = writeln!(out, "Per page: {}", sizes.join(" "));
    }
    if let Some(bar) = &payload.quickjump {
        let links: Vec<String> = bar
            .links
            .iter()
            .map(|l| if l.link { l.label.clone() } else { format!("[{}]", l.label) })
            .collect();
        let _ = writeln!(out, "Jump: {}", links.join(" "));
        if bar.active.is_active() {
            if let Some(current) = bar.links.iter().find(|l| l.target == bar.active) {
                let _ = writeln!(out, "Showing {} only", current.label);
            }
        }
    }
    out
}

fn navigation(payload: &AssembledPayload) -> String {
    let links = &payload.links;
    let mut parts: Vec<String> = [&links.first, &links.prev]
        .into_iter()
        .flatten()
        .map(|l| format!("<{}>", l.label))
        .collect();
    parts.push(match &payload.page_picker {
        PagePicker::Choices { pages, current } => format!("page {} of {}", current, pages.len()),
        PagePicker::Range { max, current } => format!("page {} of {} (--page 1..{})", current, max, max),
    });
    parts.extend(
        [&links.next, &links.last]
            .into_iter()
            .flatten()
            .map(|l| format!("<{}>", l.label)),
    );
    parts.join(" ")
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(GAP);
        }
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
