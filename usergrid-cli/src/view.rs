//! Plain-text rendering of a grid snapshot.

use std::fmt::Write;

use usergrid_lib::grid::GridSnapshot;
use usergrid_lib::model::ColumnKey;
use usergrid_lib::model::RecordDetail;
use usergrid_lib::model::field_value;

use crate::commands::direction_marker;

/// Pixels per terminal cell when mapping column widths to characters.
const PX_PER_CELL: u32 = 8;

fn cells(width_px: u32) -> usize {
    (width_px / PX_PER_CELL).max(3) as usize
}

/// Pads or cuts `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        format!("{}{}", text, " ".repeat(width - count))
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

/// Renders the table, footer and any open record.
pub fn render(snapshot: &GridSnapshot) -> String {
    let mut out = String::new();
    let widths: Vec<(ColumnKey, usize)> = ColumnKey::ALL
        .into_iter()
        .map(|key| {
            let px = snapshot.column_widths.get(&key).copied().unwrap_or_default();
            (key, cells(px))
        })
        .collect();

    let header: Vec<String> = widths
        .iter()
        .map(|(key, width)| {
            let marker = match (snapshot.sort.key(), snapshot.sort.order()) {
                (Some(sorted), Some(direction)) if sorted == *key => direction_marker(direction),
                _ => "",
            };
            fit(&format!("{}{}", key.label(), marker), *width)
        })
        .collect();
    let _ = writeln!(out, "{}", header.join(" | ").trim_end());

    let active: Vec<String> = widths
        .iter()
        .map(|(key, width)| fit(snapshot.filters.get(*key), *width))
        .collect();
    if snapshot.filters.is_active() {
        let _ = writeln!(out, "{}", active.join(" | ").trim_end());
    }

    let rule: Vec<String> = widths.iter().map(|(_, width)| "-".repeat(*width)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));

    if snapshot.rows.is_empty() && !snapshot.loading {
        let _ = writeln!(out, "(no records)");
    }
    for user in &snapshot.rows {
        let cells: Vec<String> = widths
            .iter()
            .map(|(key, width)| fit(&field_value(user, *key), *width))
            .collect();
        let _ = writeln!(out, "{}", cells.join(" | ").trim_end());
    }

    let _ = writeln!(
        out,
        "page {}/{} | {} records | {} per page{}{}",
        snapshot.page,
        snapshot.total_pages,
        snapshot.total,
        snapshot.page_size,
        if snapshot.can_prev { " | prev" } else { "" },
        if snapshot.can_next { " | next" } else { "" },
    );
    if snapshot.loading {
        let _ = writeln!(out, "loading...");
    }
    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "error: {}", error);
    }
    if let Some(detail) = &snapshot.selected {
        out.push_str(&render_detail(detail));
    }
    out
}

/// Renders one record as a label/value list.
pub fn render_detail(detail: &RecordDetail) -> String {
    let mut out = String::new();
    let label_width = detail
        .fields
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or_default();

    let _ = writeln!(out, "\n#{} {}", detail.id, detail.title);
    for (label, value) in &detail.fields {
        let _ = writeln!(out, "  {}  {}", fit(label, label_width), value);
    }
    out
}
