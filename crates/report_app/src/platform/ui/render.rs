use report_core::{display_value, SortDirection, WidgetView};
use serde_json::{json, Value};

use super::constants::*;

/// One-line progress summary for stderr.
pub fn status_line(view: &WidgetView) -> String {
    let session = view
        .session
        .map_or_else(|| "-".to_string(), |session| session.to_string());
    if view.show_spinner {
        let instance = view.instance_id.as_deref().unwrap_or("launching");
        let status = view
            .last_status
            .as_ref()
            .map_or("-", |status| status.as_str());
        return format!(
            "{SPINNER_TEXT} session {session} | job {instance} | status {status} | checks {}",
            view.attempts
        );
    }
    if view.show_data {
        return format!("Session {session} | {} rows", view.rows.len());
    }
    match view.failure_kind {
        Some(kind) => format!("Session {session} | {kind}"),
        None => format!("Session {session}"),
    }
}

/// Rows that fit in the configured container height.
pub fn visible_rows(height: u32) -> usize {
    (height / ROW_HEIGHT_PX).saturating_sub(HEADER_LINES).max(1) as usize
}

pub fn render_text(view: &WidgetView) -> Vec<String> {
    let mut lines = Vec::new();

    if view.show_spinner {
        lines.push(SPINNER_TEXT.to_string());
        return lines;
    }
    if !view.error_text.is_empty() {
        // Without the banner the text is shown plain, like an inline message.
        if view.show_error {
            lines.push(format!("ERROR: {}", view.error_text));
        } else {
            lines.push(view.error_text.clone());
        }
    }
    if !view.show_data {
        return lines;
    }
    if view.columns.is_empty() {
        lines.push("(no rows)".to_string());
        return lines;
    }

    let headers: Vec<String> = view
        .columns
        .iter()
        .map(|column| header_label(view, column))
        .collect();
    let cap = visible_rows(view.height);
    let body: Vec<Vec<String>> = view
        .rows
        .iter()
        .take(cap)
        .map(|row| {
            view.columns
                .iter()
                .map(|column| truncate(&display_value(row.get(column))))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            body.iter()
                .map(|cells| cells[idx].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    lines.push(join_cells(&headers, &widths));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for cells in &body {
        lines.push(join_cells(cells, &widths));
    }
    if view.rows.len() > cap {
        lines.push(format!("... {} more rows", view.rows.len() - cap));
    }
    lines
}

pub fn render_json(view: &WidgetView) -> Value {
    json!({
        "showSpinner": view.show_spinner,
        "showData": view.show_data,
        "showError": view.show_error,
        "error": view.error_text,
        "sortedBy": view.sorted_by,
        "sortDirection": view.sort_direction.map(SortDirection::as_token),
        "componentStyle": view.component_style,
        "metadata": view.metadata,
        "customValues": view.rows,
    })
}

fn header_label(view: &WidgetView, column: &str) -> String {
    let marker = match (&view.sorted_by, view.sort_direction) {
        (Some(field), Some(SortDirection::Ascending)) if field == column => SORT_ASC_MARKER,
        (Some(field), Some(SortDirection::Descending)) if field == column => SORT_DESC_MARKER,
        _ => "",
    };
    format!("{column}{marker}")
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}

fn join_cells(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
