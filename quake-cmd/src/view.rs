//! Plain-text and JSON renderings of the stores.

use anyhow::anyhow;
use quake_core::chart::{Axis, ChartField};
use quake_store::bridge::SelectionContext;
use quake_store::table::{SortDirection, SortSpec, TableColumn, TableState};

const MAX_CELL_WIDTH: usize = 40;

/// Build grid state from `--sort` and `--search`. A leading '-' on the sort
/// key means descending.
pub fn table_state(sort: Option<&str>, search: Option<&str>) -> anyhow::Result<TableState> {
    let mut state = TableState::new();
    if let Some(raw) = sort {
        let (key, direction) = match raw.strip_prefix('-') {
            Some(key) => (key, SortDirection::Descending),
            None => (raw, SortDirection::Ascending),
        };
        let column = key
            .parse::<TableColumn>()
            .map_err(|e| anyhow!("{} (expected one of: {})", e, column_keys()))?;
        state.set_sort(Some(SortSpec { column, direction }));
    }
    if let Some(search) = search {
        state.set_search(search);
    }
    Ok(state)
}

fn column_keys() -> String {
    TableColumn::ALL
        .iter()
        .map(|c| c.key())
        .collect::<Vec<_>>()
        .join(", ")
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        text.to_string()
    } else {
        let kept: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{}...", kept)
    }
}

/// The filtered view of the current page as an aligned text table, followed
/// by the "start - end of total" footer. Selected rows are marked with '*'.
pub fn render_page(ctx: &SelectionContext, table: &TableState) -> String {
    let store = ctx.dataset().read();
    let rows = table.rows(store.filtered_view());

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(rows.len() + 1);
    let mut header = vec!["S/N".to_string()];
    header.extend(TableColumn::ALL.iter().map(|c| c.header().to_string()));
    grid.push(header);
    for (i, record) in rows.iter().enumerate() {
        let marker = if ctx.is_selected_row(&record.id) { "*" } else { "" };
        let mut line = vec![format!("{}{}", marker, i + 1)];
        line.extend(TableColumn::ALL.iter().map(|c| truncate(&c.cell(record))));
        grid.push(line);
    }

    let widths: Vec<usize> = (0..grid[0].len())
        .map(|col| {
            grid.iter()
                .map(|line| line[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in &grid {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    if rows.is_empty() {
        out.push_str("No earthquake data matches your filters\n");
    }

    let summary = store.page_summary();
    out.push_str(&format!(
        "{} - {} of {}  (page {} of {}, {} shown)\n",
        summary.start_item,
        summary.end_item,
        summary.total,
        store.page_index(),
        summary.page_count,
        rows.len()
    ));
    out
}

/// Apply the axis choice to the dataset store and return the projection of
/// its filtered view as pretty JSON.
pub fn render_chart(ctx: &SelectionContext, x_axis: &str, y_axis: &str) -> anyhow::Result<String> {
    let x = x_axis.parse::<ChartField>()?;
    let y = y_axis.parse::<ChartField>()?;
    ctx.dataset().set_chart_axis(Axis::X, x);
    ctx.dataset().set_chart_axis(Axis::Y, y);

    let highlighted = ctx.highlighted_id();
    let store = ctx.dataset().read();
    let config = store.chart_config();
    let points = store.chart_points(highlighted.as_deref());
    let json = serde_json::json!({
        "xAxis": config.x_axis,
        "yAxis": config.y_axis,
        "xLabel": config.x_axis.label(),
        "yLabel": config.y_axis.label(),
        "highlighted": highlighted,
        "total": points.len(),
        "points": points,
    });
    Ok(serde_json::to_string_pretty(&json)?)
}
