use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table as RatatuiTable},
    Frame,
};

use crate::app::App;
use crate::mode::Mode;
use crate::util::{display_width, truncate_to_width};

mod overlay;

/// Space between columns
const COL_GAP: usize = 1;

pub fn render(frame: &mut Frame, app: &mut App) {
    let now = Instant::now();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    if let Some(bg) = app.style.background() {
        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(bg)),
            frame.size(),
        );
    }

    render_table(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1], now);
    render_input_line(frame, app, chunks[2]);

    let area = frame.size();
    if app.mode == Mode::Form {
        overlay::render_form(frame, app, area);
    } else if let Some(modal) = app.modals.top() {
        overlay::render_modal(frame, app, modal, area);
    }
    overlay::render_notifications(frame, app, area);
}

/// Number of columns starting at `first` that fit in `width`
fn columns_that_fit(widths: &[usize], first: usize, width: usize) -> usize {
    let mut used = 0;
    let mut count = 0;
    for w in widths.iter().skip(first) {
        used += w + COL_GAP;
        if used > width && count > 0 {
            break;
        }
        count += 1;
    }
    count.max(1)
}

fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(" {} ", app.file_io.file_name());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);

    let col_count = app.table.col_count();
    if col_count == 0 {
        frame.render_widget(Paragraph::new("No data").block(block), area);
        return;
    }

    let row_num_width = app.visible.len().to_string().len().max(3);
    let body_height = inner.height.saturating_sub(1) as usize; // header row
    let body_width = (inner.width as usize).saturating_sub(row_num_width + COL_GAP);
    let fit = columns_that_fit(&app.col_widths, app.view.viewport_col, body_width);
    app.view.resize(body_height, fit);

    let first_col = app.view.viewport_col;
    let last_col = (first_col + app.view.visible_cols).min(col_count);
    let style = &app.style;
    let sort = app.table.sort_state();

    let mut widths: Vec<Constraint> = Vec::with_capacity(last_col - first_col + 1);
    widths.push(Constraint::Length(row_num_width as u16));
    for col in first_col..last_col {
        widths.push(Constraint::Length(app.col_widths.get(col).copied().unwrap_or(3) as u16));
    }

    let mut header_cells: Vec<Cell> = vec![Cell::from("#").style(style.header(false))];
    for col in first_col..last_col {
        let width = app.col_widths.get(col).copied().unwrap_or(3);
        let name = app.table.header(col).unwrap_or("");
        let cell = match sort.filter(|s| s.column == col) {
            Some(s) => {
                let label = truncate_to_width(name, width.saturating_sub(2));
                Cell::from(format!("{} {}", label, s.direction.marker())).style(style.header(true))
            }
            None => Cell::from(truncate_to_width(name, width)).style(style.header(false)),
        };
        header_cells.push(cell);
    }
    let header_row = Row::new(header_cells);

    let start = app.view.viewport_row;
    let end = (start + body_height).min(app.visible.len());
    let rows: Vec<Row> = app.visible[start..end]
        .iter()
        .enumerate()
        .map(|(offset, &table_row)| {
            let pos = start + offset;
            let is_cursor_row = pos == app.view.cursor_row;
            let mut cells: Vec<Cell> = Vec::with_capacity(last_col - first_col + 1);

            let num_style = if is_cursor_row {
                style.header(false)
            } else {
                style.cell().add_modifier(Modifier::DIM)
            };
            cells.push(Cell::from((pos + 1).to_string()).style(num_style));

            for col in first_col..last_col {
                let width = app.col_widths.get(col).copied().unwrap_or(3);
                let content = app.table.get_cell(table_row, col).unwrap_or("");
                let cell_style = if is_cursor_row && col == app.view.cursor_col {
                    style.cell_cursor()
                } else if is_cursor_row {
                    style.cell().add_modifier(Modifier::BOLD)
                } else {
                    style.cell()
                };
                cells.push(Cell::from(truncate_to_width(content, width)).style(cell_style));
            }
            Row::new(cells)
        })
        .collect();

    let table = RatatuiTable::new(rows, widths)
        .header(header_row)
        .column_spacing(COL_GAP as u16)
        .block(block);

    frame.render_widget(table, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let style = &app.style;
    let mut spans = vec![
        Span::styled(format!(" {} ", app.mode.display_name()), style.status_mode(app.mode)),
        Span::raw(" Rows "),
        Span::styled(app.stats.visible.display(now), style.counter()),
        Span::raw("/"),
        Span::styled(app.stats.total.display(now), style.counter()),
        Span::raw("  Tags "),
        Span::styled(app.stats.categories.display(now), style.counter()),
    ];

    if !app.query.category().is_all() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("filter: {}", app.query.category()), style.filter_status()));
    }
    if !app.query.search().is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("search: {}", app.query.search().term()),
            style.filter_status(),
        ));
    }

    let position = match app.current_row() {
        Some(_) => format!("{}/{} ", app.view.cursor_row + 1, app.visible.len()),
        None => "0/0 ".to_string(),
    };
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let pad = (area.width as usize).saturating_sub(used + position.len());
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::raw(position));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(style.status_bar()), area);
}

fn render_input_line(frame: &mut Frame, app: &App, area: Rect) {
    let style = &app.style;
    let line = match app.mode {
        Mode::Search => {
            let mut spans = vec![
                Span::styled("/", style.command_prompt()),
                Span::styled(app.search_buffer(), style.command_line()),
                Span::styled("█", style.command_line()),
            ];
            if app.query.search_pending() {
                spans.push(Span::styled(" …", style.command_prompt()));
            }
            Line::from(spans)
        }
        Mode::Command => Line::from(vec![
            Span::styled(":", style.command_prompt()),
            Span::styled(app.command_buffer(), style.command_line()),
            Span::styled("█", style.command_line()),
        ]),
        Mode::Form => Line::from(Span::styled(
            "Tab/Shift+Tab: next/prev field  Enter: save  Esc: cancel",
            style.command_prompt(),
        )),
        Mode::Normal => Line::from(Span::styled(
            "/ search  f filter  s sort  a add  e export  ? help  q quit",
            style.command_prompt(),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
