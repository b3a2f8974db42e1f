use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::modal::Modal;
use crate::util::display_width;

const HELP: &[(&str, &str)] = &[
    ("j/k h/l", "Move between rows and columns"),
    ("g/G", "First/last row"),
    ("Ctrl+D/U", "Page down/up"),
    ("s", "Sort by current column (again to reverse)"),
    ("f/F", "Next/previous category filter"),
    ("/ Ctrl+K", "Search"),
    (":", "Command line"),
    ("Enter", "Row details"),
    ("y", "Copy row to clipboard"),
    ("e", "Export all rows as CSV"),
    ("a Ctrl+N", "Add record"),
    ("x", "Dismiss latest notification"),
    ("Esc", "Close dialogs"),
    ("q", "Quit"),
];

/// A rectangle of `percent_x` by `percent_y` of `area`, centered in it
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = (area.width * percent_x / 100).max(20).min(area.width);
    let height = (area.height * percent_y / 100).max(5).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_popup(frame: &mut Frame, app: &App, title: String, lines: Vec<Line>, area: Rect) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_alignment(Alignment::Center)
        .border_style(app.style.modal_border());
    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

pub fn render_modal(frame: &mut Frame, app: &App, modal: &Modal, area: Rect) {
    let label_style = app.style.modal_label();
    let (title, lines) = match modal {
        Modal::RowDetails { row } => {
            let lines = app
                .table
                .headers()
                .iter()
                .enumerate()
                .map(|(col, header)| {
                    Line::from(vec![
                        Span::styled(format!("{}: ", header), label_style),
                        Span::raw(app.table.get_cell(*row, col).unwrap_or("").to_string()),
                    ])
                })
                .collect();
            (" Row details ".to_string(), lines)
        }
        Modal::Help => {
            let key_width = HELP.iter().map(|(k, _)| display_width(k)).max().unwrap_or(0);
            let lines = HELP
                .iter()
                .map(|(keys, what)| {
                    Line::from(vec![
                        Span::styled(format!("{:width$}  ", keys, width = key_width), label_style),
                        Span::raw(*what),
                    ])
                })
                .collect();
            (" Help ".to_string(), lines)
        }
    };
    render_popup(frame, app, title, lines, centered_rect(60, 60, area));
}

pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let style = &app.style;
    let mut lines: Vec<Line> = Vec::new();

    for (idx, field) in app.form.fields().iter().enumerate() {
        let marker = if field.spec.required { "*" } else { "" };
        let value_style = if idx == app.form.focus() {
            style.form_focus()
        } else {
            style.cell()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{}: ", field.spec.name, marker), style.modal_label()),
            Span::styled(format!("{} ", field.value), value_style),
        ]));
        if let Some(error) = &field.error {
            lines.push(Line::from(Span::styled(format!("  {}", error), style.form_error())));
        }
    }

    if let Some(estimate) = app.form.revenue_estimate() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Estimated revenue: ", style.modal_label()),
            Span::styled(estimate, style.counter()),
        ]));
    }

    render_popup(frame, app, " Add record ".to_string(), lines, centered_rect(60, 70, area));
}

/// Live notifications stacked in the top-right corner, newest on top
pub fn render_notifications(frame: &mut Frame, app: &App, area: Rect) {
    for (i, note) in app.notifications.items().iter().rev().enumerate() {
        let y = area.y + 1 + i as u16;
        if y >= area.bottom().saturating_sub(2) {
            break;
        }
        let text = format!(" {} {} ", note.kind.icon(), note.message);
        let width = (display_width(&text) as u16).min(area.width.saturating_sub(2));
        let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, 1);
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(text).style(app.style.notification(note.kind)),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(60, 50, area), Rect::new(20, 10, 60, 20));

        // never larger than the screen
        let tiny = Rect::new(0, 0, 10, 4);
        assert_eq!(centered_rect(60, 50, tiny), Rect::new(0, 0, 10, 4));
    }
}
