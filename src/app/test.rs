use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use crate::config::Config;
use crate::fileio::FileIO;
use crate::modal::ModalId;
use crate::mode::Mode;
use crate::notify::NotificationKind;
use crate::table::Table;

fn crops() -> Table {
    let records = [
        ["Wheat", "grain", "Active"],
        ["Corn", "grain", "Planned"],
        ["Cow", "livestock", "Active"],
        ["Oats", "grain", "Sold"],
    ];
    Table::from_records(
        vec!["Crop".to_string(), "Type".to_string(), "Status".to_string()],
        records
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect(),
        Some(1),
        Some(2),
    )
}

fn app_in(dir: &Path, now: Instant) -> App {
    App::new(crops(), FileIO::new(dir.join("crops.csv")), Config::default(), now)
}

fn press(app: &mut App, code: KeyCode, now: Instant) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now);
}

fn ctrl(app: &mut App, c: char, now: Instant) {
    app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL), now);
}

fn type_text(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        press(app, KeyCode::Char(c), now);
    }
}

fn visible_names(app: &App) -> Vec<String> {
    app.visible
        .iter()
        .map(|&r| app.table.get_cell(r, 0).unwrap_or_default().to_string())
        .collect()
}

fn latest(app: &App) -> (NotificationKind, String) {
    let n = app.notifications.items().last().expect("a notification");
    (n.kind, n.message.clone())
}

#[test]
fn test_search_waits_for_debounce() {
    let dir = tempfile::tempdir().unwrap();
    let start = Instant::now();
    let mut app = app_in(dir.path(), start);
    assert_eq!(app.visible.len(), 4);

    press(&mut app, KeyCode::Char('/'), start);
    assert_eq!(app.mode, Mode::Search);
    type_text(&mut app, "co", start);
    type_text(&mut app, "w", start + Duration::from_millis(100));

    app.tick(start + Duration::from_millis(399));
    assert_eq!(app.visible.len(), 4);

    app.tick(start + Duration::from_millis(400));
    assert_eq!(visible_names(&app), vec!["Cow"]);
}

#[test]
fn test_enter_commits_search() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    ctrl(&mut app, 'k', now);
    assert_eq!(app.mode, Mode::Search);
    type_text(&mut app, "OATS", now);
    press(&mut app, KeyCode::Enter, now);

    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(visible_names(&app), vec!["Oats"]);
    assert!(!app.query.search_pending());
}

#[test]
fn test_sort_key_toggles_direction() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    press(&mut app, KeyCode::Char('s'), now);
    assert_eq!(visible_names(&app), vec!["Corn", "Cow", "Oats", "Wheat"]);

    press(&mut app, KeyCode::Char('s'), now);
    assert_eq!(visible_names(&app), vec!["Wheat", "Oats", "Cow", "Corn"]);
}

#[test]
fn test_cursor_follows_row_through_sort() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    // cursor on Cow
    press(&mut app, KeyCode::Char('j'), now);
    press(&mut app, KeyCode::Char('j'), now);
    press(&mut app, KeyCode::Char('s'), now);

    let row = app.current_row().unwrap();
    assert_eq!(app.table.get_cell(row, 0), Some("Cow"));
}

#[test]
fn test_filter_cycle_and_search_intersect() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    press(&mut app, KeyCode::Char('f'), now);
    assert_eq!(app.query.category().value(), "grain");
    assert_eq!(visible_names(&app), vec!["Wheat", "Corn", "Oats"]);

    app.set_search("o", now);
    assert_eq!(visible_names(&app), vec!["Corn", "Oats"]);

    press(&mut app, KeyCode::Char('F'), now);
    assert_eq!(app.query.category().value(), "all");
    assert_eq!(visible_names(&app), vec!["Corn", "Cow", "Oats"]);
}

#[test]
fn test_command_line() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    press(&mut app, KeyCode::Char(':'), now);
    type_text(&mut app, "filter Active", now);
    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(visible_names(&app), vec!["Wheat", "Cow"]);

    press(&mut app, KeyCode::Char(':'), now);
    type_text(&mut app, "sort status", now);
    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.table.sort_state().map(|s| s.column), Some(2));

    press(&mut app, KeyCode::Char(':'), now);
    type_text(&mut app, "frobnicate", now);
    press(&mut app, KeyCode::Enter, now);
    assert_eq!(
        latest(&app),
        (NotificationKind::Warning, "Unknown command: frobnicate".to_string())
    );

    press(&mut app, KeyCode::Char(':'), now);
    type_text(&mut app, "q", now);
    press(&mut app, KeyCode::Enter, now);
    assert!(app.should_quit);
}

#[test]
fn test_sort_unknown_column_warns() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    assert_eq!(app.table.resolve_column("2"), Some(1));
    assert_eq!(app.table.resolve_column("9"), None);
    assert_eq!(app.table.resolve_column("crop"), Some(0));

    app.execute_command(crate::command::Command::Sort(Some("Acres".into())), now);
    assert_eq!(app.table.sort_state(), None);
    assert_eq!(latest(&app).0, NotificationKind::Warning);
}

#[test]
fn test_export_writes_next_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    app.set_search("cow", now);
    press(&mut app, KeyCode::Char('e'), now);

    let written = std::fs::read_to_string(dir.path().join("data.csv")).unwrap();
    assert_eq!(written.lines().count(), 5);
    assert!(written.starts_with("Crop,Type,Status\n"));
    assert_eq!(latest(&app).0, NotificationKind::Success);
}

#[test]
fn test_export_failure_is_reported() {
    let now = Instant::now();
    let mut app = App::new(
        crops(),
        FileIO::new(Path::new("/nonexistent/dir/crops.csv").to_path_buf()),
        Config::default(),
        now,
    );
    app.export(Some("out.csv"), now);
    let (kind, message) = latest(&app);
    assert_eq!(kind, NotificationKind::Error);
    assert!(message.starts_with("Export failed"));
}

#[test]
fn test_form_rejects_then_adds_record() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    ctrl(&mut app, 'n', now);
    assert_eq!(app.mode, Mode::Form);

    press(&mut app, KeyCode::Enter, now);
    assert_eq!(app.mode, Mode::Form);
    assert_eq!(app.form.error_count(), 3);
    assert_eq!(
        latest(&app),
        (NotificationKind::Error, "Please fix the errors in the form".to_string())
    );

    type_text(&mut app, "Rye", now);
    press(&mut app, KeyCode::Tab, now);
    type_text(&mut app, "grain", now);
    press(&mut app, KeyCode::Tab, now);
    type_text(&mut app, "Planned", now);
    press(&mut app, KeyCode::Enter, now);

    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.table.row_count(), 5);
    let added = app.table.get_row(4).unwrap();
    assert_eq!(added.cells, vec!["Rye", "grain", "Planned"]);
    assert_eq!(added.category.as_deref(), Some("grain"));
    assert_eq!(app.visible.len(), 5);
    assert_eq!(latest(&app).0, NotificationKind::Success);
}

#[test]
fn test_escape_leaves_form() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    press(&mut app, KeyCode::Char('a'), now);
    type_text(&mut app, "Barley", now);
    press(&mut app, KeyCode::Esc, now);
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.table.row_count(), 4);
}

#[test]
fn test_modals() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    press(&mut app, KeyCode::Enter, now);
    assert!(app.modals.is_open(ModalId::RowDetails));

    // any key closes the dialog without acting
    press(&mut app, KeyCode::Char('j'), now);
    assert!(!app.modals.any_open());
    assert_eq!(app.view.cursor_row, 0);

    press(&mut app, KeyCode::Char('?'), now);
    assert!(app.modals.is_open(ModalId::Help));
    press(&mut app, KeyCode::Esc, now);
    assert!(!app.modals.any_open());
}

#[test]
fn test_unmapped_key_closes_dialog() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    press(&mut app, KeyCode::Char('?'), now);
    assert!(app.modals.is_open(ModalId::Help));
    press(&mut app, KeyCode::F(9), now);
    assert!(!app.modals.any_open());
    assert_eq!(app.mode, Mode::Normal);
}

#[test]
fn test_notifications_expire_on_tick() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    app.notifications.info("hello", now);
    app.tick(now + Duration::from_millis(4999));
    assert!(!app.notifications.is_empty());
    app.tick(now + Duration::from_millis(5000));
    assert!(app.notifications.is_empty());
}

#[test]
fn test_counters_track_visible_rows() {
    let dir = tempfile::tempdir().unwrap();
    let now = Instant::now();
    let mut app = app_in(dir.path(), now);

    let done = now + Duration::from_secs(3);
    assert_eq!(app.stats.total.value(done), 4);
    assert_eq!(app.stats.categories.value(done), 5);

    app.set_search("wheat", done);
    assert_eq!(app.stats.visible.target(), 1);
    assert_eq!(app.stats.total.target(), 4);
}
