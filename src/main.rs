mod app;
mod clipboard;
mod command;
mod config;
mod counter;
mod debounce;
mod error;
mod export;
mod fileio;
mod form;
mod input;
mod modal;
mod mode;
mod notify;
mod style;
mod table;
mod tableview;
mod ui;
mod util;

use std::io::{self, Write};
use std::panic;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{error, info, warn};
use tracing_subscriber::fmt::writer::MakeWriter;

use crossterm::{
    cursor::MoveToColumn,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use config::Config;
use error::Result;
use fileio::{FileIO, TagColumns};
use table::{CategoryFilter, Table, TableQuery};

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Args {
    file: Option<PathBuf>,
    config: Option<PathBuf>,
    search: Option<String>,
    filter: Option<String>,
    sort: Option<String>,
    export: Option<PathBuf>,
    help: bool,
}

fn take_value(args: &[String], i: usize, flag: &str) -> std::result::Result<String, String> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| format!("{} requires an argument", flag))
}

/// Parse command line arguments (without the program name)
fn parse_args(args: &[String]) -> std::result::Result<Args, String> {
    let mut parsed = Args::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-c" | "--config" => {
                parsed.config = Some(PathBuf::from(take_value(args, i, arg)?));
                i += 2;
            }
            "-s" | "--search" => {
                parsed.search = Some(take_value(args, i, arg)?);
                i += 2;
            }
            "-f" | "--filter" => {
                parsed.filter = Some(take_value(args, i, arg)?);
                i += 2;
            }
            "--sort" => {
                parsed.sort = Some(take_value(args, i, arg)?);
                i += 2;
            }
            "-e" | "--export" => {
                parsed.export = Some(PathBuf::from(take_value(args, i, arg)?));
                i += 2;
            }
            "-h" | "--help" => {
                parsed.help = true;
                i += 1;
            }
            _ if arg.starts_with('-') => return Err(format!("Unknown option: {}", arg)),
            _ => {
                if parsed.file.is_some() {
                    return Err(format!("Unexpected argument: {}", arg));
                }
                parsed.file = Some(PathBuf::from(arg));
                i += 1;
            }
        }
    }

    Ok(parsed)
}

/// Handle panics gracefully
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        if let Some(location) = info.location() {
            error!(file = location.file(), line = location.line(), "panic occurred");
        } else {
            error!("panic occurred");
        }

        if let Some(s) = info.payload().downcast_ref::<&str>() {
            error!(message = %s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            error!(message = %s);
        }

        default_hook(info);
    }));
}

/// A `MakeWriter` for `tracing` that logs to the **main screen** by leaving the alternate screen temporarily.
pub struct MainScreenWriter;

impl<'a> MakeWriter<'a> for MainScreenWriter {
    type Writer = MainScreenWriterHandle;

    fn make_writer(&'a self) -> Self::Writer {
        MainScreenWriterHandle
    }
}

/// A handle that writes to stdout outside the alternate screen
pub struct MainScreenWriterHandle;

impl Write for MainScreenWriterHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        execute!(io::stdout(), LeaveAlternateScreen)?;
        println!();
        execute!(io::stdout(), MoveToColumn(0))?;
        let result = io::stdout().write(buf);
        execute!(io::stdout(), MoveToColumn(0))?;
        io::stdout().flush()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        result
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

fn print_help() {
    eprintln!("fieldbook - browse, search, and export farm records in the terminal");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    fieldbook [OPTIONS] FILE");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config <PATH>   Config file (default: ~/.config/fieldbook/config.toml)");
    eprintln!("    -s, --search <TERM>   Start with a search term applied");
    eprintln!("    -f, --filter <VALUE>  Start with a category/status filter (\"all\" for none)");
    eprintln!("        --sort <COL>      Sort by column number or header name");
    eprintln!("    -e, --export <FILE>   Write all rows as CSV to FILE and exit");
    eprintln!("    -h, --help            Print this help message");
}

/// Sort by a column given on the command line; unknown columns are reported
fn apply_sort(table: &mut Table, column: &str) -> Option<usize> {
    let col = table.resolve_column(column);
    match col {
        Some(col) => {
            table.sort_by_column(col);
        }
        None => warn!(column, "sort column not found"),
    }
    col
}

/// Headless mode: sort, write every row to `target`, exit
fn export_headless(mut table: Table, args: &Args, config: &Config, target: &Path) -> Result<()> {
    if let Some(column) = &args.sort {
        if apply_sort(&mut table, column).is_none() {
            eprintln!("Column not found: {}", column);
        }
    }

    // Filters only narrow the view; report what they would show
    let mut query = TableQuery::new(config.search_debounce());
    if let Some(term) = &args.search {
        query.set_search(term);
    }
    if let Some(value) = &args.filter {
        query.set_category(CategoryFilter::from_value(value));
    }

    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.export_filename.clone());

    let path = export::export_table(&table, &filename).write_to(dir)?;
    eprintln!(
        "Exported {} rows ({} matching) to {}",
        table.row_count(),
        query.visible_count(&table),
        path.display()
    );
    Ok(())
}

fn run_tui(table: Table, file_io: FileIO, config: Config, args: &Args, warnings: Vec<String>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let now = Instant::now();
    let mut app = App::new(table, file_io, config, now);

    if let Some(term) = &args.search {
        app.execute_command(command::Command::Search(term.clone()), now);
    }
    if let Some(value) = &args.filter {
        app.set_filter(CategoryFilter::from_value(value), now);
    }
    if let Some(column) = &args.sort {
        app.execute_command(command::Command::Sort(Some(column.clone())), now);
    }

    app.notifications.info(
        format!("Loaded {} rows from {}", app.table.row_count(), app.file_io.file_name()),
        now,
    );
    for warning in warnings {
        app.notifications.warning(warning, now);
    }

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(result?)
}

fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;

    match args.export {
        Some(_) => tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_max_level(config.log_filter())
            .init(),
        None => tracing_subscriber::fmt()
            .with_writer(MainScreenWriter)
            .with_max_level(config.log_filter())
            .init(),
    }
    info!("fieldbook started");

    install_panic_hook();

    let Some(file) = args.file.clone() else {
        print_help();
        std::process::exit(1);
    };

    let file_io = FileIO::new(file);
    let tags = TagColumns {
        category: config.category_column.clone(),
        status: config.status_column.clone(),
    };
    let load_result = file_io.load_table(&tags).map_err(|e| {
        error!(error = %e, "failed to load table");
        e
    })?;

    match &args.export {
        Some(target) => export_headless(load_result.table, &args, &config, target),
        None => run_tui(load_result.table, file_io, config, &args, load_result.warnings),
    }
}

fn main() {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    };
    if args.help {
        print_help();
        return;
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
