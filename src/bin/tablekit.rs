use clap::{Parser, ValueEnum};
use color_eyre::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

use tablekit::config::Config;
use tablekit::core::types::{FieldMap, Row};
use tablekit::tui::App;

/// Browse a CSV file with the tablekit table engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// CSV file to load
    file: PathBuf,
    /// Table name used as the shared-store key (must not be "default")
    #[arg(long, default_value = "csv")]
    table_name: String,
    /// Restrict search to these fields (repeatable); all fields when omitted
    #[arg(long = "search-field", value_name = "FIELD")]
    search_fields: Vec<String>,
    /// Rows per page (overrides config)
    #[arg(long)]
    page_size: Option<usize>,
    /// Enable file logging at the given level (overrides RUST_LOG)
    #[arg(long = "logging", value_enum)]
    logging: Option<LogLevel>,
    /// Path to a config file (overrides default config discovery)
    #[arg(long = "config", value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let level = args.logging.map(|level| match level {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    });
    tablekit::logging::init(None, level)?;

    let config = Config::from_path(args.config.as_ref())?;
    let rows = load_csv_rows(&args.file)?;

    let mut options = config.table_options(&args.table_name);
    options.search_fields = args.search_fields.clone();
    if let Some(page_size) = args.page_size {
        options.page_size = page_size;
    }

    let mut app = App::new(options, config.keybindings(), config.theme());
    app.set_data(rows);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    if let Err(e) = res {
        error!("Error: {e}");
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        // Poll for events; the 100ms timeout doubles as the debounce tick
        if event::poll(Duration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            app.handle_key_event(key)?;
        }
        app.tick()?;

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}

/// Load a CSV file into rows.
///
/// The `id` column (when present) becomes the stable row id; otherwise the
/// record index does. Numeric-looking cells are kept as numbers so sorting
/// compares them numerically.
fn load_csv_rows(path: &Path) -> Result<Arc<Vec<Row>>> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let id_column = headers.iter().position(|header| header == "id");

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let mut fields = FieldMap::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            let value = cell
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(cell.to_string()));
            fields.insert(header.to_string(), value);
        }
        let id = id_column
            .and_then(|column| record.get(column))
            .map(|cell| cell.to_string())
            .unwrap_or_else(|| index.to_string());
        rows.push(Row::new(id, fields));
    }
    Ok(Arc::new(rows))
}
