use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self as crossterm_event, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use jlv::app::App;
use jlv::handlers;
use jlv::session::{Session, SessionOptions};
use jlv::sort::SortSpec;
use jlv::{config, logging, tui};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const INPUT_POLL_DURATION_MS: u64 = 100;

#[derive(Parser, Debug)]
#[command(name = "jlv")]
#[command(about = "A terminal viewer for JSON-per-line log files", long_about = None)]
struct Args {
    /// Log file to view
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Only show records with this level
    #[arg(long)]
    level: Option<String>,

    /// Field to sort by; a leading `-` sorts descending
    #[arg(long, default_value = "timestamp", allow_hyphen_values = true)]
    sort: String,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    /// Reload when the file changes
    #[arg(long)]
    watch: bool,

    /// Column config file (skips discovery)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_tracing(args.log_file.as_deref())?;

    let config_path = args.config.clone().or_else(config::discover);
    let config = match config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_cargo_style());
            std::process::exit(1);
        }
    };

    let mut sort = SortSpec::parse(&args.sort).unwrap_or_else(|| SortSpec::ascending("timestamp"));
    if args.desc && !sort.descending {
        sort = sort.inverted();
    }
    let options = SessionOptions {
        level: args.level,
        sort: Some(sort),
        watch: args.watch,
        page_height: 0,
    };

    // Load before touching the terminal so a bad path fails with a plain message
    let session = match Session::open(&args.file, &config, options) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mut app = App::new(session, config);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "exiting on error");
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let size = terminal.size()?;
    app.resize(tui::page_height_for(size.height));

    loop {
        terminal.draw(|f| tui::render(f, app))?;

        if app.session.poll_live_tail(Instant::now()) {
            app.invalidate_layout();
        }

        if crossterm_event::poll(Duration::from_millis(INPUT_POLL_DURATION_MS))? {
            match crossterm_event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    for event in handlers::input::handle_input_event(key, app) {
                        app.apply_event(event);
                    }
                }
                Event::Resize(_, height) => app.resize(tui::page_height_for(height)),
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
