//! Plot Pilot - a terminal front-end for a remote plotting service.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use url::Url;

use plot_pilot::app::App;
use plot_pilot::ui;
use plot_pilot::upload::{PlotClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(name = "plot-pilot")]
#[command(about = "A terminal front-end for submitting plotting requests", long_about = None)]
struct Args {
    /// Data file to preselect, or directory to browse
    file: Option<PathBuf>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Plotting service endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: Url,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_path = log_path.clone();
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || {
                std::fs::OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(&log_path)
                    .expect("Failed to open log file")
            })
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Plot Pilot");
    }

    // Validate path if provided
    if let Some(ref path) = args.file {
        if !path.exists() {
            eprintln!("Error: Path not found: {}", path.display());
            std::process::exit(1);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let client = PlotClient::new(args.endpoint, Duration::from_secs(args.timeout))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let app = App::new(args.file, runtime.handle().clone(), client);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("Plot Pilot exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.drain_outcomes();

        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Quit from anywhere
                if key.modifiers == KeyModifiers::CONTROL
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
                {
                    return Ok(());
                }

                // Notice modal - blocks all input except dismissal
                if app.notice.is_some() {
                    match key.code {
                        KeyCode::Enter
                        | KeyCode::Esc
                        | KeyCode::Char('q')
                        | KeyCode::Char(' ') => {
                            app.dismiss_notice();
                        }
                        _ => {}
                    }
                    continue;
                }

                // File browser mode
                if app.file_browser_mode {
                    match (key.modifiers, key.code) {
                        // Back to the form
                        (KeyModifiers::NONE, KeyCode::Esc)
                        | (KeyModifiers::NONE, KeyCode::Char('q')) => {
                            app.cancel_file_browser();
                        }

                        // Navigation
                        (KeyModifiers::NONE, KeyCode::Up)
                        | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                            app.browser_up();
                        }
                        (KeyModifiers::NONE, KeyCode::Down)
                        | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                            app.browser_down();
                        }

                        // Select/Open
                        (KeyModifiers::NONE, KeyCode::Enter)
                        | (KeyModifiers::NONE, KeyCode::Char('l'))
                        | (KeyModifiers::NONE, KeyCode::Right) => {
                            app.browser_select();
                        }

                        // Go to parent directory
                        (KeyModifiers::NONE, KeyCode::Char('h'))
                        | (KeyModifiers::NONE, KeyCode::Left) => {
                            app.browser_parent();
                        }

                        // Filters
                        (KeyModifiers::NONE, KeyCode::Char('a')) => {
                            app.toggle_all_files();
                        }
                        (KeyModifiers::NONE, KeyCode::Char('.')) => {
                            app.toggle_hidden();
                        }

                        _ => {}
                    }
                    continue;
                }

                // Compose mode
                match (key.modifiers, key.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                        app.submit();
                    },
                    (KeyModifiers::CONTROL, KeyCode::Char('o')) => {
                        app.open_file_browser();
                    },
                    (KeyModifiers::CONTROL, KeyCode::Char('x')) => {
                        app.clear_file();
                    },
                    (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                        app.clear_prompt();
                    },
                    (KeyModifiers::CONTROL, KeyCode::Char('t')) => {
                        app.cycle_theme();
                    },

                    // Prompt editing
                    (KeyModifiers::NONE, KeyCode::Char(c))
                    | (KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                        app.composer.insert_char(c);
                    },
                    (KeyModifiers::NONE, KeyCode::Enter) => {
                        app.composer.insert_newline();
                    },
                    (KeyModifiers::NONE, KeyCode::Backspace) => {
                        app.composer.backspace();
                    },
                    (KeyModifiers::NONE, KeyCode::Delete) => {
                        app.composer.delete();
                    },
                    (KeyModifiers::NONE, KeyCode::Left) => {
                        app.composer.move_left();
                    },
                    (KeyModifiers::NONE, KeyCode::Right) => {
                        app.composer.move_right();
                    },
                    (KeyModifiers::NONE, KeyCode::Up) => {
                        app.composer.move_up();
                    },
                    (KeyModifiers::NONE, KeyCode::Down) => {
                        app.composer.move_down();
                    },
                    (KeyModifiers::NONE, KeyCode::Home) => {
                        app.composer.move_home();
                    },
                    (KeyModifiers::NONE, KeyCode::End) => {
                        app.composer.move_end();
                    },

                    _ => {},
                }
            }
        }
    }
}
