//! VibeSec Terminal
//!
//! A simulated secure-coding training terminal.

use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs;
use std::io::{self, stdout};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vibesec::terminal::Command;
use vibesec::tui::App;
use vibesec::Config;

#[derive(Parser, Debug)]
#[clap(name = "vibesec", author, version, about = "Secure coding training terminal")]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,

    #[clap(long, short, help = "Path to a YAML config file")]
    config: Option<PathBuf>,

    #[clap(long, short, help = "Log level (error, warn, info, debug, trace)")]
    log_level: Option<String>,

    #[clap(long, help = "Write logs to this file instead of the default location")]
    log_file: Option<PathBuf>,

    #[clap(long, help = "Seed the RNG for reproducible trivia and effects")]
    seed: Option<u64>,

    #[clap(long, help = "Keep the matrix rain running in the background")]
    matrix_rain: bool,

    #[clap(long, help = "Skip the boot animation")]
    no_boot: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the command vocabulary
    Commands,
    /// Print the default configuration as YAML
    DefaultConfig,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;

    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    if let Some(file) = &cli.log_file {
        config.log.file = Some(file.clone());
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.matrix_rain {
        config.matrix.background_rain = true;
    }
    if cli.no_boot {
        config.boot.enabled = false;
    }

    config.validate()?;
    Ok(config)
}

/// The TUI owns stdout, so logs always go to a file
fn init_logging(config: &Config) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let path = config.log_file();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let file_name = path
        .file_name()
        .context("log file path has no file name")?
        .to_owned();

    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log.level))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)
}

fn run(config: Config) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    let tick_rate = app.terminal.config().tick_rate();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));

    // Main loop
    let result = (|| -> anyhow::Result<()> {
        while app.running {
            terminal.draw(|frame| app.render(frame))?;
            if !app.handle_input(tick_rate)? {
                break;
            }
            app.on_tick();
        }
        Ok(())
    })();

    // Cleanup
    restore_terminal()?;
    terminal.show_cursor()?;

    result
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Commands) => {
            for command in Command::ALL {
                if command.is_listed() {
                    println!("{:<12}{}", command.keyword(), command.description());
                }
            }
            return Ok(());
        }
        Some(Commands::DefaultConfig) => {
            print!("{}", Config::default().to_yaml()?);
            return Ok(());
        }
        None => {}
    }

    let config = load_config(&cli)?;
    let _guard = init_logging(&config)?;
    tracing::info!(version = vibesec::VERSION, "starting");

    let result = run(config);
    if let Err(err) = &result {
        tracing::error!(error = %err, "exiting with error");
    }
    result?;

    println!("Stay curious. Stay patched.");
    Ok(())
}
