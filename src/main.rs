use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use drop_four::api::{self, MoveRequest};
use drop_four::arena;
use drop_four::config::AppConfig;
use drop_four::ui::App;

/// Drop-four move engine.
#[derive(Parser)]
#[command(name = "drop-four", about = "Fixed-depth alpha-beta engine for drop four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "drop-four.toml", global = true)]
    config: PathBuf,

    /// Override search depth
    #[arg(long, global = true)]
    depth: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read {"board": [[...]]} JSON and print {"column": n|null}
    Move {
        /// Request file; stdin when omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Play against the engine in the terminal
    Play,
    /// Pit the engine against a seeded random player
    Arena {
        #[arg(long, default_value_t = 20)]
        games: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Print the default configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Command::Config = cli.command {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
        config.validate().context("applying --depth")?;
    }

    match cli.command {
        Command::Move { input } => {
            init_tracing(&config);
            run_move(&config, input)
        }
        // No subscriber: log lines would tear the alternate screen.
        Command::Play => run_play(config).context("running terminal UI"),
        Command::Arena { games, seed } => {
            init_tracing(&config);
            let report = arena::run(&config, games, seed).context("arena game failed")?;
            info!(
                games = report.games,
                wins = report.wins,
                losses = report.losses,
                draws = report.draws,
                "arena finished"
            );
            println!(
                "{} games: {} wins, {} losses, {} draws ({:.0}% win rate)",
                report.games,
                report.wins,
                report.losses,
                report.draws,
                report.win_rate() * 100.0
            );
            Ok(())
        }
        Command::Config => Ok(()),
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_move(config: &AppConfig, input: Option<PathBuf>) -> Result<()> {
    let raw = match &input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading request from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading request from stdin")?;
            buf
        }
    };

    let request: MoveRequest = serde_json::from_str(&raw).context("parsing move request")?;
    let response = api::compute_move(&request, config)?;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

fn run_play(config: AppConfig) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal even if the app loop failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
