//! N-in-a-row solver: GUI, console game and self-play benchmark

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tictactoe::config::{default_tt_entries, parse_seed};
use tictactoe::ui::TicTacToeApp;
use tictactoe::{selfplay, terminal, AIEngine, EngineConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run engine-vs-engine games instead of the GUI (default 1000 games)
    #[arg(
        short,
        long,
        value_name = "GAMES",
        num_args = 0..=1,
        default_missing_value = "1000",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    selfplay: Option<u64>,

    /// Only print the game totals in self-play mode
    #[arg(short, long)]
    quiet: bool,

    /// Play against the engine in the console instead of the GUI
    #[arg(short, long, conflicts_with = "selfplay")]
    terminal: bool,

    /// Board side length (3-8)
    #[arg(long)]
    size: Option<usize>,

    /// Transposition table entries (0 disables the table)
    #[arg(long)]
    tt_entries: Option<usize>,

    /// Zobrist key seed, decimal or 0x-prefixed hex
    #[arg(long, value_parser = parse_seed)]
    seed: Option<u64>,

    /// TOML configuration file; flags override its values
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    /// File (or default) configuration with command-line overrides applied.
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => EngineConfig::default(),
        };

        if let Some(size) = self.size {
            if self.tt_entries.is_none() && size != config.board_size {
                config.tt_entries = default_tt_entries(size);
            }
            config.board_size = size;
        }
        if let Some(tt_entries) = self.tt_entries {
            config.tt_entries = tt_entries;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(
            buf,
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        )
    })
    .target(env_logger::Target::Stderr)
    .init();
}

fn run_selfplay(config: EngineConfig, games: u64, quiet: bool) -> Result<()> {
    let mut engine = AIEngine::with_config(config)?;
    let report = selfplay::run(&mut engine, games)?;

    println!("Self-play finished: {} games", report.games);
    println!(
        "X wins = {} O wins = {} Ties = {}",
        report.x_wins, report.o_wins, report.ties
    );
    if !quiet {
        println!(
            "Elapsed: {:.3} s\nThroughput: {:.1} games/s",
            report.elapsed.as_secs_f64(),
            report.throughput()
        );
        let stats = engine.tt_stats();
        println!(
            "Transposition Table Stats: hits = {} misses = {} collisions = {} ({:.1}% hit rate)",
            stats.hits,
            stats.misses,
            stats.collisions,
            stats.hit_rate()
        );
    }
    Ok(())
}

fn run_gui(config: EngineConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([700.0, 500.0])
            .with_title("Tic-Tac-Toe Solver"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(move |cc| {
            let app = TicTacToeApp::new(cc, config)?;
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}

fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    if let Err(e) = run(&args) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.engine_config()?;
    log::debug!("engine config: {config:?}");

    if let Some(games) = args.selfplay {
        run_selfplay(config, games, args.quiet)
    } else if args.terminal {
        let mut engine = AIEngine::with_config(config)?;
        terminal::run(&mut engine)?;
        Ok(())
    } else {
        run_gui(config)
    }
}
