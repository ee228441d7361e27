//! Lucky Frogs CLI - play the slot machine in a terminal or drive it headless.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "LUCKY_FROGS_LOG";

/// Log file written by the TUI, inside the data directory.
const LOG_FILE: &str = "lucky-frogs.log";

/// Lucky Frogs - a three-reel slot machine
#[derive(Parser, Debug)]
#[command(name = "lucky-frogs")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory (default: ~/.lucky-frogs)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play in an interactive terminal UI
    Play {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Spin without the UI and print the results
    Spin {
        /// Number of spins
        #[arg(short, long, default_value = "1")]
        count: u32,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::SpinFormat,
    },

    /// Simulate many spins in parallel and report return-to-player
    Simulate {
        /// Number of spins (default: 1000000)
        #[arg(short = 'n', long, default_value = "1000000")]
        spins: u64,

        /// Starting seed (increments for each batch)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Bet per spin (default: the stored bet)
        #[arg(short, long)]
        bet: Option<u64>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SimulateFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Show the symbols, their odds and payouts
    Paytable,

    /// Manage the symbol table
    Symbols {
        #[command(subcommand)]
        command: cli::symbols::SymbolsCommand,
    },

    /// Add credits to the balance
    Deposit {
        /// Credits to add
        amount: u64,
    },

    /// Set the balance to zero
    ResetBalance,

    /// Choose the bet (1, 5, 10, 25, 50 or 100 by default)
    Bet {
        /// Bet amount
        amount: u64,
    },

    /// Toggle mute
    Mute,

    /// Choose the sound style
    Sound {
        /// Style
        style: cli::SoundArg,
    },

    /// Show balance, bet and settings
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Install the global subscriber.
///
/// The TUI owns the terminal, so it logs to a file in the data directory;
/// every other command logs to stderr.
fn init_logging(log_dir: Option<&Path>) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let file = log_dir.and_then(|dir| {
        fs::create_dir_all(dir).ok()?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(LOG_FILE))
            .ok()
    });
    match file {
        Some(file) => builder.with_writer(Mutex::new(file)).with_ansi(false).init(),
        None if log_dir.is_some() => builder.with_writer(std::io::sink).init(),
        None => builder.with_writer(std::io::stderr).init(),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let data_dir = args.data_dir.as_deref();

    let log_dir = match args.command {
        Commands::Play { .. } => cli::base_dir(data_dir).ok(),
        _ => None,
    };
    init_logging(log_dir.as_deref());

    let result = match args.command {
        Commands::Play { seed } => cli::play::execute(data_dir, seed),

        Commands::Spin { count, seed, format } => cli::spin::execute(data_dir, count, seed, format),

        Commands::Simulate {
            spins,
            seed,
            threads,
            bet,
            format,
            progress,
        } => cli::simulate::execute(data_dir, spins, seed, threads, bet, format, progress),

        Commands::Paytable => cli::paytable::execute(data_dir),

        Commands::Symbols { command } => cli::symbols::execute(data_dir, command),

        Commands::Deposit { amount } => cli::settings::deposit(data_dir, amount),
        Commands::ResetBalance => cli::settings::reset_balance(data_dir),
        Commands::Bet { amount } => cli::settings::bet(data_dir, amount),
        Commands::Mute => cli::settings::mute(data_dir),
        Commands::Sound { style } => cli::settings::sound(data_dir, style),
        Commands::Status { json } => cli::settings::status(data_dir, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
