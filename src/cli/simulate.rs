//! Simulate command implementation.

use super::output::{JsonSimulation, format_simulation_csv, format_simulation_text};
use super::{CliError, SimulateFormat, open_machine};
use indicatif::{ProgressBar, ProgressStyle};
use lucky_frogs::simulate::{SimulationConfig, run_simulation};
use std::path::Path;
use std::time::Instant;

/// Execute the simulate command against the stored symbol table.
///
/// # Errors
///
/// Returns an error if the table cannot be loaded or has no symbols.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    data_dir: Option<&Path>,
    spins: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    bet: Option<u64>,
    format: SimulateFormat,
    progress: bool,
) -> Result<(), CliError> {
    let machine = open_machine(data_dir, seed)?;
    let table = machine.symbols().clone();

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(42)
    });
    let config = SimulationConfig {
        spins,
        bet: bet.unwrap_or_else(|| machine.wallet().bet().amount()),
        base_seed,
        ..SimulationConfig::default()
    };

    let pb = if progress {
        let pb = ProgressBar::new(spins);
        let style = ProgressStyle::default_bar()
            .template(concat!(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}]",
                " {pos}/{len} spins ({per_sec})"
            ))
            .map_err(|e| CliError::new(e.to_string()))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let stats = run_simulation(&table, &config, |done| {
        if let Some(pb) = &pb {
            pb.inc(done);
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }
    let duration = start.elapsed();

    match format {
        SimulateFormat::Text => {
            println!();
            print!("{}", format_simulation_text(&config, &stats));
            println!();
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        SimulateFormat::Json => {
            let json = JsonSimulation::from_stats(&config, stats);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        SimulateFormat::Csv => {
            print!("{}", format_simulation_csv(&config, &stats));
        }
    }

    Ok(())
}
