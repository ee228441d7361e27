//! Spin command implementation.

use super::output::{JsonSpinBatch, format_spin_grid, format_spin_line};
use super::{CliError, SpinFormat, open_machine};
use std::path::Path;

/// Execute the spin command.
///
/// Stops early, without failing, once the balance no longer covers the bet.
///
/// # Errors
///
/// Returns an error if the machine cannot be opened, the first spin is
/// rejected, or the state cannot be written.
pub(crate) fn execute(
    data_dir: Option<&Path>,
    count: u32,
    seed: Option<u64>,
    format: SpinFormat,
) -> Result<(), CliError> {
    let mut machine = open_machine(data_dir, seed)?;
    let mut reports = Vec::new();
    let mut stopped = None;

    for _ in 0..count {
        match machine.spin_now() {
            Ok(report) => reports.push(report),
            Err(e) if reports.is_empty() => return Err(e.into()),
            Err(e) => {
                stopped = Some(e.to_string());
                break;
            }
        }
    }
    machine.flush()?;

    match format {
        SpinFormat::Text => {
            let table = machine.symbols();
            if let [report] = reports.as_slice() {
                print!("{}", format_spin_grid(report, table));
                println!("{}", report.message());
                println!("Balance: {}", report.balance);
            } else {
                for (i, report) in reports.iter().enumerate() {
                    println!("{}", format_spin_line(i, report, table));
                }
            }
            if let Some(reason) = &stopped {
                println!("Stopped: {reason}");
            }
        }
        SpinFormat::Json => {
            let batch = JsonSpinBatch {
                seed,
                spins: &reports,
                stopped,
                balance: machine.wallet().balance(),
            };
            println!("{}", serde_json::to_string_pretty(&batch)?);
        }
    }

    Ok(())
}
