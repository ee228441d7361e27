//! Symbol management commands.

use super::{CliError, now_millis, open_machine};
use clap::Subcommand;
use lucky_frogs::symbols::{Multiplier, NewSymbol, SymbolDisplay};
use std::path::{Path, PathBuf};

/// Symbol subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum SymbolsCommand {
    /// List the active symbols with their ids
    List {
        /// Print the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a symbol (out-of-range numbers are clamped)
    Add {
        /// Display name
        name: String,

        /// Pool weight (minimum 1)
        #[arg(short, long, default_value = "3", allow_negative_numbers = true)]
        weight: i64,

        /// Three-of-a-kind multiplier (minimum 1)
        #[arg(long = "payout3", default_value = "10", allow_negative_numbers = true)]
        payout3: f64,

        /// Two-of-a-kind multiplier (minimum 0)
        #[arg(long = "payout2", default_value = "2", allow_negative_numbers = true)]
        payout2: f64,

        /// Substitutes for other symbols
        #[arg(long)]
        wild: bool,

        /// Glyph shown on the reels
        #[arg(short, long, conflicts_with = "image")]
        glyph: Option<String>,

        /// Image file or data URL shown instead of a glyph
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Delete a symbol by id
    Delete {
        /// Symbol id (see `symbols list`)
        id: String,
    },

    /// Restore the default symbol table
    Reset,
}

/// Glyph used when a new symbol names neither a glyph nor an image.
const DEFAULT_GLYPH: &str = "⭐";

/// Parse a multiplier argument.
fn multiplier(value: f64, flag: &str) -> Result<Multiplier, CliError> {
    Multiplier::from_f64(value)
        .ok_or_else(|| CliError::new(format!("--{flag} must be a finite number")))
}

/// Execute a symbols subcommand.
///
/// # Errors
///
/// Returns an error if the machine cannot be opened, the edit is rejected, or
/// the table cannot be written.
pub(crate) fn execute(data_dir: Option<&Path>, command: SymbolsCommand) -> Result<(), CliError> {
    let mut machine = open_machine(data_dir, None)?;

    match command {
        SymbolsCommand::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(machine.symbols())?);
            } else {
                let total = machine.symbols().total_weight();
                for symbol in machine.symbols() {
                    println!(
                        "{:<4} {:<28} {:<12} weight {:>3}  ×{} / ×{}{}",
                        symbol.display.cell_text(),
                        symbol.id,
                        symbol.name,
                        symbol.weight,
                        symbol.payout3,
                        symbol.payout2,
                        if symbol.is_wild { "  WILD" } else { "" }
                    );
                }
                println!("{} symbols, total weight {total}", machine.symbols().len());
            }
        }
        SymbolsCommand::Add {
            name,
            weight,
            payout3,
            payout2,
            wild,
            glyph,
            image,
        } => {
            let display = match (glyph, image) {
                (_, Some(path)) => SymbolDisplay::image(path.display().to_string()),
                (Some(glyph), None) => SymbolDisplay::glyph(glyph),
                (None, None) => SymbolDisplay::glyph(DEFAULT_GLYPH),
            };
            let new = NewSymbol {
                name,
                weight,
                payout3: multiplier(payout3, "payout3")?,
                payout2: multiplier(payout2, "payout2")?,
                is_wild: wild,
                display,
            };
            let id = machine.add_symbol(new, now_millis())?;
            println!("Added {id}");
        }
        SymbolsCommand::Delete { id } => {
            let removed = machine.remove_symbol(&id)?;
            println!("Deleted {} ({})", removed.name, removed.id);
            if machine.symbols().is_empty() {
                println!("Warning: no symbols left; spins will fail until you add one or reset.");
            }
        }
        SymbolsCommand::Reset => {
            machine.reset_symbols();
            println!("Symbols reset to defaults");
        }
    }

    machine.flush()?;
    Ok(())
}
