//! Paytable command implementation.

use super::{CliError, open_machine};
use lucky_frogs::symbols::{Symbol, SymbolTable};
use std::path::Path;

/// Built-in ids in paytable order; user symbols follow in table order.
const PAYTABLE_ORDER: [&str; 8] = [
    "cherry", "lemon", "grape", "bell", "star", "frog", "wild", "skull",
];

/// Rarity badge for a symbol.
pub(crate) fn tier(symbol: &Symbol) -> &'static str {
    match symbol.id.as_str() {
        "cherry" | "lemon" | "grape" => "Common",
        "bell" | "star" => "Epic",
        "frog" => "Legend!",
        _ if symbol.is_wild => "WILD",
        _ => "—",
    }
}

/// Symbols in paytable order.
pub(crate) fn ordered(table: &SymbolTable) -> Vec<&Symbol> {
    let mut rows: Vec<&Symbol> = PAYTABLE_ORDER.iter().filter_map(|id| table.get(id)).collect();
    rows.extend(
        table
            .iter()
            .filter(|s| !PAYTABLE_ORDER.contains(&s.id.as_str())),
    );
    rows
}

/// Render the paytable as text.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn render(table: &SymbolTable) -> String {
    let total = table.total_weight();
    let mut output = String::new();
    output.push_str(&format!(
        "{:<4} {:<12} {:>6} {:>7} {:>8} {:>8}  {}\n",
        "", "Symbol", "Weight", "Odds", "3x", "2x", "Tier"
    ));
    for symbol in ordered(table) {
        let odds = if total == 0 {
            0.0
        } else {
            f64::from(symbol.weight) * 100.0 / total as f64
        };
        output.push_str(&format!(
            "{:<4} {:<12} {:>6} {:>6.1}% {:>8} {:>8}  {}\n",
            symbol.display.cell_text(),
            symbol.name,
            symbol.weight,
            odds,
            format!("×{}", symbol.payout3),
            format!("×{}", symbol.payout2),
            tier(symbol)
        ));
    }
    output.push_str(concat!(
        "\nTwo or more skulls always apply the skull penalty.",
        " WILD substitutes for any other symbol.\n"
    ));
    output
}

/// Execute the paytable command.
///
/// # Errors
///
/// Returns an error if the machine cannot be opened.
pub(crate) fn execute(data_dir: Option<&Path>) -> Result<(), CliError> {
    let machine = open_machine(data_dir, None)?;
    print!("{}", render(machine.symbols()));
    Ok(())
}
