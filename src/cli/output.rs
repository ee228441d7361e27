//! Output formatting utilities for CLI.

use lucky_frogs::machine::SpinReport;
use lucky_frogs::simulate::{SimulationConfig, SimulationStats};
use lucky_frogs::symbols::{SymbolId, SymbolTable};
use serde::Serialize;

/// Glyph shown for an id missing from the table.
const UNKNOWN_GLYPH: &str = "❔";

/// Cell text for a symbol id.
pub(super) fn glyph<'a>(table: &'a SymbolTable, id: &SymbolId) -> &'a str {
    table
        .get(id.as_str())
        .map_or(UNKNOWN_GLYPH, |s| s.display.cell_text())
}

/// JSON-serializable batch of spins.
#[derive(Debug, Serialize)]
pub(super) struct JsonSpinBatch<'a> {
    /// Seed used, if one was given.
    pub(super) seed: Option<u64>,
    /// Settled spins in order.
    pub(super) spins: &'a [SpinReport],
    /// Why the batch stopped early, if it did.
    pub(super) stopped: Option<String>,
    /// Balance at the end.
    pub(super) balance: u64,
}

/// Format one settled spin as a single line.
pub(super) fn format_spin_line(index: usize, report: &SpinReport, table: &SymbolTable) -> String {
    let centers: Vec<&str> = report.centers().iter().map(|id| glyph(table, id)).collect();
    format!(
        "Spin {}: [ {} ]  {}  balance {}",
        index + 1,
        centers.join(" "),
        report.message(),
        report.balance
    )
}

/// Format all three rows of a spin.
pub(super) fn format_spin_grid(report: &SpinReport, table: &SymbolTable) -> String {
    let row = |cells: [&SymbolId; 3]| cells.map(|id| glyph(table, id)).join(" ");
    let [a, b, c] = &report.columns;
    format!(
        "   {}\n > {} <\n   {}\n",
        row([&a.top, &b.top, &c.top]),
        row([&a.center, &b.center, &c.center]),
        row([&a.bottom, &b.bottom, &c.bottom])
    )
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulation {
    /// Seed of the first batch.
    pub(super) seed: u64,
    /// Bet per spin.
    pub(super) bet: u64,
    /// Aggregate counts.
    #[serde(flatten)]
    pub(super) stats: SimulationStats,
    /// Net return over wagered.
    pub(super) rtp: f64,
    /// Fraction of winning spins.
    pub(super) hit_rate: f64,
}

impl JsonSimulation {
    /// Create from simulation stats.
    pub(super) fn from_stats(config: &SimulationConfig, stats: SimulationStats) -> Self {
        Self {
            seed: config.base_seed,
            bet: config.bet,
            stats,
            rtp: stats.rtp(),
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Percentage of `part` in `whole`.
#[allow(clippy::cast_precision_loss)]
fn pct(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Format simulation stats as human-readable text.
pub(super) fn format_simulation_text(config: &SimulationConfig, stats: &SimulationStats) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Simulation: {} spins at bet {} (seed {})\n",
        stats.spins, config.bet, config.base_seed
    ));
    output.push_str(&format!("  Wagered:        {}\n", stats.wagered));
    output.push_str(&format!("  Returned (net): {}\n", stats.returned));
    output.push_str(&format!("  RTP:            {:.2}%\n", stats.rtp() * 100.0));
    output.push_str(&format!("  Hit rate:       {:.2}%\n", stats.hit_rate() * 100.0));
    output.push_str(&format!("  Biggest win:    {}\n\n", stats.biggest_win));

    let rows = [
        ("Wins", stats.wins),
        ("Penalties", stats.penalties),
        ("No win", stats.no_wins),
        ("3-of-a-kind", stats.three_of_a_kind),
        ("2-of-a-kind", stats.two_of_a_kind),
        ("Skull penalty", stats.skull_penalties),
    ];
    for (label, count) in rows {
        output.push_str(&format!(
            "  {label:<14} {count:>10}  ({:.2}%)\n",
            pct(count, stats.spins)
        ));
    }
    output
}

/// Format simulation stats as CSV.
pub(super) fn format_simulation_csv(config: &SimulationConfig, stats: &SimulationStats) -> String {
    let mut output = String::new();
    output.push_str(concat!(
        "seed,bet,spins,wagered,returned,rtp,hit_rate,wins,penalties,no_wins,",
        "three_of_a_kind,two_of_a_kind,skull_penalties,biggest_win\n"
    ));
    output.push_str(&format!(
        "{},{},{},{},{},{:.6},{:.6},{},{},{},{},{},{},{}\n",
        config.base_seed,
        config.bet,
        stats.spins,
        stats.wagered,
        stats.returned,
        stats.rtp(),
        stats.hit_rate(),
        stats.wins,
        stats.penalties,
        stats.no_wins,
        stats.three_of_a_kind,
        stats.two_of_a_kind,
        stats.skull_penalties,
        stats.biggest_win
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_has_header_and_row() {
        let config = SimulationConfig::default();
        let stats = SimulationStats {
            spins: 4,
            wagered: 40,
            returned: 20,
            wins: 1,
            ..SimulationStats::default()
        };
        let csv = format_simulation_csv(&config, &stats);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("42,10,4,40,20,0.500000,0.250000,"));
    }

    #[test]
    fn test_unknown_glyph() {
        let table = SymbolTable::defaults();
        assert_eq!(glyph(&table, &SymbolId::new("cherry")), "🍒");
        assert_eq!(glyph(&table, &SymbolId::new("gone")), UNKNOWN_GLYPH);
    }
}
