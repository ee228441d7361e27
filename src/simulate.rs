//! Headless payout simulation.
//!
//! Runs many spins against a symbol table without any timing, wallet or
//! store. Spins are split into batches, each batch gets its own RNG seeded
//! from `base_seed + batch index`, and batches run in parallel and are merged with a
//! reduce, so results only depend on the seed and batch size.

use crate::error::DrawError;
use crate::payout::{PayoutKind, evaluate};
use crate::pool::Pool;
use crate::symbols::SymbolTable;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use serde::Serialize;

/// Simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Total spins.
    pub spins: u64,
    /// Bet per spin.
    pub bet: u64,
    /// Seed of the first batch.
    pub base_seed: u64,
    /// Spins per batch.
    pub batch_size: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            spins: 100_000,
            bet: 10,
            base_seed: 42,
            batch_size: 10_000,
        }
    }
}

/// Aggregated outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    /// Spins played.
    pub spins: u64,
    /// Sum of bets.
    pub wagered: u64,
    /// Net sum of payouts (penalties subtract).
    pub returned: i64,
    /// Spins with a positive payout.
    pub wins: u64,
    /// Spins with a negative payout.
    pub penalties: u64,
    /// Spins with a zero payout.
    pub no_wins: u64,
    /// Skull penalties (two or three skulls).
    pub skull_penalties: u64,
    /// Three-of-a-kind results, including three wilds.
    pub three_of_a_kind: u64,
    /// Two-of-a-kind results, including two wilds.
    pub two_of_a_kind: u64,
    /// Largest single payout.
    pub biggest_win: i64,
}

impl SimulationStats {
    /// Fold another batch into this one.
    pub fn merge(&mut self, other: &Self) {
        self.spins += other.spins;
        self.wagered += other.wagered;
        self.returned += other.returned;
        self.wins += other.wins;
        self.penalties += other.penalties;
        self.no_wins += other.no_wins;
        self.skull_penalties += other.skull_penalties;
        self.three_of_a_kind += other.three_of_a_kind;
        self.two_of_a_kind += other.two_of_a_kind;
        self.biggest_win = self.biggest_win.max(other.biggest_win);
    }

    /// Net return over wagered, as a fraction.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rtp(&self) -> f64 {
        if self.wagered == 0 {
            0.0
        } else {
            self.returned as f64 / self.wagered as f64
        }
    }

    /// Fraction of spins that won.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        if self.spins == 0 {
            0.0
        } else {
            self.wins as f64 / self.spins as f64
        }
    }

    fn record(&mut self, amount: i64, kind: &PayoutKind, bet: u64) {
        self.spins += 1;
        self.wagered += bet;
        self.returned += amount;
        match amount.signum() {
            1 => self.wins += 1,
            -1 => self.penalties += 1,
            _ => self.no_wins += 1,
        }
        match kind {
            PayoutKind::SkullPenalty { .. } => self.skull_penalties += 1,
            PayoutKind::ThreeOfAKind { .. } | PayoutKind::ThreeWilds { .. } => {
                self.three_of_a_kind += 1;
            }
            PayoutKind::TwoOfAKind { .. } | PayoutKind::TwoWilds { .. } => {
                self.two_of_a_kind += 1;
            }
            PayoutKind::NoWin => {}
        }
        self.biggest_win = self.biggest_win.max(amount);
    }
}

/// Run a simulation, calling `progress` with the spin count of each finished
/// batch.
///
/// # Errors
///
/// Returns [`DrawError::EmptyPool`] if the table has nothing to draw.
pub fn run_simulation<F>(
    table: &SymbolTable,
    config: &SimulationConfig,
    progress: F,
) -> Result<SimulationStats, DrawError>
where
    F: Fn(u64) + Sync,
{
    let pool = Pool::build(table);
    if pool.is_empty() {
        return Err(DrawError::EmptyPool);
    }
    let batch_size = config.batch_size.max(1);
    let batches = config.spins.div_ceil(batch_size);

    let stats = (0..batches)
        .into_par_iter()
        .map(|batch| -> Result<SimulationStats, DrawError> {
            let start = batch * batch_size;
            let count = batch_size.min(config.spins - start);
            let mut rng = StdRng::seed_from_u64(config.base_seed.wrapping_add(batch));
            let mut local = SimulationStats::default();
            for _ in 0..count {
                let centers = [
                    pool.draw_symbol(table, &mut rng)?,
                    pool.draw_symbol(table, &mut rng)?,
                    pool.draw_symbol(table, &mut rng)?,
                ];
                let payout = evaluate(table, centers, config.bet);
                local.record(payout.amount, &payout.kind, config.bet);
            }
            progress(count);
            Ok(local)
        })
        .try_reduce(SimulationStats::default, |mut a, b| {
            a.merge(&b);
            Ok(a)
        })?;

    tracing::debug!(spins = stats.spins, returned = stats.returned, "simulation finished");
    Ok(stats)
}
