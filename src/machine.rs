//! The slot machine controller.
//!
//! [`SlotMachine`] owns the application state, the draw pool, the injected
//! RNG and the store. Every mutation goes through it and is persisted as it
//! happens.
//!
//! # Spin lifecycle
//!
//! ```text
//!  start_spin(now)          advance(t) ...                 advance(t_last_stop)
//!  ───────────────►  guard, debit bet, draw finals  ──►  reels flicker / stop  ──►  settle
//!                                                                                    │
//!                          auto-spin on and balance covers bet: rearm after delay ◄──┘
//! ```
//!
//! Time is passed in as a monotonic [`Duration`], so the whole lifecycle is
//! deterministic for a seeded RNG. The final columns are drawn when the spin
//! starts: three center draws, then a top and bottom for each reel. The
//! cosmetic rows and the flicker draws never affect the payout.

mod reels;
mod state;

pub use reels::Column;
pub use state::GameState;

use crate::config::GameConfig;
use crate::error::{ActionError, DrawError, SpinError, StoreError};
use crate::invariants::{InvariantViolation, check_invariants};
use crate::payout::{Payout, evaluate};
use crate::pool::Pool;
use crate::sound::{SoundSettings, SoundStyle};
use crate::store::{Store, keys, save};
use crate::symbols::{NewSymbol, Symbol, SymbolId, SymbolTable};
use crate::wallet::{Bet, Wallet};
use rand::Rng;
use reels::ReelTimer;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Number of reels.
pub const REELS: usize = 3;

/// Result of a settled spin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpinReport {
    /// Final column of each reel.
    pub columns: [Column; REELS],
    /// Bet taken for the spin.
    pub bet: u64,
    /// Payout for the center row.
    pub payout: Payout,
    /// Balance after settlement.
    pub balance: u64,
}

impl SpinReport {
    /// Center symbol ids, left to right.
    #[must_use]
    pub fn centers(&self) -> [&SymbolId; REELS] {
        [&self.columns[0].center, &self.columns[1].center, &self.columns[2].center]
    }

    /// Status line in the style of the machine's message bar.
    #[must_use]
    pub fn message(&self) -> String {
        let payout = &self.payout;
        if payout.is_win() {
            format!("WIN: +{} ( {} )", payout.amount, payout.description)
        } else if payout.is_penalty() {
            format!("LOSS: {} ( {} )", payout.amount, payout.description)
        } else {
            "No win - try again!".to_string()
        }
    }
}

/// Why auto-spin turned itself off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoSpinStop {
    /// The balance no longer covers the bet.
    BalanceTooLow,
    /// The scheduled spin was rejected.
    Rejected(SpinError),
}

impl fmt::Display for AutoSpinStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutoSpinStop::BalanceTooLow => write!(f, "Auto-spin stopped (balance too low)."),
            AutoSpinStop::Rejected(e) => write!(f, "Auto-spin stopped ({e})."),
        }
    }
}

/// Something that happened during [`SlotMachine::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinEvent {
    /// Auto-spin started a new spin.
    AutoSpinStarted,
    /// A reel stopped on its final column.
    ReelStopped {
        /// Reel index, 0-based from the left.
        reel: usize,
    },
    /// All reels stopped and the payout was applied.
    Settled(SpinReport),
    /// Auto-spin disabled itself.
    AutoSpinStopped(AutoSpinStop),
}

/// A spin between start and settlement.
#[derive(Debug, Clone)]
struct InFlight {
    finals: [Column; REELS],
    centers: [Symbol; REELS],
    bet: u64,
    stopped: [bool; REELS],
}

/// Single controller for the game.
#[derive(Debug)]
pub struct SlotMachine<R, S> {
    config: GameConfig,
    state: GameState,
    pool: Pool,
    rng: R,
    store: S,
    reels: [Option<Column>; REELS],
    timers: [ReelTimer; REELS],
    in_flight: Option<InFlight>,
    auto_spin: bool,
    next_auto_spin: Option<Duration>,
    now: Duration,
    last_report: Option<SpinReport>,
}

impl<R: Rng, S: Store> SlotMachine<R, S> {
    /// Build a machine around existing state.
    ///
    /// The reels start showing random columns (blank if the pool is empty).
    pub fn new(config: GameConfig, state: GameState, rng: R, store: S) -> Self {
        let pool = Pool::build(&state.symbols);
        let mut machine = Self {
            config,
            state,
            pool,
            rng,
            store,
            reels: [None, None, None],
            timers: [ReelTimer::default(); REELS],
            in_flight: None,
            auto_spin: false,
            next_auto_spin: None,
            now: Duration::ZERO,
            last_report: None,
        };
        for reel in 0..REELS {
            machine.reels[reel] = random_column(&machine.pool, &mut machine.rng).ok();
        }
        machine
    }

    /// Load state from `store` and build a machine around it.
    pub fn load(config: GameConfig, rng: R, mut store: S) -> Self {
        let state = GameState::load(&mut store, &config);
        info!(
            balance = state.wallet.balance(),
            bet = state.wallet.bet().amount(),
            symbols = state.symbols.len(),
            "machine loaded"
        );
        Self::new(config, state, rng, store)
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Balance and bet.
    #[must_use]
    pub fn wallet(&self) -> &Wallet {
        &self.state.wallet
    }

    /// Active symbol table.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.state.symbols
    }

    /// Sound preferences.
    #[must_use]
    pub fn sound(&self) -> SoundSettings {
        self.state.sound
    }

    /// The draw pool for the active table.
    #[must_use]
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Columns currently shown on each reel.
    #[must_use]
    pub fn reels(&self) -> &[Option<Column>; REELS] {
        &self.reels
    }

    /// True while a spin is in flight.
    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Which reels are still spinning.
    #[must_use]
    pub fn spinning_reels(&self) -> [bool; REELS] {
        match &self.in_flight {
            Some(flight) => flight.stopped.map(|stopped| !stopped),
            None => [false; REELS],
        }
    }

    /// Whether auto-spin is enabled.
    #[must_use]
    pub fn auto_spin(&self) -> bool {
        self.auto_spin
    }

    /// The most recent settled spin.
    #[must_use]
    pub fn last_report(&self) -> Option<&SpinReport> {
        self.last_report.as_ref()
    }

    /// Latest time seen by the machine.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Start a spin at `now`.
    ///
    /// # Errors
    ///
    /// Rejects the spin without changing the balance if another spin is in
    /// flight, the balance does not cover the bet, or the pool is empty.
    pub fn start_spin(&mut self, now: Duration) -> Result<(), SpinError> {
        self.now = self.now.max(now);
        if self.in_flight.is_some() {
            return Err(SpinError::InProgress);
        }
        let wallet = self.state.wallet;
        if !wallet.covers_bet() {
            return Err(SpinError::InsufficientBalance {
                balance: wallet.balance(),
                bet: wallet.bet().amount(),
            });
        }

        let [c0, c1, c2] = [self.draw_id()?, self.draw_id()?, self.draw_id()?];
        let centers = [self.lookup(&c0)?, self.lookup(&c1)?, self.lookup(&c2)?];
        let finals = [self.final_column(c0)?, self.final_column(c1)?, self.final_column(c2)?];

        let bet = wallet.bet().amount();
        let balance = self
            .state
            .wallet
            .debit_bet()
            .map_err(|_| SpinError::InsufficientBalance {
                balance: wallet.balance(),
                bet,
            })?;
        persist(&mut self.store, keys::BALANCE, &balance);

        let timing = self.config.timing;
        for (reel, timer) in self.timers.iter_mut().enumerate() {
            timer.arm(self.now, &timing, reel);
        }
        self.in_flight = Some(InFlight {
            finals,
            centers,
            bet,
            stopped: [false; REELS],
        });
        self.next_auto_spin = None;
        info!(bet, balance, "spin started");
        Ok(())
    }

    /// Fire every timer due at `now` and report what happened.
    pub fn advance(&mut self, now: Duration) -> Vec<SpinEvent> {
        self.now = self.now.max(now);
        let now = self.now;
        let mut events = Vec::new();

        if self.in_flight.is_some() {
            let interval = self.config.timing.flicker();
            for reel in 0..REELS {
                if self.timers[reel].stop_due(now) {
                    self.stop_reel(reel);
                    events.push(SpinEvent::ReelStopped { reel });
                } else if self.timers[reel].flicker_due(now) {
                    if let Ok(column) = random_column(&self.pool, &mut self.rng) {
                        self.reels[reel] = Some(column);
                    }
                    self.timers[reel].rearm_flicker(now, interval);
                }
            }
            if self
                .in_flight
                .as_ref()
                .is_some_and(|f| f.stopped.iter().all(|&s| s))
            {
                self.settle(now, &mut events);
            }
        } else if self.auto_spin && self.next_auto_spin.is_some_and(|t| t <= now) {
            self.next_auto_spin = None;
            match self.start_spin(now) {
                Ok(()) => events.push(SpinEvent::AutoSpinStarted),
                Err(e) => {
                    self.auto_spin = false;
                    info!(error = %e, "auto-spin stopped");
                    events.push(SpinEvent::AutoSpinStopped(AutoSpinStop::Rejected(e)));
                }
            }
        }

        events
    }

    /// Run a whole spin immediately and return its report.
    ///
    /// # Errors
    ///
    /// Same as [`SlotMachine::start_spin`].
    pub fn spin_now(&mut self) -> Result<SpinReport, SpinError> {
        let start = self.now;
        self.start_spin(start)?;
        let end = start + self.config.timing.settle_delay();
        self.advance(end)
            .into_iter()
            .find_map(|event| match event {
                SpinEvent::Settled(report) => Some(report),
                _ => None,
            })
            .ok_or(SpinError::InProgress)
    }

    /// Turn auto-spin on or off.
    ///
    /// Turning it on while idle starts a spin right away; returns whether one
    /// was started.
    ///
    /// # Errors
    ///
    /// If that first spin is rejected, auto-spin is switched back off and the
    /// rejection is returned.
    pub fn set_auto_spin(&mut self, enabled: bool, now: Duration) -> Result<bool, SpinError> {
        self.auto_spin = enabled;
        if !enabled {
            self.next_auto_spin = None;
            return Ok(false);
        }
        if self.in_flight.is_some() {
            return Ok(false);
        }
        match self.start_spin(now) {
            Ok(()) => Ok(true),
            Err(e) => {
                self.auto_spin = false;
                Err(e)
            }
        }
    }

    /// Add credits. Zero is a no-op. Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Busy`] while spinning.
    pub fn deposit(&mut self, amount: u64) -> Result<u64, ActionError> {
        if self.is_spinning() {
            return Err(ActionError::Busy);
        }
        if amount == 0 {
            return Ok(self.state.wallet.balance());
        }
        let balance = self.state.wallet.deposit(amount);
        persist(&mut self.store, keys::BALANCE, &balance);
        info!(amount, balance, "deposit");
        Ok(balance)
    }

    /// Set the balance to zero.
    pub fn reset_balance(&mut self) {
        self.state.wallet.reset();
        persist(&mut self.store, keys::BALANCE, &0u64);
        info!("balance reset");
    }

    /// Choose a bet from the menu.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Busy`] while spinning, or a wallet error if the
    /// amount is not on the menu.
    pub fn set_bet(&mut self, amount: u64) -> Result<Bet, ActionError> {
        if self.is_spinning() {
            return Err(ActionError::Busy);
        }
        let bet = Bet::from_menu(amount, &self.config.bet_options)?;
        self.state.wallet.set_bet(bet);
        persist(&mut self.store, keys::BET, &bet.amount());
        debug!(bet = bet.amount(), "bet changed");
        Ok(bet)
    }

    /// Move one step along the bet menu (clamped at the ends).
    ///
    /// # Errors
    ///
    /// Same as [`SlotMachine::set_bet`].
    pub fn step_bet(&mut self, up: bool) -> Result<Bet, ActionError> {
        let menu = &self.config.bet_options;
        let current = self.state.wallet.bet().amount();
        let index = menu.iter().position(|&b| b == current).unwrap_or(0);
        let next = if up {
            (index + 1).min(menu.len().saturating_sub(1))
        } else {
            index.saturating_sub(1)
        };
        let amount = menu.get(next).copied().unwrap_or(current);
        self.set_bet(amount)
    }

    /// Flip the mute flag. Returns the new value.
    pub fn toggle_mute(&mut self) -> bool {
        self.state.sound.mute = !self.state.sound.mute;
        persist(&mut self.store, keys::MUTE, &self.state.sound.mute);
        self.state.sound.mute
    }

    /// Select a sound style.
    pub fn set_sound_style(&mut self, style: SoundStyle) {
        self.state.sound.style = style;
        persist(&mut self.store, keys::SOUND, &style);
    }

    /// Add a user-authored symbol. Returns its generated id.
    ///
    /// # Errors
    ///
    /// Returns a symbol error if the name is blank.
    pub fn add_symbol(
        &mut self,
        new: NewSymbol,
        created_millis: u64,
    ) -> Result<SymbolId, ActionError> {
        let id = self.state.symbols.add_new(new, created_millis)?;
        info!(%id, "symbol added");
        self.symbols_changed();
        Ok(id)
    }

    /// Replace a symbol wholesale.
    ///
    /// # Errors
    ///
    /// Returns a symbol error if the id is unknown, the weight is zero or
    /// the edit would make the skull wild or pay out.
    pub fn replace_symbol(&mut self, symbol: Symbol) -> Result<Symbol, ActionError> {
        let old = self.state.symbols.replace(symbol)?;
        info!(id = %old.id, "symbol replaced");
        self.symbols_changed();
        Ok(old)
    }

    /// Delete a symbol.
    ///
    /// # Errors
    ///
    /// Returns a symbol error if the id is unknown.
    pub fn remove_symbol(&mut self, id: &str) -> Result<Symbol, ActionError> {
        let removed = self.state.symbols.remove(id)?;
        info!(id, "symbol removed");
        self.symbols_changed();
        Ok(removed)
    }

    /// Restore the built-in symbol table.
    pub fn reset_symbols(&mut self) {
        self.state.symbols.reset();
        info!("symbols reset to defaults");
        self.symbols_changed();
    }

    /// Write every key to the store.
    ///
    /// # Errors
    ///
    /// Returns the first store error.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.state.save(&mut self.store)
    }

    /// Check table and pool consistency.
    #[must_use]
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        check_invariants(&self.state.symbols, &self.pool)
    }

    fn symbols_changed(&mut self) {
        self.pool = Pool::build(&self.state.symbols);
        persist(&mut self.store, keys::SYMBOLS, &self.state.symbols);
        debug!(slots = self.pool.len(), "pool rebuilt");
    }

    fn draw_id(&mut self) -> Result<SymbolId, DrawError> {
        self.pool.draw(&mut self.rng).cloned()
    }

    fn lookup(&self, id: &SymbolId) -> Result<Symbol, DrawError> {
        self.state
            .symbols
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| DrawError::UnknownSymbol(id.clone()))
    }

    fn final_column(&mut self, center: SymbolId) -> Result<Column, DrawError> {
        let top = self.draw_id()?;
        let bottom = self.draw_id()?;
        Ok(Column { top, center, bottom })
    }

    fn stop_reel(&mut self, reel: usize) {
        self.timers[reel].clear();
        if let Some(flight) = self.in_flight.as_mut() {
            self.reels[reel] = Some(flight.finals[reel].clone());
            flight.stopped[reel] = true;
        }
    }

    fn settle(&mut self, now: Duration, events: &mut Vec<SpinEvent>) {
        let Some(flight) = self.in_flight.take() else {
            return;
        };
        let [a, b, c] = &flight.centers;
        let payout = evaluate(&self.state.symbols, [a, b, c], flight.bet);
        let balance = self.state.wallet.apply(payout.amount);
        persist(&mut self.store, keys::BALANCE, &balance);
        info!(
            amount = payout.amount,
            description = %payout.description,
            balance,
            "spin settled"
        );

        let report = SpinReport {
            columns: flight.finals,
            bet: flight.bet,
            payout,
            balance,
        };
        self.last_report = Some(report.clone());
        events.push(SpinEvent::Settled(report));

        if self.auto_spin {
            if self.state.wallet.covers_bet() {
                self.next_auto_spin = Some(now + self.config.timing.auto_spin_delay());
            } else {
                self.auto_spin = false;
                info!("auto-spin stopped, balance too low");
                events.push(SpinEvent::AutoSpinStopped(AutoSpinStop::BalanceTooLow));
            }
        }
    }
}

fn random_column<R: Rng + ?Sized>(pool: &Pool, rng: &mut R) -> Result<Column, DrawError> {
    Ok(Column {
        top: pool.draw(rng)?.clone(),
        center: pool.draw(rng)?.clone(),
        bottom: pool.draw(rng)?.clone(),
    })
}

fn persist<S, T>(store: &mut S, key: &str, value: &T)
where
    S: Store + ?Sized,
    T: Serialize + ?Sized,
{
    if let Err(e) = save(store, key, value) {
        warn!(key, error = %e, "failed to persist");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SymbolError;
    use crate::store::{MemoryStore, load_or};
    use crate::symbols::{Multiplier, SymbolDisplay};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn machine(balance: u64) -> SlotMachine<StdRng, MemoryStore> {
        let config = GameConfig {
            starting_balance: balance,
            ..GameConfig::default()
        };
        let state = GameState::new(&config);
        SlotMachine::new(config, state, StdRng::seed_from_u64(9), MemoryStore::new())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_reels_stop_in_order_then_settle() {
        let mut m = machine(100);
        m.start_spin(ms(0)).unwrap();
        assert_eq!(m.wallet().balance(), 90);
        assert!(m.advance(ms(899)).is_empty());
        assert_eq!(m.advance(ms(900)), vec![SpinEvent::ReelStopped { reel: 0 }]);
        assert_eq!(m.spinning_reels(), [false, true, true]);
        assert_eq!(m.advance(ms(1500)), vec![SpinEvent::ReelStopped { reel: 1 }]);
        let events = m.advance(ms(2100));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], SpinEvent::ReelStopped { reel: 2 });
        let SpinEvent::Settled(report) = &events[1] else {
            panic!("expected settlement, got {events:?}");
        };
        assert_eq!(report.balance, m.wallet().balance());
        assert!(!m.is_spinning());
        // Reels show the final columns
        for (shown, final_col) in m.reels().iter().zip(&report.columns) {
            assert_eq!(shown.as_ref(), Some(final_col));
        }
    }

    #[test]
    fn test_reentry_rejected() {
        let mut m = machine(100);
        m.start_spin(ms(0)).unwrap();
        assert_eq!(m.start_spin(ms(10)), Err(SpinError::InProgress));
        assert_eq!(m.wallet().balance(), 90);
    }

    #[test]
    fn test_insufficient_balance_mutates_nothing() {
        let mut m = machine(5);
        assert_eq!(
            m.start_spin(ms(0)),
            Err(SpinError::InsufficientBalance {
                balance: 5,
                bet: 10
            })
        );
        assert_eq!(m.wallet().balance(), 5);
        assert!(m.store().is_empty());
    }

    #[test]
    fn test_empty_pool_rejects_spin() {
        let mut m = machine(100);
        let ids: Vec<String> = m.symbols().iter().map(|s| s.id.to_string()).collect();
        for id in ids {
            m.remove_symbol(&id).unwrap();
        }
        assert_eq!(m.start_spin(ms(0)), Err(SpinError::Draw(DrawError::EmptyPool)));
        assert_eq!(m.wallet().balance(), 100);
    }

    #[test]
    fn test_auto_spin_runs_until_broke() {
        let mut m = machine(20);
        assert_eq!(m.set_auto_spin(true, ms(0)), Ok(true));
        let mut t = 0;
        let mut stopped = false;
        for _ in 0..10_000 {
            t += 50;
            for event in m.advance(ms(t)) {
                if let SpinEvent::AutoSpinStopped(reason) = event {
                    assert_eq!(reason, AutoSpinStop::BalanceTooLow);
                    stopped = true;
                }
            }
            if stopped {
                break;
            }
        }
        // Every spin either leaves enough for another or ends with a stop
        assert!(stopped || m.auto_spin());
        if stopped {
            assert!(!m.auto_spin());
            assert!(m.wallet().balance() < 10);
        }
    }

    #[test]
    fn test_auto_spin_waits_for_delay() {
        let mut m = machine(1_000);
        m.set_auto_spin(true, ms(0)).unwrap();
        let events = m.advance(ms(2100));
        assert!(events.iter().any(|e| matches!(e, SpinEvent::Settled(_))));
        assert!(m.advance(ms(2699)).is_empty());
        assert_eq!(m.advance(ms(2700)), vec![SpinEvent::AutoSpinStarted]);
        assert!(m.is_spinning());
    }

    #[test]
    fn test_deposit_and_bet_locked_while_spinning() {
        let mut m = machine(100);
        m.start_spin(ms(0)).unwrap();
        assert_eq!(m.deposit(50), Err(ActionError::Busy));
        assert_eq!(m.set_bet(5), Err(ActionError::Busy));
        m.advance(ms(5000));
        assert!(m.deposit(50).is_ok());
        assert_eq!(m.set_bet(5).unwrap().amount(), 5);
        assert_eq!(load_or(m.store(), keys::BET, 0u64), 5);
    }

    #[test]
    fn test_step_bet_clamps() {
        let mut m = machine(100);
        assert_eq!(m.step_bet(true).unwrap().amount(), 25);
        for _ in 0..10 {
            m.step_bet(true).unwrap();
        }
        assert_eq!(m.wallet().bet().amount(), 100);
        for _ in 0..10 {
            m.step_bet(false).unwrap();
        }
        assert_eq!(m.wallet().bet().amount(), 1);
    }

    #[test]
    fn test_symbol_edits_rebuild_pool() {
        let mut m = machine(100);
        let id = m
            .add_symbol(
                NewSymbol {
                    name: "Lotus".to_string(),
                    weight: 10,
                    payout3: Multiplier::whole(9),
                    payout2: Multiplier::whole(2),
                    is_wild: false,
                    display: SymbolDisplay::glyph("🪷"),
                },
                1,
            )
            .unwrap();
        assert_eq!(m.pool().len(), 41);
        assert_eq!(m.pool().occurrences(id.as_str()), 10);
        m.remove_symbol("cherry").unwrap();
        assert_eq!(m.pool().len(), 35);
        m.reset_symbols();
        assert_eq!(m.pool().len(), 31);
        assert!(m.check_invariants().is_empty());
    }

    #[test]
    fn test_mute_and_style_persist() {
        let mut m = machine(100);
        assert!(m.toggle_mute());
        m.set_sound_style(SoundStyle::Edm);
        assert!(load_or(m.store(), keys::MUTE, false));
        assert_eq!(load_or(m.store(), keys::SOUND, SoundStyle::Arcade), SoundStyle::Edm);
    }

    #[test]
    fn test_skull_edits_refused() {
        let mut m = machine(100);
        let before = m.symbols().clone();
        let mut skull = m.symbols().get("skull").unwrap().clone();
        skull.is_wild = true;
        skull.payout3 = Multiplier::whole(99);
        assert_eq!(
            m.replace_symbol(skull),
            Err(ActionError::Symbol(SymbolError::InvalidSkull))
        );
        assert_eq!(m.symbols(), &before);
        assert!(m.store().get(keys::SYMBOLS).unwrap().is_none());
        assert!(m.check_invariants().is_empty());
    }

    #[test]
    fn test_stale_pool_reports_unknown_symbol() {
        let mut m = machine(100);
        let removed = m.state.symbols.remove("cherry").unwrap();
        let id = removed.id;
        assert_eq!(
            m.lookup(&id),
            Err(DrawError::UnknownSymbol(SymbolId::new("cherry")))
        );
    }

    #[test]
    fn test_spin_now_settles() {
        let mut m = machine(100);
        let report = m.spin_now().unwrap();
        assert_eq!(report.bet, 10);
        let expected = 90u64.saturating_add_signed(report.payout.amount);
        assert_eq!(report.balance, expected);
        assert_eq!(m.last_report(), Some(&report));
    }
}
