//! Integration tests for the slot machine controller.
//!
//! These drive whole sessions through `SlotMachine` with an in-memory store
//! and a seeded RNG, checking the spin lifecycle, auto-spin and persistence.
//!
//! Run with: cargo test --release machine_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_possible_wrap)]

use std::time::Duration;

use lucky_frogs::machine::{AutoSpinStop, SpinEvent};
use lucky_frogs::store::{MemoryStore, Store, keys, load_or};
use lucky_frogs::symbols::{Multiplier, NewSymbol, SymbolDisplay, SymbolTable};
use lucky_frogs::{GameConfig, GameState, SlotMachine, SpinError};
use rand::SeedableRng;
use rand::rngs::StdRng;

type TestMachine = SlotMachine<StdRng, MemoryStore>;

fn machine_with(balance: u64, seed: u64) -> TestMachine {
    let config = GameConfig {
        starting_balance: balance,
        ..GameConfig::default()
    };
    let state = GameState::new(&config);
    SlotMachine::new(config, state, StdRng::seed_from_u64(seed), MemoryStore::new())
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_hundred_spins_balance_accounting() {
    let mut machine = machine_with(100_000, 1);
    let mut expected: i64 = 100_000;
    for _ in 0..100 {
        let report = machine.spin_now().unwrap();
        expected = (expected - 10 + report.payout.amount).max(0);
        assert_eq!(report.balance as i64, expected);
    }
    assert_eq!(load_or(machine.store(), keys::BALANCE, 0u64) as i64, expected);
    assert!(machine.check_invariants().is_empty());
}

#[test]
fn test_spin_rejected_below_bet() {
    let mut machine = machine_with(9, 2);
    let err = machine.spin_now().unwrap_err();
    assert_eq!(
        err,
        SpinError::InsufficientBalance {
            balance: 9,
            bet: 10
        }
    );
    assert_eq!(err.to_string(), "Insufficient balance - deposit more to play.");
    assert_eq!(machine.wallet().balance(), 9);

    machine.deposit(1).unwrap();
    assert!(machine.spin_now().is_ok());
}

#[test]
fn test_cosmetic_rows_do_not_change_payout() {
    // Same seed, same centers: the payout depends on centers only
    let mut a = machine_with(1_000, 77);
    let mut b = machine_with(1_000, 77);
    for _ in 0..20 {
        let ra = a.spin_now().unwrap();
        let rb = b.spin_now().unwrap();
        assert_eq!(ra.centers(), rb.centers());
        assert_eq!(ra.payout, rb.payout);
    }

    // And the evaluated payout matches the centers alone
    let mut m = machine_with(1_000, 5);
    for _ in 0..50 {
        let report = m.spin_now().unwrap();
        let table = m.symbols();
        let [x, y, z] = report.centers().map(|id| table.get(id.as_str()).unwrap());
        assert_eq!(lucky_frogs::evaluate(table, [x, y, z], report.bet), report.payout);
    }
}

#[test]
fn test_flicker_never_changes_final_columns() {
    let mut machine = machine_with(1_000, 11);
    machine.start_spin(ms(0)).unwrap();
    let mut settled = None;
    let mut t = 0;
    while settled.is_none() {
        t += 7;
        for event in machine.advance(ms(t)) {
            if let SpinEvent::Settled(report) = event {
                settled = Some(report);
            }
        }
    }
    let report = settled.unwrap();
    for (shown, column) in machine.reels().iter().zip(&report.columns) {
        assert_eq!(shown.as_ref(), Some(column));
    }
    assert!(t >= 2100);
}

#[test]
fn test_auto_spin_stops_when_broke() {
    // Mostly skulls: nearly every spin is a penalty
    let mut machine = machine_with(40, 3);
    machine.reset_symbols();
    for id in ["cherry", "lemon", "grape", "bell", "star", "frog", "wild"] {
        machine.remove_symbol(id).unwrap();
    }
    machine
        .add_symbol(
            NewSymbol {
                name: "Dud".to_string(),
                weight: 1,
                payout3: Multiplier::whole(1),
                payout2: Multiplier::ZERO,
                is_wild: false,
                display: SymbolDisplay::glyph("🪨"),
            },
            0,
        )
        .unwrap();

    assert_eq!(machine.set_auto_spin(true, ms(0)), Ok(true));
    let mut stop = None;
    let mut t = 0;
    let mut settled = 0;
    while stop.is_none() && t < 600_000 {
        t += 100;
        for event in machine.advance(ms(t)) {
            match event {
                SpinEvent::Settled(_) => settled += 1,
                SpinEvent::AutoSpinStopped(reason) => stop = Some(reason),
                _ => {}
            }
        }
    }
    assert_eq!(stop, Some(AutoSpinStop::BalanceTooLow));
    assert!(!machine.auto_spin());
    assert!(machine.wallet().balance() < 10);
    assert!(settled >= 1);
    assert_eq!(
        AutoSpinStop::BalanceTooLow.to_string(),
        "Auto-spin stopped (balance too low)."
    );
}

#[test]
fn test_auto_spin_rejected_when_broke() {
    let mut machine = machine_with(0, 4);
    assert!(machine.set_auto_spin(true, ms(0)).is_err());
    assert!(!machine.auto_spin());
}

#[test]
fn test_session_persists_across_restart() {
    let mut machine = machine_with(500, 8);
    machine.set_bet(25).unwrap();
    machine.toggle_mute();
    machine.remove_symbol("lemon").unwrap();
    machine.spin_now().unwrap();
    machine.flush().unwrap();

    let balance = machine.wallet().balance();
    let store = machine.store().clone();
    let reloaded: TestMachine = 
        SlotMachine::load(GameConfig::default(), StdRng::seed_from_u64(0), store);
    assert_eq!(reloaded.wallet().balance(), balance);
    assert_eq!(reloaded.wallet().bet().amount(), 25);
    assert!(reloaded.sound().mute);
    assert!(!reloaded.symbols().contains("lemon"));
    assert_eq!(reloaded.pool().len(), 25);
}

#[test]
fn test_legacy_table_migrated_on_load() {
    let mut store = MemoryStore::new();
    let legacy = r#"[
        {"id":"cherry","name":"Cherry","type":"text","display":"🍒",
         "weight":6,"payout3":99,"payout2":9,"isWild":false},
        {"id":"seven","name":"Seven","type":"text","display":"7️⃣",
         "weight":2,"payout3":25,"payout2":5,"isWild":false},
        {"id":"bca","name":"BCA","type":"text","display":"🏦",
         "weight":4,"payout3":5,"payout2":1,"isWild":false}
    ]"#;
    store.set(keys::SYMBOLS, legacy).unwrap();

    let machine: TestMachine = 
        SlotMachine::load(GameConfig::default(), StdRng::seed_from_u64(0), store);
    let table = machine.symbols();
    assert!(!table.contains("seven"));
    assert!(!table.contains("bca"));
    assert!(table.contains("skull"));
    assert_eq!(table.get("cherry").unwrap().payout3, Multiplier::whole(5));
    assert!(machine.check_invariants().is_empty());

    // Written back in migrated form
    let stored: SymbolTable = load_or(machine.store(), keys::SYMBOLS, SymbolTable::default());
    assert_eq!(&stored, table);
}

#[test]
fn test_malformed_key_does_not_disturb_others() {
    let mut store = MemoryStore::new();
    store.set(keys::BALANCE, "\"lots\"").unwrap();
    store.set(keys::BET, "50").unwrap();
    let machine: TestMachine = 
        SlotMachine::load(GameConfig::default(), StdRng::seed_from_u64(0), store);
    assert_eq!(machine.wallet().balance(), 1000);
    assert_eq!(machine.wallet().bet().amount(), 50);
}
