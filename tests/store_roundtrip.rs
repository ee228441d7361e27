//! File store round-trip tests.
//!
//! Every persisted key must survive a restart through the on-disk store, and
//! damaged files must only reset the key they hold.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use lucky_frogs::sound::SoundStyle;
use lucky_frogs::store::{FileStore, Store, keys};
use lucky_frogs::{GameConfig, GameState, SymbolTable};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_every_key_roundtrips() {
    let dir = tempdir().unwrap();
    let config = GameConfig::default();

    let mut state = GameState::new(&config);
    state.wallet.deposit(321);
    state.sound.mute = true;
    state.sound.style = SoundStyle::Retro;
    state.symbols.remove("grape").unwrap();

    let mut store = FileStore::open(dir.path()).unwrap();
    state.save(&mut store).unwrap();

    for key in keys::ALL {
        assert!(dir.path().join(format!("{key}.json")).exists(), "missing {key}");
    }

    let mut reopened = FileStore::open(dir.path()).unwrap();
    assert_eq!(GameState::load(&mut reopened, &config), state);
}

#[test]
fn test_damaged_file_resets_only_its_key() {
    let dir = tempdir().unwrap();
    let config = GameConfig::default();
    let mut store = FileStore::open(dir.path()).unwrap();

    let mut state = GameState::new(&config);
    state.wallet.deposit(1);
    state.save(&mut store).unwrap();
    fs::write(dir.path().join("lf_symbols_v1.json"), "[{truncated").unwrap();

    let loaded = GameState::load(&mut store, &config);
    assert_eq!(loaded.wallet.balance(), 1001);
    assert_eq!(loaded.symbols, SymbolTable::defaults());
}

#[test]
fn test_no_temp_files_left_behind() {
    let dir = tempdir().unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    store.set(keys::BET, "25").unwrap();
    store.set(keys::BET, "50").unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["lf_bet.json".to_string()]);
    assert_eq!(store.get(keys::BET).unwrap().as_deref(), Some("50"));
}

#[test]
fn test_config_next_to_store() {
    let dir = tempdir().unwrap();
    let config = GameConfig {
        starting_balance: 77,
        ..GameConfig::default()
    };
    config.save(dir.path()).unwrap();

    let loaded = GameConfig::load(dir.path()).unwrap();
    let mut store = FileStore::open(dir.path()).unwrap();
    let state = GameState::load(&mut store, &loaded);
    assert_eq!(state.wallet.balance(), 77);
}
