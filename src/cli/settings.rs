//! Wallet and sound commands.

use super::{CliError, Machine, SoundArg, open_machine};
use lucky_frogs::sound::SoundStyle;
use serde::Serialize;
use std::path::Path;

/// Run `action` on the machine, then write every key.
fn with_machine<F>(data_dir: Option<&Path>, action: F) -> Result<(), CliError>
where
    F: FnOnce(&mut Machine) -> Result<(), CliError>,
{
    let mut machine = open_machine(data_dir, None)?;
    action(&mut machine)?;
    machine.flush()?;
    Ok(())
}

/// Execute the deposit command.
///
/// # Errors
///
/// Returns an error if the state cannot be loaded or written.
pub(crate) fn deposit(data_dir: Option<&Path>, amount: u64) -> Result<(), CliError> {
    with_machine(data_dir, |machine| {
        let balance = machine.deposit(amount)?;
        println!("Balance: {balance}");
        Ok(())
    })
}

/// Execute the reset-balance command.
///
/// # Errors
///
/// Returns an error if the state cannot be loaded or written.
pub(crate) fn reset_balance(data_dir: Option<&Path>) -> Result<(), CliError> {
    with_machine(data_dir, |machine| {
        machine.reset_balance();
        println!("Balance: 0");
        Ok(())
    })
}

/// Execute the bet command.
///
/// # Errors
///
/// Returns an error if the amount is not on the bet menu.
pub(crate) fn bet(data_dir: Option<&Path>, amount: u64) -> Result<(), CliError> {
    with_machine(data_dir, |machine| {
        let menu = machine.config().bet_options.clone();
        let bet = machine.set_bet(amount).map_err(|e| {
            let options: Vec<String> = menu.iter().map(u64::to_string).collect();
            CliError::new(format!("{e} (choose one of {})", options.join(", ")))
        })?;
        println!("Bet: {}", bet.amount());
        Ok(())
    })
}

/// Execute the mute command (toggles).
///
/// # Errors
///
/// Returns an error if the state cannot be loaded or written.
pub(crate) fn mute(data_dir: Option<&Path>) -> Result<(), CliError> {
    with_machine(data_dir, |machine| {
        let muted = machine.toggle_mute();
        println!("Sound: {}", if muted { "muted" } else { "on" });
        Ok(())
    })
}

/// Execute the sound command.
///
/// # Errors
///
/// Returns an error if the state cannot be loaded or written.
pub(crate) fn sound(data_dir: Option<&Path>, style: SoundArg) -> Result<(), CliError> {
    with_machine(data_dir, |machine| {
        let style = SoundStyle::from(style);
        machine.set_sound_style(style);
        println!("Sound style: {style}");
        Ok(())
    })
}

/// JSON-serializable status.
#[derive(Debug, Serialize)]
struct Status {
    balance: u64,
    bet: u64,
    bet_options: Vec<u64>,
    mute: bool,
    sound_style: SoundStyle,
    symbols: usize,
    total_weight: u64,
    data_dir: String,
}

/// Execute the status command.
///
/// # Errors
///
/// Returns an error if the state cannot be loaded, or if an invariant check
/// fails.
pub(crate) fn status(data_dir: Option<&Path>, json: bool) -> Result<(), CliError> {
    let machine = open_machine(data_dir, None)?;
    let sound = machine.sound();
    let status = Status {
        balance: machine.wallet().balance(),
        bet: machine.wallet().bet().amount(),
        bet_options: machine.config().bet_options.clone(),
        mute: sound.mute,
        sound_style: sound.style,
        symbols: machine.symbols().len(),
        total_weight: machine.symbols().total_weight(),
        data_dir: machine.store().dir().display().to_string(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Balance:     {}", status.balance);
        println!("Bet:         {}", status.bet);
        println!(
            "Sound:       {} ({})",
            status.sound_style,
            if status.mute { "muted" } else { "on" }
        );
        println!("Symbols:     {} (total weight {})", status.symbols, status.total_weight);
        println!("Data dir:    {}", status.data_dir);
    }

    let violations = machine.check_invariants();
    if let Some(first) = violations.first() {
        return Err(CliError::new(first.to_string()));
    }
    Ok(())
}
