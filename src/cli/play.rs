//! Play command implementation - interactive TUI slot machine.

// The TUI uses intentional casts for layout
#![allow(clippy::cast_possible_truncation)]

use super::output::glyph;
use super::paytable;
use super::{CliError, Machine, open_machine};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lucky_frogs::machine::{REELS, SpinEvent};
use lucky_frogs::sound::{Cue, SoundSink, Tone};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io::{Write, stdout};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;

/// Frame interval for input polling and redraws.
const FRAME: Duration = Duration::from_millis(16);

/// Rings the terminal bell on wins while sound is on.
#[derive(Debug, Default)]
struct BellSink;

impl SoundSink for BellSink {
    fn play(&mut self, cue: Cue, tones: &[Tone]) {
        if tones.is_empty() {
            return;
        }
        if cue == Cue::Win {
            let mut out = stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}

/// App state for the TUI.
struct App {
    machine: Machine,
    started: Instant,
    message: String,
    deposit_input: Option<String>,
    show_paytable: bool,
    sink: BellSink,
}

impl App {
    fn new(machine: Machine) -> Self {
        let message = if machine.wallet().covers_bet() {
            "Press Space to spin!".to_string()
        } else {
            "Insufficient balance - deposit more to play.".to_string()
        };
        Self {
            machine,
            started: Instant::now(),
            message,
            deposit_input: None,
            show_paytable: false,
            sink: BellSink,
        }
    }

    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn cue(&mut self, cue: Cue) {
        let tones = self.machine.sound().tones(cue);
        self.sink.play(cue, &tones);
    }

    fn spin(&mut self) {
        let now = self.now();
        match self.machine.start_spin(now) {
            Ok(()) => {
                self.message = "Spinning...".to_string();
                self.cue(Cue::SpinStart);
            }
            Err(e) => self.message = e.to_string(),
        }
    }

    fn toggle_auto(&mut self) {
        let enable = !self.machine.auto_spin();
        let now = self.now();
        match self.machine.set_auto_spin(enable, now) {
            Ok(true) => {
                self.message = "Auto-spin on. Spinning...".to_string();
                self.cue(Cue::SpinStart);
            }
            Ok(false) => {
                self.message = format!("Auto-spin {}.", if enable { "on" } else { "off" });
            }
            Err(e) => self.message = e.to_string(),
        }
    }

    fn tick(&mut self) {
        let now = self.now();
        for event in self.machine.advance(now) {
            debug!(?event, "tui event");
            match event {
                SpinEvent::AutoSpinStarted => {
                    self.message = "Spinning...".to_string();
                    self.cue(Cue::SpinStart);
                }
                SpinEvent::ReelStopped { .. } => self.cue(Cue::ReelStop),
                SpinEvent::Settled(report) => {
                    self.message = report.message();
                    if report.payout.is_win() {
                        self.cue(Cue::Win);
                    }
                }
                SpinEvent::AutoSpinStopped(reason) => self.message = reason.to_string(),
            }
        }
    }

    fn confirm_deposit(&mut self, input: &str) {
        match input.trim().parse::<u64>() {
            Ok(amount) => match self.machine.deposit(amount) {
                Ok(balance) => {
                    if amount > 0 {
                        self.cue(Cue::Coin);
                    }
                    self.message = format!("Deposited {amount}. Balance: {balance}");
                }
                Err(e) => self.message = e.to_string(),
            },
            Err(_) => self.message = "Enter a whole number of credits.".to_string(),
        }
    }

    fn step_bet(&mut self, up: bool) {
        match self.machine.step_bet(up) {
            Ok(bet) => self.message = format!("Bet: {}", bet.amount()),
            Err(e) => self.message = e.to_string(),
        }
    }

    /// Handle a key. Returns false to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if let Some(input) = self.deposit_input.as_mut() {
            match code {
                KeyCode::Char(c) if c.is_ascii_digit() && input.len() < 12 => input.push(c),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Enter => {
                    let input = self.deposit_input.take().unwrap_or_default();
                    self.confirm_deposit(&input);
                }
                KeyCode::Esc => self.deposit_input = None,
                _ => {}
            }
            return true;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char(' ') | KeyCode::Enter => self.spin(),
            KeyCode::Char('a') => self.toggle_auto(),
            KeyCode::Char('+' | '=') | KeyCode::Up => self.step_bet(true),
            KeyCode::Char('-') | KeyCode::Down => self.step_bet(false),
            KeyCode::Char('d') => {
                if self.machine.is_spinning() {
                    self.message = "Wait for the reels to stop.".to_string();
                } else {
                    self.deposit_input = Some(String::new());
                }
            }
            KeyCode::Char('R') => {
                self.machine.reset_balance();
                self.message = "Balance reset to 0.".to_string();
            }
            KeyCode::Char('m') => {
                let muted = self.machine.toggle_mute();
                self.message = format!("Sound {}.", if muted { "muted" } else { "on" });
            }
            KeyCode::Char('s') => {
                let style = self.machine.sound().style.next();
                self.machine.set_sound_style(style);
                self.message = format!("Sound style: {style}");
            }
            KeyCode::Char('p') => self.show_paytable = !self.show_paytable,
            _ => {}
        }
        true
    }
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the TUI fails or the state cannot be written on exit.
pub(crate) fn execute(data_dir: Option<&Path>, seed: Option<u64>) -> Result<(), CliError> {
    let machine = open_machine(data_dir, seed)?;
    let app = App::new(machine);
    run_tui(app)
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result?;
    app.machine.flush()?;
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), CliError> {
    loop {
        app.tick();
        terminal.draw(|f| ui(f, app))?;

        if event::poll(FRAME)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key.code)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Reels (+ paytable)
            Constraint::Length(3), // Message
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    if app.show_paytable {
        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);
        render_reels(f, main[0], app);
        render_paytable(f, main[1], app);
    } else {
        render_reels(f, chunks[1], app);
    }

    render_message(f, chunks[2], app);
    render_footer(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let wallet = app.machine.wallet();
    let sound = app.machine.sound();
    let title = format!(
        " Lucky Frogs 🐸 | Balance: {} | Bet: {} | Auto: {} | Sound: {}{} ",
        wallet.balance(),
        wallet.bet().amount(),
        if app.machine.auto_spin() { "ON" } else { "off" },
        sound.style,
        if sound.mute { " (muted)" } else { "" }
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_reels(f: &mut Frame, area: Rect, app: &App) {
    let reels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); REELS])
        .split(area);

    let table = app.machine.symbols();
    let spinning = app.machine.spinning_reels();
    let winners = match app.machine.last_report() {
        Some(report) if !app.machine.is_spinning() => report.payout.winning_reels,
        _ => [false; REELS],
    };

    for (reel, rect) in reels.iter().enumerate() {
        let cells = match &app.machine.reels()[reel] {
            Some(column) => [
                glyph(table, &column.top),
                glyph(table, &column.center),
                glyph(table, &column.bottom),
            ],
            None => [" ", " ", " "],
        };

        let border = if spinning[reel] {
            Color::Yellow
        } else if winners[reel] {
            Color::LightGreen
        } else {
            Color::Gray
        };
        let center_style = if winners[reel] {
            Style::default().fg(Color::LightGreen).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let dim = Style::default().fg(Color::DarkGray);

        let pad = usize::from(rect.height.saturating_sub(5) / 2);
        let mut lines: Vec<Line> = std::iter::repeat_n(Line::from(""), pad).collect();
        lines.push(Line::from(Span::styled(cells[0], dim)));
        lines.push(Line::from(Span::styled(format!("▶ {} ◀", cells[1]), center_style)));
        lines.push(Line::from(Span::styled(cells[2], dim)));

        let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" Reel {} ", reel + 1)),
        );
        f.render_widget(widget, *rect);
    }
}

fn render_paytable(f: &mut Frame, area: Rect, app: &App) {
    let text = paytable::render(app.machine.symbols());
    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Paytable "))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_message(f: &mut Frame, area: Rect, app: &App) {
    let (text, color) = match &app.deposit_input {
        Some(input) => (format!(" Deposit amount: {input}_ "), Color::Cyan),
        None => {
            let settled = app.machine.last_report().filter(|_| !app.machine.is_spinning());
            let color = match settled {
                Some(report) if report.payout.is_win() => Color::LightGreen,
                Some(report) if report.payout.is_penalty() => Color::LightRed,
                _ => Color::White,
            };
            (format!(" {} ", app.message), color)
        }
    };
    let widget = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.deposit_input.is_some() {
        " [0-9] Amount  [Enter] Deposit  [Esc] Cancel "
    } else {
        concat!(
            " [Space] Spin  [a] Auto  [+/-] Bet  [d] Deposit  [R] Reset balance",
            "  [m] Mute  [s] Style  [p] Paytable  [q] Quit "
        )
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
