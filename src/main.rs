mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use rand::thread_rng;

use invaders::compute::{
    init_state, move_player_left, move_player_right, player_shoot, reset, tick,
};
use invaders::config::{GameConfig, SineShot};
use invaders::entities::{GameState, GameStatus};

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key counts as "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release
/// events: the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames
/// (≈133 ms at 30 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Session configuration ─────────────────────────────────────────────────────

/// Build a session sized to the terminal, 1 field unit = 1 cell.
///
/// Speeds are cells per second; the fleet column count shrinks with
/// narrow terminals so the formation always has room to march.
fn terminal_config(width: u16, height: u16) -> GameConfig {
    let w = f32::from(width);
    let h = f32::from(height);
    let cols = (((w - 14.0) / 7.0) as u32).clamp(1, 10);
    GameConfig {
        width: w,
        height: h,
        fps: 30,

        player_w: 3.0,
        player_h: 2.0,
        player_margin: 3.0,
        player_speed: 16.0,
        cooldown_ms: 250,
        lives: 3,

        bullet_w: 1.0,
        bullet_h: 1.0,
        bullet_speed: 24.0,

        fleet_rows: 3,
        fleet_cols: cols,
        fleet_left: 4.0,
        fleet_top: 4.0,
        spacing_x: 7.0,
        spacing_y: 3.0,
        enemy_w: 3.0,
        enemy_h: 2.0,

        fleet_speed: 3.0,
        drop_amount: 2.0,
        edge_margin: 1.0,

        enemy_shot: SineShot {
            w: 1.0,
            h: 1.0,
            speed: 9.0,
            amplitude: 4.0,
            frequency: 0.8,
            phase: 0.0,
            drift: 0.0,
        },
        fire_floor: 0.002,
        fire_rate: 0.05 / 30.0,

        kill_score: 10,
        hazard_margin: 5.0,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame we check which
/// movement keys are still "fresh" (within `HOLD_WINDOW` frames) and
/// apply them, so moving and shooting never interfere.  Shooting is
/// edge-triggered on the press event; the simulation's own cooldown
/// does the pacing.  `R` resets the session after a game over.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let mut rng = thread_rng();

    // Monotonic millisecond clock handed to the cooldown check.
    let clock = Instant::now();
    let frame_budget = Duration::from_secs_f32(state.config.frame_dt());

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status == GameStatus::GameOver =>
                        {
                            *state = reset(state);
                        }
                        KeyCode::Char(' ') if state.status == GameStatus::Playing => {
                            let now_ms = clock.elapsed().as_millis() as u64;
                            *state = player_shoot(state, now_ms);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Apply held movement keys, then advance one frame ──────────────────
        if state.status == GameStatus::Playing {
            let left = is_held(&key_frame, &KeyCode::Left, frame)
                || is_held(&key_frame, &KeyCode::Char('a'), frame)
                || is_held(&key_frame, &KeyCode::Char('A'), frame);
            let right = is_held(&key_frame, &KeyCode::Right, frame)
                || is_held(&key_frame, &KeyCode::Char('d'), frame)
                || is_held(&key_frame, &KeyCode::Char('D'), frame);

            if left && !right {
                *state = move_player_left(state);
            } else if right && !left {
                *state = move_player_right(state);
            }

            *state = tick(state, &mut rng);
        }

        display::render(out, state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("entering alternate screen")?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> anyhow::Result<()> {
    let (width, height) = terminal::size().context("querying terminal size")?;
    let config = terminal_config(width, height);
    let mut state = init_state(&config)?;
    game_loop(out, &mut state, rx)
}
