/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.  Continuous field coordinates map to
/// cells by plain truncation (1 field unit = 1 cell).

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use invaders::entities::{GameState, GameStatus, Outcome};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET: Color = Color::Cyan;
const C_ENEMY_BULLET: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, state)?;
    draw_hud(out, state)?;

    for enemy in &state.enemies {
        draw_sprite(out, state, enemy.hit.x, enemy.hit.y, &["<▼>", "[_]"], C_ENEMY)?;
    }
    for bullet in &state.bullets {
        draw_sprite(out, state, bullet.hit.x, bullet.hit.y, &["║"], C_BULLET)?;
    }
    for bullet in &state.enemy_bullets {
        draw_sprite(out, state, bullet.hit.x, bullet.hit.y, &["*"], C_ENEMY_BULLET)?;
    }

    draw_player(out, state)?;
    draw_controls_hint(out, state)?;

    if state.status == GameStatus::GameOver {
        draw_game_over(out, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, (state.config.height as u16).saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Sprite plotting ───────────────────────────────────────────────────────────

/// True when a `len`-cell run starting at (col, row) lies inside the
/// bordered play area.
fn fits_play_area(state: &GameState, col: i32, row: i32, len: i32) -> bool {
    let w = state.config.width as i32;
    let h = state.config.height as i32;
    col >= 1 && col + len <= w - 1 && row >= 2 && row < h - 2
}

/// Draw a stack of glyph rows with its top-left at the truncated field
/// position.  Rows that would spill over the border are skipped, so a
/// bolt sliding off the field vanishes instead of chewing the frame.
fn draw_sprite<W: Write>(
    out: &mut W,
    state: &GameState,
    x: f32,
    y: f32,
    rows: &[&str],
    color: Color,
) -> std::io::Result<()> {
    let col = x as i32;
    out.queue(style::SetForegroundColor(color))?;
    for (i, glyphs) in rows.iter().enumerate() {
        let row = y as i32 + i as i32;
        if fits_play_area(state, col, row, glyphs.chars().count() as i32) {
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print(*glyphs))?;
        }
    }
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       tip
    //  /|\      wings + fuselage
    let p = &state.player.hit;
    draw_sprite(out, state, p.x, p.y, &[" ▲ ", "/|\\"], C_PLAYER)
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let w = state.config.width as usize;
    let h = state.config.height as u16;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo((w as u16).saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // Score left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", state.score)))?;

    // Lives right
    let hearts: String = "♥".repeat(state.player.lives as usize);
    let lives_text = format!("Lives: {}", hearts);
    let rx = (state.config.width as u16).saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, (state.config.height as u16).saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let won = state.outcome == Some(Outcome::FleetDestroyed);
    let (title, title_color) = if won {
        ("║     VICTORY!     ║", Color::Green)
    } else {
        ("║    GAME  OVER    ║", Color::Red)
    };
    let frame_color = title_color;

    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", frame_color),
        (title, title_color),
        ("╚══════════════════╝", frame_color),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = state.config.width as u16 / 2;
    let start_row = (state.config.height as u16 / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
