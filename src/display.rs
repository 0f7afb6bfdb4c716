/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.
///
/// The play field is measured in logical pixels; the terminal grid maps to
/// it at a fixed scale of `CELL_WIDTH` × `CELL_HEIGHT` pixels per cell.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::entities::{
    Enemy, GameState, Screen, ENEMY_HEIGHT, ENEMY_WIDTH, PLAYER_HEIGHT, PLAYER_WIDTH,
};
use crate::history::ScoreHistory;

// ── Pixel ↔ cell scale ────────────────────────────────────────────────────────

pub const CELL_WIDTH: i32 = 8;
pub const CELL_HEIGHT: i32 = 16;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Cyan;
const C_HUD_SCORE: Color = Color::Cyan;
const C_HUD_BEST: Color = Color::Yellow;
const C_PLAYER: Color = Color::Green;
const C_ENEMY: Color = Color::Red;
const C_PROJECTILE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_BACKDROP: Color = Color::DarkMagenta;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame of whichever screen is active.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    history: &ScoreHistory,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.screen {
        Screen::Menu => draw_menu(out, state, history)?,
        Screen::Playing => draw_playing(out, state)?,
        Screen::GameOver => draw_game_over(out, state)?,
        Screen::History => draw_history(out, state, history)?,
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows(state).saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn cols(state: &GameState) -> u16 {
    (state.width / CELL_WIDTH) as u16
}

fn rows(state: &GameState) -> u16 {
    (state.height / CELL_HEIGHT) as u16
}

// ── Playing screen ────────────────────────────────────────────────────────────

fn draw_playing<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    draw_hud(out, state)?;

    for enemy in &state.enemies {
        draw_enemy(out, state, enemy)?;
    }

    out.queue(style::SetForegroundColor(C_PROJECTILE))?;
    for shot in &state.player.projectiles {
        let row = shot.y / CELL_HEIGHT;
        if row >= 1 {
            out.queue(cursor::MoveTo((shot.x / CELL_WIDTH) as u16, row as u16))?;
            out.queue(Print("║"))?;
        }
    }

    draw_player(out, state)?;
    draw_instructions(out, state)?;
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", state.score)))?;

    // Best recorded score — right
    let best = format!("Best: {}", state.high_score);
    let rx = cols(state).saturating_sub(best.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_BEST))?;
    out.queue(Print(&best))?;

    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // Ship sprite: a tip row and a full-width base row.
    //     ▲
    //  ▟█████▙
    let p = &state.player;
    let col0 = p.x / CELL_WIDTH;
    let width_cells = (PLAYER_WIDTH / CELL_WIDTH).max(1);
    let row0 = p.y / CELL_HEIGHT;
    let row1 = (p.y + PLAYER_HEIGHT - 1) / CELL_HEIGHT;

    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo((col0 + width_cells / 2) as u16, row0.max(1) as u16))?;
    out.queue(Print("▲"))?;
    for row in (row0 + 1).max(1)..=row1 {
        out.queue(cursor::MoveTo(col0 as u16, row as u16))?;
        out.queue(Print("█".repeat(width_cells as usize)))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, state: &GameState, enemy: &Enemy) -> std::io::Result<()> {
    // Clip to the visible grid: enemies spawn above the top edge and only
    // their on-screen rows are drawn.  Row 0 is the HUD.
    let col0 = (enemy.x / CELL_WIDTH).max(0);
    let col1 = ((enemy.x + ENEMY_WIDTH - 1) / CELL_WIDTH).min(cols(state) as i32 - 1);
    let row0 = (enemy.y / CELL_HEIGHT).max(1);
    let row1 = ((enemy.y + ENEMY_HEIGHT - 1) / CELL_HEIGHT).min(rows(state) as i32 - 1);
    if col1 < col0 {
        return Ok(());
    }

    out.queue(style::SetForegroundColor(C_ENEMY))?;
    for row in row0..=row1 {
        out.queue(cursor::MoveTo(col0 as u16, row as u16))?;
        out.queue(Print("█".repeat((col1 - col0 + 1) as usize)))?;
    }
    Ok(())
}

fn draw_instructions<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("Arrow keys to move", Color::White),
        ("Space to shoot", Color::Yellow),
        ("Avoid red enemies!", Color::Red),
    ];
    let base = rows(state).saturating_sub(lines.len() as u16 + 1);
    for (i, (text, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(1, base + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
    }
    Ok(())
}

// ── Menu screen ───────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(
    out: &mut W,
    state: &GameState,
    history: &ScoreHistory,
) -> std::io::Result<()> {
    draw_starfield(out, state)?;

    let cx = cols(state) / 2;
    let cy = rows(state) / 2;

    let title = "★  SPACE  SHOOTER  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    if history.high_score() > 0 {
        let best = format!("Best Score: {}", history.high_score());
        out.queue(cursor::MoveTo(
            cx.saturating_sub(best.chars().count() as u16 / 2),
            cy.saturating_sub(3),
        ))?;
        out.queue(style::SetForegroundColor(C_HUD_BEST))?;
        out.queue(Print(&best))?;
    }

    let legend: &[&str] = &[
        "SPACE : Start",
        "H : Score History",
        "Q : Quit",
    ];
    for (i, line) in legend.iter().enumerate() {
        out.queue(cursor::MoveTo(cx.saturating_sub(8), cy + i as u16))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(*line))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(14), cy + 5))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → : Move   SPACE : Shoot"))?;
    Ok(())
}

/// Sparse deterministic star pattern behind the menu text.
fn draw_starfield<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HINT))?;
    for row in (1..rows(state)).step_by(3) {
        for col in (row % 7..cols(state)).step_by(11) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print(if (row + col) % 2 == 0 { "·" } else { "✦" }))?;
        }
    }
    Ok(())
}

// ── Game-over screen ──────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // Dim checker backdrop
    out.queue(style::SetForegroundColor(C_BACKDROP))?;
    for row in (1..rows(state)).step_by(2) {
        for col in (0..cols(state)).step_by(6) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(Print("▒"))?;
        }
    }

    let score_line = format!("Final Score: {}", state.score);
    let best_line = format!("Best Score:  {}", state.high_score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Cyan),
        (&best_line, Color::Yellow),
        ("R - Play Again   H - History   Q - Quit", Color::White),
    ];

    let cx = cols(state) / 2;
    let start_row = (rows(state) / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

// ── History screen ────────────────────────────────────────────────────────────

fn draw_history<W: Write>(
    out: &mut W,
    state: &GameState,
    history: &ScoreHistory,
) -> std::io::Result<()> {
    let cx = cols(state) / 2;

    let title = "═══  SCORE  HISTORY  ═══";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        2,
    ))?;
    out.queue(style::SetForegroundColor(C_TITLE))?;
    out.queue(Print(title))?;

    if history.entries().is_empty() {
        out.queue(cursor::MoveTo(cx.saturating_sub(11), 5))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print("No games recorded yet."))?;
    } else {
        for (i, entry) in history.entries().iter().enumerate() {
            let line = format!("{:>2}. {:>6}   {}", i + 1, entry.score, entry.date);
            out.queue(cursor::MoveTo(
                cx.saturating_sub(line.chars().count() as u16 / 2),
                4 + i as u16,
            ))?;
            out.queue(style::SetForegroundColor(if i == 0 {
                C_HUD_BEST
            } else {
                Color::White
            }))?;
            out.queue(Print(&line))?;
        }
    }

    out.queue(cursor::MoveTo(
        cx.saturating_sub(15),
        rows(state).saturating_sub(2),
    ))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("ESC / BACKSPACE : Back   Q : Quit"))?;
    Ok(())
}
