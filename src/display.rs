//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! the 1600×900 world into terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use guard_the_tower::constants::{SCREEN_HEIGHT, SCREEN_WIDTH, SWITCH_DURATION, TOWER_LIFE};
use guard_the_tower::entities::{AttackTarget, Enemy, Facing, GameState, GameStatus};
use guard_the_tower::geometry::Rect;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIFE: Color = Color::Red;
const C_TARGET_TOWER: Color = Color::Green;
const C_TARGET_PLAYER: Color = Color::Magenta;
const C_PLAYER: Color = Color::White;
const C_TOWER: Color = Color::Grey;
const C_HINT: Color = Color::DarkGrey;

/// Glyph and colour per enemy variant.
const ENEMY_GLYPHS: [(&str, Color); 3] = [
    ("ж", Color::Green),
    ("Ψ", Color::Red),
    ("Ѫ", Color::Cyan),
];

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal size the world is scaled onto.  Row 0 is the HUD, rows 1 and
/// `height - 2` are the border, the last row holds the controls hint.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    fn play_cols(&self) -> f32 {
        self.width.saturating_sub(2).max(1) as f32
    }

    fn play_rows(&self) -> f32 {
        self.height.saturating_sub(4).max(1) as f32
    }

    /// Cell for a world point, or `None` when it falls outside the play area.
    fn cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(0.0..SCREEN_WIDTH).contains(&x) || !(0.0..SCREEN_HEIGHT).contains(&y) {
            return None;
        }
        let col = 1 + (x / SCREEN_WIDTH * self.play_cols()) as u16;
        let row = 2 + (y / SCREEN_HEIGHT * self.play_rows()) as u16;
        Some((col, row))
    }

    /// Every cell a world box covers, at least its center cell.
    fn cells(&self, rect: &Rect) -> Vec<(u16, u16)> {
        let (Some((c0, r0)), Some((c1, r1))) = (
            self.cell(rect.left().max(0.0), rect.top().max(0.0)),
            self.cell(
                (rect.right() - 1.0).min(SCREEN_WIDTH - 1.0),
                (rect.bottom() - 1.0).min(SCREEN_HEIGHT - 1.0),
            ),
        ) else {
            let (cx, cy) = rect.center();
            return self.cell(cx, cy).into_iter().collect();
        };
        (r0..=r1)
            .flat_map(|row| (c0..=c1).map(move |col| (col, row)))
            .collect()
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_hud(out, state, view)?;
    draw_tower(out, state, view)?;

    for enemy in &state.enemies {
        draw_enemy(out, enemy, view)?;
    }

    draw_player(out, state, view)?;
    draw_controls_hint(out, view)?;

    if state.status == GameStatus::Lost {
        draw_game_over(out, state, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>5}", state.score)))?;

    let (target_str, target_color) = match state.target {
        AttackTarget::Tower => ("[ TARGET: TOWER ]".to_string(), C_TARGET_TOWER),
        AttackTarget::Player => {
            let left = (SWITCH_DURATION + 1).saturating_sub(state.switch_timer);
            (format!("[ TARGET: YOU {:>3} ]", left), C_TARGET_PLAYER)
        }
    };
    let tx = (view.width / 2).saturating_sub(target_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(target_color))?;
    out.queue(Print(&target_str))?;

    let hearts: String = (0..TOWER_LIFE)
        .map(|i| if i < state.tower.life { '♥' } else { '♡' })
        .collect();
    let life_str = format!("Tower:{}", hearts);
    let lx = view
        .width
        .saturating_sub(life_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIFE))?;
    out.queue(Print(&life_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_tower<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_TOWER))?;
    for (col, row) in view.cells(&state.tower.rect) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("█"))?;
    }
    Ok(())
}

fn facing_glyph(facing: Facing) -> &'static str {
    match facing {
        Facing::North => "↑",
        Facing::NorthEast => "↗",
        Facing::East => "→",
        Facing::SouthEast => "↘",
        Facing::South => "↓",
        Facing::SouthWest => "↙",
        Facing::West => "←",
        Facing::NorthWest => "↖",
    }
}

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let (cx, cy) = state.player.rect.center();
    let Some((col, row)) = view.cell(cx, cy) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    if state.status == GameStatus::Lost {
        out.queue(cursor::MoveTo(col.saturating_sub(1), row))?;
        out.queue(Print("T_T"))?;
    } else {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print(facing_glyph(state.player.facing)))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: Viewport) -> std::io::Result<()> {
    // Enemies drift off-screen freely; skip those outside the play area.
    let (cx, cy) = enemy.rect.center();
    let Some((col, row)) = view.cell(cx, cy) else {
        return Ok(());
    };
    let (glyph, color) = ENEMY_GLYPHS[enemy.variant as usize % ENEMY_GLYPHS.len()];
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "↑↓←→ / W A S D : Move   SPACE : Lure enemies (10 pts)   Q : Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>5}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║   TOWER  FALLEN    ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
    ];

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    Ok(())
}
