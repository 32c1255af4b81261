/// Rendering layer: all terminal I/O lives here.
///
/// `TerminalSurface` implements the library's `RenderSurface` by mapping the
/// logical play field onto the terminal's cell grid. Entities draw into an
/// off-screen cell buffer; `present` then queues the whole frame, the HUD and
/// any result banner to the writer. No game logic is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use invaders::surface::{RenderSurface, Rgb, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_INVADER: Color = Color::Green; // "shocking green"
const C_RESULT: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Drawing below this alpha is skipped entirely.
const MIN_VISIBLE_ALPHA: f64 = 0.05;

/// Rows reserved outside the field: HUD on top, controls hint at the bottom.
const HUD_ROWS: u16 = 1;
const HINT_ROWS: u16 = 1;

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.0, g: rgb.1, b: rgb.2 }
}

// ── Score & result sinks ──────────────────────────────────────────────────────

/// Write-only score and result displays for one session.
#[derive(Debug)]
pub struct Hud {
    score_text: String,
    result: Option<&'static str>,
}

impl Hud {
    pub fn new() -> Self {
        Hud { score_text: "0".to_string(), result: None }
    }

    pub fn show_score(&mut self, score: u32) {
        self.score_text = score.to_string();
    }

    /// Latches the first result; later calls are ignored.
    pub fn show_result(&mut self, text: &'static str) {
        if self.result.is_none() {
            self.result = Some(text);
        }
    }
}

// ── Transform stack ───────────────────────────────────────────────────────────

/// 2D affine transform `[a c e; b d f]` plus the accumulated alpha.
#[derive(Clone, Copy, Debug)]
struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    alpha: f64,
}

impl Transform {
    const IDENTITY: Transform = Transform { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0, alpha: 1.0 };

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }

    fn angle(&self) -> f64 {
        self.b.atan2(self.a)
    }
}

// ── Terminal surface ──────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct Cell {
    glyph: char,
    color: Color,
}

pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    field_width: f64,
    field_height: f64,
    cells: Vec<Option<Cell>>,
    current: Transform,
    stack: Vec<Transform>,
}

impl TerminalSurface {
    pub fn new(term_cols: u16, term_rows: u16, field_width: f64, field_height: f64) -> Self {
        let mut surface = TerminalSurface {
            cols: 0,
            rows: 0,
            field_width,
            field_height,
            cells: Vec::new(),
            current: Transform::IDENTITY,
            stack: Vec::new(),
        };
        surface.resize(term_cols, term_rows);
        surface
    }

    pub fn resize(&mut self, term_cols: u16, term_rows: u16) {
        self.cols = term_cols.max(1);
        self.rows = term_rows.saturating_sub(HUD_ROWS + HINT_ROWS).max(1);
        self.cells = vec![None; self.cols as usize * self.rows as usize];
    }

    /// Logical field point → cell, after the current transform.
    fn cell_at(&self, x: f64, y: f64) -> Option<(u16, u16)> {
        let (x, y) = self.current.apply(x, y);
        let cx = (x / self.field_width * self.cols as f64).floor();
        let cy = (y / self.field_height * self.rows as f64).floor();
        if cx < 0.0 || cy < 0.0 || cx >= self.cols as f64 || cy >= self.rows as f64 {
            return None;
        }
        Some((cx as u16, cy as u16))
    }

    fn put(&mut self, col: u16, row: u16, glyph: char, color: Color) {
        if col < self.cols && row < self.rows {
            self.cells[row as usize * self.cols as usize + col as usize] = Some(Cell { glyph, color });
        }
    }

    fn put_str(&mut self, col: i32, row: i32, text: &str, color: Color) {
        if row < 0 {
            return;
        }
        for (i, glyph) in text.chars().enumerate() {
            let c = col + i as i32;
            if c >= 0 {
                self.put(c as u16, row as u16, glyph, color);
            }
        }
    }

    /// Queue the buffered frame plus HUD to `out` and flush.
    pub fn present<W: Write>(&self, out: &mut W, hud: &Hud) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some(cell) = self.cells[row as usize * self.cols as usize + col as usize] {
                    out.queue(cursor::MoveTo(col, row + HUD_ROWS))?;
                    out.queue(style::SetForegroundColor(cell.color))?;
                    out.queue(Print(cell.glyph))?;
                }
            }
        }

        draw_hud(out, hud)?;
        if let Some(text) = hud.result {
            draw_result(out, text, self.cols, self.rows)?;
        }
        draw_controls_hint(out, self.rows + HUD_ROWS)?;

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows + HUD_ROWS))?;
        out.flush()?;
        Ok(())
    }
}

impl RenderSurface for TerminalSurface {
    fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
        self.current = Transform::IDENTITY;
        self.stack.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.current = t;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let t = &mut self.current;
        t.e += t.a * dx + t.c * dy;
        t.f += t.b * dx + t.d * dy;
    }

    fn rotate(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        let t = self.current;
        self.current.a = t.a * cos + t.c * sin;
        self.current.b = t.b * cos + t.d * sin;
        self.current.c = t.c * cos - t.a * sin;
        self.current.d = t.d * cos - t.b * sin;
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.current.alpha *= alpha.clamp(0.0, 1.0);
    }

    fn blit(&mut self, sprite: Sprite, x: f64, y: f64, width: f64, height: f64) {
        if self.current.alpha < MIN_VISIBLE_ALPHA {
            return;
        }
        let Some((col, row)) = self.cell_at(x + width / 2.0, y + height / 2.0) else {
            return;
        };
        let (col, row) = (col as i32, row as i32);
        match sprite {
            Sprite::Rocket => {
                // Nose leans one column toward the tilt:
                //   ▲
                //  /█\
                let lean = self.current.angle();
                let nose = if lean > 0.1 { 1 } else if lean < -0.1 { -1 } else { 0 };
                self.put_str(col + nose, row - 1, "▲", C_PLAYER);
                self.put_str(col - 1, row, "/█\\", C_PLAYER);
            }
            Sprite::Monster => {
                //   «▼»    ← swept-back wings
                //   ╚═╝    ← engine block
                self.put_str(col - 1, row - 1, "«▼»", C_INVADER);
                self.put_str(col - 1, row, "╚═╝", C_INVADER);
            }
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgb) {
        let alpha = self.current.alpha;
        if alpha < MIN_VISIBLE_ALPHA {
            return;
        }
        let Some((col, row)) = self.cell_at(x, y) else {
            return;
        };
        let glyph = if alpha < 0.4 || radius < 1.0 {
            '·'
        } else if radius < 3.5 {
            '•'
        } else {
            '●'
        };
        self.put(col, row, glyph, to_color(color));
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", hud.score_text)))?;
    Ok(())
}

// ── Result banner ─────────────────────────────────────────────────────────────

fn draw_result<W: Write>(out: &mut W, text: &str, cols: u16, rows: u16) -> std::io::Result<()> {
    let cx = cols / 2;
    let row = HUD_ROWS + rows / 2;
    let col = cx.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_RESULT))?;
    out.queue(Print(text))?;

    let hint = "R - Play Again  Q - Quit";
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row + 2))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}
