//! Terminal rendering layer: all terminal I/O lives here.
//!
//! `TerminalSurface` rasterises the world-pixel drawing primitives into a
//! character grid, one cell per `cell_width`×`cell_height` pixels, and
//! `TerminalHud` is the UI collaborator that paints score, health, and the
//! start / game-over screens on top.  No game logic is performed here.

use std::io::Write;
use std::ops::Range;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use neon_shooter::geometry::Rect;
use neon_shooter::surface::{Glow, Rgb, Screen, Sprite, Surface, Ui};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_HEALTH: Color = Color::Green;
const C_HUD_HEALTH_LOW: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::Cyan;

/// Overlay passes a cell survives before the trail fades out completely.
const TRAIL_FRAMES: u8 = 3;

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb { r: rgb.r, g: rgb.g, b: rgb.b }
}

/// Indices of the cells, `size` world pixels wide, whose centres fall in
/// `[min, max)`, clipped to `0..count`.
fn covered(min: f32, max: f32, size: f32, count: u16) -> Range<u16> {
    let end = (max / size - 0.5).ceil().clamp(0.0, count as f32);
    let first = (min / size - 0.5).ceil().clamp(0.0, end);
    first as u16..end as u16
}

fn scale(rgb: Rgb, factor: f32) -> Rgb {
    let f = factor.clamp(0.0, 1.0);
    Rgb::new(
        (rgb.r as f32 * f) as u8,
        (rgb.g as f32 * f) as u8,
        (rgb.b as f32 * f) as u8,
    )
}

// ── Glyph sprites ─────────────────────────────────────────────────────────────

// Player:   ▲      ← tip
//          /█\     ← fuselage + wings
const PLAYER_ART: &[&str] = &[" ▲ ", "/█\\"];
const ENEMY_ART: &[&str] = &["«▼»", "╚═╝"];
const BOSS_ART: &[&str] = &[
    "╔═══════════╗",
    "║ ◣ ◉ ▼ ◉ ◢ ║",
    "╚══╦═════╦══╝",
    "   ▼     ▼   ",
];
const ASTEROID_ART: &[&str] = &["▄█▄", "▀█▀"];
const MULTI_FIRE_ART: &[&str] = &["★"];
const SHIELD_ART: &[&str] = &["◈"];
const HEALTH_ART: &[&str] = &["♥"];

fn sprite_art(sprite: Sprite) -> (&'static [&'static str], Rgb) {
    match sprite {
        Sprite::Player => (PLAYER_ART, Rgb::new(0xff, 0xff, 0xff)),
        Sprite::Enemy => (ENEMY_ART, Rgb::new(0x00, 0xff, 0x00)),
        Sprite::Boss => (BOSS_ART, Rgb::new(0xff, 0x30, 0x30)),
        Sprite::Asteroid => (ASTEROID_ART, Rgb::new(0x99, 0x88, 0x77)),
        Sprite::MultiFireIcon => (MULTI_FIRE_ART, Rgb::new(0xff, 0xaa, 0x00)),
        Sprite::ShieldIcon => (SHIELD_ART, Rgb::new(0x00, 0xff, 0x9d)),
        Sprite::HealthIcon => (HEALTH_ART, Rgb::new(0xff, 0x00, 0x00)),
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
struct Cell {
    ch: char,
    color: Rgb,
    /// Overlay passes since this cell was last drawn.
    age: u8,
}

const BLANK: Cell = Cell { ch: ' ', color: Rgb::new(0, 0, 0), age: 0 };

#[derive(Clone, Copy, Debug)]
struct Transform {
    tx: f32,
    ty: f32,
    rotation: f32,
    alpha: f32,
}

const IDENTITY: Transform = Transform { tx: 0.0, ty: 0.0, rotation: 0.0, alpha: 1.0 };

pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    cell_width: f32,
    cell_height: f32,
    glyph_sprites: bool,
    cells: Vec<Cell>,
    current: Transform,
    saved: Vec<Transform>,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16, cell_width: f32, cell_height: f32, glyph_sprites: bool) -> Self {
        TerminalSurface {
            cols,
            rows,
            cell_width,
            cell_height,
            glyph_sprites,
            cells: vec![BLANK; cols as usize * rows as usize],
            current: IDENTITY,
            saved: Vec::new(),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![BLANK; cols as usize * rows as usize];
    }

    /// Terminal size in cells.
    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn cell_size(&self) -> (f32, f32) {
        (self.cell_width, self.cell_height)
    }

    /// Size of the play area in world pixels.
    pub fn world_size(&self) -> (f32, f32) {
        (self.cols as f32 * self.cell_width, self.rows as f32 * self.cell_height)
    }

    /// World-pixel centre of a terminal cell.
    pub fn cell_center(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.cell_width,
            (row as f32 + 0.5) * self.cell_height,
        )
    }

    fn to_world(&self, x: f32, y: f32) -> (f32, f32) {
        let (sin, cos) = self.current.rotation.sin_cos();
        (
            self.current.tx + x * cos - y * sin,
            self.current.ty + x * sin + y * cos,
        )
    }

    fn to_cell(&self, wx: f32, wy: f32) -> Option<(u16, u16)> {
        let col = (wx / self.cell_width).floor();
        let row = (wy / self.cell_height).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn put(&mut self, col: u16, row: u16, ch: char, color: Rgb) {
        let alpha = self.current.alpha;
        if alpha < 0.1 {
            return;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        if let Some(cell) = self.cells.get_mut(idx) {
            *cell = Cell { ch, color: scale(color, alpha), age: 0 };
        }
    }

    /// Plot a glyph at a point in the current transform.
    fn plot(&mut self, x: f32, y: f32, ch: char, color: Rgb) {
        let (wx, wy) = self.to_world(x, y);
        if let Some((col, row)) = self.to_cell(wx, wy) {
            self.put(col, row, ch, color);
        }
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb) {
        let (a, b) = (self.to_world(from.0, from.1), self.to_world(to.0, to.1));
        let (dx, dy) = (b.0 - a.0, b.1 - a.1);
        // Terminal cells are twice as tall as wide; judge slope in cells.
        let (cdx, cdy) = (dx / self.cell_width, dy / self.cell_height);
        let ch = if cdy.abs() < cdx.abs() * 0.4 {
            '─'
        } else if cdx.abs() < cdy.abs() * 0.4 {
            '│'
        } else if (cdx > 0.0) == (cdy > 0.0) {
            '\\'
        } else {
            '/'
        };
        let steps = (cdx.abs().max(cdy.abs()) * 2.0).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            if let Some((col, row)) = self.to_cell(a.0 + dx * t, a.1 + dy * t) {
                self.put(col, row, ch, color);
            }
        }
    }

    /// Queue the grid to the terminal, grouping runs of equal colour.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            let line = &self.cells[start..start + self.cols as usize];

            let mut run = String::new();
            let mut run_color = line.first().map(|c| c.color).unwrap_or(BLANK.color);
            for cell in line {
                if cell.color != run_color {
                    out.queue(style::SetForegroundColor(to_color(run_color)))?;
                    out.queue(Print(&run))?;
                    run.clear();
                    run_color = cell.color;
                }
                run.push(cell.ch);
            }
            if !run.is_empty() {
                out.queue(style::SetForegroundColor(to_color(run_color)))?;
                out.queue(Print(&run))?;
            }
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn sprite_ready(&self, _sprite: Sprite) -> bool {
        self.glyph_sprites
    }

    fn save(&mut self) {
        self.saved.push(self.current);
    }

    fn restore(&mut self) {
        self.current = self.saved.pop().unwrap_or(IDENTITY);
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        let (wx, wy) = self.to_world(dx, dy);
        self.current.tx = wx;
        self.current.ty = wy;
    }

    fn rotate(&mut self, radians: f32) {
        self.current.rotation += radians;
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.current.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb, _glow: Option<Glow>) {
        let thin = rect.width < self.cell_width;
        let ch = if thin { '│' } else { '█' };
        let (x0, y0) = self.to_world(rect.x, rect.y);
        let (x1, y1) = self.to_world(rect.x + rect.width, rect.y + rect.height);
        let (min_x, max_x) = (x0.min(x1), x0.max(x1));
        let (min_y, max_y) = (y0.min(y1), y0.max(y1));

        let cols = covered(min_x, max_x, self.cell_width, self.cols);
        let rows = covered(min_y, max_y, self.cell_height, self.rows);
        let hit = !cols.is_empty() && !rows.is_empty();
        for row in rows {
            for col in cols.clone() {
                self.put(col, row, ch, color);
            }
        }
        // Smaller than a cell: still show something at its centre.
        if !hit {
            if let Some((col, row)) = self.to_cell((min_x + max_x) / 2.0, (min_y + max_y) / 2.0) {
                self.put(col, row, ch, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, _line_width: f32) {
        let mid_y = rect.y + rect.height / 2.0;
        self.plot(rect.x, mid_y, '[', color);
        self.plot(rect.x + rect.width - 1.0, mid_y, ']', color);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        if radius < self.cell_width {
            let ch = if radius < 1.0 {
                '·'
            } else if radius < 2.5 {
                '•'
            } else {
                '●'
            };
            self.plot(cx, cy, ch, color);
            return;
        }
        let (wx, wy) = self.to_world(cx, cy);
        // One cell of slack so centres exactly on the rim are still tested.
        let cols = covered(wx - radius, wx + radius + self.cell_width, self.cell_width, self.cols);
        let rows = covered(wy - radius, wy + radius + self.cell_height, self.cell_height, self.rows);
        for row in rows {
            for col in cols.clone() {
                let (px, py) = self.cell_center(col, row);
                if (px - wx).powi(2) + (py - wy).powi(2) <= radius * radius {
                    self.put(col, row, '▓', color);
                }
            }
        }
    }

    fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb, _line_width: f32) {
        const SEGMENTS: usize = 32;
        for i in 0..SEGMENTS {
            let angle = std::f32::consts::TAU * i as f32 / SEGMENTS as f32;
            self.plot(cx + angle.cos() * radius, cy + angle.sin() * radius, '∘', color);
        }
    }

    fn stroke_path(&mut self, points: &[(f32, f32)], color: Rgb, _line_width: f32, _glow: Option<Glow>) {
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.line(from, to, color);
        }
    }

    fn draw_image(&mut self, sprite: Sprite, rect: Rect, glow: Option<Glow>) {
        let (art, default_color) = sprite_art(sprite);
        let color = glow.map(|g| g.color).unwrap_or(default_color);
        let (cx, cy) = rect.center();
        let (wx, wy) = self.to_world(cx, cy);
        let Some((center_col, center_row)) = self.to_cell(wx, wy) else {
            return;
        };

        let top = center_row as i32 - art.len() as i32 / 2;
        for (i, line) in art.iter().enumerate() {
            let row = top + i as i32;
            let left = center_col as i32 - line.chars().count() as i32 / 2;
            for (j, ch) in line.chars().enumerate() {
                let col = left + j as i32;
                if ch == ' ' || row < 0 || col < 0 || row >= self.rows as i32 || col >= self.cols as i32 {
                    continue;
                }
                self.put(col as u16, row as u16, ch, color);
            }
        }
    }

    /// Fully opaque clears the grid; translucent fades older cells so
    /// moving things leave a short trail.
    fn fill_overlay(&mut self, _color: Rgb, alpha: f32) {
        if alpha >= 1.0 {
            self.cells.fill(BLANK);
            return;
        }
        for cell in self.cells.iter_mut() {
            if cell.ch == ' ' {
                continue;
            }
            cell.age += 1;
            if cell.age > TRAIL_FRAMES {
                *cell = BLANK;
            } else {
                cell.color = scale(cell.color, 1.0 - alpha);
                cell.ch = match cell.ch {
                    '█' | '▓' => '▒',
                    '▒' => '░',
                    other => other,
                };
            }
        }
    }
}

// ── HUD / screens ─────────────────────────────────────────────────────────────

/// UI collaborator for the terminal: remembers what to show and paints it
/// over the playfield after every frame.
pub struct TerminalHud {
    score: u32,
    health: u8,
    screen: Screen,
    best_score: u32,
}

impl TerminalHud {
    pub fn new(best_score: u32) -> Self {
        TerminalHud { score: 0, health: 100, screen: Screen::Start, best_score }
    }

    pub fn set_best_score(&mut self, best: u32) {
        self.best_score = best;
    }

    pub fn draw<W: Write>(&self, out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
        match self.screen {
            Screen::Start => self.draw_start(out, cols, rows)?,
            Screen::Playing => self.draw_status(out, cols)?,
            Screen::GameOver { final_score } => self.draw_game_over(out, final_score, cols, rows)?,
        }
        draw_controls_hint(out, rows)?;
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
        out.flush()
    }

    fn draw_status<W: Write>(&self, out: &mut W, cols: u16) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(1, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        out.queue(Print(format!("Score:{:>7}", self.score)))?;

        // Health bar on the right, 20 segments.
        let filled = (self.health as usize * 20 + 50) / 100;
        let bar = format!(
            "HP [{}{}] {:>3}%",
            "█".repeat(filled),
            "·".repeat(20 - filled.min(20)),
            self.health
        );
        let color = if self.health <= 25 { C_HUD_HEALTH_LOW } else { C_HUD_HEALTH };
        let x = cols.saturating_sub(bar.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(x, 0))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(bar))?;
        Ok(())
    }

    fn draw_start<W: Write>(&self, out: &mut W, cols: u16, rows: u16) -> std::io::Result<()> {
        let cx = cols / 2;
        let cy = rows / 2;

        let mut lines: Vec<(String, Color)> = vec![
            ("★  NEON  SPACE  SHOOTER  ★".to_string(), C_TITLE),
            (String::new(), C_HINT),
        ];
        if self.best_score > 0 {
            lines.push((format!("Best Score: {}", self.best_score), Color::Yellow));
        }
        lines.push(("Click or press SPACE to start".to_string(), Color::White));
        lines.push((String::new(), C_HINT));
        lines.push(("Power-ups:  ★ multi-fire   ◈ shield   ♥ repair".to_string(), C_HINT));
        lines.push(("A boss arrives every 2000 points".to_string(), C_HINT));

        let top = cy.saturating_sub(lines.len() as u16 / 2);
        for (i, (text, color)) in lines.iter().enumerate() {
            let col = cx.saturating_sub(text.chars().count() as u16 / 2);
            out.queue(cursor::MoveTo(col, top + i as u16))?;
            out.queue(style::SetForegroundColor(*color))?;
            out.queue(Print(text))?;
        }
        Ok(())
    }

    fn draw_game_over<W: Write>(
        &self,
        out: &mut W,
        final_score: u32,
        cols: u16,
        rows: u16,
    ) -> std::io::Result<()> {
        let new_best = final_score >= self.best_score && final_score > 0;
        let score_line = format!("Final Score: {:>6}", final_score);
        let best_line = if new_best {
            format!("★ NEW BEST: {:>6} ★", final_score)
        } else {
            format!("Best Score:  {:>6}", self.best_score)
        };

        let lines: &[(&str, Color)] = &[
            ("╔════════════════════╗", Color::Red),
            ("║    GAME  OVER      ║", Color::Red),
            ("╚════════════════════╝", Color::Red),
        ];
        let best_color = if new_best { Color::Yellow } else { Color::DarkGrey };

        let cx = cols / 2;
        let total_rows = lines.len() + 3; // box + score + best + hint
        let start_row = (rows / 2).saturating_sub(total_rows as u16 / 2);

        for (i, (msg, color)) in lines.iter().enumerate() {
            let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
            out.queue(cursor::MoveTo(col, start_row + i as u16))?;
            out.queue(style::SetForegroundColor(*color))?;
            out.queue(Print(*msg))?;
        }

        let rest: [(&str, Color); 3] = [
            (score_line.as_str(), Color::Yellow),
            (best_line.as_str(), best_color),
            ("R - Play Again  Q - Quit", Color::White),
        ];
        for (i, (text, color)) in rest.iter().enumerate() {
            let row = start_row + lines.len() as u16 + i as u16;
            let col = cx.saturating_sub(text.chars().count() as u16 / 2);
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(*color))?;
            out.queue(Print(*text))?;
        }
        Ok(())
    }
}

impl Ui for TerminalHud {
    fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    fn set_health(&mut self, percent: u8) {
        self.health = percent.min(100);
    }

    fn show(&mut self, screen: Screen) {
        self.screen = screen;
    }
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Mouse / ← → ↑ ↓ / WASD : Steer   Auto-fire   Q : Quit"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(surface: &TerminalSurface) -> Vec<(u16, u16)> {
        let mut cells = Vec::new();
        for row in 0..surface.rows {
            for col in 0..surface.cols {
                if surface.cells[row as usize * surface.cols as usize + col as usize].ch != ' ' {
                    cells.push((col, row));
                }
            }
        }
        cells
    }

    #[test]
    fn covered_picks_cells_by_centre() {
        assert_eq!(covered(0.0, 16.0, 8.0, 10), 0..2);
        assert_eq!(covered(70.0, 1000.0, 8.0, 10), 9..10);
        assert!(covered(-100.0, 4.0, 8.0, 10).is_empty());
        assert!(covered(500.0, 900.0, 8.0, 10).is_empty());
    }

    #[test]
    fn fill_rect_paints_cells_whose_centre_is_inside() {
        let mut surface = TerminalSurface::new(20, 10, 8.0, 16.0, true);
        surface.fill_rect(Rect::new(10.0, 20.0, 30.0, 40.0), Rgb::new(255, 0, 0), None);

        let mut expected = Vec::new();
        for row in 0..10 {
            for col in 0..20 {
                let (cx, cy) = surface.cell_center(col, row);
                if (10.0..40.0).contains(&cx) && (20.0..60.0).contains(&cy) {
                    expected.push((col, row));
                }
            }
        }
        assert_eq!(painted(&surface), expected);
    }

    #[test]
    fn fill_rect_clipped_at_edges() {
        let mut surface = TerminalSurface::new(20, 10, 8.0, 16.0, true);
        surface.fill_rect(Rect::new(-50.0, -50.0, 1000.0, 1000.0), Rgb::new(255, 0, 0), None);
        assert_eq!(painted(&surface).len(), 200);
    }

    #[test]
    fn tiny_rect_still_visible() {
        let mut surface = TerminalSurface::new(20, 10, 8.0, 16.0, true);
        surface.fill_rect(Rect::new(9.0, 17.0, 2.0, 2.0), Rgb::new(255, 0, 0), None);
        assert_eq!(painted(&surface), vec![(1, 1)]);
    }

    #[test]
    fn large_circle_stays_round() {
        let mut surface = TerminalSurface::new(20, 10, 8.0, 16.0, true);
        surface.fill_circle(80.0, 80.0, 24.0, Rgb::new(255, 255, 255));

        let mut expected = Vec::new();
        for row in 0..10 {
            for col in 0..20 {
                let (px, py) = surface.cell_center(col, row);
                if (px - 80.0).powi(2) + (py - 80.0).powi(2) <= 24.0 * 24.0 {
                    expected.push((col, row));
                }
            }
        }
        assert!(!expected.is_empty());
        assert_eq!(painted(&surface), expected);
    }
}
