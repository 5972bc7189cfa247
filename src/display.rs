/// Rendering layer — all terminal I/O lives here.
///
/// The playfield is drawn into an RGB pixel buffer and pushed to the
/// terminal as U+2580 half blocks (two pixels per cell), then the HUD text
/// is overlaid in plain cells.  No game logic is performed; this module
/// only translates state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};
use fruit_catcher::entities::{Explosion, Fruit, FruitColor, GameState, GameStatus};

/// One rendered pixel spans this many world units.  A cols × rows terminal
/// therefore shows a (cols·8) × (rows·16) world, which keeps the gameplay
/// constants (fruit radius 40, basket 100 wide) in sensible proportion.
pub const WORLD_SCALE: f64 = 8.0;

/// Smallest terminal the game accepts.  Width is set by the longest
/// controls hint (51 chars printed from column 1); height keeps the win
/// banner clear of the HUD row and the hint row.
pub const MIN_COLS: u16 = 52;
pub const MIN_ROWS: u16 = 12;

/// Ring stroke for explosions, in pixels.
const EXPLOSION_STROKE: i32 = 1;

// ── Colour palette ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
struct Rgb(u8, u8, u8);

impl Rgb {
    fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }
}

const C_SKY_TOP: Rgb = Rgb(150, 205, 235);
const C_SKY_BOT: Rgb = Rgb(228, 241, 250);
const C_BASKET: Rgb = Rgb(35, 30, 25);
const C_TEXT: Color = Color::Black;
const C_BANNER: Color = Color::DarkBlue;
const C_AUTO_TAG: Color = Color::DarkMagenta;
const C_HINT: Color = Color::DarkGrey;
const C_WIN: Color = Color::Red;

fn fruit_rgb(color: FruitColor) -> Rgb {
    match color {
        FruitColor::Red => Rgb(255, 0, 0),
        FruitColor::Green => Rgb(0, 255, 0),
        FruitColor::Blue => Rgb(0, 0, 255),
        FruitColor::Yellow => Rgb(255, 255, 0),
        FruitColor::Orange => Rgb(255, 165, 0),
        FruitColor::Purple => Rgb(128, 0, 128),
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

// ── Pixel buffer ──────────────────────────────────────────────────────────────

/// RGB frame buffer rendered with half blocks: each cell's upper pixel is
/// the glyph's foreground colour, the lower pixel its background.
pub struct PixelBuf {
    w: usize,
    /// Pixel rows: terminal rows × 2.
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(cols: u16, rows: u16) -> Self {
        let w = cols as usize;
        let h = rows as usize * 2;
        PixelBuf {
            w,
            h,
            px: vec![C_SKY_TOP; w * h],
        }
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, c: Rgb) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set(cx + dx, cy + dy, c);
                }
            }
        }
    }

    /// Ring with outer radius `r` and the given stroke, both in pixels.
    fn fill_ring(&mut self, cx: i32, cy: i32, r: i32, stroke: i32, c: Rgb) {
        let inner = (r - stroke).max(0);
        for dy in -r..=r {
            for dx in -r..=r {
                let d2 = dx * dx + dy * dy;
                if d2 <= r * r && d2 >= inner * inner {
                    self.set(cx + dx, cy + dy, c);
                }
            }
        }
    }

    /// Push the whole buffer to the terminal, re-issuing colours only when
    /// they change from cell to cell.
    fn render<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg: Option<Rgb> = None;
        let mut prev_bg: Option<Rgb> = None;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);
                if prev_fg != Some(top) {
                    out.queue(style::SetForegroundColor(color(top)))?;
                    prev_fg = Some(top);
                }
                if prev_bg != Some(bot) {
                    out.queue(style::SetBackgroundColor(color(bot)))?;
                    prev_bg = Some(bot);
                }
                out.queue(Print('\u{2580}'))?; // ▀
            }
            if row + 1 < rows {
                // Reset before the newline so terminals with background-
                // colour-erase don't smear the row's last colour.
                out.queue(style::ResetColor)?;
                out.queue(Print("\r\n"))?;
                prev_fg = None;
                prev_bg = None;
            }
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: pixel layers first, then the text overlay.
pub fn render<W: Write>(
    out: &mut W,
    buf: &mut PixelBuf,
    state: &GameState,
) -> std::io::Result<()> {
    draw_sky(buf);
    draw_basket(buf, state);
    for fruit in &state.fruits {
        draw_fruit(buf, fruit);
    }
    for explosion in &state.explosions {
        draw_explosion(buf, explosion);
    }
    buf.render(out)?;

    draw_hud(out, buf, state)?;
    draw_controls_hint(out, buf, state)?;
    if state.status == GameStatus::Winning {
        draw_win_banner(out, buf, state)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, (buf.h / 2).saturating_sub(1) as u16))?;
    out.flush()?;
    Ok(())
}

// ── Pixel layers ──────────────────────────────────────────────────────────────

fn px(v: f64) -> i32 {
    (v / WORLD_SCALE).round() as i32
}

/// Sky colour at a given pixel row of the gradient.
fn sky_color(y: usize, h: usize) -> Rgb {
    Rgb::lerp(C_SKY_TOP, C_SKY_BOT, (y * 256 / h.max(1)) as u16)
}

fn draw_sky(buf: &mut PixelBuf) {
    for y in 0..buf.h {
        let c = sky_color(y, buf.h);
        for x in 0..buf.w {
            buf.set(x as i32, y as i32, c);
        }
    }
}

fn draw_basket(buf: &mut PixelBuf, state: &GameState) {
    let b = &state.basket;
    let w = ((b.width / WORLD_SCALE).round() as i32).max(1);
    let h = ((b.height / WORLD_SCALE).round() as i32).max(1);
    buf.fill_rect(px(b.x), px(b.y), w, h, C_BASKET);
}

fn draw_fruit(buf: &mut PixelBuf, fruit: &Fruit) {
    let r = ((fruit.radius / WORLD_SCALE).round() as i32).max(1);
    buf.fill_circle(px(fruit.x), px(fruit.y), r, fruit_rgb(fruit.color));
}

fn draw_explosion(buf: &mut PixelBuf, explosion: &Explosion) {
    let r = ((explosion.radius / WORLD_SCALE).round() as i32).max(1);
    buf.fill_ring(
        px(explosion.x),
        px(explosion.y),
        r,
        EXPLOSION_STROKE,
        fruit_rgb(explosion.color),
    );
}

// ── Text overlay ──────────────────────────────────────────────────────────────

/// Print `text` at cell (col, row) with the sky as background, so the
/// overlay doesn't punch default-coloured holes into the gradient.
fn overlay_text<W: Write>(
    out: &mut W,
    buf: &PixelBuf,
    col: u16,
    row: u16,
    fg: Color,
    text: &str,
) -> std::io::Result<()> {
    let bg = sky_color((row as usize * 2).min(buf.h.saturating_sub(1)), buf.h);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetBackgroundColor(color(bg)))?;
    out.queue(style::SetForegroundColor(fg))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, buf: &PixelBuf, state: &GameState) -> std::io::Result<()> {
    // Score — left
    overlay_text(out, buf, 1, 0, C_TEXT, &format!("Score: {}", state.score))?;

    // Goal banner — centre
    let banner = format!("Catch {} fruit!", state.winning_score);
    let bx = (buf.w as u16 / 2).saturating_sub(banner.chars().count() as u16 / 2);
    overlay_text(out, buf, bx, 0, C_BANNER, &banner)?;

    // Auto-pilot tag — right
    if state.auto_mode {
        let tag = "[ AUTO ]";
        let rx = (buf.w as u16).saturating_sub(tag.chars().count() as u16 + 1);
        overlay_text(out, buf, rx, 0, C_AUTO_TAG, tag)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

const HINT_MANUAL: &str = "MOUSE : Steer   SPACE : Auto-catch   Q / ESC : Quit";
const HINT_AUTO: &str = "MOUSE : Steer   SPACE : Manual   Q / ESC : Quit";

fn draw_controls_hint<W: Write>(
    out: &mut W,
    buf: &PixelBuf,
    state: &GameState,
) -> std::io::Result<()> {
    let hint = if state.auto_mode { HINT_AUTO } else { HINT_MANUAL };
    let row = (buf.h / 2).saturating_sub(1) as u16;
    overlay_text(out, buf, 1, row, C_HINT, hint)?;
    Ok(())
}

// ── Win banner ────────────────────────────────────────────────────────────────

const WIN_BANNER: [&str; 3] = [
    "╔═══════════════╗",
    "║    YOU WIN    ║",
    "╚═══════════════╝",
];

/// Blinking boxed banner: 500 ms on, 500 ms off (30 ticks each at 60 Hz),
/// driven by the tick counter so it needs no wall clock.
fn draw_win_banner<W: Write>(
    out: &mut W,
    buf: &PixelBuf,
    state: &GameState,
) -> std::io::Result<()> {
    if (state.frame / 30) % 2 != 0 {
        return Ok(());
    }

    let cx = buf.w as u16 / 2;
    let cy = (buf.h / 4) as u16; // middle row of the cell grid
    for (i, line) in WIN_BANNER.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        let row = cy.saturating_sub(1) + i as u16;
        overlay_text(out, buf, col, row, C_WIN, line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writing past the last column of the bottom row would scroll the
    /// whole frame, so everything printed in cells must fit MIN_COLS.
    #[test]
    fn chrome_fits_minimum_terminal() {
        assert!(1 + HINT_MANUAL.chars().count() <= MIN_COLS as usize);
        assert!(1 + HINT_AUTO.chars().count() <= MIN_COLS as usize);
        for line in WIN_BANNER {
            assert!(line.chars().count() <= MIN_COLS as usize);
        }

        // Banner rows sit strictly between the HUD row and the hint row.
        let cy = MIN_ROWS / 2;
        assert!(cy - 1 > 0);
        assert!(cy + 1 < MIN_ROWS - 1);
    }
}
