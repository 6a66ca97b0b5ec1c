//! Sprites and palette, built once and handed to every draw call.

use ratatui::style::{Color, Modifier, Style};

pub const NEON_BLUE: Color = Color::Rgb(0, 255, 255);
pub const NEON_PINK: Color = Color::Rgb(255, 0, 255);
pub const SKY_TOP: (u8, u8, u8) = (8, 6, 28);
pub const SKY_BOTTOM: (u8, u8, u8) = (40, 12, 60);

pub type Cell = (char, Style);

/// A rectangle of styled cells.
#[derive(Debug, Clone)]
pub struct Sprite {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Sprite {
    /// Builds a sprite from rows of text; `style_of` colors each glyph.
    pub fn from_art(rows: &[&str], style_of: impl Fn(char) -> Style) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut cells = vec![(' ', Style::default()); width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                cells[y * width + x] = (ch, style_of(ch));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    /// Nearest-neighbour resample to `width` x `height` cells.
    pub fn scaled(&self, width: usize, height: usize) -> Sprite {
        let width = width.max(1);
        let height = height.max(1);
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            let sy = (y * self.height / height).min(self.height.saturating_sub(1));
            for x in 0..width {
                let sx = (x * self.width / width).min(self.width.saturating_sub(1));
                cells.push(self.get(sx, sy));
            }
        }
        Sprite {
            width,
            height,
            cells,
        }
    }
}

/// Sprites at their current on-screen size; rebuilt only when the size changes.
#[derive(Debug, Clone)]
struct ScaledCache {
    key: (usize, usize),
    sprite: Sprite,
}

pub struct RenderContext {
    trace: Sprite,
    barrier: Sprite,
    skyline: Sprite,
    trace_scaled: Option<ScaledCache>,
    barrier_scaled: Option<ScaledCache>,
}

impl RenderContext {
    pub fn new() -> Self {
        let trace = Sprite::from_art(&["▗▟█▙", "▝▜█▛"], |ch| match ch {
            '█' => Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD),
            _ => Style::default().fg(NEON_BLUE).add_modifier(Modifier::BOLD),
        });

        // Row 0 is the cap drawn next to the gap, row 1 the body
        let barrier = Sprite::from_art(&["▛▀▀▀▜", "▌░▒▓▐"], |ch| {
            let fg = match ch {
                '░' => Color::Rgb(90, 30, 110),
                '▒' => Color::Rgb(140, 40, 160),
                '▓' => Color::Rgb(200, 60, 220),
                _ => NEON_PINK,
            };
            Style::default().fg(fg).bg(Color::Rgb(30, 8, 40))
        });

        let skyline = Sprite::from_art(
            &[
                "       .          *             .       ",
                "  *          .           .          *   ",
                "▁▂▃▁▅▂▁▇▃▁▁▂▆▃▁▄▁▁▃▂▇▁▂▁▅▃▁▂▁▆▁▃▂▁▁▄▂▁▃▁",
            ],
            |ch| match ch {
                '.' | '*' => Style::default().fg(Color::Rgb(140, 140, 200)),
                _ => Style::default().fg(Color::Rgb(60, 30, 90)),
            },
        );

        Self {
            trace,
            barrier,
            skyline,
            trace_scaled: None,
            barrier_scaled: None,
        }
    }

    pub fn trace(&mut self, width: usize, height: usize) -> &Sprite {
        cached(&mut self.trace_scaled, &self.trace, width, height)
    }

    /// Barrier sprite stretched to `width` columns (two rows: cap, body).
    pub fn barrier(&mut self, width: usize) -> &Sprite {
        cached(&mut self.barrier_scaled, &self.barrier, width, 2)
    }

    pub fn skyline(&self) -> &Sprite {
        &self.skyline
    }

    pub fn sky_style(&self, row: usize, rows: usize) -> Style {
        let t = row as f32 / rows.max(1) as f32;
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t) as u8;
        Style::default().bg(Color::Rgb(
            lerp(SKY_TOP.0, SKY_BOTTOM.0),
            lerp(SKY_TOP.1, SKY_BOTTOM.1),
            lerp(SKY_TOP.2, SKY_BOTTOM.2),
        ))
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

fn cached<'a>(
    slot: &'a mut Option<ScaledCache>,
    source: &Sprite,
    width: usize,
    height: usize,
) -> &'a Sprite {
    let key = (width.max(1), height.max(1));
    if slot.as_ref().map(|c| c.key) != Some(key) {
        *slot = None;
    }
    &slot
        .get_or_insert_with(|| ScaledCache {
            key,
            sprite: source.scaled(key.0, key.1),
        })
        .sprite
}
