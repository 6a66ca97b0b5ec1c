use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::config::WorldConfig;
use crate::game::Round;

use super::context::{Cell, RenderContext, NEON_BLUE, NEON_PINK};

/// Maps canvas pixels onto a grid of terminal cells.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub cols: usize,
    pub rows: usize,
    sx: f32,
    sy: f32,
}

impl Viewport {
    pub fn new(world: &WorldConfig, cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            sx: cols as f32 / world.screen_width,
            sy: rows as f32 / world.screen_height,
        }
    }

    pub fn col(&self, x: f32) -> i32 {
        (x * self.sx).floor() as i32
    }

    pub fn row(&self, y: f32) -> i32 {
        (y * self.sy).floor() as i32
    }

    /// Cells covered by a span of `len` canvas pixels, never less than one.
    pub fn cols_for(&self, len: f32) -> usize {
        ((len * self.sx).ceil() as usize).max(1)
    }

    pub fn rows_for(&self, len: f32) -> usize {
        ((len * self.sy).ceil() as usize).max(1)
    }
}

fn put(grid: &mut [Vec<Cell>], x: i32, y: i32, (ch, style): Cell) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
        // Keep the background already painted underneath
        *cell = (ch, cell.1.patch(style));
    }
}

pub fn render_field(
    round: &Round,
    world: &WorldConfig,
    ctx: &mut RenderContext,
    width: usize,
    height: usize,
) -> Vec<Line<'static>> {
    let view = Viewport::new(world, width, height);
    let mut grid: Vec<Vec<Cell>> = (0..height)
        .map(|y| vec![(' ', ctx.sky_style(y, height)); width])
        .collect();

    // Skyline along the bottom
    let skyline = ctx.skyline();
    let top = height as i32 - skyline.height() as i32;
    for sy in 0..skyline.height() {
        for x in 0..width {
            let cell = skyline.get(x % skyline.width(), sy);
            if cell.0 != ' ' {
                put(&mut grid, x as i32, top + sy as i32, cell);
            }
        }
    }

    // Barriers
    for obstacle in round.course.obstacles() {
        let left = view.col(obstacle.x);
        let cols = view.cols_for(obstacle.width());
        let gap_top = view.row(obstacle.gap_y());
        let gap_bottom = view.row(obstacle.gap_y() + obstacle.gap_height());
        let sprite = ctx.barrier(cols);

        for dx in 0..cols {
            let x = left + dx as i32;
            if x < 0 || x >= width as i32 {
                continue;
            }
            let cap = sprite.get(dx, 0);
            let body = sprite.get(dx, 1);
            for y in 0..gap_top {
                put(&mut grid, x, y, if y == gap_top - 1 { cap } else { body });
            }
            for y in gap_bottom.max(0)..height as i32 {
                put(&mut grid, x, y, if y == gap_bottom { cap } else { body });
            }
        }
    }

    // Trace
    let character = &round.character;
    let cols = view.cols_for(character.size());
    let rows = view.rows_for(character.size());
    let left = view.col(character.x);
    let top = view.row(character.y).min(height as i32 - rows as i32);
    let sprite = ctx.trace(cols, rows);
    for dy in 0..sprite.height() {
        for dx in 0..sprite.width() {
            let cell = sprite.get(dx, dy);
            if cell.0 != ' ' {
                put(&mut grid, left + dx as i32, top + dy as i32, cell);
            }
        }
    }

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

pub fn render_playing(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(NEON_BLUE))
        .title(" ▶ Trace Runner ")
        .title_style(Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(4),    // Field
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let App {
        round,
        render_ctx,
        config,
        player_name,
        best_score,
        inputs,
        ..
    } = app;
    let Some(round) = round.as_ref() else {
        return;
    };

    let status = Line::from(vec![
        Span::styled(
            format!(" {} ", player_name),
            Style::default().fg(NEON_BLUE).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Score: {:03} ", round.score()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Difficulty: {:.0} ", round.difficulty()),
            Style::default().fg(NEON_PINK),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Best: {:03}", (*best_score).max(round.score())),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[0]);

    let field = chunks[1];
    let lines = render_field(
        round,
        &config.world,
        render_ctx,
        field.width as usize,
        field.height as usize,
    );
    frame.render_widget(Paragraph::new(lines), field);

    let flap_hint = if inputs.keyboard.tracks_release() {
        " Hold SPACE/↑ Flap "
    } else {
        " SPACE/↑ Flap "
    };
    let mut help = vec![
        Span::styled(flap_hint, Style::default().fg(Color::DarkGray)),
        Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Esc Quit ", Style::default().fg(Color::DarkGray)),
    ];
    if inputs.extra_sources() > 0 {
        help.push(Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))));
        help.push(Span::styled(
            "☝ Point up to flap",
            Style::default().fg(Color::Rgb(120, 200, 120)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(help)), chunks[2]);
}
