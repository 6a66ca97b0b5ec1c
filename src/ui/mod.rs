pub mod context;
pub mod playfield;
pub mod start;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Screen};

use context::{NEON_BLUE, NEON_PINK};

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    match app.screen {
        Screen::Start => start::render_start(frame, area, app),
        Screen::Playing => playfield::render_playing(frame, area, app),
        Screen::GameOver => {
            // Frozen last frame underneath the panel
            playfield::render_playing(frame, area, app);
            render_game_over(frame, area, app);
        }
        Screen::Quit => {}
    }
}

fn render_game_over(frame: &mut Frame, area: Rect, app: &App) {
    let overlay_w = 44u16.min(area.width.saturating_sub(4));
    let overlay_h = 12u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(NEON_PINK))
        .title(" 💀 GAME OVER ")
        .title_style(Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 10, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Player: ", Style::default().fg(Color::Rgb(180, 180, 200))),
            Span::styled(app.player_name.as_str(), Style::default().fg(NEON_BLUE).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("  Score: {}", app.last_score),
            Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  Session best: {}", app.best_score),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
    ];
    match &app.save_error {
        Some(err) => lines.push(Line::from(Span::styled(
            format!("  {}", err),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::from(Span::styled(
            "  Score saved to the leaderboard",
            Style::default().fg(Color::Rgb(100, 100, 130)),
        ))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  Enter", Style::default().fg(NEON_BLUE).add_modifier(Modifier::BOLD)),
        Span::styled(" menu  ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled("R", Style::default().fg(NEON_BLUE).add_modifier(Modifier::BOLD)),
        Span::styled(" retry  ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled("Esc", Style::default().fg(NEON_BLUE).add_modifier(Modifier::BOLD)),
        Span::styled(" quit", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]));

    let p = Paragraph::new(lines).style(Style::default().bg(Color::Rgb(15, 10, 25)));
    frame.render_widget(p, inner);
}
