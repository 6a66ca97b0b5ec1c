use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, MAX_NAME_LEN};
use crate::leaderboard::Leaderboard;

use super::context::{NEON_BLUE, NEON_PINK};

const BANNER: &str = r#"
 ████████╗██████╗  █████╗  ██████╗███████╗
 ╚══██╔══╝██╔══██╗██╔══██╗██╔════╝██╔════╝
    ██║   ██████╔╝███████║██║     █████╗
    ██║   ██╔══██╗██╔══██║██║     ██╔══╝
    ██║   ██║  ██║██║  ██║╚██████╗███████╗
    ╚═╝   ╚═╝  ╚═╝╚═╝  ╚═╝ ╚═════╝╚══════╝"#;

pub fn render_start(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(NEON_BLUE))
        .title(" 🕹 Trace Runner ")
        .title_style(Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Banner
            Constraint::Min(9),    // Name entry + leaderboard
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let banner: Vec<Line> = BANNER
        .lines()
        .map(|l| Line::from(Span::styled(l, Style::default().fg(NEON_BLUE).add_modifier(Modifier::BOLD))))
        .collect();
    frame.render_widget(Paragraph::new(banner).alignment(Alignment::Center), chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_name_entry(frame, columns[0], &app.name_buffer, app.name_rejected, app.best_score);
    render_leaderboard(frame, columns[1], &app.leaderboard);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" Type your name, ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(NEON_BLUE).add_modifier(Modifier::BOLD)),
        Span::styled(" to play │ ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(NEON_BLUE).add_modifier(Modifier::BOLD)),
        Span::styled(" to quit", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(help, chunks[2]);
}

fn render_name_entry(frame: &mut Frame, area: Rect, name_buffer: &str, rejected: bool, best: u32) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .title(" Player ")
        .title_style(Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Typed chars followed by underscores for the remaining room
    let typed_len = name_buffer.chars().count();
    let remaining = MAX_NAME_LEN.saturating_sub(typed_len);
    let display_name = format!("{}{}", name_buffer, "_".repeat(remaining));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Enter your name:", Style::default().fg(Color::Rgb(180, 180, 200)))),
        Line::from(""),
        Line::from(vec![
            Span::styled("    [ ", Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled(display_name, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled(" ]", Style::default().fg(Color::Rgb(100, 100, 130))),
        ]),
        Line::from(""),
    ];
    if rejected {
        lines.push(Line::from(Span::styled(
            "  A name is required to play",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    } else if best > 0 {
        lines.push(Line::from(Span::styled(
            format!("  Session best: {}", best),
            Style::default().fg(Color::Cyan),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_leaderboard(frame: &mut Frame, area: Rect, leaderboard: &Leaderboard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(NEON_PINK))
        .title(" 🏆 Leaderboard ")
        .title_style(Style::default().fg(NEON_PINK).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let ranked = leaderboard.ranked();
    let mut lines = vec![Line::from("")];
    if ranked.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No scores yet",
            Style::default().fg(Color::Rgb(100, 100, 120)),
        )));
    }
    for (i, entry) in ranked.iter().enumerate() {
        let medal_color = match i {
            0 => Color::Rgb(255, 215, 0),
            1 => Color::Rgb(192, 192, 192),
            2 => Color::Rgb(205, 127, 50),
            _ => Color::Rgb(140, 140, 160),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {}. ", i + 1), Style::default().fg(medal_color).add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{:<width$}", entry.name, width = MAX_NAME_LEN),
                Style::default().fg(Color::White),
            ),
            Span::styled(format!(" {:>5}", entry.score), Style::default().fg(Color::Yellow)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  Board resets every {} games", leaderboard.capacity()),
        Style::default().fg(Color::Rgb(90, 90, 110)),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
