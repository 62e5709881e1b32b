use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
};
use ratatui::Frame;

use crate::app::App;
use crate::logger;
use crate::ui::interfaces::tab_title_spans;

/// Selector/sampler status log: selection changes, lost adapters,
/// enumeration trouble.
pub fn draw_events(f: &mut Frame, area: Rect, app: &App) {
    let entries = logger::entries();
    let total = entries.len();

    let visible_height = area.height.saturating_sub(4) as usize;
    let scroll = if app.events_auto_scroll {
        total.saturating_sub(visible_height)
    } else {
        app.events_scroll.min(total.saturating_sub(visible_height))
    };

    let hdr_style = Style::default()
        .fg(Color::Rgb(160, 180, 220))
        .add_modifier(Modifier::BOLD);

    let header = Row::new(vec![
        Cell::from(Span::styled("Time", hdr_style)),
        Cell::from(Span::styled("Level", hdr_style)),
        Cell::from(Span::styled("Message", hdr_style)),
    ])
    .height(1)
    .style(Style::default().bg(Color::Rgb(18, 25, 42)));

    let rows: Vec<Row> = entries
        .iter()
        .skip(scroll)
        .take(visible_height.max(1))
        .map(|entry| {
            let time_str = entry.timestamp.format("%H:%M:%S").to_string();
            let level_color = entry.color();

            Row::new(vec![
                Cell::from(Span::styled(
                    time_str,
                    Style::default().fg(Color::Rgb(100, 110, 130)),
                )),
                Cell::from(Span::styled(
                    entry.level.to_string(),
                    Style::default().fg(level_color).add_modifier(Modifier::BOLD),
                )),
                Cell::from(Span::styled(
                    entry.message.clone(),
                    Style::default().fg(Color::Rgb(155, 170, 195)),
                )),
            ])
            .style(Style::default().bg(Color::Rgb(12, 16, 28)))
        })
        .collect();

    let mut title_spans = tab_title_spans(&app.bottom_tab);
    title_spans.push(Span::styled(
        format!("  {} events ", total),
        Style::default().fg(Color::Rgb(100, 120, 150)),
    ));

    let table = Table::new(
        rows,
        [
            Constraint::Length(9),  // Time
            Constraint::Length(6),  // Level
            Constraint::Min(30),    // Message
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(Line::from(title_spans))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(30, 50, 85)))
            .style(Style::default().bg(Color::Rgb(12, 16, 28))),
    );

    f.render_widget(table, area);

    // Scrollbar
    if total > visible_height {
        let sb_area = Rect {
            x: area.x + area.width - 1,
            y: area.y + 2,
            width: 1,
            height: area.height.saturating_sub(3),
        };
        let mut sb_state =
            ScrollbarState::new(total.saturating_sub(visible_height)).position(scroll);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(Style::default().fg(Color::Rgb(40, 70, 120))),
            sb_area,
            &mut sb_state,
        );
    }
}
