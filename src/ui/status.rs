use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::App;
use crate::types::{BottomTab, SelectionMode};

pub fn draw_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let common_keys = vec![
        key_span("q", "Quit"),
        key_span("Tab", "Switch"),
        key_span("r", "Refresh"),
        key_span("\u{2191}\u{2193}", "Scroll"),
    ];

    let tab_keys = match app.bottom_tab {
        BottomTab::Interfaces => {
            let mut keys = vec![key_span("Enter", "Pin")];
            if matches!(app.mode, SelectionMode::Pinned(_)) {
                keys.push(key_span("a", "Auto"));
            }
            keys
        }
        BottomTab::Events => vec![key_span("c", "Clear")],
    };

    let mut spans = Vec::new();
    for s in common_keys {
        spans.extend(s);
    }
    spans.push(Span::styled(" | ", Style::default().fg(Color::Rgb(50, 60, 80))));
    for s in tab_keys {
        spans.extend(s);
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Rgb(14, 20, 36)));
    f.render_widget(paragraph, area);
}

fn key_span(key: &str, desc: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(
            format!(" {} ", key),
            Style::default()
                .fg(Color::Rgb(255, 200, 80))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", desc),
            Style::default().fg(Color::Rgb(95, 108, 135)),
        ),
    ]
}
