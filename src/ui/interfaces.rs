use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table,
};
use ratatui::Frame;

use crate::app::App;
use crate::network::classify;
use crate::types::{BottomTab, SelectionMode};
use crate::utils::format_link_speed;

pub fn draw_interfaces(f: &mut Frame, area: Rect, app: &App) {
    let total = app.candidates.len();
    let platform = app.platform();

    let hdr_style = Style::default()
        .fg(Color::Rgb(160, 180, 220))
        .add_modifier(Modifier::BOLD);

    let header = Row::new(vec![
        Cell::from(Span::styled("", hdr_style)),
        Cell::from(Span::styled("Interface", hdr_style)),
        Cell::from(Span::styled("Kind", hdr_style)),
        Cell::from(Span::styled("Status", hdr_style)),
        Cell::from(Span::styled("Link", hdr_style)),
        Cell::from(Span::styled("Rank", hdr_style)),
        Cell::from(Span::styled("Description", hdr_style)),
    ])
    .height(1)
    .style(Style::default().bg(Color::Rgb(18, 25, 42)));

    let visible_height = area.height.saturating_sub(4) as usize;
    let scroll = app
        .iface_cursor
        .saturating_sub(visible_height.saturating_sub(1))
        .min(total.saturating_sub(visible_height));

    let active_key = app.active.as_ref().map(|d| d.key());

    let rows: Vec<Row> = app
        .candidates
        .iter()
        .enumerate()
        .skip(scroll)
        .take(visible_height.max(1))
        .map(|(i, iface)| {
            let is_active = active_key.as_ref() == Some(&iface.key());
            let is_cursor = i == app.iface_cursor;

            // ── Marker: what the sampler is watching right now ──
            let marker = if is_active { "\u{25B6}" } else { " " };

            let name_color = if is_active {
                Color::Rgb(80, 210, 255)
            } else {
                Color::Rgb(155, 170, 195)
            };

            let link = format_link_speed(iface.link_speed_bps)
                .unwrap_or_else(|| "-".to_string());

            let row_bg = if is_cursor {
                Color::Rgb(25, 40, 70)
            } else {
                Color::Rgb(12, 16, 28)
            };

            Row::new(vec![
                Cell::from(Span::styled(
                    marker,
                    Style::default()
                        .fg(Color::Rgb(80, 200, 120))
                        .add_modifier(Modifier::BOLD),
                )),
                Cell::from(Span::styled(
                    iface.name.clone(),
                    Style::default().fg(name_color).add_modifier(if is_active {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                )),
                Cell::from(Span::styled(
                    iface.kind.label().to_string(),
                    Style::default().fg(iface.kind.color()),
                )),
                Cell::from(Span::styled(
                    iface.status.label().to_string(),
                    Style::default()
                        .fg(iface.status.color())
                        .add_modifier(Modifier::BOLD),
                )),
                Cell::from(Span::styled(
                    link,
                    Style::default().fg(Color::Rgb(180, 170, 130)),
                )),
                Cell::from(Span::styled(
                    classify::priority(iface, platform).to_string(),
                    Style::default().fg(Color::Rgb(100, 120, 160)),
                )),
                Cell::from(Span::styled(
                    iface.description.clone(),
                    Style::default().fg(Color::Rgb(90, 100, 125)),
                )),
            ])
            .style(Style::default().bg(row_bg))
        })
        .collect();

    let mode_info = match &app.mode {
        SelectionMode::Auto => Span::styled(" AUTO ", Style::default().fg(Color::Rgb(80, 200, 120))),
        SelectionMode::Pinned(name) => Span::styled(
            format!(" \u{1F4CC} {} ", name),
            Style::default().fg(Color::Rgb(255, 200, 80)),
        ),
    };

    let mut title_spans = tab_title_spans(&app.bottom_tab);
    title_spans.push(Span::styled(
        format!("  {} physical ", total),
        Style::default().fg(Color::Rgb(100, 120, 150)),
    ));
    title_spans.push(mode_info);

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),  // Active marker
            Constraint::Length(24), // Interface name
            Constraint::Length(17), // Kind
            Constraint::Length(7),  // Status
            Constraint::Length(9),  // Link speed
            Constraint::Length(5),  // Rank
            Constraint::Min(16),    // Description
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

// ─── Tab header spans ────────────────────────────────────────────────────────

/// Generate tab header spans with active highlighting.
pub fn tab_title_spans(active: &BottomTab) -> Vec<Span<'static>> {
    let iface_style = if *active == BottomTab::Interfaces {
        Style::default()
            .fg(Color::Rgb(80, 190, 255))
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::Rgb(65, 80, 110))
    };
    let events_style = if *active == BottomTab::Events {
        Style::default()
            .fg(Color::Rgb(80, 190, 255))
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(Color::Rgb(65, 80, 110))
    };

    vec![
        Span::styled(" [1] Interfaces ", iface_style),
        Span::styled(" [2] Events ", events_style),
    ]
}
