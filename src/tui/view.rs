// File: src/tui/view.rs
use crate::heatmap::{HeatGrid, HeatLevel, Segment};
use crate::model::display::{NO_MATCHES, group_heading, pad_to_width};
use crate::model::{Category, CategoryFilter};
use crate::tui::state::{AppState, Focus, InputMode};
use strum::IntoEnumIterator;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

pub fn draw(f: &mut Frame, state: &mut AppState<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, state, chunks[0]);

    if state.show_heatmap {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        draw_events(f, state, body[0]);
        draw_heatmap(f, state, body[1]);
    } else {
        draw_events(f, state, chunks[1]);
    }

    draw_footer(f, state, chunks[2]);
}

fn category_color(category: Option<Category>) -> Color {
    match category {
        Some(Category::A) => Color::Red,
        Some(Category::B) => Color::Blue,
        Some(Category::C) | None => Color::Gray,
    }
}

fn draw_header(f: &mut Frame, state: &AppState<'_>, area: Rect) {
    let searching = state.mode == InputMode::Searching;
    let search_text = if searching {
        state.input_buffer.as_str()
    } else {
        state.filter.search_term.as_str()
    };

    let search_display = if search_text.is_empty() && !searching {
        Span::styled("搜索赛事或省份... (/)", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(search_text.to_string())
    };

    let mut spans = vec![
        Span::styled(
            " 2026 ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " 全国马拉松赛事目录  ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("🔍 ", Style::default().fg(Color::DarkGray)),
        search_display,
        Span::raw("   "),
    ];

    let choices = std::iter::once(CategoryFilter::All).chain(Category::iter().map(CategoryFilter::from));
    for choice in choices {
        let style = if choice == state.filter.category {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", choice.label()), style));
    }
    let line = Line::from(spans);

    let border = if searching { Color::Red } else { Color::DarkGray };
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(header, area);

    if searching {
        // Badge, title and icon come before the buffer on the same row.
        let prefix = " 2026 ".width() + " 全国马拉松赛事目录  ".width() + "🔍 ".width();
        let before: String = state
            .input_buffer
            .chars()
            .take(state.cursor_position)
            .collect();
        let x = area.x + 1 + (prefix + before.width()) as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_events(f: &mut Frame, state: &mut AppState<'_>, area: Rect) {
    let focused = state.active_focus == Focus::Main;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 赛事 ")
        .border_style(Style::default().fg(if focused {
            Color::Yellow
        } else {
            Color::DarkGray
        }));

    if state.groups.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                NO_MATCHES,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "按 r 重置筛选条件",
                Style::default().fg(Color::Red),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let selected = state.list_state.selected();
    let mut items: Vec<ListItem> = Vec::new();
    let mut selected_row = None;
    let mut flat = 0;

    for group in &state.groups {
        items.push(ListItem::new(Line::from(Span::styled(
            group_heading(group),
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ))));
        for event in &group.events {
            if selected == Some(flat) {
                selected_row = Some(items.len());
            }
            let badge = Span::styled(
                format!(" {} ", event.category.map_or("-", |c| c.as_str())),
                Style::default()
                    .fg(Color::White)
                    .bg(category_color(event.category)),
            );
            let mut spans = vec![
                Span::raw("  "),
                badge,
                Span::raw(" "),
                Span::styled(
                    pad_to_width(&event.province, 8),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    event.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ];
            if !event.event_type.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", event.event_type),
                    Style::default().fg(Color::Gray),
                ));
            }
            items.push(ListItem::new(Line::from(spans)));
            flat += 1;
        }
    }

    state.row_state.select(selected_row);

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state.row_state);
}

fn level_color(level: HeatLevel) -> Color {
    match level {
        HeatLevel::Empty => Color::DarkGray,
        HeatLevel::Regular => Color::LightRed,
        HeatLevel::Dense => Color::Red,
    }
}

fn draw_heatmap(f: &mut Frame, state: &AppState<'_>, area: Rect) {
    let focused = state.active_focus == Focus::Heatmap;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 赛事分布热力图 ")
        .border_style(Style::default().fg(if focused {
            Color::Yellow
        } else {
            Color::DarkGray
        }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Last row is the legend.
    let map_height = inner.height.saturating_sub(1) as usize;
    let grid = HeatGrid::layout(
        &state.province_counts,
        inner.width as usize,
        map_height,
        state.selected_province,
    );
    let cursor = if focused {
        Some(state.cursor_province())
    } else {
        None
    };

    let mut lines: Vec<Line> = Vec::with_capacity(map_height + 1);
    for row in 0..map_height {
        let spans: Vec<Span> = grid
            .segments(row)
            .into_iter()
            .map(|seg| match seg {
                Segment::Text(t) => Span::styled(t, Style::default().fg(Color::Gray)),
                Segment::Bubble(p) => {
                    let mut style = Style::default().fg(level_color(p.level));
                    if p.selected {
                        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                    }
                    if cursor == Some(p.province) {
                        style = style.add_modifier(Modifier::UNDERLINED).bg(Color::Yellow);
                    }
                    Span::styled(p.size.glyph().to_string(), style)
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let legend: Vec<Span> = [HeatLevel::Dense, HeatLevel::Regular, HeatLevel::Empty]
        .iter()
        .flat_map(|l| {
            [
                Span::styled("● ", Style::default().fg(level_color(*l))),
                Span::raw(format!("{}  ", l.legend())),
            ]
        })
        .collect();
    lines.push(Line::from(legend));

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_footer(f: &mut Frame, state: &AppState<'_>, area: Rect) {
    let detail = if state.active_focus == Focus::Heatmap {
        state.heatmap_status()
    } else if let Some(event) = state.get_selected_event() {
        let mut s = format!("{} · {} · {}", event.time, event.category_label(), event.province);
        if !event.organizer.is_empty() {
            s.push_str(&format!(" · {}", event.organizer));
        }
        s
    } else {
        String::new()
    };

    let help = match state.mode {
        InputMode::Searching => "Enter:确定  Esc:清除  ↑↓:移动",
        InputMode::Normal => "/:搜索  c/C:级别  0-3:级别  r:重置  m:地图  Tab:焦点  q:退出",
    };

    let text = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", state.message),
                Style::default().fg(Color::Black).bg(Color::Gray),
            ),
            Span::raw(" "),
            Span::raw(detail),
        ]),
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
    ];
    let footer = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}
