//! UI描画モジュール（冒険画面）

use crate::controller::TurnController;
use crate::models::{GameState, HealthBand, PlayerState};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use std::time::Instant;

/// 冒険画面のメイン描画関数
pub fn render(f: &mut Frame, controller: &TurnController, input: &str, scroll_back: u16, started: Instant) {
    let area = f.area();

    let (Some(game), Some(player)) = (controller.game(), controller.player()) else {
        render_loading_or_error(f, area, controller);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                               // タイトル
            Constraint::Min(6),                                  // 物語
            Constraint::Length(choices_height(game.choices.len())), // 行動候補
            Constraint::Length(3),                               // 入力欄
            Constraint::Length(1),                               // 状態行
        ])
        .split(columns[0]);

    render_title(f, left[0]);
    render_story(f, left[1], &game.narrative, scroll_back);
    render_choices(f, left[2], game, controller.is_busy());
    render_input(f, left[3], input, controller.is_busy());
    render_status_line(f, left[4], controller, started);
    render_player_status(f, columns[1], player, &game.location);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        "Pixel Pioneers".bold().fg(Color::Yellow),
        Span::raw("  Enter: act | 1-4: choose | Ctrl+N: new game | PgUp/PgDn: scroll | Esc: quit").fg(Color::DarkGray),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

/// 行動候補パネルの高さ（枠を含む）。候補がいくら多くてもあふれない
fn choices_height(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX).saturating_add(2)
}

/// 物語の各行を作る。`>` で始まる行はプレイヤーの行動として強調
fn story_lines(narrative: &str) -> Vec<Line<'_>> {
    narrative
        .split('\n')
        .map(|p| {
            if p.starts_with('>') {
                Line::from(p.italic().fg(Color::Yellow))
            } else {
                Line::from(p)
            }
        })
        .collect()
}

/// 折り返し後のおおよその行数
fn wrapped_height(narrative: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    narrative
        .split('\n')
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum::<usize>()
        .min(u16::MAX as usize) as u16
}

fn render_story(f: &mut Frame, area: Rect, narrative: &str, scroll_back: u16) {
    let inner_height = area.height.saturating_sub(2);
    let total = wrapped_height(narrative, area.width.saturating_sub(2));
    // 末尾を表示し、scroll_back 行だけさかのぼる
    let offset = total.saturating_sub(inner_height).saturating_sub(scroll_back);
    let story = Paragraph::new(story_lines(narrative))
        .block(Block::default().borders(Borders::ALL).title("Story"))
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    f.render_widget(story, area);
}

fn render_choices(f: &mut Frame, area: Rect, game: &GameState, busy: bool) {
    let style = if busy { Style::default().fg(Color::DarkGray) } else { Style::default() };
    let items: Vec<ListItem> = game
        .choices
        .iter()
        .enumerate()
        .map(|(i, c)| ListItem::new(format!("[{}] {}", i + 1, c)).style(style))
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Choices"));
    f.render_widget(list, area);
}

fn render_input(f: &mut Frame, area: Rect, input: &str, busy: bool) {
    let text = if busy {
        Line::from("The world is reacting...".italic().fg(Color::DarkGray))
    } else if input.is_empty() {
        Line::from("Or type your own action..._".fg(Color::DarkGray))
    } else {
        Line::from(format!("{input}_")) // 簡易カーソル表示
    };
    let widget = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Action"));
    f.render_widget(widget, area);
}

fn render_status_line(f: &mut Frame, area: Rect, controller: &TurnController, started: Instant) {
    let line = match controller.error_message() {
        Some(msg) => Line::from(Span::styled(msg.to_string(), Style::default().fg(Color::Red))),
        None => Line::from(Span::styled(
            format!("経過: {:.1}s", started.elapsed().as_secs_f32()),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn band_color(band: HealthBand) -> Color {
    match band {
        HealthBand::Healthy => Color::Green,
        HealthBand::Wounded => Color::Yellow,
        HealthBand::Critical => Color::Red,
    }
}

fn render_player_status(f: &mut Frame, area: Rect, player: &PlayerState, location: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let loc = Paragraph::new(location.to_string())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Location"));
    f.render_widget(loc, rows[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Health"))
        .gauge_style(Style::default().fg(band_color(player.health_band())))
        .ratio(player.health_ratio())
        .label(format!("{} / {}", player.health, player.max_health));
    f.render_widget(gauge, rows[1]);

    let items: Vec<ListItem> = if player.inventory.is_empty() {
        vec![ListItem::new("Your pockets are empty.".italic().fg(Color::DarkGray))]
    } else {
        player.inventory.iter().map(|i| ListItem::new(format!("- {i}"))).collect()
    };
    let inventory = List::new(items).block(Block::default().borders(Borders::ALL).title("Inventory"));
    f.render_widget(inventory, rows[2]);
}

fn render_loading_or_error(f: &mut Frame, area: Rect, controller: &TurnController) {
    let (title, lines, color) = match controller.error_message() {
        Some(msg) => (
            "An Error Occurred",
            vec![
                Line::from(msg.to_string()),
                Line::from(""),
                Line::from("r: try again | q / Esc: quit".fg(Color::DarkGray)),
            ],
            Color::Red,
        ),
        None => ("Pixel Pioneers", vec![Line::from("Forging a new world...".italic())], Color::Yellow),
    };
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title).border_style(Style::default().fg(color)));
    f.render_widget(widget, area);
}
