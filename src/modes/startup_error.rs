//! 起動エラーモード: 設定不備を全画面で表示し、再読み込みを待つ

use super::{AppMode, Mode};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub struct StartupErrorMode {
    message: String,
}

impl StartupErrorMode {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

impl Mode for StartupErrorMode {
    fn update(&mut self) {}

    fn render(&self, f: &mut Frame) {
        let area = f.area();
        let block = Block::default()
            .title("An Error Occurred")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));

        let text = vec![
            Line::from("Failed to start a new adventure.".bold().fg(Color::Red)),
            Line::from(""),
            Line::from(self.message.clone()),
            Line::from(""),
            Line::from("Set OPENAI_API_KEY (environment or .env) and press r to reload.".fg(Color::Yellow)),
            Line::from("q / Esc: Exit".fg(Color::DarkGray)),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<AppMode>> {
        match key.code {
            KeyCode::Char('r') => Ok(Some(AppMode::launch())),
            KeyCode::Esc | KeyCode::Char('q') => Ok(Some(AppMode::Exit)),
            _ => Ok(None),
        }
    }
}
