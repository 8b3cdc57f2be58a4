//! 冒険モード: 物語・ステータス・行動候補を表示し、行動をワーカーへ送る

use super::{AppMode, Mode};
use crate::config::Config;
use crate::controller::TurnController;
use crate::error::GameError;
use crate::event::{AdventureInput, interpret_key};
use crate::session::OpenAiSession;
use crate::ui;
use crate::worker::{TurnRequest, TurnWorker};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use std::time::Instant;
use tracing::info;

/// 冒険モード状態
pub struct AdventureMode {
    config: Config,
    controller: TurnController,
    /// 現在のセッションを所有するワーカー
    worker: TurnWorker,
    /// 何番目のセッションか（やり直しごとに増える）
    session_no: u32,
    /// 入力中の行動
    input: String,
    /// 物語パネルを末尾から何行さかのぼって表示するか
    scroll_back: u16,
    started: Instant,
}

impl AdventureMode {
    /// 新しいセッションで冒険を開始
    pub fn new(config: Config) -> Result<Self, GameError> {
        let worker = TurnWorker::spawn(OpenAiSession::new(&config)?);
        let mut mode = Self {
            config,
            controller: TurnController::new(),
            worker,
            session_no: 1,
            input: String::new(),
            scroll_back: 0,
            started: Instant::now(),
        };
        mode.controller.begin_session();
        mode.dispatch(TurnRequest::Begin);
        Ok(mode)
    }

    pub fn poll_interval_ms(&self) -> u64 {
        self.config.poll_interval_ms
    }

    /// セッションと状態を捨てて最初から。応答待ち中でもよい
    fn restart(&mut self) -> Result<(), GameError> {
        info!(target: "app", busy = self.controller.is_busy(), session = self.session_no + 1, "restart_requested");
        // 古いワーカーはチャンネル破棄で終了し、遅れて届く応答は捨てられる
        self.worker = TurnWorker::spawn(OpenAiSession::new(&self.config)?);
        self.session_no += 1;
        self.controller.restart();
        self.input.clear();
        self.scroll_back = 0;
        self.started = Instant::now();
        self.dispatch(TurnRequest::Begin);
        Ok(())
    }

    fn submit(&mut self, action: &str) {
        if let Some(action) = self.controller.submit(action) {
            self.input.clear();
            self.scroll_back = 0;
            self.dispatch(TurnRequest::Action(action));
        }
    }

    fn dispatch(&mut self, request: TurnRequest) {
        if let Err(e) = self.worker.request(request) {
            self.controller.complete(Err(e));
        }
    }
}

impl Mode for AdventureMode {
    fn update(&mut self) {
        // ターン結果の非ブロッキングチェック
        while let Some(reply) = self.worker.try_reply() {
            if self.controller.complete(reply) {
                self.scroll_back = 0;
            }
        }
    }

    fn render(&self, f: &mut Frame) {
        ui::render(f, &self.controller, &self.input, self.scroll_back, self.started);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<AppMode>> {
        // 開始に失敗した画面では r で再試行のみ受け付ける
        if self.controller.start_failed() {
            return match key.code {
                KeyCode::Char('r') => {
                    self.restart()?;
                    Ok(None)
                }
                KeyCode::Esc | KeyCode::Char('q') => Ok(Some(AppMode::Exit)),
                _ => Ok(None),
            };
        }

        let choice_count = self.controller.game().map_or(0, |g| g.choices.len());
        let Some(input) = interpret_key(key, self.input.is_empty(), choice_count) else {
            return Ok(None);
        };
        match input {
            AdventureInput::Quit => return Ok(Some(AppMode::Exit)),
            AdventureInput::Restart => self.restart()?,
            AdventureInput::SubmitTyped => {
                let typed = self.input.clone();
                self.submit(&typed);
            }
            AdventureInput::PickChoice(idx) => {
                let choice = self.controller.game().and_then(|g| g.choices.get(idx).cloned());
                if let Some(choice) = choice {
                    self.submit(&choice);
                }
            }
            AdventureInput::PushChar(ch) => {
                if !self.controller.is_busy() {
                    self.input.push(ch);
                }
            }
            AdventureInput::PopChar => {
                self.input.pop();
            }
            AdventureInput::ScrollUp => self.scroll_back = self.scroll_back.saturating_add(3),
            AdventureInput::ScrollDown => self.scroll_back = self.scroll_back.saturating_sub(3),
        }
        Ok(None)
    }
}
