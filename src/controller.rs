//! ターン進行の状態機械
//!
//! `Idle` → `AwaitingTurn` → `Idle` / `Error` を管理する。
//! 行動を送った瞬間に物語へ `> 行動` を追記し、失敗したら
//! 追記前に記録しておいた物語へそのまま戻す。

use crate::error::GameError;
use crate::models::{GameState, PlayerState, Turn};
use tracing::{info, warn};

/// 開始に失敗したときの表示メッセージ
pub const START_FAILED_MESSAGE: &str = "Failed to start a new adventure. Check your API key and try again.";
/// ターンに失敗したときの表示メッセージ
pub const TURN_FAILED_MESSAGE: &str = "The story took an unexpected turn, and the connection was lost. Try another action.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    AwaitingTurn,
    Error(String),
}

/// 表示中のゲーム状態とターンの進行状況
#[derive(Debug)]
pub struct TurnController {
    phase: TurnPhase,
    game: Option<GameState>,
    player: Option<PlayerState>,
    /// 楽観的追記の前の物語。応答待ちの間だけ Some
    pre_action_narrative: Option<String>,
}

impl Default for TurnController {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnController {
    pub fn new() -> Self {
        Self { phase: TurnPhase::Idle, game: None, player: None, pre_action_narrative: None }
    }

    pub fn phase(&self) -> &TurnPhase { &self.phase }
    pub fn game(&self) -> Option<&GameState> { self.game.as_ref() }
    pub fn player(&self) -> Option<&PlayerState> { self.player.as_ref() }
    pub fn is_busy(&self) -> bool { self.phase == TurnPhase::AwaitingTurn }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            TurnPhase::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// ゲームが読み込まれる前に開始が失敗した状態か
    pub fn start_failed(&self) -> bool {
        self.game.is_none() && matches!(self.phase, TurnPhase::Error(_))
    }

    /// 新しいセッションの開始。既存の状態は破棄する
    pub fn begin_session(&mut self) {
        info!(target: "controller", "begin_session");
        self.game = None;
        self.player = None;
        self.pre_action_narrative = None;
        self.phase = TurnPhase::AwaitingTurn;
    }

    /// どの状態からでも最初からやり直す
    pub fn restart(&mut self) {
        info!(target: "controller", "restart");
        self.begin_session();
    }

    /// 行動を受け付ける
    ///
    /// 受け付けた場合は送信すべき行動（trim済み）を返す。応答待ち中・空入力・
    /// ゲーム未開始のときは何もせず `None`。
    pub fn submit(&mut self, action: &str) -> Option<String> {
        let action = action.trim();
        if action.is_empty() {
            return None;
        }
        if self.is_busy() {
            warn!(target: "controller", action, "submit_rejected_in_flight");
            return None;
        }
        let game = self.game.as_mut()?;

        self.pre_action_narrative = Some(game.narrative.clone());
        game.narrative = format!("{}\n\n> {}", game.narrative, action);
        self.phase = TurnPhase::AwaitingTurn;
        info!(target: "controller", action, "submit_accepted");
        Some(action.to_string())
    }

    /// ターンの結果を反映する
    ///
    /// 応答待ちでなければ古い応答とみなして無視し、`false` を返す。
    pub fn complete(&mut self, outcome: Result<Turn, GameError>) -> bool {
        if !self.is_busy() {
            warn!(target: "controller", "stale_completion_ignored");
            return false;
        }
        match outcome {
            Ok(Turn { game, player }) => {
                self.game = Some(game);
                self.player = Some(player);
                self.pre_action_narrative = None;
                self.phase = TurnPhase::Idle;
                info!(target: "controller", "turn_applied");
            }
            Err(e) => {
                warn!(target: "controller", error = %e, recoverable = e.is_recoverable(), "turn_failed");
                let restored = self.pre_action_narrative.take();
                let message = match (self.game.as_mut(), restored) {
                    (Some(game), Some(narrative)) => {
                        game.narrative = narrative;
                        TURN_FAILED_MESSAGE
                    }
                    (Some(_), None) => TURN_FAILED_MESSAGE,
                    (None, _) => START_FAILED_MESSAGE,
                };
                self.phase = TurnPhase::Error(message.to_string());
            }
        }
        true
    }
}
