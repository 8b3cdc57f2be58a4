//! リモートのチャットセッションとのやり取り
//!
//! セッションは `ChatSession` として注入される。本番は `OpenAiSession`、
//! テストでは台本どおりに返す偽物を使う。

pub mod history;
pub mod openai;
pub mod prompt;

pub use history::ConversationHistory;
pub use openai::OpenAiSession;
pub use prompt::{OPENING_PROMPT, SYSTEM_PROMPT};

use crate::error::GameError;
use crate::models::{GameState, PlayerState, Turn};
use crate::normalize::normalize;
use tracing::{info, warn};

/// 会話文脈を保持するリモートセッション
///
/// `send` を呼ぶたびにリモート側の会話履歴が進む。
#[allow(async_fn_in_trait)]
pub trait ChatSession {
    async fn send(&mut self, message: &str) -> Result<String, GameError>;
}

fn require_text(text: String) -> Result<String, GameError> {
    if text.trim().is_empty() {
        warn!(target: "session", "empty_response");
        return Err(GameError::EmptyResponse);
    }
    Ok(text)
}

/// 最初のターンを送り、初期状態と一緒にセッションを返す
pub async fn start_session<S: ChatSession>(mut session: S) -> Result<(S, GameState, PlayerState), GameError> {
    info!(target: "session", "start_session");
    let raw = require_text(session.send(OPENING_PROMPT).await?)?;
    let Turn { game, player } = normalize(&raw)?;
    Ok((session, game, player))
}

/// プレイヤーの行動を送り、生の応答テキストを返す
pub async fn send_action<S: ChatSession>(session: &mut S, action: &str) -> Result<String, GameError> {
    let action = action.trim();
    if action.is_empty() {
        return Err(GameError::EmptyAction);
    }
    info!(target: "session", action, "send_action");
    require_text(session.send(action).await?)
}

/// 行動を送り、応答を正規化して1ターン分の状態を返す
pub async fn play_turn<S: ChatSession>(session: &mut S, action: &str) -> Result<Turn, GameError> {
    let raw = send_action(session, action).await?;
    Ok(normalize(&raw)?)
}
