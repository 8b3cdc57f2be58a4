//! エラー型の定義
//!
//! ゲームの1ターンで起こり得る失敗を `GameError` にまとめる。
//! `main` やモード処理などアプリ全体の配線は `color_eyre::Result` を使う。

/// 応答テキストを `Turn` に変換できなかったときのエラー
///
/// 診断用に受信した生テキストをそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason} (raw len={len})", len = .raw.len())]
pub struct ParseError {
    pub raw: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self { raw: raw.into(), reason: reason.into() }
    }
}

/// ゲーム進行中のエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// 認証情報の欠落など、起動時に回復できない設定エラー
    #[error("startup configuration error: {0}")]
    StartupConfig(String),

    /// ネットワーク/認証/APIの失敗
    #[error("session error: {0}")]
    Session(String),

    /// リモートがテキストを返さなかった
    #[error("the model returned no text")]
    EmptyResponse,

    /// 応答の形式が不正
    #[error("malformed turn payload: {0}")]
    Parse(#[from] ParseError),

    /// 空の行動は送信しない
    #[error("action is empty")]
    EmptyAction,

    /// ワーカースレッドやランタイムが利用できない
    #[error("turn worker unavailable: {0}")]
    Worker(String),
}

impl GameError {
    /// プレイヤーの再入力で回復できるか
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::StartupConfig(_) | GameError::Worker(_))
    }
}

impl From<async_openai::error::OpenAIError> for GameError {
    fn from(e: async_openai::error::OpenAIError) -> Self {
        GameError::Session(e.to_string())
    }
}
