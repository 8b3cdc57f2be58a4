//! アプリケーション設定と定数

use crate::error::GameError;
use tracing::info;

/// APIキーを読み取る環境変数
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// モデル名を上書きする環境変数（任意）
pub const MODEL_VAR: &str = "OPENAI_MODEL";
/// APIベースURLを上書きする環境変数（任意）
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
/// イベントポーリング間隔を上書きする環境変数（任意）
pub const POLL_MS_VAR: &str = "PIXEL_PIONEERS_POLL_MS";

/// アプリケーション設定
#[derive(Clone)]
pub struct Config {
    /// OpenAI APIキー（起動時に必須）
    pub api_key: Option<String>,
    /// OpenAI APIモデル名
    pub model: String,
    /// 1ターンあたりの最大出力トークン数
    pub max_completion_tokens: u32,
    /// イベントポーリング間隔（ミリ秒）
    pub poll_interval_ms: u64,
    /// APIベースURL（Noneならクライアント既定値）
    pub api_base: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            max_completion_tokens: 2000,
            poll_interval_ms: 100,
            api_base: None,
        }
    }
}

// APIキーをログや Debug 出力に出さない
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_completion_tokens", &self.max_completion_tokens)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Config {
    /// 新しい設定インスタンスを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// `.env`（任意）とプロセス環境から設定を読み込む
    ///
    /// APIキーが無い場合は `GameError::StartupConfig` を返す。
    pub fn from_env() -> Result<Self, GameError> {
        // .env が無くてもエラーにしない
        let _ = dotenvy::dotenv();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// 任意の変数ルックアップから設定を組み立てる
    pub fn from_vars<F>(lookup: F) -> Result<Self, GameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = non_blank(API_KEY_VAR)
            .ok_or_else(|| GameError::StartupConfig(format!("{API_KEY_VAR} environment variable is not set")))?;

        let mut config = Self { api_key: Some(api_key), ..Self::default() };
        if let Some(model) = non_blank(MODEL_VAR) {
            config.model = model;
        }
        config.api_base = non_blank(BASE_URL_VAR);
        if let Some(raw) = non_blank(POLL_MS_VAR) {
            config.poll_interval_ms = raw
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| GameError::StartupConfig(format!("{POLL_MS_VAR} must be a positive integer, got {raw:?}")))?;
        }

        info!(target: "app", model = %config.model, poll_ms = config.poll_interval_ms, "config_loaded");
        Ok(config)
    }
}
