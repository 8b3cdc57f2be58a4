//! OpenAI チャットAPIを使ったセッションハンドル

use super::ChatSession;
use super::history::ConversationHistory;
use super::prompt::SYSTEM_PROMPT;
use crate::config::Config;
use crate::error::GameError;
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::CreateChatCompletionRequestArgs;
use tracing::{debug, error, info, instrument};

/// 会話履歴を唯一保持するセッション
///
/// 失った場合は最初からやり直すしかない。
pub struct OpenAiSession {
    client: Client<OpenAIConfig>,
    model: String,
    max_completion_tokens: u32,
    history: ConversationHistory,
}

impl OpenAiSession {
    /// システムプロンプトを設定した新しいセッションを作成
    pub fn new(config: &Config) -> Result<Self, GameError> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| GameError::StartupConfig("API key missing".into()))?;
        let mut client_config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = &config.api_base {
            client_config = client_config.with_api_base(base);
        }
        Ok(Self {
            client: Client::with_config(client_config),
            model: config.model.clone(),
            max_completion_tokens: config.max_completion_tokens,
            history: ConversationHistory::with_system(SYSTEM_PROMPT)?,
        })
    }

    /// これまでに成立したやり取りの数
    pub fn exchanges(&self) -> usize {
        self.history.exchanges()
    }
}

impl ChatSession for OpenAiSession {
    #[instrument(name = "openai_send", skip_all, fields(message_len = message.len()))]
    async fn send(&mut self, message: &str) -> Result<String, GameError> {
        let req = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(self.history.with_pending_user(message)?)
            .max_completion_tokens(self.max_completion_tokens)
            .build()?;

        let resp = self.client.chat().create(req).await.map_err(|e| {
            error!(target: "session", "chat_completion_error: {e}");
            GameError::from(e)
        })?;
        debug!(target: "session", "response_choices: {}", resp.choices.len());

        let text = resp
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or(GameError::EmptyResponse)?;

        // 応答が取れたときだけ履歴を進める
        self.history.push_exchange(message, &text)?;
        info!(target: "session", reply_len = text.len(), "exchange_recorded");
        Ok(text)
    }
}
