use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};

/// Conversation carried by a session handle: one system message followed by
/// alternating user / assistant turns.
///
/// Invariant: the system message is always first and is set exactly once at construction.
/// The order of messages is preserved (push order == send order).
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    messages: Vec<ChatCompletionRequestMessage>,
}

impl ConversationHistory {
    /// Create history seeded with the given system instruction.
    pub fn with_system(system: &str) -> Result<Self, OpenAIError> {
        let msg = ChatCompletionRequestSystemMessageArgs::default().content(system).build()?;
        Ok(Self { messages: vec![msg.into()] })
    }

    /// Current length, system message included.
    pub fn len(&self) -> usize { self.messages.len() }
    /// Number of completed user/assistant exchanges.
    pub fn exchanges(&self) -> usize { self.messages.len().saturating_sub(1) / 2 }

    pub fn as_slice(&self) -> &[ChatCompletionRequestMessage] { &self.messages }

    /// Messages for the next request: everything so far plus the pending user turn.
    /// The history itself is left untouched until the exchange succeeds.
    pub fn with_pending_user(&self, content: &str) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
        let mut out = self.messages.clone();
        out.push(ChatCompletionRequestUserMessageArgs::default().content(content).build()?.into());
        Ok(out)
    }

    /// Record a completed exchange.
    pub fn push_exchange(&mut self, user: &str, assistant: &str) -> Result<&mut Self, OpenAIError> {
        let u = ChatCompletionRequestUserMessageArgs::default().content(user).build()?;
        let a = ChatCompletionRequestAssistantMessageArgs::default().content(assistant).build()?;
        self.messages.push(u.into());
        self.messages.push(a.into());
        Ok(self)
    }
}
