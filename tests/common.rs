#![allow(dead_code)]

use once_cell::sync::Lazy;
use pixel_pioneers::{ChatSession, GameError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static START: Once = Once::new();
static _GUARD: Lazy<Mutex<Option<tracing_appender::non_blocking::WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initialize test environment: dotenv and tracing (stderr + file).
/// Idempotent: safe to call multiple times.
pub fn init() {
    START.call_once(|| {
        let _ = dotenvy::dotenv();
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .expect("env filter");

        // Daily rotating log file separate from app runtime logs
        let file_appender = rolling::daily("logs", "tests.log");
        let (file_nb, guard) = tracing_appender::non_blocking(file_appender);
        *_GUARD.lock().unwrap() = Some(guard); // retain guard for lifetime

        let stderr_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_writer(std::io::stderr);

        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_thread_names(true)
            .with_writer(file_nb);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();

        tracing::info!(target: "test_init", "Test tracing initialized (stderr + rotating file)");
    });
}

/// Builds a well-formed turn payload.
pub fn payload(narrative: &str, location: &str, health: i64, inventory: &[&str], choices: &[&str]) -> String {
    serde_json::json!({
        "narrative": narrative,
        "location": location,
        "player": { "health": health, "inventory": inventory },
        "choices": choices,
    })
    .to_string()
}

/// A chat session that replays scripted replies in order and records every message it was sent.
#[derive(Clone, Default)]
pub struct ScriptedSession {
    replies: Arc<Mutex<VecDeque<Result<String, GameError>>>>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ScriptedSession {
    pub fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<String, GameError>>,
    {
        Self { replies: Arc::new(Mutex::new(replies.into_iter().collect())), sent: Arc::default() }
    }

    /// Shared view of the messages sent so far (still valid after the session moves into a worker).
    pub fn sent_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.sent)
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl ChatSession for ScriptedSession {
    async fn send(&mut self, message: &str) -> Result<String, GameError> {
        self.sent.lock().unwrap().push(message.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GameError::Session("script exhausted".into())))
    }
}
