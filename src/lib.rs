
// 同階層のファイルをモジュールとしてインポート
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod models;
pub mod modes; // Mode system for the adventure / startup error screens
pub mod normalize;
pub mod session; // Remote chat session (injected capability)
pub mod ui;
pub mod worker;

pub use config::Config;
pub use controller::{TurnController, TurnPhase};
pub use error::{GameError, ParseError};
pub use models::{GameState, PlayerState, Turn, MAX_HEALTH};
pub use normalize::normalize;
pub use session::{ChatSession, OpenAiSession, play_turn, send_action, start_session};

use color_eyre::Result;
use crossterm::event::{self as crossterm_event, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::Duration;

// Ensure .env is loaded for tests before anything else runs in the test process.
#[cfg(test)]
#[ctor::ctor]
fn load_dotenv_for_tests() {
    let _ = dotenvy::dotenv();
}

/// アプリケーションのメインループを実行
pub fn run(mut terminal: DefaultTerminal) -> Result<()> {
    let mut current_mode = modes::AppMode::launch();

    loop {
        // 現在のモードで更新処理を実行（ターン結果の受信など）
        current_mode.update();

        // 画面を描画
        terminal.draw(|f| current_mode.render(f))?;

        // ポーリング間隔以内にイベントが来たら処理
        let poll = Duration::from_millis(current_mode.poll_interval_ms());
        if crossterm_event::poll(poll)? {
            match crossterm_event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match current_mode.handle_key(key) {
                        Ok(Some(next_mode)) => {
                            // モード遷移またはExit
                            if matches!(next_mode, modes::AppMode::Exit) {
                                break;
                            }
                            current_mode = next_mode;
                        }
                        Ok(None) => {
                            // 同じモード継続
                        }
                        Err(e) => {
                            // エラーが発生した場合は設定から読み直す
                            tracing::error!("Error in mode: {:?}", e);
                            current_mode = modes::AppMode::launch();
                        }
                    }
                }
                Event::Resize(_, _) => {
                    // 次ループで再描画されるので特別な処理なし
                }
                _ => {}
            }
        }
    }
    Ok(())
}
