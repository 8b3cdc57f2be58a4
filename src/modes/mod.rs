//! モードシステム: 冒険画面と起動エラー画面を管理

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;

/// 各モードが実装すべきトレイト
pub trait Mode {
    /// フレーム毎の非ブロッキング更新処理（ターン結果のチェックなど）
    fn update(&mut self);

    /// 画面描画
    fn render(&self, f: &mut Frame);

    /// キーイベント処理
    /// 戻り値: Some(次のモード) でモード遷移、None で同じモード継続
    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<AppMode>>;
}

/// アプリケーションが取り得るモードの列挙型
pub enum AppMode {
    Adventure(AdventureMode),
    StartupError(StartupErrorMode),
    Exit,
}

impl AppMode {
    /// 設定を読み込み、成功なら冒険画面、失敗なら起動エラー画面を返す
    pub fn launch() -> AppMode {
        match crate::config::Config::from_env().and_then(AdventureMode::new) {
            Ok(mode) => AppMode::Adventure(mode),
            Err(e) => {
                tracing::error!(target: "app", "startup_failed: {e}");
                AppMode::StartupError(StartupErrorMode::new(e.to_string()))
            }
        }
    }

    /// 現在のモードで update() を呼び出す
    pub fn update(&mut self) {
        match self {
            AppMode::Adventure(m) => m.update(),
            AppMode::StartupError(m) => m.update(),
            AppMode::Exit => {}
        }
    }

    /// 現在のモードで render() を呼び出す
    pub fn render(&self, f: &mut Frame) {
        match self {
            AppMode::Adventure(m) => m.render(f),
            AppMode::StartupError(m) => m.render(f),
            AppMode::Exit => {}
        }
    }

    /// 現在のモードで handle_key() を呼び出す
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Option<AppMode>> {
        match self {
            AppMode::Adventure(m) => m.handle_key(key),
            AppMode::StartupError(m) => m.handle_key(key),
            AppMode::Exit => Ok(None),
        }
    }

    /// イベントポーリング間隔（ミリ秒）
    pub fn poll_interval_ms(&self) -> u64 {
        match self {
            AppMode::Adventure(m) => m.poll_interval_ms(),
            _ => crate::config::Config::default().poll_interval_ms,
        }
    }
}

pub mod adventure;
pub mod startup_error;

pub use adventure::AdventureMode;
pub use startup_error::StartupErrorMode;
