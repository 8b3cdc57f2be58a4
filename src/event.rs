//! イベント処理モジュール
//!
//! キー入力を冒険画面の操作に変換する。描画や通信から切り離して純粋関数にしている。

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 冒険画面での操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdventureInput {
    /// アプリ終了
    Quit,
    /// 新しいゲーム
    Restart,
    /// 入力欄の内容を送信
    SubmitTyped,
    /// 行動候補を選ぶ（0始まり）
    PickChoice(usize),
    PushChar(char),
    PopChar,
    ScrollUp,
    ScrollDown,
}

/// キーイベントを操作に変換
///
/// 入力欄が空のときだけ `1`〜`4` を行動候補の選択として扱う。
pub fn interpret_key(key: KeyEvent, input_is_empty: bool, choice_count: usize) -> Option<AdventureInput> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => Some(AdventureInput::Quit),
        KeyCode::Char('c') if ctrl => Some(AdventureInput::Quit),
        KeyCode::Char('n') if ctrl => Some(AdventureInput::Restart),
        KeyCode::Enter => Some(AdventureInput::SubmitTyped),
        KeyCode::Backspace => Some(AdventureInput::PopChar),
        KeyCode::PageUp | KeyCode::Up => Some(AdventureInput::ScrollUp),
        KeyCode::PageDown | KeyCode::Down => Some(AdventureInput::ScrollDown),
        KeyCode::Char(ch) if input_is_empty && !ctrl => match ch.to_digit(10) {
            Some(d @ 1..=4) if (d as usize) <= choice_count => Some(AdventureInput::PickChoice(d as usize - 1)),
            _ => Some(AdventureInput::PushChar(ch)),
        },
        KeyCode::Char(ch) if !ctrl => Some(AdventureInput::PushChar(ch)),
        _ => None,
    }
}
