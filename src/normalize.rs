//! モデル応答テキストの正規化
//!
//! モデルには決まったJSONだけを返すよう指示しているが、実際には
//! コードフェンスで囲まれたり、任意の配列が省略されたりする。
//! 配列の欠落には寛容に、ゲーム進行に使うスカラー値
//! (`narrative` / `location` / `player.health`) には厳格に扱う。

use crate::error::ParseError;
use crate::models::{GameState, MAX_HEALTH, PlayerState, Turn};
use serde::Deserialize;
use tracing::{debug, error};

#[derive(Debug, Deserialize)]
struct RawTurn {
    narrative: String,
    location: String,
    player: RawPlayer,
    #[serde(default)]
    choices: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    health: f64,
    #[serde(default)]
    inventory: Option<Vec<String>>,
}

/// 先頭と末尾のコードフェンス（```json など言語タグ付きも含む）と空白を取り除く
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // 言語タグ（例: json）を読み飛ばす
        let tag_len = rest.find(|c: char| !c.is_ascii_alphanumeric()).unwrap_or(rest.len());
        text = rest[tag_len..].trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}

/// 生の応答テキストを `Turn` に変換する
///
/// 失敗時は生テキストを保持した `ParseError` を返し、状態には一切触れない。
pub fn normalize(raw: &str) -> Result<Turn, ParseError> {
    let clean = strip_code_fence(raw);
    let parsed: RawTurn = serde_json::from_str(clean).map_err(|e| {
        error!(target: "normalize", error = %e, raw = %raw, "turn_parse_failed");
        ParseError::new(raw, e.to_string())
    })?;

    let raw_health = parsed.player.health;
    if raw_health.fract() != 0.0 {
        error!(target: "normalize", health = raw_health, "fractional_health_rejected");
        return Err(ParseError::new(raw, format!("player.health must be a whole number, got {raw_health}")));
    }
    let health = (raw_health as i64).clamp(0, MAX_HEALTH);
    let game = GameState {
        narrative: parsed.narrative,
        location: parsed.location,
        choices: parsed.choices.unwrap_or_default(),
    };
    let player = PlayerState {
        health,
        max_health: MAX_HEALTH,
        inventory: parsed.player.inventory.unwrap_or_default(),
    };
    debug!(target: "normalize", location = %game.location, health, choices = game.choices.len(), "turn_normalized");
    Ok(Turn { game, player })
}
