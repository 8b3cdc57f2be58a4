//! 画面に表示するゲーム状態の型

use serde::{Deserialize, Serialize};

/// プレイヤーの最大HP（常に固定）
pub const MAX_HEALTH: i64 = 100;

/// 物語・現在地・行動候補
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub narrative: String,
    pub location: String,
    pub choices: Vec<String>,
}

/// プレイヤーのHPと所持品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub health: i64,
    pub max_health: i64,
    /// 入手順。重複あり
    pub inventory: Vec<String>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self { health: MAX_HEALTH, max_health: MAX_HEALTH, inventory: Vec::new() }
    }
}

/// HPゲージの色分け
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Healthy,
    Wounded,
    Critical,
}

impl PlayerState {
    /// 0.0..=1.0 のHP割合
    pub fn health_ratio(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health as f64 / self.max_health as f64).clamp(0.0, 1.0)
    }

    pub fn health_band(&self) -> HealthBand {
        let pct = self.health_ratio() * 100.0;
        if pct > 60.0 {
            HealthBand::Healthy
        } else if pct > 30.0 {
            HealthBand::Wounded
        } else {
            HealthBand::Critical
        }
    }
}

/// 1回の応答から得た状態の組
///
/// `game` と `player` は必ず同じ応答から作られ、一緒に差し替えられる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub game: GameState,
    pub player: PlayerState,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(health: i64) -> PlayerState {
        PlayerState { health, ..PlayerState::default() }
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(player(100).health_band(), HealthBand::Healthy);
        assert_eq!(player(61).health_band(), HealthBand::Healthy);
        assert_eq!(player(60).health_band(), HealthBand::Wounded);
        assert_eq!(player(31).health_band(), HealthBand::Wounded);
        assert_eq!(player(30).health_band(), HealthBand::Critical);
        assert_eq!(player(0).health_band(), HealthBand::Critical);
    }

    #[test]
    fn ratio_is_clamped() {
        assert_eq!(player(50).health_ratio(), 0.5);
        assert_eq!(player(-5).health_ratio(), 0.0);
        assert_eq!(player(150).health_ratio(), 1.0);
    }
}
