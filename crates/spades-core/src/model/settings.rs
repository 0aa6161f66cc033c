use serde::{Deserialize, Serialize};

/// Game options owned by the lobby. The core assumes validated values, so
/// construction clamps everything into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSettings {
    pub win_target: i32,
    pub book_threshold: i32,
    pub blind_nil: bool,
    pub moonshot: bool,
    pub ten_bid_bonus: bool,
    pub game_mode: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            win_target: 500,
            book_threshold: 10,
            blind_nil: true,
            moonshot: true,
            ten_bid_bonus: true,
            game_mode: 4,
        }
    }
}

impl GameSettings {
    pub fn sanitized(self) -> Self {
        Self {
            win_target: self.win_target.clamp(100, 1000),
            book_threshold: self.book_threshold.clamp(5, 15),
            game_mode: self.game_mode.clamp(3, 8),
            ..self
        }
    }
}
