use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A playing card. Mega cards are duplicates added in 5-8 player modes and
/// rank a half step above their regular counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    #[serde(default)]
    pub mega: bool,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            mega: false,
        }
    }

    pub const fn mega(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            mega: true,
        }
    }

    pub const fn is_spade(self) -> bool {
        self.suit.is_spade()
    }

    /// Comparison value on a doubled scale: a mega card sits between its own
    /// rank and the next one up, so mega 7 beats regular 7 and loses to 8.
    pub const fn strength(self) -> u8 {
        self.rank.value() * 2 + self.mega as u8
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)?;
        if self.mega {
            f.write_str("*")?;
        }
        Ok(())
    }
}
