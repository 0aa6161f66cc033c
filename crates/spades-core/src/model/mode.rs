use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use once_cell::sync::Lazy;
use serde::Serialize;

pub const CARDS_PER_PLAYER: usize = 13;
pub const TRICKS_PER_ROUND: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeatingPattern {
    Classic,
    Polygon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamSpec {
    pub size: usize,
    pub spoiler: bool,
}

impl TeamSpec {
    const fn pair() -> Self {
        Self {
            size: 2,
            spoiler: false,
        }
    }

    const fn solo() -> Self {
        Self {
            size: 1,
            spoiler: false,
        }
    }

    const fn spoiler() -> Self {
        Self {
            size: 1,
            spoiler: true,
        }
    }
}

/// Static per-player-count configuration: team structure, deck composition
/// and seating layout.
#[derive(Debug, Clone)]
pub struct ModeConfig {
    pub player_count: usize,
    pub cards_per_player: usize,
    pub tricks_per_round: usize,
    pub teams: Vec<TeamSpec>,
    pub seating: SeatingPattern,
    /// Spoiler modes lay out more seats than players so partners still sit
    /// directly opposite each other; the spoiler faces an empty seat.
    pub layout_seats: Option<usize>,
    pub removed_cards: Vec<Card>,
    pub mega_cards: Vec<Card>,
}

impl ModeConfig {
    pub fn total_cards(&self) -> usize {
        self.player_count * self.cards_per_player
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn has_spoiler(&self) -> bool {
        self.teams.iter().any(|team| team.spoiler)
    }
}

static MODES: Lazy<Vec<ModeConfig>> = Lazy::new(|| (3..=8).map(build_mode).collect());

/// Looks up the mode for a player count, defaulting to the 4-player game.
pub fn mode_for(player_count: usize) -> &'static ModeConfig {
    MODES
        .iter()
        .find(|mode| mode.player_count == player_count)
        .unwrap_or(&MODES[1])
}

fn build_mode(player_count: usize) -> ModeConfig {
    let (teams, layout_seats) = match player_count {
        3 => (vec![TeamSpec::solo(); 3], None),
        4 => (vec![TeamSpec::pair(); 2], None),
        5 => (
            vec![TeamSpec::pair(), TeamSpec::pair(), TeamSpec::spoiler()],
            Some(6),
        ),
        6 => (vec![TeamSpec::pair(); 3], None),
        7 => (
            vec![
                TeamSpec::pair(),
                TeamSpec::pair(),
                TeamSpec::pair(),
                TeamSpec::spoiler(),
            ],
            Some(8),
        ),
        8 => (vec![TeamSpec::pair(); 4], None),
        other => panic!("unsupported player count {other}"),
    };

    let total = player_count * CARDS_PER_PLAYER;
    let removed_cards = if total < 52 {
        compute_removed_cards(52 - total)
    } else {
        Vec::new()
    };
    let mega_cards = if total > 52 {
        compute_mega_cards(total - 52, player_count == 8)
    } else {
        Vec::new()
    };

    ModeConfig {
        player_count,
        cards_per_player: CARDS_PER_PLAYER,
        tricks_per_round: TRICKS_PER_ROUND,
        teams,
        seating: if player_count == 4 {
            SeatingPattern::Classic
        } else {
            SeatingPattern::Polygon
        },
        layout_seats,
        removed_cards,
        mega_cards,
    }
}

/// Removes the lowest `count` cards, filling rank-ascending across the suit
/// order S,H,D,C, to shrink the deck for 3 players.
pub fn compute_removed_cards(count: usize) -> Vec<Card> {
    let mut removed = Vec::with_capacity(count);
    for rank in Rank::ORDERED.iter().copied() {
        for suit in Suit::ALL.iter().copied() {
            if removed.len() == count {
                return removed;
            }
            removed.push(Card::new(rank, suit));
        }
    }
    removed
}

/// Adds `count` duplicate mega cards, filling rank-ascending from Two. Aces
/// are excluded except in the 8-player mode, which doubles the full deck.
pub fn compute_mega_cards(count: usize, include_aces: bool) -> Vec<Card> {
    let mut extras = Vec::with_capacity(count);
    for rank in Rank::ORDERED.iter().copied() {
        if rank == Rank::Ace && !include_aces {
            continue;
        }
        for suit in Suit::ALL.iter().copied() {
            if extras.len() == count {
                return extras;
            }
            extras.push(Card::mega(rank, suit));
        }
    }
    extras
}
