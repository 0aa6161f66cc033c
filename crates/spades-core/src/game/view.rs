use crate::model::card::Card;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Public information about one seated player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicPlayer {
    pub id: String,
    pub name: String,
    pub team_key: String,
    pub seat_index: usize,
    pub is_bot: bool,
    pub hand_count: usize,
    pub bid: Option<u8>,
    pub bid_is_blind: bool,
    pub tricks_taken: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrickCardView {
    pub player_id: String,
    pub card: Card,
}

/// Sanitized projection of the game for one client: the recipient's own
/// hand plus public state, never another player's cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub phase: String,
    pub round_number: u32,
    pub your_hand: Vec<Card>,
    pub players: Vec<PublicPlayer>,
    pub current_trick: Vec<TrickCardView>,
    pub current_turn: String,
    pub dealer: String,
    pub spades_broken: bool,
    pub scores: BTreeMap<String, i32>,
    pub books: BTreeMap<String, i32>,
    pub round_history: Vec<RoundSummary>,
    pub winner: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRoundLine {
    pub round_score: i32,
    pub total: i32,
    pub books: i32,
}

/// Immutable snapshot appended to the round history at round end. Shape is
/// stable for offline stats aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_number: u32,
    pub bids: BTreeMap<String, u8>,
    pub tricks_taken: BTreeMap<String, u8>,
    pub teams: BTreeMap<String, TeamRoundLine>,
    pub blind_nil_players: Vec<String>,
    pub moonshot: Option<String>,
}
