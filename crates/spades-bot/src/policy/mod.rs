mod heuristic;

pub use heuristic::HeuristicPolicy;

use crate::bot::BotView;
use spades_core::model::card::Card;

/// Context provided to policies for decision-making
pub struct PolicyContext<'a> {
    pub view: BotView<'a>,
}

/// A bid, plus whether it was placed blind before looking at the hand.
/// `blind_nil` implies `bid == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidDecision {
    pub bid: u8,
    pub blind_nil: bool,
}

/// Unified interface for AI decision-making (heuristic and future policies)
pub trait Policy: Send {
    /// Choose a bid (called during Bidding phase)
    fn choose_bid(&mut self, ctx: &PolicyContext) -> BidDecision;

    /// Choose 1 card to play (called during Playing phase)
    fn choose_play(&mut self, ctx: &PolicyContext) -> Card;
}
