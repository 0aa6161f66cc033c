use super::{BidDecision, Policy, PolicyContext};
use crate::bot::{BidPlanner, BotContext, BotParams, BotView, PlayPlanner};
use rand::SeedableRng;
use rand::rngs::StdRng;
use spades_core::model::card::Card;
use spades_core::model::trick::validate_play;
use tracing::{Level, event};

/// Adapter that wraps BidPlanner/PlayPlanner to implement the Policy trait
pub struct HeuristicPolicy {
    rng: StdRng,
    params: BotParams,
}

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self::with_seed(rand::random::<u64>())
    }

    /// Seeded variant for reproducible games and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            params: BotParams::default(),
        }
    }
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for HeuristicPolicy {
    fn choose_bid(&mut self, ctx: &PolicyContext) -> BidDecision {
        // The blind nil question comes first: it has to be answered without
        // reading the hand.
        if BidPlanner::blind_nil_worthwhile(&ctx.view, &mut self.rng) {
            let decision = BidDecision {
                bid: 0,
                blind_nil: true,
            };
            log_bid_decision(&ctx.view, decision, "blind_nil_gamble");
            return decision;
        }

        let bot_ctx = BotContext::new(ctx.view, &self.params);
        let decision = BidDecision {
            bid: BidPlanner::choose(&bot_ctx, &mut self.rng),
            blind_nil: false,
        };
        log_bid_decision(&ctx.view, decision, "heuristic_bid");
        decision
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Card {
        let bot_ctx = BotContext::new(ctx.view, &self.params);
        let legal_moves = compute_legal_moves(&ctx.view);
        if legal_moves.is_empty() {
            // Hand exhausted out of phase: nothing sane to return.
            if let Some(card) = ctx.view.hand.iter().copied().next() {
                log_play_decision(&ctx.view, &[], card, "fallback_empty_legal");
                return card;
            }
            panic!("heuristic policy expected at least one legal card");
        }

        let chosen = PlayPlanner::choose(&legal_moves, &bot_ctx)
            .or_else(|| legal_moves.first().copied())
            .unwrap_or(legal_moves[0]);
        log_play_decision(&ctx.view, &legal_moves, chosen, "heuristic_play");
        chosen
    }
}

/// Every card the rules allow right now: follow suit when possible, no
/// leading spades before they are broken.
fn compute_legal_moves(view: &BotView<'_>) -> Vec<Card> {
    view.hand
        .iter()
        .copied()
        .filter(|&card| {
            validate_play(card, view.hand, view.current_trick, view.spades_broken).is_ok()
        })
        .collect()
}

fn log_bid_decision(view: &BotView<'_>, decision: BidDecision, reason: &str) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    if !detail_logging_enabled() {
        return;
    }

    event!(
        target: "spades_bot::bid",
        Level::INFO,
        seat = view.seat,
        round = view.round_number,
        bid = decision.bid,
        blind_nil = decision.blind_nil,
        hand_size = view.hand.len(),
        reason,
    );
}

fn detail_logging_enabled() -> bool {
    std::env::var("SPADES_BOT_DETAILS")
        .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
        .unwrap_or(false)
}

fn log_play_decision(view: &BotView<'_>, legal_moves: &[Card], chosen: Card, reason: &str) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let legal_preview = if legal_moves.len() <= 6 {
        legal_moves
            .iter()
            .map(|card| card.to_string())
            .collect::<Vec<_>>()
            .join(",")
    } else {
        format!("{} moves", legal_moves.len())
    };

    event!(
        target: "spades_bot::play",
        Level::INFO,
        seat = view.seat,
        round = view.round_number,
        legal_count = legal_moves.len(),
        legal_moves = %legal_preview,
        chosen = %chosen,
        spades_broken = view.spades_broken,
        trick_cards = view.current_trick.plays().len(),
        reason,
    );
}
