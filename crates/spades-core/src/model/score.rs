use crate::model::settings::GameSettings;
use std::collections::BTreeMap;

pub const NIL_BONUS: i32 = 100;
pub const BLIND_NIL_BONUS: i32 = 200;
pub const BOOK_PENALTY: i32 = 100;
pub const TEN_TRICK_BONUS: i32 = 100;

/// One player's bid and result for a completed round.
#[derive(Debug, Clone, Copy)]
pub struct PlayerRound {
    pub bid: u8,
    pub tricks: u8,
    pub blind_nil: bool,
}

#[derive(Debug, Clone)]
pub struct TeamRoundInput {
    pub players: Vec<PlayerRound>,
    pub spoiler: bool,
    pub books_carried: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamRoundOutcome {
    pub delta: i32,
    pub books_after: i32,
    pub books_gained: i32,
    pub penalties_applied: i32,
    pub made_bid: bool,
}

/// Scores one team's round.
///
/// Nil bidders score independently; tricks won by a failed nil bidder still
/// count toward the team's effective total. A spoiler doubles made-bid,
/// successful-nil and ten-trick points, but book points and the book penalty
/// are never doubled, and a spoiler's failed nil carries no penalty (there
/// is no partner to protect).
pub fn score_team_round(input: &TeamRoundInput, settings: &GameSettings) -> TeamRoundOutcome {
    let mut delta = 0i32;
    let mut effective_tricks = 0i32;
    let mut total_tricks = 0i32;
    let mut combined_bid = 0i32;

    for player in &input.players {
        total_tricks += player.tricks as i32;
        if player.bid == 0 {
            let magnitude = if player.blind_nil {
                BLIND_NIL_BONUS
            } else {
                NIL_BONUS
            };
            if player.tricks == 0 {
                delta += if input.spoiler { magnitude * 2 } else { magnitude };
            } else {
                if !input.spoiler {
                    delta -= magnitude;
                }
                effective_tricks += player.tricks as i32;
            }
        } else {
            combined_bid += player.bid as i32;
            effective_tricks += player.tricks as i32;
        }
    }

    let mut made_bid = false;
    if combined_bid > 0 {
        let bid_points = combined_bid * 10 * if input.spoiler { 2 } else { 1 };
        if effective_tricks >= combined_bid {
            made_bid = true;
            delta += bid_points;
        } else {
            delta -= bid_points;
        }
    }

    // Surplus over the combined bid is books even when the whole team bid
    // nil and a failed nil leaked the tricks.
    let books_gained = (effective_tricks - combined_bid).max(0);
    delta += books_gained;

    if settings.ten_bid_bonus && combined_bid > 0 && made_bid && total_tricks >= 10 {
        delta += TEN_TRICK_BONUS * if input.spoiler { 2 } else { 1 };
    }

    let mut books = input.books_carried + books_gained;
    let threshold = settings.book_threshold.max(1);
    let penalties_applied = books / threshold;
    if penalties_applied > 0 {
        delta -= penalties_applied * BOOK_PENALTY;
        books %= threshold;
    }

    TeamRoundOutcome {
        delta,
        books_after: books,
        books_gained,
        penalties_applied,
        made_bid,
    }
}

/// A team wins by reaching the target with the strictly highest score. An
/// exact tie among leaders at/above the target means play continues.
pub fn check_winner(scores: &BTreeMap<String, i32>, win_target: i32) -> Option<String> {
    let best = scores.values().copied().max()?;
    if best < win_target {
        return None;
    }
    let mut leaders = scores.iter().filter(|&(_, &score)| score == best);
    let (key, _) = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some(key.clone())
}
