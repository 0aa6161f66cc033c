use super::{BotContext, BotParams, BotView};
use rand::Rng;
use spades_core::model::hand::Hand;
use spades_core::model::mode::ModeConfig;
use spades_core::model::rank::Rank;
use spades_core::model::suit::Suit;

/// A threatening opposing team: one whose already-placed bids could take it
/// to the win target this round.
#[derive(Debug, Clone, Copy)]
struct Threat {
    required_tricks: i32,
    books: i32,
}

pub struct BidPlanner;

impl BidPlanner {
    /// Chooses a bid in `[0, cards_per_player]`; 0 means nil.
    pub fn choose<R: Rng + ?Sized>(ctx: &BotContext<'_>, rng: &mut R) -> u8 {
        let view = &ctx.view;
        let params = ctx.params;
        let cards = view.mode.cards_per_player as i32;

        let strength = estimate_tricks(view.hand, view.mode, params);
        let threat = assess_threat(view);
        let partner_bid = view.partner_bid();

        // Nil first. Never under a partner nil: someone has to take tricks.
        if partner_bid != Some(0)
            && nil_viable(view.hand, params, threat.is_some())
            && strength < 3.0
        {
            return 0;
        }

        let base = (strength.round() as i32).clamp(1, cards);

        if partner_bid == Some(0) {
            // Cover the nil: bid to carry the whole team.
            return ((base.max(3)) + 1).min(cards) as u8;
        }

        if let Some(threat) = threat {
            return desperate_bid(view, base, strength, threat).clamp(1, cards) as u8;
        }

        let mut bid = base;
        if let Some(partner) = partner_bid {
            if bid + partner as i32 > 10 {
                bid = (bid - 1).max(1);
            }
        }
        bid = go_for_it(view, params, bid, strength, rng);
        bid.clamp(0, cards) as u8
    }

    /// Blind nil is only for the second bidder on a pair whose partner has
    /// committed to carrying the round, and only when losing badly enough
    /// that a coin flip is worth it. Decided before looking at the hand.
    pub fn blind_nil_worthwhile<R: Rng + ?Sized>(view: &BotView<'_>, rng: &mut R) -> bool {
        if !view.settings.blind_nil || view.round_number <= 1 {
            return false;
        }
        let Some(partner_bid) = view.partner_bid() else {
            return false;
        };
        if partner_bid < 4 {
            return false;
        }

        let deficit = best_other_score(view) - view.team_score(view.my_team());
        let mut probability = match deficit {
            d if d >= 400 => 0.35f32,
            d if d >= 300 => 0.25,
            d if d >= 200 => 0.15,
            d if d >= 100 => 0.05,
            _ => return false,
        };
        if partner_bid >= 6 {
            probability *= 1.3;
        }
        rng.r#gen::<f32>() < probability
    }
}

/// Weighted hand-strength estimate in expected tricks.
fn estimate_tricks(hand: &Hand, mode: &ModeConfig, params: &BotParams) -> f32 {
    let mut estimate = 0.0f32;
    let spade_len = hand.count_suit(Suit::Spades);

    for card in hand.iter().filter(|card| card.is_spade()) {
        estimate += match card.rank {
            Rank::Ace => params.spade_ace,
            Rank::King => params.spade_king,
            Rank::Queen => {
                if spade_len >= 3 {
                    params.spade_queen_deep
                } else {
                    params.spade_queen_shallow
                }
            }
            Rank::Jack => {
                if spade_len >= 4 {
                    params.spade_jack_long
                } else {
                    params.spade_jack_short
                }
            }
            _ => 0.0,
        };
    }
    if spade_len > 4 {
        estimate += (spade_len - 4) as f32 * params.spade_length_bonus;
    }

    for suit in [Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
        let len = hand.count_suit(suit);
        let has = |rank: Rank| hand.iter().any(|card| card.suit == suit && card.rank == rank);

        if has(Rank::Ace) {
            estimate += params.offsuit_ace;
            if has(Rank::King) {
                estimate += params.chain_king;
                if has(Rank::Queen) {
                    estimate += params.chain_queen;
                }
            }
        } else if has(Rank::King) {
            estimate += if len >= 2 {
                params.lone_king
            } else {
                params.lone_king_bare
            };
        } else if has(Rank::Queen) && len >= 3 {
            estimate += params.lone_queen;
        }

        // Ruffing potential from shortness, worth nothing without trumps
        // and more with every spare trump.
        if spade_len >= 2 {
            let trump_weight = spade_len.min(3) as f32;
            estimate += match len {
                0 => trump_weight * params.void_ruff,
                1 => params.singleton_ruff * trump_weight / 2.0,
                2 => params.doubleton_ruff * trump_weight / 2.0,
                _ => 0.0,
            };
        }
    }

    // Crowded modes dilute every honor: more cards fall on each trick, mega
    // twins shadow the regular honors, and a seat's fair share of the round
    // shrinks. Scale against the 4-player baseline so the table's total
    // demand stays near the trick supply.
    let share = mode.tricks_per_round as f32 / mode.player_count as f32;
    let baseline = 13.0 / 4.0;
    estimate * (share / baseline).min(1.0)
}

/// Whether the hand can plausibly duck every trick. Thresholds relax when
/// desperate.
fn nil_viable(hand: &Hand, params: &BotParams, desperate: bool) -> bool {
    if hand
        .iter()
        .any(|card| card.is_spade() && card.rank >= Rank::Queen)
    {
        return false;
    }

    let honor_limit = if desperate {
        params.nil_max_honors_desperate
    } else {
        params.nil_max_honors
    };
    let honors = hand.iter().filter(|card| card.rank >= Rank::Jack).count();
    if honors > honor_limit as usize {
        return false;
    }

    let low_needed = if desperate {
        params.nil_min_low_cards_desperate
    } else {
        params.nil_min_low_cards
    };
    let low = hand
        .iter()
        .filter(|card| card.rank <= Rank::Seven)
        .count();
    if low < low_needed as usize {
        return false;
    }

    // An ace in a short suit will win a trick before it can be ducked away.
    for suit in Suit::ALL {
        let len = hand.count_suit(suit);
        if len > 0
            && len < 3
            && hand
                .iter()
                .any(|card| card.suit == suit && card.rank == Rank::Ace)
        {
            return false;
        }
    }
    true
}

fn assess_threat(view: &BotView<'_>) -> Option<Threat> {
    for team in 0..view.teams.team_count() {
        if team == view.my_team() {
            continue;
        }
        let bid = view.combined_bid(team);
        if bid == 0 {
            continue;
        }
        let multiplier = if view.teams.is_spoiler_team(team) { 2 } else { 1 };
        let nil_upside: i32 = view
            .teams
            .seats_of_team(team)
            .into_iter()
            .filter(|&seat| view.bids[seat] == Some(0))
            .map(|seat| {
                if view.blind_nil_seats.contains(&seat) {
                    200
                } else {
                    100
                }
            })
            .sum();
        let potential = view.team_score(team) + bid * 10 * multiplier + nil_upside * multiplier;
        if potential >= view.settings.win_target {
            return Some(Threat {
                required_tricks: bid,
                books: view.team_books(team),
            });
        }
    }
    None
}

/// When an opposing team can win this round, the honest bid is often the
/// wrong one. Overrides in priority order.
fn desperate_bid(view: &BotView<'_>, base: i32, strength: f32, threat: Threat) -> i32 {
    let cards = view.mode.cards_per_player as i32;
    let partner = view.partner_bid().map(i32::from);
    let partner_committed = matches!(partner, Some(p) if p > 0);
    let multiplier = if view.is_spoiler() { 2 } else { 1 };

    // Honest bid still wins the race outright.
    let my_potential =
        view.team_score(view.my_team()) + (base + partner.unwrap_or(0)) * 10 * multiplier;
    if my_potential >= view.settings.win_target {
        return base;
    }

    // Stretch to a combined 10 for the bonus when within reach.
    if let Some(p) = partner.filter(|&p| p > 0) {
        let target = 10 - p;
        if target > base && (target as f32 - strength) <= 2.0 {
            return target.min(cards);
        }
    }

    // Set bid: take enough tricks that the opponents cannot make theirs,
    // overbidding by one as a signal when the partner has committed.
    let deny = view.mode.tricks_per_round as i32 - threat.required_tricks + 1;
    let mut set_bid = deny - partner.unwrap_or(0);
    if partner_committed {
        set_bid += 1;
    }
    if set_bid >= 1 && set_bid <= base + 2 {
        return set_bid.min(cards);
    }

    // Feed them books when they are close to the penalty.
    if threat.books >= view.settings.book_threshold - 2 && base > 1 {
        return base - 1;
    }

    base
}

/// Non-desperate but behind: occasionally stretch the bid, with the odds
/// scaled by the deficit.
fn go_for_it<R: Rng + ?Sized>(
    view: &BotView<'_>,
    params: &BotParams,
    base: i32,
    strength: f32,
    rng: &mut R,
) -> i32 {
    let deficit = best_other_score(view) - view.team_score(view.my_team());
    if deficit <= 0 {
        return base;
    }
    let willingness =
        (deficit as f32 / view.settings.win_target as f32).min(1.0) * params.go_for_it_scale;
    if rng.r#gen::<f32>() >= willingness {
        return base;
    }

    // A nil on the relaxed thresholds buys the most points per trick.
    if nil_viable(view.hand, params, true) && strength < 3.0 {
        return 0;
    }

    if let Some(p) = view.partner_bid().filter(|&p| p > 0) {
        let target = 10 - p as i32;
        if target > base && (target as f32 - strength) <= 2.0 {
            return target;
        }
    }

    // Or reach for a set bid against the biggest opposing commitment.
    let biggest = (0..view.teams.team_count())
        .filter(|&team| team != view.my_team())
        .map(|team| view.combined_bid(team))
        .max()
        .unwrap_or(0);
    if biggest > 0 {
        let partner = view.partner_bid().map(i32::from).filter(|&p| p > 0);
        let deny = view.mode.tricks_per_round as i32 - biggest + 1;
        let mut set_bid = deny - partner.unwrap_or(0);
        if partner.is_some() {
            set_bid += 1;
        }
        if set_bid > base && set_bid <= base + 2 {
            return set_bid;
        }
    }

    if strength > base as f32 - 0.1 {
        base + 1
    } else {
        base
    }
}

fn best_other_score(view: &BotView<'_>) -> i32 {
    (0..view.teams.team_count())
        .filter(|&team| team != view.my_team())
        .map(|team| view.team_score(team))
        .max()
        .unwrap_or(0)
}
