use super::{
    BotContext, BotView, disposition, highest_by_strength, lowest_by_strength,
    opponent_disposition,
};
use spades_core::model::card::Card;
use spades_core::model::rank::Rank;
use spades_core::model::suit::Suit;

pub struct PlayPlanner;

impl PlayPlanner {
    /// Picks a card from the legal candidates. Returns None only for an
    /// empty candidate list.
    pub fn choose(legal: &[Card], ctx: &BotContext<'_>) -> Option<Card> {
        if legal.is_empty() {
            return None;
        }
        if legal.len() == 1 {
            return Some(legal[0]);
        }
        let view = &ctx.view;
        let leading = view.current_trick.is_empty();

        if view.is_nil_self() {
            return Some(if leading {
                nil_lead(legal, ctx)
            } else {
                nil_follow(legal, ctx)
            });
        }

        if let Some(nil_seat) = view.nil_partner_seat() {
            return Some(if leading {
                protect_nil_lead(legal, ctx, nil_seat)
            } else {
                follow(legal, ctx, Some(nil_seat))
            });
        }

        if leading {
            if view.nil_opponent_seat().is_some() {
                return Some(bait_nil_lead(legal));
            }
            return Some(lead(legal, ctx));
        }
        Some(follow(legal, ctx, None))
    }
}

/// Whether playing this card right now would take over the trick.
fn would_win(view: &BotView<'_>, card: Card) -> bool {
    match view.current_trick.winning_play() {
        None => true,
        Some(winner) => {
            if card.is_spade() {
                !winner.card.is_spade() || card.strength() > winner.card.strength()
            } else if winner.card.is_spade() {
                false
            } else if card.suit == winner.card.suit {
                card.strength() > winner.card.strength()
            } else {
                false
            }
        }
    }
}

fn nil_lead(legal: &[Card], ctx: &BotContext<'_>) -> Card {
    // Lowest card from the longest suit: maximum room to duck later.
    let mut best: Option<(usize, Card)> = None;
    for suit in Suit::ALL {
        let in_suit: Vec<Card> = legal.iter().copied().filter(|c| c.suit == suit).collect();
        let Some(low) = lowest_by_strength(&in_suit) else {
            continue;
        };
        let len = ctx.view.hand.count_suit(suit);
        if best.map(|(l, _)| len > l).unwrap_or(true) {
            best = Some((len, low));
        }
    }
    best.map(|(_, card)| card).unwrap_or(legal[0])
}

fn nil_follow(legal: &[Card], ctx: &BotContext<'_>) -> Card {
    // Shed the most dangerous card that still loses.
    let safe: Vec<Card> = legal
        .iter()
        .copied()
        .filter(|&card| !would_win(&ctx.view, card))
        .collect();
    if let Some(card) = highest_by_strength(&safe) {
        return card;
    }
    lowest_by_strength(legal).unwrap_or(legal[0])
}

fn protect_nil_lead(legal: &[Card], ctx: &BotContext<'_>, nil_seat: usize) -> Card {
    // Off-suit masters keep the lead away from the nil hand; prefer suits
    // the partner can still follow low in.
    let masters: Vec<Card> = legal
        .iter()
        .copied()
        .filter(|&card| !card.is_spade() && ctx.memory.is_master(card))
        .collect();
    if let Some(card) = masters
        .iter()
        .copied()
        .filter(|card| !ctx.memory.is_void(nil_seat, card.suit))
        .max_by_key(|card| card.strength())
        .or_else(|| highest_by_strength(&masters))
    {
        return card;
    }

    if let Some(card) = legal
        .iter()
        .copied()
        .filter(|card| !card.is_spade() && card.rank >= Rank::King)
        .max_by_key(|card| card.strength())
    {
        return card;
    }
    highest_by_strength(legal).unwrap_or(legal[0])
}

fn bait_nil_lead(legal: &[Card]) -> Card {
    // A mid card is the hardest to duck under.
    let mid = Rank::Eight.value() * 2;
    legal
        .iter()
        .copied()
        .filter(|card| !card.is_spade())
        .min_by_key(|card| (card.strength() as i32 - mid as i32).abs())
        .or_else(|| lowest_by_strength(legal))
        .unwrap_or(legal[0])
}

fn lead(legal: &[Card], ctx: &BotContext<'_>) -> Card {
    let view = &ctx.view;
    let params = ctx.params;
    let needed = view.tricks_needed();

    if needed > 0 {
        // Cash masters, shortest suit first so trumps find them last.
        if let Some(card) = legal
            .iter()
            .copied()
            .filter(|&card| ctx.memory.is_master(card))
            .min_by_key(|card| {
                (
                    view.hand.count_suit(card.suit),
                    std::cmp::Reverse(card.strength()),
                )
            })
        {
            return card;
        }
        if opponent_disposition(ctx) > params.urgent_threshold {
            if let Some(card) = legal
                .iter()
                .copied()
                .filter(|card| card.is_spade() && card.rank >= Rank::King)
                .max_by_key(|card| card.strength())
            {
                return card;
            }
        }
        return long_suit_low(legal, view);
    }

    let lean = disposition(ctx);
    if lean > params.set_threshold {
        // Pull trump, or force it out of suits the opponents are void in.
        if let Some(card) = legal
            .iter()
            .copied()
            .filter(|&card| card.is_spade() && ctx.memory.is_master(card))
            .max_by_key(|card| card.strength())
        {
            return card;
        }
        let opponents = view.teams.opponent_seats(view.seat);
        if let Some(card) = legal
            .iter()
            .copied()
            .filter(|&card| {
                !card.is_spade()
                    && opponents
                        .iter()
                        .any(|&seat| ctx.memory.is_void(seat, card.suit))
            })
            .min_by_key(|card| card.strength())
        {
            return card;
        }
        if let Some(card) = legal
            .iter()
            .copied()
            .filter(|&card| ctx.memory.is_master(card))
            .max_by_key(|card| card.strength())
        {
            return card;
        }
        return long_suit_low(legal, view);
    }

    if lean < params.duck_threshold {
        let non_masters: Vec<Card> = legal
            .iter()
            .copied()
            .filter(|&card| !ctx.memory.is_master(card))
            .collect();
        if let Some(card) = longest_suit_lowest(&non_masters, view) {
            return card;
        }
        return lowest_by_strength(legal).unwrap_or(legal[0]);
    }

    long_suit_low(legal, view)
}

fn follow(legal: &[Card], ctx: &BotContext<'_>, nil_partner: Option<usize>) -> Card {
    let view = &ctx.view;
    let params = ctx.params;

    if let Some(nil_seat) = nil_partner {
        let partner_played = view
            .current_trick
            .plays()
            .iter()
            .any(|play| play.seat == nil_seat);
        let partner_winning_nil = view
            .current_trick
            .winning_play()
            .map(|play| play.seat == nil_seat)
            .unwrap_or(false);

        if !partner_played {
            // Shield: take the trick high so the nil hand can go under it.
            let winners: Vec<Card> = legal
                .iter()
                .copied()
                .filter(|&card| would_win(view, card))
                .collect();
            if let Some(card) = highest_by_strength(&winners) {
                return card;
            }
            return lowest_by_strength(legal).unwrap_or(legal[0]);
        }
        if partner_winning_nil {
            // Rescue with the cheapest card that takes the trick away.
            let winners: Vec<Card> = legal
                .iter()
                .copied()
                .filter(|&card| would_win(view, card))
                .collect();
            if let Some(card) = lowest_by_strength(&winners) {
                return card;
            }
            return lowest_by_strength(legal).unwrap_or(legal[0]);
        }
        // Partner already shed the trick: play as normal.
    }

    let needed = view.tricks_needed();
    let urgent = needed > 0 && opponent_disposition(ctx) > params.urgent_threshold;
    let partner_seats = view.teams.partner_seats(view.seat);
    let partner_winning = view
        .current_trick
        .winning_play()
        .map(|play| partner_seats.contains(&play.seat))
        .unwrap_or(false);

    if partner_winning && !urgent {
        return consolidate_or_duck(legal, ctx);
    }

    if needed > 0 || disposition(ctx) > params.set_threshold || urgent {
        let winners: Vec<Card> = legal
            .iter()
            .copied()
            .filter(|&card| would_win(view, card))
            .collect();
        let without_trump: Vec<Card> = winners
            .iter()
            .copied()
            .filter(|card| !card.is_spade())
            .collect();
        if let Some(card) = lowest_by_strength(&without_trump) {
            return card;
        }
        if let Some(card) = lowest_by_strength(&winners) {
            return card;
        }
    }

    duck_under(legal, ctx)
}

/// Partner has the trick: dump a future liability onto it when last to act,
/// otherwise stay low.
fn consolidate_or_duck(legal: &[Card], ctx: &BotContext<'_>) -> Card {
    let view = &ctx.view;
    let last_to_act = view.current_trick.plays().len() + 1 == view.current_trick.size();
    if last_to_act {
        if let Some(lead) = view.current_trick.lead_suit() {
            if let Some(card) = legal
                .iter()
                .copied()
                .filter(|&card| {
                    card.suit == lead && ctx.memory.is_master(card) && !would_win(view, card)
                })
                .max_by_key(|card| card.strength())
            {
                return card;
            }
        }
    }
    lowest_by_strength(legal).unwrap_or(legal[0])
}

/// Lose the trick while shedding the most dangerous card available.
fn duck_under(legal: &[Card], ctx: &BotContext<'_>) -> Card {
    let view = &ctx.view;
    let unders: Vec<Card> = legal
        .iter()
        .copied()
        .filter(|&card| !would_win(view, card))
        .collect();

    if let Some(lead) = view.current_trick.lead_suit() {
        if let Some(card) = unders
            .iter()
            .copied()
            .filter(|card| card.suit == lead)
            .max_by_key(|card| card.strength())
        {
            return card;
        }
    }
    // Discarding: shed the highest off-suit card that is not a keeper.
    if let Some(card) = unders
        .iter()
        .copied()
        .filter(|&card| !card.is_spade() && !ctx.memory.is_master(card))
        .max_by_key(|card| card.strength())
    {
        return card;
    }
    if let Some(card) = lowest_by_strength(&unders) {
        return card;
    }
    // Forced to win: do it as cheaply as possible.
    lowest_by_strength(legal).unwrap_or(legal[0])
}

fn long_suit_low(legal: &[Card], view: &BotView<'_>) -> Card {
    let mut best: Option<(usize, Card)> = None;
    for suit in [Suit::Hearts, Suit::Diamonds, Suit::Clubs] {
        let in_suit: Vec<Card> = legal.iter().copied().filter(|c| c.suit == suit).collect();
        let Some(low) = lowest_by_strength(&in_suit) else {
            continue;
        };
        let len = view.hand.count_suit(suit);
        if best.map(|(l, _)| len > l).unwrap_or(true) {
            best = Some((len, low));
        }
    }
    best.map(|(_, card)| card)
        .or_else(|| lowest_by_strength(legal))
        .unwrap_or(legal[0])
}

fn longest_suit_lowest(cards: &[Card], view: &BotView<'_>) -> Option<Card> {
    let mut best: Option<(usize, Card)> = None;
    for suit in Suit::ALL {
        let in_suit: Vec<Card> = cards.iter().copied().filter(|c| c.suit == suit).collect();
        let Some(low) = lowest_by_strength(&in_suit) else {
            continue;
        };
        let len = view.hand.count_suit(suit);
        if best.map(|(l, _)| len > l).unwrap_or(true) {
            best = Some((len, low));
        }
    }
    best.map(|(_, card)| card)
}
