use super::BotContext;
use spades_core::model::rank::Rank;
use spades_core::model::suit::Suit;

/// Continuous lean toward taking extra tricks (positive, SET) or avoiding
/// them (negative, DUCK). Neutral hands hover near zero.
pub(crate) fn disposition(ctx: &BotContext<'_>) -> f32 {
    let view = &ctx.view;
    let params = ctx.params;

    // Once every opposing team has made its bid there is nothing left to
    // set; extra tricks only buy books.
    if view.opponents_all_made() {
        return -1.0;
    }

    let free_tricks = view.mode.tricks_per_round as i32 - view.total_bids();
    let mut score = (3 - free_tricks) as f32 * params.disposition_free_trick_weight;

    score += view.team_books(view.my_team()) as f32 * params.disposition_book_weight;

    let masters = view
        .hand
        .iter()
        .filter(|&&card| ctx.memory.is_master(card))
        .count();
    score += masters as f32 * params.disposition_master_weight;

    score += partner_signal(ctx) * params.disposition_partner_weight;

    score.clamp(-1.0, 1.0)
}

/// The same calculus from the strongest opposing team's perspective, plus
/// live reads of the current trick.
pub(crate) fn opponent_disposition(ctx: &BotContext<'_>) -> f32 {
    let view = &ctx.view;
    let params = ctx.params;

    let free_tricks = view.mode.tricks_per_round as i32 - view.total_bids();
    let mut score = (3 - free_tricks) as f32 * params.disposition_free_trick_weight;

    let best_opponent_books = (0..view.teams.team_count())
        .filter(|&team| team != view.my_team())
        .map(|team| view.team_books(team))
        .max()
        .unwrap_or(0);
    score += best_opponent_books as f32 * params.disposition_book_weight;

    let opponents = view.teams.opponent_seats(view.seat);
    let lead = view.current_trick.lead_suit();
    for play in view.current_trick.plays().iter().skip(1) {
        if !opponents.contains(&play.seat) {
            continue;
        }
        let Some(led) = lead else { break };
        if led != Suit::Spades && play.card.is_spade() {
            score += params.opponent_trump_signal;
        } else if play.card.suit != led
            && !play.card.is_spade()
            && ctx.memory.spades_outstanding() > 0
        {
            score -= params.opponent_discard_signal;
        }
    }

    score.clamp(-1.0, 1.0)
}

/// Bounded read of the partner's completed plays: high leads and trump
/// discards read as pushing for tricks, low leads as staying out of the way.
pub(crate) fn partner_signal(ctx: &BotContext<'_>) -> f32 {
    let view = &ctx.view;
    let Some(partner) = view.partner_seat() else {
        return 0.0;
    };

    let mut signal = 0.0f32;
    for trick in view.cards_played.chunks_exact(view.mode.player_count) {
        let led = trick[0].card.suit;
        for (position, play) in trick.iter().enumerate() {
            if play.seat != partner {
                continue;
            }
            if position == 0 {
                if play.card.rank >= Rank::Queen {
                    signal += 0.2;
                } else if play.card.rank <= Rank::Six {
                    signal -= 0.15;
                }
            } else if play.card.suit != led {
                if play.card.is_spade() {
                    // Sloughing trump is the loudest duck signal there is.
                    signal -= 0.3;
                }
            } else if play.card.rank >= Rank::King {
                signal += 0.1;
            }
        }
    }
    signal.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::{disposition, opponent_disposition, partner_signal};
    use crate::bot::testutil::{Fixture, seeded_game};
    use crate::bot::{BotContext, BotParams, BotView};

    fn bid(game: &mut spades_core::game::state::GameState, bids: &[u8]) {
        for &value in bids {
            let id = game.current_turn_player_id().to_string();
            game.place_bid(&id, value, false).unwrap();
        }
    }

    #[test]
    fn tight_bidding_pushes_toward_set() {
        let mut tight = seeded_game(31);
        bid(&mut tight, &[4, 4, 3, 3]);
        let mut loose = seeded_game(31);
        bid(&mut loose, &[2, 2, 1, 2]);
        let params = BotParams::default();

        let id = tight.current_turn_player_id().to_string();
        let tight_ctx = BotContext::new(BotView::of(&tight, &id).unwrap(), &params);
        let loose_ctx = BotContext::new(BotView::of(&loose, &id).unwrap(), &params);
        assert!(disposition(&tight_ctx) > disposition(&loose_ctx));
    }

    #[test]
    fn opponents_made_forces_full_duck() {
        let params = BotParams::default();
        let mut fixture = Fixture::new(0);
        fixture.bids = vec![Some(5), Some(1), Some(5), Some(1)];
        fixture.tricks_taken = vec![0, 1, 0, 1];
        let ctx = BotContext::new(fixture.view(), &params);
        assert!(ctx.view.opponents_all_made());
        assert_eq!(disposition(&ctx), -1.0);

        // One opposing trick short: the hard duck rule no longer applies.
        fixture.tricks_taken = vec![0, 1, 0, 0];
        let ctx = BotContext::new(fixture.view(), &params);
        assert!(!ctx.view.opponents_all_made());
        assert!(disposition(&ctx) > -1.0);
    }

    #[test]
    fn partner_signal_is_zero_without_history_or_partner() {
        let mut game = seeded_game(33);
        bid(&mut game, &[3, 3, 3, 3]);
        let params = BotParams::default();
        let id = game.current_turn_player_id().to_string();
        let ctx = BotContext::new(BotView::of(&game, &id).unwrap(), &params);
        assert_eq!(partner_signal(&ctx), 0.0);

        // Solo teams in the 3-player mode never have a partner to read.
        let mut solo = crate::bot::testutil::seeded_game_with(
            33,
            3,
            spades_core::model::settings::GameSettings::default(),
        );
        bid(&mut solo, &[3, 3, 3]);
        let id = solo.current_turn_player_id().to_string();
        let solo_ctx = BotContext::new(BotView::of(&solo, &id).unwrap(), &params);
        assert_eq!(partner_signal(&solo_ctx), 0.0);
    }

    #[test]
    fn dispositions_stay_bounded() {
        let mut game = seeded_game(34);
        bid(&mut game, &[7, 6, 7, 6]);
        let params = BotParams::default();
        let id = game.current_turn_player_id().to_string();
        let ctx = BotContext::new(BotView::of(&game, &id).unwrap(), &params);
        let own = disposition(&ctx);
        let theirs = opponent_disposition(&ctx);
        assert!((-1.0..=1.0).contains(&own));
        assert!((-1.0..=1.0).contains(&theirs));
        // Everyone overbidding leaves negative free tricks: both lean SET.
        assert!(own > 0.0);
        assert!(theirs > 0.0);
    }
}
