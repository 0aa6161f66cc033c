use super::BotView;
use spades_core::model::card::Card;
use spades_core::model::deck::Deck;
use spades_core::model::suit::Suit;
use std::collections::HashSet;

/// What one bot can deduce about unseen cards: per-suit outstanding lists
/// and per-seat known voids. Rebuilt on each decision from the mode deck,
/// the bot's own hand and the round's play history.
#[derive(Debug, Clone)]
pub struct CardMemory {
    outstanding: [Vec<Card>; 4],
    voids: Vec<[bool; 4]>,
}

impl CardMemory {
    pub fn from_view(view: &BotView<'_>) -> Self {
        let mut seen: HashSet<Card> = view.hand.iter().copied().collect();
        seen.extend(view.cards_played.iter().map(|play| play.card));
        seen.extend(view.current_trick.plays().iter().map(|play| play.card));

        let mut outstanding: [Vec<Card>; 4] = Default::default();
        for &card in Deck::for_mode(view.mode).cards() {
            if !seen.contains(&card) {
                outstanding[card.suit.index()].push(card);
            }
        }
        for suit in &mut outstanding {
            suit.sort_by(|a, b| b.strength().cmp(&a.strength()));
        }

        let mut voids = vec![[false; 4]; view.mode.player_count];
        // The log only holds completed tricks, appended whole, so it chunks
        // cleanly into trick-sized groups.
        for trick in view.cards_played.chunks_exact(view.mode.player_count) {
            mark_voids(&mut voids, trick);
        }
        mark_voids(&mut voids, view.current_trick.plays());

        Self { outstanding, voids }
    }

    /// Unseen cards of a suit, highest strength first.
    pub fn outstanding(&self, suit: Suit) -> &[Card] {
        &self.outstanding[suit.index()]
    }

    /// Top strength still unseen in a suit; 0 when none remain, meaning any
    /// held card of the suit is a master.
    pub fn highest_outstanding(&self, suit: Suit) -> u8 {
        self.outstanding[suit.index()]
            .first()
            .map(|card| card.strength())
            .unwrap_or(0)
    }

    /// Guaranteed to win if led, ignoring trump risk for off-suit cards.
    pub fn is_master(&self, card: Card) -> bool {
        card.strength() > self.highest_outstanding(card.suit)
    }

    pub fn is_void(&self, seat: usize, suit: Suit) -> bool {
        self.voids[seat][suit.index()]
    }

    pub fn spades_outstanding(&self) -> usize {
        self.outstanding[Suit::Spades.index()].len()
    }
}

fn mark_voids(voids: &mut [[bool; 4]], trick: &[spades_core::model::trick::Play]) {
    let Some(first) = trick.first() else {
        return;
    };
    let led = first.card.suit;
    for play in &trick[1..] {
        if play.card.suit != led {
            voids[play.seat][led.index()] = true;
        }
    }
}
