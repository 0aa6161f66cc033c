use crate::model::card::Card;
use crate::model::mode::ModeConfig;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds the mode deck: standard 52 minus removed cards plus megas.
    pub fn for_mode(mode: &ModeConfig) -> Self {
        let mut cards = Vec::with_capacity(mode.total_cards());
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                let card = Card::new(rank, suit);
                if !mode.removed_cards.contains(&card) {
                    cards.push(card);
                }
            }
        }
        cards.extend(mode.mega_cards.iter().copied());
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(mode: &ModeConfig, rng: &mut R) -> Self {
        let mut deck = Self::for_mode(mode);
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(mode: &ModeConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(mode, &mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Round-robin distribution into `player_count` equal hands.
    pub fn deal(&self, player_count: usize) -> Vec<Vec<Card>> {
        assert_eq!(
            self.cards.len() % player_count,
            0,
            "deck of {} cards cannot be dealt evenly to {player_count} players",
            self.cards.len()
        );
        let mut hands = vec![Vec::with_capacity(self.cards.len() / player_count); player_count];
        for (index, card) in self.cards.iter().enumerate() {
            hands[index % player_count].push(*card);
        }
        hands
    }
}

#[cfg(test)]
mod tests {
    use super::Deck;
    use crate::model::mode::mode_for;
    use std::collections::HashSet;

    #[test]
    fn every_mode_deck_matches_its_total() {
        for players in 3..=8 {
            let mode = mode_for(players);
            let deck = Deck::for_mode(mode);
            assert_eq!(deck.cards().len(), mode.total_cards());
        }
    }

    #[test]
    fn mode_decks_have_no_duplicate_cards() {
        for players in 3..=8 {
            let deck = Deck::for_mode(mode_for(players));
            let unique: HashSet<_> = deck.cards().iter().copied().collect();
            assert_eq!(unique.len(), deck.cards().len(), "{players} players");
        }
    }

    #[test]
    fn deal_produces_equal_hands_without_duplicates() {
        for players in 3..=8 {
            let mode = mode_for(players);
            let deck = Deck::shuffled_with_seed(mode, 7);
            let hands = deck.deal(players);
            assert_eq!(hands.len(), players);
            let mut seen = HashSet::new();
            for hand in &hands {
                assert_eq!(hand.len(), mode.cards_per_player);
                for card in hand {
                    assert!(seen.insert(*card), "duplicate {card} dealt");
                }
            }
        }
    }

    #[test]
    fn shuffle_with_seed_is_deterministic() {
        let mode = mode_for(4);
        let deck_a = Deck::shuffled_with_seed(mode, 42);
        let deck_b = Deck::shuffled_with_seed(mode, 42);
        assert_eq!(deck_a.cards(), deck_b.cards());
    }

    #[test]
    fn shuffle_with_different_seeds_differs() {
        let mode = mode_for(4);
        let deck_a = Deck::shuffled_with_seed(mode, 1);
        let deck_b = Deck::shuffled_with_seed(mode, 2);
        assert_ne!(deck_a.cards(), deck_b.cards());
    }
}
