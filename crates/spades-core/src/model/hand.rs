use crate::model::card::Card;
use crate::model::player::SortPreference;
use crate::model::suit::Suit;
use std::vec::Vec;

#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort_with(&SortPreference::default());
        hand
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn remove(&mut self, card: Card) -> bool {
        if let Some(index) = self.cards.iter().position(|&c| c == card) {
            self.cards.remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn has_suit(&self, suit: Suit) -> bool {
        self.cards.iter().any(|card| card.suit == suit)
    }

    pub fn count_suit(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|card| card.suit == suit).count()
    }

    pub fn all_spades(&self) -> bool {
        self.cards.iter().all(|card| card.is_spade())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Display ordering only; gameplay never depends on hand order.
    pub fn sort_with(&mut self, preference: &SortPreference) {
        let ascending = preference.rank_ascending;
        self.cards.sort_by(|a, b| {
            let by_suit = preference
                .suit_position(a.suit)
                .cmp(&preference.suit_position(b.suit));
            let by_rank = if ascending {
                a.strength().cmp(&b.strength())
            } else {
                b.strength().cmp(&a.strength())
            };
            by_suit.then(by_rank)
        });
    }
}
