use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::suit::Suit;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Trick {
    leader: usize,
    size: usize,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: usize,
    pub card: Card,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn { expected: usize, actual: usize },
    AlreadyPlayed(usize),
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected seat {expected} to play next but got seat {actual}")
            }
            TrickError::AlreadyPlayed(seat) => {
                write!(f, "seat {seat} has already played this trick")
            }
        }
    }
}

impl std::error::Error for TrickError {}

/// Rule violations detected before a card enters the trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayViolation {
    SpadesNotBroken,
    MustFollowSuit(Suit),
}

impl fmt::Display for PlayViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayViolation::SpadesNotBroken => {
                write!(f, "cannot lead spades before they are broken")
            }
            PlayViolation::MustFollowSuit(suit) => write!(f, "must follow suit {suit}"),
        }
    }
}

impl std::error::Error for PlayViolation {}

/// Checks follow-suit and spade-breaking legality for a candidate play.
pub fn validate_play(
    card: Card,
    hand: &Hand,
    trick: &Trick,
    spades_broken: bool,
) -> Result<(), PlayViolation> {
    match trick.lead_suit() {
        None => {
            if card.is_spade() && !spades_broken && !hand.all_spades() {
                return Err(PlayViolation::SpadesNotBroken);
            }
            Ok(())
        }
        Some(lead) => {
            if card.suit != lead && hand.has_suit(lead) {
                return Err(PlayViolation::MustFollowSuit(lead));
            }
            Ok(())
        }
    }
}

impl Trick {
    pub fn new(leader: usize, size: usize) -> Self {
        Self {
            leader,
            size,
            plays: Vec::with_capacity(size),
        }
    }

    pub fn leader(&self) -> usize {
        self.leader
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == self.size
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn contains_spade(&self) -> bool {
        self.plays.iter().any(|play| play.card.is_spade())
    }

    pub fn play(&mut self, seat: usize, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.seat == seat) {
            return Err(TrickError::AlreadyPlayed(seat));
        }

        let expected = self.expected_seat();
        if expected != seat {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// The play currently taking the trick, valid mid-trick as well. Any
    /// spade beats every non-spade; otherwise the highest card of the led
    /// suit wins. Off-suit non-spades can never win.
    pub fn winning_play(&self) -> Option<&Play> {
        let lead = self.lead_suit()?;
        let best_spade = self
            .plays
            .iter()
            .filter(|play| play.card.is_spade())
            .max_by_key(|play| play.card.strength());
        if let Some(play) = best_spade {
            return Some(play);
        }
        self.plays
            .iter()
            .filter(|play| play.card.suit == lead)
            .max_by_key(|play| play.card.strength())
    }

    pub fn winner(&self) -> Option<usize> {
        if !self.is_complete() {
            return None;
        }
        self.winning_play().map(|play| play.seat)
    }

    fn expected_seat(&self) -> usize {
        self.plays
            .last()
            .map(|play| (play.seat + 1) % self.size)
            .unwrap_or(self.leader)
    }
}
