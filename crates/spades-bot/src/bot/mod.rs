mod bid;
mod disposition;
mod memory;
mod params;
mod play;

pub use bid::BidPlanner;
pub use memory::CardMemory;
pub use params::BotParams;
pub use play::PlayPlanner;

pub(crate) use disposition::{disposition, opponent_disposition};

use spades_core::game::state::{GameError, GameState};
use spades_core::model::card::Card;
use spades_core::model::hand::Hand;
use spades_core::model::mode::ModeConfig;
use spades_core::model::settings::GameSettings;
use spades_core::model::team::TeamLookup;
use spades_core::model::trick::{Play, Trick};
use std::collections::{BTreeMap, HashSet};

/// Read-only snapshot of everything a bot may consult when deciding. Bots
/// never mutate game state; the caller feeds decisions back through the
/// game's own entry points.
#[derive(Clone, Copy)]
pub struct BotView<'a> {
    pub seat: usize,
    pub hand: &'a Hand,
    pub mode: &'static ModeConfig,
    pub settings: &'a GameSettings,
    pub teams: &'a TeamLookup,
    pub bids: &'a [Option<u8>],
    pub blind_nil_seats: &'a HashSet<usize>,
    pub tricks_taken: &'a [u8],
    pub current_trick: &'a Trick,
    pub cards_played: &'a [Play],
    pub spades_broken: bool,
    pub scores: &'a BTreeMap<String, i32>,
    pub books: &'a BTreeMap<String, i32>,
    pub round_number: u32,
}

impl<'a> BotView<'a> {
    pub fn of(game: &'a GameState, player_id: &str) -> Result<Self, GameError> {
        let seat = game.seat_of(player_id)?;
        Ok(Self {
            seat,
            hand: game.hand(seat),
            mode: game.mode(),
            settings: game.settings(),
            teams: game.teams(),
            bids: game.bids(),
            blind_nil_seats: game.blind_nil_seats(),
            tricks_taken: game.tricks_taken(),
            current_trick: game.current_trick(),
            cards_played: game.cards_played(),
            spades_broken: game.spades_broken(),
            scores: game.scores(),
            books: game.books(),
            round_number: game.round_number(),
        })
    }

    pub fn my_team(&self) -> usize {
        self.teams.team_of_seat(self.seat)
    }

    pub fn my_bid(&self) -> Option<u8> {
        self.bids[self.seat]
    }

    pub fn is_spoiler(&self) -> bool {
        self.teams.is_spoiler_seat(self.seat)
    }

    /// The first (and for pair teams, only) partner seat.
    pub fn partner_seat(&self) -> Option<usize> {
        self.teams.partner_seats(self.seat).into_iter().next()
    }

    pub fn partner_bid(&self) -> Option<u8> {
        self.partner_seat().and_then(|seat| self.bids[seat])
    }

    pub fn team_score(&self, team: usize) -> i32 {
        let key = spades_core::model::team::team_key(team);
        self.scores.get(&key).copied().unwrap_or(0)
    }

    pub fn team_books(&self, team: usize) -> i32 {
        let key = spades_core::model::team::team_key(team);
        self.books.get(&key).copied().unwrap_or(0)
    }

    /// Sum of all placed bids, nil counting as zero.
    pub fn total_bids(&self) -> i32 {
        self.bids
            .iter()
            .map(|bid| bid.unwrap_or(0) as i32)
            .sum()
    }

    /// Combined non-nil bid placed so far by one team.
    pub fn combined_bid(&self, team: usize) -> i32 {
        self.teams
            .seats_of_team(team)
            .into_iter()
            .filter_map(|seat| self.bids[seat])
            .map(|bid| bid as i32)
            .sum()
    }

    /// A team's effective trick total: non-nil bidders' tricks plus tricks a
    /// failed nil bidder has leaked.
    pub fn effective_tricks(&self, team: usize) -> i32 {
        self.teams
            .seats_of_team(team)
            .into_iter()
            .map(|seat| self.tricks_taken[seat] as i32)
            .sum()
    }

    /// Tricks the bot's team still needs to make its combined bid. Zero or
    /// negative means the bid is already made.
    pub fn tricks_needed(&self) -> i32 {
        let team = self.my_team();
        self.combined_bid(team) - self.effective_tricks(team)
    }

    /// Whether every opposing team has already taken at least its combined
    /// bid this round.
    pub fn opponents_all_made(&self) -> bool {
        (0..self.teams.team_count())
            .filter(|&team| team != self.my_team())
            .all(|team| {
                let bid = self.combined_bid(team);
                bid > 0 && self.effective_tricks(team) >= bid
            })
    }

    /// A live nil bidder on the bot's team, if any (bid nil, no trick taken
    /// yet, and not the bot itself).
    pub fn nil_partner_seat(&self) -> Option<usize> {
        self.teams
            .partner_seats(self.seat)
            .into_iter()
            .find(|&seat| self.bids[seat] == Some(0) && self.tricks_taken[seat] == 0)
    }

    /// A live nil bidder on any opposing team, if any.
    pub fn nil_opponent_seat(&self) -> Option<usize> {
        self.teams
            .opponent_seats(self.seat)
            .into_iter()
            .find(|&seat| self.bids[seat] == Some(0) && self.tricks_taken[seat] == 0)
    }

    pub fn is_nil_self(&self) -> bool {
        self.my_bid() == Some(0) && self.tricks_taken[self.seat] == 0
    }
}

/// Per-decision working set: the snapshot plus the card memory rebuilt from
/// it. Construction is cheap enough to do on every turn.
pub struct BotContext<'a> {
    pub view: BotView<'a>,
    pub memory: CardMemory,
    pub params: &'a BotParams,
}

impl<'a> BotContext<'a> {
    pub fn new(view: BotView<'a>, params: &'a BotParams) -> Self {
        let memory = CardMemory::from_view(&view);
        Self {
            view,
            memory,
            params,
        }
    }
}

pub(crate) fn lowest_by_strength(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().min_by_key(|card| card.strength())
}

pub(crate) fn highest_by_strength(cards: &[Card]) -> Option<Card> {
    cards.iter().copied().max_by_key(|card| card.strength())
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::BotView;
    use spades_core::game::state::GameState;
    use spades_core::model::card::Card;
    use spades_core::model::hand::Hand;
    use spades_core::model::mode::{ModeConfig, mode_for};
    use spades_core::model::player::{SeatedPlayer, arrange_seating};
    use spades_core::model::rank::Rank;
    use spades_core::model::settings::GameSettings;
    use spades_core::model::suit::Suit;
    use spades_core::model::team::{TeamLookup, team_key};
    use spades_core::model::trick::{Play, Trick};
    use std::collections::{BTreeMap, HashMap, HashSet};

    pub fn card(rank: u8, suit: Suit) -> Card {
        Card::new(Rank::from_value(rank).unwrap(), suit)
    }

    /// Hand-built snapshot for planner tests; every field is settable so a
    /// scenario can be staged without driving a whole game.
    pub struct Fixture {
        pub mode: &'static ModeConfig,
        pub settings: GameSettings,
        pub teams: TeamLookup,
        pub hand: Hand,
        pub bids: Vec<Option<u8>>,
        pub blind_nil_seats: HashSet<usize>,
        pub tricks_taken: Vec<u8>,
        pub trick: Trick,
        pub cards_played: Vec<Play>,
        pub scores: BTreeMap<String, i32>,
        pub books: BTreeMap<String, i32>,
        pub seat: usize,
        pub spades_broken: bool,
        pub round_number: u32,
    }

    impl Fixture {
        /// 4-player fixture: teams on seats (0,2) and (1,3), acting seat as
        /// given, empty trick led by that seat.
        pub fn new(seat: usize) -> Self {
            Self::for_mode(4, seat)
        }

        pub fn for_mode(player_count: usize, seat: usize) -> Self {
            let mode = mode_for(player_count);
            let mut roster = Vec::new();
            let mut cursor = 0usize;
            for (team, spec) in mode.teams.iter().enumerate() {
                for _ in 0..spec.size {
                    roster.push(SeatedPlayer::bot(
                        format!("p{cursor}"),
                        format!("Bot {cursor}"),
                        team,
                    ));
                    cursor += 1;
                }
            }
            let players = arrange_seating(mode, &roster);
            let teams = TeamLookup::build(mode, &players);
            let mut scores = BTreeMap::new();
            let mut books = BTreeMap::new();
            for team in 0..mode.team_count() {
                scores.insert(team_key(team), 0);
                books.insert(team_key(team), 0);
            }
            Self {
                mode,
                settings: GameSettings::default(),
                teams,
                hand: Hand::new(),
                bids: vec![None; mode.player_count],
                blind_nil_seats: HashSet::new(),
                tricks_taken: vec![0; mode.player_count],
                trick: Trick::new(seat, mode.player_count),
                cards_played: Vec::new(),
                scores,
                books,
                seat,
                spades_broken: false,
                round_number: 2,
            }
        }

        pub fn set_score(&mut self, team: usize, score: i32) {
            self.scores.insert(team_key(team), score);
        }

        pub fn set_books(&mut self, team: usize, books: i32) {
            self.books.insert(team_key(team), books);
        }

        pub fn view(&self) -> BotView<'_> {
            BotView {
                seat: self.seat,
                hand: &self.hand,
                mode: self.mode,
                settings: &self.settings,
                teams: &self.teams,
                bids: &self.bids,
                blind_nil_seats: &self.blind_nil_seats,
                tricks_taken: &self.tricks_taken,
                current_trick: &self.trick,
                cards_played: &self.cards_played,
                spades_broken: self.spades_broken,
                scores: &self.scores,
                books: &self.books,
                round_number: self.round_number,
            }
        }
    }

    /// Seeded game used by bot tests: 4 players, teams on seats (0,2) and
    /// (1,3), dealer at seat 0.
    pub fn seeded_game(seed: u64) -> GameState {
        seeded_game_with(seed, 4, GameSettings::default())
    }

    pub fn seeded_game_with(seed: u64, player_count: usize, settings: GameSettings) -> GameState {
        let mode = mode_for(player_count);
        let mut roster = Vec::new();
        let mut cursor = 0usize;
        for (team, spec) in mode.teams.iter().enumerate() {
            for _ in 0..spec.size {
                roster.push(SeatedPlayer::bot(
                    format!("p{cursor}"),
                    format!("Bot {cursor}"),
                    team,
                ));
                cursor += 1;
            }
        }
        let players = arrange_seating(mode, &roster);
        let settings = GameSettings {
            game_mode: player_count,
            ..settings
        };
        GameState::with_seed(players, HashMap::new(), settings, None, seed)
    }
}
