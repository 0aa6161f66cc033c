use crate::game::view::{PlayerView, PublicPlayer, RoundSummary, TeamRoundLine, TrickCardView};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::mode::{ModeConfig, mode_for};
use crate::model::player::{SeatedPlayer, SortPreference};
use crate::model::score::{PlayerRound, TeamRoundInput, check_winner, score_team_round};
use crate::model::settings::GameSettings;
use crate::model::team::{TeamLookup, team_key};
use crate::model::trick::{PlayViolation, Trick, TrickError, validate_play};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Bidding,
    Playing,
    Scoring,
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GamePhase::Bidding => "bidding",
            GamePhase::Playing => "playing",
            GamePhase::Scoring => "scoring",
            GamePhase::GameOver => "gameOver",
        };
        f.write_str(label)
    }
}

/// Rejections returned to the offending caller; the game state is left
/// unchanged by every error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    NotBiddingPhase,
    NotPlayingPhase,
    UnknownPlayer(String),
    DuplicatePlayerId(String),
    OutOfTurn { expected: String, actual: String },
    BidOutOfRange(u8),
    BlindNilDisabled,
    BlindNilRequiresNil,
    CardNotInHand(Card),
    IllegalPlay(PlayViolation),
    Trick(TrickError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NotBiddingPhase => write!(f, "not in the bidding phase"),
            GameError::NotPlayingPhase => write!(f, "not in the playing phase"),
            GameError::UnknownPlayer(id) => write!(f, "no seated player with id {id}"),
            GameError::DuplicatePlayerId(id) => write!(f, "player id {id} already seated"),
            GameError::OutOfTurn { expected, actual } => {
                write!(f, "it is {expected}'s turn, not {actual}'s")
            }
            GameError::BidOutOfRange(bid) => write!(f, "bid {bid} is out of range"),
            GameError::BlindNilDisabled => write!(f, "blind nil is disabled"),
            GameError::BlindNilRequiresNil => write!(f, "blind nil requires a bid of 0"),
            GameError::CardNotInHand(card) => write!(f, "card {card} is not in hand"),
            GameError::IllegalPlay(violation) => violation.fmt(f),
            GameError::Trick(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for GameError {}

impl From<PlayViolation> for GameError {
    fn from(violation: PlayViolation) -> Self {
        GameError::IllegalPlay(violation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayOutcome {
    Played,
    TrickCompleted {
        winner: String,
    },
    RoundCompleted {
        trick_winner: String,
        summary: RoundSummary,
    },
    GameCompleted {
        summary: RoundSummary,
        game_winner: String,
    },
}

/// The root aggregate for one game. Constructed once per game and owned
/// exclusively by its orchestrating caller; every entry point is a
/// synchronous in-memory computation. All per-player state is keyed by the
/// stable seat index, with the external player ID as a mutable mapping.
#[derive(Debug, Clone)]
pub struct GameState {
    mode: &'static ModeConfig,
    settings: GameSettings,
    players: Vec<SeatedPlayer>,
    preferences: HashMap<String, SortPreference>,
    teams: TeamLookup,
    phase: GamePhase,
    hands: Vec<Hand>,
    bids: Vec<Option<u8>>,
    blind_nil_seats: HashSet<usize>,
    current_trick: Trick,
    tricks_taken: Vec<u8>,
    current_turn: usize,
    dealer: usize,
    spades_broken: bool,
    scores: BTreeMap<String, i32>,
    books: BTreeMap<String, i32>,
    round_number: u32,
    round_history: Vec<RoundSummary>,
    cards_played: Vec<crate::model::trick::Play>,
    winner: Option<String>,
    rng: StdRng,
    seed: u64,
}

impl GameState {
    pub fn new(
        players: Vec<SeatedPlayer>,
        preferences: HashMap<String, SortPreference>,
        settings: GameSettings,
        mode_override: Option<usize>,
    ) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(players, preferences, settings, mode_override, seed)
    }

    pub fn with_seed(
        players: Vec<SeatedPlayer>,
        preferences: HashMap<String, SortPreference>,
        settings: GameSettings,
        mode_override: Option<usize>,
        seed: u64,
    ) -> Self {
        let settings = settings.sanitized();
        let mode = mode_for(mode_override.unwrap_or(settings.game_mode));
        assert_eq!(
            players.len(),
            mode.player_count,
            "seated player count does not match mode"
        );
        let teams = TeamLookup::build(mode, &players);
        let mut scores = BTreeMap::new();
        let mut books = BTreeMap::new();
        for key in teams.keys() {
            scores.insert(key.clone(), 0);
            books.insert(key.clone(), 0);
        }

        let count = mode.player_count;
        let mut state = Self {
            mode,
            settings,
            players,
            preferences,
            teams,
            phase: GamePhase::Bidding,
            hands: vec![Hand::new(); count],
            bids: vec![None; count],
            blind_nil_seats: HashSet::new(),
            current_trick: Trick::new(0, count),
            tricks_taken: vec![0; count],
            current_turn: 0,
            // Rotates forward on round start, so seat 0 deals round one.
            dealer: count - 1,
            spades_broken: false,
            scores,
            books,
            round_number: 0,
            round_history: Vec::new(),
            cards_played: Vec::new(),
            winner: None,
            rng: StdRng::seed_from_u64(seed),
            seed,
        };
        state.begin_round();
        state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn mode(&self) -> &'static ModeConfig {
        self.mode
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn players(&self) -> &[SeatedPlayer] {
        &self.players
    }

    pub fn teams(&self) -> &TeamLookup {
        &self.teams
    }

    pub fn hand(&self, seat: usize) -> &Hand {
        &self.hands[seat]
    }

    pub fn bids(&self) -> &[Option<u8>] {
        &self.bids
    }

    pub fn blind_nil_seats(&self) -> &HashSet<usize> {
        &self.blind_nil_seats
    }

    pub fn current_trick(&self) -> &Trick {
        &self.current_trick
    }

    pub fn tricks_taken(&self) -> &[u8] {
        &self.tricks_taken
    }

    pub fn cards_played(&self) -> &[crate::model::trick::Play] {
        &self.cards_played
    }

    pub fn spades_broken(&self) -> bool {
        self.spades_broken
    }

    pub fn scores(&self) -> &BTreeMap<String, i32> {
        &self.scores
    }

    pub fn books(&self) -> &BTreeMap<String, i32> {
        &self.books
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn round_history(&self) -> &[RoundSummary] {
        &self.round_history
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    pub fn dealer_seat(&self) -> usize {
        self.dealer
    }

    pub fn current_turn_seat(&self) -> usize {
        self.current_turn
    }

    pub fn current_turn_player_id(&self) -> &str {
        &self.players[self.current_turn].id
    }

    pub fn seat_of(&self, player_id: &str) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|player| player.id == player_id)
            .ok_or_else(|| GameError::UnknownPlayer(player_id.to_string()))
    }

    pub fn tricks_played(&self) -> usize {
        self.tricks_taken.iter().map(|&taken| taken as usize).sum()
    }

    /// Records a bid. On the final bid the game transitions to playing with
    /// the seat left of the dealer on lead.
    pub fn place_bid(&mut self, player_id: &str, bid: u8, blind_nil: bool) -> Result<(), GameError> {
        if self.phase != GamePhase::Bidding {
            return Err(GameError::NotBiddingPhase);
        }
        let seat = self.seat_of(player_id)?;
        if seat != self.current_turn {
            return Err(GameError::OutOfTurn {
                expected: self.current_turn_player_id().to_string(),
                actual: player_id.to_string(),
            });
        }
        if bid as usize > self.mode.cards_per_player {
            return Err(GameError::BidOutOfRange(bid));
        }
        if blind_nil {
            if !self.settings.blind_nil {
                return Err(GameError::BlindNilDisabled);
            }
            if bid != 0 {
                return Err(GameError::BlindNilRequiresNil);
            }
        }

        self.bids[seat] = Some(bid);
        if blind_nil {
            self.blind_nil_seats.insert(seat);
        }

        if self.bids.iter().all(|bid| bid.is_some()) {
            let first = (self.dealer + 1) % self.mode.player_count;
            self.phase = GamePhase::Playing;
            self.current_turn = first;
            self.current_trick = Trick::new(first, self.mode.player_count);
        } else {
            self.current_turn = (self.current_turn + 1) % self.mode.player_count;
        }
        Ok(())
    }

    /// Plays a card for the player whose turn it is. Completing a trick
    /// resolves the winner; completing the round scores it and either deals
    /// the next round or ends the game.
    pub fn play_card(&mut self, player_id: &str, card: Card) -> Result<PlayOutcome, GameError> {
        if self.phase != GamePhase::Playing {
            return Err(GameError::NotPlayingPhase);
        }
        let seat = self.seat_of(player_id)?;
        if seat != self.current_turn {
            return Err(GameError::OutOfTurn {
                expected: self.current_turn_player_id().to_string(),
                actual: player_id.to_string(),
            });
        }
        if !self.hands[seat].contains(card) {
            return Err(GameError::CardNotInHand(card));
        }
        validate_play(card, &self.hands[seat], &self.current_trick, self.spades_broken)?;

        self.current_trick
            .play(seat, card)
            .map_err(GameError::Trick)?;
        let _ = self.hands[seat].remove(card);
        if card.is_spade() {
            self.spades_broken = true;
        }

        if !self.current_trick.is_complete() {
            self.current_turn = (seat + 1) % self.mode.player_count;
            return Ok(PlayOutcome::Played);
        }

        let winner = self
            .current_trick
            .winner()
            .expect("complete trick has a winner");
        self.tricks_taken[winner] += 1;
        let finished = std::mem::replace(
            &mut self.current_trick,
            Trick::new(winner, self.mode.player_count),
        );
        self.cards_played.extend(finished.plays().iter().copied());
        let winner_id = self.players[winner].id.clone();

        if self.tricks_played() < self.mode.tricks_per_round {
            self.current_turn = winner;
            return Ok(PlayOutcome::TrickCompleted { winner: winner_id });
        }

        self.phase = GamePhase::Scoring;
        let summary = self.finish_round();
        if let Some(team) = self.winner.clone() {
            self.phase = GamePhase::GameOver;
            Ok(PlayOutcome::GameCompleted {
                summary,
                game_winner: team,
            })
        } else {
            self.begin_round();
            Ok(PlayOutcome::RoundCompleted {
                trick_winner: winner_id,
                summary,
            })
        }
    }

    /// Remaps a seat's external identity without disturbing game progress.
    /// All per-player state is seat-keyed, so only the roster, preference
    /// map and team lookup need the new ID.
    pub fn replace_player(
        &mut self,
        old_id: &str,
        new_id: &str,
        new_name: &str,
        is_bot: bool,
        user_id: Option<String>,
    ) -> Result<(), GameError> {
        if old_id != new_id && self.seat_of(new_id).is_ok() {
            return Err(GameError::DuplicatePlayerId(new_id.to_string()));
        }
        let seat = self.seat_of(old_id)?;
        if let Some(preference) = self.preferences.remove(old_id) {
            self.preferences.insert(new_id.to_string(), preference);
        }
        let player = &mut self.players[seat];
        player.id = new_id.to_string();
        player.name = new_name.to_string();
        player.is_bot = is_bot;
        player.user_id = user_id;
        self.teams = TeamLookup::build(self.mode, &self.players);
        Ok(())
    }

    /// The only projection the transport layer may broadcast to a client:
    /// the recipient's own hand plus public state.
    pub fn get_state_for_player(&self, player_id: &str) -> Result<PlayerView, GameError> {
        let seat = self.seat_of(player_id)?;
        let players = self
            .players
            .iter()
            .map(|player| PublicPlayer {
                id: player.id.clone(),
                name: player.name.clone(),
                team_key: team_key(player.team.unwrap_or(0)),
                seat_index: player.seat_index,
                is_bot: player.is_bot,
                hand_count: self.hands[player.seat_index].len(),
                bid: self.bids[player.seat_index],
                bid_is_blind: self.blind_nil_seats.contains(&player.seat_index),
                tricks_taken: self.tricks_taken[player.seat_index],
            })
            .collect();
        let current_trick = self
            .current_trick
            .plays()
            .iter()
            .map(|play| TrickCardView {
                player_id: self.players[play.seat].id.clone(),
                card: play.card,
            })
            .collect();

        Ok(PlayerView {
            phase: self.phase.to_string(),
            round_number: self.round_number,
            your_hand: self.hands[seat].cards().to_vec(),
            players,
            current_trick,
            current_turn: self.current_turn_player_id().to_string(),
            dealer: self.players[self.dealer].id.clone(),
            spades_broken: self.spades_broken,
            scores: self.scores.clone(),
            books: self.books.clone(),
            round_history: self.round_history.clone(),
            winner: self.winner.clone(),
        })
    }

    fn begin_round(&mut self) {
        let count = self.mode.player_count;
        self.round_number += 1;
        self.dealer = (self.dealer + 1) % count;
        self.bids = vec![None; count];
        self.blind_nil_seats.clear();
        self.tricks_taken = vec![0; count];
        self.spades_broken = false;
        self.cards_played.clear();
        let first = (self.dealer + 1) % count;
        self.current_turn = first;
        self.current_trick = Trick::new(first, count);
        self.phase = GamePhase::Bidding;
        self.deal();
    }

    fn deal(&mut self) {
        let deck = Deck::shuffled(self.mode, &mut self.rng);
        let dealt = deck.deal(self.mode.player_count);
        self.hands = dealt.into_iter().map(Hand::with_cards).collect();
        for seat in 0..self.mode.player_count {
            let preference = self
                .preferences
                .get(&self.players[seat].id)
                .copied()
                .unwrap_or_default();
            self.hands[seat].sort_with(&preference);
        }
    }

    /// Scores the completed round. Moonshot is checked first and
    /// short-circuits normal scoring; otherwise each team is scored
    /// independently and the winner check runs on the new totals.
    fn finish_round(&mut self) -> RoundSummary {
        let mut moonshot: Option<String> = None;
        if self.settings.moonshot {
            for team in 0..self.teams.team_count() {
                let seats = self.teams.seats_of_team(team);
                let combined: i32 = seats
                    .iter()
                    .map(|&seat| self.bids[seat].unwrap_or(0) as i32)
                    .sum();
                let tricks: i32 = seats
                    .iter()
                    .map(|&seat| self.tricks_taken[seat] as i32)
                    .sum();
                if combined == self.mode.tricks_per_round as i32 && tricks == combined {
                    moonshot = Some(team_key(team));
                    break;
                }
            }
        }

        let mut team_lines = BTreeMap::new();
        if let Some(key) = moonshot.clone() {
            self.winner = Some(key);
            for team_key in self.teams.keys() {
                team_lines.insert(
                    team_key.clone(),
                    TeamRoundLine {
                        round_score: 0,
                        total: self.scores[team_key],
                        books: self.books[team_key],
                    },
                );
            }
        } else {
            for team in 0..self.teams.team_count() {
                let key = team_key(team);
                let seats = self.teams.seats_of_team(team);
                let input = TeamRoundInput {
                    players: seats
                        .iter()
                        .map(|&seat| PlayerRound {
                            bid: self.bids[seat].expect("all bids placed before scoring"),
                            tricks: self.tricks_taken[seat],
                            blind_nil: self.blind_nil_seats.contains(&seat),
                        })
                        .collect(),
                    spoiler: self.teams.is_spoiler_team(team),
                    books_carried: self.books[&key],
                };
                let outcome = score_team_round(&input, &self.settings);
                let total = self.scores[&key] + outcome.delta;
                self.scores.insert(key.clone(), total);
                self.books.insert(key.clone(), outcome.books_after);
                team_lines.insert(
                    key,
                    TeamRoundLine {
                        round_score: outcome.delta,
                        total,
                        books: outcome.books_after,
                    },
                );
            }
            self.winner = check_winner(&self.scores, self.settings.win_target);
        }

        let summary = RoundSummary {
            round_number: self.round_number,
            bids: self
                .players
                .iter()
                .map(|player| {
                    (
                        player.id.clone(),
                        self.bids[player.seat_index].unwrap_or(0),
                    )
                })
                .collect(),
            tricks_taken: self
                .players
                .iter()
                .map(|player| (player.id.clone(), self.tricks_taken[player.seat_index]))
                .collect(),
            teams: team_lines,
            blind_nil_players: self
                .blind_nil_seats
                .iter()
                .map(|&seat| self.players[seat].id.clone())
                .collect(),
            moonshot,
        };
        self.round_history.push(summary.clone());
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::{GameError, GamePhase, GameState, PlayOutcome};
    use crate::model::player::{SeatedPlayer, arrange_seating};
    use crate::model::settings::GameSettings;
    use crate::model::trick::validate_play;
    use std::collections::HashMap;

    fn four_player_game(seed: u64) -> GameState {
        let players = arrange_seating(
            crate::model::mode::mode_for(4),
            &[
                SeatedPlayer::new("a", "Ann", 0),
                SeatedPlayer::new("b", "Bob", 0),
                SeatedPlayer::new("c", "Cam", 1),
                SeatedPlayer::new("d", "Dee", 1),
            ],
        );
        GameState::with_seed(
            players,
            HashMap::new(),
            GameSettings::default(),
            None,
            seed,
        )
    }

    fn bid_all(game: &mut GameState, bids: &[u8]) {
        for &bid in bids {
            let id = game.current_turn_player_id().to_string();
            game.place_bid(&id, bid, false).unwrap();
        }
    }

    fn play_first_legal(game: &mut GameState) -> PlayOutcome {
        let id = game.current_turn_player_id().to_string();
        let seat = game.seat_of(&id).unwrap();
        let card = game
            .hand(seat)
            .iter()
            .copied()
            .find(|&card| {
                validate_play(card, game.hand(seat), game.current_trick(), game.spades_broken())
                    .is_ok()
            })
            .expect("a legal card always exists");
        game.play_card(&id, card).unwrap()
    }

    #[test]
    fn bidding_starts_left_of_dealer() {
        let game = four_player_game(1);
        assert_eq!(game.phase(), GamePhase::Bidding);
        assert_eq!(game.dealer_seat(), 0);
        assert_eq!(game.current_turn_seat(), 1);
        assert_eq!(game.round_number(), 1);
    }

    #[test]
    fn bids_enforce_turn_order_and_range() {
        let mut game = four_player_game(1);
        let wrong = game.players()[3].id.clone();
        assert!(matches!(
            game.place_bid(&wrong, 3, false),
            Err(GameError::OutOfTurn { .. })
        ));
        let turn = game.current_turn_player_id().to_string();
        assert_eq!(
            game.place_bid(&turn, 14, false),
            Err(GameError::BidOutOfRange(14))
        );
        assert!(game.place_bid(&turn, 4, false).is_ok());
    }

    #[test]
    fn blind_nil_requires_nil_bid_and_setting() {
        let mut game = four_player_game(1);
        let turn = game.current_turn_player_id().to_string();
        assert_eq!(
            game.place_bid(&turn, 3, true),
            Err(GameError::BlindNilRequiresNil)
        );

        let players = arrange_seating(
            crate::model::mode::mode_for(4),
            &[
                SeatedPlayer::new("a", "Ann", 0),
                SeatedPlayer::new("b", "Bob", 0),
                SeatedPlayer::new("c", "Cam", 1),
                SeatedPlayer::new("d", "Dee", 1),
            ],
        );
        let mut disabled = GameState::with_seed(
            players,
            HashMap::new(),
            GameSettings {
                blind_nil: false,
                ..GameSettings::default()
            },
            None,
            1,
        );
        let turn = disabled.current_turn_player_id().to_string();
        assert_eq!(
            disabled.place_bid(&turn, 0, true),
            Err(GameError::BlindNilDisabled)
        );
    }

    #[test]
    fn final_bid_moves_to_playing_with_dealer_left_on_lead() {
        let mut game = four_player_game(1);
        bid_all(&mut game, &[3, 3, 4, 3]);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.current_turn_seat(), 1);
        assert_eq!(game.current_trick().leader(), 1);
    }

    #[test]
    fn playing_rejects_wrong_phase_turn_and_unheld_cards() {
        let mut game = four_player_game(1);
        let turn = game.current_turn_player_id().to_string();
        let any_card = game.hand(1).cards()[0];
        assert_eq!(
            game.play_card(&turn, any_card),
            Err(GameError::NotPlayingPhase)
        );

        bid_all(&mut game, &[3, 3, 4, 3]);
        let off_turn = game.players()[0].id.clone();
        let their_card = game.hand(0).cards()[0];
        assert!(matches!(
            game.play_card(&off_turn, their_card),
            Err(GameError::OutOfTurn { .. })
        ));

        let turn = game.current_turn_player_id().to_string();
        let seat = game.seat_of(&turn).unwrap();
        let foreign = game.hand((seat + 1) % 4).cards()[0];
        if !game.hand(seat).contains(foreign) {
            assert_eq!(
                game.play_card(&turn, foreign),
                Err(GameError::CardNotInHand(foreign))
            );
        }
    }

    #[test]
    fn a_full_round_plays_thirteen_tricks_and_starts_the_next() {
        let mut game = four_player_game(7);
        bid_all(&mut game, &[3, 3, 4, 3]);

        let mut completed_tricks = 0;
        loop {
            match play_first_legal(&mut game) {
                PlayOutcome::Played => {}
                PlayOutcome::TrickCompleted { .. } => completed_tricks += 1,
                PlayOutcome::RoundCompleted { summary, .. } => {
                    completed_tricks += 1;
                    assert_eq!(completed_tricks, 13);
                    assert_eq!(summary.round_number, 1);
                    assert_eq!(
                        summary.tricks_taken.values().map(|&t| t as usize).sum::<usize>(),
                        13
                    );
                    break;
                }
                PlayOutcome::GameCompleted { .. } => panic!("game should not end in round one"),
            }
        }

        assert_eq!(game.phase(), GamePhase::Bidding);
        assert_eq!(game.round_number(), 2);
        assert_eq!(game.dealer_seat(), 1);
        assert_eq!(game.round_history().len(), 1);
        assert!(!game.spades_broken());
        for seat in 0..4 {
            assert_eq!(game.hand(seat).len(), 13);
        }
    }

    #[test]
    fn hand_size_plus_cards_played_is_invariant() {
        let mut game = four_player_game(11);
        bid_all(&mut game, &[3, 3, 4, 3]);
        for _ in 0..10 {
            play_first_legal(&mut game);
        }
        for seat in 0..4 {
            let played = game
                .cards_played()
                .iter()
                .filter(|play| play.seat == seat)
                .count();
            let pending = game
                .current_trick()
                .plays()
                .iter()
                .filter(|play| play.seat == seat)
                .count();
            assert_eq!(game.hand(seat).len() + played + pending, 13);
        }
    }

    #[test]
    fn replace_player_preserves_progress_and_forgets_old_id() {
        let mut game = four_player_game(3);
        bid_all(&mut game, &[3, 3, 4, 3]);
        for _ in 0..6 {
            play_first_legal(&mut game);
        }

        let old_id = game.players()[2].id.clone();
        let before = game.get_state_for_player(&old_id).unwrap();
        game.replace_player(&old_id, "fresh", "Fresh", false, Some("user9".into()))
            .unwrap();

        assert!(matches!(
            game.get_state_for_player(&old_id),
            Err(GameError::UnknownPlayer(_))
        ));
        let after = game.get_state_for_player("fresh").unwrap();
        assert_eq!(before.your_hand, after.your_hand);
        assert_eq!(before.round_number, after.round_number);
        assert_eq!(before.scores, after.scores);
        assert!(after.players.iter().all(|player| player.id != old_id));
        assert!(
            after
                .current_trick
                .iter()
                .all(|play| play.player_id != old_id)
        );
        assert_eq!(game.teams().partner_ids("fresh").len(), 1);
    }

    #[test]
    fn replace_player_rejects_an_already_seated_id() {
        let mut game = four_player_game(3);
        let existing = game.players()[1].id.clone();
        let old = game.players()[0].id.clone();
        assert_eq!(
            game.replace_player(&old, &existing, "X", false, None),
            Err(GameError::DuplicatePlayerId(existing))
        );
    }

    #[test]
    fn view_hides_other_hands() {
        let game = four_player_game(5);
        let view = game.get_state_for_player("a").unwrap();
        assert_eq!(view.your_hand.len(), 13);
        assert_eq!(view.players.len(), 4);
        for player in &view.players {
            assert_eq!(player.hand_count, 13);
        }
        assert_eq!(view.phase, "bidding");
    }

    #[test]
    fn moonshot_ends_the_game_regardless_of_totals() {
        let mut game = four_player_game(9);
        // Bidding starts at seat 1; team1 sits at seats 0 and 2 and bids
        // a combined 13.
        bid_all(&mut game, &[0, 7, 0, 6]);
        // Opponents hold a numerically higher total going into the round.
        game.scores.insert("team2".to_string(), 120);
        game.tricks_taken = vec![6, 0, 7, 0];
        game.phase = GamePhase::Scoring;
        let summary = game.finish_round();
        assert_eq!(summary.moonshot.as_deref(), Some("team1"));
        assert_eq!(game.winner(), Some("team1"));
        // Short-circuited: no points were applied.
        assert_eq!(game.scores["team1"], 0);
    }

    #[test]
    fn moonshot_respects_setting_toggle() {
        let players = arrange_seating(
            crate::model::mode::mode_for(4),
            &[
                SeatedPlayer::new("a", "Ann", 0),
                SeatedPlayer::new("b", "Bob", 0),
                SeatedPlayer::new("c", "Cam", 1),
                SeatedPlayer::new("d", "Dee", 1),
            ],
        );
        let mut game = GameState::with_seed(
            players,
            HashMap::new(),
            GameSettings {
                moonshot: false,
                ..GameSettings::default()
            },
            None,
            9,
        );
        bid_all(&mut game, &[0, 7, 0, 6]);
        game.tricks_taken = vec![6, 0, 7, 0];
        game.phase = GamePhase::Scoring;
        let summary = game.finish_round();
        assert!(summary.moonshot.is_none());
        // Scored normally: team1 made 13 (+130) with ten-plus tricks (+100),
        // team2's two nils both held (+200).
        assert_eq!(game.scores["team1"], 230);
        assert_eq!(game.scores["team2"], 200);
    }

    #[test]
    fn reaching_the_target_ends_the_game() {
        let mut game = four_player_game(13);
        bid_all(&mut game, &[5, 2, 4, 2]);
        game.scores.insert("team1".to_string(), 480);
        game.tricks_taken = vec![5, 2, 4, 2];
        game.phase = GamePhase::Scoring;
        let _ = game.finish_round();
        assert_eq!(game.winner(), Some("team1"));
    }

    #[test]
    fn tied_leaders_above_target_keep_playing() {
        let mut game = four_player_game(13);
        // By seat: [4, 2, 5, 2], so team1 bids 9 and team2 bids 4.
        bid_all(&mut game, &[2, 5, 2, 4]);
        game.scores.insert("team1".to_string(), 430);
        game.scores.insert("team2".to_string(), 480);
        game.tricks_taken = vec![4, 2, 5, 2];
        game.phase = GamePhase::Scoring;
        let _ = game.finish_round();
        // team1: 430+90, team2: 480+40 -> both at 520, no unique leader.
        assert_eq!(game.scores["team1"], 520);
        assert_eq!(game.scores["team2"], 520);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn works_across_all_modes() {
        for count in 3..=8 {
            let mode = crate::model::mode::mode_for(count);
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
            let mut game = GameState::with_seed(
                players,
                HashMap::new(),
                GameSettings {
                    game_mode: count,
                    ..GameSettings::default()
                },
                None,
                17,
            );
            bid_all(&mut game, &vec![3; count]);
            assert_eq!(game.phase(), GamePhase::Playing);
            let mut outcome = play_first_legal(&mut game);
            while matches!(outcome, PlayOutcome::Played) {
                outcome = play_first_legal(&mut game);
            }
            assert!(matches!(outcome, PlayOutcome::TrickCompleted { .. }));
            assert_eq!(game.tricks_played(), 1);
        }
    }
}
