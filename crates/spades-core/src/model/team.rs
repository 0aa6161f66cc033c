use crate::model::mode::ModeConfig;
use crate::model::player::SeatedPlayer;

/// 1-indexed team key used in scores, books and round summaries.
pub fn team_key(team_index: usize) -> String {
    format!("team{}", team_index + 1)
}

/// Partner/opponent/spoiler relationships derived from the seated players
/// and the mode config. Pure function of its inputs; rebuilt whenever a
/// player ID is remapped so lookups stay keyed on current IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamLookup {
    keys: Vec<String>,
    spoiler: Vec<bool>,
    team_by_seat: Vec<usize>,
    ids: Vec<String>,
}

impl TeamLookup {
    pub fn build(mode: &ModeConfig, players: &[SeatedPlayer]) -> Self {
        assert_eq!(
            players.len(),
            mode.player_count,
            "roster does not match mode"
        );
        let keys = (0..mode.team_count()).map(team_key).collect();
        let spoiler = mode.teams.iter().map(|team| team.spoiler).collect();
        let team_by_seat = players
            .iter()
            .map(|player| {
                let team = player.team.expect("seated player has a team");
                assert!(team < mode.team_count(), "team index out of range");
                team
            })
            .collect();
        let ids = players.iter().map(|player| player.id.clone()).collect();
        Self {
            keys,
            spoiler,
            team_by_seat,
            ids,
        }
    }

    pub fn team_count(&self) -> usize {
        self.keys.len()
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn seat_of(&self, player_id: &str) -> Option<usize> {
        self.ids.iter().position(|id| id == player_id)
    }

    pub fn team_of_seat(&self, seat: usize) -> usize {
        self.team_by_seat[seat]
    }

    pub fn team_key_of(&self, player_id: &str) -> Option<&str> {
        self.seat_of(player_id)
            .map(|seat| self.keys[self.team_by_seat[seat]].as_str())
    }

    pub fn partner_seats(&self, seat: usize) -> Vec<usize> {
        let team = self.team_by_seat[seat];
        (0..self.team_by_seat.len())
            .filter(|&other| other != seat && self.team_by_seat[other] == team)
            .collect()
    }

    pub fn opponent_seats(&self, seat: usize) -> Vec<usize> {
        let team = self.team_by_seat[seat];
        (0..self.team_by_seat.len())
            .filter(|&other| self.team_by_seat[other] != team)
            .collect()
    }

    pub fn seats_of_team(&self, team: usize) -> Vec<usize> {
        (0..self.team_by_seat.len())
            .filter(|&seat| self.team_by_seat[seat] == team)
            .collect()
    }

    pub fn partner_ids(&self, player_id: &str) -> Vec<String> {
        self.seat_of(player_id)
            .map(|seat| {
                self.partner_seats(seat)
                    .into_iter()
                    .map(|other| self.ids[other].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn opponent_ids(&self, player_id: &str) -> Vec<String> {
        self.seat_of(player_id)
            .map(|seat| {
                self.opponent_seats(seat)
                    .into_iter()
                    .map(|other| self.ids[other].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_spoiler_seat(&self, seat: usize) -> bool {
        self.spoiler[self.team_by_seat[seat]]
    }

    pub fn is_spoiler_team(&self, team: usize) -> bool {
        self.spoiler[team]
    }

    pub fn is_spoiler(&self, player_id: &str) -> bool {
        self.seat_of(player_id)
            .map(|seat| self.is_spoiler_seat(seat))
            .unwrap_or(false)
    }
}
