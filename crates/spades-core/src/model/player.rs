use crate::model::mode::ModeConfig;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// A player occupying a seat for the duration of a game. The external `id`
/// may be remapped on reconnection; the seat index is the stable key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatedPlayer {
    pub id: String,
    pub name: String,
    pub team: Option<usize>,
    pub seat_index: usize,
    pub is_bot: bool,
    pub user_id: Option<String>,
}

impl SeatedPlayer {
    pub fn new(id: impl Into<String>, name: impl Into<String>, team: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            team: Some(team),
            seat_index: 0,
            is_bot: false,
            user_id: None,
        }
    }

    pub fn bot(id: impl Into<String>, name: impl Into<String>, team: usize) -> Self {
        Self {
            is_bot: true,
            ..Self::new(id, name, team)
        }
    }
}

/// Display-only hand ordering preference. Has no gameplay effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortPreference {
    pub suit_order: [Suit; 4],
    pub rank_ascending: bool,
}

impl Default for SortPreference {
    fn default() -> Self {
        Self {
            suit_order: [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds],
            rank_ascending: false,
        }
    }
}

impl SortPreference {
    pub fn suit_position(&self, suit: Suit) -> usize {
        self.suit_order
            .iter()
            .position(|&s| s == suit)
            .unwrap_or(self.suit_order.len())
    }
}

/// Orders players so team members sit non-adjacently (opposite each other in
/// the classic and polygon layouts) by interleaving teams round-robin.
pub fn arrange_seating(mode: &ModeConfig, players: &[SeatedPlayer]) -> Vec<SeatedPlayer> {
    let mut by_team: Vec<Vec<SeatedPlayer>> = vec![Vec::new(); mode.team_count()];
    let mut unassigned: Vec<SeatedPlayer> = Vec::new();

    for player in players {
        match player.team {
            Some(team) if team < by_team.len() => by_team[team].push(player.clone()),
            _ => unassigned.push(player.clone()),
        }
    }

    let mut seated = Vec::with_capacity(players.len());
    let mut exhausted = false;
    while !exhausted {
        exhausted = true;
        for members in &mut by_team {
            if let Some(player) = members.first().cloned() {
                members.remove(0);
                seated.push(player);
                exhausted = false;
            }
        }
    }
    seated.extend(unassigned);

    for (index, player) in seated.iter_mut().enumerate() {
        player.seat_index = index;
    }
    seated
}

#[cfg(test)]
mod tests {
    use super::{SeatedPlayer, SortPreference, arrange_seating};
    use crate::model::mode::mode_for;
    use crate::model::suit::Suit;

    #[test]
    fn seating_interleaves_partners() {
        let mode = mode_for(4);
        let players = vec![
            SeatedPlayer::new("a", "Ann", 0),
            SeatedPlayer::new("b", "Bob", 0),
            SeatedPlayer::new("c", "Cam", 1),
            SeatedPlayer::new("d", "Dee", 1),
        ];
        let seated = arrange_seating(mode, &players);
        let teams: Vec<_> = seated.iter().map(|p| p.team.unwrap()).collect();
        assert_eq!(teams, vec![0, 1, 0, 1]);
        assert_eq!(seated[2].seat_index, 2);
    }

    #[test]
    fn seating_handles_spoiler_team() {
        let mode = mode_for(5);
        let players = vec![
            SeatedPlayer::new("a", "Ann", 0),
            SeatedPlayer::new("b", "Bob", 0),
            SeatedPlayer::new("c", "Cam", 1),
            SeatedPlayer::new("d", "Dee", 1),
            SeatedPlayer::new("e", "Eve", 2),
        ];
        let seated = arrange_seating(mode, &players);
        assert_eq!(seated.len(), 5);
        let teams: Vec<_> = seated.iter().map(|p| p.team.unwrap()).collect();
        assert_eq!(teams, vec![0, 1, 2, 0, 1]);
    }

    #[test]
    fn default_sort_preference_leads_with_spades() {
        let pref = SortPreference::default();
        assert_eq!(pref.suit_position(Suit::Spades), 0);
        assert!(!pref.rank_ascending);
    }
}
