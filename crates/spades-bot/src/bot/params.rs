/// Tunable bot parameters for heuristic bidding and play.
///
/// Extracted from hardcoded magic numbers to enable systematic tuning.
#[derive(Debug, Clone, Copy)]
pub struct BotParams {
    // === Trick Estimation Parameters ===
    /// Expected tricks from the Ace of spades (default: 1.0)
    pub spade_ace: f32,

    /// Expected tricks from the King of spades (default: 0.9)
    pub spade_king: f32,

    /// Queen of spades with 3+ spade backing (default: 0.7)
    pub spade_queen_deep: f32,

    /// Queen of spades with thin backing (default: 0.3)
    pub spade_queen_shallow: f32,

    /// Jack of spades with 4+ spade backing (default: 0.5)
    pub spade_jack_long: f32,

    /// Jack of spades with thin backing (default: 0.3)
    pub spade_jack_short: f32,

    /// Per spade beyond the fourth (default: 0.75)
    pub spade_length_bonus: f32,

    /// Off-suit ace (default: 1.0)
    pub offsuit_ace: f32,

    /// King behind an ace in the same suit (default: 0.8)
    pub chain_king: f32,

    /// Queen behind ace-king in the same suit (default: 0.6)
    pub chain_queen: f32,

    /// Guarded king without the ace (default: 0.5)
    pub lone_king: f32,

    /// Singleton king without the ace (default: 0.3)
    pub lone_king_bare: f32,

    /// Queen in a 3+ card suit without ace or king (default: 0.2)
    pub lone_queen: f32,

    /// Per potential ruff of a void suit, capped at 3 (default: 0.4)
    pub void_ruff: f32,

    /// Ruff credit for a singleton side suit (default: 0.5)
    pub singleton_ruff: f32,

    /// Ruff credit for a doubleton side suit (default: 0.25)
    pub doubleton_ruff: f32,

    // === Disposition Parameters ===
    /// Weight per free trick below the neutral point (default: 0.25)
    pub disposition_free_trick_weight: f32,

    /// Weight per accumulated book on the bot's own team (default: 0.08)
    pub disposition_book_weight: f32,

    /// Weight per master card held (default: 0.12)
    pub disposition_master_weight: f32,

    /// Weight applied to the partner signal (default: 0.5)
    pub disposition_partner_weight: f32,

    /// Opponent trumping a side-suit lead (default: 0.45)
    pub opponent_trump_signal: f32,

    /// Opponent discarding instead of trumping (default: 0.3)
    pub opponent_discard_signal: f32,

    /// Disposition above which the bot plays to set (default: 0.25)
    pub set_threshold: f32,

    /// Disposition below which the bot ducks (default: -0.25)
    pub duck_threshold: f32,

    /// Opponent disposition above which pressure is urgent (default: 0.5)
    pub urgent_threshold: f32,

    // === Strategic Override Parameters ===
    /// Scale on deficit/target when rolling go-for-it stretches (default: 0.6)
    pub go_for_it_scale: f32,

    /// Honor-card ceiling for a nil bid (default: 2; 3 when desperate)
    pub nil_max_honors: u8,
    pub nil_max_honors_desperate: u8,

    /// Low cards (seven or under) required for a nil bid (default: 7; 6 when
    /// desperate)
    pub nil_min_low_cards: u8,
    pub nil_min_low_cards_desperate: u8,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            spade_ace: 1.0,
            spade_king: 0.9,
            spade_queen_deep: 0.7,
            spade_queen_shallow: 0.3,
            spade_jack_long: 0.5,
            spade_jack_short: 0.3,
            spade_length_bonus: 0.75,
            offsuit_ace: 1.0,
            chain_king: 0.8,
            chain_queen: 0.6,
            lone_king: 0.5,
            lone_king_bare: 0.3,
            lone_queen: 0.2,
            void_ruff: 0.4,
            singleton_ruff: 0.5,
            doubleton_ruff: 0.25,
            disposition_free_trick_weight: 0.25,
            disposition_book_weight: 0.08,
            disposition_master_weight: 0.12,
            disposition_partner_weight: 0.5,
            opponent_trump_signal: 0.45,
            opponent_discard_signal: 0.3,
            set_threshold: 0.25,
            duck_threshold: -0.25,
            urgent_threshold: 0.5,
            go_for_it_scale: 0.6,
            nil_max_honors: 2,
            nil_max_honors_desperate: 3,
            nil_min_low_cards: 7,
            nil_min_low_cards_desperate: 6,
        }
    }
}
