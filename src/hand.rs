use crate::cards::{parse_cards, Card, CardParseError};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Largest number of opponents the table supports (ten-handed).
pub const MAX_OPPONENTS: u8 = 9;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
    #[error("board must hold 0, 3, 4 or 5 cards, got {0}")]
    InvalidBoardSize(usize),
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("opponent count must be between 1 and {MAX_OPPONENTS}, got {0}")]
    OpponentCount(usize),
    #[error("card parse error: {0}")]
    CardParse(#[from] CardParseError),
}

/// Fail if any card appears twice in `cards`.
///
/// ```
/// use holdem_odds::cards::parse_cards;
/// use holdem_odds::hand::{validate_set, HandError};
///
/// let cards = parse_cards("As Kd As").unwrap();
/// assert!(matches!(validate_set(&cards), Err(HandError::DuplicateCard(_))));
/// ```
pub fn validate_set(cards: &[Card]) -> Result<(), HandError> {
    let mut seen = 0u64;
    for &card in cards {
        let bit = 1u64 << card.index();
        if seen & bit != 0 {
            return Err(HandError::DuplicateCard(card));
        }
        seen |= bit;
    }
    Ok(())
}

/// A player's two private hole cards.
///
/// ```
/// use holdem_odds::cards::{Card, Rank, Suit};
/// use holdem_odds::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.as_array().len(), 2);
/// ```
///
/// Equality and hashing ignore the order the cards were given in.
#[derive(Debug, Clone, Copy)]
pub struct HoleCards(Card, Card);

impl PartialEq for HoleCards {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for HoleCards {}

impl Hash for HoleCards {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateCard(a));
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match slice {
            [a, b] => Self::try_new(*a, *b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    /// Both cards, higher card first. `{As, Kh}` and `{Kh, As}` canonicalize identically.
    pub fn canonical(&self) -> [Card; 2] {
        if self.0 >= self.1 {
            [self.0, self.1]
        } else {
            [self.1, self.0]
        }
    }
}

impl FromStr for HoleCards {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&parse_cards(s)?)
    }
}

/// Community cards known at a given street: empty (preflop), flop, turn or river.
///
/// ```
/// use holdem_odds::hand::Board;
///
/// let board: Board = "2c 3c 4c".parse().unwrap();
/// assert_eq!(board.len(), 3);
/// assert!("2c 3c".parse::<Board>().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if !matches!(cards.len(), 0 | 3 | 4 | 5) {
            return Err(HandError::InvalidBoardSize(cards.len()));
        }
        validate_set(&cards)?;
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Cards still to come before the river.
    pub fn missing(&self) -> usize {
        5 - self.cards.len()
    }
}

impl FromStr for Board {
    type Err = HandError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_new(parse_cards(s)?)
    }
}

/// Number of opponents facing the hero, 1..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Opponents(u8);

impl Opponents {
    pub fn try_new(count: usize) -> Result<Self, HandError> {
        match u8::try_from(count) {
            Ok(n) if (1..=MAX_OPPONENTS).contains(&n) => Ok(Self(n)),
            _ => Err(HandError::OpponentCount(count)),
        }
    }

    /// Table size including the hero (2..=10 players).
    pub fn from_players(players: usize) -> Result<Self, HandError> {
        Self::try_new(players.saturating_sub(1))
    }

    pub const fn count(self) -> u8 {
        self.0
    }

    pub const fn players(self) -> u8 {
        self.0 + 1
    }
}

/// Ensure hole cards and board form a valid Hold'em state: no card used twice.
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    let mut all = Vec::with_capacity(2 + board.len());
    all.extend_from_slice(&hole.as_array());
    all.extend_from_slice(board.as_slice());
    validate_set(&all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn hole_cards_must_be_distinct() {
        let a = Card::new(Rank::Ace, Suit::Spades);
        assert!(matches!(HoleCards::try_new(a, a), Err(HandError::DuplicateCard(c)) if c == a));
        assert!(matches!(HoleCards::from_slice(&[a]), Err(HandError::HoleCount(1))));
    }

    #[test]
    fn canonical_order_ignores_input_order() {
        let a: HoleCards = "As Kh".parse().unwrap();
        let b: HoleCards = "Kh As".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.canonical(), b.canonical());
        assert_eq!(a.canonical()[0], Card::new(Rank::Ace, Suit::Spades));
        // input order is still kept for display
        assert_eq!(b.first(), Card::new(Rank::King, Suit::Hearts));
        assert_ne!(a, "As Kd".parse::<HoleCards>().unwrap());
    }

    #[test]
    fn swapped_hole_cards_hash_alike() {
        use std::collections::HashSet;
        let set: HashSet<HoleCards> =
            ["As Kh", "Kh As", "Qd Qc", "Qc Qd"].iter().map(|s| s.parse().unwrap()).collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn board_sizes_are_restricted() {
        for n in [1usize, 2, 6] {
            let cards: Vec<Card> = (0..n as u8).filter_map(Card::from_index).collect();
            assert!(matches!(Board::try_new(cards), Err(HandError::InvalidBoardSize(m)) if m == n));
        }
        for n in [0usize, 3, 4, 5] {
            let cards: Vec<Card> = (0..n as u8).filter_map(Card::from_index).collect();
            assert_eq!(Board::try_new(cards).unwrap().missing(), 5 - n);
        }
    }

    #[test]
    fn board_rejects_duplicates() {
        let cards = vec![
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Two, Suit::Clubs),
            Card::new(Rank::Four, Suit::Clubs),
        ];
        assert!(matches!(Board::try_new(cards), Err(HandError::DuplicateCard(_))));
    }

    #[test]
    fn validate_holdem_catches_overlap() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board: Board = "As 2c 3c".parse().unwrap();
        assert!(matches!(
            validate_holdem(&hole, &board),
            Err(HandError::DuplicateCard(c)) if c == Card::new(Rank::Ace, Suit::Spades)
        ));
    }

    #[test]
    fn opponent_bounds() {
        assert!(Opponents::try_new(0).is_err());
        assert!(Opponents::try_new(10).is_err());
        assert_eq!(Opponents::try_new(9).unwrap().players(), 10);
        assert_eq!(Opponents::from_players(2).unwrap().count(), 1);
        assert!(matches!(Opponents::from_players(11), Err(HandError::OpponentCount(10))));
        assert!(Opponents::from_players(1).is_err());
    }
}
