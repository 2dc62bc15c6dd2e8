pub(crate) mod detector;
pub mod profile;

use crate::cards::{Card, Rank, Suit};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;
use profile::CardProfile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

const CAT_SHIFT: u32 = 48;
const RANK_STRIDE: u32 = 6;

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack a category and up to five tiebreak rank values (zero = unused).
    fn from_parts(category: Category, ranks: &[u8; 5]) -> Self {
        // Layout (most significant -> least):
        // [ category (8 bits) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | 18 zero bits ]
        let mut v: u64 = (category.ordinal() as u64) << CAT_SHIFT;
        for (i, r) in ranks.iter().enumerate() {
            v |= (*r as u64) << (CAT_SHIFT - RANK_STRIDE * (i as u32 + 1));
        }
        HandValue(v)
    }
}

/// Poker hand category from weakest to strongest, numbered 1..=9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Category {
    HighCard = 1,
    Pair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
}

const fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

static EXAMPLES: [&[Card]; 9] = [
    &[card(Rank::Ace, Suit::Spades)],
    &[card(Rank::Ace, Suit::Spades), card(Rank::Ace, Suit::Hearts)],
    &[
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ace, Suit::Hearts),
        card(Rank::King, Suit::Spades),
        card(Rank::King, Suit::Hearts),
    ],
    &[card(Rank::Ace, Suit::Spades), card(Rank::Ace, Suit::Hearts), card(Rank::Ace, Suit::Diamonds)],
    &[
        card(Rank::Ace, Suit::Spades),
        card(Rank::King, Suit::Hearts),
        card(Rank::Queen, Suit::Diamonds),
        card(Rank::Jack, Suit::Clubs),
        card(Rank::Ten, Suit::Spades),
    ],
    &[
        card(Rank::Ace, Suit::Spades),
        card(Rank::Jack, Suit::Spades),
        card(Rank::Eight, Suit::Spades),
        card(Rank::Four, Suit::Spades),
        card(Rank::Two, Suit::Spades),
    ],
    &[
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ace, Suit::Hearts),
        card(Rank::Ace, Suit::Diamonds),
        card(Rank::King, Suit::Spades),
        card(Rank::King, Suit::Hearts),
    ],
    &[
        card(Rank::Ace, Suit::Spades),
        card(Rank::Ace, Suit::Hearts),
        card(Rank::Ace, Suit::Diamonds),
        card(Rank::Ace, Suit::Clubs),
    ],
    &[
        card(Rank::Ace, Suit::Spades),
        card(Rank::King, Suit::Spades),
        card(Rank::Queen, Suit::Spades),
        card(Rank::Jack, Suit::Spades),
        card(Rank::Ten, Suit::Spades),
    ],
];

impl Category {
    pub const ALL: [Category; 9] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
    ];

    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn from_ordinal(ordinal: u8) -> Option<Category> {
        if ordinal < 1 || ordinal > 9 {
            return None;
        }
        Some(Category::ALL[(ordinal - 1) as usize])
    }

    /// Zero-based position, for per-category tables.
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }

    /// Representative cards showing what the category looks like.
    pub fn examples(self) -> &'static [Card] {
        EXAMPLES[self.index()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Evaluation result. `value` drives ordering; equal values are ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Evaluation {
    value: HandValue,
}

impl Evaluation {
    /// Return the packed comparable value for ordering/caching.
    pub const fn value(&self) -> HandValue {
        self.value
    }

    pub fn category(&self) -> Category {
        category_of(self.value)
    }
}

/// Category encoded in a hand value, without looking at any cards.
pub fn category_of(value: HandValue) -> Category {
    // Values are only ever packed from a valid Category.
    Category::from_ordinal((value.raw() >> CAT_SHIFT) as u8).unwrap_or(Category::HighCard)
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("need at least 5 cards to evaluate, got {got}")]
    InsufficientCards { got: usize },
    #[error("at most 7 cards can be evaluated, got {0}")]
    TooManyCards(usize),
}

fn evaluate_profile(profile: &CardProfile) -> Evaluation {
    use detector::DETECTORS;

    for detector in DETECTORS.iter() {
        if let Some(tiebreak) = detector.detect(profile) {
            return Evaluation { value: HandValue::from_parts(detector.category(), &tiebreak) };
        }
    }
    unreachable!("HighCard detector should always match")
}

/// Evaluate 5, 6 or 7 cards; with more than five, the best five-card hand counts.
/// Input order does not matter. Cards are assumed distinct.
///
/// ```
/// use holdem_odds::cards::parse_cards;
/// use holdem_odds::evaluator::{evaluate, Category, EvalError};
///
/// let royal = evaluate(&parse_cards("As Ks Qs Js Ts").unwrap()).unwrap();
/// assert_eq!(royal.category(), Category::StraightFlush);
///
/// let short = evaluate(&parse_cards("As Ks").unwrap());
/// assert_eq!(short, Err(EvalError::InsufficientCards { got: 2 }));
/// ```
pub fn evaluate(cards: &[Card]) -> Result<Evaluation, EvalError> {
    match cards.len() {
        n if n < 5 => Err(EvalError::InsufficientCards { got: n }),
        n if n > 7 => Err(EvalError::TooManyCards(n)),
        _ => Ok(evaluate_profile(&CardProfile::new(cards))),
    }
}

/// Evaluate exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    evaluate_profile(&CardProfile::new(cards))
}

/// Evaluate seven cards (two hole cards plus a full board).
pub fn evaluate_seven(cards: &[Card; 7]) -> Evaluation {
    evaluate_profile(&CardProfile::new(cards))
}

/// Evaluate a Hold'em hand given hole cards and a board of 3 to 5 cards.
///
/// ```
/// use holdem_odds::evaluator::{evaluate_holdem, Category};
/// use holdem_odds::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let eval = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(eval.category(), Category::Pair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    let mut cards = Vec::with_capacity(2 + board.len());
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(board.as_slice());
    evaluate(&cards)
}

/// Compare two Hold'em hands on a shared board.
///
/// ```
/// use holdem_odds::evaluator::compare_holdem;
/// use holdem_odds::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare_holdem(&a, &b, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn eval(s: &str) -> Evaluation {
        evaluate(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn card_count_limits() {
        let cards = parse_cards("As Ks Qs Js").unwrap();
        assert_eq!(evaluate(&cards), Err(EvalError::InsufficientCards { got: 4 }));
        let cards = parse_cards("As Ks Qs Js Ts 9s 8s 7s").unwrap();
        assert_eq!(evaluate(&cards), Err(EvalError::TooManyCards(8)));
    }

    #[test]
    fn holdem_needs_a_flop() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let err = evaluate_holdem(&hole, &Board::empty()).unwrap_err();
        assert_eq!(err, EvalError::InsufficientCards { got: 2 });

        let board: Board = "As 2c 3c".parse().unwrap();
        assert!(matches!(evaluate_holdem(&hole, &board), Err(EvalError::InvalidHand(_))));
    }

    #[test]
    fn category_of_reads_the_packed_value() {
        for (s, cat) in [
            ("As Ks Qs Js Ts", Category::StraightFlush),
            ("9c 9d 9h 9s Ac", Category::FourOfAKind),
            ("Tc Td Th 2s 2h", Category::FullHouse),
            ("Ah 9h 7h 3h 2h", Category::Flush),
            ("Ac 2d 3h 4s 5c", Category::Straight),
            ("Qc Qd Qh 9s 2c", Category::ThreeOfAKind),
            ("Jc Jd 9c 9h 2s", Category::TwoPair),
            ("Ah Ad Ts 9c 2d", Category::Pair),
            ("Ah Kd 7s 5c 2d", Category::HighCard),
        ] {
            let e = eval(s);
            assert_eq!(e.category(), cat, "{s}");
            assert_eq!(category_of(e.value()), cat);
        }
    }

    #[test]
    fn kickers_break_ties_within_a_category() {
        assert!(eval("Ah Ad Ks 9c 2d") > eval("Ac As Qs Jc 9d"));
        assert!(eval("Ah Ad Ks 9c 3d") > eval("Ac As Kd 9h 2d"));
        assert_eq!(eval("Ah Ad Ks 9c 2d"), eval("Ac As Kd 9h 2c"));
        assert!(eval("Kh Kd Ks 2c 2d") > eval("Qc Qs Qd Ac Ad"));
    }

    #[test]
    fn wheel_is_the_lowest_straight() {
        let wheel = eval("As 2h 3d 4c 5s");
        let six_high = eval("2s 3h 4d 5c 6s");
        assert_eq!(wheel.category(), Category::Straight);
        assert!(six_high > wheel);
        assert!(wheel > eval("Ks Kh Kd 5c 2s"));
    }

    #[test]
    fn seven_card_hand_uses_best_five() {
        let seven = eval("Ah Kh Qh Jh Th 2c 3d");
        assert_eq!(seven.category(), Category::StraightFlush);
        assert_eq!(seven, eval("Ah Kh Qh Jh Th"));
    }

    #[test]
    fn examples_have_their_own_category() {
        for cat in Category::ALL {
            let cards = cat.examples();
            assert!(!cards.is_empty());
            if cards.len() == 5 {
                assert_eq!(evaluate(cards).unwrap().category(), cat);
            }
        }
    }

    #[test]
    fn ordinals_are_one_based() {
        assert_eq!(Category::HighCard.ordinal(), 1);
        assert_eq!(Category::StraightFlush.ordinal(), 9);
        assert_eq!(Category::from_ordinal(0), None);
        assert_eq!(Category::from_ordinal(5), Some(Category::Straight));
        assert_eq!(Category::Flush.to_string(), "Flush");
    }
}
