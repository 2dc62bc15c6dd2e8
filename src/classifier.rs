//! Quick textual label for a fixed set of cards.
//!
//! Reads the flush, straight and rank-count pattern of the whole set at once.
//! It does not produce a comparable strength; use [`crate::evaluator`] for that.

use crate::cards::{Card, Rank};
use crate::evaluator::profile::{straight_top, top_ranks, CardProfile};
use crate::evaluator::Category;
use std::fmt;

pub const NOT_ENOUGH_CARDS: &str = "Not enough cards for hand analysis.";

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Fewer than five cards known. An expected interactive state, not an error.
    NotEnoughCards { have: usize },
    /// `high` is the rank that names the hand: the top of a straight, the rank
    /// of the largest group, or the highest card.
    Made { category: Category, high: Rank },
}

impl Classification {
    pub fn category(&self) -> Option<Category> {
        match self {
            Classification::NotEnoughCards { .. } => None,
            Classification::Made { category, .. } => Some(*category),
        }
    }

    pub fn is_royal_flush(&self) -> bool {
        matches!(
            self,
            Classification::Made { category: Category::StraightFlush, high: Rank::Ace }
        )
    }

    pub fn label(&self) -> String {
        match self {
            Classification::NotEnoughCards { .. } => NOT_ENOUGH_CARDS.to_string(),
            _ if self.is_royal_flush() => "Royal Flush".to_string(),
            Classification::Made { category: Category::HighCard, high } => {
                format!("High Card: {high}")
            }
            Classification::Made { category, .. } => category.name().to_string(),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Classify five or more cards.
///
/// ```
/// use holdem_odds::cards::parse_cards;
/// use holdem_odds::classifier::classify;
///
/// assert_eq!(classify(&parse_cards("As Ks Qs Js Ts").unwrap()).label(), "Royal Flush");
/// assert_eq!(classify(&parse_cards("As 2h 3d 4c 5s").unwrap()).label(), "Straight");
/// assert_eq!(classify(&parse_cards("As 9h 7d 4c 2s").unwrap()).label(), "High Card: A");
/// assert_eq!(
///     classify(&parse_cards("As Kd").unwrap()).label(),
///     "Not enough cards for hand analysis."
/// );
/// ```
pub fn classify(cards: &[Card]) -> Classification {
    if cards.len() < 5 {
        return Classification::NotEnoughCards { have: cards.len() };
    }
    let profile = CardProfile::new(cards);
    let made = |category, high| Classification::Made { category, high };

    let flush = profile.flush_suit().map(|s| profile.suit_mask(s));
    if let Some(top) = flush.and_then(straight_top) {
        return made(Category::StraightFlush, top);
    }

    let quads: Vec<Rank> = profile.ranks_with_count(4).collect();
    let trips: Vec<Rank> = profile.ranks_with_count(3).collect();
    let pairs: Vec<Rank> = profile.ranks_with_count(2).collect();

    if let Some(&quad) = quads.first() {
        return made(Category::FourOfAKind, quad);
    }
    if let Some(&set) = trips.first() {
        // a second set of trips plays as the pair (QQQ444x is a full house),
        // unlike a plain count check that would call it three of a kind
        if trips.len() >= 2 || !pairs.is_empty() {
            return made(Category::FullHouse, set);
        }
    }
    if let Some(top) = flush.and_then(|mask| top_ranks(mask, 1).next()) {
        return made(Category::Flush, top);
    }
    if let Some(top) = straight_top(profile.rank_mask()) {
        return made(Category::Straight, top);
    }
    if let Some(&set) = trips.first() {
        return made(Category::ThreeOfAKind, set);
    }
    match pairs.as_slice() {
        [high, _, ..] => made(Category::TwoPair, *high),
        [pair] => made(Category::Pair, *pair),
        [] => {
            let high = top_ranks(profile.rank_mask(), 1).next().unwrap_or(Rank::Two);
            made(Category::HighCard, high)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn label(s: &str) -> String {
        classify(&parse_cards(s).unwrap()).label()
    }

    #[test]
    fn labels_every_category() {
        assert_eq!(label("9h 8h 7h 6h 5h"), "Straight Flush");
        assert_eq!(label("As Ks Qs Js Ts"), "Royal Flush");
        assert_eq!(label("9c 9d 9h 9s Ac"), "Four of a Kind");
        assert_eq!(label("Tc Td Th 2s 2h"), "Full House");
        assert_eq!(label("Ah 9h 7h 3h 2h"), "Flush");
        assert_eq!(label("Ac 2d 3h 4s 5c"), "Straight");
        assert_eq!(label("Qc Qd Qh 9s 2c"), "Three of a Kind");
        assert_eq!(label("Jc Jd 9c 9h 2s"), "Two Pair");
        assert_eq!(label("Ah Ad Ts 9c 2d"), "Pair");
        assert_eq!(label("Kh Qd 7s 5c 2d"), "High Card: K");
    }

    #[test]
    fn seven_card_sets() {
        assert_eq!(label("Ah Kh Qh Jh Th 2c 3d"), "Royal Flush");
        assert_eq!(label("Qs Qh Qd 4c 4d 4h 2s"), "Full House");
        assert_eq!(label("Ts Th 8d 8c 6s 6h 2c"), "Two Pair");
        assert_eq!(label("9h 8c 7h 6h 5h 2h Kd"), "Flush");
    }

    #[test]
    fn double_trips_label_like_the_evaluator() {
        let cards = parse_cards("Qs Qh Qd 4c 4d 4h 2s").unwrap();
        let c = classify(&cards);
        assert_eq!(c.category(), Some(Category::FullHouse));
        assert_eq!(c.category(), crate::evaluator::evaluate(&cards).ok().map(|e| e.category()));
    }

    #[test]
    fn short_sets_are_informational() {
        let c = classify(&parse_cards("As Kd Qh").unwrap());
        assert_eq!(c, Classification::NotEnoughCards { have: 3 });
        assert_eq!(c.category(), None);
        assert_eq!(c.to_string(), NOT_ENOUGH_CARDS);
    }
}
