use super::profile::{rank_bit, straight_top, top_ranks, CardProfile};
use crate::cards::Rank;
use crate::evaluator::Category;
use std::iter;

/// Tiebreak rank values, most significant first, zero-padded.
pub type Tiebreak = [u8; 5];

fn tiebreak(ranks: impl IntoIterator<Item = Rank>) -> Tiebreak {
    let mut out = [0u8; 5];
    for (slot, rank) in out.iter_mut().zip(ranks) {
        *slot = rank.value();
    }
    out
}

/// Strategy pattern: each detector recognizes one category in a card profile
/// and yields the tiebreak ranks of the best five cards making it.
pub trait CategoryDetector: Sync {
    fn category(&self) -> Category;
    fn detect(&self, profile: &CardProfile) -> Option<Tiebreak>;
}

pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> Category {
        Category::StraightFlush
    }

    fn detect(&self, profile: &CardProfile) -> Option<Tiebreak> {
        let suit = profile.flush_suit()?;
        straight_top(profile.suit_mask(suit)).map(|top| tiebreak([top]))
    }
}

pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }

    fn detect(&self, profile: &CardProfile) -> Option<Tiebreak> {
        let quad = profile.highest_with(4, None)?;
        let kicker = top_ranks(profile.rank_mask() & !rank_bit(quad), 1);
        Some(tiebreak(iter::once(quad).chain(kicker)))
    }
}

/// Trips plus a pair. With seven cards the "pair" may be a second set of trips.
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> Category {
        Category::FullHouse
    }

    fn detect(&self, profile: &CardProfile) -> Option<Tiebreak> {
        let trips = profile.highest_with(3, None)?;
        let pair = profile.highest_with(2, Some(trips))?;
        Some(tiebreak([trips, pair]))
    }
}

pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> Category {
        Category::Flush
    }

    fn detect(&self, profile: &CardProfile) -> Option<Tiebreak> {
        let suit = profile.flush_suit()?;
        Some(tiebreak(top_ranks(profile.suit_mask(suit), 5)))
    }
}

pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> Category {
        Category::Straight
    }

    fn detect(&self, profile: &CardProfile) -> Option<Tiebreak> {
        straight_top(profile.rank_mask()).map(|top| tiebreak([top]))
    }
}

pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }

    fn detect(&self, profile: &CardProfile) -> Option<Tiebreak> {
        let trips = profile.highest_with(3, None)?;
        let kickers = top_ranks(profile.rank_mask() & !rank_bit(trips), 2);
        Some(tiebreak(iter::once(trips).chain(kickers)))
    }
}

/// Best two pairs; a third pair's rank can still play as the kicker.
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> Category {
        Category::TwoPair
    }

    fn detect(&self, profile: &CardProfile) -> Option<Tiebreak> {
        let high = profile.highest_with(2, None)?;
        let low = profile.highest_with(2, Some(high))?;
        let kicker = top_ranks(profile.rank_mask() & !rank_bit(high) & !rank_bit(low), 1);
        Some(tiebreak([high, low].into_iter().chain(kicker)))
    }
}

pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn category(&self) -> Category {
        Category::Pair
    }

    fn detect(&self, profile: &CardProfile) -> Option<Tiebreak> {
        let pair = profile.highest_with(2, None)?;
        let kickers = top_ranks(profile.rank_mask() & !rank_bit(pair), 3);
        Some(tiebreak(iter::once(pair).chain(kickers)))
    }
}

pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> Category {
        Category::HighCard
    }

    fn detect(&self, profile: &CardProfile) -> Option<Tiebreak> {
        Some(tiebreak(top_ranks(profile.rank_mask(), 5)))
    }
}

/// Detectors in priority order, strongest category first. The last one always matches.
pub const DETECTORS: [&dyn CategoryDetector; 9] = [
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];
