use crate::cards::{Card, Rank, Suit};

const ACE_BIT: u16 = 1 << 14;
const ACE_LOW_BIT: u16 = 1 << 1;

/// Bit for `rank` in a rank mask (bit `v` set for rank value `v`).
pub const fn rank_bit(rank: Rank) -> u16 {
    1 << rank.value()
}

/// Rank and suit tallies of a card set. Built once, then shared by every
/// category check.
///
/// Works on any number of cards: category detection reads the whole set
/// instead of enumerating five-card subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardProfile {
    len: usize,
    rank_counts: [u8; 15],
    rank_mask: u16,
    suit_counts: [u8; 4],
    suit_masks: [u16; 4],
}

impl CardProfile {
    pub fn new(cards: &[Card]) -> Self {
        let mut profile = Self {
            len: cards.len(),
            rank_counts: [0; 15],
            rank_mask: 0,
            suit_counts: [0; 4],
            suit_masks: [0; 4],
        };
        for card in cards {
            let bit = rank_bit(card.rank());
            let s = card.suit().index();
            profile.rank_counts[card.rank().value() as usize] += 1;
            profile.rank_mask |= bit;
            profile.suit_counts[s] += 1;
            profile.suit_masks[s] |= bit;
        }
        profile
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn count(&self, rank: Rank) -> u8 {
        self.rank_counts[rank.value() as usize]
    }

    /// Distinct ranks present.
    pub fn rank_mask(&self) -> u16 {
        self.rank_mask
    }

    /// Distinct ranks present in `suit`.
    pub fn suit_mask(&self, suit: Suit) -> u16 {
        self.suit_masks[suit.index()]
    }

    /// Suit holding five or more cards. Seven cards admit at most one.
    pub fn flush_suit(&self) -> Option<Suit> {
        Suit::ALL.into_iter().find(|s| self.suit_counts[s.index()] >= 5)
    }

    /// Highest rank held at least `n` times, skipping `except`.
    pub fn highest_with(&self, n: u8, except: Option<Rank>) -> Option<Rank> {
        Rank::ALL.iter().rev().copied().find(|&r| Some(r) != except && self.count(r) >= n)
    }

    /// Ranks held exactly `n` times, highest first.
    pub fn ranks_with_count(&self, n: u8) -> impl Iterator<Item = Rank> + '_ {
        Rank::ALL.iter().rev().copied().filter(move |&r| self.count(r) == n)
    }
}

/// Top card of the highest five-rank run in `mask`, counting the ace low
/// as well as high (A-2-3-4-5 is a five-high straight).
pub fn straight_top(mask: u16) -> Option<Rank> {
    let mask = if mask & ACE_BIT != 0 { mask | ACE_LOW_BIT } else { mask };
    (5..=14u8)
        .rev()
        .find(|&top| {
            let run = 0b1_1111u16 << (top - 4);
            mask & run == run
        })
        .and_then(Rank::from_value)
}

/// The `n` highest ranks in `mask`, highest first.
pub fn top_ranks(mask: u16, n: usize) -> impl Iterator<Item = Rank> {
    (2..=14u8).rev().filter(move |v| mask & (1 << v) != 0).filter_map(Rank::from_value).take(n)
}
