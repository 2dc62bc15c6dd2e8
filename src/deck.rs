use crate::cards::Card;
use rand::Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("card excluded twice from the deck: {0}")]
    DuplicateExclusion(Card),
    #[error("no cards left to draw")]
    EmptyDeck,
}

/// The cards still unseen during one trial: the 52-card universe minus known cards.
///
/// Draws are uniform and without replacement. A deck is built per trial and
/// thrown away afterwards, so no state carries over between trials.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// ```
    /// use holdem_odds::deck::Deck;
    ///
    /// let deck = Deck::standard();
    /// assert_eq!(deck.len(), 52);
    /// ```
    pub fn standard() -> Self {
        Self { cards: (0..52).filter_map(Card::from_index).collect() }
    }

    /// Build the deck without `excluded`.
    ///
    /// ```
    /// use holdem_odds::cards::parse_cards;
    /// use holdem_odds::deck::{Deck, DeckError};
    ///
    /// let deck = Deck::new(&parse_cards("As Kh").unwrap()).unwrap();
    /// assert_eq!(deck.len(), 50);
    ///
    /// let twice = parse_cards("As As").unwrap();
    /// assert!(matches!(Deck::new(&twice), Err(DeckError::DuplicateExclusion(_))));
    /// ```
    pub fn new(excluded: &[Card]) -> Result<Self, DeckError> {
        let mut mask = 0u64;
        for &card in excluded {
            let bit = 1u64 << card.index();
            if mask & bit != 0 {
                return Err(DeckError::DuplicateExclusion(card));
            }
            mask |= bit;
        }
        let cards = (0..52u8)
            .filter(|i| mask & (1u64 << i) == 0)
            .filter_map(Card::from_index)
            .collect();
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Remove and return a uniformly chosen card. Swap-remove keeps this O(1).
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Card, DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::EmptyDeck);
        }
        let i = rng.random_range(0..self.cards.len());
        Ok(self.cards.swap_remove(i))
    }

    /// Fill `out` with fresh draws.
    pub fn draw_into<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        out: &mut [Card],
    ) -> Result<(), DeckError> {
        for slot in out.iter_mut() {
            *slot = self.draw(rng)?;
        }
        Ok(())
    }
}
