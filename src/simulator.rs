//! Monte Carlo equity and hand-category estimates.
//!
//! Every trial builds its own [`Deck`] from the known cards, completes the
//! board, deals each opponent two cards and compares the hero's best hand
//! against the strongest opponent. Trials are grouped into fixed-size chunks;
//! chunk `i` draws from a ChaCha stream `i` of the base seed, so a seeded run
//! gives the same counts whether chunks run in parallel or not.

use crate::cards::Card;
use crate::config::EngineConfig;
use crate::deck::{Deck, DeckError};
use crate::evaluator::{evaluate, evaluate_seven, Category, EvalError, Evaluation};
use crate::hand::{Board, HoleCards, Opponents};
use core::cmp::Ordering;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimulationError {
    #[error("trial count must be at least 1")]
    NoTrials,
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Occurrences of each hand category, indexed by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts([u64; 9]);

impl CategoryCounts {
    pub fn record(&mut self, category: Category) {
        self.0[category.index()] += 1;
    }

    pub fn get(&self, category: Category) -> u64 {
        self.0[category.index()]
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// `100 * count / trials`; zero when nothing was sampled.
    pub fn percent(&self, category: Category, trials: u64) -> f64 {
        percent(self.get(category), trials)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    fn merge(&mut self, other: &CategoryCounts) {
        for (a, b) in self.0.iter_mut().zip(other.0) {
            *a += b;
        }
    }
}

fn percent(count: u64, trials: u64) -> f64 {
    if trials == 0 {
        0.0
    } else {
        100.0 * count as f64 / trials as f64
    }
}

/// Board stage at which the hero's hand is categorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Street {
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 3] = [Street::Flop, Street::Turn, Street::River];

    pub const fn name(self) -> &'static str {
        match self {
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        }
    }
}

/// Aggregate outcome of one batch of trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationResult {
    pub trials: u64,
    pub opponents: u8,
    pub wins: u64,
    pub ties: u64,
    pub losses: u64,
    /// The hero's final hand category per trial, when tracked.
    pub categories: Option<CategoryCounts>,
}

impl SimulationResult {
    pub fn win_pct(&self) -> f64 {
        percent(self.wins, self.trials)
    }

    pub fn tie_pct(&self) -> f64 {
        percent(self.ties, self.trials)
    }

    pub fn loss_pct(&self) -> f64 {
        percent(self.losses, self.trials)
    }

    /// Win share plus ties split evenly across the table.
    pub fn equity_pct(&self) -> f64 {
        self.win_pct() + self.tie_pct() / f64::from(self.opponents + 1)
    }

    pub fn category_pct(&self, category: Category) -> Option<f64> {
        self.categories.map(|c| c.percent(category, self.trials))
    }
}

/// Street-by-street category distribution and river win/tie counts for a
/// hand with no board yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreflopDistribution {
    pub trials: u64,
    pub opponents: u8,
    pub wins: u64,
    pub ties: u64,
    pub flop: CategoryCounts,
    pub turn: CategoryCounts,
    pub river: CategoryCounts,
}

impl PreflopDistribution {
    pub fn street(&self, street: Street) -> &CategoryCounts {
        match street {
            Street::Flop => &self.flop,
            Street::Turn => &self.turn,
            Street::River => &self.river,
        }
    }

    pub fn category_pct(&self, street: Street, category: Category) -> f64 {
        self.street(street).percent(category, self.trials)
    }

    pub fn win_pct(&self) -> f64 {
        percent(self.wins, self.trials)
    }

    pub fn tie_pct(&self) -> f64 {
        percent(self.ties, self.trials)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    wins: u64,
    ties: u64,
    losses: u64,
    flop: CategoryCounts,
    turn: CategoryCounts,
    river: CategoryCounts,
}

impl Tally {
    /// Hero against the strongest opponent; equal to it is a tie however
    /// many opponents share that value.
    fn record_showdown(&mut self, hero: Evaluation, strongest: Option<Evaluation>) {
        match strongest.map_or(Ordering::Greater, |opp| hero.cmp(&opp)) {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal => self.ties += 1,
            Ordering::Less => self.losses += 1,
        }
    }

    fn merged(mut self, other: Tally) -> Tally {
        self.wins += other.wins;
        self.ties += other.ties;
        self.losses += other.losses;
        self.flop.merge(&other.flop);
        self.turn.merge(&other.turn);
        self.river.merge(&other.river);
        self
    }
}

/// Deal two cards to each opponent from `deck` and evaluate them on the
/// completed board in `table[2..]`.
fn strongest_opponent<R: Rng + ?Sized>(
    deck: &mut Deck,
    rng: &mut R,
    table: &[Card; 7],
    opponents: Opponents,
) -> Result<Option<Evaluation>, DeckError> {
    let mut hand = *table;
    let mut best = None;
    for _ in 0..opponents.count() {
        deck.draw_into(rng, &mut hand[..2])?;
        best = best.max(Some(evaluate_seven(&hand)));
    }
    Ok(best)
}

/// Runs trial batches. Cheap to construct; holds no per-query state.
#[derive(Debug, Clone)]
pub struct Simulator {
    seed: Option<u64>,
    chunk_size: u32,
    parallel: bool,
    track_categories: bool,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl Simulator {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            seed: config.seed,
            chunk_size: config.chunk_size.max(1),
            parallel: config.parallel,
            track_categories: true,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Whether [`Simulator::simulate`] fills [`SimulationResult::categories`].
    pub fn with_categories(mut self, track: bool) -> Self {
        self.track_categories = track;
        self
    }

    /// Estimate win/tie/loss for `hole` on a board of 0, 3, 4 or 5 known cards.
    ///
    /// Inputs are trusted: hole and board must not share cards.
    ///
    /// ```
    /// use holdem_odds::hand::{Board, HoleCards, Opponents};
    /// use holdem_odds::simulator::Simulator;
    ///
    /// let hole: HoleCards = "Ah Kh".parse().unwrap();
    /// let board: Board = "Qh Jh Th 2c 3d".parse().unwrap();
    /// let sim = Simulator::default().with_seed(1);
    /// let result = sim.simulate(&hole, &board, Opponents::try_new(3).unwrap(), 200).unwrap();
    /// assert_eq!(result.wins, 200);
    /// ```
    pub fn simulate(
        &self,
        hole: &HoleCards,
        board: &Board,
        opponents: Opponents,
        trials: u32,
    ) -> Result<SimulationResult, SimulationError> {
        let started = Instant::now();
        let mut known = Vec::with_capacity(7);
        known.extend_from_slice(&hole.as_array());
        known.extend_from_slice(board.as_slice());
        let mut table = [hole.first(); 7];
        table[..known.len()].copy_from_slice(&known);
        let first_unknown = known.len();
        let track = self.track_categories;

        let tally = self.run(trials, |rng, tally| {
            let mut deck = Deck::new(&known)?;
            let mut cards = table;
            deck.draw_into(rng, &mut cards[first_unknown..])?;
            let hero = evaluate_seven(&cards);
            let strongest = strongest_opponent(&mut deck, rng, &cards, opponents)?;
            tally.record_showdown(hero, strongest);
            if track {
                tally.river.record(hero.category());
            }
            Ok(())
        })?;

        let result = SimulationResult {
            trials: u64::from(trials),
            opponents: opponents.count(),
            wins: tally.wins,
            ties: tally.ties,
            losses: tally.losses,
            categories: track.then_some(tally.river),
        };
        tracing::debug!(
            trials,
            opponents = opponents.count(),
            board = board.len(),
            win_pct = result.win_pct(),
            tie_pct = result.tie_pct(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "simulation finished"
        );
        Ok(result)
    }

    /// Sample whole deals from an empty board, recording the hero's category
    /// on the flop, turn and river of the same deal plus the river showdown.
    pub fn preflop(
        &self,
        hole: &HoleCards,
        opponents: Opponents,
        trials: u32,
    ) -> Result<PreflopDistribution, SimulationError> {
        let started = Instant::now();
        let known = hole.as_array();

        let tally = self.run(trials, |rng, tally| {
            let mut deck = Deck::new(&known)?;
            let mut cards = [known[0]; 7];
            cards[1] = known[1];
            deck.draw_into(rng, &mut cards[2..5])?;
            tally.flop.record(evaluate(&cards[..5])?.category());
            cards[5] = deck.draw(rng)?;
            tally.turn.record(evaluate(&cards[..6])?.category());
            cards[6] = deck.draw(rng)?;
            let hero = evaluate_seven(&cards);
            tally.river.record(hero.category());
            let strongest = strongest_opponent(&mut deck, rng, &cards, opponents)?;
            tally.record_showdown(hero, strongest);
            Ok(())
        })?;

        tracing::debug!(
            trials,
            opponents = opponents.count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "preflop distribution finished"
        );
        Ok(PreflopDistribution {
            trials: u64::from(trials),
            opponents: opponents.count(),
            wins: tally.wins,
            ties: tally.ties,
            flop: tally.flop,
            turn: tally.turn,
            river: tally.river,
        })
    }

    fn run<F>(&self, trials: u32, trial: F) -> Result<Tally, SimulationError>
    where
        F: Fn(&mut ChaCha8Rng, &mut Tally) -> Result<(), SimulationError> + Sync,
    {
        if trials == 0 {
            return Err(SimulationError::NoTrials);
        }
        let base = self.seed.unwrap_or_else(|| rand::rng().random());
        let chunk = self.chunk_size;
        let chunks = (trials - 1) / chunk + 1;

        let run_chunk = |i: u32| -> Result<Tally, SimulationError> {
            let mut rng = ChaCha8Rng::seed_from_u64(base);
            rng.set_stream(u64::from(i));
            let mut tally = Tally::default();
            for _ in 0..chunk.min(trials - i * chunk) {
                trial(&mut rng, &mut tally)?;
            }
            Ok(tally)
        };

        if self.parallel {
            (0..chunks)
                .into_par_iter()
                .map(run_chunk)
                .try_reduce(Tally::default, |a, b| Ok(a.merged(b)))
        } else {
            (0..chunks).map(run_chunk).try_fold(Tally::default(), |acc, t| t.map(|t| acc.merged(t)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opp(n: usize) -> Opponents {
        Opponents::try_new(n).unwrap()
    }

    #[test]
    fn zero_trials_is_rejected() {
        let hole: HoleCards = "As Ad".parse().unwrap();
        let sim = Simulator::default().with_seed(1);
        let err = sim.simulate(&hole, &Board::empty(), opp(1), 0).unwrap_err();
        assert_eq!(err, SimulationError::NoTrials);
        assert_eq!(sim.preflop(&hole, opp(1), 0).unwrap_err(), SimulationError::NoTrials);
    }

    #[test]
    fn outcomes_cover_every_trial() {
        let hole: HoleCards = "7c 2d".parse().unwrap();
        let board: Board = "Kh 9s 4d".parse().unwrap();
        let r = Simulator::default().with_seed(3).simulate(&hole, &board, opp(4), 1_000).unwrap();
        assert_eq!(r.wins + r.ties + r.losses, 1_000);
        assert_eq!(r.categories.unwrap().total(), 1_000);
        let sum = r.win_pct() + r.tie_pct() + r.loss_pct();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn results_do_not_depend_on_parallelism() {
        let hole: HoleCards = "Qs Jh".parse().unwrap();
        let sim = Simulator::default().with_seed(99).with_chunk_size(64);
        let a = sim.clone().with_parallel(true).simulate(&hole, &Board::empty(), opp(2), 1_000).unwrap();
        let b = sim.with_parallel(false).simulate(&hole, &Board::empty(), opp(2), 1_000).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn royal_board_always_ties() {
        let hole: HoleCards = "2c 3d".parse().unwrap();
        let board: Board = "As Ks Qs Js Ts".parse().unwrap();
        let r = Simulator::default().with_seed(5).simulate(&hole, &board, opp(5), 300).unwrap();
        assert_eq!(r.ties, 300);
        assert_eq!(r.category_pct(Category::StraightFlush), Some(100.0));
    }

    #[test]
    fn untracked_categories_are_absent() {
        let hole: HoleCards = "As Kd".parse().unwrap();
        let sim = Simulator::default().with_seed(8).with_categories(false);
        let r = sim.simulate(&hole, &Board::empty(), opp(1), 50).unwrap();
        assert_eq!(r.categories, None);
        assert_eq!(r.category_pct(Category::Pair), None);
    }

    #[test]
    fn preflop_streets_each_count_every_trial() {
        let hole: HoleCards = "8h 8d".parse().unwrap();
        let d = Simulator::default().with_seed(11).preflop(&hole, opp(2), 2_000).unwrap();
        for street in Street::ALL {
            assert_eq!(d.street(street).total(), 2_000);
            // A pocket pair never shows as high card.
            assert_eq!(d.street(street).get(Category::HighCard), 0);
        }
        assert!(d.wins + d.ties <= 2_000);
    }

    #[test]
    fn equity_splits_ties_across_the_table() {
        let r = SimulationResult {
            trials: 100,
            opponents: 1,
            wins: 40,
            ties: 20,
            losses: 40,
            categories: None,
        };
        assert!((r.equity_pct() - 50.0).abs() < 1e-9);
    }
}
