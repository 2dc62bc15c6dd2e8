//! Entry points for a presentation layer: parse what the user typed, then ask
//! for a label, a ranked category, sampled odds or cached preflop distributions.
//!
//! The engine owns its [`EquityCache`] handle; callers that share a cache
//! across engines pass one in with [`OddsEngine::with_cache`].

use crate::cache::{EquityCache, JsonFileStore};
use crate::cards::Card;
use crate::classifier::{classify, Classification};
use crate::config::{ConfigError, EngineConfig};
use crate::evaluator::{evaluate_holdem, Category, EvalError};
use crate::hand::{validate_holdem, validate_set, Board, HandError, HoleCards, Opponents};
use crate::simulator::{PreflopDistribution, SimulationError, SimulationResult, Simulator};
use std::sync::Arc;

/// Every problem found in one batch of user input, one line each.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .rejected.join("\n"))]
pub struct InputError {
    rejected: Vec<String>,
}

impl InputError {
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Hand(#[from] HandError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A result that needs more known cards than the caller has so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readout<T> {
    Ready(T),
    NotEnoughCards { known: usize },
}

impl<T> Readout<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Readout::Ready(value) => Some(value),
            Readout::NotEnoughCards { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Readout::Ready(_))
    }
}

#[derive(Debug, Clone)]
pub struct OddsEngine {
    config: EngineConfig,
    simulator: Simulator,
    cache: Arc<EquityCache>,
}

impl OddsEngine {
    /// Build an engine from validated settings, warming the cache from
    /// `config.cache_path` when one is set.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let cache = match &config.cache_path {
            Some(path) => EquityCache::open(JsonFileStore::new(path)),
            None => EquityCache::in_memory(),
        };
        Self::with_cache(config, Arc::new(cache))
    }

    pub fn with_cache(config: EngineConfig, cache: Arc<EquityCache>) -> Result<Self, EngineError> {
        config.validate()?;
        let simulator = Simulator::from_config(&config);
        Ok(Self { config, simulator, cache })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<EquityCache> {
        &self.cache
    }

    /// Parse hole and board codes as typed. Blank board entries are skipped.
    /// Every bad code is reported, not just the first.
    ///
    /// ```
    /// use holdem_odds::engine::OddsEngine;
    ///
    /// let (hole, board) = OddsEngine::parse_table(&["As", "kd"], &["Qh", "", "Jc", "Tc", ""]).unwrap();
    /// assert_eq!(hole.first().to_string(), "As");
    /// assert_eq!(board.len(), 3);
    ///
    /// let err = OddsEngine::parse_table(&["Zz", "As"], &["As", "1c", "2c"]).unwrap_err();
    /// assert_eq!(
    ///     err.rejected(),
    ///     [
    ///         "Invalid card: 'Zz' (use e.g. As, Td, 9h)",
    ///         "Invalid card: '1c' (use e.g. As, Td, 9h)",
    ///         "Duplicate cards detected!",
    ///     ]
    /// );
    /// ```
    pub fn parse_table(hole: &[&str], board: &[&str]) -> Result<(HoleCards, Board), InputError> {
        let mut rejected = Vec::new();
        let mut parse = |codes: &[&str]| -> Vec<Card> {
            codes
                .iter()
                .filter(|code| !code.trim().is_empty())
                .filter_map(|code| match code.parse::<Card>() {
                    Ok(card) => Some(card),
                    Err(_) => {
                        rejected.push(format!("Invalid card: '{code}' (use e.g. As, Td, 9h)"));
                        None
                    }
                })
                .collect()
        };
        let hole_cards = parse(hole);
        let board_cards = parse(board);

        let all: Vec<Card> = hole_cards.iter().chain(&board_cards).copied().collect();
        if validate_set(&all).is_err() {
            rejected.push("Duplicate cards detected!".to_string());
        }
        if !rejected.is_empty() {
            return Err(InputError { rejected });
        }

        let hole = HoleCards::from_slice(&hole_cards);
        let board = Board::try_new(board_cards);
        match (hole, board) {
            (Ok(hole), Ok(board)) => Ok((hole, board)),
            (hole, board) => {
                if let Err(HandError::HoleCount(n)) = hole {
                    rejected.push(format!("Select exactly two hole cards (got {n})."));
                }
                if let Err(HandError::InvalidBoardSize(n)) = board {
                    rejected.push(format!("Board must have 0, 3, 4 or 5 cards (got {n})."));
                }
                Err(InputError { rejected })
            }
        }
    }

    /// Label the best hand in hole plus board.
    pub fn analyze(&self, hole: &HoleCards, board: &Board) -> Classification {
        let mut cards = Vec::with_capacity(2 + board.len());
        cards.extend_from_slice(&hole.as_array());
        cards.extend_from_slice(board.as_slice());
        classify(&cards)
    }

    /// Category of the best five-card hand, once a flop is down.
    pub fn evaluate_strength(
        &self,
        hole: &HoleCards,
        board: &Board,
    ) -> Result<Readout<Category>, EngineError> {
        if board.is_empty() {
            return Ok(Readout::NotEnoughCards { known: 2 });
        }
        Ok(Readout::Ready(evaluate_holdem(hole, board)?.category()))
    }

    /// Sampled win/tie/loss against `opponents` random hands.
    pub fn simulate(
        &self,
        hole: &HoleCards,
        board: &Board,
        opponents: Opponents,
        trials: u32,
    ) -> Result<SimulationResult, EngineError> {
        validate_holdem(hole, board)?;
        Ok(self.simulator.simulate(hole, board, opponents, trials)?)
    }

    /// Flop, turn and river category distributions plus river win/tie for
    /// `hole` with no board, served from the cache when a run of at least
    /// `preflop_trials` exists.
    pub fn preflop_distributions(
        &self,
        hole: &HoleCards,
        opponents: Opponents,
    ) -> Result<PreflopDistribution, EngineError> {
        let trials = self.config.preflop_trials;
        let distribution = self
            .cache
            .get_or_compute(hole, opponents, trials, || self.simulator.preflop(hole, opponents, trials))?;
        Ok(distribution)
    }

    /// Persist the cache if it has a backing store. Never fails.
    pub fn flush_cache(&self) -> bool {
        self.cache.flush()
    }
}
