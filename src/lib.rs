//! holdem-odds: Texas Hold'em equity engine
//!
//! Goals:
//! - Exact hand ranking for 5 to 7 cards, including the wheel
//! - Monte Carlo win/tie odds and hand-category distributions, reproducible under a seed
//! - Cached preflop distributions, optionally persisted between runs
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_odds::cards::{Card, Rank, Suit};
//! use holdem_odds::evaluator::{evaluate_holdem, Category};
//! use holdem_odds::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category(), Category::Pair);
//! ```
//!
//! ## Odds
//! ```
//! use holdem_odds::config::EngineConfig;
//! use holdem_odds::engine::OddsEngine;
//! use holdem_odds::hand::Opponents;
//!
//! let engine = OddsEngine::new(EngineConfig { seed: Some(1), ..EngineConfig::default() }).unwrap();
//! let (hole, board) = OddsEngine::parse_table(&["Ah", "Kh"], &["Qh", "Jh", "Th"]).unwrap();
//! let odds = engine.simulate(&hole, &board, Opponents::from_players(4).unwrap(), 1_000).unwrap();
//! assert_eq!(odds.win_pct(), 100.0);
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --release -- As Kd --board "Qh Jc 2s" --players 4
//! ```

pub mod cache;
pub mod cards;
pub mod classifier;
pub mod config;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod hand;
pub mod simulator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
