use anyhow::{Context, Result};
use clap::Parser;
use holdem_odds::cards::Card;
use holdem_odds::config::EngineConfig;
use holdem_odds::engine::{OddsEngine, Readout};
use holdem_odds::evaluator::Category;
use holdem_odds::hand::{Board, HoleCards, Opponents};
use holdem_odds::simulator::{PreflopDistribution, SimulationResult, Street};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "holdem-odds",
    version,
    about = "Texas Hold'em odds: hand label, win/tie estimate and hand-category distributions",
    long_about = "Estimate a Hold'em hand's chances against random opponent hands.\n\
                  With no board, prints cached flop/turn/river category distributions;\n\
                  with a flop, turn or river, prints the made hand and sampled odds."
)]
struct Args {
    /// Hole cards, e.g. As Kd
    #[arg(num_args = 2, required = true, value_name = "CARD")]
    hole: Vec<String>,

    /// Known community cards (0, 3, 4 or 5), e.g. "Qh Jc 2s"
    #[arg(short, long, default_value = "")]
    board: String,

    /// Players at the table, including you
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=10))]
    players: u8,

    /// Trials when a board is known
    #[arg(short = 'n', long)]
    trials: Option<u32>,

    /// Trials for preflop distributions
    #[arg(long)]
    preflop_trials: Option<u32>,

    /// Seed for reproducible estimates
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file holding cached preflop distributions
    #[arg(long, value_name = "PATH")]
    cache: Option<PathBuf>,

    /// Keep the preflop cache in memory only
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,

    /// JSON config file; flags override its values
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. info, holdem_odds=debug)
    #[arg(long)]
    log_level: Option<String>,

    /// Run trials on the current thread only
    #[arg(long)]
    sequential: bool,
}

impl Args {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_path(path)?,
            None => EngineConfig::default(),
        };
        if let Some(trials) = self.trials {
            config.trials = trials;
        }
        if let Some(trials) = self.preflop_trials {
            config.preflop_trials = trials;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.cache.is_some() {
            config.cache_path = self.cache.clone();
        }
        if self.no_cache {
            config.cache_path = None;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if self.sequential {
            config.parallel = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn pretty(cards: &[Card]) -> String {
    cards.iter().map(|c| c.pretty()).collect::<Vec<_>>().join(" ")
}

fn print_preflop(dist: &PreflopDistribution) {
    println!("Pre-Flop Analysis");
    println!(
        "Odds to win: Win: {:.1}%, Tie: {:.1}% (est. by river)",
        dist.win_pct(),
        dist.tie_pct()
    );
    println!("Possible Hands by Flop, Turn, River:");
    println!("{:<34} {:>7} {:>7} {:>7}", "Hand (Example)", "Flop", "Turn", "River");
    for category in Category::ALL {
        let label = format!("{} ({})", pretty(category.examples()), category);
        let pcts: Vec<String> = Street::ALL
            .iter()
            .map(|&s| format!("{:.1}%", dist.category_pct(s, category)))
            .collect();
        println!("{:<34} {:>7} {:>7} {:>7}", label, pcts[0], pcts[1], pcts[2]);
    }
    println!("Legend: A=Ace, K=King, Q=Queen, J=Jack, T=Ten, ♠♥♦♣=Spades/Hearts/Diamonds/Clubs");
}

fn print_odds(odds: &SimulationResult) {
    println!(
        "Odds to win: Win: {:.1}%, Tie: {:.1}%, Equity: {:.1}% (est.)",
        odds.win_pct(),
        odds.tie_pct(),
        odds.equity_pct()
    );
    if odds.categories.is_some() {
        println!("Possible Hands:");
        for category in Category::ALL {
            let pct = odds.category_pct(category).unwrap_or(0.0);
            println!("  {category}: {pct:.1}%");
        }
    }
}

fn run(engine: &OddsEngine, hole: &HoleCards, board: &Board, opponents: Opponents) -> Result<()> {
    println!("Your hand: {}", pretty(&hole.as_array()));
    if !board.is_empty() {
        println!("Community: {}", pretty(board.as_slice()));
    }
    println!("Players: {}", opponents.players());

    if board.is_empty() {
        let dist = engine.preflop_distributions(hole, opponents)?;
        print_preflop(&dist);
        return Ok(());
    }

    println!("Best hand: {}", engine.analyze(hole, board));
    match engine.evaluate_strength(hole, board)? {
        Readout::Ready(category) => println!("Hand strength: {category}"),
        Readout::NotEnoughCards { .. } => println!("Hand strength: (not enough cards)"),
    }
    let odds = engine.simulate(hole, board, opponents, engine.config().trials)?;
    print_odds(&odds);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = args.engine_config().context("loading configuration")?;
    init_tracing(&config.log_level);

    let hole_codes: Vec<&str> = args.hole.iter().map(String::as_str).collect();
    let board_codes: Vec<&str> =
        args.board.split(|c: char| c.is_whitespace() || c == ',').collect();
    let (hole, board) = OddsEngine::parse_table(&hole_codes, &board_codes)?;
    let opponents = Opponents::from_players(usize::from(args.players))?;

    let engine = OddsEngine::new(config)?;
    let outcome = run(&engine, &hole, &board, opponents);
    engine.flush_cache();
    outcome
}
