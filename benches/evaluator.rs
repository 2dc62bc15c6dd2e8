use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_odds::cards::{parse_cards, Card};
use holdem_odds::evaluator::{evaluate_five, evaluate_seven};
use holdem_odds::hand::{Board, HoleCards, Opponents};
use holdem_odds::simulator::Simulator;

fn five(s: &str) -> [Card; 5] {
    parse_cards(s).unwrap().try_into().unwrap()
}

fn bench_evaluate_five(c: &mut Criterion) {
    let hi = five("Ah Kd 7s 5c 2d");
    let wheel = five("As 2d 3h 4c 5s");
    let sf = five("As Ks Qs Js Ts");

    let mut g = c.benchmark_group("evaluate_five");
    g.bench_with_input(BenchmarkId::new("high_card", "A,K,7,5,2"), &hi, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("straight", "wheel"), &wheel, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("straight_flush", "royal"), &sf, |b, input| {
        b.iter(|| evaluate_five(black_box(input)))
    });
    g.finish();
}

fn bench_evaluate_seven(c: &mut Criterion) {
    let seven: [Card; 7] = parse_cards("As Ah Ks Qs Js Ts 9s").unwrap().try_into().unwrap();
    c.bench_function("evaluate_seven", |b| b.iter(|| evaluate_seven(black_box(&seven))));
}

fn bench_simulate(c: &mut Criterion) {
    let hole: HoleCards = "Ah Kd".parse().unwrap();
    let flop: Board = "Qh Jc 2s".parse().unwrap();
    let sim = Simulator::default().with_seed(42);

    let mut g = c.benchmark_group("simulate_10k");
    for opponents in [1usize, 5, 9] {
        let opp = Opponents::try_new(opponents).unwrap();
        g.bench_with_input(BenchmarkId::new("preflop", opponents), &opp, |b, &opp| {
            b.iter(|| sim.simulate(&hole, &Board::empty(), opp, black_box(10_000)).unwrap())
        });
        g.bench_with_input(BenchmarkId::new("flop", opponents), &opp, |b, &opp| {
            b.iter(|| sim.simulate(&hole, &flop, opp, black_box(10_000)).unwrap())
        });
    }
    g.finish();
}

criterion_group!(benches, bench_evaluate_five, bench_evaluate_seven, bench_simulate);
criterion_main!(benches);
