use holdem_odds::cards::parse_cards;
use holdem_odds::classifier::classify;
use holdem_odds::evaluator::{evaluate, evaluate_holdem, Category};
use holdem_odds::hand::{Board, HoleCards};

const FIVE_CARD: [(&str, Category, &str); 11] = [
    ("As Ks Qs Js Ts", Category::StraightFlush, "Royal Flush"),
    ("5d 4d 3d 2d Ad", Category::StraightFlush, "Straight Flush"),
    ("9c 9d 9h 9s Ac", Category::FourOfAKind, "Four of a Kind"),
    ("3c 3d 3h Js Jc", Category::FullHouse, "Full House"),
    ("Kh Th 8h 6h 3h", Category::Flush, "Flush"),
    ("Ac Kd Qh Js Tc", Category::Straight, "Straight"),
    ("Ac 5c 4d 3h 2s", Category::Straight, "Straight"),
    ("Qc Qd Qh Ts 2c", Category::ThreeOfAKind, "Three of a Kind"),
    ("Jc Jd 9c 9h 2s", Category::TwoPair, "Two Pair"),
    ("Ah Ad Ts 9c 2d", Category::Pair, "Pair"),
    ("Ah Kd 7s 5c 2d", Category::HighCard, "High Card: A"),
];

#[test]
fn five_card_categories_and_labels() {
    for (cards, category, label) in FIVE_CARD {
        let cards = parse_cards(cards).unwrap();
        assert_eq!(evaluate(&cards).unwrap().category(), category, "{cards:?}");
        let c = classify(&cards);
        assert_eq!(c.category(), Some(category), "{cards:?}");
        assert_eq!(c.label(), label);
    }
}

#[test]
fn categories_are_ordered_by_ordinal() {
    let strongest_first: Vec<_> = FIVE_CARD
        .iter()
        .map(|(cards, _, _)| evaluate(&parse_cards(cards).unwrap()).unwrap())
        .collect();
    for pair in strongest_first.windows(2) {
        assert!(pair[0] > pair[1], "{:?} should beat {:?}", pair[0].category(), pair[1].category());
    }
    for (i, c) in Category::ALL.iter().enumerate() {
        assert_eq!(usize::from(c.ordinal()), i + 1);
    }
}

#[test]
fn royal_on_seven_cards_via_both_paths() {
    let hole: HoleCards = "Ah Kh".parse().unwrap();
    let board: Board = "Qh Jh Th 2c 3d".parse().unwrap();
    let e = evaluate_holdem(&hole, &board).unwrap();
    assert_eq!(e.category(), Category::StraightFlush);

    let all = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
    assert_eq!(classify(&all).category(), Some(Category::StraightFlush));
    assert_eq!(classify(&all).label(), "Royal Flush");
}

#[test]
fn board_plays_for_both_hands() {
    let board: Board = "As Ks Qs Js Ts".parse().unwrap();
    let a: HoleCards = "2c 3d".parse().unwrap();
    let b: HoleCards = "4h 5h".parse().unwrap();
    assert_eq!(evaluate_holdem(&a, &board).unwrap(), evaluate_holdem(&b, &board).unwrap());
}

#[test]
fn turn_boards_evaluate_six_cards() {
    let hole: HoleCards = "7s 7h".parse().unwrap();
    let board: Board = "7d Kc Kd 2s".parse().unwrap();
    assert_eq!(evaluate_holdem(&hole, &board).unwrap().category(), Category::FullHouse);
}

#[test]
fn example_table_covers_every_category() {
    for c in Category::ALL {
        assert!(!c.examples().is_empty(), "{c}");
    }
}
