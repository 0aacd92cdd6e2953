//! Property-based тесты оценщика рук (proptest).
//!
//! Проверяем, что порядок рук – корректный полный предпорядок
//! (и на случайных руках, и внутри каждой категории)
//! и что выбор лучшей пятёрки действительно выбирает максимум.

use std::cmp::Ordering;

use holdem_engine::domain::card::{Card, Rank, Suit};
use holdem_engine::domain::deck::Deck;
use holdem_engine::eval::{best_hand, classify, compare_hands, evaluate_five, HandCategory};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::sample::{select, subsequence};
use proptest::test_runner::TestCaseError;

fn all_cards() -> Vec<Card> {
    Deck::standard_52().remaining().to_vec()
}

// n разных карт в случайном порядке.
fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    subsequence(all_cards(), n).prop_shuffle()
}

fn five_cards() -> impl Strategy<Value = Vec<Card>> {
    distinct_cards(5)
}

/// Рука из групп одного ранга: `sizes = [2, 1, 1, 1]` – пара и три кикера.
/// Ранги групп разные, масти внутри группы разные.
fn grouped_hand(sizes: &'static [usize]) -> impl Strategy<Value = Vec<Card>> {
    let suits: Vec<_> = sizes
        .iter()
        .map(|&k| subsequence(Suit::ALL.to_vec(), k))
        .collect();
    (subsequence(Rank::ALL.to_vec(), sizes.len()).prop_shuffle(), suits).prop_map(|(ranks, suits)| {
        ranks
            .into_iter()
            .zip(suits)
            .flat_map(|(rank, suits)| suits.into_iter().map(move |suit| Card::new(rank, suit)))
            .collect::<Vec<Card>>()
    })
}

/// Пять рангов подряд до `top` включительно; при `top = 5` туз идёт снизу.
fn run_to(top: u8) -> Vec<Rank> {
    (top - 4..=top)
        .map(|v| if v == 1 { Rank::Ace } else { Rank::from_value(v).unwrap() })
        .collect()
}

fn straight_hand(tops: std::ops::RangeInclusive<u8>, one_suit: bool) -> BoxedStrategy<Vec<Card>> {
    let suits = if one_suit {
        select(Suit::ALL.to_vec()).prop_map(|s| vec![s; 5]).boxed()
    } else {
        vec(select(Suit::ALL.to_vec()), 5).boxed()
    };
    (tops, suits)
        .prop_map(|(top, suits)| {
            run_to(top)
                .into_iter()
                .zip(suits)
                .map(|(rank, suit)| Card::new(rank, suit))
                .collect::<Vec<Card>>()
        })
        .boxed()
}

/// Случайная рука заданной категории.
fn hand_of(category: HandCategory) -> BoxedStrategy<Vec<Card>> {
    let raw = match category {
        HandCategory::HighCard => grouped_hand(&[1, 1, 1, 1, 1]).boxed(),
        HandCategory::OnePair => grouped_hand(&[2, 1, 1, 1]).boxed(),
        HandCategory::TwoPair => grouped_hand(&[2, 2, 1]).boxed(),
        HandCategory::ThreeOfAKind => grouped_hand(&[3, 1, 1]).boxed(),
        HandCategory::Straight => straight_hand(5..=14, false),
        HandCategory::Flush => (subsequence(Rank::ALL.to_vec(), 5), select(Suit::ALL.to_vec()))
            .prop_map(|(ranks, suit)| ranks.into_iter().map(|r| Card::new(r, suit)).collect::<Vec<Card>>())
            .boxed(),
        HandCategory::FullHouse => grouped_hand(&[3, 2]).boxed(),
        HandCategory::FourOfAKind => grouped_hand(&[4, 1]).boxed(),
        HandCategory::StraightFlush => straight_hand(5..=13, true),
        HandCategory::RoyalFlush | HandCategory::FiveOfAKind => straight_hand(14..=14, true),
    };
    // Случайные масти и ранги иногда дают флеш или стрит – такие руки отбрасываем.
    raw.prop_filter("рука другой категории", move |cards| {
        classify(cards).map(|c| c == category).unwrap_or(false)
    })
    .boxed()
}

fn triple_of(category: HandCategory) -> impl Strategy<Value = (Vec<Card>, Vec<Card>, Vec<Card>)> {
    (hand_of(category), hand_of(category), hand_of(category))
}

/// Антисимметричность, транзитивность и согласие с ключами
/// для трёх рук одной категории.
fn ordering_holds(a: &[Card], b: &[Card], c: &[Card]) -> Result<(), TestCaseError> {
    let ab = compare_hands(a, b).unwrap();
    let ba = compare_hands(b, a).unwrap();
    let bc = compare_hands(b, c).unwrap();
    let ac = compare_hands(a, c).unwrap();
    prop_assert_eq!(ab, ba.reverse());

    if ab != Ordering::Greater && bc != Ordering::Greater {
        prop_assert_ne!(ac, Ordering::Greater);
    }
    if ab == Ordering::Equal && bc == Ordering::Equal {
        prop_assert_eq!(ac, Ordering::Equal);
    }

    // Внутри категории порядок задают только ключи.
    let (ra, rb) = (evaluate_five(a).unwrap(), evaluate_five(b).unwrap());
    prop_assert_eq!(ra.category(), rb.category());
    prop_assert_eq!(ab, ra.keys().cmp(&rb.keys()));
    Ok(())
}

proptest! {
    #[test]
    fn rank_does_not_depend_on_card_order(cards in five_cards()) {
        let mut reordered = cards.clone();
        reordered.reverse();
        reordered.rotate_left(2);

        prop_assert_eq!(
            evaluate_five(&cards).unwrap(),
            evaluate_five(&reordered).unwrap()
        );
    }

    #[test]
    fn hand_never_beats_itself(cards in five_cards()) {
        prop_assert_eq!(compare_hands(&cards, &cards).unwrap(), Ordering::Equal);
    }

    #[test]
    fn comparison_is_antisymmetric(a in five_cards(), b in five_cards()) {
        let ab = compare_hands(&a, &b).unwrap();
        let ba = compare_hands(&b, &a).unwrap();
        prop_assert_eq!(ab, ba.reverse());
    }

    #[test]
    fn comparison_is_transitive(a in five_cards(), b in five_cards(), c in five_cards()) {
        let ab = compare_hands(&a, &b).unwrap();
        let bc = compare_hands(&b, &c).unwrap();
        if ab != Ordering::Greater && bc != Ordering::Greater {
            prop_assert_ne!(compare_hands(&a, &c).unwrap(), Ordering::Greater);
        }
    }

    #[test]
    fn ties_agree_on_category_and_keys(a in five_cards(), b in five_cards()) {
        let ra = evaluate_five(&a).unwrap();
        let rb = evaluate_five(&b).unwrap();
        if ra == rb {
            prop_assert_eq!(ra.category(), rb.category());
            prop_assert_eq!(ra.keys(), rb.keys());
        }
        prop_assert_ne!(ra.category(), HandCategory::FiveOfAKind);
    }

    #[test]
    fn best_hand_is_the_maximum_of_all_fives(cards in distinct_cards(7)) {
        let mut community = [None; 5];
        for (slot, card) in community.iter_mut().zip(&cards[..5]) {
            *slot = Some(*card);
        }
        let hole = [Some(cards[5]), Some(cards[6])];

        let best = best_hand(&community, &hole).unwrap();
        prop_assert_eq!(evaluate_five(&best.cards).unwrap(), best.rank);
        for card in best.cards {
            prop_assert!(cards.contains(&card));
        }

        for skip_a in 0..7 {
            for skip_b in (skip_a + 1)..7 {
                let five: Vec<Card> = cards
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip_a && *i != skip_b)
                    .map(|(_, c)| *c)
                    .collect();
                prop_assert!(evaluate_five(&five).unwrap() <= best.rank);
            }
        }
    }
}

proptest! {
    #[test]
    fn high_card_ordering((a, b, c) in triple_of(HandCategory::HighCard)) {
        ordering_holds(&a, &b, &c)?;
    }

    #[test]
    fn one_pair_ordering((a, b, c) in triple_of(HandCategory::OnePair)) {
        ordering_holds(&a, &b, &c)?;
    }

    #[test]
    fn two_pair_ordering((a, b, c) in triple_of(HandCategory::TwoPair)) {
        ordering_holds(&a, &b, &c)?;
    }

    #[test]
    fn three_of_a_kind_ordering((a, b, c) in triple_of(HandCategory::ThreeOfAKind)) {
        ordering_holds(&a, &b, &c)?;
    }

    #[test]
    fn straight_ordering((a, b, c) in triple_of(HandCategory::Straight)) {
        ordering_holds(&a, &b, &c)?;
        let high = evaluate_five(&a).unwrap().straight_high().unwrap();
        prop_assert!(high >= Rank::Five);
    }

    #[test]
    fn flush_ordering((a, b, c) in triple_of(HandCategory::Flush)) {
        ordering_holds(&a, &b, &c)?;
    }

    #[test]
    fn full_house_ordering((a, b, c) in triple_of(HandCategory::FullHouse)) {
        ordering_holds(&a, &b, &c)?;
    }

    #[test]
    fn four_of_a_kind_ordering((a, b, c) in triple_of(HandCategory::FourOfAKind)) {
        ordering_holds(&a, &b, &c)?;
    }

    #[test]
    fn straight_flush_ordering((a, b, c) in triple_of(HandCategory::StraightFlush)) {
        ordering_holds(&a, &b, &c)?;
        // Старшая карта решает всё: у колеса она – пятёрка.
        let (ra, rb) = (evaluate_five(&a).unwrap(), evaluate_five(&b).unwrap());
        prop_assert_eq!(ra.cmp(&rb), ra.straight_high().cmp(&rb.straight_high()));
    }

    #[test]
    fn royal_flushes_always_tie((a, b, c) in triple_of(HandCategory::RoyalFlush)) {
        ordering_holds(&a, &b, &c)?;
        prop_assert_eq!(compare_hands(&a, &b).unwrap(), Ordering::Equal);
    }
}
