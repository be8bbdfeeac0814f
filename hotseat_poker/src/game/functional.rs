//! Hand evaluation.

use super::entities::{Card, Rank, SubHand, Value};

/// Sort cards by value, highest first. Evaluation doesn't need this but it
/// keeps hands stable for display.
pub fn prepare_hand(cards: &mut [Card]) {
    cards.sort_unstable_by(|a, b| b.cmp(a));
}

/// Return the best hand that can be made from `cards`. With more than five
/// cards every five card combination is ranked and the strongest kept.
#[must_use]
pub fn eval(cards: &[Card]) -> SubHand {
    if cards.len() <= 5 {
        return eval_subset(cards);
    }
    let n = cards.len();
    let mut best: Option<SubHand> = None;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let hand = eval_subset(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if best.as_ref().is_none_or(|best| hand > *best) {
                            best = Some(hand);
                        }
                    }
                }
            }
        }
    }
    best.unwrap_or_else(|| eval_subset(&cards[..5]))
}

/// Indices of the hands tied for the best.
#[must_use]
pub fn argmax(hands: &[SubHand]) -> Vec<usize> {
    let Some(best) = hands.iter().max() else {
        return Vec::new();
    };
    hands
        .iter()
        .enumerate()
        .filter(|(_, hand)| *hand == best)
        .map(|(idx, _)| idx)
        .collect()
}

fn eval_subset(cards: &[Card]) -> SubHand {
    let mut values: Vec<Value> = cards.iter().map(|card| card.0).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    // Group equal values, biggest group first, then by value.
    let mut groups: Vec<(usize, Value)> = Vec::with_capacity(5);
    for value in &values {
        match groups.iter_mut().find(|(_, v)| v == value) {
            Some((count, _)) => *count += 1,
            None => groups.push((1, *value)),
        }
    }
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let grouped: Vec<Value> = groups.iter().map(|(_, value)| *value).collect();

    let is_flush = cards.len() == 5 && cards.iter().all(|card| card.1 == cards[0].1);
    let straight_high = if cards.len() == 5 && groups.len() == 5 {
        if values[0] - values[4] == 4 {
            Some(values[0])
        } else if values == [14, 5, 4, 3, 2] {
            Some(5)
        } else {
            None
        }
    } else {
        None
    };

    let counts: Vec<usize> = groups.iter().map(|(count, _)| *count).collect();
    match (straight_high, is_flush, counts.as_slice()) {
        (Some(high), true, _) => SubHand {
            rank: Rank::StraightFlush,
            values: vec![high],
        },
        (_, _, [4, ..]) => SubHand {
            rank: Rank::FourOfAKind,
            values: grouped,
        },
        (_, _, [3, 2]) => SubHand {
            rank: Rank::FullHouse,
            values: grouped,
        },
        (_, true, _) => SubHand {
            rank: Rank::Flush,
            values,
        },
        (Some(high), false, _) => SubHand {
            rank: Rank::Straight,
            values: vec![high],
        },
        (_, _, [3, ..]) => SubHand {
            rank: Rank::ThreeOfAKind,
            values: grouped,
        },
        (_, _, [2, 2, ..]) => SubHand {
            rank: Rank::TwoPair,
            values: grouped,
        },
        (_, _, [2, ..]) => SubHand {
            rank: Rank::OnePair,
            values: grouped,
        },
        _ => SubHand {
            rank: Rank::HighCard,
            values,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Suit;

    fn cards(codes: &[(Value, Suit)]) -> Vec<Card> {
        codes.iter().map(|(v, s)| Card(*v, *s)).collect()
    }

    #[test]
    fn test_eval_ranks() {
        use Suit::*;
        let cases = [
            (cards(&[(2, Club), (7, Spade), (9, Heart), (11, Club), (13, Diamond)]), Rank::HighCard),
            (cards(&[(2, Club), (2, Spade), (9, Heart), (11, Club), (13, Diamond)]), Rank::OnePair),
            (cards(&[(2, Club), (2, Spade), (9, Heart), (9, Club), (13, Diamond)]), Rank::TwoPair),
            (cards(&[(9, Club), (9, Spade), (9, Heart), (11, Club), (13, Diamond)]), Rank::ThreeOfAKind),
            (cards(&[(5, Club), (6, Spade), (7, Heart), (8, Club), (9, Diamond)]), Rank::Straight),
            (cards(&[(2, Heart), (7, Heart), (9, Heart), (11, Heart), (13, Heart)]), Rank::Flush),
            (cards(&[(9, Club), (9, Spade), (9, Heart), (13, Club), (13, Diamond)]), Rank::FullHouse),
            (cards(&[(9, Club), (9, Spade), (9, Heart), (9, Diamond), (13, Diamond)]), Rank::FourOfAKind),
            (cards(&[(5, Spade), (6, Spade), (7, Spade), (8, Spade), (9, Spade)]), Rank::StraightFlush),
        ];
        for (hand, rank) in cases {
            assert_eq!(eval(&hand).rank, rank, "{hand:?}");
        }
    }

    #[test]
    fn test_wheel_is_five_high_straight() {
        use Suit::*;
        let wheel = cards(&[(14, Club), (2, Spade), (3, Heart), (4, Club), (5, Diamond)]);
        let six_high = cards(&[(6, Club), (2, Spade), (3, Heart), (4, Club), (5, Diamond)]);
        let wheel = eval(&wheel);
        assert_eq!(wheel.rank, Rank::Straight);
        assert_eq!(wheel.values, vec![5]);
        assert!(eval(&six_high) > wheel);
    }

    #[test]
    fn test_best_of_seven() {
        use Suit::*;
        // Board pairs the hole card and also offers a flush.
        let hand = cards(&[
            (14, Heart),
            (3, Heart),
            (14, Club),
            (8, Heart),
            (10, Heart),
            (2, Heart),
            (7, Spade),
        ]);
        let best = eval(&hand);
        assert_eq!(best.rank, Rank::Flush);
        assert_eq!(best.values, vec![14, 10, 8, 3, 2]);
    }

    #[test]
    fn test_kickers_break_ties() {
        use Suit::*;
        let strong = cards(&[(9, Club), (9, Spade), (14, Heart), (4, Club), (3, Diamond)]);
        let weak = cards(&[(9, Heart), (9, Diamond), (13, Heart), (4, Spade), (3, Club)]);
        assert!(eval(&strong) > eval(&weak));
    }

    #[test]
    fn test_argmax_reports_ties() {
        use Suit::*;
        let a = eval(&cards(&[(9, Club), (9, Spade), (14, Heart), (4, Club), (3, Diamond)]));
        let b = eval(&cards(&[(9, Heart), (9, Diamond), (14, Spade), (4, Spade), (3, Club)]));
        let c = eval(&cards(&[(2, Heart), (7, Diamond), (14, Club), (4, Heart), (3, Heart)]));
        assert_eq!(argmax(&[a, c, b]), vec![0, 2]);
        assert!(argmax(&[]).is_empty());
    }

    #[test]
    fn test_prepare_hand_sorts_descending() {
        use Suit::*;
        let mut hand = cards(&[(2, Club), (14, Spade), (9, Heart)]);
        prepare_hand(&mut hand);
        assert_eq!(hand[0].0, 14);
        assert_eq!(hand[2].0, 2);
    }
}
