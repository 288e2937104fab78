use crate::{classify, find, Cards, Classification, EffectiveSuit, TrumpContext};
use std::cmp::min;

/// Whether `selected`, taken from `hand`, is a legal answer to `lead`.
///
/// A player who can reproduce the lead's pattern in the lead's suit must do
/// so. One who holds some of the lead suit but cannot make the pattern must
/// play as many cards of the suit as possible. One who is void in a plain
/// lead suit may either trump with the exact pattern or discard plain cards,
/// never a mix of the two while enough plain cards remain.
pub fn is_valid_follow(
    selected: Cards,
    hand: Cards,
    lead: Classification,
    ctx: TrumpContext,
) -> bool {
    let len = lead.pattern.len();
    if selected.len() != len || !hand.contains_all(selected) {
        return false;
    }
    let matches = |suit| {
        classify(selected, ctx).map_or(false, |shape| {
            shape.pattern == lead.pattern && shape.suit == suit
        })
    };
    if find(hand, lead.pattern, lead.suit, ctx).is_some() {
        return matches(lead.suit);
    }
    let suited = ctx.of(hand, lead.suit);
    if !suited.is_empty() || lead.suit == EffectiveSuit::Trump {
        return plays_most(selected, suited, len);
    }
    if matches(EffectiveSuit::Trump) {
        return true;
    }
    let trumps = ctx.of(selected, EffectiveSuit::Trump);
    let plain = hand - ctx.trumps();
    if plain.len() >= len {
        trumps.is_empty()
    } else {
        selected.contains_all(plain)
    }
}

/// Whether `selected` uses as many of `suited` as it can hold.
fn plays_most(selected: Cards, suited: Cards, len: usize) -> bool {
    (selected & suited).len() == min(suited.len(), len)
}

/// One legal answer to `lead` from `hand`, for a player who does not choose.
pub fn default_response(hand: Cards, lead: Classification, ctx: TrumpContext) -> Cards {
    let len = lead.pattern.len();
    if let Some(cards) = find(hand, lead.pattern, lead.suit, ctx) {
        return cards;
    }
    let suited = ctx.of(hand, lead.suit);
    if !suited.is_empty() || lead.suit == EffectiveSuit::Trump {
        return take(suited, hand, len);
    }
    take(hand - ctx.trumps(), hand, len)
}

/// `len` cards of `hand`, drawn from `preferred` first.
fn take(preferred: Cards, hand: Cards, len: usize) -> Cards {
    let first: Cards = preferred.into_iter().take(len).collect();
    let rest: Cards = (hand - first).into_iter().take(len - first.len()).collect();
    first | rest
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{c, Rank, Suit};

    fn hearts() -> TrumpContext {
        TrumpContext::new(Some(Suit::Hearts), Rank::Seven)
    }

    fn lead(cards: Cards) -> Classification {
        classify(cards, hearts()).unwrap()
    }

    fn valid(selected: Cards, hand: Cards, led: Cards) -> bool {
        is_valid_follow(selected, hand, lead(led), hearts())
    }

    #[test]
    fn test_count_and_ownership() {
        let hand = c!(KQS 4C);
        assert!(valid(c!(KS), hand, c!(AS)));
        assert!(!valid(c!(KQS), hand, c!(AS)));
        assert!(!valid(c!(JS), hand, c!(AS)));
    }

    #[test]
    fn test_must_follow_suit() {
        let hand = c!(KQS 4C AH);
        assert!(valid(c!(QS), hand, c!(AS)));
        assert!(!valid(c!(4C), hand, c!(AS)));
        assert!(!valid(c!(AH), hand, c!(AS)));
    }

    #[test]
    fn test_must_match_pattern_when_possible() {
        let hand = c!(99886S 4C);
        assert!(valid(c!(9988S), hand, c!(QQJJS)));
        assert!(!valid(c!(998S 6S), hand, c!(QQJJS)));
        assert!(valid(c!(88S), hand, c!(KKS)));
        assert!(!valid(c!(98S), hand, c!(KKS)));
    }

    #[test]
    fn test_pair_downgrades_to_singles() {
        let hand = c!(986S 4C);
        assert!(valid(c!(98S), hand, c!(KKS)));
        assert!(!valid(c!(9S 4C), hand, c!(KKS)));
    }

    #[test]
    fn test_single_suit_card_is_padded() {
        let hand = c!(6S 4C 9D);
        assert!(valid(c!(6S 4C), hand, c!(66S)));
        assert!(valid(c!(6S 9D), hand, c!(66S)));
        assert!(!valid(c!(4C 9D), hand, c!(66S)));
    }

    #[test]
    fn test_consecutive_pairs_downgrade() {
        let hand = c!(9864S 4C);
        assert!(valid(c!(9864S), hand, c!(QQJJS)));
        assert!(!valid(c!(986S 4C), hand, c!(QQJJS)));
        let short = c!(98S 44C 9D);
        assert!(valid(c!(98S 44C), short, c!(QQJJS)));
        assert!(!valid(c!(9S 44C 9D), short, c!(QQJJS)));
    }

    #[test]
    fn test_void_may_overtrump_with_matching_pattern() {
        let hand = c!(KKH QH 4C 9D);
        assert!(valid(c!(KKH), hand, c!(66S)));
        assert!(!valid(c!(KQH), hand, c!(66S)));
        assert!(valid(c!(4C 9D), hand, c!(66S)));
        assert!(!valid(c!(KH 4C), hand, c!(66S)));
    }

    #[test]
    fn test_void_with_few_plain_cards_pads_with_trump() {
        let hand = c!(KH QH 4C);
        assert!(valid(c!(KH 4C), hand, c!(66S)));
        assert!(!valid(c!(KQH), hand, c!(66S)));
    }

    #[test]
    fn test_trump_lead() {
        assert!(valid(c!(KKH), c!(KKH QH 4C), c!(AAH)));
        assert!(!valid(c!(KQH), c!(KKH QH 4C), c!(AAH)));
        assert!(!valid(c!(KH 4C), c!(KKH QH 4C), c!(AAH)));
        // trumps that cannot form the pattern must all still be used
        assert!(valid(c!(KQH), c!(KQH 4C), c!(AAH)));
        assert!(valid(c!(7S 4C), c!(7S 4C 9D), c!(AAH)));
        assert!(!valid(c!(9D 4C), c!(7S 4C 9D), c!(AAH)));
        // no trump at all: anything goes
        assert!(valid(c!(9D 4C), c!(6S 4C 9D), c!(AAH)));
    }

    #[test]
    fn test_flash_lead_needs_a_flash() {
        let led = c!(5S 5H 5D 5C);
        assert!(valid(c!(3S 3H 3D 3C), c!(3S 3H 3D 3C 4C), led));
        assert!(!valid(c!(3S 3H 3D 4C), c!(3S 3H 3D 3C 4C), led));
    }

    #[test]
    fn test_default_response_is_valid() {
        let ctx = hearts();
        let hands = [
            c!(99886S 4C BW),
            c!(986S 4C QQD),
            c!(KKH QH 4C 9D AS),
            c!(KH QH 4C 8S 9S),
            c!(6S 4C 9D 88D 7C),
            c!(3S 3H 3D 3C 4C 6D),
        ];
        let leads = [
            c!(AS),
            c!(KKS),
            c!(QQJJS),
            c!(AAH),
            c!(5S 5H 5D 5C),
            c!(QJT98D),
        ];
        for &hand in &hands {
            for &led in &leads {
                let shape = lead(led);
                if hand.len() < shape.pattern.len() {
                    continue;
                }
                let response = default_response(hand, shape, ctx);
                assert!(
                    is_valid_follow(response, hand, shape, ctx),
                    "{} from {} against {}",
                    response,
                    hand,
                    led
                );
            }
        }
    }
}
