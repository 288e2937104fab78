use crate::{Card, Cards, EffectiveSuit, Rank, Suit, TrumpContext};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, fmt::Display};

const FLASH_TIER: u16 = 100;
const THUNDER_TIER: u16 = 200;

/// The shape of a play.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Single,
    Pair,
    ConsecutivePairs { pairs: u8 },
    /// One card of a trump value from each of the four suits.
    Flash,
    /// A flash plus more copies of the same value.
    Thunder { cards: u8 },
    /// Five or more consecutive cards of one suit.
    Rain { cards: u8 },
}

impl Pattern {
    pub fn len(self) -> usize {
        match self {
            Pattern::Single => 1,
            Pattern::Pair => 2,
            Pattern::ConsecutivePairs { pairs } => 2 * pairs as usize,
            Pattern::Flash => 4,
            Pattern::Thunder { cards } | Pattern::Rain { cards } => cards as usize,
        }
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Pattern::Single => write!(f, "single"),
            Pattern::Pair => write!(f, "pair"),
            Pattern::ConsecutivePairs { pairs } => write!(f, "{} consecutive pairs", pairs),
            Pattern::Flash => write!(f, "flash"),
            Pattern::Thunder { cards } => write!(f, "{} card thunder", cards),
            Pattern::Rain { cards } => write!(f, "{} card rain", cards),
        }
    }
}

/// A recognised play: its shape, the suit it belongs to, and a strength that
/// orders plays of the same shape and suit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Classification {
    pub pattern: Pattern,
    pub suit: EffectiveSuit,
    pub strength: u16,
}

impl Classification {
    pub fn is_trump(&self) -> bool {
        self.suit == EffectiveSuit::Trump
    }
}

/// Recognises the shape of `cards`, or `None` if they form no pattern.
pub fn classify(cards: Cards, ctx: TrumpContext) -> Option<Classification> {
    let len = cards.len();
    if len == 0 {
        return None;
    }
    let high = cards.into_iter().map(|c| ctx.rank(c)).max()? as u16;
    let low = cards.into_iter().map(|c| ctx.rank(c)).min()? as u16;
    let suit = same_suit(cards, ctx);
    let classified = |pattern, suit, strength| {
        Some(Classification {
            pattern,
            suit,
            strength,
        })
    };

    if len == 1 {
        return classified(Pattern::Single, suit?, high);
    }
    if len == 2 && cards.pairs().len() == 1 {
        return classified(Pattern::Pair, suit?, high);
    }
    if is_flash(cards, ctx) {
        return if len == 4 {
            classified(Pattern::Flash, EffectiveSuit::Trump, FLASH_TIER + low)
        } else {
            classified(
                Pattern::Thunder { cards: len as u8 },
                EffectiveSuit::Trump,
                THUNDER_TIER + low,
            )
        };
    }
    let suit = suit?;
    let distinct = cards.distinct();
    if len >= 4 && len % 2 == 0 && cards.pairs() == distinct && contiguous(distinct, ctx) {
        return classified(
            Pattern::ConsecutivePairs {
                pairs: (len / 2) as u8,
            },
            suit,
            high,
        );
    }
    if len >= 5
        && cards.pairs().is_empty()
        && single_printed_suit(cards)
        && cards.into_iter().all(|c| !ctx.is_special(c.rank()))
        && contiguous(cards, ctx)
    {
        return classified(Pattern::Rain { cards: len as u8 }, suit, high);
    }
    None
}

/// Finds a subset of `cards` shaped like `pattern` and belonging to `suit`.
pub fn find(
    cards: Cards,
    pattern: Pattern,
    suit: EffectiveSuit,
    ctx: TrumpContext,
) -> Option<Cards> {
    let cards = ctx.of(cards, suit);
    match pattern {
        Pattern::Single => cards.into_iter().next().map(Cards::from),
        Pattern::Pair => cards.pairs().into_iter().next().map(|c| c | c),
        Pattern::ConsecutivePairs { pairs } => {
            let run = find_run(cards.pairs(), pairs as usize, ctx)?;
            Some(run | run)
        }
        Pattern::Rain { cards: len } => {
            let printed = match suit {
                EffectiveSuit::Plain(suit) => suit,
                EffectiveSuit::Trump => ctx.main_suit?,
            };
            let ordinary: Cards = cards
                .suit(printed)
                .distinct()
                .into_iter()
                .filter(|c| !ctx.is_special(c.rank()))
                .collect();
            find_run(ordinary, len as usize, ctx)
        }
        Pattern::Flash | Pattern::Thunder { .. } => {
            if suit != EffectiveSuit::Trump {
                return None;
            }
            let len = pattern.len();
            special_ranks(ctx).find_map(|rank| {
                let of_rank = cards.rank(rank);
                let flash: Cards = Suit::VALUES
                    .iter()
                    .map(|&suit| Card::new(rank, suit))
                    .collect();
                if !of_rank.contains_all(flash) || of_rank.len() < len {
                    return None;
                }
                let extra = (of_rank - flash).into_iter().take(len - 4);
                Some(flash | extra.collect::<Cards>())
            })
        }
    }
}

/// The effective suit shared by every card, if there is one.
fn same_suit(cards: Cards, ctx: TrumpContext) -> Option<EffectiveSuit> {
    let mut iter = cards.into_iter().map(|c| ctx.effective_suit(c));
    let first = iter.next()?;
    if iter.all(|s| s == first) {
        Some(first)
    } else {
        None
    }
}

fn single_printed_suit(cards: Cards) -> bool {
    let suit = cards.max().suit();
    suit != Suit::Joker && cards.suit(suit) == cards
}

/// A flash or thunder: one trump value only, showing all four suits.
fn is_flash(cards: Cards, ctx: TrumpContext) -> bool {
    let len = cards.len();
    if len < 4 || len > 8 {
        return false;
    }
    let rank = cards.max().rank();
    !rank.is_joker()
        && ctx.is_special(rank)
        && cards.rank(rank) == cards
        && Suit::VALUES
            .iter()
            .all(|&suit| cards.contains(Card::new(rank, suit)))
}

/// Whether the distinct faces of `cards` occupy consecutive steps with no
/// step repeated.
fn contiguous(cards: Cards, ctx: TrumpContext) -> bool {
    let mut steps: Vec<u8> = cards.distinct().into_iter().map(|c| ctx.step(c)).collect();
    steps.sort_unstable();
    steps.windows(2).all(|w| w[0] + 1 == w[1])
}

/// Finds `len` faces among `faces` (one effective suit) on consecutive steps.
fn find_run(faces: Cards, len: usize, ctx: TrumpContext) -> Option<Cards> {
    if len == 0 {
        return None;
    }
    let by_step: BTreeMap<u8, Card> = faces
        .distinct()
        .into_iter()
        .map(|c| (ctx.step(c), c))
        .collect();
    let mut run: Vec<Card> = Vec::with_capacity(len);
    let mut prev = None;
    for (&step, &card) in &by_step {
        if prev.map_or(false, |p: u8| p + 1 == step) {
            run.push(card);
        } else {
            run.clear();
            run.push(card);
        }
        prev = Some(step);
        if run.len() == len {
            return Some(run.into_iter().collect());
        }
    }
    None
}

fn special_ranks(ctx: TrumpContext) -> impl Iterator<Item = Rank> {
    Rank::FACES.into_iter().filter(move |&r| ctx.is_special(r))
}
