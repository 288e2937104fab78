use crate::{Card, Cards, Rank, Suit};
use serde::{Deserialize, Serialize};
use std::{fmt, fmt::Display};

const TRUMP_BASE: u8 = 16;

/// The two inputs that decide which cards are trump and how they rank.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TrumpContext {
    pub main_suit: Option<Suit>,
    pub common_main: Rank,
}

/// The suit a card belongs to for following purposes: every trump, whatever
/// its printed suit, belongs to the trump suit.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveSuit {
    Trump,
    Plain(Suit),
}

impl Display for EffectiveSuit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EffectiveSuit::Trump => f.write_str("trump"),
            EffectiveSuit::Plain(suit) => Display::fmt(suit, f),
        }
    }
}

impl TrumpContext {
    pub fn new(main_suit: Option<Suit>, common_main: Rank) -> Self {
        debug_assert_ne!(main_suit, Some(Suit::Joker));
        debug_assert!(!common_main.is_joker());
        Self {
            main_suit,
            common_main,
        }
    }

    /// Values that are trump in every suit: the common main and 2, 3, 5.
    pub fn is_special(self, rank: Rank) -> bool {
        rank == self.common_main || rank.is_fixed_trump()
    }

    pub fn is_main_suit(self, card: Card) -> bool {
        self.main_suit == Some(card.suit())
    }

    pub fn is_trump(self, card: Card) -> bool {
        card.is_joker() || self.is_main_suit(card) || self.is_special(card.rank())
    }

    pub fn effective_suit(self, card: Card) -> EffectiveSuit {
        if self.is_trump(card) {
            EffectiveSuit::Trump
        } else {
            EffectiveSuit::Plain(card.suit())
        }
    }

    /// Both copies of every trump face.
    pub fn trumps(self) -> Cards {
        let mut faces = 0u64;
        for n in 0..Card::COUNT as u8 {
            if self.is_trump(Card::from(n)) {
                faces |= 1 << n;
            }
        }
        Cards::from_faces(faces)
    }

    /// Every card of `suit` that is not trump.
    pub fn plain(self, suit: Suit) -> Cards {
        suit.cards() - self.trumps()
    }

    /// The cards of `cards` belonging to `suit`.
    pub fn of(self, cards: Cards, suit: EffectiveSuit) -> Cards {
        match suit {
            EffectiveSuit::Trump => cards & self.trumps(),
            EffectiveSuit::Plain(suit) => cards & self.plain(suit),
        }
    }

    /// Position of `rank` within the ordinary sequence 4, 6 .. A, which
    /// skips every value that is trump in all suits.
    fn ordinary_position(self, rank: Rank) -> u8 {
        Rank::FACES[..rank.idx()]
            .iter()
            .filter(|&&r| !self.is_special(r))
            .count() as u8
    }

    fn ordinary_len(self) -> u8 {
        self.ordinary_ranks().count() as u8
    }

    /// Strength of a single card, higher wins.
    ///
    /// Trumps rank densely above every plain card: the ordinary main-suit
    /// cards, then 2, 3 and 5, then the common main, then the jokers. At
    /// each special value the main-suit copy sits one step above the
    /// off-suit copies, which tie with each other. Plain cards rank by face
    /// value and are only meaningful against cards of their own suit.
    pub fn rank(self, card: Card) -> u8 {
        if !self.is_trump(card) {
            return card.rank() as u8;
        }
        let variants = if self.main_suit.is_some() { 2 } else { 1 };
        let is_main = self.is_main_suit(card) as u8;
        let ordinary = if self.main_suit.is_some() {
            self.ordinary_len()
        } else {
            0
        };
        let fixed = Rank::FIXED_TRUMPS
            .iter()
            .filter(|&&r| r != self.common_main);
        let fixed_len = fixed.clone().count() as u8;
        let specials = TRUMP_BASE + ordinary;
        let common = specials + fixed_len * variants;
        match card.rank() {
            Rank::Big => common + variants + 1,
            Rank::Small => common + variants,
            r if r == self.common_main => common + is_main,
            r if r.is_fixed_trump() => {
                let position = fixed.take_while(|&&f| f != r).count() as u8;
                specials + position * variants + is_main
            }
            r => TRUMP_BASE + self.ordinary_position(r),
        }
    }

    /// Position used to decide whether two cards are consecutive: adjacent
    /// trump strengths for trumps, adjacent ordinary values for plain cards.
    pub fn step(self, card: Card) -> u8 {
        if self.is_trump(card) {
            self.rank(card)
        } else {
            self.ordinary_position(card.rank())
        }
    }

    /// Ordinary values (those that are not trump in every suit), low to high.
    pub fn ordinary_ranks(self) -> impl Iterator<Item = Rank> {
        Rank::FACES
            .into_iter()
            .filter(move |&r| !self.is_special(r))
    }
}

/// Strength of `card` under `ctx`, see [`TrumpContext::rank`].
pub fn rank(card: Card, ctx: TrumpContext) -> u8 {
    ctx.rank(card)
}
