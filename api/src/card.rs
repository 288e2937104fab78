use crate::{Cards, Rank, RulesError, Suit};
use serde::{Deserialize, Serialize};
use std::{
    convert::TryFrom,
    fmt,
    fmt::{Debug, Display, Write},
    mem,
    ops::BitOr,
    str::FromStr,
};

/// A card face. The double deck holds two copies of every face; copies are
/// tracked by [`Cards`], never by `Card` itself.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub enum Card {
    TwoClubs = 0,
    ThreeClubs,
    FourClubs,
    FiveClubs,
    SixClubs,
    SevenClubs,
    EightClubs,
    NineClubs,
    TenClubs,
    JackClubs,
    QueenClubs,
    KingClubs,
    AceClubs,
    TwoDiamonds = 13,
    ThreeDiamonds,
    FourDiamonds,
    FiveDiamonds,
    SixDiamonds,
    SevenDiamonds,
    EightDiamonds,
    NineDiamonds,
    TenDiamonds,
    JackDiamonds,
    QueenDiamonds,
    KingDiamonds,
    AceDiamonds,
    TwoHearts = 26,
    ThreeHearts,
    FourHearts,
    FiveHearts,
    SixHearts,
    SevenHearts,
    EightHearts,
    NineHearts,
    TenHearts,
    JackHearts,
    QueenHearts,
    KingHearts,
    AceHearts,
    TwoSpades = 39,
    ThreeSpades,
    FourSpades,
    FiveSpades,
    SixSpades,
    SevenSpades,
    EightSpades,
    NineSpades,
    TenSpades,
    JackSpades,
    QueenSpades,
    KingSpades,
    AceSpades,
    SmallJoker = 52,
    BigJoker,
}

impl Card {
    pub const COUNT: usize = 54;

    pub fn new(rank: Rank, suit: Suit) -> Self {
        debug_assert_eq!(rank.is_joker(), suit == Suit::Joker);
        if suit == Suit::Joker {
            Self::from(52 + rank as u8 - Rank::Small as u8)
        } else {
            Self::from(13 * suit as u8 + rank as u8)
        }
    }

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn rank(self) -> Rank {
        match self {
            Card::SmallJoker => Rank::Small,
            Card::BigJoker => Rank::Big,
            _ => Rank::from(self as u8 % 13),
        }
    }

    pub fn suit(self) -> Suit {
        Suit::from(self as u8 / 13)
    }

    pub fn is_joker(self) -> bool {
        self.suit() == Suit::Joker
    }
}

impl From<u8> for Card {
    fn from(n: u8) -> Self {
        debug_assert!((n as usize) < Card::COUNT, "n={}", n);
        unsafe { mem::transmute(n) }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.rank().char())?;
        f.write_char(self.suit().char())
    }
}

impl Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Card {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let rank = chars.next().and_then(|c| Rank::try_from(c).ok());
        let suit = chars.next().and_then(|c| Suit::try_from(c).ok());
        match (rank, suit, chars.next()) {
            (Some(rank), Some(suit), None) if rank.is_joker() == (suit == Suit::Joker) => {
                Ok(Card::new(rank, suit))
            }
            _ => Err(RulesError::UnparseableCards(s.to_string())),
        }
    }
}

impl TryFrom<String> for Card {
    type Error = RulesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Card::from_str(&s)
    }
}

impl From<Card> for String {
    fn from(c: Card) -> Self {
        c.to_string()
    }
}

impl BitOr<Card> for Card {
    type Output = Cards;

    fn bitor(self, rhs: Card) -> Self::Output {
        Cards::from(self) | rhs
    }
}
