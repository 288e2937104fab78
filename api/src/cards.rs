use crate::{Card, Rank, RulesError, Suit};
use serde::{
    de::{Error, SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{
    convert::TryFrom,
    fmt,
    fmt::{Debug, Display, Formatter, Write},
    iter::FromIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign},
    str::FromStr,
};

const FACES: u64 = (1 << Card::COUNT) - 1;

/// A multiset of cards drawn from the double deck.
///
/// The low 64 bits mark every face held at least once, the high 64 bits
/// every face held twice, so a face can never be counted more often than
/// it exists. All operators are multiset operators: `|` adds, `-` removes
/// as many copies as the right side holds, `&` keeps the smaller count.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Cards {
    pub bits: u128,
}

impl Serialize for Cards {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for card in self {
            seq.serialize_element(&card)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Cards {
    fn deserialize<D>(deserializer: D) -> Result<Self, <D as Deserializer<'de>>::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(CardsVisitor(Cards::NONE))
    }
}

struct CardsVisitor(Cards);

impl<'de> Visitor<'de> for CardsVisitor {
    type Value = Cards;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "a sequence of cards")
    }

    fn visit_seq<A>(mut self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while let Some(card) = seq.next_element::<Card>()? {
            if self.0.count(card) == 2 {
                return Err(A::Error::custom(format!("more than two copies of {}", card)));
            }
            self.0.insert(card);
        }
        Ok(self.0)
    }
}

impl Cards {
    pub const NONE: Cards = Cards { bits: 0 };
    pub const DECK: Cards = Cards {
        bits: (FACES as u128) | ((FACES as u128) << 64),
    };
    pub const JOKERS: Cards = Cards {
        bits: (0b11 << 52) | (0b11 << 116),
    };

    /// Both copies of every face in `faces`.
    pub const fn from_faces(faces: u64) -> Cards {
        Cards {
            bits: (faces as u128) | ((faces as u128) << 64),
        }
    }

    fn once(self) -> u64 {
        self.bits as u64
    }

    fn twice(self) -> u64 {
        (self.bits >> 64) as u64
    }

    fn from_planes(once: u64, twice: u64) -> Cards {
        debug_assert_eq!(twice & !once, 0);
        Cards {
            bits: (once as u128) | ((twice as u128) << 64),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    pub fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn count(self, card: Card) -> usize {
        ((self.once() >> card.idx()) & 1) as usize + ((self.twice() >> card.idx()) & 1) as usize
    }

    pub fn contains(self, card: Card) -> bool {
        self.once() & (1 << card.idx()) != 0
    }

    pub fn contains_any(self, other: Cards) -> bool {
        self.once() & other.once() != 0
    }

    pub fn contains_all(self, other: Cards) -> bool {
        other.once() & !self.once() == 0 && other.twice() & !self.twice() == 0
    }

    /// Adds one copy of `card`.
    pub fn insert(&mut self, card: Card) {
        *self |= card;
    }

    /// Removes one copy of `card`, returning whether a copy was held.
    pub fn remove(&mut self, card: Card) -> bool {
        let held = self.contains(card);
        *self -= card;
        held
    }

    /// Every face held, once.
    pub fn distinct(self) -> Cards {
        Cards::from_planes(self.once(), 0)
    }

    /// Every face held twice, once.
    pub fn pairs(self) -> Cards {
        Cards::from_planes(self.twice(), 0)
    }

    pub fn suit(self, suit: Suit) -> Cards {
        self & suit.cards()
    }

    pub fn rank(self, rank: Rank) -> Cards {
        self.into_iter().filter(|c| c.rank() == rank).collect()
    }

    pub fn max(self) -> Card {
        Card::from(63 - self.once().leading_zeros() as u8)
    }
}

impl Display for Cards {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut iter = self.into_iter();
        let card = match iter.next() {
            Some(card) => card,
            None => return Ok(()),
        };
        Display::fmt(&card.rank(), f)?;
        let mut prev_suit = card.suit();
        for card in iter {
            if card.suit() != prev_suit {
                Display::fmt(&prev_suit, f)?;
                f.write_char(' ')?;
            }
            Display::fmt(&card.rank(), f)?;
            prev_suit = card.suit();
        }
        Display::fmt(&prev_suit, f)?;
        Ok(())
    }
}

impl Debug for Cards {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Cards {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || RulesError::UnparseableCards(s.to_string());
        let mut cards = Cards::NONE;
        let mut chars = s.chars();
        let mut curr_suit = None;
        while let Some(c) = chars.next_back() {
            if c.is_whitespace() {
                continue;
            }
            if let Ok(suit) = Suit::try_from(c) {
                curr_suit = Some(suit);
                continue;
            }
            let rank = Rank::try_from(c).map_err(|_| err())?;
            let suit = curr_suit.ok_or_else(err)?;
            if rank.is_joker() != (suit == Suit::Joker) {
                return Err(err());
            }
            let card = Card::new(rank, suit);
            if cards.count(card) == 2 {
                return Err(err());
            }
            cards |= card;
        }
        Ok(cards)
    }
}

impl From<Card> for Cards {
    fn from(card: Card) -> Self {
        Cards {
            bits: 1 << card.idx(),
        }
    }
}

impl BitOr<Cards> for Cards {
    type Output = Self;

    fn bitor(self, rhs: Cards) -> Self::Output {
        debug_assert!(
            self.twice() & rhs.once() == 0 && self.once() & rhs.twice() == 0,
            "{} + {} holds more than two copies of a card",
            self,
            rhs
        );
        Cards::from_planes(
            self.once() | rhs.once(),
            self.twice() | rhs.twice() | (self.once() & rhs.once()),
        )
    }
}

impl BitOr<Card> for Cards {
    type Output = Self;

    fn bitor(self, rhs: Card) -> Self::Output {
        self | Self::from(rhs)
    }
}

impl BitOrAssign<Cards> for Cards {
    fn bitor_assign(&mut self, rhs: Cards) {
        *self = *self | rhs;
    }
}

impl BitOrAssign<Card> for Cards {
    fn bitor_assign(&mut self, rhs: Card) {
        *self |= Self::from(rhs)
    }
}

impl BitAnd<Cards> for Cards {
    type Output = Self;

    fn bitand(self, rhs: Cards) -> Self::Output {
        Cards {
            bits: self.bits & rhs.bits,
        }
    }
}

impl BitAnd<Card> for Cards {
    type Output = Self;

    fn bitand(self, rhs: Card) -> Self::Output {
        self & Self::from(rhs)
    }
}

impl BitAndAssign<Cards> for Cards {
    fn bitand_assign(&mut self, rhs: Cards) {
        self.bits &= rhs.bits;
    }
}

impl Sub<Cards> for Cards {
    type Output = Self;

    fn sub(self, rhs: Cards) -> Self::Output {
        Cards::from_planes(
            (self.twice() & !rhs.twice()) | (self.once() & !rhs.once()),
            self.twice() & !rhs.once(),
        )
    }
}

impl Sub<Card> for Cards {
    type Output = Self;

    fn sub(self, rhs: Card) -> Self::Output {
        self - Self::from(rhs)
    }
}

impl SubAssign<Cards> for Cards {
    fn sub_assign(&mut self, rhs: Cards) {
        *self = *self - rhs;
    }
}

impl SubAssign<Card> for Cards {
    fn sub_assign(&mut self, rhs: Card) {
        *self -= Self::from(rhs)
    }
}

impl IntoIterator for Cards {
    type Item = Card;
    type IntoIter = CardsIter;

    fn into_iter(self) -> Self::IntoIter {
        CardsIter(self)
    }
}

impl IntoIterator for &Cards {
    type Item = Card;
    type IntoIter = CardsIter;

    fn into_iter(self) -> Self::IntoIter {
        CardsIter(*self)
    }
}

/// Yields cards from the highest face to the lowest, repeating duplicates.
pub struct CardsIter(Cards);

impl Iterator for CardsIter {
    type Item = Card;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            let card = self.0.max();
            self.0 -= card;
            Some(card)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.0.len();
        (size, Some(size))
    }
}

impl ExactSizeIterator for CardsIter {}

impl FromIterator<Card> for Cards {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut cards = Cards::NONE;
        iter.into_iter().for_each(|c| cards |= c);
        cards
    }
}

impl FromIterator<Cards> for Cards {
    fn from_iter<T: IntoIterator<Item = Cards>>(iter: T) -> Self {
        let mut cards = Cards::NONE;
        iter.into_iter().for_each(|c| cards |= c);
        cards
    }
}

#[cfg(test)]
#[macro_export]
macro_rules! c {
    ($($cards:tt)*) => {
        stringify!($($cards)*).parse::<$crate::Cards>().unwrap()
    };
}
