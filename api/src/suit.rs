use crate::Cards;
use serde::{Deserialize, Serialize};
use std::{
    convert::TryFrom,
    fmt,
    fmt::{Debug, Display, Write},
    mem,
};

const SUITS: [char; 5] = ['C', 'D', 'H', 'S', 'W'];

#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    Joker,
}

impl Suit {
    /// The four suits that can be declared trump.
    pub const VALUES: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn char(self) -> char {
        SUITS[self.idx()]
    }

    /// Both copies of every face in this suit.
    pub fn cards(self) -> Cards {
        let faces = match self {
            Suit::Joker => 0b11 << 52,
            _ => 0x1fff << (13 * self as u64),
        };
        Cards::from_faces(faces)
    }
}

impl From<u8> for Suit {
    fn from(n: u8) -> Self {
        assert!(n < 5, "n={}", n);
        unsafe { mem::transmute(n) }
    }
}

impl TryFrom<char> for Suit {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        SUITS
            .iter()
            .position(|&s| s == c)
            .map(|n| Self::from(n as u8))
            .ok_or(c)
    }
}

impl Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.char())
    }
}

impl Debug for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Card;

    #[test]
    fn test_cards() {
        assert_eq!(Suit::Hearts.cards().len(), 26);
        assert_eq!(Suit::Joker.cards().len(), 4);
        assert!(Suit::Spades.cards().contains(Card::AceSpades));
        assert!(!Suit::Spades.cards().contains(Card::AceHearts));
        assert!(Suit::Joker.cards().contains(Card::BigJoker));
    }
}
