use serde::{Deserialize, Serialize};
use std::{
    convert::TryFrom,
    fmt,
    fmt::{Debug, Display, Write},
    mem,
};

const RANKS: [char; 15] = [
    '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A', 'L', 'B',
];

#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    Small,
    Big,
}

impl Rank {
    /// Face values of the four ordinary suits, low to high.
    pub const FACES: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Values that are trump in every hand regardless of the declared suit,
    /// from weakest to strongest.
    pub const FIXED_TRUMPS: [Rank; 3] = [Rank::Two, Rank::Three, Rank::Five];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn char(self) -> char {
        RANKS[self.idx()]
    }

    pub fn is_joker(self) -> bool {
        self >= Rank::Small
    }

    pub fn is_fixed_trump(self) -> bool {
        Self::FIXED_TRUMPS.contains(&self)
    }
}

impl From<u8> for Rank {
    fn from(n: u8) -> Self {
        assert!(n < 15, "n={}", n);
        unsafe { mem::transmute(n) }
    }
}

impl TryFrom<char> for Rank {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        RANKS
            .iter()
            .position(|&r| r == c)
            .map(|n| Self::from(n as u8))
            .ok_or(c)
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char(self.char())
    }
}

impl Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_char_round_trip() {
        for n in 0..15 {
            let rank = Rank::from(n);
            assert_eq!(Rank::try_from(rank.char()), Ok(rank));
        }
        assert_eq!(Rank::try_from('S'), Err('S'));
    }

    #[test]
    fn test_fixed_trumps() {
        assert!(Rank::Two.is_fixed_trump());
        assert!(Rank::Three.is_fixed_trump());
        assert!(Rank::Five.is_fixed_trump());
        assert!(!Rank::Four.is_fixed_trump());
        assert!(!Rank::Big.is_fixed_trump());
    }
}
