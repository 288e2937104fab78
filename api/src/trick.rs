use crate::{classify, Cards, Classification, Seat, TrumpContext};
use serde::{Deserialize, Serialize};
use std::{fmt, fmt::Formatter};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TrickPlay {
    pub seat: Seat,
    pub cards: Cards,
    /// `None` for plays that form no pattern, which can never win.
    pub shape: Option<Classification>,
}

/// The plays of one round, in seat order from the leader.
#[derive(Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Trick {
    plays: Vec<TrickPlay>,
}

impl Trick {
    pub fn new() -> Self {
        Self { plays: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn plays(&self) -> &[TrickPlay] {
        &self.plays
    }

    pub fn lead(&self) -> Option<&TrickPlay> {
        self.plays.first()
    }

    /// The seat due to play next, or `None` once complete or before a lead.
    pub fn next_seat(&self) -> Option<Seat> {
        match self.plays.last() {
            Some(_) if self.is_complete() => None,
            Some(play) => Some(play.seat.left()),
            None => None,
        }
    }

    pub fn cards(&self) -> Cards {
        self.plays.iter().map(|p| p.cards).collect()
    }

    pub fn push(&mut self, seat: Seat, cards: Cards, ctx: TrumpContext) {
        debug_assert!(!self.is_complete());
        self.plays.push(TrickPlay {
            seat,
            cards,
            shape: classify(cards, ctx),
        });
    }

    /// The seat currently winning the trick.
    ///
    /// Only a play with the lead's pattern can take the trick from the lead:
    /// a trump play beats any plain play, and otherwise a play must be in the
    /// same suit and strictly stronger. Earlier plays win ties.
    pub fn winning_seat(&self) -> Option<Seat> {
        let lead = self.plays.first()?;
        let lead_shape = lead.shape?;
        let mut winner = (lead.seat, lead_shape);
        for play in &self.plays[1..] {
            let shape = match play.shape {
                Some(shape) if shape.pattern == lead_shape.pattern => shape,
                _ => continue,
            };
            if shape.suit != lead_shape.suit && !shape.is_trump() {
                continue;
            }
            let best = winner.1;
            let beats = match (shape.is_trump(), best.is_trump()) {
                (true, false) => true,
                (false, true) => false,
                _ => shape.suit == best.suit && shape.strength > best.strength,
            };
            if beats {
                winner = (play.seat, shape);
            }
        }
        Some(winner.0)
    }
}

impl fmt::Debug for Trick {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let mut list = f.debug_list();
        for play in &self.plays {
            list.entry(&format_args!("{} [{}]", play.seat, play.cards));
        }
        list.finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{c, Rank, Suit};

    fn ctx() -> TrumpContext {
        TrumpContext::new(Some(Suit::Hearts), Rank::Two)
    }

    fn trick(plays: &[(Seat, Cards)]) -> Trick {
        let mut trick = Trick::new();
        for &(seat, cards) in plays {
            trick.push(seat, cards, ctx());
        }
        trick
    }

    #[test]
    fn test_is_complete() {
        let mut trick = Trick::new();
        assert!(trick.is_empty());
        assert_eq!(trick.next_seat(), None);
        for (i, &seat) in Seat::West.rotation().iter().enumerate() {
            assert!(!trick.is_complete());
            trick.push(seat, c!(4C), ctx());
            assert_eq!(trick.len(), i + 1);
        }
        assert!(trick.is_complete());
        assert_eq!(trick.next_seat(), None);
    }

    #[test]
    fn test_next_seat() {
        let trick = trick(&[(Seat::East, c!(7S))]);
        assert_eq!(trick.next_seat(), Some(Seat::South));
        assert_eq!(trick.lead().map(|p| p.seat), Some(Seat::East));
    }

    #[test]
    fn test_overtrump_beats_higher_suit_card() {
        let trick = trick(&[
            (Seat::North, c!(7S)),
            (Seat::East, c!(KS)),
            (Seat::South, c!(4H)),
            (Seat::West, c!(9D)),
        ]);
        assert_eq!(trick.winning_seat(), Some(Seat::South));
    }

    #[test]
    fn test_highest_in_suit_wins() {
        let trick = trick(&[
            (Seat::North, c!(7S)),
            (Seat::East, c!(KS)),
            (Seat::South, c!(AS)),
            (Seat::West, c!(QS)),
        ]);
        assert_eq!(trick.winning_seat(), Some(Seat::South));
    }

    #[test]
    fn test_higher_trump_wins_and_ties_go_to_first() {
        let trick = trick(&[
            (Seat::North, c!(7S)),
            (Seat::East, c!(3C)),
            (Seat::South, c!(3D)),
            (Seat::West, c!(AH)),
        ]);
        assert_eq!(trick.winning_seat(), Some(Seat::East));
    }

    #[test]
    fn test_padding_and_downgrades_never_win() {
        let trick = trick(&[
            (Seat::North, c!(66S)),
            (Seat::East, c!(AS KS)),
            (Seat::South, c!(AH KH)),
            (Seat::West, c!(AAD)),
        ]);
        assert_eq!(trick.winning_seat(), Some(Seat::North));
    }

    #[test]
    fn test_trump_pair_overtrumps_pair() {
        let trick = trick(&[
            (Seat::North, c!(66S)),
            (Seat::East, c!(AAS)),
            (Seat::South, c!(44H)),
            (Seat::West, c!(BBW)),
        ]);
        assert_eq!(trick.winning_seat(), Some(Seat::West));
    }

    #[test]
    fn test_flash_lead_beaten_by_higher_flash() {
        let trick = trick(&[
            (Seat::North, c!(3S 3H 3D 3C)),
            (Seat::East, c!(5S 5H 5D 5C)),
            (Seat::South, c!(4S 6S 8S 9S)),
            (Seat::West, c!(BBLLW)),
        ]);
        assert_eq!(trick.winning_seat(), Some(Seat::East));
    }
}
