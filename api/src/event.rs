use crate::{Card, Cards, Seat, Timer, Timestamp};
use serde::{Deserialize, Serialize};

/// Everything that happens to a round, in order. Replaying a round's events
/// into a fresh [`Round`](crate::Round) rebuilds it exactly.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundEvent {
    Deal {
        first: Seat,
        bottom: Cards,
    },
    Receive {
        seat: Seat,
        card: Option<Card>,
        at: Timestamp,
    },
    Call {
        seat: Seat,
        joker: Card,
        pair: Card,
        at: Timestamp,
    },
    Counter {
        seat: Seat,
        joker: Card,
        pair: Card,
        at: Timestamp,
    },
    Fix {
        seat: Seat,
        at: Timestamp,
    },
    Stick {
        seat: Seat,
        offered: Cards,
    },
    WindowClosed {
        timer: Timer,
        at: Timestamp,
    },
    Misdeal,
    TakeBottom {
        seat: Seat,
        bottom: Cards,
    },
    Bury {
        seat: Seat,
        cards: Cards,
    },
    Play {
        seat: Seat,
        cards: Cards,
    },
    EndTrick {
        winner: Seat,
    },
    HandComplete {
        winner: Seat,
    },
}

impl RoundEvent {
    /// The event as `seat` may see it, hiding cards held by other seats.
    /// `None` is a spectator, who sees no private cards at all.
    pub fn redact(&self, seat: Option<Seat>) -> RoundEvent {
        let hidden = |owner: Seat| seat != Some(owner);
        match self {
            RoundEvent::Deal { first, .. } => RoundEvent::Deal {
                first: *first,
                bottom: Cards::NONE,
            },
            RoundEvent::Receive { seat: owner, at, .. } if hidden(*owner) => RoundEvent::Receive {
                seat: *owner,
                card: None,
                at: *at,
            },
            RoundEvent::TakeBottom { seat: owner, .. } if hidden(*owner) => {
                RoundEvent::TakeBottom {
                    seat: *owner,
                    bottom: Cards::NONE,
                }
            }
            RoundEvent::Bury { seat: owner, .. } if hidden(*owner) => RoundEvent::Bury {
                seat: *owner,
                cards: Cards::NONE,
            },
            _ => self.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::c;
    use serde_test::{assert_ser_tokens, Token};

    #[test]
    fn test_wire_shape() {
        assert_ser_tokens(
            &RoundEvent::Fix {
                seat: Seat::East,
                at: 5,
            },
            &[
                Token::Struct {
                    name: "RoundEvent",
                    len: 3,
                },
                Token::Str("type"),
                Token::Str("fix"),
                Token::Str("seat"),
                Token::UnitVariant {
                    name: "Seat",
                    variant: "east",
                },
                Token::Str("at"),
                Token::U64(5),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn test_json_round_trip() {
        let event = RoundEvent::Stick {
            seat: Seat::South,
            offered: c!(3C KQS),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"stick","seat":"south","offered":["KS","QS","3C"]}"#
        );
        assert_eq!(serde_json::from_str::<RoundEvent>(&json).unwrap(), event);
    }

    #[test]
    fn test_redact() {
        let receive = RoundEvent::Receive {
            seat: Seat::North,
            card: Some(Card::BigJoker),
            at: 3,
        };
        assert_eq!(receive.redact(Some(Seat::North)), receive);
        assert_eq!(
            receive.redact(Some(Seat::East)),
            RoundEvent::Receive {
                seat: Seat::North,
                card: None,
                at: 3
            }
        );
        let deal = RoundEvent::Deal {
            first: Seat::West,
            bottom: c!(AAKKS),
        };
        assert_eq!(
            deal.redact(Some(Seat::West)),
            RoundEvent::Deal {
                first: Seat::West,
                bottom: Cards::NONE
            }
        );
        let bury = RoundEvent::Bury {
            seat: Seat::South,
            cards: c!(AAKKS),
        };
        assert_eq!(bury.redact(Some(Seat::South)), bury);
        assert_eq!(
            bury.redact(None),
            RoundEvent::Bury {
                seat: Seat::South,
                cards: Cards::NONE
            }
        );
        let play = RoundEvent::Play {
            seat: Seat::South,
            cards: c!(AS),
        };
        assert_eq!(play.redact(None), play);
    }
}
