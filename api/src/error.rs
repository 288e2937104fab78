use crate::{Cards, Phase, Seat};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("the {0} window has closed")]
    DeadlineExpired(&'static str),
    #[error("{0} cannot be led, it is not a recognised pattern")]
    IllegalLead(Cards),
    #[error("{0} does not follow the lead")]
    IllegalFollow(Cards),
    #[error("expected {expected} cards but {actual} were selected")]
    IncompleteSelection { expected: usize, actual: usize },
    #[error("invalid bid: {0}")]
    InvalidBidComposition(&'static str),
    #[error("your hand does not contain {0}")]
    InvalidCardOwnership(Cards),
    #[error("invalid rules config: {0}")]
    InvalidConfig(&'static str),
    #[error("unable to read rules config")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("player {0} makes the next {1}")]
    OutOfTurn(Seat, &'static str),
    #[error("cannot {0}, current phase is {1:?}")]
    PhaseMismatch(&'static str, Phase),
    #[error("unexpected serde error")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("{0:?} is not a valid card list")]
    UnparseableCards(String),
}
