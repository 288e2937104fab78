use crate::{Card, Cards, RulesError, Seat, Suit, Timestamp, TrumpContext};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Cards are still arriving and nobody has called the main.
    Dealing,
    /// The main is called and may still be countered or fixed.
    MainCalled,
    /// The caller fixed the main; only sticking remains open.
    MainFixed,
    /// The counter window closed without a fix; only sticking remains open.
    Sticking,
    BottomDeal,
    Playing,
    Complete,
    /// Dealing finished and the call window closed without a call.
    Misdeal,
}

impl Phase {
    pub fn is_declaring(self) -> bool {
        matches!(
            self,
            Phase::Dealing | Phase::MainCalled | Phase::MainFixed | Phase::Sticking
        )
    }

    pub fn can_stick(self) -> bool {
        matches!(self, Phase::MainFixed | Phase::Sticking)
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Phase::Complete | Phase::Misdeal)
    }
}

/// The windows that close on a deadline.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timer {
    Call,
    Counter,
    Stick,
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Timer {
    pub fn name(self) -> &'static str {
        match self {
            Timer::Call => "call",
            Timer::Counter => "counter",
            Timer::Stick => "stick",
        }
    }
}

/// The cards a bid was made with: a joker and a pair of one suited card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MainCards {
    pub joker: Card,
    pub pair: Card,
}

impl MainCards {
    /// The cards moved to a sticking player: the joker and both copies of the pair.
    pub fn stake(self) -> Cards {
        self.joker | self.pair | self.pair
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DeclarationState {
    pub phase: Phase,
    pub main_suit: Option<Suit>,
    pub main_caller: Option<Seat>,
    pub main_cards: Option<MainCards>,
    pub is_main_fixed: bool,
    pub call_deadline: Option<Timestamp>,
    pub counter_deadline: Option<Timestamp>,
    pub stick_deadline: Option<Timestamp>,
    pub stuck: Option<Seat>,
}

impl DeclarationState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Dealing,
            main_suit: None,
            main_caller: None,
            main_cards: None,
            is_main_fixed: false,
            call_deadline: None,
            counter_deadline: None,
            stick_deadline: None,
            stuck: None,
        }
    }

    pub fn deadline(&self, timer: Timer) -> Option<Timestamp> {
        match timer {
            Timer::Call => self.call_deadline,
            Timer::Counter => self.counter_deadline,
            Timer::Stick => self.stick_deadline,
        }
    }

    /// Fails once `timer`'s deadline has been reached.
    pub fn verify_open(&self, timer: Timer, now: Timestamp) -> Result<(), RulesError> {
        match self.deadline(timer) {
            Some(deadline) if now >= deadline => Err(RulesError::DeadlineExpired(timer.name())),
            _ => Ok(()),
        }
    }

    /// Whether every declaration window has closed, so the bottom can be dealt.
    pub fn is_settled(&self) -> bool {
        self.phase.can_stick() && self.stick_deadline.is_none()
    }
}

impl Default for DeclarationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks that `joker` and `pair` name a joker and a suited card.
pub fn verify_bid_cards(joker: Card, pair: Card) -> Result<(), RulesError> {
    if !joker.is_joker() {
        return Err(RulesError::InvalidBidComposition("a bid must name a joker"));
    }
    if pair.is_joker() {
        return Err(RulesError::InvalidBidComposition(
            "the pair of a bid must be a suited card",
        ));
    }
    Ok(())
}

/// Checks that a sticking offer is one special-value card and two ordinary
/// cards of the main suit.
pub fn verify_stick_offer(offered: Cards, ctx: TrumpContext) -> Result<(), RulesError> {
    if offered.len() != 3 {
        return Err(RulesError::IncompleteSelection {
            expected: 3,
            actual: offered.len(),
        });
    }
    let special = offered
        .into_iter()
        .filter(|c| !c.is_joker() && ctx.is_special(c.rank()))
        .count();
    let main = offered
        .into_iter()
        .filter(|&c| ctx.is_main_suit(c) && !ctx.is_special(c.rank()))
        .count();
    if special != 1 || main != 2 {
        return Err(RulesError::InvalidBidComposition(
            "sticking offers one special value and two cards of the main suit",
        ));
    }
    Ok(())
}

/// Whether `hand` may stick: a joker plus two pairs of adjacent ordinary
/// values in one suit.
pub fn verify_stick_hand(hand: Cards, ctx: TrumpContext) -> Result<(), RulesError> {
    if !hand.contains_any(Cards::JOKERS) {
        return Err(RulesError::InvalidBidComposition("sticking needs a joker"));
    }
    if !Suit::VALUES
        .iter()
        .any(|&suit| has_adjacent_pairs(hand.suit(suit).pairs(), ctx))
    {
        return Err(RulesError::InvalidBidComposition(
            "sticking needs two consecutive pairs in one suit",
        ));
    }
    Ok(())
}

fn has_adjacent_pairs(pairs: Cards, ctx: TrumpContext) -> bool {
    let mut steps: Vec<u8> = pairs
        .into_iter()
        .filter(|c| !ctx.is_special(c.rank()))
        .map(|c| ctx.step(c))
        .collect();
    steps.sort_unstable();
    steps.windows(2).any(|w| w[0] + 1 == w[1])
}
