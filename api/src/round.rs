use crate::{
    classify, default_response, determine_bottom_dealer, is_valid_follow, verify_bid_cards,
    verify_stick_hand, verify_stick_offer, Card, Cards, Classification, DeclarationState,
    Dealer, MainCards, Phase, PlayerId, Rank, RoundEvent, RulesConfig, RulesError, Seat, Team,
    Timer, Timestamp, Trick, TrumpContext, BOTTOM_SIZE, HAND_SIZE,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};

const DEALT: usize = 4 * HAND_SIZE;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayResult {
    pub trick_complete: bool,
    /// The seat that won the trick, once it is complete.
    pub winner: Option<Seat>,
}

/// One hand of play, from the first dealt card to the last trick.
///
/// Every operation verifies first and then applies one or more
/// [`RoundEvent`]s, so a rejected action leaves the round untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub players: [PlayerId; 4],
    pub banker_team: Team,
    pub common_main: Rank,
    pub config: RulesConfig,
    pub first: Option<Seat>,
    pub dealt: usize,
    pub hands: [Cards; 4],
    pub bottom: Cards,
    pub declaration: DeclarationState,
    pub trick: Trick,
    pub next_actor: Option<Seat>,
    pub last_winner: Option<Seat>,
    #[serde(skip)]
    pub events: Vec<RoundEvent>,
}

impl Round {
    pub fn new(
        players: [PlayerId; 4],
        banker_team: Team,
        common_main: Rank,
        config: RulesConfig,
    ) -> Self {
        Self {
            players,
            banker_team,
            common_main,
            config,
            first: None,
            dealt: 0,
            hands: [Cards::NONE; 4],
            bottom: Cards::NONE,
            declaration: DeclarationState::new(),
            trick: Trick::new(),
            next_actor: None,
            last_winner: None,
            events: Vec::new(),
        }
    }

    /// Rebuilds a round from its event log.
    pub fn replay(
        players: [PlayerId; 4],
        banker_team: Team,
        common_main: Rank,
        config: RulesConfig,
        events: &[RoundEvent],
    ) -> Self {
        let mut round = Round::new(players, banker_team, common_main, config);
        for event in events {
            round.apply(event);
        }
        round
    }

    pub fn phase(&self) -> Phase {
        self.declaration.phase
    }

    pub fn trump_context(&self) -> TrumpContext {
        TrumpContext::new(self.declaration.main_suit, self.common_main)
    }

    pub fn seat(&self, player: PlayerId) -> Option<Seat> {
        self.players
            .iter()
            .position(|&p| p == player)
            .map(|idx| Seat::VALUES[idx])
    }

    pub fn hand(&self, seat: Seat) -> Cards {
        self.hands[seat.idx()]
    }

    pub fn is_dealt(&self) -> bool {
        self.dealt == DEALT
    }

    /// The seat that buries the bottom, known once the main is called.
    pub fn bottom_dealer(&self) -> Option<Seat> {
        self.declaration
            .main_caller
            .map(|caller| determine_bottom_dealer(caller, self.banker_team))
    }

    fn all_cards(&self) -> Cards {
        self.hands.iter().copied().collect::<Cards>() | self.bottom | self.trick.cards()
    }

    pub fn apply(&mut self, event: &RoundEvent) {
        let ctx = self.trump_context();
        let config = self.config;
        let state = &mut self.declaration;
        match *event {
            RoundEvent::Deal { first, bottom } => {
                self.first = Some(first);
                self.bottom = bottom;
            }
            RoundEvent::Receive { seat, card, at } => {
                if let Some(card) = card {
                    self.hands[seat.idx()] |= card;
                }
                self.dealt += 1;
                if self.dealt == DEALT && state.phase == Phase::Dealing {
                    state.call_deadline = Some(at + config.call_window_ms);
                }
            }
            RoundEvent::Call {
                seat,
                joker,
                pair,
                at,
            }
            | RoundEvent::Counter {
                seat,
                joker,
                pair,
                at,
            } => {
                state.phase = Phase::MainCalled;
                state.main_suit = Some(pair.suit());
                state.main_caller = Some(seat);
                state.main_cards = Some(MainCards { joker, pair });
                state.call_deadline = None;
                state.counter_deadline = Some(at + config.counter_window_ms);
            }
            RoundEvent::Fix { at, .. } => {
                state.phase = Phase::MainFixed;
                state.is_main_fixed = true;
                state.counter_deadline = None;
                state.stick_deadline = Some(at + config.stick_window_ms);
            }
            RoundEvent::Stick { seat, offered } => {
                if let (Some(caller), Some(main_cards)) = (state.main_caller, state.main_cards) {
                    let stake = main_cards.stake();
                    self.hands[seat.idx()] -= offered;
                    self.hands[seat.idx()] |= stake;
                    self.hands[caller.idx()] -= stake;
                    self.hands[caller.idx()] |= offered;
                }
                state.stuck = Some(seat);
                state.stick_deadline = None;
            }
            RoundEvent::WindowClosed { timer, at } => match timer {
                Timer::Call => state.call_deadline = None,
                Timer::Counter => {
                    state.phase = Phase::Sticking;
                    state.counter_deadline = None;
                    state.stick_deadline = Some(at + config.stick_window_ms);
                }
                Timer::Stick => state.stick_deadline = None,
            },
            RoundEvent::Misdeal => {
                state.phase = Phase::Misdeal;
            }
            RoundEvent::TakeBottom { seat, bottom } => {
                state.phase = Phase::BottomDeal;
                self.hands[seat.idx()] |= bottom;
                self.bottom = Cards::NONE;
                self.next_actor = Some(seat);
            }
            RoundEvent::Bury { seat, cards } => {
                state.phase = Phase::Playing;
                self.hands[seat.idx()] -= cards;
                self.bottom = cards;
                self.next_actor = Some(seat);
            }
            RoundEvent::Play { seat, cards } => {
                self.hands[seat.idx()] -= cards;
                self.trick.push(seat, cards, ctx);
                self.next_actor = self.trick.next_seat();
            }
            RoundEvent::EndTrick { winner } => {
                self.trick = Trick::new();
                self.next_actor = Some(winner);
                self.last_winner = Some(winner);
            }
            RoundEvent::HandComplete { winner } => {
                state.phase = Phase::Complete;
                self.next_actor = None;
                self.last_winner = Some(winner);
            }
        }
        self.events.push(event.clone());
    }

    /// Hands the bottom pile to the bottom dealer once every card is dealt
    /// and every declaration window has closed.
    fn take_bottom_if_settled(&mut self) {
        if !self.phase().is_declaring() || !self.is_dealt() || !self.declaration.is_settled() {
            return;
        }
        if let Some(seat) = self.bottom_dealer() {
            info!(
                "take_bottom: seat={}, main_suit={:?}, stuck={:?}",
                seat, self.declaration.main_suit, self.declaration.stuck
            );
            self.apply(&RoundEvent::TakeBottom {
                seat,
                bottom: self.bottom,
            });
        }
    }

    pub fn verify_deal(&self, bottom: Cards) -> Result<(), RulesError> {
        if self.phase() != Phase::Dealing || self.first.is_some() {
            return Err(RulesError::PhaseMismatch("start dealing", self.phase()));
        }
        if bottom.len() != BOTTOM_SIZE {
            return Err(RulesError::IncompleteSelection {
                expected: BOTTOM_SIZE,
                actual: bottom.len(),
            });
        }
        Ok(())
    }

    /// Starts dealing from `first`, with `bottom` set aside.
    pub fn start_deal(&mut self, first: Seat, bottom: Cards) -> Result<(), RulesError> {
        self.verify_deal(bottom)?;
        info!("start_deal: first={}", first);
        self.apply(&RoundEvent::Deal { first, bottom });
        Ok(())
    }

    pub fn verify_receive(&self, seat: Seat, card: Card) -> Result<(), RulesError> {
        let first = match self.first {
            Some(first) if self.phase().is_declaring() && !self.is_dealt() => first,
            _ => return Err(RulesError::PhaseMismatch("deal a card", self.phase())),
        };
        let expected = Dealer::seat_for(first, self.dealt);
        if seat != expected {
            return Err(RulesError::OutOfTurn(expected, "card"));
        }
        if self.all_cards().count(card) >= 2 {
            return Err(RulesError::InvalidCardOwnership(card.into()));
        }
        Ok(())
    }

    /// Hands the next dealt card to `seat`.
    pub fn receive(&mut self, seat: Seat, card: Card, now: Timestamp) -> Result<(), RulesError> {
        self.verify_receive(seat, card)?;
        self.apply(&RoundEvent::Receive {
            seat,
            card: Some(card),
            at: now,
        });
        if self.is_dealt() {
            debug!("deal_complete: phase={:?}", self.phase());
            self.take_bottom_if_settled();
        }
        Ok(())
    }

    pub fn verify_call(
        &self,
        seat: Seat,
        joker: Card,
        pair: Card,
        now: Timestamp,
    ) -> Result<(), RulesError> {
        if self.phase() != Phase::Dealing {
            return Err(RulesError::PhaseMismatch("call the main", self.phase()));
        }
        self.declaration.verify_open(Timer::Call, now)?;
        verify_bid_cards(joker, pair)?;
        let bid = joker | pair | pair;
        let hand = self.hand(seat);
        if !hand.contains_all(bid) {
            return Err(RulesError::InvalidCardOwnership(bid - hand));
        }
        Ok(())
    }

    pub fn call_main(
        &mut self,
        seat: Seat,
        joker: Card,
        pair: Card,
        now: Timestamp,
    ) -> Result<&DeclarationState, RulesError> {
        self.verify_call(seat, joker, pair, now)?;
        info!("call_main: seat={}, joker={}, pair={}", seat, joker, pair);
        self.apply(&RoundEvent::Call {
            seat,
            joker,
            pair,
            at: now,
        });
        Ok(&self.declaration)
    }

    pub fn verify_counter(
        &self,
        seat: Seat,
        joker: Card,
        pair: Card,
        now: Timestamp,
    ) -> Result<(), RulesError> {
        if self.phase() != Phase::MainCalled {
            return Err(RulesError::PhaseMismatch("counter the main", self.phase()));
        }
        self.declaration.verify_open(Timer::Counter, now)?;
        if self.declaration.main_caller == Some(seat) {
            return Err(RulesError::PhaseMismatch("counter your own call", self.phase()));
        }
        verify_bid_cards(joker, pair)?;
        let hand = self.hand(seat);
        if hand.count(joker) < 2 {
            return Err(RulesError::InvalidBidComposition(
                "countering needs a pair of jokers",
            ));
        }
        let bid = pair | pair;
        if !hand.contains_all(bid) {
            return Err(RulesError::InvalidCardOwnership(bid - hand));
        }
        Ok(())
    }

    pub fn counter_main(
        &mut self,
        seat: Seat,
        joker: Card,
        pair: Card,
        now: Timestamp,
    ) -> Result<&DeclarationState, RulesError> {
        self.verify_counter(seat, joker, pair, now)?;
        info!(
            "counter_main: seat={}, joker={}, pair={}, previous_caller={:?}",
            seat, joker, pair, self.declaration.main_caller
        );
        self.apply(&RoundEvent::Counter {
            seat,
            joker,
            pair,
            at: now,
        });
        Ok(&self.declaration)
    }

    pub fn verify_fix(&self, seat: Seat, now: Timestamp) -> Result<(), RulesError> {
        if self.phase() != Phase::MainCalled {
            return Err(RulesError::PhaseMismatch("fix the main", self.phase()));
        }
        self.declaration.verify_open(Timer::Counter, now)?;
        let main_cards = match (self.declaration.main_caller, self.declaration.main_cards) {
            (Some(caller), Some(main_cards)) if caller == seat => main_cards,
            _ => {
                return Err(RulesError::PhaseMismatch(
                    "fix another player's call",
                    self.phase(),
                ))
            }
        };
        if self.hand(seat).count(main_cards.joker) < 2 {
            return Err(RulesError::InvalidBidComposition(
                "fixing needs a second joker of the called rank",
            ));
        }
        Ok(())
    }

    pub fn fix_main(&mut self, seat: Seat, now: Timestamp) -> Result<&DeclarationState, RulesError> {
        self.verify_fix(seat, now)?;
        info!(
            "fix_main: seat={}, main_suit={:?}",
            seat, self.declaration.main_suit
        );
        self.apply(&RoundEvent::Fix { seat, at: now });
        Ok(&self.declaration)
    }

    pub fn verify_stick(&self, seat: Seat, offered: Cards, now: Timestamp) -> Result<(), RulesError> {
        let state = &self.declaration;
        if !state.phase.can_stick() {
            return Err(RulesError::PhaseMismatch("stick", state.phase));
        }
        if state.stuck.is_some() {
            return Err(RulesError::PhaseMismatch("stick twice in one hand", state.phase));
        }
        if state.stick_deadline.is_none() {
            return Err(RulesError::DeadlineExpired(Timer::Stick.name()));
        }
        state.verify_open(Timer::Stick, now)?;
        let (caller, main_cards) = match (state.main_caller, state.main_cards) {
            (Some(caller), Some(main_cards)) if caller != seat => (caller, main_cards),
            _ => {
                return Err(RulesError::PhaseMismatch(
                    "stick against your own call",
                    state.phase,
                ))
            }
        };
        let ctx = self.trump_context();
        verify_stick_offer(offered, ctx)?;
        let hand = self.hand(seat);
        if !hand.contains_all(offered) {
            return Err(RulesError::InvalidCardOwnership(offered - hand));
        }
        verify_stick_hand(hand, ctx)?;
        if !self.hand(caller).contains_all(main_cards.stake()) {
            return Err(RulesError::InvalidBidComposition(
                "the caller no longer holds the bid cards",
            ));
        }
        Ok(())
    }

    /// Swaps `offered` for the caller's bid cards.
    pub fn stick_cards(
        &mut self,
        seat: Seat,
        offered: Cards,
        now: Timestamp,
    ) -> Result<&[Cards; 4], RulesError> {
        self.verify_stick(seat, offered, now)?;
        info!(
            "stick_cards: seat={}, offered={}, caller={:?}",
            seat, offered, self.declaration.main_caller
        );
        self.apply(&RoundEvent::Stick { seat, offered });
        self.take_bottom_if_settled();
        Ok(&self.hands)
    }

    /// Closes `timer`'s window if its deadline has passed. A timer that
    /// fires after the round has moved on does nothing and returns `false`.
    pub fn on_timer(&mut self, timer: Timer, now: Timestamp) -> bool {
        let phase = self.phase();
        let expected = match timer {
            Timer::Call => phase == Phase::Dealing,
            Timer::Counter => phase == Phase::MainCalled,
            Timer::Stick => phase.can_stick(),
        };
        let due = self
            .declaration
            .deadline(timer)
            .map_or(false, |deadline| now >= deadline);
        if !expected || !due {
            debug!(
                "stale_timer: timer={}, phase={:?}, deadline={:?}, now={}",
                timer,
                phase,
                self.declaration.deadline(timer),
                now
            );
            return false;
        }
        info!("window_closed: timer={}, now={}", timer, now);
        self.apply(&RoundEvent::WindowClosed { timer, at: now });
        match timer {
            Timer::Call => {
                info!("misdeal: no call before the window closed");
                self.apply(&RoundEvent::Misdeal);
            }
            Timer::Counter => {}
            Timer::Stick => self.take_bottom_if_settled(),
        }
        true
    }

    pub fn verify_bury(&self, seat: Seat, buried: Cards) -> Result<(), RulesError> {
        if self.phase() != Phase::BottomDeal {
            return Err(RulesError::PhaseMismatch("bury the bottom", self.phase()));
        }
        if let Some(dealer) = self.next_actor {
            if dealer != seat {
                return Err(RulesError::OutOfTurn(dealer, "bury"));
            }
        }
        if buried.len() != BOTTOM_SIZE {
            return Err(RulesError::IncompleteSelection {
                expected: BOTTOM_SIZE,
                actual: buried.len(),
            });
        }
        let hand = self.hand(seat);
        if !hand.contains_all(buried) {
            return Err(RulesError::InvalidCardOwnership(buried - hand));
        }
        Ok(())
    }

    /// Buries four cards as the new bottom and opens play with `seat` leading.
    pub fn confirm_bottom_deal(&mut self, seat: Seat, buried: Cards) -> Result<Phase, RulesError> {
        self.verify_bury(seat, buried)?;
        info!("confirm_bottom_deal: seat={}", seat);
        self.apply(&RoundEvent::Bury {
            seat,
            cards: buried,
        });
        Ok(self.phase())
    }

    /// The shape of `cards` as a lead, rejecting cards that form no pattern.
    pub fn legal_lead(&self, cards: Cards) -> Result<Classification, RulesError> {
        classify(cards, self.trump_context()).ok_or(RulesError::IllegalLead(cards))
    }

    pub fn verify_play(&self, seat: Seat, cards: Cards) -> Result<(), RulesError> {
        if self.phase() != Phase::Playing {
            return Err(RulesError::PhaseMismatch("play", self.phase()));
        }
        if let Some(next) = self.next_actor {
            if next != seat {
                return Err(RulesError::OutOfTurn(next, "play"));
            }
        }
        let hand = self.hand(seat);
        if !hand.contains_all(cards) {
            return Err(RulesError::InvalidCardOwnership(cards - hand));
        }
        match self.trick.lead().and_then(|play| play.shape) {
            None => self.legal_lead(cards).map(|_| ()),
            Some(lead) => {
                if cards.len() != lead.pattern.len() {
                    return Err(RulesError::IncompleteSelection {
                        expected: lead.pattern.len(),
                        actual: cards.len(),
                    });
                }
                if !is_valid_follow(cards, hand, lead, self.trump_context()) {
                    return Err(RulesError::IllegalFollow(cards));
                }
                Ok(())
            }
        }
    }

    pub fn play_cards(&mut self, seat: Seat, cards: Cards) -> Result<PlayResult, RulesError> {
        self.verify_play(seat, cards)?;
        debug!("play_cards: seat={}, cards={}", seat, cards);
        self.apply(&RoundEvent::Play { seat, cards });
        if !self.trick.is_complete() {
            return Ok(PlayResult {
                trick_complete: false,
                winner: None,
            });
        }
        let winner = self.trick.winning_seat();
        if let Some(winner) = winner {
            debug!("end_trick: winner={}, trick={:?}", winner, self.trick);
            self.apply(&RoundEvent::EndTrick { winner });
            if self.hands.iter().all(|hand| hand.is_empty()) {
                info!("hand_complete: last_winner={}", winner);
                self.apply(&RoundEvent::HandComplete { winner });
            }
        }
        Ok(PlayResult {
            trick_complete: true,
            winner,
        })
    }

    /// A legal play for `seat`, for a host whose player ran out of time.
    pub fn default_play(&self, seat: Seat) -> Option<Cards> {
        let hand = self.hand(seat);
        match self.trick.lead().and_then(|play| play.shape) {
            None => hand.into_iter().next().map(Cards::from),
            Some(lead) if hand.len() >= lead.pattern.len() => {
                Some(default_response(hand, lead, self.trump_context()))
            }
            Some(_) => None,
        }
    }
}
