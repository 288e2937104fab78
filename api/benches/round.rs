use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use tuolaji_api::{
    Cards, Dealer, Phase, PlayerId, Round, RoundEvent, RulesConfig, Seat, Seed, Team, Timer,
};

fn dealt_round() -> Round {
    let config = RulesConfig::default();
    let mut round = Round::new(
        [PlayerId::null(); 4],
        Team::One,
        config.first_common_main,
        config,
    );
    let seed = Seed::Chosen {
        value: "bench".to_string(),
    };
    let dealer = Dealer::new(seed.shuffled_deck().unwrap(), Seat::North);
    round.start_deal(Seat::North, dealer.bottom()).unwrap();
    for (seat, card) in dealer {
        round.receive(seat, card, 0).unwrap();
    }
    round
}

pub fn deal(c: &mut Criterion) {
    c.bench_function("deal", |b| b.iter(dealt_round));
}

pub fn play_hand(c: &mut Criterion) {
    let mut round = dealt_round();
    let caller = Seat::VALUES.iter().copied().find_map(|seat| {
        let hand = round.hand(seat);
        let joker = hand.into_iter().find(|card| card.is_joker())?;
        let pair = (hand.pairs() - Cards::JOKERS).into_iter().next()?;
        Some((seat, joker, pair))
    });
    let (seat, joker, pair) = match caller {
        Some(caller) => caller,
        None => return,
    };
    round.call_main(seat, joker, pair, 0).unwrap();
    round.on_timer(Timer::Counter, u64::MAX / 2);
    round.on_timer(Timer::Stick, u64::MAX);
    let dealer = round.next_actor.unwrap();
    let buried = round.hand(dealer).into_iter().take(4).collect();
    round.confirm_bottom_deal(dealer, buried).unwrap();
    c.bench_function("play hand", |b| {
        b.iter_batched(
            || round.clone(),
            |mut round| {
                while round.phase() == Phase::Playing {
                    let seat = round.next_actor.unwrap();
                    let cards = round.default_play(seat).unwrap();
                    round.play_cards(seat, cards).unwrap();
                }
                round
            },
            BatchSize::SmallInput,
        );
    });
    let events = round.events.clone();
    c.bench_function("replay", |b| {
        b.iter(|| {
            Round::replay(
                round.players,
                round.banker_team,
                round.common_main,
                round.config,
                &events,
            )
        })
    });
    let event = RoundEvent::EndTrick { winner: seat };
    c.bench_function("apply", |b| {
        b.iter_batched(
            || round.clone(),
            |mut round| round.apply(&event),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, deal, play_hand);
criterion_main!(benches);
