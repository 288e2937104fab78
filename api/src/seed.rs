use crate::{Card, Cards, Seat};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

pub const HAND_SIZE: usize = 26;
pub const BOTTOM_SIZE: usize = 4;
pub const DECK_SIZE: usize = 4 * HAND_SIZE + BOTTOM_SIZE;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Seed {
    Chosen { value: String },
    Random { value: String },
    Redacted,
}

impl Seed {
    pub fn random() -> Self {
        Seed::Random {
            value: Uuid::new_v4().to_string(),
        }
    }

    pub fn redact(&self) -> Self {
        match self {
            Seed::Random { .. } => Seed::Redacted,
            _ => self.clone(),
        }
    }

    pub fn as_bytes(&self) -> Option<[u8; 32]> {
        let value = match self {
            Seed::Chosen { value } | Seed::Random { value } => value,
            Seed::Redacted => return None,
        };
        Some(Sha256::digest(value.as_bytes()).into())
    }

    /// The generator this seed drives, `None` once redacted.
    pub fn rng(&self) -> Option<ChaCha20Rng> {
        self.as_bytes().map(ChaCha20Rng::from_seed)
    }

    /// A freshly shuffled double deck, identical for identical seeds.
    pub fn shuffled_deck(&self) -> Option<Vec<Card>> {
        let mut rng = self.rng()?;
        let mut deck = create_deck();
        shuffle(&mut deck, &mut rng);
        Some(deck)
    }
}

/// Two standard decks, each with its small and big joker.
pub fn create_deck() -> Vec<Card> {
    (0..2)
        .flat_map(|_| (0..Card::COUNT as u8).map(Card::from))
        .collect()
}

pub fn shuffle<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub hands: [Cards; 4],
    pub bottom: Cards,
}

/// Deals every card of `deck` at once, see [`Dealer`] for the order.
pub fn deal_hand(deck: &[Card], first: Seat) -> Deal {
    let mut dealer = Dealer::new(deck.to_vec(), first);
    let mut hands = [Cards::NONE; 4];
    for (seat, card) in &mut dealer {
        hands[seat.idx()] |= card;
    }
    Deal {
        hands,
        bottom: dealer.bottom(),
    }
}

/// Hands out a deck one card at a time, round-robin from `first`, keeping
/// the last four cards back as the bottom pile.
#[derive(Clone, Debug)]
pub struct Dealer {
    deck: Vec<Card>,
    first: Seat,
    dealt: usize,
}

impl Dealer {
    pub fn new(deck: Vec<Card>, first: Seat) -> Self {
        debug_assert_eq!(deck.len(), DECK_SIZE);
        Self {
            deck,
            first,
            dealt: 0,
        }
    }

    pub fn dealt(&self) -> usize {
        self.dealt
    }

    pub fn is_done(&self) -> bool {
        self.dealt >= self.deck.len().saturating_sub(BOTTOM_SIZE)
    }

    /// The cards set aside for the bottom pile.
    pub fn bottom(&self) -> Cards {
        let start = self.deck.len().saturating_sub(BOTTOM_SIZE);
        self.deck[start..].iter().copied().collect()
    }

    /// The seat that receives the `n`th dealt card.
    pub fn seat_for(first: Seat, n: usize) -> Seat {
        first.rotation()[n % 4]
    }
}

impl Iterator for Dealer {
    type Item = (Seat, Card);

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }
        let card = self.deck[self.dealt];
        let seat = Dealer::seat_for(self.first, self.dealt);
        self.dealt += 1;
        Some((seat, card))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Rank;

    #[test]
    fn test_create_deck() {
        let deck = create_deck();
        assert_eq!(deck.len(), DECK_SIZE);
        let cards: Cards = deck.iter().copied().collect();
        assert_eq!(cards, Cards::DECK);
        assert_eq!(cards.len(), 108);
        assert_eq!(cards.count(Card::BigJoker), 2);
        assert_eq!(cards.count(Card::SmallJoker), 2);
        assert_eq!(cards.rank(Rank::Ace).len(), 8);
    }

    #[test]
    fn test_deal_is_complete() {
        let deck = Seed::random().shuffled_deck().unwrap();
        let deal = deal_hand(&deck, Seat::East);
        for hand in &deal.hands {
            assert_eq!(hand.len(), HAND_SIZE);
        }
        assert_eq!(deal.bottom.len(), BOTTOM_SIZE);
        let all: Cards = deal.hands.iter().copied().collect::<Cards>() | deal.bottom;
        assert_eq!(all, Cards::DECK);
    }

    #[test]
    fn test_deal_is_round_robin() {
        let deck = create_deck();
        let dealt: Vec<_> = Dealer::new(deck.clone(), Seat::South).take(5).collect();
        assert_eq!(
            dealt,
            vec![
                (Seat::South, deck[0]),
                (Seat::West, deck[1]),
                (Seat::North, deck[2]),
                (Seat::East, deck[3]),
                (Seat::South, deck[4]),
            ]
        );
        let mut dealer = Dealer::new(deck.clone(), Seat::South);
        assert_eq!((&mut dealer).count(), 4 * HAND_SIZE);
        assert!(dealer.is_done());
        assert_eq!(dealer.next(), None);
        assert_eq!(dealer.bottom(), deck[104..].iter().copied().collect::<Cards>());
    }

    #[test]
    fn test_chosen_seed_replays() {
        let seed = Seed::Chosen {
            value: "tuolaji".to_string(),
        };
        assert_eq!(seed.shuffled_deck(), seed.shuffled_deck());
        let other = Seed::Chosen {
            value: "tuolaji2".to_string(),
        };
        assert_ne!(seed.shuffled_deck(), other.shuffled_deck());
        assert_eq!(seed.redact(), seed);
    }

    #[test]
    fn test_redacted_seed() {
        let seed = Seed::random().redact();
        assert_eq!(seed, Seed::Redacted);
        assert!(seed.rng().is_none());
        assert!(seed.shuffled_deck().is_none());
    }
}
