use crate::{Card, CardsSet, Color, HintValue, Rank, DECK_SIZE};

impl quickcheck::Arbitrary for Color {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Color::ALL).unwrap()
    }
}

impl quickcheck::Arbitrary for Rank {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Rank::ALL).unwrap()
    }
}

impl quickcheck::Arbitrary for Card {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Card::from_index(u8::arbitrary(g) % DECK_SIZE as u8)
    }
}

impl quickcheck::Arbitrary for CardsSet {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Vec::<Card>::arbitrary(g).into_iter().collect()
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let set = *self;
        Box::new(set.into_iter().map(move |card| set.remove(card)))
    }
}

impl quickcheck::Arbitrary for HintValue {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        if bool::arbitrary(g) {
            HintValue::Color(Color::arbitrary(g))
        } else {
            HintValue::Rank(Rank::arbitrary(g))
        }
    }
}
