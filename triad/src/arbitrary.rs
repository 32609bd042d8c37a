use quickcheck::{Arbitrary, Gen};

use crate::{Card, Hero, Owner, Sides, Tier, ALL_TIERS, MAX_SIDE, NUM_CELLS};

/// A sequence of placement attempts. Cells may repeat, so some attempts are illegal.
#[derive(Clone, Debug)]
pub struct Placements(pub Vec<(usize, Owner, Card)>);

impl Arbitrary for Placements {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 16;
        let attempts = (0..len)
            .map(|_| {
                let cell = usize::arbitrary(g) % NUM_CELLS;
                (cell, Owner::arbitrary(g), Card::arbitrary(g))
            })
            .collect();
        Placements(attempts)
    }
}

impl Arbitrary for Tier {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&ALL_TIERS).unwrap()
    }
}

impl Arbitrary for Owner {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Owner::Player, Owner::Opponent]).unwrap()
    }
}

impl Arbitrary for Hero {
    fn arbitrary(g: &mut Gen) -> Self {
        let id = format!("hero-{}", u8::arbitrary(g) % 64);
        Hero::new(&id, "", Tier::arbitrary(g))
    }
}

impl Arbitrary for Card {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut side = || u8::arbitrary(g) % MAX_SIDE + 1;
        let sides = Sides::new(side(), side(), side(), side());
        Card::new(Hero::arbitrary(g), sides)
    }
}
