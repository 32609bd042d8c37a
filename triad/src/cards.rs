use serde::{Deserialize, Serialize};

use crate::{Hero, Mulberry32, Tier};

/// Prefix of the string that seeds card generation.
pub const CARD_SEED_NAMESPACE: &str = "tt";

pub const MIN_SIDE: u8 = 1;
pub const MAX_SIDE: u8 = 9;

/// One of the four edges of a card, and the direction of a neighbouring cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The side of a neighbouring card that touches this side.
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// The four strength values of a card, each in `1..=9`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sides {
    pub n: u8,
    pub e: u8,
    pub s: u8,
    pub w: u8,
}

impl Sides {
    pub fn new(n: u8, e: u8, s: u8, w: u8) -> Self {
        let sides = Self { n, e, s, w };
        debug_assert!(
            sides.values().iter().all(|v| (MIN_SIDE..=MAX_SIDE).contains(v)),
            "side values out of range: {}",
            sides
        );
        sides
    }

    pub fn get(self, dir: Direction) -> u8 {
        match dir {
            Direction::North => self.n,
            Direction::East => self.e,
            Direction::South => self.s,
            Direction::West => self.w,
        }
    }

    /// The values in n, e, s, w order.
    pub fn values(self) -> [u8; 4] {
        [self.n, self.e, self.s, self.w]
    }

    pub fn total(self) -> u32 {
        self.values().iter().map(|&v| u32::from(v)).sum()
    }

    /// Whether all four sides have the same value.
    pub fn is_flat(self) -> bool {
        self.n == self.e && self.e == self.s && self.s == self.w
    }
}

impl std::fmt::Display for Sides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{} e{} s{} w{}", self.n, self.e, self.s, self.w)
    }
}

/// A hero card. Cards are generated once per match and never change.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub hero: Hero,
    pub sides: Sides,
}

impl Card {
    pub fn new(hero: Hero, sides: Sides) -> Self {
        Self { hero, sides }
    }

    pub fn side(&self, dir: Direction) -> u8 {
        self.sides.get(dir)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] ({})",
            self.hero.display_name(),
            self.hero.tier,
            self.sides
        )
    }
}

/// Derives the card for a hero, see [`generate_sides()`].
pub fn generate_card(hero: &Hero) -> Card {
    Card::new(hero.clone(), generate_sides(&hero.id, hero.tier))
}

/// Deterministically derives the sides of a hero's card from its id and tier.
///
/// Each side is the tier's [base value](Tier::base_value) plus a uniform offset
/// in `-2..=2`, plus one for tiers with a base of 8 or more and minus one for
/// tiers with a base of 3 or less, clamped to `1..=9`. A card whose four sides
/// came out equal has its north side raised and its south side lowered by one.
///
/// The randomness comes from a [`Mulberry32`] seeded with `"tt::<id>::<tier>"`,
/// so the same hero always gets the same card.
pub fn generate_sides(hero_id: &str, tier: Tier) -> Sides {
    let base = i32::from(tier.base_value());
    let bias = if base >= 8 {
        1
    } else if base <= 3 {
        -1
    } else {
        0
    };
    let mut rng =
        Mulberry32::from_str_seed(&format!("{}::{}::{}", CARD_SEED_NAMESPACE, hero_id, tier));
    let mut roll = || clamp_side(base + rng.below(5) as i32 - 2 + bias);

    let mut sides = Sides {
        n: roll(),
        e: roll(),
        s: roll(),
        w: roll(),
    };
    if sides.is_flat() {
        sides.n = clamp_side(i32::from(sides.n) + 1);
        sides.s = clamp_side(i32::from(sides.s) - 1);
    }
    sides
}

fn clamp_side(value: i32) -> u8 {
    value.clamp(i32::from(MIN_SIDE), i32::from(MAX_SIDE)) as u8
}

/// Shorthand for creating a card with the given sides.
///
/// The hero gets the given id as id and name, and tier A (which does not matter
/// once the sides are fixed).
/// ```
/// # use triad::{card, Direction};
/// let card = card!("rudy", [5, 7, 3, 2]);
/// assert_eq!(card.side(Direction::East), 7);
/// assert_eq!(card.hero.id, "rudy");
/// ```
#[macro_export]
macro_rules! card {
    ($id:literal, [$n:expr, $e:expr, $s:expr, $w:expr]) => {
        $crate::Card::new(
            $crate::Hero::new($id, $id, $crate::Tier::A),
            $crate::Sides::new($n, $e, $s, $w),
        )
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use card;

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::ALL_TIERS;

    quickcheck! {
        fn generation_is_deterministic(hero_id: String, tier: Tier) -> bool {
            generate_sides(&hero_id, tier) == generate_sides(&hero_id, tier)
        }

        fn sides_in_range(hero_id: String, tier: Tier) -> bool {
            generate_sides(&hero_id, tier)
                .values()
                .iter()
                .all(|v| (MIN_SIDE..=MAX_SIDE).contains(v))
        }

        fn sides_never_flat(hero_id: String, tier: Tier) -> bool {
            !generate_sides(&hero_id, tier).is_flat()
        }
    }

    #[test]
    fn known_cards() {
        assert_eq!(generate_sides("rudy", Tier::SS), Sides::new(9, 9, 7, 7));
        assert_eq!(generate_sides("eileen", Tier::SSS), Sides::new(9, 9, 9, 8));
        assert_eq!(generate_sides("karma", Tier::D), Sides::new(2, 1, 1, 1));
        assert_eq!(generate_sides("kris", Tier::A), Sides::new(3, 4, 5, 2));
        assert_eq!(generate_sides("teo", Tier::SPlus), Sides::new(9, 5, 5, 6));
        assert_eq!(generate_sides("jave", Tier::B), Sides::new(4, 3, 1, 4));
    }

    #[test]
    fn generate_card_keeps_hero() {
        let hero = Hero::new("rudy", "Rudy", Tier::SS);
        let card = generate_card(&hero);
        assert_eq!(card.hero, hero);
        assert_eq!(card.sides, generate_sides("rudy", Tier::SS));
    }

    #[test]
    fn higher_tiers_are_stronger_on_average() {
        let average = |tier: Tier| {
            let total: u32 = (0..500)
                .map(|i| generate_sides(&format!("hero-{}", i), tier).total())
                .sum();
            f64::from(total) / 2000.0
        };
        let averages: Vec<f64> = ALL_TIERS.iter().map(|&t| average(t)).collect();
        assert!(averages[8] > averages[0]);
        assert!(averages[8] > 8.0);
        assert!(averages[0] < 2.0);
        // Only non-strict, since neighbouring tiers can clamp to the same range
        for pair in averages.windows(2) {
            assert!(pair[0] <= pair[1] + 0.2, "{:?}", averages);
        }
    }

    #[test]
    fn opposite_directions() {
        for dir in Direction::ALL {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
        }
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn card_macro() {
        let c = card!("x", [5, 7, 3, 2]);
        assert_eq!(c.sides.values(), [5, 7, 3, 2]);
        assert_eq!(c.side(Direction::West), 2);
        assert_eq!(c.to_string(), "x [A] (n5 e7 s3 w2)");
    }
}
