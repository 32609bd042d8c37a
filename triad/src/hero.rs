use std::collections::HashSet;
use std::ops::Deref;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::RosterError;

/// The power rank of a [hero](Hero), from `D` (weakest) to `SSS` (strongest).
///
/// The ordering of the variants is the ordering of the ranks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tier {
    D,
    C,
    B,
    A,
    #[serde(rename = "A+")]
    APlus,
    S,
    #[serde(rename = "S+")]
    SPlus,
    SS,
    SSS,
}

pub static ALL_TIERS: [Tier; 9] = [
    Tier::D,
    Tier::C,
    Tier::B,
    Tier::A,
    Tier::APlus,
    Tier::S,
    Tier::SPlus,
    Tier::SS,
    Tier::SSS,
];

impl Tier {
    /// The side value that cards of this tier are centered on, 1 for `D` up to 9 for `SSS`.
    pub fn base_value(self) -> u8 {
        self as u8 + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::D => "D",
            Tier::C => "C",
            Tier::B => "B",
            Tier::A => "A",
            Tier::APlus => "A+",
            Tier::S => "S",
            Tier::SPlus => "S+",
            Tier::SS => "SS",
            Tier::SSS => "SSS",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error type for the [`FromStr`] instance of [`Tier`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTier(pub String);

impl std::error::Error for UnknownTier {}

impl std::fmt::Display for UnknownTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a hero tier", self.0)
    }
}

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_TIERS
            .iter()
            .copied()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| UnknownTier(String::from(s)))
    }
}

/// A hero from the roster. Only the id and tier matter to the game, the
/// name is for display.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hero {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub tier: Tier,
}

impl Hero {
    pub fn new(id: &str, name: &str, tier: Tier) -> Self {
        Self {
            id: String::from(id),
            name: String::from(name),
            tier,
        }
    }

    /// The name if there is one, the id otherwise.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// A validated list of heroes with unique, non-empty ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    heroes: Vec<Hero>,
}

impl Roster {
    pub fn new(heroes: Vec<Hero>) -> Result<Self, RosterError> {
        let mut seen = HashSet::with_capacity(heroes.len());
        for hero in &heroes {
            if hero.id.is_empty() {
                return Err(RosterError::EmptyHeroId);
            }
            if !seen.insert(hero.id.as_str()) {
                return Err(RosterError::DuplicateHeroId(hero.id.clone()));
            }
        }
        Ok(Self { heroes })
    }

    /// Parses a JSON array of `{"id": ..., "name": ..., "tier": ...}` objects.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let heroes: Vec<Hero> = serde_json::from_str(json)?;
        Ok(Self::new(heroes)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read roster file '{}'", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Invalid roster file '{}'", path.display()))
    }

    /// Loads the roster from `path` if given, otherwise returns [`Self::builtin()`].
    pub fn load_or_builtin(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    /// The heroes that ship with the game.
    pub fn builtin() -> Self {
        Self {
            heroes: BUILTIN_HEROES
                .iter()
                .map(|&(id, name, tier)| Hero::new(id, name, tier))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Hero> {
        self.heroes.iter().find(|hero| hero.id == id)
    }

    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }
}

impl Deref for Roster {
    type Target = [Hero];

    fn deref(&self) -> &Self::Target {
        &self.heroes
    }
}

static BUILTIN_HEROES: [(&str, &str, Tier); 24] = [
    ("rudy", "Rudy", Tier::SS),
    ("eileen", "Eileen", Tier::SSS),
    ("rachel", "Rachel", Tier::SS),
    ("dellons", "Dellons", Tier::SPlus),
    ("spike", "Spike", Tier::SSS),
    ("jave", "Jave", Tier::S),
    ("kris", "Kris", Tier::SPlus),
    ("ace", "Ace", Tier::S),
    ("yeonhee", "Yeonhee", Tier::APlus),
    ("karma", "Karma", Tier::A),
    ("teo", "Teo", Tier::SPlus),
    ("sun-wukong", "Sun Wukong", Tier::APlus),
    ("shane", "Shane", Tier::A),
    ("lina", "Lina", Tier::B),
    ("knox", "Knox", Tier::S),
    ("klahan", "Klahan", Tier::APlus),
    ("platin", "Platin", Tier::B),
    ("yu-shin", "Yu Shin", Tier::A),
    ("nia", "Nia", Tier::C),
    ("biscuit", "Biscuit", Tier::C),
    ("kyle", "Kyle", Tier::B),
    ("miho", "Miho", Tier::SS),
    ("jupy", "Jupy", Tier::D),
    ("pascal", "Pascal", Tier::D),
];
