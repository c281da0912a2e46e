use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// Frequency quartile inside a level, 1 (most frequent) to 4 (least frequent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tier(u8);

impl Tier {
    pub const COUNT: u8 = 4;
    pub const MOST_FREQUENT: Tier = Tier(1);
    pub const LEAST_FREQUENT: Tier = Tier(4);

    pub fn new(n: u8) -> Option<Self> {
        (1..=Self::COUNT).contains(&n).then_some(Tier(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All tiers, most frequent first
    pub fn all() -> impl Iterator<Item = Tier> {
        (1..=Self::COUNT).map(Tier)
    }

    /// Directory / tag label, e.g. `Tier_2`
    pub fn label(self) -> String {
        format!("Tier_{}", self.0)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Tier::new(value).ok_or_else(|| format!("tier must be 1-4, got {value}"))
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.0
    }
}

/// Anything carrying a corpus frequency rank (lower = more common)
pub trait Ranked {
    fn frequency_rank(&self) -> Option<u32>;
}

impl<T: Ranked + ?Sized> Ranked for &T {
    fn frequency_rank(&self) -> Option<u32> {
        (**self).frequency_rank()
    }
}

impl Ranked for Option<u32> {
    fn frequency_rank(&self) -> Option<u32> {
        *self
    }
}

/// Tier of the entry at `position` in a rank-sorted population of `population` entries.
///
/// Position-based cut: `1 + floor(4 * position / population)`. Entries sharing a
/// rank across a cut point are split by load order.
pub fn quartile(position: usize, population: usize) -> Tier {
    debug_assert!(position < population);
    let bucket = position * Tier::COUNT as usize / population;
    Tier(bucket as u8 + 1)
}

/// Assign tiers to a complete level population.
///
/// Needs the whole population up front: cut points depend on its size.
/// The result is parallel to `population`. Unknown ranks sort last and always
/// land in tier 4.
pub fn assign_tiers<T: Ranked>(population: &[T]) -> Vec<Tier> {
    let n = population.len();
    let mut order: Vec<usize> = (0..n).collect();
    // stable, so equal ranks keep load order
    order.sort_by_key(|&idx| {
        let rank = population[idx].frequency_rank();
        (rank.is_none(), rank)
    });

    let mut tiers = vec![Tier::LEAST_FREQUENT; n];
    for (position, &idx) in order.iter().enumerate() {
        if population[idx].frequency_rank().is_some() {
            tiers[idx] = quartile(position, n);
        }
    }
    tiers
}

/// How a multi-kanji word derives its tier from its constituents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierStrategy {
    /// Hardest constituent wins
    #[default]
    Conservative,
    /// Mean of constituents, rounded up
    Average,
    /// First constituent only
    First,
}

impl TierStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierStrategy::Conservative => "conservative",
            TierStrategy::Average => "average",
            TierStrategy::First => "first",
        }
    }

    /// Combine constituent tiers, `None` when there are none
    pub fn combine(&self, tiers: &[Tier]) -> Option<Tier> {
        let first = *tiers.first()?;
        let combined = match self {
            TierStrategy::Conservative => tiers.iter().copied().max().unwrap_or(first),
            TierStrategy::Average => {
                let sum: usize = tiers.iter().map(|t| t.get() as usize).sum();
                let ceil = sum.div_ceil(tiers.len());
                Tier(ceil.clamp(1, Tier::COUNT as usize) as u8)
            }
            TierStrategy::First => first,
        };
        Some(combined)
    }
}

impl FromStr for TierStrategy {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Ok(TierStrategy::Conservative),
            "average" => Ok(TierStrategy::Average),
            "first" => Ok(TierStrategy::First),
            other => Err(DeckError::InvalidConfiguration(format!(
                "unknown tier strategy '{other}' (expected conservative, average or first)"
            ))),
        }
    }
}

impl fmt::Display for TierStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
