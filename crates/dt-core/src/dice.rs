//! Six-sided die rolls.
//!
//! Both the theme roll and the target roll draw from the same uniform
//! distribution over 1-6. The [`DieSource`] trait lets callers swap the
//! entropy source: [`RngDice`] for play, [`FixedDice`] for scripted runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{DtError, DtResult};

/// A single face of a six-sided die (1-6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DieFace(u8);

impl DieFace {
    /// Lowest face.
    pub const MIN: u32 = 1;
    /// Highest face.
    pub const MAX: u32 = 6;

    /// Validate a raw value as a die face.
    pub fn new(value: u32) -> DtResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DtError::InvalidDieFace(value))
        }
    }

    /// The face value.
    pub fn value(self) -> u32 {
        u32::from(self.0)
    }

    /// Whether this is the critical "1" face.
    pub fn is_one(self) -> bool {
        self.0 == 1
    }
}

impl TryFrom<u32> for DieFace {
    type Error = DtError;

    fn try_from(value: u32) -> DtResult<Self> {
        Self::new(value)
    }
}

impl From<DieFace> for u32 {
    fn from(face: DieFace) -> Self {
        face.value()
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that can produce a d6 roll.
pub trait DieSource {
    /// Roll one six-sided die.
    fn roll_die(&mut self) -> DieFace;
}

/// Uniform d6 backed by a standard RNG.
#[derive(Debug, Clone)]
pub struct RngDice {
    rng: StdRng,
}

impl RngDice {
    /// Deterministic dice for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Dice seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is given, otherwise from entropy.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl DieSource for RngDice {
    fn roll_die(&mut self) -> DieFace {
        DieFace(self.rng.random_range(1..=6u8))
    }
}

/// Replays a fixed sequence of faces, cycling back to the start.
#[derive(Debug, Clone)]
pub struct FixedDice {
    faces: Vec<DieFace>,
    next: usize,
}

impl FixedDice {
    /// Build from raw values; every value must be a valid face.
    pub fn new(values: impl IntoIterator<Item = u32>) -> DtResult<Self> {
        let faces = values
            .into_iter()
            .map(DieFace::new)
            .collect::<DtResult<Vec<_>>>()?;
        if faces.is_empty() {
            return Err(DtError::InvalidChoice(
                "fixed dice need at least one face".to_string(),
            ));
        }
        Ok(Self { faces, next: 0 })
    }

    /// Parse a comma-separated list such as `"3,1,4"`.
    pub fn parse(list: &str) -> DtResult<Self> {
        let values = list
            .split(',')
            .map(|s| {
                let s = s.trim();
                s.parse::<u32>()
                    .map_err(|_| DtError::InvalidChoice(format!("not a die face: '{s}'")))
            })
            .collect::<DtResult<Vec<_>>>()?;
        Self::new(values)
    }
}

impl DieSource for FixedDice {
    fn roll_die(&mut self) -> DieFace {
        let face = self.faces[self.next];
        self.next = (self.next + 1) % self.faces.len();
        face
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_bounds() {
        assert!(DieFace::new(0).is_err());
        assert!(DieFace::new(7).is_err());
        assert_eq!(DieFace::new(1).unwrap().value(), 1);
        assert_eq!(DieFace::new(6).unwrap().value(), 6);
        assert!(DieFace::new(1).unwrap().is_one());
        assert!(!DieFace::new(2).unwrap().is_one());
    }

    #[test]
    fn rng_rolls_stay_in_range() {
        let mut dice = RngDice::seeded(42);
        for _ in 0..500 {
            let face = dice.roll_die().value();
            assert!((1..=6).contains(&face));
        }
    }

    #[test]
    fn rng_covers_every_face() {
        let mut dice = RngDice::seeded(7);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[dice.roll_die().value() as usize - 1] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn rng_deterministic_with_seed() {
        let mut a = RngDice::seeded(99);
        let mut b = RngDice::seeded(99);
        for _ in 0..20 {
            assert_eq!(a.roll_die(), b.roll_die());
        }
    }

    #[test]
    fn fixed_dice_cycle() {
        let mut dice = FixedDice::new([2, 4]).unwrap();
        assert_eq!(dice.roll_die().value(), 2);
        assert_eq!(dice.roll_die().value(), 4);
        assert_eq!(dice.roll_die().value(), 2);
    }

    #[test]
    fn fixed_dice_rejects_bad_input() {
        assert!(FixedDice::new([]).is_err());
        assert!(FixedDice::new([3, 9]).is_err());
        assert!(FixedDice::parse("1,x").is_err());
    }

    #[test]
    fn fixed_dice_parse() {
        let mut dice = FixedDice::parse("3, 1 ,6").unwrap();
        assert_eq!(dice.roll_die().value(), 3);
        assert_eq!(dice.roll_die().value(), 1);
        assert_eq!(dice.roll_die().value(), 6);
    }

    #[test]
    fn face_serde_rejects_out_of_range() {
        let face: DieFace = serde_json::from_str("5").unwrap();
        assert_eq!(face.value(), 5);
        assert!(serde_json::from_str::<DieFace>("0").is_err());
    }
}
