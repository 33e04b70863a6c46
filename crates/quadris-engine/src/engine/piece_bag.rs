use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Supplies pieces with the 7-bag rule.
///
/// The bag starts with all 7 kinds. Each draw picks one of the remaining kinds
/// uniformly at random and removes it; once the bag is empty it is refilled
/// with all 7 kinds. Every consecutive group of 7 draws starting from a fresh
/// bag therefore contains each kind exactly once.
///
/// # Example
///
/// ```
/// use std::collections::HashSet;
///
/// use quadris_engine::PieceBag;
///
/// let mut bag = PieceBag::new();
/// let kinds: HashSet<_> = (0..7).map(|_| bag.draw()).collect();
/// assert_eq!(kinds.len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg32,
    remaining: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBag {
    /// Creates a full bag with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut this = Self {
            rng: Pcg32::from_seed(seed.0),
            remaining: ArrayVec::new(),
        };
        this.refill();
        this
    }

    fn refill(&mut self) {
        self.remaining.clear();
        self.remaining.extend(PieceKind::ALL);
    }

    /// Number of kinds left before the next refill.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    /// Draws the next piece kind, refilling the bag first if it is empty.
    pub fn draw(&mut self) -> PieceKind {
        if self.remaining.is_empty() {
            self.refill();
        }
        let index = self.rng.random_range(0..self.remaining.len());
        self.remaining.remove(index)
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the bag's random number generator. The same seed always
/// produces the same piece sequence. It serializes as, and parses from, a
/// 32-character hexadecimal string.
///
/// # Example
///
/// ```
/// use quadris_engine::{GameSession, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
///
/// let session1 = GameSession::with_seed(seed);
/// let session2 = GameSession::with_seed(seed);
/// assert_eq!(session1.current_piece(), session2.current_piece());
/// assert_eq!(session1.next_piece(), session2.next_piece());
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl fmt::Debug for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PieceSeed({self})")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed '{input}': expected 32 hexadecimal characters")]
pub struct ParseSeedError {
    #[error(not(source))]
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}
