use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Random source for newly spawned pieces.
///
/// Every draw picks one of the seven kinds uniformly and independently of the
/// previous draws.
///
/// # Example
///
/// ```
/// use picotris_engine::{PieceSeed, PieceSource};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = PieceSource::with_seed(seed);
/// let mut b = PieceSource::with_seed(seed);
/// assert_eq!(a.draw(), b.draw());
/// ```
#[derive(Debug, Clone)]
pub struct PieceSource {
    seed: PieceSeed,
    rng: Pcg32,
    drawn: usize,
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceSource {
    /// Creates a piece source with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible sequence.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
            drawn: 0,
        }
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Number of pieces drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    pub fn draw(&mut self) -> PieceKind {
        self.drawn += 1;
        self.rng.random()
    }
}

/// 128-bit seed for [`PieceSource`].
///
/// Written as 32 hexadecimal digits, both in its text form and when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid seed `{input}`: expected 32 hexadecimal digits")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
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
