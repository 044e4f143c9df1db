use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::geometry::{BlockPos, positioned_blocks};

/// Column a freshly spawned piece's template is placed at.
pub const PIECE_SPAWN_X: i32 = 3;
/// Row a freshly spawned piece's template is placed at.
pub const PIECE_SPAWN_Y: i32 = 0;

/// A piece (tetromino) with position, rotation, and kind.
///
/// The position is the top-left corner of the piece's 4×4 template, in court
/// coordinates. Pieces are plain values: movement and rotation return new
/// `Piece` instances and the game state decides whether to keep them.
///
/// # Example
///
/// ```
/// use picotris_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::T);
/// let moved = piece.shifted(1, 0);
/// let rotated = moved.rotated_right();
/// assert_eq!(rotated.to_string(), "T#1@4,0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    x: i32,
    y: i32,
    rotation: PieceRotation,
}

impl Piece {
    /// Creates a piece of the given kind at the spawn position and rotation.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self::with_placement(kind, PIECE_SPAWN_X, PIECE_SPAWN_Y, PieceRotation::SPAWN)
    }

    #[must_use]
    pub const fn with_placement(kind: PieceKind, x: i32, y: i32, rotation: PieceRotation) -> Self {
        Self {
            kind,
            x,
            y,
            rotation,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub const fn mask(&self) -> u16 {
        self.kind.shape().mask(self.rotation)
    }

    /// Returns the absolute court positions this piece covers.
    #[must_use]
    pub fn positioned_blocks(&self) -> ArrayVec<BlockPos, 4> {
        positioned_blocks(self.mask(), self.x, self.y)
    }

    #[must_use]
    pub const fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        Self {
            rotation: self.rotation.rotated_right(),
            ..*self
        }
    }
}

/// Text form `kind#rotation@x,y`, e.g. `S#1@4,-1`.
impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.rotation.0,
            self.x,
            self.y
        )
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid piece `{input}`: {reason}")]
pub struct ParsePieceError {
    input: String,
    reason: &'static str,
}

impl FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ParsePieceError {
            input: s.to_owned(),
            reason,
        };

        let (kind, rest) = s.split_once('#').ok_or_else(|| err("missing '#'"))?;
        let (rotation, position) = rest.split_once('@').ok_or_else(|| err("missing '@'"))?;
        let (x, y) = position.split_once(',').ok_or_else(|| err("missing ','"))?;

        let mut kind_chars = kind.chars();
        let kind = match (kind_chars.next(), kind_chars.next()) {
            (Some(c), None) => PieceKind::from_char(c).ok_or_else(|| err("unknown piece kind"))?,
            _ => return Err(err("piece kind must be a single character")),
        };
        let rotation = rotation
            .parse::<u8>()
            .ok()
            .and_then(PieceRotation::from_index)
            .ok_or_else(|| err("rotation must be 0-3"))?;
        let x = x.parse().map_err(|_| err("invalid x coordinate"))?;
        let y = y.parse().map_err(|_| err("invalid y coordinate"))?;

        Ok(Self::with_placement(kind, x, y, rotation))
    }
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotating past `3` wraps back to `0`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceRotation(u8);

impl PieceRotation {
    pub const SPAWN: Self = Self(0);
    pub const COUNT: usize = 4;

    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        if self.0 == 3 { Self(0) } else { Self(self.0 + 1) }
    }

    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Kind of piece, indexed 0-6 in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

/// Uniform over all seven kinds.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::LEN {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the four rotation masks of this kind.
    #[must_use]
    pub const fn shape(self) -> PieceShape {
        PIECE_SHAPES[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use picotris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::Z.as_char(), 'Z');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Four rotations of a piece, each a 16-bit mask over a 4×4 template.
///
/// Rows are packed from the top nibble down, columns from the high bit of the
/// nibble down. The J-piece at rotation 0 is `0x44C0`:
///
/// ```text
/// 0100 = 0x4000
/// 0100 = 0x0400
/// 1100 = 0x00C0
/// 0000 = 0x0000
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape([u16; PieceRotation::COUNT]);

impl PieceShape {
    #[must_use]
    pub const fn mask(&self, rotation: PieceRotation) -> u16 {
        self.0[rotation.as_usize()]
    }

    #[must_use]
    pub const fn masks(&self) -> [u16; PieceRotation::COUNT] {
        self.0
    }

    /// Returns whether the template cell `(x, y)` is occupied in the given rotation.
    #[must_use]
    pub const fn is_occupied(&self, rotation: PieceRotation, x: usize, y: usize) -> bool {
        x < 4 && y < 4 && self.mask(rotation) & (0x8000 >> (y * 4 + x)) != 0
    }
}

const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = [
    // I-piece
    PieceShape([0x0F00, 0x2222, 0x00F0, 0x4444]),
    // J-piece
    PieceShape([0x44C0, 0x8E00, 0x6440, 0x0E20]),
    // L-piece
    PieceShape([0x4460, 0x0E80, 0xC440, 0x2E00]),
    // O-piece
    PieceShape([0xCC00, 0xCC00, 0xCC00, 0xCC00]),
    // S-piece
    PieceShape([0x06C0, 0x8C40, 0x6C00, 0x4620]),
    // T-piece
    PieceShape([0x0E40, 0x4C40, 0x4E00, 0x4640]),
    // Z-piece
    PieceShape([0x0C60, 0x4C80, 0xC600, 0x2640]),
];

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_every_shape_has_four_blocks() {
        for kind in PieceKind::ALL {
            for (rotation, mask) in kind.shape().masks().into_iter().enumerate() {
                assert_eq!(
                    mask.count_ones(),
                    4,
                    "{kind:?} rotation {rotation} has mask {mask:#06x}"
                );
            }
        }
    }

    #[test]
    fn test_catalog_order_matches_index() {
        for (index, kind) in PieceKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), index);
            assert_eq!(PieceKind::from_index(index), Some(kind));
        }
        assert_eq!(PieceKind::from_index(PieceKind::LEN), None);
    }

    #[test]
    fn test_rotation_wraps_after_four_steps() {
        let mut rotation = PieceRotation::SPAWN;
        let mut seen = vec![];
        for _ in 0..4 {
            seen.push(rotation.as_usize());
            rotation = rotation.rotated_right();
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(rotation, PieceRotation::SPAWN);
    }

    #[test]
    fn test_rotation_from_index() {
        assert_eq!(PieceRotation::from_index(3).map(PieceRotation::as_usize), Some(3));
        assert_eq!(PieceRotation::from_index(4), None);
    }

    #[test]
    fn test_new_piece_spawns_at_origin() {
        let piece = Piece::new(PieceKind::L);
        assert_eq!((piece.x(), piece.y()), (PIECE_SPAWN_X, PIECE_SPAWN_Y));
        assert_eq!(piece.rotation(), PieceRotation::SPAWN);
        assert_eq!(piece.mask(), 0x4460);
    }

    #[test]
    fn test_positioned_blocks_follow_shift() {
        let piece = Piece::new(PieceKind::O).shifted(2, 5);
        let blocks: Vec<_> = piece
            .positioned_blocks()
            .into_iter()
            .map(|b| (b.x, b.y))
            .collect();
        assert_eq!(blocks, vec![(5, 5), (6, 5), (5, 6), (6, 6)]);
    }

    #[test]
    fn test_shape_is_occupied() {
        let shape = PieceKind::T.shape();
        // 0000
        // 1110
        // 0100
        assert!(!shape.is_occupied(PieceRotation::SPAWN, 0, 0));
        assert!(shape.is_occupied(PieceRotation::SPAWN, 0, 1));
        assert!(shape.is_occupied(PieceRotation::SPAWN, 2, 1));
        assert!(shape.is_occupied(PieceRotation::SPAWN, 1, 2));
        assert!(!shape.is_occupied(PieceRotation::SPAWN, 3, 1));
        assert!(!shape.is_occupied(PieceRotation::SPAWN, 4, 0));
    }

    #[test]
    fn test_uniform_sampling_reaches_every_kind() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = [0_usize; PieceKind::LEN];
        for _ in 0..7000 {
            let kind: PieceKind = rng.random();
            counts[kind.index()] += 1;
        }
        for (index, count) in counts.iter().enumerate() {
            assert!(
                (700..1300).contains(count),
                "kind {index} drawn {count} times"
            );
        }
    }

    #[test]
    fn test_piece_text_form() {
        let piece = Piece::with_placement(PieceKind::S, 4, -1, PieceRotation(1));
        assert_eq!(piece.to_string(), "S#1@4,-1");
        assert_eq!("S#1@4,-1".parse::<Piece>().unwrap(), piece);
    }

    #[test]
    fn test_piece_serde_uses_text_form() {
        let piece = Piece::with_placement(PieceKind::Z, 3, 7, PieceRotation(2));
        let serialized = serde_json::to_string(&piece).unwrap();
        assert_eq!(serialized, "\"Z#2@3,7\"");
        let deserialized: Piece = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, piece);
    }

    #[test]
    fn test_piece_parse_error_cases() {
        assert!("S1@4,18".parse::<Piece>().is_err());
        assert!("S#1#4,18".parse::<Piece>().is_err());
        assert!("S#1@4".parse::<Piece>().is_err());
        assert!("X#1@4,18".parse::<Piece>().is_err());
        assert!("ST#1@4,18".parse::<Piece>().is_err());
        assert!("S#4@4,18".parse::<Piece>().is_err());
        assert!("S#1@abc,18".parse::<Piece>().is_err());
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }
}
