use std::fmt;

use arrayvec::ArrayVec;

/// Absolute block coordinate on the court.
///
/// Coordinates are signed because a candidate placement may reach past the
/// left or top edge before the collision check rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
}

impl BlockPos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Side length of the square template a shape mask is laid out on.
pub const TEMPLATE_SIZE: i32 = 4;

/// Expands a 16-bit shape mask into absolute block positions.
///
/// The mask is read from the most significant bit down, row-major over a 4×4
/// template: bit 15 is column 0 of row 0, bit 12 is column 3 of row 0, bit 11
/// is column 0 of row 1 and so on. Every set bit yields
/// `(origin_x + col, origin_y + row)`.
///
/// At most four blocks are returned. Catalog masks have exactly four bits set.
///
/// # Example
///
/// ```
/// use picotris_engine::{BlockPos, positioned_blocks};
///
/// // 0100
/// // 0100
/// // 1100
/// // 0000
/// let blocks = positioned_blocks(0x44C0, 3, 0);
/// assert_eq!(
///     blocks.as_slice(),
///     &[
///         BlockPos::new(4, 0),
///         BlockPos::new(4, 1),
///         BlockPos::new(3, 2),
///         BlockPos::new(4, 2),
///     ]
/// );
/// ```
#[must_use]
pub fn positioned_blocks(mask: u16, origin_x: i32, origin_y: i32) -> ArrayVec<BlockPos, 4> {
    (0..16)
        .filter(|i| mask & (0x8000 >> i) != 0)
        .take(4)
        .map(|i| BlockPos::new(origin_x + i % TEMPLATE_SIZE, origin_y + i / TEMPLATE_SIZE))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(mask: u16) -> Vec<(i32, i32)> {
        positioned_blocks(mask, 0, 0)
            .into_iter()
            .map(|b| (b.x, b.y))
            .collect()
    }

    #[test]
    fn test_single_bits_map_row_major() {
        assert_eq!(blocks(0x8000), vec![(0, 0)]);
        assert_eq!(blocks(0x1000), vec![(3, 0)]);
        assert_eq!(blocks(0x0800), vec![(0, 1)]);
        assert_eq!(blocks(0x0010), vec![(3, 2)]);
        assert_eq!(blocks(0x0001), vec![(3, 3)]);
    }

    #[test]
    fn test_horizontal_bar() {
        assert_eq!(blocks(0x0F00), vec![(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_vertical_bar() {
        assert_eq!(blocks(0x2222), vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_origin_offset() {
        let blocks = positioned_blocks(0xCC00, -1, 5);
        assert_eq!(
            blocks.as_slice(),
            &[
                BlockPos::new(-1, 5),
                BlockPos::new(0, 5),
                BlockPos::new(-1, 6),
                BlockPos::new(0, 6),
            ]
        );
    }

    #[test]
    fn test_blocks_are_emitted_in_scan_order() {
        // 0000
        // 0110
        // 1100
        // 0000
        assert_eq!(blocks(0x06C0), vec![(1, 1), (2, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_caps_at_four_blocks() {
        assert_eq!(positioned_blocks(0xFFFF, 0, 0).len(), 4);
        assert!(positioned_blocks(0, 0, 0).is_empty());
    }
}
