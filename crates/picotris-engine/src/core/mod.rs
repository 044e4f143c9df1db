pub use self::{court::*, geometry::*, piece::*};

pub(crate) mod court;
pub(crate) mod geometry;
pub(crate) mod piece;

/// Width of the court in blocks.
pub const COURT_WIDTH: usize = 10;
/// Height of the court in blocks.
pub const COURT_HEIGHT: usize = 12;
