use picotris_engine::{PieceKind, PieceRotation, PieceShape};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::CellDisplay;

const TEMPLATE: usize = 4;

/// Preview of the next piece in its spawn rotation.
#[derive(Debug, Default)]
pub struct NextPieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> NextPieceDisplay<'a> {
    pub fn new() -> Self {
        Self {
            piece: None,
            block: None,
        }
    }

    pub fn piece(self, piece: PieceKind) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * CellDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        4 * CellDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Template rows and columns the shape covers in the spawn rotation.
fn occupied_extent(shape: PieceShape) -> (Vec<usize>, Vec<usize>) {
    let rotation = PieceRotation::SPAWN;
    let cols = (0..TEMPLATE)
        .filter(|&x| (0..TEMPLATE).any(|y| shape.is_occupied(rotation, x, y)))
        .collect();
    let rows = (0..TEMPLATE)
        .filter(|&y| (0..TEMPLATE).any(|x| shape.is_occupied(rotation, x, y)))
        .collect();
    (cols, rows)
}

impl Widget for NextPieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let shape = piece.shape();
        let (cols, rows) = occupied_extent(shape);

        let piece_area = area.centered(
            Constraint::Length(super::len_u16(cols.len()) * CellDisplay::width()),
            Constraint::Length(super::len_u16(rows.len()) * CellDisplay::height()),
        );
        let horizontal =
            Layout::horizontal(cols.iter().map(|_| Constraint::Length(CellDisplay::width())))
                .flex(Flex::Center);
        let vertical =
            Layout::vertical(rows.iter().map(|_| Constraint::Length(CellDisplay::height())));

        let occupied = CellDisplay::from_piece(piece);
        for (&y, row_area) in rows.iter().zip(piece_area.layout_vec(&vertical)) {
            for (&x, cell_area) in cols.iter().zip(row_area.layout_vec(&horizontal)) {
                if shape.is_occupied(PieceRotation::SPAWN, x, y) {
                    Widget::render(&occupied, cell_area, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_trims_empty_template_rows() {
        let (cols, rows) = occupied_extent(PieceKind::I.shape());
        assert_eq!(cols, vec![0, 1, 2, 3]);
        assert_eq!(rows, vec![1]);

        let (cols, rows) = occupied_extent(PieceKind::T.shape());
        assert_eq!(cols, vec![0, 1, 2]);
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn test_extent_of_vertical_spawn_shape() {
        let (cols, rows) = occupied_extent(PieceKind::J.shape());
        assert_eq!(cols, vec![0, 1]);
        assert_eq!(rows, vec![0, 1, 2]);
    }
}
