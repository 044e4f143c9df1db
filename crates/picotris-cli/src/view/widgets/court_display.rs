use std::iter;

use picotris_engine::{BlockPos, COURT_HEIGHT, COURT_WIDTH, Court, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::CellDisplay;

/// The court with the current piece drawn over it.
#[derive(Debug)]
pub struct CourtDisplay<'a> {
    court: &'a Court,
    current_piece: Option<Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> CourtDisplay<'a> {
    pub fn new(court: &'a Court) -> Self {
        Self {
            court,
            current_piece: None,
            block: None,
        }
    }

    pub fn current_piece(self, piece: Piece) -> Self {
        Self {
            current_piece: Some(piece),
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
        super::len_u16(COURT_WIDTH) * CellDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::len_u16(COURT_HEIGHT) * CellDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for CourtDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &CourtDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let piece_blocks = self
            .current_piece
            .map(|piece| piece.positioned_blocks())
            .unwrap_or_default();

        let col_constraints = (0..COURT_WIDTH).map(|_| Constraint::Length(CellDisplay::width()));
        let row_constraints = (0..COURT_HEIGHT).map(|_| Constraint::Length(CellDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<COURT_HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<COURT_WIDTH>(&horizontal));

        for ((y, grid_row), court_row) in iter::zip(0.., grid_cells).zip(self.court.rows()) {
            for ((x, grid_cell), &cell) in iter::zip(0.., grid_row).zip(court_row) {
                let cell_display = match self.current_piece {
                    Some(piece) if piece_blocks.contains(&BlockPos::new(x, y)) => {
                        CellDisplay::from_piece(piece.kind())
                    }
                    _ => CellDisplay::from_cell(cell, true),
                };
                cell_display.render(grid_cell, buf);
            }
        }
    }
}
