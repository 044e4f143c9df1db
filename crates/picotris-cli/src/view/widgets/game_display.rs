use picotris_engine::{GameSession, GameState, Piece, PieceKind, PlayState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::widgets::{CourtDisplay, NextPieceDisplay, ScoreDisplay, color, style};

/// The whole game screen: court, next piece, score and the game-over popup.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    session: &'a GameSession,
    horizontal_padding: u16,
    vertical_padding: u16,
}

impl<'a> GameDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            horizontal_padding: 1,
            vertical_padding: 0,
        }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let game = self.session.game();
        let block_padding = Padding::symmetric(self.horizontal_padding, self.vertical_padding);
        let border_style = match game.play_state() {
            PlayState::Playing => color::WHITE,
            PlayState::Lost => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let mut court = CourtDisplay::new(game.court()).block(
            Block::bordered()
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let mut next_piece = NextPieceDisplay::new().block(panel("NEXT"));
        if let Some((current, next)) = visible_pieces(game) {
            court = court.current_piece(current);
            next_piece = next_piece.piece(next);
        }
        let score = ScoreDisplay::new(self.session).block(panel("SCORE"));

        let [center_column, right_column] = Layout::horizontal([
            Constraint::Length(court.width()),
            Constraint::Length(u16::max(next_piece.width(), score.width())),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [court_area] =
            Layout::vertical([Constraint::Length(court.height())]).areas(center_column);
        let [next_area, score_area] = Layout::vertical([
            Constraint::Length(next_piece.height()),
            Constraint::Length(score.height()),
        ])
        .spacing(1)
        .areas(right_column);
        let next_area = next_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(next_piece.width())]).flex(Flex::Start),
        )[0];

        let court_width = court.width();
        court.render(court_area, buf);
        next_piece.render(next_area, buf);
        score.render(score_area, buf);

        if game.is_lost() {
            let block = Block::new().style(style::GAME_OVER);
            let text = Text::from(vec![
                Line::from("GAME OVER"),
                Line::from("move to restart"),
            ])
            .style(style::GAME_OVER)
            .centered();
            let area = court_area.centered(Constraint::Length(court_width), Constraint::Length(4));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(2)), buf);
        }
    }
}

/// The current and next piece, or `None` once the game is lost.
fn visible_pieces(game: &GameState) -> Option<(Piece, PieceKind)> {
    game.is_playing().then(|| (*game.current_piece(), game.next_piece()))
}
