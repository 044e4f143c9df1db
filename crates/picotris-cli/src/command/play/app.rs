use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use picotris_engine::{GameSession, PlayerInput};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
};

use crate::{
    tui::{App, Tui},
    view::widgets::{GameDisplay, KeyBinding, KeyBindingDisplay},
};

const KEY_BINDINGS: &[KeyBinding<'static>] = &[
    (&["←", "A"], "Left"),
    (&["→", "D"], "Right"),
    (&["↑", "W", "X"], "Rotate"),
    (&["↓", "S"], "Drop"),
    (&["Q", "Esc"], "Quit"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Input(PlayerInput),
    Quit,
}

fn key_action(key: KeyEvent) -> Option<KeyAction> {
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Left | KeyCode::Char('a') => KeyAction::Input(PlayerInput::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') => KeyAction::Input(PlayerInput::MoveRight),
        KeyCode::Up | KeyCode::Char('w' | 'x') => KeyAction::Input(PlayerInput::Rotate),
        KeyCode::Down | KeyCode::Char('s') => KeyAction::Input(PlayerInput::Drop),
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}

#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    drop_interval: Duration,
    frame_interval: Duration,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession, drop_interval: Duration, frame_interval: Duration) -> Self {
        Self {
            session,
            drop_interval,
            frame_interval,
            is_exiting: false,
        }
    }

    pub fn into_session(self) -> GameSession {
        self.session
    }

    fn apply_key(&mut self, key: KeyEvent) {
        match key_action(key) {
            Some(KeyAction::Input(input)) => _ = self.session.handle_input(input),
            Some(KeyAction::Quit) => self.is_exiting = true,
            None => {}
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_drop_interval(Some(self.drop_interval));
        tui.set_frame_interval(Some(self.frame_interval));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        if let Some(key) = event.as_key_press_event() {
            self.apply_key(key);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(1)])
                .areas::<2>(frame.area());
        frame.render_widget(GameDisplay::new(&self.session), main_area);
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }

    fn drop_tick(&mut self, _tui: &mut Tui) {
        self.session.drop_tick();
    }
}

#[cfg(test)]
mod tests {
    use picotris_engine::{GameState, PieceSeed};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> PlayApp {
        PlayApp::new(
            GameSession::with_seed(PieceSeed::from_bytes([9; 16])),
            Duration::from_millis(300),
            Duration::from_millis(60),
        )
    }

    #[test]
    fn test_key_map() {
        let input = |code| key_action(key(code));
        assert_eq!(
            input(KeyCode::Left),
            Some(KeyAction::Input(PlayerInput::MoveLeft))
        );
        assert_eq!(
            input(KeyCode::Char('a')),
            Some(KeyAction::Input(PlayerInput::MoveLeft))
        );
        assert_eq!(
            input(KeyCode::Char('d')),
            Some(KeyAction::Input(PlayerInput::MoveRight))
        );
        assert_eq!(
            input(KeyCode::Char('x')),
            Some(KeyAction::Input(PlayerInput::Rotate))
        );
        assert_eq!(
            input(KeyCode::Up),
            Some(KeyAction::Input(PlayerInput::Rotate))
        );
        assert_eq!(
            input(KeyCode::Down),
            Some(KeyAction::Input(PlayerInput::Drop))
        );
        assert_eq!(input(KeyCode::Esc), Some(KeyAction::Quit));
        assert_eq!(input(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_action(event), Some(KeyAction::Quit));
        assert_eq!(key_action(key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_keys_drive_session() {
        let mut app = app();
        let start = *app.session.game().current_piece();

        app.apply_key(key(KeyCode::Right));
        app.apply_key(key(KeyCode::Down));

        assert_eq!(app.session.game().current_piece(), &start.shifted(1, 1));
        assert!(!app.should_exit());

        app.apply_key(key(KeyCode::Char('q')));
        assert!(app.should_exit());
    }

    #[test]
    fn test_drop_tick_reaches_session() {
        let mut app = app();
        let mut tui = Tui::new();
        app.drop_tick(&mut tui);
        assert_eq!(app.session.drop_ticks(), 1);
    }

    #[test]
    fn test_rotate_key_restarts_lost_game() {
        let mut game = GameState::with_seed(PieceSeed::from_bytes([9; 16]));
        while game.is_playing() {
            game.drop().unwrap();
        }
        let mut app = PlayApp::new(
            GameSession::from_game(game),
            Duration::from_millis(300),
            Duration::from_millis(60),
        );

        app.apply_key(key(KeyCode::Down));
        assert!(app.session.game().is_lost());

        app.apply_key(key(KeyCode::Up));
        assert!(app.session.game().is_playing());
        assert_eq!(app.session.games_started(), 2);
    }
}
