use afterimage_engine::{Cell, Phase, RoundEvent, RoundSession, SessionConfig};
use crossterm::event::{Event, KeyCode};
use ratatui::Frame;

use crate::{
    profile::{FileProfileStore, Profile, ProfileStore as _},
    ui::widgets::SessionDisplay,
};

/// The playable screen: one session, a cursor, and the persisted profile.
#[derive(Debug)]
pub struct GameScreen {
    session: RoundSession,
    cursor: Cell,
    profile: Profile,
    store: FileProfileStore,
    is_exiting: bool,
}

impl GameScreen {
    pub fn new(config: SessionConfig, profile: Profile, store: FileProfileStore) -> Self {
        let session = RoundSession::new(config);
        let cursor = config.grid.center();
        Self {
            session,
            cursor,
            profile,
            store,
            is_exiting: false,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.is_exiting
    }

    pub fn update(&mut self) {
        // Rounds chain automatically; feedback and game over wait for input.
        if self.session.phase().is_idle() && !self.session.is_paused() {
            self.session.start_round();
        }
        self.session.tick();
        for event in self.session.take_events() {
            self.apply_event(event);
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        let Some(event) = event.as_key_event() else {
            return;
        };

        let paused = self.session.is_paused();
        let recalling = self.session.phase().is_recalling() && !paused;
        let in_feedback = matches!(self.session.phase(), Phase::Feedback(_));
        let game_over = self.session.phase().is_game_over();
        let can_pause = self.session.phase().is_memorizing() || self.session.phase().is_recalling();

        match event.code {
            KeyCode::Left => self.move_cursor(-1, 0),
            KeyCode::Right => self.move_cursor(1, 0),
            KeyCode::Up => self.move_cursor(0, -1),
            KeyCode::Down => self.move_cursor(0, 1),
            KeyCode::Char(' ') if recalling => self.session.toggle_cell(self.cursor),
            // Submitting an empty selection is reserved for the timer.
            KeyCode::Enter if recalling && !self.session.selections().is_empty() => {
                self.session.submit();
            }
            KeyCode::Enter | KeyCode::Char(' ') if in_feedback => {
                self.session.acknowledge_feedback();
            }
            KeyCode::Char('p') if can_pause => {
                if paused {
                    self.session.resume();
                } else {
                    self.session.pause();
                }
            }
            KeyCode::Char('r') if game_over => self.session.retry_level(),
            KeyCode::Char('n') if game_over => self.session.new_game(),
            KeyCode::Char('m') => {
                self.profile.sound_enabled = !self.profile.sound_enabled;
                self.save_profile();
            }
            KeyCode::Char('t') => {
                self.profile.dark_theme = !self.profile.dark_theme;
                self.save_profile();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame<'_>) {
        let display = SessionDisplay::new(&self.session, self.cursor, &self.profile);
        frame.render_widget(display, frame.area());
    }

    fn apply_event(&mut self, event: RoundEvent) {
        match event {
            RoundEvent::RecordReached { level } => {
                self.profile.highest_level = level;
                self.save_profile();
            }
            RoundEvent::RoundPassed { .. } | RoundEvent::RoundFailed { .. } => {
                if self.profile.sound_enabled {
                    ring_bell();
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, dx: i16, dy: i16) {
        let grid = self.session.grid();
        let x = clamped_add(self.cursor.x, dx, grid.width() - 1);
        let y = clamped_add(self.cursor.y, dy, grid.height() - 1);
        self.cursor = Cell::new(x, y);
    }

    fn save_profile(&self) {
        // A failed write only loses the record, never the session.
        let _ = self.store.save(&self.profile);
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamped_add(value: u8, delta: i16, max: u8) -> u8 {
    let moved = i16::from(value) + delta;
    moved.clamp(0, i16::from(max)) as u8
}

/// Terminal bell, fire-and-forget.
fn ring_bell() {
    use std::io::Write as _;

    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(b"\x07");
    let _ = stdout.flush();
}
