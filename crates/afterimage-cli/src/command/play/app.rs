use afterimage_engine::SessionConfig;
use crossterm::event::Event;
use ratatui::Frame;

use crate::{
    command::play::screen::GameScreen,
    profile::{FileProfileStore, Profile},
    tui::{App, Tui},
};

#[derive(Debug)]
pub struct PlayApp {
    screen: GameScreen,
}

impl PlayApp {
    pub fn new(config: SessionConfig, profile: Profile, store: FileProfileStore) -> Self {
        Self {
            screen: GameScreen::new(config, profile, store),
        }
    }
}

impl App for PlayApp {
    fn should_exit(&self) -> bool {
        self.screen.is_exiting()
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: &Event) {
        self.screen.handle_event(event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.screen.update();
    }
}
