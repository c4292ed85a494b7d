use afterimage_engine::{RoundSession, STARTING_LIVES};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Paragraph, Widget},
};

/// The session readout next to the grid: level, score, lives, record, and
/// the active countdown.
#[derive(Debug)]
pub struct HudDisplay<'a> {
    session: &'a RoundSession,
    base: Style,
}

impl<'a> HudDisplay<'a> {
    pub fn new(session: &'a RoundSession, base: Style) -> Self {
        Self { session, base }
    }

    pub fn width() -> u16 {
        16
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let session = self.session;
        let lives: String = (0..STARTING_LIVES)
            .map(|i| if i < session.lives() { '\u{2665}' } else { '\u{2219}' })
            .collect();
        let timer = match (session.remaining_secs(), session.phase()) {
            (Some(secs), phase) => {
                let label = if phase.is_recalling() { "recall" } else { "look" };
                format!("{label:<6} {secs:>3}s")
            }
            (None, _) => String::new(),
        };
        vec![
            Line::from(format!("{:<6} {:>4}", "LEVEL", session.level())),
            Line::from(format!("{:<6} {:>4}", "SCORE", session.score())),
            Line::from(format!("{:<6} {:>4}", "LIVES", lives)),
            Line::from(format!("{:<6} {:>4}", "BEST", session.highest_level())),
            Line::from(String::new()),
            Line::from(timer),
        ]
    }
}

impl Widget for HudDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &HudDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Paragraph::new(Text::from(self.lines()))
            .style(self.base)
            .render(area, buf);
    }
}
