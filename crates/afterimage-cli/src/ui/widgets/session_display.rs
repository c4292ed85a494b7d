use afterimage_engine::{Cell, Phase, RoundOutcome, RoundSession};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::Text,
    widgets::{Block, Clear, Widget},
};

use crate::{
    profile::Profile,
    ui::widgets::{GridDisplay, GridView, HudDisplay, color, style},
};

/// The full play screen: grid panel, HUD panel, popup, and key help.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a RoundSession,
    cursor: Cell,
    profile: &'a Profile,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a RoundSession, cursor: Cell, profile: &'a Profile) -> Self {
        Self {
            session,
            cursor,
            profile,
        }
    }

    fn base_style(&self) -> Style {
        if self.profile.dark_theme {
            style::DARK
        } else {
            style::LIGHT
        }
    }

    fn border_color(&self) -> Color {
        if self.session.is_paused() {
            return color::YELLOW;
        }
        match self.session.phase() {
            Phase::Feedback(RoundOutcome::Passed) => color::GREEN,
            Phase::Feedback(RoundOutcome::Failed) | Phase::GameOver => color::RED,
            _ => color::WHITE,
        }
    }

    fn grid_view(&self) -> GridView<'_> {
        let session = self.session;
        match session.phase() {
            Phase::Memorizing if session.is_shape_visible() => match session.current_shape() {
                Some(shape) => GridView::Shape(shape),
                None => GridView::Hidden,
            },
            Phase::Recalling => GridView::Selection {
                selections: session.selections(),
                cursor: self.cursor,
            },
            Phase::Feedback(_) | Phase::GameOver => match session.current_shape() {
                Some(target) => GridView::Reveal {
                    target,
                    selections: session.selections(),
                },
                None => GridView::Hidden,
            },
            Phase::Idle | Phase::Memorizing => GridView::Hidden,
        }
    }

    fn popup_line(&self) -> Option<(String, Style)> {
        let session = self.session;
        if session.is_paused() {
            return Some((
                "PAUSED".into(),
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            ));
        }
        let accuracy_pct = session
            .last_score()
            .map(|score| (score.accuracy * 100.0).round())
            .unwrap_or_default();
        match session.phase() {
            Phase::Memorizing if !session.is_shape_visible() => Some((
                "GET READY".into(),
                Style::new().fg(color::BLACK).bg(color::WHITE),
            )),
            Phase::Feedback(RoundOutcome::Passed) => {
                let points = session.last_score().map_or(0, |score| score.points);
                Some((
                    format!("PASSED  +{points}"),
                    Style::new().fg(color::BLACK).bg(color::GREEN),
                ))
            }
            Phase::Feedback(RoundOutcome::Failed) => Some((
                format!("MISSED  {accuracy_pct:.0}%"),
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
            Phase::GameOver => Some((
                format!(
                    "GAME OVER  score {}  level {}",
                    session.score(),
                    session.level()
                ),
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
            _ => None,
        }
    }

    fn help_text(&self) -> &'static str {
        if self.session.is_paused() {
            return "P (Resume) | Q (Quit)";
        }
        match self.session.phase() {
            Phase::Memorizing => "Memorize the shape | P (Pause) | Q (Quit)",
            Phase::Recalling => {
                "Arrows (Move) | Space (Toggle) | Enter (Submit) | P (Pause) | Q (Quit)"
            }
            Phase::Feedback(_) => "Enter (Continue) | Q (Quit)",
            Phase::GameOver => "R (Retry level) | N (New game) | Q (Quit)",
            Phase::Idle => "",
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let base = self.base_style();
        let border_style = Style::new().fg(self.border_color());

        let grid_display = GridDisplay::new(self.session.grid(), self.grid_view());
        let hud_display = HudDisplay::new(self.session, base);

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(grid_display.height() + 2),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(area);

        let [grid_area, hud_area] = Layout::horizontal([
            Constraint::Length(grid_display.width() + 2),
            Constraint::Length(HudDisplay::width() + 2),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);

        let grid_block = Block::bordered().border_style(border_style).style(base);
        let hud_block = Block::bordered().border_style(border_style).style(base);

        let grid_inner = grid_block.inner(grid_area);
        let hud_inner = hud_block.inner(hud_area);
        grid_block.render(grid_area, buf);
        hud_block.render(hud_area, buf);
        Widget::render(&grid_display, grid_inner, buf);
        hud_display.render(hud_inner, buf);

        let help = Text::from(self.help_text())
            .style(Style::default().fg(color::GRAY))
            .centered();
        help.render(help_area, buf);

        if let Some((text, popup_style)) = self.popup_line() {
            let block = Block::new().style(popup_style);
            let text = Text::styled(text, popup_style).centered();
            let popup_area =
                grid_area.centered(Constraint::Length(grid_display.width()), Constraint::Length(3));
            let inner = block.inner(popup_area);
            Clear.render(popup_area, buf);
            block.render(popup_area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
