pub use self::{grid_display::*, hud_display::*, session_display::*};

mod grid_display;
mod hud_display;
mod session_display;

mod color {
    use ratatui::style::Color;

    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const DARK_GRAY: Color = Color::Rgb(48, 48, 48);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DARK: Style = fg_bg(color::WHITE, color::BLACK);
    pub const LIGHT: Style = fg_bg(color::BLACK, color::WHITE);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const SHAPE: Style = bg_only(color::CYAN);
    pub const SELECTED: Style = bg_only(color::YELLOW);
    pub const CORRECT: Style = bg_only(color::GREEN);
    pub const WRONG: Style = bg_only(color::RED);
    pub const MISSED: Style = bg_only(color::DARK_GRAY);
}
