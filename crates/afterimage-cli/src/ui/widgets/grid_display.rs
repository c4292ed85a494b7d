use afterimage_engine::{Cell, CellSet, Grid, Shape};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::Widget,
};

use crate::ui::widgets::{color, style};

/// What the grid should show for the current phase.
#[derive(Debug, Clone, Copy)]
pub enum GridView<'a> {
    /// Idle or pre-reveal: nothing but the empty grid.
    Hidden,
    /// Memorize: the target shape.
    Shape(&'a Shape),
    /// Recall: the player's selections and cursor, shape hidden.
    Selection {
        selections: &'a CellSet,
        cursor: Cell,
    },
    /// Feedback and game over: target and selections overlaid.
    Reveal {
        target: &'a Shape,
        selections: &'a CellSet,
    },
}

/// Renders the play grid, two terminal columns per cell.
#[derive(Debug)]
pub struct GridDisplay<'a> {
    grid: Grid,
    view: GridView<'a>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(grid: Grid, view: GridView<'a>) -> Self {
        Self { grid, view }
    }

    pub fn width(&self) -> u16 {
        u16::from(self.grid.width()) * 2
    }

    pub fn height(&self) -> u16 {
        u16::from(self.grid.height())
    }

    fn cell_appearance(&self, cell: Cell) -> (Style, [&'static str; 2]) {
        let empty = (style::EMPTY_DOT, [".", " "]);
        let filled = |style| (style, [" ", " "]);
        match self.view {
            GridView::Hidden => empty,
            GridView::Shape(shape) => {
                if shape.contains(cell) {
                    filled(style::SHAPE)
                } else {
                    empty
                }
            }
            GridView::Selection { selections, cursor } => {
                let selected = selections.contains(cell);
                if cell == cursor {
                    let style = if selected {
                        style::SELECTED.fg(color::BLACK)
                    } else {
                        style::EMPTY_DOT.fg(color::WHITE)
                    };
                    return (style, ["[", "]"]);
                }
                if selected {
                    filled(style::SELECTED)
                } else {
                    empty
                }
            }
            GridView::Reveal { target, selections } => {
                match (target.contains(cell), selections.contains(cell)) {
                    (true, true) => filled(style::CORRECT),
                    (true, false) => filled(style::MISSED),
                    (false, true) => filled(style::WRONG),
                    (false, false) => empty,
                }
            }
        }
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        for y in 0..self.grid.height() {
            let row = area.y + u16::from(y);
            if row >= area.bottom() {
                break;
            }
            for x in 0..self.grid.width() {
                let col = area.x + u16::from(x) * 2;
                if col + 1 >= area.right() {
                    break;
                }
                let (style, symbols) = self.cell_appearance(Cell::new(x, y));
                for (offset, symbol) in (0u16..).zip(symbols) {
                    let buf_cell = &mut buf[(col + offset, row)];
                    buf_cell.set_style(style);
                    buf_cell.set_symbol(symbol);
                }
            }
        }
    }
}
