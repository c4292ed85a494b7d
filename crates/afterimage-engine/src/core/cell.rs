/// A single cell on the game grid.
///
/// The ordering is row-major (`y` first, then `x`), which gives ordered
/// cell sets a stable, top-to-bottom iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub y: u8,
    pub x: u8,
}

impl Cell {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { y, x }
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

/// Rectangular grid bounds.
///
/// The reference game plays on 8x8, but every algorithm in this crate takes
/// the bounds as a value rather than assuming a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    height: u8,
}

impl Grid {
    pub const DEFAULT: Self = Self {
        width: 8,
        height: 8,
    };

    /// Creates grid bounds, clamping each dimension to at least one cell.
    #[must_use]
    pub const fn new(width: u8, height: u8) -> Self {
        let width = if width == 0 { 1 } else { width };
        let height = if height == 0 { 1 } else { height };
        Self { width, height }
    }

    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Total number of cells the grid can hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub const fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// The cell shape growth starts from.
    #[must_use]
    pub const fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    /// The edge-adjacent neighbors of `cell` that lie within the bounds.
    pub fn neighbors(self, cell: Cell) -> impl Iterator<Item = Cell> {
        let Cell { x, y } = cell;
        [
            x.checked_sub(1).map(|x| Cell::new(x, y)),
            (x + 1 < self.width).then(|| Cell::new(x + 1, y)),
            y.checked_sub(1).map(|y| Cell::new(x, y)),
            (y + 1 < self.height).then(|| Cell::new(x, y + 1)),
        ]
        .into_iter()
        .flatten()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::DEFAULT
    }
}
