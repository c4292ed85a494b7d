use std::collections::BTreeSet;

use crate::core::cell::Cell;

/// An ordered set of grid cells.
///
/// Backs both the target shape and the player's selections. Iteration order
/// is row-major and deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellSet {
    cells: BTreeSet<Cell>,
}

impl CellSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    /// Flips membership of `cell`, returning whether it is now present.
    pub fn toggle(&mut self, cell: Cell) -> bool {
        if self.cells.remove(&cell) {
            false
        } else {
            self.cells.insert(cell);
            true
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    #[must_use]
    pub fn intersection_len(&self, other: &Self) -> usize {
        self.cells.intersection(&other.cells).count()
    }

    #[must_use]
    pub fn union_len(&self, other: &Self) -> usize {
        self.cells.union(&other.cells).count()
    }

    /// Whether every cell is reachable from every other via edge-adjacent
    /// steps within the set. Empty and singleton sets count as connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.cells.iter().next().copied() else {
            return true;
        };
        let mut visited = BTreeSet::new();
        let mut stack = vec![start];
        visited.insert(start);
        while let Some(cell) = stack.pop() {
            for neighbor in adjacent(cell) {
                if self.cells.contains(&neighbor) && visited.insert(neighbor) {
                    stack.push(neighbor);
                }
            }
        }
        visited.len() == self.cells.len()
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

fn adjacent(cell: Cell) -> impl Iterator<Item = Cell> {
    let Cell { x, y } = cell;
    [
        x.checked_sub(1).map(|x| Cell::new(x, y)),
        x.checked_add(1).map(|x| Cell::new(x, y)),
        y.checked_sub(1).map(|y| Cell::new(x, y)),
        y.checked_add(1).map(|y| Cell::new(x, y)),
    ]
    .into_iter()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(cells: &[(u8, u8)]) -> CellSet {
        cells.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn test_toggle_flips_membership() {
        let mut cells = CellSet::new();
        assert!(cells.toggle(Cell::new(1, 1)));
        assert!(cells.contains(Cell::new(1, 1)));
        assert!(!cells.toggle(Cell::new(1, 1)));
        assert!(cells.is_empty());
    }

    #[test]
    fn test_intersection_and_union_lengths() {
        let a = set(&[(0, 0), (1, 0), (2, 0)]);
        let b = set(&[(1, 0), (2, 0), (3, 0)]);
        assert_eq!(a.intersection_len(&b), 2);
        assert_eq!(a.union_len(&b), 4);
    }

    #[test]
    fn test_empty_and_singleton_are_connected() {
        assert!(CellSet::new().is_connected());
        assert!(set(&[(4, 4)]).is_connected());
    }

    #[test]
    fn test_line_and_blob_are_connected() {
        assert!(set(&[(0, 0), (1, 0), (2, 0), (2, 1)]).is_connected());
        assert!(set(&[(3, 3), (4, 3), (3, 4), (4, 4)]).is_connected());
    }

    #[test]
    fn test_diagonal_only_is_not_connected() {
        assert!(!set(&[(0, 0), (1, 1)]).is_connected());
    }

    #[test]
    fn test_split_components_are_not_connected() {
        assert!(!set(&[(0, 0), (1, 0), (5, 5), (5, 6)]).is_connected());
    }
}
