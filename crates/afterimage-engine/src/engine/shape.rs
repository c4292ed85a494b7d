use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{Cell, CellSet, Grid};

/// An immutable connected polyomino, generated once per round.
///
/// Every cell is edge-adjacent to at least one other cell in the shape
/// (except when the shape is a single cell), and all cells lie within the
/// grid bounds the generator was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    cells: CellSet,
}

impl Shape {
    pub(crate) fn from_cells(cells: CellSet) -> Self {
        Self { cells }
    }

    /// Number of cells in the shape.
    #[must_use]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter()
    }

    #[must_use]
    pub fn cells(&self) -> &CellSet {
        &self.cells
    }
}

/// Grows random connected shapes on a bounded grid.
///
/// Growth starts from the grid center and repeatedly attaches a free
/// edge-adjacent neighbor of a randomly chosen placed cell, so the result is
/// connected by construction. A requested size beyond the grid capacity is
/// clamped, never an error.
#[derive(Debug, Clone)]
pub struct ShapeGenerator {
    rng: Pcg32,
    grid: Grid,
}

impl ShapeGenerator {
    /// Creates a generator seeded from the OS random source.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self::with_seed(grid, rand::rng().random())
    }

    /// Creates a generator with a fixed seed for reproducible rounds.
    #[must_use]
    pub fn with_seed(grid: Grid, seed: ShapeSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            grid,
        }
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Generates a connected shape of `size` cells (clamped to grid capacity).
    pub fn generate(&mut self, size: usize) -> Shape {
        let size = size.clamp(1, self.grid.capacity());
        let origin = self.grid.center();
        let mut placed = Vec::with_capacity(size);
        let mut cells = CellSet::new();
        placed.push(origin);
        cells.insert(origin);

        while cells.len() < size {
            // Scan placed cells cyclically from a random start, so a cell
            // with no free neighbors falls through to the next candidate.
            let start = self.rng.random_range(0..placed.len());
            for offset in 0..placed.len() {
                let anchor = placed[(start + offset) % placed.len()];
                let frontier: Vec<Cell> = self
                    .grid
                    .neighbors(anchor)
                    .filter(|cell| !cells.contains(*cell))
                    .collect();
                if frontier.is_empty() {
                    continue;
                }
                let next = frontier[self.rng.random_range(0..frontier.len())];
                placed.push(next);
                cells.insert(next);
                break;
            }
        }

        Shape::from_cells(cells)
    }
}

/// Seed for deterministic shape generation.
///
/// A 128-bit seed with a 32-character hex wire form. The same seed produces
/// the same shape sequence, which makes rounds reproducible in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeSeed([u8; 16]);

impl Serialize for ShapeSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for ShapeSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid seed: expected 32 hex characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid seed: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Distribution<ShapeSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeSeed {
        ShapeSeed(rng.random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_from_bytes(bytes: [u8; 16]) -> ShapeSeed {
        ShapeSeed(bytes)
    }

    #[test]
    fn test_generated_shapes_are_connected_and_sized() {
        let grid = Grid::new(8, 8);
        let mut generator = ShapeGenerator::new(grid);
        for size in 1..=grid.capacity() {
            let shape = generator.generate(size);
            assert_eq!(shape.size(), size, "size {size}");
            assert!(shape.cells().is_connected(), "size {size}");
            assert!(shape.iter().all(|cell| grid.contains(cell)), "size {size}");
        }
    }

    #[test]
    fn test_oversized_request_clamps_to_capacity() {
        let grid = Grid::new(3, 3);
        let mut generator = ShapeGenerator::new(grid);
        let shape = generator.generate(100);
        assert_eq!(shape.size(), grid.capacity());
        assert!(shape.cells().is_connected());
    }

    #[test]
    fn test_zero_request_still_produces_a_cell() {
        let mut generator = ShapeGenerator::new(Grid::DEFAULT);
        assert_eq!(generator.generate(0).size(), 1);
    }

    #[test]
    fn test_same_seed_generates_same_shapes() {
        let seed: ShapeSeed = rand::rng().random();
        let mut a = ShapeGenerator::with_seed(Grid::DEFAULT, seed);
        let mut b = ShapeGenerator::with_seed(Grid::DEFAULT, seed);
        for size in [1, 3, 5, 8, 13] {
            assert_eq!(a.generate(size), b.generate(size));
        }
    }

    #[test]
    fn test_narrow_grid_forces_restart_from_other_cells() {
        // A 1-wide grid exhausts one growth direction quickly, exercising
        // the cyclic fallback scan.
        let grid = Grid::new(1, 8);
        let mut generator = ShapeGenerator::new(grid);
        let shape = generator.generate(8);
        assert_eq!(shape.size(), 8);
        assert!(shape.cells().is_connected());
    }

    #[test]
    fn test_seed_hex_round_trip() {
        let seed = seed_from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

        let deserialized: ShapeSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
    }

    #[test]
    fn test_seed_rejects_malformed_hex() {
        for json in [
            "\"\"",
            "\"0123\"",
            "\"ghijklmnopqrstuvwxyzghijklmnopqr\"",
            "\"0123456789abcdef0123456789abcdef0\"",
        ] {
            let result: Result<ShapeSeed, _> = serde_json::from_str(json);
            assert!(result.is_err(), "{json}");
            assert!(result.unwrap_err().to_string().contains("invalid seed"));
        }
    }
}
