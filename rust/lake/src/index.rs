use crate::data::{Cell, Direction, Grid};
use crate::Discrete;

/// Row-major bijection between board coordinates and dense state ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateIndex {
    n_rows: usize,
    n_cols: usize,
    positions: Vec<(usize, usize)>,
    cells: Vec<Cell>,
}

impl StateIndex {
    pub fn new(grid: &Grid) -> Self {
        let (n_rows, n_cols) = grid.shape();
        let mut positions = Vec::with_capacity(n_rows * n_cols);
        let mut cells = Vec::with_capacity(n_rows * n_cols);
        for (r, row) in grid.rows().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                positions.push((r, c));
                cells.push(*cell);
            }
        }

        Self {
            n_rows,
            n_cols,
            positions,
            cells,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    pub fn position(&self, s: Discrete) -> Option<(usize, usize)> {
        self.positions.get(s).copied()
    }

    pub fn index(&self, row: usize, col: usize) -> Option<Discrete> {
        (row < self.n_rows && col < self.n_cols).then_some(row * self.n_cols + col)
    }

    pub fn cell(&self, s: Discrete) -> Option<Cell> {
        self.cells.get(s).copied()
    }

    /// Moves by `direction`, clamped to the board. Walking into a wall leaves you in place.
    pub fn moved(&self, s: Discrete, direction: Direction) -> Option<Discrete> {
        let (r, c) = self.position(s)?;
        let clamp = |x: usize, d: isize, n: usize| x.saturating_add_signed(d).min(n - 1);

        self.index(
            clamp(r, direction.0, self.n_rows),
            clamp(c, direction.1, self.n_cols),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MapName;

    #[test]
    fn indexing_is_a_bijection() {
        let grid = Grid::preset(MapName::Medium).unwrap();
        let index = StateIndex::new(&grid);

        assert_eq!(index.len(), 64);
        for s in 0..index.len() {
            let (r, c) = index.position(s).unwrap();
            assert_eq!(index.index(r, c), Some(s));
            assert_eq!(index.cell(s), grid.cell(r, c));
        }
        assert_eq!(index.position(64), None);
        assert_eq!(index.index(8, 0), None);
    }

    #[test]
    fn moves_clamp_at_the_border() {
        let grid = Grid::parse(&["FFF", "FFF"]).unwrap();
        let index = StateIndex::new(&grid);

        assert_eq!(index.moved(0, (0, -1)), Some(0));
        assert_eq!(index.moved(0, (-1, 0)), Some(0));
        assert_eq!(index.moved(0, (1, 0)), Some(3));
        assert_eq!(index.moved(2, (0, 1)), Some(2));
        assert_eq!(index.moved(5, (1, 0)), Some(5));
        assert_eq!(index.moved(4, (-1, 0)), Some(1));
        assert_eq!(index.moved(6, (0, 1)), None);
    }
}
