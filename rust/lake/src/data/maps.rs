use crate::error::LakeError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Embedded preset boards, one string per row.
const PRESETS_JSON: &str = include_str!("../../data/maps.json");

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Frozen surface, safe to walk on.
    Frozen,
    Hole,
    Goal,
}

impl Cell {
    pub const ALL: [Cell; 3] = [Cell::Frozen, Cell::Hole, Cell::Goal];

    /// `S` marks the conventional start cell and is frozen surface underneath.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'F' | 'S' => Some(Cell::Frozen),
            'H' => Some(Cell::Hole),
            'G' => Some(Cell::Goal),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Cell::Frozen => 'F',
            Cell::Hole => 'H',
            Cell::Goal => 'G',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Named board presets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapName {
    #[default]
    Small,
    Medium,
    Large,
    Huge,
    Colossal,
}

impl MapName {
    pub const ALL: [MapName; 5] = [
        MapName::Small,
        MapName::Medium,
        MapName::Large,
        MapName::Huge,
        MapName::Colossal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MapName::Small => "small",
            MapName::Medium => "medium",
            MapName::Large => "large",
            MapName::Huge => "huge",
            MapName::Colossal => "colossal",
        }
    }
}

impl fmt::Display for MapName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapName {
    type Err = LakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MapName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| LakeError::unknown_name("map", s))
    }
}

/// Immutable rectangular board of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    n_cols: usize,
}

impl Grid {
    /// Fails on empty or ragged boards.
    pub fn new(cells: Vec<Vec<Cell>>) -> Result<Self, LakeError> {
        let n_cols = cells.first().map(|row| row.len()).unwrap_or(0);
        if n_cols == 0 {
            return Err(LakeError::configuration("grid must have at least one cell"));
        }

        if let Some((r, row)) = cells.iter().enumerate().find(|(_, row)| row.len() != n_cols) {
            return Err(LakeError::configuration(format!(
                "grid row {r} has {} cells, expected {n_cols}",
                row.len()
            )));
        }

        Ok(Self { cells, n_cols })
    }

    /// Parses rows of `F`, `H`, `G` (and `S`) symbols.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, LakeError> {
        let cells = rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.as_ref()
                    .chars()
                    .enumerate()
                    .map(|(c, symbol)| {
                        Cell::from_char(symbol).ok_or_else(|| {
                            LakeError::configuration(format!(
                                "unknown cell symbol '{symbol}' at ({r}, {c})"
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(cells)
    }

    pub fn preset(name: MapName) -> Result<Self, LakeError> {
        let presets: HashMap<String, Vec<String>> = serde_json::from_str(PRESETS_JSON)
            .map_err(|e| LakeError::configuration(format!("corrupt map presets: {e}")))?;
        let rows = presets
            .get(name.as_str())
            .ok_or_else(|| LakeError::unknown_name("map", name.as_str()))?;

        Self::parse(rows)
    }

    pub fn n_rows(&self) -> usize {
        self.cells.len()
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(|row| row.as_slice())
    }
}
