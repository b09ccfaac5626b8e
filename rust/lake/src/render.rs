//! Plain text rendering of the board and the static catalogs.

use crate::data::Grid;
use crate::error::LakeError;
use std::str::FromStr;

/// What to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderObject {
    /// The board with the agent's cell highlighted.
    Environment,
    Actions,
    States,
}

impl FromStr for RenderObject {
    type Err = LakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "environment" | "board" => Ok(RenderObject::Environment),
            "actions" => Ok(RenderObject::Actions),
            "states" => Ok(RenderObject::States),
            _ => Err(LakeError::unknown_name("render object", s)),
        }
    }
}

fn digits(n: usize) -> usize {
    n.to_string().len()
}

/// `+---+------...--+`
fn border(n_rows: usize, n_cols: usize) -> String {
    format!(
        "+{}+{}+\n",
        "-".repeat(digits(n_rows - 1) + 2),
        "-".repeat((digits(n_rows * n_cols - 1) + 4) * n_cols)
    )
}

/// `|   | 0    1    2   ... |`
fn header(n_rows: usize, n_cols: usize) -> String {
    let width = digits(n_rows * n_cols - 1) + 3;
    let columns: String = (0..n_cols).map(|c| format!(" {c:<width$}")).collect();

    format!("|{}|{columns}|\n", " ".repeat(digits(n_rows - 1) + 2))
}

/// `| 0 |[F|0] F|1  F|2  H|3 |`
fn row(grid: &Grid, r: usize, marker: Option<usize>) -> String {
    let (n_rows, n_cols) = grid.shape();
    let width = digits(n_rows * n_cols - 1) + 4;
    let cells: String = (0..n_cols)
        .filter_map(|c| grid.cell(r, c).map(|cell| (c, cell)))
        .map(|(c, cell)| {
            let s = r * n_cols + c;
            let label = if marker == Some(c) {
                format!("[{cell}|{s}]")
            } else {
                format!(" {cell}|{s} ")
            };
            format!("{label:<width$}")
        })
        .collect();

    format!("| {r:<w$}|{cells}|\n", w = digits(n_rows - 1) + 1)
}

/// Renders the board, marking the cell at `position`.
pub fn board(grid: &Grid, position: Option<(usize, usize)>) -> String {
    let (n_rows, n_cols) = grid.shape();
    let mut out = border(n_rows, n_cols);
    out += &header(n_rows, n_cols);
    out += &border(n_rows, n_cols);
    for r in 0..n_rows {
        let marker = position.and_then(|(pr, pc)| (pr == r).then_some(pc));
        out += &row(grid, r, marker);
    }
    out += &border(n_rows, n_cols);

    out
}
