use ndarray::{Array2, ArrayView2, Zip};

use crate::candidate::Candidate;
use crate::cell::Cell;
use crate::error::{Error, ShapeMismatch};
use crate::location::Location;
use crate::puzzle::Puzzle;
use crate::system::BinarySolver;

/// The contents of a puzzle's grid, however they were obtained.
///
/// A new board is [`Cell::Unknown`] everywhere except the hinted cells. Fill it from a solver with
/// [`load_candidates`](Self::load_candidates) or [`load_cell_model`](Self::load_cell_model), or cell by cell with [`set`](Self::set),
/// then check it with [`validate`](Self::validate).
#[derive(Clone, Debug)]
pub struct Board<'p> {
    pub(crate) puzzle: &'p Puzzle,
    pub(crate) grid: Array2<Cell>,
}

impl<'p> Board<'p> {
    /// A board for `puzzle` showing only its hints.
    pub fn new(puzzle: &'p Puzzle) -> Self {
        let side = puzzle.size.get();
        let mut grid = Array2::from_elem((side, side), Cell::Unknown);
        for (location, hint) in &puzzle.hints {
            grid[location.as_index()] = *hint;
        }

        Self { puzzle, grid }
    }

    /// The puzzle this board belongs to.
    pub fn puzzle(&self) -> &'p Puzzle {
        self.puzzle
    }

    /// The grid, indexed `(row, col)`.
    pub fn grid(&self) -> ArrayView2<'_, Cell> {
        self.grid.view()
    }

    /// The cell at `location`, or `None` off the board.
    pub fn get(&self, location: Location) -> Option<Cell> {
        self.grid.get(location.as_index()).copied()
    }

    /// Overwrite one cell. Returns `false` and changes nothing if `location` is off the board.
    pub fn set(&mut self, location: Location, cell: Cell) -> bool {
        match self.grid.get_mut(location.as_index()) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Replace the whole grid with water plus the given ships.
    ///
    /// Placements are trusted: where two overlap, the later one wins, and [`validate`](Self::validate) will see the damage.
    pub fn load_candidates<'c>(&mut self, ships: impl IntoIterator<Item = &'c Candidate>) {
        self.grid.fill(Cell::Water);

        for ship in ships {
            for location in &ship.cells {
                self.set(*location, Cell::Ship { length: ship.length });
            }
        }
    }

    /// Replace the whole grid from a per-cell formulation.
    ///
    /// `presence` says how likely each cell is to hold a ship and `type_value` estimates that ship's length.
    /// Cells with `presence < 0.5` become water; the rest take the label `type_value` rounds to, halves going to the even neighbour
    /// (see [`Cell::from_label`]).
    pub fn load_cell_model(&mut self, presence: ArrayView2<'_, f64>, type_value: ArrayView2<'_, f64>) -> Result<(), ShapeMismatch> {
        for dim in [presence.dim(), type_value.dim()] {
            if dim != self.grid.dim() {
                return Err(ShapeMismatch { expected: self.grid.dim(), found: dim });
            }
        }

        Zip::from(&mut self.grid)
            .and(&presence)
            .and(&type_value)
            .for_each(|cell, present, value| {
                *cell = if *present < 0.5 { Cell::Water } else { Cell::from_label(value.round_ties_even() as i64) };
            });

        Ok(())
    }
}

impl Puzzle {
    /// [`Solve`](Self::solve) this puzzle, lay the ships out on a fresh [`Board`], and [`validate`](Board::validate) it.
    pub fn solve_board<S: BinarySolver + ?Sized>(&self, solver: &mut S) -> Result<Board<'_>, Error> {
        let ships = self.solve(solver)?;

        let mut board = Board::new(self);
        board.load_candidates(&ships);
        board.validate()?;

        Ok(board)
    }
}
