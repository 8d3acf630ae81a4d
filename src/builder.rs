use std::collections::BTreeMap;

use crate::cell::{Cell, ShipLength};
use crate::error::{InvalidSpec, SpecInvalidReason};
use crate::location::{Dimension, Location};
use crate::puzzle::{Fleet, Puzzle};

/// A builder for [`Puzzle`]s.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Problems found along the way are recorded rather than reported immediately; [`Self::build`] returns all of them.
#[derive(Clone, Debug)]
pub struct PuzzleBuilder {
    size: Dimension,
    row_tallies: Vec<usize>,
    col_tallies: Vec<usize>,
    hints: BTreeMap<Location, Cell>,
    fleet: Fleet,
    invalid_reasons: Vec<SpecInvalidReason>,
}

impl Default for PuzzleBuilder {
    fn default() -> Self {
        Self::with_size(Dimension::MIN.saturating_add(9))
    }
}

impl PuzzleBuilder {
    /// Start a puzzle on a `size` × `size` board with all-zero tallies, no hints and the [standard fleet](Fleet::standard).
    pub fn with_size(size: Dimension) -> Self {
        Self {
            size,
            row_tallies: vec![0; size.get()],
            col_tallies: vec![0; size.get()],
            hints: Default::default(),
            fleet: Fleet::standard(),
            invalid_reasons: Default::default(),
        }
    }

    /// Set the number of ship cells required in each row, top to bottom.
    pub fn row_tallies(&mut self, tallies: impl Into<Vec<usize>>) -> &mut Self {
        self.row_tallies = tallies.into();
        self
    }

    /// Set the number of ship cells required in each column, left to right.
    pub fn col_tallies(&mut self, tallies: impl Into<Vec<usize>>) -> &mut Self {
        self.col_tallies = tallies.into();
        self
    }

    /// Reveal the contents of the cell at `location`. A later hint at the same location replaces an earlier one.
    ///
    /// Records [`HintOutOfBounds`](SpecInvalidReason::HintOutOfBounds) if `location` is off the board.
    pub fn add_hint(&mut self, location: Location, hint: Cell) -> &mut Self {
        if !location.within(self.size.get()) {
            self.invalid_reasons.push(SpecInvalidReason::HintOutOfBounds { location });
            return self;
        }

        self.hints.insert(location, hint);
        self
    }

    /// Shorthand for [`Self::add_hint`] with [`Cell::Water`].
    pub fn add_water(&mut self, location: Location) -> &mut Self {
        self.add_hint(location, Cell::Water)
    }

    /// Remove any hint at `location`.
    pub fn clear_hint(&mut self, location: Location) -> &mut Self {
        self.hints.remove(&location);
        self
    }

    /// Replace the whole fleet.
    pub fn fleet(&mut self, fleet: Fleet) -> &mut Self {
        self.fleet = fleet;
        self
    }

    /// Require `count` more ships of `length`.
    pub fn add_ships(&mut self, length: ShipLength, count: usize) -> &mut Self {
        self.fleet.add(length, count);
        self
    }

    /// Check the validity of this builder so far.
    ///
    /// Returns `None` if no problem has been recorded yet, `Some(&Vec<SpecInvalidReason>)` otherwise.
    /// [`Self::build`] may still find problems that can only be judged once every part is in place, like the tally sums.
    pub fn is_valid(&self) -> Option<&Vec<SpecInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Puzzle`].
    pub fn build(&self) -> Result<Puzzle, InvalidSpec> {
        let built = Puzzle::new(
            self.size,
            self.row_tallies.clone(),
            self.col_tallies.clone(),
            self.hints.clone(),
            self.fleet.clone(),
        );

        if self.invalid_reasons.is_empty() {
            return built;
        }

        let mut reasons = self.invalid_reasons.clone();
        if let Err(InvalidSpec { reasons: more }) = built {
            reasons.extend(more);
        }
        Err(InvalidSpec { reasons })
    }
}
