use itertools::Itertools;
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;

use crate::board::Board;
use crate::cell::Cell;
use crate::error::ValidationFailure;
use crate::location::Location;
use crate::puzzle::Fleet;

impl Board<'_> {
    /// Check this grid against its puzzle without trusting how it was filled.
    ///
    /// In order, stopping at the first failure:
    /// 1. every row, then every column, holds exactly its tally of ship cells;
    /// 2. no two ship cells touch diagonally, scanning 2x2 blocks in row-major order;
    /// 3. the ships, recovered as 4-connected groups of ship cells, are exactly the puzzle's fleet.
    ///    A group that does not lie in one row or one column counts as a ship of length 0, which no fleet asks for.
    ///
    /// Only cells holding [`Cell::Ship`] count as ship cells; [`Cell::Unknown`] counts as empty.
    /// A ship cell labelled with a length other than its group's size is logged, but the groups decide the fleet.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        self.check_tallies()?;
        self.check_diagonals()?;
        self.check_fleet()
    }

    fn check_tallies(&self) -> Result<(), ValidationFailure> {
        for (row, (cells, expected)) in self.grid.rows().into_iter().zip(&self.puzzle.row_tallies).enumerate() {
            let found = cells.iter().filter(|cell| cell.is_ship()).count();
            if found != *expected {
                return Err(ValidationFailure::RowTally { row, expected: *expected, found });
            }
        }

        for (col, (cells, expected)) in self.grid.columns().into_iter().zip(&self.puzzle.col_tallies).enumerate() {
            let found = cells.iter().filter(|cell| cell.is_ship()).count();
            if found != *expected {
                return Err(ValidationFailure::ColumnTally { col, expected: *expected, found });
            }
        }

        Ok(())
    }

    fn check_diagonals(&self) -> Result<(), ValidationFailure> {
        let ship_at = |r: usize, c: usize| self.grid[(r, c)].is_ship();
        let side = self.puzzle.size.get();

        for (r, c) in (0..side - 1).cartesian_product(0..side - 1) {
            if ship_at(r, c) && ship_at(r + 1, c + 1) {
                return Err(ValidationFailure::DiagonalTouch { location: Location(r, c) });
            }
            if ship_at(r, c + 1) && ship_at(r + 1, c) {
                return Err(ValidationFailure::DiagonalTouch { location: Location(r, c + 1) });
            }
        }

        Ok(())
    }

    pub(crate) fn check_fleet(&self) -> Result<(), ValidationFailure> {
        let found = self.ships()
            .into_iter()
            .map(|ship| {
                let length = if is_straight(&ship) { ship.len() } else { 0 };
                (length, 1)
            })
            .collect::<Fleet>();

        if found != self.puzzle.fleet {
            return Err(ValidationFailure::FleetMismatch { found, expected: self.puzzle.fleet.clone() });
        }

        Ok(())
    }

    /// Connected groups of ship cells, each listed in flood-fill order, groups ordered by their first cell in row-major order.
    pub(crate) fn ships(&self) -> Vec<Vec<Location>> {
        let side = self.puzzle.size.get();
        let mut graph: UnGraphMap<Location, ()> = UnGraphMap::new();

        for (index, cell) in self.grid.indexed_iter() {
            if cell.is_ship() {
                graph.add_node(Location::from(index));
            }
        }
        let nodes = graph.nodes().collect_vec();
        for location in nodes {
            for neighbor in location.orthogonal(side) {
                if graph.contains_node(neighbor) {
                    graph.add_edge(location, neighbor, ());
                }
            }
        }

        let mut visited = Array2::from_elem((side, side), false);
        let mut ships = Vec::new();
        for start in graph.nodes().sorted() {
            if visited[start.as_index()] {
                continue;
            }

            let mut ship = Vec::new();
            let mut bfs = Bfs::new(&graph, start);
            while let Some(location) = bfs.next(&graph) {
                visited[location.as_index()] = true;
                ship.push(location);
            }

            for location in &ship {
                if self.grid[location.as_index()] != (Cell::Ship { length: ship.len() }) {
                    log::warn!("cell {location} says length {} but is part of a ship of length {}", self.grid[location.as_index()].label(), ship.len());
                }
            }

            ships.push(ship);
        }

        ships
    }
}

/// Whether every location shares one row or one column.
fn is_straight(cells: &[Location]) -> bool {
    cells.iter().map(|location| location.0).all_equal() || cells.iter().map(|location| location.1).all_equal()
}
