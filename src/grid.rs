//! The manor floor plan: placed rooms plus a discovery mask.

use crate::rooms::{antechamber, entrance, RoomArchetype};
use thiserror::Error;

/// Grid coordinates as (row, col).
pub type Position = (usize, usize);

/// Orthogonal offsets as (d_row, d_col): up, right, down, left.
const DIR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Refused placements. Each one means a caller skipped a check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("cell ({0}, {1}) is outside the grid")]
    OutOfBounds(usize, usize),
    #[error("cell ({0}, {1}) holds the exit and cannot be replaced")]
    ExitProtected(usize, usize),
    #[error("cell ({0}, {1}) already holds a room")]
    AlreadyPlaced(usize, usize),
    #[error("room {name} has rarity {rarity}, expected 0 to 3")]
    MalformedRoom { name: String, rarity: u8 },
}

/// True when `a` and `b` share an edge.
pub fn is_adjacent(a: Position, b: Position) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Indexed as cells[row][col]
    cells: Vec<Vec<Option<RoomArchetype>>>,
    discovered: Vec<Vec<bool>>,
    start: Position,
    exit: Position,
}

impl Grid {
    /// Builds an empty floor with the entrance at the bottom-left corner and
    /// the exit in the middle of the top row. Needs at least two rows.
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(2);
        let cols = cols.max(1);
        let start = (rows - 1, 0);
        let exit = (0, cols / 2);

        let mut grid = Self {
            rows,
            cols,
            cells: vec![vec![None; cols]; rows],
            discovered: vec![vec![false; cols]; rows],
            start,
            exit,
        };
        grid.set_cell(start, Some(entrance()), true);
        grid.set_cell(exit, Some(antechamber()), true);
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn exit(&self) -> Position {
        self.exit
    }

    pub fn in_bounds(&self, (row, col): Position) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get_room(&self, (row, col): Position) -> Option<&RoomArchetype> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    pub fn is_discovered(&self, (row, col): Position) -> bool {
        self.discovered
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Places a room on an empty cell and marks it discovered.
    ///
    /// Placed rooms are permanent: the exit and any already-filled cell
    /// are refused.
    pub fn place_room(&mut self, pos: Position, room: RoomArchetype) -> Result<(), PlacementError> {
        let (row, col) = pos;
        if !self.in_bounds(pos) {
            return Err(PlacementError::OutOfBounds(row, col));
        }
        if pos == self.exit {
            return Err(PlacementError::ExitProtected(row, col));
        }
        if self.get_room(pos).is_some() {
            return Err(PlacementError::AlreadyPlaced(row, col));
        }
        if !room.is_well_formed() {
            return Err(PlacementError::MalformedRoom {
                name: room.name,
                rarity: room.rarity,
            });
        }

        log::info!("placed {} at ({}, {})", room.name, row, col);
        self.set_cell(pos, Some(room), true);
        Ok(())
    }

    /// Marks a cell discovered without placing anything in it.
    pub fn discover(&mut self, (row, col): Position) {
        if let Some(flag) = self.discovered.get_mut(row).and_then(|r| r.get_mut(col)) {
            *flag = true;
        }
    }

    /// Writes a cell verbatim. Only used when restoring a saved game, which
    /// may legitimately overwrite any cell.
    pub(crate) fn set_cell(
        &mut self,
        (row, col): Position,
        room: Option<RoomArchetype>,
        discovered: bool,
    ) {
        if row >= self.rows || col >= self.cols {
            return;
        }
        // A placed room is always visible
        self.discovered[row][col] = discovered || room.is_some();
        self.cells[row][col] = room;
    }

    /// In-bounds orthogonal neighbours of `pos`.
    pub fn neighbors(&self, (row, col): Position) -> Vec<Position> {
        DIR_OFFSETS
            .iter()
            .filter_map(|&(d_row, d_col)| {
                let r = row as i32 + d_row;
                let c = col as i32 + d_col;
                if r >= 0 && c >= 0 && (r as usize) < self.rows && (c as usize) < self.cols {
                    Some((r as usize, c as usize))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Option<&RoomArchetype>, bool)> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| {
                (
                    (row, col),
                    self.cells[row][col].as_ref(),
                    self.discovered[row][col],
                )
            })
        })
    }

    pub fn room_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.iter().flatten().filter(|d| **d).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::RoomType;

    fn hallway() -> RoomArchetype {
        RoomArchetype::new("Hallway", RoomType::Neutral)
    }

    #[test]
    fn test_new_grid_fixed_rooms() {
        let grid = Grid::new(5, 9);
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.cols(), 9);
        assert_eq!(grid.start(), (4, 0));
        assert_eq!(grid.exit(), (0, 4));

        assert_eq!(grid.get_room((4, 0)).unwrap().room_type, RoomType::Start);
        assert_eq!(grid.get_room((0, 4)).unwrap().room_type, RoomType::Exit);
        assert!(grid.is_discovered((4, 0)));
        assert!(grid.is_discovered((0, 4)));
        assert_eq!(grid.room_count(), 2);
        assert_eq!(grid.discovered_count(), 2);
    }

    #[test]
    fn test_undiscovered_cells_are_empty() {
        let grid = Grid::new(5, 9);
        for (pos, room, discovered) in grid.cells() {
            if !discovered {
                assert!(room.is_none(), "{:?} has a room but is hidden", pos);
            }
        }
    }

    #[test]
    fn test_out_of_bounds_queries() {
        let grid = Grid::new(5, 9);
        assert!(grid.get_room((5, 0)).is_none());
        assert!(grid.get_room((0, 9)).is_none());
        assert!(!grid.is_discovered((100, 100)));
        assert!(!grid.in_bounds((5, 9)));
    }

    #[test]
    fn test_place_room_discovers_cell() {
        let mut grid = Grid::new(5, 9);
        assert!(!grid.is_discovered((4, 1)));
        grid.place_room((4, 1), hallway()).unwrap();
        assert!(grid.is_discovered((4, 1)));
        assert_eq!(grid.get_room((4, 1)).unwrap().name, "Hallway");
    }

    #[test]
    fn test_exit_cannot_be_overwritten() {
        let mut grid = Grid::new(5, 9);
        assert_eq!(
            grid.place_room((0, 4), hallway()),
            Err(PlacementError::ExitProtected(0, 4))
        );
        assert!(grid.get_room((0, 4)).unwrap().is_exit());
    }

    #[test]
    fn test_placed_rooms_are_permanent() {
        let mut grid = Grid::new(5, 9);
        assert_eq!(
            grid.place_room((4, 0), hallway()),
            Err(PlacementError::AlreadyPlaced(4, 0))
        );
        grid.place_room((3, 0), hallway()).unwrap();
        let other = RoomArchetype::new("Other", RoomType::Corridor);
        assert_eq!(
            grid.place_room((3, 0), other),
            Err(PlacementError::AlreadyPlaced(3, 0))
        );
        assert_eq!(grid.get_room((3, 0)).unwrap().name, "Hallway");
    }

    #[test]
    fn test_place_out_of_bounds_and_malformed() {
        let mut grid = Grid::new(5, 9);
        assert_eq!(
            grid.place_room((5, 0), hallway()),
            Err(PlacementError::OutOfBounds(5, 0))
        );
        let odd = hallway().with_rarity(9);
        assert!(matches!(
            grid.place_room((2, 2), odd),
            Err(PlacementError::MalformedRoom { rarity: 9, .. })
        ));
        assert!(!grid.is_discovered((2, 2)));
    }

    #[test]
    fn test_discover_without_room() {
        let mut grid = Grid::new(5, 9);
        grid.discover((2, 2));
        assert!(grid.is_discovered((2, 2)));
        assert!(grid.get_room((2, 2)).is_none());
        // Ignored when out of bounds
        grid.discover((50, 50));
    }

    #[test]
    fn test_adjacency() {
        assert!(is_adjacent((2, 2), (2, 3)));
        assert!(is_adjacent((2, 2), (1, 2)));
        assert!(!is_adjacent((2, 2), (2, 4)));
        assert!(!is_adjacent((2, 2), (3, 3)));
        assert!(!is_adjacent((2, 2), (2, 2)));
    }

    #[test]
    fn test_neighbors_at_corner_and_centre() {
        let grid = Grid::new(5, 9);
        let mut corner = grid.neighbors((4, 0));
        corner.sort();
        assert_eq!(corner, vec![(3, 0), (4, 1)]);
        assert_eq!(grid.neighbors((2, 4)).len(), 4);
    }

    #[test]
    fn test_tiny_grid_keeps_start_and_exit_apart() {
        let grid = Grid::new(1, 1);
        assert_eq!(grid.rows(), 2);
        assert_ne!(grid.start(), grid.exit());
    }
}
