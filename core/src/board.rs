use core::ops::{Index, IndexMut};
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Row-major grid of [`Cell`]s with a fixed mine count.
///
/// Mines are placed exactly once, after which mine flags and adjacency counts never
/// change for the lifetime of the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    config: BoardConfig,
    mines_placed: bool,
}

impl Board {
    pub fn new(config: BoardConfig) -> Result<Self> {
        let config = config.validate()?;
        let cells = Array2::from_shape_fn(
            (config.rows as usize, config.cols as usize),
            |(row, col)| Cell::new((row as Coord, col as Coord)),
        );

        Ok(Self {
            cells,
            config,
            mines_placed: false,
        })
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn rows(&self) -> Coord {
        self.config.rows
    }

    pub fn cols(&self) -> Coord {
        self.config.cols
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn total_cells(&self) -> CellCount {
        self.config.total_cells()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.config.safe_cells()
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn is_in_bounds(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.is_in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// In-bounds Chebyshev neighbors of `coords`, row-major.
    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// The cell at `coords`, once mines are placed.
    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        self.check_placed()?;
        Ok(&self[coords])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.cells().filter(|cell| cell.is_revealed()).count() as CellCount
    }

    /// Places mines by rejection sampling: draw a uniformly random coordinate, skip it if
    /// it already holds a mine, repeat until `mine_count` distinct cells are mined.
    ///
    /// Terminates because a valid board always keeps at least one safe cell.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.check_not_placed()?;

        let (rows, cols) = self.size();
        let mut placed: CellCount = 0;
        let mut draws: u64 = 0;
        while placed < self.config.mines {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            draws += 1;
            let cell = &mut self[coords];
            if !cell.has_mine() {
                cell.set_mine();
                placed += 1;
            }
        }
        log::trace!("placed {} mines in {} draws", placed, draws);

        self.finish_placement();
        Ok(())
    }

    /// Places mines at exactly the given coordinates. Duplicates collapse, so the list
    /// must name `mine_count` distinct cells.
    pub fn place_mines_at(&mut self, mine_coords: &[Coord2]) -> Result<()> {
        self.check_not_placed()?;

        let mut mask: Array2<bool> = Array2::default(self.cells.dim());
        for &coords in mine_coords {
            let coords = self.validate_coords(coords)?;
            mask[coords.to_nd_index()] = true;
        }
        let distinct = mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        if distinct != self.config.mines {
            return Err(GameError::InvalidDimensions);
        }

        for (cell, &is_mine) in self.cells.iter_mut().zip(mask.iter()) {
            if is_mine {
                cell.set_mine();
            }
        }

        self.finish_placement();
        Ok(())
    }

    /// Counts mines among the neighbors of `coords`, straight from the mine flags.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        self.check_placed()?;
        Ok(self.mines_around(coords))
    }

    fn mines_around(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .filter(|&pos| self[pos].has_mine())
            .count() as u8
    }

    fn finish_placement(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if !self[coords].has_mine() {
                    let count = self.mines_around(coords);
                    self[coords].set_adjacent_mines(count);
                }
            }
        }
        self.mines_placed = true;
    }

    fn check_placed(&self) -> Result<()> {
        if self.mines_placed {
            Ok(())
        } else {
            Err(GameError::MinesNotPlaced)
        }
    }

    fn check_not_placed(&self) -> Result<()> {
        if self.mines_placed {
            Err(GameError::MinesAlreadyPlaced)
        } else {
            Ok(())
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn seeded_board(rows: Coord, cols: Coord, mines: CellCount, seed: u64) -> Board {
        let mut board = Board::new(BoardConfig::new(rows, cols, mines).unwrap()).unwrap();
        board.place_mines(&mut SmallRng::seed_from_u64(seed)).unwrap();
        board
    }

    #[test]
    fn new_board_is_all_hidden_and_safe() {
        let board = Board::new(BoardConfig::new(3, 4, 2).unwrap()).unwrap();

        assert_eq!(board.cells().count(), 12);
        assert!(board.cells().all(|cell| !cell.has_mine() && !cell.is_revealed()));
        assert!(!board.mines_placed());
        assert_eq!(board[(2, 3)].coords(), (2, 3));
    }

    #[test]
    fn new_rejects_invalid_dimensions() {
        for config in [
            BoardConfig::new_unchecked(0, 3, 0),
            BoardConfig::new_unchecked(3, 0, 0),
            BoardConfig::new_unchecked(-2, 3, 0),
            BoardConfig::new_unchecked(3, 3, 9),
        ] {
            assert_eq!(Board::new(config), Err(GameError::InvalidDimensions));
        }
    }

    #[test]
    fn placement_sets_exact_mine_count() {
        for seed in 0..32 {
            for difficulty in Difficulty::ALL {
                let config = difficulty.config();
                let board = seeded_board(config.rows, config.cols, config.mines, seed);
                let mines = board.cells().filter(|cell| cell.has_mine()).count();
                assert_eq!(mines as CellCount, config.mines);
            }
        }
    }

    #[test]
    fn placement_fills_all_but_one_cell() {
        let board = seeded_board(3, 3, 8, 7);

        let safe: Vec<_> = board.cells().filter(|cell| !cell.has_mine()).collect();
        assert_eq!(safe.len(), 1);
        assert_eq!(safe[0].adjacent_mine_count(), board.count_adjacent_mines(safe[0].coords()).ok());
    }

    #[test]
    fn adjacency_matches_brute_force_recount() {
        let board = seeded_board(16, 16, 40, 1234);
        let (rows, cols) = board.size();

        for cell in board.cells() {
            if cell.has_mine() {
                assert_eq!(cell.adjacent_mine_count(), None);
                continue;
            }
            let (row, col) = cell.coords();
            let mut expected = 0;
            for r in row - 1..=row + 1 {
                for c in col - 1..=col + 1 {
                    if (r, c) != (row, col)
                        && 0 <= r
                        && r < rows
                        && 0 <= c
                        && c < cols
                        && board[(r, c)].has_mine()
                    {
                        expected += 1;
                    }
                }
            }
            assert_eq!(cell.adjacent_mine_count(), Some(expected));
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        assert_eq!(seeded_board(8, 8, 10, 99), seeded_board(8, 8, 10, 99));
    }

    #[test]
    fn placing_twice_is_rejected() {
        let mut board = seeded_board(4, 4, 3, 5);
        let before = board.clone();

        assert_eq!(
            board.place_mines(&mut SmallRng::seed_from_u64(6)),
            Err(GameError::MinesAlreadyPlaced)
        );
        assert_eq!(board.place_mines_at(&[(0, 0)]), Err(GameError::MinesAlreadyPlaced));
        assert_eq!(board, before);
    }

    #[test]
    fn place_mines_at_validates_input() {
        let config = BoardConfig::new(3, 3, 2).unwrap();

        let mut board = Board::new(config).unwrap();
        assert_eq!(board.place_mines_at(&[(0, 0), (3, 0)]), Err(GameError::OutOfBounds));
        assert_eq!(board.place_mines_at(&[(0, 0), (0, 0)]), Err(GameError::InvalidDimensions));
        assert!(!board.mines_placed());

        board.place_mines_at(&[(0, 0), (2, 2)]).unwrap();
        assert_eq!(board[(1, 1)].adjacent_mine_count(), Some(2));
        assert_eq!(board[(0, 2)].adjacent_mine_count(), Some(0));
        assert_eq!(board[(0, 1)].adjacent_mine_count(), Some(1));
    }

    #[test]
    fn neighbors_and_bounds() {
        let board = Board::new(BoardConfig::new(5, 5, 0).unwrap()).unwrap();

        assert!(board.is_in_bounds((4, 4)));
        assert!(!board.is_in_bounds((5, 0)));
        assert!(!board.is_in_bounds((-1, 2)));
        assert_eq!(board.neighbors((0, 0)).collect::<Vec<_>>(), [(0, 1), (1, 0), (1, 1)]);
        assert_eq!(board.cell((0, 5)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn adjacency_is_unreadable_until_placement() {
        let mut board = Board::new(BoardConfig::new(3, 3, 8).unwrap()).unwrap();

        assert_eq!(board.cell((1, 1)), Err(GameError::MinesNotPlaced));
        assert_eq!(board.count_adjacent_mines((1, 1)), Err(GameError::MinesNotPlaced));
        assert_eq!(board.count_adjacent_mines((3, 1)), Err(GameError::OutOfBounds));
        assert!(board.cells().all(|cell| cell.adjacent_mine_count().is_none()));

        board.place_mines(&mut SmallRng::seed_from_u64(11)).unwrap();

        let safe = board.cells().find(|cell| !cell.has_mine()).unwrap().coords();
        assert_eq!(board.cell(safe).unwrap().adjacent_mine_count(), Some(board.count_adjacent_mines(safe).unwrap()));
        assert!(board.cell(safe).unwrap().adjacent_mine_count().is_some());
    }
}
