use alloc::vec;
use alloc::vec::Vec;

use crate::*;

/// Result of revealing a single cell, before any burst.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SingleReveal {
    AlreadyRevealed,
    Mine,
    Safe(u8),
}

/// Reveal rules applied to a board with placed mines: the one-way `Hidden -> Revealed`
/// transition, burst expansion, and the end-of-game mine sweep.
///
/// The engine only flips cells and reports what it flipped; scoring and status belong to
/// [`GameSession`].
#[derive(Debug)]
pub struct RevealEngine<'a> {
    board: &'a mut Board,
}

impl<'a> RevealEngine<'a> {
    pub fn new(board: &'a mut Board) -> Result<Self> {
        if board.mines_placed() {
            Ok(Self { board })
        } else {
            Err(GameError::MinesNotPlaced)
        }
    }

    pub fn board(&self) -> &Board {
        self.board
    }

    pub fn reveal_one(&mut self, coords: Coord2) -> Result<SingleReveal> {
        let coords = self.board.validate_coords(coords)?;
        let cell = &mut self.board[coords];

        if cell.is_revealed() {
            return Ok(SingleReveal::AlreadyRevealed);
        }

        cell.reveal();
        Ok(match (cell.has_mine(), cell.adjacent_mine_count()) {
            (true, _) => SingleReveal::Mine,
            (false, count) => SingleReveal::Safe(count.unwrap_or_default()),
        })
    }

    /// Flood fill from a revealed zero cell, appending every newly revealed cell to
    /// `revealed` and returning how many there were.
    ///
    /// Uses an explicit stack, so depth is bounded by the heap rather than the call
    /// stack. A cell's `revealed` flag is set before it is pushed and doubles as the
    /// visited guard. Mine cells are never revealed here.
    pub fn burst(&mut self, origin: Coord2, revealed: &mut Vec<RevealedCell>) -> CellCount {
        if !self.board.is_in_bounds(origin) {
            return 0;
        }
        let origin_cell = self.board[origin];
        if !origin_cell.is_revealed() || !origin_cell.is_empty_safe() {
            return 0;
        }

        let mut opened: CellCount = 0;
        let mut to_visit = vec![origin];

        while let Some(center) = to_visit.pop() {
            for pos in self.board.neighbors(center) {
                let cell = &mut self.board[pos];
                if cell.is_revealed() || cell.has_mine() {
                    continue;
                }

                cell.reveal();
                opened += 1;
                revealed.push(RevealedCell::from(&*cell));

                if cell.is_empty_safe() {
                    to_visit.push(pos);
                }
            }
        }

        log::trace!("burst from {:?} opened {} cells", origin, opened);
        opened
    }

    /// Reveals every still-hidden mine for display after a loss. Does not touch safe
    /// cells.
    pub fn reveal_all_mines(&mut self, revealed: &mut Vec<RevealedCell>) {
        let (rows, cols) = self.board.size();
        for row in 0..rows {
            for col in 0..cols {
                let cell = &mut self.board[(row, col)];
                if cell.has_mine() && !cell.is_revealed() {
                    cell.reveal();
                    revealed.push(RevealedCell::from(&*cell));
                }
            }
        }
    }
}
