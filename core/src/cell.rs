use serde::{Deserialize, Serialize};

use crate::*;

/// One grid position.
///
/// Position is fixed at creation, the mine flag is written once during placement, and
/// `revealed` only ever goes from `false` to `true`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    row: Coord,
    col: Coord,
    has_mine: bool,
    revealed: bool,
    adjacent_mines: Option<u8>,
}

impl Cell {
    pub(crate) const fn new((row, col): Coord2) -> Self {
        Self {
            row,
            col,
            has_mine: false,
            revealed: false,
            adjacent_mines: None,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn has_mine(&self) -> bool {
        self.has_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Adjacent mine count, `None` for mine cells and before mines are placed.
    pub const fn adjacent_mine_count(&self) -> Option<u8> {
        if self.has_mine {
            None
        } else {
            self.adjacent_mines
        }
    }

    pub(crate) const fn is_empty_safe(&self) -> bool {
        !self.has_mine && matches!(self.adjacent_mines, Some(0))
    }

    pub(crate) fn set_mine(&mut self) {
        self.has_mine = true;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = Some(count);
    }

    pub(crate) fn reveal(&mut self) {
        self.revealed = true;
    }

    /// What a player is allowed to see of this cell.
    pub const fn view(&self) -> CellView {
        match (self.revealed, self.has_mine, self.adjacent_mines) {
            (false, ..) | (true, false, None) => CellView::Hidden,
            (true, true, _) => CellView::Mine,
            (true, false, Some(count)) => CellView::Revealed(count),
        }
    }
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Revealed(u8),
    Mine,
}

impl CellView {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// A cell that changed from hidden to revealed during one reveal call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedCell {
    pub row: Coord,
    pub col: Coord,
    pub mine: bool,
    pub adjacent_count: Option<u8>,
}

impl From<&Cell> for RevealedCell {
    fn from(cell: &Cell) -> Self {
        Self {
            row: cell.row,
            col: cell.col,
            mine: cell.has_mine,
            adjacent_count: cell.adjacent_mine_count(),
        }
    }
}
