use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a front end may show about a session, without leaking hidden mines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub score: CellCount,
    pub status: GameStatus,
    pub triggered_mine: Option<Coord2>,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_session(session: &GameSession) -> Self {
        let board = session.board();
        let size = board.size();
        let cells = Array2::from_shape_fn(
            (size.0 as usize, size.1 as usize),
            |(row, col)| board[(row as Coord, col as Coord)].view(),
        );

        Self {
            size,
            mine_count: board.mine_count(),
            score: session.score(),
            status: session.status(),
            triggered_mine: session.triggered_mine(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        in_bounds(coords, self.size).then(|| self.cells[coords.to_nd_index()])
    }

    pub fn hidden_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_hidden()).count() as CellCount
    }
}

/// Plain text grid: `#` hidden, `.` empty, digits for counts, `*` for mines and `X` for
/// the mine that ended the game.
impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.outer_iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let symbol = match cell {
                    CellView::Hidden => '#',
                    CellView::Revealed(0) => '.',
                    CellView::Revealed(count) => char::from(b'0' + count),
                    CellView::Mine if self.triggered_mine == Some((row as Coord, col as Coord)) => 'X',
                    CellView::Mine => '*',
                };
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn session(rows: Coord, cols: Coord, mines: &[Coord2]) -> GameSession {
        let config = BoardConfig::new(rows, cols, mines.len() as CellCount).unwrap();
        GameSession::with_mines(config, mines).unwrap()
    }

    #[test]
    fn fresh_view_hides_everything() {
        let view = session(2, 3, &[(0, 0)]).view();

        assert_eq!(view.size, (2, 3));
        assert_eq!(view.hidden_count(), 6);
        assert_eq!(view.cell((1, 2)), Some(CellView::Hidden));
        assert_eq!(view.cell((2, 0)), None);
    }

    #[test]
    fn view_tracks_reveals_and_loss() {
        let mut session = session(3, 3, &[(0, 0), (2, 2)]);
        session.reveal((0, 2)).unwrap();
        session.reveal((2, 2)).unwrap();

        let view = session.view();

        assert_eq!(view.status, GameStatus::Lost);
        assert_eq!(view.cell((0, 2)), Some(CellView::Revealed(0)));
        assert_eq!(view.cell((0, 0)), Some(CellView::Mine));
        assert_eq!(view.to_string(), "* 1 .\n# 2 1\n# # X\n");
    }

    #[test]
    fn view_serializes_to_json() {
        let mut session = session(2, 2, &[(1, 1)]);
        session.reveal((0, 0)).unwrap();

        let json = serde_json::to_value(session.view()).unwrap();

        assert_eq!(json["score"], 1);
        assert_eq!(json["status"], "InProgress");
        assert_eq!(json["size"], serde_json::json!([2, 2]));
    }
}
