use alloc::vec;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What changed during one reveal call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealReport {
    pub status: GameStatus,
    /// The revealed cell first, then burst cells in visit order. After a loss, the
    /// remaining mines follow the triggering one.
    pub revealed_cells: Vec<RevealedCell>,
    pub score_delta: CellCount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoOp,
    Revealed(RevealReport),
}

impl RevealOutcome {
    pub const fn has_update(&self) -> bool {
        match self {
            Self::NoOp => false,
            Self::Revealed(_) => true,
        }
    }

    pub fn report(&self) -> Option<&RevealReport> {
        match self {
            Self::NoOp => None,
            Self::Revealed(report) => Some(report),
        }
    }
}

/// Status and score of a session at a point in time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub status: GameStatus,
    pub score: CellCount,
}

/// One game from creation to its terminal state. There is no reset: play again by
/// creating a new session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    score: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    /// Creates a session, seeding placement from `seed` or from entropy when absent.
    #[cfg(feature = "std")]
    pub fn new(config: BoardConfig, seed: Option<u64>) -> Result<Self> {
        Self::with_seed(config, seed.unwrap_or_else(rand::random))
    }

    pub fn with_seed(config: BoardConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, &mut SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(config: BoardConfig, rng: &mut R) -> Result<Self> {
        let mut board = Board::new(config)?;
        board.place_mines(rng)?;
        Ok(Self::from_board(board))
    }

    /// Creates a session with mines at exactly `mine_coords`.
    pub fn with_mines(config: BoardConfig, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Board::new(config)?;
        board.place_mines_at(mine_coords)?;
        Ok(Self::from_board(board))
    }

    fn from_board(board: Board) -> Self {
        log::debug!(
            "new session: {}x{} with {} mines",
            board.rows(),
            board.cols(),
            board.mine_count()
        );
        Self {
            board,
            score: 0,
            status: GameStatus::InProgress,
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> CellCount {
        self.score
    }

    pub fn snapshot(&self) -> SessionStatus {
        SessionStatus {
            status: self.status,
            score: self.score,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        self.board.cell(coords)
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        Ok(self.board.cell(coords)?.view())
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn view(&self) -> BoardView {
        BoardView::from_session(self)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.status.is_terminal() {
            return Ok(RevealOutcome::NoOp);
        }

        let mut engine = RevealEngine::new(&mut self.board)?;
        let outcome = match engine.reveal_one(coords)? {
            SingleReveal::AlreadyRevealed => return Ok(RevealOutcome::NoOp),
            SingleReveal::Mine => {
                let mut revealed_cells = vec![RevealedCell::from(&engine.board()[coords])];
                engine.reveal_all_mines(&mut revealed_cells);
                self.triggered_mine = Some(coords);
                self.status = GameStatus::Lost;
                RevealReport {
                    status: self.status,
                    revealed_cells,
                    score_delta: 0,
                }
            }
            SingleReveal::Safe(count) => {
                let mut revealed_cells = vec![RevealedCell::from(&engine.board()[coords])];
                let mut score_delta = 1;
                if count == 0 {
                    score_delta += engine.burst(coords, &mut revealed_cells);
                }
                self.score += score_delta;
                if self.score == self.board.safe_cell_count() {
                    self.status = GameStatus::Won;
                }
                RevealReport {
                    status: self.status,
                    revealed_cells,
                    score_delta,
                }
            }
        };

        if self.status.is_terminal() {
            log::debug!("game over: {:?} with score {}", self.status, self.score);
        }
        Ok(RevealOutcome::Revealed(outcome))
    }
}
