use alloc::collections::BTreeMap;
use alloc::string::String;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Opaque reference to a session owned by a [`SessionManager`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionHandle(u64);

/// Owns the leaderboard and every live session.
///
/// The manager is the single writer of the leaderboard. Embeddings that share it across
/// threads must put the whole manager behind a lock.
#[derive(Debug)]
pub struct SessionManager {
    leaderboard: Leaderboard,
    player_name: String,
    sessions: BTreeMap<SessionHandle, GameSession>,
    next_handle: u64,
    seeds: SmallRng,
}

impl SessionManager {
    /// Creates a manager whose unseeded sessions draw their seeds from `seed`.
    pub fn with_seed(leaderboard: Leaderboard, seed: u64) -> Self {
        Self {
            leaderboard,
            player_name: String::from(DEFAULT_PLAYER_NAME),
            sessions: BTreeMap::new(),
            next_handle: 0,
            seeds: SmallRng::seed_from_u64(seed),
        }
    }

    #[cfg(feature = "std")]
    pub fn new(leaderboard: Leaderboard) -> Self {
        Self::with_seed(leaderboard, rand::random())
    }

    /// Builds a manager from front-end settings.
    #[cfg(feature = "std")]
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut manager = Self::new(settings.leaderboard());
        manager.set_player_name(&settings.player_name)?;
        Ok(manager)
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Name recorded on the leaderboard when a session ends.
    pub fn set_player_name(&mut self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(GameError::InvalidName);
        }
        self.player_name = String::from(name);
        Ok(())
    }

    pub fn create_session(&mut self, config: BoardConfig, seed: Option<u64>) -> Result<SessionHandle> {
        let seed = seed.unwrap_or_else(|| self.seeds.random());
        let session = GameSession::with_seed(config, seed)?;
        Ok(self.insert(session))
    }

    /// Adopts an already built session, for example one with a fixed mine layout.
    pub fn insert(&mut self, session: GameSession) -> SessionHandle {
        let handle = SessionHandle(self.next_handle);
        self.next_handle += 1;
        self.sessions.insert(handle, session);
        log::debug!("session {:?} created", handle);
        handle
    }

    pub fn session(&self, handle: SessionHandle) -> Result<&GameSession> {
        self.sessions.get(&handle).ok_or(GameError::UnknownSession)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Reveals a cell; when this ends the game, the player's score is recorded.
    pub fn reveal(&mut self, handle: SessionHandle, coords: Coord2) -> Result<RevealOutcome> {
        let session = self
            .sessions
            .get_mut(&handle)
            .ok_or(GameError::UnknownSession)?;
        let outcome = session.reveal(coords)?;

        if outcome.report().is_some_and(|report| report.status.is_terminal()) {
            let score = session.score();
            log::info!(
                "session {:?} ended {:?}, recording {} for {}",
                handle,
                session.status(),
                score,
                self.player_name
            );
            self.leaderboard.upsert(&self.player_name, score)?;
        }
        Ok(outcome)
    }

    pub fn status(&self, handle: SessionHandle) -> Result<SessionStatus> {
        Ok(self.session(handle)?.snapshot())
    }

    /// Drops a session. Restarting is ending one session and creating another.
    pub fn end_session(&mut self, handle: SessionHandle) -> Result<GameSession> {
        self.sessions
            .remove(&handle)
            .ok_or(GameError::UnknownSession)
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn leaderboard_upsert(&mut self, name: &str, score: CellCount) -> Result<()> {
        self.leaderboard.upsert(name, score)
    }

    pub fn leaderboard_ranked(&self) -> impl Iterator<Item = &LeaderboardEntry> {
        self.leaderboard.ranked()
    }
}
