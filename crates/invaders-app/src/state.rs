//! Application state shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use invaders_core::commands::PlayerCommand;
use invaders_core::state::HudSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("game loop not running")]
    NotRunning,
    #[error("game loop has exited")]
    Disconnected,
    #[error("shared state lock poisoned")]
    Poisoned,
}

/// Shared application state.
///
/// - `mpsc::Sender` sits behind a `Mutex` (it is Send but not Sync)
/// - `Mutex<Option<...>>` for the sender, which only exists once the loop runs
/// - `Arc<Mutex<...>>` for the latest snapshot (shared with the loop thread)
pub struct AppState {
    /// `None` until the game loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<HudSnapshot>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn attach(&self, sender: mpsc::Sender<GameLoopCommand>) -> Result<(), AppError> {
        let mut tx = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        *tx = Some(sender);
        Ok(())
    }

    /// Forward a player command to the loop.
    pub fn send(&self, command: PlayerCommand) -> Result<(), AppError> {
        self.send_raw(GameLoopCommand::PlayerCommand(command))
    }

    pub fn shutdown(&self) -> Result<(), AppError> {
        self.send_raw(GameLoopCommand::Shutdown)
    }

    fn send_raw(&self, command: GameLoopCommand) -> Result<(), AppError> {
        let tx = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        match tx.as_ref() {
            Some(tx) => tx.send(command).map_err(|_| AppError::Disconnected),
            None => Err(AppError::NotRunning),
        }
    }

    /// Latest published snapshot, if any tick has run.
    pub fn snapshot(&self) -> Result<Option<HudSnapshot>, AppError> {
        let lock = self.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
        Ok(lock.clone())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
