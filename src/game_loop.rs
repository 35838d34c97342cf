use crate::game::Game;

/// Owns a game session and the flag that keeps it live. Frontends drive it
/// by calling `step` from whatever cadence source they have (a timer loop,
/// requestAnimationFrame) and flip it off with `stop`; a stopped loop
/// ignores further steps, so frame callbacks already in flight are
/// harmless.
pub struct GameLoop {
    game: Game,
    running: bool,
}

impl GameLoop {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            running: true,
        }
    }

    /// Advance the game by one frame, unless the loop has been stopped.
    pub fn step(&mut self) {
        if self.running {
            self.game.update();
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Mutable access for applying input between steps.
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }
}
