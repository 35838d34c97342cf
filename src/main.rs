use crossterm::terminal;
use std::io;
use std::time::{Duration, Instant};
use volley::{CliRenderer, Game, GameLoop, Input, Renderer};

// Game logic update rate (controls gameplay speed, since the ball moves a
// fixed distance per update)
const GAME_UPDATE_RATE: Duration = Duration::from_millis(16); // ~60 updates/sec

// The simulation always runs on the canonical surface; the renderer scales
// it onto whatever grid the terminal offers
const SURFACE_WIDTH: f32 = 800.0;
const SURFACE_HEIGHT: f32 = 500.0;

fn main() -> io::Result<()> {
    // Get terminal size and calculate the paint grid
    let (term_width, term_height) = terminal::size()?;

    // Account for:
    // - Each cell is 2 chars wide, so columns = term_width / 2
    // - Reserve 2 lines at bottom for the controls display
    // - Minimum grid of 20x10 for playability
    let cols = (term_width / 2).max(20);
    let rows = term_height.saturating_sub(2).max(10);

    let mut game_loop = GameLoop::new(Game::new(SURFACE_WIDTH, SURFACE_HEIGHT));
    let mut renderer = CliRenderer::new(cols, rows, SURFACE_HEIGHT);

    renderer.init()?;

    let mut last_game_update = Instant::now();

    while game_loop.is_running() {
        // Poll for input; pointer moves arrive in surface coordinates
        if let Some(input) = renderer.poll_input()? {
            match input {
                Input::PointerMove(y) => {
                    game_loop.game_mut().track_pointer(y);
                }
                Input::Quit => {
                    game_loop.stop();
                }
            }
        }

        // Update game logic at fixed rate
        if last_game_update.elapsed() >= GAME_UPDATE_RATE {
            game_loop.step();
            last_game_update = Instant::now();
        }

        // Let renderer decide when to actually render
        // (it manages its own frame rate internally)
        renderer.render(game_loop.game())?;
    }

    renderer.cleanup()?;
    Ok(())
}
