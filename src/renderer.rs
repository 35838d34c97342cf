use crate::game::Game;
use std::io;

/// Playfield background, shared by every backend.
pub const BACKGROUND_COLOR: &str = "#222";
/// Center line and score color.
pub const UI_COLOR: &str = "#fff";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Pointer moved to this y position, in surface coordinates.
    PointerMove(f32),
    Quit,
}

/// Trait that abstracts rendering implementation.
/// This allows for different rendering backends (CLI, Web, etc.)
pub trait Renderer {
    /// Initialize the renderer
    fn init(&mut self) -> io::Result<()>;

    /// Render the current game state
    fn render(&mut self, game: &Game) -> io::Result<()>;

    /// Clean up and restore terminal/display state
    fn cleanup(&mut self) -> io::Result<()>;

    /// Poll for input from the user
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}
