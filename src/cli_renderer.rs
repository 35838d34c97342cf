use crate::game::Game;
use crate::renderer::{Input, Renderer, BACKGROUND_COLOR, UI_COLOR};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Terminal frontend. The playfield is painted as a grid of two-character
/// cells; each cell takes the color of the topmost entity whose rectangle
/// overlaps it, so entities thinner than a cell still show up.
pub struct CliRenderer {
    cols: u16,
    rows: u16,
    surface_height: f32,
    last_render: Instant,
    target_frame_time: Duration,
}

impl CliRenderer {
    /// `cols` x `rows` is the cell grid to paint into; `surface_height`
    /// is the playfield height the grid stands in for, used to translate
    /// mouse rows back into surface coordinates.
    pub fn new(cols: u16, rows: u16, surface_height: f32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            surface_height,
            last_render: Instant::now(),
            // Target 30 FPS for smooth rendering
            target_frame_time: Duration::from_millis(33),
        }
    }

    fn row_to_surface_y(&self, row: u16) -> f32 {
        (row as f32 + 0.5) * self.surface_height / self.rows as f32
    }

    fn draw_scores(&self, game: &Game, stdout: &mut io::Stdout) -> io::Result<()> {
        // Character columns: the grid is cols * 2 characters wide, scores
        // sit over the middle of each half like on the canvas
        let left_col = self.cols / 2;
        let right_col = self.cols * 3 / 2;
        queue!(
            stdout,
            cursor::MoveTo(left_col, 1),
            SetForegroundColor(hex_color(UI_COLOR)),
            SetBackgroundColor(hex_color(BACKGROUND_COLOR)),
            Print(game.left_score),
            cursor::MoveTo(right_col, 1),
            Print(game.right_score),
            ResetColor
        )?;
        Ok(())
    }

    fn draw_info(&self, stdout: &mut io::Stdout) -> io::Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, self.rows + 1),
            ResetColor,
            Print("Controls: Mouse to move | Q to quit")
        )?;
        Ok(())
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            EnableMouseCapture
        )?;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        // Frame rate limiting: skip rendering if not enough time has passed
        if self.last_render.elapsed() < self.target_frame_time {
            return Ok(());
        }

        self.last_render = Instant::now();

        let mut stdout = io::stdout();

        queue!(stdout, cursor::MoveTo(0, 0))?;

        for row in 0..self.rows {
            for col in 0..self.cols {
                let color = cell_color(game, col, row, self.cols, self.rows);
                queue!(stdout, SetBackgroundColor(color), Print("  "))?;
            }
            queue!(stdout, ResetColor, Print("\r\n"))?;
        }

        self.draw_scores(game, &mut stdout)?;
        self.draw_info(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        let mut pointer = None;
        // First wait is short so the tick cadence holds; after that, drain
        // whatever queued so a fast mouse cannot outrun the loop. Quit wins
        // over any buffered movement.
        let mut wait = Duration::from_millis(5);
        while event::poll(wait)? {
            wait = Duration::ZERO;
            match event::read()? {
                Event::Key(KeyEvent { code, .. }) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return Ok(Some(Input::Quit));
                    }
                    _ => {}
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Moved,
                    row,
                    ..
                }) => {
                    pointer = Some(self.row_to_surface_y(row));
                }
                _ => {}
            }
        }
        Ok(pointer.map(Input::PointerMove))
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Color for one grid cell. Pure function of the game state and grid
/// geometry; the ball is checked first since it paints on top.
fn cell_color(game: &Game, col: u16, row: u16, cols: u16, rows: u16) -> Color {
    let cell_w = game.width / cols as f32;
    let cell_h = game.height / rows as f32;
    let left = col as f32 * cell_w;
    let right = left + cell_w;
    let top = row as f32 * cell_h;
    let bottom = top + cell_h;

    let ball = &game.ball;
    if left < ball.right() && right > ball.left() && top < ball.bottom() && bottom > ball.top() {
        return hex_color(ball.color);
    }

    for paddle in [&game.left_paddle, &game.right_paddle] {
        if left < paddle.x + paddle.width
            && right > paddle.x
            && top < paddle.y + paddle.height
            && bottom > paddle.y
        {
            return hex_color(paddle.color);
        }
    }

    // Dashed center line, alternating cells
    if col == cols / 2 && row % 2 == 0 {
        return hex_color(UI_COLOR);
    }

    hex_color(BACKGROUND_COLOR)
}

/// Translate a `#rgb` or `#rrggbb` hex string into a terminal color.
/// Malformed input falls back to white rather than failing a frame.
fn hex_color(hex: &str) -> Color {
    match parse_hex(hex) {
        Some((r, g, b)) => Color::Rgb { r, g, b },
        None => Color::White,
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    fn channel(s: &str) -> Option<u8> {
        u8::from_str_radix(s, 16).ok()
    }

    let digits = hex.strip_prefix('#')?;
    match digits.len() {
        // Short form doubles each digit: #fff -> #ffffff
        3 => {
            let mut it = digits.chars();
            let (r, g, b) = (it.next()?, it.next()?, it.next()?);
            Some((
                channel(&format!("{r}{r}"))?,
                channel(&format!("{g}{g}"))?,
                channel(&format!("{b}{b}"))?,
            ))
        }
        6 => Some((
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        _ => None,
    }
}
