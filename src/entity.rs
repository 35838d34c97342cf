// Entity geometry is in surface units (canvas pixels on the web frontend);
// y grows downward, matching the 2D drawing context.

pub const PADDLE_WIDTH: f32 = 15.0;
pub const PADDLE_HEIGHT: f32 = 100.0;
pub const PADDLE_MARGIN: f32 = 10.0;

pub const BALL_RADIUS: f32 = 10.0;
pub const BALL_SPEED: f32 = 6.0;
pub const BALL_LAUNCH_DY: f32 = 4.0;

pub const LEFT_PADDLE_COLOR: &str = "#4CAF50";
pub const RIGHT_PADDLE_COLOR: &str = "#F44336";
pub const BALL_COLOR: &str = "#FFD600";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: &'static str,
}

impl Paddle {
    pub fn new(x: f32, y: f32, color: &'static str) -> Self {
        Self {
            x,
            y,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            color,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Keep the paddle fully inside the surface's vertical span.
    pub fn clamp_to(&mut self, surface_height: f32) {
        self.y = self.y.min(surface_height - self.height).max(0.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
    pub dx: f32,
    pub dy: f32,
    pub color: &'static str,
}

impl Ball {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            radius: BALL_RADIUS,
            speed: BALL_SPEED,
            dx: 0.0,
            dy: 0.0,
            color: BALL_COLOR,
        }
    }

    pub fn left(&self) -> f32 {
        self.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.x + self.radius
    }

    pub fn top(&self) -> f32 {
        self.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.radius
    }

    /// Bounding-square vs. rectangle overlap, shared by both paddle checks.
    /// Not a true circle test; corner hits are slightly generous.
    pub fn overlaps(&self, paddle: &Paddle) -> bool {
        self.left() < paddle.x + paddle.width
            && self.right() > paddle.x
            && self.bottom() > paddle.y
            && self.top() < paddle.y + paddle.height
    }
}
