use crate::entity::Paddle;

/// Tolerance band around the paddle center within which the opponent holds
/// still, so it does not jitter while the ball is roughly level with it.
pub const DEAD_ZONE: f32 = 10.0;
/// Fixed per-frame travel when the opponent decides to move.
pub const TRACK_STEP: f32 = 5.0;

/// Nudge the opponent paddle toward the ball's vertical position.
///
/// Plain dead-zone tracking, not prediction: the paddle chases the ball's
/// current y one step per frame and stays beatable by steep returns.
pub fn track(paddle: &mut Paddle, ball_y: f32, surface_height: f32) {
    let center = paddle.center_y();
    if ball_y < center - DEAD_ZONE {
        paddle.y -= TRACK_STEP;
    } else if ball_y > center + DEAD_ZONE {
        paddle.y += TRACK_STEP;
    }
    paddle.clamp_to(surface_height);
}
