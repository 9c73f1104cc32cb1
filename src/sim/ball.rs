//! Ball movement and collision response
//!
//! Plain Euler steps with no sub-stepping. Collisions are box-vs-box; a
//! paddle only returns a ball that is travelling toward it, so a ball still
//! overlapping the paddle after a bounce is not resolved twice.

use super::state::{Ball, Paddle, Side, Table};
use crate::consts::*;
use crate::sim::geometry::clamp;

/// What happened to the ball during one step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BallStep {
    /// Bounced off the top or bottom edge
    pub wall_bounce: bool,
    /// Returned by this side's paddle
    pub paddle_hit: Option<Side>,
    /// Left the table; this side wins the point
    pub scored: Option<Side>,
}

/// Advance the ball one step and resolve walls, paddles and scoring
pub fn step_ball(ball: &mut Ball, paddles: &[Paddle; 2], table: &Table) -> BallStep {
    let mut step = BallStep::default();

    ball.pos += ball.vel;

    // Top / bottom edges
    let floor = table.height - ball.size;
    if ball.pos.y <= 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = ball.vel.y.abs();
        step.wall_bounce = true;
    } else if ball.pos.y >= floor {
        ball.pos.y = floor;
        ball.vel.y = -ball.vel.y.abs();
        step.wall_bounce = true;
    }

    for paddle in paddles {
        let rect = paddle.aabb(table);
        if !ball.moving_toward(paddle.side) || !ball.aabb().overlaps(&rect) {
            continue;
        }
        // Push the ball just outside the face and send it back
        match paddle.side {
            Side::Left => {
                ball.pos.x = rect.max().x;
                ball.vel.x = ball.vel.x.abs();
            }
            Side::Right => {
                ball.pos.x = rect.min.x - ball.size;
                ball.vel.x = -ball.vel.x.abs();
            }
        }
        deflect(ball, paddle);
        step.paddle_hit = Some(paddle.side);
        log::debug!("{:?} paddle hit, speed {:.1}", paddle.side, ball.current_speed);
    }

    // Fully off the left edge: right side scores, and vice versa
    if ball.pos.x <= -ball.size {
        step.scored = Some(Side::Right);
    } else if ball.pos.x >= table.width {
        step.scored = Some(Side::Left);
    }

    step
}

/// Re-aim the ball after a paddle hit.
///
/// The contact offset from the paddle center (-1 at the top edge, +1 at the
/// bottom) maps linearly onto ±`MAX_DEFLECTION`. Speed grows by
/// `SPEED_INCREMENT` up to `MAX_BALL_SPEED`. The x direction already set by
/// the caller is kept.
pub fn deflect(ball: &mut Ball, paddle: &Paddle) {
    let half = PADDLE_HEIGHT / 2.0;
    let offset = clamp((ball.center_y() - paddle.center_y()) / half, -1.0, 1.0);
    let angle = offset * MAX_DEFLECTION;

    let speed = ball.vel.length();
    let new_speed = (speed + SPEED_INCREMENT).min(MAX_BALL_SPEED);
    let dir = if ball.vel.x > 0.0 { 1.0 } else { -1.0 };

    ball.vel.x = dir * angle.cos() * new_speed;
    ball.vel.y = angle.sin() * new_speed;
    ball.current_speed = new_speed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn table() -> Table {
        Table::new(800.0, 500.0)
    }

    fn centered_paddles(table: &Table) -> [Paddle; 2] {
        let mut paddles = [Paddle::new(Side::Left), Paddle::new(Side::Right)];
        for p in &mut paddles {
            p.center_on(table);
        }
        paddles
    }

    fn ball_at(x: f32, y: f32, dx: f32, dy: f32) -> Ball {
        let mut ball = Ball::new(0.0);
        ball.pos = Vec2::new(x, y);
        ball.vel = Vec2::new(dx, dy);
        ball.current_speed = ball.vel.length();
        ball
    }

    #[test]
    fn test_free_flight_no_events() {
        let table = table();
        let paddles = centered_paddles(&table);
        let mut ball = ball_at(400.0, 250.0, 5.0, 0.0);

        let step = step_ball(&mut ball, &paddles, &table);
        assert_eq!(ball.pos, Vec2::new(405.0, 250.0));
        assert_eq!(step, BallStep::default());
    }

    #[test]
    fn test_top_wall_bounce() {
        let table = table();
        let paddles = centered_paddles(&table);
        let mut ball = ball_at(400.0, 2.0, 3.0, -5.0);

        let step = step_ball(&mut ball, &paddles, &table);
        assert!(step.wall_bounce);
        assert_eq!(ball.pos.y, 0.0);
        assert_eq!(ball.vel.y, 5.0);
    }

    #[test]
    fn test_bottom_wall_bounce() {
        let table = table();
        let paddles = centered_paddles(&table);
        let mut ball = ball_at(400.0, 480.0, 3.0, 6.0);

        let step = step_ball(&mut ball, &paddles, &table);
        assert!(step.wall_bounce);
        assert_eq!(ball.pos.y, 500.0 - BALL_SIZE);
        assert_eq!(ball.vel.y, -6.0);
    }

    #[test]
    fn test_left_paddle_returns_ball() {
        let table = table();
        let paddles = centered_paddles(&table);
        // Ball centered on the left paddle, about to touch its face
        let y = paddles[0].center_y() - BALL_SIZE / 2.0;
        let face = PADDLE_MARGIN + PADDLE_WIDTH;
        let mut ball = ball_at(face + 2.0, y, -10.0, 0.0);

        let step = step_ball(&mut ball, &paddles, &table);
        assert_eq!(step.paddle_hit, Some(Side::Left));
        assert_eq!(ball.pos.x, face);
        assert!(ball.vel.x > 0.0);
        assert!((ball.current_speed - (10.0 + SPEED_INCREMENT)).abs() < 1e-4);
        // Dead center: flat return
        assert!(ball.vel.y.abs() < 1e-4);
    }

    #[test]
    fn test_right_paddle_returns_ball() {
        let table = table();
        let paddles = centered_paddles(&table);
        let y = paddles[1].center_y() - BALL_SIZE / 2.0;
        let face = paddles[1].x(&table);
        let mut ball = ball_at(face - BALL_SIZE - 2.0, y, 10.0, 0.0);

        let step = step_ball(&mut ball, &paddles, &table);
        assert_eq!(step.paddle_hit, Some(Side::Right));
        assert_eq!(ball.pos.x, face - BALL_SIZE);
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_ball_moving_away_is_not_returned() {
        let table = table();
        let paddles = centered_paddles(&table);
        let y = paddles[0].center_y() - BALL_SIZE / 2.0;
        // Overlapping the left paddle but already heading right
        let mut ball = ball_at(PADDLE_MARGIN + 4.0, y, 5.0, 0.0);

        let step = step_ball(&mut ball, &paddles, &table);
        assert_eq!(step.paddle_hit, None);
        assert_eq!(ball.vel, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_scoring_edges() {
        let table = table();
        let mut paddles = centered_paddles(&table);
        // Paddles out of the way
        paddles[0].y = 0.0;
        paddles[1].y = 0.0;

        let mut ball = ball_at(-10.0, 300.0, -7.0, 0.0);
        assert_eq!(step_ball(&mut ball, &paddles, &table).scored, Some(Side::Right));

        let mut ball = ball_at(-5.0, 300.0, -7.0, 0.0);
        assert_eq!(step_ball(&mut ball, &paddles, &table).scored, None);

        let mut ball = ball_at(795.0, 300.0, 7.0, 0.0);
        assert_eq!(step_ball(&mut ball, &paddles, &table).scored, Some(Side::Left));
    }

    #[test]
    fn test_deflection_angles() {
        let paddle = Paddle {
            side: Side::Left,
            y: 100.0,
        };

        // Center hit: horizontal
        let mut ball = ball_at(0.0, paddle.center_y() - BALL_SIZE / 2.0, 10.0, 0.0);
        deflect(&mut ball, &paddle);
        assert!(ball.vel.y.abs() < 1e-4);
        assert!(ball.vel.x > 0.0);

        // Top edge: 60° upward
        let mut ball = ball_at(0.0, paddle.y - BALL_SIZE / 2.0, 10.0, 0.0);
        deflect(&mut ball, &paddle);
        let angle = ball.vel.y.atan2(ball.vel.x);
        assert!((angle + MAX_DEFLECTION).abs() < 1e-4);

        // Bottom edge: 60° downward, direction preserved
        let mut ball = ball_at(0.0, paddle.y + PADDLE_HEIGHT - BALL_SIZE / 2.0, -10.0, 0.0);
        deflect(&mut ball, &paddle);
        let angle = ball.vel.y.atan2(-ball.vel.x);
        assert!((angle - MAX_DEFLECTION).abs() < 1e-4);
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_deflection_offset_is_clamped() {
        let paddle = Paddle {
            side: Side::Left,
            y: 100.0,
        };
        let mut ball = ball_at(0.0, paddle.y - 500.0, 10.0, 0.0);
        deflect(&mut ball, &paddle);
        let angle = ball.vel.y.atan2(ball.vel.x);
        assert!((angle + MAX_DEFLECTION).abs() < 1e-4);
    }

    #[test]
    fn test_speed_ramps_by_increment_and_caps() {
        let paddle = Paddle {
            side: Side::Left,
            y: 100.0,
        };
        let mut ball = ball_at(0.0, paddle.center_y() - BALL_SIZE / 2.0, 10.0, 0.0);
        let mut previous = ball.current_speed;
        for _ in 0..10 {
            deflect(&mut ball, &paddle);
            assert!((ball.current_speed - previous - SPEED_INCREMENT).abs() < 1e-3);
            assert!((ball.vel.length() - ball.current_speed).abs() < 1e-3);
            previous = ball.current_speed;
        }

        for _ in 0..200 {
            deflect(&mut ball, &paddle);
        }
        assert_eq!(ball.current_speed, MAX_BALL_SPEED);
    }

    proptest! {
        #[test]
        fn prop_wall_bounce_top(x in 100.0f32..600.0, y in 0.0f32..10.0, dy in -20.0f32..-10.5) {
            let table = table();
            let paddles = centered_paddles(&table);
            let mut ball = ball_at(x, y, 4.0, dy);
            step_ball(&mut ball, &paddles, &table);
            prop_assert_eq!(ball.pos.y, 0.0);
            prop_assert!(ball.vel.y > 0.0);
        }

        #[test]
        fn prop_wall_bounce_bottom(x in 100.0f32..600.0, y in 474.0f32..484.0, dy in 10.5f32..20.0) {
            let table = table();
            let paddles = centered_paddles(&table);
            let mut ball = ball_at(x, y, 4.0, dy);
            step_ball(&mut ball, &paddles, &table);
            prop_assert_eq!(ball.pos.y, 500.0 - BALL_SIZE);
            prop_assert!(ball.vel.y < 0.0);
        }

        #[test]
        fn prop_speed_matches_velocity(offset in -60.0f32..60.0, dx in -20.0f32..20.0) {
            prop_assume!(dx.abs() > 0.1);
            let paddle = Paddle {
                side: Side::Right,
                y: 200.0,
            };
            let mut ball = ball_at(0.0, paddle.center_y() + offset, dx, 1.0);
            deflect(&mut ball, &paddle);
            prop_assert!((ball.vel.length() - ball.current_speed).abs() < 1e-3);
        }
    }
}
