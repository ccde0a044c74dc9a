//! Simulation tick
//!
//! Advances a level by one step of real elapsed time. The step is a pure
//! function of the previous state, the input, the elapsed time and the
//! injected RNG; the previous state is never touched.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Surface, ball_hits_block, block_hit_normal, bounce};
use super::state::{Ball, GameSize, LevelState, Paddle, init_paddle_and_ball};
use super::vector::{DOWN, LEFT, RIGHT, UP, angle_between};
use crate::consts::DISTANCE_PER_MS;
use crate::tuning::Tuning;

/// Keyboard paddle intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    Left,
    Right,
}

impl Movement {
    pub fn direction(self) -> Vec2 {
        match self {
            Movement::Left => LEFT,
            Movement::Right => RIGHT,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held direction key, if any
    pub movement: Option<Movement>,
    /// Pointer target for the paddle's left edge, in game units.
    /// When present it wins over `movement`.
    pub pointer_x: Option<f32>,
}

/// Things that happened during a tick, for sound, saving and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The ball dropped past the paddle
    LifeLost { lives_left: u32 },
    /// The ball changed heading off a surface
    Bounce { surface: Surface },
    /// A block took a hit
    BlockHit { destroyed: bool },
    /// The last block is gone
    LevelCleared,
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub state: LevelState,
    pub events: Vec<GameEvent>,
}

impl TickOutcome {
    fn quiet(state: LevelState) -> Self {
        Self {
            state,
            events: Vec::new(),
        }
    }

    pub fn life_lost(&self) -> bool {
        self.events.iter().any(|e| matches!(e, GameEvent::LifeLost { .. }))
    }

    pub fn level_cleared(&self) -> bool {
        self.events.contains(&GameEvent::LevelCleared)
    }
}

/// Move the paddle by keyboard intent or pointer target, staying inside the field
fn update_paddle(paddle: &Paddle, size: GameSize, distance: f32, input: &TickInput) -> Paddle {
    if let Some(x) = input.pointer_x.filter(|x| x.is_finite()) {
        return paddle.placed_at(x, size);
    }
    match input.movement {
        Some(movement) => {
            let target = paddle.position + movement.direction() * distance;
            paddle.placed_at(target.x, size)
        }
        None => paddle.clone(),
    }
}

fn with_paddle_and_ball(state: &LevelState, paddle: Paddle, ball: Ball) -> LevelState {
    LevelState {
        size: state.size,
        blocks: state.blocks.clone(),
        speed: state.speed,
        lives: state.lives,
        paddle,
        ball,
    }
}

/// Advance the level by `elapsed_ms` of unpaused time
///
/// Collisions only change the ball's heading; on a bounce tick the ball stays
/// where it was and moves along the new heading next tick.
pub fn tick<R: Rng + ?Sized>(
    state: &LevelState,
    input: &TickInput,
    elapsed_ms: f32,
    tuning: &Tuning,
    rng: &mut R,
) -> TickOutcome {
    let elapsed_ms = if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 };
    let size = state.size;
    let distance = elapsed_ms * DISTANCE_PER_MS * state.speed;

    let paddle = update_paddle(&state.paddle, size, distance, input);

    let radius = state.ball.radius;
    let old_direction = state.ball.direction;
    let new_center = state.ball.center + old_direction * distance;
    let ball = Bounds::of_ball(new_center, radius);

    // --- BALL LOST ---
    if ball.bottom > size.height {
        let lives = state.lives.saturating_sub(1);
        log::debug!("Ball lost, {} lives left", lives);
        let (paddle, ball) = init_paddle_and_ball(size, paddle.width, tuning.ball_spawn, rng);
        let next = LevelState {
            lives,
            ..with_paddle_and_ball(state, paddle, ball)
        };
        return TickOutcome {
            state: next,
            events: vec![GameEvent::LifeLost { lives_left: lives }],
        };
    }

    let bounced_ball = |normal: Vec2, rng: &mut R| Ball {
        center: state.ball.center,
        radius,
        direction: bounce(old_direction, normal, tuning, rng),
    };

    // --- PADDLE AND WALLS ---
    // Priority order, first match wins
    let going_down = angle_between(UP, old_direction).abs() > 90.0;
    let hit_paddle = going_down
        && ball.bottom >= paddle.top()
        && ball.right >= paddle.left()
        && ball.left <= paddle.right();

    let wall = if hit_paddle {
        Some((Surface::Paddle, UP))
    } else if ball.top <= 0.0 {
        Some((Surface::Ceiling, DOWN))
    } else if ball.left <= 0.0 {
        Some((Surface::LeftWall, RIGHT))
    } else if ball.right >= size.width {
        Some((Surface::RightWall, LEFT))
    } else {
        None
    };

    if let Some((surface, normal)) = wall {
        let next_ball = bounced_ball(normal, rng);
        return TickOutcome {
            state: with_paddle_and_ball(state, paddle, next_ball),
            events: vec![GameEvent::Bounce { surface }],
        };
    }

    // --- BLOCKS ---
    // First overlapping block in collection order, not the nearest one
    if let Some(index) = state.blocks.iter().position(|block| ball_hits_block(&ball, block)) {
        let block = &state.blocks[index];
        let normal = block_hit_normal(&ball, radius, block);

        let mut blocks = state.blocks.clone();
        let destroyed = match block.hit() {
            Some(damaged) => {
                blocks[index] = damaged;
                false
            }
            None => {
                blocks.remove(index);
                true
            }
        };
        if destroyed {
            log::debug!("Block destroyed, {} left", blocks.len());
        }

        let mut events = vec![
            GameEvent::BlockHit { destroyed },
            GameEvent::Bounce {
                surface: Surface::Block,
            },
        ];
        if blocks.is_empty() {
            events.push(GameEvent::LevelCleared);
        }

        let next_ball = bounced_ball(normal, rng);
        let next = LevelState {
            blocks,
            ..with_paddle_and_ball(state, paddle, next_ball)
        };
        return TickOutcome { state: next, events };
    }

    // --- FREE FLIGHT ---
    let next_ball = Ball {
        center: new_center,
        ..state.ball.clone()
    };
    TickOutcome::quiet(with_paddle_and_ball(state, paddle, next_ball))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::LevelCatalog;
    use crate::sim::state::{Block, init_level_state};
    use crate::sim::vector::unit;
    use crate::tuning::BallSpawn;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Ball-only field: default first level with the blocks removed
    fn open_field(center: Vec2, direction: Vec2) -> LevelState {
        let mut rng = Pcg32::seed_from_u64(1);
        let catalog = LevelCatalog::default();
        let mut state = init_level_state(catalog.get(0).unwrap(), BallSpawn::FieldHeight, &mut rng);
        state.blocks.clear();
        state.ball.center = center;
        state.ball.direction = direction;
        state
    }

    fn block(x: f32, y: f32, density: u8) -> Block {
        Block {
            position: Vec2::new(x, y),
            width: 1.0,
            height: 0.25,
            density,
        }
    }

    fn run(state: &LevelState, input: &TickInput, elapsed_ms: f32, seed: u64) -> TickOutcome {
        let mut rng = Pcg32::seed_from_u64(seed);
        tick(state, input, elapsed_ms, &Tuning::default(), &mut rng)
    }

    #[test]
    fn test_free_flight_moves_ball() {
        let state = open_field(Vec2::new(4.5, 5.0), RIGHT);
        let out = run(&state, &TickInput::default(), 20.0, 0);
        assert!(out.events.is_empty());
        assert!((out.state.ball.center - Vec2::new(4.6, 5.0)).length() < 1e-5);
        assert_eq!(out.state.ball.direction, RIGHT);
        // Input state is untouched
        assert_eq!(state.ball.center, Vec2::new(4.5, 5.0));
    }

    #[test]
    fn test_zero_elapsed_is_noop() {
        let state = open_field(Vec2::new(4.5, 5.0), unit(Vec2::new(1.0, -1.0)));
        let out = run(&state, &TickInput::default(), 0.0, 0);
        assert_eq!(out.state, state);
        assert!(out.events.is_empty());
    }

    #[test]
    fn test_negative_elapsed_treated_as_zero() {
        let state = open_field(Vec2::new(4.5, 5.0), RIGHT);
        let input = TickInput {
            movement: Some(Movement::Left),
            pointer_x: None,
        };
        assert_eq!(run(&state, &input, -50.0, 0).state, state);
        assert_eq!(run(&state, &input, f32::NAN, 0).state, state);
    }

    #[test]
    fn test_speed_scales_distance() {
        let mut state = open_field(Vec2::new(4.5, 5.0), RIGHT);
        state.speed = 2.0;
        let out = run(&state, &TickInput::default(), 20.0, 0);
        assert!((out.state.ball.center.x - 4.7).abs() < 1e-5);
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut state = open_field(Vec2::new(0.05, 5.0), LEFT);
        state.ball.radius = 0.2;
        let out = run(&state, &TickInput::default(), 20.0, 3);

        let direction = out.state.ball.direction;
        assert!(direction.x > 0.0);
        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(
            out.events,
            vec![GameEvent::Bounce {
                surface: Surface::LeftWall
            }]
        );
        // Position is not advanced on a bounce tick
        assert_eq!(out.state.ball.center, state.ball.center);
    }

    #[test]
    fn test_ceiling_and_right_wall() {
        let state = open_field(Vec2::new(4.5, 0.25), unit(Vec2::new(0.3, -1.0)));
        let out = run(&state, &TickInput::default(), 20.0, 4);
        assert!(out.state.ball.direction.y > 0.0);
        assert_eq!(out.events[0], GameEvent::Bounce { surface: Surface::Ceiling });

        let state = open_field(Vec2::new(8.75, 5.0), unit(Vec2::new(1.0, -0.5)));
        let out = run(&state, &TickInput::default(), 20.0, 5);
        assert!(out.state.ball.direction.x < 0.0);
        assert_eq!(out.events[0], GameEvent::Bounce { surface: Surface::RightWall });
    }

    #[test]
    fn test_paddle_bounce() {
        // Paddle spans x 3.25..5.75, top at 11 - 1/3 - 0.06
        let state = open_field(Vec2::new(4.5, 10.4), unit(Vec2::new(0.6, 0.8)));
        let out = run(&state, &TickInput::default(), 20.0, 6);

        assert_eq!(out.events, vec![GameEvent::Bounce { surface: Surface::Paddle }]);
        let direction = out.state.ball.direction;
        assert!(direction.y < 0.0);
        let angle = angle_between(UP, direction).abs();
        assert!((15.0 - 1e-3..=75.0 + 1e-3).contains(&angle));
    }

    #[test]
    fn test_rising_ball_passes_paddle_plane() {
        // Moving up through the paddle band does not bounce
        let state = open_field(Vec2::new(4.5, 10.5), unit(Vec2::new(0.6, -0.8)));
        let out = run(&state, &TickInput::default(), 20.0, 6);
        assert!(out.events.is_empty());
    }

    #[test]
    fn test_life_lost() {
        let mut state = open_field(Vec2::new(1.0, 10.85), DOWN);
        state.blocks.push(block(4.0, 3.0, 1));
        let before_blocks = state.blocks.clone();
        let input = TickInput {
            movement: Some(Movement::Right),
            pointer_x: None,
        };
        let out = run(&state, &input, 20.0, 7);

        assert_eq!(out.state.lives, state.lives - 1);
        assert_eq!(out.events, vec![GameEvent::LifeLost { lives_left: state.lives - 1 }]);
        assert!(out.life_lost());
        assert_eq!(out.state.blocks, before_blocks);

        // Fresh paddle and ball
        let paddle = &out.state.paddle;
        assert_eq!(paddle.width, state.paddle.width);
        assert!((paddle.left() - (9.0 - paddle.width) / 2.0).abs() < 1e-6);
        assert!((out.state.ball.center.y - (paddle.top() - 0.4)).abs() < 1e-5);
        assert!(out.state.ball.direction.y < 0.0);
    }

    #[test]
    fn test_block_destroyed() {
        let mut state = open_field(Vec2::new(4.5, 5.0), UP);
        state.blocks = vec![block(4.0, 4.5, 0), block(1.0, 2.0, 2)];
        let out = run(&state, &TickInput::default(), 20.0, 8);

        assert_eq!(out.state.blocks, vec![block(1.0, 2.0, 2)]);
        assert_eq!(out.events[0], GameEvent::BlockHit { destroyed: true });
        assert!(!out.level_cleared());
        // Hit from below sends the ball back down
        assert!(out.state.ball.direction.y > 0.0);
        assert_eq!(out.state.ball.center, state.ball.center);
    }

    #[test]
    fn test_block_damaged() {
        let mut state = open_field(Vec2::new(4.5, 5.0), UP);
        state.blocks = vec![block(4.0, 4.5, 2)];
        let out = run(&state, &TickInput::default(), 20.0, 9);

        assert_eq!(out.state.blocks, vec![block(4.0, 4.5, 1)]);
        assert_eq!(out.events[0], GameEvent::BlockHit { destroyed: false });
    }

    #[test]
    fn test_first_overlapping_block_wins() {
        // Ball spans x 4.3..4.7 at the hit; both blocks overlap it
        let mut state = open_field(Vec2::new(4.5, 5.0), UP);
        state.blocks = vec![block(4.4, 4.5, 1), block(3.7, 4.5, 1)];
        let out = run(&state, &TickInput::default(), 20.0, 10);

        assert_eq!(out.state.blocks, vec![block(4.4, 4.5, 0), block(3.7, 4.5, 1)]);
    }

    #[test]
    fn test_last_block_clears_level() {
        let mut state = open_field(Vec2::new(4.5, 5.0), UP);
        state.blocks = vec![block(4.0, 4.5, 0)];
        let out = run(&state, &TickInput::default(), 20.0, 11);

        assert!(out.state.is_cleared());
        assert!(out.level_cleared());
    }

    #[test]
    fn test_block_side_hits() {
        // Ball top 0.02 below the block top: level with it, entering from the left
        let mut state = open_field(Vec2::new(3.75, 4.72), RIGHT);
        state.blocks = vec![block(4.0, 4.5, 1)];
        let out = run(&state, &TickInput::default(), 20.0, 12);
        assert_eq!(out.events[0], GameEvent::BlockHit { destroyed: false });
        assert!(out.state.ball.direction.x < 0.0);

        // Same height, entering from the right
        let mut state = open_field(Vec2::new(5.25, 4.72), LEFT);
        state.blocks = vec![block(4.0, 4.5, 1)];
        let out = run(&state, &TickInput::default(), 20.0, 13);
        assert_eq!(out.events[0], GameEvent::BlockHit { destroyed: false });
        assert!(out.state.ball.direction.x > 0.0);
    }

    #[test]
    fn test_ball_covering_block_height_passes_through() {
        // Ball spans y 4.425..4.825 and swallows the block's 4.5..4.75 whole
        let mut state = open_field(Vec2::new(3.5, 4.625), RIGHT);
        state.blocks = vec![block(4.0, 4.5, 1)];
        let mut rng = Pcg32::seed_from_u64(14);
        let tuning = Tuning::default();

        for _ in 0..40 {
            let out = tick(&state, &TickInput::default(), 7.0, &tuning, &mut rng);
            assert!(out.events.is_empty(), "unexpected events {:?}", out.events);
            state = out.state;
        }
        assert_eq!(state.blocks, vec![block(4.0, 4.5, 1)]);
        assert!(state.ball.center.x > 4.8);
    }

    #[test]
    fn test_keyboard_moves_paddle() {
        let state = open_field(Vec2::new(4.5, 5.0), RIGHT);
        let input = TickInput {
            movement: Some(Movement::Left),
            pointer_x: None,
        };
        let out = run(&state, &input, 100.0, 0);
        assert!((out.state.paddle.left() - (state.paddle.left() - 0.5)).abs() < 1e-5);
        assert_eq!(out.state.paddle.top(), state.paddle.top());
    }

    #[test]
    fn test_pointer_overrides_keyboard() {
        let state = open_field(Vec2::new(4.5, 5.0), RIGHT);
        let input = TickInput {
            movement: Some(Movement::Left),
            pointer_x: Some(5.0),
        };
        let out = run(&state, &input, 100.0, 0);
        assert_eq!(out.state.paddle.left(), 5.0);

        // Pointer beyond the field is clamped
        let input = TickInput {
            movement: None,
            pointer_x: Some(40.0),
        };
        let out = run(&state, &input, 100.0, 0);
        assert_eq!(out.state.paddle.right(), 9.0);
    }

    proptest! {
        #[test]
        fn paddle_stays_in_field(
            elapsed in 0.0f32..100_000.0,
            left in any::<bool>(),
            start in 0.0f32..6.5,
            pointer in proptest::option::of(-100.0f32..100.0),
        ) {
            let mut state = open_field(Vec2::new(4.5, 5.0), RIGHT);
            state.paddle = state.paddle.placed_at(start, state.size);
            let input = TickInput {
                movement: Some(if left { Movement::Left } else { Movement::Right }),
                pointer_x: pointer,
            };
            let out = run(&state, &input, elapsed, 0);
            let paddle = &out.state.paddle;
            prop_assert!(paddle.left() >= 0.0);
            prop_assert!(paddle.left() <= out.state.size.width - paddle.width + 1e-5);
        }

        #[test]
        fn blocks_only_shrink(seed in any::<u64>(), moves in proptest::collection::vec(0u8..3, 1..400)) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let catalog = LevelCatalog::default();
            let mut state = init_level_state(catalog.get(2).unwrap(), BallSpawn::FieldHeight, &mut rng);
            let tuning = Tuning::default();

            for m in moves {
                let input = TickInput {
                    movement: match m {
                        0 => None,
                        1 => Some(Movement::Left),
                        _ => Some(Movement::Right),
                    },
                    pointer_x: None,
                };
                let out = tick(&state, &input, 16.0, &tuning, &mut rng);
                prop_assert!(out.state.blocks.len() <= state.blocks.len());
                for block in &out.state.blocks {
                    let before = state.blocks.iter().find(|b| b.position == block.position);
                    prop_assert!(before.is_some_and(|b| block.density <= b.density));
                }
                prop_assert!((out.state.ball.direction.length() - 1.0).abs() < 1e-4);
                state = out.state;
            }
        }
    }
}
