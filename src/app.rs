//! The frame loop: input, simulation, effects, drawing. Frames come as fast
//! as `next_frame()` allows; the snake moves when the tick clock says so.

use log::{debug, info};
use macroquad::time::get_time;
use macroquad::window::next_frame;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::audio::MacroquadSound;
use crate::clock::TickClock;
use crate::config::GameConfig;
use crate::effects::{EatSound, Effects};
use crate::game::{Game, GameEvent};
use crate::input::{FrameInput, InputCollector, Keyboard};
use crate::render::{Renderer, Screen};
use crate::snake::MoveResult;

#[derive(Clone, Debug)]
pub struct Session {
    pub config: GameConfig,
    pub seed: u64,
    pub mute: bool,
}

/// Applies one frame's worth of input: quit, start and restart first, then
/// the steer, then a tick if one is due.
pub fn apply_input<R: Rng>(game: &mut Game<R>, input: FrameInput, tick_due: bool) -> Option<MoveResult> {
    if input.quit {
        game.request_quit();
    }
    if input.start {
        game.start();
    }
    if input.restart {
        game.restart();
    }
    if let Some(direction) = input.direction {
        game.steer(direction);
    }
    if tick_due { game.tick(None) } else { None }
}

/// Logs the game's queued events and hands them to the effect layer.
pub fn dispatch_events<R: Rng, S: EatSound, E: Rng>(game: &mut Game<R>, effects: &mut Effects<S, E>) {
    for event in game.drain_events() {
        match event {
            GameEvent::Started => info!("game started"),
            GameEvent::FoodEaten { score, at } => debug!("food eaten at ({}, {}), score {score}", at.x, at.y),
            GameEvent::Collided { cause, score } => info!("game over: hit {cause:?}, score {score}"),
            GameEvent::BoardFilled { score } => info!("board filled, score {score}"),
            GameEvent::Restarted => info!("game restarted"),
            GameEvent::QuitRequested => info!("quit requested"),
        }
        effects.on_event(&event);
    }
}

pub async fn run(session: Session) {
    let Session { config, seed, mute } = session;

    let sound = if mute {
        MacroquadSound::silent()
    } else {
        MacroquadSound::load(config.eat_sound.as_deref(), config.sound_volume).await
    };

    let mut game = Game::new(&config, SmallRng::seed_from_u64(seed));
    let mut effects = Effects::new(&config, sound, SmallRng::seed_from_u64(seed.wrapping_add(1)));
    let renderer = Renderer::new(&config);
    let keyboard = Keyboard::attach();
    let mut input = InputCollector::new();
    let mut clock = TickClock::new(config.tick_interval(), get_time());

    loop {
        if game.is_terminated() {
            break;
        }
        let now = get_time();
        let dt = clock.frame(now);

        keyboard.collect(&mut input);
        apply_input(&mut game, input.poll(), clock.tick_due(now));
        dispatch_events(&mut game, &mut effects);
        effects.update(dt);

        renderer.draw(&mut Screen, &game.snapshot(), effects.offset());
        next_frame().await;
    }
    info!("bye, final score {}", game.score());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AudioError;
    use crate::game::Mode;
    use crate::grid::{Cell, Direction};
    use crate::snake::Snake;
    use std::time::Duration;

    struct Quiet;

    impl EatSound for Quiet {
        fn play(&mut self) -> Result<(), AudioError> {
            Ok(())
        }
    }

    fn frame() -> FrameInput {
        FrameInput::default()
    }

    #[test]
    fn quit_wins_over_everything() {
        let config = GameConfig::default();
        let mut game = Game::new(&config, SmallRng::seed_from_u64(1));
        let input = FrameInput { quit: true, start: true, direction: Some(Direction::Up), ..frame() };
        assert_eq!(apply_input(&mut game, input, true), None);
        assert_eq!(game.mode(), Mode::Terminated);
    }

    #[test]
    fn start_then_tick_same_frame() {
        let config = GameConfig::default();
        let mut game = Game::new(&config, SmallRng::seed_from_u64(1));
        assert!(apply_input(&mut game, frame(), true).is_none());
        let moved = apply_input(&mut game, FrameInput { start: true, ..frame() }, true);
        assert!(moved.is_some());
        assert_eq!(game.mode(), Mode::Playing);
    }

    #[test]
    fn steering_between_ticks() {
        let config = GameConfig::default();
        let mut game = Game::new(&config, SmallRng::seed_from_u64(1));
        let mut clock = TickClock::new(Duration::from_millis(250), 0.0);
        apply_input(&mut game, FrameInput { start: true, ..frame() }, clock.tick_due(0.0));
        let head = game.snake().head();

        let down = FrameInput { direction: Some(Direction::Down), ..frame() };
        assert_eq!(apply_input(&mut game, down, clock.tick_due(0.125)), None);
        assert_eq!(game.snake().head(), head);

        assert!(apply_input(&mut game, frame(), clock.tick_due(0.25)).is_some());
        assert_eq!(game.direction(), Direction::Down);
        assert_eq!(game.snake().head(), head.step(Direction::Down));
    }

    #[test]
    fn eating_reaches_the_effects() {
        let config = GameConfig { grid_width: 4, grid_height: 1, ..GameConfig::default() };
        let snake = Snake::new(Cell::new(1, 0), 2, Direction::Right);
        let food = Some(Cell::new(2, 0));
        let mut game = Game::resume(&config, snake, Direction::Right, food, 0, SmallRng::seed_from_u64(5));
        let mut effects = Effects::new(&config, Quiet, SmallRng::seed_from_u64(6));

        apply_input(&mut game, frame(), true);
        dispatch_events(&mut game, &mut effects);

        assert_eq!(game.score(), 1);
        assert_eq!(game.food(), Some(Cell::new(3, 0)));
        assert!(effects.shake().is_active());
        assert!(game.drain_events().is_empty());
    }
}
