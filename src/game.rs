//! Game state machine: mode transitions plus the world (snake, food, score)
//! that only changes on a tick or a restart.

use rand::Rng;
use rand::rngs::SmallRng;

use crate::config::GameConfig;
use crate::food;
use crate::grid::{Cell, Direction, Grid};
use crate::snake::{Collision, MoveResult, Snake};

const START_DIRECTION: Direction = Direction::Right;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Start,
    Playing,
    GameOver,
    Terminated,
}

/// Things worth telling the outside world about. Queued on the game and
/// drained by whoever drives the loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    FoodEaten { score: u32, at: Cell },
    Collided { cause: Collision, score: u32 },
    /// The snake covers every cell; nowhere left to put food.
    BoardFilled { score: u32 },
    Restarted,
    QuitRequested,
}

/// Read-only view handed to the renderer.
#[derive(Copy, Clone, Debug)]
pub struct Snapshot<'a> {
    pub mode: Mode,
    pub snake: &'a Snake,
    pub food: Option<Cell>,
    pub score: u32,
}

pub struct Game<R = SmallRng> {
    grid: Grid,
    initial_length: usize,
    snake: Snake,
    direction: Direction,
    pending: Direction,
    food: Option<Cell>,
    score: u32,
    mode: Mode,
    events: Vec<GameEvent>,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(config: &GameConfig, mut rng: R) -> Self {
        let grid = Grid::from_config(config);
        let initial_length = config.initial_length as usize;
        let snake = Snake::new(grid.center(), initial_length, START_DIRECTION);
        let food = food::place(&grid, &snake, &mut rng);
        Self {
            grid,
            initial_length,
            snake,
            direction: START_DIRECTION,
            pending: START_DIRECTION,
            food,
            score: 0,
            mode: Mode::Start,
            events: Vec::new(),
            rng,
        }
    }

    /// Restores a saved or hand-built world, already in `Playing` mode.
    /// The snake must lie on the grid. Food that is off the grid or under the
    /// snake is re-placed.
    pub fn resume(
        config: &GameConfig,
        snake: Snake,
        direction: Direction,
        food: Option<Cell>,
        score: u32,
        mut rng: R,
    ) -> Self {
        let grid = Grid::from_config(config);
        debug_assert!(
            snake.cells().all(|cell| grid.contains(cell)),
            "resumed snake leaves the {}x{} grid",
            grid.width(),
            grid.height()
        );
        let food = match food {
            Some(cell) if grid.contains(cell) && !snake.occupies(cell) => Some(cell),
            _ => food::place(&grid, &snake, &mut rng),
        };
        Self {
            grid,
            initial_length: config.initial_length as usize,
            snake,
            direction,
            pending: direction,
            food,
            score,
            mode: Mode::Playing,
            events: Vec::new(),
            rng,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Heading applied on the most recent tick.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            mode: self.mode,
            snake: &self.snake,
            food: self.food,
            score: self.score,
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn start(&mut self) {
        if self.mode == Mode::Start {
            self.mode = Mode::Playing;
            self.events.push(GameEvent::Started);
        }
    }

    /// Records the heading for the next tick. Ignored outside `Playing`.
    pub fn steer(&mut self, direction: Direction) {
        if self.mode == Mode::Playing {
            self.pending = direction;
        }
    }

    /// Advances the world one cell. Does nothing outside `Playing`; returns
    /// what the snake did otherwise.
    pub fn tick(&mut self, pending: Option<Direction>) -> Option<MoveResult> {
        if self.mode != Mode::Playing {
            return None;
        }
        if let Some(direction) = pending {
            self.pending = direction;
        }
        self.direction = Direction::resolve(self.direction, self.pending);

        let result = self.snake.advance(self.direction, &self.grid, self.food);
        match result {
            MoveResult::Moved { .. } => {}
            MoveResult::Ate { new_head } => {
                self.score += 1;
                self.events.push(GameEvent::FoodEaten { score: self.score, at: new_head });
                self.food = food::place(&self.grid, &self.snake, &mut self.rng);
                if self.food.is_none() {
                    self.mode = Mode::GameOver;
                    self.events.push(GameEvent::BoardFilled { score: self.score });
                }
            }
            MoveResult::Crashed(cause) => {
                self.mode = Mode::GameOver;
                self.events.push(GameEvent::Collided { cause, score: self.score });
            }
        }
        Some(result)
    }

    /// Fresh world and straight back into play; only honoured after a game
    /// over.
    pub fn restart(&mut self) {
        if self.mode != Mode::GameOver {
            return;
        }
        self.snake = Snake::new(self.grid.center(), self.initial_length, START_DIRECTION);
        self.direction = START_DIRECTION;
        self.pending = START_DIRECTION;
        self.food = food::place(&self.grid, &self.snake, &mut self.rng);
        self.score = 0;
        self.mode = Mode::Playing;
        self.events.push(GameEvent::Restarted);
    }

    pub fn request_quit(&mut self) {
        if self.mode != Mode::Terminated {
            self.mode = Mode::Terminated;
            self.events.push(GameEvent::QuitRequested);
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.mode == Mode::Terminated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn game() -> Game {
        Game::new(&GameConfig::default(), SmallRng::seed_from_u64(3))
    }

    #[test]
    fn starts_on_start_screen() {
        let mut g = game();
        assert_eq!(g.mode(), Mode::Start);
        let before = g.snake().clone();
        assert_eq!(g.tick(Some(Direction::Up)), None);
        assert_eq!(g.snake(), &before);

        g.start();
        assert_eq!(g.mode(), Mode::Playing);
        assert_eq!(g.drain_events(), vec![GameEvent::Started]);
        assert!(g.drain_events().is_empty());
    }

    #[test]
    fn initial_world() {
        let g = game();
        let cells: Vec<_> = g.snake().cells().collect();
        assert_eq!(cells, vec![Cell::new(14, 15), Cell::new(15, 15)]);
        assert_eq!(g.direction(), Direction::Right);
        assert_eq!(g.score(), 0);
        let food = g.food().unwrap();
        assert!(!g.snake().occupies(food));
    }

    #[test]
    fn restart_ignored_unless_game_over() {
        let mut g = game();
        g.restart();
        assert_eq!(g.mode(), Mode::Start);
        g.start();
        g.tick(None);
        g.restart();
        assert_eq!(g.mode(), Mode::Playing);
        assert_eq!(g.snake().head(), Cell::new(16, 15));
    }

    #[test]
    fn quit_from_any_mode() {
        let mut g = game();
        g.request_quit();
        assert!(g.is_terminated());
        g.request_quit();
        assert_eq!(g.drain_events(), vec![GameEvent::QuitRequested]);
        g.start();
        assert_eq!(g.mode(), Mode::Terminated);
        assert_eq!(g.tick(None), None);
    }

    #[test]
    fn pending_direction_persists_between_ticks() {
        let mut g = game();
        g.start();
        g.tick(Some(Direction::Down));
        g.tick(None);
        assert_eq!(g.direction(), Direction::Down);
        assert_eq!(g.snake().head(), Cell::new(15, 17));
    }

    #[test]
    fn steer_waits_for_the_tick() {
        let mut g = game();
        g.steer(Direction::Down);
        g.start();
        g.tick(None);
        assert_eq!(g.direction(), Direction::Right);

        g.steer(Direction::Up);
        g.steer(Direction::Down);
        assert_eq!(g.snake().head(), Cell::new(16, 15));
        g.tick(None);
        assert_eq!(g.direction(), Direction::Down);
        assert_eq!(g.snake().head(), Cell::new(16, 16));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "leaves the 4x1 grid")]
    fn resume_rejects_snake_off_grid() {
        let config = GameConfig { grid_width: 4, grid_height: 1, ..GameConfig::default() };
        let snake = Snake::new(Cell::new(1, 3), 2, Direction::Right);
        Game::resume(&config, snake, Direction::Right, None, 0, SmallRng::seed_from_u64(0));
    }

    #[test]
    fn board_filled_ends_the_game() {
        let config = GameConfig {
            grid_width: 4,
            grid_height: 1,
            initial_length: 2,
            ..GameConfig::default()
        };
        let snake = Snake::new(Cell::new(2, 0), 3, Direction::Right);
        let mut g = Game::resume(&config, snake, Direction::Right, None, 5, SmallRng::seed_from_u64(0));
        assert_eq!(g.food(), Some(Cell::new(3, 0)));

        assert_eq!(g.tick(None), Some(MoveResult::Ate { new_head: Cell::new(3, 0) }));
        assert_eq!(g.mode(), Mode::GameOver);
        assert_eq!(g.food(), None);
        assert_eq!(
            g.drain_events(),
            vec![
                GameEvent::FoodEaten { score: 6, at: Cell::new(3, 0) },
                GameEvent::BoardFilled { score: 6 },
            ]
        );
    }
}
