use rand::Rng;
use rand::rngs::ThreadRng;

use super::config::GameConfig;
use super::direction::Direction;
use super::food::FoodSpawner;
use super::grid::Grid;
use super::state::{CollisionKind, GamePhase, GameState, Snake, Snapshot};

type ChangeHook = Box<dyn FnMut(&Snapshot)>;

/// The game engine: owns the creature, the food, the score, and the
/// lifecycle phase, and advances them one tick at a time.
///
/// Every mutating entry point takes `&mut self`, so one engine value is one
/// logical timeline: steering input can never interleave with an in-flight
/// tick. A host driving the engine from more than one thread must put the
/// whole engine behind a single mutex.
///
/// The engine never returns errors. Collisions are not faults; they are the
/// transition to [`GamePhase::Over`], reported through [`Snapshot::phase`].
pub struct SnakeEngine<R = ThreadRng> {
    config: GameConfig,
    grid: Grid,
    spawner: FoodSpawner<R>,
    state: GameState,
    on_change: Option<ChangeHook>,
}

impl SnakeEngine<ThreadRng> {
    /// Create an engine backed by the thread-local RNG
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> SnakeEngine<R> {
    /// Create an engine with an injected RNG, for seeded play and tests
    ///
    /// Panics when the configuration violates its contract: the initial
    /// length must be at least 3 and the centered creature must fit on the
    /// grid.
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        assert!(
            config.initial_length >= 3,
            "initial creature length must be at least 3"
        );

        let grid = Grid::new(config.grid_size);
        let mut spawner = FoodSpawner::with_rng(grid, rng);
        let state = creation_state(&config, grid, &mut spawner);

        assert!(
            state.snake.cells().iter().all(|&cell| grid.in_bounds(cell)),
            "initial creature must fit on the grid"
        );

        Self {
            config,
            grid,
            spawner,
            state,
            on_change: None,
        }
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Foods eaten this game
    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Read-only view of the current state
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot(self.grid)
    }

    /// Install the change hook, invoked synchronously after every
    /// observable mutation on the same timeline that mutated
    pub fn set_on_change(&mut self, hook: impl FnMut(&Snapshot) + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    /// Rebuild the creation state: idle, centered creature, fresh food,
    /// score zero
    pub fn reset(&mut self) {
        self.state = creation_state(&self.config, self.grid, &mut self.spawner);
        self.notify();
    }

    /// Feed one arbitrated steering input into the engine
    ///
    /// An exact reversal of the committed heading is dropped silently in
    /// every phase; an accepted input while idle starts the game; a
    /// playable input while the game is over is consumed as a restart
    /// signal instead of being latched.
    pub fn submit_direction(&mut self, direction: Direction) {
        // The reversal rule runs before the phase is consulted: a dropped
        // input cannot restart a finished game.
        if direction.is_opposite(self.state.snake.heading) {
            return;
        }

        match self.state.phase {
            GamePhase::Over => self.reset(),
            GamePhase::Idle => {
                self.state.snake.steer(direction);
                self.state.phase = GamePhase::Running;
                self.notify();
            }
            GamePhase::Running => {
                self.state.snake.steer(direction);
            }
        }
    }

    /// Restart signal; accepted only while the game is over
    pub fn submit_restart(&mut self) {
        if self.state.phase == GamePhase::Over {
            self.reset();
        }
    }

    /// Advance the game by exactly one tick
    ///
    /// Commits the pending heading, moves the head, and resolves collisions
    /// and food. Outside of [`GamePhase::Running`] this is a no-op, which is
    /// what gates the step timer: once the phase flips away from `Running`,
    /// no further automatic tick can touch the state.
    pub fn tick(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }

        self.state.snake.commit_heading();
        let new_head = self.state.snake.next_head();

        if !self.grid.in_bounds(new_head) {
            self.game_over(CollisionKind::Wall);
            return;
        }

        // Pre-move body, tail included: stepping into the cell the tail is
        // about to vacate is fatal.
        if self.state.snake.occupies(new_head) {
            self.game_over(CollisionKind::Body);
            return;
        }

        let ate = new_head == self.state.food;
        self.state.snake.advance(new_head, ate);

        if ate {
            self.state.score += 1;
            self.state.food = self.spawner.spawn(self.state.snake.cells());
        }

        self.notify();
    }

    fn game_over(&mut self, kind: CollisionKind) {
        // The phase flips before the hook runs; the timer gate is already
        // closed when the shell draws the terminal frame.
        self.state.phase = GamePhase::Over;
        self.state.collision = Some(kind);
        self.notify();
    }

    fn notify(&mut self) {
        if let Some(hook) = self.on_change.as_mut() {
            let snapshot = self.state.snapshot(self.grid);
            hook(&snapshot);
        }
    }
}

/// The state every game starts from
fn creation_state<R: Rng>(
    config: &GameConfig,
    grid: Grid,
    spawner: &mut FoodSpawner<R>,
) -> GameState {
    let snake = Snake::new(grid.center(), config.initial_heading, config.initial_length);
    let food = spawner.spawn(snake.cells());
    GameState::new(snake, food)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Cell;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    fn engine() -> SnakeEngine<StdRng> {
        SnakeEngine::with_rng(GameConfig::default(), StdRng::seed_from_u64(99))
    }

    fn engine_with(config: GameConfig) -> SnakeEngine<StdRng> {
        SnakeEngine::with_rng(config, StdRng::seed_from_u64(99))
    }

    /// Park the food where the driven path will not cross it
    fn park_food(engine: &mut SnakeEngine<StdRng>, cell: Cell) {
        engine.state.food = cell;
    }

    fn drive_into_right_wall(engine: &mut SnakeEngine<StdRng>) {
        park_food(engine, Cell::new(0, 0));
        engine.submit_direction(Direction::Right);
        while engine.phase() == GamePhase::Running {
            engine.tick();
        }
    }

    #[test]
    fn test_initial_state() {
        let engine = engine();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.phase, GamePhase::Idle);
        assert_eq!(snapshot.score, 0);
        assert_eq!(
            snapshot.cells,
            vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]
        );
        assert!(snapshot.grid.in_bounds(snapshot.food));
        assert!(!snapshot.cells.contains(&snapshot.food));
        assert_eq!(snapshot.collision, None);
    }

    #[test]
    fn test_seeded_engines_agree() {
        let a = SnakeEngine::with_rng(GameConfig::default(), StdRng::seed_from_u64(7));
        let b = SnakeEngine::with_rng(GameConfig::default(), StdRng::seed_from_u64(7));
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_first_input_starts_the_game() {
        let mut engine = engine();

        engine.submit_direction(Direction::Up);

        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.state.snake.pending, Direction::Up);
    }

    #[test]
    fn test_rejected_reversal_does_not_start_the_game() {
        let mut engine = engine();

        // The creature spawns heading right; left is an exact reversal.
        engine.submit_direction(Direction::Left);

        assert_eq!(engine.phase(), GamePhase::Idle);
        assert_eq!(engine.state.snake.pending, Direction::Right);
    }

    #[test]
    fn test_reversal_never_changes_pending() {
        let mut engine = engine();
        engine.submit_direction(Direction::Right);

        engine.submit_direction(Direction::Left);

        assert_eq!(engine.state.snake.pending, Direction::Right);
        assert_eq!(engine.phase(), GamePhase::Running);
    }

    #[test]
    fn test_straight_step_drops_tail() {
        let mut engine = engine();
        park_food(&mut engine, Cell::new(0, 0));
        engine.submit_direction(Direction::Right);

        engine.tick();

        let snapshot = engine.snapshot();
        assert_eq!(
            snapshot.cells,
            vec![Cell::new(11, 10), Cell::new(10, 10), Cell::new(9, 10)]
        );
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.phase, GamePhase::Running);
    }

    #[test]
    fn test_step_onto_food_grows_and_scores() {
        let mut engine = engine();
        engine.submit_direction(Direction::Right);
        park_food(&mut engine, Cell::new(11, 10));

        engine.tick();

        let snapshot = engine.snapshot();
        assert_eq!(
            snapshot.cells,
            vec![
                Cell::new(11, 10),
                Cell::new(10, 10),
                Cell::new(9, 10),
                Cell::new(8, 10),
            ]
        );
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.phase, GamePhase::Running);
        assert!(!snapshot.cells.contains(&snapshot.food));
        assert!(snapshot.grid.in_bounds(snapshot.food));
    }

    #[test]
    fn test_wall_collision_ends_the_game() {
        let mut engine = engine();
        park_food(&mut engine, Cell::new(0, 0));
        engine.submit_direction(Direction::Right);

        // Head starts at x = 10; nine steps reach the last column.
        for _ in 0..9 {
            engine.tick();
        }
        assert_eq!(engine.snapshot().cells[0], Cell::new(19, 10));
        assert_eq!(engine.phase(), GamePhase::Running);

        engine.tick();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Over);
        assert_eq!(snapshot.collision, Some(CollisionKind::Wall));
        // The fatal step never lands: the creature keeps its last frame.
        assert_eq!(snapshot.cells[0], Cell::new(19, 10));
        assert_eq!(snapshot.cells.len(), 3);
    }

    #[test]
    fn test_tick_after_game_over_is_a_noop() {
        let mut engine = engine();
        drive_into_right_wall(&mut engine);

        let before = engine.snapshot();
        engine.tick();

        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_tick_while_idle_is_a_noop() {
        let mut engine = engine();

        let before = engine.snapshot();
        engine.tick();

        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_self_collision_on_departing_tail() {
        // Length 4: walking a tight box steps onto the current tail cell,
        // which is fatal even though that cell would be vacated this tick.
        let mut engine = engine_with(GameConfig {
            initial_length: 4,
            ..GameConfig::small()
        });
        park_food(&mut engine, Cell::new(0, 0));

        engine.submit_direction(Direction::Right);
        engine.tick(); // (6, 5)
        engine.submit_direction(Direction::Down);
        engine.tick(); // (6, 6)
        engine.submit_direction(Direction::Left);
        engine.tick(); // (5, 6); tail now sits on (5, 5)
        engine.submit_direction(Direction::Up);
        engine.tick(); // into (5, 5)

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Over);
        assert_eq!(snapshot.collision, Some(CollisionKind::Body));
    }

    #[test]
    fn test_self_collision_mid_body() {
        let mut engine = engine_with(GameConfig {
            initial_length: 5,
            ..GameConfig::small()
        });
        park_food(&mut engine, Cell::new(0, 0));

        engine.submit_direction(Direction::Right);
        engine.tick();
        engine.submit_direction(Direction::Down);
        engine.tick();
        engine.submit_direction(Direction::Left);
        engine.tick();
        engine.submit_direction(Direction::Up);
        engine.tick();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Over);
        assert_eq!(snapshot.collision, Some(CollisionKind::Body));
    }

    #[test]
    fn test_restart_signal_rebuilds_creation_state() {
        let mut engine = engine();
        drive_into_right_wall(&mut engine);

        engine.submit_restart();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Idle);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.cells.len(), 3);
        assert_eq!(snapshot.cells[0], Cell::new(10, 10));
        assert!(!snapshot.cells.contains(&snapshot.food));
        assert_eq!(snapshot.collision, None);
    }

    #[test]
    fn test_restart_signal_ignored_unless_over() {
        let mut engine = engine();
        engine.submit_direction(Direction::Right);
        engine.tick();

        let before = engine.snapshot();
        engine.submit_restart();

        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_playable_direction_restarts_when_over() {
        let mut engine = engine();
        drive_into_right_wall(&mut engine);

        engine.submit_direction(Direction::Up);

        // The input is consumed as a restart, not latched as movement.
        assert_eq!(engine.phase(), GamePhase::Idle);
        assert_eq!(engine.state.snake.pending, Direction::Right);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_reversal_while_over_is_ignored() {
        let mut engine = engine();
        drive_into_right_wall(&mut engine);
        let before = engine.snapshot();

        // The creature died heading right; left is still its reversal.
        engine.submit_direction(Direction::Left);

        assert_eq!(engine.phase(), GamePhase::Over);
        assert_eq!(engine.state.snake.pending, Direction::Right);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_invariants_hold_across_driven_play() {
        let mut engine = engine();
        engine.submit_direction(Direction::Right);

        // Staircase toward the far corner, eating whatever food the seed
        // drops on the way.
        let mut turns = [Direction::Down, Direction::Right].iter().cycle();
        for _ in 0..200 {
            if engine.phase() != GamePhase::Running {
                break;
            }
            engine.submit_direction(*turns.next().unwrap());
            engine.tick();

            let snapshot = engine.snapshot();
            let unique: HashSet<_> = snapshot.cells.iter().collect();
            assert_eq!(unique.len(), snapshot.cells.len());
            if snapshot.phase == GamePhase::Running {
                assert!(!snapshot.cells.contains(&snapshot.food));
            }
        }

        assert_eq!(engine.phase(), GamePhase::Over);
    }

    #[test]
    fn test_hook_fires_on_phase_changes_and_ticks() {
        let mut engine = engine();
        park_food(&mut engine, Cell::new(0, 0));

        let phases = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&phases);
        engine.set_on_change(move |snapshot| sink.borrow_mut().push(snapshot.phase));

        engine.submit_direction(Direction::Right);
        engine.tick();
        engine.tick();

        assert_eq!(
            *phases.borrow(),
            vec![GamePhase::Running, GamePhase::Running, GamePhase::Running]
        );
    }

    #[test]
    fn test_hook_reports_terminal_frame_exactly_once() {
        let mut engine = engine();
        park_food(&mut engine, Cell::new(0, 0));

        let over_frames = Rc::new(RefCell::new(0u32));
        let sink = Rc::clone(&over_frames);
        engine.set_on_change(move |snapshot| {
            if snapshot.phase == GamePhase::Over {
                assert_eq!(snapshot.collision, Some(CollisionKind::Wall));
                *sink.borrow_mut() += 1;
            }
        });

        engine.submit_direction(Direction::Right);
        while engine.phase() == GamePhase::Running {
            engine.tick();
        }
        engine.tick();
        engine.tick();

        assert_eq!(*over_frames.borrow(), 1);
    }

    #[test]
    fn test_hook_fires_on_restart() {
        let mut engine = engine();
        drive_into_right_wall(&mut engine);

        let phases = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&phases);
        engine.set_on_change(move |snapshot| sink.borrow_mut().push(snapshot.phase));

        engine.submit_restart();

        assert_eq!(*phases.borrow(), vec![GamePhase::Idle]);
    }

    #[test]
    #[should_panic(expected = "at least 3")]
    fn test_initial_length_below_minimum_is_rejected() {
        let _ = engine_with(GameConfig {
            initial_length: 2,
            ..GameConfig::default()
        });
    }

    #[test]
    #[should_panic(expected = "fit on the grid")]
    fn test_oversized_creature_is_rejected() {
        let _ = engine_with(GameConfig {
            grid_size: 4,
            initial_length: 4,
            ..GameConfig::default()
        });
    }
}
