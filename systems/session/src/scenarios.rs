//! Rule scenarios staged through the world scaffolding and driven by the controller.

use std::time::Duration;

use snake_core::{
    Cell, CollisionKind, Direction, Event, GameConfig, GameMode, Snapshot, TickOutcome, TickStatus,
};
use snake_world::{query, scaffolding};

use crate::{BestScore, Lifecycle, Phase, Session};

fn controller(config: GameConfig) -> Session {
    Session::new(config, BestScore::default()).expect("valid configuration")
}

fn playing(mode: GameMode) -> Session {
    let mut session = controller(GameConfig::default());
    let _ = session.start_game(mode);
    session
}

fn tick(session: &mut Session) -> TickOutcome {
    let interval = session.state().speed;
    session
        .on_tick(interval)
        .expect("a full interval always fires a tick")
}

#[test]
fn eating_food_scores_and_grows() {
    let mut session = playing(GameMode::Classic);
    scaffolding::place_food(session.world_mut(), &[Cell::new(10, 9)]);

    let outcome = tick(&mut session);

    assert_eq!(outcome.status, TickStatus::Continued);
    assert!(outcome.tags.ate_food);
    assert_eq!(
        outcome.snapshot.snake,
        vec![Cell::new(10, 9), Cell::new(9, 9)]
    );
    assert_eq!(session.state().score, 1);
    assert_eq!(session.state().best_score.get(), 1);
    assert_eq!(outcome.snapshot.food.len(), 1);
    assert!(!outcome.snapshot.snake.contains(&outcome.snapshot.food[0]));
}

#[test]
fn leaving_the_board_ends_classic_session() {
    let mut session = playing(GameMode::Classic);
    scaffolding::place_snake(session.world_mut(), &[Cell::new(0, 9)], Direction::Left);

    let outcome = tick(&mut session);

    assert_eq!(outcome.status, TickStatus::Collided);
    assert_eq!(outcome.snapshot.snake, vec![Cell::new(0, 9)]);
    assert_eq!(session.state().phase, Phase::Menu);
    assert!(session.events().contains(&Event::Collided {
        cell: None,
        kind: CollisionKind::OutOfBounds,
    }));
    assert!(session.on_tick(Duration::from_secs(1)).is_none());
}

#[test]
fn no_die_wraps_across_the_edge() {
    let mut session = playing(GameMode::NoDie);
    scaffolding::place_snake(session.world_mut(), &[Cell::new(0, 9)], Direction::Left);
    scaffolding::place_food(session.world_mut(), &[Cell::new(5, 5)]);

    let outcome = tick(&mut session);

    assert_eq!(outcome.status, TickStatus::Continued);
    assert_eq!(outcome.snapshot.head(), Some(Cell::new(19, 9)));
    assert_eq!(session.state().phase, Phase::Playing);
}

#[test]
fn entering_the_body_collides_without_mutation() {
    let mut session = playing(GameMode::Classic);
    let body = [
        Cell::new(5, 5),
        Cell::new(5, 6),
        Cell::new(4, 6),
        Cell::new(4, 5),
    ];
    scaffolding::place_snake(session.world_mut(), &body, Direction::Up);
    scaffolding::place_food(session.world_mut(), &[Cell::new(15, 15)]);
    let before = session.snapshot();

    assert!(session.on_input("ArrowLeft"));
    let outcome = tick(&mut session);

    assert_eq!(outcome.status, TickStatus::Collided);
    assert_eq!(outcome.snapshot.snake, before.snake);
    assert_eq!(outcome.snapshot.food, before.food);
    assert_eq!(outcome.snapshot.walls, before.walls);
    assert!(session.events().contains(&Event::Collided {
        cell: Some(Cell::new(4, 5)),
        kind: CollisionKind::SelfCollision,
    }));
}

#[test]
fn reversal_request_is_ignored_for_long_snake() {
    let mut session = playing(GameMode::Classic);
    scaffolding::place_snake(
        session.world_mut(),
        &[Cell::new(5, 5), Cell::new(4, 5)],
        Direction::Right,
    );
    scaffolding::place_food(session.world_mut(), &[Cell::new(15, 15)]);

    assert!(!session.on_input("ArrowLeft"));
    assert!(!session.on_input("ArrowLeft"));
    assert!(!session.on_input("Escape"));
    let outcome = tick(&mut session);

    assert_eq!(outcome.snapshot.direction, Direction::Right);
    assert_eq!(outcome.snapshot.head(), Some(Cell::new(6, 5)));
}

#[test]
fn portal_teleports_head_to_linked_cell() {
    let mut session = playing(GameMode::Portal);
    scaffolding::place_food(session.world_mut(), &[Cell::new(10, 9), Cell::new(3, 15)]);

    let outcome = tick(&mut session);

    assert!(outcome.tags.ate_food);
    assert!(outcome.tags.teleported);
    assert_eq!(outcome.snapshot.snake, vec![Cell::new(3, 15), Cell::new(9, 9)]);
    assert_eq!(outcome.snapshot.food.len(), 2);
    assert_ne!(outcome.snapshot.food[0], outcome.snapshot.food[1]);
    for food in &outcome.snapshot.food {
        assert!(!outcome.snapshot.snake.contains(food));
    }
    assert!(session.events().contains(&Event::Teleported {
        from: Cell::new(10, 9),
        to: Cell::new(3, 15),
    }));
    assert_eq!(session.state().score, 1);
}

#[test]
fn second_portal_leads_back_to_first() {
    let mut session = playing(GameMode::Portal);
    scaffolding::place_food(session.world_mut(), &[Cell::new(2, 2), Cell::new(10, 9)]);

    let outcome = tick(&mut session);

    assert_eq!(outcome.snapshot.head(), Some(Cell::new(2, 2)));
}

#[test]
fn walls_mode_adds_a_wall_per_meal() {
    let mut session = playing(GameMode::Walls);
    scaffolding::place_food(session.world_mut(), &[Cell::new(10, 9)]);

    let outcome = tick(&mut session);

    assert!(outcome.tags.spawned_wall);
    assert_eq!(outcome.snapshot.walls.len(), 1);
    let wall = outcome.snapshot.walls[0];
    assert!(!outcome.snapshot.snake.contains(&wall));
    assert!(!outcome.snapshot.food.contains(&wall));
}

#[test]
fn speed_mode_ramps_interval_per_meal() {
    let mut session = playing(GameMode::Speed);

    for column in 10..13 {
        scaffolding::place_food(session.world_mut(), &[Cell::new(column, 9)]);
        let outcome = tick(&mut session);
        assert!(outcome.tags.ate_food);
    }

    let millis = session.state().speed.as_secs_f64() * 1_000.0;
    assert!((millis - 145.8).abs() < 0.01, "unexpected interval {millis}");
    assert_eq!(session.state().score, 3);
}

#[test]
fn speed_mode_respects_interval_floor() {
    let config = GameConfig::default().with_min_interval(Duration::from_millis(190));
    let mut session = controller(config);
    let _ = session.start_game(GameMode::Speed);

    for column in 10..12 {
        scaffolding::place_food(session.world_mut(), &[Cell::new(column, 9)]);
        let _ = tick(&mut session);
    }

    assert_eq!(session.state().speed, Duration::from_millis(190));
}

#[test]
fn other_modes_keep_base_interval() {
    let mut session = playing(GameMode::Classic);
    scaffolding::place_food(session.world_mut(), &[Cell::new(10, 9)]);

    let _ = tick(&mut session);

    assert_eq!(session.state().speed, Duration::from_millis(200));
}

#[test]
fn best_score_survives_restart() {
    let mut session = playing(GameMode::Classic);
    for column in 10..12 {
        scaffolding::place_food(session.world_mut(), &[Cell::new(column, 9)]);
        let _ = tick(&mut session);
    }
    scaffolding::place_snake(session.world_mut(), &[Cell::new(19, 0)], Direction::Right);
    assert!(tick(&mut session).is_collided());
    assert_eq!(session.state().score, 2);

    let snapshot = session
        .handle_lifecycle(Lifecycle::StartGame(GameMode::Speed))
        .expect("start returns a snapshot");

    assert_eq!(snapshot.snake, vec![Cell::new(9, 9)]);
    assert_eq!(session.state().score, 0);
    assert_eq!(session.state().best_score.get(), 2);
    assert_eq!(session.state().speed, Duration::from_millis(200));
    assert!(query::walls(session.world()).is_empty());
}

#[test]
fn short_frames_accumulate_into_one_tick() {
    let mut session = playing(GameMode::Classic);
    scaffolding::place_food(session.world_mut(), &[Cell::new(0, 0)]);

    assert!(session.on_tick(Duration::from_millis(100)).is_none());
    assert!(session.on_tick(Duration::from_millis(99)).is_none());
    assert!(session.on_tick(Duration::from_millis(1)).is_some());
    assert_eq!(query::head(session.world()), Cell::new(10, 9));
}

#[test]
fn long_frame_fires_single_tick() {
    let mut session = playing(GameMode::Classic);
    scaffolding::place_food(session.world_mut(), &[Cell::new(0, 0)]);

    assert!(session.on_tick(Duration::from_millis(900)).is_some());
    assert_eq!(query::head(session.world()), Cell::new(10, 9));
    assert_eq!(query::tick_index(session.world()), 1);
}

#[test]
fn no_die_head_passes_through_its_body() {
    let mut session = playing(GameMode::NoDie);
    let body = [
        Cell::new(5, 5),
        Cell::new(5, 6),
        Cell::new(4, 6),
        Cell::new(4, 5),
        Cell::new(4, 4),
    ];
    scaffolding::place_snake(session.world_mut(), &body, Direction::Up);
    scaffolding::place_food(session.world_mut(), &[Cell::new(15, 15)]);

    assert!(session.on_input("ArrowLeft"));
    let outcome = tick(&mut session);

    assert_eq!(outcome.status, TickStatus::Continued);
    assert_eq!(
        outcome.snapshot.snake,
        vec![
            Cell::new(4, 5),
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(4, 6),
            Cell::new(4, 5),
        ]
    );
    assert_eq!(session.state().phase, Phase::Playing);
    assert!(!session
        .events()
        .iter()
        .any(|event| matches!(event, Event::Collided { .. })));
}

/// Heading and cell of the first neighbour the head can safely enter.
fn free_neighbour(snapshot: &Snapshot) -> (Direction, Cell) {
    let head = snapshot.head().expect("snake is never empty");
    [Direction::Right, Direction::Down, Direction::Left, Direction::Up]
        .into_iter()
        .filter(|direction| !direction.is_opposite(snapshot.direction))
        .filter_map(|direction| {
            head.step(direction, snapshot.board_size)
                .map(|cell| (direction, cell))
        })
        .find(|(_, cell)| !snapshot.snake.contains(cell) && !snapshot.walls.contains(cell))
        .expect("a free neighbour exists")
}

/// First cell, scanning from the far corner, that is empty and differs from `except`.
fn free_cell(snapshot: &Snapshot, except: Cell) -> Cell {
    let size = snapshot.board_size;
    (0..size)
        .rev()
        .flat_map(|y| (0..size).rev().map(move |x| Cell::new(x, y)))
        .find(|cell| {
            *cell != except && !snapshot.snake.contains(cell) && !snapshot.walls.contains(cell)
        })
        .expect("board has a free cell")
}

fn assert_spawns_avoid_occupied_cells(snapshot: &Snapshot) {
    for (index, food) in snapshot.food.iter().enumerate() {
        assert!(!snapshot.snake.contains(food), "food {food} on snake");
        assert!(!snapshot.walls.contains(food), "food {food} on wall");
        assert!(
            !snapshot.food[index + 1..].contains(food),
            "portals share cell {food}"
        );
    }
    for wall in &snapshot.walls {
        assert!(!snapshot.snake.contains(wall), "wall {wall} on snake");
        assert!(!snapshot.food.contains(wall), "wall {wall} on food");
    }
}

fn feed(mode: GameMode, meals: u32) -> Session {
    let mut session = playing(mode);

    for meal in 1..=meals {
        let before = session.snapshot();
        let (direction, next) = free_neighbour(&before);
        let _ = session.on_direction(direction);
        let food = match mode.food_count() {
            2 => vec![next, free_cell(&before, next)],
            _ => vec![next],
        };
        scaffolding::place_food(session.world_mut(), &food);

        let outcome = tick(&mut session);

        assert_eq!(outcome.status, TickStatus::Continued, "{mode} meal {meal}");
        assert!(outcome.tags.ate_food, "{mode} meal {meal}");
        assert_eq!(outcome.snapshot.snake.len(), meal as usize + 1);
        assert_eq!(outcome.snapshot.food.len(), mode.food_count());
        assert_spawns_avoid_occupied_cells(&outcome.snapshot);
        if mode == GameMode::Walls {
            assert_eq!(outcome.snapshot.walls.len(), meal as usize);
        } else {
            assert!(outcome.snapshot.walls.is_empty());
        }
    }
    session
}

#[test]
fn walls_spawn_one_per_meal_on_free_cells() {
    let session = feed(GameMode::Walls, 12);
    assert_eq!(session.state().score, 12);
}

#[test]
fn portals_respawn_on_free_distinct_cells() {
    let session = feed(GameMode::Portal, 12);
    assert_eq!(session.state().score, 12);
}

#[test]
fn classic_food_respawns_off_the_snake() {
    let session = feed(GameMode::Classic, 12);
    assert_eq!(session.state().score, 12);
}
