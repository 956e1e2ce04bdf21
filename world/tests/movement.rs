use maze_escape_core::{
    Board, Cell, Command, Difficulty, Direction, Event, Layout, Outcome, Position, RoundState,
};
use maze_escape_world::{self as world, query, World};

fn board_from_rows(rows: &[&str]) -> Board {
    let columns = u32::try_from(rows[0].len()).expect("columns fit");
    let mut board = Board::new(u32::try_from(rows.len()).expect("rows fit"), columns);
    for (row, line) in rows.iter().enumerate() {
        for (column, glyph) in line.chars().enumerate() {
            let cell = if glyph == '.' {
                Cell::Empty
            } else {
                Cell::from_glyph(glyph).expect("known glyph")
            };
            board.set(Position::new(row as u32, column as u32), cell);
        }
    }
    board
}

fn world_from_rows(rows: &[&str]) -> World {
    let layout = Layout::new(board_from_rows(rows)).expect("valid layout");
    World::new(layout, Difficulty::Medium, 1)
}

fn move_hero(world: &mut World, direction: Direction) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::MoveHero { direction }, &mut events);
    events
}

fn resolved_outcome(events: &[Event]) -> Option<Outcome> {
    events.iter().find_map(|event| match event {
        Event::HeroMoveResolved { outcome, .. } => Some(*outcome),
        _ => None,
    })
}

#[test]
fn moving_off_any_edge_is_rejected() {
    use Direction::{East, North, NorthEast, NorthWest, South, SouthEast, SouthWest, West};

    let corners = [
        (Position::new(0, 0), [North, West, NorthWest, NorthEast, SouthWest]),
        (Position::new(0, 4), [North, East, NorthEast, NorthWest, SouthEast]),
        (Position::new(4, 0), [South, West, SouthWest, SouthEast, NorthWest]),
        (Position::new(4, 4), [South, East, SouthEast, SouthWest, NorthEast]),
    ];

    for (hero, directions) in corners {
        for direction in directions {
            let mut board = Board::new(5, 5);
            board.set(hero, Cell::Hero);
            board.set(Position::new(2, 2), Cell::Exit);
            let layout = Layout::new(board.clone()).expect("valid layout");
            let mut world = World::new(layout, Difficulty::Easy, 1);

            let events = move_hero(&mut world, direction);

            assert_eq!(
                resolved_outcome(&events),
                Some(Outcome::OutOfBounds),
                "{hero} {direction:?}"
            );
            assert_eq!(query::round_state(&world), RoundState::Playing);
            assert_eq!(query::board(&world), &board);
            assert_eq!(query::hero(&world), Some(hero));
            assert_eq!(query::move_count(&world), 0);
        }
    }
}

#[test]
fn walls_block_without_side_effects() {
    let mut world = world_from_rows(&[".+...", "+H+..", ".+..*"]);
    let before = query::board(&world).clone();

    for direction in [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ] {
        let events = move_hero(&mut world, direction);
        assert_eq!(resolved_outcome(&events), Some(Outcome::Blocked));
    }

    assert_eq!(query::board(&world), &before);
    assert_eq!(query::hero(&world), Some(Position::new(1, 1)));
    assert_eq!(query::move_count(&world), 0);
}

#[test]
fn diagonal_moves_slip_between_walls() {
    let mut world = world_from_rows(&[".+...", "+H+..", ".+..*"]);

    let events = move_hero(&mut world, Direction::SouthEast);

    assert_eq!(resolved_outcome(&events), Some(Outcome::Moved));
    assert_eq!(query::hero(&world), Some(Position::new(2, 2)));
    assert_eq!(query::move_count(&world), 1);
}

#[test]
fn stepping_into_an_abyss_loses_the_round() {
    let mut world = world_from_rows(&["H#..*"]);

    let events = move_hero(&mut world, Direction::East);

    assert_eq!(resolved_outcome(&events), Some(Outcome::FellInAbyss));
    assert_eq!(query::round_state(&world), RoundState::Lost);
    assert_eq!(query::hero(&world), None);
    assert_eq!(query::board(&world).count(Cell::Hero), 0);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::RoundEnded {
            state: RoundState::Lost,
            outcome: Outcome::FellInAbyss,
            ..
        }
    )));
}

#[test]
fn walking_into_an_adversary_is_a_capture() {
    let mut world = world_from_rows(&["H~..*"]);

    let events = move_hero(&mut world, Direction::East);

    assert_eq!(resolved_outcome(&events), Some(Outcome::Captured));
    assert_eq!(query::round_state(&world), RoundState::Lost);
    assert_eq!(query::board(&world).get(Position::new(0, 1)), Some(Cell::Bat));
}

#[test]
fn terminal_rounds_ignore_further_moves() {
    let mut world = world_from_rows(&["H*..."]);

    let events = move_hero(&mut world, Direction::East);
    assert_eq!(resolved_outcome(&events), Some(Outcome::Victory));
    assert_eq!(query::round_state(&world), RoundState::Won);

    let board = query::board(&world).clone();
    for direction in Direction::ALL {
        let events = move_hero(&mut world, direction);
        assert!(events.is_empty());
        assert_eq!(query::board(&world), &board);
        assert_eq!(query::round_state(&world), RoundState::Won);
        assert_eq!(query::move_count(&world), 0);
    }
}
