use battleship::{
    is_fleet_destroyed, occupied_cells, AttackResult, BoardState, CellState, Coordinate, GameConfig, Orientation,
    ShipKind, Side, BOARD_SIZE, FLEET, MAX_PLACEMENT_ATTEMPTS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64) -> BoardState {
    let mut rng = SmallRng::seed_from_u64(seed);
    let config = GameConfig::default();
    let mut board = BoardState::random_fleet(
        Side::Ai,
        config.board_size(),
        config.fleet(),
        MAX_PLACEMENT_ATTEMPTS,
        &mut rng,
    )
    .unwrap();
    let shots = rng.random_range(0..BOARD_SIZE * 3);
    for _ in 0..shots {
        let c = Coordinate::new(
            rng.random_range(0..BOARD_SIZE),
            rng.random_range(0..BOARD_SIZE),
        );
        board = board.resolve_attack(c).unwrap().board;
    }
    board
}

fn orientation(vertical: bool) -> Orientation {
    if vertical {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn placement_valid_iff_in_bounds_and_free(
        seed in any::<u64>(),
        kind_idx in 0usize..5,
        x in 0usize..12,
        y in 0usize..12,
        vertical in any::<bool>(),
    ) {
        let board = random_board(seed);
        let def = FLEET[kind_idx].definition();
        let o = orientation(vertical);
        let cells = occupied_cells(&def, Coordinate::new(x, y), o);
        let in_bounds = cells.iter().all(|c| c.x < BOARD_SIZE && c.y < BOARD_SIZE);
        let free = cells.iter().all(|&c| board.ship_at(c).is_none());
        prop_assert_eq!(board.validate_placement(&def, Coordinate::new(x, y), o), in_bounds && free);
    }

    #[test]
    fn resolve_attack_twice_is_stable(seed in any::<u64>(), x in 0..BOARD_SIZE, y in 0..BOARD_SIZE) {
        let board = random_board(seed);
        let c = Coordinate::new(x, y);
        let first = board.resolve_attack(c).unwrap();
        let second = first.board.resolve_attack(c).unwrap();
        prop_assert_eq!(&second.board, &first.board);
        prop_assert_eq!(second.result, first.result);
        prop_assert!(second.repeated);
    }

    #[test]
    fn sunk_exactly_when_hits_reach_length(seed in any::<u64>()) {
        let board = random_board(seed);
        for ship in board.fleet() {
            prop_assert_eq!(ship.is_sunk(), ship.hits().len() == ship.definition().length());
            for &c in ship.coordinates() {
                let cell = board.grid().get(c).unwrap();
                if ship.is_sunk() {
                    prop_assert_eq!(cell, CellState::Sunk);
                } else {
                    prop_assert!(cell == CellState::Ship || cell == CellState::Hit);
                }
            }
        }
        prop_assert_eq!(board.is_fleet_destroyed(), board.fleet().iter().all(|s| s.is_sunk()));
    }

    #[test]
    fn firing_at_every_ship_cell_destroys_the_fleet(seed in any::<u64>()) {
        let mut board = random_board(seed);
        let cells: Vec<Coordinate> = board
            .fleet()
            .iter()
            .flat_map(|s| s.coordinates().to_vec())
            .collect();
        let mut sinks = 0;
        for c in cells {
            let outcome = board.resolve_attack(c).unwrap();
            if outcome.result == AttackResult::Sunk && !outcome.repeated {
                sinks += 1;
            }
            board = outcome.board;
        }
        prop_assert!(board.is_fleet_destroyed());
        prop_assert!(is_fleet_destroyed(board.fleet()));
        prop_assert!(sinks <= FLEET.len());
        prop_assert_eq!(board.grid().count(CellState::Ship), 0);
        prop_assert_eq!(board.ship(ShipKind::Carrier).map(|s| s.is_sunk()), Some(true));
    }
}
