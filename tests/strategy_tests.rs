mod common;

use battleship::{
    assemble_fleet, enforce_available, AttackDecision, CellState, Coordinate, GameConfig,
    Orientation, PlacementRejection, ShipKind, ShipPlacement, Side,
};
use common::stacked_placements;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn invalid_choice_falls_back_to_the_only_available_cell() {
    let mut rng = SmallRng::seed_from_u64(3);
    let decision = AttackDecision {
        coordinate: Coordinate::new(5, 5),
        rationale: "center is best".to_string(),
    };
    let fixed = enforce_available(decision, &[Coordinate::new(0, 0)], &mut rng);
    assert_eq!(fixed.coordinate, Coordinate::new(0, 0));
    assert!(fixed
        .rationale
        .starts_with("AI original choice was invalid (5,5). Fallback to random available coordinate."));
    assert!(fixed.rationale.ends_with("Original reasoning: center is best"));
}

#[test]
fn valid_choice_is_kept() {
    let mut rng = SmallRng::seed_from_u64(3);
    let decision = AttackDecision {
        coordinate: Coordinate::new(1, 0),
        rationale: "why not".to_string(),
    };
    let available = [Coordinate::new(0, 0), Coordinate::new(1, 0)];
    assert_eq!(
        enforce_available(decision.clone(), &available, &mut rng),
        decision
    );
}

#[test]
fn fallback_is_always_available() {
    let mut rng = SmallRng::seed_from_u64(11);
    let available: Vec<Coordinate> = (0..4).map(|x| Coordinate::new(x, 2)).collect();
    for _ in 0..20 {
        let decision = AttackDecision {
            coordinate: Coordinate::new(9, 9),
            rationale: String::new(),
        };
        let fixed = enforce_available(decision, &available, &mut rng);
        assert!(available.contains(&fixed.coordinate));
    }
}

#[test]
#[should_panic]
fn empty_availability_is_unreachable() {
    let mut rng = SmallRng::seed_from_u64(3);
    let decision = AttackDecision {
        coordinate: Coordinate::new(0, 0),
        rationale: String::new(),
    };
    enforce_available(decision, &[], &mut rng);
}

#[test]
fn assemble_matches_lengths_to_catalog() {
    let config = GameConfig::default();
    let board = assemble_fleet(Side::Ai, &config, &stacked_placements()).unwrap();
    assert_eq!(board.fleet().len(), 5);
    assert_eq!(board.grid().count(CellState::Ship), 17);
    // The first length-3 entry becomes the Cruiser, the second the Submarine.
    assert_eq!(board.ship(ShipKind::Cruiser).unwrap().anchor(), Coordinate::new(0, 2));
    assert_eq!(board.ship(ShipKind::Submarine).unwrap().anchor(), Coordinate::new(0, 3));
    assert_eq!(board.ship(ShipKind::Carrier).unwrap().id(), "ai_carrier");
}

#[test]
fn assemble_accepts_any_order() {
    let config = GameConfig::default();
    let mut placements = stacked_placements();
    placements.reverse();
    let board = assemble_fleet(Side::Ai, &config, &placements).unwrap();
    assert_eq!(board.ship(ShipKind::Cruiser).unwrap().anchor(), Coordinate::new(0, 3));
    assert_eq!(board.ship(ShipKind::Submarine).unwrap().anchor(), Coordinate::new(0, 2));
}

#[test]
fn assemble_rejects_wrong_count() {
    let config = GameConfig::default();
    let mut placements = stacked_placements();
    placements.pop();
    assert_eq!(
        assemble_fleet(Side::Ai, &config, &placements),
        Err(PlacementRejection::WrongCount {
            expected: 5,
            actual: 4
        })
    );
}

#[test]
fn assemble_rejects_unmatched_length() {
    let config = GameConfig::default();
    let mut placements = stacked_placements();
    placements[4].length = 3;
    assert_eq!(
        assemble_fleet(Side::Ai, &config, &placements),
        Err(PlacementRejection::UnmatchedLength(3))
    );
}

#[test]
fn assemble_rejects_overlap_and_out_of_bounds() {
    let config = GameConfig::default();
    let mut overlapping = stacked_placements();
    overlapping[1].anchor = Coordinate::new(0, 0);
    assert!(matches!(
        assemble_fleet(Side::Ai, &config, &overlapping),
        Err(PlacementRejection::Invalid(_))
    ));

    let mut outside = stacked_placements();
    outside[0] = ShipPlacement {
        anchor: Coordinate::new(0, 7),
        length: 5,
        orientation: Orientation::Vertical,
    };
    assert_eq!(
        assemble_fleet(Side::Ai, &config, &outside),
        Err(PlacementRejection::Invalid(outside[0]))
    );
}
