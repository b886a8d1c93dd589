use battleship::{
    assemble_fleet, calc_pdf, sample_pdf, AttackRecord, AttackRequest, AttackResult,
    Coordinate, GameConfig, PlacementRequest, PlacementStrategy, ProbabilityTargeter,
    RandomPlacer, Side, TargetCell,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn request_from(record: &AttackRecord) -> AttackRequest {
    AttackRequest {
        board_size: record.grid().size(),
        available: record.available_coordinates(),
        view: record.opponent_view(),
        active_hits: record.active_hits(),
        remaining_lengths: Vec::new(),
    }
}

fn total(pdf: &[Vec<f64>]) -> f64 {
    pdf.iter().flatten().sum()
}

#[test]
fn pdf_is_normalized_and_favours_the_center() {
    let view = vec![vec![TargetCell::Unknown; 10]; 10];
    let pdf = calc_pdf(&view, &[5, 4, 3, 3, 2]);
    assert!((total(&pdf) - 1.0).abs() < 1e-9);
    assert!(pdf[4][4] > pdf[0][0]);
    assert!(pdf[5][5] > pdf[9][0]);
}

#[test]
fn pdf_is_zero_on_resolved_cells() {
    let mut view = vec![vec![TargetCell::Unknown; 10]; 10];
    view[2][3] = TargetCell::Miss;
    view[7][7] = TargetCell::Sunk;
    view[5][5] = TargetCell::Hit;
    let pdf = calc_pdf(&view, &[2]);
    assert_eq!(pdf[2][3], 0.0);
    assert_eq!(pdf[7][7], 0.0);
    assert_eq!(pdf[5][5], 0.0);
}

#[test]
fn pdf_leans_towards_open_hits() {
    let mut view = vec![vec![TargetCell::Unknown; 10]; 10];
    view[5][5] = TargetCell::Hit;
    let pdf = calc_pdf(&view, &[2]);
    // Cells next to the hit beat an otherwise identical cell far away.
    assert!(pdf[4][5] > pdf[2][2]);
    assert!(pdf[5][6] > pdf[2][2]);
}

#[test]
fn pdf_falls_back_to_uniform_when_nothing_fits() {
    let mut view = vec![vec![TargetCell::Miss; 3]; 3];
    view[1][1] = TargetCell::Unknown;
    let pdf = calc_pdf(&view, &[2]);
    assert_eq!(pdf[1][1], 1.0);
    assert!((total(&pdf) - 1.0).abs() < 1e-9);
}

#[test]
fn sampling_respects_candidates() {
    let mut rng = SmallRng::seed_from_u64(5);
    let pdf = vec![vec![0.25; 2]; 2];
    assert_eq!(sample_pdf(&pdf, &[], 0.5, &mut rng), None);
    let only = [Coordinate::new(1, 0)];
    assert_eq!(sample_pdf(&pdf, &only, 0.5, &mut rng), Some(Coordinate::new(1, 0)));

    let zero = vec![vec![0.0; 2]; 2];
    let candidates = [Coordinate::new(0, 1), Coordinate::new(1, 1)];
    for _ in 0..10 {
        let picked = sample_pdf(&zero, &candidates, 0.5, &mut rng).unwrap();
        assert!(candidates.contains(&picked));
    }
}

#[tokio::test]
async fn random_placer_returns_a_valid_fleet() {
    let config = GameConfig::default();
    let request = PlacementRequest {
        board_size: config.board_size(),
        ship_lengths: config.ship_lengths(),
    };
    for seed in 0..20 {
        let mut placer = RandomPlacer::seeded(seed);
        let placements = placer.place_fleet(&request).await.unwrap();
        let lengths: Vec<usize> = placements.iter().map(|p| p.length).collect();
        assert_eq!(lengths, request.ship_lengths);
        assert!(assemble_fleet(Side::Ai, &config, &placements).is_ok());
    }
}

#[tokio::test]
async fn random_placer_fails_on_an_empty_board() {
    let mut placer = RandomPlacer::seeded(1);
    let request = PlacementRequest {
        board_size: 0,
        ship_lengths: vec![2],
    };
    assert!(placer.place_fleet(&request).await.is_err());
}

#[test]
fn targeter_picks_available_cells_and_explains() {
    let mut targeter = ProbabilityTargeter::seeded(8, vec![5, 4, 3, 3, 2]);
    let mut record = AttackRecord::new(10);
    let decision = targeter.decide(&request_from(&record)).unwrap();
    assert!(decision.rationale.starts_with("Hunting mode"));

    record.record(Coordinate::new(4, 4), AttackResult::Hit).unwrap();
    record.record(Coordinate::new(0, 0), AttackResult::Miss).unwrap();
    let request = request_from(&record);
    for _ in 0..20 {
        let decision = targeter.decide(&request).unwrap();
        assert!(request.available.contains(&decision.coordinate));
        assert!(decision.rationale.starts_with("Targeting mode"));
        assert!(decision.rationale.contains("(4,4)"));
    }
}

#[test]
fn targeter_errors_without_targets() {
    let mut targeter = ProbabilityTargeter::seeded(8, vec![2]);
    let request = AttackRequest {
        board_size: 1,
        available: Vec::new(),
        view: vec![vec![TargetCell::Miss]],
        active_hits: Vec::new(),
        remaining_lengths: vec![2],
    };
    assert!(targeter.decide(&request).is_err());
}

#[test]
fn targeter_hunts_only_the_ships_still_afloat() {
    // Misses at C1 and A3 leave no room for a Carrier through A1.
    let mut record = AttackRecord::new(5);
    record.record(Coordinate::new(2, 0), AttackResult::Miss).unwrap();
    record.record(Coordinate::new(0, 2), AttackResult::Miss).unwrap();
    let mut request = request_from(&record);
    request.available = vec![Coordinate::new(0, 0), Coordinate::new(4, 4)];
    request.remaining_lengths = vec![5];

    let mut targeter = ProbabilityTargeter::seeded(21, vec![2]);
    for _ in 0..30 {
        assert_eq!(targeter.decide(&request).unwrap().coordinate, Coordinate::new(4, 4));
    }
}

#[test]
fn targeter_is_deterministic_per_seed() {
    let record = AttackRecord::new(10);
    let request = request_from(&record);
    let mut a = ProbabilityTargeter::new(SmallRng::seed_from_u64(99), vec![3, 2]);
    let mut b = ProbabilityTargeter::new(SmallRng::seed_from_u64(99), vec![3, 2]);
    for _ in 0..5 {
        assert_eq!(a.decide(&request).unwrap(), b.decide(&request).unwrap());
    }
}
