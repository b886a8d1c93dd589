use battleship::{occupied_cells, Coordinate, Orientation, ShipKind, FLEET};
use proptest::prelude::*;

#[test]
fn catalog_matches_reference_fleet() {
    let lengths: Vec<usize> = FLEET.iter().map(|k| k.definition().length()).collect();
    assert_eq!(lengths, vec![5, 4, 3, 3, 2]);
    let names: Vec<&str> = FLEET.iter().map(|k| k.definition().name()).collect();
    assert_eq!(
        names,
        vec!["Carrier", "Battleship", "Cruiser", "Submarine", "Destroyer"]
    );
    assert_eq!(ShipKind::Submarine.definition().id(), "submarine");
}

#[test]
fn kind_from_str() {
    assert_eq!("carrier".parse::<ShipKind>(), Ok(ShipKind::Carrier));
    assert_eq!(" Destroyer ".parse::<ShipKind>(), Ok(ShipKind::Destroyer));
    assert!("rowboat".parse::<ShipKind>().is_err());
}

#[test]
fn occupied_cells_horizontal_and_vertical() {
    let def = ShipKind::Cruiser.definition();
    assert_eq!(
        occupied_cells(&def, Coordinate::new(2, 5), Orientation::Horizontal),
        vec![
            Coordinate::new(2, 5),
            Coordinate::new(3, 5),
            Coordinate::new(4, 5)
        ]
    );
    assert_eq!(
        occupied_cells(&def, Coordinate::new(2, 5), Orientation::Vertical),
        vec![
            Coordinate::new(2, 5),
            Coordinate::new(2, 6),
            Coordinate::new(2, 7)
        ]
    );
}

#[test]
fn occupied_cells_are_not_clamped() {
    let def = ShipKind::Carrier.definition();
    let cells = occupied_cells(&def, Coordinate::new(8, 0), Orientation::Horizontal);
    assert_eq!(cells.last(), Some(&Coordinate::new(12, 0)));
}

#[test]
fn orientation_toggles() {
    assert_eq!(Orientation::Horizontal.toggled(), Orientation::Vertical);
    assert_eq!(Orientation::Vertical.toggled(), Orientation::Horizontal);
}

proptest! {
    #[test]
    fn occupied_cells_are_collinear(
        kind_idx in 0usize..5,
        x in 0usize..20,
        y in 0usize..20,
        vertical in any::<bool>(),
    ) {
        let def = FLEET[kind_idx].definition();
        let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
        let cells = occupied_cells(&def, Coordinate::new(x, y), orientation);
        prop_assert_eq!(cells.len(), def.length());
        prop_assert_eq!(cells[0], Coordinate::new(x, y));
        for pair in cells.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            match orientation {
                Orientation::Horizontal => {
                    prop_assert_eq!(b.x, a.x + 1);
                    prop_assert_eq!(b.y, a.y);
                }
                Orientation::Vertical => {
                    prop_assert_eq!(b.y, a.y + 1);
                    prop_assert_eq!(b.x, a.x);
                }
            }
        }
    }
}
