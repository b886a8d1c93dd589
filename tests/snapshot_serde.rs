#![cfg(feature = "serde")]

mod common;

use battleship::{Coordinate, Phase, Side};
use common::{open_water, place_stacked_fleet, session_with, stacked_placements, FixedPlacement, ScriptedAttack};

#[tokio::test]
async fn game_state_serializes_for_renderers() {
    let mut session = session_with(
        FixedPlacement(stacked_placements()),
        ScriptedAttack::new(open_water()),
    );
    place_stacked_fleet(&mut session);
    session.start_game().await.unwrap();
    session.player_attack(Coordinate::new(0, 0)).unwrap();
    session.run_ai_turn().await.unwrap();
    assert_eq!(session.state().phase(), Phase::Playing);
    assert_eq!(session.state().current_turn(), Side::Player);

    let v = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(v["phase"], "playing");
    assert_eq!(v["current_turn"], "player");
    assert_eq!(v["player_attacks"]["hits"], 1);
    assert_eq!(v["ai_attacks"]["misses"], 1);
    assert_eq!(v["player_board"]["fleet"][0]["id"], "player_carrier");
    assert_eq!(v["player_board"]["fleet"][0]["definition"]["length"], 5);
    assert_eq!(v["ai_board"]["fleet"][0]["hits"][0]["x"], 0);
    assert_eq!(v["status"], "Your turn.");
    assert!(v["ai_rationale"].as_str().unwrap().starts_with("scripted shot"));
}

#[test]
fn cells_serialize_lowercase() {
    let v = serde_json::to_value(battleship::CellState::Sunk).unwrap();
    assert_eq!(v, "sunk");
    let v = serde_json::to_value(battleship::Orientation::Vertical).unwrap();
    assert_eq!(v, "vertical");
}
