//! Wire-shape tests for the serializable domain types.

use tactix::{GameMode, GameRecord, Mark, Move, Outcome, Preferences};

#[test]
fn test_game_record_json_shape() {
    let record = GameRecord::new(
        Outcome::Winner(Mark::X),
        vec![Move::new(4, Mark::X), Move::new(0, Mark::O)],
    );
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["outcome"]["Winner"], "X");
    assert_eq!(json["moves"][0]["index"], 4);
    assert_eq!(json["moves"][1]["mark"], "O");

    let back: GameRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_preferences_use_storage_spellings() {
    let prefs = Preferences {
        theme: "canvas".to_string(),
        difficulty: "hard".parse().unwrap(),
        human_mark: Mark::O,
        mode: GameMode::AiVsAi,
    };
    let json = serde_json::to_value(&prefs).unwrap();
    assert_eq!(json["difficulty"], "hard");
    assert_eq!(json["mode"], "ava");
    assert_eq!(json["human_mark"], "O");
}
