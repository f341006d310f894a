use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::WebSession;

fn json(s: &str) -> Value {
    serde_json::from_str(s).expect("valid JSON")
}

#[test]
fn test_config() {
    let session = WebSession::new("").unwrap();
    assert_eq!(session.simulation().config().size, 4);

    let session = WebSession::new(r#"{"size": 3, "move_rule": "slide"}"#).unwrap();
    let snapshot = json(&session.snapshot_json().unwrap());
    assert_eq!(snapshot["size"], 3);
    assert_eq!(snapshot["move_rule"], "slide");
    assert_eq!(snapshot["solved"], true);

    assert!(WebSession::new(r#"{"size": 1}"#).is_err());
    assert!(WebSession::new("not json").is_err());
}

#[test]
fn test_click_and_events() {
    let mut session = WebSession::new("").unwrap();
    assert!(session.is_movable(3, 2));
    assert!(!session.is_movable(2, 2));

    assert!(session.click(3, 2));
    assert!(!session.click(0, 0));
    assert_eq!(session.move_count(), 1);

    let events = json(&session.drain_events_json().unwrap());
    assert_eq!(events.as_array().map(Vec::len), Some(1));
    assert_eq!(events[0]["type"], "tile_moved");
    assert_eq!(events[0]["tile"], 15);
    assert_eq!(session.drain_events_json().unwrap(), "[]");

    session.undo();
    assert_eq!(session.move_count(), 0);
    assert!(session.is_solved());
    session.redo();
    assert_eq!(session.move_count(), 1);
    assert!(!session.is_solved());
    assert!(!session.take_solved_notification());
}

#[test]
fn test_seeded_shuffle() {
    let mut a = WebSession::new("").unwrap();
    let mut b = WebSession::new("").unwrap();
    a.shuffle(Some("abc".to_owned()), 1).unwrap();
    b.shuffle(Some("abc".to_owned()), 2).unwrap();
    assert_eq!(a.snapshot_json().unwrap(), b.snapshot_json().unwrap());
    assert!(!a.is_solved());
    assert_eq!(a.duration_ms(), None);

    b.shuffle(Some("xyz".to_owned()), 1).unwrap();
    assert_ne!(a.snapshot_json().unwrap(), b.snapshot_json().unwrap());

    // A first move starts the solve timer.
    let blank = a.simulation().puzzle().blank();
    let target = a.simulation().puzzle().movable_cells()[0];
    assert_ne!(target, blank);
    assert!(a.click(target.row, target.col));
    assert!(a.duration_ms().is_some());
}

#[test]
fn test_move_rule() {
    let mut session = WebSession::new("").unwrap();
    session.set_move_rule("slide").unwrap();
    assert!(session.click(3, 0));
    assert_eq!(json(&session.drain_events_json().unwrap()).as_array().map(Vec::len), Some(3));

    assert!(session.set_move_rule("diagonal").is_err());
    assert!(session.resize(0).is_err());
    session.resize(6).unwrap();
    assert_eq!(json(&session.snapshot_json().unwrap())["size"], 6);
}

#[test]
fn test_log_round_trip() {
    let mut session = WebSession::new(r#"{"size": 3}"#).unwrap();
    session.click(2, 1);
    session.click(1, 1);
    let log = session.export_log().unwrap();

    let mut loaded = WebSession::new("").unwrap();
    let warnings = loaded.import_log(&log).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(loaded.move_count(), 2);
    assert_eq!(loaded.snapshot_json().unwrap(), session.snapshot_json().unwrap());

    assert!(loaded.import_log(r#"{"version": 1, "solves": []}"#).is_err());
}
