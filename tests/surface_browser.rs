#![cfg(target_arch = "wasm32")]

use duopuzzle::{PuzzleHandle, INVALID_PAYLOAD};
use js_sys::Function;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn handle(config: &str) -> PuzzleHandle {
    PuzzleHandle::new(config, Function::new_no_args(""))
}

#[wasm_bindgen_test]
fn malformed_payloads_are_ignored() {
    let mut puzzle = handle(r#"{"rows": 2, "cols": 2}"#);
    let before = puzzle.state_json().expect("state");
    assert_eq!(puzzle.drop_on_cell("not-a-piece", 0), INVALID_PAYLOAD);
    assert_eq!(puzzle.toggle_side(""), INVALID_PAYLOAD);
    assert_eq!(puzzle.hover("https://example.com/x.png"), INVALID_PAYLOAD);
    assert_eq!(puzzle.drag_start("1.5", 0.0, 0.0, 0.0, 0.0), INVALID_PAYLOAD);
    assert_eq!(puzzle.drop_on_pool_rect("?", 1.0, 1.0, 0.0, 0.0, 10.0, 10.0), INVALID_PAYLOAD);
    assert_eq!(puzzle.state_json().expect("state"), before);
}

#[wasm_bindgen_test]
fn malformed_config_starts_default_puzzle() {
    let puzzle = handle(r#"{"rows": "lots", "cols": 2.5"#);
    let state = puzzle.state_json().expect("state");
    assert!(state.contains("\"rows\":3,\"cols\":3"));
}

#[wasm_bindgen_test]
fn snapshot_restores_progress() {
    let mut puzzle = handle(r#"{"rows": 2, "cols": 2}"#);
    assert_eq!(puzzle.drop_on_cell("2", 1), "placed");
    let saved = puzzle.snapshot();
    let progress = puzzle.state_json().expect("state");
    puzzle.reset();
    assert!(puzzle.restore(&saved));
    assert_eq!(puzzle.state_json().expect("state"), progress);
    assert!(!puzzle.restore(&[9, 9, 9]));
    assert!(!handle(r#"{"rows": 3, "cols": 3}"#).restore(&saved));
}

#[wasm_bindgen_test]
fn one_by_one_puzzle_reports_and_locks() {
    let solved = Function::new_with_args("side", "globalThis.__solvedSide = side;");
    let mut puzzle = PuzzleHandle::new(r#"{"rows": 1, "cols": 1}"#, solved);
    assert_eq!(puzzle.drop_on_cell("0", 0), "placed");
    let side = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("__solvedSide"))
        .expect("global");
    assert!(side.as_f64().is_some());
    assert!(puzzle.locked());
    assert_eq!(puzzle.toggle_side("0"), "locked");
    assert_eq!(puzzle.confirm_solution(true), "confirmed");
}

#[wasm_bindgen_test]
fn layout_follows_resize() {
    let mut puzzle = handle(r#"{"skin": "BASIC"}"#);
    let json = puzzle.resize(300.0, 300.0).expect("layout");
    assert!(json.contains("\"visible\":true"));
    assert!(json.contains("\"cellSize\":82.0"));
    let hidden = puzzle.resize(0.0, 0.0).expect("layout");
    assert!(hidden.contains("\"opacity\":0.0"));
}

#[wasm_bindgen_test]
fn labels_use_host_lookup() {
    let puzzle = handle("");
    let lookup = Function::new_with_args("key", "return key === 'i.board' ? 'Board' : undefined;");
    assert_eq!(puzzle.board_label(&lookup), "Board");
    assert_eq!(puzzle.pool_label(&lookup), "i.pieces");
}
