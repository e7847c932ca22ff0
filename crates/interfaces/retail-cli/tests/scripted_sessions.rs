use std::io::Cursor;

use retail_app_core::{Evaluator, StateKind};
use retail_cli::commands::{interactive, play};
use retail_cli::CliOutput;

fn script(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn scripted_happy_path_reaches_completed_and_dismisses() {
    let mut out = Vec::new();
    let summary = play(
        Evaluator::default(),
        &script(&[
            "start",
            "found:885909918161",
            "found:888462533391",
            "found:888462153501",
            "found:190199246850",
            "press",
            "option:Cash Register",
            "press",
            "press",
        ]),
        &mut out,
        CliOutput::Text,
    )
    .unwrap();

    assert_eq!(summary.final_state, StateKind::Completed);
    assert!(summary.dismissed);
    assert_eq!(summary.ignored, 0);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("[ Start ]"));
    assert!(text.contains("4 products marked found"));
    assert!(text.contains("(*) Cash Register"));
    assert!(text.contains("ORDER COMPLETED"));
    assert!(text.contains("Deliver to Cash Register"));
    assert!(text.contains(":: Screen dismissed"));
}

#[test]
fn scripted_cancel_path() {
    let mut out = Vec::new();
    let summary = play(
        Evaluator::default(),
        &script(&[
            "start",
            "not-found:885909918161",
            "not-found:888462533391",
            "not-found:888462153501",
            "not-found:190199246850",
            "press",
        ]),
        &mut out,
        CliOutput::Text,
    )
    .unwrap();

    assert_eq!(summary.final_state, StateKind::Canceled);
    assert!(!summary.dismissed);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("[ Cancel Order ]"));
    assert!(text.contains("ORDER CANCELED"));
}

#[test]
fn out_of_place_actions_are_counted_not_fatal() {
    let mut out = Vec::new();
    let summary = play(
        Evaluator::default(),
        &script(&["complete", "start", "option:Front Door"]),
        &mut out,
        CliOutput::Text,
    )
    .unwrap();

    assert_eq!(summary.final_state, StateKind::FindProducts);
    assert_eq!(summary.ignored, 2);
}

#[test]
fn unknown_upc_fails_a_script() {
    let mut out = Vec::new();
    let err = play(
        Evaluator::default(),
        &script(&["start", "found:000"]),
        &mut out,
        CliOutput::Text,
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("no product with UPC 000"));
}

#[test]
fn json_output_prints_one_snapshot_per_screen() {
    let mut out = Vec::new();
    play(
        Evaluator::default(),
        &script(&["start"]),
        &mut out,
        CliOutput::Json,
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    let screens: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(screens.len(), 2);
    assert_eq!(screens[0]["feedback"], "4 products requested");
    assert_eq!(screens[1]["feedback"], "0 products marked found");
    assert_eq!(screens[1]["focused_instruction_index"], 1);
}

#[test]
fn interactive_session_skips_bad_lines() {
    let input = Cursor::new("start\n\nbogus\nfound:999\nnot-found:885909918161\nquit\nstart\n");
    let mut out = Vec::new();

    let summary = interactive(Evaluator::default(), input, &mut out, CliOutput::Text).unwrap();

    assert_eq!(summary.final_state, StateKind::FindProducts);
    assert_eq!(summary.ignored, 0);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains(":: unknown action 'bogus'"));
    assert!(text.contains(":: no product with UPC 999 in this order"));
    assert!(text.contains("[-] MacBook Pro"));
}

#[test]
fn interactive_json_keeps_stdout_parseable() {
    let input = Cursor::new("start\nbogus\nfound:999\nnot-found:885909918161\n");
    let mut out = Vec::new();

    let summary = interactive(Evaluator::default(), input, &mut out, CliOutput::Json).unwrap();

    assert_eq!(summary.final_state, StateKind::FindProducts);
    let text = String::from_utf8(out).unwrap();
    let screens: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(screens.len(), 3);
    assert_eq!(screens[2]["feedback"], "0 products marked found");
}
