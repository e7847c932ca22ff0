use retail_app_core::{Action, ActionEvaluating, Evaluator, ViewCycleEvaluating};
use retail_core::fixtures::seed_order;

#[test]
fn actions_round_trip_through_json() {
    let action = Action::ToggleProductNotFound(seed_order().products[1].clone());
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(json["action"], "toggleProductNotFound");
    assert_eq!(json["with"]["upc"], "888462533391");

    let back: Action = serde_json::from_value(json).unwrap();
    assert_eq!(back, action);
}

#[test]
fn state_serializes_with_variant_tag() {
    let mut ev = Evaluator::default();
    ev.view_did_appear();
    ev.evaluate(Some(Action::StartOrder));

    let json = serde_json::to_value(ev.state()).unwrap();
    assert_eq!(json["state"], "findProducts");
    assert_eq!(json["order_id"], "6398327");
    assert_eq!(json["findable_products"][0]["status"], "unknown");
    assert!(json["next_action"].is_null());
}

#[test]
fn display_fields_serialize_sections_camel_case() {
    let mut ev = Evaluator::default();
    ev.view_did_appear();

    let json = serde_json::to_value(ev.translator().fields()).unwrap();
    assert_eq!(json["sections"][0], "topSpace");
    assert_eq!(json["sections"][7], "displayableProducts");
    assert_eq!(json["bottom_button"]["name"], "Start");
    assert_eq!(json["bottom_button"]["action"]["action"], "startOrder");
}
