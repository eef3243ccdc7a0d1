//! Unit tests for options parsing and normalization.

use draggable::{Draggable, DraggableOptions, LocalPointerSource, UnitType, XY, button};
use std::rc::Rc;

#[test]
fn test_empty_json_is_default() {
    let options = DraggableOptions::from_json("{}").unwrap();
    assert_eq!(options, DraggableOptions::default());
}

#[test]
fn test_json_options_drive_a_draggable() {
    let options = DraggableOptions::from_json(
        r#"{
            "buttons": 6,
            "pixel_scale": {"x": 0.5, "y": 0.5},
            "start_xy": {"x": 4.0, "y": 8.0},
            "start_unit": "pixel",
            "suppress_context_menu": true
        }"#,
    )
    .unwrap();
    assert_eq!(options.start_unit, UnitType::Pixel);

    let draggable = Draggable::with_options(options, Rc::new(LocalPointerSource::new()));
    assert_eq!(draggable.buttons(), button::SECONDARY | button::MIDDLE);
    assert_eq!(draggable.xy(), XY::new(2.0, 4.0));
    assert!(draggable.tracker_config().suppress_context_menu);
    assert!(draggable.tracker_config().mouse_up_on_phantom_move);
}

#[test]
fn test_bad_scale_in_json_falls_back() {
    let options = DraggableOptions::from_json(r#"{"pixel_scale": {"x": -1.0, "y": 2.0}}"#).unwrap();
    assert_eq!(options.pixel_scale, XY::ONE);
}

#[test]
fn test_wrong_type_is_an_error() {
    let err = DraggableOptions::from_json(r#"{"enabled": "yes"}"#).unwrap_err();
    assert!(err.to_string().starts_with("Config parse error"));
}
