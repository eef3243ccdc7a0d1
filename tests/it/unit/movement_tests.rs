//! Unit tests for the movement model.

use draggable::{DragError, Limits, Movement, UnitType, XY};

#[test]
fn test_advance_sequence_sums_deltas() {
    let mut movement = Movement::new(XY::new(1.0, 1.0), UnitType::Value, XY::new(0.5, 2.0)).unwrap();
    let mut sum = XY::ZERO;
    for client in [(0.0, 0.0), (4.0, 2.0), (-6.0, 3.0), (10.0, -1.0)] {
        movement = movement.advance(client.into());
        sum += movement.delta;
    }
    assert!(movement.position.approx_eq(movement.start_position + sum, 1e-9));
    assert!(movement.pixel_delta.approx_eq(XY::new(16.0, -4.0), 1e-9));
    assert!(movement.delta.approx_eq(XY::new(8.0, -8.0), 1e-9));
}

#[test]
fn test_reset_forgets_client_position() {
    let movement = Movement::default()
        .advance(XY::new(3.0, 3.0))
        .advance(XY::new(5.0, 3.0));
    let reset = movement.reset_position(XY::new(9.0, 9.0), UnitType::Value);
    assert_eq!(reset.last_client_position, None);
    assert_eq!(reset.delta, XY::ZERO);
    assert_eq!(reset.advance(XY::new(100.0, 100.0)).position, XY::new(9.0, 9.0));
}

#[test]
fn test_clamp_in_pixel_units() {
    let movement = Movement::new(XY::ZERO, UnitType::Value, XY::new(2.0, 2.0))
        .unwrap()
        .advance(XY::ZERO)
        .advance(XY::new(0.0, 30.0));
    let limits = Limits::y_only(0.0, 10.0).in_unit(UnitType::Pixel);
    let (clamped, hit) = movement.clamp_to(&limits);
    assert!(hit);
    assert_eq!(clamped.pixel_position, XY::new(0.0, 10.0));
    assert_eq!(clamped.position, XY::new(0.0, 20.0));
    assert_eq!(clamped.pixel_delta, XY::new(0.0, 10.0));
}

#[test]
fn test_invalid_scale_is_rejected() {
    assert!(matches!(
        Movement::default().with_unit_scale(XY::new(1.0, 0.0)),
        Err(DragError::InvalidScale { .. })
    ));
    assert!(Limits::x_only(5.0, 1.0).validate().is_err());
}
