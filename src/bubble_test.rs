#![allow(clippy::float_cmp)]

use super::*;

fn shape(has_tail: bool, tail_angle: f64, tail_length: f64) -> BubbleShape {
    BubbleShape { has_tail, tail_angle, tail_length }
}

const BODY_ONLY: &str =
    "M 10 0 L 90 0 Q 100 0 100 10 L 100 80 Q 100 90 90 90 L 10 90 Q 0 90 0 80 L 0 10 Q 0 0 10 0 Z";

#[test]
fn no_tail_is_plain_rounded_body() {
    assert_eq!(shape(false, 0.5, 30.0).path(), BODY_ONLY);
}

#[test]
fn no_tail_ignores_tail_params() {
    assert_eq!(shape(false, 0.0, 999.0).path(), shape(false, 1.0, 0.0).path());
}

#[test]
fn default_tail_is_centered() {
    let path = BubbleShape::default().path();
    assert_eq!(
        path,
        "M 10 0 L 90 0 Q 100 0 100 10 L 100 80 Q 100 90 90 90 \
         L 60 90 L 50 120 L 40 90 \
         L 10 90 Q 0 90 0 80 L 0 10 Q 0 0 10 0 Z"
    );
}

#[test]
fn path_is_deterministic() {
    let s = shape(true, 0.37, 42.5);
    assert_eq!(s.path(), s.path());
}

#[test]
fn tail_apex_capped_at_140() {
    assert_eq!(shape(true, 0.5, 60.0).tail_apex(), 140.0);
    assert_eq!(shape(true, 0.5, 500.0).tail_apex(), 140.0);
    assert_eq!(shape(true, 0.5, 49.0).tail_apex(), 139.0);
    assert!(shape(true, 0.5, 500.0).path().contains("L 50 140"));
}

#[test]
fn negative_tail_length_sits_on_body() {
    assert_eq!(shape(true, 0.5, -20.0).tail_apex(), 90.0);
}

#[test]
fn tail_center_follows_angle_and_clamps() {
    assert_eq!(shape(true, 0.2, 30.0).tail_center(), 20.0);
    assert_eq!(shape(true, 1.7, 30.0).tail_center(), 100.0);
    assert_eq!(shape(true, -0.3, 30.0).tail_center(), 0.0);
    assert_eq!(shape(true, f64::NAN, 30.0).tail_center(), 50.0);
}

#[test]
fn fractional_coordinates_are_rounded() {
    let path = shape(true, 1.0 / 3.0, 30.0).path();
    assert!(path.contains("L 33.33 120"), "{path}");
}

#[test]
fn dialogue_path_reads_element_props() {
    let mut props = DialogueProps::default();
    props.has_tail = false;
    assert_eq!(dialogue_path(&props), BODY_ONLY);
}
