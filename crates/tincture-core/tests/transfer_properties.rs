//! Property tests for the transfer-function model.
//!
//! Run with: `cargo test -p tincture-core`

use proptest::prelude::*;
use tincture_core::{Rgb, TransferFunction, decode, encode};

const EPSILON: f64 = 1e-9;

fn arb_color() -> impl Strategy<Value = Rgb> {
    (-0.5..1.5f64, -0.5..1.5f64, -0.5..1.5f64).prop_map(|(r, g, b)| Rgb::new(r, g, b))
}

/// Positions inside and outside [0, 1], with repeats of the corner and
/// midpoint positions so duplicates show up regularly.
fn arb_position() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => -1.0..2.0f64,
        1 => prop::sample::select(vec![0.0, 0.5, 1.0]),
    ]
}

fn arb_model() -> impl Strategy<Value = TransferFunction> {
    (
        -1000.0..1000.0f64,
        0.0..1000.0f64,
        prop::collection::vec((arb_position(), -0.5..1.5f64, arb_color()), 0..12),
    )
        .prop_map(|(min, extent, knots)| {
            let mut tf = TransferFunction::default();
            tf.set_range(min, min + extent);
            for (position, opacity, color) in knots {
                tf.add_point(position, opacity, color);
            }
            tf
        })
}

proptest! {
    #[test]
    fn prop_contents_roundtrip(tf in arb_model()) {
        let contents = encode(&tf).unwrap();
        prop_assert_eq!(decode(&contents).unwrap(), tf);
    }

    #[test]
    fn prop_points_stay_sorted(tf in arb_model()) {
        let points = tf.points();
        prop_assert!(points.windows(2).all(|w| w[0].position <= w[1].position));
        prop_assert!(points.iter().all(|p| p.is_valid()));
    }

    #[test]
    fn prop_remove_interior_joins_neighbors(tf in arb_model(), pick in any::<prop::sample::Index>()) {
        prop_assume!(tf.len() > 2);
        let index = 1 + pick.index(tf.len() - 2);
        let left = tf.points()[index - 1];
        let right = tf.points()[index + 1];

        let mut edited = tf.clone();
        prop_assert!(edited.remove_point(index));
        prop_assert_eq!(edited.len(), tf.len() - 1);
        prop_assert_eq!(edited.points()[index - 1], left);
        prop_assert_eq!(edited.points()[index], right);
    }

    #[test]
    fn prop_remove_corner_is_noop(tf in arb_model()) {
        let mut edited = tf.clone();
        prop_assert!(!edited.remove_point(0));
        prop_assert!(!edited.remove_point(tf.len() - 1));
        prop_assert_eq!(edited, tf);
    }

    #[test]
    fn prop_interpolation_stays_within_segment(tf in arb_model(), q in 0.0..1.0f64) {
        let sample = tf.interpolate(q);
        let points = tf.points();
        let hi = points.partition_point(|p| p.position < q).clamp(1, points.len() - 1);
        let (a, b) = (points[hi - 1], points[hi]);
        let (lo, up) = (a.opacity.min(b.opacity), a.opacity.max(b.opacity));
        prop_assert!(sample.opacity >= lo - EPSILON && sample.opacity <= up + EPSILON);
    }

    #[test]
    fn prop_move_point_keeps_order(
        tf in arb_model(),
        pick in any::<prop::sample::Index>(),
        position in -3.0..3.0f64,
        opacity in -0.5..1.5f64,
    ) {
        let index = pick.index(tf.len());
        let mut edited = tf.clone();
        prop_assert_eq!(edited.move_point(index, position, opacity), Some(index));

        let points = edited.points();
        prop_assert!(points.windows(2).all(|w| w[0].position <= w[1].position));
        prop_assert_eq!(decode(&encode(&edited).unwrap()).unwrap(), edited);
    }

    #[test]
    fn prop_clone_is_independent(tf in arb_model(), opacity in 0.0..1.0f64) {
        let before = tf.points()[0];
        let mut copy = tf.clone();
        prop_assert_eq!(&copy, &tf);

        copy.move_point(0, 0.0, opacity);
        copy.set_point_color(0, Rgb::new(0.123, 0.456, 0.789));
        prop_assert_eq!(tf.points()[0], before);
        prop_assert_eq!(copy.points()[0].color, Rgb::new(0.123, 0.456, 0.789));
    }
}

#[test]
fn test_scenario_add_red_knot_to_default() {
    let mut tf = TransferFunction::default();
    tf.add_point(0.5, 1.0, (1.0, 0.0, 0.0));

    let positions: Vec<f64> = tf.points().iter().map(|p| p.position).collect();
    assert_eq!(positions, vec![0.0, 0.5, 1.0]);

    let s = tf.interpolate(0.25);
    assert!((s.opacity - 0.5).abs() < EPSILON);
    assert!((s.color.r - 0.5).abs() < EPSILON);
    assert_eq!((s.color.g, s.color.b), (0.0, 0.0));
}

#[test]
fn test_scalar_mapping_example() {
    let mut tf = TransferFunction::default();
    tf.add_point(0.25, 0.5, Rgb::WHITE);
    tf.set_range(10.0, 20.0);
    assert!((tf.map_to_scalar_space(&tf.points()[1]) - 12.5).abs() < EPSILON);
}
