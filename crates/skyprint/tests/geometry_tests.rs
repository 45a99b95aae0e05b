use proptest::prelude::*;
use skyprint::geometry::{angle_to_point, house_spoke_angles, Point};

const CENTER: Point = Point::new(160.0, 160.0);

proptest! {
    #[test]
    fn prop_point_lies_on_circle(angle in 0.0f64..360.0, radius in 0.1f64..10_000.0,
                                 cx in -1000.0f64..1000.0, cy in -1000.0f64..1000.0) {
        let center = Point::new(cx, cy);
        let p = angle_to_point(angle, center, radius);
        let dist = p.distance_to(center);
        prop_assert!((dist - radius).abs() <= radius * 1e-9 + 1e-9);
    }

    #[test]
    fn prop_full_turn_is_identity(angle in 0.0f64..360.0) {
        let a = angle_to_point(angle, CENTER, 150.0);
        let b = angle_to_point(angle + 360.0, CENTER, 150.0);
        prop_assert!(a.distance_to(b) < 1e-9);
    }

    #[test]
    fn prop_spokes_are_thirty_apart(asc in -720.0f64..720.0) {
        let angles = house_spoke_angles(asc);
        prop_assert_eq!(angles[0], asc);
        for pair in angles.windows(2) {
            prop_assert!((pair[1] - pair[0] - 30.0).abs() < 1e-9);
        }
    }
}

#[test]
fn test_cardinal_points() {
    let r = 150.0;
    let top = angle_to_point(0.0, CENTER, r);
    assert!((top.x - 160.0).abs() < 1e-9 && (top.y - 10.0).abs() < 1e-9);

    let right = angle_to_point(90.0, CENTER, r);
    assert!((right.x - 310.0).abs() < 1e-9 && (right.y - 160.0).abs() < 1e-9);

    let left = angle_to_point(270.0, CENTER, r);
    assert!((left.x - 10.0).abs() < 1e-9 && (left.y - 160.0).abs() < 1e-9);
}

#[test]
fn test_clockwise_direction() {
    // 45° is between top and right: right of center, above it
    let p = angle_to_point(45.0, CENTER, 150.0);
    assert!(p.x > 160.0);
    assert!(p.y < 160.0);
}

#[test]
fn test_out_of_range_angles_do_not_panic() {
    let p = angle_to_point(-90.0, CENTER, 150.0);
    assert!((p.x - 10.0).abs() < 1e-9);
    let p = angle_to_point(f64::INFINITY, CENTER, 150.0);
    assert!(p.x.is_nan());
}
