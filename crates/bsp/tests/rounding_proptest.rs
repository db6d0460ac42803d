//! Property tests for dirty-rectangle rounding: run with `cargo test -p lilygo-t4-s3-bsp --test rounding_proptest`
#![allow(clippy::arithmetic_side_effects)]

use lilygo_t4_s3::round_invalidated_area;
use platform::Area;
use proptest::prelude::*;

fn area() -> impl Strategy<Value = Area> {
    (-2000i32..2000, -2000i32..2000, 1i32..700, 1i32..700)
        .prop_map(|(x1, y1, w, h)| Area::new(x1, y1, x1 + w - 1, y1 + h - 1))
}

fn any_area() -> impl Strategy<Value = Area> {
    (any::<i32>(), any::<i32>(), any::<i32>(), any::<i32>()).prop_map(|(a, b, c, d)| {
        Area::new(a.min(b), c.min(d), a.max(b), c.max(d))
    })
}

proptest! {
    #[test]
    fn prop_rounded_area_is_even_aligned(original in area()) {
        let mut rounded = original;
        round_invalidated_area(&mut rounded);

        prop_assert_eq!(rounded.x1.rem_euclid(2), 0);
        prop_assert_eq!(rounded.y1.rem_euclid(2), 0);
        prop_assert_eq!(rounded.width() % 2, 0);
        prop_assert_eq!(rounded.height() % 2, 0);
    }

    #[test]
    fn prop_rounded_area_covers_the_original(original in area()) {
        let mut rounded = original;
        round_invalidated_area(&mut rounded);

        prop_assert!(rounded.contains(&original));
        // grows by at most one pixel on each side
        prop_assert!(rounded.width() - original.width() <= 2);
        prop_assert!(rounded.height() - original.height() <= 2);
    }

    #[test]
    fn prop_rounding_is_idempotent(original in area()) {
        let mut once = original;
        round_invalidated_area(&mut once);
        let mut twice = once;
        round_invalidated_area(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_extreme_coordinates_round_outward(original in any_area()) {
        let mut rounded = original;
        round_invalidated_area(&mut rounded);

        // even start and odd end give an even extent without computing it
        prop_assert_eq!(rounded.x1.rem_euclid(2), 0);
        prop_assert_eq!(rounded.y1.rem_euclid(2), 0);
        prop_assert_eq!(rounded.x2.rem_euclid(2), 1);
        prop_assert_eq!(rounded.y2.rem_euclid(2), 1);
        prop_assert!(rounded.contains(&original));
    }
}
