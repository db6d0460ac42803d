//! Property tests for `Area`: run with `cargo test -p platform --test area_proptest`
#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use platform::Area;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_rectangle_round_trip_keeps_extent(
        x in -5000i32..5000,
        y in -5000i32..5000,
        w in 1u32..2000,
        h in 1u32..2000,
    ) {
        let rect = Rectangle::new(Point::new(x, y), Size::new(w, h));
        let area = Area::from(rect);

        prop_assert_eq!(u32::try_from(area.width()).unwrap(), w);
        prop_assert_eq!(u32::try_from(area.height()).unwrap(), h);
        prop_assert_eq!(Rectangle::from(area), rect);
    }

    #[test]
    fn prop_contains_is_reflexive_and_monotone(
        x1 in -1000i32..1000,
        y1 in -1000i32..1000,
        w in 1i32..500,
        h in 1i32..500,
        grow in 0i32..10,
    ) {
        let inner = Area::new(x1, y1, x1 + w - 1, y1 + h - 1);
        let outer = Area::new(inner.x1 - grow, inner.y1 - grow, inner.x2 + grow, inner.y2 + grow);
        prop_assert!(inner.contains(&inner));
        prop_assert!(outer.contains(&inner));
    }
}

#[test]
fn empty_rectangle_collapses_to_its_corner() {
    let rect = Rectangle::new(Point::new(4, 4), Size::zero());
    assert_eq!(Area::from(rect), Area::new(4, 4, 4, 4));
}
