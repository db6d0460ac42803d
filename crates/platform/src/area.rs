//! Dirty rectangles as the graphics runtime reports them.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// Inclusive screen rectangle (`lv_area_t`): both corners belong to it.
///
/// Coordinates are signed because the runtime may report areas that start
/// off-screen before clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Area {
    /// Left column.
    pub x1: i32,
    /// Top row.
    pub y1: i32,
    /// Right column, inclusive.
    pub x2: i32,
    /// Bottom row, inclusive.
    pub y2: i32,
}

impl Area {
    /// Build an area from its inclusive corners.
    #[must_use]
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Number of columns covered, saturating at `i32::MAX`.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.x2.saturating_sub(self.x1).saturating_add(1)
    }

    /// Number of rows covered, saturating at `i32::MAX`.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.y2.saturating_sub(self.y1).saturating_add(1)
    }

    /// `true` when every pixel of `other` lies inside `self`.
    #[must_use]
    pub fn contains(&self, other: &Area) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && self.x2 >= other.x2 && self.y2 >= other.y2
    }
}

impl From<Rectangle> for Area {
    fn from(rect: Rectangle) -> Self {
        let bottom_right = rect.bottom_right().unwrap_or(rect.top_left);
        Self::new(
            rect.top_left.x,
            rect.top_left.y,
            bottom_right.x,
            bottom_right.y,
        )
    }
}

impl From<Area> for Rectangle {
    fn from(area: Area) -> Self {
        let width = u32::try_from(area.width()).unwrap_or(0);
        let height = u32::try_from(area.height()).unwrap_or(0);
        Rectangle::new(Point::new(area.x1, area.y1), Size::new(width, height))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn width_and_height_are_inclusive() {
        let area = Area::new(2, 4, 5, 4);
        assert_eq!(area.width(), 4);
        assert_eq!(area.height(), 1);
    }

    #[test]
    fn rectangle_conversion_keeps_bounds() {
        let rect = Rectangle::new(Point::new(10, 20), Size::new(30, 40));
        let area = Area::from(rect);
        assert_eq!(area, Area::new(10, 20, 39, 59));
        assert_eq!(Rectangle::from(area), rect);
    }

    #[test]
    fn contains_is_inclusive() {
        let outer = Area::new(0, 0, 9, 9);
        assert!(outer.contains(&outer));
        assert!(outer.contains(&Area::new(1, 1, 8, 8)));
        assert!(!outer.contains(&Area::new(1, 1, 10, 8)));
    }
}
