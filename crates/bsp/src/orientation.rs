//! Display rotation
//!
//! The rotation is chosen once in [`BoardConfig`](crate::config::BoardConfig)
//! and resolved into a [`Geometry`] at the start of every bring-up. Panel
//! registration and touch configuration both read that one value, so the
//! two coordinate transforms cannot drift apart.

use platform::Orientation;

use crate::config::{LCD_H_RES, LCD_V_RES};

/// Screen rotation relative to the panel's native portrait orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Native portrait, 450x600.
    #[default]
    Deg0,
    /// Landscape, 600x450.
    Deg90,
    /// Portrait, upside down.
    Deg180,
    /// Landscape, upside down.
    Deg270,
}

impl Rotation {
    /// All rotations, in clockwise order.
    pub const ALL: [Rotation; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Swap and mirror flags realising this rotation.
    #[must_use]
    pub const fn orientation(self) -> Orientation {
        let (swap_xy, mirror_x, mirror_y) = match self {
            Self::Deg0 => (false, false, false),
            Self::Deg90 => (true, true, false),
            Self::Deg180 => (false, true, true),
            Self::Deg270 => (true, false, true),
        };
        Orientation {
            swap_xy,
            mirror_x,
            mirror_y,
        }
    }

    /// Rotation angle in degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Logical resolution and orientation seen by the graphics runtime.
    #[must_use]
    pub const fn geometry(self) -> Geometry {
        let orientation = self.orientation();
        let (h_res, v_res) = if orientation.swap_xy {
            (LCD_V_RES, LCD_H_RES)
        } else {
            (LCD_H_RES, LCD_V_RES)
        };
        Geometry {
            h_res,
            v_res,
            orientation,
        }
    }
}

impl core::fmt::Display for Rotation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} deg", self.degrees())
    }
}

/// Logical screen geometry for one rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    /// Logical horizontal resolution.
    pub h_res: u16,
    /// Logical vertical resolution.
    pub v_res: u16,
    /// Flags applied to both panel and touch.
    pub orientation: Orientation,
}
