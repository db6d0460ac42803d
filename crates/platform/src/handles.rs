//! Opaque driver handle types
//!
//! Every handle-bearing seam shares one [`DriverHandles`] supertrait so the
//! board context can name all handle kinds without requiring every seam.
//! A backend built without a graphics runtime still declares `Display` and
//! `InputDevice`; [`core::convert::Infallible`] is the usual choice:
//!
//! ```
//! use core::convert::Infallible;
//! use platform::DriverHandles;
//!
//! struct Headless;
//!
//! impl DriverHandles for Headless {
//!     type Bus = u32;
//!     type Io = u32;
//!     type Panel = u32;
//!     type Touch = u32;
//!     type Display = Infallible;
//!     type InputDevice = Infallible;
//! }
//! ```

use core::fmt::Debug;

/// Handle types issued by a driver backend.
///
/// Handles are `Copy` stand-ins for driver pointers; deleting one
/// invalidates every copy.
pub trait DriverHandles {
    /// I2C master bus.
    type Bus: Copy + PartialEq + Debug;
    /// Panel IO channel.
    type Io: Copy + PartialEq + Debug;
    /// RM690B0 panel.
    type Panel: Copy + PartialEq + Debug;
    /// Touch controller.
    type Touch: Copy + PartialEq + Debug;
    /// Logical display registered with the graphics runtime.
    type Display: Copy + PartialEq + Debug;
    /// Logical input device registered with the graphics runtime.
    type InputDevice: Copy + PartialEq + Debug;
}
