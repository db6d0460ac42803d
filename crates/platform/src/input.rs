//! Touch controller seam
//!
//! The touch controller sits on the shared I2C bus, so the driver is a
//! sub-trait of [`I2cMaster`] and constructs its handle from a bus handle.

use crate::display::Orientation;
use crate::error::DriverError;
use crate::gpio::{ActiveLevel, GpioNum};
use crate::peripheral::I2cMaster;

/// Touch controller configuration (`esp_lcd_touch_config_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    /// Largest X coordinate reported (logical horizontal resolution).
    pub x_max: u16,
    /// Largest Y coordinate reported (logical vertical resolution).
    pub y_max: u16,
    /// Reset pin.
    pub reset: Option<GpioNum>,
    /// Interrupt pin; `None` when the controller is polled.
    pub interrupt: Option<GpioNum>,
    /// Level asserting reset.
    pub reset_level: ActiveLevel,
    /// Level signalling a pending touch.
    pub interrupt_level: ActiveLevel,
    /// Coordinate transform; must match the panel's.
    pub orientation: Orientation,
}

/// Capacitive touch driver.
pub trait TouchDriver: I2cMaster {
    /// Attach a CST226SE controller on `bus` (`esp_lcd_touch_new_i2c_cst226se`).
    fn new_touch_cst226se(
        &mut self,
        bus: Self::Bus,
        config: &TouchConfig,
    ) -> Result<Self::Touch, DriverError>;

    /// Delete a touch handle.
    fn del_touch(&mut self, touch: Self::Touch) -> Result<(), DriverError>;
}
