//! CST226SE capacitive touch bring-up

use platform::{ActiveLevel, TouchConfig, TouchDriver};

use crate::board::Board;
use crate::error::{BspError, Stage};
use crate::orientation::Geometry;
use crate::pins;
use crate::rollback::Rollback;

/// Caller-supplied touch configuration, replacing the board defaults.
pub type TouchOptions = TouchConfig;

/// Board touch configuration for `geometry`.
///
/// Bounds and orientation come from the same [`Geometry`] the panel is
/// registered with.
#[must_use]
pub fn touch_config(geometry: Geometry) -> TouchConfig {
    TouchConfig {
        x_max: geometry.h_res,
        y_max: geometry.v_res,
        reset: Some(pins::TOUCH_RST),
        interrupt: pins::TOUCH_INT,
        reset_level: ActiveLevel::Low,
        interrupt_level: ActiveLevel::Low,
        orientation: geometry.orientation,
    }
}

impl<H: TouchDriver> Board<H> {
    /// Create the touch controller on the shared I2C bus.
    ///
    /// Uses `options` when given, otherwise [`touch_config`] for the
    /// configured rotation. The I2C bus is created on demand and deleted
    /// again if this call created it and the controller then fails.
    pub fn touch_new(&mut self, options: Option<&TouchOptions>) -> Result<H::Touch, BspError> {
        let config = options
            .copied()
            .unwrap_or_else(|| touch_config(self.geometry()));
        let mut rollback = Rollback::new();
        match self.touch_new_tracked(&config, &mut rollback) {
            Ok(touch) => {
                rollback.commit();
                Ok(touch)
            }
            Err(e) => {
                self.unwind_touch(&mut rollback);
                self.unwind_i2c(&mut rollback);
                Err(e)
            }
        }
    }

    pub(crate) fn touch_new_tracked(
        &mut self,
        config: &TouchConfig,
        rollback: &mut Rollback<H>,
    ) -> Result<H::Touch, BspError> {
        let (bus, created) = self.ensure_i2c()?;
        rollback.i2c = created;

        let touch = self
            .hal
            .new_touch_cst226se(bus, config)
            .map_err(|cause| {
                error!("touch creation failed: {}", cause);
                BspError::DriverInit {
                    stage: Stage::Touch,
                    cause,
                }
            })?;
        rollback.touch = Some(touch);
        Ok(touch)
    }

    /// Delete a touch controller created by [`Self::touch_new`].
    pub fn touch_delete(&mut self, touch: H::Touch) -> Result<(), BspError> {
        self.hal
            .del_touch(touch)
            .map_err(|cause| BspError::DriverInit {
                stage: Stage::Touch,
                cause,
            })
    }
}
