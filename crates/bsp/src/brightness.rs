//! AMOLED brightness
//!
//! The RM690B0 has no backlight: brightness is a panel register written
//! over the same IO channel the graphics runtime flushes through.

use platform::{DriverError, LcdPanelDriver};

use crate::board::Board;
use crate::error::{BspError, Resource, Stage};

/// Brightness as a percentage, 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct BrightnessPercent(u8);

impl BrightnessPercent {
    /// Full brightness.
    pub const MAX: Self = Self(100);
    /// Panel dark.
    pub const OFF: Self = Self(0);

    /// `None` outside 0..=100.
    #[must_use]
    pub fn try_new(percent: i32) -> Option<Self> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .map(Self)
    }

    /// Percentage.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Register level, `percent * 255 / 100` truncated.
    #[must_use]
    pub fn level(self) -> u8 {
        let level = u16::from(self.0).saturating_mul(255) / 100;
        u8::try_from(level).unwrap_or(u8::MAX)
    }
}

impl<H: LcdPanelDriver> Board<H> {
    /// Prepare brightness control. Nothing to do on this panel.
    #[allow(clippy::unused_self)]
    pub fn brightness_init(&mut self) -> Result<(), BspError> {
        Ok(())
    }

    /// Set the panel brightness in percent.
    ///
    /// Needs a panel from [`Self::display_new`] or a running session; while
    /// the session is live the register write happens under the port mutex.
    pub fn brightness_set(&mut self, percent: i32) -> Result<(), BspError> {
        let percent = BrightnessPercent::try_new(percent)
            .ok_or(BspError::InvalidArgument("brightness must be within 0..=100"))?;
        let panel = self.panel.ok_or(BspError::NotInitialized(Resource::Panel))?;

        let mutex = self.session.as_ref().map(|s| s.mutex);
        if let Some(mutex) = mutex {
            if !mutex.lock(&mut self.hal, 0) {
                return Err(BspError::DriverInit {
                    stage: Stage::Brightness,
                    cause: DriverError::Timeout,
                });
            }
        }
        let result = self.hal.panel_set_brightness(panel, percent.level());
        if let Some(mutex) = mutex {
            mutex.unlock(&mut self.hal);
        }

        result.map_err(|cause| BspError::DriverInit {
            stage: Stage::Brightness,
            cause,
        })?;
        debug!("brightness {}% (level {})", percent.get(), percent.level());
        Ok(())
    }

    /// Full brightness.
    pub fn backlight_on(&mut self) -> Result<(), BspError> {
        self.brightness_set(i32::from(BrightnessPercent::MAX.get()))
    }

    /// Panel dark.
    pub fn backlight_off(&mut self) -> Result<(), BspError> {
        self.brightness_set(i32::from(BrightnessPercent::OFF.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_truncates() {
        let level = |p| BrightnessPercent::try_new(p).map(BrightnessPercent::level);
        assert_eq!(level(0), Some(0));
        assert_eq!(level(1), Some(2));
        assert_eq!(level(50), Some(127));
        assert_eq!(level(100), Some(255));
    }

    #[test]
    fn out_of_range_is_rejected() {
        assert_eq!(BrightnessPercent::try_new(-5), None);
        assert_eq!(BrightnessPercent::try_new(101), None);
        assert_eq!(BrightnessPercent::try_new(150), None);
        assert_eq!(BrightnessPercent::try_new(300), None);
    }
}
