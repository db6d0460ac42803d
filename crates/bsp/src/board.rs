//! Board context object
//!
//! [`Board`] owns the driver backend together with every piece of state the
//! bring-up routines share: the I2C bus handle, the SPI bus claim, the panel
//! recorded for brightness control, and the display session. Operations are
//! implemented as methods in the component modules, each bounded on only the
//! driver seams it calls: a backend without a graphics runtime still gets the
//! buses, the panel, touch, brightness and SPIFFS.

use platform::DriverHandles;

use crate::config::BoardConfig;
use crate::display::{Session, SessionState};
use crate::orientation::Geometry;

/// LilyGo T4-S3 board.
///
/// Not internally synchronized. Firmware sharing a board across tasks wraps
/// it in its own mutex.
pub struct Board<H: DriverHandles> {
    pub(crate) hal: H,
    pub(crate) config: BoardConfig,
    pub(crate) i2c_bus: Option<H::Bus>,
    /// `Some(max_transfer_sz)` while the SPI bus is claimed.
    pub(crate) spi_bus: Option<usize>,
    pub(crate) panel: Option<H::Panel>,
    pub(crate) session: Option<Session<H>>,
    pub(crate) state: SessionState,
}

impl<H: DriverHandles> Board<H> {
    /// Wrap a driver backend. No hardware is touched.
    #[must_use]
    pub fn new(hal: H, config: BoardConfig) -> Self {
        Self {
            hal,
            config,
            i2c_bus: None,
            spi_bus: None,
            panel: None,
            session: None,
            state: SessionState::Idle,
        }
    }

    /// Board configuration.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Logical geometry for the configured rotation.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.config.rotation.geometry()
    }

    /// Driver backend.
    #[must_use]
    pub fn hal(&self) -> &H {
        &self.hal
    }

    /// Driver backend, mutably. Bypasses the board's bookkeeping.
    pub fn hal_mut(&mut self) -> &mut H {
        &mut self.hal
    }

    /// Give the backend back. Live resources are not released.
    #[must_use]
    pub fn into_hal(self) -> H {
        self.hal
    }

    /// Panel recorded by the last successful panel bring-up.
    #[must_use]
    pub fn panel(&self) -> Option<H::Panel> {
        self.panel
    }

    /// `true` while the SPI bus is claimed by this board.
    #[must_use]
    pub fn spi_initialized(&self) -> bool {
        self.spi_bus.is_some()
    }

    /// Current display session state.
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.state
    }
}
