//! Shared I2C master bus
//!
//! The bus is created lazily on first use and memoized on the [`Board`];
//! the touch controller and any other I2C device borrow its handle.

use platform::{I2cClockSource, I2cMaster, I2cMasterConfig};

use crate::board::Board;
use crate::error::{BspError, Resource};
use crate::pins;

impl<H: I2cMaster> Board<H> {
    /// Bus configuration for the board wiring.
    #[must_use]
    pub fn i2c_config(&self) -> I2cMasterConfig {
        I2cMasterConfig {
            port: self.config.i2c_port,
            sda: pins::I2C_SDA,
            scl: pins::I2C_SCL,
            clock_source: I2cClockSource::Default,
            glitch_ignore_cnt: 7,
            intr_priority: 0,
            trans_queue_depth: 0,
            enable_internal_pullup: true,
            allow_power_down: false,
        }
    }

    /// Create the I2C bus if it does not exist yet.
    ///
    /// Calling again while the bus is live succeeds without reconfiguring.
    pub fn i2c_init(&mut self) -> Result<(), BspError> {
        self.ensure_i2c().map(|_| ())
    }

    /// Delete the I2C bus.
    ///
    /// Without a live bus this fails with
    /// [`BspError::NotInitialized`] and issues no driver call. If the driver
    /// refuses, the bus stays registered.
    pub fn i2c_deinit(&mut self) -> Result<(), BspError> {
        let bus = self.i2c_bus.ok_or(BspError::NotInitialized(Resource::I2cBus))?;
        self.hal
            .del_master_bus(bus)
            .map_err(|cause| BspError::ResourceUnavailable {
                resource: Resource::I2cBus,
                cause,
            })?;
        self.i2c_bus = None;
        debug!("I2C bus deleted");
        Ok(())
    }

    /// Bus handle, creating the bus first if needed.
    pub fn i2c_get_handle(&mut self) -> Result<H::Bus, BspError> {
        self.ensure_i2c().map(|(bus, _)| bus)
    }

    /// Returns the live bus and whether this call created it.
    pub(crate) fn ensure_i2c(&mut self) -> Result<(H::Bus, bool), BspError> {
        if let Some(bus) = self.i2c_bus {
            return Ok((bus, false));
        }
        let config = self.i2c_config();
        let bus = self.hal.new_master_bus(&config).map_err(|cause| {
            error!("I2C bus creation failed: {}", cause);
            BspError::ResourceUnavailable {
                resource: Resource::I2cBus,
                cause,
            }
        })?;
        self.i2c_bus = Some(bus);
        debug!(
            "I2C bus up: SDA {} SCL {}",
            config.sda.get(),
            config.scl.get()
        );
        Ok((bus, true))
    }
}
