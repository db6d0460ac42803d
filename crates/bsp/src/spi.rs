//! Quad-SPI bus for the AMOLED panel

use platform::{DmaChannel, DriverHandles, SpiBusConfig, SpiMaster};

use crate::board::Board;
use crate::error::{BspError, Resource};
use crate::pins;

/// Bus wiring with the given transfer limit.
#[must_use]
pub fn bus_config(max_transfer_sz: usize) -> SpiBusConfig {
    SpiBusConfig {
        data0: Some(pins::LCD_DATA0),
        data1: Some(pins::LCD_DATA1),
        sclk: Some(pins::LCD_PCLK),
        data2: Some(pins::LCD_DATA2),
        data3: Some(pins::LCD_DATA3),
        data4_7: [None; 4],
        max_transfer_sz,
        master: true,
        gpio_pins: true,
    }
}

impl<H: DriverHandles + SpiMaster> Board<H> {
    /// Claim the panel's SPI bus.
    ///
    /// The first caller fixes `max_transfer_sz`. Later calls succeed without
    /// touching the bus, whatever size they ask for.
    pub fn spi_init(&mut self, max_transfer_sz: usize) -> Result<(), BspError> {
        self.ensure_spi(max_transfer_sz).map(|_| ())
    }

    /// Release the panel's SPI bus.
    pub fn spi_deinit(&mut self) -> Result<(), BspError> {
        if self.spi_bus.is_none() {
            return Err(BspError::NotInitialized(Resource::SpiBus));
        }
        self.hal
            .bus_free(pins::LCD_SPI_HOST)
            .map_err(|cause| BspError::ResourceUnavailable {
                resource: Resource::SpiBus,
                cause,
            })?;
        self.spi_bus = None;
        debug!("SPI bus freed");
        Ok(())
    }

    /// Returns whether this call claimed the bus.
    pub(crate) fn ensure_spi(&mut self, max_transfer_sz: usize) -> Result<bool, BspError> {
        if let Some(current) = self.spi_bus {
            if current != max_transfer_sz {
                debug!(
                    "SPI bus already up with max transfer {}, ignoring {}",
                    current, max_transfer_sz
                );
            }
            return Ok(false);
        }
        self.hal
            .bus_initialize(
                pins::LCD_SPI_HOST,
                &bus_config(max_transfer_sz),
                DmaChannel::Auto,
            )
            .map_err(|cause| {
                error!("SPI bus init failed: {}", cause);
                BspError::ResourceUnavailable {
                    resource: Resource::SpiBus,
                    cause,
                }
            })?;
        self.spi_bus = Some(max_transfer_sz);
        debug!("SPI bus up, max transfer {} bytes", max_transfer_sz);
        Ok(true)
    }
}
