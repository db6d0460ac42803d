//! RM690B0 AMOLED bring-up
//!
//! Two-level creation: a quad-SPI panel IO channel, then the RM690B0 panel
//! driver bound to it. A failure at any step releases what the call
//! acquired, in reverse order, before the error is returned.

use platform::{
    LcdPanelDriver, PanelDevConfig, PanelIoSpiConfig, RgbOrder, Rm690b0VendorConfig, SpiLineMode,
    SpiMaster,
};

use crate::board::Board;
use crate::config::{LCD_CMD_BITS, LCD_PARAM_BITS, LCD_PIXEL_CLOCK_HZ, LCD_TRANS_QUEUE_DEPTH};
use crate::error::{BspError, Stage};
use crate::pins;
use crate::rollback::Rollback;

/// Panel bring-up parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Largest SPI transfer in bytes; must be positive.
    pub max_transfer_sz: usize,
}

/// Panel IO channel configuration.
///
/// Commands are framed in-band (32-bit command word), so there is no DC pin.
#[must_use]
pub fn panel_io_config() -> PanelIoSpiConfig {
    PanelIoSpiConfig {
        host: pins::LCD_SPI_HOST,
        cs: Some(pins::LCD_CS),
        dc: None,
        spi_mode: 0,
        pclk_hz: LCD_PIXEL_CLOCK_HZ,
        lcd_cmd_bits: LCD_CMD_BITS,
        lcd_param_bits: LCD_PARAM_BITS,
        trans_queue_depth: LCD_TRANS_QUEUE_DEPTH,
        line_mode: SpiLineMode::Quad,
        cs_high_active: false,
        lsb_first: false,
    }
}

impl<H: SpiMaster + LcdPanelDriver> Board<H> {
    /// Panel device configuration for the configured pixel format.
    #[must_use]
    pub fn panel_dev_config(&self) -> PanelDevConfig {
        PanelDevConfig {
            reset: Some(pins::LCD_RST),
            rgb_order: RgbOrder::Rgb,
            bits_per_pixel: self.config.color_format.bits_per_pixel(),
            vendor: Rm690b0VendorConfig {
                enable: Some(pins::LCD_EN),
            },
        }
    }

    /// Bring up the AMOLED: SPI bus, panel IO, panel, reset, init.
    ///
    /// Returns `(panel, io)`. The panel is also recorded on the board for
    /// brightness control. On failure the panel, the IO channel and (when
    /// this call claimed it) the SPI bus are released again.
    pub fn display_new(
        &mut self,
        config: &DisplayConfig,
    ) -> Result<(H::Panel, H::Io), BspError> {
        let mut rollback = Rollback::new();
        match self.display_new_tracked(config, &mut rollback) {
            Ok(handles) => {
                rollback.commit();
                Ok(handles)
            }
            Err(e) => {
                self.unwind_panel(&mut rollback);
                Err(e)
            }
        }
    }

    pub(crate) fn display_new_tracked(
        &mut self,
        config: &DisplayConfig,
        rollback: &mut Rollback<H>,
    ) -> Result<(H::Panel, H::Io), BspError> {
        if config.max_transfer_sz == 0 {
            return Err(BspError::InvalidArgument("max_transfer_sz must be positive"));
        }

        rollback.spi = self.ensure_spi(config.max_transfer_sz)?;

        debug!("installing panel IO");
        let io = self
            .hal
            .new_panel_io_spi(&panel_io_config())
            .map_err(|cause| {
                error!("new panel IO failed: {}", cause);
                BspError::DriverInit {
                    stage: Stage::PanelIo,
                    cause,
                }
            })?;
        rollback.io = Some(io);

        debug!("installing RM690B0 driver");
        let dev_config = self.panel_dev_config();
        let panel = self
            .hal
            .new_panel_rm690b0(io, &dev_config)
            .map_err(|cause| {
                error!("new panel failed: {}", cause);
                BspError::DriverInit {
                    stage: Stage::Panel,
                    cause,
                }
            })?;
        rollback.panel = Some(panel);

        self.hal
            .panel_reset(panel)
            .map_err(|cause| BspError::DriverInit {
                stage: Stage::PanelReset,
                cause,
            })?;
        self.hal
            .panel_init(panel)
            .map_err(|cause| BspError::DriverInit {
                stage: Stage::PanelInit,
                cause,
            })?;

        rollback.prior_panel = self.panel.replace(panel);
        Ok((panel, io))
    }

    /// Delete a panel and its IO channel created by [`Self::display_new`].
    ///
    /// Forgets the recorded panel when it is `panel` and the driver accepted
    /// the delete; a refused delete leaves the panel recorded. The SPI bus
    /// stays claimed.
    pub fn display_delete(&mut self, panel: H::Panel, io: H::Io) -> Result<(), BspError> {
        self.hal
            .del_panel(panel)
            .map_err(|cause| BspError::DriverInit {
                stage: Stage::Panel,
                cause,
            })?;
        if self.panel == Some(panel) {
            self.panel = None;
        }
        if let Some(session) = self.session.as_mut() {
            session.forget_prior_panel(panel);
        }
        self.hal
            .del_panel_io(io)
            .map_err(|cause| BspError::DriverInit {
                stage: Stage::PanelIo,
                cause,
            })
    }
}
