//! Acquisition tracking for multi-step bring-up
//!
//! Every bring-up sequence records what it acquires in a [`Rollback`]. On
//! success the record is committed and forgotten; on failure the board
//! releases the recorded resources in reverse acquisition order. Release
//! failures are logged and do not replace the error that triggered the
//! unwind.
//!
//! The release steps are split by driver seam so standalone bring-ups only
//! need the seams they used; [`Board::unwind`] chains all of them for the
//! display session.

use platform::{DriverHandles, GraphicsPort, I2cMaster, LcdPanelDriver, SpiMaster, TouchDriver};

use crate::board::Board;

/// Resources acquired by an in-flight bring-up.
#[must_use = "a Rollback must be committed or unwound"]
pub(crate) struct Rollback<H: DriverHandles> {
    pub(crate) port: bool,
    pub(crate) i2c: bool,
    pub(crate) spi: bool,
    pub(crate) io: Option<H::Io>,
    pub(crate) panel: Option<H::Panel>,
    /// Panel recorded on the board before `panel` replaced it.
    pub(crate) prior_panel: Option<H::Panel>,
    pub(crate) display: Option<H::Display>,
    pub(crate) touch: Option<H::Touch>,
    pub(crate) input: Option<H::InputDevice>,
}

impl<H: DriverHandles> Rollback<H> {
    pub(crate) fn new() -> Self {
        Self {
            port: false,
            i2c: false,
            spi: false,
            io: None,
            panel: None,
            prior_panel: None,
            display: None,
            touch: None,
            input: None,
        }
    }

    /// Keep everything acquired.
    pub(crate) fn commit(self) {}
}

impl<H: I2cMaster> Board<H> {
    /// Delete the I2C bus if the bring-up created it.
    pub(crate) fn unwind_i2c(&mut self, rollback: &mut Rollback<H>) {
        if core::mem::take(&mut rollback.i2c) {
            if let Err(e) = self.i2c_deinit() {
                warn!("unwind: deleting I2C bus failed: {}", e);
            }
        }
    }
}

impl<H: TouchDriver> Board<H> {
    pub(crate) fn unwind_touch(&mut self, rollback: &mut Rollback<H>) {
        if let Some(touch) = rollback.touch.take() {
            if let Err(e) = self.hal.del_touch(touch) {
                warn!("unwind: deleting touch failed: {}", e);
            }
        }
    }
}

impl<H: SpiMaster + LcdPanelDriver> Board<H> {
    /// Release panel, panel IO and (if the bring-up claimed it) the SPI bus.
    ///
    /// The board's panel recording falls back to whatever it held before
    /// the bring-up replaced it.
    pub(crate) fn unwind_panel(&mut self, rollback: &mut Rollback<H>) {
        if let Some(panel) = rollback.panel.take() {
            if self.panel == Some(panel) {
                self.panel = rollback.prior_panel.take();
            }
            if let Err(e) = self.hal.del_panel(panel) {
                warn!("unwind: deleting panel failed: {}", e);
            }
        }
        if let Some(io) = rollback.io.take() {
            if let Err(e) = self.hal.del_panel_io(io) {
                warn!("unwind: deleting panel IO failed: {}", e);
            }
        }
        if core::mem::take(&mut rollback.spi) {
            if let Err(e) = self.spi_deinit() {
                warn!("unwind: freeing SPI bus failed: {}", e);
            }
        }
    }
}

impl<H: SpiMaster + GraphicsPort> Board<H> {
    /// Release everything `rollback` recorded: input device, touch, display,
    /// panel, panel IO, SPI bus, I2C bus, graphics port.
    pub(crate) fn unwind(&mut self, mut rollback: Rollback<H>) {
        if let Some(input) = rollback.input.take() {
            if let Err(e) = self.hal.remove_touch(input) {
                warn!("unwind: removing touch input failed: {}", e);
            }
        }
        self.unwind_touch(&mut rollback);
        if let Some(display) = rollback.display.take() {
            if let Err(e) = self.hal.remove_display(display) {
                warn!("unwind: removing display failed: {}", e);
            }
        }
        self.unwind_panel(&mut rollback);
        self.unwind_i2c(&mut rollback);
        if rollback.port {
            if let Err(e) = self.hal.port_deinit() {
                warn!("unwind: stopping graphics port failed: {}", e);
            }
        }
    }
}
