//! LCD panel seam: panel IO channel and panel driver
//!
//! Mirrors the two-level `esp_lcd` model: an IO channel that knows how to
//! push commands and pixels over the bus, and a panel driver bound to that
//! channel that knows the controller's command set.

use embedded_graphics::pixelcolor::raw::RawData;
use embedded_graphics::pixelcolor::{PixelColor, Rgb565, Rgb888};

use crate::error::DriverError;
use crate::gpio::GpioNum;
use crate::handles::DriverHandles;
use crate::peripheral::SpiHost;

/// Pixel format pushed to the panel and used by the graphics runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorFormat {
    /// 16-bit RGB 5-6-5.
    Rgb565,
    /// 24-bit RGB 8-8-8.
    Rgb888,
}

impl ColorFormat {
    /// Bits per pixel on the wire.
    #[must_use]
    pub fn bits_per_pixel(self) -> usize {
        match self {
            Self::Rgb565 => <<Rgb565 as PixelColor>::Raw as RawData>::BITS_PER_PIXEL,
            Self::Rgb888 => <<Rgb888 as PixelColor>::Raw as RawData>::BITS_PER_PIXEL,
        }
    }

    /// Whole bytes per pixel.
    #[must_use]
    pub fn bytes_per_pixel(self) -> usize {
        self.bits_per_pixel() / 8
    }
}

/// Orientation triple: the axis swap and mirror flags that together
/// describe a display rotation.
///
/// The same triple must be applied to the panel registration and to the
/// touch controller, otherwise touch and visual coordinates diverge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    /// Exchange the X and Y axes.
    pub swap_xy: bool,
    /// Mirror along the X axis.
    pub mirror_x: bool,
    /// Mirror along the Y axis.
    pub mirror_y: bool,
}

/// Order of the colour elements in a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbOrder {
    /// Red first.
    Rgb,
    /// Blue first.
    Bgr,
}

/// SPI line mode of a panel IO channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiLineMode {
    /// Standard MOSI/MISO.
    Single,
    /// Single bidirectional data line (3-wire).
    Sio,
    /// Four data lines.
    Quad,
    /// Eight data lines.
    Octal,
}

/// Panel IO channel over SPI (`esp_lcd_panel_io_spi_config_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelIoSpiConfig {
    /// Bus the channel is attached to.
    pub host: SpiHost,
    /// Chip-select pin.
    pub cs: Option<GpioNum>,
    /// Data/command pin; `None` when commands are framed in-band.
    pub dc: Option<GpioNum>,
    /// SPI mode (CPOL/CPHA as 0..=3).
    pub spi_mode: u8,
    /// Pixel clock in Hz.
    pub pclk_hz: u32,
    /// Width of a command word in bits.
    pub lcd_cmd_bits: u8,
    /// Width of a parameter word in bits.
    pub lcd_param_bits: u8,
    /// Depth of the driver's transaction queue.
    pub trans_queue_depth: usize,
    /// Line mode.
    pub line_mode: SpiLineMode,
    /// Chip select is active high.
    pub cs_high_active: bool,
    /// Shift out the least significant bit first.
    pub lsb_first: bool,
}

/// Controller specific configuration of the RM690B0 AMOLED driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rm690b0VendorConfig {
    /// Pin enabling the panel's power rail.
    pub enable: Option<GpioNum>,
}

/// Panel device configuration (`esp_lcd_panel_dev_config_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelDevConfig {
    /// Hardware reset pin.
    pub reset: Option<GpioNum>,
    /// Colour element order.
    pub rgb_order: RgbOrder,
    /// Bits per pixel sent to the controller.
    pub bits_per_pixel: usize,
    /// Controller specific block.
    pub vendor: Rm690b0VendorConfig,
}

/// LCD panel driver (`esp_lcd_panel_io_*` plus `esp_lcd_panel_*`).
///
/// `Io` and `Panel` are opaque, `Copy` handles; deleting one invalidates
/// every copy.
pub trait LcdPanelDriver: DriverHandles {
    /// Create a panel IO channel on an initialized SPI bus.
    fn new_panel_io_spi(&mut self, config: &PanelIoSpiConfig) -> Result<Self::Io, DriverError>;

    /// Delete a panel IO channel.
    fn del_panel_io(&mut self, io: Self::Io) -> Result<(), DriverError>;

    /// Create an RM690B0 panel bound to `io`.
    fn new_panel_rm690b0(
        &mut self,
        io: Self::Io,
        config: &PanelDevConfig,
    ) -> Result<Self::Panel, DriverError>;

    /// Delete a panel.
    fn del_panel(&mut self, panel: Self::Panel) -> Result<(), DriverError>;

    /// Pulse the hardware reset line (software reset without one).
    fn panel_reset(&mut self, panel: Self::Panel) -> Result<(), DriverError>;

    /// Send the controller's initialization sequence.
    fn panel_init(&mut self, panel: Self::Panel) -> Result<(), DriverError>;

    /// Turn the panel's display output on or off.
    fn panel_disp_on_off(&mut self, panel: Self::Panel, on: bool) -> Result<(), DriverError>;

    /// Set the AMOLED brightness register (0..=255).
    fn panel_set_brightness(&mut self, panel: Self::Panel, level: u8) -> Result<(), DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_format_widths() {
        assert_eq!(ColorFormat::Rgb565.bits_per_pixel(), 16);
        assert_eq!(ColorFormat::Rgb565.bytes_per_pixel(), 2);
        assert_eq!(ColorFormat::Rgb888.bits_per_pixel(), 24);
        assert_eq!(ColorFormat::Rgb888.bytes_per_pixel(), 3);
    }
}
