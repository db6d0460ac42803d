//! Bus seams: I2C master and SPI master
//!
//! Both buses are shared infrastructure on the board. The BSP creates each
//! of them at most once and hands the resulting handle to the peripherals
//! that sit on it (touch controller on I2C, AMOLED panel IO on SPI).

use crate::error::DriverError;
use crate::gpio::GpioNum;
use crate::handles::DriverHandles;

// ── I2C ──────────────────────────────────────────────────────────────────────

/// I2C controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cPort {
    /// `I2C_NUM_0`
    Port0,
    /// `I2C_NUM_1`
    Port1,
}

/// I2C source clock selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cClockSource {
    /// `I2C_CLK_SRC_DEFAULT`
    Default,
    /// `I2C_CLK_SRC_XTAL`
    Xtal,
    /// `I2C_CLK_SRC_RC_FAST`
    RcFast,
}

/// Master-bus configuration handed to [`I2cMaster::new_master_bus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cMasterConfig {
    /// Controller instance.
    pub port: I2cPort,
    /// SDA pin.
    pub sda: GpioNum,
    /// SCL pin.
    pub scl: GpioNum,
    /// Source clock.
    pub clock_source: I2cClockSource,
    /// Glitch filter length in APB cycles.
    pub glitch_ignore_cnt: u8,
    /// Interrupt priority; 0 lets the driver choose.
    pub intr_priority: u8,
    /// Asynchronous transaction queue depth; 0 means synchronous only.
    pub trans_queue_depth: usize,
    /// Enable the internal pull-ups on SDA/SCL.
    pub enable_internal_pullup: bool,
    /// Allow the bus to be powered down in light sleep.
    pub allow_power_down: bool,
}

/// I2C master driver.
///
/// `Bus` is an opaque handle (a raw driver pointer on target); it is `Copy`
/// because devices attached to the bus keep their own reference to it.
pub trait I2cMaster: DriverHandles {
    /// Create a master bus (`i2c_new_master_bus`).
    fn new_master_bus(&mut self, config: &I2cMasterConfig) -> Result<Self::Bus, DriverError>;

    /// Delete a master bus (`i2c_del_master_bus`).
    fn del_master_bus(&mut self, bus: Self::Bus) -> Result<(), DriverError>;
}

// ── SPI ──────────────────────────────────────────────────────────────────────

/// SPI host peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiHost {
    /// `SPI2_HOST`
    Spi2,
    /// `SPI3_HOST`
    Spi3,
}

/// DMA channel selection for an SPI bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaChannel {
    /// No DMA; transfers limited to the FIFO size.
    Disabled,
    /// Let the driver pick a free channel (`SPI_DMA_CH_AUTO`).
    Auto,
}

/// SPI bus wiring and capability flags (`spi_bus_config_t`).
///
/// The four data lines follow the quad-SPI naming; data4..data7 only exist
/// for octal mode and are `None` on boards wired for quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiBusConfig {
    /// Data line 0 (MOSI in single-wire mode).
    pub data0: Option<GpioNum>,
    /// Data line 1 (MISO in single-wire mode).
    pub data1: Option<GpioNum>,
    /// Serial clock.
    pub sclk: Option<GpioNum>,
    /// Data line 2 (WP).
    pub data2: Option<GpioNum>,
    /// Data line 3 (HD).
    pub data3: Option<GpioNum>,
    /// Octal data lines 4..7.
    pub data4_7: [Option<GpioNum>; 4],
    /// Largest single transfer in bytes.
    pub max_transfer_sz: usize,
    /// Initialize the bus in master mode (`SPICOMMON_BUSFLAG_MASTER`).
    pub master: bool,
    /// Require GPIO-matrix-free pins (`SPICOMMON_BUSFLAG_GPIO_PINS`).
    pub gpio_pins: bool,
}

/// SPI master bus driver.
pub trait SpiMaster {
    /// Claim and configure a bus (`spi_bus_initialize`).
    ///
    /// Fails with [`DriverError::InvalidState`] when the host is already
    /// owned by another peripheral.
    fn bus_initialize(
        &mut self,
        host: SpiHost,
        config: &SpiBusConfig,
        dma: DmaChannel,
    ) -> Result<(), DriverError>;

    /// Release a bus (`spi_bus_free`).
    fn bus_free(&mut self, host: SpiHost) -> Result<(), DriverError>;
}
