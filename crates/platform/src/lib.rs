//! Driver seams for the LilyGo T4-S3 board package
//!
//! The board package never talks to silicon directly. Every vendor service it
//! sequences is reached through one of the traits below, with opaque `Copy`
//! handles standing in for the driver pointers:
//!
//! ```text
//! lilygo-t4-s3-bsp (bring-up order, rollback, board constants)
//!         ↓
//! platform (this crate - trait seams)
//!         ↓
//! ESP-IDF drivers: i2c_master, spi_master, esp_lcd, esp_lcd_touch,
//!                  esp_lvgl_port, spiffs
//! ```
//!
//! # Seams
//!
//! - [`DriverHandles`] - the opaque handle types every seam shares
//! - [`I2cMaster`] - shared I2C master bus
//! - [`SpiMaster`] - SPI bus claim/release
//! - [`LcdPanelDriver`] - panel IO channel and RM690B0 panel
//! - [`TouchDriver`] - CST226SE touch on the I2C bus
//! - [`GraphicsPort`] - LVGL port: displays, input devices, port mutex
//! - [`SpiffsVfs`] - SPIFFS mount on the VFS
//!
//! [`BoardHal`] bundles them for a full backend. A backend built without a
//! graphics runtime implements only the seams it has; the board package
//! bounds each operation on the seams it actually calls.
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls and the recording [`mocks`]
//! - `defmt`: `defmt::Format` on all public types

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)]
#![allow(clippy::doc_markdown)] // driver symbol names in doc comments
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::struct_excessive_bools)] // driver flag blocks mirror the C structs

pub mod area;
pub mod display;
pub mod error;
pub mod gpio;
pub mod graphics;
pub mod handles;
pub mod input;
pub mod peripheral;
pub mod storage;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

pub use area::Area;
pub use display::{
    ColorFormat, LcdPanelDriver, Orientation, PanelDevConfig, PanelIoSpiConfig, RgbOrder,
    Rm690b0VendorConfig, SpiLineMode,
};
pub use error::DriverError;
pub use gpio::{ActiveLevel, GpioNum};
pub use graphics::{BufferFlags, DisplayRegistration, GraphicsPort, InvalidateAreaHook, PortConfig};
pub use handles::DriverHandles;
pub use input::{TouchConfig, TouchDriver};
pub use peripheral::{
    DmaChannel, I2cClockSource, I2cMaster, I2cMasterConfig, I2cPort, SpiBusConfig, SpiHost,
    SpiMaster,
};
pub use storage::{FsInfo, SpiffsConfig, SpiffsVfs};

/// Every driver seam the board package sequences.
///
/// Blanket-implemented: any type providing all the seams is a `BoardHal`.
pub trait BoardHal: SpiMaster + GraphicsPort + SpiffsVfs {}

impl<T> BoardHal for T where T: SpiMaster + GraphicsPort + SpiffsVfs {}
