//! T4-S3 board wiring
//!
//! GPIO |  Function   | Notes
//! -----+-------------+----------------------------------------------
//!   6  | I2C SDA     | Shared bus, touch controller
//!   7  | I2C SCL     |
//!   9  | LCD EN      | AMOLED power rail enable (RM690B0 vendor block)
//!  10  | LCD DATA1   | Quad SPI
//!  11  | LCD CS      | Active low
//!  12  | LCD DATA3   |
//!  13  | LCD RST     |
//!  14  | LCD DATA0   |
//!  15  | LCD PCLK    | SPI clock
//!  16  | LCD DATA2   |
//!  17  | TOUCH RST   | Active low
//!  --  | TOUCH INT   | Not connected; the controller is polled

#![allow(missing_docs)] // pin table above

use platform::{GpioNum, SpiHost};

// ----- I2C -----
pub const I2C_SDA: GpioNum = GpioNum::new(6);
pub const I2C_SCL: GpioNum = GpioNum::new(7);

// ----- AMOLED (quad SPI) -----
pub const LCD_SPI_HOST: SpiHost = SpiHost::Spi3;
pub const LCD_PCLK: GpioNum = GpioNum::new(15);
pub const LCD_CS: GpioNum = GpioNum::new(11);
pub const LCD_RST: GpioNum = GpioNum::new(13);
pub const LCD_EN: GpioNum = GpioNum::new(9);
pub const LCD_DATA0: GpioNum = GpioNum::new(14);
pub const LCD_DATA1: GpioNum = GpioNum::new(10);
pub const LCD_DATA2: GpioNum = GpioNum::new(16);
pub const LCD_DATA3: GpioNum = GpioNum::new(12);

// ----- Touch (CST226SE) -----
pub const TOUCH_RST: GpioNum = GpioNum::new(17);
/// Documented as GPIO8 but unreliable on shipped boards.
pub const TOUCH_INT: Option<GpioNum> = None;
