//! LilyGo T4-S3 board support
//!
//! Brings up the board's display stack and flash filesystem on top of the
//! driver seams in [`platform`]:
//!
//! ```text
//! I2C bus ──► CST226SE touch ─────────────┐
//! SPI bus ──► panel IO ──► RM690B0 panel ─┴─► graphics port session
//! SPIFFS  ──► VFS mount
//! ```
//!
//! Everything is a method on [`Board`], which owns the backend and the
//! shared bus handles. Multi-step bring-ups release what they acquired when
//! a later step fails.
//!
//! # Features
//!
//! - `std`: `std::error::Error` for [`BspError`]
//! - `defmt`: log over defmt, `defmt::Format` on public types
//! - `tracing`: log over tracing (host and emulator builds)

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

#[macro_use]
mod log;

pub mod board;
pub mod brightness;
pub mod config;
pub mod display;
pub mod error;
pub mod i2c;
pub mod orientation;
pub mod panel;
pub mod pins;
mod rollback;
pub mod spi;
pub mod storage;
pub mod touch;

pub use board::Board;
pub use brightness::BrightnessPercent;
pub use config::{BoardConfig, SpiffsSettings, CAPABILITIES};
pub use display::{
    round_invalidated_area, DisplayLockGuard, DisplaySessionConfig, DrawBufferFlags,
    LockTimeout, SessionState,
};
pub use error::{BspError, Resource, Stage, StorageStage};
pub use orientation::{Geometry, Rotation};
pub use panel::DisplayConfig;
pub use touch::TouchOptions;
