//! GPIO numbering
//!
//! Bring-up code never drives pins itself: it hands pin numbers to the
//! vendor drivers inside their configuration blocks. These types only make
//! "not connected" explicit instead of the C convention of `-1`.

/// A GPIO number on the SoC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct GpioNum(u8);

impl GpioNum {
    /// Wrap a raw GPIO number.
    #[must_use]
    pub const fn new(num: u8) -> Self {
        Self(num)
    }

    /// Raw GPIO number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Logic level of a signal in its active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Asserted when driven low.
    Low,
    /// Asserted when driven high.
    High,
}
