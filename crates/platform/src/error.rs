//! Driver-level error codes shared by every collaborator seam.

/// Failure reported by a vendor driver.
///
/// The variants follow the error codes the ESP-IDF drivers actually return
/// from bus, panel, touch, graphics-port and VFS calls, so a backend can map
/// its native code onto one of them without losing the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// A parameter was rejected by the driver (`ESP_ERR_INVALID_ARG`).
    InvalidArgument,
    /// The driver or peripheral is in the wrong state, e.g. the bus is
    /// already claimed (`ESP_ERR_INVALID_STATE`).
    InvalidState,
    /// Out of memory (`ESP_ERR_NO_MEM`).
    NoMemory,
    /// Partition, device or handle not found (`ESP_ERR_NOT_FOUND`).
    NotFound,
    /// The operation timed out (`ESP_ERR_TIMEOUT`).
    Timeout,
    /// Operation not supported by this device (`ESP_ERR_NOT_SUPPORTED`).
    NotSupported,
    /// Generic failure (`ESP_FAIL`).
    Failed,
}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::InvalidState => write!(f, "invalid state"),
            Self::NoMemory => write!(f, "out of memory"),
            Self::NotFound => write!(f, "not found"),
            Self::Timeout => write!(f, "operation timed out"),
            Self::NotSupported => write!(f, "not supported"),
            Self::Failed => write!(f, "driver failure"),
        }
    }
}
