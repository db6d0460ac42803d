//! Board package errors

use platform::DriverError;

/// Shared resource owned by the board context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resource {
    /// The shared I2C master bus.
    I2cBus,
    /// The quad-SPI bus driving the panel.
    SpiBus,
    /// The recorded AMOLED panel.
    Panel,
    /// A running display session.
    DisplaySession,
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::I2cBus => write!(f, "I2C bus"),
            Self::SpiBus => write!(f, "SPI bus"),
            Self::Panel => write!(f, "panel"),
            Self::DisplaySession => write!(f, "display session"),
        }
    }
}

/// Bring-up step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    /// Graphics port task start.
    Port,
    /// Panel IO channel creation.
    PanelIo,
    /// RM690B0 panel creation.
    Panel,
    /// Panel hardware reset.
    PanelReset,
    /// Panel initialization sequence.
    PanelInit,
    /// Panel display on.
    PanelOn,
    /// Logical display registration.
    DisplayRegistration,
    /// Invalidate-area hook attachment.
    InvalidateHook,
    /// Touch controller creation.
    Touch,
    /// Touch input device registration.
    TouchInput,
    /// Brightness register write.
    Brightness,
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Port => write!(f, "graphics port init"),
            Self::PanelIo => write!(f, "panel IO creation"),
            Self::Panel => write!(f, "panel creation"),
            Self::PanelReset => write!(f, "panel reset"),
            Self::PanelInit => write!(f, "panel init"),
            Self::PanelOn => write!(f, "panel display on"),
            Self::DisplayRegistration => write!(f, "display registration"),
            Self::InvalidateHook => write!(f, "invalidate hook"),
            Self::Touch => write!(f, "touch creation"),
            Self::TouchInput => write!(f, "touch input registration"),
            Self::Brightness => write!(f, "brightness"),
        }
    }
}

/// SPIFFS operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageStage {
    /// VFS registration.
    SpiffsMount,
    /// Partition usage query.
    SpiffsInfo,
    /// VFS unregistration.
    SpiffsUnmount,
}

impl core::fmt::Display for StorageStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SpiffsMount => write!(f, "SPIFFS mount"),
            Self::SpiffsInfo => write!(f, "SPIFFS info"),
            Self::SpiffsUnmount => write!(f, "SPIFFS unmount"),
        }
    }
}

/// Errors returned by the board package.
///
/// Every failure carries where it happened; driver failures also carry the
/// [`DriverError`] the collaborator reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BspError {
    /// A caller-supplied value was rejected before touching hardware.
    InvalidArgument(&'static str),
    /// A shared bus could not be brought up.
    ResourceUnavailable {
        /// Bus that failed.
        resource: Resource,
        /// Driver failure.
        cause: DriverError,
    },
    /// A driver rejected a bring-up step.
    DriverInit {
        /// Step that failed.
        stage: Stage,
        /// Driver failure.
        cause: DriverError,
    },
    /// The graphics runtime ran out of memory during a step.
    Allocation {
        /// Step that failed.
        stage: Stage,
    },
    /// The resource an operation needs does not exist.
    NotInitialized(Resource),
    /// A display session is already running.
    AlreadyStarted,
    /// A SPIFFS operation failed.
    Storage {
        /// Operation that failed.
        stage: StorageStage,
        /// Driver failure.
        cause: DriverError,
    },
}

impl BspError {
    /// Map a graphics-port failure: out-of-memory becomes [`Self::Allocation`],
    /// everything else [`Self::DriverInit`].
    #[must_use]
    pub fn graphics(stage: Stage, cause: DriverError) -> Self {
        match cause {
            DriverError::NoMemory => Self::Allocation { stage },
            cause => Self::DriverInit { stage, cause },
        }
    }

    /// Driver failure behind this error, if any.
    #[must_use]
    pub fn cause(&self) -> Option<DriverError> {
        match self {
            Self::ResourceUnavailable { cause, .. }
            | Self::DriverInit { cause, .. }
            | Self::Storage { cause, .. } => Some(*cause),
            Self::InvalidArgument(_)
            | Self::Allocation { .. }
            | Self::NotInitialized(_)
            | Self::AlreadyStarted => None,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BspError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ResourceUnavailable { cause, .. }
            | Self::DriverInit { cause, .. }
            | Self::Storage { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

impl core::fmt::Display for BspError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
            Self::ResourceUnavailable { resource, cause } => {
                write!(f, "{resource} unavailable: {cause}")
            }
            Self::DriverInit { stage, cause } => write!(f, "{stage} failed: {cause}"),
            Self::Allocation { stage } => write!(f, "{stage} failed: out of memory"),
            Self::NotInitialized(resource) => write!(f, "{resource} not initialized"),
            Self::AlreadyStarted => write!(f, "display session already started"),
            Self::Storage { stage, cause } => write!(f, "{stage} failed: {cause}"),
        }
    }
}
