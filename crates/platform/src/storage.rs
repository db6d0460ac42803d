//! Flash filesystem seam (SPIFFS on the VFS)

use crate::error::DriverError;

/// Mount request (`esp_vfs_spiffs_conf_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiffsConfig<'a> {
    /// VFS path prefix the filesystem is mounted under.
    pub base_path: &'a str,
    /// Label of the data partition.
    pub partition_label: &'a str,
    /// Maximum number of files open at the same time.
    pub max_files: usize,
    /// Format the partition when mounting fails.
    pub format_if_mount_failed: bool,
}

/// Partition usage in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FsInfo {
    /// Partition capacity.
    pub total: usize,
    /// Bytes in use.
    pub used: usize,
}

/// SPIFFS registration on the virtual filesystem.
pub trait SpiffsVfs {
    /// Mount and register the filesystem (`esp_vfs_spiffs_register`).
    ///
    /// Fails with [`DriverError::InvalidState`] when already registered.
    fn register(&mut self, config: &SpiffsConfig<'_>) -> Result<(), DriverError>;

    /// Query partition usage (`esp_spiffs_info`).
    fn info(&mut self, partition_label: &str) -> Result<FsInfo, DriverError>;

    /// Unregister and unmount (`esp_vfs_spiffs_unregister`).
    fn unregister(&mut self, partition_label: &str) -> Result<(), DriverError>;
}
