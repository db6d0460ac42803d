//! SPIFFS mount on the VFS

use platform::{DriverHandles, FsInfo, SpiffsConfig, SpiffsVfs};

use crate::board::Board;
use crate::error::{BspError, StorageStage};

impl<H: DriverHandles + SpiffsVfs> Board<H> {
    /// Mount the SPIFFS partition and report its usage.
    ///
    /// If the usage query fails the partition is unmounted again.
    pub fn spiffs_mount(&mut self) -> Result<FsInfo, BspError> {
        let settings = &self.config.spiffs;
        let config = SpiffsConfig {
            base_path: settings.mount_point(),
            partition_label: settings.partition_label(),
            max_files: settings.max_files,
            format_if_mount_failed: settings.format_on_mount_fail,
        };

        self.hal.register(&config).map_err(|cause| {
            error!("SPIFFS mount at {} failed: {}", config.base_path, cause);
            BspError::Storage {
                stage: StorageStage::SpiffsMount,
                cause,
            }
        })?;

        match self.hal.info(config.partition_label) {
            Ok(info) => {
                info!("partition size: total {}, used {}", info.total, info.used);
                Ok(info)
            }
            Err(cause) => {
                error!("SPIFFS partition info failed: {}", cause);
                if let Err(e) = self.hal.unregister(config.partition_label) {
                    warn!("SPIFFS unmount after failed info failed: {}", e);
                }
                Err(BspError::Storage {
                    stage: StorageStage::SpiffsInfo,
                    cause,
                })
            }
        }
    }

    /// Unmount the SPIFFS partition.
    pub fn spiffs_unmount(&mut self) -> Result<(), BspError> {
        self.hal
            .unregister(self.config.spiffs.partition_label())
            .map_err(|cause| BspError::Storage {
                stage: StorageStage::SpiffsUnmount,
                cause,
            })
    }
}
