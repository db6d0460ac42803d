//! Board constants and runtime configuration
//!
//! Wiring and controller parameters are fixed by the hardware and live here
//! as constants. The few choices a firmware image makes (rotation, pixel
//! format, I2C controller, SPIFFS mount) are collected in [`BoardConfig`].

use heapless::String;
use platform::{ColorFormat, I2cPort};

use crate::error::BspError;
use crate::orientation::Rotation;

// ── Panel ────────────────────────────────────────────────────────────────────

/// Native horizontal resolution of the RM690B0 panel.
pub const LCD_H_RES: u16 = 450;
/// Native vertical resolution of the RM690B0 panel.
pub const LCD_V_RES: u16 = 600;
/// Quad-SPI pixel clock.
pub const LCD_PIXEL_CLOCK_HZ: u32 = 40_000_000;
/// Width of a command word on the panel IO channel.
pub const LCD_CMD_BITS: u8 = 32;
/// Width of a parameter word on the panel IO channel.
pub const LCD_PARAM_BITS: u8 = 8;
/// Transaction queue depth of the panel IO channel.
pub const LCD_TRANS_QUEUE_DEPTH: usize = 10;

/// Draw-buffer size in pixels: one tenth of a frame.
pub const LCD_DRAW_BUFF_SIZE: usize = 27_000;
/// Allocate two draw buffers by default.
pub const LCD_DRAW_BUFF_DOUBLE: bool = true;

// ── Capabilities ─────────────────────────────────────────────────────────────

/// What the board provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// AMOLED display.
    pub display: bool,
    /// Capacitive touch.
    pub touch: bool,
    /// Physical buttons.
    pub buttons: bool,
    /// Rotary knob.
    pub knob: bool,
    /// Speaker or microphone.
    pub audio: bool,
    /// SD card slot.
    pub sd_card: bool,
    /// Inertial measurement unit.
    pub imu: bool,
}

/// Capabilities of the T4-S3.
pub const CAPABILITIES: Capabilities = Capabilities {
    display: true,
    touch: true,
    buttons: false,
    knob: false,
    audio: false,
    sd_card: false,
    imu: false,
};

// ── SPIFFS ───────────────────────────────────────────────────────────────────

/// Longest accepted mount point in bytes (VFS path prefix limit).
pub const SPIFFS_MOUNT_POINT_MAX: usize = 15;
/// Longest accepted partition label in bytes.
pub const SPIFFS_LABEL_MAX: usize = 16;
/// Default VFS path prefix.
pub const SPIFFS_DEFAULT_MOUNT_POINT: &str = "/spiffs";
/// Default data partition label.
pub const SPIFFS_DEFAULT_LABEL: &str = "storage";

/// SPIFFS mount settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpiffsSettings {
    mount_point: String<SPIFFS_MOUNT_POINT_MAX>,
    partition_label: String<SPIFFS_LABEL_MAX>,
    /// Maximum number of files open at the same time.
    pub max_files: usize,
    /// Format the partition when mounting fails.
    pub format_on_mount_fail: bool,
}

impl SpiffsSettings {
    /// Validate and build settings.
    ///
    /// The mount point must start with `/` and fit [`SPIFFS_MOUNT_POINT_MAX`];
    /// the label must be non-empty and fit [`SPIFFS_LABEL_MAX`]; `max_files`
    /// must be positive.
    pub fn new(
        mount_point: &str,
        partition_label: &str,
        max_files: usize,
        format_on_mount_fail: bool,
    ) -> Result<Self, BspError> {
        if !mount_point.starts_with('/') {
            return Err(BspError::InvalidArgument("mount point must start with '/'"));
        }
        let mount_point = String::try_from(mount_point)
            .map_err(|_| BspError::InvalidArgument("mount point too long"))?;
        if partition_label.is_empty() {
            return Err(BspError::InvalidArgument("partition label is empty"));
        }
        let partition_label = String::try_from(partition_label)
            .map_err(|_| BspError::InvalidArgument("partition label too long"))?;
        if max_files == 0 {
            return Err(BspError::InvalidArgument("max_files must be positive"));
        }
        Ok(Self {
            mount_point,
            partition_label,
            max_files,
            format_on_mount_fail,
        })
    }

    /// VFS path prefix.
    #[must_use]
    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    /// Data partition label.
    #[must_use]
    pub fn partition_label(&self) -> &str {
        &self.partition_label
    }
}

impl Default for SpiffsSettings {
    /// `/spiffs` on partition `storage`, five open files, no formatting.
    fn default() -> Self {
        Self {
            mount_point: String::try_from(SPIFFS_DEFAULT_MOUNT_POINT).unwrap_or_default(),
            partition_label: String::try_from(SPIFFS_DEFAULT_LABEL).unwrap_or_default(),
            max_files: 5,
            format_on_mount_fail: false,
        }
    }
}

// ── Board ────────────────────────────────────────────────────────────────────

/// Per-image board configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Screen rotation, applied to panel and touch alike.
    pub rotation: Rotation,
    /// Pixel format of panel and draw buffers.
    pub color_format: ColorFormat,
    /// I2C controller driving SDA/SCL.
    pub i2c_port: I2cPort,
    /// SPIFFS mount settings.
    pub spiffs: SpiffsSettings,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rotation: Rotation::Deg0,
            color_format: ColorFormat::Rgb565,
            i2c_port: I2cPort::Port0,
            spiffs: SpiffsSettings::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn draw_buffer_is_a_tenth_of_the_frame() {
        assert_eq!(
            LCD_DRAW_BUFF_SIZE,
            usize::from(LCD_H_RES) * usize::from(LCD_V_RES) / 10
        );
    }

    #[test]
    fn default_spiffs_settings() {
        let s = SpiffsSettings::default();
        assert_eq!(s.mount_point(), "/spiffs");
        assert_eq!(s.partition_label(), "storage");
        assert_eq!(s.max_files, 5);
        assert!(!s.format_on_mount_fail);
    }

    #[test]
    fn default_spiffs_settings_pass_validation() {
        assert_eq!(
            SpiffsSettings::new(SPIFFS_DEFAULT_MOUNT_POINT, SPIFFS_DEFAULT_LABEL, 5, false),
            Ok(SpiffsSettings::default())
        );
    }

    #[test]
    fn spiffs_settings_validation() {
        assert!(SpiffsSettings::new("/data", "fs", 3, true).is_ok());
        assert!(matches!(
            SpiffsSettings::new("data", "fs", 3, false),
            Err(BspError::InvalidArgument(_))
        ));
        assert!(matches!(
            SpiffsSettings::new("/a_very_long_mount", "fs", 3, false),
            Err(BspError::InvalidArgument("mount point too long"))
        ));
        assert!(matches!(
            SpiffsSettings::new("/d", "label_that_is_too_long", 3, false),
            Err(BspError::InvalidArgument("partition label too long"))
        ));
        assert!(SpiffsSettings::new("/d", "", 3, false).is_err());
        assert!(SpiffsSettings::new("/d", "fs", 0, false).is_err());
    }

    #[test]
    fn mount_point_at_capacity_is_accepted() {
        let fifteen = "/abcdefghijklmn";
        assert_eq!(fifteen.len(), SPIFFS_MOUNT_POINT_MAX);
        assert_eq!(
            SpiffsSettings::new(fifteen, "storage", 1, false)
                .unwrap()
                .mount_point(),
            fifteen
        );
    }

    #[test]
    fn board_has_display_and_touch_only() {
        assert!(CAPABILITIES.display && CAPABILITIES.touch);
        assert!(!CAPABILITIES.audio && !CAPABILITIES.sd_card && !CAPABILITIES.imu);
    }
}
