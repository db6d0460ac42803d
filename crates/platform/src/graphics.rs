//! Graphics runtime seam (LVGL port)
//!
//! The runtime owns its own rendering task once a display is registered.
//! Everything that mutates runtime state from another context must hold the
//! port mutex via [`GraphicsPort::lock`] / [`GraphicsPort::unlock`].

use crate::area::Area;
use crate::display::{ColorFormat, LcdPanelDriver, Orientation};
use crate::error::DriverError;
use crate::input::TouchDriver;

/// Port task configuration (`lvgl_port_cfg_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PortConfig {
    /// Priority of the rendering task.
    pub task_priority: u8,
    /// Stack size of the rendering task in bytes.
    pub task_stack: usize,
    /// Core the task is pinned to; `None` for no affinity.
    pub task_affinity: Option<u8>,
    /// Longest the task sleeps between timer handler runs.
    pub task_max_sleep_ms: u32,
    /// Period of the runtime's tick timer.
    pub timer_period_ms: u32,
}

impl Default for PortConfig {
    /// Values of `ESP_LVGL_PORT_INIT_CONFIG()`.
    fn default() -> Self {
        Self {
            task_priority: 4,
            task_stack: 7168,
            task_affinity: None,
            task_max_sleep_ms: 500,
            timer_period_ms: 5,
        }
    }
}

/// Draw-buffer placement flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferFlags {
    /// Allocate draw buffers from DMA-capable memory.
    pub buff_dma: bool,
    /// Allocate draw buffers from external PSRAM.
    pub buff_spiram: bool,
    /// Swap the bytes of RGB565 pixels before flushing.
    pub swap_bytes: bool,
}

/// Logical display registration (`lvgl_port_display_cfg_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayRegistration<Io, Panel> {
    /// Panel IO channel used for flushing.
    pub io: Io,
    /// Panel the runtime drives.
    pub panel: Panel,
    /// Draw-buffer size in pixels.
    pub buffer_size: usize,
    /// Allocate a second buffer for ping-pong rendering.
    pub double_buffer: bool,
    /// Logical horizontal resolution.
    pub h_res: u16,
    /// Logical vertical resolution.
    pub v_res: u16,
    /// One bit per pixel output.
    pub monochrome: bool,
    /// Rotation applied by the runtime.
    pub rotation: Orientation,
    /// Pixel format.
    pub color_format: ColorFormat,
    /// Buffer placement.
    pub flags: BufferFlags,
}

/// Invalidate-area hook: adjusts a dirty rectangle in place before the
/// runtime schedules it for redraw.
pub type InvalidateAreaHook = fn(&mut Area);

/// Graphics runtime port (`esp_lvgl_port`).
pub trait GraphicsPort: LcdPanelDriver + TouchDriver {
    /// Start the port task and tick timer.
    fn port_init(&mut self, config: &PortConfig) -> Result<(), DriverError>;

    /// Stop the port task and tick timer.
    fn port_deinit(&mut self) -> Result<(), DriverError>;

    /// Register a logical display; allocates the draw buffers.
    fn add_display(
        &mut self,
        registration: &DisplayRegistration<Self::Io, Self::Panel>,
    ) -> Result<Self::Display, DriverError>;

    /// Unregister a logical display and free its buffers.
    fn remove_display(&mut self, display: Self::Display) -> Result<(), DriverError>;

    /// Attach a hook to the display's invalidate-area event.
    fn add_invalidate_area_hook(
        &mut self,
        display: Self::Display,
        hook: InvalidateAreaHook,
    ) -> Result<(), DriverError>;

    /// Register a touch input device bound to `display`.
    fn add_touch(
        &mut self,
        display: Self::Display,
        touch: Self::Touch,
    ) -> Result<Self::InputDevice, DriverError>;

    /// Unregister an input device.
    fn remove_touch(&mut self, input: Self::InputDevice) -> Result<(), DriverError>;

    /// Take the port mutex. `timeout_ms == 0` blocks indefinitely.
    ///
    /// Returns `true` when the mutex was taken.
    fn lock(&mut self, timeout_ms: u32) -> bool;

    /// Give the port mutex back.
    fn unlock(&mut self);
}
