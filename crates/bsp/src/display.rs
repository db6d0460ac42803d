//! Display session orchestrator
//!
//! Brings the whole display stack up in one call and hands it to the
//! graphics runtime:
//!
//! ```text
//! [Idle] --port_init--> [PortInitialized] --display_new + on--> [PanelCreated]
//!   --add_display + hook--> [DisplayRegistered] --touch_new--> [TouchCreated]
//!   --add_touch--> [Ready]
//! ```
//!
//! Any failure unwinds everything acquired so far and leaves the session in
//! [`SessionState::Failed`]; the next start begins from scratch. A `Ready`
//! session is torn down with [`Board::display_stop`].
//!
//! Only this module needs a [`GraphicsPort`]. Boards whose backend has no
//! graphics runtime use the standalone bring-ups instead.

use core::ops::{Deref, DerefMut};

use embassy_time::Duration;
use platform::{
    Area, BufferFlags, DisplayRegistration, DriverHandles, GraphicsPort, PortConfig, SpiMaster,
};

use crate::board::Board;
use crate::config::{LCD_DRAW_BUFF_DOUBLE, LCD_DRAW_BUFF_SIZE};
use crate::error::{BspError, Resource, Stage};
use crate::panel::DisplayConfig;
use crate::rollback::Rollback;
use crate::touch::touch_config;

/// Progress of the display session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Nothing started.
    Idle,
    /// Graphics port task running.
    PortInitialized,
    /// Panel created, reset, initialized and switched on.
    PanelCreated,
    /// Logical display registered with the runtime.
    DisplayRegistered,
    /// Touch controller created.
    TouchCreated,
    /// Touch input registered; the session is live.
    Ready,
    /// The last start failed and was unwound.
    Failed,
}

impl core::fmt::Display for SessionState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::PortInitialized => write!(f, "port initialized"),
            Self::PanelCreated => write!(f, "panel created"),
            Self::DisplayRegistered => write!(f, "display registered"),
            Self::TouchCreated => write!(f, "touch created"),
            Self::Ready => write!(f, "ready"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Draw-buffer placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawBufferFlags {
    /// DMA-capable internal memory.
    pub buff_dma: bool,
    /// External PSRAM.
    pub buff_spiram: bool,
}

/// Display session parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplaySessionConfig {
    /// Graphics port task configuration.
    pub port: PortConfig,
    /// Draw-buffer size in pixels.
    pub buffer_size: usize,
    /// Allocate a second draw buffer.
    pub double_buffer: bool,
    /// Draw-buffer placement.
    pub flags: DrawBufferFlags,
}

impl Default for DisplaySessionConfig {
    fn default() -> Self {
        Self {
            port: PortConfig::default(),
            buffer_size: LCD_DRAW_BUFF_SIZE,
            double_buffer: LCD_DRAW_BUFF_DOUBLE,
            flags: DrawBufferFlags {
                buff_dma: true,
                buff_spiram: false,
            },
        }
    }
}

/// How long [`Board::display_lock`] waits for the port mutex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTimeout {
    /// Block until the mutex is free.
    Forever,
    /// Give up after the duration (rounded down to ms, at least 1 ms).
    After(Duration),
}

impl LockTimeout {
    /// Port timeout in milliseconds; 0 means wait forever.
    #[must_use]
    pub fn as_port_ms(self) -> u32 {
        match self {
            Self::Forever => 0,
            Self::After(d) => u32::try_from(d.as_millis()).unwrap_or(u32::MAX).max(1),
        }
    }
}

impl From<Duration> for LockTimeout {
    fn from(d: Duration) -> Self {
        Self::After(d)
    }
}

/// The graphics port mutex, captured when the session starts so code
/// bounded only on the panel seam can still serialize with the runtime.
pub(crate) struct PortMutex<H> {
    lock: fn(&mut H, u32) -> bool,
    unlock: fn(&mut H),
}

impl<H> Clone for PortMutex<H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for PortMutex<H> {}

impl<H: GraphicsPort> PortMutex<H> {
    fn of_port() -> Self {
        Self {
            lock: <H as GraphicsPort>::lock,
            unlock: <H as GraphicsPort>::unlock,
        }
    }
}

impl<H> PortMutex<H> {
    pub(crate) fn lock(self, hal: &mut H, timeout_ms: u32) -> bool {
        (self.lock)(hal, timeout_ms)
    }

    pub(crate) fn unlock(self, hal: &mut H) {
        (self.unlock)(hal);
    }
}

/// Handles of a live session.
pub(crate) struct Session<H: DriverHandles> {
    io: H::Io,
    panel: H::Panel,
    prior_panel: Option<H::Panel>,
    display: H::Display,
    touch: H::Touch,
    input: H::InputDevice,
    owns_spi: bool,
    owns_i2c: bool,
    pub(crate) mutex: PortMutex<H>,
}

impl<H: DriverHandles> Session<H> {
    /// `panel` was deleted while the session ran; do not restore it.
    pub(crate) fn forget_prior_panel(&mut self, panel: H::Panel) {
        if self.prior_panel == Some(panel) {
            self.prior_panel = None;
        }
    }

    fn into_rollback(self) -> Rollback<H> {
        Rollback {
            port: true,
            i2c: self.owns_i2c,
            spi: self.owns_spi,
            io: Some(self.io),
            panel: Some(self.panel),
            prior_panel: self.prior_panel,
            display: Some(self.display),
            touch: Some(self.touch),
            input: Some(self.input),
        }
    }
}

/// Round a dirty rectangle outward to even pixel boundaries.
///
/// The panel transfers pixels in pairs, so both the start coordinates and
/// the extent of every flushed area must be even: start edges move down to
/// an even coordinate and end edges up to an odd one. Valid over the whole
/// `i32` range, since `i32::MIN` is even and `i32::MAX` is odd.
pub fn round_invalidated_area(area: &mut Area) {
    area.x1 &= !1;
    area.y1 &= !1;
    area.x2 |= 1;
    area.y2 |= 1;
}

/// Port mutex held until drop. Derefs to the driver backend.
pub struct DisplayLockGuard<'a, H: GraphicsPort> {
    hal: &'a mut H,
}

impl<H: GraphicsPort> Deref for DisplayLockGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.hal
    }
}

impl<H: GraphicsPort> DerefMut for DisplayLockGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.hal
    }
}

impl<H: GraphicsPort> Drop for DisplayLockGuard<'_, H> {
    fn drop(&mut self) {
        self.hal.unlock();
    }
}

impl<H: SpiMaster + GraphicsPort> Board<H> {
    /// Start the display session with [`DisplaySessionConfig::default`].
    pub fn display_start(&mut self) -> Result<H::Display, BspError> {
        self.display_start_with_config(&DisplaySessionConfig::default())
    }

    /// Start the display session: graphics port, panel, logical display,
    /// touch input.
    ///
    /// Fails with [`BspError::AlreadyStarted`] while a session is `Ready`.
    pub fn display_start_with_config(
        &mut self,
        config: &DisplaySessionConfig,
    ) -> Result<H::Display, BspError> {
        if self.state == SessionState::Ready {
            return Err(BspError::AlreadyStarted);
        }
        if config.buffer_size == 0 {
            return Err(BspError::InvalidArgument("buffer_size must be positive"));
        }

        self.state = SessionState::Idle;
        let mut rollback = Rollback::new();
        match self.start_tracked(config, &mut rollback) {
            Ok(session) => {
                rollback.commit();
                let display = session.display;
                self.session = Some(session);
                self.state = SessionState::Ready;
                info!("display session ready ({})", self.config.rotation);
                Ok(display)
            }
            Err(e) => {
                error!("display start failed after {}: {}", self.state, e);
                self.unwind(rollback);
                self.state = SessionState::Failed;
                Err(e)
            }
        }
    }

    fn start_tracked(
        &mut self,
        config: &DisplaySessionConfig,
        rollback: &mut Rollback<H>,
    ) -> Result<Session<H>, BspError> {
        let geometry = self.geometry();
        let color_format = self.config.color_format;

        self.hal
            .port_init(&config.port)
            .map_err(|cause| BspError::graphics(Stage::Port, cause))?;
        rollback.port = true;
        self.state = SessionState::PortInitialized;

        self.brightness_init()?;

        let max_transfer_sz = LCD_DRAW_BUFF_SIZE
            .checked_mul(color_format.bytes_per_pixel())
            .ok_or(BspError::InvalidArgument("draw buffer too large"))?;
        let (panel, io) = self.display_new_tracked(&DisplayConfig { max_transfer_sz }, rollback)?;
        let prior_panel = rollback.prior_panel;
        self.hal
            .panel_disp_on_off(panel, true)
            .map_err(|cause| BspError::DriverInit {
                stage: Stage::PanelOn,
                cause,
            })?;
        self.state = SessionState::PanelCreated;

        debug!("adding display {}x{}", geometry.h_res, geometry.v_res);
        let registration = DisplayRegistration {
            io,
            panel,
            buffer_size: config.buffer_size,
            double_buffer: config.double_buffer,
            h_res: geometry.h_res,
            v_res: geometry.v_res,
            monochrome: false,
            rotation: geometry.orientation,
            color_format,
            flags: BufferFlags {
                buff_dma: config.flags.buff_dma,
                buff_spiram: config.flags.buff_spiram,
                swap_bytes: false,
            },
        };
        let display = self
            .hal
            .add_display(&registration)
            .map_err(|cause| BspError::graphics(Stage::DisplayRegistration, cause))?;
        rollback.display = Some(display);
        self.hal
            .add_invalidate_area_hook(display, round_invalidated_area)
            .map_err(|cause| BspError::graphics(Stage::InvalidateHook, cause))?;
        self.state = SessionState::DisplayRegistered;

        let touch = self.touch_new_tracked(&touch_config(geometry), rollback)?;
        self.state = SessionState::TouchCreated;

        let input = self
            .hal
            .add_touch(display, touch)
            .map_err(|cause| BspError::graphics(Stage::TouchInput, cause))?;
        rollback.input = Some(input);

        Ok(Session {
            io,
            panel,
            prior_panel,
            display,
            touch,
            input,
            owns_spi: rollback.spi,
            owns_i2c: rollback.i2c,
            mutex: PortMutex::of_port(),
        })
    }

    /// Tear a `Ready` session down in reverse order and return to `Idle`.
    ///
    /// Buses claimed before the session started stay up, and a panel from an
    /// earlier [`Self::display_new`] becomes the recorded panel again.
    /// Release failures are logged.
    pub fn display_stop(&mut self) -> Result<(), BspError> {
        let session = self
            .session
            .take()
            .ok_or(BspError::NotInitialized(Resource::DisplaySession))?;
        self.unwind(session.into_rollback());
        self.state = SessionState::Idle;
        info!("display session stopped");
        Ok(())
    }
}

impl<H: DriverHandles> Board<H> {
    /// Logical display of the live session.
    #[must_use]
    pub fn display(&self) -> Option<H::Display> {
        self.session.as_ref().map(|s| s.display)
    }

    /// Touch input device of the live session.
    #[must_use]
    pub fn input_device(&self) -> Option<H::InputDevice> {
        self.session.as_ref().map(|s| s.input)
    }
}

impl<H: GraphicsPort> Board<H> {
    /// Take the graphics port mutex. Returns `true` when taken.
    pub fn display_lock(&mut self, timeout: LockTimeout) -> bool {
        self.hal.lock(timeout.as_port_ms())
    }

    /// Give the graphics port mutex back.
    pub fn display_unlock(&mut self) {
        self.hal.unlock();
    }

    /// Take the port mutex for the lifetime of the returned guard.
    pub fn display_lock_guard(&mut self, timeout: LockTimeout) -> Option<DisplayLockGuard<'_, H>> {
        if self.hal.lock(timeout.as_port_ms()) {
            Some(DisplayLockGuard { hal: &mut self.hal })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forever_is_zero_and_short_waits_round_up() {
        assert_eq!(LockTimeout::Forever.as_port_ms(), 0);
        assert_eq!(LockTimeout::After(Duration::from_micros(10)).as_port_ms(), 1);
        assert_eq!(LockTimeout::After(Duration::from_millis(250)).as_port_ms(), 250);
        assert_eq!(LockTimeout::from(Duration::from_secs(1)).as_port_ms(), 1000);
    }

    #[test]
    fn rounding_examples() {
        let mut area = Area::new(3, 5, 6, 8);
        round_invalidated_area(&mut area);
        assert_eq!(area, Area::new(2, 4, 7, 9));

        let mut aligned = Area::new(0, 0, 1, 1);
        round_invalidated_area(&mut aligned);
        assert_eq!(aligned, Area::new(0, 0, 1, 1));
    }

    #[test]
    fn rounding_holds_at_the_i32_limits() {
        let mut area = Area::new(i32::MIN + 1, 0, i32::MAX - 1, 2);
        round_invalidated_area(&mut area);
        assert_eq!(area, Area::new(i32::MIN, 0, i32::MAX, 3));

        let mut far = Area::new(0, 0, i32::MAX, 1);
        round_invalidated_area(&mut far);
        assert_eq!(far, Area::new(0, 0, i32::MAX, 1));
    }

    #[test]
    fn default_session_uses_dma_double_buffer() {
        let config = DisplaySessionConfig::default();
        assert_eq!(config.buffer_size, LCD_DRAW_BUFF_SIZE);
        assert!(config.double_buffer);
        assert!(config.flags.buff_dma && !config.flags.buff_spiram);
    }
}
