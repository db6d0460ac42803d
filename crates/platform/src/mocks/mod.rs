//! Recording mock of every driver seam
//!
//! [`MockHal`] behaves like the ESP-IDF drivers closely enough to exercise
//! the board package on the host: it hands out handles, tracks which ones
//! are live, rejects use of dead handles, and logs every call in order.
//! Any operation can be made to fail with [`MockHal::fail_on`].

use crate::*;

/// Opaque handle issued by [`MockHal`]. Ids are unique across all kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MockHandle(pub u32);

/// Operation kinds, used to inject failures and to count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// [`I2cMaster::new_master_bus`]
    I2cNewBus,
    /// [`I2cMaster::del_master_bus`]
    I2cDelBus,
    /// [`SpiMaster::bus_initialize`]
    SpiBusInit,
    /// [`SpiMaster::bus_free`]
    SpiBusFree,
    /// [`LcdPanelDriver::new_panel_io_spi`]
    NewPanelIo,
    /// [`LcdPanelDriver::del_panel_io`]
    DelPanelIo,
    /// [`LcdPanelDriver::new_panel_rm690b0`]
    NewPanel,
    /// [`LcdPanelDriver::del_panel`]
    DelPanel,
    /// [`LcdPanelDriver::panel_reset`]
    PanelReset,
    /// [`LcdPanelDriver::panel_init`]
    PanelInit,
    /// [`LcdPanelDriver::panel_disp_on_off`]
    PanelDispOnOff,
    /// [`LcdPanelDriver::panel_set_brightness`]
    PanelSetBrightness,
    /// [`TouchDriver::new_touch_cst226se`]
    NewTouch,
    /// [`TouchDriver::del_touch`]
    DelTouch,
    /// [`GraphicsPort::port_init`]
    PortInit,
    /// [`GraphicsPort::port_deinit`]
    PortDeinit,
    /// [`GraphicsPort::add_display`]
    AddDisplay,
    /// [`GraphicsPort::remove_display`]
    RemoveDisplay,
    /// [`GraphicsPort::add_invalidate_area_hook`]
    AddInvalidateHook,
    /// [`GraphicsPort::add_touch`]
    AddTouch,
    /// [`GraphicsPort::remove_touch`]
    RemoveTouch,
    /// [`GraphicsPort::lock`]
    Lock,
    /// [`GraphicsPort::unlock`]
    Unlock,
    /// [`SpiffsVfs::register`]
    SpiffsRegister,
    /// [`SpiffsVfs::info`]
    SpiffsInfo,
    /// [`SpiffsVfs::unregister`]
    SpiffsUnregister,
}

/// One recorded driver call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// New I2C master bus.
    I2cNewBus(I2cMasterConfig),
    /// Delete I2C master bus.
    I2cDelBus(MockHandle),
    /// Claim an SPI bus.
    SpiBusInit {
        /// Host claimed.
        host: SpiHost,
        /// Bus configuration.
        config: SpiBusConfig,
        /// DMA selection.
        dma: DmaChannel,
    },
    /// Release an SPI bus.
    SpiBusFree(SpiHost),
    /// New panel IO channel.
    NewPanelIo(PanelIoSpiConfig),
    /// Delete panel IO channel.
    DelPanelIo(MockHandle),
    /// New RM690B0 panel.
    NewPanel {
        /// IO channel the panel binds to.
        io: MockHandle,
        /// Device configuration.
        config: PanelDevConfig,
    },
    /// Delete panel.
    DelPanel(MockHandle),
    /// Panel reset.
    PanelReset(MockHandle),
    /// Panel init sequence.
    PanelInit(MockHandle),
    /// Panel display on/off.
    PanelDispOnOff(MockHandle, bool),
    /// Panel brightness register write.
    PanelSetBrightness(MockHandle, u8),
    /// New touch controller.
    NewTouch {
        /// Bus the controller sits on.
        bus: MockHandle,
        /// Touch configuration.
        config: TouchConfig,
    },
    /// Delete touch controller.
    DelTouch(MockHandle),
    /// Graphics port start.
    PortInit(PortConfig),
    /// Graphics port stop.
    PortDeinit,
    /// Logical display registration.
    AddDisplay(DisplayRegistration<MockHandle, MockHandle>),
    /// Logical display removal.
    RemoveDisplay(MockHandle),
    /// Invalidate-area hook attached to a display.
    AddInvalidateHook(MockHandle),
    /// Touch input device registration.
    AddTouch {
        /// Display the input device is bound to.
        display: MockHandle,
        /// Touch controller feeding it.
        touch: MockHandle,
    },
    /// Input device removal.
    RemoveTouch(MockHandle),
    /// Port mutex take with its timeout.
    Lock(u32),
    /// Port mutex give.
    Unlock,
    /// SPIFFS mount.
    SpiffsRegister {
        /// VFS path prefix.
        base_path: String,
        /// Partition label.
        partition_label: String,
        /// Max open files.
        max_files: usize,
        /// Format-on-failure policy.
        format_if_mount_failed: bool,
    },
    /// SPIFFS usage query.
    SpiffsInfo(String),
    /// SPIFFS unmount.
    SpiffsUnregister(String),
}

impl Call {
    /// Operation kind of this call.
    #[must_use]
    pub fn op(&self) -> Op {
        match self {
            Self::I2cNewBus(_) => Op::I2cNewBus,
            Self::I2cDelBus(_) => Op::I2cDelBus,
            Self::SpiBusInit { .. } => Op::SpiBusInit,
            Self::SpiBusFree(_) => Op::SpiBusFree,
            Self::NewPanelIo(_) => Op::NewPanelIo,
            Self::DelPanelIo(_) => Op::DelPanelIo,
            Self::NewPanel { .. } => Op::NewPanel,
            Self::DelPanel(_) => Op::DelPanel,
            Self::PanelReset(_) => Op::PanelReset,
            Self::PanelInit(_) => Op::PanelInit,
            Self::PanelDispOnOff(..) => Op::PanelDispOnOff,
            Self::PanelSetBrightness(..) => Op::PanelSetBrightness,
            Self::NewTouch { .. } => Op::NewTouch,
            Self::DelTouch(_) => Op::DelTouch,
            Self::PortInit(_) => Op::PortInit,
            Self::PortDeinit => Op::PortDeinit,
            Self::AddDisplay(_) => Op::AddDisplay,
            Self::RemoveDisplay(_) => Op::RemoveDisplay,
            Self::AddInvalidateHook(_) => Op::AddInvalidateHook,
            Self::AddTouch { .. } => Op::AddTouch,
            Self::RemoveTouch(_) => Op::RemoveTouch,
            Self::Lock(_) => Op::Lock,
            Self::Unlock => Op::Unlock,
            Self::SpiffsRegister { .. } => Op::SpiffsRegister,
            Self::SpiffsInfo(_) => Op::SpiffsInfo,
            Self::SpiffsUnregister(_) => Op::SpiffsUnregister,
        }
    }
}

/// Recording mock implementing every seam of [`BoardHal`].
pub struct MockHal {
    calls: Vec<Call>,
    failures: Vec<(Op, DriverError)>,
    next_id: u32,
    i2c_buses: Vec<MockHandle>,
    spi_hosts: Vec<SpiHost>,
    panel_ios: Vec<MockHandle>,
    panels: Vec<MockHandle>,
    touches: Vec<MockHandle>,
    displays: Vec<MockHandle>,
    inputs: Vec<MockHandle>,
    hooks: Vec<(MockHandle, InvalidateAreaHook)>,
    port_running: bool,
    lock_available: bool,
    lock_depth: u32,
    mounted: Option<String>,
    fs_info: FsInfo,
}

impl MockHal {
    /// Create a mock with no live resources and no injected failures.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            failures: Vec::new(),
            next_id: 1,
            i2c_buses: Vec::new(),
            spi_hosts: Vec::new(),
            panel_ios: Vec::new(),
            panels: Vec::new(),
            touches: Vec::new(),
            displays: Vec::new(),
            inputs: Vec::new(),
            hooks: Vec::new(),
            port_running: false,
            lock_available: true,
            lock_depth: 0,
            mounted: None,
            fs_info: FsInfo::default(),
        }
    }

    /// Make every later call of `op` fail with `error`.
    pub fn fail_on(&mut self, op: Op, error: DriverError) {
        self.failures.retain(|(o, _)| *o != op);
        self.failures.push((op, error));
    }

    /// Remove all injected failures.
    pub fn clear_failures(&mut self) {
        self.failures.clear();
    }

    /// Calls recorded so far, oldest first. Failed calls are included.
    #[must_use]
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Forget the recorded calls (live state is kept).
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of recorded calls of `op`.
    #[must_use]
    pub fn count(&self, op: Op) -> usize {
        self.calls.iter().filter(|c| c.op() == op).count()
    }

    /// Operation kinds in call order.
    #[must_use]
    pub fn ops(&self) -> Vec<Op> {
        self.calls.iter().map(Call::op).collect()
    }

    /// Live I2C buses.
    #[must_use]
    pub fn live_i2c_buses(&self) -> &[MockHandle] {
        &self.i2c_buses
    }

    /// `true` while `host` is claimed.
    #[must_use]
    pub fn spi_claimed(&self, host: SpiHost) -> bool {
        self.spi_hosts.contains(&host)
    }

    /// Simulate another peripheral owning `host`.
    pub fn claim_spi(&mut self, host: SpiHost) {
        if !self.spi_hosts.contains(&host) {
            self.spi_hosts.push(host);
        }
    }

    /// Live panel IO channels.
    #[must_use]
    pub fn live_panel_ios(&self) -> &[MockHandle] {
        &self.panel_ios
    }

    /// Live panels.
    #[must_use]
    pub fn live_panels(&self) -> &[MockHandle] {
        &self.panels
    }

    /// Live touch controllers.
    #[must_use]
    pub fn live_touches(&self) -> &[MockHandle] {
        &self.touches
    }

    /// Live logical displays.
    #[must_use]
    pub fn live_displays(&self) -> &[MockHandle] {
        &self.displays
    }

    /// Live input devices.
    #[must_use]
    pub fn live_input_devices(&self) -> &[MockHandle] {
        &self.inputs
    }

    /// `true` while the graphics port task runs.
    #[must_use]
    pub fn port_running(&self) -> bool {
        self.port_running
    }

    /// `true` when no handle, bus claim or port task is alive.
    #[must_use]
    pub fn is_quiescent(&self) -> bool {
        self.i2c_buses.is_empty()
            && self.spi_hosts.is_empty()
            && self.panel_ios.is_empty()
            && self.panels.is_empty()
            && self.touches.is_empty()
            && self.displays.is_empty()
            && self.inputs.is_empty()
            && !self.port_running
    }

    /// Hook attached to `display`, if any.
    #[must_use]
    pub fn invalidate_hook(&self, display: MockHandle) -> Option<InvalidateAreaHook> {
        self.hooks
            .iter()
            .find(|(d, _)| *d == display)
            .map(|(_, hook)| *hook)
    }

    /// Make [`GraphicsPort::lock`] succeed or time out.
    pub fn set_lock_available(&mut self, available: bool) {
        self.lock_available = available;
    }

    /// Number of takes not yet given back.
    #[must_use]
    pub fn lock_depth(&self) -> u32 {
        self.lock_depth
    }

    /// Brightness levels written, in order.
    #[must_use]
    pub fn brightness_levels(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::PanelSetBrightness(_, level) => Some(*level),
                _ => None,
            })
            .collect()
    }

    /// Usage reported by [`SpiffsVfs::info`].
    pub fn set_fs_info(&mut self, info: FsInfo) {
        self.fs_info = info;
    }

    /// Label of the mounted SPIFFS partition.
    #[must_use]
    pub fn mounted_label(&self) -> Option<&str> {
        self.mounted.as_deref()
    }

    fn record(&mut self, call: Call) -> Result<(), DriverError> {
        let op = call.op();
        self.calls.push(call);
        match self.failures.iter().find(|(o, _)| *o == op) {
            Some((_, error)) => Err(*error),
            None => Ok(()),
        }
    }

    fn issue(&mut self) -> MockHandle {
        let handle = MockHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        handle
    }
}

impl Default for MockHal {
    fn default() -> Self {
        Self::new()
    }
}

fn remove_live(live: &mut Vec<MockHandle>, handle: MockHandle) -> Result<(), DriverError> {
    match live.iter().position(|h| *h == handle) {
        Some(index) => {
            live.remove(index);
            Ok(())
        }
        None => Err(DriverError::InvalidArgument),
    }
}

fn require_live(live: &[MockHandle], handle: MockHandle) -> Result<(), DriverError> {
    if live.contains(&handle) {
        Ok(())
    } else {
        Err(DriverError::InvalidArgument)
    }
}

impl DriverHandles for MockHal {
    type Bus = MockHandle;
    type Io = MockHandle;
    type Panel = MockHandle;
    type Touch = MockHandle;
    type Display = MockHandle;
    type InputDevice = MockHandle;
}

impl I2cMaster for MockHal {
    fn new_master_bus(&mut self, config: &I2cMasterConfig) -> Result<Self::Bus, DriverError> {
        self.record(Call::I2cNewBus(*config))?;
        let bus = self.issue();
        self.i2c_buses.push(bus);
        Ok(bus)
    }

    fn del_master_bus(&mut self, bus: Self::Bus) -> Result<(), DriverError> {
        self.record(Call::I2cDelBus(bus))?;
        remove_live(&mut self.i2c_buses, bus)
    }
}

impl SpiMaster for MockHal {
    fn bus_initialize(
        &mut self,
        host: SpiHost,
        config: &SpiBusConfig,
        dma: DmaChannel,
    ) -> Result<(), DriverError> {
        self.record(Call::SpiBusInit {
            host,
            config: *config,
            dma,
        })?;
        if self.spi_hosts.contains(&host) {
            return Err(DriverError::InvalidState);
        }
        self.spi_hosts.push(host);
        Ok(())
    }

    fn bus_free(&mut self, host: SpiHost) -> Result<(), DriverError> {
        self.record(Call::SpiBusFree(host))?;
        match self.spi_hosts.iter().position(|h| *h == host) {
            Some(index) => {
                self.spi_hosts.remove(index);
                Ok(())
            }
            None => Err(DriverError::InvalidState),
        }
    }
}

impl LcdPanelDriver for MockHal {
    fn new_panel_io_spi(&mut self, config: &PanelIoSpiConfig) -> Result<Self::Io, DriverError> {
        self.record(Call::NewPanelIo(*config))?;
        if !self.spi_hosts.contains(&config.host) {
            return Err(DriverError::InvalidState);
        }
        let io = self.issue();
        self.panel_ios.push(io);
        Ok(io)
    }

    fn del_panel_io(&mut self, io: Self::Io) -> Result<(), DriverError> {
        self.record(Call::DelPanelIo(io))?;
        remove_live(&mut self.panel_ios, io)
    }

    fn new_panel_rm690b0(
        &mut self,
        io: Self::Io,
        config: &PanelDevConfig,
    ) -> Result<Self::Panel, DriverError> {
        self.record(Call::NewPanel {
            io,
            config: *config,
        })?;
        require_live(&self.panel_ios, io)?;
        let panel = self.issue();
        self.panels.push(panel);
        Ok(panel)
    }

    fn del_panel(&mut self, panel: Self::Panel) -> Result<(), DriverError> {
        self.record(Call::DelPanel(panel))?;
        remove_live(&mut self.panels, panel)
    }

    fn panel_reset(&mut self, panel: Self::Panel) -> Result<(), DriverError> {
        self.record(Call::PanelReset(panel))?;
        require_live(&self.panels, panel)
    }

    fn panel_init(&mut self, panel: Self::Panel) -> Result<(), DriverError> {
        self.record(Call::PanelInit(panel))?;
        require_live(&self.panels, panel)
    }

    fn panel_disp_on_off(&mut self, panel: Self::Panel, on: bool) -> Result<(), DriverError> {
        self.record(Call::PanelDispOnOff(panel, on))?;
        require_live(&self.panels, panel)
    }

    fn panel_set_brightness(&mut self, panel: Self::Panel, level: u8) -> Result<(), DriverError> {
        self.record(Call::PanelSetBrightness(panel, level))?;
        require_live(&self.panels, panel)
    }
}

impl TouchDriver for MockHal {
    fn new_touch_cst226se(
        &mut self,
        bus: Self::Bus,
        config: &TouchConfig,
    ) -> Result<Self::Touch, DriverError> {
        self.record(Call::NewTouch {
            bus,
            config: *config,
        })?;
        require_live(&self.i2c_buses, bus)?;
        let touch = self.issue();
        self.touches.push(touch);
        Ok(touch)
    }

    fn del_touch(&mut self, touch: Self::Touch) -> Result<(), DriverError> {
        self.record(Call::DelTouch(touch))?;
        remove_live(&mut self.touches, touch)
    }
}

impl GraphicsPort for MockHal {
    fn port_init(&mut self, config: &PortConfig) -> Result<(), DriverError> {
        self.record(Call::PortInit(*config))?;
        if self.port_running {
            return Err(DriverError::InvalidState);
        }
        self.port_running = true;
        Ok(())
    }

    fn port_deinit(&mut self) -> Result<(), DriverError> {
        self.record(Call::PortDeinit)?;
        if !self.port_running {
            return Err(DriverError::InvalidState);
        }
        self.port_running = false;
        Ok(())
    }

    fn add_display(
        &mut self,
        registration: &DisplayRegistration<Self::Io, Self::Panel>,
    ) -> Result<Self::Display, DriverError> {
        self.record(Call::AddDisplay(*registration))?;
        if !self.port_running {
            return Err(DriverError::InvalidState);
        }
        require_live(&self.panel_ios, registration.io)?;
        require_live(&self.panels, registration.panel)?;
        let display = self.issue();
        self.displays.push(display);
        Ok(display)
    }

    fn remove_display(&mut self, display: Self::Display) -> Result<(), DriverError> {
        self.record(Call::RemoveDisplay(display))?;
        remove_live(&mut self.displays, display)?;
        self.hooks.retain(|(d, _)| *d != display);
        Ok(())
    }

    fn add_invalidate_area_hook(
        &mut self,
        display: Self::Display,
        hook: InvalidateAreaHook,
    ) -> Result<(), DriverError> {
        self.record(Call::AddInvalidateHook(display))?;
        require_live(&self.displays, display)?;
        self.hooks.push((display, hook));
        Ok(())
    }

    fn add_touch(
        &mut self,
        display: Self::Display,
        touch: Self::Touch,
    ) -> Result<Self::InputDevice, DriverError> {
        self.record(Call::AddTouch { display, touch })?;
        require_live(&self.displays, display)?;
        require_live(&self.touches, touch)?;
        let input = self.issue();
        self.inputs.push(input);
        Ok(input)
    }

    fn remove_touch(&mut self, input: Self::InputDevice) -> Result<(), DriverError> {
        self.record(Call::RemoveTouch(input))?;
        remove_live(&mut self.inputs, input)
    }

    fn lock(&mut self, timeout_ms: u32) -> bool {
        if self.record(Call::Lock(timeout_ms)).is_err() || !self.lock_available {
            return false;
        }
        self.lock_depth = self.lock_depth.saturating_add(1);
        true
    }

    fn unlock(&mut self) {
        // unlock cannot fail on the real port either
        let _ = self.record(Call::Unlock);
        self.lock_depth = self.lock_depth.saturating_sub(1);
    }
}

impl SpiffsVfs for MockHal {
    fn register(&mut self, config: &SpiffsConfig<'_>) -> Result<(), DriverError> {
        self.record(Call::SpiffsRegister {
            base_path: config.base_path.to_string(),
            partition_label: config.partition_label.to_string(),
            max_files: config.max_files,
            format_if_mount_failed: config.format_if_mount_failed,
        })?;
        if self.mounted.is_some() {
            return Err(DriverError::InvalidState);
        }
        self.mounted = Some(config.partition_label.to_string());
        Ok(())
    }

    fn info(&mut self, partition_label: &str) -> Result<FsInfo, DriverError> {
        self.record(Call::SpiffsInfo(partition_label.to_string()))?;
        match self.mounted.as_deref() {
            Some(label) if label == partition_label => Ok(self.fs_info),
            _ => Err(DriverError::InvalidState),
        }
    }

    fn unregister(&mut self, partition_label: &str) -> Result<(), DriverError> {
        self.record(Call::SpiffsUnregister(partition_label.to_string()))?;
        match self.mounted.as_deref() {
            Some(label) if label == partition_label => {
                self.mounted = None;
                Ok(())
            }
            _ => Err(DriverError::InvalidState),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn i2c_config() -> I2cMasterConfig {
        I2cMasterConfig {
            port: I2cPort::Port0,
            sda: GpioNum::new(6),
            scl: GpioNum::new(7),
            clock_source: I2cClockSource::Default,
            glitch_ignore_cnt: 7,
            intr_priority: 0,
            trans_queue_depth: 0,
            enable_internal_pullup: true,
            allow_power_down: false,
        }
    }

    #[test]
    fn test_mock_tracks_live_handles() {
        let mut hal = MockHal::new();
        let bus = hal.new_master_bus(&i2c_config()).unwrap();
        assert_eq!(hal.live_i2c_buses(), &[bus]);

        hal.del_master_bus(bus).unwrap();
        assert!(hal.live_i2c_buses().is_empty());
        assert_eq!(hal.del_master_bus(bus), Err(DriverError::InvalidArgument));
    }

    #[test]
    fn test_mock_injected_failure_is_recorded() {
        let mut hal = MockHal::new();
        hal.fail_on(Op::I2cNewBus, DriverError::NoMemory);

        assert_eq!(hal.new_master_bus(&i2c_config()), Err(DriverError::NoMemory));
        assert_eq!(hal.count(Op::I2cNewBus), 1);
        assert!(hal.is_quiescent());
    }

    #[test]
    fn test_mock_spi_double_claim_is_invalid_state() {
        let mut hal = MockHal::new();
        hal.claim_spi(SpiHost::Spi3);
        let config = SpiBusConfig {
            data0: None,
            data1: None,
            sclk: None,
            data2: None,
            data3: None,
            data4_7: [None; 4],
            max_transfer_sz: 64,
            master: true,
            gpio_pins: false,
        };
        assert_eq!(
            hal.bus_initialize(SpiHost::Spi3, &config, DmaChannel::Auto),
            Err(DriverError::InvalidState)
        );
    }

    #[test]
    fn test_mock_lock_depth() {
        let mut hal = MockHal::new();
        assert!(hal.lock(0));
        assert_eq!(hal.lock_depth(), 1);
        hal.unlock();
        assert_eq!(hal.lock_depth(), 0);

        hal.set_lock_available(false);
        assert!(!hal.lock(10));
        assert_eq!(hal.lock_depth(), 0);
    }

    #[test]
    fn test_mock_spiffs_lifecycle() {
        let mut hal = MockHal::new();
        hal.set_fs_info(FsInfo {
            total: 1000,
            used: 10,
        });
        let config = SpiffsConfig {
            base_path: "/spiffs",
            partition_label: "storage",
            max_files: 5,
            format_if_mount_failed: false,
        };
        hal.register(&config).unwrap();
        assert_eq!(hal.register(&config), Err(DriverError::InvalidState));
        assert_eq!(hal.info("storage").unwrap().total, 1000);
        hal.unregister("storage").unwrap();
        assert_eq!(hal.mounted_label(), None);
    }
}
