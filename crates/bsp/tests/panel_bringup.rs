//! SPI transport and panel bring-up: run with `cargo test -p lilygo-t4-s3-bsp --test panel_bringup`
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]

use lilygo_t4_s3::{Board, BoardConfig, BspError, DisplayConfig, Resource, Stage};
use platform::mocks::{Call, MockHal, Op};
use platform::{ColorFormat, DmaChannel, DriverError, RgbOrder, SpiHost};

const CONFIG: DisplayConfig = DisplayConfig {
    max_transfer_sz: 4096,
};

fn board() -> Board<MockHal> {
    Board::new(MockHal::new(), BoardConfig::default())
}

// ── SPI ──────────────────────────────────────────────────────────────────────

#[test]
fn test_spi_init_is_idempotent_and_keeps_first_size() {
    let mut board = board();
    board.spi_init(100).unwrap();
    board.spi_init(200).unwrap();

    assert_eq!(board.hal().count(Op::SpiBusInit), 1);
    let Call::SpiBusInit { host, config, dma } = board.hal().calls()[0] else {
        panic!("expected SPI init");
    };
    assert_eq!(host, SpiHost::Spi3);
    assert_eq!(dma, DmaChannel::Auto);
    assert_eq!(config.max_transfer_sz, 100);
    assert_eq!(config.data4_7, [None; 4]);
    assert!(config.master && config.gpio_pins);
    let data: Vec<u8> = [config.data0, config.data1, config.data2, config.data3]
        .iter()
        .map(|p| p.unwrap().get())
        .collect();
    assert_eq!(data, [14, 10, 16, 12]);
    assert_eq!(config.sclk.unwrap().get(), 15);
}

#[test]
fn test_spi_failure_allows_retry() {
    let mut board = board();
    board.hal_mut().fail_on(Op::SpiBusInit, DriverError::InvalidState);
    assert_eq!(
        board.spi_init(64),
        Err(BspError::ResourceUnavailable {
            resource: Resource::SpiBus,
            cause: DriverError::InvalidState,
        })
    );
    assert!(!board.spi_initialized());

    board.hal_mut().clear_failures();
    board.spi_init(64).unwrap();
    assert!(board.spi_initialized());
}

#[test]
fn test_spi_deinit() {
    let mut board = board();
    assert_eq!(
        board.spi_deinit(),
        Err(BspError::NotInitialized(Resource::SpiBus))
    );
    board.spi_init(64).unwrap();
    board.spi_deinit().unwrap();
    assert!(!board.hal().spi_claimed(SpiHost::Spi3));
}

// ── Panel ────────────────────────────────────────────────────────────────────

#[test]
fn test_zero_transfer_size_is_rejected_without_side_effects() {
    let mut board = board();
    assert!(matches!(
        board.display_new(&DisplayConfig { max_transfer_sz: 0 }),
        Err(BspError::InvalidArgument(_))
    ));
    assert!(board.hal().calls().is_empty());
}

#[test]
fn test_panel_bringup_sequence() {
    let mut board = board();
    let (panel, io) = board.display_new(&CONFIG).unwrap();

    assert_eq!(
        board.hal().ops(),
        [
            Op::SpiBusInit,
            Op::NewPanelIo,
            Op::NewPanel,
            Op::PanelReset,
            Op::PanelInit
        ]
    );
    assert_eq!(board.panel(), Some(panel));
    assert_eq!(board.hal().live_panel_ios(), &[io]);

    let Call::NewPanelIo(io_config) = board.hal().calls()[1] else {
        panic!("expected panel IO");
    };
    assert_eq!(io_config.cs.unwrap().get(), 11);
    assert_eq!(io_config.pclk_hz, 40_000_000);

    let Call::NewPanel { config, .. } = board.hal().calls()[2] else {
        panic!("expected panel");
    };
    assert_eq!(config.reset.unwrap().get(), 13);
    assert_eq!(config.vendor.enable.unwrap().get(), 9);
    assert_eq!(config.rgb_order, RgbOrder::Rgb);
    assert_eq!(config.bits_per_pixel, 16);
}

#[test]
fn test_rgb888_panel_uses_24_bits() {
    let config = BoardConfig {
        color_format: ColorFormat::Rgb888,
        ..BoardConfig::default()
    };
    let mut board = Board::new(MockHal::new(), config);
    board.display_new(&CONFIG).unwrap();
    assert!(board
        .hal()
        .calls()
        .iter()
        .any(|c| matches!(c, Call::NewPanel { config, .. } if config.bits_per_pixel == 24)));
}

#[test]
fn test_io_failure_leaks_nothing() {
    let mut board = board();
    board.hal_mut().fail_on(Op::NewPanelIo, DriverError::NoMemory);

    assert_eq!(
        board.display_new(&CONFIG),
        Err(BspError::DriverInit {
            stage: Stage::PanelIo,
            cause: DriverError::NoMemory,
        })
    );
    assert_eq!(board.panel(), None);
    assert!(board.hal().live_panel_ios().is_empty());
    assert_eq!(board.hal().count(Op::SpiBusFree), 1);
    assert!(!board.spi_initialized());
    assert!(board.hal().is_quiescent());
}

#[test]
fn test_panel_failure_releases_io_exactly_once() {
    let mut board = board();
    board.hal_mut().fail_on(Op::NewPanel, DriverError::Failed);

    assert_eq!(
        board.display_new(&CONFIG),
        Err(BspError::DriverInit {
            stage: Stage::Panel,
            cause: DriverError::Failed,
        })
    );
    assert_eq!(board.hal().count(Op::DelPanelIo), 1);
    assert_eq!(board.hal().count(Op::DelPanel), 0);
    assert!(board.hal().is_quiescent());
}

#[test]
fn test_init_failure_releases_panel_then_io() {
    for (op, stage) in [
        (Op::PanelReset, Stage::PanelReset),
        (Op::PanelInit, Stage::PanelInit),
    ] {
        let mut board = board();
        board.hal_mut().fail_on(op, DriverError::Timeout);

        assert_eq!(
            board.display_new(&CONFIG),
            Err(BspError::DriverInit {
                stage,
                cause: DriverError::Timeout,
            })
        );
        let ops = board.hal().ops();
        assert_eq!(
            ops[ops.len() - 3..],
            [Op::DelPanel, Op::DelPanelIo, Op::SpiBusFree]
        );
        assert_eq!(board.panel(), None);
        assert!(board.hal().is_quiescent());
    }
}

#[test]
fn test_bus_claimed_earlier_survives_unwind() {
    let mut board = board();
    board.spi_init(8192).unwrap();
    board.hal_mut().fail_on(Op::NewPanelIo, DriverError::Failed);

    assert!(board.display_new(&CONFIG).is_err());
    assert_eq!(board.hal().count(Op::SpiBusFree), 0);
    assert!(board.spi_initialized());
}

#[test]
fn test_release_failure_does_not_mask_original_error() {
    let mut board = board();
    board.hal_mut().fail_on(Op::PanelInit, DriverError::Timeout);
    board.hal_mut().fail_on(Op::DelPanel, DriverError::Failed);

    assert_eq!(
        board.display_new(&CONFIG),
        Err(BspError::DriverInit {
            stage: Stage::PanelInit,
            cause: DriverError::Timeout,
        })
    );
    // the IO and the bus are still released after the panel delete failed
    assert!(board.hal().live_panel_ios().is_empty());
    assert!(!board.spi_initialized());
}

#[test]
fn test_display_delete_forgets_the_panel() {
    let mut board = board();
    let (panel, io) = board.display_new(&CONFIG).unwrap();
    board.display_delete(panel, io).unwrap();

    assert_eq!(board.panel(), None);
    assert!(board.hal().live_panels().is_empty());
    assert!(board.hal().live_panel_ios().is_empty());
    assert!(board.spi_initialized());
}

#[test]
fn test_refused_delete_keeps_the_panel_recorded() {
    let mut board = board();
    let (panel, io) = board.display_new(&CONFIG).unwrap();
    board.hal_mut().fail_on(Op::DelPanel, DriverError::InvalidState);

    assert_eq!(
        board.display_delete(panel, io),
        Err(BspError::DriverInit {
            stage: Stage::Panel,
            cause: DriverError::InvalidState,
        })
    );
    assert_eq!(board.panel(), Some(panel));
    assert_eq!(board.hal().live_panels(), &[panel]);

    // the live panel is still reachable for brightness
    board.brightness_set(40).unwrap();
    assert_eq!(board.hal().brightness_levels(), [102]);
}
