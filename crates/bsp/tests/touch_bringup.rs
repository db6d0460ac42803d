//! Touch bring-up: run with `cargo test -p lilygo-t4-s3-bsp --test touch_bringup`
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]

use lilygo_t4_s3::{Board, BoardConfig, BspError, Rotation, Stage, TouchOptions};
use platform::mocks::{Call, MockHal, Op};
use platform::{ActiveLevel, DriverError, Orientation};

fn board() -> Board<MockHal> {
    Board::new(MockHal::new(), BoardConfig::default())
}

#[test]
fn test_touch_creates_the_bus_on_demand() {
    let mut board = board();
    let touch = board.touch_new(None).unwrap();

    assert_eq!(board.hal().ops(), [Op::I2cNewBus, Op::NewTouch]);
    assert_eq!(board.hal().live_touches(), &[touch]);

    let Call::NewTouch { bus, config } = board.hal().calls()[1] else {
        panic!("expected touch creation");
    };
    assert_eq!(board.i2c_get_handle().unwrap(), bus);
    assert_eq!((config.x_max, config.y_max), (450, 600));
    assert_eq!(config.reset.unwrap().get(), 17);
    assert_eq!(config.interrupt, None);
    assert_eq!(config.reset_level, ActiveLevel::Low);
    assert_eq!(config.interrupt_level, ActiveLevel::Low);
}

#[test]
fn test_touch_uses_configured_rotation() {
    let config = BoardConfig {
        rotation: Rotation::Deg270,
        ..BoardConfig::default()
    };
    let mut board = Board::new(MockHal::new(), config);
    board.touch_new(None).unwrap();
    assert!(matches!(
        board.hal().calls()[1],
        Call::NewTouch { config, .. } if config.orientation == Orientation {
            swap_xy: true,
            mirror_x: false,
            mirror_y: true,
        }
    ));
}

#[test]
fn test_caller_options_replace_defaults() {
    let mut board = board();
    let options = TouchOptions {
        x_max: 100,
        y_max: 200,
        reset: None,
        interrupt: None,
        reset_level: ActiveLevel::High,
        interrupt_level: ActiveLevel::High,
        orientation: Orientation::default(),
    };
    board.touch_new(Some(&options)).unwrap();
    assert!(matches!(
        board.hal().calls()[1],
        Call::NewTouch { config, .. } if config == options
    ));
}

#[test]
fn test_failure_releases_a_bus_it_created() {
    let mut board = board();
    board.hal_mut().fail_on(Op::NewTouch, DriverError::NotFound);
    assert_eq!(
        board.touch_new(None),
        Err(BspError::DriverInit {
            stage: Stage::Touch,
            cause: DriverError::NotFound,
        })
    );
    assert!(board.hal().is_quiescent());
}

#[test]
fn test_failure_keeps_an_existing_bus() {
    let mut board = board();
    board.i2c_init().unwrap();
    board.hal_mut().fail_on(Op::NewTouch, DriverError::NotFound);
    assert!(board.touch_new(None).is_err());
    assert_eq!(board.hal().live_i2c_buses().len(), 1);
}

#[test]
fn test_bus_failure_propagates() {
    let mut board = board();
    board.hal_mut().fail_on(Op::I2cNewBus, DriverError::NoMemory);
    assert!(matches!(
        board.touch_new(None),
        Err(BspError::ResourceUnavailable { .. })
    ));
    assert_eq!(board.hal().count(Op::NewTouch), 0);
}

#[test]
fn test_touch_delete() {
    let mut board = board();
    let touch = board.touch_new(None).unwrap();
    board.touch_delete(touch).unwrap();
    assert!(board.hal().live_touches().is_empty());
}
