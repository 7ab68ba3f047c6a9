#![cfg(feature = "host")]

use binclock::{ClockConfig, Error, Rgb, Rotation};
use embassy_time::Duration;

#[test]
fn defaults_are_valid() {
    let config = ClockConfig::default();
    config.validate().expect("defaults must validate");
    assert_eq!(config.display.rotation, Rotation::Rot180);
    assert_eq!(config.refresh_rate(), Duration::from_secs(1));
    assert_eq!(config.debounce(), Duration::from_millis(300));
    assert!(config.buttons.enabled);
}

#[test]
fn default_colors_match_the_stock_scheme() {
    let colors = ClockConfig::default().colors;
    assert_eq!(colors.on_color(), Rgb::new(255, 0, 0));
    assert_eq!(colors.off_color(), Rgb::new(0, 0, 0));
    assert_eq!(colors.okay_color(), Rgb::new(0, 255, 0));
    assert_eq!(colors.error_color(), Rgb::new(255, 0, 0));
    assert_eq!(colors.warn_color(), Rgb::new(255, 255, 0));
    assert_eq!(colors.info_color(), Rgb::new(0, 0, 255));
}

#[test]
fn out_of_range_brightness_is_rejected() {
    let mut config = ClockConfig::default();
    config.display.brightness = 1.5;
    assert!(matches!(config.validate(), Err(Error::InvalidBrightness)));
    config.display.brightness = -0.1;
    assert!(matches!(config.validate(), Err(Error::InvalidBrightness)));
    config.display.brightness = 1.0;
    config.validate().expect("full brightness is in range");
}

#[test]
fn zero_refresh_rate_is_rejected() {
    let mut config = ClockConfig::default();
    config.display.refresh_rate_ms = 0;
    assert!(matches!(config.validate(), Err(Error::InvalidRefreshRate)));
}

#[test]
fn quarter_turns_are_rejected_for_this_panel() {
    let mut config = ClockConfig::default();
    config.display.rotation = Rotation::Rot90;
    assert!(matches!(config.validate(), Err(Error::UnsupportedRotation)));
    config.display.rotation = Rotation::Rot270;
    assert!(matches!(config.validate(), Err(Error::UnsupportedRotation)));
    config.display.rotation = Rotation::Rot0;
    config.validate().expect("upright mounting is fine");
}

#[test]
fn rotation_degrees_round_trip() {
    for rotation in [
        Rotation::Rot0,
        Rotation::Rot90,
        Rotation::Rot180,
        Rotation::Rot270,
    ] {
        assert_eq!(Rotation::from_degrees(rotation.degrees()), Some(rotation));
    }
    assert_eq!(Rotation::from_degrees(45), None);
}
