//! Integration tests for StripLayout, LedStrip and blink

mod common;
use common::*;

use falling_light::bank::{PORT_A, PORT_B};
use falling_light::strip::{REFERENCE_RESERVED_LINE, REFERENCE_WIRING};
use falling_light::{
    LayoutError, LedOutput, LedStrip, Level, PinId, Polarity, RegisterBank, StripLayout, blink,
};
use fugit::MillisDurationU32;

#[test]
fn reference_layout_matches_board_wiring() {
    let layout = StripLayout::reference().unwrap();

    assert_eq!(layout.pins(), &REFERENCE_WIRING);
    assert_eq!(layout.pins()[10], PinId::new(PORT_B, 0));
}

#[test]
fn building_a_strip_turns_every_led_off_and_leaves_reset_line_alone() {
    let bank = RegisterBank::<2>::new();
    let strip = StripLayout::reference().unwrap().build(&bank).unwrap();

    assert_eq!(strip.len(), 11);
    assert_eq!(bank.port(PORT_A), Some(0xFF));
    assert_eq!(bank.port(PORT_B), Some(0b0000_0111));
    assert_eq!(bank.level(REFERENCE_RESERVED_LINE), Some(Level::Low));
}

#[test]
fn reserved_line_is_rejected() {
    let result = StripLayout::<4>::new()
        .reserve(REFERENCE_RESERVED_LINE)
        .push(PinId::new(PORT_B, 2))
        .and_then(|layout| layout.push(REFERENCE_RESERVED_LINE));

    assert_eq!(
        result.err(),
        Some(LayoutError::ReservedLine(REFERENCE_RESERVED_LINE))
    );
}

#[test]
fn duplicate_pin_is_rejected() {
    let pin = PinId::new(PORT_A, 2);
    let result = StripLayout::<4>::new()
        .push(pin)
        .and_then(|layout| layout.push(pin));

    assert_eq!(result.err(), Some(LayoutError::DuplicatePin(pin)));
}

#[test]
fn line_outside_port_is_rejected() {
    let pin = PinId::new(PORT_A, 8);
    let result = StripLayout::<2>::new().push(pin);

    assert_eq!(result.err(), Some(LayoutError::InvalidLine(pin)));
}

#[test]
fn pushing_past_capacity_fails() {
    let result = StripLayout::<2>::new()
        .push(PinId::new(PORT_A, 0))
        .and_then(|layout| layout.push(PinId::new(PORT_A, 1)))
        .and_then(|layout| layout.push(PinId::new(PORT_A, 2)));

    assert_eq!(result.err(), Some(LayoutError::CapacityExceeded));
}

#[test]
fn incomplete_layout_cannot_build() {
    let bank = RegisterBank::<2>::new();
    let layout = StripLayout::<3>::new().push(PinId::new(PORT_A, 0)).unwrap();

    assert_eq!(
        layout.build(&bank).err(),
        Some(LayoutError::Incomplete {
            expected: 3,
            actual: 1
        })
    );
}

#[test]
fn pin_missing_from_bank_cannot_build() {
    let bank = RegisterBank::<1>::new();
    let missing = PinId::new(PORT_B, 1);
    let layout = StripLayout::<2>::new()
        .push(PinId::new(PORT_A, 0))
        .and_then(|layout| layout.push(missing))
        .unwrap();

    assert_eq!(layout.build(&bank).err(), Some(LayoutError::UnknownPin(missing)));
}

#[test]
fn single_led_strip_is_too_short() {
    let bank = RegisterBank::<1>::new();
    let layout = StripLayout::<1>::new().push(PinId::new(PORT_A, 0)).unwrap();

    assert_eq!(layout.build(&bank).err(), Some(LayoutError::TooShort { len: 1 }));
}

#[test]
fn active_high_layout_clears_bits_when_off() {
    let bank = RegisterBank::<1>::new();
    let layout = StripLayout::<2>::new()
        .polarity(Polarity::ActiveHigh)
        .push(PinId::new(PORT_A, 0))
        .and_then(|layout| layout.push(PinId::new(PORT_A, 1)))
        .unwrap();
    let mut strip = layout.build(&bank).unwrap();

    assert_eq!(bank.port(PORT_A), Some(0));
    strip.fade_target_mut().set(true);
    assert_eq!(bank.port(PORT_A), Some(0b10));
}

#[test]
fn fall_pins_exclude_fade_target() {
    let bank = RegisterBank::<2>::new();
    let mut strip = StripLayout::reference().unwrap().build(&bank).unwrap();

    let fall: Vec<PinId> = strip.fall_pins_mut().iter().map(|pin| pin.id()).collect();
    assert_eq!(fall, REFERENCE_WIRING[..10]);
    assert_eq!(strip.fade_target_mut().id(), REFERENCE_WIRING[10]);
}

#[test]
fn blink_toggles_at_half_period() {
    let bench = Bench::new();
    let pin = PinId::new(PORT_A, 3);
    let mut strip: LedStrip<_, 2> = StripLayout::<2>::new()
        .push(pin)
        .and_then(|layout| layout.push(PinId::new(PORT_A, 4)))
        .unwrap()
        .build(&bench)
        .unwrap();
    bench.take_transitions();

    let mut wait = bench.wait();
    let led = strip.get_mut(0).unwrap();
    blink(led, &mut wait, MillisDurationU32::millis(250), 4);

    let transitions = bench.take_transitions();
    let times: Vec<u64> = transitions.iter().map(|t| t.at_us).collect();
    assert_eq!(times, vec![0, 250_000, 500_000, 750_000]);
    assert_eq!(transitions[0].level, Level::Low);
    assert_eq!(bench.level(pin), Level::High);
    assert_eq!(bench.now_us(), 1_000_000);
}

#[test]
fn layout_errors_describe_the_pin() {
    let message = format!("{}", LayoutError::ReservedLine(REFERENCE_RESERVED_LINE));

    assert!(message.contains("1.3"));
    assert!(message.contains("reserved"));
}

#[test]
fn raw_strip_with_out_of_range_line_leaves_reset_line_alone() {
    use falling_light::BankPin;

    let bank = RegisterBank::<2>::new();
    let alias = PinId::new(PORT_B, 11);
    let mut strip = LedStrip::new([
        BankPin::new(&bank, PinId::new(PORT_B, 0), Polarity::ActiveLow),
        BankPin::new(&bank, alias, Polarity::ActiveLow),
    ])
    .unwrap();

    strip.fade_target_mut().set(true);
    strip.fade_target_mut().toggle();

    assert_eq!(bank.level(REFERENCE_RESERVED_LINE), Some(Level::Low));
    assert_eq!(bank.port(PORT_B), Some(0b0000_0001));
}
