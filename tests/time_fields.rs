#![cfg(feature = "host")]

use binclock::{BinaryFields, FieldBits};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

fn datetime(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> OffsetDateTime {
    let date = Date::from_calendar_date(year, Month::try_from(month).expect("valid month"), day)
        .expect("valid date");
    let time = Time::from_hms(hour, minute, second).expect("valid time");
    PrimitiveDateTime::new(date, time).assume_utc()
}

fn digits<const WIDTH: usize>(bits: &FieldBits<WIDTH>) -> String {
    bits.bits()
        .iter()
        .map(|&bit| if bit { '1' } else { '0' })
        .collect()
}

#[test]
fn field_widths_are_fixed() {
    let fields = BinaryFields::from_datetime(&datetime(2024, 5, 28, 13, 45, 30));
    assert_eq!(fields.year.width(), 11);
    assert_eq!(fields.month.width(), 4);
    assert_eq!(fields.day.width(), 5);
    assert_eq!(fields.hour.width(), 5);
    assert_eq!(fields.minute.width(), 6);
    assert_eq!(fields.second.width(), 6);
}

#[test]
fn reference_datetime_matches_expected_rows() {
    let fields = BinaryFields::from_datetime(&datetime(2024, 5, 28, 13, 45, 30));
    assert_eq!(digits(&fields.year), "11111101000");
    assert_eq!(digits(&fields.month), "0101");
    assert_eq!(digits(&fields.day), "11100");
    assert_eq!(digits(&fields.hour), "01101");
    assert_eq!(digits(&fields.minute), "101101");
    assert_eq!(digits(&fields.second), "011110");
}

#[test]
fn hour_examples_match() {
    assert_eq!(digits(&FieldBits::<5>::from_value(0)), "00000");
    assert_eq!(digits(&FieldBits::<5>::from_value(12)), "01100");
    assert_eq!(digits(&FieldBits::<5>::from_value(23)), "10111");
}

#[test]
fn minute_and_second_examples_match() {
    assert_eq!(digits(&FieldBits::<6>::from_value(0)), "000000");
    assert_eq!(digits(&FieldBits::<6>::from_value(30)), "011110");
    assert_eq!(digits(&FieldBits::<6>::from_value(59)), "111011");
}

#[test]
fn month_and_day_examples_match() {
    assert_eq!(digits(&FieldBits::<4>::from_value(1)), "0001");
    assert_eq!(digits(&FieldBits::<4>::from_value(6)), "0110");
    assert_eq!(digits(&FieldBits::<4>::from_value(12)), "1100");
    assert_eq!(digits(&FieldBits::<5>::from_value(1)), "00001");
    assert_eq!(digits(&FieldBits::<5>::from_value(15)), "01111");
    assert_eq!(digits(&FieldBits::<5>::from_value(31)), "11111");
}

#[test]
fn every_representable_year_round_trips() {
    for year in 0..2048_u32 {
        let bits = FieldBits::<11>::from_value(year);
        assert_eq!(bits.value(), year, "year {year} did not round-trip");
    }
}

#[test]
fn natural_ranges_round_trip_exactly() {
    for month in 1..=12_u32 {
        assert_eq!(FieldBits::<4>::from_value(month).value(), month);
    }
    for day in 1..=31_u32 {
        assert_eq!(FieldBits::<5>::from_value(day).value(), day);
    }
    for hour in 0..24_u32 {
        assert_eq!(FieldBits::<5>::from_value(hour).value(), hour);
    }
    for value in 0..60_u32 {
        assert_eq!(FieldBits::<6>::from_value(value).value(), value);
    }
}

#[test]
fn oversized_values_truncate_to_low_bits() {
    // Truncation is the defined behavior, not an error.
    assert_eq!(FieldBits::<11>::from_value(2048).value(), 0);
    assert_eq!(FieldBits::<11>::from_value(2049).value(), 1);
    assert_eq!(FieldBits::<11>::from_value(4095).value(), 2047);
    assert_eq!(FieldBits::<4>::from_value(16).value(), 0);
    let fields = BinaryFields::from_datetime(&datetime(2048, 1, 1, 0, 0, 0));
    assert_eq!(fields.year.value(), 0);
}

#[test]
fn bit_from_lsb_counts_from_the_right() {
    let bits = FieldBits::<5>::from_value(0b01101);
    assert!(bits.bit_from_lsb(0));
    assert!(!bits.bit_from_lsb(1));
    assert!(bits.bit_from_lsb(2));
    assert!(bits.bit_from_lsb(3));
    assert!(!bits.bit_from_lsb(4));
}
