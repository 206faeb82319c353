#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

#[test]
fn test_default_rate() {
    assert_eq!(Converter::default().rate(), dec!(0.27));
    assert_eq!(DEFAULT_RATE, dec!(0.27));
}

#[test]
fn test_pen_to_usd() {
    let conv = Converter::default();
    assert_eq!(conv.convert(dec!(100), Direction::PenToUsd).unwrap(), dec!(27.00));
}

#[test]
fn test_usd_to_pen() {
    let conv = Converter::default();
    assert_eq!(conv.convert(dec!(27), Direction::UsdToPen).unwrap(), dec!(100.00));
}

#[test]
fn test_round_trip() {
    let conv = Converter::new(dec!(0.27)).unwrap();
    for amount in [dec!(0.01), dec!(1), dec!(13.37), dec!(100), dec!(123456.78)] {
        for dir in [Direction::PenToUsd, Direction::UsdToPen] {
            let there = conv.convert(amount, dir).unwrap();
            let back = conv.convert(there, dir.reversed()).unwrap();
            assert!(
                (back - amount).abs() < dec!(0.000000001),
                "{amount} {dir} -> {there} -> {back}"
            );
        }
    }
}

#[test]
fn test_rejects_non_positive() {
    let conv = Converter::default();
    assert_eq!(
        conv.convert(Decimal::ZERO, Direction::PenToUsd),
        Err(ConvertError::InvalidAmount)
    );
    assert_eq!(
        conv.convert(dec!(-5), Direction::UsdToPen),
        Err(ConvertError::InvalidAmount)
    );
}

#[test]
fn test_convert_str() {
    let conv = Converter::default();
    assert_eq!(conv.convert_str(" 200 ", Direction::PenToUsd).unwrap(), dec!(54));
    for bad in ["", "abc", "NaN", "inf", "-1", "0"] {
        assert_eq!(
            conv.convert_str(bad, Direction::PenToUsd),
            Err(ConvertError::InvalidAmount),
            "accepted {bad:?}"
        );
    }
}

#[test]
fn test_rejects_bad_rate() {
    assert_eq!(
        Converter::new(Decimal::ZERO),
        Err(ConvertError::InvalidRate(Decimal::ZERO))
    );
    assert!(Converter::new(dec!(-0.3)).is_err());
    assert_eq!(Converter::new(dec!(0.3)).unwrap().rate(), dec!(0.3));
}

#[test]
fn test_direction_helpers() {
    let dir = Direction::from_source(Currency::Usd);
    assert_eq!(dir, Direction::UsdToPen);
    assert_eq!(dir.source(), Currency::Usd);
    assert_eq!(dir.target(), Currency::Pen);
    assert_eq!(dir.reversed(), Direction::PenToUsd);
    assert_eq!(Direction::PenToUsd.to_string(), "PEN → USD");
}

#[test]
fn test_currency_parse() {
    assert_eq!(Currency::parse("PEN"), Some(Currency::Pen));
    assert_eq!(Currency::parse("usd"), Some(Currency::Usd));
    assert_eq!(Currency::parse("eur"), None);
    assert_eq!(Currency::Pen.symbol(), "S/");
}
