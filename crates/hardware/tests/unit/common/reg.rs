//! Register reference tests.

use pipesim_core::common::{Reg, RegClass};
use rstest::rstest;

#[rstest]
#[case("R0", Reg::int(0))]
#[case("R31", Reg::int(31))]
#[case("r7", Reg::int(7))]
#[case("F2", Reg::fp(2))]
#[case("f31", Reg::fp(31))]
fn parses_register_names(#[case] text: &str, #[case] expected: Reg) {
    assert_eq!(text.parse::<Reg>(), Ok(expected));
}

#[rstest]
#[case("R32")]
#[case("X1")]
#[case("R")]
#[case("R-1")]
#[case("")]
fn rejects_bad_register_names(#[case] text: &str) {
    assert!(text.parse::<Reg>().is_err());
}

#[test]
fn only_integer_r0_is_zero() {
    assert!(Reg::int(0).is_zero());
    assert!(!Reg::fp(0).is_zero());
    assert!(!Reg::int(1).is_zero());
}

#[test]
fn display_round_trips_through_parse() {
    for reg in [Reg::int(5), Reg::fp(12)] {
        assert_eq!(reg.to_string().parse::<Reg>(), Ok(reg));
    }
    assert_eq!(Reg::fp(3).class, RegClass::Fp);
}
