//! Error type tests.

use pipesim_core::common::{AsmError, ConfigError, SimError};
use pipesim_core::core::units::UnitKind;

#[test]
fn asm_errors_name_the_line() {
    let err = AsmError::UnknownOpcode {
        line: 3,
        token: "MUL".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains('3'), "{msg}");
    assert!(msg.contains("MUL"), "{msg}");
}

#[test]
fn config_error_converts_into_sim_error() {
    let err: SimError = ConfigError::MissingUnit {
        kind: UnitKind::Divider,
        opcode: "DIVS".to_string(),
    }
    .into();
    assert!(matches!(err, SimError::Config(ConfigError::MissingUnit { .. })));
    assert!(err.to_string().contains("DIVS"));
}

#[test]
fn memory_error_reports_address_in_hex() {
    let err = SimError::MemoryOutOfBounds {
        addr: 0x400,
        size: 1024,
    };
    assert!(err.to_string().contains("0x00000400"));
}
