//! Machine state dumps.
//!
//! Text renderings used by `print_*` on the simulator and by the CLI:
//! data memory as rows of four bytes, registers skipping undefined values,
//! and the functional unit pool.

use crate::common::constants::{NUM_FP_REGISTERS, NUM_GP_REGISTERS, UNDEFINED};
use crate::common::error::SimError;
use crate::common::reg::Reg;
use crate::core::Cpu;
use crate::core::pipeline::latches::{SpRegister, Stage};

/// Renders the data store between `start` (inclusive) and `end` (exclusive).
///
/// Each row starts at a word-aligned address:
///
/// ```text
/// data_memory[0x00000000:0x00000008]
/// 0x00000000: 0a 00 00 00
/// 0x00000004: ff ff ff ff
/// ```
///
/// # Errors
///
/// Returns [`SimError::MemoryOutOfBounds`] if the range is not inside the store.
pub fn format_memory(cpu: &Cpu, start: u32, end: u32) -> Result<String, SimError> {
    let bytes = cpu.data.read_bytes(start, end)?;
    let mut out = format!("data_memory[0x{start:08x}:0x{end:08x}]\n");
    for (addr, byte) in (start..end).zip(bytes) {
        if addr % 4 == 0 {
            out.push_str(&format!("0x{addr:08x}: "));
        }
        out.push_str(&format!("{byte:02x} "));
        if addr % 4 == 3 {
            out.push('\n');
        }
    }
    Ok(out)
}

/// Renders every defined register.
///
/// Special-purpose registers are listed per stage as `NAME = dec / 0xhex`
/// (IR and COND are omitted), followed by `R<i> = dec / 0xhex` for integer
/// registers and `F<i> = value / 0xbits` for floating-point registers.
pub fn format_registers(cpu: &Cpu) -> String {
    let mut out = vec!["Special purpose registers:".to_string()];
    for stage in Stage::ALL {
        out.push(format!("Stage: {stage}"));
        for reg in SpRegister::ALL {
            if matches!(reg, SpRegister::Ir | SpRegister::Cond) {
                continue;
            }
            let v = cpu.sp_register(reg, stage);
            if v != UNDEFINED {
                out.push(format!("{reg} = {v} / 0x{v:x}"));
            }
        }
    }

    out.push("General purpose registers:".to_string());
    for i in 0..NUM_GP_REGISTERS as u8 {
        let v = cpu.read_reg(Reg::int(i));
        if v != UNDEFINED {
            out.push(format!("R{i} = {} / 0x{v:x}", v as i32));
        }
    }

    out.push("Floating point registers:".to_string());
    for i in 0..NUM_FP_REGISTERS as u8 {
        let bits = cpu.read_reg(Reg::fp(i));
        if bits != UNDEFINED {
            out.push(format!("F{i} = {} / 0x{bits:x}", f32::from_bits(bits)));
        }
    }
    out.join("\n")
}

/// Renders the functional unit pool, one unit per line.
pub fn format_units(cpu: &Cpu) -> String {
    format!("Functional units:\n{}", cpu.units)
}
