use pipesim_core::common::Reg;
use pipesim_core::core::pipeline::latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use pipesim_core::isa::{BranchCond, FpOp, Instruction, IntImmOp, IntRegOp};

pub fn add(rd: u8, rs1: u8, rs2: u8) -> Instruction {
    Instruction::IntReg {
        op: IntRegOp::Add,
        rd: Reg::int(rd),
        rs1: Reg::int(rs1),
        rs2: Reg::int(rs2),
    }
}

pub fn addi(rd: u8, rs1: u8, imm: i32) -> Instruction {
    Instruction::IntImm {
        op: IntImmOp::Addi,
        rd: Reg::int(rd),
        rs1: Reg::int(rs1),
        imm: imm as u32,
    }
}

pub fn lw(rd: u8, offset: i32, base: u8) -> Instruction {
    Instruction::Load {
        fp: false,
        rd: Reg::int(rd),
        base: Reg::int(base),
        offset: offset as u32,
    }
}

pub fn sw(src: u8, offset: i32, base: u8) -> Instruction {
    Instruction::Store {
        fp: false,
        src: Reg::int(src),
        base: Reg::int(base),
        offset: offset as u32,
    }
}

pub fn fp(op: FpOp, fd: u8, fs1: u8, fs2: u8) -> Instruction {
    Instruction::FpReg {
        op,
        fd: Reg::fp(fd),
        fs1: Reg::fp(fs1),
        fs2: Reg::fp(fs2),
    }
}

pub fn branch(cond: BranchCond, rs1: u8, offset: i32) -> Instruction {
    Instruction::Branch {
        cond,
        rs1: Reg::int(rs1),
        offset: offset as u32,
    }
}

/// IF/ID entry for `inst` fetched from `pc`.
pub fn if_id(inst: Instruction, pc: u32, seq: u64) -> IfIdEntry {
    IfIdEntry {
        inst: Some(inst),
        pc,
        npc: Some(pc + 4),
        seq,
    }
}

/// ID/EX entry as decode would build it from the given operand values.
pub fn id_ex(inst: Instruction, pc: u32, a: Option<u32>, b: Option<u32>, seq: u64) -> IdExEntry {
    IdExEntry {
        inst: Some(inst),
        pc,
        npc: Some(pc + 4),
        a,
        b,
        imm: inst.imm(),
        seq,
    }
}

pub fn ex_mem(inst: Instruction, alu_output: u32, b: Option<u32>, seq: u64) -> ExMemEntry {
    ExMemEntry {
        inst: Some(inst),
        pc: 0,
        b,
        alu_output: Some(alu_output),
        cond: None,
        seq,
    }
}

pub fn mem_wb(inst: Instruction, alu_output: Option<u32>, lmd: Option<u32>) -> MemWbEntry {
    MemWbEntry {
        inst: Some(inst),
        pc: 0,
        alu_output,
        lmd,
        seq: 0,
    }
}
