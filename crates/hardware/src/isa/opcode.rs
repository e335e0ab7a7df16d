//! Opcode mnemonics.
//!
//! The modeled machine has a closed set of 22 operations. [`Opcode`] maps the
//! assembler mnemonics onto that set and back.

use std::fmt;
use std::str::FromStr;

/// Every operation understood by the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Opcode {
    Lw,
    Sw,
    Add,
    Addi,
    Sub,
    Subi,
    Xor,
    Beqz,
    Bnez,
    Bltz,
    Bgtz,
    Blez,
    Bgez,
    Jump,
    Eop,
    Nop,
    Lws,
    Sws,
    Adds,
    Subs,
    Mults,
    Divs,
}

impl Opcode {
    /// All opcodes in their canonical order.
    pub const ALL: [Self; 22] = [
        Self::Lw,
        Self::Sw,
        Self::Add,
        Self::Addi,
        Self::Sub,
        Self::Subi,
        Self::Xor,
        Self::Beqz,
        Self::Bnez,
        Self::Bltz,
        Self::Bgtz,
        Self::Blez,
        Self::Bgez,
        Self::Jump,
        Self::Eop,
        Self::Nop,
        Self::Lws,
        Self::Sws,
        Self::Adds,
        Self::Subs,
        Self::Mults,
        Self::Divs,
    ];

    /// Assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Lw => "LW",
            Self::Sw => "SW",
            Self::Add => "ADD",
            Self::Addi => "ADDI",
            Self::Sub => "SUB",
            Self::Subi => "SUBI",
            Self::Xor => "XOR",
            Self::Beqz => "BEQZ",
            Self::Bnez => "BNEZ",
            Self::Bltz => "BLTZ",
            Self::Bgtz => "BGTZ",
            Self::Blez => "BLEZ",
            Self::Bgez => "BGEZ",
            Self::Jump => "JUMP",
            Self::Eop => "EOP",
            Self::Nop => "NOP",
            Self::Lws => "LWS",
            Self::Sws => "SWS",
            Self::Adds => "ADDS",
            Self::Subs => "SUBS",
            Self::Mults => "MULTS",
            Self::Divs => "DIVS",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Opcode {
    type Err = ();

    /// Looks up a mnemonic. Matching is case-sensitive, as in the assembler.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic() == s)
            .ok_or(())
    }
}
