//! The decode tables. Each is a 16x16 grid indexed by the opcode's high
//! nibble (row) and low nibble (column); every one of the 256 slots is
//! populated, so decoding can never fail.

use crate::addressing::Access;
use crate::addressing::Mode;
use std::fmt;

pub const BRK_VECTOR: u16 = 0xFFFE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    // Undocumented
    Slo,
    Rla,
    Sre,
    Rra,
    Sax,
    Lax,
    Dcp,
    Isb,
    Anc,
    Alr,
    Arr,
    Axs,
    // Unstable stores
    Sha,
    Shx,
    Shy,
    Tas,
}

impl Instruction {
    pub fn access(self) -> Access {
        use self::Instruction::*;
        match self {
            Sta | Stx | Sty | Sax | Sha | Shx | Shy | Tas => Access::Write,
            Asl | Lsr | Rol | Ror | Inc | Dec | Slo | Rla | Sre | Rra | Dcp | Isb => {
                Access::Modify
            }
            Jmp | Jsr => Access::Jump,
            _ => Access::Read,
        }
    }

    pub fn is_undocumented(self) -> bool {
        use self::Instruction::*;
        matches!(
            self,
            Slo | Rla | Sre | Rra | Sax | Lax | Dcp | Isb | Anc | Alr | Arr | Axs | Sha | Shx
                | Shy | Tas
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = format!("{:?}", self).to_uppercase();
        f.write_str(&name)
    }
}

/// Everything the dispatcher needs to know about one opcode byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opcode {
    pub instruction: Instruction,
    pub mode: Mode,
    pub cycles: u8,
}

impl Opcode {
    pub fn decode(byte: u8) -> Opcode {
        let (high, low) = ((byte >> 4) as usize, (byte & 0x0F) as usize);
        Opcode {
            instruction: table::INSTRUCTIONS[high][low],
            mode: table::MODES[high][low],
            cycles: table::CYCLES[high][low],
        }
    }
}

pub fn addressing_mode(byte: u8) -> Mode {
    table::MODES[(byte >> 4) as usize][(byte & 0x0F) as usize]
}

pub fn base_cycles(byte: u8) -> u8 {
    table::CYCLES[(byte >> 4) as usize][(byte & 0x0F) as usize]
}

pub fn instruction(byte: u8) -> Instruction {
    table::INSTRUCTIONS[(byte >> 4) as usize][(byte & 0x0F) as usize]
}

mod table {
    use super::Instruction;
    use super::Instruction::*;
    use crate::addressing::Mode;
    use crate::addressing::Mode::*;

    // JAM and the unstable non-store opcodes decode to `Nop` with their real
    // addressing mode.
    #[rustfmt::skip]
    pub(super) const INSTRUCTIONS: [[Instruction; 16]; 16] = [
        //  0    1    2    3    4    5    6    7    8    9    A    B    C    D    E    F
        [Brk, Ora, Nop, Slo, Nop, Ora, Asl, Slo, Php, Ora, Asl, Anc, Nop, Ora, Asl, Slo], // 0
        [Bpl, Ora, Nop, Slo, Nop, Ora, Asl, Slo, Clc, Ora, Nop, Slo, Nop, Ora, Asl, Slo], // 1
        [Jsr, And, Nop, Rla, Bit, And, Rol, Rla, Plp, And, Rol, Anc, Bit, And, Rol, Rla], // 2
        [Bmi, And, Nop, Rla, Nop, And, Rol, Rla, Sec, And, Nop, Rla, Nop, And, Rol, Rla], // 3
        [Rti, Eor, Nop, Sre, Nop, Eor, Lsr, Sre, Pha, Eor, Lsr, Alr, Jmp, Eor, Lsr, Sre], // 4
        [Bvc, Eor, Nop, Sre, Nop, Eor, Lsr, Sre, Cli, Eor, Nop, Sre, Nop, Eor, Lsr, Sre], // 5
        [Rts, Adc, Nop, Rra, Nop, Adc, Ror, Rra, Pla, Adc, Ror, Arr, Jmp, Adc, Ror, Rra], // 6
        [Bvs, Adc, Nop, Rra, Nop, Adc, Ror, Rra, Sei, Adc, Nop, Rra, Nop, Adc, Ror, Rra], // 7
        [Nop, Sta, Nop, Sax, Sty, Sta, Stx, Sax, Dey, Nop, Txa, Nop, Sty, Sta, Stx, Sax], // 8
        [Bcc, Sta, Nop, Sha, Sty, Sta, Stx, Sax, Tya, Sta, Txs, Tas, Shy, Sta, Shx, Sha], // 9
        [Ldy, Lda, Ldx, Lax, Ldy, Lda, Ldx, Lax, Tay, Lda, Tax, Lax, Ldy, Lda, Ldx, Lax], // A
        [Bcs, Lda, Nop, Lax, Ldy, Lda, Ldx, Lax, Clv, Lda, Tsx, Nop, Ldy, Lda, Ldx, Lax], // B
        [Cpy, Cmp, Nop, Dcp, Cpy, Cmp, Dec, Dcp, Iny, Cmp, Dex, Axs, Cpy, Cmp, Dec, Dcp], // C
        [Bne, Cmp, Nop, Dcp, Nop, Cmp, Dec, Dcp, Cld, Cmp, Nop, Dcp, Nop, Cmp, Dec, Dcp], // D
        [Cpx, Sbc, Nop, Isb, Cpx, Sbc, Inc, Isb, Inx, Sbc, Nop, Sbc, Cpx, Sbc, Inc, Isb], // E
        [Beq, Sbc, Nop, Isb, Nop, Sbc, Inc, Isb, Sed, Sbc, Nop, Isb, Nop, Sbc, Inc, Isb], // F
    ];

    #[rustfmt::skip]
    pub(super) const MODES: [[Mode; 16]; 16] = [
        //  0         1     2     3     4    5    6    7    8    9     A    B     C         D     E     F
        [Imp,      IndX, Imp, IndX, ZP,  ZP,  ZP,  ZP,  Imp, Imm,  Acc, Imm,  Abs,      Abs,  Abs,  Abs ], // 0
        [Rel,      IndY, Imp, IndY, ZPX, ZPX, ZPX, ZPX, Imp, AbsY, Imp, AbsY, AbsX,     AbsX, AbsX, AbsX], // 1
        [Abs,      IndX, Imp, IndX, ZP,  ZP,  ZP,  ZP,  Imp, Imm,  Acc, Imm,  Abs,      Abs,  Abs,  Abs ], // 2
        [Rel,      IndY, Imp, IndY, ZPX, ZPX, ZPX, ZPX, Imp, AbsY, Imp, AbsY, AbsX,     AbsX, AbsX, AbsX], // 3
        [Imp,      IndX, Imp, IndX, ZP,  ZP,  ZP,  ZP,  Imp, Imm,  Acc, Imm,  Abs,      Abs,  Abs,  Abs ], // 4
        [Rel,      IndY, Imp, IndY, ZPX, ZPX, ZPX, ZPX, Imp, AbsY, Imp, AbsY, AbsX,     AbsX, AbsX, AbsX], // 5
        [Imp,      IndX, Imp, IndX, ZP,  ZP,  ZP,  ZP,  Imp, Imm,  Acc, Imm,  JmpIndir, Abs,  Abs,  Abs ], // 6
        [Rel,      IndY, Imp, IndY, ZPX, ZPX, ZPX, ZPX, Imp, AbsY, Imp, AbsY, AbsX,     AbsX, AbsX, AbsX], // 7
        [Imm,      IndX, Imm, IndX, ZP,  ZP,  ZP,  ZP,  Imp, Imm,  Imp, Imm,  Abs,      Abs,  Abs,  Abs ], // 8
        [Rel,      IndY, Imp, IndY, ZPX, ZPX, ZPY, ZPY, Imp, AbsY, Imp, AbsY, AbsX,     AbsX, AbsY, AbsY], // 9
        [Imm,      IndX, Imm, IndX, ZP,  ZP,  ZP,  ZP,  Imp, Imm,  Imp, Imm,  Abs,      Abs,  Abs,  Abs ], // A
        [Rel,      IndY, Imp, IndY, ZPX, ZPX, ZPY, ZPY, Imp, AbsY, Imp, AbsY, AbsX,     AbsX, AbsY, AbsY], // B
        [Imm,      IndX, Imm, IndX, ZP,  ZP,  ZP,  ZP,  Imp, Imm,  Imp, Imm,  Abs,      Abs,  Abs,  Abs ], // C
        [Rel,      IndY, Imp, IndY, ZPX, ZPX, ZPX, ZPX, Imp, AbsY, Imp, AbsY, AbsX,     AbsX, AbsX, AbsX], // D
        [Imm,      IndX, Imm, IndX, ZP,  ZP,  ZP,  ZP,  Imp, Imm,  Imp, Imm,  Abs,      Abs,  Abs,  Abs ], // E
        [Rel,      IndY, Imp, IndY, ZPX, ZPX, ZPX, ZPX, Imp, AbsY, Imp, AbsY, AbsX,     AbsX, AbsX, AbsX], // F
    ];

    #[rustfmt::skip]
    pub(super) const CYCLES: [[u8; 16]; 16] = [
        // 0  1  2  3  4  5  6  7  8  9  A  B  C  D  E  F
        [7, 6, 2, 8, 3, 3, 5, 5, 3, 2, 2, 2, 4, 4, 6, 6], // 0
        [2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7], // 1
        [6, 6, 2, 8, 3, 3, 5, 5, 4, 2, 2, 2, 4, 4, 6, 6], // 2
        [2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7], // 3
        [6, 6, 2, 8, 3, 3, 5, 5, 3, 2, 2, 2, 3, 4, 6, 6], // 4
        [2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7], // 5
        [6, 6, 2, 8, 3, 3, 5, 5, 4, 2, 2, 2, 5, 4, 6, 6], // 6
        [2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7], // 7
        [2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4], // 8
        [2, 6, 2, 6, 4, 4, 4, 4, 2, 5, 2, 5, 5, 5, 5, 5], // 9
        [2, 6, 2, 6, 3, 3, 3, 3, 2, 2, 2, 2, 4, 4, 4, 4], // A
        [2, 5, 2, 5, 4, 4, 4, 4, 2, 4, 2, 4, 4, 4, 4, 4], // B
        [2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6], // C
        [2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7], // D
        [2, 6, 2, 8, 3, 3, 5, 5, 2, 2, 2, 2, 4, 4, 6, 6], // E
        [2, 5, 2, 8, 4, 4, 6, 6, 2, 4, 2, 7, 4, 4, 7, 7], // F
    ];
}
