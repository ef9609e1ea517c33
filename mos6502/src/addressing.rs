use crate::memory::Memory;
use crate::memory::MemoryError;
use crate::registers::Registers;
use log::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Imp,
    Acc,
    Imm,
    ZP,
    ZPX,
    ZPY,
    Abs,
    AbsX,
    AbsY,
    JmpIndir,
    IndX,
    IndY,
    Rel,
}

impl Mode {
    /// Operand bytes following the opcode.
    pub fn operand_len(self) -> u16 {
        match self {
            Mode::Imp | Mode::Acc => 0,
            Mode::Imm | Mode::ZP | Mode::ZPX | Mode::ZPY | Mode::IndX | Mode::IndY | Mode::Rel => 1,
            Mode::Abs | Mode::AbsX | Mode::AbsY | Mode::JmpIndir => 2,
        }
    }
}

/// How an instruction uses its effective address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    Modify,
    Jump,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    None,
    Value(u8),
    Address(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub operand: Operand,
    pub extra_cycles: u8,
}

impl Resolved {
    fn new(operand: Operand) -> Resolved {
        Resolved {
            operand,
            extra_cycles: 0,
        }
    }
}

fn crosses_page(base: u16, effective: u16) -> bool {
    (base & 0xFF00) != (effective & 0xFF00)
}

fn ld8_pc_up<M: Memory>(regs: &mut Registers, mem: &mut M) -> Result<u8, MemoryError> {
    let ram_ptr = regs.pc.get_addr();
    regs.pc.add_unsigned(1);
    mem.ld8(ram_ptr)
}

fn ld16_pc_up<M: Memory>(regs: &mut Registers, mem: &mut M) -> Result<u16, MemoryError> {
    let ram_ptr = regs.pc.get_addr();
    regs.pc.add_unsigned(2);
    mem.ld16(ram_ptr)
}

/// Reads a pointer out of the zero page; the high byte wraps to 0x00
/// instead of spilling into page one.
fn ld16_zero_page<M: Memory>(zp: u8, mem: &mut M) -> Result<u16, MemoryError> {
    let low = mem.ld8(zp as u16)?;
    let high = mem.ld8(zp.wrapping_add(1) as u16)?;
    Ok((high as u16) << 8 | (low as u16))
}

fn indexed<M: Memory>(
    regs: &mut Registers,
    mem: &mut M,
    index: u8,
    access: Access,
) -> Result<(u16, u8), MemoryError> {
    let base = ld16_pc_up(regs, mem)?;
    let addr = base.wrapping_add(index as u16);
    Ok((addr, page_penalty(base, addr, access)))
}

fn page_penalty(base: u16, addr: u16, access: Access) -> u8 {
    if access == Access::Read && crosses_page(base, addr) {
        trace!("Page crossed from {:04X} to {:04X}", base, addr);
        1
    } else {
        0
    }
}

/// Consumes the operand bytes of an instruction at PC and produces its
/// operand. Memory operands of `Read` instructions come back dereferenced,
/// every other access gets the effective address.
pub fn resolve<M: Memory>(
    mode: Mode,
    access: Access,
    regs: &mut Registers,
    mem: &mut M,
) -> Result<Resolved, MemoryError> {
    let (addr, extra_cycles) = match mode {
        Mode::Imp | Mode::Acc => return Ok(Resolved::new(Operand::None)),
        Mode::Imm | Mode::Rel => {
            return Ok(Resolved::new(Operand::Value(ld8_pc_up(regs, mem)?)));
        }
        Mode::ZP => (ld8_pc_up(regs, mem)? as u16, 0),
        Mode::ZPX => (ld8_pc_up(regs, mem)?.wrapping_add(regs.x) as u16, 0),
        Mode::ZPY => (ld8_pc_up(regs, mem)?.wrapping_add(regs.y) as u16, 0),
        Mode::Abs => (ld16_pc_up(regs, mem)?, 0),
        Mode::AbsX => {
            let x = regs.x;
            indexed(regs, mem, x, access)?
        }
        Mode::AbsY => {
            let y = regs.y;
            indexed(regs, mem, y, access)?
        }
        Mode::JmpIndir => {
            let ptr = ld16_pc_up(regs, mem)?;
            let low = mem.ld8(ptr)?;
            // The high byte never leaves the pointer's page.
            let high = mem.ld8((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF))?;
            ((high as u16) << 8 | (low as u16), 0)
        }
        Mode::IndX => {
            let zp = ld8_pc_up(regs, mem)?.wrapping_add(regs.x);
            (ld16_zero_page(zp, mem)?, 0)
        }
        Mode::IndY => {
            let zp = ld8_pc_up(regs, mem)?;
            let base = ld16_zero_page(zp, mem)?;
            let addr = base.wrapping_add(regs.y as u16);
            (addr, page_penalty(base, addr, access))
        }
    };

    let operand = match access {
        Access::Read => Operand::Value(mem.ld8(addr)?),
        Access::Write | Access::Modify | Access::Jump => Operand::Address(addr),
    };
    Ok(Resolved {
        operand,
        extra_cycles,
    })
}
