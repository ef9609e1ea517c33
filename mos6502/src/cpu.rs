use crate::addressing::resolve;
use crate::memory::Memory;
use crate::memory::MemoryError;
use crate::opcodes::Opcode;
use crate::registers::Registers;
use log::{debug, log_enabled, Level};

const STACK_PAGE: u16 = 0x0100;

pub struct Cpu<M: Memory> {
    pub regs: Registers,
    pub mmu: M,
    cc: usize,
}

impl<M: Memory> Cpu<M> {
    pub fn new(mmu: M) -> Cpu<M> {
        Cpu::from_registers(Registers::default(), mmu)
    }

    pub fn from_registers(regs: Registers, mmu: M) -> Cpu<M> {
        Cpu { regs, mmu, cc: 0 }
    }

    /// Total cycles executed since construction.
    pub fn cycles(&self) -> usize {
        self.cc
    }

    /// Fetches, decodes and executes a single instruction, returning the
    /// cycles it took.
    pub fn step(&mut self) -> Result<u16, MemoryError> {
        let byte = self.ld8_pc_up()?;
        let op = Opcode::decode(byte);
        let resolved = resolve(
            op.mode,
            op.instruction.access(),
            &mut self.regs,
            &mut self.mmu,
        )?;
        let branch_cycles = self.execute(op.instruction, resolved.operand)?;
        let cycles = op.cycles as u16 + resolved.extra_cycles as u16 + branch_cycles as u16;
        if log_enabled!(Level::Debug) {
            debug!(
                "INST: {:02X} {} {:?} CYC:{} (+{})",
                byte, op.instruction, self.regs, self.cc, cycles
            );
        }
        self.cc += cycles as usize;
        Ok(cycles)
    }

    /// Runs whole instructions until at least `budget` cycles have elapsed.
    /// May overshoot by part of the last instruction, never undershoots.
    pub fn run_for_cycles(&mut self, budget: usize) -> Result<usize, MemoryError> {
        let mut consumed = 0;
        while consumed < budget {
            consumed += self.step()? as usize;
        }
        Ok(consumed)
    }

    /// Steps until `signalled` returns true. The predicate is checked after
    /// every instruction, so at least one instruction always runs.
    pub fn run_until_signalled<F>(&mut self, mut signalled: F) -> Result<usize, MemoryError>
    where
        F: FnMut(&Cpu<M>) -> bool,
    {
        let mut total = 0;
        loop {
            total += self.step()? as usize;
            if signalled(self) {
                return Ok(total);
            }
        }
    }

    pub(crate) fn store(&mut self, addr: u16, val: u8) -> Result<(), MemoryError> {
        self.mmu.store(addr, val)
    }

    pub(crate) fn push(&mut self, val: u8) -> Result<(), MemoryError> {
        let addr = self.regs.sp as u16 | STACK_PAGE;
        self.store(addr, val)?;
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Result<u8, MemoryError> {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.mmu.ld8(self.regs.sp as u16 | STACK_PAGE)
    }

    pub(crate) fn push_pc(&mut self) -> Result<(), MemoryError> {
        let pc = self.regs.pc.get_addr();
        self.push((pc >> 8) as u8)?;
        self.push(pc as u8)
    }

    pub(crate) fn pull_pc(&mut self) -> Result<(), MemoryError> {
        let low = self.pop()?;
        let high = self.pop()?;
        self.regs.pc.set_addr((high as u16) << 8 | low as u16);
        Ok(())
    }

    fn ld8_pc_up(&mut self) -> Result<u8, MemoryError> {
        let ram_ptr = self.regs.pc.get_addr();
        self.regs.pc.add_unsigned(1);
        self.mmu.ld8(ram_ptr)
    }
}
