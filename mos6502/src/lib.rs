//! Instruction-level emulation of the NMOS 6502.
//!
//! A [`cpu::Cpu`] owns a [`registers::Registers`] file and a memory
//! implementing [`Memory`]. Each call to [`cpu::Cpu::step`] fetches one
//! opcode, resolves its operand through [`addressing::resolve`], runs it,
//! and reports the cycles spent including page-crossing and branch
//! penalties.

pub mod addressing;
pub mod cpu;
mod instructions;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod state;

pub use memory::Memory;
pub use memory::MemoryError;
