use mos6502::cpu::Cpu;
use mos6502::memory::FULL_ADDRESS_SPACE;
use mos6502::opcodes::BRK_VECTOR;
use mos6502::registers::ProgramCounter;
use mos6502::registers::Registers;
use mos6502::{Memory, MemoryError};
use std::fmt;

pub const PROGRAM_START: u16 = 0x0600;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum InstructionType {
    Read,
    Write,
}

#[derive(PartialEq, Eq, Clone, Copy)]
pub struct BusOp {
    pub addr: u16,
    pub val: u8,
    pub inst_type: InstructionType,
}

impl fmt::Debug for BusOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OP - addr: {:04X} val: {:02X} {:?}",
            self.addr, self.val, self.inst_type
        )
    }
}

impl BusOp {
    pub fn read(addr: u16, val: u8) -> Self {
        BusOp {
            addr,
            val,
            inst_type: InstructionType::Read,
        }
    }

    pub fn write(addr: u16, val: u8) -> Self {
        BusOp {
            addr,
            val,
            inst_type: InstructionType::Write,
        }
    }
}

/// 64 KB of RAM that records every bus access and raises a flag when the
/// BRK vector is fetched.
pub struct TestMem {
    pub mem: Box<[u8]>,
    pub cycle_logs: Vec<BusOp>,
    pub interrupted: bool,
}

impl Default for TestMem {
    fn default() -> Self {
        TestMem {
            mem: vec![0; FULL_ADDRESS_SPACE].into_boxed_slice(),
            cycle_logs: Vec::new(),
            interrupted: false,
        }
    }
}

impl TestMem {
    pub fn with_program(addr: u16, program: &[u8]) -> Self {
        let mut mem = TestMem::default();
        mem.load(addr, program);
        mem
    }

    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let start = addr as usize;
        self.mem[start..start + bytes.len()].copy_from_slice(bytes);
    }

    pub fn is_signalled(&self) -> bool {
        self.interrupted
    }

    pub fn writes(&self) -> Vec<BusOp> {
        self.cycle_logs
            .iter()
            .filter(|op| op.inst_type == InstructionType::Write)
            .copied()
            .collect()
    }
}

impl Memory for TestMem {
    fn ld8(&mut self, addr: u16) -> Result<u8, MemoryError> {
        if addr == BRK_VECTOR {
            self.interrupted = true;
        }
        let tmp = self.mem[addr as usize];
        self.cycle_logs.push(BusOp::read(addr, tmp));
        Ok(tmp)
    }

    fn store(&mut self, addr: u16, val: u8) -> Result<(), MemoryError> {
        self.mem[addr as usize] = val;
        self.cycle_logs.push(BusOp::write(addr, val));
        Ok(())
    }
}

/// A CPU with `program` loaded at `PROGRAM_START` and PC pointing at it.
pub fn cpu_with_program(program: &[u8]) -> Cpu<TestMem> {
    cpu_at(PROGRAM_START, program)
}

pub fn cpu_at(addr: u16, program: &[u8]) -> Cpu<TestMem> {
    let regs = Registers {
        pc: ProgramCounter::new(addr),
        ..Registers::default()
    };
    Cpu::from_registers(regs, TestMem::with_program(addr, program))
}

/// Runs until the BRK vector has been fetched, returning the cycle total.
pub fn run_to_brk(cpu: &mut Cpu<TestMem>) -> usize {
    cpu.mmu.interrupted = false;
    cpu.run_until_signalled(|cpu| cpu.mmu.is_signalled())
        .expect("TestMem never fails")
}

/// Stamps out a test per entry: load the program, apply the setup, step
/// the given number of instructions and check the cycle count and the
/// resulting state.
///
/// ```ignore
/// test_program!(
///     (lda_imm, [0xA9, 0x42], |_cpu| {}, 1, 2, |cpu| assert_eq!(cpu.regs.acc, 0x42))
/// );
/// ```
#[macro_export]
macro_rules! test_program {
    ( $(($test_name:ident, [$($byte:expr),* $(,)?], $setup:expr, $steps:expr, $cycles:expr, $check:expr)),* $(,)? ) => {
        $(
            #[test]
            fn $test_name() {
                let mut cpu = $crate::cpu_with_program(&[$($byte),*]);
                let setup: fn(&mut ::mos6502::cpu::Cpu<$crate::TestMem>) = $setup;
                setup(&mut cpu);
                let mut cycles: usize = 0;
                for _ in 0..$steps {
                    cycles += cpu.step().expect("TestMem never fails") as usize;
                }
                assert_eq!(
                    cycles, $cycles,
                    "{} took {} cycles, expected {}",
                    stringify!($test_name), cycles, $cycles
                );
                let check: fn(&::mos6502::cpu::Cpu<$crate::TestMem>) = $check;
                check(&cpu);
            }
        )*
    };
}
