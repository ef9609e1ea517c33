use crate::cpu::Cpu;
use crate::memory::Ram;
use crate::registers::Registers;
use serde::Deserialize;
use serde::Serialize;
use std::io::Read;
use std::io::Write;
use thiserror::Error;

/// A snapshot of a CPU and the RAM it runs against.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub regs: Registers,
    #[serde(with = "serde_bytes")]
    pub ram: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum StateFileError {
    #[error("Unable to parse state from file: {0}")]
    ParseError(#[from] Box<bincode::ErrorKind>),
}

impl State {
    pub fn save<T: Write>(&self, writer: &mut T) -> Result<(), StateFileError> {
        Ok(bincode::serialize_into(writer, &self)?)
    }

    pub fn load<T: Read>(reader: &mut T) -> Result<State, StateFileError> {
        Ok(bincode::deserialize_from(reader)?)
    }
}

impl Cpu<Ram> {
    pub fn get_state(&self) -> State {
        State {
            regs: self.regs.clone(),
            ram: self.mmu.as_bytes().to_vec(),
        }
    }

    pub fn load_state(&mut self, state: State) {
        self.regs = state.regs;
        self.mmu = Ram::from_bytes(&state.ram);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Memory;
    use crate::registers::ProgramCounter;

    #[test]
    fn state_survives_a_round_trip_through_bytes() {
        let mut ram = Ram::with_size(0x800);
        ram.store(0x0123, 0x45).unwrap();
        let regs = Registers {
            acc: 0x10,
            x: 0x20,
            y: 0x30,
            pc: ProgramCounter::new(0x0600),
            ..Registers::default()
        };
        let cpu = Cpu::from_registers(regs, ram);

        let mut buf = Vec::new();
        cpu.get_state().save(&mut buf).unwrap();
        let state = State::load(&mut buf.as_slice()).unwrap();

        let mut restored = Cpu::new(Ram::unconfigured());
        restored.load_state(state);
        assert_eq!(restored.regs, cpu.regs);
        assert_eq!(restored.mmu.size(), 0x800);
        assert_eq!(restored.mmu.ld8(0x0123), Ok(0x45));
    }

    #[test]
    fn truncated_input_is_rejected() {
        let mut buf = Vec::new();
        Cpu::new(Ram::with_size(0x10)).get_state().save(&mut buf).unwrap();
        buf.truncate(buf.len() / 2);
        assert!(State::load(&mut buf.as_slice()).is_err());
    }
}
