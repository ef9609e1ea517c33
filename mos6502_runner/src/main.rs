#[macro_use]
extern crate log;

use anyhow::{anyhow, Context, Result};
use config::{Config, Stop};
use mos6502::cpu::Cpu;
use mos6502::memory::Ram;
use mos6502::opcodes::BRK_VECTOR;
use mos6502::registers::{ProgramCounter, Registers};
use mos6502::{Memory, MemoryError};
use std::env;
use std::fs;
use std::fs::File;
use std::path::Path;

pub mod config;

/// RAM that remembers whether the BRK vector has been read.
struct BrkWatch {
    ram: Ram,
    hit: bool,
}

impl Memory for BrkWatch {
    fn ld8(&mut self, addr: u16) -> Result<u8, MemoryError> {
        if addr == BRK_VECTOR {
            self.hit = true;
        }
        self.ram.ld8(addr)
    }

    fn store(&mut self, addr: u16, val: u8) -> Result<(), MemoryError> {
        self.ram.store(addr, val)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let config_path = env::args().nth(1).unwrap_or_else(|| "Config.toml".to_string());
    let config = Config::load_config(Path::new(&config_path))?;
    let cpu = run(&config)?;
    if let Some(path) = &config.state_out {
        save_state(cpu, path)?;
    }
    Ok(())
}

fn build_cpu(config: &Config) -> Result<Cpu<BrkWatch>> {
    let image = fs::read(&config.image)
        .with_context(|| format!("Unable to read image {}", config.image.display()))?;
    let end = config.load_address as usize + image.len();
    if end > config.memory_size {
        return Err(anyhow!(
            "Image of {} bytes at {:04X} does not fit in {:#X} bytes of RAM",
            image.len(),
            config.load_address,
            config.memory_size
        ));
    }

    let mut ram = Ram::with_size(config.memory_size);
    ram.load(config.load_address, &image)?;

    let mut regs = Registers {
        pc: ProgramCounter::new(config.start_pc()),
        ..Registers::default()
    };
    config.registers.apply(&mut regs);
    info!(
        "Loaded {} bytes at {:04X}, starting at {:?}",
        image.len(),
        config.load_address,
        regs.pc
    );
    Ok(Cpu::from_registers(regs, BrkWatch { ram, hit: false }))
}

fn run(config: &Config) -> Result<Cpu<BrkWatch>> {
    let mut cpu = build_cpu(config)?;
    let cycles = match config.stop {
        Stop::Brk => cpu.run_until_signalled(|cpu| cpu.mmu.hit)?,
        Stop::Cycles { budget } => cpu.run_for_cycles(budget)?,
    };
    info!("Stopped after {} cycles: {:?}", cycles, cpu.regs);
    Ok(cpu)
}

fn save_state(cpu: Cpu<BrkWatch>, path: &Path) -> Result<()> {
    let cpu = Cpu::from_registers(cpu.regs, cpu.mmu.ram);
    let mut file =
        File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
    cpu.get_state().save(&mut file)?;
    info!("Saved state to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegisterOverrides;
    use mos6502::state::State;
    use std::path::PathBuf;

    const MULT10: [u8; 11] = [
        0x0a, 0x8d, 0x0b, 0x06, 0x0a, 0x0a, 0x18, 0x6d, 0x0b, 0x06, 0x00,
    ];

    /// A file in the temp directory, removed when dropped.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new(name: &str) -> Scratch {
            let file_name = format!("mos6502_runner_{}_{}", std::process::id(), name);
            Scratch(env::temp_dir().join(file_name))
        }

        fn with_contents(name: &str, contents: &[u8]) -> Scratch {
            let scratch = Scratch::new(name);
            fs::write(&scratch.0, contents).unwrap();
            scratch
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_file(&self.0);
        }
    }

    fn mult10_config(image: PathBuf) -> Config {
        Config {
            image,
            registers: RegisterOverrides {
                acc: Some(10),
                ..RegisterOverrides::default()
            },
            ..Config::generate_config()
        }
    }

    #[test]
    fn shipped_config_runs() {
        let config = Config::load_config(Path::new("Config.toml")).unwrap();
        let cpu = run(&config).unwrap();
        assert_eq!(cpu.regs.acc, 100);
        assert!(cpu.mmu.hit);
    }

    #[test]
    fn runs_to_brk() {
        let image = Scratch::with_contents("brk.bin", &MULT10);
        let config = mult10_config(image.0.clone());
        let cpu = run(&config).unwrap();
        assert_eq!(cpu.regs.acc, 100);
        assert_eq!(cpu.cycles(), 23);
    }

    #[test]
    fn stops_on_cycle_budget() {
        let image = Scratch::with_contents("cycles.bin", &MULT10);
        let config = Config {
            stop: Stop::Cycles { budget: 5 },
            ..mult10_config(image.0.clone())
        };
        let cpu = run(&config).unwrap();
        // ASL A; STA $060B
        assert_eq!(cpu.cycles(), 6);
        assert_eq!(cpu.regs.pc.get_addr(), 0x0604);
        assert_eq!(cpu.regs.acc, 20);
    }

    #[test]
    fn image_must_fit_in_memory() {
        let image = Scratch::with_contents("small.bin", &MULT10);
        let config = Config {
            memory_size: 0x0100,
            ..mult10_config(image.0.clone())
        };
        assert!(run(&config).is_err());
    }

    #[test]
    fn saved_state_can_be_reloaded() {
        let image = Scratch::with_contents("state.bin", &MULT10);
        let snapshot = Scratch::new("mult10.state");
        let cpu = run(&mult10_config(image.0.clone())).unwrap();
        save_state(cpu, &snapshot.0).unwrap();

        let state = State::load(&mut File::open(&snapshot.0).unwrap()).unwrap();
        assert_eq!(state.regs.acc, 100);
        assert_eq!(state.ram.len(), 0x10000);
        assert_eq!(state.ram[0x060B], 20);
    }

    #[test]
    fn scratch_files_are_removed() {
        let path = {
            let scratch = Scratch::with_contents("drop.bin", &MULT10);
            assert!(scratch.0.is_file());
            scratch.0.clone()
        };
        assert!(!path.exists());
    }
}
