use anyhow::Result;
use log::*;
use mos6502::memory::FULL_ADDRESS_SPACE;
use mos6502::registers::Registers;
use serde::Deserialize;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Config {
    pub image: PathBuf,
    pub load_address: u16,
    #[serde(default)]
    pub start_pc: Option<u16>,
    #[serde(default = "default_memory_size")]
    pub memory_size: usize,
    #[serde(default)]
    pub stop: Stop,
    #[serde(default)]
    pub registers: RegisterOverrides,
    #[serde(default)]
    pub state_out: Option<PathBuf>,
}

/// When the runner hands control back.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Stop {
    /// As soon as the BRK vector is fetched.
    #[default]
    Brk,
    Cycles { budget: usize },
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RegisterOverrides {
    pub acc: Option<u8>,
    pub x: Option<u8>,
    pub y: Option<u8>,
    pub sp: Option<u8>,
    pub flags: Option<u8>,
}

fn default_memory_size() -> usize {
    FULL_ADDRESS_SPACE
}

impl RegisterOverrides {
    pub fn apply(&self, regs: &mut Registers) {
        if let Some(acc) = self.acc {
            regs.acc = acc;
        }
        if let Some(x) = self.x {
            regs.x = x;
        }
        if let Some(y) = self.y {
            regs.y = y;
        }
        if let Some(sp) = self.sp {
            regs.sp = sp;
        }
        if let Some(flags) = self.flags {
            regs.flags.set_byte(flags);
        }
    }
}

impl Config {
    pub fn generate_config() -> Config {
        Config {
            image: PathBuf::from("program.bin"),
            load_address: 0x0600,
            start_pc: None,
            memory_size: default_memory_size(),
            stop: Stop::Brk,
            registers: RegisterOverrides::default(),
            state_out: None,
        }
    }

    /// Relative `image` and `state_out` paths are taken relative to the
    /// directory holding the config file.
    pub fn load_config(config_path: &Path) -> Result<Config> {
        if config_path.exists() {
            let mut file = File::open(config_path)?;
            let mut config_string = String::new();
            file.read_to_string(&mut config_string)?;
            let mut config: Config = toml::from_str(&config_string)?;
            if let Some(dir) = config_path.parent() {
                config.image = dir.join(&config.image);
                config.state_out = config.state_out.map(|path| dir.join(path));
            }
            if log_enabled!(Level::Debug) {
                debug!("Loading config: {:#?}", config);
            }
            Ok(config)
        } else {
            if log_enabled!(Level::Warn) {
                warn!(
                    "Did not find {}! Generating defaults",
                    config_path.display()
                );
            }
            Ok(Config::generate_config())
        }
    }

    pub fn start_pc(&self) -> u16 {
        self.start_pc.unwrap_or(self.load_address)
    }
}
