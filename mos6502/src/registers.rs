use bitfield::bitfield;
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

pub const INITIAL_SP: u8 = 0xFD;
const INITIAL_FLAGS: u8 = 0b0010_0100;

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Registers {
    pub acc: u8,
    pub x: u8,
    pub y: u8,
    pub pc: ProgramCounter,
    pub sp: u8,
    pub flags: Flags,
}

impl fmt::Debug for Registers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} A:{:02X} X:{:02X} Y:{:02X} Flags:{:02X} SP:{:02X}",
            self.pc,
            self.acc,
            self.x,
            self.y,
            self.flags.as_byte(),
            self.sp
        )
    }
}

impl Default for Registers {
    fn default() -> Registers {
        Registers {
            acc: 0,
            x: 0,
            y: 0,
            pc: ProgramCounter::new(0),
            sp: INITIAL_SP,
            flags: Flags(INITIAL_FLAGS),
        }
    }
}

impl Registers {
    pub fn set_zero_neg(&mut self, val: u8) {
        self.flags.set_negative(val & 0x80 != 0);
        self.flags.set_zero(val == 0);
    }

    /// Sets V for `acc + operand` producing `result`, then N and Z from
    /// `result`. Must run before the accumulator is overwritten.
    pub fn set_zero_neg_overflow(&mut self, operand: u8, result: u8) {
        let same_sign = (self.acc ^ operand) & 0x80 == 0;
        let result_differs = (operand ^ result) & 0x80 != 0;
        self.flags.set_overflow(same_sign && result_differs);
        self.set_zero_neg(result);
    }

    /// Status register as it appears on the stack: `N V 1 B D I Z C`.
    pub fn status_byte(&self) -> u8 {
        self.flags.as_byte() | 0b0010_0000
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ProgramCounter(u16);

impl ProgramCounter {
    pub fn new(val: u16) -> ProgramCounter {
        ProgramCounter(val)
    }

    pub fn add_unsigned(&mut self, offset: u16) {
        self.0 = self.0.wrapping_add(offset);
    }

    pub fn add_signed(&mut self, offset: i8) {
        self.0 = self.0.wrapping_add_signed(offset as i16);
    }

    pub fn set_addr(&mut self, addr: u16) {
        self.0 = addr;
    }

    pub fn get_addr(&self) -> u16 {
        self.0
    }
}

impl fmt::Debug for ProgramCounter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PC:{:04X}", self.0)
    }
}

bitfield! {
    #[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
    pub struct Flags(u8);
    impl Debug;
    pub carry, set_carry:                           0;
    pub zero, set_zero:                             1;
    pub interrupt_disable, set_interrupt_disable:   2;
    pub decimal_mode, set_decimal_mode:             3;
    pub software_interrupt, set_software_interrupt: 4;
    pub unused, set_unused:                         5;
    pub overflow, set_overflow:                     6;
    pub negative, set_negative:                     7;
    pub u8, as_byte, set_byte:                      7, 0;
}
