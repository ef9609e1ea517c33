use crate::addressing::Operand;
use crate::cpu::Cpu;
use crate::memory::Memory;
use crate::memory::MemoryError;
use crate::opcodes::Instruction;
use crate::opcodes::BRK_VECTOR;

const BREAK_BIT: u8 = 0b0001_0000;

impl<M: Memory> Cpu<M> {
    /// Runs one decoded instruction against its resolved operand. Returns
    /// the cycles earned on top of the table cost, which only taken
    /// branches produce.
    pub(crate) fn execute(
        &mut self,
        instruction: Instruction,
        operand: Operand,
    ) -> Result<u8, MemoryError> {
        use crate::opcodes::Instruction::*;

        let mut extra = 0;
        match instruction {
            Lda => {
                let val = self.value(operand)?;
                self.lda(val);
            }
            Ldx => {
                let val = self.value(operand)?;
                self.ldx(val);
            }
            Ldy => {
                let val = self.value(operand)?;
                self.ldy(val);
            }
            Sta => self.store(operand.address(), self.regs.acc)?,
            Stx => self.store(operand.address(), self.regs.x)?,
            Sty => self.store(operand.address(), self.regs.y)?,
            Tax => self.tax(),
            Tay => {
                self.regs.y = self.regs.acc;
                self.regs.set_zero_neg(self.regs.y);
            }
            Txa => {
                self.regs.acc = self.regs.x;
                self.regs.set_zero_neg(self.regs.acc);
            }
            Tya => {
                self.regs.acc = self.regs.y;
                self.regs.set_zero_neg(self.regs.acc);
            }
            Tsx => {
                self.regs.x = self.regs.sp;
                self.regs.set_zero_neg(self.regs.x);
            }
            Txs => self.regs.sp = self.regs.x,
            Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.set_zero_neg(self.regs.x);
            }
            Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.set_zero_neg(self.regs.y);
            }
            Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.set_zero_neg(self.regs.x);
            }
            Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.set_zero_neg(self.regs.y);
            }
            Inc => {
                self.modify(operand, Self::inc_val)?;
            }
            Dec => {
                self.modify(operand, Self::dec_val)?;
            }
            Adc => {
                let val = self.value(operand)?;
                self.adc(val);
            }
            Sbc => {
                let val = self.value(operand)?;
                self.sbc(val);
            }
            And => {
                let val = self.value(operand)?;
                self.and(val);
            }
            Ora => {
                let val = self.value(operand)?;
                self.ora(val);
            }
            Eor => {
                let val = self.value(operand)?;
                self.eor(val);
            }
            Bit => {
                let val = self.value(operand)?;
                self.bit(val);
            }
            Asl => {
                self.modify(operand, Self::asl_val)?;
            }
            Lsr => {
                self.modify(operand, Self::lsr_val)?;
            }
            Rol => {
                self.modify(operand, Self::rol_val)?;
            }
            Ror => {
                self.modify(operand, Self::ror_val)?;
            }
            Cmp => {
                let val = self.value(operand)?;
                self.compare(self.regs.acc, val);
            }
            Cpx => {
                let val = self.value(operand)?;
                self.compare(self.regs.x, val);
            }
            Cpy => {
                let val = self.value(operand)?;
                self.compare(self.regs.y, val);
            }
            Bpl => extra = self.branch(!self.regs.flags.negative(), operand),
            Bmi => extra = self.branch(self.regs.flags.negative(), operand),
            Bvc => extra = self.branch(!self.regs.flags.overflow(), operand),
            Bvs => extra = self.branch(self.regs.flags.overflow(), operand),
            Bcc => extra = self.branch(!self.regs.flags.carry(), operand),
            Bcs => extra = self.branch(self.regs.flags.carry(), operand),
            Bne => extra = self.branch(!self.regs.flags.zero(), operand),
            Beq => extra = self.branch(self.regs.flags.zero(), operand),
            Jmp => self.regs.pc.set_addr(operand.address()),
            Jsr => self.jsr(operand.address())?,
            Rts => {
                self.pull_pc()?;
                self.regs.pc.add_unsigned(1);
            }
            Rti => {
                self.pull_status()?;
                self.pull_pc()?;
            }
            Pha => self.push(self.regs.acc)?,
            Php => self.push(self.regs.status_byte() | BREAK_BIT)?,
            Pla => {
                let acc = self.pop()?;
                self.regs.acc = acc;
                self.regs.set_zero_neg(acc);
            }
            Plp => self.pull_status()?,
            Clc => self.regs.flags.set_carry(false),
            Sec => self.regs.flags.set_carry(true),
            Cli => self.regs.flags.set_interrupt_disable(false),
            Sei => self.regs.flags.set_interrupt_disable(true),
            Clv => self.regs.flags.set_overflow(false),
            Cld => self.regs.flags.set_decimal_mode(false),
            Sed => self.regs.flags.set_decimal_mode(true),
            Brk => self.brk()?,
            Nop => (),
            // Unstable stores leave memory untouched.
            Sha | Shx | Shy | Tas => (),
            Slo => {
                let val = self.modify(operand, Self::asl_val)?;
                self.ora(val);
            }
            Rla => {
                let val = self.modify(operand, Self::rol_val)?;
                self.and(val);
            }
            Sre => {
                let val = self.modify(operand, Self::lsr_val)?;
                self.eor(val);
            }
            Rra => {
                let val = self.modify(operand, Self::ror_val)?;
                self.adc(val);
            }
            Dcp => {
                let val = self.modify(operand, Self::dec_val)?;
                self.compare(self.regs.acc, val);
            }
            Isb => {
                let val = self.modify(operand, Self::inc_val)?;
                self.sbc(val);
            }
            Sax => self.store(operand.address(), self.regs.acc & self.regs.x)?,
            Lax => {
                let val = self.value(operand)?;
                self.lda(val);
                self.tax();
            }
            Anc => {
                let val = self.value(operand)?;
                self.and(val);
                self.regs.flags.set_carry(self.regs.flags.negative());
            }
            Alr => {
                let val = self.value(operand)?;
                self.and(val);
                self.modify(Operand::None, Self::lsr_val)?;
            }
            Arr => {
                let val = self.value(operand)?;
                self.and(val);
                let acc = self.modify(Operand::None, Self::ror_val)?;
                let b5 = (acc >> 5) & 1 == 1;
                let b6 = (acc >> 6) & 1 == 1;
                self.regs.flags.set_carry(b6);
                self.regs.flags.set_overflow(b5 ^ b6);
            }
            Axs => {
                let val = self.value(operand)?;
                let masked = self.regs.acc & self.regs.x;
                self.compare(masked, val);
                self.regs.x = masked.wrapping_sub(val);
            }
        }
        Ok(extra)
    }

    fn value(&mut self, operand: Operand) -> Result<u8, MemoryError> {
        match operand {
            Operand::Value(val) => Ok(val),
            Operand::Address(addr) => self.mmu.ld8(addr),
            Operand::None => Ok(self.regs.acc),
        }
    }

    /// Read-modify-write through memory, or on the accumulator when the
    /// instruction has no memory operand. Returns the written value.
    fn modify(
        &mut self,
        operand: Operand,
        op: fn(&mut Self, u8) -> u8,
    ) -> Result<u8, MemoryError> {
        match operand {
            Operand::Address(addr) => {
                let val = self.mmu.ld8(addr)?;
                let tmp = op(self, val);
                self.store(addr, tmp)?;
                Ok(tmp)
            }
            Operand::Value(_) | Operand::None => {
                let acc = self.regs.acc;
                let tmp = op(self, acc);
                self.regs.acc = tmp;
                Ok(tmp)
            }
        }
    }

    fn lda(&mut self, val: u8) {
        self.regs.acc = val;
        self.regs.set_zero_neg(val);
    }

    fn ldx(&mut self, val: u8) {
        self.regs.x = val;
        self.regs.set_zero_neg(val);
    }

    fn ldy(&mut self, val: u8) {
        self.regs.y = val;
        self.regs.set_zero_neg(val);
    }

    fn tax(&mut self) {
        self.regs.x = self.regs.acc;
        self.regs.set_zero_neg(self.regs.x);
    }

    fn and(&mut self, val: u8) {
        self.lda(self.regs.acc & val);
    }

    fn ora(&mut self, val: u8) {
        self.lda(self.regs.acc | val);
    }

    fn eor(&mut self, val: u8) {
        self.lda(self.regs.acc ^ val);
    }

    fn adc(&mut self, val: u8) {
        let tmp = self.regs.acc as u16 + val as u16 + self.regs.flags.carry() as u16;
        self.regs.set_zero_neg_overflow(val, tmp as u8);
        self.regs.flags.set_carry(tmp > 0xFF);
        self.regs.acc = tmp as u8;
    }

    fn sbc(&mut self, val: u8) {
        let acc = self.regs.acc;
        let borrow = !self.regs.flags.carry() as i16;
        let tmp = acc as i16 - val as i16 - borrow;
        let signs_differ = (acc ^ val) & 0x80 != 0;
        let result_differs = (acc ^ tmp as u8) & 0x80 != 0;
        self.regs.flags.set_overflow(signs_differ && result_differs);
        self.regs.flags.set_carry(tmp >= 0);
        self.lda(tmp as u8);
    }

    fn compare(&mut self, reg: u8, val: u8) {
        let tmp = reg as i16 - val as i16;
        self.regs.flags.set_carry(tmp >= 0);
        self.regs.set_zero_neg(tmp as u8);
    }

    fn bit(&mut self, val: u8) {
        self.regs.flags.set_zero(val & self.regs.acc == 0);
        self.regs.flags.set_overflow(val & 0x40 != 0);
        self.regs.flags.set_negative(val & 0x80 != 0);
    }

    fn inc_val(&mut self, val: u8) -> u8 {
        let tmp = val.wrapping_add(1);
        self.regs.set_zero_neg(tmp);
        tmp
    }

    fn dec_val(&mut self, val: u8) -> u8 {
        let tmp = val.wrapping_sub(1);
        self.regs.set_zero_neg(tmp);
        tmp
    }

    fn asl_val(&mut self, val: u8) -> u8 {
        self.regs.flags.set_carry(val & 0x80 != 0);
        let tmp = val << 1;
        self.regs.set_zero_neg(tmp);
        tmp
    }

    fn lsr_val(&mut self, val: u8) -> u8 {
        self.regs.flags.set_carry(val & 0x01 != 0);
        let tmp = val >> 1;
        self.regs.set_zero_neg(tmp);
        tmp
    }

    fn rol_val(&mut self, val: u8) -> u8 {
        let tmp = (val << 1) | self.regs.flags.carry() as u8;
        self.regs.flags.set_carry(val & 0x80 != 0);
        self.regs.set_zero_neg(tmp);
        tmp
    }

    fn ror_val(&mut self, val: u8) -> u8 {
        let tmp = (val >> 1) | ((self.regs.flags.carry() as u8) << 7);
        self.regs.flags.set_carry(val & 0x01 != 0);
        self.regs.set_zero_neg(tmp);
        tmp
    }

    fn branch(&mut self, condition: bool, operand: Operand) -> u8 {
        if !condition {
            return 0;
        }
        let offset = match operand {
            Operand::Value(val) => val as i8,
            other => unreachable!("branch decoded with operand {:?}", other),
        };
        let addr = self.regs.pc.get_addr();
        self.regs.pc.add_signed(offset);
        let new_addr = self.regs.pc.get_addr();
        if (addr & 0xFF00) != (new_addr & 0xFF00) {
            2
        } else {
            1
        }
    }

    fn jsr(&mut self, addr: u16) -> Result<(), MemoryError> {
        self.regs.pc.add_signed(-1);
        self.push_pc()?;
        self.regs.pc.set_addr(addr);
        Ok(())
    }

    fn brk(&mut self) -> Result<(), MemoryError> {
        // Skip the padding byte that follows BRK.
        self.regs.pc.add_unsigned(1);
        self.push_pc()?;
        self.push(self.regs.status_byte() | BREAK_BIT)?;
        self.regs.flags.set_interrupt_disable(true);
        let vector = self.mmu.ld16(BRK_VECTOR)?;
        self.regs.pc.set_addr(vector);
        Ok(())
    }

    fn pull_status(&mut self) -> Result<(), MemoryError> {
        let tmp = self.pop()?;
        self.regs.flags.set_byte(tmp);
        self.regs.flags.set_unused(true);
        self.regs.flags.set_software_interrupt(false);
        Ok(())
    }
}

impl Operand {
    /// Effective address of a store, read-modify-write or jump. The decode
    /// tables only pair those instructions with memory addressing modes.
    fn address(self) -> u16 {
        match self {
            Operand::Address(addr) => addr,
            other => unreachable!("expected an effective address, got {:?}", other),
        }
    }
}
