use utilities::test_program;

test_program!(
    (
        and_imm,
        [0x29, 0x0F],
        |cpu| cpu.regs.acc = 0xF3,
        1,
        2,
        |cpu| assert_eq!(cpu.regs.acc, 0x03)
    ),
    (
        ora_imm,
        [0x09, 0x80],
        |cpu| cpu.regs.acc = 0x01,
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.acc, 0x81);
            assert!(cpu.regs.flags.negative());
        }
    ),
    (
        eor_imm,
        [0x49, 0xFF],
        |cpu| cpu.regs.acc = 0xFF,
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.acc, 0);
            assert!(cpu.regs.flags.zero());
        }
    ),
    (
        bit_zp_copies_high_bits,
        [0x24, 0x10],
        |cpu| {
            cpu.regs.acc = 0x01;
            cpu.mmu.mem[0x10] = 0xC0;
        },
        1,
        3,
        |cpu| {
            assert!(cpu.regs.flags.zero());
            assert!(cpu.regs.flags.overflow());
            assert!(cpu.regs.flags.negative());
            assert_eq!(cpu.regs.acc, 0x01);
        }
    ),
    (
        bit_abs,
        [0x2C, 0x00, 0x20],
        |cpu| {
            cpu.regs.acc = 0x01;
            cpu.mmu.mem[0x2000] = 0x01;
        },
        1,
        4,
        |cpu| {
            assert!(!cpu.regs.flags.zero());
            assert!(!cpu.regs.flags.overflow());
            assert!(!cpu.regs.flags.negative());
        }
    ),
    (
        asl_acc,
        [0x0A],
        |cpu| cpu.regs.acc = 0x81,
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.acc, 0x02);
            assert!(cpu.regs.flags.carry());
        }
    ),
    (
        asl_zp,
        [0x06, 0x10],
        |cpu| cpu.mmu.mem[0x10] = 0x40,
        1,
        5,
        |cpu| {
            assert_eq!(cpu.mmu.mem[0x10], 0x80);
            assert!(cpu.regs.flags.negative());
            assert!(!cpu.regs.flags.carry());
        }
    ),
    (
        lsr_acc,
        [0x4A],
        |cpu| cpu.regs.acc = 0x01,
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.acc, 0);
            assert!(cpu.regs.flags.zero());
            assert!(cpu.regs.flags.carry());
        }
    ),
    (
        lsr_abs,
        [0x4E, 0x00, 0x20],
        |cpu| cpu.mmu.mem[0x2000] = 0x02,
        1,
        6,
        |cpu| {
            assert_eq!(cpu.mmu.mem[0x2000], 0x01);
            assert!(!cpu.regs.flags.carry());
        }
    ),
    (
        rol_acc_rotates_carry_in,
        [0x2A],
        |cpu| {
            cpu.regs.acc = 0x80;
            cpu.regs.flags.set_carry(true);
        },
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.acc, 0x01);
            assert!(cpu.regs.flags.carry());
        }
    ),
    (
        ror_acc_rotates_carry_in,
        [0x6A],
        |cpu| {
            cpu.regs.acc = 0x01;
            cpu.regs.flags.set_carry(true);
        },
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.acc, 0x80);
            assert!(cpu.regs.flags.carry());
            assert!(cpu.regs.flags.negative());
        }
    ),
    (
        ror_zp_x,
        [0x76, 0x10],
        |cpu| {
            cpu.regs.x = 1;
            cpu.mmu.mem[0x11] = 0x02;
        },
        1,
        6,
        |cpu| assert_eq!(cpu.mmu.mem[0x11], 0x01)
    ),
    (
        rol_abs_x,
        [0x3E, 0x00, 0x20],
        |cpu| {
            cpu.regs.x = 1;
            cpu.mmu.mem[0x2001] = 0x40;
        },
        1,
        7,
        |cpu| assert_eq!(cpu.mmu.mem[0x2001], 0x80)
    ),
);
