use utilities::{test_program, BusOp};

test_program!(
    (
        lda_imm_sets_zero,
        [0xA9, 0x00],
        |cpu| cpu.regs.acc = 0x10,
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.acc, 0);
            assert!(cpu.regs.flags.zero());
            assert!(!cpu.regs.flags.negative());
        }
    ),
    (
        lda_imm_sets_negative,
        [0xA9, 0x80],
        |_cpu| {},
        1,
        2,
        |cpu| {
            assert!(!cpu.regs.flags.zero());
            assert!(cpu.regs.flags.negative());
            assert_eq!(cpu.regs.pc.get_addr(), 0x0602);
        }
    ),
    (
        ldy_abs,
        [0xAC, 0x34, 0x12],
        |cpu| cpu.mmu.mem[0x1234] = 0x01,
        1,
        4,
        |cpu| assert_eq!(cpu.regs.y, 0x01)
    ),
    (
        stx_zp,
        [0x86, 0x10],
        |cpu| cpu.regs.x = 0xAA,
        1,
        3,
        |cpu| assert_eq!(cpu.mmu.mem[0x10], 0xAA)
    ),
    (
        sty_zp_x,
        [0x94, 0x10],
        |cpu| {
            cpu.regs.x = 2;
            cpu.regs.y = 5;
        },
        1,
        4,
        |cpu| assert_eq!(cpu.mmu.mem[0x12], 5)
    ),
    (
        sta_abs_writes_once,
        [0x8D, 0x00, 0x02],
        |cpu| cpu.regs.acc = 0x12,
        1,
        4,
        |cpu| assert_eq!(cpu.mmu.writes(), vec![BusOp::write(0x0200, 0x12)])
    ),
    (
        tax_sets_negative,
        [0xAA],
        |cpu| cpu.regs.acc = 0x80,
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.x, 0x80);
            assert!(cpu.regs.flags.negative());
        }
    ),
    (
        tay_then_tya,
        [0xA8, 0xA9, 0x00, 0x98],
        |cpu| cpu.regs.acc = 0x33,
        3,
        6,
        |cpu| {
            assert_eq!(cpu.regs.y, 0x33);
            assert_eq!(cpu.regs.acc, 0x33);
        }
    ),
    (
        txa,
        [0x8A],
        |cpu| cpu.regs.x = 0,
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.acc, 0);
            assert!(cpu.regs.flags.zero());
        }
    ),
    (
        tsx_copies_stack_pointer,
        [0xBA],
        |_cpu| {},
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.x, 0xFD);
            assert!(cpu.regs.flags.negative());
        }
    ),
    (
        txs_leaves_flags_alone,
        [0x9A],
        |cpu| cpu.regs.x = 0,
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.sp, 0);
            assert!(!cpu.regs.flags.zero());
        }
    ),
    (
        inx_wraps_to_zero,
        [0xE8],
        |cpu| cpu.regs.x = 0xFF,
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.x, 0);
            assert!(cpu.regs.flags.zero());
            assert!(!cpu.regs.flags.carry());
        }
    ),
    (
        dex_wraps_to_ff,
        [0xCA],
        |cpu| cpu.regs.x = 0,
        1,
        2,
        |cpu| {
            assert_eq!(cpu.regs.x, 0xFF);
            assert!(cpu.regs.flags.negative());
        }
    ),
    (
        iny_dey,
        [0xC8, 0xC8, 0x88],
        |cpu| cpu.regs.y = 0x7F,
        3,
        6,
        |cpu| {
            assert_eq!(cpu.regs.y, 0x80);
            assert!(cpu.regs.flags.negative());
        }
    ),
    (
        inc_zp_wraps,
        [0xE6, 0x10],
        |cpu| cpu.mmu.mem[0x10] = 0xFF,
        1,
        5,
        |cpu| {
            assert_eq!(cpu.mmu.mem[0x10], 0);
            assert!(cpu.regs.flags.zero());
        }
    ),
    (
        dec_abs_wraps,
        [0xCE, 0x00, 0x20],
        |_cpu| {},
        1,
        6,
        |cpu| {
            assert_eq!(cpu.mmu.mem[0x2000], 0xFF);
            assert!(cpu.regs.flags.negative());
        }
    ),
);
