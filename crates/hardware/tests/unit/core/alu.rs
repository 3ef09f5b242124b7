//! ALU Tests.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use r16sim_core::core::pipeline::signals::{AluOp, ControlSignals, OpASrc, OpBSrc};
use r16sim_core::core::units::alu::{Alu, AluOutput};
use r16sim_core::isa::Opcode;

#[rstest]
#[case::add(AluOp::Add, 2, 3, 5, false)]
#[case::add_wraps(AluOp::Add, 0xFFFF, 1, 0, false)]
#[case::add_equal(AluOp::Add, 7, 7, 14, true)]
#[case::nand(AluOp::Nand, 0xFF00, 0x0FF0, 0xF0FF, false)]
#[case::nand_self_is_not(AluOp::Nand, 0x1234, 0x1234, 0xEDCB, true)]
#[case::nand_zero(AluOp::Nand, 0, 0, 0xFFFF, true)]
fn computes(
    #[case] op: AluOp,
    #[case] a: u16,
    #[case] b: u16,
    #[case] result: u16,
    #[case] equal: bool,
) {
    assert_eq!(Alu::compute(op, a, b), AluOutput { result, equal });
}

#[test]
fn selector_bit_picks_function() {
    assert_eq!(Alu::compute_sel(0, 1, 2).result, 3);
    assert_eq!(Alu::compute_sel(1, 1, 2).result, 0xFFFF);
    assert_eq!(AluOp::from_selector(AluOp::Nand.selector()), AluOp::Nand);
    assert_eq!(AluOp::from_selector(2), AluOp::Add);
}

#[test]
fn control_signals_per_opcode() {
    let lw = ControlSignals::for_opcode(Opcode::Lw);
    assert!(lw.mem_read && lw.reg_write && !lw.mem_write);
    assert_eq!(lw.b_src, OpBSrc::Imm);

    let sw = ControlSignals::for_opcode(Opcode::Sw);
    assert!(sw.mem_write && !sw.reg_write);

    let jalr = ControlSignals::for_opcode(Opcode::Jalr);
    assert!(jalr.jump && jalr.reg_write);
    assert_eq!((jalr.a_src, jalr.b_src), (OpASrc::Pc, OpBSrc::One));

    let lui = ControlSignals::for_opcode(Opcode::Lui);
    assert_eq!((lui.a_src, lui.b_src), (OpASrc::UpperImm, OpBSrc::Zero));

    assert_eq!(ControlSignals::for_opcode(Opcode::Nand).alu, AluOp::Nand);
    assert!(ControlSignals::for_opcode(Opcode::Beq).branch);
}

proptest! {
    #[test]
    fn equality_flag_matches_operands(a in any::<u16>(), b in any::<u16>()) {
        for op in [AluOp::Add, AluOp::Nand] {
            prop_assert_eq!(Alu::compute(op, a, b).equal, a == b);
        }
        prop_assert_eq!(Alu::compute(AluOp::Add, a, b).result, a.wrapping_add(b));
        prop_assert_eq!(Alu::compute(AluOp::Nand, a, b).result, !(a & b));
    }
}
