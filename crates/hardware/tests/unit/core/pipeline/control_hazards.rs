//! Control Hazard Tests.
//!
//! A jump costs one fetch bubble and redirects from decode; a branch costs a
//! fetch bubble and a decode bubble and redirects from execute. Neither
//! fetches down the wrong path.

use pretty_assertions::assert_eq;

use r16sim_core::Config;
use r16sim_core::core::pipeline::redirect::Redirect;
use r16sim_core::sim::Simulator;

use crate::common::builder::instruction::*;
use crate::common::harness::TestContext;
use crate::common::mocks::rom::guarded_rom;

#[test]
fn jump_costs_one_bubble() {
    let program = ProgramBuilder::new()
        .push(&[jalr(1, 2)])
        .at(100, &[addi(3, 0, 5)])
        .build();
    let ctx = TestContext::new().image(program).reg(2, 100);

    let (sim, ticks) = ctx.run();
    let stats = sim.stats();

    assert_eq!(sim.reg(1), 1);
    assert_eq!(sim.reg(3), 5);
    assert_eq!(ticks, 7);
    assert_eq!(stats.bubbles_fetch, 1);
    assert_eq!(stats.bubbles_decode, 0);
    assert_eq!(stats.inst_jump, 1);
    assert_eq!(stats.instructions_fetched, 2);
    assert_eq!(sim.cpu().pc(), 101);
    let _ = ctx.verify();
}

#[test]
fn jump_never_fetches_fall_through() {
    let program = ProgramBuilder::new()
        .push(&[jalr(1, 2)])
        .at(100, &[addi(3, 0, 5)])
        .build();
    let rom = guarded_rom(program.words().to_vec(), vec![1]);

    let mut sim = Simulator::new(&Config::default(), rom);
    sim.set_reg(2, 100);
    let ticks = sim.run_until_drained().expect("drains");

    assert_eq!(ticks, 7);
    assert_eq!(sim.reg(3), 5);
}

#[test]
fn jump_target_is_forwarded() {
    // The target register is written by the instruction right before the jump.
    let program = ProgramBuilder::new()
        .push(&[addi(2, 0, 20), jalr(7, 2)])
        .at(20, &[addi(3, 7, 0)])
        .build();
    let ctx = TestContext::new().image(program);

    let (sim, _) = ctx.run();

    assert_eq!(sim.reg(7), 2);
    assert_eq!(sim.reg(3), 2);
    assert_eq!(sim.stats().forwards_execute, 1);
    let _ = ctx.verify();
}

#[test]
fn taken_branch_costs_two_bubbles() {
    let ctx = TestContext::new().program(&[
        beq(0, 0, 3),
        addi(1, 0, 1),
        addi(1, 0, 2),
        addi(1, 0, 3),
        addi(2, 0, 9),
    ]);

    let (sim, ticks) = ctx.run();
    let stats = sim.stats();

    assert_eq!(sim.reg(1), 0);
    assert_eq!(sim.reg(2), 9);
    assert_eq!(ticks, 8);
    assert_eq!(stats.bubbles_fetch, 1);
    assert_eq!(stats.bubbles_decode, 1);
    assert_eq!(stats.freeze_cycles, 1);
    assert_eq!(stats.stall_bubbles(), 2);
    assert_eq!(stats.branches_taken, 1);
    assert_eq!(stats.branches_not_taken, 0);
    assert_eq!(stats.instructions_retired, 2);
    let _ = ctx.verify();
}

#[test]
fn taken_branch_skips_shadow() {
    let program = ProgramBuilder::new()
        .push(&[beq(0, 0, 3)])
        .at(4, &[addi(2, 0, 9)])
        .build();
    let rom = guarded_rom(program.words().to_vec(), vec![1, 2, 3]);

    let mut sim = Simulator::new(&Config::default(), rom);
    let ticks = sim.run_until_drained().expect("drains");

    assert_eq!(ticks, 8);
    assert_eq!(sim.reg(2), 9);
}

#[test]
fn untaken_branch_falls_through() {
    let ctx = TestContext::new()
        .program(&[beq(1, 0, 3), addi(2, 0, 7)])
        .reg(1, 5);

    let (sim, ticks) = ctx.run();

    assert_eq!(sim.reg(2), 7);
    assert_eq!(ticks, 8);
    assert_eq!(sim.stats().branches_not_taken, 1);
    assert_eq!(sim.stats().stall_bubbles(), 2);
    let _ = ctx.verify();
}

#[test]
fn backward_branch_loop() {
    // r1 counts down from 3; r2 accumulates one per iteration.
    let ctx = TestContext::new().program(&[
        addi(1, 0, 3),
        addi(2, 2, 1),
        addi(1, 1, -1),
        beq(1, 0, 1),
        beq(0, 0, -4),
        sw(2, 0, 0),
    ]);

    let (sim, _) = ctx.run();

    assert_eq!(sim.reg(2), 3);
    assert_eq!(sim.mem(0), 3);
    assert_eq!(sim.stats().branches_taken, 3);
    assert_eq!(sim.stats().branches_not_taken, 2);
    let _ = ctx.verify();
}

#[test]
fn branch_compares_forwarded_operands() {
    let ctx = TestContext::new().program(&[
        addi(1, 0, 4),
        addi(2, 0, 4),
        beq(1, 2, 1),
        addi(3, 0, 1),
        addi(4, 0, 1),
    ]);

    let (sim, _) = ctx.run();

    assert_eq!(sim.reg(3), 0);
    assert_eq!(sim.reg(4), 1);
    assert_eq!(sim.stats().branches_taken, 1);
}

#[test]
fn branch_target_wraps_below_zero() {
    let ctx = TestContext::new().program(&[beq(0, 0, -2)]);

    let mut sim = ctx.simulator();
    sim.run(4);
    assert_eq!(sim.cpu().pc(), 0xFFFF);
    assert_eq!(
        Redirect::Branch {
            target: 0xFFFF,
            taken: true
        }
        .target(),
        sim.cpu().pc()
    );

    // Nothing lives at 0xFFFF, so the pipeline drains behind the branch.
    let ticks = sim.run_until_drained().expect("drains");
    assert_eq!(ticks, 1);
    assert_eq!(sim.stats().branches_taken, 1);
}
