//! Two-phase tick tests.

use pretty_assertions::assert_eq;

use r16sim_core::common::{Effect, Retirement};
use r16sim_core::core::pipeline::hazards::Stage;
use r16sim_core::core::pipeline::redirect::Redirect;
use r16sim_core::core::pipeline::stages::StagedWrite;
use r16sim_core::{Config, Cpu, Program};

use crate::common::builder::instruction::*;
use crate::common::harness::TestContext;

#[test]
fn next_state_does_not_mutate() {
    let program = Program::from_instructions(&[addi(1, 0, 3), add(2, 1, 1)]);
    let mut cpu = Cpu::new(&Config::default());
    for _ in 0..3 {
        let _ = cpu.tick(&program);
    }
    let state = cpu.state;
    let regs = cpu.regs.clone();

    let first = cpu.next_state(&program);
    let second = cpu.next_state(&program);

    assert_eq!(first, second);
    assert_eq!(cpu.state, state);
    assert_eq!(cpu.regs, regs);
    assert_eq!(cpu.stats.cycles, 3);
}

#[test]
fn commit_installs_the_computed_state() {
    let program = Program::from_instructions(&[addi(1, 0, 3)]);
    let mut cpu = Cpu::new(&Config::default());
    for _ in 0..3 {
        let _ = cpu.tick(&program);
    }

    let next = cpu.next_state(&program);
    assert_eq!(next.write, StagedWrite::Register { index: 1, value: 3 });
    assert_eq!(next.retired, None);

    let retired = cpu.commit(next);
    assert_eq!(retired, None);
    assert_eq!(cpu.state, next.state);
    assert_eq!(cpu.regs.read(1), 3);
}

#[test]
fn retirement_one_tick_after_the_write() {
    let program = Program::from_instructions(&[addi(1, 0, 3)]);
    let mut cpu = Cpu::new(&Config::default());

    let retired: Vec<Option<Retirement>> = (0..5).map(|_| cpu.tick(&program)).collect();

    assert_eq!(&retired[..4], &[None; 4]);
    assert_eq!(
        retired[4],
        Some(Retirement {
            pc: 0,
            word: addi(1, 0, 3).encode(),
            effect: Effect::Register { index: 1, value: 3 },
        })
    );
    assert!(cpu.is_drained(&program));
}

#[test]
fn decisions_are_reported() {
    let program = Program::from_instructions(&[beq(0, 0, 1), nop(), nop()]);
    let mut cpu = Cpu::new(&Config::default());

    let first = cpu.next_state(&program);
    assert!(first.fetched);
    assert!(!first.stalls.any());
    let _ = cpu.commit(first);

    let second = cpu.next_state(&program);
    assert!(!second.fetched);
    assert!(second.stalls.local(Stage::Fetch));
    let _ = cpu.commit(second);

    let third = cpu.next_state(&program);
    assert!(third.stalls.local(Stage::Decode));
    assert!(third.stalls.effective(Stage::Fetch));
    let _ = cpu.commit(third);

    let fourth = cpu.next_state(&program);
    assert_eq!(
        fourth.redirect,
        Some(Redirect::Branch {
            target: 2,
            taken: true
        })
    );
    assert_eq!(fourth.state.pc, 3);
}

#[test]
fn out_of_range_store_is_dropped_and_counted() {
    let ctx = TestContext::new()
        .program(&[addi(1, 0, 7), sw(1, 0, 20), lw(2, 0, 20)])
        .data_words(16, 0xBEEF);

    let (sim, _) = ctx.run();

    assert_eq!(sim.stats().dropped_stores, 1);
    assert_eq!(sim.reg(2), 0xBEEF);
    assert_eq!(
        sim.retirements()[1].effect,
        Effect::Memory {
            address: 20,
            value: 7
        }
    );
    let _ = ctx.verify();
}

#[test]
fn out_of_range_load_reads_default() {
    let ctx = TestContext::new()
        .program(&[lw(1, 0, 63)])
        .data_words(8, 0x1234);

    let (sim, _) = ctx.run();

    assert_eq!(sim.reg(1), 0x1234);
    assert_eq!(sim.stats().dropped_stores, 0);
}

#[test]
fn start_pc_is_honoured() {
    let mut ctx = TestContext::new().program(&[addi(1, 0, 1), addi(2, 0, 2)]);
    ctx.config.general.start_pc = 1;

    let (sim, ticks) = ctx.run();

    assert_eq!(sim.reg(1), 0);
    assert_eq!(sim.reg(2), 2);
    assert_eq!(ticks, 5);
}

#[test]
fn diagram_shows_occupied_slots() {
    let mut sim = TestContext::new()
        .program(&[addi(1, 0, 1), addi(2, 0, 2)])
        .simulator();
    sim.run(2);

    assert_eq!(
        sim.cpu().pipeline_diagram(),
        "pc=0x0002 | IF 0x0001 | ID 0x0000 | EX ------ | MEM ------ | WB ------"
    );
    assert_eq!(sim.cpu().state.occupancy(), 2);
}

#[test]
fn diagram_columns_follow_stage_order() {
    let mut sim = TestContext::new().program(&[nop(); 6]).simulator();
    sim.run(5);

    let diagram = sim.cpu().pipeline_diagram();
    let columns: Vec<&str> = diagram
        .split(" | ")
        .skip(1)
        .map(|col| col.split(' ').next().unwrap_or_default())
        .collect();
    let names: Vec<String> = Stage::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(columns, names);
    assert!(diagram.ends_with("WB 0x0000"));
}
