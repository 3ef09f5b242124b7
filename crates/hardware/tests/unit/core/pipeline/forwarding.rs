//! Forwarding Network Tests.

use pretty_assertions::assert_eq;

use r16sim_core::core::pipeline::forwarding::{Bypass, ForwardingNetwork, Operand, Producer};
use r16sim_core::core::pipeline::latches::{
    DecodeEntry, ExecuteEntry, MemoryEntry, PipelineState, Slot, WritebackEntry,
};
use r16sim_core::core::pipeline::signals::ControlSignals;
use r16sim_core::core::pipeline::stages::refresh_operands;
use r16sim_core::core::pipeline::traits::ForwardSource;
use r16sim_core::isa::Instruction;

use crate::common::builder::instruction::*;

const fn ready(target: usize, value: u16) -> Option<Producer> {
    Some(Producer {
        target,
        value: Some(value),
    })
}

const fn pending(target: usize) -> Option<Producer> {
    Some(Producer {
        target,
        value: None,
    })
}

fn operand(value: u16, from: Bypass) -> Operand {
    Operand { value, from }
}

#[test]
fn youngest_producer_wins() {
    let all = ForwardingNetwork::new(ready(1, 10), ready(1, 20), ready(1, 30));
    assert_eq!(all.resolve(1, 99), operand(10, Bypass::Execute));

    let older = ForwardingNetwork::new(None, ready(1, 20), ready(1, 30));
    assert_eq!(older.resolve(1, 99), operand(20, Bypass::Memory));

    let oldest = ForwardingNetwork::new(ready(2, 10), None, ready(1, 30));
    assert_eq!(oldest.resolve(1, 99), operand(30, Bypass::Writeback));
}

#[test]
fn unmatched_register_keeps_latched_value() {
    let network = ForwardingNetwork::new(ready(2, 10), ready(3, 20), ready(4, 30));
    assert_eq!(network.resolve(1, 99), operand(99, Bypass::Latched));
    assert_eq!(
        ForwardingNetwork::default().resolve(5, 7),
        operand(7, Bypass::Latched)
    );
}

#[test]
fn register_zero_never_forwards() {
    let network = ForwardingNetwork::new(ready(0, 10), ready(0, 20), None);
    assert_eq!(network.resolve(0, 99), operand(0, Bypass::Zero));
}

#[test]
fn load_in_execute_is_pending_and_shadows_older_results() {
    let network = ForwardingNetwork::new(pending(1), ready(1, 20), None);
    assert_eq!(network.resolve(1, 99), operand(99, Bypass::Pending));
    assert!(!Bypass::Pending.is_forwarded());
    assert!(Bypass::Writeback.is_forwarded());
}

fn execute_entry(inst: Instruction, alu: u16) -> ExecuteEntry {
    ExecuteEntry {
        inst,
        ctrl: ControlSignals::for_opcode(inst.opcode),
        alu,
        ..ExecuteEntry::default()
    }
}

#[test]
fn slots_report_their_producers() {
    assert_eq!(execute_entry(addi(3, 0, 9), 9).producer(), ready(3, 9));
    assert_eq!(execute_entry(lw(3, 0, 9), 9).producer(), pending(3));
    assert_eq!(execute_entry(sw(3, 0, 9), 9).producer(), None);
    assert_eq!(execute_entry(beq(3, 3, 1), 6).producer(), None);
    assert_eq!(execute_entry(addi(0, 0, 9), 9).producer(), None);

    let load = lw(4, 0, 0);
    let memory = MemoryEntry {
        inst: load,
        ctrl: ControlSignals::for_opcode(load.opcode),
        value: 0x1234,
        ..MemoryEntry::default()
    };
    assert_eq!(memory.producer(), ready(4, 0x1234));

    let link = jalr(7, 1);
    let writeback = WritebackEntry {
        inst: link,
        value: 5,
        ..WritebackEntry::default()
    };
    assert_eq!(writeback.producer(), ready(7, 5));
    assert_eq!(Slot::<WritebackEntry>::Bubble.producer(), None);
}

#[test]
fn network_from_state() {
    let state = PipelineState {
        execute: Slot::Busy(execute_entry(add(1, 2, 3), 11)),
        ..PipelineState::default()
    };
    let network = ForwardingNetwork::from_state(&state);
    assert_eq!(network.resolve(1, 0), operand(11, Bypass::Execute));
    assert_eq!(network.resolve(2, 4), operand(4, Bypass::Latched));
}

#[test]
fn frozen_decode_refresh_takes_ready_values_and_keeps_pending_ones() {
    let consumer = add(2, 3, 1);
    let frozen = DecodeEntry {
        pc: 2,
        inst: consumer,
        ctrl: ControlSignals::for_opcode(consumer.opcode),
        rv1: 0,
        rv2: 0,
    };
    // The load into r1 is still in execute; r3 has reached the memory slot.
    let network = ForwardingNetwork::new(pending(1), ready(3, 5), None);

    let refreshed = refresh_operands(&frozen, &network);

    assert_eq!(refreshed.rv1, 5);
    assert_eq!(refreshed.rv2, 0);
    assert_eq!(refreshed.pc, frozen.pc);
    assert_eq!(refreshed.inst, frozen.inst);
}
