//! Architectural Storage Tests.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use r16sim_core::Program;
use r16sim_core::config::MemoryConfig;
use r16sim_core::core::arch::dmem::DataMemory;
use r16sim_core::core::arch::gpr::Gpr;
use r16sim_core::core::arch::imem::InstructionSource;

// ══════════════════════════════════════════════════════════
// 1. Register file
// ══════════════════════════════════════════════════════════

#[test]
fn gpr_write_then_read() {
    let mut regs = Gpr::new();
    regs.write(3, 0xBEEF);
    assert_eq!(regs.read(3), 0xBEEF);
    assert_eq!(regs.read(4), 0);
}

#[test]
fn gpr_r0_and_out_of_range() {
    let mut regs = Gpr::new();
    regs.write(0, 5);
    regs.write(8, 5);
    assert_eq!(regs.read(0), 0);
    assert_eq!(regs.read(8), 0);
    assert_eq!(regs.snapshot(), [0; 8]);
}

#[test]
fn gpr_display_lists_pairs() {
    let mut regs = Gpr::new();
    regs.write(1, 0x10);
    let text = regs.to_string();
    assert_eq!(text.lines().count(), 4);
    assert!(text.starts_with("r0 =0x0000 r1 =0x0010"), "{text}");
}

proptest! {
    #[test]
    fn r0_reads_zero_after_any_writes(writes in prop::collection::vec((0_usize..8, any::<u16>()), 0..64)) {
        let mut regs = Gpr::new();
        for (idx, value) in writes {
            regs.write(idx, value);
            prop_assert_eq!(regs.read(0), 0);
        }
    }
}

// ══════════════════════════════════════════════════════════
// 2. Data memory
// ══════════════════════════════════════════════════════════

#[test]
fn dmem_out_of_range_policy() {
    let mut mem = DataMemory::new(4, 0xDEAD);
    mem.write(3, 1);
    mem.write(4, 2);
    assert_eq!(mem.read(3), 1);
    assert_eq!(mem.read(4), 0xDEAD);
    assert!(mem.contains(3));
    assert!(!mem.contains(4));
    assert_eq!(mem.words(), &[0, 0, 0, 1]);
}

#[test]
fn dmem_load_clips_at_end() {
    let mut mem = DataMemory::new(4, 0);
    mem.load(2, &[7, 8, 9]);
    assert_eq!(mem.words(), &[0, 0, 7, 8]);
}

#[test]
fn dmem_from_config() {
    let config = MemoryConfig {
        data_words: 16,
        read_default: 0xFFFF,
        ..MemoryConfig::default()
    };
    let mem = DataMemory::from_config(&config);
    assert_eq!(mem.len(), 16);
    assert_eq!(mem.read(100), 0xFFFF);
}

// ══════════════════════════════════════════════════════════
// 3. Program image
// ══════════════════════════════════════════════════════════

#[test]
fn program_fetch_ends_at_image_end() {
    let program = Program::new(vec![0x1111, 0x2222]);
    assert_eq!(program.fetch(1), Some(0x2222));
    assert_eq!(program.fetch(2), None);
    assert_eq!(program.words().fetch(0), Some(0x1111));
}
