//! Program loader tests.

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::{NamedTempFile, TempDir};

use r16sim_core::common::{AsmError, LoadError};
use r16sim_core::sim::load_program;
use r16sim_core::sim::loader::parse_image;

fn file_with(suffix: &str, text: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp file");
    file.write_all(text.as_bytes()).expect("write");
    file
}

#[test]
fn hex_image() {
    let file = file_with(".hex", "# two words\n0x2581\n\na400\n");
    let program = load_program(file.path()).expect("loads");
    assert_eq!(program.words(), &[0x2581, 0xA400]);
}

#[test]
fn assembly_by_extension() {
    for suffix in [".s", ".asm", ".S"] {
        let file = file_with(suffix, "lw r1, r0, 0\nadd r2, r1, r1\n");
        let program = load_program(file.path()).expect("assembles");
        assert_eq!(program.words(), &[0xA400, 0x0881], "{suffix}");
    }
}

#[test]
fn assembly_errors_pass_through() {
    let file = file_with(".s", "nop\nbogus r1\n");
    let err = load_program(file.path()).unwrap_err();
    assert!(
        matches!(err, LoadError::Asm(AsmError::UnknownMnemonic { line: 2, .. })),
        "{err:?}"
    );
}

#[test]
fn missing_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.hex");

    let err = load_program(&path).unwrap_err();

    assert!(matches!(&err, LoadError::Io { path: p, .. } if p == &path), "{err:?}");
    assert!(err.to_string().contains("absent.hex"));
}

#[test]
fn empty_sources_are_rejected() {
    let hex = file_with(".hex", "# nothing here\n\n");
    assert!(matches!(load_program(hex.path()), Err(LoadError::Empty)));

    let asm = file_with(".s", "; only a comment\nlabel:\n");
    assert!(matches!(load_program(asm.path()), Err(LoadError::Empty)));
}

#[test]
fn malformed_words_report_their_line() {
    let err = parse_image("0000\n\n  zz  \n").unwrap_err();
    assert!(
        matches!(&err, LoadError::BadWord { line: 3, token } if token == "zz"),
        "{err:?}"
    );

    let err = parse_image("0x10000").unwrap_err();
    assert!(matches!(err, LoadError::BadWord { line: 1, .. }), "{err:?}");
}

#[test]
fn image_accepts_upper_and_lower_case() {
    assert_eq!(parse_image("0XFFFF\nbeef\n").expect("parses"), vec![0xFFFF, 0xBEEF]);
}

#[test]
fn bundled_demo_runs() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/sum.s");
    let program = load_program(&path).expect("demo loads");

    let report = crate::common::harness::TestContext::new()
        .image(program)
        .verify();

    assert_eq!(report.regs[2], 55);
    assert_eq!(report.regs[4], 110);
    assert_eq!(report.stats.inst_jump, 20);
}
