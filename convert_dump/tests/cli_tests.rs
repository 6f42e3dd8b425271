use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const CODE: &str = "\
0200 00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f
0210 10 11 12 13 14 15 16 17 18 19 1a 1b 1c 1d 1e 1f
";

const SYMBOLS: &str = "\
ZERO 0x10
one 0x2
Two 0x2
";

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_convert_dump"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run convert_dump")
}

fn workspace(code: &str, symbols: &str) -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    fs::write(tmp.path().join("code.txt"), code).expect("failed to write code.txt");
    fs::write(tmp.path().join("symbols.txt"), symbols).expect("failed to write symbols.txt");
    tmp
}

#[test]
fn converts_default_files() {
    let tmp = workspace(CODE, SYMBOLS);
    let output = run_in(tmp.path(), &[]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, \n\
         0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, \n\
         0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, \n\
         0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, \n\
         0x0002: \"one\",\n\
         0x0002: \"two\",\n\
         0x0010: \"zero\",\n"
    );
}

#[test]
fn strict_gap_aborts_without_output() {
    let tmp = workspace("0200 01\n0230 02\n", SYMBOLS);
    let output = run_in(tmp.path(), &[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR:"), "stderr: {stderr}");
    assert!(stderr.contains("expected 0210"), "stderr: {stderr}");
}

#[test]
fn lenient_gap_reports_and_continues() {
    let tmp = workspace("0200 01\n0230 02\n", "start 0200\n");
    let output = run_in(tmp.path(), &["--lenient"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "0230 != 0210\n0x0200: \"start\",\n"
    );
}

#[test]
fn malformed_symbol_emits_no_symbol_lines() {
    let tmp = workspace("0200 ff\n", "start 0200\nloop 0210 extra\n");
    let output = run_in(tmp.path(), &[]);
    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0xff, \n");
}

#[test]
fn missing_code_file() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let output = run_in(tmp.path(), &[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("code.txt"), "stderr: {stderr}");
}

#[test]
fn explicit_paths_base_and_wrap() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    fs::write(tmp.path().join("rom.txt"), "1000 aa bb\n").expect("failed to write rom.txt");
    fs::write(tmp.path().join("labels.txt"), "Main 1000\n").expect("failed to write labels.txt");
    let output = run_in(
        tmp.path(),
        &[
            "--code",
            "rom.txt",
            "--symbols",
            "labels.txt",
            "--base",
            "0x1000",
            "--wrap",
        ],
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "code := []byte{\n0xaa, 0xbb, \n}\n\
         symbols := SymbolTable{\n0x1000: \"main\",\n}\n"
    );
}

#[test]
fn rejects_oversized_base() {
    let tmp = workspace(CODE, SYMBOLS);
    let output = run_in(tmp.path(), &["--base", "10000"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
