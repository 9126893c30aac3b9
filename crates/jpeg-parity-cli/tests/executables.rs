//! Whole-program parity checks against the built `jpeg-parity` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use jpeg_parity::{
    CheckReport, DecodedImage, EncodeOptions, Encoder, EntryOutcome, Error, ExecutableParity,
    JpegEncoder, run_captured,
};

const BIN: &str = env!("CARGO_BIN_EXE_jpeg-parity");

fn write_fixture(dir: &Path, name: &str, width: usize, height: usize) -> PathBuf {
    let data: Vec<u8> = (0..width * height * 3).map(|i| ((i * 13) % 256) as u8).collect();
    let image = DecodedImage::rgb(&data, width, height).unwrap();
    let bytes = JpegEncoder.encode_to_vec(&image, &EncodeOptions { quality: 80 }).unwrap();

    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn dims(decoder: &str, fixture: &Path) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.env_remove("BENCH_FN")
        .env_remove("RUST_LOG")
        .args(["dims", "--decoder", decoder])
        .arg(fixture);
    cmd
}

#[test]
fn test_both_decoders_print_identical_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path(), "600x239.jpg", 600, 239);

    let shared = ExecutableParity::new(dims("std", &fixture), dims("opt", &fixture))
        .check()
        .unwrap();
    assert_eq!(shared.text(), "600x239\n");
    assert!(shared.success());
}

#[test]
fn test_divergent_program_fails_parity() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path(), "a.jpg", 40, 30);
    let other = write_fixture(dir.path(), "b.jpg", 41, 30);

    let err = ExecutableParity::new(dims("std", &fixture), dims("opt", &other))
        .check()
        .unwrap_err();
    match err {
        Error::ProcessFailure { output, .. } => {
            assert!(output.contains("40x30"));
            assert!(output.contains("41x30"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_fixture_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.jpg");

    let out = run_captured(&mut dims("opt", &missing)).unwrap();
    assert!(!out.success());
    assert!(out.text().contains("Failed to open"));

    let err = ExecutableParity::new(dims("std", &missing), dims("opt", &missing))
        .check()
        .unwrap_err();
    assert!(matches!(err, Error::ProcessFailure { .. }));
}

#[test]
fn test_undecodable_fixture_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let junk = dir.path().join("junk.jpg");
    std::fs::write(&junk, b"not a jpeg").unwrap();

    for decoder in ["std", "opt"] {
        let out = run_captured(&mut dims(decoder, &junk)).unwrap();
        assert!(!out.success(), "{decoder} accepted junk");
    }
}

#[test]
fn test_unknown_selector_fails_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path(), "ok.jpg", 8, 8);

    let out = run_captured(&mut dims("turbo", &fixture)).unwrap();
    assert!(!out.success());
    assert!(!out.text().contains("8x8"));

    let mut from_env = Command::new(BIN);
    from_env.env("BENCH_FN", "turbo").arg("dims").arg(&fixture);
    let out = run_captured(&mut from_env).unwrap();
    assert!(!out.success());
}

#[test]
fn test_parity_subcommand() {
    let dir = tempfile::tempdir().unwrap();
    let fixture = write_fixture(dir.path(), "fixture.jpg", 33, 17);

    let mut cmd = Command::new(BIN);
    cmd.env_remove("RUST_LOG").arg("parity").arg(&fixture);
    let out = run_captured(&mut cmd).unwrap().ensure_success().unwrap();
    assert!(out.text().contains("33x17"));
}

#[test]
fn test_check_subcommand_on_self_encoded_corpus() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "one.jpg", 16, 16);
    let report = dir.path().join("report.json");

    let mut cmd = Command::new(BIN);
    cmd.env_remove("RUST_LOG")
        .arg("corpus")
        .arg(dir.path());
    let out = run_captured(&mut cmd).unwrap().ensure_success().unwrap();
    assert!(out.text().starts_with("one.jpg\t"));

    // Whether the two decoders agree bit for bit is up to them; the report,
    // the summary line and the exit status must tell the same story.
    let mut cmd = Command::new(BIN);
    cmd.env_remove("RUST_LOG")
        .arg("check")
        .arg(dir.path())
        .arg("--json")
        .arg(&report);
    let out = run_captured(&mut cmd).unwrap();

    let text = std::fs::read_to_string(&report).unwrap();
    assert!(text.contains("\"entry\": \"one.jpg\""));

    let parsed: CheckReport = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.outcomes.len(), 1);
    assert_eq!(parsed.reference, "jpeg-decoder");
    assert_eq!(parsed.candidate, "image-jpeg");
    assert_eq!(out.success(), parsed.is_success(), "{}", out.text());

    match &parsed.outcomes[0] {
        EntryOutcome::Passed { .. } => assert!(out.text().contains("1 passed, 0 failed")),
        EntryOutcome::Failed { error, .. } => {
            assert!(out.text().contains("0 passed, 1 failed"));
            assert!(out.text().contains(error.as_str()));
        }
    }
}
