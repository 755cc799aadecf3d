use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NOP_LISTING: &str = "\
                      1: ; single instruction
00:00001000 4E71     12: NOP
garbage line
";

/// `<tmp>/asm` holds the listings, `<tmp>/data` receives the fixtures,
/// mirroring the `../data` convention.
fn workspace() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let asm = temp_dir.path().join("asm");
    let data = temp_dir.path().join("data");
    fs::create_dir(&asm).unwrap();
    fs::create_dir(&data).unwrap();
    (temp_dir, asm, data)
}

fn extract_lst(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("extract-lst").unwrap();
    cmd.current_dir(dir);
    cmd
}

#[test]
fn converts_listings_with_no_arguments() {
    let (_tmp, asm, data) = workspace();
    fs::write(asm.join("foo.o.lst"), NOP_LISTING).unwrap();

    extract_lst(&asm)
        .assert()
        .success()
        .stdout(predicate::str::contains("foo.o.lst => ../data/foo.tst"));

    assert_eq!(fs::read(data.join("foo.tst")).unwrap(), b"4E71\tNOP\n");
}

#[test]
fn empty_listing_creates_empty_fixture() {
    let (_tmp, asm, data) = workspace();
    fs::write(asm.join("empty.o.lst"), "").unwrap();

    extract_lst(&asm).assert().success();

    assert!(data.join("empty.tst").exists());
    assert_eq!(fs::metadata(data.join("empty.tst")).unwrap().len(), 0);
}

#[test]
fn second_run_produces_identical_output() {
    let (_tmp, asm, data) = workspace();
    fs::write(asm.join("foo.o.lst"), NOP_LISTING).unwrap();

    extract_lst(&asm).assert().success();
    let first = fs::read(data.join("foo.tst")).unwrap();
    extract_lst(&asm).assert().success();
    let second = fs::read(data.join("foo.tst")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn no_listings_is_not_an_error() {
    let (_tmp, asm, data) = workspace();

    extract_lst(&asm).assert().success();

    assert_eq!(fs::read_dir(&data).unwrap().count(), 0);
}

#[test]
fn plain_lst_files_are_not_listings() {
    let (_tmp, asm, data) = workspace();
    fs::write(asm.join("demo.lst"), NOP_LISTING).unwrap();

    extract_lst(&asm).assert().success();

    assert!(!data.join("demo.tst").exists());
    assert_eq!(fs::read_dir(&data).unwrap().count(), 0);
}

#[test]
fn bare_extension_file_is_ignored() {
    let (_tmp, asm, data) = workspace();
    fs::write(asm.join("o.lst"), NOP_LISTING).unwrap();

    extract_lst(&asm).assert().code(0);

    assert_eq!(fs::read_dir(&data).unwrap().count(), 0);
}

#[test]
fn old_mac_line_endings_are_split() {
    let (_tmp, asm, data) = workspace();
    fs::write(
        asm.join("cr.o.lst"),
        "00:00001000 4E71 1: NOP\r00:00001002 4E75 2: RTS\r",
    )
    .unwrap();

    extract_lst(&asm).assert().success();

    assert_eq!(fs::read(data.join("cr.tst")).unwrap(), b"4E71\tNOP\n4E75\tRTS\n");
}

#[test]
fn missing_output_directory_exits_with_two() {
    let temp_dir = TempDir::new().unwrap();
    let asm = temp_dir.path().join("asm");
    fs::create_dir(&asm).unwrap();
    fs::write(asm.join("foo.o.lst"), NOP_LISTING).unwrap();

    extract_lst(&asm)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("foo.tst"))
        .stderr(predicate::str::contains("Create it or pass --output-dir"));

    assert!(!temp_dir.path().join("data").exists());
}

#[test]
fn fail_fast_exits_with_one() {
    let temp_dir = TempDir::new().unwrap();
    let asm = temp_dir.path().join("asm");
    fs::create_dir(&asm).unwrap();
    fs::write(asm.join("foo.o.lst"), NOP_LISTING).unwrap();

    extract_lst(&asm).arg("--fail-fast").assert().code(1);
}

#[test]
fn dry_run_writes_nothing() {
    let (_tmp, asm, data) = workspace();
    fs::write(asm.join("foo.o.lst"), NOP_LISTING).unwrap();

    extract_lst(&asm)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("foo.o.lst => ../data/foo.tst"));

    assert!(!data.join("foo.tst").exists());
}

#[test]
fn quiet_mode_prints_nothing_on_success() {
    let (_tmp, asm, data) = workspace();
    fs::write(asm.join("foo.o.lst"), NOP_LISTING).unwrap();

    extract_lst(&asm)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(data.join("foo.tst").exists());
}

#[test]
fn json_output_reports_each_file() {
    let (_tmp, asm, _data) = workspace();
    fs::write(asm.join("foo.o.lst"), NOP_LISTING).unwrap();

    extract_lst(&asm)
        .args(["--output-format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"conversion\""))
        .stdout(predicate::str::contains("\"records_written\": 1"));
}

#[test]
fn directory_and_suffix_overrides() {
    let (tmp, asm, _data) = workspace();
    let fixtures = tmp.path().join("fixtures");
    fs::create_dir(&fixtures).unwrap();
    fs::write(asm.join("move.o.lst"), "00:00002000 303C0010 3: move.w #$10,d0\n").unwrap();

    extract_lst(tmp.path())
        .args(["--input-dir", "asm", "--output-dir", "fixtures", "--output-suffix", "fix"])
        .assert()
        .success();

    assert_eq!(
        fs::read(fixtures.join("move.fix")).unwrap(),
        b"303C0010\tmove.w #$10,d0\n"
    );
}

#[test]
fn config_file_in_working_directory_is_picked_up() {
    let (_tmp, asm, data) = workspace();
    fs::write(asm.join("foo.o.lst"), NOP_LISTING).unwrap();
    fs::write(asm.join("extract-lst.toml"), "[output]\nsuffix = \"fixture\"\n").unwrap();

    extract_lst(&asm).assert().success();

    assert!(data.join("foo.fixture").exists());
}

#[test]
fn generate_config_writes_sample() {
    let (_tmp, asm, _data) = workspace();

    extract_lst(&asm)
        .args(["--generate-config", "--config", "sample.toml"])
        .assert()
        .success();

    let sample = fs::read_to_string(asm.join("sample.toml")).unwrap();
    assert!(sample.contains("[listing]"));
    assert!(sample.contains("o.lst"));
}

#[test]
fn missing_input_directory_exits_with_one() {
    let (tmp, _asm, _data) = workspace();

    extract_lst(tmp.path())
        .args(["--input-dir", "nowhere"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nowhere"));
}

#[test]
fn help_lists_exit_status() {
    let (tmp, _asm, _data) = workspace();

    extract_lst(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("EXIT STATUS"));
}
