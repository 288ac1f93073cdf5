use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quickclean() -> Command {
    Command::cargo_bin("quickclean").unwrap()
}

// ─── Help & version ──────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    quickclean()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("quick"))
        .stdout(predicate::str::contains("caches"))
        .stdout(predicate::str::contains("dev"))
        .stdout(predicate::str::contains("orphans"))
        .stdout(predicate::str::contains("large"))
        .stdout(predicate::str::contains("dup"))
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_version_flag() {
    quickclean()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quickclean"));
}

#[test]
fn test_unknown_subcommand_fails() {
    quickclean().arg("defragment").assert().failure();
}

// ─── Duplicate command ───────────────────────────────────────────────────────

#[test]
fn test_dup_finds_pair_in_directory() {
    let dir = TempDir::new().unwrap();
    let content = vec![0x42u8; 2 * 1024 * 1024];
    std::fs::write(dir.path().join("a.bin"), &content).unwrap();
    std::fs::write(dir.path().join("b.bin"), &content).unwrap();

    quickclean()
        .args(["dup", "--detailed"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.bin").or(predicate::str::contains("b.bin")));
}

#[test]
fn test_dup_json_output() {
    let dir = TempDir::new().unwrap();
    let content = vec![0x42u8; 2 * 1024 * 1024];
    std::fs::write(dir.path().join("a.bin"), &content).unwrap();
    std::fs::write(dir.path().join("b.bin"), &content).unwrap();

    quickclean()
        .args(["dup", "--format", "json"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"file_size\""))
        .stdout(predicate::str::contains("\"hash\""));
}

#[test]
fn test_dup_respects_min_size() {
    let dir = TempDir::new().unwrap();
    // Identical 1 KiB files, floor raised to 5 MB
    std::fs::write(dir.path().join("a.bin"), vec![1u8; 1024]).unwrap();
    std::fs::write(dir.path().join("b.bin"), vec![1u8; 1024]).unwrap();

    quickclean()
        .args(["dup", "--min-size", "5", "--quiet"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No duplicates found"));
}

// ─── Large-file command ──────────────────────────────────────────────────────

#[test]
fn test_large_scans_given_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("video.mov"), vec![0u8; 2 * 1024 * 1024]).unwrap();

    quickclean()
        .arg("large")
        .arg(dir.path())
        .args(["--min-size", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("video.mov"));
}

#[test]
fn test_large_category_filter_rejects_unknown() {
    quickclean()
        .args(["large", "/tmp", "--categories", "holograms"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown category"));
}

#[test]
fn test_large_json_output() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("backup.zip"), vec![0u8; 2 * 1024 * 1024]).unwrap();

    quickclean()
        .arg("large")
        .arg(dir.path())
        .args(["--min-size", "1", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"category\""));
}

// ─── Delete command ──────────────────────────────────────────────────────────

#[test]
fn test_delete_permanent_removes_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("junk.tmp");
    std::fs::write(&file, b"junk").unwrap();

    quickclean()
        .args(["delete", "--permanent"])
        .arg(&file)
        .assert()
        .success();

    assert!(!file.exists());
}

#[test]
fn test_delete_missing_path_succeeds() {
    quickclean()
        .args(["delete", "--permanent", "/tmp/quickclean-cli-no-such-file"])
        .assert()
        .success();
}

#[test]
fn test_delete_protected_path_fails() {
    quickclean()
        .args(["delete", "--permanent", "/usr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not allowed").or(predicate::str::contains("protected")));
}

// ─── Clean command ───────────────────────────────────────────────────────────

#[test]
fn test_clean_reports_freed_size() {
    let dir = TempDir::new().unwrap();
    let cache = dir.path().join("fake-cache");
    std::fs::create_dir(&cache).unwrap();
    std::fs::write(cache.join("blob"), vec![0u8; 8192]).unwrap();

    quickclean()
        .arg("clean")
        .arg(&cache)
        .assert()
        .success()
        .stdout(predicate::str::contains("Freed"));

    assert!(cache.exists());
    assert_eq!(std::fs::read_dir(&cache).unwrap().count(), 0);
}

#[test]
fn test_clean_missing_path_fails() {
    quickclean()
        .args(["clean", "/tmp/quickclean-cli-no-such-cache"])
        .assert()
        .failure();
}

// ─── Dev command ─────────────────────────────────────────────────────────────

#[test]
fn test_dev_json_output() {
    quickclean()
        .args(["dev", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"safe_to_clean\""));
}

// ─── Completions ─────────────────────────────────────────────────────────────

#[test]
fn test_completions_generate() {
    quickclean()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quickclean"));
}
