use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

fn write_file(root: &Path, rel: &str, size: usize) {
    let p = root.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(p, vec![0u8; size]).unwrap();
}

fn setup_media_tree() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "Proxy/a.mov", 1_048_576);
    write_file(dir.path(), "RenderCache/b.dvcc", 2_097_152);
    write_file(dir.path(), "misc/c.txt", 10);
    dir
}

fn audit() -> Command {
    let mut cmd = Command::cargo_bin("resolve_audit").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_missing_root_exits_with_2() {
    let dir = tempdir().unwrap();

    audit()
        .arg(dir.path().join("does-not-exist"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Root path does not exist"));
}

#[test]
fn test_audit_prints_categories_and_largest() {
    let dir = setup_media_tree();

    audit()
        .arg(dir.path())
        .arg("--top")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 3.00 MB"))
        .stdout(predicate::str::contains("== Size by category =="))
        .stdout(predicate::str::contains("render_cache"))
        .stdout(predicate::str::contains("b.dvcc"))
        .stdout(predicate::str::contains("a.mov").not())
        .stdout(predicate::str::contains(".txt"));
}

#[test]
fn test_categories_only_stops_after_category_table() {
    let dir = setup_media_tree();

    audit()
        .arg(dir.path())
        .arg("--categories-only")
        .assert()
        .success()
        .stdout(predicate::str::contains("== Size by category =="))
        .stdout(predicate::str::contains("Top largest files").not());
}

#[test]
fn test_report_writes_json_and_csv() {
    let dir = setup_media_tree();
    let out = tempdir().unwrap();
    let base = out.path().join("reports/audit");

    audit()
        .arg(dir.path())
        .arg("--top")
        .arg("2")
        .arg("--report")
        .arg(&base)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote report"));

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(base.with_extension("json")).unwrap()).unwrap();
    assert_eq!(json["total_bytes"], 3_145_738);
    assert_eq!(json["by_category_bytes"]["other"]["bytes"], 10);

    let csv = fs::read_to_string(base.with_extension("csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "path,bytes,human");
    assert!(lines[1].ends_with("b.dvcc,2097152,2.00 MB"));
}

#[test]
fn test_delete_extension_after_yes() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "CacheClip/one.dvcc", 300);
    write_file(dir.path(), "CacheClip/two.DVCC", 700);
    write_file(dir.path(), "CacheClip/keep.mov", 50);

    audit()
        .arg(dir.path())
        .arg("--delete-ext")
        .arg("dvcc")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Proceed with deletion? [y/N]"))
        .stdout(predicate::str::contains("Deleted 2 files, freed 1000.00 B"));

    assert!(!dir.path().join("CacheClip/one.dvcc").exists());
    assert!(!dir.path().join("CacheClip/two.DVCC").exists());
    assert!(dir.path().join("CacheClip/keep.mov").exists());
}

#[test]
fn test_delete_category_refused_keeps_files() {
    let dir = setup_media_tree();

    audit()
        .arg(dir.path())
        .arg("--delete-category")
        .arg("proxy")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    assert!(dir.path().join("Proxy/a.mov").exists());
}

#[test]
fn test_delete_category_without_input_is_refusal() {
    let dir = setup_media_tree();

    audit()
        .arg(dir.path())
        .arg("--delete-category")
        .arg("render_cache")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));

    assert!(dir.path().join("RenderCache/b.dvcc").exists());
}

#[test]
fn test_recent_files_are_not_offered_for_deletion() {
    let dir = setup_media_tree();
    let path = dir.path().join("Proxy/a.mov");
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::now() - Duration::from_secs(5 * 86_400))
        .unwrap();

    audit()
        .arg(dir.path())
        .arg("--delete-category")
        .arg("proxy")
        .arg("--min-age-days")
        .arg("30")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to delete."))
        .stdout(predicate::str::contains("Proceed with deletion?").not());

    assert!(path.exists());
}

#[test]
fn test_empty_category_is_reported() {
    let dir = setup_media_tree();

    audit()
        .arg(dir.path())
        .arg("--delete-category")
        .arg("stills")
        .assert()
        .success()
        .stdout(predicate::str::contains("No files found for category 'stills'."));
}

#[test]
fn test_custom_config_changes_classification() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "Proxy Media 2/a.mov", 100);
    let config = dir.path().join("audit.toml");
    fs::write(&config, "[categories]\nproxy = [\"Proxy Media 2\"]\n").unwrap();

    audit()
        .arg(dir.path().join("Proxy Media 2"))
        .arg("--config")
        .arg(&config)
        .arg("--delete-category")
        .arg("proxy")
        .write_stdin("yes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 files"));

    assert!(!dir.path().join("Proxy Media 2/a.mov").exists());
}

#[test]
fn test_bad_config_fails() {
    let dir = setup_media_tree();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[categories]\nother = [\"misc\"]\n").unwrap();

    audit()
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_missing_root_wins_over_bad_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[categories]\nother = [\"misc\"]\n").unwrap();

    audit()
        .arg(dir.path().join("does-not-exist"))
        .arg("--config")
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Root path does not exist"));
}

#[test]
fn test_tilde_expands_without_home_variable() {
    audit()
        .env_remove("HOME")
        .arg("~/resolve-audit-no-such-folder")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Root path does not exist"))
        .stderr(predicate::str::contains("~/resolve-audit-no-such-folder").not());
}
