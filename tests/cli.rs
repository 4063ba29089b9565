use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;
use common::command::{record_commit, run_record_command};
use common::file::{FileSpec, write_file};
use common::repository_dir;

const INITIAL_COMMIT: &str = "3d55094ecc4dc83fccdeac612207d3f313b570ce";
const BLOB_A: &str = "78981922613b2afb6025042ff6bd878ac1994e85";

fn committed_repository(dir: &TempDir) {
    run_record_command(dir.path(), &["init"]).assert().success();
    write_file(FileSpec::new(dir.path().join("src").join("a"), "a\n".to_string()));
    record_commit(dir.path(), "Initial commit")
        .assert()
        .success();
}

#[rstest]
fn init_reports_metadata_directory(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let absolute_path = repository_dir.path().canonicalize()?.display().to_string();

    run_record_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^Initialized empty repository in .+\n$")?)
        .stdout(predicate::str::contains(absolute_path));

    run_record_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Reinitialized existing repository"));

    Ok(())
}

#[rstest]
fn init_creates_missing_target_directory(repository_dir: TempDir) {
    let target = repository_dir.path().join("nested").join("project");

    let target_arg = target.to_string_lossy().to_string();

    run_record_command(repository_dir.path(), &["init", target_arg.as_str()])
        .assert()
        .success();

    assert!(target.join(".git").join("HEAD").is_file());
}

#[rstest]
fn commit_uses_identity_and_date_from_environment(repository_dir: TempDir) {
    run_record_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("src").join("a"),
        "a\n".to_string(),
    ));

    record_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success()
        .stdout("[master (root-commit) 3d55094] Initial commit\n");
}

#[rstest]
fn commit_without_identity_fails(repository_dir: TempDir) {
    run_record_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_record_command(repository_dir.path(), &["commit", "-m", "anonymous"])
        .env_remove("GIT_COMMITTER_NAME")
        .env_remove("GIT_COMMITTER_EMAIL")
        .assert()
        .failure();
}

#[rstest]
fn cat_file_prints_blob_and_commit(repository_dir: TempDir) {
    committed_repository(&repository_dir);

    run_record_command(repository_dir.path(), &["cat-file", "-p", BLOB_A])
        .assert()
        .success()
        .stdout("a\n");

    run_record_command(repository_dir.path(), &["cat-file", "-p", INITIAL_COMMIT])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "tree 18f2e39b481f24164276e5aca5aafb64dc469e67\n",
        ))
        .stdout(predicate::str::contains(
            "committer Jane Doe <jane@example.com> 1604560870 +0100\n\nInitial commit\n",
        ));
}

#[rstest]
fn cat_file_rejects_malformed_ids(repository_dir: TempDir) {
    committed_repository(&repository_dir);

    run_record_command(repository_dir.path(), &["cat-file", "-p", "ABC"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("odd length"));
}

#[rstest]
fn branch_and_checkout_switch_working_tree(repository_dir: TempDir) {
    committed_repository(&repository_dir);

    run_record_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("b"),
        "b\n".to_string(),
    ));
    record_commit(repository_dir.path(), "Add b")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[master "));

    run_record_command(repository_dir.path(), &["checkout", "feature"])
        .assert()
        .success()
        .stdout("Switched to branch 'feature'\n");
    assert!(!repository_dir.path().join("b").exists());

    run_record_command(repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert!(repository_dir.path().join("b").is_file());
}

#[rstest]
fn branch_with_invalid_name_fails(repository_dir: TempDir) {
    committed_repository(&repository_dir);

    run_record_command(repository_dir.path(), &["branch", "bad..name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));
}

#[rstest]
fn commit_from_subdirectory_uses_enclosing_repository(repository_dir: TempDir) {
    run_record_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    let src = repository_dir.path().join("src");
    write_file(FileSpec::new(src.join("a"), "a\n".to_string()));

    record_commit(&src, "Initial commit")
        .assert()
        .success()
        .stdout("[master (root-commit) 3d55094] Initial commit\n");

    assert!(repository_dir.path().join(".git/refs/heads/master").is_file());
    assert!(!src.join(".git").exists());

    run_record_command(&src, &["cat-file", "-p", BLOB_A])
        .assert()
        .success()
        .stdout("a\n");
}

#[rstest]
fn commands_outside_a_repository_fail(repository_dir: TempDir) {
    write_file(FileSpec::new(
        repository_dir.path().join("a"),
        "a\n".to_string(),
    ));

    record_commit(repository_dir.path(), "Initial commit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No .git repository found"));
    run_record_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No .git repository found"));

    assert!(!repository_dir.path().join(".git").exists());
}
