use crate::common::{AUTHOR_DATE, AUTHOR_EMAIL, AUTHOR_NAME};
use assert_cmd::Command;
use std::path::Path;

pub fn run_record_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("record").expect("Failed to find record binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn record_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_record_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("GIT_COMMITTER_NAME", AUTHOR_NAME),
        ("GIT_COMMITTER_EMAIL", AUTHOR_EMAIL),
        ("GIT_COMMITTER_DATE", AUTHOR_DATE),
    ]);
    cmd
}
