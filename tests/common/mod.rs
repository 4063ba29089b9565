#![allow(dead_code)]

pub mod command;
pub mod file;

use assert_fs::TempDir;
use record::areas::repository::Repository;
use record::artifacts::objects::commit::{Identity, Timestamp};
use rstest::fixture;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

pub const AUTHOR_NAME: &str = "Jane Doe";
pub const AUTHOR_EMAIL: &str = "jane@example.com";
pub const AUTHOR_DATE: &str = "1604560870 +0100";

/// Output sink whose contents stay readable after the repository takes it
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub struct TestRepository {
    pub dir: TempDir,
    pub repository: Repository,
    pub output: SharedBuffer,
}

impl TestRepository {
    pub fn path(&self) -> &Path {
        self.repository.path()
    }

    pub fn metadata_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.path().join(".git").join(name))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
    }
}

pub fn identity() -> Identity {
    Identity::new(AUTHOR_NAME, AUTHOR_EMAIL)
}

pub fn timestamp() -> Timestamp {
    AUTHOR_DATE.parse().expect("valid timestamp")
}

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn repository(repository_dir: TempDir) -> TestRepository {
    let output = SharedBuffer::default();
    let repository = Repository::new(
        &repository_dir.path().to_string_lossy(),
        Box::new(output.clone()),
    )
    .expect("Failed to open repository");

    TestRepository {
        dir: repository_dir,
        repository,
        output,
    }
}

#[fixture]
pub fn init_repository(repository: TestRepository) -> TestRepository {
    repository.repository.init().expect("Failed to init");
    repository.output.clear();
    repository
}
