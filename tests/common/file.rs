use derive_new::new;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

pub fn write_file(file_spec: FileSpec) {
    // make sure the parent directory exists
    if let Some(parent) = file_spec.path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| panic!("Failed to create directory {:?}: {}", parent, e));
    }

    std::fs::write(&file_spec.path, &file_spec.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", file_spec.path, e));
}

pub fn write_generated_files(dir: &Path, files_count: usize) -> Vec<FileSpec> {
    use fake::{
        Fake,
        faker::lorem::en::{Word, Words},
    };

    (0..files_count)
        .map(|i| {
            // the index keeps generated names unique
            let file_name = format!("{}_{}.txt", Word().fake::<String>(), i);
            let file_path = dir.join(&file_name);
            let file_content = Words(5..10).fake::<Vec<String>>().join(" ");

            let file_spec = FileSpec::new(file_path, file_content);
            write_file(file_spec.clone());

            file_spec
        })
        .collect::<Vec<_>>()
}

#[cfg(unix)]
pub fn write_executable(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    write_file(FileSpec::new(path.to_path_buf(), content.to_string()));
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .unwrap_or_else(|e| panic!("Failed to chmod {:?}: {}", path, e));
}

#[cfg(unix)]
pub fn mode_of(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .unwrap_or_else(|e| panic!("Failed to stat {:?}: {}", path, e))
        .permissions()
        .mode()
        & 0o777
}

/// Relative paths of every visible file and symlink under `dir`, sorted
pub fn list_visible_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.'))
        .filter_map(Result::ok)
        .filter(|entry| !entry.file_type().is_dir())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(dir)
                .expect("entry under dir")
                .to_path_buf()
        })
        .collect::<Vec<_>>();
    files.sort();
    files
}
