use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub const TWO_BACK_HOUSES: &str = r#"
[[house]]
odd = "2.00"
stake = 100

[[house]]
odd = "2.10"
"#;

/// Write `contents` to `name` inside a fresh temp directory.
///
/// The directory is returned so it outlives the test body.
pub fn write_temp(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write temp file");
    (dir, path)
}
