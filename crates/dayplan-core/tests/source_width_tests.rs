//! Keeps every Rust source line in the workspace within rustfmt's
//! 100-column default.

use std::fs;
use std::path::{Path, PathBuf};

const MAX_WIDTH: usize = 100;

fn rust_files(dir: &Path, found: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            rust_files(&path, found);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            found.push(path);
        }
    }
}

#[test]
fn test_source_lines_fit_rustfmt_width() {
    let crates = Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap();
    let mut files = Vec::new();
    for krate in ["dayplan-core", "dayplan-cli"] {
        for dir in ["src", "tests"] {
            let path = crates.join(krate).join(dir);
            if path.is_dir() {
                rust_files(&path, &mut files);
            }
        }
    }
    assert!(!files.is_empty());

    let mut too_wide = Vec::new();
    for file in &files {
        let source = fs::read_to_string(file).unwrap();
        for (number, line) in source.lines().enumerate() {
            if line.chars().count() > MAX_WIDTH {
                too_wide.push(format!("{}:{}", file.display(), number + 1));
            }
        }
    }
    assert!(too_wide.is_empty(), "Lines over {MAX_WIDTH} columns: {too_wide:#?}");
}
