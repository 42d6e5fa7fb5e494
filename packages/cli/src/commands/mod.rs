pub mod edit;
pub mod init;
pub mod render;

pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use folio_document::{validate_nesting, Document};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve `path` against the working directory
pub(crate) fn resolve(cwd: &str, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}

/// Read and decode a document, warning about malformed table/kanban nesting
pub(crate) fn read_document(path: &Path) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let document = Document::from_json(&content)
        .with_context(|| format!("Invalid document: {}", path.display()))?;

    for violation in validate_nesting(&document) {
        eprintln!("  {} {}", "⚠️".yellow(), violation);
    }

    Ok(document)
}

/// Write `content` to `output`, or print it when there is no output path
pub(crate) fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, content).with_context(|| format!("Cannot write {}", path.display()))
        }
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}
