//! Command implementations.

pub mod products;
pub mod upload;

use std::path::PathBuf;

use serde::Serialize;
use vitrine_core::FileUpload;

/// Print a value as pretty JSON on stdout.
#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Read files into memory, guessing each content type from its extension.
async fn read_files(paths: &[PathBuf]) -> std::io::Result<Vec<FileUpload>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            std::io::Error::new(e.kind(), format!("{}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        let content_type = FileUpload::content_type_for(&file_name);
        files.push(FileUpload::new(file_name, content_type, bytes));
    }
    Ok(files)
}
