//! JSON import and export of filing systems.
//!
//! A file holds either one system object or a bundle `{ "domains": [...] }`.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Hierarchy;
use crate::validation::{validate_domains, validate_system, MAX_FILE_SIZE};

#[derive(Deserialize)]
#[serde(untagged)]
enum SystemFile {
    Bundle { domains: Vec<Hierarchy> },
    Single(Hierarchy),
}

/// Parse and validate a JSON document holding one system or a domain bundle.
pub fn parse_systems(json: &str) -> Result<Vec<Hierarchy>> {
    match serde_json::from_str::<SystemFile>(json)? {
        SystemFile::Bundle { domains } => {
            validate_domains(&domains)?;
            Ok(domains)
        }
        SystemFile::Single(system) => {
            validate_system(&system)?;
            Ok(vec![system])
        }
    }
}

pub fn import_file(path: &Path) -> Result<Vec<Hierarchy>> {
    let size = fs::metadata(path)?.len();
    if size > MAX_FILE_SIZE {
        return Err(Error::Validation(format!(
            "{} is {} bytes; the limit is {} bytes",
            path.display(),
            size,
            MAX_FILE_SIZE
        )));
    }
    let content = fs::read_to_string(path)?;
    let systems = parse_systems(&content)?;
    tracing::info!(path = %path.display(), systems = systems.len(), "imported");
    Ok(systems)
}

/// Import every `*.json` file below `dir`, in path order.
/// Files that fail to import are logged and skipped.
pub fn load_dir(dir: &Path) -> Result<Vec<Hierarchy>> {
    if !dir.is_dir() {
        return Err(Error::NotFound(format!("systems directory {}", dir.display())));
    }
    let mut systems = Vec::new();
    for path in list_json_files(dir) {
        match import_file(&path) {
            Ok(found) => systems.extend(found),
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping"),
        }
    }
    Ok(systems)
}

pub fn export_system<W: Write>(system: &Hierarchy, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, system)?;
    Ok(())
}

pub fn export_file(system: &Hierarchy, path: &Path) -> Result<()> {
    let mut buf = Vec::new();
    export_system(system, &mut buf)?;
    buf.push(b'\n');
    fs::write(path, buf)?;
    tracing::info!(path = %path.display(), system = %system.name, "exported");
    Ok(())
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("json") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files
}
