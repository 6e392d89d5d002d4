//! File I/O utilities with atomic writes
//!
//! Files ending in `.yaml` or `.yml` are read and written as YAML; every
//! other path is JSON.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::PilotError;

/// On-disk encoding of a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read a data file, returning an error if it doesn't exist
pub fn read_required<T, P>(path: P) -> Result<T, PilotError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(PilotError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| PilotError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);

    match DataFormat::from_path(path) {
        DataFormat::Json => serde_json::from_reader(reader).map_err(|e| {
            PilotError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        }),
        DataFormat::Yaml => serde_yaml::from_reader(reader).map_err(|e| {
            PilotError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        }),
    }
}

/// Write a data file atomically (write to temp, then rename)
pub fn write_atomic<T, P>(path: P, data: &T) -> Result<(), PilotError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            PilotError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| PilotError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    match DataFormat::from_path(path) {
        DataFormat::Json => serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| PilotError::Storage(format!("Failed to serialize data: {}", e)))?,
        DataFormat::Yaml => serde_yaml::to_writer(&mut writer, data)
            .map_err(|e| PilotError::Storage(format!("Failed to serialize data: {}", e)))?,
    }

    writer
        .flush()
        .map_err(|e| PilotError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| PilotError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        PilotError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        budget: f64,
    }

    fn sample() -> Sample {
        Sample {
            name: "Groceries".to_string(),
            budget: 350.0,
        }
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a.json")), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("a.YAML")), DataFormat::Yaml);
        assert_eq!(DataFormat::from_path(Path::new("a.yml")), DataFormat::Yaml);
        assert_eq!(DataFormat::from_path(Path::new("scenario")), DataFormat::Json);
    }

    #[test]
    fn test_json_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scenario.json");

        write_atomic(&path, &sample()).unwrap();
        let loaded: Sample = read_required(&path).unwrap();
        assert_eq!(loaded, sample());

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.trim_start().starts_with('{'));
    }

    #[test]
    fn test_yaml_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scenario.yaml");

        write_atomic(&path, &sample()).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("name: Groceries"));

        let loaded: Sample = read_required(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("scenario.json");

        write_atomic(&path, &sample()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join("scenario.json.tmp").exists());
    }

    #[test]
    fn test_read_required_missing_and_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");
        assert!(matches!(
            read_required::<Sample, _>(&missing),
            Err(PilotError::Storage(_))
        ));

        let corrupt = temp_dir.path().join("corrupt.json");
        fs::write(&corrupt, "not json at all").unwrap();
        assert!(read_required::<Sample, _>(&corrupt).is_err());
    }
}
