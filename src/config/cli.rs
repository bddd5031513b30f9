use crate::core::Storage;
use crate::utils::error::{PlotError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.input_dir.join(path);
        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PlotError::InputNotFoundError {
                path: full_path.display().to_string(),
            },
            _ => PlotError::IoError(e),
        })
    }

    fn output_path(&self, path: &str) -> Result<PathBuf> {
        let full_path = self.output_dir.join(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        Ok(full_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path(), temp_dir.path());

        match storage.read_file("rhm-insert.txt") {
            Err(PlotError::InputNotFoundError { path }) => {
                assert!(path.ends_with("rhm-insert.txt"))
            }
            other => panic!("expected input not found, got {:?}", other),
        }
    }

    #[test]
    fn test_output_path_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path(), temp_dir.path().join("plots/nested"));

        let path = storage.output_path("plot_insert.png").unwrap();
        assert_eq!(path, temp_dir.path().join("plots/nested/plot_insert.png"));
        assert!(temp_dir.path().join("plots/nested").is_dir());
    }

    #[test]
    fn test_relative_output_in_current_directory() {
        let storage = LocalStorage::new("", "");
        assert_eq!(
            storage.output_path("plot_churn.png").unwrap(),
            PathBuf::from("plot_churn.png")
        );
    }
}
