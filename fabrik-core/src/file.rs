use std::path::{Path, PathBuf};

use eyre::Result;

/// Trait for types that represent a generated output unit.
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk, creating parent directories as needed.
    ///
    /// A file whose on-disk content already matches the rendered
    /// content is left untouched and reported as skipped, so repeated
    /// runs do not churn timestamps.
    ///
    /// Writes are non-transactional: a failure here aborts the batch and
    /// leaves previously written files in place.
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        let content = self.render();
        if matches!(std::fs::read_to_string(&path), Ok(existing) if existing == content) {
            return Ok(WriteResult::Skipped);
        }
        write_file(&path, &content)?;
        Ok(WriteResult::Written)
    }
}

/// Write content to a path, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped, its content already matched
    Skipped,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Unit {
        name: &'static str,
        content: &'static str,
    }

    impl GeneratedFile for Unit {
        fn path(&self, base: &Path) -> PathBuf {
            base.join(self.name)
        }

        fn render(&self) -> String {
            self.content.to_string()
        }
    }

    #[test]
    fn test_write_file_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.go");

        write_file(&path, "package builders").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "package builders");
    }

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("test.go");

        write_file(&path, "nested").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_unit_write_overwrites_changed_content() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("test.go"), "original").unwrap();

        let unit = Unit {
            name: "test.go",
            content: "updated",
        };
        assert_eq!(unit.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("test.go")).unwrap(),
            "updated"
        );
    }

    #[test]
    fn test_unit_write_skips_matching_content() {
        let temp = TempDir::new().unwrap();
        let unit = Unit {
            name: "test.go",
            content: "package builders\n",
        };

        assert_eq!(unit.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(unit.write(temp.path()).unwrap(), WriteResult::Skipped);
    }
}
