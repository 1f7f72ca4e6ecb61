//! Input collection: Go sources from file and directory arguments.

use std::path::{Path, PathBuf};

use fabrik_parse::{Error, Result, SourceFile};

/// Collect Go sources from the given paths, in a stable order.
///
/// Directories contribute their `.go` entries sorted by name; test
/// files (`*_test.go`) are always skipped. Explicit file arguments are
/// taken as given.
pub fn collect(paths: &[PathBuf], recursive: bool) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_dir(path, recursive, &mut sources)?;
        } else {
            sources.push(SourceFile::open(path)?);
        }
    }
    Ok(sources)
}

fn collect_dir(dir: &Path, recursive: bool, out: &mut Vec<SourceFile>) -> Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| Error::io(dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if recursive {
                collect_dir(&path, recursive, out)?;
            }
        } else if is_go_source(&path) {
            out.push(SourceFile::open(&path)?);
        }
    }
    Ok(())
}

fn is_go_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".go") && !name.ends_with("_test.go")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_collects_go_files_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("zeta.go"), "package m\n").unwrap();
        fs::write(temp.path().join("alpha.go"), "package m\n").unwrap();
        fs::write(temp.path().join("notes.txt"), "skip\n").unwrap();

        let sources = collect(&[temp.path().to_path_buf()], false).unwrap();
        let names: Vec<&str> = sources
            .iter()
            .map(|s| s.name.rsplit('/').next().unwrap())
            .collect();
        assert_eq!(names, ["alpha.go", "zeta.go"]);
    }

    #[test]
    fn test_skips_test_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("model.go"), "package m\n").unwrap();
        fs::write(temp.path().join("model_test.go"), "package m\n").unwrap();

        let sources = collect(&[temp.path().to_path_buf()], false).unwrap();
        assert_eq!(sources.len(), 1);
    }

    #[test]
    fn test_recursion_is_opt_in() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("top.go"), "package m\n").unwrap();
        fs::write(temp.path().join("sub").join("deep.go"), "package m\n").unwrap();

        assert_eq!(collect(&[temp.path().to_path_buf()], false).unwrap().len(), 1);
        assert_eq!(collect(&[temp.path().to_path_buf()], true).unwrap().len(), 2);
    }

    #[test]
    fn test_explicit_file_is_taken_as_given() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("model_test.go");
        fs::write(&path, "package m\n").unwrap();

        // Filters apply to directory scans only.
        let sources = collect(&[path], false).unwrap();
        assert_eq!(sources.len(), 1);
    }

    #[test]
    fn test_missing_file_reports_io_error() {
        let missing = PathBuf::from("/nonexistent/model.go");
        assert!(collect(&[missing], false).is_err());
    }
}
