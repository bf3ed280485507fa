//! Result snapshot files.
//!
//! One step's final output map serializes as a pretty-printed JSON object
//! with keys in lexicographic order, so identical results always produce
//! byte-identical files. The write goes through a temporary file in the
//! target directory followed by a rename, so downstream observers never see
//! a torn file.

use std::io::Write;
use std::path::Path;

use crate::executor::StepOutputs;
use crate::Error;

/// Serialize `outputs` to `path`, creating missing parent directories.
pub fn write(path: &Path, outputs: &StepOutputs) -> Result<(), Error> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent).map_err(|source| Error::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let mut body = serde_json::to_vec_pretty(outputs)?;
    body.push(b'\n');

    let dir = parent.unwrap_or_else(|| Path::new("."));
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|source| Error::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(&body).map_err(|source| Error::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    file.persist(path).map_err(|err| Error::Snapshot {
        path: path.to_path_buf(),
        source: err.error,
    })?;

    log::debug!("wrote result snapshot {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cads_fmi::ScalarValue;

    fn sample_outputs() -> StepOutputs {
        let mut outputs = StepOutputs::new();
        outputs.insert("mean".to_owned(), ScalarValue::Real(0.25));
        outputs.insert("health".to_owned(), ScalarValue::Integer(25));
        outputs.insert("alarm".to_owned(), ScalarValue::Boolean(false));
        outputs
    }

    #[test]
    fn test_snapshot_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("step.json");
        write(&path, &sample_outputs()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        // Keys sorted lexicographically, booleans unquoted, trailing newline.
        assert_eq!(
            content,
            "{\n  \"alarm\": false,\n  \"health\": 25,\n  \"mean\": 0.25\n}\n"
        );
    }

    #[test]
    fn test_snapshot_is_byte_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("step.json");

        write(&path, &sample_outputs()).unwrap();
        let first = std::fs::read(&path).unwrap();
        write(&path, &sample_outputs()).unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/results/step.json");
        write(&path, &sample_outputs()).unwrap();
        assert!(path.exists());
    }
}
