//! The process-level entry point shared by the CLI and the HTTP service.

use std::path::{Path, PathBuf};

use crate::executor::{Executor, RunResults};
use crate::Error;

/// Executes workflows against a resolved working root.
#[derive(Debug)]
pub struct Runner {
    root: PathBuf,
    exec: Executor,
}

impl Runner {
    /// Create a runner. When `root` is given it must look like a working
    /// root; otherwise ancestors of the current directory are probed.
    pub fn new(root: Option<PathBuf>) -> Result<Self, Error> {
        let root = resolve_root(root)?;
        let exec = Executor::new(&root);
        Ok(Self { root, exec })
    }

    /// The resolved working root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Execute the workflow and return its results.
    pub fn run(&self, workflow_path: impl AsRef<Path>) -> Result<RunResults, Error> {
        self.exec.run(workflow_path)
    }
}

/// Figure out the working root when not provided explicitly: the nearest
/// ancestor of the current directory that carries a `workflows/` directory.
pub fn resolve_root(explicit: Option<PathBuf>) -> Result<PathBuf, Error> {
    if let Some(path) = explicit {
        let abs = std::path::absolute(&path)?;
        if is_working_root(&abs) {
            return Ok(abs);
        }
        return Err(Error::WorkingRoot(format!(
            "{} does not look like a working root (no workflows/ directory)",
            abs.display()
        )));
    }

    let cwd = std::env::current_dir()?;
    let mut dir = cwd.as_path();
    loop {
        if is_working_root(dir) {
            return Ok(dir.to_path_buf());
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }
    Err(Error::WorkingRoot(
        "unable to locate the working root (looked for a workflows/ directory)".to_owned(),
    ))
}

fn is_working_root(path: &Path) -> bool {
    path.join("workflows").is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_root_must_have_workflows_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_root(Some(dir.path().to_path_buf())).is_err());

        std::fs::create_dir(dir.path().join("workflows")).unwrap();
        let resolved = resolve_root(Some(dir.path().to_path_buf())).unwrap();
        assert!(resolved.join("workflows").is_dir());
    }
}
