//! Executor tests covering document validation, path resolution and the
//! data-flow rules. The happy path through a real FMU binary is exercised by
//! the end-to-end workflow fixtures, not here.

use cads_workflow::{Error, Executor};

/// A workspace root holding one workflow document.
fn root_with_workflow(yaml: &str) -> (tempfile::TempDir, Executor) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("workflows")).unwrap();
    std::fs::write(dir.path().join("workflows/test.yaml"), yaml).unwrap();
    let exec = Executor::new(dir.path());
    (dir, exec)
}

#[test]
fn test_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let exec = Executor::new(dir.path());
    assert!(matches!(
        exec.run("workflows/absent.yaml"),
        Err(Error::ReadWorkflow { .. })
    ));
}

#[test]
fn test_unparseable_document() {
    let (_dir, exec) = root_with_workflow(": not : valid : yaml : [");
    assert!(matches!(
        exec.run("workflows/test.yaml"),
        Err(Error::InvalidWorkflow(_))
    ));
}

#[test]
fn test_empty_steps() {
    let (_dir, exec) = root_with_workflow("steps: []\n");
    let err = exec.run("workflows/test.yaml").unwrap_err();
    assert!(matches!(err, Error::InvalidWorkflow(_)));
    assert!(err.to_string().contains("does not define any steps"));
}

#[test]
fn test_step_without_name() {
    let (_dir, exec) = root_with_workflow("steps:\n  - fmu: a.fmu\n");
    let err = exec.run("workflows/test.yaml").unwrap_err();
    assert!(err.to_string().contains("step without a name"));
}

#[test]
fn test_duplicate_step_names() {
    let yaml = r#"
steps:
  - name: twin
    fmu: a.fmu
  - name: twin
    fmu: b.fmu
"#;
    let (_dir, exec) = root_with_workflow(yaml);
    let err = exec.run("workflows/test.yaml").unwrap_err();
    assert!(matches!(err, Error::InvalidWorkflow(_)));
    assert!(err.to_string().contains("defined multiple times"));
}

#[test]
fn test_step_without_fmu() {
    let (_dir, exec) = root_with_workflow("steps:\n  - name: a\n");
    let err = exec.run("workflows/test.yaml").unwrap_err();
    assert!(err.to_string().contains("missing its fmu path"));
}

#[test]
fn test_missing_fmu_file() {
    let yaml = r#"
steps:
  - name: producer
    fmu: fmu/absent.fmu
"#;
    let (_dir, exec) = root_with_workflow(yaml);
    match exec.run("workflows/test.yaml") {
        Err(Error::MissingFmu { step, path, .. }) => {
            assert_eq!(step, "producer");
            assert!(path.ends_with("fmu/absent.fmu"));
        }
        other => panic!("expected MissingFmu, got {other:?}"),
    }
}

#[test]
fn test_unknown_prior_step_reference() {
    let yaml = r#"
steps:
  - name: consumer
    fmu: consumer.fmu
    start_from:
      x: Q.foo
    result: results/consumer.json
"#;
    let (dir, exec) = root_with_workflow(yaml);
    // The FMU file exists, so the failure comes from the data-flow check
    // before the driver is ever invoked.
    std::fs::write(dir.path().join("consumer.fmu"), b"placeholder").unwrap();

    let err = exec.run("workflows/test.yaml").unwrap_err();
    assert!(matches!(err, Error::DataFlow(_)));
    assert!(err.to_string().contains("Q.foo"));
    // No snapshot may be written for the failed run.
    assert!(!dir.path().join("results/consumer.json").exists());
}

#[test]
fn test_driver_failure_names_the_step() {
    let yaml = r#"
steps:
  - name: broken
    fmu: broken.fmu
"#;
    let (dir, exec) = root_with_workflow(yaml);
    // Present but not a valid FMU archive.
    std::fs::write(dir.path().join("broken.fmu"), b"not a zip").unwrap();

    match exec.run("workflows/test.yaml") {
        Err(Error::Step { step, .. }) => assert_eq!(step, "broken"),
        other => panic!("expected Step error, got {other:?}"),
    }
}

#[test]
fn test_absolute_workflow_path() {
    let yaml = "steps: []\n";
    let (dir, exec) = root_with_workflow(yaml);
    let abs = dir.path().join("workflows/test.yaml");
    // Reaches validation, proving the absolute path was used as-is.
    let err = exec.run(&abs).unwrap_err();
    assert!(err.to_string().contains("does not define any steps"));
}
