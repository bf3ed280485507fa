//! Import-layer tests against synthetic FMU archives. These exercise the
//! unpack/detect/parse path and the error taxonomy up to the point where a
//! native binary would be needed.

use std::io::{Cursor, Write};

use cads_fmi::{traits::FmiImport, Error, FmuConfig, Import};
use zip::write::SimpleFileOptions;

/// Build an in-memory FMU archive holding just a modelDescription.xml.
fn fmu_archive(model_description: &str) -> Cursor<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("modelDescription.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(model_description.as_bytes()).unwrap();
    writer.finish().unwrap()
}

const FMI2_CS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fmiModelDescription fmiVersion="2.0" modelName="Producer" guid="{1234}">
  <CoSimulation modelIdentifier="Producer"/>
  <ModelVariables/>
</fmiModelDescription>"#;

const FMI3_CS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fmiModelDescription fmiVersion="3.0" modelName="Consumer" instantiationToken="{abcd}">
  <CoSimulation modelIdentifier="Consumer"/>
  <ModelVariables/>
</fmiModelDescription>"#;

const FMI2_ME_ONLY_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fmiModelDescription fmiVersion="2.0" modelName="MeOnly" guid="{1}">
  <ModelExchange modelIdentifier="MeOnly"/>
  <ModelVariables/>
</fmiModelDescription>"#;

#[test]
fn test_import_fmi2() {
    let import = Import::new(fmu_archive(FMI2_CS_XML))
        .unwrap()
        .as_fmi2()
        .unwrap();
    assert_eq!(import.model_description().fmi_version, "2.0");
    assert_eq!(import.model_description().model_name, "Producer");
}

#[test]
fn test_import_fmi3() {
    let import = Import::new(fmu_archive(FMI3_CS_XML))
        .unwrap()
        .as_fmi3()
        .unwrap();
    assert_eq!(import.model_description().fmi_version, "3.0");
    assert_eq!(import.model_description().model_name, "Consumer");
}

#[test]
fn test_unsupported_fmi_version() {
    let xml = r#"<fmiModelDescription fmiVersion="1.0" modelName="Ancient"/>"#;
    match Import::new(fmu_archive(xml)) {
        Err(Error::UnsupportedFmiVersion(version)) => assert_eq!(version, "1.0"),
        other => panic!("expected UnsupportedFmiVersion, got {other:?}"),
    }
}

#[test]
fn test_not_an_archive() {
    let result = Import::new(Cursor::new(b"definitely not a zip".to_vec()));
    assert!(matches!(result, Err(Error::Zip(_))));
}

#[test]
fn test_missing_model_description() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("readme.txt", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"nothing here").unwrap();
    let archive = writer.finish().unwrap();

    assert!(matches!(Import::new(archive), Err(Error::Io(_))));
}

#[test]
fn test_scratch_directory_removed_on_drop() {
    let import = Import::new(fmu_archive(FMI2_CS_XML)).unwrap().as_fmi2().unwrap();
    let scratch = import.archive_path().to_path_buf();
    assert!(scratch.exists());
    drop(import);
    assert!(!scratch.exists());
}

#[test]
fn test_run_rejects_model_exchange_only() {
    // The Co-Simulation check happens before the shared library would be
    // loaded, so an XML-only archive is enough to reach it.
    let dir = tempfile::tempdir().unwrap();
    let fmu_path = dir.path().join("me_only.fmu");
    std::fs::write(&fmu_path, fmu_archive(FMI2_ME_ONLY_XML).into_inner()).unwrap();

    let config = FmuConfig {
        fmu_path,
        ..Default::default()
    };
    match cads_fmi::run(&config) {
        Err(Error::UnsupportedFmuKind(kind)) => assert_eq!(kind, "CoSimulation"),
        other => panic!("expected UnsupportedFmuKind, got {other:?}"),
    }
}

#[test]
fn test_run_missing_file_is_io_error() {
    let config = FmuConfig {
        fmu_path: "/nonexistent/path/to.fmu".into(),
        ..Default::default()
    };
    assert!(matches!(cads_fmi::run(&config), Err(Error::Io(_))));
}
