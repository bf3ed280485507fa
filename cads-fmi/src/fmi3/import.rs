use std::{path::PathBuf, str::FromStr};

use cads_fmi_schema::MajorVersion;
use tempfile::TempDir;

use super::{binding, instance::Instance, schema};
use crate::{traits::FmiImport, Error};

/// FMU import for FMI 3.0
#[derive(Debug)]
pub struct Fmi3Import {
    /// Path to the unzipped FMU on disk
    dir: tempfile::TempDir,
    /// Parsed raw-schema model description
    model_description: schema::Fmi3ModelDescription,
}

impl FmiImport for Fmi3Import {
    const MAJOR_VERSION: MajorVersion = MajorVersion::FMI3;
    type ModelDescription = schema::Fmi3ModelDescription;
    type Binding = binding::Fmi3Binding;

    /// Create a new FMI 3.0 import from a directory containing the unzipped FMU
    fn new(dir: TempDir, schema_xml: &str) -> Result<Self, Error> {
        let model_description = schema::Fmi3ModelDescription::from_str(schema_xml)?;
        Ok(Self {
            dir,
            model_description,
        })
    }

    #[inline]
    fn archive_path(&self) -> &std::path::Path {
        self.dir.path()
    }

    /// Get the path to the shared library
    fn shared_lib_path(&self, model_identifier: &str) -> Result<PathBuf, Error> {
        use std::env::consts::{ARCH, OS};
        let platform_folder = match (OS, ARCH) {
            ("windows", "x86_64") => "x86_64-windows",
            ("windows", "x86") => "x86-windows",
            ("linux", "x86_64") => "x86_64-linux",
            ("linux", "x86") => "x86-linux",
            ("macos", "x86_64") => "x86_64-darwin",
            ("macos", "aarch64") => "aarch64-darwin",
            _ => {
                return Err(Error::UnsupportedPlatform {
                    os: OS.to_string(),
                    arch: ARCH.to_string(),
                });
            }
        };
        let fname = format!("{model_identifier}{}", std::env::consts::DLL_SUFFIX);
        Ok(PathBuf::from("binaries").join(platform_folder).join(fname))
    }

    /// Get the parsed raw-schema model description
    fn model_description(&self) -> &Self::ModelDescription {
        &self.model_description
    }

    /// Load the plugin shared library and return the raw bindings.
    fn binding(&self, model_identifier: &str) -> Result<Self::Binding, Error> {
        let lib_path = self.dir.path().join(self.shared_lib_path(model_identifier)?);
        log::trace!("Loading shared library {lib_path:?}");
        unsafe { binding::Fmi3Binding::new(lib_path).map_err(Error::from) }
    }
}

impl Fmi3Import {
    /// Get a `String` representation of the resources path for this FMU.
    ///
    /// As per the FMI 3.0 standard, `resourcePath` is the absolute file path
    /// of the resources directory of the extracted FMU archive.
    pub fn canonical_resource_path_string(&self) -> String {
        std::path::absolute(self.archive_path().join("resources"))
            .expect("Invalid resource path")
            .to_str()
            .expect("Invalid resource path")
            .to_owned()
    }

    /// Create a new Co-Simulation instance of the FMU
    pub fn instantiate_cs(
        &self,
        instance_name: &str,
        visible: bool,
        logging_on: bool,
    ) -> Result<Instance, Error> {
        Instance::new(self, instance_name, visible, logging_on)
    }
}
