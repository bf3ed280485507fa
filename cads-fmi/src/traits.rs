use std::path::{Path, PathBuf};

use cads_fmi_schema::MajorVersion;

use crate::Error;

/// An extracted FMU archive of one specific FMI major version.
pub trait FmiImport: Sized {
    /// The FMI major version implemented by this import
    const MAJOR_VERSION: MajorVersion;

    /// The raw parsed XML schema type
    type ModelDescription;

    /// The raw FMI bindings type
    type Binding;

    /// Create a new FMI import from a directory containing the unzipped FMU
    fn new(dir: tempfile::TempDir, schema_xml: &str) -> Result<Self, Error>;

    /// Return the path to the extracted FMU
    fn archive_path(&self) -> &Path;

    /// Get the path of the shared library inside the archive
    fn shared_lib_path(&self, model_identifier: &str) -> Result<PathBuf, Error>;

    /// Return the location of the extracted `resources` directory
    fn resource_url(&self) -> url::Url {
        url::Url::from_file_path(self.archive_path().join("resources"))
            .expect("Error forming resource location URL")
    }

    /// Get a reference to the raw-schema model description
    fn model_description(&self) -> &Self::ModelDescription;

    /// Load the shared library and return the raw bindings.
    fn binding(&self, model_identifier: &str) -> Result<Self::Binding, Error>;
}
